//! JSON-RPC dispatch and tool calls against files on disk

mod common;

use common::write_solid;
use frame_probe_analysis::AnalysisConfig;
use frame_probe_core::error_codes;
use frame_probe_server::FrameProbeServer;
use frame_probe_server::mcp::{Request, Response};
use frame_probe_server::transport::stdio::handle_request;
use serde_json::{Value, json};

fn server() -> FrameProbeServer {
    let config = AnalysisConfig {
        workers: 2,
        ..AnalysisConfig::default()
    };
    FrameProbeServer::new(config)
}

async fn call(server: &FrameProbeServer, message: Value) -> Option<Response> {
    let request: Request = serde_json::from_value(message).unwrap();
    handle_request(&request, server).await
}

async fn call_tool(server: &FrameProbeServer, name: &str, arguments: Value) -> Response {
    call(
        server,
        json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "tools/call",
            "params": { "name": name, "arguments": arguments }
        }),
    )
    .await
    .unwrap()
}

/// Parse the JSON carried in a text content block
fn tool_payload(response: &Response) -> Value {
    let result = response.result.as_ref().expect("tool call failed");
    let text = result["content"][0]["text"].as_str().unwrap();
    serde_json::from_str(text).unwrap()
}

#[tokio::test]
async fn test_initialize() {
    let response = call(
        &server(),
        json!({
            "jsonrpc": "2.0",
            "id": "init",
            "method": "initialize",
            "params": {
                "protocolVersion": "2025-11-25",
                "capabilities": {},
                "clientInfo": { "name": "test", "version": "0.0.1" }
            }
        }),
    )
    .await
    .unwrap();

    let result = response.result.unwrap();
    assert_eq!(result["serverInfo"]["name"], "frame-probe");
    assert_eq!(result["capabilities"]["tools"]["listChanged"], false);
}

#[tokio::test]
async fn test_notification_gets_no_response() {
    let response = call(
        &server(),
        json!({ "jsonrpc": "2.0", "method": "notifications/initialized" }),
    )
    .await;
    assert!(response.is_none());
}

#[tokio::test]
async fn test_tools_list() {
    let response = call(
        &server(),
        json!({ "jsonrpc": "2.0", "id": 2, "method": "tools/list" }),
    )
    .await
    .unwrap();

    let tools = response.result.unwrap()["tools"].clone();
    let names: Vec<_> = tools
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(
        names,
        [
            "analyze_screenshot",
            "compare_screenshots",
            "diagnose_screenshot",
            "analyze_directory"
        ]
    );
    assert!(tools[0]["inputSchema"]["properties"]["Path"].is_object());
}

#[tokio::test]
async fn test_unknown_method() {
    let response = call(
        &server(),
        json!({ "jsonrpc": "2.0", "id": 3, "method": "resources/list" }),
    )
    .await
    .unwrap();
    assert_eq!(response.error.unwrap().code, -32601);
}

#[tokio::test]
async fn test_analyze_screenshot_with_diagnosis() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_solid(dir.path(), "black.png", 2, 2, (0, 0, 0));

    let server = server();
    let response = call_tool(
        &server,
        "analyze_screenshot",
        json!({ "Path": path, "Diagnose": true }),
    )
    .await;
    let report = tool_payload(&response);

    assert_eq!(report["brightness"]["mean"], 0.0);
    assert_eq!(report["histogram"][0], 4);
    assert_eq!(report["dimensions"]["width"], 2);
    let issues: Vec<_> = report["issues"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i.as_str().unwrap().to_string())
        .collect();
    assert!(issues.iter().any(|i| i.starts_with("UNDEREXPOSED")));
    assert!(issues.iter().any(|i| i.starts_with("LOW_CONTRAST")));
}

#[tokio::test]
async fn test_analyze_screenshot_without_diagnosis_omits_issues() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_solid(dir.path(), "grey.png", 3, 3, (128, 128, 128));

    let response = call_tool(&server(), "analyze_screenshot", json!({ "Path": path })).await;
    let report = tool_payload(&response);
    assert!(report.get("issues").is_none());
}

#[tokio::test]
async fn test_compare_screenshots() {
    let dir = tempfile::tempdir().unwrap();
    let a = write_solid(dir.path(), "a.png", 2, 2, (100, 100, 100));

    let report = tool_payload(
        &call_tool(
            &server(),
            "compare_screenshots",
            json!({ "PathA": a, "PathB": a }),
        )
        .await,
    );
    assert_eq!(report["histogram_correlation"], 1.0);
    assert_eq!(report["differences"]["brightness"], 0.0);
}

#[tokio::test]
async fn test_diagnose_screenshot() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_solid(dir.path(), "white.png", 2, 2, (255, 255, 255));

    let response = call_tool(&server(), "diagnose_screenshot", json!({ "Path": path })).await;
    let body = tool_payload(&response);
    assert!(body["path"].as_str().unwrap().ends_with("white.png"));
    let issues = body["issues"].as_array().unwrap();
    assert!(
        issues
            .iter()
            .any(|i| i.as_str().unwrap().starts_with("OVEREXPOSED"))
    );
}

#[tokio::test]
async fn test_analyze_directory() {
    let dir = tempfile::tempdir().unwrap();
    write_solid(dir.path(), "b.png", 1, 1, (200, 10, 10));
    write_solid(dir.path(), "a.png", 1, 1, (10, 10, 200));
    std::fs::write(dir.path().join("c.png"), b"not a png").unwrap();

    let response = call_tool(&server(), "analyze_directory", json!({ "Path": dir.path() })).await;
    let body = tool_payload(&response);

    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 2);
    assert!(results[0]["path"].as_str().unwrap().ends_with("a.png"));
    assert!(results[1]["path"].as_str().unwrap().ends_with("b.png"));

    let skipped = body["skipped"].as_array().unwrap();
    assert_eq!(skipped.len(), 1);
    assert!(skipped[0]["path"].as_str().unwrap().ends_with("c.png"));
    assert!(skipped[0]["reason"].as_str().unwrap().contains("Not a valid PNG"));
}

#[tokio::test]
async fn test_error_codes() {
    let dir = tempfile::tempdir().unwrap();
    let fake = dir.path().join("fake.png");
    std::fs::write(&fake, b"GIF89a").unwrap();
    let server = server();

    let response = call_tool(&server, "analyze_screenshot", json!({ "Path": fake })).await;
    assert_eq!(response.error.unwrap().code, error_codes::FORMAT_ERROR);

    let missing = dir.path().join("missing.png");
    let response = call_tool(&server, "diagnose_screenshot", json!({ "Path": missing })).await;
    assert_eq!(response.error.unwrap().code, error_codes::IO_ERROR);

    let response = call_tool(&server, "analyze_screenshot", json!({})).await;
    assert_eq!(response.error.unwrap().code, -32602);

    let response = call_tool(&server, "resize_screenshot", json!({})).await;
    assert_eq!(response.error.unwrap().code, -32602);
}
