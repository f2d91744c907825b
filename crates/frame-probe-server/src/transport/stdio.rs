//! stdio transport for MCP JSON-RPC

use crate::mcp::{
    InitializeParams, InitializeResult, PROTOCOL_VERSION, Request, RequestId, Response,
    ServerCapabilities, ServerInfo, ToolsCapability, rpc_codes,
};
use crate::tools::{handle_tool_call, list_tools};
use crate::{FrameProbeServer, SERVER_NAME};
use frame_probe_core::{FrameProbeError, Result, error_codes};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, error, info};

/// Run the MCP server on stdio
pub async fn run(server: FrameProbeServer) -> Result<()> {
    let stdin = tokio::io::stdin();
    let mut stdout = tokio::io::stdout();
    let mut reader = BufReader::new(stdin);
    let mut line = String::new();

    info!("frame-probe MCP server starting on stdio");

    loop {
        line.clear();
        let bytes_read = reader
            .read_line(&mut line)
            .await
            .map_err(|e| FrameProbeError::Protocol(format!("Failed to read stdin: {}", e)))?;

        if bytes_read == 0 {
            // EOF - client disconnected
            info!("Client disconnected (EOF)");
            break;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        debug!("Received: {}", trimmed);

        let request: Request = match serde_json::from_str(trimmed) {
            Ok(r) => r,
            Err(e) => {
                error!("Failed to parse request: {}", e);
                continue;
            }
        };

        let Some(response) = handle_request(&request, &server).await else {
            debug!("Notification {} acknowledged", request.method);
            continue;
        };
        let response_json = serde_json::to_string(&response)?;

        debug!("Sending: {}", response_json);

        stdout
            .write_all(response_json.as_bytes())
            .await
            .map_err(|e| FrameProbeError::Protocol(format!("Failed to write stdout: {}", e)))?;
        stdout
            .write_all(b"\n")
            .await
            .map_err(|e| FrameProbeError::Protocol(format!("Failed to write newline: {}", e)))?;
        stdout
            .flush()
            .await
            .map_err(|e| FrameProbeError::Protocol(format!("Failed to flush stdout: {}", e)))?;
    }

    Ok(())
}

/// Dispatch one request; notifications yield `None`
pub async fn handle_request(request: &Request, server: &FrameProbeServer) -> Option<Response> {
    let id = request.id.clone()?;

    let response = match request.method.as_str() {
        "initialize" => handle_initialize(request, id),
        "initialized" | "notifications/initialized" => {
            Response::success(id, serde_json::json!({}))
        }
        "tools/list" => Response::success(id, serde_json::json!({ "tools": list_tools() })),
        "tools/call" => handle_tools_call(request, id, server).await,
        _ => Response::error(
            id,
            rpc_codes::METHOD_NOT_FOUND,
            format!("Method not found: {}", request.method),
        ),
    };

    Some(response)
}

fn handle_initialize(request: &Request, id: RequestId) -> Response {
    let params: InitializeParams = match serde_json::from_value(request.params.clone()) {
        Ok(p) => p,
        Err(e) => {
            return Response::error(
                id,
                rpc_codes::INVALID_PARAMS,
                format!("Invalid initialize params: {}", e),
            );
        }
    };
    info!(
        "Client {} {} connected (protocol {})",
        params.client_info.name, params.client_info.version, params.protocol_version
    );

    let result = InitializeResult {
        protocol_version: PROTOCOL_VERSION.to_string(),
        capabilities: ServerCapabilities {
            tools: ToolsCapability {
                list_changed: false,
            },
            logging: serde_json::json!({}),
        },
        server_info: ServerInfo {
            name: SERVER_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
    };

    match serde_json::to_value(result) {
        Ok(value) => Response::success(id, value),
        Err(e) => Response::error(id, error_codes::INTERNAL_ERROR, e.to_string()),
    }
}

async fn handle_tools_call(
    request: &Request,
    id: RequestId,
    server: &FrameProbeServer,
) -> Response {
    #[derive(serde::Deserialize)]
    struct ToolCallParams {
        name: String,
        #[serde(default)]
        arguments: serde_json::Value,
    }

    let params: ToolCallParams = match serde_json::from_value(request.params.clone()) {
        Ok(p) => p,
        Err(e) => {
            return Response::error(
                id,
                rpc_codes::INVALID_PARAMS,
                format!("Invalid tool call params: {}", e),
            );
        }
    };

    handle_tool_call(&params.name, params.arguments, id, server.config()).await
}
