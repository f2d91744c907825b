//! MCP tool handlers for frame-probe

use frame_probe_analysis::{
    AnalysisConfig, SkippedFile, analyze, analyze_directory_concurrent, compare, diagnose_with,
};
use frame_probe_core::{ComparisonReport, FrameProbeError, Issue, MetricsReport, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

use crate::mcp::{RequestId, Response, rpc_codes};

/// Tool definition for MCP tools/list
#[derive(Debug, Clone, Serialize)]
pub struct ToolDef {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: serde_json::Value,
}

/// Get list of available tools
pub fn list_tools() -> Vec<ToolDef> {
    vec![
        ToolDef {
            name: "analyze_screenshot".into(),
            description: "Measure brightness, contrast, color temperature, saturation and a 16-bucket luminance histogram of a PNG. Example: {\"Path\": \"shots/title.png\", \"Diagnose\": true}".into(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "Path": {
                        "type": "string",
                        "description": "Path to an 8-bit RGB or RGBA PNG file"
                    },
                    "Diagnose": {
                        "type": "boolean",
                        "description": "Also report exposure, contrast, color and clipping issues",
                        "default": false
                    }
                },
                "required": ["Path"]
            }),
        },
        ToolDef {
            name: "compare_screenshots".into(),
            description: "Compare two PNGs. Differences are second minus first. Example: {\"PathA\": \"before.png\", \"PathB\": \"after.png\"}".into(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "PathA": {
                        "type": "string",
                        "description": "Baseline screenshot"
                    },
                    "PathB": {
                        "type": "string",
                        "description": "Screenshot compared against the baseline"
                    }
                },
                "required": ["PathA", "PathB"]
            }),
        },
        ToolDef {
            name: "diagnose_screenshot".into(),
            description: "List visual issues in a PNG (UNDEREXPOSED, LOW_CONTRAST, SHADOW_CLIPPING, ...). An empty list means no issues.".into(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "Path": {
                        "type": "string",
                        "description": "Path to the PNG file"
                    }
                },
                "required": ["Path"]
            }),
        },
        ToolDef {
            name: "analyze_directory".into(),
            description: "Analyze every *.png directly inside a directory, in name order. Returns {results, skipped}; files that fail to decode are listed under skipped with the reason.".into(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "Path": {
                        "type": "string",
                        "description": "Directory containing screenshots"
                    },
                    "Diagnose": {
                        "type": "boolean",
                        "description": "Attach issues to each report",
                        "default": false
                    }
                },
                "required": ["Path"]
            }),
        },
    ]
}

/// Parameters for analyze_screenshot and analyze_directory
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AnalyzeParams {
    pub path: PathBuf,
    #[serde(default)]
    pub diagnose: bool,
}

/// Parameters for compare_screenshots
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CompareParams {
    pub path_a: PathBuf,
    pub path_b: PathBuf,
}

/// Parameters for diagnose_screenshot
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DiagnoseParams {
    pub path: PathBuf,
}

/// Result body of diagnose_screenshot
#[derive(Debug, Serialize)]
pub struct DiagnoseResult {
    pub path: String,
    pub issues: Vec<Issue>,
}

/// Result body of analyze_directory
#[derive(Debug, Serialize)]
pub struct DirectoryResult {
    pub results: Vec<MetricsReport>,
    pub skipped: Vec<SkippedFile>,
}

/// Handle a tools/call request
pub async fn handle_tool_call(
    name: &str,
    params: serde_json::Value,
    id: RequestId,
    config: &AnalysisConfig,
) -> Response {
    let result = match name {
        "analyze_screenshot" => handle_analyze_screenshot(params, config).await,
        "compare_screenshots" => handle_compare_screenshots(params).await,
        "diagnose_screenshot" => handle_diagnose_screenshot(params, config).await,
        "analyze_directory" => handle_analyze_directory(params, config).await,
        _ => Err(FrameProbeError::Protocol(format!("Unknown tool: {}", name))),
    };

    match result {
        Ok(value) => Response::success(
            id,
            serde_json::json!({ "content": [{ "type": "text", "text": value.to_string() }] }),
        ),
        Err(e) => {
            let code = match &e {
                FrameProbeError::Protocol(_) => rpc_codes::INVALID_PARAMS,
                other => other.code(),
            };
            Response::error(id, code, e.to_string())
        }
    }
}

fn parse_params<T: serde::de::DeserializeOwned>(params: serde_json::Value) -> Result<T> {
    serde_json::from_value(params)
        .map_err(|e| FrameProbeError::Protocol(format!("Invalid arguments: {}", e)))
}

/// Run synchronous analysis on the blocking pool
async fn blocking<T, F>(f: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| FrameProbeError::Worker(e.to_string()))?
}

async fn handle_analyze_screenshot(
    params: serde_json::Value,
    config: &AnalysisConfig,
) -> Result<serde_json::Value> {
    let AnalyzeParams { path, diagnose } = parse_params(params)?;
    debug!("analyze_screenshot {}", path.display());

    let metrics = blocking(move || analyze(&path)).await?;
    let mut report = MetricsReport::from(&metrics);
    if diagnose {
        report = report.with_issues(diagnose_with(&metrics, &config.thresholds));
    }

    Ok(serde_json::to_value(report)?)
}

async fn handle_compare_screenshots(params: serde_json::Value) -> Result<serde_json::Value> {
    let CompareParams { path_a, path_b } = parse_params(params)?;
    debug!(
        "compare_screenshots {} vs {}",
        path_a.display(),
        path_b.display()
    );

    let result = blocking(move || compare(&path_a, &path_b)).await?;

    Ok(serde_json::to_value(ComparisonReport::from(&result))?)
}

async fn handle_diagnose_screenshot(
    params: serde_json::Value,
    config: &AnalysisConfig,
) -> Result<serde_json::Value> {
    let DiagnoseParams { path } = parse_params(params)?;

    let metrics = blocking(move || analyze(&path)).await?;
    let issues = diagnose_with(&metrics, &config.thresholds);

    Ok(serde_json::to_value(DiagnoseResult {
        path: metrics.path,
        issues,
    })?)
}

async fn handle_analyze_directory(
    params: serde_json::Value,
    config: &AnalysisConfig,
) -> Result<serde_json::Value> {
    let p: AnalyzeParams = parse_params(params)?;

    let outcome = analyze_directory_concurrent(&p.path, config.workers).await?;
    let results: Vec<MetricsReport> = outcome
        .metrics
        .iter()
        .map(|m| {
            let report = MetricsReport::from(m);
            if p.diagnose {
                report.with_issues(diagnose_with(m, &config.thresholds))
            } else {
                report
            }
        })
        .collect();

    Ok(serde_json::to_value(DirectoryResult {
        results,
        skipped: outcome.skipped,
    })?)
}
