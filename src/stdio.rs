//! Line-delimited JSON tool-serving protocol.
//!
//! Backs the `file-agent-tools` binary, which exposes the same tool
//! registry used by the agent loop to an external client over
//! stdin/stdout: one JSON request per line, one JSON response per line.
//!
//! Methods:
//! - `tools/list` — the tool catalog
//! - `tools/call` — execute one tool, params `{name, arguments}`

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::tools::ToolRegistry;

#[derive(Debug, Deserialize)]
pub struct Request {
    #[serde(default)]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Option<CallParams>,
}

#[derive(Debug, Deserialize)]
pub struct CallParams {
    pub name: String,
    #[serde(default)]
    pub arguments: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct Response {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Response {
    fn result(id: Option<Value>, result: Value) -> Self {
        Self {
            id,
            result: Some(result),
            error: None,
        }
    }

    fn error(id: Option<Value>, message: impl Into<String>) -> Self {
        Self {
            id,
            result: None,
            error: Some(message.into()),
        }
    }
}

/// Handle one request line. Never panics; malformed input becomes an error
/// response so a misbehaving client cannot take the server down.
pub async fn handle_line(registry: &ToolRegistry, line: &str) -> Response {
    let request: Request = match serde_json::from_str(line) {
        Ok(request) => request,
        Err(e) => return Response::error(None, format!("invalid request: {}", e)),
    };

    match request.method.as_str() {
        "tools/list" => Response::result(request.id, json!({ "tools": registry.schemas() })),
        "tools/call" => {
            let Some(params) = request.params else {
                return Response::error(request.id, "tools/call requires params");
            };
            let args = params.arguments.unwrap_or_else(|| json!({}));
            let content = registry.dispatch(&params.name, args).await;
            Response::result(request.id, json!({ "content": content }))
        }
        other => Response::error(request.id, format!("unknown method: {}", other)),
    }
}

/// Serve requests from stdin until it closes.
pub async fn serve(registry: &ToolRegistry) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let response = handle_line(registry, &line).await;
        let mut encoded = serde_json::to_string(&response)?;
        encoded.push('\n');
        stdout.write_all(encoded.as_bytes()).await?;
        stdout.flush().await?;
    }

    Ok(())
}
