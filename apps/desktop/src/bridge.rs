//! # IPC Bridge
//!
//! JSON lines between the frontend and the command handlers.
//!
//! ## Wire Format
//! ```text
//! stdin  ► {"id": 1, "cmd": "update_field", "args": {"field": "customerName", "value": "Asha"}}
//! stdout ◄ {"id": 1, "ok": {"phase": "editing", "ride": {...}}}
//!
//! stdin  ► {"id": 2, "cmd": "generate_receipt"}
//! stdout ◄ {"id": 2, "error": {"code": "VALIDATION_ERROR", "message": "Please enter pickup address"}}
//! ```
//!
//! Requests are handled one at a time, in order. The loop ends on
//! `shutdown` or when stdin closes. Logs go to stderr.
//!
//! Lines are read as raw bytes, so a line that is not UTF-8 or not JSON is
//! answered with `BAD_REQUEST` and the loop keeps going.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};

use crate::commands::{config, form, receipt};
use crate::error::ApiError;
use crate::state::AppState;

/// One request line.
#[derive(Debug, Clone, Deserialize)]
pub struct Request {
    /// Echoed back unchanged; any JSON value.
    #[serde(default)]
    pub id: Value,
    pub cmd: String,
    #[serde(default)]
    pub args: Value,
}

/// One response line.
#[derive(Debug, Clone, Serialize)]
pub struct Response {
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ok: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
}

impl Response {
    pub fn success(id: Value, value: Value) -> Self {
        Response {
            id,
            ok: Some(value),
            error: None,
        }
    }

    pub fn failure(id: Value, error: ApiError) -> Self {
        Response {
            id,
            ok: None,
            error: Some(error),
        }
    }
}

/// Whether the loop keeps reading after a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

fn parse_args<T: DeserializeOwned>(args: Value) -> Result<T, ApiError> {
    Ok(serde_json::from_value(args)?)
}

fn reply<T: Serialize>(value: T) -> Result<Value, ApiError> {
    serde_json::to_value(value)
        .map_err(|e| ApiError::internal(format!("Failed to encode response: {}", e)))
}

/// Runs one command against the application state.
pub async fn dispatch(state: &AppState, cmd: &str, args: Value) -> Result<Value, ApiError> {
    match cmd {
        // Config
        "get_config" => reply(config::get_config(&state.config)),
        // Form
        "get_form" => reply(form::get_form(&state.session)),
        "update_field" => reply(form::update_field(&state.session, parse_args(args)?)?),
        "set_ride_date" => reply(form::set_ride_date(&state.session, parse_args(args)?)?),
        "regenerate_invoice_id" => reply(form::regenerate_invoice_id(&state.session)?),
        "reset_form" => reply(form::reset_form(&state.session)),
        // Receipt
        "generate_receipt" => reply(receipt::generate_receipt(&state.session, &state.export).await?),
        "back_to_form" => reply(receipt::back_to_form(&state.session)?),
        "get_receipt" => reply(receipt::get_receipt(&state.session)?),
        "download_pdf" => reply(receipt::download_pdf(&state.session, &state.export).await?),
        "print_receipt" => reply(receipt::print_receipt(&state.session)?),
        // Lifecycle
        "shutdown" => Ok(Value::Null),
        other => Err(ApiError::bad_request(format!("Unknown command: {}", other))),
    }
}

/// Parses and runs one request line.
pub async fn handle_line(state: &AppState, line: &[u8]) -> (Response, Flow) {
    let request: Request = match serde_json::from_slice(line) {
        Ok(request) => request,
        Err(e) => {
            warn!("Malformed request line: {}", e);
            let error = ApiError::bad_request(format!("Malformed request: {}", e));
            return (Response::failure(Value::Null, error), Flow::Continue);
        }
    };

    debug!(id = %request.id, cmd = %request.cmd, "Request received");
    let flow = match request.cmd.as_str() {
        "shutdown" => Flow::Stop,
        _ => Flow::Continue,
    };

    let response = match dispatch(state, &request.cmd, request.args).await {
        Ok(value) => Response::success(request.id, value),
        Err(error) => {
            debug!(cmd = %request.cmd, %error, "Command failed");
            Response::failure(request.id, error)
        }
    };

    (response, flow)
}

/// Serves requests from `reader` until `shutdown` or end of input.
pub async fn serve<R, W>(state: &AppState, reader: R, mut writer: W) -> std::io::Result<()>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut reader = BufReader::new(reader);
    let mut line = Vec::new();

    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line).await? == 0 {
            break;
        }
        if line.iter().all(u8::is_ascii_whitespace) {
            continue;
        }

        let (response, flow) = handle_line(state, &line).await;

        let mut encoded = serde_json::to_string(&response)?;
        encoded.push('\n');
        writer.write_all(encoded.as_bytes()).await?;
        writer.flush().await?;

        if flow == Flow::Stop {
            info!("Shutdown requested");
            return Ok(());
        }
    }

    info!("Input closed");
    Ok(())
}
