//! # CabSlip Desktop Library
//!
//! Application shell for CabSlip: loads configuration, owns the form
//! session and answers the frontend over a JSON-lines bridge.
//!
//! ## Module Organization
//! ```text
//! cabslip_desktop_lib/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── bridge.rs       ◄─── JSON-lines request loop
//! ├── state/
//! │   ├── mod.rs      ◄─── AppState and exports
//! │   ├── config.rs   ◄─── AppConfig (defaults < TOML < env)
//! │   ├── session.rs  ◄─── Form session behind Arc<Mutex>
//! │   └── export.rs   ◄─── Export pipeline + output directory
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── config.rs   ◄─── get_config
//! │   ├── form.rs     ◄─── Editing commands
//! │   └── receipt.rs  ◄─── Preview, export, print
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod bridge;
pub mod commands;
pub mod error;
pub mod state;

#[cfg(test)]
mod test_support;

use tracing::info;
use tracing_subscriber::EnvFilter;

use state::{AppConfig, AppState};

/// Runs the desktop shell until shutdown or end of input.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, written to stderr             │
/// │     • Default: info,cabslip=debug, override with RUST_LOG               │
/// │                                                                         │
/// │  2. Load Configuration ───────────────────────────────────────────────► │
/// │     • defaults < cabslip.toml < CABSLIP_* environment                   │
/// │                                                                         │
/// │  3. Initialize State Objects ─────────────────────────────────────────► │
/// │     • SessionState: fresh form, today's date, new invoice number        │
/// │     • ExportState: PDF pipeline writing to the output directory         │
/// │                                                                         │
/// │  4. Serve the Bridge ─────────────────────────────────────────────────► │
/// │     • one JSON request per stdin line, one reply per stdout line        │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    info!("Starting CabSlip");

    let config = AppConfig::load(None)?;
    let state = AppState::from_config(config);
    info!(
        output_dir = %state.export.output_dir().display(),
        invoice_id = %state.session.with_session(|s| s.ride().invoice_id.clone()),
        "State initialized"
    );

    bridge::serve(&state, tokio::io::stdin(), tokio::io::stdout()).await?;

    info!("CabSlip stopped");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=cabslip_render=trace` - Trace the export pipeline only
/// - Default: INFO, DEBUG for the cabslip crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,cabslip=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
