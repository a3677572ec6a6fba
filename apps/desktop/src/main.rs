//! # CabSlip Desktop Entry Point
//!
//! ## Application Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        CabSlip Desktop                                  │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                      Web View Frontend                           │  │
//! │  │  • Ride form            • Receipt preview                        │  │
//! │  │  • Download PDF         • Print                                  │  │
//! │  └──────────────────────────────┬───────────────────────────────────┘  │
//! │                                 │ JSON lines (stdin / stdout)           │
//! │                                 ▼                                       │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                    Rust Backend (this crate)                     │  │
//! │  │                                                                  │  │
//! │  │  main.rs ────► Starts the runtime                                │  │
//! │  │  lib.rs ─────► Logging, config, state, bridge                    │  │
//! │  │  commands/ ──► update_field, generate_receipt, download_pdf      │  │
//! │  │  state/ ─────► AppConfig, SessionState, ExportState              │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                 │                                       │
//! │                                 ▼                                       │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │              Receipt_<invoice>_<customer>.pdf                    │  │
//! │  │              (Downloads, or export.output_dir)                   │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match cabslip_desktop_lib::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("CabSlip failed to start: {}", e);
            ExitCode::FAILURE
        }
    }
}
