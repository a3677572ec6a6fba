//! # State Module
//!
//! Application state for the desktop shell.
//!
//! Separate state types, one per concern; each command takes only the
//! ones it needs.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                      AppState                                   │   │
//! │  │  built once at startup from AppConfig                           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                              │                                          │
//! │          ┌──────────────────┼──────────────────┐                       │
//! │          ▼                  ▼                  ▼                        │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────────┐              │
//! │  │  AppConfig   │  │ SessionState │  │   ExportState    │              │
//! │  │              │  │              │  │                  │              │
//! │  │  company     │  │  Arc<Mutex<  │  │  ExportPipeline  │              │
//! │  │  ride        │  │  FormSession │  │  output_dir      │              │
//! │  │  export      │  │  >>          │  │                  │              │
//! │  └──────────────┘  └──────────────┘  └──────────────────┘              │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • AppConfig: Read-only after initialization                           │
//! │  • SessionState: Protected by Arc<Mutex<T>> for exclusive access       │
//! │  • ExportState: Immutable; each export reads a cloned receipt          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod export;
mod session;

pub use config::{AppConfig, CompanySettings, ConfigError, ExportSettings, RideSettings};
pub use export::ExportState;
pub use session::SessionState;

use cabslip_core::FormSession;
use cabslip_render::ExportPipeline;

/// Everything the command handlers can ask for.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub session: SessionState,
    pub export: ExportState,
}

impl AppState {
    pub fn new(config: AppConfig, session: FormSession, export: ExportState) -> Self {
        AppState {
            config,
            session: SessionState::new(session),
            export,
        }
    }

    /// Builds production state: a fresh form and the PDF pipeline.
    pub fn from_config(config: AppConfig) -> Self {
        let session = FormSession::new(config.ride_defaults());
        let export = ExportState::new(
            ExportPipeline::pdf(config.pipeline_settings()),
            config.output_dir(),
        );
        Self::new(config, session, export)
    }
}
