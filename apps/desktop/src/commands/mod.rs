//! # Commands Module
//!
//! Every command the frontend can send over the bridge.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── config.rs   ◄─── Configuration retrieval
//! ├── form.rs     ◄─── Editing the ride form
//! └── receipt.rs  ◄─── Preview, export and print
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  Frontend                                                               │
//! │  ────────                                                               │
//! │  {"id": 3, "cmd": "update_field",                                       │
//! │   "args": {"field": "rideFee", "value": "500"}}                         │
//! │         │                                                               │
//! │         │ (one JSON line on stdin)                                      │
//! │         ▼                                                               │
//! │  bridge::dispatch                                                       │
//! │  ────────────────                                                       │
//! │  fn update_field(                                                       │
//! │      session: &SessionState,   ◄── Picked out of AppState              │
//! │      args: UpdateFieldArgs,    ◄── Deserialized from "args"            │
//! │  ) -> Result<FormSnapshot, ApiError>                                    │
//! │         │                                                               │
//! │         │ (one JSON line on stdout)                                     │
//! │         ▼                                                               │
//! │  {"id": 3, "ok": {"phase": "editing", "ride": {...}}}                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each command declares only the state it needs:
//! ```rust,ignore
//! fn get_config(config: &AppConfig) -> ConfigView
//! fn update_field(session: &SessionState, args: UpdateFieldArgs) -> ...
//! async fn download_pdf(session: &SessionState, export: &ExportState) -> ...
//! ```

pub mod config;
pub mod form;
pub mod receipt;
