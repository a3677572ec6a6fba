//! # Export Error Types
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Export Error Categories                           │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │     Assets      │  │    Rendering    │  │        Output           │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  AssetLoad      │  │  Render         │  │  Io                     │ │
//! │  │  AssetTimeout   │  │                 │  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  AllAttemptsFailed { primary, fallback }  - terminal, shown to user     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Asset errors never reach the user on their own: the pipeline logs them
//! and exports without the asset.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for export operations.
pub type ExportResult<T> = Result<T, ExportError>;

#[derive(Debug, Error)]
pub enum ExportError {
    /// An embedded asset could not be read.
    #[error("Failed to load asset {path}: {reason}")]
    AssetLoad { path: PathBuf, reason: String },

    /// An embedded asset did not finish loading in time.
    #[error("Asset {path} did not load within {timeout_ms} ms")]
    AssetTimeout { path: PathBuf, timeout_ms: u64 },

    /// The document backend failed to produce a document.
    #[error("Failed to render document: {0}")]
    Render(String),

    /// Writing the output file failed.
    #[error("File error: {0}")]
    Io(#[from] std::io::Error),

    /// Both the primary and the fallback attempt failed.
    #[error("Failed to generate PDF: {primary}; fallback also failed: {fallback}")]
    AllAttemptsFailed {
        primary: Box<ExportError>,
        fallback: Box<ExportError>,
    },
}

impl ExportError {
    /// Creates a render error from any displayable backend error.
    pub fn render(err: impl std::fmt::Display) -> Self {
        ExportError::Render(err.to_string())
    }
}
