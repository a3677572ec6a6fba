//! # Export Pipeline
//!
//! Receipt in, file on disk out, with exactly one fallback.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Receipt                                                                │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  load_assets ── bounded wait per asset, failures skipped                │
//! │     │  build_export_layout (off-screen, logo slot if a logo loaded)     │
//! │     ▼                                                                   │
//! │  settle delay                                                           │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  attempt(primary) ── ok ─────────────────────────────► ExportOutcome    │
//! │     │ err (warn!)                                                       │
//! │     ▼                                                                   │
//! │  attempt(fallback) ── ok ────────────────────────────► ExportOutcome    │
//! │     │ err                                                               │
//! │     ▼                                                                   │
//! │  AllAttemptsFailed { primary, fallback }                                │
//! │                                                                         │
//! │  attempt = render bytes ─► write <name>.part ─► rename to <name>        │
//! │            (the .part file is removed if anything fails)                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tracing::{info, warn};

use cabslip_core::Receipt;

use crate::assets::{load_assets, AssetConfig, Assets};
use crate::error::{ExportError, ExportResult};
use crate::export::{DocumentExporter, ExportOptions};
use crate::layout::{build_export_layout, ExportLayout};
use crate::pdf::PdfExporter;

/// Default pause between showing the preview and exporting it.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(1500);

/// Longest file stem kept, in bytes.
///
/// Stem, extension and the `.part` suffix stay under the common 255-byte
/// file name limit.
pub const MAX_FILE_STEM_BYTES: usize = 200;

/// Replaces characters that are unsafe in file names with `_`.
///
/// Letters (any script), digits, space, `-`, `_` and `.` are kept. An empty
/// result becomes `Receipt.pdf`.
pub fn sanitize_filename(input: &str) -> String {
    let cleaned: String = input
        .chars()
        .map(|ch| {
            if ch.is_alphanumeric() || matches!(ch, '-' | '_' | '.' | ' ') {
                ch
            } else {
                '_'
            }
        })
        .collect();

    let trimmed = cleaned.trim().trim_start_matches('.');
    if trimmed.is_empty() {
        "Receipt.pdf".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Longest prefix of `text` within `max` bytes, cut on a char boundary.
fn truncate_bytes(text: &str, max: usize) -> &str {
    if text.len() <= max {
        return text;
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

/// Safe file name for `receipt`: the sanitised stem, capped at
/// [`MAX_FILE_STEM_BYTES`], plus `extension`.
pub fn export_file_name(receipt: &Receipt, extension: &str) -> String {
    let stem = receipt.file_stem();
    let stem = truncate_bytes(&stem, MAX_FILE_STEM_BYTES).trim_end();
    sanitize_filename(&format!("{}.{}", stem, extension))
}

/// Pipeline timing and asset settings.
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    pub assets: AssetConfig,
    pub settle_delay: Duration,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        PipelineSettings {
            assets: AssetConfig::default(),
            settle_delay: DEFAULT_SETTLE_DELAY,
        }
    }
}

/// What a successful export produced.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportOutcome {
    pub path: PathBuf,
    pub file_name: String,
    pub bytes: usize,
    pub used_fallback: bool,
}

/// Removes a temporary file on drop unless disarmed.
struct PartFile {
    path: PathBuf,
    armed: bool,
}

impl PartFile {
    fn new(path: PathBuf) -> Self {
        PartFile { path, armed: true }
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for PartFile {
    fn drop(&mut self) {
        if self.armed {
            // Best effort: the file may never have been created.
            let _ = std::fs::remove_file(&self.path);
        }
    }
}

/// Drives a [`DocumentExporter`] from receipt to file.
#[derive(Clone)]
pub struct ExportPipeline {
    exporter: Arc<dyn DocumentExporter>,
    settings: PipelineSettings,
}

impl ExportPipeline {
    pub fn new(exporter: Arc<dyn DocumentExporter>, settings: PipelineSettings) -> Self {
        ExportPipeline { exporter, settings }
    }

    /// Pipeline backed by the PDF exporter.
    pub fn pdf(settings: PipelineSettings) -> Self {
        Self::new(Arc::new(PdfExporter), settings)
    }

    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    /// Exports `receipt` into `output_dir`.
    ///
    /// The receipt is only read; a failed export leaves it, and the
    /// directory, exactly as they were.
    pub async fn export(&self, receipt: &Receipt, output_dir: &Path) -> ExportResult<ExportOutcome> {
        let assets = load_assets(&self.settings.assets).await;
        let layout = build_export_layout(receipt, assets.logo.is_some());

        if !self.settings.settle_delay.is_zero() {
            tokio::time::sleep(self.settings.settle_delay).await;
        }

        let file_name = export_file_name(receipt, self.exporter.extension());
        let target = output_dir.join(&file_name);

        let primary = match self
            .attempt(&layout, &ExportOptions::primary(), &assets, &target)
            .await
        {
            Ok(bytes) => return Ok(self.finish(target, file_name, bytes, false)),
            Err(e) => e,
        };

        warn!("Primary export failed, retrying with fallback options: {}", primary);

        match self
            .attempt(&layout, &ExportOptions::fallback(), &assets, &target)
            .await
        {
            Ok(bytes) => Ok(self.finish(target, file_name, bytes, true)),
            Err(fallback) => Err(ExportError::AllAttemptsFailed {
                primary: Box::new(primary),
                fallback: Box::new(fallback),
            }),
        }
    }

    async fn attempt(
        &self,
        layout: &ExportLayout,
        options: &ExportOptions,
        assets: &Assets,
        target: &Path,
    ) -> ExportResult<usize> {
        let bytes = self.exporter.export(layout, options, assets)?;

        if let Some(dir) = target.parent() {
            tokio::fs::create_dir_all(dir).await?;
        }

        let mut part_path = target.as_os_str().to_owned();
        part_path.push(".part");
        let part = PartFile::new(PathBuf::from(part_path));

        tokio::fs::write(&part.path, &bytes).await?;
        tokio::fs::rename(&part.path, target).await?;
        part.disarm();

        Ok(bytes.len())
    }

    fn finish(&self, path: PathBuf, file_name: String, bytes: usize, used_fallback: bool) -> ExportOutcome {
        info!(
            path = %path.display(),
            bytes,
            used_fallback,
            "Receipt exported"
        );
        ExportOutcome {
            path,
            file_name,
            bytes,
            used_fallback,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
