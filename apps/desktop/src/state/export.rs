//! # Export State
//!
//! The export pipeline and the directory it writes into.

use std::path::{Path, PathBuf};

use cabslip_core::Receipt;
use cabslip_render::{ExportOutcome, ExportPipeline, ExportResult};

#[derive(Clone)]
pub struct ExportState {
    pipeline: ExportPipeline,
    output_dir: PathBuf,
}

impl ExportState {
    pub fn new(pipeline: ExportPipeline, output_dir: impl Into<PathBuf>) -> Self {
        ExportState {
            pipeline,
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Saves `receipt` as a document in the output directory.
    pub async fn export(&self, receipt: &Receipt) -> ExportResult<ExportOutcome> {
        self.pipeline.export(receipt, &self.output_dir).await
    }
}
