//! Shared fixtures for command and bridge tests.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use cabslip_core::invoice::InvoiceIdSource;
use cabslip_core::FormSession;
use cabslip_render::assets::{AssetConfig, Assets};
use cabslip_render::{
    DocumentExporter, ExportError, ExportLayout, ExportOptions, ExportPipeline, ExportResult,
    PipelineSettings,
};

use crate::state::{AppConfig, AppState, ExportState};

/// Invoice numbers 123456, 123457, ...
pub(crate) fn sequential_ids() -> Box<dyn InvoiceIdSource> {
    let mut next = 123_455u32;
    Box::new(move || {
        next += 1;
        next
    })
}

pub(crate) fn fast_settings() -> PipelineSettings {
    PipelineSettings {
        assets: AssetConfig {
            timeout: Duration::from_millis(200),
            ..AssetConfig::default()
        },
        settle_delay: Duration::ZERO,
    }
}

/// Every attempt fails.
pub(crate) struct BrokenExporter;

impl DocumentExporter for BrokenExporter {
    fn export(&self, _: &ExportLayout, _: &ExportOptions, _: &Assets) -> ExportResult<Vec<u8>> {
        Err(ExportError::render("backend unavailable"))
    }
}

fn state_with(pipeline: ExportPipeline, dir: &Path) -> AppState {
    let config = AppConfig::default();
    let session = FormSession::with_parts(config.ride_defaults(), "05 Jan 2025", sequential_ids());
    AppState::new(config, session, ExportState::new(pipeline, dir))
}

/// Real PDF pipeline writing into `dir`.
pub(crate) fn test_state(dir: &Path) -> AppState {
    state_with(ExportPipeline::pdf(fast_settings()), dir)
}

/// Pipeline whose exports always fail.
pub(crate) fn broken_export_state(dir: &Path) -> AppState {
    state_with(ExportPipeline::new(Arc::new(BrokenExporter), fast_settings()), dir)
}

/// Fills the four fields the preview guard checks.
pub(crate) fn fill_required(state: &AppState) {
    use cabslip_core::types::RideField;

    state.session.with_session_mut(|s| {
        s.update_field(RideField::CustomerName, "Asha Rao".into()).unwrap();
        s.update_field(RideField::PickupAddress, "MG Road".into()).unwrap();
        s.update_field(RideField::DropoffAddress, "Airport".into()).unwrap();
        s.update_field(RideField::RideFee, "500".into()).unwrap();
    });
}
