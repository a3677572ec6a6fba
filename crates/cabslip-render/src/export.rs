//! # Document Exporter Seam
//!
//! The pipeline talks to a [`DocumentExporter`], never to a PDF library
//! directly. Tests swap in exporters that fail on purpose.

use crate::assets::Assets;
use crate::error::ExportResult;
use crate::layout::ExportLayout;

/// Page size and orientation of the exported document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSize {
    A4Portrait,
}

impl PageSize {
    /// Width and height in millimetres.
    pub const fn mm(&self) -> (f32, f32) {
        match self {
            PageSize::A4Portrait => (210.0, 297.0),
        }
    }
}

/// How much decoration to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fidelity {
    /// Coloured bands and coloured text.
    Full,
    /// Text and rules only, in dark ink.
    Reduced,
}

/// Options for one export attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportOptions {
    /// Blank margin on every side, in points.
    pub margin_pt: f32,
    pub page: PageSize,
    pub fidelity: Fidelity,
    /// Use the loaded custom font when there is one.
    pub embed_font: bool,
}

impl ExportOptions {
    /// First attempt: tight margins, everything drawn.
    pub fn primary() -> Self {
        ExportOptions {
            margin_pt: 3.0,
            page: PageSize::A4Portrait,
            fidelity: Fidelity::Full,
            embed_font: true,
        }
    }

    /// The single retry: wider margins, no decoration, builtin font only.
    pub fn fallback() -> Self {
        ExportOptions {
            margin_pt: 10.0,
            page: PageSize::A4Portrait,
            fidelity: Fidelity::Reduced,
            embed_font: false,
        }
    }
}

/// Turns a layout into document bytes.
pub trait DocumentExporter: Send + Sync {
    /// File extension without the dot.
    fn extension(&self) -> &'static str {
        "pdf"
    }

    fn export(
        &self,
        layout: &ExportLayout,
        options: &ExportOptions,
        assets: &Assets,
    ) -> ExportResult<Vec<u8>>;
}
