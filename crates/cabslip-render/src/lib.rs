//! # cabslip-render: Receipt Layouts & Export
//!
//! Two independent render functions over one immutable [`Receipt`]:
//!
//! - [`screen::render_screen`] - responsive HTML for the preview and print
//! - [`layout::build_export_layout`] - fixed A4 page for export
//!
//! and the [`pipeline::ExportPipeline`] that turns the A4 page into a file.
//!
//! ## Example
//! ```rust,no_run
//! use cabslip_render::pipeline::{ExportPipeline, PipelineSettings};
//! # async fn run(receipt: cabslip_core::Receipt) -> cabslip_render::ExportResult<()> {
//! let pipeline = ExportPipeline::pdf(PipelineSettings::default());
//! let outcome = pipeline.export(&receipt, std::path::Path::new("/tmp")).await?;
//! println!("saved {}", outcome.path.display());
//! # Ok(())
//! # }
//! ```
//!
//! [`Receipt`]: cabslip_core::Receipt

pub mod assets;
pub mod error;
pub mod export;
pub mod layout;
pub mod pdf;
pub mod pipeline;
pub mod screen;

pub use error::{ExportError, ExportResult};
pub use export::{DocumentExporter, ExportOptions, Fidelity, PageSize};
pub use layout::{build_export_layout, ExportLayout};
pub use pdf::PdfExporter;
pub use pipeline::{export_file_name, sanitize_filename, ExportOutcome, ExportPipeline, PipelineSettings};
pub use screen::render_screen;
