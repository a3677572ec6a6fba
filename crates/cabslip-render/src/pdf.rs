//! # PDF Backend
//!
//! Paints an [`ExportLayout`] onto a single A4 page with `printpdf`.
//!
//! ## Mapping
//! ```text
//! layout (pt, top-left origin)          PDF page (mm, bottom-left origin)
//! ┌──────────────── 595 ─┐              ┌──────────────── 210 ─┐
//! │ (x, y)               │   scale to   │  margin              │
//! │                      │ ──────────►  │   ┌──────────────┐   │
//! │                   842│   fit inside │   │ (x', 297-y') │   │
//! └──────────────────────┘   margins    │   └──────────────┘   │
//!                                       └──────────────────────┘
//! ```
//!
//! The logo is decoded per export and only drawn at [`Fidelity::Full`]; a
//! logo that does not decode is logged and left out.

use std::borrow::Cow;
use std::io::{BufWriter, Cursor};

use printpdf::image_crate::codecs::png::PngDecoder;
use printpdf::image_crate::{self, ImageFormat};
use printpdf::path::{PaintMode, WindingOrder};
use printpdf::{
    BuiltinFont, Color as PdfColor, Image, ImageTransform, IndirectFontRef, Line, Mm, PdfDocument,
    PdfLayerReference, Point, Polygon, Rgb,
};
use tracing::{debug, warn};

use crate::assets::Assets;
use crate::error::{ExportError, ExportResult};
use crate::export::{DocumentExporter, ExportOptions, Fidelity};
use crate::layout::{approx_text_width, Align, Color, Element, ExportLayout, Weight};

const PT_TO_MM: f32 = 25.4 / 72.0;

/// Replaces glyphs builtin PDF fonts cannot draw.
///
/// `₹` becomes `Rs.`; anything else outside Latin-1 becomes `?`.
pub fn builtin_safe_text(text: &str) -> Cow<'_, str> {
    if text.chars().all(|c| u32::from(c) <= 0xff) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 4);
    for c in text.chars() {
        match c {
            '₹' => out.push_str("Rs."),
            c if u32::from(c) <= 0xff => out.push(c),
            _ => out.push('?'),
        }
    }
    Cow::Owned(out)
}

/// Decodes a PNG logo. Other formats and broken files are skipped.
fn decode_logo(bytes: &[u8]) -> Option<Image> {
    let decoded = match image_crate::guess_format(bytes) {
        Ok(ImageFormat::Png) => {
            PngDecoder::new(Cursor::new(bytes)).and_then(|decoder| Image::try_from(decoder))
        }
        Ok(other) => {
            warn!(format = ?other, "Logo is not a PNG, leaving it out");
            return None;
        }
        Err(e) => Err(e),
    };

    match decoded {
        Ok(image) => Some(image),
        Err(e) => {
            warn!("Logo could not be decoded, leaving it out: {}", e);
            None
        }
    }
}

/// The production [`DocumentExporter`].
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfExporter;

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    builtin: bool,
}

/// Layout points → page millimetres.
struct PageMap {
    margin_pt: f32,
    scale: f32,
    page_height_mm: f32,
}

impl PageMap {
    fn new(layout: &ExportLayout, options: &ExportOptions) -> Self {
        let (width_mm, height_mm) = options.page.mm();
        let usable_w = width_mm / PT_TO_MM - 2.0 * options.margin_pt;
        let usable_h = height_mm / PT_TO_MM - 2.0 * options.margin_pt;
        let scale = (usable_w / layout.width_pt).min(usable_h / layout.height_pt);
        PageMap {
            margin_pt: options.margin_pt,
            scale,
            page_height_mm: height_mm,
        }
    }

    fn x(&self, x: f32) -> Mm {
        Mm((self.margin_pt + x * self.scale) * PT_TO_MM)
    }

    fn y(&self, y: f32) -> Mm {
        Mm(self.page_height_mm - (self.margin_pt + y * self.scale) * PT_TO_MM)
    }

    fn size(&self, size: f32) -> f32 {
        size * self.scale
    }

    fn point(&self, x: f32, y: f32) -> (Point, bool) {
        (Point::new(self.x(x), self.y(y)), false)
    }
}

fn pdf_color(color: Color) -> PdfColor {
    let (r, g, b) = color.unit();
    PdfColor::Rgb(Rgb::new(r, g, b, None))
}

impl PdfExporter {
    /// Fits `logo` into the square slot, keeping its aspect ratio.
    fn draw_logo(layer: &PdfLayerReference, logo: Image, map: &PageMap, x: f32, y: f32, size: f32) {
        let width_px = logo.image.width.0.max(1) as f32;
        let height_px = logo.image.height.0.max(1) as f32;
        // At 72 dpi one pixel is one point
        let scale = map.size(size) / width_px.max(height_px);
        let drawn_height_mm = height_px * scale * PT_TO_MM;

        logo.add_to_layer(
            layer.clone(),
            ImageTransform {
                translate_x: Some(map.x(x)),
                translate_y: Some(Mm(map.y(y).0 - drawn_height_mm)),
                scale_x: Some(scale),
                scale_y: Some(scale),
                dpi: Some(72.0),
                ..ImageTransform::default()
            },
        );
    }

    fn load_fonts(
        doc: &printpdf::PdfDocumentReference,
        options: &ExportOptions,
        assets: &Assets,
    ) -> ExportResult<Fonts> {
        if options.embed_font {
            if let Some(bytes) = assets.font.as_deref() {
                let font = doc
                    .add_external_font(Cursor::new(bytes))
                    .map_err(ExportError::render)?;
                return Ok(Fonts {
                    regular: font.clone(),
                    bold: font,
                    builtin: false,
                });
            }
        }

        Ok(Fonts {
            regular: doc
                .add_builtin_font(BuiltinFont::Helvetica)
                .map_err(ExportError::render)?,
            bold: doc
                .add_builtin_font(BuiltinFont::HelveticaBold)
                .map_err(ExportError::render)?,
            builtin: true,
        })
    }

    fn draw(
        layer: &PdfLayerReference,
        element: &Element,
        map: &PageMap,
        fonts: &Fonts,
        fidelity: Fidelity,
    ) {
        match element {
            Element::Band {
                x,
                y,
                width,
                height,
                color,
            } => {
                if fidelity == Fidelity::Reduced {
                    return;
                }
                layer.set_fill_color(pdf_color(*color));
                layer.add_polygon(Polygon {
                    rings: vec![vec![
                        map.point(*x, *y),
                        map.point(x + width, *y),
                        map.point(x + width, y + height),
                        map.point(*x, y + height),
                    ]],
                    mode: PaintMode::Fill,
                    winding_order: WindingOrder::NonZero,
                });
            }
            Element::Rule {
                x1,
                x2,
                y,
                thickness,
                color,
            } => {
                let color = match fidelity {
                    Fidelity::Full => *color,
                    Fidelity::Reduced => Color::INK,
                };
                layer.set_outline_color(pdf_color(color));
                layer.set_outline_thickness(map.size(*thickness));
                layer.add_line(Line {
                    points: vec![map.point(*x1, *y), map.point(*x2, *y)],
                    is_closed: false,
                });
            }
            Element::Text { x, y, text, style } => {
                if text.trim().is_empty() {
                    return;
                }
                let text: Cow<'_, str> = if fonts.builtin {
                    builtin_safe_text(text)
                } else {
                    Cow::Borrowed(text.as_str())
                };
                let width = approx_text_width(&text, style.size);
                let left = match style.align {
                    Align::Left => *x,
                    Align::Center => x - width / 2.0,
                    Align::Right => x - width,
                };
                let color = match fidelity {
                    Fidelity::Full => style.color,
                    Fidelity::Reduced => Color::INK,
                };
                let font = match style.weight {
                    Weight::Regular => &fonts.regular,
                    Weight::Bold => &fonts.bold,
                };
                layer.set_fill_color(pdf_color(color));
                layer.use_text(&*text, map.size(style.size), map.x(left), map.y(*y), font);
            }
            // Painted by the caller, which owns the decoded image
            Element::Logo { .. } => {}
        }
    }
}

impl DocumentExporter for PdfExporter {
    fn export(
        &self,
        layout: &ExportLayout,
        options: &ExportOptions,
        assets: &Assets,
    ) -> ExportResult<Vec<u8>> {
        let (width_mm, height_mm) = options.page.mm();
        let (doc, page, layer) =
            PdfDocument::new(layout.title.clone(), Mm(width_mm), Mm(height_mm), "Layer 1");
        let layer = doc.get_page(page).get_layer(layer);

        let fonts = Self::load_fonts(&doc, options, assets)?;
        let map = PageMap::new(layout, options);
        let mut logo = match options.fidelity {
            Fidelity::Full => assets.logo.as_deref().and_then(decode_logo),
            Fidelity::Reduced => None,
        };
        let mut logo_drawn = false;

        for element in &layout.elements {
            match element {
                Element::Logo { x, y, size } => {
                    if let Some(image) = logo.take() {
                        Self::draw_logo(&layer, image, &map, *x, *y, *size);
                        logo_drawn = true;
                    }
                }
                other => Self::draw(&layer, other, &map, &fonts, options.fidelity),
            }
        }

        debug!(
            title = %layout.title,
            elements = layout.elements.len(),
            fidelity = ?options.fidelity,
            builtin_font = fonts.builtin,
            logo_drawn,
            "PDF painted"
        );

        let mut writer = BufWriter::new(Vec::<u8>::new());
        doc.save(&mut writer).map_err(ExportError::render)?;
        writer.into_inner().map_err(|e| ExportError::Io(e.into_error()))
    }
}
