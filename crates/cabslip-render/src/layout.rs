//! # Export Layout
//!
//! The fixed-size receipt page, as a flat list of positioned elements.
//!
//! ## Coordinate System
//! ```text
//! (0,0) ───────────────────────────────► x (pt)      595 pt
//!   │  ┌──────────────────────────────────────────────┐
//!   │  │ [logo] company · address · invoice #         │
//!   │  ├──────────────────────────────────────────────┤
//!   │  │              ₹590  (headline)                │
//!   │  │   Thanks for travelling with us, <name>      │
//!   │  ├───────────────────────┬──────────────────────┤
//!   │  │ Ride Details          │ Bill Details         │
//!   │  │ driver, vehicle       │ line items           │
//!   │  │ FROM / TO             │ subtotal, GST, total │
//!   │  ├───────────────────────┴──────────────────────┤
//!   │  │ payment band: Paid by <method>        ₹590   │
//!   │  ├──────────────────────────────────────────────┤
//!   │  │ footer: invoice info · support · notes       │
//!   ▼  └──────────────────────────────────────────────┘
//!   y                                                  842 pt
//! ```
//!
//! The layout is built off-screen from resolved values only, so it is
//! always complete when handed to an exporter. Text `y` is the baseline.
//!
//! Free-text fields never grow the page: single-line fields are cut to
//! their slot and each address stops at [`MAX_ADDRESS_LINES`], both ending
//! in `...`.

use cabslip_core::billing::BillSummary;
use cabslip_core::Receipt;

/// A4 portrait width in points.
pub const PAGE_WIDTH_PT: f32 = 595.0;
/// A4 portrait height in points.
pub const PAGE_HEIGHT_PT: f32 = 842.0;

/// Average glyph advance as a fraction of font size.
///
/// Good enough to right-align amounts and wrap addresses for Helvetica-like
/// fonts.
pub const AVG_CHAR_WIDTH: f32 = 0.5;

/// Most lines each address may take.
pub const MAX_ADDRESS_LINES: usize = 4;

/// Marks text cut to fit. Plain dots so builtin fonts can draw it.
pub const ELLIPSIS: &str = "...";

const MARGIN_X: f32 = 30.0;
const COLUMN_GAP: f32 = 20.0;
const COLUMN_WIDTH: f32 = (PAGE_WIDTH_PT - 2.0 * MARGIN_X - COLUMN_GAP) / 2.0;
const LEFT_X: f32 = MARGIN_X;
const RIGHT_X: f32 = MARGIN_X + COLUMN_WIDTH + COLUMN_GAP;
const RIGHT_EDGE: f32 = PAGE_WIDTH_PT - MARGIN_X;
const LOGO_SIZE: f32 = 48.0;
const LOGO_GAP: f32 = 12.0;
/// Header width kept free on the right for the date and invoice number.
const HEADER_RIGHT_RESERVE: f32 = 140.0;

// =============================================================================
// Primitives
// =============================================================================

/// 8-bit RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }

    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);
    pub const INK: Color = Color::rgb(0x1f, 0x29, 0x37);
    pub const MUTED: Color = Color::rgb(0x4b, 0x55, 0x63);
    pub const ORANGE: Color = Color::rgb(0xea, 0x58, 0x0c);
    pub const DEEP_ORANGE: Color = Color::rgb(0xc2, 0x41, 0x0c);
    pub const PEACH: Color = Color::rgb(0xfe, 0xd7, 0xaa);
    pub const CREAM: Color = Color::rgb(0xff, 0xf7, 0xed);
    pub const BLUE: Color = Color::rgb(0x25, 0x63, 0xeb);
    pub const SKY: Color = Color::rgb(0xef, 0xf6, 0xff);
    pub const NAVY: Color = Color::rgb(0x1e, 0x3a, 0x8a);
    pub const RULE: Color = Color::rgb(0xd1, 0xd5, 0xdb);

    /// `#rrggbb` for CSS.
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Each channel as `0.0..=1.0`.
    pub fn unit(&self) -> (f32, f32, f32) {
        (
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Weight {
    Regular,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size: f32,
    pub weight: Weight,
    pub color: Color,
    pub align: Align,
}

impl TextStyle {
    pub const fn new(size: f32) -> Self {
        TextStyle {
            size,
            weight: Weight::Regular,
            color: Color::INK,
            align: Align::Left,
        }
    }

    pub const fn bold(mut self) -> Self {
        self.weight = Weight::Bold;
        self
    }

    pub const fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub const fn right(mut self) -> Self {
        self.align = Align::Right;
        self
    }

    pub const fn center(mut self) -> Self {
        self.align = Align::Center;
        self
    }
}

/// One drawable thing on the page. All units are points from the top-left.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    /// A single line of text; `x` is the left edge, centre, or right edge
    /// depending on alignment.
    Text {
        x: f32,
        y: f32,
        text: String,
        style: TextStyle,
    },
    /// A horizontal rule.
    Rule {
        x1: f32,
        x2: f32,
        y: f32,
        thickness: f32,
        color: Color,
    },
    /// A filled rectangle behind content. Decorative only.
    Band {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Color,
    },
    /// Square slot for the company logo; `(x, y)` is the top-left corner.
    /// Left blank when no logo is loaded.
    Logo { x: f32, y: f32, size: f32 },
}

/// Estimated rendered width of `text` in points.
pub fn approx_text_width(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * AVG_CHAR_WIDTH
}

/// Greedy word wrap to lines no wider than `width` points.
///
/// A single word longer than the line is kept whole on its own line.
pub fn wrap_text(text: &str, size: f32, width: f32) -> Vec<String> {
    let max_chars = ((width / (size * AVG_CHAR_WIDTH)).floor() as usize).max(1);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > max_chars && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Cuts `text` to one line no wider than `width` points.
///
/// Text that has to be cut ends in [`ELLIPSIS`].
pub fn fit_line(text: &str, size: f32, width: f32) -> String {
    let max_chars = ((width / (size * AVG_CHAR_WIDTH)).floor() as usize).max(ELLIPSIS.len() + 1);
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_chars - ELLIPSIS.len()).collect();
    format!("{}{}", kept.trim_end(), ELLIPSIS)
}

// =============================================================================
// Layout
// =============================================================================

/// A complete, paintable A4 page.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportLayout {
    pub title: String,
    pub width_pt: f32,
    pub height_pt: f32,
    pub elements: Vec<Element>,
}

impl ExportLayout {
    fn new(title: impl Into<String>) -> Self {
        ExportLayout {
            title: title.into(),
            width_pt: PAGE_WIDTH_PT,
            height_pt: PAGE_HEIGHT_PT,
            elements: Vec::new(),
        }
    }

    fn text(&mut self, x: f32, y: f32, text: impl Into<String>, style: TextStyle) {
        self.elements.push(Element::Text {
            x,
            y,
            text: text.into(),
            style,
        });
    }

    /// Single line cut to `width`.
    fn line(&mut self, x: f32, y: f32, width: f32, text: &str, style: TextStyle) {
        self.text(x, y, fit_line(text, style.size, width), style);
    }

    /// Wrapped paragraph; returns the baseline after the last line.
    fn paragraph(&mut self, x: f32, y: f32, width: f32, text: &str, style: TextStyle) -> f32 {
        self.clamped_paragraph(x, y, width, text, style, usize::MAX)
    }

    /// Wrapped paragraph of at most `max_lines`, the last one ending in
    /// [`ELLIPSIS`] when text was dropped.
    fn clamped_paragraph(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        text: &str,
        style: TextStyle,
        max_lines: usize,
    ) -> f32 {
        let mut lines = wrap_text(text, style.size, width);
        if lines.len() > max_lines {
            lines.truncate(max_lines);
            if let Some(last) = lines.last_mut() {
                *last = format!("{}{}", last, ELLIPSIS);
            }
        }

        let leading = style.size * 1.3;
        let mut y = y;
        for line in lines {
            self.line(x, y, width, &line, style);
            y += leading;
        }
        y
    }

    fn rule(&mut self, x1: f32, x2: f32, y: f32, thickness: f32, color: Color) {
        self.elements.push(Element::Rule {
            x1,
            x2,
            y,
            thickness,
            color,
        });
    }

    fn band(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color) {
        self.elements.push(Element::Band {
            x,
            y,
            width,
            height,
            color,
        });
    }

    /// Every text run in paint order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.elements.iter().filter_map(|el| match el {
            Element::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Checks whether some text run equals `needle`.
    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts().any(|text| text == needle)
    }

    /// Checks that every element sits inside the page.
    pub fn fits_page(&self) -> bool {
        let inside = |x: f32, y: f32| (0.0..=self.width_pt).contains(&x) && (0.0..=self.height_pt).contains(&y);
        self.elements.iter().all(|el| match el {
            Element::Text { x, y, .. } => inside(*x, *y),
            Element::Rule { x1, x2, y, .. } => inside(*x1, *y) && inside(*x2, *y),
            Element::Band {
                x,
                y,
                width,
                height,
                ..
            } => inside(*x, *y) && inside(x + width, y + height),
            Element::Logo { x, y, size } => inside(*x, *y) && inside(x + size, y + size),
        })
    }

    /// The logo slot, if the page has one.
    pub fn logo_slot(&self) -> Option<(f32, f32, f32)> {
        self.elements.iter().find_map(|el| match el {
            Element::Logo { x, y, size } => Some((*x, *y, *size)),
            _ => None,
        })
    }
}

// =============================================================================
// Receipt Page
// =============================================================================

/// Lays out a receipt on one A4 page.
///
/// With `logo` set, the header keeps a square slot left of the company name.
pub fn build_export_layout(receipt: &Receipt, logo: bool) -> ExportLayout {
    let ride = &receipt.ride;
    let bill = &receipt.bill;
    let mut page = ExportLayout::new(format!("Receipt {}", ride.invoice_id));

    // Header
    page.band(0.0, 0.0, PAGE_WIDTH_PT, 110.0, Color::ORANGE);
    let header_x = if logo {
        page.elements.push(Element::Logo {
            x: LEFT_X,
            y: 26.0,
            size: LOGO_SIZE,
        });
        LEFT_X + LOGO_SIZE + LOGO_GAP
    } else {
        LEFT_X
    };
    let header_width = RIGHT_EDGE - HEADER_RIGHT_RESERVE - header_x;
    let cream = TextStyle::new(11.0).color(Color::CREAM);
    page.line(
        header_x,
        42.0,
        header_width,
        &ride.company_name,
        TextStyle::new(22.0).bold().color(Color::WHITE),
    );
    page.line(header_x, 64.0, header_width, &ride.company_address, cream);
    page.line(header_x, 82.0, header_width, &format!("Mobile: {}", ride.mobile_number), cream);
    page.text(RIGHT_EDGE, 42.0, &ride.date, TextStyle::new(11.0).color(Color::CREAM).right());
    page.text(
        RIGHT_EDGE,
        62.0,
        format!("Invoice #{}", ride.invoice_id),
        TextStyle::new(13.0).bold().color(Color::WHITE).right(),
    );

    // Headline
    let centre = PAGE_WIDTH_PT / 2.0;
    page.band(0.0, 110.0, PAGE_WIDTH_PT, 90.0, Color::CREAM);
    page.text(centre, 160.0, bill.total_display(), TextStyle::new(36.0).bold().center());
    page.text(
        centre,
        186.0,
        fit_line(
            &format!("Thanks for travelling with us, {}", ride.customer_name.trim()),
            13.0,
            RIGHT_EDGE - LEFT_X,
        ),
        TextStyle::new(13.0).color(Color::MUTED).center(),
    );

    let column_top = 232.0;
    let left_bottom = ride_details(&mut page, receipt, column_top);
    let right_bottom = bill_details(&mut page, bill, column_top);

    // Payment
    let payment_top = left_bottom.max(right_bottom).max(560.0) + 16.0;
    page.band(0.0, payment_top, PAGE_WIDTH_PT, 58.0, Color::NAVY);
    page.text(LEFT_X, payment_top + 20.0, "Payment", TextStyle::new(10.0).color(Color::PEACH));
    page.line(
        LEFT_X,
        payment_top + 40.0,
        COLUMN_WIDTH,
        &format!("Paid by {}", ride.payment_method),
        TextStyle::new(15.0).bold().color(Color::WHITE),
    );
    page.text(
        RIGHT_EDGE,
        payment_top + 38.0,
        bill.total_display(),
        TextStyle::new(22.0).bold().color(Color::WHITE).right(),
    );

    footer(&mut page, receipt, payment_top + 58.0);
    page
}

fn ride_details(page: &mut ExportLayout, receipt: &Receipt, top: f32) -> f32 {
    let ride = &receipt.ride;
    let mut y = top;

    page.text(LEFT_X, y, "Ride Details", TextStyle::new(16.0).bold());
    page.rule(LEFT_X, LEFT_X + COLUMN_WIDTH, y + 8.0, 1.5, Color::PEACH);
    y += 32.0;

    let text_x = LEFT_X + 10.0;
    let text_width = COLUMN_WIDTH - 20.0;

    page.band(LEFT_X, y - 14.0, COLUMN_WIDTH, 40.0, Color::CREAM);
    page.text(text_x, y, "You rode with", TextStyle::new(9.0).color(Color::MUTED));
    page.line(text_x, y + 16.0, text_width, &ride.driver_name, TextStyle::new(12.0).bold());
    y += 48.0;

    page.band(LEFT_X, y - 14.0, COLUMN_WIDTH, 40.0, Color::SKY);
    page.line(text_x, y, text_width, &ride.vehicle_type, TextStyle::new(12.0).bold());
    page.line(
        text_x,
        y + 16.0,
        text_width,
        &ride.vehicle_reg_no,
        TextStyle::new(10.0).color(Color::MUTED),
    );
    y += 52.0;

    let address = TextStyle::new(11.0);
    page.text(text_x, y, "FROM", TextStyle::new(9.0).bold().color(Color::DEEP_ORANGE));
    y = page.clamped_paragraph(
        text_x,
        y + 14.0,
        text_width,
        ride.pickup_address.trim(),
        address,
        MAX_ADDRESS_LINES,
    );
    y += 10.0;
    page.text(text_x, y, "TO", TextStyle::new(9.0).bold().color(Color::BLUE));
    page.clamped_paragraph(
        text_x,
        y + 14.0,
        text_width,
        ride.dropoff_address.trim(),
        address,
        MAX_ADDRESS_LINES,
    )
}

fn bill_details(page: &mut ExportLayout, bill: &BillSummary, top: f32) -> f32 {
    let label_x = RIGHT_X + 10.0;
    let amount_x = RIGHT_X + COLUMN_WIDTH - 10.0;
    let row = 18.0;
    let mut y = top;

    page.text(RIGHT_X, y, "Bill Details", TextStyle::new(16.0).bold());
    page.rule(RIGHT_X, RIGHT_X + COLUMN_WIDTH, y + 8.0, 1.5, Color::PEACH);
    y += 32.0;

    let rows = bill.line_items.len() as f32 + 4.0;
    page.band(RIGHT_X, y - 16.0, COLUMN_WIDTH, rows * row + 24.0, Color::CREAM);

    for item in &bill.line_items {
        let amount = item.amount.to_string();
        let label_width = amount_x - label_x - approx_text_width(&amount, 11.0) - 8.0;
        page.line(label_x, y, label_width, &item.label, TextStyle::new(11.0).color(Color::MUTED));
        page.text(amount_x, y, amount, TextStyle::new(11.0).bold().right());
        y += row;
    }

    page.rule(label_x, amount_x, y - 10.0, 0.75, Color::PEACH);
    y += 4.0;
    page.text(label_x, y, "Subtotal", TextStyle::new(11.0).color(Color::MUTED));
    page.text(amount_x, y, bill.subtotal.to_string(), TextStyle::new(11.0).bold().right());
    y += row;
    page.text(label_x, y, bill.gst_label(), TextStyle::new(11.0).color(Color::MUTED));
    page.text(amount_x, y, bill.gst_amount.to_string(), TextStyle::new(11.0).bold().right());
    y += row;

    page.rule(label_x, amount_x, y - 8.0, 1.5, Color::ORANGE);
    y += 8.0;
    page.band(label_x - 4.0, y - 14.0, amount_x - label_x + 8.0, 22.0, Color::PEACH);
    page.text(label_x, y, "Total Bill", TextStyle::new(13.0).bold());
    page.text(amount_x, y, bill.total_display(), TextStyle::new(13.0).bold().right());
    y += row;
    page.text(
        RIGHT_X + COLUMN_WIDTH / 2.0,
        y,
        bill.taxes_note(),
        TextStyle::new(8.0).color(Color::MUTED).center(),
    );
    y += 24.0;

    page.paragraph(
        RIGHT_X,
        y,
        COLUMN_WIDTH,
        "We've fulfilled our promise to take you to destination for pre-agreed Total Fare. \
         Modifying the drop/route can change this fare.",
        TextStyle::new(9.0).color(Color::NAVY),
    )
}

fn footer(page: &mut ExportLayout, receipt: &Receipt, top: f32) {
    let ride = &receipt.ride;
    let small = TextStyle::new(9.0).color(Color::MUTED);
    let heading = TextStyle::new(10.0).bold();
    let y = top + 26.0;

    page.text(LEFT_X, y, "Invoice Information", heading);
    page.text(LEFT_X, y + 14.0, "Service Tax Category: Renting of Cab", small);
    page.text(LEFT_X, y + 27.0, format!("Invoice Date: {}", ride.date), small);
    page.text(LEFT_X, y + 42.0, "Original Tax Invoice", heading);

    page.text(RIGHT_X, y, "Customer Support", heading);
    let after = page.paragraph(
        RIGHT_X,
        y + 14.0,
        COLUMN_WIDTH,
        "In case of any complaint/grievance against this invoice, write to us at",
        small,
    );
    page.line(
        RIGHT_X,
        after,
        COLUMN_WIDTH,
        &ride.company_name,
        TextStyle::new(9.0).bold().color(Color::DEEP_ORANGE),
    );
    page.line(RIGHT_X, after + 13.0, COLUMN_WIDTH, &format!("Mobile: {}", ride.mobile_number), small);

    let notes_top = (y + 66.0).max(after + 26.0);
    page.rule(LEFT_X, RIGHT_EDGE, notes_top, 0.5, Color::RULE);
    page.paragraph(
        LEFT_X,
        notes_top + 14.0,
        RIGHT_EDGE - LEFT_X,
        "Please note: 1. This invoice is issued on behalf of Transport Service Provider. \
         2. This is an electronically generated invoice and does not require a digital signature.",
        TextStyle::new(8.0).color(Color::MUTED),
    );
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use cabslip_core::types::{RideDefaults, RideRecord};

    fn receipt(edit: impl FnOnce(&mut RideRecord)) -> Receipt {
        let defaults = RideDefaults {
            driver_name: "Ravi Kumar".to_string(),
            vehicle_type: "Sedan".to_string(),
            vehicle_reg_no: "KA01AB1234".to_string(),
            company_name: "City Cabs".to_string(),
            company_address: "12 Residency Rd, Bengaluru".to_string(),
            mobile_number: "9800000000".to_string(),
            gst_percentage: "18".to_string(),
        };
        let mut ride = RideRecord::new(&defaults, "05 Jan 2025", "123456");
        ride.customer_name = "Asha Rao".to_string();
        ride.pickup_address = "MG Road".to_string();
        ride.dropoff_address = "Kempegowda International Airport Terminal 2".to_string();
        ride.ride_fee = "1000".into();
        edit(&mut ride);
        Receipt::issue(ride).unwrap()
    }

    fn layout(edit: impl FnOnce(&mut RideRecord)) -> ExportLayout {
        build_export_layout(&receipt(edit), false)
    }

    fn assert_inside_page(layout: &ExportLayout) {
        assert!(layout.fits_page());
        for el in &layout.elements {
            if let Element::Text { x, text, style, .. } = el {
                if style.align == Align::Left {
                    assert!(x + approx_text_width(text, style.size) <= PAGE_WIDTH_PT, "{text:?} overflows");
                }
            }
        }
    }

    #[test]
    fn test_layout_has_resolved_values() {
        let layout = layout(|ride| {
            ride.toll_fee = "50".into();
            ride.airport_charges = "200".into();
        });

        for text in [
            "City Cabs",
            "Invoice #123456",
            "05 Jan 2025",
            "₹1475",
            "Your Trip",
            "₹1000.00",
            "Toll Convenience Fee",
            "Airport Charges",
            "₹1250.00",
            "GST (18%)",
            "₹225.00",
            "Includes 18.0% Taxes",
            "Paid by Cash",
        ] {
            assert!(layout.contains_text(text), "missing {text:?}");
        }
        assert!(layout.fits_page());
        assert!(layout.logo_slot().is_none());
        assert_eq!(layout.width_pt, PAGE_WIDTH_PT);
        assert_eq!(layout.height_pt, PAGE_HEIGHT_PT);
    }

    #[test]
    fn test_zero_fees_are_not_drawn() {
        let layout = layout(|_| {});
        assert!(!layout.contains_text("Toll Convenience Fee"));
        assert!(!layout.contains_text("Airport Charges"));
    }

    #[test]
    fn test_unlabeled_other_charges_not_drawn_but_totalled() {
        let layout = layout(|ride| ride.other_charges = "100".into());
        assert!(layout.contains_text("₹1100.00"));
        assert!(layout.contains_text("₹1298"));
        assert!(!layout.contains_text("₹100.00"));
    }

    #[test]
    fn test_long_addresses_wrap_inside_page() {
        let pickup = "Flat 402, Prestige Shantiniketan, Whitefield Main Road, near ITPL Gate 3, Bengaluru 560066";
        let layout = layout(|ride| ride.pickup_address = pickup.to_string());

        assert_inside_page(&layout);
        // Short enough to be drawn in full
        assert!(!layout.texts().any(|text| text.ends_with(ELLIPSIS)));
    }

    #[test]
    fn test_huge_free_text_stays_on_one_page() {
        let words = "Flat 402 Prestige Shantiniketan Whitefield ".repeat(20);
        let unbroken = "x".repeat(880);
        let layout = layout(|ride| {
            ride.pickup_address = words.clone();
            ride.dropoff_address = unbroken.clone();
            ride.customer_name = words.clone();
            ride.company_name = unbroken.clone();
            ride.company_address = words.clone();
            ride.mobile_number = unbroken.clone();
            ride.driver_name = words.clone();
            ride.vehicle_type = unbroken.clone();
            ride.vehicle_reg_no = words.clone();
            ride.other_charges = "75".into();
            ride.other_charges_description = words.clone();
            ride.ride_fee = "50000000000000000".into();
        });

        assert_inside_page(&layout);
        let lowest = layout
            .elements
            .iter()
            .filter_map(|el| match el {
                Element::Text { y, .. } => Some(*y),
                _ => None,
            })
            .fold(0.0_f32, f32::max);
        assert!(lowest < PAGE_HEIGHT_PT, "text reaches y={lowest}");

        // The headline total and payment band are still drawn
        assert!(layout.texts().any(|text| text.starts_with("Paid by ")));
        assert!(layout.contains_text("Original Tax Invoice"));

        // The worded pickup stops at the line cap; the unbroken drop-off is
        // one line cut to the column
        let address_lines = layout
            .elements
            .iter()
            .filter(|el| match el {
                Element::Text { x, style, .. } => {
                    *x == LEFT_X + 10.0 && style.size == 11.0 && style.weight == Weight::Regular
                }
                _ => false,
            })
            .count();
        assert_eq!(address_lines, MAX_ADDRESS_LINES + 1);
        assert!(layout.texts().filter(|text| text.ends_with(ELLIPSIS)).count() >= 2);
    }

    #[test]
    fn test_logo_slot_shifts_header_text() {
        let plain = layout(|_| {});
        let with_logo = build_export_layout(&receipt(|_| {}), true);

        let (x, y, size) = with_logo.logo_slot().unwrap();
        assert_eq!((x, y, size), (LEFT_X, 26.0, LOGO_SIZE));
        assert!(with_logo.fits_page());

        let company_x = |layout: &ExportLayout| {
            layout.elements.iter().find_map(|el| match el {
                Element::Text { x, text, .. } if text == "City Cabs" => Some(*x),
                _ => None,
            })
        };
        assert_eq!(company_x(&plain), Some(LEFT_X));
        assert!(company_x(&with_logo).unwrap() >= LEFT_X + LOGO_SIZE);
    }

    #[test]
    fn test_wrap_text() {
        assert_eq!(wrap_text("one two three", 10.0, 45.0), vec!["one two", "three"]);
        assert_eq!(wrap_text("", 10.0, 45.0), Vec::<String>::new());
        assert_eq!(wrap_text("unbreakableword", 10.0, 20.0), vec!["unbreakableword"]);
    }

    #[test]
    fn test_fit_line() {
        assert_eq!(fit_line("short", 10.0, 100.0), "short");
        // 10pt at 0.5 advance → 10 chars in 50pt
        assert_eq!(fit_line("abcdefghijklmnop", 10.0, 50.0), "abcdefg...");
        assert_eq!(fit_line("abcdef ghijklmnop", 10.0, 50.0), "abcdef...");
        assert_eq!(fit_line("abcdef", 10.0, 1.0), "a...");
    }

    #[test]
    fn test_color_hex() {
        assert_eq!(Color::ORANGE.hex(), "#ea580c");
        assert_eq!(Color::WHITE.unit(), (1.0, 1.0, 1.0));
    }
}
