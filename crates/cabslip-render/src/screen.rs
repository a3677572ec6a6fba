//! # Screen Layout
//!
//! Responsive HTML for the on-screen preview and the print dialog.
//!
//! Reads the same [`Receipt`] as the export layout; the two never share
//! mutable state, so what is shown is what gets exported.

use cabslip_core::Receipt;

use crate::layout::Color;

/// Escapes text for HTML element content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

const STYLE: &str = "\
body{margin:0;font-family:system-ui,-apple-system,'Segoe UI',sans-serif;color:#1f2937;background:#f9fafb}\
.receipt{max-width:820px;margin:0 auto;background:#fff}\
.header{display:flex;flex-wrap:wrap;justify-content:space-between;gap:12px;padding:24px;color:#fff}\
.header h1{margin:0 0 6px;font-size:1.6rem}\
.header p{margin:0 0 2px}\
.meta{text-align:right}\
.headline{text-align:center;padding:24px}\
.total{font-size:2.4rem;font-weight:700}\
.columns{display:grid;grid-template-columns:1fr 1fr;gap:20px;padding:20px}\
.card{border-radius:6px;padding:10px;margin-bottom:10px}\
.row{display:flex;justify-content:space-between;margin-bottom:6px}\
.row span:last-child{font-weight:600}\
.grand{font-weight:700;font-size:1.1rem;padding:8px;border-radius:4px}\
.note{font-size:.75rem;color:#6b7280;text-align:center}\
.payment{display:flex;justify-content:space-between;align-items:center;padding:14px;color:#fff}\
.footer{display:grid;grid-template-columns:1fr 1fr;gap:16px;padding:12px;font-size:.8rem;color:#4b5563}\
.footer p{margin:0 0 2px}\
.fine{grid-column:1/-1;border-top:1px solid #d1d5db;padding-top:6px;font-size:.7rem}\
@media (max-width:640px){.columns,.footer{grid-template-columns:1fr}.meta{text-align:left}}\
@media print{body{background:#fff}}";

/// Renders the receipt as a standalone HTML document.
pub fn render_screen(receipt: &Receipt) -> String {
    let ride = &receipt.ride;
    let bill = &receipt.bill;
    let e = |text: &str| escape_html(text.trim());

    let mut html = String::with_capacity(8 * 1024);
    html.push_str(&format!(
        "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\
         <title>Invoice #{invoice}</title><style>{STYLE}</style></head><body>\
         <div class=\"receipt\">",
        invoice = e(&ride.invoice_id),
    ));

    html.push_str(&format!(
        "<div class=\"header\" style=\"background:{orange}\"><div><h1>{company}</h1>\
         <p>{address}</p><p>Mobile: {mobile}</p></div>\
         <div class=\"meta\"><p>{date}</p><p><strong>Invoice #{invoice}</strong></p></div></div>",
        orange = Color::ORANGE.hex(),
        company = e(&ride.company_name),
        address = e(&ride.company_address),
        mobile = e(&ride.mobile_number),
        date = e(&ride.date),
        invoice = e(&ride.invoice_id),
    ));

    html.push_str(&format!(
        "<div class=\"headline\" style=\"background:{cream}\"><div class=\"total\">{total}</div>\
         <p>Thanks for travelling with us, <strong style=\"color:{accent}\">{customer}</strong></p></div>",
        cream = Color::CREAM.hex(),
        total = e(&bill.total_display()),
        accent = Color::DEEP_ORANGE.hex(),
        customer = e(&ride.customer_name),
    ));

    // Ride details
    html.push_str(&format!(
        "<div class=\"columns\"><section><h3>Ride Details</h3>\
         <div class=\"card\" style=\"background:{cream}\"><small>You rode with</small><br><strong>{driver}</strong></div>\
         <div class=\"card\" style=\"background:{sky}\"><strong>{vehicle}</strong><br><small>{reg}</small></div>\
         <div class=\"card\" style=\"background:{cream}\"><small>FROM</small><br>{pickup}</div>\
         <div class=\"card\" style=\"background:{sky}\"><small>TO</small><br>{dropoff}</div></section>",
        cream = Color::CREAM.hex(),
        sky = Color::SKY.hex(),
        driver = e(&ride.driver_name),
        vehicle = e(&ride.vehicle_type),
        reg = e(&ride.vehicle_reg_no),
        pickup = e(&ride.pickup_address),
        dropoff = e(&ride.dropoff_address),
    ));

    // Bill details
    html.push_str(&format!(
        "<section><h3>Bill Details</h3><div class=\"card\" style=\"background:{}\">",
        Color::CREAM.hex()
    ));
    for item in &bill.line_items {
        html.push_str(&format!(
            "<div class=\"row\"><span>{}</span><span>{}</span></div>",
            e(&item.label),
            item.amount
        ));
    }
    html.push_str(&format!(
        "<hr><div class=\"row\"><span>Subtotal</span><span>{subtotal}</span></div>\
         <div class=\"row\"><span>{gst_label}</span><span>{gst}</span></div>\
         <div class=\"row grand\" style=\"background:{peach}\"><span>Total Bill</span><span>{total}</span></div>\
         <p class=\"note\">{note}</p></div>\
         <p class=\"card\" style=\"background:{sky}\"><small>We've fulfilled our promise to take you to \
         destination for pre-agreed Total Fare. Modifying the drop/route can change this fare.</small></p>\
         </section></div>",
        subtotal = bill.subtotal,
        gst_label = e(&bill.gst_label()),
        gst = bill.gst_amount,
        peach = Color::PEACH.hex(),
        total = e(&bill.total_display()),
        note = e(&bill.taxes_note()),
        sky = Color::SKY.hex(),
    ));

    html.push_str(&format!(
        "<div class=\"payment\" style=\"background:{navy}\"><div><small>Payment</small><br>\
         <strong>Paid by {method}</strong></div><div class=\"total\">{total}</div></div>",
        navy = Color::NAVY.hex(),
        method = ride.payment_method,
        total = e(&bill.total_display()),
    ));

    html.push_str(&format!(
        "<div class=\"footer\"><div><p><strong>Invoice Information</strong></p>\
         <p>Service Tax Category: Renting of Cab</p><p>Invoice Date: {date}</p>\
         <p><strong>Original Tax Invoice</strong></p></div>\
         <div><p><strong>Customer Support</strong></p>\
         <p>In case of any complaint/grievance against this invoice, write to us at</p>\
         <p><strong>{company}</strong></p><p>Mobile: {mobile}</p></div>\
         <p class=\"fine\"><strong>Please note:</strong> 1. This invoice is issued on behalf of Transport \
         Service Provider. 2. This is an electronically generated invoice and does not require a digital \
         signature.</p></div></div></body></html>",
        date = e(&ride.date),
        company = e(&ride.company_name),
        mobile = e(&ride.mobile_number),
    ));

    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use cabslip_core::types::{RideDefaults, RideRecord};

    fn receipt() -> Receipt {
        let mut ride = RideRecord::new(&RideDefaults::default(), "05 Jan 2025", "123456");
        ride.customer_name = "Asha <b>Rao</b>".to_string();
        ride.pickup_address = "MG Road".to_string();
        ride.dropoff_address = "Airport".to_string();
        ride.ride_fee = "1000".into();
        ride.toll_fee = "50".into();
        ride.airport_charges = "200".into();
        ride.payment_method = cabslip_core::PaymentMethod::Upi;
        Receipt::issue(ride).unwrap()
    }

    #[test]
    fn test_screen_shows_bill() {
        let html = render_screen(&receipt());
        for needle in [
            "Invoice #123456",
            "₹1475",
            "Your Trip",
            "₹1000.00",
            "Toll Convenience Fee",
            "₹50.00",
            "Airport Charges",
            "₹1250.00",
            "GST (18%)",
            "₹225.00",
            "Includes 18.0% Taxes",
            "Paid by UPI",
            "viewport",
        ] {
            assert!(html.contains(needle), "missing {needle:?}");
        }
    }

    #[test]
    fn test_screen_escapes_user_text() {
        let html = render_screen(&receipt());
        assert!(html.contains("Asha &lt;b&gt;Rao&lt;/b&gt;"));
        assert!(!html.contains("<b>Rao</b>"));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a & \"b\" <c> 'd'"), "a &amp; &quot;b&quot; &lt;c&gt; &#39;d&#39;");
    }
}
