//! # Config Commands

use std::path::PathBuf;

use serde::Serialize;
use tracing::debug;

use cabslip_core::types::{PaymentMethod, RideDefaults};

use crate::state::AppConfig;

/// What the frontend needs to draw an empty form.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigView {
    /// Values pre-filled into each new form.
    pub defaults: RideDefaults,
    /// Payment dropdown labels, in display order.
    pub payment_methods: Vec<&'static str>,
    /// Where exported receipts are saved.
    pub output_dir: PathBuf,
    /// Whether a custom font is configured for `₹`.
    pub custom_font: bool,
    /// Whether a logo is configured for the PDF header.
    pub custom_logo: bool,
    pub asset_timeout_ms: u64,
    pub settle_delay_ms: u64,
}

/// Gets the current application configuration.
///
/// ## When Used
/// - App startup (to build the form and the payment dropdown)
/// - Showing where the PDF went
pub fn get_config(config: &AppConfig) -> ConfigView {
    debug!("get_config command");
    ConfigView {
        defaults: config.ride_defaults(),
        payment_methods: PaymentMethod::ALL.iter().map(PaymentMethod::label).collect(),
        output_dir: config.output_dir(),
        custom_font: config.export.font_path.is_some(),
        custom_logo: config.export.logo_path.is_some(),
        asset_timeout_ms: config.export.asset_timeout_ms,
        settle_delay_ms: config.export.settle_delay_ms,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_config() {
        let mut config = AppConfig::default();
        config.company.name = "City Cab Service".to_string();
        config.export.output_dir = Some(PathBuf::from("/tmp/receipts"));

        let view = get_config(&config);
        assert_eq!(view.defaults.company_name, "City Cab Service");
        assert_eq!(view.defaults.gst_percentage, "18");
        assert_eq!(view.payment_methods, vec!["Cash", "UPI", "Card", "Net Banking"]);
        assert_eq!(view.output_dir, PathBuf::from("/tmp/receipts"));
        assert!(!view.custom_font);
        assert!(!view.custom_logo);

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["defaults"]["companyName"], "City Cab Service");
        assert_eq!(json["settleDelayMs"], 1500);

        config.export.logo_path = Some(PathBuf::from("/images/logo.png"));
        assert!(get_config(&config).custom_logo);
    }
}
