//! # Application Configuration
//!
//! Seeds every new form and tells the export pipeline where to write.
//!
//! ## Configuration Sources (later overrides earlier)
//! 1. Defaults (this file)
//! 2. Config file (`cabslip.toml`, or the path in `CABSLIP_CONFIG`)
//! 3. Environment variables (`CABSLIP_*`)
//!
//! ## Example `cabslip.toml`
//! ```toml
//! [company]
//! name = "City Cab Service"
//! address = "12 Residency Road, Bengaluru"
//! mobile = "+91 98450 00000"
//!
//! [ride]
//! driver_name = "Ravi Kumar"
//! vehicle_type = "Sedan"
//! vehicle_reg_no = "KA 01 AB 1234"
//! gst_percentage = "5"
//!
//! [export]
//! output_dir = "/home/ravi/Receipts"
//! font_path = "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf"
//! logo_path = "/home/ravi/Pictures/logo.png"
//! asset_timeout_ms = 3000
//! settle_delay_ms = 1500
//! ```
//!
//! Read-only after startup, so no mutex.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::{ProjectDirs, UserDirs};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use cabslip_core::types::{GstRate, RideDefaults};
use cabslip_render::assets::AssetConfig;
use cabslip_render::PipelineSettings;

/// Config file name inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "cabslip.toml";

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

// =============================================================================
// Sections
// =============================================================================

/// `[company]`: the operator printed in the receipt header and footer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanySettings {
    pub name: String,
    pub address: String,
    pub mobile: String,
}

/// `[ride]`: driver and vehicle details that rarely change between rides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RideSettings {
    pub driver_name: String,
    pub vehicle_type: String,
    pub vehicle_reg_no: String,
    pub gst_percentage: String,
}

/// `[export]`: where and how receipts are saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Output directory. The user's Downloads folder when unset.
    pub output_dir: Option<PathBuf>,
    /// TrueType font able to draw `₹`.
    pub font_path: Option<PathBuf>,
    /// PNG logo for the PDF header.
    pub logo_path: Option<PathBuf>,
    pub asset_timeout_ms: u64,
    pub settle_delay_ms: u64,
}

impl Default for CompanySettings {
    fn default() -> Self {
        let ride = RideDefaults::default();
        CompanySettings {
            name: ride.company_name,
            address: ride.company_address,
            mobile: ride.mobile_number,
        }
    }
}

impl Default for RideSettings {
    fn default() -> Self {
        let ride = RideDefaults::default();
        RideSettings {
            driver_name: ride.driver_name,
            vehicle_type: ride.vehicle_type,
            vehicle_reg_no: ride.vehicle_reg_no,
            gst_percentage: ride.gst_percentage,
        }
    }
}

impl Default for ExportSettings {
    fn default() -> Self {
        ExportSettings {
            output_dir: None,
            font_path: None,
            logo_path: None,
            asset_timeout_ms: 3000,
            settle_delay_ms: 1500,
        }
    }
}

// =============================================================================
// AppConfig
// =============================================================================

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub company: CompanySettings,
    pub ride: RideSettings,
    pub export: ExportSettings,
}

impl AppConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// `config_path` wins over `CABSLIP_CONFIG`, which wins over the
    /// platform config directory. A missing file is not an error.
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        Self::load_with(config_path, |key| std::env::var(key).ok())
    }

    /// [`load`](Self::load) with an explicit variable lookup.
    pub fn load_with<F>(config_path: Option<PathBuf>, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let path = config_path
            .or_else(|| lookup("CABSLIP_CONFIG").map(PathBuf::from))
            .or_else(Self::default_config_path);

        let mut config = match path {
            Some(path) if path.exists() => {
                let config = Self::from_file(&path)?;
                info!(path = %path.display(), "Loaded config file");
                config
            }
            Some(path) => {
                debug!(path = %path.display(), "No config file, using defaults");
                Self::default()
            }
            None => Self::default(),
        };

        config.apply_overrides(lookup);
        config.validate()?;
        Ok(config)
    }

    /// Parses one TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // GST must read as a non-negative percentage
        if GstRate::parse_percentage(&self.ride.gst_percentage).is_none() {
            return Err(ConfigError::Invalid(format!(
                "ride.gst_percentage must be a non-negative number, got: {:?}",
                self.ride.gst_percentage
            )));
        }

        if self.export.asset_timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "export.asset_timeout_ms must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Applies `CABSLIP_*` overrides from `lookup`.
    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let text_overrides: [(&str, &mut String); 7] = [
            ("CABSLIP_COMPANY_NAME", &mut self.company.name),
            ("CABSLIP_COMPANY_ADDRESS", &mut self.company.address),
            ("CABSLIP_MOBILE_NUMBER", &mut self.company.mobile),
            ("CABSLIP_DRIVER_NAME", &mut self.ride.driver_name),
            ("CABSLIP_VEHICLE_TYPE", &mut self.ride.vehicle_type),
            ("CABSLIP_VEHICLE_REG_NO", &mut self.ride.vehicle_reg_no),
            ("CABSLIP_GST_PERCENTAGE", &mut self.ride.gst_percentage),
        ];
        for (key, slot) in text_overrides {
            if let Some(value) = lookup(key) {
                debug!(key, "Overriding from environment");
                *slot = value;
            }
        }

        if let Some(dir) = lookup("CABSLIP_OUTPUT_DIR") {
            debug!(dir = %dir, "Overriding output directory from environment");
            self.export.output_dir = Some(PathBuf::from(dir));
        }

        if let Some(font) = lookup("CABSLIP_FONT_PATH") {
            self.export.font_path = Some(PathBuf::from(font));
        }

        if let Some(logo) = lookup("CABSLIP_LOGO_PATH") {
            self.export.logo_path = Some(PathBuf::from(logo));
        }

        let millis_overrides: [(&str, &mut u64); 2] = [
            ("CABSLIP_ASSET_TIMEOUT_MS", &mut self.export.asset_timeout_ms),
            ("CABSLIP_SETTLE_DELAY_MS", &mut self.export.settle_delay_ms),
        ];
        for (key, slot) in millis_overrides {
            if let Some(value) = lookup(key) {
                match value.trim().parse::<u64>() {
                    Ok(ms) => *slot = ms,
                    Err(_) => warn!(key, value = %value, "Ignoring non-numeric environment value"),
                }
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "cabslip", "cabslip")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Values that seed each new form.
    pub fn ride_defaults(&self) -> RideDefaults {
        RideDefaults {
            driver_name: self.ride.driver_name.clone(),
            vehicle_type: self.ride.vehicle_type.clone(),
            vehicle_reg_no: self.ride.vehicle_reg_no.clone(),
            company_name: self.company.name.clone(),
            company_address: self.company.address.clone(),
            mobile_number: self.company.mobile.clone(),
            gst_percentage: self.ride.gst_percentage.clone(),
        }
    }

    /// Export pipeline timings and assets.
    pub fn pipeline_settings(&self) -> PipelineSettings {
        PipelineSettings {
            assets: AssetConfig {
                font_path: self.export.font_path.clone(),
                logo_path: self.export.logo_path.clone(),
                timeout: Duration::from_millis(self.export.asset_timeout_ms),
            },
            settle_delay: Duration::from_millis(self.export.settle_delay_ms),
        }
    }

    /// Configured output directory, else Downloads, else home, else `.`.
    pub fn output_dir(&self) -> PathBuf {
        if let Some(dir) = &self.export.output_dir {
            return dir.clone();
        }
        match UserDirs::new() {
            Some(dirs) => dirs
                .download_dir()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| dirs.home_dir().to_path_buf()),
            None => PathBuf::from("."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.ride.gst_percentage, "18");
        assert_eq!(config.export.asset_timeout_ms, 3000);
        assert_eq!(config.export.settle_delay_ms, 1500);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_with(Some(dir.path().join("absent.toml")), no_env).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(
            &path,
            r#"
[company]
name = "City Cab Service"

[export]
settle_delay_ms = 0
logo_path = "logo.png"
"#,
        )
        .unwrap();

        let config = AppConfig::load_with(Some(path), no_env).unwrap();
        assert_eq!(config.company.name, "City Cab Service");
        assert_eq!(config.company.address, "");
        assert_eq!(config.ride.gst_percentage, "18");
        assert_eq!(config.export.settle_delay_ms, 0);
        assert_eq!(config.export.asset_timeout_ms, 3000);
        assert_eq!(config.export.logo_path, Some(PathBuf::from("logo.png")));
        assert!(config.export.font_path.is_none());
    }

    #[test]
    fn test_env_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[ride]\ndriver_name = \"Ravi\"\ngst_percentage = \"12\"\n").unwrap();

        let env: HashMap<&str, &str> = HashMap::from([
            ("CABSLIP_GST_PERCENTAGE", "5"),
            ("CABSLIP_OUTPUT_DIR", "/tmp/receipts"),
            ("CABSLIP_SETTLE_DELAY_MS", "250"),
            ("CABSLIP_ASSET_TIMEOUT_MS", "soon"),
            ("CABSLIP_LOGO_PATH", "/srv/logo.png"),
        ]);
        let config =
            AppConfig::load_with(Some(path), |key| env.get(key).map(|v| v.to_string())).unwrap();

        assert_eq!(config.ride.driver_name, "Ravi");
        assert_eq!(config.ride.gst_percentage, "5");
        assert_eq!(config.output_dir(), PathBuf::from("/tmp/receipts"));
        assert_eq!(config.export.settle_delay_ms, 250);
        assert_eq!(config.export.logo_path, Some(PathBuf::from("/srv/logo.png")));
        // Unparseable numbers are ignored
        assert_eq!(config.export.asset_timeout_ms, 3000);
    }

    #[test]
    fn test_config_path_from_env() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("elsewhere.toml");
        std::fs::write(&path, "[company]\nmobile = \"98450 00000\"\n").unwrap();
        let path_text = path.to_string_lossy().into_owned();

        let config = AppConfig::load_with(None, |key| {
            (key == "CABSLIP_CONFIG").then(|| path_text.clone())
        })
        .unwrap();
        assert_eq!(config.company.mobile, "98450 00000");
    }

    #[test]
    fn test_invalid_values_rejected() {
        let mut config = AppConfig::default();
        config.ride.gst_percentage = "-5".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = AppConfig::default();
        config.export.asset_timeout_ms = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[company\nname = ").unwrap();

        let err = AppConfig::load_with(Some(path), no_env).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_conversions() {
        let mut config = AppConfig::default();
        config.company.name = "City Cab Service".to_string();
        config.ride.vehicle_reg_no = "KA 01 AB 1234".to_string();
        config.export.font_path = Some(PathBuf::from("/fonts/noto.ttf"));
        config.export.logo_path = Some(PathBuf::from("/images/logo.png"));
        config.export.settle_delay_ms = 0;

        let defaults = config.ride_defaults();
        assert_eq!(defaults.company_name, "City Cab Service");
        assert_eq!(defaults.vehicle_reg_no, "KA 01 AB 1234");
        assert_eq!(defaults.gst_percentage, "18");

        let settings = config.pipeline_settings();
        assert_eq!(settings.assets.font_path, Some(PathBuf::from("/fonts/noto.ttf")));
        assert_eq!(settings.assets.logo_path, Some(PathBuf::from("/images/logo.png")));
        assert_eq!(settings.assets.timeout, Duration::from_millis(3000));
        assert!(settings.settle_delay.is_zero());
    }
}
