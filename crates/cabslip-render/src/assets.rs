//! # Embedded Assets
//!
//! Assets are loaded before export with a bounded wait each. A missing or
//! slow asset never blocks the export: it is logged and the document is
//! produced without it.
//!
//! ```text
//! font_path ─┐                     ┌── ok ────────► Some(bytes)
//!            ├─► tokio::fs::read ──┼── io error ──► warn!, None
//! logo_path ─┘   (timeout, joined) └── elapsed ───► warn!, None
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, warn};

use crate::error::{ExportError, ExportResult};

/// Default bounded wait per asset.
pub const DEFAULT_ASSET_TIMEOUT: Duration = Duration::from_secs(3);

/// Where assets live and how long to wait for them.
#[derive(Debug, Clone)]
pub struct AssetConfig {
    /// TrueType font able to draw `₹`. Builtin Helvetica is used without it.
    pub font_path: Option<PathBuf>,
    /// Company logo (PNG or JPEG) drawn in the page header.
    pub logo_path: Option<PathBuf>,
    pub timeout: Duration,
}

impl Default for AssetConfig {
    fn default() -> Self {
        AssetConfig {
            font_path: None,
            logo_path: None,
            timeout: DEFAULT_ASSET_TIMEOUT,
        }
    }
}

/// Assets that finished loading in time.
#[derive(Debug, Clone, Default)]
pub struct Assets {
    pub font: Option<Vec<u8>>,
    pub logo: Option<Vec<u8>>,
}

impl Assets {
    pub fn none() -> Self {
        Assets::default()
    }
}

/// Loads every configured asset, skipping the ones that fail.
///
/// The loads run concurrently, so the whole stage waits at most one
/// `timeout`.
pub async fn load_assets(config: &AssetConfig) -> Assets {
    let (font, logo) = tokio::join!(
        load_optional("font", config.font_path.as_deref(), config.timeout),
        load_optional("logo", config.logo_path.as_deref(), config.timeout),
    );
    Assets { font, logo }
}

async fn load_optional(kind: &'static str, path: Option<&Path>, timeout: Duration) -> Option<Vec<u8>> {
    let path = path?;
    match load_asset(path, timeout).await {
        Ok(bytes) => {
            debug!(kind, path = %path.display(), bytes = bytes.len(), "Asset loaded");
            Some(bytes)
        }
        Err(e) => {
            warn!(kind, "Continuing without asset: {}", e);
            None
        }
    }
}

/// Reads one asset, giving up after `timeout`.
pub async fn load_asset(path: &Path, timeout: Duration) -> ExportResult<Vec<u8>> {
    match tokio::time::timeout(timeout, tokio::fs::read(path)).await {
        Ok(Ok(bytes)) if bytes.is_empty() => Err(ExportError::AssetLoad {
            path: path.to_path_buf(),
            reason: "file is empty".to_string(),
        }),
        Ok(Ok(bytes)) => Ok(bytes),
        Ok(Err(e)) => Err(ExportError::AssetLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }),
        Err(_) => Err(ExportError::AssetTimeout {
            path: path.to_path_buf(),
            timeout_ms: timeout.as_millis() as u64,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_font_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let config = AssetConfig {
            font_path: Some(dir.path().join("missing.ttf")),
            timeout: Duration::from_millis(500),
            ..AssetConfig::default()
        };

        let assets = load_assets(&config).await;
        assert!(assets.font.is_none());
    }

    #[tokio::test]
    async fn test_missing_logo_is_skipped_but_font_kept() {
        let dir = tempfile::tempdir().unwrap();
        let font = dir.path().join("font.ttf");
        std::fs::write(&font, b"font bytes").unwrap();

        let config = AssetConfig {
            font_path: Some(font),
            logo_path: Some(dir.path().join("missing.png")),
            timeout: Duration::from_millis(500),
        };
        let assets = load_assets(&config).await;

        assert!(assets.logo.is_none());
        assert_eq!(assets.font.as_deref(), Some(&b"font bytes"[..]));
    }

    /// A FIFO with no writer blocks `open` until the timeout fires.
    #[cfg(unix)]
    #[tokio::test]
    async fn test_slow_logo_times_out() {
        let dir = tempfile::tempdir().unwrap();
        let fifo = dir.path().join("logo.png");
        let status = std::process::Command::new("mkfifo").arg(&fifo).status().unwrap();
        assert!(status.success());

        let config = AssetConfig {
            logo_path: Some(fifo.clone()),
            timeout: Duration::from_millis(100),
            ..AssetConfig::default()
        };
        let started = std::time::Instant::now();
        let assets = load_assets(&config).await;

        assert!(assets.logo.is_none());
        assert!(started.elapsed() < Duration::from_secs(5));

        let err = load_asset(&fifo, Duration::from_millis(50)).await.unwrap_err();
        assert!(matches!(err, ExportError::AssetTimeout { timeout_ms: 50, .. }));

        // Opening a writer releases the blocked readers so the runtime can shut down
        drop(std::fs::OpenOptions::new().write(true).open(&fifo).unwrap());
    }

    #[tokio::test]
    async fn test_font_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("font.ttf");
        std::fs::write(&path, b"not really a font").unwrap();

        let config = AssetConfig {
            font_path: Some(path),
            timeout: Duration::from_secs(1),
            ..AssetConfig::default()
        };
        let assets = load_assets(&config).await;
        assert_eq!(assets.font.as_deref(), Some(&b"not really a font"[..]));
    }

    #[tokio::test]
    async fn test_empty_font_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.ttf");
        std::fs::write(&path, b"").unwrap();

        let err = load_asset(&path, Duration::from_secs(1)).await.unwrap_err();
        assert!(matches!(err, ExportError::AssetLoad { .. }));
    }

    #[tokio::test]
    async fn test_no_font_configured() {
        let assets = load_assets(&AssetConfig::default()).await;
        assert!(assets.font.is_none());
        assert!(assets.logo.is_none());
    }
}
