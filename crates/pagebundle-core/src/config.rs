use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// App key of the data page the bundle button lives on.
pub const DEFAULT_APP_KEY: &str = "caf260008b9d7c9e44bc43348bd1";

/// HTTP parameters for attachment fetches (optional section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Seconds allowed for the TCP/TLS connect phase.
    pub connect_timeout_secs: u64,
    /// Hard limit in seconds for one whole fetch.
    pub timeout_secs: u64,
    /// User-Agent header; curl's default when unset.
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 15,
            timeout_secs: 300,
            user_agent: None,
        }
    }
}

/// Global configuration loaded from `~/.config/pagebundle/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BundleConfig {
    /// Only pages announcing this app key activate the bundle flow.
    pub expected_app_key: String,
    /// Substring that marks an "edit record" file input by its `name`.
    pub input_name_marker: String,
    /// Calculated field whose displayed value names the archive.
    pub filename_field: String,
    /// Where archives are written (None = current directory).
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
    /// Base URL used to resolve relative attachment links.
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub http: HttpConfig,
}

impl Default for BundleConfig {
    fn default() -> Self {
        Self {
            expected_app_key: DEFAULT_APP_KEY.to_string(),
            input_name_marker: "EditRecord".to_string(),
            filename_field: "Calculated_Field_1".to_string(),
            output_dir: None,
            base_url: None,
            http: HttpConfig::default(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("pagebundle")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<BundleConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = BundleConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
    let cfg: BundleConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}
