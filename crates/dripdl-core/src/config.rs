use crate::paths::NoiseList;
use crate::retry::{RetryPolicy, DEFAULT_MAX_ATTEMPTS};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Service the CLI talks to unless `base_url` says otherwise.
pub const DEFAULT_BASE_URL: &str = "https://drip.kickstarter.com";

/// Retry policy parameters (optional section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Download attempts per round before the operator is asked (including the first).
    pub max_attempts: u32,
    /// Base delay in seconds before a retry (0 = retry immediately).
    pub base_delay_secs: f64,
    /// Maximum backoff delay in seconds.
    pub max_delay_secs: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_delay_secs: 0.0,
            max_delay_secs: 30,
        }
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(cfg: &RetryConfig) -> Self {
        let base = if cfg.base_delay_secs.is_finite() && cfg.base_delay_secs > 0.0 {
            Duration::from_secs_f64(cfg.base_delay_secs)
        } else {
            Duration::ZERO
        };
        RetryPolicy {
            max_attempts: cfg.max_attempts.max(1),
            base_delay: base,
            max_delay: Duration::from_secs(cfg.max_delay_secs),
        }
    }
}

/// Global configuration loaded from `~/.config/dripdl/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DripConfig {
    /// Service base URL; API paths are resolved against it.
    pub base_url: String,
    /// Preferred format used when `--format` is not given (asked otherwise).
    #[serde(default)]
    pub default_format: Option<String>,
    /// Names ignored when deciding whether an unpack directory already has content.
    #[serde(default = "default_noise_entries")]
    pub noise_entries: Vec<String>,
    /// Connect timeout in seconds.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    /// Whole-request timeout in seconds (archives can be large).
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Optional retry policy; if missing, built-in defaults are used.
    #[serde(default)]
    pub retry: Option<RetryConfig>,
}

fn default_noise_entries() -> Vec<String> {
    NoiseList::default().names().to_vec()
}

fn default_connect_timeout_secs() -> u64 {
    15
}

fn default_timeout_secs() -> u64 {
    3600
}

impl Default for DripConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            default_format: None,
            noise_entries: default_noise_entries(),
            connect_timeout_secs: default_connect_timeout_secs(),
            timeout_secs: default_timeout_secs(),
            retry: None,
        }
    }
}

impl DripConfig {
    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
            .as_ref()
            .map(RetryPolicy::from)
            .unwrap_or_default()
    }

    pub fn noise_list(&self) -> NoiseList {
        NoiseList::new(self.noise_entries.iter().cloned())
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("dripdl")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<DripConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = DripConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: DripConfig = toml::from_str(&data)?;
    Ok(cfg)
}
