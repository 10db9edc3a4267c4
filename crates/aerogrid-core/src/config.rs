use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{AerogridError, Result};

/// Top-level configuration for the Aerogrid application.
///
/// Loaded from `~/.aerogrid/config.toml` by default. Each section corresponds
/// to a bounded context or cross-cutting concern.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AerogridConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub monitor: MonitorConfig,
    #[serde(default)]
    pub assist: AssistConfig,
}

impl AerogridConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: AerogridConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| AerogridError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// City name used in report filenames and log context.
    pub city: String,
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            city: "Hyderabad".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Port to bind on 127.0.0.1.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: 3030 }
    }
}

/// Pollution monitor configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Seconds between grid refreshes.
    pub refresh_interval_secs: u64,
    /// PM2.5 level above which a zone raises an alert (µg/m³).
    pub alert_threshold: f64,
    /// Maximum number of retained alerts (newest first).
    pub max_alerts: usize,
    /// Number of zones returned by the hotspot ranking.
    pub hotspot_limit: usize,
    /// Maximum PM2.5 movement per refresh for any zone (µg/m³).
    pub max_delta_per_refresh: f64,
    /// Lower clamp applied to every reading (µg/m³).
    pub pm_floor: f64,
    /// Upper clamp applied to every reading (µg/m³).
    pub pm_ceiling: f64,
    /// Fixed RNG seed for reproducible simulation runs. Unset in production.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rng_seed: Option<u64>,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            refresh_interval_secs: 60,
            alert_threshold: 60.0,
            max_alerts: 50,
            hotspot_limit: 10,
            max_delta_per_refresh: 12.0,
            pm_floor: 15.0,
            pm_ceiling: 130.0,
            rng_seed: None,
        }
    }
}

/// Assistant (query resolution engine) configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistConfig {
    /// Whether the /assist endpoint is served.
    pub enabled: bool,
    /// Maximum accepted message length in characters.
    pub max_message_chars: usize,
    /// Optional TOML file replacing the built-in knowledge set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub knowledge_file: Option<String>,
}

impl Default for AssistConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_message_chars: 2000,
            knowledge_file: None,
        }
    }
}
