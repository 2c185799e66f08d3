use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use setsync_engine::{DEFAULT_WORK_THRESHOLD, WarmupSource};

use crate::{Error, Result};

/// Resolve the data directory path based on priority:
/// 1. Explicit path (with tilde expansion)
/// 2. SETSYNC_PATH environment variable (with tilde expansion)
/// 3. ~/.setsync
pub fn resolve_data_dir(explicit_path: Option<&str>) -> Result<PathBuf> {
    if let Some(path) = explicit_path {
        return Ok(expand_tilde(path));
    }

    if let Ok(env_path) = std::env::var("SETSYNC_PATH") {
        return Ok(expand_tilde(&env_path));
    }

    if let Some(home) = std::env::var_os("HOME") {
        return Ok(PathBuf::from(home).join(".setsync"));
    }

    Err(Error::Config(
        "Could not determine data directory: no HOME directory found".to_string(),
    ))
}

/// Expand tilde (~) in paths to the user's home directory
fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = std::env::var_os("HOME")
    {
        return PathBuf::from(home).join(stripped);
    }
    PathBuf::from(path)
}

pub fn config_path(data_dir: &Path) -> PathBuf {
    data_dir.join("config.toml")
}

pub fn db_path(data_dir: &Path) -> PathBuf {
    data_dir.join("setsync.db")
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub import: ImportConfig,
    #[serde(default)]
    pub enrich: EnrichConfig,
    #[serde(default)]
    pub tracker: TrackerConfig,
    #[serde(default)]
    pub notify: NotifyConfig,
    #[serde(default)]
    pub volume: VolumeConfig,
}

impl Config {
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ImportConfig {
    /// Export file read by `import` when no path is given on the command
    /// line.
    #[serde(default)]
    pub csv_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichConfig {
    /// Warm-up source of truth: "detector" (relative working volume) or
    /// "sentinel" (capture-time set_order mark). The two signals may
    /// disagree; enrichment follows exactly one of them.
    #[serde(default = "default_warmup_source")]
    pub warmup_source: String,
    #[serde(default = "default_warmup_threshold")]
    pub warmup_threshold: f64,
}

impl Default for EnrichConfig {
    fn default() -> Self {
        Self {
            warmup_source: default_warmup_source(),
            warmup_threshold: default_warmup_threshold(),
        }
    }
}

impl EnrichConfig {
    pub fn warmup_source(&self) -> Result<WarmupSource> {
        match self.warmup_source.as_str() {
            "detector" => Ok(WarmupSource::Detector {
                threshold: self.warmup_threshold,
            }),
            "sentinel" => Ok(WarmupSource::Sentinel),
            other => Err(Error::Config(format!(
                "unknown warmup_source '{}' (expected 'detector' or 'sentinel')",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerConfig {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub database_id: Option<String>,
    #[serde(default = "default_tracker_api_base")]
    pub api_base: String,
    /// Fixed UTC offset applied to workout timestamps before delivery,
    /// e.g. "-06:00".
    #[serde(default = "default_utc_offset")]
    pub utc_offset: String,
    /// Delay between deliveries, respecting the tracker's rate limits.
    #[serde(default = "default_rate_limit_ms")]
    pub rate_limit_ms: u64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            token: None,
            database_id: None,
            api_base: default_tracker_api_base(),
            utc_offset: default_utc_offset(),
            rate_limit_ms: default_rate_limit_ms(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifyConfig {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user_key: Option<String>,
    #[serde(default = "default_notify_api_base")]
    pub api_base: String,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            token: None,
            user_key: None,
            api_base: default_notify_api_base(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VolumeConfig {
    #[serde(default = "default_primary_weight")]
    pub primary_weight: f64,
    #[serde(default = "default_secondary_weight")]
    pub secondary_weight: f64,
}

impl Default for VolumeConfig {
    fn default() -> Self {
        Self {
            primary_weight: default_primary_weight(),
            secondary_weight: default_secondary_weight(),
        }
    }
}

fn default_warmup_source() -> String {
    "detector".to_string()
}

fn default_warmup_threshold() -> f64 {
    DEFAULT_WORK_THRESHOLD
}

fn default_tracker_api_base() -> String {
    "https://api.notion.com".to_string()
}

fn default_utc_offset() -> String {
    "-06:00".to_string()
}

fn default_rate_limit_ms() -> u64 {
    250
}

fn default_notify_api_base() -> String {
    "https://api.pushover.net".to_string()
}

fn default_primary_weight() -> f64 {
    1.0
}

fn default_secondary_weight() -> f64 {
    0.5
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.enrich.warmup_source, "detector");
        assert_eq!(config.enrich.warmup_threshold, 0.6);
        assert_eq!(config.tracker.rate_limit_ms, 250);
        assert_eq!(config.volume.primary_weight, 1.0);
        assert_eq!(config.volume.secondary_weight, 0.5);
        assert!(config.import.csv_path.is_none());
    }

    #[test]
    fn test_config_save_and_load() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("config.toml");

        let mut config = Config::default();
        config.import.csv_path = Some(PathBuf::from("/exports/strong.csv"));
        config.tracker.token = Some("secret".to_string());
        config.tracker.database_id = Some("db-123".to_string());
        config.enrich.warmup_source = "sentinel".to_string();

        config.save_to(&config_path)?;
        assert!(config_path.exists());

        let loaded = Config::load_from(&config_path)?;
        assert_eq!(
            loaded.import.csv_path,
            Some(PathBuf::from("/exports/strong.csv"))
        );
        assert_eq!(loaded.tracker.token.as_deref(), Some("secret"));
        assert_eq!(loaded.enrich.warmup_source, "sentinel");

        Ok(())
    }

    #[test]
    fn test_load_nonexistent_returns_default() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("nonexistent.toml");

        let config = Config::load_from(&config_path)?;
        assert!(config.tracker.token.is_none());

        Ok(())
    }

    #[test]
    fn test_partial_file_fills_defaults() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(&config_path, "[enrich]\nwarmup_threshold = 0.5\n")?;

        let config = Config::load_from(&config_path)?;
        assert_eq!(config.enrich.warmup_threshold, 0.5);
        assert_eq!(config.enrich.warmup_source, "detector");
        assert_eq!(config.tracker.utc_offset, "-06:00");

        Ok(())
    }

    #[test]
    fn test_warmup_source_resolution() {
        let mut config = EnrichConfig::default();
        assert_eq!(
            config.warmup_source().unwrap(),
            WarmupSource::Detector { threshold: 0.6 }
        );

        config.warmup_source = "sentinel".to_string();
        assert_eq!(config.warmup_source().unwrap(), WarmupSource::Sentinel);

        config.warmup_source = "vibes".to_string();
        assert!(config.warmup_source().is_err());
    }

    #[test]
    fn test_explicit_data_dir_wins() {
        let dir = resolve_data_dir(Some("/tmp/setsync-test")).unwrap();
        assert_eq!(dir, PathBuf::from("/tmp/setsync-test"));
    }
}
