use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load config file: {0}")]
    FileError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

pub const DOCUMENTS_ROOT_ENV: &str = "MARKETMIND_DOCUMENTS_ROOT";
pub const SEARCH_URL_ENV: &str = "MARKETMIND_SEARCH_URL";

/// Dashboard configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub documents: DocumentsConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub windows: WindowsConfig,
    /// JSON file backing local preferences
    #[serde(default = "default_preferences_path")]
    pub preferences_path: PathBuf,
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Log destination for the terminal dashboard
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,
    /// Drop calendar entries whose ticker left the watchlist on first sync
    #[serde(default = "default_true")]
    pub reconcile_on_load: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DocumentBackend {
    /// One JSON file per document, polled for changes
    #[default]
    File,
    /// In-process, seeded from the files under `root` when present
    Memory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentsConfig {
    #[serde(default)]
    pub backend: DocumentBackend,
    #[serde(default = "default_documents_root")]
    pub root: PathBuf,
    #[serde(default = "default_collection")]
    pub collection: String,
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    #[serde(default)]
    pub reconnect: ReconnectConfig,
}

impl Default for DocumentsConfig {
    fn default() -> Self {
        Self {
            backend: DocumentBackend::default(),
            root: default_documents_root(),
            collection: default_collection(),
            poll_interval_ms: default_poll_interval_ms(),
            reconnect: ReconnectConfig::default(),
        }
    }
}

impl DocumentsConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// Exponential backoff for document watchers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconnectConfig {
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
    /// Unlimited when absent
    #[serde(default)]
    pub max_attempts: Option<usize>,
}

impl Default for ReconnectConfig {
    fn default() -> Self {
        Self {
            initial_delay_ms: default_initial_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
            max_attempts: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_search_url")]
    pub base_url: String,
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    #[serde(default = "default_quotes_count")]
    pub quotes_count: usize,
    #[serde(default = "default_search_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: default_search_url(),
            debounce_ms: default_debounce_ms(),
            quotes_count: default_quotes_count(),
            timeout_secs: default_search_timeout_secs(),
        }
    }
}

impl SearchConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Day-based view windows
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowsConfig {
    #[serde(default = "default_hero_lookahead_days")]
    pub hero_lookahead_days: f64,
    #[serde(default = "default_earnings_days")]
    pub earnings_days: f64,
    #[serde(default = "default_calendar_days")]
    pub calendar_days: f64,
}

impl Default for WindowsConfig {
    fn default() -> Self {
        Self {
            hero_lookahead_days: default_hero_lookahead_days(),
            earnings_days: default_earnings_days(),
            calendar_days: default_calendar_days(),
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            documents: DocumentsConfig::default(),
            search: SearchConfig::default(),
            windows: WindowsConfig::default(),
            preferences_path: default_preferences_path(),
            log_level: default_log_level(),
            log_file: default_log_file(),
            reconcile_on_load: true,
        }
    }
}

impl DashboardConfig {
    /// Load configuration from YAML file
    pub fn load(config_path: impl AsRef<Path>) -> Result<Self> {
        let yaml_content = std::fs::read_to_string(config_path)?;
        Self::from_yaml(&yaml_content)
    }

    /// Parse, apply environment overrides and validate
    pub fn from_yaml(yaml_content: &str) -> Result<Self> {
        let mut config: DashboardConfig = serde_yaml::from_str(yaml_content)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(root) = std::env::var(DOCUMENTS_ROOT_ENV) {
            info!("Overriding documents root from environment variable");
            self.documents.root = PathBuf::from(root);
        }

        if let Ok(url) = std::env::var(SEARCH_URL_ENV) {
            info!("Overriding search URL from environment variable");
            self.search.base_url = url;
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.documents.collection.is_empty() || self.documents.collection.contains('/') {
            return Err(ConfigError::ValidationError(
                "documents.collection must be a single non-empty path segment".to_string(),
            ));
        }

        if self.documents.poll_interval_ms == 0 {
            return Err(ConfigError::ValidationError(
                "documents.poll_interval_ms must be greater than 0".to_string(),
            ));
        }

        let reconnect = &self.documents.reconnect;
        if reconnect.initial_delay_ms == 0 || reconnect.max_delay_ms < reconnect.initial_delay_ms {
            return Err(ConfigError::ValidationError(
                "documents.reconnect delays must be positive with max_delay_ms >= initial_delay_ms"
                    .to_string(),
            ));
        }

        if !self.search.base_url.starts_with("http") {
            return Err(ConfigError::ValidationError(
                "search.base_url must be an http(s) URL".to_string(),
            ));
        }

        if self.search.quotes_count == 0 {
            return Err(ConfigError::ValidationError(
                "search.quotes_count must be greater than 0".to_string(),
            ));
        }

        let windows = [
            ("hero_lookahead_days", self.windows.hero_lookahead_days),
            ("earnings_days", self.windows.earnings_days),
            ("calendar_days", self.windows.calendar_days),
        ];
        for (name, days) in windows {
            if !(days.is_finite() && days > 0.0) {
                return Err(ConfigError::ValidationError(format!(
                    "windows.{} must be greater than 0",
                    name
                )));
            }
        }

        let valid_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_levels.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "log_level must be one of: {}",
                valid_levels.join(", ")
            )));
        }

        Ok(())
    }

    /// Log configuration summary
    pub fn log(&self) {
        info!("Configuration loaded:");
        info!(
            "  Documents: {:?} at {} (collection {})",
            self.documents.backend,
            self.documents.root.display(),
            self.documents.collection
        );
        info!("  Poll interval: {} ms", self.documents.poll_interval_ms);
        info!("  Search: {} (debounce {} ms)", self.search.base_url, self.search.debounce_ms);
        info!(
            "  Windows: hero {}d, earnings {}d, calendar {}d",
            self.windows.hero_lookahead_days, self.windows.earnings_days, self.windows.calendar_days
        );
        info!("  Preferences: {}", self.preferences_path.display());
        info!("  Reconcile on load: {}", self.reconcile_on_load);
        info!("  Log level: {}", self.log_level);
    }
}

fn default_documents_root() -> PathBuf {
    PathBuf::from("config/documents")
}

fn default_collection() -> String {
    "market_data".to_string()
}

fn default_poll_interval_ms() -> u64 {
    500
}

fn default_initial_delay_ms() -> u64 {
    500
}

fn default_max_delay_ms() -> u64 {
    10_000
}

fn default_search_url() -> String {
    "https://query2.finance.yahoo.com/v1/finance/search".to_string()
}

fn default_debounce_ms() -> u64 {
    500
}

fn default_quotes_count() -> usize {
    5
}

fn default_search_timeout_secs() -> u64 {
    5
}

fn default_hero_lookahead_days() -> f64 {
    3.0
}

fn default_earnings_days() -> f64 {
    7.0
}

fn default_calendar_days() -> f64 {
    30.0
}

fn default_preferences_path() -> PathBuf {
    PathBuf::from(".marketmind/preferences.json")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> PathBuf {
    PathBuf::from("logs/marketmind.log")
}

fn default_true() -> bool {
    true
}
