//! CLI utilities for binaries
//!
//! Resolves which configuration file a binary loads.

use std::path::PathBuf;

/// Type of configuration to load
#[derive(Debug, Clone)]
pub enum ConfigType {
    /// Dashboard configuration (config/dashboard.yaml)
    Dashboard,
    /// Custom path
    Custom(String),
}

impl ConfigType {
    /// Get the default path for this config type
    pub fn default_path(&self) -> &str {
        match self {
            ConfigType::Dashboard => "config/dashboard.yaml",
            ConfigType::Custom(path) => path,
        }
    }

    /// Get the environment variable name for this config type
    pub fn env_var_name(&self) -> &str {
        match self {
            ConfigType::Dashboard => "MARKETMIND_CONFIG_PATH",
            ConfigType::Custom(_) => "CONFIG_PATH",
        }
    }

    /// First positional argument wins over the environment
    pub fn from_args(args: &[String]) -> Self {
        match args.iter().find(|a| !a.starts_with('-')) {
            Some(path) => ConfigType::Custom(path.clone()),
            None => ConfigType::Dashboard,
        }
    }
}

/// Load configuration path from environment or use default
///
/// # Examples
/// ```
/// use marketmind_dashboard::bin_common::{load_config_from_env, ConfigType};
///
/// let path = load_config_from_env(ConfigType::Dashboard);
/// ```
pub fn load_config_from_env(config_type: ConfigType) -> PathBuf {
    if let ConfigType::Custom(path) = &config_type {
        return path.into();
    }
    std::env::var(config_type.env_var_name())
        .unwrap_or_else(|_| config_type.default_path().to_string())
        .into()
}

/// Parse command line arguments for a binary
///
/// Returns a vector of arguments (excluding the program name)
pub fn parse_args() -> Vec<String> {
    std::env::args().skip(1).collect()
}
