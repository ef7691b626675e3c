//! Configuration Loader
//!
//! Environment-aware loading: defaults, a base TOML file, an optional
//! per-environment override file and `TROUPE__*` environment variables, merged
//! with the `config` crate and validated before use.

use super::error::{ConfigResult, ConfigurationError};
use super::TroupeConfig;
use config::{Config, Environment, File, FileFormat, Map};
use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

const DEFAULT_CONFIG_DIR: &str = "config";
const BASE_FILE: &str = "troupe.toml";
const ENV_PREFIX: &str = "TROUPE";

/// Detect current environment from environment variables
///
/// `TROUPE_ENV`, then `APP_ENV`, then `development`.
pub fn detect_environment() -> String {
    env::var("TROUPE_ENV")
        .or_else(|_| env::var("APP_ENV"))
        .unwrap_or_else(|_| "development".to_string())
        .to_lowercase()
}

/// Loaded, validated configuration together with where it came from
#[derive(Debug)]
pub struct ConfigManager {
    config: TroupeConfig,
    environment: String,
    config_directory: PathBuf,
}

impl ConfigManager {
    /// Load configuration with environment auto-detection
    pub fn load() -> ConfigResult<Arc<ConfigManager>> {
        Self::load_from_directory(None)
    }

    /// Load configuration from a specific directory
    pub fn load_from_directory(config_dir: Option<PathBuf>) -> ConfigResult<Arc<ConfigManager>> {
        let environment = detect_environment();
        Self::load_from_directory_with_env(config_dir, &environment)
    }

    /// Load configuration from a specific directory with explicit environment
    pub fn load_from_directory_with_env(
        config_dir: Option<PathBuf>,
        environment: &str,
    ) -> ConfigResult<Arc<ConfigManager>> {
        Self::load_with_variables(config_dir, environment, None)
    }

    /// Load with an explicit set of `TROUPE__*` variables instead of the
    /// process environment
    ///
    /// Useful for testing without modifying global environment variables.
    pub fn load_with_variables(
        config_dir: Option<PathBuf>,
        environment: &str,
        variables: Option<Map<String, String>>,
    ) -> ConfigResult<Arc<ConfigManager>> {
        let config_directory = config_dir.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_DIR));

        debug!(
            "Loading configuration for environment '{}' from directory: {}",
            environment,
            config_directory.display()
        );

        let config = Self::build(&config_directory, environment, variables)?;
        config.validate()?;

        info!(
            environment = %environment,
            floors = config.elevator.floors,
            address_prefix = %config.runtime.address_prefix,
            dispatch_budget = ?config.runtime.dispatch_budget,
            "Configuration loaded successfully"
        );

        Ok(Arc::new(ConfigManager {
            config,
            environment: environment.to_string(),
            config_directory,
        }))
    }

    fn build(
        config_directory: &Path,
        environment: &str,
        variables: Option<Map<String, String>>,
    ) -> ConfigResult<TroupeConfig> {
        let base = config_directory.join(BASE_FILE);
        let overlay = config_directory.join(format!("troupe.{environment}.toml"));

        let merged = Config::builder()
            .add_source(File::from(base).format(FileFormat::Toml).required(false))
            .add_source(File::from(overlay).format(FileFormat::Toml).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true)
                    .source(variables),
            )
            .build()
            .map_err(|e| ConfigurationError::load_error(config_directory.display().to_string(), e))?;

        merged
            .try_deserialize::<TroupeConfig>()
            .map_err(ConfigurationError::deserialization_error)
    }

    /// Get the loaded configuration
    pub fn config(&self) -> &TroupeConfig {
        &self.config
    }

    /// Get the current environment
    pub fn environment(&self) -> &str {
        &self.environment
    }

    /// Get the configuration directory
    pub fn config_directory(&self) -> &Path {
        &self.config_directory
    }
}
