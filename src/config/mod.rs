//! # Configuration
//!
//! Typed configuration for the actor runtime, the elevator controller and
//! logging. Every section has working defaults, so an empty or missing config
//! directory is valid.
//!
//! ## Sources (later wins)
//!
//! 1. Built-in defaults
//! 2. `config/troupe.toml`
//! 3. `config/troupe.<environment>.toml`
//! 4. `TROUPE__<SECTION>__<KEY>` environment variables
//!
//! ```toml
//! [runtime]
//! address_prefix = "actor"
//! dispatch_budget = 10000
//!
//! [elevator]
//! floors = 5
//! check_invariants = true
//!
//! [logging]
//! level = "info"
//! json = false
//! ```

mod error;
mod loader;

use serde::{Deserialize, Serialize};

pub use error::{ConfigResult, ConfigurationError};
pub use loader::{detect_environment, ConfigManager};

/// Largest building the elevator controller accepts
pub const MAX_FLOORS: u8 = 64;

/// Root configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TroupeConfig {
    pub runtime: RuntimeConfig,
    pub elevator: ElevatorConfig,
    pub logging: LoggingConfig,
}

impl TroupeConfig {
    /// Validate every section
    pub fn validate(&self) -> ConfigResult<()> {
        self.runtime.validate()?;
        self.elevator.validate()
    }
}

/// Actor runtime settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Prefix for addresses the manager mints itself
    pub address_prefix: String,
    /// Maximum work items processed per `send`/`drain` call; unbounded when unset
    pub dispatch_budget: Option<usize>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            address_prefix: "actor".to_string(),
            dispatch_budget: None,
        }
    }
}

impl RuntimeConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        if self.address_prefix.trim().is_empty() {
            return Err(ConfigurationError::invalid_value(
                "runtime.address_prefix",
                &self.address_prefix,
                "address prefix must not be empty",
            ));
        }
        if self.dispatch_budget == Some(0) {
            return Err(ConfigurationError::invalid_value(
                "runtime.dispatch_budget",
                "0",
                "dispatch budget must be greater than 0 when set",
            ));
        }
        Ok(())
    }
}

/// Elevator controller settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElevatorConfig {
    pub floors: u8,
    /// Check safety invariants after every transition
    pub check_invariants: bool,
}

impl Default for ElevatorConfig {
    fn default() -> Self {
        Self {
            floors: 5,
            check_invariants: true,
        }
    }
}

impl ElevatorConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        if !(2..=MAX_FLOORS).contains(&self.floors) {
            return Err(ConfigurationError::invalid_value(
                "elevator.floors",
                self.floors.to_string(),
                format!("a building needs between 2 and {MAX_FLOORS} floors"),
            ));
        }
        Ok(())
    }
}

/// Logging settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive, e.g. `"info"` or `"troupe=debug"`; environment default when unset
    pub level: Option<String>,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}
