//! # Structured Logging Module
//!
//! Environment-aware structured logging for the actor runtime and the elevator
//! controller. Console output by default, JSON lines when configured.

use crate::config::{detect_environment, LoggingConfig};
use chrono::Utc;
use std::sync::OnceLock;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Initialize structured logging with environment-specific defaults
pub fn init_structured_logging() {
    init_structured_logging_with(&LoggingConfig::default());
}

/// Initialize structured logging from a loaded [`LoggingConfig`]
///
/// Only the first call has any effect. `RUST_LOG` wins over the configured
/// level, which in turn wins over the environment default.
pub fn init_structured_logging_with(config: &LoggingConfig) {
    LOGGER_INITIALIZED.get_or_init(|| {
        let environment = detect_environment();
        let log_level = config
            .level
            .clone()
            .unwrap_or_else(|| get_log_level(&environment).to_string());
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level));

        let console_layer = (!config.json).then(|| {
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_level(true)
                .with_ansi(true)
        });
        let json_layer = config.json.then(|| {
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_level(true)
                .with_ansi(false)
                .json()
        });

        let subscriber = tracing_subscriber::registry()
            .with(filter)
            .with(console_layer)
            .with(json_layer);

        // Use try_init to avoid panic if global subscriber already set
        if subscriber.try_init().is_err() {
            tracing::debug!("Global tracing subscriber already initialized - continuing with existing subscriber");
        }

        tracing::info!(
            environment = %environment,
            level = %log_level,
            json = config.json,
            "🔧 STRUCTURED LOGGING: Initialized"
        );
    });
}

/// Get log level based on environment
fn get_log_level(environment: &str) -> &'static str {
    match environment {
        "production" => "info",
        "test" => "warn",
        _ => "debug",
    }
}

/// Log structured data for actor lifecycle operations
pub fn log_actor_operation(operation: &str, address: &str, actor: &str, status: &str, details: Option<&str>) {
    tracing::info!(
        operation = %operation,
        address = %address,
        actor = %actor,
        status = %status,
        details = details,
        timestamp = %Utc::now().to_rfc3339(),
        "🎭 ACTOR_OPERATION"
    );
}

/// Log structured data for an accepted elevator transition
pub fn log_elevator_transition(event: &str, from: &str, to: &str, floor: u8, pending: usize) {
    tracing::debug!(
        event = %event,
        from = %from,
        to = %to,
        floor = floor,
        pending = pending,
        "🛗 ELEVATOR_TRANSITION"
    );
}

/// Log error with full context
pub fn log_error(component: &str, operation: &str, error: &str, context: Option<&str>) {
    tracing::error!(
        component = %component,
        operation = %operation,
        error = %error,
        context = context,
        timestamp = %Utc::now().to_rfc3339(),
        "❌ ERROR"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_mapping() {
        assert_eq!(get_log_level("test"), "warn");
        assert_eq!(get_log_level("development"), "debug");
        assert_eq!(get_log_level("production"), "info");
        assert_eq!(get_log_level("unknown"), "debug");
    }

    #[test]
    fn test_init_is_idempotent() {
        init_structured_logging();
        init_structured_logging_with(&LoggingConfig {
            level: Some("trace".to_string()),
            json: true,
        });
        log_error("logging", "test", "nothing broke", None);
    }
}
