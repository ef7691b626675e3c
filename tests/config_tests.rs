//! Configuration loading tests
//!
//! Each test loads from its own temp directory with an explicit variable map,
//! so nothing depends on the process environment.

use config::Map;
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use troupe::config::{ConfigManager, ConfigurationError, TroupeConfig};
use troupe::{ElevatorController, Manager};

fn vars(pairs: &[(&str, &str)]) -> Option<Map<String, String>> {
    Some(
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect(),
    )
}

fn write(dir: &Path, name: &str, contents: &str) {
    fs::write(dir.join(name), contents).unwrap();
}

#[test]
fn test_full_file_is_loaded() {
    let temp_dir = TempDir::new().unwrap();
    write(
        temp_dir.path(),
        "troupe.toml",
        r#"
[runtime]
address_prefix = "worker"
dispatch_budget = 5000

[elevator]
floors = 10
check_invariants = false

[logging]
level = "troupe=debug"
json = true
"#,
    );

    let manager =
        ConfigManager::load_with_variables(Some(temp_dir.path().to_path_buf()), "development", vars(&[])).unwrap();
    let config = manager.config();

    assert_eq!(config.runtime.address_prefix, "worker");
    assert_eq!(config.runtime.dispatch_budget, Some(5000));
    assert_eq!(config.elevator.floors, 10);
    assert!(!config.elevator.check_invariants);
    assert_eq!(config.logging.level.as_deref(), Some("troupe=debug"));
    assert!(config.logging.json);
}

#[test]
fn test_variables_override_files() {
    let temp_dir = TempDir::new().unwrap();
    write(temp_dir.path(), "troupe.toml", "[elevator]\nfloors = 6\n");
    write(temp_dir.path(), "troupe.test.toml", "[elevator]\nfloors = 7\n");

    let manager = ConfigManager::load_with_variables(
        Some(temp_dir.path().to_path_buf()),
        "test",
        vars(&[
            ("TROUPE__ELEVATOR__FLOORS", "9"),
            ("TROUPE__RUNTIME__DISPATCH_BUDGET", "250"),
            ("TROUPE__LOGGING__JSON", "true"),
        ]),
    )
    .unwrap();

    assert_eq!(manager.config().elevator.floors, 9);
    assert_eq!(manager.config().runtime.dispatch_budget, Some(250));
    assert!(manager.config().logging.json);
    assert_eq!(manager.environment(), "test");
}

#[test]
fn test_other_environment_file_is_ignored() {
    let temp_dir = TempDir::new().unwrap();
    write(temp_dir.path(), "troupe.production.toml", "[elevator]\nfloors = 30\n");

    let manager =
        ConfigManager::load_with_variables(Some(temp_dir.path().to_path_buf()), "development", vars(&[])).unwrap();

    assert_eq!(manager.config(), &TroupeConfig::default());
}

#[test]
fn test_invalid_values_are_rejected() {
    let temp_dir = TempDir::new().unwrap();

    let too_small = ConfigManager::load_with_variables(
        Some(temp_dir.path().to_path_buf()),
        "test",
        vars(&[("TROUPE__ELEVATOR__FLOORS", "1")]),
    );
    assert!(matches!(
        too_small,
        Err(ConfigurationError::InvalidValue { ref field, .. }) if field == "elevator.floors"
    ));

    let zero_budget = ConfigManager::load_with_variables(
        Some(temp_dir.path().to_path_buf()),
        "test",
        vars(&[("TROUPE__RUNTIME__DISPATCH_BUDGET", "0")]),
    );
    assert!(matches!(
        zero_budget,
        Err(ConfigurationError::InvalidValue { ref field, .. }) if field == "runtime.dispatch_budget"
    ));

    let not_a_number = ConfigManager::load_with_variables(
        Some(temp_dir.path().to_path_buf()),
        "test",
        vars(&[("TROUPE__ELEVATOR__FLOORS", "lots")]),
    );
    assert!(matches!(not_a_number, Err(ConfigurationError::DeserializationError { .. })));
}

#[test]
fn test_malformed_file_is_a_load_error() {
    let temp_dir = TempDir::new().unwrap();
    write(temp_dir.path(), "troupe.toml", "[elevator\nfloors = ");

    let result = ConfigManager::load_with_variables(Some(temp_dir.path().to_path_buf()), "test", vars(&[]));

    assert!(matches!(result, Err(ConfigurationError::LoadError { .. })));
}

#[test]
fn test_loaded_config_drives_components() {
    let temp_dir = TempDir::new().unwrap();
    write(
        temp_dir.path(),
        "troupe.toml",
        "[runtime]\naddress_prefix = \"cast\"\n\n[elevator]\nfloors = 3\n",
    );

    let manager =
        ConfigManager::load_with_variables(Some(temp_dir.path().to_path_buf()), "test", vars(&[])).unwrap();

    let controller = ElevatorController::from_config(&manager.config().elevator).unwrap();
    assert_eq!(controller.floors(), 3);

    let runtime: Manager<()> = Manager::with_config(manager.config().runtime.clone());
    assert_eq!(runtime.config().address_prefix, "cast");
}
