//! # Troupe Configuration Validator
//!
//! Command-line tool for validating troupe configuration across environments
//! before embedding the runtime or the elevator controller.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;
use troupe::config::{detect_environment, ConfigManager, TroupeConfig};
use troupe::elevator::ElevatorController;

#[derive(Parser)]
#[command(name = "config-validator")]
#[command(about = "Validate troupe configuration files")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Environment to validate (defaults to TROUPE_ENV / APP_ENV / development)
    #[arg(short, long)]
    environment: Option<String>,

    /// Configuration directory path (default: config)
    #[arg(short, long)]
    config_dir: Option<PathBuf>,

    /// Verbose output level (use multiple times for more verbosity)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load and validate every section (default)
    Validate,

    /// Print the merged configuration as JSON
    Show,

    /// Print the built-in defaults as JSON
    Defaults,
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let _subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .try_init();

    let result = match &cli.command {
        Some(Commands::Validate) | None => validate(&cli),
        Some(Commands::Show) => show(&cli),
        Some(Commands::Defaults) => print_json(&TroupeConfig::default()),
    };

    match result {
        Ok(()) => {
            info!("Configuration validation completed successfully");
            process::exit(0);
        }
        Err(e) => {
            error!("Configuration validation failed: {e:#}");
            eprintln!("❌ {e:#}");
            process::exit(1);
        }
    }
}

fn load(cli: &Cli) -> Result<std::sync::Arc<ConfigManager>> {
    let environment = cli.environment.clone().unwrap_or_else(detect_environment);
    ConfigManager::load_from_directory_with_env(cli.config_dir.clone(), &environment)
        .with_context(|| format!("loading configuration for environment '{environment}'"))
}

fn validate(cli: &Cli) -> Result<()> {
    let manager = load(cli)?;
    let config = manager.config();

    println!("🔧 Validating troupe configuration");
    println!("Environment: {}", manager.environment());
    println!("Config Directory: {}", manager.config_directory().display());
    println!();

    println!(
        "✅ runtime: address prefix '{}', dispatch budget {}",
        config.runtime.address_prefix,
        config
            .runtime
            .dispatch_budget
            .map_or_else(|| "unbounded".to_string(), |budget| budget.to_string())
    );

    // Building a controller exercises the same checks an embedder would hit
    let controller = ElevatorController::from_config(&config.elevator)
        .context("elevator section does not describe a usable building")?;
    println!(
        "✅ elevator: {} floors, invariant checks {}",
        controller.floors(),
        if config.elevator.check_invariants { "on" } else { "off" }
    );

    println!(
        "✅ logging: level {}, {} output",
        config.logging.level.as_deref().unwrap_or("(environment default)"),
        if config.logging.json { "json" } else { "console" }
    );

    println!("\n🎉 All configuration validation checks passed!");
    Ok(())
}

fn show(cli: &Cli) -> Result<()> {
    let manager = load(cli)?;
    print_json(manager.config())
}

fn print_json(config: &TroupeConfig) -> Result<()> {
    let rendered = serde_json::to_string_pretty(config).context("serializing configuration")?;
    println!("{rendered}");
    Ok(())
}
