#![allow(clippy::doc_markdown)] // Allow technical terms like SCAN in docs
#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Troupe
//!
//! An address-isolated actor runtime and a SCAN elevator dispatch core.
//!
//! ## Overview
//!
//! The two subsystems are independent:
//!
//! - [`actors`]: actors are reachable only through an [`Address`]. The
//!   [`Manager`] is the sole authority that spawns them, routes messages to them
//!   and tears them down, and every teardown emits exactly one notice.
//! - [`elevator`]: a pure transition function over a six-mode state machine,
//!   guarded by safety invariants and wrapped in a controller that reports
//!   door/motion intents.
//!
//! ## Module Organization
//!
//! - [`actors`] - Manager, actor trait, messages, effects and teardown notices
//! - [`elevator`] - Dispatch state, transition function, invariants and controller
//! - [`config`] - Configuration loading and validation
//! - [`logging`] - Structured logging setup and helpers
//! - [`error`] - Crate-level error type
//!
//! ## Quick Start
//!
//! ```rust
//! use troupe::{ElevatorController, ElevatorEvent, Mode, TroupeConfig};
//!
//! # fn main() -> troupe::Result<()> {
//! let config = TroupeConfig::default();
//! config.validate()?;
//!
//! let mut controller = ElevatorController::from_config(&config.elevator)?;
//! let applied = controller.handle_event(ElevatorEvent::DestinationButton(4))?;
//! assert_eq!(applied.to, Mode::MovingUp);
//! # Ok(())
//! # }
//! ```
//!
//! ## Testing
//!
//! ```bash
//! cargo test --lib    # Unit tests
//! cargo test          # All tests
//! cargo bench --features benchmarks
//! ```

pub mod actors;
pub mod config;
pub mod elevator;
pub mod error;
pub mod logging;

pub use actors::{
    Actor, Address, ChannelObserver, Effect, HandlerContext, Manager, ManagerHandle, Message,
    RuntimeError, RuntimeResult, SpawnToken, Spawned, TeardownNotice, TeardownObserver,
    TeardownReason,
};
pub use config::{ConfigManager, ElevatorConfig, LoggingConfig, RuntimeConfig, TroupeConfig};
pub use elevator::{
    ElevatorController, ElevatorError, ElevatorEvent, ElevatorResult, ElevatorState, Intent, Mode,
};
pub use error::{Result, TroupeError};
pub use logging::init_structured_logging;
