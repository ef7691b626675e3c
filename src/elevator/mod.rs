//! # Elevator Dispatch
//!
//! SCAN scheduling for a single car over a fixed set of floors.
//!
//! ## Architecture
//!
//! - **[`ElevatorState`]**: mode, floor and the three pending-request sets
//! - **[`transition`]**: pure `(state, event) -> state'`
//! - **[`check_invariants`] / [`check_transition`]**: safety predicates used as
//!   runtime assertions and test oracles
//! - **[`ElevatorController`]**: owns a state, validates and applies events, and
//!   reports door/motion [`Intent`]s for the hardware layer
//!
//! ## Usage
//!
//! ```rust
//! use troupe::elevator::{ElevatorController, ElevatorEvent, Mode};
//!
//! let mut controller = ElevatorController::new(5)?;
//! controller.handle_event(ElevatorEvent::UpCall(3))?;
//! controller.handle_event(ElevatorEvent::FloorSensor(2))?;
//! controller.handle_event(ElevatorEvent::FloorSensor(3))?;
//! assert_eq!(controller.state().mode, Mode::LoadingUp);
//!
//! controller.handle_event(ElevatorEvent::DoorsClose)?;
//! assert_eq!(controller.state().mode, Mode::Idle);
//! # Ok::<(), troupe::elevator::ElevatorError>(())
//! ```

pub mod controller;
pub mod errors;
pub mod events;
pub mod intents;
pub mod invariants;
pub mod state;
pub mod states;
pub mod transition;

pub use controller::{ElevatorController, Transition};
pub use errors::{ElevatorError, ElevatorResult};
pub use events::ElevatorEvent;
pub use intents::{intents_between, Intent};
pub use invariants::{check_invariants, check_transition, is_valid, Violation};
pub use state::{ElevatorState, Floor, GROUND_FLOOR};
pub use states::{Direction, Mode};
pub use transition::transition;
