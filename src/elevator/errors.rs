use super::events::ElevatorEvent;
use super::invariants::Violation;
use super::state::{ElevatorState, Floor};
use super::states::Mode;
use thiserror::Error;

/// Errors that can occur while dispatching elevator events
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ElevatorError {
    #[error("Invalid event {event} in {mode} at floor {floor}: {reason}")]
    InvalidEvent {
        mode: Mode,
        floor: Floor,
        event: ElevatorEvent,
        reason: String,
    },

    #[error("Floor {floor} is outside the building (floors 1..={floors})")]
    FloorOutOfRange { floor: Floor, floors: Floor },

    #[error("Invariant violated after {event} from {state}: {violation}")]
    InvariantViolation {
        state: Box<ElevatorState>,
        event: ElevatorEvent,
        violation: Violation,
    },

    #[error("Invalid building: {reason}")]
    InvalidBuilding { reason: String },
}

/// Result type alias for elevator operations
pub type ElevatorResult<T> = Result<T, ElevatorError>;

/// Helper for rejecting an event in the current state
pub fn invalid_event(state: &ElevatorState, event: ElevatorEvent, reason: impl Into<String>) -> ElevatorError {
    ElevatorError::InvalidEvent {
        mode: state.mode,
        floor: state.floor,
        event,
        reason: reason.into(),
    }
}
