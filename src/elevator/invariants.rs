//! # Safety Invariants
//!
//! State-level rules every reachable state must satisfy, plus the
//! transition-level direction-reversal guard. Used by the controller as a
//! runtime assertion and by the test suites as an oracle.

use super::state::{ElevatorState, Floor, GROUND_FLOOR};
use super::states::{Direction, Mode};
use serde::Serialize;
use std::ops::RangeInclusive;
use thiserror::Error;

/// A broken safety rule
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum Violation {
    #[error("car floor {floor} is outside 1..={floors}")]
    FloorOutOfRange { floor: Floor, floors: Floor },

    #[error("{set} request for floor {floor} cannot exist in a {floors}-floor building")]
    RequestOutOfRange {
        set: &'static str,
        floor: Floor,
        floors: Floor,
    },

    #[error("idle with {pending} pending requests")]
    IdleWithRequests { pending: usize },

    #[error("{mode} at floor {floor} with no request {direction} of it")]
    MovingWithoutRequest {
        mode: Mode,
        floor: Floor,
        direction: Direction,
    },

    #[error("{mode} at floor {floor} still holds the request it is serving")]
    UnclearedRequest { mode: Mode, floor: Floor },

    #[error("reversed to {direction} at floor {floor} with requests still pending {}", .direction.opposite())]
    PrematureReversal { floor: Floor, direction: Direction },
}

/// Check every state-level rule
pub fn check_invariants(state: &ElevatorState, floors: Floor) -> Result<(), Violation> {
    let floor = state.floor;
    if !(GROUND_FLOOR..=floors).contains(&floor) {
        return Err(Violation::FloorOutOfRange { floor, floors });
    }

    check_request_range("destination", state.destinations.iter(), GROUND_FLOOR..=floors, floors)?;
    check_request_range("up", state.up_requests.iter(), GROUND_FLOOR..=floors.saturating_sub(1), floors)?;
    check_request_range("down", state.down_requests.iter(), GROUND_FLOOR + 1..=floors, floors)?;

    match state.mode {
        Mode::Idle if state.has_requests() => Err(Violation::IdleWithRequests {
            pending: state.pending_count(),
        }),
        Mode::Idle => Ok(()),
        Mode::MovingUp | Mode::MovingDown => {
            let direction = if state.mode == Mode::MovingUp {
                Direction::Up
            } else {
                Direction::Down
            };
            if state.has_request_beyond(floor, direction) {
                Ok(())
            } else {
                Err(Violation::MovingWithoutRequest {
                    mode: state.mode,
                    floor,
                    direction,
                })
            }
        }
        Mode::LoadingUp | Mode::LoadingDown | Mode::Unloading => {
            let holds_served_request = state.destinations.contains(&floor)
                || (state.mode != Mode::LoadingDown && state.up_requests.contains(&floor))
                || (state.mode != Mode::LoadingUp && state.down_requests.contains(&floor));
            if holds_served_request {
                Err(Violation::UnclearedRequest {
                    mode: state.mode,
                    floor,
                })
            } else {
                Ok(())
            }
        }
    }
}

fn check_request_range<'a>(
    set: &'static str,
    mut requests: impl Iterator<Item = &'a Floor>,
    allowed: RangeInclusive<Floor>,
    floors: Floor,
) -> Result<(), Violation> {
    match requests.find(|floor| !allowed.contains(*floor)) {
        Some(floor) => Err(Violation::RequestOutOfRange {
            set,
            floor: *floor,
            floors,
        }),
        None => Ok(()),
    }
}

/// Check the rules that relate a state to its successor
///
/// Checks `next` with [`check_invariants`] and then applies the
/// direction-reversal guard: the car may only switch its service direction once
/// nothing is pending beyond the current floor in the old direction.
pub fn check_transition(prev: &ElevatorState, next: &ElevatorState, floors: Floor) -> Result<(), Violation> {
    check_invariants(next, floors)?;

    if let (Some(old), Some(new)) = (prev.mode.direction(), next.mode.direction()) {
        if new != old && next.has_request_beyond(next.floor, old) {
            return Err(Violation::PrematureReversal {
                floor: next.floor,
                direction: new,
            });
        }
    }
    Ok(())
}

/// Boolean form of [`check_invariants`]
pub fn is_valid(state: &ElevatorState, floors: Floor) -> bool {
    check_invariants(state, floors).is_ok()
}
