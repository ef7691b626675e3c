//! # Dispatch Transition Function
//!
//! Pure `(state, event) -> state'` implementing the SCAN discipline: the car
//! keeps its direction while any request lies beyond it, and only reverses once
//! that side is exhausted.
//!
//! Dispatch is a single match on the current [`Mode`] followed by a match on the
//! event, so adding a mode or event kind is a compile error until every pair is
//! handled.

use super::errors::{invalid_event, ElevatorError, ElevatorResult};
use super::events::ElevatorEvent;
use super::state::{ElevatorState, Floor, GROUND_FLOOR};
use super::states::{Direction, Mode};

/// Compute the state that follows `event`
///
/// `floors` is the number of floors in the building. The input state is never
/// modified; rejected events leave the caller's state untouched.
///
/// # Errors
///
/// - [`ElevatorError::FloorOutOfRange`] for floors outside `1..=floors`
/// - [`ElevatorError::InvalidEvent`] for events that make no sense in the
///   current mode (sensors while stopped, door closes while moving, missing
///   hall buttons, sensor readings that skip floors)
pub fn transition(state: &ElevatorState, event: ElevatorEvent, floors: Floor) -> ElevatorResult<ElevatorState> {
    validate_event(state, event, floors)?;

    let next = state.clone();
    match state.mode {
        Mode::Idle => idle(next, event),
        Mode::MovingUp => moving(next, Direction::Up, event),
        Mode::MovingDown => moving(next, Direction::Down, event),
        Mode::LoadingUp => loading(next, Direction::Up, event),
        Mode::LoadingDown => loading(next, Direction::Down, event),
        Mode::Unloading => unloading(next, event),
    }
}

fn validate_event(state: &ElevatorState, event: ElevatorEvent, floors: Floor) -> ElevatorResult<()> {
    if let Some(floor) = event.floor() {
        if !(GROUND_FLOOR..=floors).contains(&floor) {
            return Err(ElevatorError::FloorOutOfRange { floor, floors });
        }
    }

    match event {
        ElevatorEvent::UpCall(floor) if floor == floors => {
            Err(invalid_event(state, event, "there is no up button on the top floor"))
        }
        ElevatorEvent::DownCall(floor) if floor == GROUND_FLOOR => {
            Err(invalid_event(state, event, "there is no down button on the ground floor"))
        }
        _ => Ok(()),
    }
}

/// Add a button press to the matching request set
fn record(state: &mut ElevatorState, event: ElevatorEvent) {
    match event {
        ElevatorEvent::DestinationButton(floor) => {
            state.destinations.insert(floor);
        }
        ElevatorEvent::UpCall(floor) => {
            state.up_requests.insert(floor);
        }
        ElevatorEvent::DownCall(floor) => {
            state.down_requests.insert(floor);
        }
        ElevatorEvent::FloorSensor(_) | ElevatorEvent::DoorsClose => {}
    }
}

fn toward(from: Floor, to: Floor) -> Direction {
    if to > from {
        Direction::Up
    } else {
        Direction::Down
    }
}

fn idle(mut state: ElevatorState, event: ElevatorEvent) -> ElevatorResult<ElevatorState> {
    match event {
        ElevatorEvent::DestinationButton(floor) | ElevatorEvent::UpCall(floor) | ElevatorEvent::DownCall(floor)
            if floor == state.floor =>
        {
            // Already here: open the doors instead of recording anything
            state.mode = match event {
                ElevatorEvent::UpCall(_) => Mode::LoadingUp,
                ElevatorEvent::DownCall(_) => Mode::LoadingDown,
                _ => Mode::Unloading,
            };
            Ok(state)
        }
        ElevatorEvent::DestinationButton(floor) | ElevatorEvent::UpCall(floor) | ElevatorEvent::DownCall(floor) => {
            record(&mut state, event);
            state.mode = Mode::moving(toward(state.floor, floor));
            Ok(state)
        }
        ElevatorEvent::FloorSensor(_) => Err(invalid_event(&state, event, "the car is not moving")),
        ElevatorEvent::DoorsClose => Err(invalid_event(&state, event, "the doors are already closed")),
    }
}

fn moving(mut state: ElevatorState, direction: Direction, event: ElevatorEvent) -> ElevatorResult<ElevatorState> {
    match event {
        ElevatorEvent::DestinationButton(_) | ElevatorEvent::UpCall(_) | ElevatorEvent::DownCall(_) => {
            // Requests behind the car wait for the return trip
            record(&mut state, event);
            Ok(state)
        }
        ElevatorEvent::FloorSensor(floor) => {
            let expected = match direction {
                Direction::Up => state.floor.checked_add(1),
                Direction::Down => state.floor.checked_sub(1),
            };
            if expected != Some(floor) {
                return Err(invalid_event(
                    &state,
                    event,
                    format!("sensor must report the next floor {direction} from {}", state.floor),
                ));
            }
            Ok(arrive(state, direction, floor))
        }
        ElevatorEvent::DoorsClose => Err(invalid_event(&state, event, "the doors are closed while moving")),
    }
}

/// Car reached `floor` travelling in `direction`; decide whether to stop there
fn arrive(mut state: ElevatorState, direction: Direction, floor: Floor) -> ElevatorState {
    state.floor = floor;

    let opposite = direction.opposite();
    let beyond = state.has_request_beyond(floor, direction);
    let stop = state.destinations.contains(&floor)
        || state.calls(direction).contains(&floor)
        || (state.calls(opposite).contains(&floor) && !beyond);

    if !stop {
        return state;
    }

    state.destinations.remove(&floor);

    state.mode = if beyond || state.calls(direction).contains(&floor) {
        state.calls_mut(direction).remove(&floor);
        Mode::loading(direction)
    } else if state.calls_mut(opposite).remove(&floor) {
        Mode::loading(opposite)
    } else if !state.has_requests() {
        Mode::Unloading
    } else {
        Mode::loading(opposite)
    };
    state
}

fn loading(mut state: ElevatorState, direction: Direction, event: ElevatorEvent) -> ElevatorResult<ElevatorState> {
    match event {
        ElevatorEvent::DestinationButton(floor) if floor == state.floor => Ok(state),
        ElevatorEvent::UpCall(floor) if floor == state.floor && direction == Direction::Up => Ok(state),
        ElevatorEvent::DownCall(floor) if floor == state.floor && direction == Direction::Down => Ok(state),
        ElevatorEvent::DestinationButton(_) | ElevatorEvent::UpCall(_) | ElevatorEvent::DownCall(_) => {
            record(&mut state, event);
            Ok(state)
        }
        ElevatorEvent::FloorSensor(_) => Err(invalid_event(&state, event, "the car is not moving")),
        ElevatorEvent::DoorsClose => {
            let floor = state.floor;
            let opposite = direction.opposite();

            state.mode = if !state.has_requests() {
                Mode::Idle
            } else if state.has_request_beyond(floor, direction) {
                Mode::moving(direction)
            } else if state.calls_mut(opposite).remove(&floor) {
                Mode::loading(opposite)
            } else {
                Mode::moving(opposite)
            };
            Ok(state)
        }
    }
}

fn unloading(mut state: ElevatorState, event: ElevatorEvent) -> ElevatorResult<ElevatorState> {
    match event {
        ElevatorEvent::DestinationButton(floor) | ElevatorEvent::UpCall(floor) | ElevatorEvent::DownCall(floor)
            if floor == state.floor =>
        {
            Ok(state)
        }
        ElevatorEvent::DestinationButton(floor) => {
            // A boarding passenger commits the car to a direction
            record(&mut state, event);
            state.mode = Mode::loading(toward(state.floor, floor));
            Ok(state)
        }
        ElevatorEvent::UpCall(_) | ElevatorEvent::DownCall(_) => {
            record(&mut state, event);
            Ok(state)
        }
        ElevatorEvent::FloorSensor(_) => Err(invalid_event(&state, event, "the car is not moving")),
        ElevatorEvent::DoorsClose => {
            state.mode = match state.highest_request() {
                None => Mode::Idle,
                Some(top) if top > state.floor => Mode::MovingUp,
                Some(_) => Mode::MovingDown,
            };
            Ok(state)
        }
    }
}
