//! # Elevator Controller
//!
//! Owns one car's state and threads events through [`transition`], checking
//! safety invariants on every step before committing the new state.

use super::errors::{ElevatorError, ElevatorResult};
use super::events::ElevatorEvent;
use super::intents::{intents_between, Intent};
use super::invariants::check_transition;
use super::state::{ElevatorState, Floor};
use super::states::Mode;
use super::transition::transition;
use crate::config::{ElevatorConfig, MAX_FLOORS};
use crate::logging::{log_elevator_transition, log_error};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Outcome of one accepted event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    pub event: ElevatorEvent,
    pub from: Mode,
    pub to: Mode,
    pub floor: Floor,
    /// Hardware commands implied by the mode change
    pub intents: Vec<Intent>,
}

/// Dispatch controller for a single car
#[derive(Debug, Clone)]
pub struct ElevatorController {
    state: ElevatorState,
    floors: Floor,
    check_invariants: bool,
}

impl ElevatorController {
    /// Controller for a building with `floors` floors, idle on the ground floor
    pub fn new(floors: Floor) -> ElevatorResult<Self> {
        Self::from_config(&ElevatorConfig {
            floors,
            ..ElevatorConfig::default()
        })
    }

    pub fn from_config(config: &ElevatorConfig) -> ElevatorResult<Self> {
        if !(2..=MAX_FLOORS).contains(&config.floors) {
            return Err(ElevatorError::InvalidBuilding {
                reason: format!(
                    "{} floors requested, a building needs between 2 and {MAX_FLOORS}",
                    config.floors
                ),
            });
        }
        Ok(Self {
            state: ElevatorState::new(),
            floors: config.floors,
            check_invariants: config.check_invariants,
        })
    }

    /// Resume from a previously saved state
    ///
    /// # Errors
    ///
    /// [`ElevatorError::InvalidBuilding`] if the state breaks an invariant for
    /// this building.
    pub fn with_state(mut self, state: ElevatorState) -> ElevatorResult<Self> {
        super::invariants::check_invariants(&state, self.floors).map_err(|violation| {
            ElevatorError::InvalidBuilding {
                reason: format!("restored state is unsafe: {violation}"),
            }
        })?;
        self.state = state;
        Ok(self)
    }

    pub fn state(&self) -> &ElevatorState {
        &self.state
    }

    pub fn floors(&self) -> Floor {
        self.floors
    }

    /// Apply one event
    ///
    /// On error the current state is left unchanged.
    pub fn handle_event(&mut self, event: ElevatorEvent) -> ElevatorResult<Transition> {
        let next = match transition(&self.state, event, self.floors) {
            Ok(next) => next,
            Err(error) => {
                warn!(
                    event = %event,
                    mode = %self.state.mode,
                    floor = self.state.floor,
                    error = %error,
                    "Elevator event rejected"
                );
                return Err(error);
            }
        };

        if self.check_invariants {
            if let Err(violation) = check_transition(&self.state, &next, self.floors) {
                log_error(
                    "elevator",
                    event.event_type(),
                    &violation.to_string(),
                    Some(&self.state.to_string()),
                );
                return Err(ElevatorError::InvariantViolation {
                    state: Box::new(self.state.clone()),
                    event,
                    violation,
                });
            }
        }

        let applied = Transition {
            event,
            from: self.state.mode,
            to: next.mode,
            floor: next.floor,
            intents: intents_between(&self.state, &next),
        };
        log_elevator_transition(
            event.event_type(),
            &applied.from.to_string(),
            &applied.to.to_string(),
            applied.floor,
            next.pending_count(),
        );

        self.state = next;
        Ok(applied)
    }

    /// Apply events in order, stopping at the first error
    pub fn handle_events(
        &mut self,
        events: impl IntoIterator<Item = ElevatorEvent>,
    ) -> ElevatorResult<Vec<Transition>> {
        events.into_iter().map(|event| self.handle_event(event)).collect()
    }

    /// The event a cooperative car would produce next with no new requests
    ///
    /// A moving car reaches the adjacent floor and open doors close; an idle car
    /// has nothing to do.
    pub fn next_autonomous_event(&self) -> Option<ElevatorEvent> {
        match self.state.mode {
            Mode::MovingUp => Some(ElevatorEvent::FloorSensor(self.state.floor.saturating_add(1))),
            Mode::MovingDown => Some(ElevatorEvent::FloorSensor(self.state.floor.saturating_sub(1))),
            Mode::LoadingUp | Mode::LoadingDown | Mode::Unloading => Some(ElevatorEvent::DoorsClose),
            Mode::Idle => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elevator::states::Direction;
    use ElevatorEvent::*;

    #[test]
    fn test_building_size_is_checked() {
        assert!(matches!(
            ElevatorController::new(1),
            Err(ElevatorError::InvalidBuilding { .. })
        ));
        assert!(ElevatorController::new(2).is_ok());
        assert!(ElevatorController::new(MAX_FLOORS + 1).is_err());
    }

    #[test]
    fn test_transition_reports_intents() {
        let mut controller = ElevatorController::new(5).unwrap();

        let departed = controller.handle_event(UpCall(3)).unwrap();
        assert_eq!((departed.from, departed.to), (Mode::Idle, Mode::MovingUp));
        assert_eq!(departed.intents.last(), Some(&Intent::Move(Direction::Up)));

        controller.handle_events([FloorSensor(2)]).unwrap();
        let arrived = controller.handle_event(FloorSensor(3)).unwrap();
        assert_eq!(arrived.intents, vec![Intent::Stop, Intent::OpenDoors]);
    }

    #[test]
    fn test_rejected_event_keeps_state() {
        let mut controller = ElevatorController::new(5).unwrap();
        let before = controller.state().clone();

        assert!(controller.handle_event(DoorsClose).is_err());
        assert!(controller.handle_event(DestinationButton(9)).is_err());
        assert_eq!(controller.state(), &before);
    }

    #[test]
    fn test_with_state_rejects_unsafe_state() {
        let mut state = ElevatorState::new();
        state.destinations.insert(3);

        let result = ElevatorController::new(5).unwrap().with_state(state.clone());
        assert!(matches!(result, Err(ElevatorError::InvalidBuilding { .. })));

        state.mode = Mode::MovingUp;
        let controller = ElevatorController::new(5).unwrap().with_state(state).unwrap();
        assert_eq!(controller.next_autonomous_event(), Some(FloorSensor(2)));
    }

    #[test]
    fn test_autopilot_settles_idle() {
        let mut controller = ElevatorController::new(5).unwrap();
        controller
            .handle_events([DestinationButton(4), UpCall(2), DownCall(5)])
            .unwrap();

        let mut steps = 0;
        while let Some(event) = controller.next_autonomous_event() {
            controller.handle_event(event).unwrap();
            steps += 1;
            assert!(steps < 100, "controller failed to settle");
        }
        assert_eq!(controller.state().mode, Mode::Idle);
        assert!(!controller.state().has_requests());
    }
}
