//! Helpers for driving an elevator controller the way hardware would

use troupe::elevator::{ElevatorController, ElevatorResult, Floor, Intent, Transition};

/// Feed sensor and door events until the car parks, returning every transition
///
/// Panics if the car has not parked after `bound` steps.
pub fn drive_to_idle(controller: &mut ElevatorController, bound: usize) -> ElevatorResult<Vec<Transition>> {
    let mut applied = Vec::new();
    while let Some(event) = controller.next_autonomous_event() {
        assert!(applied.len() < bound, "car still busy after {bound} steps: {}", controller.state());
        applied.push(controller.handle_event(event)?);
    }
    Ok(applied)
}

/// Floors at which the doors opened, in order
pub fn door_openings(transitions: &[Transition]) -> Vec<Floor> {
    transitions
        .iter()
        .filter(|transition| transition.intents.contains(&Intent::OpenDoors))
        .map(|transition| transition.floor)
        .collect()
}
