use super::state::ElevatorState;
use super::states::Direction;
use serde::{Deserialize, Serialize};

/// Door and motion commands for the embedder to map onto hardware
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "intent", content = "direction", rename_all = "snake_case")]
pub enum Intent {
    /// Start the motor in a direction
    Move(Direction),
    /// Halt at the current floor
    Stop,
    OpenDoors,
    /// Set the hall lantern; `None` switches it off
    Indicate(Option<Direction>),
}

/// Intents implied by moving from `prev` to `next`
///
/// Derived purely from the mode change, in the order the hardware should act on
/// them. Button presses that leave the mode unchanged produce none.
pub fn intents_between(prev: &ElevatorState, next: &ElevatorState) -> Vec<Intent> {
    let (from, to) = (prev.mode, next.mode);
    let mut intents = Vec::new();

    if from == to {
        return intents;
    }

    if from.is_moving() && !to.is_moving() {
        intents.push(Intent::Stop);
    }
    if to.doors_open() && !from.doors_open() {
        intents.push(Intent::OpenDoors);
    }
    if from.direction() != to.direction() {
        intents.push(Intent::Indicate(to.direction()));
    }
    if let Some(direction) = to.is_moving().then(|| to.direction()).flatten() {
        intents.push(Intent::Move(direction));
    }

    intents
}
