//! Proptest strategies and state-space helpers for the elevator suites

use proptest::prelude::*;
use std::collections::BTreeSet;
use troupe::elevator::{is_valid, ElevatorEvent, ElevatorState, Floor, Mode};

/// Any event for any floor of a `floors`-floor building, valid or not
pub fn event_strategy(floors: Floor) -> impl Strategy<Value = ElevatorEvent> {
    prop_oneof![
        (1..=floors).prop_map(ElevatorEvent::DestinationButton),
        (1..=floors).prop_map(ElevatorEvent::UpCall),
        (1..=floors).prop_map(ElevatorEvent::DownCall),
        (1..=floors).prop_map(ElevatorEvent::FloorSensor),
        Just(ElevatorEvent::DoorsClose),
    ]
}

/// A building size and a run of events for it
pub fn scenario_strategy() -> impl Strategy<Value = (Floor, Vec<ElevatorEvent>)> {
    (2u8..=8).prop_flat_map(|floors| (Just(floors), prop::collection::vec(event_strategy(floors), 1..120)))
}

/// Requests only (no sensors or door events)
pub fn request_strategy(floors: Floor) -> impl Strategy<Value = ElevatorEvent> {
    prop_oneof![
        (1..=floors).prop_map(ElevatorEvent::DestinationButton),
        (1..floors).prop_map(ElevatorEvent::UpCall),
        (2..=floors).prop_map(ElevatorEvent::DownCall),
    ]
}

/// Every event a building of `floors` floors can produce
pub fn all_events(floors: Floor) -> Vec<ElevatorEvent> {
    let mut events = vec![ElevatorEvent::DoorsClose];
    for floor in 1..=floors {
        events.push(ElevatorEvent::DestinationButton(floor));
        events.push(ElevatorEvent::UpCall(floor));
        events.push(ElevatorEvent::DownCall(floor));
        events.push(ElevatorEvent::FloorSensor(floor));
    }
    events
}

fn subsets(floors: impl Iterator<Item = Floor>) -> Vec<BTreeSet<Floor>> {
    let floors: Vec<Floor> = floors.collect();
    (0u32..(1 << floors.len()))
        .map(|mask| {
            floors
                .iter()
                .enumerate()
                .filter(|(bit, _)| mask & (1 << bit) != 0)
                .map(|(_, floor)| *floor)
                .collect()
        })
        .collect()
}

/// Every state that satisfies the invariants in a `floors`-floor building
///
/// Exponential in `floors`; keep it to small buildings.
pub fn valid_states(floors: Floor) -> Vec<ElevatorState> {
    let destinations = subsets(1..=floors);
    let ups = subsets(1..floors);
    let downs = subsets(2..=floors);

    let mut states = Vec::new();
    for mode in Mode::ALL {
        for floor in 1..=floors {
            for dest in &destinations {
                for up in &ups {
                    for down in &downs {
                        let state = ElevatorState {
                            mode,
                            floor,
                            destinations: dest.clone(),
                            up_requests: up.clone(),
                            down_requests: down.clone(),
                        };
                        if is_valid(&state, floors) {
                            states.push(state);
                        }
                    }
                }
            }
        }
    }
    states
}

/// One embedder call against a small pool of named actors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActorOp {
    Spawn(usize),
    Cancel(usize),
    Send(usize),
}

impl ActorOp {
    pub fn address(&self) -> String {
        match self {
            Self::Spawn(slot) | Self::Cancel(slot) | Self::Send(slot) => format!("a{slot}"),
        }
    }
}

/// Spawn/cancel/send calls spread over `slots` addresses
pub fn actor_op_strategy(slots: usize) -> impl Strategy<Value = ActorOp> {
    prop_oneof![
        (0..slots).prop_map(ActorOp::Spawn),
        (0..slots).prop_map(ActorOp::Cancel),
        (0..slots).prop_map(ActorOp::Send),
    ]
}
