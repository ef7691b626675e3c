use super::state::Floor;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Inputs to the dispatch state machine: buttons pressed and sensors fired
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "floor", rename_all = "snake_case")]
pub enum ElevatorEvent {
    /// A floor button pressed inside the car
    DestinationButton(Floor),
    /// Up hall call pressed on a floor
    UpCall(Floor),
    /// Down hall call pressed on a floor
    DownCall(Floor),
    /// The car reached a floor while moving
    FloorSensor(Floor),
    /// The doors finished closing
    DoorsClose,
}

impl ElevatorEvent {
    /// Get a string representation of the event type for logging
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::DestinationButton(_) => "destination_button",
            Self::UpCall(_) => "up_call",
            Self::DownCall(_) => "down_call",
            Self::FloorSensor(_) => "floor_sensor",
            Self::DoorsClose => "doors_close",
        }
    }

    /// Floor the event refers to, if any
    pub fn floor(&self) -> Option<Floor> {
        match self {
            Self::DestinationButton(f) | Self::UpCall(f) | Self::DownCall(f) | Self::FloorSensor(f) => {
                Some(*f)
            }
            Self::DoorsClose => None,
        }
    }

    /// Check if this is a passenger request (car or hall button)
    pub fn is_request(&self) -> bool {
        matches!(
            self,
            Self::DestinationButton(_) | Self::UpCall(_) | Self::DownCall(_)
        )
    }
}

impl fmt::Display for ElevatorEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.floor() {
            Some(floor) => write!(f, "{}({floor})", self.event_type()),
            None => write!(f, "{}", self.event_type()),
        }
    }
}
