use super::states::{Direction, Mode};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Floor number, 1-based
pub type Floor = u8;

/// The ground floor
pub const GROUND_FLOOR: Floor = 1;

/// Full dispatch state of one car
///
/// Request sets are ordered so the highest and lowest pending floors are cheap
/// to find and so states compare and hash deterministically.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElevatorState {
    pub mode: Mode,
    pub floor: Floor,
    /// Floors selected from inside the car
    pub destinations: BTreeSet<Floor>,
    /// Floors with a pending up hall call
    pub up_requests: BTreeSet<Floor>,
    /// Floors with a pending down hall call
    pub down_requests: BTreeSet<Floor>,
}

impl ElevatorState {
    /// Idle at the ground floor with nothing pending
    pub fn new() -> Self {
        Self::at(GROUND_FLOOR)
    }

    /// Idle at `floor` with nothing pending
    pub fn at(floor: Floor) -> Self {
        Self {
            mode: Mode::Idle,
            floor,
            destinations: BTreeSet::new(),
            up_requests: BTreeSet::new(),
            down_requests: BTreeSet::new(),
        }
    }

    pub fn has_requests(&self) -> bool {
        !(self.destinations.is_empty() && self.up_requests.is_empty() && self.down_requests.is_empty())
    }

    /// Whether any button of any kind is pending at `floor`
    pub fn has_request_at(&self, floor: Floor) -> bool {
        self.destinations.contains(&floor)
            || self.up_requests.contains(&floor)
            || self.down_requests.contains(&floor)
    }

    pub fn highest_request(&self) -> Option<Floor> {
        [&self.destinations, &self.up_requests, &self.down_requests]
            .into_iter()
            .filter_map(|set| set.last().copied())
            .max()
    }

    pub fn lowest_request(&self) -> Option<Floor> {
        [&self.destinations, &self.up_requests, &self.down_requests]
            .into_iter()
            .filter_map(|set| set.first().copied())
            .min()
    }

    /// Whether some request lies strictly beyond `floor` travelling in `direction`
    pub fn has_request_beyond(&self, floor: Floor, direction: Direction) -> bool {
        match direction {
            Direction::Up => self.highest_request().is_some_and(|top| top > floor),
            Direction::Down => self.lowest_request().is_some_and(|bottom| bottom < floor),
        }
    }

    /// Hall calls pending for `direction`
    pub fn calls(&self, direction: Direction) -> &BTreeSet<Floor> {
        match direction {
            Direction::Up => &self.up_requests,
            Direction::Down => &self.down_requests,
        }
    }

    pub(crate) fn calls_mut(&mut self, direction: Direction) -> &mut BTreeSet<Floor> {
        match direction {
            Direction::Up => &mut self.up_requests,
            Direction::Down => &mut self.down_requests,
        }
    }

    /// Total number of pending requests across the three sets
    pub fn pending_count(&self) -> usize {
        self.destinations.len() + self.up_requests.len() + self.down_requests.len()
    }
}

impl Default for ElevatorState {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ElevatorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at floor {} (dest {:?}, up {:?}, down {:?})",
            self.mode, self.floor, self.destinations, self.up_requests, self.down_requests
        )
    }
}
