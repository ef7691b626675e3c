use serde::{Deserialize, Serialize};
use std::fmt;

/// Travel direction of the car
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Up => write!(f, "up"),
            Self::Down => write!(f, "down"),
        }
    }
}

/// Operating mode of the elevator car
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Mode {
    /// Parked with doors closed and nothing to do
    Idle,
    /// Travelling up between floors
    MovingUp,
    /// Travelling down between floors
    MovingDown,
    /// Doors open, boarding passengers headed up
    LoadingUp,
    /// Doors open, boarding passengers headed down
    LoadingDown,
    /// Doors open, letting the last passengers out with no direction committed
    Unloading,
}

impl Mode {
    pub const ALL: [Mode; 6] = [
        Self::Idle,
        Self::MovingUp,
        Self::MovingDown,
        Self::LoadingUp,
        Self::LoadingDown,
        Self::Unloading,
    ];

    pub fn moving(direction: Direction) -> Self {
        match direction {
            Direction::Up => Self::MovingUp,
            Direction::Down => Self::MovingDown,
        }
    }

    pub fn loading(direction: Direction) -> Self {
        match direction {
            Direction::Up => Self::LoadingUp,
            Direction::Down => Self::LoadingDown,
        }
    }

    /// Check if the car is between floors
    pub fn is_moving(&self) -> bool {
        matches!(self, Self::MovingUp | Self::MovingDown)
    }

    /// Check if the doors are open
    pub fn doors_open(&self) -> bool {
        matches!(self, Self::LoadingUp | Self::LoadingDown | Self::Unloading)
    }

    /// Direction the car is committed to, if any
    pub fn direction(&self) -> Option<Direction> {
        match self {
            Self::MovingUp | Self::LoadingUp => Some(Direction::Up),
            Self::MovingDown | Self::LoadingDown => Some(Direction::Down),
            Self::Idle | Self::Unloading => None,
        }
    }
}

impl Default for Mode {
    fn default() -> Self {
        Self::Idle
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "IDLE"),
            Self::MovingUp => write!(f, "MOVING_UP"),
            Self::MovingDown => write!(f, "MOVING_DOWN"),
            Self::LoadingUp => write!(f, "LOADING_UP"),
            Self::LoadingDown => write!(f, "LOADING_DOWN"),
            Self::Unloading => write!(f, "UNLOADING"),
        }
    }
}

impl std::str::FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "IDLE" => Ok(Self::Idle),
            "MOVING_UP" => Ok(Self::MovingUp),
            "MOVING_DOWN" => Ok(Self::MovingDown),
            "LOADING_UP" => Ok(Self::LoadingUp),
            "LOADING_DOWN" => Ok(Self::LoadingDown),
            "UNLOADING" => Ok(Self::Unloading),
            _ => Err(format!("Invalid elevator mode: {s}")),
        }
    }
}
