//! Held-key snapshot
//!
//! The browser layer updates this from keydown/keyup; the simulation only
//! reads it.

use serde::{Deserialize, Serialize};

/// Directions the player can steer in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Map a DOM `KeyboardEvent.key` value to a direction
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "a" | "A" => Some(Direction::Left),
            "ArrowRight" | "d" | "D" => Some(Direction::Right),
            "ArrowUp" | "w" | "W" => Some(Direction::Up),
            "ArrowDown" | "s" | "S" => Some(Direction::Down),
            _ => None,
        }
    }
}

/// Which directional keys are currently held
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyState {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl KeyState {
    pub fn set(&mut self, dir: Direction, held: bool) {
        match dir {
            Direction::Left => self.left = held,
            Direction::Right => self.right = held,
            Direction::Up => self.up = held,
            Direction::Down => self.down = held,
        }
    }

    /// Apply a DOM key event. Returns true if the key was a steering key.
    pub fn apply_key(&mut self, key: &str, held: bool) -> bool {
        match Direction::from_key(key) {
            Some(dir) => {
                self.set(dir, held);
                true
            }
            None => false,
        }
    }

    /// Release everything (focus loss swallows keyup events)
    pub fn release_all(&mut self) {
        *self = Self::default();
    }
}
