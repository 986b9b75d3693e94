//! Player input events and buffering between frames

use super::types::Direction;

/// A discrete intent delivered by the input boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    MoveLeft,
    MoveRight,
    /// Start the first game, or restart after a game over
    StartOrRestart,
}

impl InputEvent {
    /// Map a host key name to an event.
    ///
    /// Returns `None` for keys the game doesn't use.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "Left" | "a" | "A" => Some(InputEvent::MoveLeft),
            "ArrowRight" | "Right" | "d" | "D" => Some(InputEvent::MoveRight),
            "Enter" | "Space" | " " => Some(InputEvent::StartOrRestart),
            other => {
                log::debug!("Ignoring unmapped key {:?}", other);
                None
            }
        }
    }

    /// The lateral direction of a move event
    pub fn direction(&self) -> Option<Direction> {
        match self {
            InputEvent::MoveLeft => Some(Direction::Left),
            InputEvent::MoveRight => Some(Direction::Right),
            InputEvent::StartOrRestart => None,
        }
    }
}

/// Move intents waiting for the next frame.
///
/// Holds at most one pending move per direction; a second press of the same
/// key before the frame is coalesced into the first. Arrival order between
/// directions is kept.
#[derive(Debug, Clone, Default)]
pub struct InputBuffer {
    pending: Vec<Direction>,
}

impl InputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a move; returns false if one in that direction is already queued
    pub fn push(&mut self, direction: Direction) -> bool {
        if self.pending.contains(&direction) {
            return false;
        }
        self.pending.push(direction);
        true
    }

    /// Take every pending move in arrival order
    pub fn drain(&mut self) -> Vec<Direction> {
        std::mem::take(&mut self.pending)
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
