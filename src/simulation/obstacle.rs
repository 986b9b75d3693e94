//! Falling obstacles

use super::types::{ObstacleId, Rect};

/// An obstacle scrolling down the lane
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Obstacle {
    pub id: ObstacleId,
    pub x: i32,
    /// Top edge; negative while still above the visible lane
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Obstacle {
    pub fn new(id: ObstacleId, x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            id,
            x,
            y,
            width,
            height,
        }
    }

    /// Move the obstacle down by `distance`
    pub fn advance(&mut self, distance: i32) {
        self.y = self.y.saturating_add(distance);
    }

    /// Whether the obstacle has left the visible lane
    pub fn is_past(&self, despawn_threshold: i32) -> bool {
        self.y >= despawn_threshold
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}
