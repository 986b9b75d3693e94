//! The player's car
//!
//! The car only ever moves sideways; its vertical band near the bottom of the
//! lane is fixed by the lane configuration.

use super::config::LaneConfig;
use super::types::{Direction, Rect};

/// The player's car on the lane
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Car {
    /// Left edge, always within `[0, lane_width - car_width]`
    pub x: i32,
    /// Top edge
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Car {
    /// A car centered on the lane
    pub fn centered(config: &LaneConfig) -> Self {
        Self {
            x: config.center_x(),
            y: config.car_y(),
            width: config.car_width,
            height: config.car_height,
        }
    }

    /// Shift the car one step, clamped to the lane edges
    pub fn steer(&mut self, direction: Direction, config: &LaneConfig) {
        let target = match direction {
            Direction::Left => self.x.saturating_sub(config.move_step),
            Direction::Right => self.x.saturating_add(config.move_step),
        };
        self.x = target.clamp(0, config.max_x());
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}
