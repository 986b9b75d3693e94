//! Obstacle spawning policy
//!
//! One obstacle appears per spawn interval, just above the visible lane, at a
//! random horizontal position. The randomness source is always passed in so
//! seeded runs replay exactly.

use rand::Rng;

use super::config::LaneConfig;
use super::obstacle::Obstacle;
use super::types::{ObstacleId, Timestamp};

/// Decides when obstacles appear and where
#[derive(Debug, Clone)]
pub struct Spawner {
    interval_ms: u64,
    max_x: i32,
    width: i32,
    height: i32,
}

impl Spawner {
    pub fn new(config: &LaneConfig) -> Self {
        Self {
            interval_ms: config.spawn_interval_ms,
            max_x: config.max_x(),
            width: config.obstacle_width(),
            height: config.obstacle_height,
        }
    }

    /// Whether more than one interval has passed since the last spawn.
    ///
    /// A clock that went backward counts as no time elapsed.
    pub fn is_due(&self, last_spawn: Timestamp, now: Timestamp) -> bool {
        now.saturating_sub(last_spawn) > self.interval_ms
    }

    /// Create an obstacle fully above the lane at a random x in `[0, max_x]`
    pub fn spawn<R: Rng>(&self, id: ObstacleId, rng: &mut R) -> Obstacle {
        let x = rng.random_range(0..=self.max_x);
        Obstacle::new(id, x, -self.height, self.width, self.height)
    }
}
