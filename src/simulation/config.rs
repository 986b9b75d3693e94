//! Lane geometry and timing configuration
//!
//! All distances are in lane pixels, with `y` growing downward from the top
//! of the lane. Times are in milliseconds.

use anyhow::{ensure, Result};

/// Width of the lane
pub const LANE_WIDTH: i32 = 300;
/// Visible height of the lane; obstacles at or past this are despawned
pub const LANE_HEIGHT: i32 = 600;

/// Car dimensions
pub const CAR_WIDTH: i32 = 50;
pub const CAR_HEIGHT: i32 = 80;
/// Gap between the car's bottom edge and the bottom of the lane
pub const CAR_BOTTOM_MARGIN: i32 = 20;

/// Obstacles are as wide as the car
pub const OBSTACLE_HEIGHT: i32 = 60;

/// Forward travel per tick (road scroll and obstacle fall)
pub const GAME_SPEED: i32 = 5;
/// Period of the painted lane stripes
pub const STRIPE_PERIOD: i32 = 60;
/// Lateral distance covered by one move intent
pub const MOVE_STEP: i32 = 20;

/// Time between obstacle spawns
pub const SPAWN_INTERVAL_MS: u64 = 2000;

/// Configuration for a lane and everything moving on it
#[derive(Debug, Clone, PartialEq)]
pub struct LaneConfig {
    pub lane_width: i32,
    pub lane_height: i32,
    pub car_width: i32,
    pub car_height: i32,
    pub car_bottom_margin: i32,
    pub obstacle_height: i32,
    pub speed: i32,
    pub stripe_period: i32,
    pub move_step: i32,
    pub spawn_interval_ms: u64,
}

impl Default for LaneConfig {
    fn default() -> Self {
        Self {
            lane_width: LANE_WIDTH,
            lane_height: LANE_HEIGHT,
            car_width: CAR_WIDTH,
            car_height: CAR_HEIGHT,
            car_bottom_margin: CAR_BOTTOM_MARGIN,
            obstacle_height: OBSTACLE_HEIGHT,
            speed: GAME_SPEED,
            stripe_period: STRIPE_PERIOD,
            move_step: MOVE_STEP,
            spawn_interval_ms: SPAWN_INTERVAL_MS,
        }
    }
}

impl LaneConfig {
    /// Largest valid x for the car (and for a freshly spawned obstacle)
    pub fn max_x(&self) -> i32 {
        self.lane_width - self.car_width
    }

    /// Centered starting position of the car
    pub fn center_x(&self) -> i32 {
        self.max_x() / 2
    }

    /// Top edge of the car, which never moves vertically
    pub fn car_y(&self) -> i32 {
        self.lane_height - self.car_bottom_margin - self.car_height
    }

    /// Obstacles share the car's width
    pub fn obstacle_width(&self) -> i32 {
        self.car_width
    }

    /// Check that the geometry leaves the car somewhere to live
    pub fn validate(&self) -> Result<()> {
        ensure!(self.car_width > 0, "car width must be positive, got {}", self.car_width);
        ensure!(self.car_height > 0, "car height must be positive, got {}", self.car_height);
        ensure!(
            self.lane_width >= self.car_width,
            "lane width {} cannot fit a car of width {}",
            self.lane_width,
            self.car_width
        );
        ensure!(
            self.car_bottom_margin >= 0 && self.car_y() >= 0,
            "lane height {} cannot fit a car of height {} with bottom margin {}",
            self.lane_height,
            self.car_height,
            self.car_bottom_margin
        );
        ensure!(
            self.obstacle_height > 0,
            "obstacle height must be positive, got {}",
            self.obstacle_height
        );
        ensure!(self.speed > 0, "speed must be positive, got {}", self.speed);
        ensure!(
            self.speed <= self.lane_height,
            "speed {} would cross the whole lane of height {} in one frame",
            self.speed,
            self.lane_height
        );
        ensure!(
            self.stripe_period > 0,
            "stripe period must be positive, got {}",
            self.stripe_period
        );
        ensure!(self.move_step > 0, "move step must be positive, got {}", self.move_step);
        Ok(())
    }
}
