//! Standalone lane game simulation
//!
//! This module contains all of the game logic and can run independently of
//! the Bevy game engine. It can be tested and played headless without
//! booting the UI.

mod autopilot;
mod car;
mod collision;
mod config;
mod driver;
mod game_state;
mod input;
mod obstacle;
mod session;
mod snapshot;
mod spawner;
mod types;

pub use autopilot::{Autopilot, InputSource, NoInput, ScriptedInput};
pub use car::Car;
pub use collision::rects_intersect;
pub use config::{
    LaneConfig, CAR_BOTTOM_MARGIN, CAR_HEIGHT, CAR_WIDTH, GAME_SPEED, LANE_HEIGHT, LANE_WIDTH,
    MOVE_STEP, OBSTACLE_HEIGHT, SPAWN_INTERVAL_MS, STRIPE_PERIOD,
};
pub use driver::{
    FixedRateClock, FrameClock, FrameDriver, FrameRequest, RunReport, SteppedClock, StopHandle,
};
pub use game_state::{Engine, GameState};
pub use input::{InputBuffer, InputEvent};
pub use obstacle::Obstacle;
pub use session::{FrameOutcome, GameSession};
pub use snapshot::{ObstacleView, Snapshot};
pub use spawner::Spawner;
pub use types::{Direction, GamePhase, ObstacleId, Rect, Timestamp};
