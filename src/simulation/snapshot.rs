//! Read-only view of a game for renderers
//!
//! A `Snapshot` is an owned copy, so a renderer can hold on to it while the
//! simulation moves on.

use super::game_state::GameState;
use super::types::{GamePhase, ObstacleId};

/// Position of one obstacle as seen by a renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObstacleView {
    pub id: ObstacleId,
    pub x: i32,
    pub y: i32,
}

/// Everything a renderer needs to draw a frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub score: u64,
    pub high_score: u64,
    pub car_x: i32,
    pub obstacles: Vec<ObstacleView>,
    pub lane_scroll_offset: i32,
}

impl From<&GameState> for Snapshot {
    fn from(state: &GameState) -> Self {
        Self {
            phase: state.phase,
            score: state.score,
            high_score: state.high_score,
            car_x: state.car.x,
            obstacles: state
                .obstacles
                .iter()
                .map(|obstacle| ObstacleView {
                    id: obstacle.id,
                    x: obstacle.x,
                    y: obstacle.y,
                })
                .collect(),
            lane_scroll_offset: state.lane_scroll_offset,
        }
    }
}
