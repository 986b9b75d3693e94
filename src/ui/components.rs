//! UI components and resources for linking Bevy entities to simulation state

use bevy::prelude::*;
use std::collections::HashMap;

use crate::simulation::{GameSession, LaneConfig, ObstacleId};

/// Resource wrapper for the game session
#[derive(Resource)]
pub struct SessionResource(pub GameSession);

impl Default for SessionResource {
    fn default() -> Self {
        Self(GameSession::default())
    }
}

/// Marker component for the main camera
#[derive(Component)]
pub struct MainCamera;

/// Marker for the player's car sprite
#[derive(Component)]
pub struct CarSprite;

/// Links a Bevy entity to a simulation obstacle
#[derive(Component)]
pub struct ObstacleLink(pub ObstacleId);

/// A painted lane stripe; the value is its unscrolled top edge in lane pixels
#[derive(Component)]
pub struct Stripe(pub i32);

/// Marker for HUD text elements
#[derive(Component)]
pub enum HudText {
    /// Current and best score
    Score,
    /// Start / game over prompt
    Prompt,
}

/// Resource to track Bevy entities mapped to simulation obstacles
#[derive(Resource, Default)]
pub struct EntityMappings {
    pub obstacles: HashMap<ObstacleId, Entity>,
}

/// Convert a lane rectangle (top-left origin, y down) to the translation of
/// its center in Bevy world space (lane centered on the origin, y up)
pub fn lane_to_world(
    config: &LaneConfig,
    x: i32,
    y: i32,
    width: i32,
    height: i32,
    z: f32,
) -> Vec3 {
    let center_x = x as f32 + width as f32 / 2.0 - config.lane_width as f32 / 2.0;
    let center_y = config.lane_height as f32 / 2.0 - (y as f32 + height as f32 / 2.0);
    Vec3::new(center_x, center_y, z)
}
