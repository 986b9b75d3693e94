//! UI module that visualizes the game using Bevy
//!
//! This module is purely a render and input boundary - all game logic is in
//! the `simulation` module. The UI turns key presses into input events, runs
//! one session frame per display refresh and draws the resulting state.

mod components;
mod input;
mod sync;
mod world;

use bevy::prelude::*;

pub use components::{EntityMappings, SessionResource};

use crate::simulation::LaneConfig;
use input::handle_input;
use sync::{sync_car, sync_obstacles, sync_stripes, tick_session, update_hud};
use world::setup_world;

/// Room around the lane for the HUD
const WINDOW_MARGIN: u32 = 80;

/// Window size that fits the lane plus the HUD
pub fn window_size(config: &LaneConfig) -> (u32, u32) {
    (
        config.lane_width.max(0) as u32 + 2 * WINDOW_MARGIN,
        config.lane_height.max(0) as u32 + 2 * WINDOW_MARGIN,
    )
}

/// Plugin to register all UI systems
pub struct LaneRunnerUIPlugin;

impl Plugin for LaneRunnerUIPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SessionResource>()
            .init_resource::<EntityMappings>()
            .add_systems(Startup, setup_world)
            .add_systems(
                Update,
                (
                    handle_input,
                    tick_session,
                    sync_car,
                    sync_obstacles,
                    sync_stripes,
                    update_hud,
                )
                    .chain(),
            );
    }
}
