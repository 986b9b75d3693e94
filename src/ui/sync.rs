//! Systems for syncing Bevy entities with simulation state

use bevy::prelude::*;
use std::collections::HashSet;

use super::components::{
    lane_to_world, CarSprite, EntityMappings, HudText, ObstacleLink, SessionResource, Stripe,
};
use crate::simulation::{GamePhase, ObstacleId};

const OBSTACLE_COLOR: Color = Color::srgb(0.2, 0.4, 0.85);

/// System to run one simulation frame per display refresh
pub fn tick_session(time: Res<Time>, mut session: ResMut<SessionResource>) {
    let timestamp = time.elapsed().as_millis() as u64;
    session.0.frame(timestamp);
}

/// System to move the car sprite to the simulated car
pub fn sync_car(
    session: Res<SessionResource>,
    mut car_query: Query<&mut Transform, With<CarSprite>>,
) {
    let config = session.0.config();
    let car = &session.0.state().car;
    for mut transform in car_query.iter_mut() {
        transform.translation = lane_to_world(config, car.x, car.y, car.width, car.height, 2.0);
    }
}

/// System to sync obstacle visuals from simulation state
pub fn sync_obstacles(
    mut commands: Commands,
    session: Res<SessionResource>,
    mut mappings: ResMut<EntityMappings>,
    mut obstacle_query: Query<&mut Transform, With<ObstacleLink>>,
) {
    let config = session.0.config();
    let state = session.0.state();

    // Despawn sprites whose obstacle has left the simulation
    let live: HashSet<ObstacleId> = state.obstacles.iter().map(|o| o.id).collect();
    mappings.obstacles.retain(|id, entity| {
        let keep = live.contains(id);
        if !keep {
            commands.entity(*entity).despawn();
        }
        keep
    });

    for obstacle in &state.obstacles {
        let translation =
            lane_to_world(config, obstacle.x, obstacle.y, obstacle.width, obstacle.height, 1.0);

        if let Some(&entity) = mappings.obstacles.get(&obstacle.id) {
            if let Ok(mut transform) = obstacle_query.get_mut(entity) {
                transform.translation = translation;
            }
            continue;
        }

        let entity = commands
            .spawn((
                ObstacleLink(obstacle.id),
                Sprite::from_color(
                    OBSTACLE_COLOR,
                    Vec2::new(obstacle.width as f32, obstacle.height as f32),
                ),
                Transform::from_translation(translation),
            ))
            .id();
        mappings.obstacles.insert(obstacle.id, entity);
    }
}

/// System to scroll the lane stripes
pub fn sync_stripes(
    session: Res<SessionResource>,
    mut stripe_query: Query<(&Stripe, &mut Transform, &Sprite)>,
) {
    let config = session.0.config();
    let offset = session.0.state().lane_scroll_offset;
    for (stripe, mut transform, sprite) in stripe_query.iter_mut() {
        let height = sprite.custom_size.map(|size| size.y).unwrap_or(0.0) as i32;
        let scrolled = lane_to_world(config, 0, stripe.0 + offset, 0, height, 0.5);
        transform.translation.y = scrolled.y;
    }
}

/// System to update the score line and the start / game over prompt
pub fn update_hud(session: Res<SessionResource>, mut text_query: Query<(&HudText, &mut Text2d)>) {
    let state = session.0.state();
    for (kind, mut text) in text_query.iter_mut() {
        text.0 = match kind {
            HudText::Score => format!("Score: {}   High score: {}", state.score, state.high_score),
            HudText::Prompt => match state.phase {
                GamePhase::Idle => "Press Enter to start".to_string(),
                GamePhase::Playing => String::new(),
                GamePhase::GameOver => {
                    format!("Game Over! Score: {}\nPress Enter to play again", state.score)
                }
            },
        };
    }
}
