//! World setup systems for camera, lane, car and HUD

use bevy::prelude::*;

use super::components::{lane_to_world, CarSprite, HudText, MainCamera, SessionResource, Stripe};

const LANE_COLOR: Color = Color::srgb(0.2, 0.2, 0.22);
const STRIPE_COLOR: Color = Color::srgb(0.9, 0.9, 0.9);
const CAR_COLOR: Color = Color::srgb(0.85, 0.2, 0.2);

const STRIPE_WIDTH: i32 = 4;

/// System to spawn the camera, the lane with its stripes, the car and the HUD
pub fn setup_world(mut commands: Commands, session: Res<SessionResource>) {
    let config = session.0.config().clone();

    commands.spawn((MainCamera, Camera2d));

    // Lane background
    commands.spawn((
        Sprite::from_color(
            LANE_COLOR,
            Vec2::new(config.lane_width as f32, config.lane_height as f32),
        ),
        Transform::from_translation(Vec3::ZERO),
    ));

    // One extra stripe above the lane so scrolling never leaves a gap
    let period = config.stripe_period;
    let dash = (period / 2).max(1);
    let stripe_x = (config.lane_width - STRIPE_WIDTH) / 2;
    let mut top = -period;
    while top < config.lane_height {
        commands.spawn((
            Stripe(top),
            Sprite::from_color(STRIPE_COLOR, Vec2::new(STRIPE_WIDTH as f32, dash as f32)),
            Transform::from_translation(lane_to_world(
                &config,
                stripe_x,
                top,
                STRIPE_WIDTH,
                dash,
                0.5,
            )),
        ));
        top += period;
    }

    let car = &session.0.state().car;
    commands.spawn((
        CarSprite,
        Sprite::from_color(CAR_COLOR, Vec2::new(car.width as f32, car.height as f32)),
        Transform::from_translation(lane_to_world(
            &config, car.x, car.y, car.width, car.height, 2.0,
        )),
    ));

    let hud_y = config.lane_height as f32 / 2.0 + 24.0;
    commands.spawn((
        HudText::Score,
        Text2d::new(""),
        TextFont {
            font_size: 22.0,
            ..default()
        },
        TextColor(Color::WHITE),
        Transform::from_xyz(0.0, hud_y, 3.0),
    ));
    commands.spawn((
        HudText::Prompt,
        Text2d::new(""),
        TextFont {
            font_size: 26.0,
            ..default()
        },
        TextColor(Color::srgb(1.0, 0.85, 0.3)),
        Transform::from_xyz(0.0, 0.0, 3.0),
    ));
}
