use bevy::prelude::*;
use bevy::window::{PrimaryWindow, WindowResolution};
use bevy_rapier2d::prelude::*;

use bob_the_ball::config::{load_game_config, GameConfig};
use bob_the_ball::constants::{WINDOW_HEIGHT, WINDOW_WIDTH};
use bob_the_ball::GamePlugin;

/// Configure Rapier physics: no world gravity, planets pull through their fields.
fn setup_physics_config(mut config: Query<&mut RapierConfiguration>) {
    for mut cfg in config.iter_mut() {
        cfg.gravity = Vec2::ZERO;
    }
}

/// Resize the window when `assets/game.toml` overrides its size.
fn apply_window_config(
    config: Res<GameConfig>,
    mut q_window: Query<&mut Window, With<PrimaryWindow>>,
) {
    for mut window in q_window.iter_mut() {
        window
            .resolution
            .set(config.window_width as f32, config.window_height as f32);
    }
}

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Bob the Ball".into(),
                resolution: WindowResolution::new(WINDOW_WIDTH, WINDOW_HEIGHT),
                ..Default::default()
            }),
            ..Default::default()
        }))
        .insert_resource(ClearColor(Color::BLACK))
        // Insert GameConfig with compiled defaults; load_game_config will
        // overwrite it from assets/game.toml (if present) in the Startup schedule.
        .insert_resource(GameConfig::default())
        // pixels_per_meter(1.0) keeps world units identical to scene points, so
        // impulse intensities and field accelerations apply unscaled.
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::pixels_per_meter(1.0))
        .add_systems(
            Startup,
            (
                load_game_config,
                apply_window_config.after(load_game_config),
                setup_physics_config,
            ),
        )
        .add_plugins(GamePlugin)
        .run();
}
