//! Bob the Ball library
//!
//! An educational solar-system exploration game: Bob is pushed around by
//! taps and drags, falls through per-planet gravity fields, and discovers
//! every planet by touching it.
//!
//! [`GamePlugin`] wires every scene, the pointer pipeline and Bob's
//! presentation systems.  The binary adds the window, renderer and Rapier on
//! top; headless tests add only the pieces they exercise.

pub mod camera;
pub mod config;
pub mod constants;
pub mod cues;
pub mod discovery;
pub mod error;
pub mod freeplay;
pub mod hud;
pub mod math;
pub mod motion;
pub mod particles;
pub mod planet;
pub mod player;
pub mod proximity;
pub mod scene;
pub mod screens;
pub mod shapes;
pub mod solar_system;
pub mod tutorial;
pub mod ui;
pub mod walls;
pub mod world;

use bevy::prelude::*;
use player::PointerSet;
use scene::GameScene;

pub struct GamePlugin;

impl Plugin for GamePlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            scene::ScenePlugin,
            cues::CuePlugin,
            particles::ParticlesPlugin,
            solar_system::SolarSystemPlugin,
            screens::ScreensPlugin,
            tutorial::TutorialPlugin,
            freeplay::FreeplayPlugin,
        ))
        .init_resource::<player::PointerIntent>()
        .add_systems(Startup, camera::setup_camera)
        .add_systems(
            Update,
            (
                player::pointer_intent_clear_system,
                player::mouse_to_intent_system,
                player::touch_to_intent_system,
                player::ui_capture_system,
                player::apply_pointer_impulse_system,
            )
                .chain()
                .in_set(PointerSet),
        )
        .add_systems(
            Update,
            (
                player::entrance_system,
                player::attach_bob_mesh_system,
                player::facing_system,
                player::trail_sample_system,
                player::trail_draw_system,
                player::camera_follow_system,
            )
                .chain()
                .after(PointerSet),
        )
        .add_systems(
            Update,
            (
                hud::discovery_hud_system,
                hud::dismiss_panel_system,
                hud::reveal_exit_system,
                hud::reset_button_system,
                hud::exit_button_system,
            )
                .after(solar_system::contact_discovery_system)
                .run_if(in_state(GameScene::Game)),
        );
    }
}
