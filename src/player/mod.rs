//! Player module: Bob's body, pointer input, entrance tween and rendering.
//!
//! ## Sub-module layout
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | [`state`] | Components (`Player`, `BobFace`, `Trail`, `Entrance`) and the `PointerIntent` resource |
//! | [`control`] | Mouse/touch → intent, intent → impulse, arrival tween |
//! | [`rendering`] | Body mesh, facing toward the nearest planet, trail polyline, camera follow/zoom |
//!
//! Every scene Bob appears in uses the same pieces; only the
//! [`ImpulseProfile`](crate::config::ImpulseProfile) and the collider radius
//! change.

pub mod control;
pub mod rendering;
pub mod state;

// ── Flat re-exports ───────────────────────────────────────────────────────────

pub use control::{
    apply_pointer_impulse_system, entrance_system, mouse_to_intent_system,
    pointer_intent_clear_system, touch_to_intent_system, ui_capture_system, PointerSet,
};
pub use rendering::{
    attach_bob_mesh_system, blink_system, camera_follow_system, facing_system, trail_draw_system,
    trail_sample_system, BobEye,
};
pub use state::{BobFace, Entrance, Player, PointerIntent, Trail};

// ── Spawn ─────────────────────────────────────────────────────────────────────

use crate::config::GameConfig;
use crate::scene::SceneEntity;
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

/// Bob belongs to this group.
pub const PLAYER_GROUP: Group = Group::GROUP_1;
/// Planet bodies (solar system and freeplay).
pub const PLANET_GROUP: Group = Group::GROUP_2;
/// Walls of the tutorial and end boxes.
pub const WALL_GROUP: Group = Group::GROUP_3;

/// Collider radius, read by the mesh attachment system.
#[derive(Component, Debug, Clone, Copy)]
pub struct BodyRadius(pub f32);

/// Spawn Bob at `position` with the given collider radius.
///
/// Collision groups:
/// - `PLAYER_GROUP`: Bob belongs to this group
/// - collides with `PLANET_GROUP` and `WALL_GROUP`
///
/// Rotation is locked; the visible facing lives on a [`BobFace`] child added
/// by [`attach_bob_mesh_system`].
pub fn spawn_player(
    commands: &mut Commands,
    position: Vec2,
    radius: f32,
    config: &GameConfig,
) -> Entity {
    commands
        .spawn((
            Player,
            BodyRadius(radius),
            Trail::new(config.trail_capacity, config.trail_sample_secs),
            SceneEntity,
            // Physics
            (
                RigidBody::Dynamic,
                Collider::ball(radius),
                ColliderMassProperties::Mass(config.player_mass),
                Velocity::zero(),
                ExternalImpulse::default(),
                ExternalForce::default(),
                Damping {
                    linear_damping: 0.0,
                    angular_damping: config.player_angular_damping,
                },
                Restitution::coefficient(config.player_restitution),
                LockedAxes::ROTATION_LOCKED,
                CollisionGroups::new(PLAYER_GROUP, PLANET_GROUP | WALL_GROUP),
                ActiveEvents::COLLISION_EVENTS,
            ),
            Transform::from_translation(position.extend(1.0)),
            Visibility::default(),
        ))
        .id()
}
