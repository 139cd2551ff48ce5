//! Bob-specific rendering: body mesh, facing, trail polyline and the camera
//! follow/zoom system.
//!
//! ## Layer model
//!
//! | Layer              | Technology | When                               |
//! |--------------------|------------|------------------------------------|
//! | Body disc + eyes   | `Mesh2d`   | always, on a rotating child        |
//! | Trail polyline     | Gizmos     | while samples exist, fading out    |
//! | Blinking eyes      | Visibility | end credits only                   |
//!
//! Facing and camera systems need a [`GameWorld`]; in the walled-box scenes
//! there is none and they do nothing.

use super::state::{BobFace, Player, Trail};
use super::BodyRadius;
use crate::camera::{follow_point, set_projection_scale, CameraTuning, MainCamera};
use crate::config::GameConfig;
use crate::motion::{ease_angle_toward, facing_angle};
use crate::shapes::{disc_mesh, tinted, DISC_SEGMENTS};
use crate::world::{ContactPhase, GameWorld};
use bevy::prelude::*;
use bevy_rapier2d::prelude::Velocity;

const BOB_COLOR: Color = Color::srgb(0.98, 0.78, 0.22);
const EYE_COLOR: Color = Color::srgb(0.10, 0.08, 0.16);
const TRAIL_COLOR: Color = Color::srgb(0.85, 0.90, 1.0);

/// Blink cycle: eyes shut for the last `BLINK_CLOSED_SECS` of every period.
const BLINK_PERIOD_SECS: f32 = 1.8;
const BLINK_CLOSED_SECS: f32 = 0.5;

#[derive(Component)]
pub struct BobEye;

// ── Spawn-time mesh attachment ────────────────────────────────────────────────

/// Give every new Bob a [`BobFace`] child with the body disc and two eyes.
///
/// The eyes sit on the local −Y side, which is the side that faces the
/// nearest planet once the facing offset is applied.
pub fn attach_bob_mesh_system(
    mut commands: Commands,
    query: Query<(Entity, &BodyRadius), Added<Player>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    for (entity, radius) in query.iter() {
        let r = radius.0;
        let body = meshes.add(disc_mesh(r, DISC_SEGMENTS));
        let eye = meshes.add(disc_mesh(r * 0.16, 16));
        let body_mat = tinted(&mut materials, BOB_COLOR);
        let eye_mat = tinted(&mut materials, EYE_COLOR);

        commands.entity(entity).with_children(|parent| {
            parent
                .spawn((
                    BobFace::default(),
                    Mesh2d(body),
                    MeshMaterial2d(body_mat),
                    Transform::default(),
                ))
                .with_children(|face| {
                    for side in [-1.0, 1.0] {
                        face.spawn((
                            BobEye,
                            Mesh2d(eye.clone()),
                            MeshMaterial2d(eye_mat.clone()),
                            Transform::from_xyz(side * r * 0.35, -r * 0.3, 0.1),
                        ));
                    }
                });
        });
    }
}

// ── Blink ─────────────────────────────────────────────────────────────────────

pub fn eyes_closed(elapsed: f32) -> bool {
    elapsed.rem_euclid(BLINK_PERIOD_SECS) >= BLINK_PERIOD_SECS - BLINK_CLOSED_SECS
}

/// Hide Bob's eyes on the blink cycle.
pub fn blink_system(time: Res<Time>, mut q_eyes: Query<&mut Visibility, With<BobEye>>) {
    let visibility = if eyes_closed(time.elapsed_secs()) {
        Visibility::Hidden
    } else {
        Visibility::Inherited
    };
    for mut eye in q_eyes.iter_mut() {
        eye.set_if_neq(visibility);
    }
}

// ── Facing ────────────────────────────────────────────────────────────────────

/// Turn Bob's face toward the nearest planet with a short ease.
pub fn facing_system(
    time: Res<Time>,
    config: Res<GameConfig>,
    world: Option<Res<GameWorld>>,
    q_player: Query<(&Transform, &Children), With<Player>>,
    mut q_face: Query<(&mut BobFace, &mut Transform), Without<Player>>,
) {
    let Some(world) = world else {
        return;
    };
    let dt = time.delta_secs();
    for (transform, children) in q_player.iter() {
        let position = transform.translation.truncate();
        let Some(nearest) = world.nearest_planet(position) else {
            continue;
        };
        let target = facing_angle(position, nearest.position, config.facing_offset_deg);
        for child in children.iter() {
            if let Ok((mut face, mut face_transform)) = q_face.get_mut(child) {
                face.angle = ease_angle_toward(face.angle, target, dt, config.facing_ease_secs);
                face_transform.rotation = Quat::from_rotation_z(face.angle);
            }
        }
    }
}

// ── Trail ─────────────────────────────────────────────────────────────────────

/// Sample Bob's position on the trail clock.
///
/// In the solar system nothing is sampled until the first planet contact.
pub fn trail_sample_system(
    time: Res<Time>,
    world: Option<Res<GameWorld>>,
    mut q_player: Query<(&Transform, &mut Trail), With<Player>>,
) {
    let contact_made = world.is_none_or(|w| w.phase() == ContactPhase::PostContact);
    for (transform, mut trail) in q_player.iter_mut() {
        trail.buffer.tick(time.delta_secs());
        trail.sample.tick(time.delta());
        if trail.sample.just_finished() && contact_made {
            trail.buffer.record(transform.translation.truncate());
        }
    }
}

/// Rebuild and draw the trail polyline from the buffer.
pub fn trail_draw_system(mut gizmos: Gizmos, config: Res<GameConfig>, q_trail: Query<&Trail>) {
    for trail in q_trail.iter() {
        let alpha = trail
            .buffer
            .opacity(config.trail_hold_secs, config.trail_fade_secs);
        if alpha <= 0.0 {
            continue;
        }
        let color = TRAIL_COLOR.with_alpha(alpha);
        for (a, b) in trail.buffer.polyline() {
            gizmos.line_2d(a, b, color);
        }
    }
}

// ── Camera ─────────────────────────────────────────────────────────────────────

/// Follow and zoom toward Bob once he has touched a planet.
///
/// Before the first contact the camera stays parked where the scene put it.
pub fn camera_follow_system(
    time: Res<Time>,
    config: Res<GameConfig>,
    world: Option<ResMut<GameWorld>>,
    q_player: Query<(&Transform, &Velocity), With<Player>>,
    mut q_camera: Query<(&mut Transform, &mut Projection), (With<MainCamera>, Without<Player>)>,
) {
    let Some(mut world) = world else {
        return;
    };
    if world.phase() != ContactPhase::PostContact {
        return;
    }
    let Ok((player_transform, velocity)) = q_player.single() else {
        return;
    };
    let Ok((mut cam, mut projection)) = q_camera.single_mut() else {
        return;
    };

    let position = player_transform.translation.truncate();
    let dt = time.delta_secs();
    let tuning = CameraTuning::from_config(&config);
    let screen_max = config.window_width.max(config.window_height) as f32;
    let pair_distance = world.nearest_pair_distance(position);

    if let Some(directive) = world.camera.directive(
        velocity.linvel.length(),
        pair_distance,
        time.elapsed_secs(),
        screen_max,
        &tuning,
    ) {
        let scale = world.camera.step(directive, dt);
        set_projection_scale(&mut projection, scale);
    }
    follow_point(&mut cam, position, dt, tuning.follow_ease_secs);
}
