//! Pointer input and movement systems.
//!
//! ## Pipeline (runs in order every `Update` frame)
//!
//! 1. [`pointer_intent_clear_system`]: resets `PointerIntent`.
//! 2. [`mouse_to_intent_system`] / [`touch_to_intent_system`]: fill it with
//!    world-space tap and drag points.
//! 3. [`ui_capture_system`]: drops the intent while the pointer is over a
//!    button, so pressing a control never pushes Bob.
//! 4. [`apply_pointer_impulse_system`]: converts the intent into
//!    `ExternalImpulse` using the scene's [`ActiveImpulse`].
//!
//! [`entrance_system`] drives the scripted arrival tween independently of the
//! pipeline; Bob ignores impulses until it finishes.
//!
//! The intent layer makes the movement logic testable: tests populate
//! `PointerIntent` directly and run only `apply_pointer_impulse_system`.

use super::state::{Entrance, Player, PointerIntent};
use crate::camera::MainCamera;
use crate::math::ease_in_out;
use crate::motion::touch_impulse;
use crate::scene::ActiveImpulse;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_rapier2d::prelude::*;

/// The intent pipeline; anything reading [`PointerIntent`] runs after it.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct PointerSet;

// ── Step 1: Clear ─────────────────────────────────────────────────────────────

pub fn pointer_intent_clear_system(mut intent: ResMut<PointerIntent>) {
    *intent = PointerIntent::default();
}

// ── Step 2: Pointer → Intent ──────────────────────────────────────────────────

/// Viewport position → world position through the main camera.
fn viewport_to_world(
    q_camera: &Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    viewport: Vec2,
) -> Option<Vec2> {
    let (camera, camera_transform) = q_camera.single().ok()?;
    camera.viewport_to_world_2d(camera_transform, viewport).ok()
}

/// Left mouse button: press → `tap`, cursor motion while held → `drag`.
pub fn mouse_to_intent_system(
    buttons: Res<ButtonInput<MouseButton>>,
    q_window: Query<&Window, With<PrimaryWindow>>,
    q_camera: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    mut last_cursor: Local<Option<Vec2>>,
    mut intent: ResMut<PointerIntent>,
) {
    let Ok(window) = q_window.single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        *last_cursor = None;
        return;
    };

    if buttons.just_pressed(MouseButton::Left) {
        intent.tap = viewport_to_world(&q_camera, cursor);
    } else if buttons.pressed(MouseButton::Left) && *last_cursor != Some(cursor) {
        intent.drag = viewport_to_world(&q_camera, cursor);
    }
    *last_cursor = Some(cursor);
}

/// First finger: touch start → `tap`, movement → `drag`.
pub fn touch_to_intent_system(
    touches: Res<Touches>,
    q_camera: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    mut intent: ResMut<PointerIntent>,
) {
    if let Some(touch) = touches.iter_just_pressed().next() {
        intent.tap = viewport_to_world(&q_camera, touch.position());
        return;
    }
    if let Some(touch) = touches.iter().find(|t| t.delta() != Vec2::ZERO) {
        intent.drag = viewport_to_world(&q_camera, touch.position());
    }
}

// ── Step 3: UI capture ────────────────────────────────────────────────────────

pub fn ui_capture_system(
    q_interaction: Query<&Interaction>,
    mut intent: ResMut<PointerIntent>,
) {
    if q_interaction.iter().any(|i| *i != Interaction::None) {
        *intent = PointerIntent::default();
    }
}

// ── Step 4: Intent → Impulse ──────────────────────────────────────────────────

/// Push Bob toward the tap / drag point.
///
/// Taps use the scene's `touch` intensity and drags its `drag` intensity.
/// Nothing happens while no profile is active or Bob is still arriving.
pub fn apply_pointer_impulse_system(
    intent: Res<PointerIntent>,
    active: Option<Res<ActiveImpulse>>,
    mut q_player: Query<(&Transform, &mut ExternalImpulse), (With<Player>, Without<Entrance>)>,
) {
    let Some(active) = active else {
        return;
    };
    if intent.is_idle() {
        return;
    }
    let profile = active.0;
    for (transform, mut impulse) in q_player.iter_mut() {
        let position = transform.translation.truncate();
        if let Some(tap) = intent.tap {
            impulse.impulse += touch_impulse(position, tap, profile.touch);
        }
        if let Some(drag) = intent.drag {
            impulse.impulse += touch_impulse(position, drag, profile.drag);
        }
    }
}

// ── Entrance tween ────────────────────────────────────────────────────────────

/// Position along the arrival tween.
pub fn entrance_position(entrance: &Entrance) -> Vec2 {
    entrance
        .start
        .lerp(entrance.target, ease_in_out(entrance.progress()))
}

/// Advance every arrival tween, pinning Bob to it until it completes.
pub fn entrance_system(
    mut commands: Commands,
    time: Res<Time>,
    mut q_player: Query<
        (Entity, &mut Entrance, &mut Transform, Option<&mut Velocity>),
        With<Player>,
    >,
) {
    let dt = time.delta_secs();
    for (entity, mut entrance, mut transform, velocity) in q_player.iter_mut() {
        entrance.elapsed += dt;
        let position = entrance_position(&entrance);
        transform.translation.x = position.x;
        transform.translation.y = position.y;
        if let Some(mut velocity) = velocity {
            *velocity = Velocity::zero();
        }
        if entrance.is_done() {
            commands.entity(entity).remove::<Entrance>();
        }
    }
}

// ── Unit tests ────────────────────────────────────────────────────────────────
