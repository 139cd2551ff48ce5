//! Invisible walled box used by the tutorial and end scenes.

use crate::player::{PLAYER_GROUP, WALL_GROUP};
use crate::scene::SceneEntity;
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

/// Half thickness of each wall slab.
const WALL_HALF_THICKNESS: f32 = 20.0;

#[derive(Component)]
pub struct Wall;

/// Centre and half extents of the four wall slabs enclosing
/// `[-half_w, half_w] × [-half_h, half_h]`.
pub fn wall_slabs(half_w: f32, half_h: f32) -> [(Vec2, Vec2); 4] {
    let t = WALL_HALF_THICKNESS;
    [
        (Vec2::new(0.0, half_h + t), Vec2::new(half_w + 2.0 * t, t)),
        (Vec2::new(0.0, -half_h - t), Vec2::new(half_w + 2.0 * t, t)),
        (Vec2::new(-half_w - t, 0.0), Vec2::new(t, half_h + 2.0 * t)),
        (Vec2::new(half_w + t, 0.0), Vec2::new(t, half_h + 2.0 * t)),
    ]
}

/// Spawn the four static walls around the origin.
pub fn spawn_walled_box(commands: &mut Commands, half_w: f32, half_h: f32) {
    for (center, half_extents) in wall_slabs(half_w, half_h) {
        commands.spawn((
            Wall,
            RigidBody::Fixed,
            Collider::cuboid(half_extents.x, half_extents.y),
            CollisionGroups::new(WALL_GROUP, PLAYER_GROUP),
            Restitution::coefficient(0.8),
            Transform::from_translation(center.extend(0.0)),
            SceneEntity,
        ));
    }
}
