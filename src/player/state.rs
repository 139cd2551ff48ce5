//! Bob's components and the pointer-intent resource.
//!
//! Systems that mutate this state are in the sibling modules:
//! - [`super::control`]: pointer input, impulses, entrance tween
//! - [`super::rendering`]: body mesh, facing, trail drawing

use crate::motion::TrailBuffer;
use bevy::prelude::*;

// ── Components ─────────────────────────────────────────────────────────────────

/// Marker component for Bob's physics body.
#[derive(Component)]
pub struct Player;

/// Child entity carrying Bob's artwork.
///
/// The physics body has its rotation locked; facing is applied to this child
/// only, so turning toward a planet never disturbs the simulation.
#[derive(Component, Default)]
pub struct BobFace {
    /// Current facing angle in radians.
    pub angle: f32,
}

/// Recent positions, sampled on a fixed clock.
#[derive(Component, Debug)]
pub struct Trail {
    pub buffer: TrailBuffer,
    pub sample: Timer,
}

impl Trail {
    pub fn new(capacity: usize, sample_secs: f32) -> Self {
        Self {
            buffer: TrailBuffer::new(capacity),
            sample: Timer::from_seconds(sample_secs, TimerMode::Repeating),
        }
    }
}

/// Scripted arrival: Bob appears at `start`, waits `pause_secs`, then eases to
/// `target` over `hop_secs`.  Pointer impulses are ignored while present.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Entrance {
    pub start: Vec2,
    pub target: Vec2,
    pub elapsed: f32,
    pub pause_secs: f32,
    pub hop_secs: f32,
}

impl Entrance {
    pub fn new(start: Vec2, target: Vec2, pause_secs: f32, hop_secs: f32) -> Self {
        Self {
            start,
            target,
            elapsed: 0.0,
            pause_secs,
            hop_secs,
        }
    }

    /// Hop progress in `[0, 1]`; zero throughout the pause.
    pub fn progress(&self) -> f32 {
        if self.hop_secs <= 0.0 {
            return if self.elapsed >= self.pause_secs { 1.0 } else { 0.0 };
        }
        ((self.elapsed - self.pause_secs) / self.hop_secs).clamp(0.0, 1.0)
    }

    pub fn is_done(&self) -> bool {
        self.elapsed >= self.pause_secs && self.progress() >= 1.0
    }
}

// ── Resources ──────────────────────────────────────────────────────────────────

/// Pointer input for the current frame, already in world coordinates.
///
/// Cleared and refilled every frame by the input systems.  Tests populate it
/// directly and run only the consumers.
#[derive(Resource, Default, Debug, Clone, Copy, PartialEq)]
pub struct PointerIntent {
    /// A press began this frame at this point.
    pub tap: Option<Vec2>,
    /// The held pointer moved this frame and is now at this point.
    pub drag: Option<Vec2>,
}

impl PointerIntent {
    pub fn is_idle(&self) -> bool {
        self.tap.is_none() && self.drag.is_none()
    }
}
