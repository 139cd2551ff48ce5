//! Camera follow / zoom policy and the systems that apply it.
//!
//! Before Bob first touches a planet the camera is parked over the whole
//! system at [`GameConfig::camera_initial_scale`].  After that contact the
//! camera follows Bob and zooms every frame:
//!
//! | Condition                                   | Target scale                  | Ease     |
//! |---------------------------------------------|-------------------------------|----------|
//! | no fast movement for > `camera_idle_secs`   | `camera_settled_scale`        | 1.5 s    |
//! | otherwise, two planets known                | `(D + S/4) / S − 2.5`, floored | 0.5 s    |
//! | otherwise                                   | unchanged                     | -        |
//!
//! `D` is the distance between the two planets nearest Bob and `S` the larger
//! window dimension.

use crate::config::GameConfig;
use crate::constants::CAMERA_ZOOM_BIAS;
use crate::motion::{ease_point_toward, ease_toward};
use bevy::prelude::*;

/// Distance-driven zoom scale, never below `floor`.
///
/// The raw formula goes to zero and below when the two nearest planets are
/// closer than `2.25 × S`; those values are replaced by the floor.
pub fn zoom_scale(pair_distance: f32, screen_max: f32, floor: f32) -> f32 {
    if screen_max <= 0.0 {
        return floor;
    }
    let raw = (pair_distance + screen_max / 4.0) / screen_max - CAMERA_ZOOM_BIAS;
    if raw.is_finite() {
        raw.max(floor)
    } else {
        floor
    }
}

/// Where the zoom should head and how quickly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraDirective {
    pub scale: f32,
    pub ease_secs: f32,
}

/// Camera tuning pulled out of [`GameConfig`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraTuning {
    pub settled_scale: f32,
    pub settle_secs: f32,
    pub fast_speed: f32,
    pub idle_secs: f32,
    pub zoom_ease_secs: f32,
    pub follow_ease_secs: f32,
    pub min_scale: f32,
}

impl CameraTuning {
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            settled_scale: config.camera_settled_scale,
            settle_secs: config.camera_settle_secs,
            fast_speed: config.camera_fast_speed,
            idle_secs: config.camera_idle_secs,
            zoom_ease_secs: config.camera_zoom_ease_secs,
            follow_ease_secs: config.camera_follow_ease_secs,
            min_scale: config.camera_min_scale,
        }
    }
}

/// Per-scene camera state.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraState {
    pub zoom_scale: f32,
    /// Elapsed seconds at which Bob last moved faster than the threshold.
    pub last_fast_movement: Option<f32>,
}

impl CameraState {
    pub fn new(initial_scale: f32) -> Self {
        Self {
            zoom_scale: initial_scale,
            last_fast_movement: None,
        }
    }

    /// Update the fast-movement clock and decide this frame's zoom target.
    pub fn directive(
        &mut self,
        speed: f32,
        pair_distance: Option<f32>,
        now: f32,
        screen_max: f32,
        tuning: &CameraTuning,
    ) -> Option<CameraDirective> {
        if speed > tuning.fast_speed {
            self.last_fast_movement = Some(now);
        }
        if let Some(last) = self.last_fast_movement {
            if now - last > tuning.idle_secs {
                return Some(CameraDirective {
                    scale: tuning.settled_scale,
                    ease_secs: tuning.settle_secs,
                });
            }
        }
        pair_distance.map(|d| CameraDirective {
            scale: zoom_scale(d, screen_max, tuning.min_scale),
            ease_secs: tuning.zoom_ease_secs,
        })
    }

    /// Ease the tracked zoom toward `directive` and return the new scale.
    pub fn step(&mut self, directive: CameraDirective, dt: f32) -> f32 {
        self.zoom_scale = ease_toward(self.zoom_scale, directive.scale, dt, directive.ease_secs);
        self.zoom_scale
    }
}

// ── Systems ───────────────────────────────────────────────────────────────────

/// Marker for the single game camera.
#[derive(Component)]
pub struct MainCamera;

/// Spawn the 2D camera used by every scene.
pub fn setup_camera(mut commands: Commands) {
    commands.spawn((Camera2d, MainCamera));
    info!("[setup] Camera spawned");
}

/// Write an orthographic scale onto the camera projection.
pub fn set_projection_scale(projection: &mut Projection, scale: f32) {
    if let Projection::Orthographic(ortho) = projection {
        ortho.scale = scale;
    }
}

/// Reset the camera to the origin at `scale`; used when a scene is entered.
pub fn reset_camera(
    q_camera: &mut Query<(&mut Transform, &mut Projection), With<MainCamera>>,
    scale: f32,
) {
    for (mut transform, mut projection) in q_camera.iter_mut() {
        transform.translation.x = 0.0;
        transform.translation.y = 0.0;
        set_projection_scale(&mut projection, scale);
    }
}

/// Ease the camera's centre toward `target`.
pub fn follow_point(transform: &mut Transform, target: Vec2, dt: f32, ease_secs: f32) {
    let eased = ease_point_toward(transform.translation.truncate(), target, dt, ease_secs);
    transform.translation.x = eased.x;
    transform.translation.y = eased.y;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tuning() -> CameraTuning {
        CameraTuning::from_config(&GameConfig::default())
    }

    #[test]
    fn zoom_formula_matches_when_positive() {
        let s = 960.0;
        let d = 4000.0;
        let expected = (d + s / 4.0) / s - 2.5;
        assert!(expected > 0.1);
        assert!((zoom_scale(d, s, 0.1) - expected).abs() < 1e-5);
    }

    #[test]
    fn zoom_formula_is_floored_for_close_pairs() {
        // Raw value for D = 100, S = 960 is about −2.29.
        assert_eq!(zoom_scale(100.0, 960.0, 0.1), 0.1);
        assert_eq!(zoom_scale(0.0, 960.0, 0.1), 0.1);
        assert_eq!(zoom_scale(500.0, 0.0, 0.1), 0.1);
    }

    #[test]
    fn closest_roster_pairs_sit_on_the_floor() {
        use crate::constants::{CAMERA_MIN_SCALE, SOLAR_SYSTEM, WINDOW_HEIGHT};
        let at = |name: &str| {
            SOLAR_SYSTEM
                .iter()
                .find(|p| p.name == name)
                .map(|p| Vec2::new(p.position.0, p.position.1))
                .unwrap()
        };
        let screen_max = WINDOW_HEIGHT as f32;
        for (a, b) in [
            ("Mercury", "Venus"),
            ("Saturn", "Neptune"),
            ("Earth", "Mars"),
            ("Venus", "Earth"),
        ] {
            let d = at(a).distance(at(b));
            assert_eq!(
                zoom_scale(d, screen_max, CAMERA_MIN_SCALE),
                CAMERA_MIN_SCALE,
                "{a}-{b} at {d}"
            );
        }
        // Jupiter and Uranus are far enough apart to zoom out past it.
        let d = at("Jupiter").distance(at("Uranus"));
        assert!(zoom_scale(d, screen_max, CAMERA_MIN_SCALE) > CAMERA_MIN_SCALE);
    }

    #[test]
    fn without_fast_movement_zoom_follows_the_pair() {
        let mut state = CameraState::new(7.0);
        let directive = state.directive(0.0, Some(4000.0), 10.0, 960.0, &tuning()).unwrap();
        assert_eq!(directive.ease_secs, 0.5);
        assert!((directive.scale - zoom_scale(4000.0, 960.0, 0.1)).abs() < 1e-6);
    }

    #[test]
    fn idle_after_fast_movement_settles() {
        let t = tuning();
        let mut state = CameraState::new(7.0);
        // Fast at t = 1.0.
        let fast = state.directive(50.0, Some(4000.0), 1.0, 960.0, &t).unwrap();
        assert_eq!(fast.ease_secs, t.zoom_ease_secs);
        // Still within the idle window.
        let recent = state.directive(0.0, Some(4000.0), 2.0, 960.0, &t).unwrap();
        assert_eq!(recent.ease_secs, t.zoom_ease_secs);
        // Past it.
        let settled = state.directive(0.0, Some(4000.0), 2.6, 960.0, &t).unwrap();
        assert_eq!(
            settled,
            CameraDirective {
                scale: t.settled_scale,
                ease_secs: t.settle_secs
            }
        );
    }

    #[test]
    fn no_pair_and_not_idle_keeps_zoom() {
        let mut state = CameraState::new(7.0);
        assert!(state.directive(0.0, None, 0.0, 960.0, &tuning()).is_none());
    }

    #[test]
    fn step_eases_toward_target() {
        let mut state = CameraState::new(7.0);
        let scale = state.step(
            CameraDirective {
                scale: 1.0,
                ease_secs: 0.5,
            },
            0.25,
        );
        assert!((scale - 4.0).abs() < 1e-6);
        assert!(scale > 0.0);
    }
}
