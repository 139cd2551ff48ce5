//! Small 2D helpers shared by the physics adapters, camera and input code.
//!
//! Positions and vectors are plain [`Vec2`]s.  The only non-obvious rule is
//! normalisation: a zero-length vector has no direction, so every helper here
//! returns `Vec2::ZERO` for it rather than propagating NaN.

use bevy::math::Vec2;
use std::f32::consts::{PI, TAU};

/// Unit vector pointing from `from` toward `to`, or zero when the points coincide.
#[inline]
pub fn direction_or_zero(from: Vec2, to: Vec2) -> Vec2 {
    (to - from).normalize_or_zero()
}

/// Bearing (radians, counter-clockwise from +X) from `from` toward `to`.
#[inline]
pub fn bearing(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x)
}

/// Wrap an angle into `(-π, π]`.
pub fn wrap_angle(angle: f32) -> f32 {
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI {
        wrapped + TAU
    } else {
        wrapped
    }
}

/// Smooth ease-in-out curve on `t ∈ [0, 1]` (clamped outside that range).
#[inline]
pub fn ease_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Fraction of the remaining gap to close this frame when easing toward a
/// target over `duration` seconds.  A zero duration snaps immediately.
#[inline]
pub fn ease_fraction(dt: f32, duration: f32) -> f32 {
    if duration <= 0.0 {
        1.0
    } else {
        (dt / duration).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_is_unit_length() {
        let d = direction_or_zero(Vec2::ZERO, Vec2::new(3.0, 4.0));
        assert!((d - Vec2::new(0.6, 0.8)).length() < 1e-6);
    }

    #[test]
    fn coincident_points_have_zero_direction() {
        let p = Vec2::new(12.5, -4.0);
        let d = direction_or_zero(p, p);
        assert_eq!(d, Vec2::ZERO);
        assert!(!d.x.is_nan() && !d.y.is_nan());
    }

    #[test]
    fn bearing_points_along_positive_y() {
        let b = bearing(Vec2::ZERO, Vec2::new(0.0, 5.0));
        assert!((b - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn wrap_angle_stays_in_range() {
        for raw in [-10.0_f32, -PI, 0.0, PI, 3.5 * PI, 100.0] {
            let w = wrap_angle(raw);
            assert!(w > -PI - 1e-5 && w <= PI + 1e-5, "{raw} wrapped to {w}");
            // Same direction as the input.
            assert!((w.sin() - raw.sin()).abs() < 1e-3);
            assert!((w.cos() - raw.cos()).abs() < 1e-3);
        }
    }

    #[test]
    fn ease_in_out_hits_endpoints() {
        assert_eq!(ease_in_out(0.0), 0.0);
        assert_eq!(ease_in_out(1.0), 1.0);
        assert_eq!(ease_in_out(2.0), 1.0);
        assert!((ease_in_out(0.5) - 0.5).abs() < 1e-6);
    }
}
