//! Impulse and motion helpers shared by every scene Bob appears in.
//!
//! The tutorial, the solar system, freeplay and the end credits all push Bob
//! around the same way; only the [`ImpulseProfile`](crate::config::ImpulseProfile)
//! differs.  Everything here is pure so it can be tested without an `App`.

use crate::math::{bearing, direction_or_zero, ease_fraction, wrap_angle};
use bevy::math::Vec2;
use std::collections::VecDeque;

// ── Impulses ──────────────────────────────────────────────────────────────────

/// Impulse that pushes a body at `player` toward `touch` with `intensity`.
///
/// A touch exactly on the player has no direction and yields a zero impulse.
pub fn touch_impulse(player: Vec2, touch: Vec2, intensity: f32) -> Vec2 {
    direction_or_zero(player, touch) * intensity
}

// ── Facing ────────────────────────────────────────────────────────────────────

/// Sprite rotation (radians) that makes Bob face `target`.
///
/// The bearing is offset by `offset_deg` because Bob's artwork faces down its
/// local −Y axis.
pub fn facing_angle(player: Vec2, target: Vec2, offset_deg: f32) -> f32 {
    wrap_angle(bearing(player, target) + offset_deg.to_radians())
}

/// Step `current` toward `target` along the shortest arc, closing `dt /
/// duration` of the remaining gap.
pub fn ease_angle_toward(current: f32, target: f32, dt: f32, duration: f32) -> f32 {
    let delta = wrap_angle(target - current);
    wrap_angle(current + delta * ease_fraction(dt, duration))
}

/// Step a scalar toward `target`, closing `dt / duration` of the gap.
pub fn ease_toward(current: f32, target: f32, dt: f32, duration: f32) -> f32 {
    current + (target - current) * ease_fraction(dt, duration)
}

/// Step a point toward `target`, closing `dt / duration` of the gap.
pub fn ease_point_toward(current: Vec2, target: Vec2, dt: f32, duration: f32) -> Vec2 {
    current + (target - current) * ease_fraction(dt, duration)
}

// ── Comet trail ───────────────────────────────────────────────────────────────

/// Comet-trail birth rate (particles/s) at `speed`.
///
/// Zero at or below `threshold`; above it the rate grows linearly from
/// `min_rate`, reaching `max_rate` 1000 u/s past the threshold.
pub fn birth_rate(speed: f32, threshold: f32, min_rate: f32, max_rate: f32) -> f32 {
    if speed <= threshold {
        return 0.0;
    }
    let slope = (max_rate - min_rate) / 1000.0;
    min_rate + slope * (speed - threshold)
}

// ── Trail ─────────────────────────────────────────────────────────────────────

/// Bounded FIFO of Bob's recent positions, oldest first.
#[derive(Debug, Clone)]
pub struct TrailBuffer {
    capacity: usize,
    points: VecDeque<Vec2>,
    /// Seconds since the last sample, used to fade the rendered polyline.
    since_sample: f32,
}

impl TrailBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            points: VecDeque::with_capacity(capacity + 1),
            since_sample: 0.0,
        }
    }

    /// Append a position, evicting the oldest once over capacity.
    pub fn record(&mut self, point: Vec2) {
        self.points.push_back(point);
        while self.points.len() > self.capacity {
            self.points.pop_front();
        }
        self.since_sample = 0.0;
    }

    /// Advance the fade clock.
    pub fn tick(&mut self, dt: f32) {
        self.since_sample += dt;
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn points(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.points.iter().copied()
    }

    pub fn clear(&mut self) {
        self.points.clear();
        self.since_sample = 0.0;
    }

    /// Line segments of the rendered path, rebuilt from scratch each call.
    pub fn polyline(&self) -> Vec<(Vec2, Vec2)> {
        self.points
            .iter()
            .zip(self.points.iter().skip(1))
            .map(|(a, b)| (*a, *b))
            .collect()
    }

    /// Opacity of the rendered path: opaque for `hold` seconds after the last
    /// sample, then linearly faded out over `fade` seconds.
    pub fn opacity(&self, hold: f32, fade: f32) -> f32 {
        if self.since_sample <= hold {
            1.0
        } else if fade <= 0.0 {
            0.0
        } else {
            (1.0 - (self.since_sample - hold) / fade).clamp(0.0, 1.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn impulse_is_scaled_unit_direction() {
        let impulse = touch_impulse(Vec2::ZERO, Vec2::new(3.0, 4.0), 10.0);
        assert!((impulse - Vec2::new(6.0, 8.0)).length() < 1e-5, "{impulse:?}");
    }

    #[test]
    fn touch_on_player_is_a_zero_impulse() {
        let p = Vec2::new(42.0, -7.0);
        let impulse = touch_impulse(p, p, 200.0);
        assert_eq!(impulse, Vec2::ZERO);
        assert!(impulse.is_finite());
    }

    #[test]
    fn impulse_magnitude_ignores_touch_distance() {
        let near = touch_impulse(Vec2::ZERO, Vec2::new(1.0, 0.0), 40.0);
        let far = touch_impulse(Vec2::ZERO, Vec2::new(1000.0, 0.0), 40.0);
        assert!((near.length() - far.length()).abs() < 1e-4);
    }

    #[test]
    fn trail_keeps_most_recent_points_in_order() {
        let mut trail = TrailBuffer::new(20);
        for i in 0..35 {
            trail.record(Vec2::new(i as f32, 0.0));
        }
        assert_eq!(trail.len(), 20);
        let xs: Vec<f32> = trail.points().map(|p| p.x).collect();
        let expected: Vec<f32> = (15..35).map(|i| i as f32).collect();
        assert_eq!(xs, expected);
    }

    #[test]
    fn polyline_has_one_segment_fewer_than_points() {
        let mut trail = TrailBuffer::new(20);
        assert!(trail.polyline().is_empty());
        trail.record(Vec2::ZERO);
        assert!(trail.polyline().is_empty());
        trail.record(Vec2::X);
        trail.record(Vec2::Y);
        assert_eq!(trail.polyline(), vec![(Vec2::ZERO, Vec2::X), (Vec2::X, Vec2::Y)]);
    }

    #[test]
    fn trail_holds_then_fades() {
        let mut trail = TrailBuffer::new(20);
        trail.record(Vec2::ZERO);
        trail.tick(1.5);
        assert_eq!(trail.opacity(2.0, 1.0), 1.0);
        trail.tick(1.0);
        assert!((trail.opacity(2.0, 1.0) - 0.5).abs() < 1e-5);
        trail.tick(5.0);
        assert_eq!(trail.opacity(2.0, 1.0), 0.0);
        trail.record(Vec2::X);
        assert_eq!(trail.opacity(2.0, 1.0), 1.0);
    }

    #[test]
    fn facing_adds_offset_to_bearing() {
        // Target straight up: bearing 90°, minus 270° → −180° ≡ 180°.
        let angle = facing_angle(Vec2::ZERO, Vec2::new(0.0, 10.0), -270.0);
        assert!((angle.abs() - PI).abs() < 1e-4, "{angle}");
        // Target to the right: bearing 0°, minus 270° → 90°.
        let angle = facing_angle(Vec2::ZERO, Vec2::new(10.0, 0.0), -270.0);
        assert!((angle - PI / 2.0).abs() < 1e-4, "{angle}");
    }

    #[test]
    fn angle_easing_takes_the_short_way_round() {
        let current = 170.0_f32.to_radians();
        let target = -170.0_f32.to_radians();
        let next = ease_angle_toward(current, target, 0.05, 0.1);
        // Halfway along the 20° arc through ±180°, not back through 0°.
        assert!((next.abs() - PI).abs() < 1e-3, "{}", next.to_degrees());
        let snapped = ease_angle_toward(current, target, 1.0, 0.19);
        assert!((snapped - target).abs() < 1e-4, "{}", snapped.to_degrees());
    }

    #[test]
    fn birth_rate_is_zero_when_slow_and_linear_when_fast() {
        assert_eq!(birth_rate(5.0, 10.0, 100.0, 40_000.0), 0.0);
        assert_eq!(birth_rate(10.0, 10.0, 100.0, 40_000.0), 0.0);
        assert!((birth_rate(1010.0, 10.0, 100.0, 40_000.0) - 40_000.0).abs() < 1e-2);
        assert!((birth_rate(510.0, 10.0, 100.0, 40_000.0) - 20_050.0).abs() < 1e-2);
    }

    #[test]
    fn scalar_easing_closes_a_fraction_of_the_gap() {
        assert!((ease_toward(7.0, 1.0, 0.25, 0.5) - 4.0).abs() < 1e-6);
        assert_eq!(ease_toward(7.0, 1.0, 0.1, 0.0), 1.0);
        let p = ease_point_toward(Vec2::ZERO, Vec2::new(10.0, 0.0), 0.1, 0.5);
        assert!((p.x - 2.0).abs() < 1e-6);
    }
}
