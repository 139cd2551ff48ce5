//! Nearest-planet queries against the live roster.
//!
//! Both queries are linear scans; the roster never exceeds a dozen bodies.
//! Ties keep roster order (the first body at the minimal distance wins), and
//! an empty roster yields `None` / an empty list rather than an error.

use crate::planet::PlanetBody;
use bevy::math::Vec2;

/// The planet closest to `point`, if any.
pub fn nearest_planet(point: Vec2, planets: &[PlanetBody]) -> Option<&PlanetBody> {
    let mut best: Option<(&PlanetBody, f32)> = None;
    for planet in planets {
        let d = planet.position.distance_squared(point);
        match best {
            Some((_, best_d)) if d >= best_d => {}
            _ => best = Some((planet, d)),
        }
    }
    best.map(|(planet, _)| planet)
}

/// Up to `k` planets closest to `point`, ascending by distance.
///
/// Uses a stable sort so equidistant planets keep their roster order.
pub fn k_nearest_planets(point: Vec2, k: usize, planets: &[PlanetBody]) -> Vec<&PlanetBody> {
    let mut ranked: Vec<(&PlanetBody, f32)> = planets
        .iter()
        .map(|p| (p, p.position.distance_squared(point)))
        .collect();
    ranked.sort_by(|a, b| a.1.total_cmp(&b.1));
    ranked.into_iter().take(k).map(|(p, _)| p).collect()
}

/// Distance between the two planets nearest to `point`, if two exist.
pub fn nearest_pair_distance(point: Vec2, planets: &[PlanetBody]) -> Option<f32> {
    match k_nearest_planets(point, 2, planets).as_slice() {
        [a, b] => Some(a.position.distance(b.position)),
        _ => None,
    }
}
