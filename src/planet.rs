//! Planet bodies and the gravity fields derived from them.
//!
//! A [`PlanetBody`] is created once at scene setup and never changes apart
//! from its cosmetic spin.  Its [`GravityField`] is a pure function of the
//! body (see [`build_field`]), so the two always agree.
//!
//! ## Field policies
//!
//! | Policy     | Applies to   | Region radius | Strength      | Falloff |
//! |------------|--------------|---------------|---------------|---------|
//! | `Special`  | Jupiter      | radius × 10   | gravity × 1   | 0.005   |
//! | `Standard` | everything else | radius × 20 | gravity × 2  | 0.001   |

use crate::constants::*;
use bevy::prelude::*;
use std::fmt;

// ── Identity ──────────────────────────────────────────────────────────────────

/// Unique planet name, used as the identity for discovery and lookups.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlanetId(String);

impl PlanetId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlanetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlanetId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Surface gravity for a named planet; unknown names get the default of 1.0.
pub fn surface_gravity(name: &str) -> f32 {
    SOLAR_SYSTEM
        .iter()
        .find(|spec| spec.name == name)
        .map(|spec| spec.surface_gravity)
        .unwrap_or(DEFAULT_SURFACE_GRAVITY)
}

// ── Presentation keys ─────────────────────────────────────────────────────────

/// Lookup key of the info panel shown when a planet is discovered.
pub fn balloon_key(id: &PlanetId) -> String {
    format!("{id}_balloon")
}

/// Lookup key of a progress-strip badge: stage 1 = unvisited, 2 = visited.
pub fn check_key(id: &PlanetId, stage: u8) -> String {
    format!("{id}_check{stage}")
}

/// Lookup key of a planet's gravity-field halo.
pub fn gravity_key(id: &PlanetId) -> String {
    format!("{id}_gravity")
}

// ── Body ──────────────────────────────────────────────────────────────────────

/// A planet as the game core sees it.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanetBody {
    pub id: PlanetId,
    pub position: Vec2,
    pub radius: f32,
    /// Base strength (the planet's surface gravity).
    pub gravity_strength: f32,
    /// Falloff exponent of this planet's field.
    pub falloff_exponent: f32,
    /// `true` for the planet that gets the special field policy.
    pub is_special: bool,
}

impl PlanetBody {
    /// Build a body, looking its gravity up by name and choosing its policy.
    pub fn new(id: impl Into<PlanetId>, position: Vec2, radius: f32) -> Self {
        let id = id.into();
        let gravity_strength = surface_gravity(id.as_str());
        let is_special = id.as_str() == SPECIAL_PLANET;
        let falloff_exponent = FieldPolicy::for_special(is_special).falloff();
        Self {
            id,
            position,
            radius,
            gravity_strength,
            falloff_exponent,
            is_special,
        }
    }

    /// Bodies for the fixed solar-system roster, in roster order.
    pub fn solar_system() -> Vec<PlanetBody> {
        SOLAR_SYSTEM
            .iter()
            .map(|spec| {
                PlanetBody::new(
                    spec.name,
                    Vec2::new(spec.position.0, spec.position.1),
                    spec.radius,
                )
            })
            .collect()
    }

    pub fn policy(&self) -> FieldPolicy {
        FieldPolicy::for_special(self.is_special)
    }
}

/// Physics-side marker linking a Rapier body back to its planet id.
#[derive(Component, Debug, Clone)]
pub struct PlanetMarker(pub PlanetId);

// ── Field ─────────────────────────────────────────────────────────────────────

/// The two field tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldPolicy {
    Special,
    Standard,
}

impl FieldPolicy {
    pub fn for_special(is_special: bool) -> Self {
        if is_special {
            FieldPolicy::Special
        } else {
            FieldPolicy::Standard
        }
    }

    pub fn radius_factor(self) -> f32 {
        match self {
            FieldPolicy::Special => SPECIAL_FIELD_RADIUS_FACTOR,
            FieldPolicy::Standard => STANDARD_FIELD_RADIUS_FACTOR,
        }
    }

    pub fn strength_factor(self) -> f32 {
        match self {
            FieldPolicy::Special => SPECIAL_FIELD_STRENGTH_FACTOR,
            FieldPolicy::Standard => STANDARD_FIELD_STRENGTH_FACTOR,
        }
    }

    pub fn falloff(self) -> f32 {
        match self {
            FieldPolicy::Special => SPECIAL_FIELD_FALLOFF,
            FieldPolicy::Standard => STANDARD_FIELD_FALLOFF,
        }
    }
}

/// Radial gravity region attached to one planet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GravityField {
    pub center: Vec2,
    pub influence_radius: f32,
    pub strength: f32,
    pub falloff: f32,
}

impl GravityField {
    pub fn contains(&self, point: Vec2) -> bool {
        point.distance_squared(self.center) <= self.influence_radius * self.influence_radius
    }

    /// Acceleration this field imparts on a body at `point`.
    ///
    /// Magnitude is `strength × scale / max(d, min_distance)^falloff`, pointing
    /// at the centre.  Zero outside the region and exactly at the centre.
    pub fn acceleration_at(&self, point: Vec2, scale: f32, min_distance: f32) -> Vec2 {
        if !self.contains(point) {
            return Vec2::ZERO;
        }
        let offset = self.center - point;
        let dist = offset.length().max(min_distance);
        offset.normalize_or_zero() * (self.strength * scale / dist.powf(self.falloff))
    }
}

/// Derive a planet's gravity field.  Pure and deterministic.
pub fn build_field(planet: &PlanetBody) -> GravityField {
    let policy = planet.policy();
    GravityField {
        center: planet.position,
        influence_radius: planet.radius * policy.radius_factor(),
        strength: planet.gravity_strength * policy.strength_factor(),
        falloff: policy.falloff(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_radius_and_falloff_follow_policy_for_every_planet() {
        for planet in PlanetBody::solar_system() {
            let field = build_field(&planet);
            let (factor, falloff) = if planet.id.as_str() == "Jupiter" {
                (10.0, 0.005)
            } else {
                (20.0, 0.001)
            };
            assert_eq!(field.influence_radius, planet.radius * factor, "{}", planet.id);
            assert_eq!(field.falloff, falloff, "{}", planet.id);
            assert_eq!(field.center, planet.position);
        }
    }

    #[test]
    fn jupiter_strength_is_not_doubled() {
        let jupiter = PlanetBody::new("Jupiter", Vec2::ZERO, 160.0);
        assert!(jupiter.is_special);
        assert_eq!(build_field(&jupiter).strength, 24.79);

        let earth = PlanetBody::new("Earth", Vec2::ZERO, 50.0);
        assert!(!earth.is_special);
        assert_eq!(build_field(&earth).strength, 9.8 * 2.0);
    }

    #[test]
    fn unknown_planet_defaults_to_unit_gravity() {
        assert_eq!(surface_gravity("Pluto"), 1.0);
        let field = build_field(&PlanetBody::new("Pluto", Vec2::ZERO, 10.0));
        assert_eq!(field.strength, 2.0);
        assert_eq!(field.influence_radius, 200.0);
    }

    #[test]
    fn gravity_table_matches_roster() {
        assert_eq!(surface_gravity("Mercury"), 3.7);
        assert_eq!(surface_gravity("Mars"), 3.711);
        assert_eq!(surface_gravity("Neptune"), 11.15);
    }

    #[test]
    fn acceleration_points_to_center_and_vanishes_outside() {
        let field = build_field(&PlanetBody::new("Earth", Vec2::ZERO, 50.0));
        let inside = field.acceleration_at(Vec2::new(300.0, 0.0), 10.0, 1.0);
        assert!(inside.x < 0.0 && inside.y.abs() < 1e-6);

        let outside = field.acceleration_at(Vec2::new(5000.0, 0.0), 10.0, 1.0);
        assert_eq!(outside, Vec2::ZERO);

        let at_center = field.acceleration_at(Vec2::ZERO, 10.0, 1.0);
        assert_eq!(at_center, Vec2::ZERO);
    }

    #[test]
    fn asset_keys_follow_naming_convention() {
        let id = PlanetId::from("Venus");
        assert_eq!(balloon_key(&id), "Venus_balloon");
        assert_eq!(check_key(&id, 2), "Venus_check2");
        assert_eq!(gravity_key(&id), "Venus_gravity");
    }
}
