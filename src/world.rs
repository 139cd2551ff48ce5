//! [`GameWorld`]: the single owner of a planetary scene's core state.
//!
//! The roster, its gravity fields, the physics-entity index, discovery
//! progress, the contact phase and the camera state all live here.  Systems
//! borrow it through `Res`/`ResMut` each frame; nothing is reached through
//! node-name lookups.  The resource is inserted when a planetary scene is
//! entered and removed when it exits, so a new visit always starts fresh.

use crate::camera::CameraState;
use crate::config::GameConfig;
use crate::constants::{HOME_PLANET, SOLAR_SYSTEM};
use crate::discovery::{Discovery, DiscoveryLog};
use crate::error::{GameError, GameResult};
use crate::planet::{build_field, GravityField, PlanetBody, PlanetId};
use crate::proximity::{nearest_pair_distance, nearest_planet};
use bevy::prelude::*;
use std::collections::HashMap;

/// Scene-level contact phase.  One-way: `PreContact → PostContact`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContactPhase {
    /// Camera parked, start label visible, no trail.
    #[default]
    PreContact,
    /// Bob has touched a planet: camera follow/zoom and the trail are live.
    PostContact,
}

/// What a single player–planet contact changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactOutcome {
    /// `true` only for the very first contact of the scene.
    pub entered_post_contact: bool,
    pub discovery: Discovery,
}

#[derive(Resource, Debug, Clone)]
pub struct GameWorld {
    planets: Vec<PlanetBody>,
    index: HashMap<PlanetId, usize>,
    fields: HashMap<PlanetId, GravityField>,
    bodies: HashMap<Entity, PlanetId>,
    discovery: DiscoveryLog,
    phase: ContactPhase,
    pub camera: CameraState,
}

impl GameWorld {
    /// Build a world from an arbitrary roster.
    ///
    /// Ids must be unique and radii finite and positive.  Every planet counts
    /// toward discovery completion.
    pub fn new(planets: Vec<PlanetBody>, config: &GameConfig) -> GameResult<Self> {
        let mut index = HashMap::with_capacity(planets.len());
        let mut fields = HashMap::with_capacity(planets.len());
        for (i, planet) in planets.iter().enumerate() {
            if !(planet.radius.is_finite() && planet.radius > 0.0) {
                return Err(GameError::InvalidRadius {
                    name: planet.id.to_string(),
                    radius: planet.radius,
                });
            }
            if index.insert(planet.id.clone(), i).is_some() {
                return Err(GameError::DuplicatePlanet {
                    name: planet.id.to_string(),
                });
            }
            fields.insert(planet.id.clone(), build_field(planet));
        }
        let total = planets.len();
        Ok(Self {
            planets,
            index,
            fields,
            bodies: HashMap::new(),
            discovery: DiscoveryLog::new(total),
            phase: ContactPhase::PreContact,
            camera: CameraState::new(config.camera_initial_scale),
        })
    }

    /// Build the solar-system world, failing if any named planet is absent.
    pub fn solar_system(planets: Vec<PlanetBody>, config: &GameConfig) -> GameResult<Self> {
        let world = Self::new(planets, config)?;
        for spec in SOLAR_SYSTEM.iter() {
            if world.planet(&PlanetId::from(spec.name)).is_none() {
                return Err(GameError::MissingPlanet {
                    name: spec.name.to_string(),
                });
            }
        }
        Ok(world)
    }

    // ── Roster ───────────────────────────────────────────────────────────────

    /// Planets in roster order.
    pub fn planets(&self) -> &[PlanetBody] {
        &self.planets
    }

    pub fn planet(&self, id: &PlanetId) -> Option<&PlanetBody> {
        self.index.get(id).map(|&i| &self.planets[i])
    }

    pub fn field(&self, id: &PlanetId) -> Option<&GravityField> {
        self.fields.get(id)
    }

    /// Fields in roster order.
    pub fn fields(&self) -> impl Iterator<Item = (&PlanetId, &GravityField)> + '_ {
        self.planets
            .iter()
            .filter_map(|p| self.fields.get(&p.id).map(|f| (&p.id, f)))
    }

    /// Summed acceleration of every field containing `point`, added in roster
    /// order.
    pub fn field_acceleration(&self, point: Vec2, scale: f32, min_distance: f32) -> Vec2 {
        self.fields()
            .map(|(_, field)| field.acceleration_at(point, scale, min_distance))
            .fold(Vec2::ZERO, |sum, accel| sum + accel)
    }

    /// Remember which physics entity stands for `id`.
    pub fn bind_body(&mut self, id: PlanetId, entity: Entity) {
        self.bodies.insert(entity, id);
    }

    /// Planet id for a physics entity, if it is one of ours.
    pub fn planet_for_entity(&self, entity: Entity) -> Option<&PlanetId> {
        self.bodies.get(&entity)
    }

    // ── Proximity ────────────────────────────────────────────────────────────

    pub fn nearest_planet(&self, point: Vec2) -> Option<&PlanetBody> {
        nearest_planet(point, &self.planets)
    }

    pub fn nearest_pair_distance(&self, point: Vec2) -> Option<f32> {
        nearest_pair_distance(point, &self.planets)
    }

    // ── Contact / discovery ──────────────────────────────────────────────────

    pub fn phase(&self) -> ContactPhase {
        self.phase
    }

    pub fn discovery(&self) -> &DiscoveryLog {
        &self.discovery
    }

    /// Apply a player–planet contact.  Unknown ids are ignored.
    pub fn register_contact(&mut self, id: &PlanetId) -> Option<ContactOutcome> {
        if !self.index.contains_key(id) {
            return None;
        }
        let entered_post_contact = self.phase == ContactPhase::PreContact;
        self.phase = ContactPhase::PostContact;
        Some(ContactOutcome {
            entered_post_contact,
            discovery: self.discovery.record(id),
        })
    }

    /// Where Bob reappears after a reset: diagonally off the last discovered
    /// planet by one diameter, or off Earth before any discovery.
    pub fn respawn_position(&self) -> Vec2 {
        let anchor = self
            .discovery
            .last()
            .and_then(|id| self.planet(id))
            .or_else(|| self.planet(&PlanetId::from(HOME_PLANET)))
            .or_else(|| self.planets.first());
        match anchor {
            Some(planet) => planet.position + Vec2::splat(planet.radius * 2.0),
            None => Vec2::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> GameConfig {
        GameConfig::default()
    }

    #[test]
    fn solar_system_builds_with_fields_for_every_planet() {
        let world = GameWorld::solar_system(PlanetBody::solar_system(), &config()).unwrap();
        assert_eq!(world.planets().len(), 8);
        assert_eq!(world.fields().count(), 8);
        assert_eq!(world.discovery().total(), 8);
        assert_eq!(world.phase(), ContactPhase::PreContact);
    }

    #[test]
    fn missing_planet_fails_setup() {
        let planets: Vec<PlanetBody> = PlanetBody::solar_system()
            .into_iter()
            .filter(|p| p.id.as_str() != "Uranus")
            .collect();
        let err = GameWorld::solar_system(planets, &config()).unwrap_err();
        assert_eq!(
            err,
            GameError::MissingPlanet {
                name: "Uranus".into()
            }
        );
    }

    #[test]
    fn duplicate_and_bad_radius_fail_setup() {
        let dup = vec![
            PlanetBody::new("Earth", Vec2::ZERO, 10.0),
            PlanetBody::new("Earth", Vec2::X, 10.0),
        ];
        assert!(matches!(
            GameWorld::new(dup, &config()),
            Err(GameError::DuplicatePlanet { .. })
        ));

        let flat = vec![PlanetBody::new("Earth", Vec2::ZERO, 0.0)];
        assert!(matches!(
            GameWorld::new(flat, &config()),
            Err(GameError::InvalidRadius { .. })
        ));
    }

    #[test]
    fn first_contact_flips_phase_once() {
        let mut world = GameWorld::solar_system(PlanetBody::solar_system(), &config()).unwrap();
        let first = world.register_contact(&"Mars".into()).unwrap();
        assert!(first.entered_post_contact);
        let second = world.register_contact(&"Venus".into()).unwrap();
        assert!(!second.entered_post_contact);
        assert_eq!(world.phase(), ContactPhase::PostContact);
    }

    #[test]
    fn unknown_contact_is_ignored() {
        let mut world = GameWorld::solar_system(PlanetBody::solar_system(), &config()).unwrap();
        assert!(world.register_contact(&"Vulcan".into()).is_none());
        assert_eq!(world.phase(), ContactPhase::PreContact);
        assert!(world.discovery().is_empty());
    }

    #[test]
    fn respawn_uses_last_discovery_then_earth() {
        let mut world = GameWorld::solar_system(PlanetBody::solar_system(), &config()).unwrap();
        let earth = world.planet(&"Earth".into()).unwrap().clone();
        assert_eq!(
            world.respawn_position(),
            earth.position + Vec2::splat(earth.radius * 2.0)
        );

        world.register_contact(&"Saturn".into());
        world.register_contact(&"Neptune".into());
        world.register_contact(&"Saturn".into());
        let neptune = world.planet(&"Neptune".into()).unwrap().clone();
        assert_eq!(
            world.respawn_position(),
            neptune.position + Vec2::splat(neptune.radius * 2.0)
        );
    }

    #[test]
    fn field_acceleration_pulls_toward_the_enclosing_planet() {
        let world = GameWorld::solar_system(PlanetBody::solar_system(), &config()).unwrap();
        let earth = world.planet(&"Earth".into()).unwrap().clone();
        let probe = earth.position + Vec2::new(earth.radius * 3.0, 0.0);
        let accel = world.field_acceleration(probe, 15.0, 1.0);
        assert!(accel.x < 0.0, "{accel:?}");
        assert!(accel.y.abs() < accel.x.abs());
        // Far outside every field.
        assert_eq!(world.field_acceleration(Vec2::new(9000.0, 9000.0), 15.0, 1.0), Vec2::ZERO);
    }

    #[test]
    fn overlapping_fields_sum_in_roster_order() {
        let world = GameWorld::solar_system(PlanetBody::solar_system(), &config()).unwrap();
        // Inside both Jupiter's and Uranus's regions.
        let point = Vec2::new(-1600.0, -1300.0);
        let inside: Vec<&str> = world
            .fields()
            .filter(|(_, field)| field.contains(point))
            .map(|(id, _)| id.as_str())
            .collect();
        assert_eq!(inside, vec!["Jupiter", "Uranus"]);

        let expected = world
            .fields()
            .fold(Vec2::ZERO, |sum, (_, field)| {
                sum + field.acceleration_at(point, 15.0, 1.0)
            });
        let rebuilt = GameWorld::solar_system(PlanetBody::solar_system(), &config()).unwrap();
        for _ in 0..4 {
            assert_eq!(world.field_acceleration(point, 15.0, 1.0), expected);
            assert_eq!(rebuilt.field_acceleration(point, 15.0, 1.0), expected);
        }
    }

    #[test]
    fn body_binding_round_trips() {
        let mut world = GameWorld::solar_system(PlanetBody::solar_system(), &config()).unwrap();
        let entity = World::new().spawn_empty().id();
        world.bind_body("Jupiter".into(), entity);
        assert_eq!(world.planet_for_entity(entity).map(|id| id.as_str()), Some("Jupiter"));
    }
}
