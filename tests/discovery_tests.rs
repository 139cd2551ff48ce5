//! Headless tests for contact → discovery → journey completion.
//!
//! Rapier is not running: `CollisionEvent`s are written directly, the way the
//! physics step would deliver them, and the solar-system systems are added
//! one by one.
//!
//! Covered scenarios:
//! 1. A first contact discovers the planet and engages `PostContact`.
//! 2. Re-contacting a discovered planet sends nothing.
//! 3. Non-planet contacts and contacts without Bob are ignored.
//! 4. Discovering all eight planets sends `JourneyComplete` exactly once and
//!    schedules the exit reveal.
//! 5. A reset puts Bob beside the last discovered planet at rest.

use bevy::prelude::*;
use bevy_rapier2d::prelude::{CollisionEvent, Velocity};
use bevy_rapier2d::rapier::geometry::CollisionEventFlags;
use bob_the_ball::config::GameConfig;
use bob_the_ball::cues::{Cue, ScheduledCue};
use bob_the_ball::discovery::{JourneyComplete, PlanetDiscovered, ResetRequested};
use bob_the_ball::planet::{PlanetBody, PlanetId, PlanetMarker};
use bob_the_ball::player::Player;
use bob_the_ball::solar_system::{contact_discovery_system, journey_complete_system, reset_system};
use bob_the_ball::world::{ContactPhase, GameWorld};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Everything the discovery messages carried, across frames.
#[derive(Resource, Default)]
struct Seen {
    discovered: Vec<PlanetDiscovered>,
    completions: usize,
}

fn record_messages(
    mut seen: ResMut<Seen>,
    mut discovered: MessageReader<PlanetDiscovered>,
    mut complete: MessageReader<JourneyComplete>,
) {
    seen.discovered.extend(discovered.read().cloned());
    seen.completions += complete.read().count();
}

struct Fixture {
    app: App,
    bob: Entity,
    planets: Vec<(PlanetId, Entity)>,
}

fn fixture() -> Fixture {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.add_message::<CollisionEvent>()
        .add_message::<PlanetDiscovered>()
        .add_message::<JourneyComplete>()
        .add_message::<ResetRequested>();
    let config = GameConfig::default();

    let mut world = GameWorld::solar_system(PlanetBody::solar_system(), &config)
        .expect("roster is valid");
    let mut planets = Vec::new();
    for planet in PlanetBody::solar_system() {
        let entity = app.world_mut().spawn(PlanetMarker(planet.id.clone())).id();
        world.bind_body(planet.id.clone(), entity);
        planets.push((planet.id, entity));
    }
    app.insert_resource(world);
    app.insert_resource(config);
    app.init_resource::<Seen>();

    let bob = app
        .world_mut()
        .spawn((
            Player,
            Transform::from_xyz(10.0, 10.0, 1.0),
            Velocity::linear(Vec2::new(50.0, -20.0)),
        ))
        .id();

    app.add_systems(
        Update,
        (
            contact_discovery_system,
            journey_complete_system,
            reset_system,
            record_messages,
        )
            .chain(),
    );

    Fixture { app, bob, planets }
}

fn touch(app: &mut App, a: Entity, b: Entity) {
    app.world_mut().write_message(CollisionEvent::Started(
        a,
        b,
        CollisionEventFlags::empty(),
    ));
}

fn entity_of(fx: &Fixture, name: &str) -> Entity {
    fx.planets
        .iter()
        .find(|(id, _)| id.as_str() == name)
        .map(|(_, e)| *e)
        .expect("planet on the roster")
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[test]
fn first_contact_discovers_and_engages_follow() {
    let mut fx = fixture();
    let mars = entity_of(&fx, "Mars");

    // Order of the pair does not matter.
    touch(&mut fx.app, mars, fx.bob);
    fx.app.update();

    let seen = fx.app.world().resource::<Seen>();
    assert_eq!(seen.discovered.len(), 1);
    assert_eq!(seen.discovered[0].id.as_str(), "Mars");
    assert_eq!(seen.discovered[0].discovered, 1);
    assert_eq!(seen.discovered[0].total, 8);
    assert_eq!(seen.completions, 0);

    let world = fx.app.world().resource::<GameWorld>();
    assert_eq!(world.phase(), ContactPhase::PostContact);
}

#[test]
fn recontact_is_idempotent() {
    let mut fx = fixture();
    let earth = entity_of(&fx, "Earth");

    touch(&mut fx.app, fx.bob, earth);
    fx.app.update();
    touch(&mut fx.app, fx.bob, earth);
    touch(&mut fx.app, earth, fx.bob);
    fx.app.update();

    let seen = fx.app.world().resource::<Seen>();
    assert_eq!(seen.discovered.len(), 1);
    assert_eq!(fx.app.world().resource::<GameWorld>().discovery().len(), 1);
}

#[test]
fn contacts_not_involving_bob_and_a_planet_are_ignored() {
    let mut fx = fixture();
    let wall = fx.app.world_mut().spawn(Transform::default()).id();
    let venus = entity_of(&fx, "Venus");
    let saturn = entity_of(&fx, "Saturn");

    touch(&mut fx.app, fx.bob, wall);
    touch(&mut fx.app, venus, saturn);
    fx.app.update();

    assert!(fx.app.world().resource::<Seen>().discovered.is_empty());
    let world = fx.app.world().resource::<GameWorld>();
    assert_eq!(world.phase(), ContactPhase::PreContact);
}

#[test]
fn discovering_every_planet_completes_once_and_schedules_the_exit() {
    let mut fx = fixture();
    let planets: Vec<Entity> = fx.planets.iter().map(|(_, e)| *e).collect();

    for planet in &planets {
        touch(&mut fx.app, fx.bob, *planet);
        fx.app.update();
    }
    // Touring the system again changes nothing.
    for planet in &planets {
        touch(&mut fx.app, fx.bob, *planet);
    }
    fx.app.update();

    let seen = fx.app.world().resource::<Seen>();
    assert_eq!(seen.discovered.len(), 8);
    assert_eq!(seen.discovered.last().map(|d| d.discovered), Some(8));
    assert_eq!(seen.completions, 1);
    assert!(fx
        .app
        .world()
        .resource::<GameWorld>()
        .discovery()
        .is_complete());

    let mut q = fx.app.world_mut().query::<&ScheduledCue>();
    let exits = q
        .iter(fx.app.world())
        .filter(|c| c.cue == Cue::RevealExit)
        .count();
    assert_eq!(exits, 1);
}

#[test]
fn reset_returns_bob_beside_the_last_discovery_at_rest() {
    let mut fx = fixture();
    let neptune = entity_of(&fx, "Neptune");
    touch(&mut fx.app, fx.bob, neptune);
    fx.app.update();

    fx.app.world_mut().write_message(ResetRequested);
    fx.app.update();

    let world = fx.app.world().resource::<GameWorld>();
    let expected = world.respawn_position();
    let neptune_body = world
        .planet(&PlanetId::from("Neptune"))
        .expect("Neptune on the roster");
    assert_eq!(
        expected,
        neptune_body.position + Vec2::splat(neptune_body.radius * 2.0)
    );

    let transform = fx.app.world().get::<Transform>(fx.bob).unwrap();
    assert_eq!(transform.translation.truncate(), expected);
    assert_eq!(transform.translation.z, 1.0);
    let velocity = fx.app.world().get::<Velocity>(fx.bob).unwrap();
    assert_eq!(velocity.linvel, Vec2::ZERO);
}
