//! Headless tests for the solar-system frame systems around discovery.
//!
//! As in `discovery_tests.rs`, Rapier is not running and each system under
//! test is added on its own.  Time advances in fixed 100 ms steps so eased
//! values move by a predictable amount.
//!
//! Covered scenarios:
//! 1. Before the first contact the camera stays parked and no trail is
//!    sampled; after it the camera follows and zooms and the trail fills.
//! 2. Inside Earth's field Bob's force is the field sum times his mass.
//! 3. No force is written while the entrance hop is running.
//! 4. The first tap spawns one Bob hopping to the nearest planet.
//! 5. A discovery marks only the matching halo as explored.
//! 6. The exit reveal cue spawns one exit control, and only once the
//!    journey is complete.

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use bevy_rapier2d::prelude::{ExternalForce, Velocity};
use bob_the_ball::camera::MainCamera;
use bob_the_ball::config::GameConfig;
use bob_the_ball::cues::{Cue, CueFired};
use bob_the_ball::discovery::PlanetDiscovered;
use bob_the_ball::hud::{reveal_exit_system, ExitButton, StartLabel};
use bob_the_ball::planet::{PlanetBody, PlanetId};
use bob_the_ball::player::{
    camera_follow_system, trail_sample_system, Entrance, Player, PointerIntent, Trail,
};
use bob_the_ball::solar_system::{
    explored_field_system, first_touch_system, gravity_field_system, ExploredField, FieldHalo,
};
use bob_the_ball::world::{ContactPhase, GameWorld};

// ── Helpers ───────────────────────────────────────────────────────────────────

const CAMERA_START_SCALE: f32 = 7.0;

fn base_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(100)));
    let config = GameConfig::default();
    let world =
        GameWorld::solar_system(PlanetBody::solar_system(), &config).expect("roster is valid");
    app.insert_resource(world);
    app.insert_resource(config);
    app
}

fn planet(app: &App, name: &str) -> PlanetBody {
    app.world()
        .resource::<GameWorld>()
        .planet(&PlanetId::from(name))
        .cloned()
        .expect("planet on the roster")
}

fn run(app: &mut App, frames: usize) {
    for _ in 0..frames {
        app.update();
    }
}

fn camera(app: &mut App) -> (Vec2, f32) {
    let mut q = app
        .world_mut()
        .query_filtered::<(&Transform, &Projection), With<MainCamera>>();
    let (transform, projection) = q.single(app.world()).expect("one camera");
    let scale = match projection {
        Projection::Orthographic(ortho) => ortho.scale,
        _ => panic!("camera is orthographic"),
    };
    (transform.translation.truncate(), scale)
}

fn count<F: bevy::ecs::query::QueryFilter>(app: &mut App) -> usize {
    let mut q = app.world_mut().query_filtered::<(), F>();
    q.iter(app.world()).count()
}

// ── Contact phase ─────────────────────────────────────────────────────────────

#[test]
fn camera_and_trail_wait_for_the_first_contact() {
    let mut app = base_app();
    app.add_systems(Update, (trail_sample_system, camera_follow_system));

    app.world_mut().spawn((
        MainCamera,
        Transform::default(),
        Projection::Orthographic(OrthographicProjection {
            scale: CAMERA_START_SCALE,
            ..OrthographicProjection::default_2d()
        }),
    ));
    let earth = planet(&app, "Earth");
    let bob_at = earth.position + Vec2::new(earth.radius * 4.0, 0.0);
    let bob = app
        .world_mut()
        .spawn((
            Player,
            Transform::from_translation(bob_at.extend(1.0)),
            Velocity::linear(Vec2::new(500.0, 0.0)),
            Trail::new(20, 0.1),
        ))
        .id();

    run(&mut app, 6);
    assert_eq!(camera(&mut app), (Vec2::ZERO, CAMERA_START_SCALE));
    assert!(app.world().get::<Trail>(bob).unwrap().buffer.is_empty());

    let outcome = app
        .world_mut()
        .resource_mut::<GameWorld>()
        .register_contact(&"Earth".into())
        .expect("Earth is on the roster");
    assert!(outcome.entered_post_contact);
    assert_eq!(
        app.world().resource::<GameWorld>().phase(),
        ContactPhase::PostContact
    );

    run(&mut app, 6);
    let (position, scale) = camera(&mut app);
    assert!(position.distance(bob_at) < bob_at.length(), "{position:?}");
    assert!(scale < CAMERA_START_SCALE, "{scale}");
    assert!(app.world().get::<Trail>(bob).unwrap().buffer.len() >= 3);
}

// ── Gravity adapter ───────────────────────────────────────────────────────────

#[test]
fn force_is_field_acceleration_times_mass() {
    let mut app = base_app();
    app.add_systems(Update, gravity_field_system);

    let earth = planet(&app, "Earth");
    let at = earth.position + Vec2::new(earth.radius * 3.0, 0.0);
    let bob = app
        .world_mut()
        .spawn((
            Player,
            Transform::from_translation(at.extend(1.0)),
            ExternalForce::default(),
        ))
        .id();
    app.update();

    let config = app.world().resource::<GameConfig>().clone();
    let expected = app.world().resource::<GameWorld>().field_acceleration(
        at,
        config.field_acceleration_scale,
        config.field_min_distance,
    ) * config.player_mass;
    let force = app.world().get::<ExternalForce>(bob).unwrap().force;
    assert_ne!(expected, Vec2::ZERO);
    assert_eq!(force, expected);
    // Pulled back toward Earth.
    assert!(force.x < 0.0);
}

#[test]
fn no_force_while_the_entrance_runs() {
    let mut app = base_app();
    app.add_systems(Update, gravity_field_system);

    let earth = planet(&app, "Earth");
    let at = earth.position + Vec2::new(earth.radius * 3.0, 0.0);
    let untouched = Vec2::new(3.0, -4.0);
    let bob = app
        .world_mut()
        .spawn((
            Player,
            Transform::from_translation(at.extend(1.0)),
            ExternalForce {
                force: untouched,
                torque: 0.0,
            },
            Entrance::new(at, earth.position, 0.3, 1.0),
        ))
        .id();
    app.update();

    assert_eq!(app.world().get::<ExternalForce>(bob).unwrap().force, untouched);
}

// ── First touch ───────────────────────────────────────────────────────────────

#[test]
fn first_tap_spawns_one_bob_hopping_to_the_nearest_planet() {
    let mut app = base_app();
    app.init_resource::<PointerIntent>();
    app.add_systems(Update, first_touch_system);
    app.world_mut()
        .spawn((Text::new("Tap"), Visibility::Inherited, StartLabel));

    let earth = planet(&app, "Earth");
    let tap = earth.position + Vec2::new(-150.0, -150.0);
    app.world_mut().resource_mut::<PointerIntent>().tap = Some(tap);
    // The tap stays in the intent for a second frame; Bob already exists.
    run(&mut app, 2);

    let mut q = app
        .world_mut()
        .query_filtered::<(&Transform, &Entrance), With<Player>>();
    let spawned: Vec<(Vec3, Entrance)> = q
        .iter(app.world())
        .map(|(t, e)| (t.translation, e.clone()))
        .collect();
    assert_eq!(spawned.len(), 1);
    let (translation, entrance) = &spawned[0];
    assert_eq!(translation.truncate(), tap);
    assert_eq!(entrance.start, tap);
    assert_eq!(entrance.target, earth.position + Vec2::splat(earth.radius));

    let mut labels = app
        .world_mut()
        .query_filtered::<&Visibility, With<StartLabel>>();
    for visibility in labels.iter(app.world()) {
        assert_eq!(*visibility, Visibility::Hidden);
    }
}

#[test]
fn no_tap_no_bob() {
    let mut app = base_app();
    app.init_resource::<PointerIntent>();
    app.add_systems(Update, first_touch_system);
    app.world_mut().resource_mut::<PointerIntent>().drag = Some(Vec2::ZERO);
    run(&mut app, 2);
    assert_eq!(count::<With<Player>>(&mut app), 0);
}

// ── Explored halos ────────────────────────────────────────────────────────────

#[test]
fn discovery_marks_only_the_matching_halo() {
    let mut app = base_app();
    app.add_message::<PlanetDiscovered>();
    app.init_resource::<Assets<ColorMaterial>>();
    app.add_systems(Update, explored_field_system);

    let start_color = Color::srgba(0.4, 0.55, 1.0, 0.07);
    let halo = |app: &mut App, name: &str| {
        let material = app
            .world_mut()
            .resource_mut::<Assets<ColorMaterial>>()
            .add(ColorMaterial::from(start_color));
        let entity = app
            .world_mut()
            .spawn(FieldHalo {
                id: name.into(),
                key: format!("{name}_gravity"),
                material: material.clone(),
            })
            .id();
        (entity, material)
    };
    let (mars, mars_material) = halo(&mut app, "Mars");
    let (venus, venus_material) = halo(&mut app, "Venus");

    app.world_mut().write_message(PlanetDiscovered {
        id: "Mars".into(),
        discovered: 1,
        total: 8,
    });
    app.update();

    assert!(app.world().get::<ExploredField>(mars).is_some());
    assert!(app.world().get::<ExploredField>(venus).is_none());
    let materials = app.world().resource::<Assets<ColorMaterial>>();
    assert_ne!(materials.get(&mars_material).unwrap().color, start_color);
    assert_eq!(materials.get(&venus_material).unwrap().color, start_color);
}

// ── Exit reveal ───────────────────────────────────────────────────────────────

fn exit_app() -> App {
    let mut app = base_app();
    app.add_message::<CueFired>();
    app.add_systems(Update, reveal_exit_system);
    app.world_mut()
        .spawn((Text::new("Tap"), Visibility::Hidden, StartLabel));
    app
}

#[test]
fn exit_control_appears_once_after_the_journey() {
    let mut app = exit_app();
    {
        let mut world = app.world_mut().resource_mut::<GameWorld>();
        for planet in PlanetBody::solar_system() {
            world.register_contact(&planet.id);
        }
        assert!(world.discovery().is_complete());
    }

    app.world_mut().write_message(CueFired(Cue::RevealExit));
    app.world_mut().write_message(CueFired(Cue::RevealExit));
    app.update();
    app.world_mut().write_message(CueFired(Cue::RevealExit));
    app.update();

    assert_eq!(count::<With<ExitButton>>(&mut app), 1);
    let mut labels = app
        .world_mut()
        .query_filtered::<&Visibility, With<StartLabel>>();
    for visibility in labels.iter(app.world()) {
        assert_eq!(*visibility, Visibility::Inherited);
    }
}

#[test]
fn exit_cue_is_ignored_mid_journey() {
    let mut app = exit_app();
    app.world_mut()
        .resource_mut::<GameWorld>()
        .register_contact(&"Mars".into());

    app.world_mut().write_message(CueFired(Cue::RevealExit));
    app.update();

    assert_eq!(count::<With<ExitButton>>(&mut app), 0);
}
