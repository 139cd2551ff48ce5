//! The main exploration scene: eight planets, their gravity fields, and Bob.
//!
//! ## Frame pipeline (`GameScene::Game`)
//!
//! | Step | System                          | Effect                                         |
//! |------|---------------------------------|------------------------------------------------|
//! | 1    | [`first_touch_system`]          | first tap spawns Bob and the HUD               |
//! | 2    | [`contact_discovery_system`]    | `CollisionEvent` → `GameWorld::register_contact` → messages |
//! | 3    | [`explored_field_system`]       | recolours discovered planets' halos            |
//! | 4    | [`journey_complete_system`]     | schedules the exit reveal                      |
//! | 5    | [`reset_system`]                | puts Bob back beside his last discovery        |
//! | 6    | [`gravity_field_system`]        | field accelerations → `ExternalForce`          |
//!
//! Facing, trail and camera systems live in [`crate::player`] and read the
//! same [`GameWorld`].

use crate::camera::{reset_camera, MainCamera};
use crate::config::GameConfig;
use crate::cues::{schedule_cue, Cue};
use crate::discovery::{Discovery, JourneyComplete, PlanetDiscovered, ResetRequested};
use crate::hud::{
    progress_text, show_info_panel, spawn_progress_strip, spawn_reset_button, spawn_start_label,
    InfoPanel, StartLabel, WELCOME_KEY, WELCOME_TEXT,
};
use crate::planet::{gravity_key, PlanetBody, PlanetId, PlanetMarker};
use crate::player::{
    spawn_player, Entrance, Player, PointerIntent, PointerSet, Trail, PLANET_GROUP,
    PLAYER_GROUP,
};
use crate::scene::{GameScene, SceneEntity, SceneRequest};
use crate::shapes::{disc_mesh, disc_vertices, filled_polygon_mesh, tinted, DISC_SEGMENTS};
use crate::world::GameWorld;
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;
use rand::Rng;

fn halo_unexplored() -> Color {
    Color::srgba(0.40, 0.55, 1.0, 0.07)
}
fn halo_explored() -> Color {
    Color::srgba(0.35, 0.95, 0.45, 0.10)
}

/// Flat tint per planet; unknown names get a neutral grey.
pub fn planet_color(id: &PlanetId) -> Color {
    match id.as_str() {
        "Mercury" => Color::srgb(0.62, 0.60, 0.58),
        "Venus" => Color::srgb(0.91, 0.78, 0.52),
        "Earth" => Color::srgb(0.25, 0.50, 0.90),
        "Mars" => Color::srgb(0.80, 0.36, 0.22),
        "Jupiter" => Color::srgb(0.84, 0.68, 0.50),
        "Saturn" => Color::srgb(0.90, 0.82, 0.58),
        "Uranus" => Color::srgb(0.58, 0.86, 0.90),
        "Neptune" => Color::srgb(0.28, 0.42, 0.92),
        _ => Color::srgb(0.6, 0.6, 0.6),
    }
}

// ── Components ────────────────────────────────────────────────────────────────

/// Cosmetic spin of a planet's artwork (rad/s).
#[derive(Component, Debug, Clone, Copy)]
pub struct PlanetSpin(pub f32);

/// Translucent disc showing a planet's gravity region.
#[derive(Component, Debug, Clone)]
pub struct FieldHalo {
    pub id: PlanetId,
    pub key: String,
    pub material: Handle<ColorMaterial>,
}

/// Set on a halo once its planet has been discovered.
#[derive(Component, Debug, Clone, Copy)]
pub struct ExploredField;

// ── Plugin ────────────────────────────────────────────────────────────────────

pub struct SolarSystemPlugin;

impl Plugin for SolarSystemPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<PlanetDiscovered>()
            .add_message::<JourneyComplete>()
            .add_message::<ResetRequested>()
            .add_systems(OnEnter(GameScene::Game), setup_solar_system)
            .add_systems(OnExit(GameScene::Game), teardown_solar_system)
            .add_systems(
                Update,
                (
                    first_touch_system,
                    contact_discovery_system,
                    explored_field_system,
                    journey_complete_system,
                    reset_system,
                    gravity_field_system,
                )
                    .chain()
                    .after(PointerSet)
                    .run_if(in_state(GameScene::Game))
                    .run_if(resource_exists::<GameWorld>),
            )
            .add_systems(Update, planet_spin_system);
    }
}

// ── Setup / teardown ──────────────────────────────────────────────────────────

/// Build the world and spawn the static scene.  A roster problem is reported
/// once and sends the player back to the start scene.
pub fn setup_solar_system(
    mut commands: Commands,
    config: Res<GameConfig>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    mut q_camera: Query<(&mut Transform, &mut Projection), With<MainCamera>>,
    mut requests: MessageWriter<SceneRequest>,
) {
    let mut world = match GameWorld::solar_system(PlanetBody::solar_system(), &config) {
        Ok(world) => world,
        Err(err) => {
            error!("[setup] Solar system failed to initialise: {err}");
            requests.write(SceneRequest(GameScene::Start));
            return;
        }
    };

    let mut rng = rand::thread_rng();
    let halo_mesh = meshes.add(disc_mesh(1.0, DISC_SEGMENTS));
    for planet in world.planets().to_vec() {
        let entity = spawn_planet(
            &mut commands,
            &mut meshes,
            &mut materials,
            &planet,
            rng.gen_range(1.0_f32..5.0_f32),
        );
        world.bind_body(planet.id.clone(), entity);

        if let Some(field) = world.field(&planet.id) {
            let material = tinted(&mut materials, halo_unexplored());
            commands.spawn((
                FieldHalo {
                    id: planet.id.clone(),
                    key: gravity_key(&planet.id),
                    material: material.clone(),
                },
                Mesh2d(halo_mesh.clone()),
                MeshMaterial2d(material),
                Transform::from_translation(field.center.extend(-1.0))
                    .with_scale(Vec3::splat(field.influence_radius)),
                SceneEntity,
            ));
        }
    }

    reset_camera(&mut q_camera, config.camera_initial_scale);
    spawn_start_label(&mut commands);
    info!(
        "[setup] Solar system ready: {} planets, {} fields",
        world.planets().len(),
        world.fields().count()
    );
    commands.insert_resource(world);
}

/// Static planet body with a spinning artwork child.
fn spawn_planet(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<ColorMaterial>,
    planet: &PlanetBody,
    revolution_secs: f32,
) -> Entity {
    let color = planet_color(&planet.id);
    let body = meshes.add(disc_mesh(planet.radius, DISC_SEGMENTS));
    // An off-centre band so the spin is visible on a flat disc.
    let band_verts: Vec<Vec2> = disc_vertices(planet.radius * 0.35, 16)
        .into_iter()
        .map(|v| v + Vec2::new(planet.radius * 0.4, 0.0))
        .collect();
    let band = meshes.add(filled_polygon_mesh(&band_verts));
    let body_mat = tinted(materials, color);
    let band_mat = tinted(materials, color.darker(0.15));

    commands
        .spawn((
            PlanetMarker(planet.id.clone()),
            RigidBody::Fixed,
            Collider::ball(planet.radius),
            CollisionGroups::new(PLANET_GROUP, PLAYER_GROUP),
            Transform::from_translation(planet.position.extend(0.0)),
            Visibility::default(),
            SceneEntity,
        ))
        .with_children(|parent| {
            parent
                .spawn((
                    PlanetSpin(std::f32::consts::TAU / revolution_secs),
                    Mesh2d(body),
                    MeshMaterial2d(body_mat),
                    Transform::default(),
                ))
                .with_children(|art| {
                    art.spawn((
                        Mesh2d(band),
                        MeshMaterial2d(band_mat),
                        Transform::from_xyz(0.0, 0.0, 0.1),
                    ));
                });
        })
        .id()
}

pub fn teardown_solar_system(mut commands: Commands) {
    commands.remove_resource::<GameWorld>();
}

// ── Update systems ────────────────────────────────────────────────────────────

/// The first tap brings Bob in: he appears under the finger and hops onto the
/// nearest planet, and the HUD replaces the start label.
pub fn first_touch_system(
    mut commands: Commands,
    intent: Res<PointerIntent>,
    config: Res<GameConfig>,
    world: Res<GameWorld>,
    q_player: Query<(), With<Player>>,
    mut q_label: Query<&mut Visibility, With<StartLabel>>,
    panels: Query<Entity, With<InfoPanel>>,
) {
    let Some(tap) = intent.tap else {
        return;
    };
    if !q_player.is_empty() {
        return;
    }
    let Some(nearest) = world.nearest_planet(tap) else {
        return;
    };
    let landing = nearest.position + Vec2::splat(nearest.radius);

    let bob = spawn_player(&mut commands, tap, config.player_radius, &config);
    commands.entity(bob).insert(Entrance::new(
        tap,
        landing,
        config.entrance_pause_secs,
        config.entrance_hop_secs,
    ));

    for mut visibility in q_label.iter_mut() {
        *visibility = Visibility::Hidden;
    }
    spawn_progress_strip(&mut commands, world.planets());
    spawn_reset_button(&mut commands);
    show_info_panel(
        &mut commands,
        &panels,
        WELCOME_KEY.to_string(),
        WELCOME_TEXT,
        config.info_panel_secs,
    );
    info!("[discovery] Bob heads for {}", nearest.id);
}

/// Turn player–planet contacts into discovery messages.
///
/// Contacts with anything that is not a bound planet body are ignored.
pub fn contact_discovery_system(
    mut collision_events: MessageReader<CollisionEvent>,
    mut world: ResMut<GameWorld>,
    q_player: Query<(), With<Player>>,
    mut discovered: MessageWriter<PlanetDiscovered>,
    mut complete: MessageWriter<JourneyComplete>,
) {
    for event in collision_events.read() {
        let (e1, e2) = match event {
            CollisionEvent::Started(e1, e2, _) => (*e1, *e2),
            CollisionEvent::Stopped(..) => continue,
        };
        let other = if q_player.contains(e1) {
            e2
        } else if q_player.contains(e2) {
            e1
        } else {
            continue;
        };
        let Some(id) = world.planet_for_entity(other).cloned() else {
            continue;
        };
        let Some(outcome) = world.register_contact(&id) else {
            continue;
        };
        if outcome.entered_post_contact {
            info!("[discovery] First contact with {id}: camera follow engaged");
        }
        if let Discovery::New {
            discovered: count,
            total,
            completed,
        } = outcome.discovery
        {
            info!("[discovery] {id} discovered ({})", progress_text(&world));
            discovered.write(PlanetDiscovered {
                id: id.clone(),
                discovered: count,
                total,
            });
            if completed {
                info!("[discovery] Journey complete");
                complete.write(JourneyComplete);
            }
        }
    }
}

/// Flag and recolour the halo of each newly discovered planet.
pub fn explored_field_system(
    mut commands: Commands,
    mut discoveries: MessageReader<PlanetDiscovered>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    q_halo: Query<(Entity, &FieldHalo), Without<ExploredField>>,
) {
    for discovery in discoveries.read() {
        for (entity, halo) in q_halo.iter() {
            if halo.id != discovery.id {
                continue;
            }
            if let Some(material) = materials.get_mut(&halo.material) {
                material.color = halo_explored();
            }
            commands.entity(entity).insert(ExploredField);
        }
    }
}

/// Schedule the exit reveal once every planet is known.
pub fn journey_complete_system(
    mut commands: Commands,
    mut complete: MessageReader<JourneyComplete>,
    config: Res<GameConfig>,
) {
    if complete.read().next().is_some() {
        schedule_cue(&mut commands, config.exit_reveal_delay_secs, Cue::RevealExit);
    }
}

/// Put Bob back beside the last planet he discovered, at rest, with a fresh trail.
pub fn reset_system(
    mut resets: MessageReader<ResetRequested>,
    world: Res<GameWorld>,
    mut q_player: Query<
        (&mut Transform, &mut Velocity, Option<&mut Trail>),
        (With<Player>, Without<Entrance>),
    >,
) {
    if resets.read().next().is_none() {
        return;
    }
    let target = world.respawn_position();
    for (mut transform, mut velocity, trail) in q_player.iter_mut() {
        transform.translation.x = target.x;
        transform.translation.y = target.y;
        *velocity = Velocity::zero();
        if let Some(mut trail) = trail {
            trail.buffer.clear();
        }
    }
    info!("[discovery] Bob reset to ({:.0}, {:.0})", target.x, target.y);
}

/// Rapier has no radial field node: apply each field's pull as a force.
pub fn gravity_field_system(
    world: Res<GameWorld>,
    config: Res<GameConfig>,
    mut q_player: Query<(&Transform, &mut ExternalForce), (With<Player>, Without<Entrance>)>,
) {
    for (transform, mut force) in q_player.iter_mut() {
        let accel = world.field_acceleration(
            transform.translation.truncate(),
            config.field_acceleration_scale,
            config.field_min_distance,
        );
        force.force = accel * config.player_mass;
    }
}

pub fn planet_spin_system(time: Res<Time>, mut q_art: Query<(&PlanetSpin, &mut Transform)>) {
    let dt = time.delta_secs();
    for (spin, mut transform) in q_art.iter_mut() {
        transform.rotate_z(spin.0 * dt);
    }
}
