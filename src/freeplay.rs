//! Freeplay scene: a dozen randomly generated planets and no gravity fields.
//!
//! Planets are dynamic bodies, so Bob can knock them around.  Generation is a
//! pure function of the RNG; tests drive it with a seeded `StdRng`.

use crate::camera::{follow_point, reset_camera, MainCamera};
use crate::config::GameConfig;
use crate::constants::{
    FREEPLAY_MAX_MASS, FREEPLAY_MAX_SIZE, FREEPLAY_MIN_SIZE, FREEPLAY_PLANET_COUNT, WORLD_SIZE,
};
use crate::player::{spawn_player, Player, PLANET_GROUP, PLAYER_GROUP};
use crate::scene::{GameScene, SceneEntity, SceneRequest};
use crate::shapes::{disc_mesh, tinted, DISC_SEGMENTS};
use crate::ui::*;
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;
use rand::Rng;

/// Bob's starting point, two thousand units in from the bottom-left corner.
pub const FREEPLAY_START: Vec2 = Vec2::new(-WORLD_SIZE / 2.0 + 2000.0, -WORLD_SIZE / 2.0 + 2000.0);

/// One generated planet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneratedPlanet {
    pub position: Vec2,
    /// Diameter; the collider radius is half of it.
    pub size: f32,
    pub mass: f32,
    pub color: Color,
}

/// Roll `count` planets uniformly over a square of side `area`.
pub fn generate_planets(rng: &mut impl Rng, count: usize, area: f32) -> Vec<GeneratedPlanet> {
    let half = area / 2.0;
    (0..count)
        .map(|_| {
            let size = rng.gen_range(FREEPLAY_MIN_SIZE..=FREEPLAY_MAX_SIZE);
            let mass = rng.gen_range(size..=FREEPLAY_MAX_MASS);
            let position = Vec2::new(rng.gen_range(-half..=half), rng.gen_range(-half..=half));
            let color = Color::srgb(rng.gen(), rng.gen(), rng.gen());
            GeneratedPlanet {
                position,
                size,
                mass,
                color,
            }
        })
        .collect()
}

#[derive(Component)]
pub struct FreeplayPlanet;

#[derive(Component)]
pub struct FreeplayBackButton;

pub struct FreeplayPlugin;

impl Plugin for FreeplayPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameScene::FreePlay), setup_freeplay)
            .add_systems(
                Update,
                (freeplay_camera_system, freeplay_back_button_system)
                    .run_if(in_state(GameScene::FreePlay)),
            );
    }
}

pub fn setup_freeplay(
    mut commands: Commands,
    config: Res<GameConfig>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    mut q_camera: Query<(&mut Transform, &mut Projection), With<MainCamera>>,
) {
    let planets = generate_planets(&mut rand::thread_rng(), FREEPLAY_PLANET_COUNT, WORLD_SIZE);
    for planet in &planets {
        let radius = planet.size / 2.0;
        commands.spawn((
            FreeplayPlanet,
            RigidBody::Dynamic,
            Collider::ball(radius),
            ColliderMassProperties::Mass(planet.mass),
            CollisionGroups::new(PLANET_GROUP, PLAYER_GROUP | PLANET_GROUP),
            Velocity::zero(),
            Mesh2d(meshes.add(disc_mesh(radius, DISC_SEGMENTS))),
            MeshMaterial2d(tinted(&mut materials, planet.color)),
            Transform::from_translation(planet.position.extend(0.0)),
            SceneEntity,
        ));
    }

    spawn_player(&mut commands, FREEPLAY_START, config.player_radius, &config);
    reset_camera(&mut q_camera, 1.0);
    spawn_corner_button(
        &mut commands,
        Corner::TopLeft,
        "Back",
        ButtonStyle::Back,
        FreeplayBackButton,
    );
    info!("[setup] Freeplay ready: {} planets", planets.len());
}

/// Keep Bob centred at a fixed zoom.
pub fn freeplay_camera_system(
    time: Res<Time>,
    config: Res<GameConfig>,
    q_bob: Query<&Transform, (With<Player>, Without<MainCamera>)>,
    mut q_camera: Query<&mut Transform, With<MainCamera>>,
) {
    let Ok(bob) = q_bob.single() else {
        return;
    };
    let Ok(mut camera) = q_camera.single_mut() else {
        return;
    };
    follow_point(
        &mut camera,
        bob.translation.truncate(),
        time.delta_secs(),
        config.camera_follow_ease_secs,
    );
}

pub fn freeplay_back_button_system(
    back: Query<(&Interaction, &Children), (Changed<Interaction>, With<FreeplayBackButton>)>,
    mut texts: Query<&mut TextColor>,
    mut requests: MessageWriter<SceneRequest>,
) {
    for (interaction, children) in back.iter() {
        if *interaction == Interaction::Pressed {
            requests.write(SceneRequest(GameScene::Start));
        }
        hover_text_color(interaction, children, back_text(), &mut texts);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn generated_planets_respect_their_ranges() {
        let mut rng = StdRng::seed_from_u64(7);
        let planets = generate_planets(&mut rng, FREEPLAY_PLANET_COUNT, WORLD_SIZE);
        assert_eq!(planets.len(), 12);
        for p in &planets {
            assert!((FREEPLAY_MIN_SIZE..=FREEPLAY_MAX_SIZE).contains(&p.size));
            assert!(p.mass >= p.size && p.mass <= FREEPLAY_MAX_MASS);
            assert!(p.position.x.abs() <= WORLD_SIZE / 2.0);
            assert!(p.position.y.abs() <= WORLD_SIZE / 2.0);
        }
    }

    #[test]
    fn same_seed_same_layout() {
        let a = generate_planets(&mut StdRng::seed_from_u64(42), 5, 1000.0);
        let b = generate_planets(&mut StdRng::seed_from_u64(42), 5, 1000.0);
        assert_eq!(a, b);
    }

    #[test]
    fn bob_starts_in_the_lower_left_quadrant() {
        assert_eq!(FREEPLAY_START, Vec2::new(-1000.0, -1000.0));
    }
}
