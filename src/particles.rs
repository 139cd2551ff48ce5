//! Particle effects: Bob's comet trail and touch ripples.
//!
//! ## Design
//!
//! Particles are lightweight ECS entities with a [`Particle`] component that
//! stores their motion and fade state.  A two-system pipeline handles them:
//!
//! | System                        | Purpose                                       |
//! |-------------------------------|-----------------------------------------------|
//! | `attach_particle_mesh_system` | Attach `Mesh2d` to freshly-spawned particles  |
//! | `particle_update_system`      | Move, fade, and despawn expired particles     |
//!
//! Spawn helpers take only `&mut Commands`; the mesh is attached one frame
//! later.  A single shared disc mesh ([`ParticleMesh`]) is created at startup
//! and each particle gets its own [`ColorMaterial`] so it can fade alone.
//!
//! The comet trail emits at [`birth_rate`] scaled down by
//! `comet_emission_scale`: the emitter budget of the original effect is far
//! above what one entity per particle can sustain.

use crate::config::GameConfig;
use crate::constants::COMET_PARTICLE_LIFETIME;
use crate::motion::birth_rate;
use crate::player::{Player, PointerIntent, PointerSet};
use crate::scene::{GameScene, SceneEntity};
use crate::shapes::disc_mesh;
use bevy::prelude::*;
use bevy_rapier2d::prelude::Velocity;
use rand::Rng;

/// Radius of the shared particle disc; ripples scale it up.
const PARTICLE_RADIUS: f32 = 2.0;

// ── Resources ────────────────────────────────────────────────────────────────

/// Shared disc mesh used by all particle entities.
#[derive(Resource)]
pub struct ParticleMesh(pub Handle<Mesh>);

// ── Components ───────────────────────────────────────────────────────────────

/// Short-lived visual particle entity.
#[derive(Component)]
pub struct Particle {
    /// World-space velocity (units/s).
    pub velocity: Vec2,
    pub age: f32,
    /// Entity is despawned when `age >= lifetime`.
    pub lifetime: f32,
    pub color: Color,
    /// Alpha at birth; fades quadratically to zero.
    pub peak_alpha: f32,
    /// `None` until `attach_particle_mesh_system` runs.
    pub material: Option<Handle<ColorMaterial>>,
}

impl Particle {
    pub fn new(velocity: Vec2, lifetime: f32, color: Color, peak_alpha: f32) -> Self {
        Self {
            velocity,
            age: 0.0,
            lifetime,
            color,
            peak_alpha,
            material: None,
        }
    }

    /// Quadratic ease-out: bright at birth, rapid fade at the end.
    pub fn alpha(&self) -> f32 {
        let t = (self.age / self.lifetime).clamp(0.0, 1.0);
        self.peak_alpha * (1.0 - t).powi(2)
    }
}

/// Comet-trail emitter attached to Bob.
#[derive(Component, Default, Debug)]
pub struct CometTrail {
    /// Current birth rate in particles per second, before emission scaling.
    pub birth_rate: f32,
    /// Fractional particles carried between frames.
    pub carry: f32,
}

/// Particles to emit this frame and the fraction to carry over.
pub fn emission_count(rate: f32, scale: f32, dt: f32, carry: f32) -> (u32, f32) {
    let due = rate * scale * dt + carry;
    if due <= 0.0 {
        return (0, 0.0);
    }
    let whole = due.floor();
    (whole as u32, due - whole)
}

// ── Plugin ────────────────────────────────────────────────────────────────────

pub struct ParticlesPlugin;

impl Plugin for ParticlesPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, init_particle_mesh).add_systems(
            Update,
            (
                attach_comet_trail_system.run_if(in_state(GameScene::Game)),
                comet_emitter_system,
                touch_ripple_system,
                attach_particle_mesh_system,
                particle_update_system,
            )
                .chain()
                .after(PointerSet),
        );
    }
}

fn init_particle_mesh(mut commands: Commands, mut meshes: ResMut<Assets<Mesh>>) {
    let handle = meshes.add(disc_mesh(PARTICLE_RADIUS, 10));
    commands.insert_resource(ParticleMesh(handle));
}

// ── Update systems ────────────────────────────────────────────────────────────

/// Attach `Mesh2d` + `MeshMaterial2d` to every newly-spawned [`Particle`].
pub fn attach_particle_mesh_system(
    mut commands: Commands,
    particle_mesh: Res<ParticleMesh>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    mut query: Query<(Entity, &mut Particle), Added<Particle>>,
) {
    for (entity, mut particle) in query.iter_mut() {
        let mat_handle = materials.add(ColorMaterial::from_color(
            particle.color.with_alpha(particle.peak_alpha),
        ));
        particle.material = Some(mat_handle.clone());
        commands
            .entity(entity)
            .insert((Mesh2d(particle_mesh.0.clone()), MeshMaterial2d(mat_handle)));
    }
}

/// Advance all particles: translate, fade, and despawn expired ones.
pub fn particle_update_system(
    mut commands: Commands,
    time: Res<Time>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    mut query: Query<(Entity, &mut Transform, &mut Particle)>,
) {
    let dt = time.delta_secs();

    for (entity, mut transform, mut particle) in query.iter_mut() {
        particle.age += dt;

        if particle.age >= particle.lifetime {
            commands.entity(entity).despawn();
            continue;
        }

        transform.translation.x += particle.velocity.x * dt;
        transform.translation.y += particle.velocity.y * dt;

        if let Some(ref handle) = particle.material {
            if let Some(mat) = materials.get_mut(handle) {
                mat.color = particle.color.with_alpha(particle.alpha());
            }
        }
    }
}

/// Bob gets an emitter in the solar system.
pub fn attach_comet_trail_system(
    mut commands: Commands,
    query: Query<Entity, (Added<Player>, Without<CometTrail>)>,
) {
    for entity in query.iter() {
        commands.entity(entity).insert(CometTrail::default());
    }
}

/// Update the birth rate from Bob's speed and emit this frame's particles.
pub fn comet_emitter_system(
    mut commands: Commands,
    time: Res<Time>,
    config: Res<GameConfig>,
    live: Query<(), With<Particle>>,
    mut q_bob: Query<(&Transform, &Velocity, &mut CometTrail), With<Player>>,
) {
    let dt = time.delta_secs();
    let mut budget = config.comet_max_particles.saturating_sub(live.iter().count());

    for (transform, velocity, mut trail) in q_bob.iter_mut() {
        let speed = velocity.linvel.length();
        trail.birth_rate = birth_rate(
            speed,
            config.camera_fast_speed,
            config.comet_min_birth_rate,
            config.comet_max_birth_rate,
        );
        let (count, carry) = emission_count(
            trail.birth_rate,
            config.comet_emission_scale,
            dt,
            trail.carry,
        );
        trail.carry = carry;

        let count = (count as usize).min(budget);
        budget -= count;
        spawn_comet_particles(
            &mut commands,
            transform.translation.truncate(),
            velocity.linvel,
            count,
        );
    }
}

/// Brief translucent disc wherever the pointer lands or drags.
pub fn touch_ripple_system(
    mut commands: Commands,
    intent: Res<PointerIntent>,
    scene: Res<State<GameScene>>,
) {
    let radius = match scene.get() {
        GameScene::Game | GameScene::FreePlay => 80.0,
        GameScene::Tutorial | GameScene::End => 20.0,
        GameScene::Start | GameScene::Intro => return,
    };
    for point in [intent.tap, intent.drag].into_iter().flatten() {
        spawn_touch_ripple(&mut commands, point, radius);
    }
}

// ── Public spawn helpers ──────────────────────────────────────────────────────

/// Spawn `count` comet particles streaming behind a body moving at `velocity`.
pub fn spawn_comet_particles(commands: &mut Commands, pos: Vec2, velocity: Vec2, count: usize) {
    if count == 0 {
        return;
    }
    let mut rng = rand::thread_rng();
    let back = if velocity.length_squared() > 1e-6 {
        -velocity.normalize()
    } else {
        Vec2::NEG_Y
    };
    let base_angle = back.y.atan2(back.x);

    for _ in 0..count {
        let angle = base_angle + rng.gen_range(-0.30_f32..0.30_f32);
        let speed = rng.gen_range(20.0_f32..80.0_f32);
        let drift = Vec2::new(angle.cos(), angle.sin()) * speed;

        let warm = rng.gen_range(0.0_f32..1.0_f32);
        let color = Color::srgb(0.70 + 0.30 * warm, 0.85, 1.0 - 0.35 * warm);

        let lifetime = rng.gen_range(COMET_PARTICLE_LIFETIME.0..COMET_PARTICLE_LIFETIME.1);
        let lateral = Vec2::new(-back.y, back.x) * rng.gen_range(-6.0_f32..6.0_f32);

        commands.spawn((
            Particle::new(drift, lifetime, color, 1.0),
            Transform::from_translation((pos + lateral).extend(0.5)),
            Visibility::default(),
            SceneEntity,
        ));
    }
}

pub fn spawn_touch_ripple(commands: &mut Commands, pos: Vec2, radius: f32) {
    commands.spawn((
        Particle::new(Vec2::ZERO, 0.3, Color::WHITE, 0.2),
        Transform::from_translation(pos.extend(-0.5))
            .with_scale(Vec3::splat(radius / PARTICLE_RADIUS)),
        Visibility::default(),
        SceneEntity,
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emission_carries_fractional_particles() {
        // 100/s × 0.004 × 1 s = 0.4 particles: nothing yet, carry 0.4.
        let (n, carry) = emission_count(100.0, 0.004, 1.0, 0.0);
        assert_eq!(n, 0);
        assert!((carry - 0.4).abs() < 1e-5);
        // Another second pushes it over one.
        let (n, carry) = emission_count(100.0, 0.004, 1.0, carry);
        assert_eq!(n, 0);
        let (n, _) = emission_count(100.0, 0.004, 1.0, carry);
        assert_eq!(n, 1);
    }

    #[test]
    fn idle_emitter_emits_nothing_and_drops_carry() {
        assert_eq!(emission_count(0.0, 0.004, 0.016, 0.0), (0, 0.0));
    }

    #[test]
    fn alpha_fades_quadratically_from_peak() {
        let mut p = Particle::new(Vec2::ZERO, 1.0, Color::WHITE, 0.2);
        assert!((p.alpha() - 0.2).abs() < 1e-6);
        p.age = 0.5;
        assert!((p.alpha() - 0.05).abs() < 1e-6);
        p.age = 1.0;
        assert_eq!(p.alpha(), 0.0);
    }

    #[test]
    fn comet_particles_stream_backwards() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_systems(Update, |mut commands: Commands| {
            spawn_comet_particles(&mut commands, Vec2::ZERO, Vec2::new(300.0, 0.0), 5);
        });
        app.update();
        let mut q = app.world_mut().query::<&Particle>();
        let particles: Vec<&Particle> = q.iter(app.world()).collect();
        assert_eq!(particles.len(), 5);
        // Streaming backwards, against +X travel.
        assert!(particles.iter().all(|p| p.velocity.x < 0.0));
    }
}
