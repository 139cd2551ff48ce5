//! Centralised gameplay and tuning constants.
//!
//! All tuneable values live here so they can be found, reasoned-about, and
//! modified in one place without source-diving across multiple modules.
//! [`crate::config::GameConfig`] mirrors these as runtime defaults; the
//! planet table and field policies are fixed and only live here.
//!
//! ## Tuning guidance
//!
//! Values were carried over from the original touch-device build, whose
//! scene units are screen points.  Keep impulse intensities and the player
//! mass in proportion: halving the mass doubles every tap's velocity change.

// ── World ─────────────────────────────────────────────────────────────────────

/// Width and height of the square solar-system play area (world units).
/// The world origin sits at the centre of the area.
pub const WORLD_SIZE: f32 = 6000.0;

/// Default window size in logical pixels (portrait, like the phone build).
pub const WINDOW_WIDTH: u32 = 540;
pub const WINDOW_HEIGHT: u32 = 960;

// ── Planets ───────────────────────────────────────────────────────────────────

/// One row of the fixed solar-system roster.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanetSpec {
    pub name: &'static str,
    /// Surface gravity in m/s², used directly as the field strength base.
    pub surface_gravity: f32,
    pub position: (f32, f32),
    pub radius: f32,
}

/// Number of planets that must be discovered to complete the journey.
pub const PLANET_COUNT: usize = 8;

/// The planet that gets the tight, strong field policy.
pub const SPECIAL_PLANET: &str = "Jupiter";

/// Planet used as the respawn anchor before anything has been discovered.
pub const HOME_PLANET: &str = "Earth";

/// Ordered solar-system roster.  Order matters: ties in proximity queries are
/// resolved by it, and the progress strip is laid out in it.
pub const SOLAR_SYSTEM: [PlanetSpec; PLANET_COUNT] = [
    PlanetSpec {
        name: "Mercury",
        surface_gravity: 3.7,
        position: (-2250.0, 2300.0),
        radius: 30.0,
    },
    PlanetSpec {
        name: "Venus",
        surface_gravity: 8.87,
        position: (-650.0, 2050.0),
        radius: 45.0,
    },
    PlanetSpec {
        name: "Earth",
        surface_gravity: 9.8,
        position: (1350.0, 2350.0),
        radius: 50.0,
    },
    PlanetSpec {
        name: "Mars",
        surface_gravity: 3.711,
        position: (2450.0, 700.0),
        radius: 38.0,
    },
    PlanetSpec {
        name: "Jupiter",
        surface_gravity: 24.79,
        position: (-1700.0, -150.0),
        radius: 160.0,
    },
    PlanetSpec {
        name: "Saturn",
        surface_gravity: 10.44,
        position: (1150.0, -1100.0),
        radius: 110.0,
    },
    PlanetSpec {
        name: "Uranus",
        surface_gravity: 8.69,
        position: (-1500.0, -2450.0),
        radius: 75.0,
    },
    PlanetSpec {
        name: "Neptune",
        surface_gravity: 11.15,
        position: (2300.0, -2500.0),
        radius: 72.0,
    },
];

/// Field strength used for any planet missing from the gravity table.
pub const DEFAULT_SURFACE_GRAVITY: f32 = 1.0;

// ── Gravity field policies ────────────────────────────────────────────────────

/// Jupiter: region radius = planet radius × 10, strength = gravity × 1.
pub const SPECIAL_FIELD_RADIUS_FACTOR: f32 = 10.0;
pub const SPECIAL_FIELD_FALLOFF: f32 = 0.005;
pub const SPECIAL_FIELD_STRENGTH_FACTOR: f32 = 1.0;

/// Every other planet: region radius = planet radius × 20, strength = gravity × 2.
pub const STANDARD_FIELD_RADIUS_FACTOR: f32 = 20.0;
pub const STANDARD_FIELD_FALLOFF: f32 = 0.001;
pub const STANDARD_FIELD_STRENGTH_FACTOR: f32 = 2.0;

/// World-space acceleration (u/s²) produced by one unit of field strength.
///
/// Rapier has no radial field node, so the adapter scales strength by this.
/// At 15.0 Earth's field (strength 19.6) pulls at ~294 u/s².
pub const FIELD_ACCELERATION_SCALE: f32 = 15.0;

/// Distances below this are clamped before the falloff exponent is applied.
pub const FIELD_MIN_DISTANCE: f32 = 1.0;

// ── Impulses ──────────────────────────────────────────────────────────────────

/// Main game: tap / drag impulse intensity.
pub const GAME_TOUCH_INTENSITY: f32 = 200.0;
pub const GAME_DRAG_INTENSITY: f32 = 40.0;

/// Tutorial box: gentler taps so the first contact with the controls is calm.
pub const TUTORIAL_TOUCH_INTENSITY: f32 = 20.0;
pub const TUTORIAL_DRAG_INTENSITY: f32 = 3.0;

/// End credits box.
pub const END_TOUCH_INTENSITY: f32 = 40.0;
pub const END_DRAG_INTENSITY: f32 = 10.0;

// ── Player ────────────────────────────────────────────────────────────────────

/// Radius (u) of Bob's ball collider in the solar system.
pub const PLAYER_RADIUS: f32 = 30.0;

/// Radius (u) of Bob in the small tutorial / end boxes.
pub const PLAYER_BOX_RADIUS: f32 = 12.0;

/// Bob's mass.  Impulse 200 on mass 0.5 yields a 400 u/s kick.
pub const PLAYER_MASS: f32 = 0.5;

/// Angular damping on Bob's body.
pub const PLAYER_ANGULAR_DAMPING: f32 = 8.0;

/// Restitution for Bob bouncing off planets and walls.
pub const PLAYER_RESTITUTION: f32 = 0.6;

/// First-touch entrance: pause before the hop, and the hop duration.
pub const ENTRANCE_PAUSE_SECS: f32 = 0.3;
pub const ENTRANCE_HOP_SECS: f32 = 1.0;

/// Orientation offset added to the bearing toward the nearest planet (degrees).
pub const FACING_OFFSET_DEG: f32 = -270.0;

/// Seconds for the facing rotation to settle.
pub const FACING_EASE_SECS: f32 = 0.19;

// ── Trail ─────────────────────────────────────────────────────────────────────

/// Maximum number of recorded trail positions.
pub const TRAIL_CAPACITY: usize = 20;

/// Seconds between trail samples.
pub const TRAIL_SAMPLE_SECS: f32 = 1.0;

/// Seconds a trail snapshot stays fully opaque, then seconds to fade out.
pub const TRAIL_HOLD_SECS: f32 = 2.0;
pub const TRAIL_FADE_SECS: f32 = 1.0;

// ── Camera ────────────────────────────────────────────────────────────────────

/// Orthographic scale before the first contact (shows most of the system).
pub const CAMERA_INITIAL_SCALE: f32 = 7.0;

/// Scale the camera settles to once Bob has been idle long enough.
pub const CAMERA_SETTLED_SCALE: f32 = 0.8;

/// Seconds over which the settle zoom is eased.
pub const CAMERA_SETTLE_SECS: f32 = 1.5;

/// Speed (u/s) above which Bob counts as "moving fast".
pub const CAMERA_FAST_SPEED: f32 = 10.0;

/// Seconds without fast movement before the camera settles.
pub const CAMERA_IDLE_SECS: f32 = 1.5;

/// Seconds over which the distance-driven zoom is eased.
pub const CAMERA_ZOOM_EASE_SECS: f32 = 0.5;

/// Seconds over which the camera re-centres on Bob.
pub const CAMERA_FOLLOW_EASE_SECS: f32 = 0.5;

/// Floor for the distance-driven zoom; the raw formula goes non-positive for
/// closely spaced planet pairs.
pub const CAMERA_MIN_SCALE: f32 = 0.1;

/// Constant subtracted in the zoom formula `(D + S/4) / S − 2.5`.
pub const CAMERA_ZOOM_BIAS: f32 = 2.5;

// ── Presentation delays ───────────────────────────────────────────────────────

/// Seconds between the journey completing and the exit control appearing.
pub const EXIT_REVEAL_DELAY_SECS: f32 = 4.0;

/// Seconds before the tutorial's Next control appears.
pub const TUTORIAL_NEXT_DELAY_SECS: f32 = 5.0;

/// Seconds a planet info panel stays on screen.
pub const INFO_PANEL_SECS: f32 = 20.0;

/// Seconds between successive end-credit paragraphs.
pub const END_TEXT_STAGGER_SECS: f32 = 2.5;

// ── Comet trail ───────────────────────────────────────────────────────────────

/// Particle birth rate at the fast-movement threshold, and the rate reached
/// 1000 u/s above it.
pub const COMET_MIN_BIRTH_RATE: f32 = 100.0;
pub const COMET_MAX_BIRTH_RATE: f32 = 40_000.0;

/// Fraction of the nominal birth rate actually spawned as ECS particles.
pub const COMET_EMISSION_SCALE: f32 = 0.004;

/// Upper bound on live comet particles.
pub const COMET_MAX_PARTICLES: usize = 400;

/// Lifetime range of a comet particle (s).
pub const COMET_PARTICLE_LIFETIME: (f32, f32) = (0.4, 0.9);

// ── Freeplay ──────────────────────────────────────────────────────────────────

/// Number of generated planets in freeplay.
pub const FREEPLAY_PLANET_COUNT: usize = 12;

/// Generated planet diameter range.
pub const FREEPLAY_MIN_SIZE: f32 = 50.0;
pub const FREEPLAY_MAX_SIZE: f32 = 150.0;

/// Upper bound of the generated planet mass (lower bound is the size).
pub const FREEPLAY_MAX_MASS: f32 = 1000.0;

// ── Tutorial / end boxes ──────────────────────────────────────────────────────

/// Half-extents of the walled box Bob bounces around in outside the solar system.
pub const BOX_HALF_WIDTH: f32 = 250.0;
pub const BOX_HALF_HEIGHT: f32 = 450.0;
