//! Runtime game configuration loaded from `assets/game.toml`.
//!
//! [`GameConfig`] is a Bevy [`Resource`] that mirrors the tunable constants in
//! [`crate::constants`].  At startup, [`load_game_config`] reads
//! `assets/game.toml` and overwrites the defaults with any values present in
//! the file.  Missing keys fall back to the compile-time defaults, so a minimal
//! TOML can override just the values you care about:
//!
//! ```toml
//! camera_min_scale = 0.2
//!
//! [game_impulse]
//! touch = 260.0
//! ```
//!
//! Keep `src/constants.rs` in sync: it remains the **authoritative default**
//! source used by `GameConfig::default()`.

use crate::constants::*;
use crate::error::{validate_non_negative, validate_positive, GameError, GameResult};
use bevy::prelude::*;
use serde::Deserialize;

/// Tap and drag intensities for one scene.
///
/// Every scene that lets the player push Bob around owns one of these, so
/// tuning lives here rather than at each input call site.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ImpulseProfile {
    /// Intensity of the impulse applied when a touch begins.
    pub touch: f32,
    /// Intensity of the impulse applied for each drag event.
    pub drag: f32,
}

impl ImpulseProfile {
    pub const fn new(touch: f32, drag: f32) -> Self {
        Self { touch, drag }
    }
}

impl Default for ImpulseProfile {
    fn default() -> Self {
        Self::new(GAME_TOUCH_INTENSITY, GAME_DRAG_INTENSITY)
    }
}

/// Runtime-tunable gameplay configuration.
///
/// All fields default to the corresponding compile-time constant from
/// `src/constants.rs`.  Override any subset in `assets/game.toml`.
#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // ── Window ───────────────────────────────────────────────────────────────
    pub window_width: u32,
    pub window_height: u32,

    // ── Impulses ─────────────────────────────────────────────────────────────
    pub game_impulse: ImpulseProfile,
    pub tutorial_impulse: ImpulseProfile,
    pub end_impulse: ImpulseProfile,
    pub freeplay_impulse: ImpulseProfile,

    // ── Player ───────────────────────────────────────────────────────────────
    pub player_radius: f32,
    pub player_box_radius: f32,
    pub player_mass: f32,
    pub player_angular_damping: f32,
    pub player_restitution: f32,
    pub entrance_pause_secs: f32,
    pub entrance_hop_secs: f32,
    pub facing_offset_deg: f32,
    pub facing_ease_secs: f32,

    // ── Gravity adapter ──────────────────────────────────────────────────────
    pub field_acceleration_scale: f32,
    pub field_min_distance: f32,

    // ── Trail ────────────────────────────────────────────────────────────────
    pub trail_capacity: usize,
    pub trail_sample_secs: f32,
    pub trail_hold_secs: f32,
    pub trail_fade_secs: f32,

    // ── Camera ───────────────────────────────────────────────────────────────
    pub camera_initial_scale: f32,
    pub camera_settled_scale: f32,
    pub camera_settle_secs: f32,
    pub camera_fast_speed: f32,
    pub camera_idle_secs: f32,
    pub camera_zoom_ease_secs: f32,
    pub camera_follow_ease_secs: f32,
    pub camera_min_scale: f32,

    // ── Presentation delays ──────────────────────────────────────────────────
    pub exit_reveal_delay_secs: f32,
    pub tutorial_next_delay_secs: f32,
    pub info_panel_secs: f32,
    pub end_text_stagger_secs: f32,

    // ── Comet trail ──────────────────────────────────────────────────────────
    pub comet_min_birth_rate: f32,
    pub comet_max_birth_rate: f32,
    pub comet_emission_scale: f32,
    pub comet_max_particles: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            // Window
            window_width: WINDOW_WIDTH,
            window_height: WINDOW_HEIGHT,
            // Impulses
            game_impulse: ImpulseProfile::new(GAME_TOUCH_INTENSITY, GAME_DRAG_INTENSITY),
            tutorial_impulse: ImpulseProfile::new(
                TUTORIAL_TOUCH_INTENSITY,
                TUTORIAL_DRAG_INTENSITY,
            ),
            end_impulse: ImpulseProfile::new(END_TOUCH_INTENSITY, END_DRAG_INTENSITY),
            freeplay_impulse: ImpulseProfile::new(GAME_TOUCH_INTENSITY, GAME_DRAG_INTENSITY),
            // Player
            player_radius: PLAYER_RADIUS,
            player_box_radius: PLAYER_BOX_RADIUS,
            player_mass: PLAYER_MASS,
            player_angular_damping: PLAYER_ANGULAR_DAMPING,
            player_restitution: PLAYER_RESTITUTION,
            entrance_pause_secs: ENTRANCE_PAUSE_SECS,
            entrance_hop_secs: ENTRANCE_HOP_SECS,
            facing_offset_deg: FACING_OFFSET_DEG,
            facing_ease_secs: FACING_EASE_SECS,
            // Gravity adapter
            field_acceleration_scale: FIELD_ACCELERATION_SCALE,
            field_min_distance: FIELD_MIN_DISTANCE,
            // Trail
            trail_capacity: TRAIL_CAPACITY,
            trail_sample_secs: TRAIL_SAMPLE_SECS,
            trail_hold_secs: TRAIL_HOLD_SECS,
            trail_fade_secs: TRAIL_FADE_SECS,
            // Camera
            camera_initial_scale: CAMERA_INITIAL_SCALE,
            camera_settled_scale: CAMERA_SETTLED_SCALE,
            camera_settle_secs: CAMERA_SETTLE_SECS,
            camera_fast_speed: CAMERA_FAST_SPEED,
            camera_idle_secs: CAMERA_IDLE_SECS,
            camera_zoom_ease_secs: CAMERA_ZOOM_EASE_SECS,
            camera_follow_ease_secs: CAMERA_FOLLOW_EASE_SECS,
            camera_min_scale: CAMERA_MIN_SCALE,
            // Presentation delays
            exit_reveal_delay_secs: EXIT_REVEAL_DELAY_SECS,
            tutorial_next_delay_secs: TUTORIAL_NEXT_DELAY_SECS,
            info_panel_secs: INFO_PANEL_SECS,
            end_text_stagger_secs: END_TEXT_STAGGER_SECS,
            // Comet trail
            comet_min_birth_rate: COMET_MIN_BIRTH_RATE,
            comet_max_birth_rate: COMET_MAX_BIRTH_RATE,
            comet_emission_scale: COMET_EMISSION_SCALE,
            comet_max_particles: COMET_MAX_PARTICLES,
        }
    }
}

impl GameConfig {
    /// Check every value whose misconfiguration would break an invariant at
    /// runtime (NaN impulses, non-positive zoom, an empty trail).
    pub fn validate(&self) -> GameResult<()> {
        for (name, profile) in [
            ("game_impulse", self.game_impulse),
            ("tutorial_impulse", self.tutorial_impulse),
            ("end_impulse", self.end_impulse),
            ("freeplay_impulse", self.freeplay_impulse),
        ] {
            validate_non_negative(name, profile.touch)?;
            validate_non_negative(name, profile.drag)?;
        }
        validate_positive("player_radius", self.player_radius)?;
        validate_positive("player_box_radius", self.player_box_radius)?;
        validate_positive("player_mass", self.player_mass)?;
        validate_non_negative("entrance_pause_secs", self.entrance_pause_secs)?;
        validate_positive("entrance_hop_secs", self.entrance_hop_secs)?;
        validate_non_negative("facing_ease_secs", self.facing_ease_secs)?;
        validate_non_negative("field_acceleration_scale", self.field_acceleration_scale)?;
        validate_positive("field_min_distance", self.field_min_distance)?;
        if self.trail_capacity < 2 {
            return Err(GameError::UnsafeConstant {
                name: "trail_capacity",
                value: self.trail_capacity as f32,
                safe_range: "[2, ∞)",
            });
        }
        validate_positive("trail_sample_secs", self.trail_sample_secs)?;
        validate_non_negative("trail_hold_secs", self.trail_hold_secs)?;
        validate_non_negative("trail_fade_secs", self.trail_fade_secs)?;
        validate_positive("camera_initial_scale", self.camera_initial_scale)?;
        validate_positive("camera_settled_scale", self.camera_settled_scale)?;
        validate_positive("camera_min_scale", self.camera_min_scale)?;
        validate_non_negative("camera_idle_secs", self.camera_idle_secs)?;
        validate_non_negative("exit_reveal_delay_secs", self.exit_reveal_delay_secs)?;
        validate_non_negative("comet_emission_scale", self.comet_emission_scale)?;
        Ok(())
    }
}

/// Parse a TOML document into a validated [`GameConfig`].
pub fn parse_game_config(contents: &str) -> Result<GameConfig, String> {
    let config = toml::from_str::<GameConfig>(contents).map_err(|e| e.to_string())?;
    config.validate().map_err(|e| e.to_string())?;
    Ok(config)
}

/// Startup system: attempt to load `assets/game.toml` and overwrite the
/// `GameConfig` resource with any values present in the file.
///
/// Missing keys retain their compiled defaults.  Parse or validation errors
/// are logged but do not abort the game.  A missing file is not an error.
pub fn load_game_config(mut config: ResMut<GameConfig>) {
    let path = "assets/game.toml";
    match std::fs::read_to_string(path) {
        Ok(contents) => match parse_game_config(&contents) {
            Ok(loaded) => {
                *config = loaded;
                info!("[config] Loaded game config from {path}");
            }
            Err(e) => {
                warn!("[config] Failed to load {path}: {e}; using defaults");
            }
        },
        Err(_) => {
            info!("[config] No {path} found; using compiled defaults");
        }
    }
}
