//! Game-specific error types.
//!
//! Only scene setup and configuration loading can fail.  Once a scene is
//! running, every system is written to degrade quietly (zero impulse, no
//! nearest planet, clamped zoom) instead of erroring.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use crate::error::{GameError, GameResult};
//!
//! fn setup() -> GameResult<()> {
//!     let world = GameWorld::solar_system(&SOLAR_SYSTEM)?;
//!     Ok(())
//! }
//! ```

use std::fmt;

/// Top-level error enum for scene setup and configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum GameError {
    /// A planet required by the solar-system roster is missing.
    MissingPlanet {
        /// Name of the absent planet.
        name: String,
    },

    /// Two roster entries share the same planet id.
    DuplicatePlanet {
        /// The repeated name.
        name: String,
    },

    /// A planet was given a radius that cannot produce a collider or field.
    InvalidRadius {
        /// Planet name.
        name: String,
        /// The rejected radius.
        radius: f32,
    },

    /// Configuration value is outside its safe operating range.
    UnsafeConstant {
        /// Name of the setting (for logging).
        name: &'static str,
        /// The value that was rejected.
        value: f32,
        /// Human-readable description of the safe range.
        safe_range: &'static str,
    },
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::MissingPlanet { name } => {
                write!(f, "planet '{}' is missing from the roster", name)
            }
            GameError::DuplicatePlanet { name } => {
                write!(f, "planet '{}' appears more than once in the roster", name)
            }
            GameError::InvalidRadius { name, radius } => write!(
                f,
                "planet '{}' has invalid radius {} (must be finite and > 0)",
                name, radius
            ),
            GameError::UnsafeConstant {
                name,
                value,
                safe_range,
            } => write!(
                f,
                "setting '{}' = {} is outside safe range {}",
                name, value, safe_range
            ),
        }
    }
}

impl std::error::Error for GameError {}

/// Convenience alias: a `Result` using `GameError` as the error type.
pub type GameResult<T> = Result<T, GameError>;

// ── Validation helpers ────────────────────────────────────────────────────────

/// Returns an error unless `value` is finite and strictly positive.
pub fn validate_positive(name: &'static str, value: f32) -> GameResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(GameError::UnsafeConstant {
            name,
            value,
            safe_range: "(0.0, ∞)",
        })
    }
}

/// Returns an error unless `value` is finite and not negative.
pub fn validate_non_negative(name: &'static str, value: f32) -> GameResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(GameError::UnsafeConstant {
            name,
            value,
            safe_range: "[0.0, ∞)",
        })
    }
}
