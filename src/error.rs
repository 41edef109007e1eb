//! Game-specific error types.
//!
//! Geometry constructors and config validation return these instead of
//! panicking, so a bad `assets/game.toml` degrades to the compiled defaults
//! rather than crashing the game.
//!
//! ## Usage
//!
//! ```rust
//! use hadron::error::{GameError, GameResult};
//! use hadron::track::Track;
//! use bevy::math::Vec2;
//!
//! fn build() -> GameResult<Track> {
//!     Track::new(Vec2::ZERO, 200.0, 120.0)
//! }
//! assert!(build().is_ok());
//! ```

use std::fmt;

/// Top-level error enum for the game.
#[derive(Debug)]
pub enum GameError {
    /// Track geometry would put the inner wall at or below the centre, or has
    /// a non-positive width.
    InvalidTrack {
        center_radius: f32,
        width: f32,
    },

    /// A wall shape cannot produce a closed boundary.
    InvalidWallShape {
        /// Which wall was being built (`"inner"` / `"outer"`).
        wall: &'static str,
        reason: String,
    },

    /// Orbit limits are inconsistent: the wall margins leave no room to orbit,
    /// or the minimum speed exceeds the maximum.
    InvalidOrbitLimits {
        reason: String,
    },

    /// A tuning value is not finite or has the wrong sign.
    InvalidTuning {
        /// Config key of the offending value.
        field: &'static str,
        reason: String,
    },

    /// The config file exists but could not be read.
    ConfigRead {
        path: String,
        source: std::io::Error,
    },

    /// The config file is not valid TOML for [`crate::config::GameConfig`].
    ConfigParse {
        path: String,
        source: toml::de::Error,
    },
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::InvalidTrack {
                center_radius,
                width,
            } => write!(
                f,
                "invalid track: centre radius {} with width {} (need width > 0 and \
                 centre radius > width / 2)",
                center_radius, width
            ),
            GameError::InvalidWallShape { wall, reason } => {
                write!(f, "invalid {} wall shape: {}", wall, reason)
            }
            GameError::InvalidOrbitLimits { reason } => {
                write!(f, "invalid orbit limits: {}", reason)
            }
            GameError::InvalidTuning { field, reason } => {
                write!(f, "invalid {}: {}", field, reason)
            }
            GameError::ConfigRead { path, source } => {
                write!(f, "failed to read {}: {}", path, source)
            }
            GameError::ConfigParse { path, source } => {
                write!(f, "failed to parse {}: {}", path, source)
            }
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::ConfigRead { source, .. } => Some(source),
            GameError::ConfigParse { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience alias: a `Result` using `GameError` as the error type.
pub type GameResult<T> = Result<T, GameError>;
