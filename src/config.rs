//! Runtime game configuration loaded from `assets/game.toml`.
//!
//! [`GameConfig`] is a Bevy [`Resource`] that mirrors every constant in
//! [`crate::constants`].  At startup, [`load_game_config`] reads the TOML file
//! and overwrites the defaults with any values present in it.  Missing keys
//! fall back to the compile-time defaults, so a minimal TOML can override just
//! the values you care about:
//!
//! ```toml
//! player_mode = "orbital"
//! track_width = 160.0
//! outer_wall = { kind = "segmented", segments = 48 }
//! ```
//!
//! The path defaults to `assets/game.toml` and can be overridden with the
//! `HADRON_CONFIG` environment variable.
//!
//! Keep `src/constants.rs` in sync: it remains the **authoritative default**
//! source used by `GameConfig::default()`.

use crate::constants::*;
use crate::error::{GameError, GameResult};
use crate::track::{Track, WallShape, WallSide};
use bevy::prelude::*;
use serde::Deserialize;

pub const DEFAULT_CONFIG_PATH: &str = "assets/game.toml";
pub const CONFIG_PATH_ENV: &str = "HADRON_CONFIG";

/// Which players are spawned into the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerMode {
    Orbital,
    Roller,
    #[default]
    Both,
}

impl PlayerMode {
    pub fn has_orbital(self) -> bool {
        matches!(self, PlayerMode::Orbital | PlayerMode::Both)
    }

    pub fn has_roller(self) -> bool {
        matches!(self, PlayerMode::Roller | PlayerMode::Both)
    }
}

/// Runtime-tunable track, player and cosmetic configuration.
///
/// All fields default to the corresponding compile-time constant from
/// `src/constants.rs`.
#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // ── Scene ─────────────────────────────────────────────────────────────────
    pub player_mode: PlayerMode,
    pub show_debug_hud: bool,
    pub show_wall_outlines: bool,
    /// Adds Rapier's collider debug renderer.
    pub physics_debug: bool,

    // ── Track ─────────────────────────────────────────────────────────────────
    pub track_center_radius: f32,
    pub track_width: f32,

    // ── Walls ─────────────────────────────────────────────────────────────────
    pub inner_wall: WallShape,
    pub outer_wall: WallShape,
    pub wall_segment_thickness: f32,
    pub box_wall_thickness: f32,

    // ── Players ───────────────────────────────────────────────────────────────
    pub player_radius: f32,
    pub player_restitution: f32,

    // ── Orbital ───────────────────────────────────────────────────────────────
    pub orbit_start_speed: f32,
    pub orbit_max_speed: f32,
    pub orbit_min_speed: f32,
    pub orbit_speed_step: f32,
    pub orbit_speed_decay: f32,
    pub orbit_radius_step: f32,
    pub orbit_wall_margin: f32,
    pub orbit_velocity_gain: f32,
    pub orbital_friction: f32,
    pub orbital_linear_damping: f32,

    // ── Roller ────────────────────────────────────────────────────────────────
    pub roller_move_force: f32,
    pub roller_spin_step: f32,
    pub roller_spin_repeat_secs: f32,
    pub roller_max_speed: f32,
    pub roller_max_angvel: f32,
    pub roller_spin_kick: f32,
    pub roller_friction: f32,
    pub roller_linear_damping: f32,

    // ── Cosmetics ─────────────────────────────────────────────────────────────
    pub pulse_peak_scale: f32,
    pub pulse_half_duration: f32,
    pub hud_font_size: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            // Scene
            player_mode: PlayerMode::default(),
            show_debug_hud: true,
            show_wall_outlines: true,
            physics_debug: false,
            // Track
            track_center_radius: TRACK_CENTER_RADIUS,
            track_width: TRACK_WIDTH,
            // Walls
            inner_wall: WallShape::Circle,
            outer_wall: WallShape::Box { size: None },
            wall_segment_thickness: WALL_SEGMENT_THICKNESS,
            box_wall_thickness: BOX_WALL_THICKNESS,
            // Players
            player_radius: PLAYER_RADIUS,
            player_restitution: PLAYER_RESTITUTION,
            // Orbital
            orbit_start_speed: ORBIT_START_SPEED,
            orbit_max_speed: ORBIT_MAX_SPEED,
            orbit_min_speed: ORBIT_MIN_SPEED,
            orbit_speed_step: ORBIT_SPEED_STEP,
            orbit_speed_decay: ORBIT_SPEED_DECAY,
            orbit_radius_step: ORBIT_RADIUS_STEP,
            orbit_wall_margin: ORBIT_WALL_MARGIN,
            orbit_velocity_gain: ORBIT_VELOCITY_GAIN,
            orbital_friction: ORBITAL_FRICTION,
            orbital_linear_damping: ORBITAL_LINEAR_DAMPING,
            // Roller
            roller_move_force: ROLLER_MOVE_FORCE,
            roller_spin_step: ROLLER_SPIN_STEP,
            roller_spin_repeat_secs: ROLLER_SPIN_REPEAT_SECS,
            roller_max_speed: ROLLER_MAX_SPEED,
            roller_max_angvel: ROLLER_MAX_ANGVEL,
            roller_spin_kick: ROLLER_SPIN_KICK,
            roller_friction: ROLLER_FRICTION,
            roller_linear_damping: ROLLER_LINEAR_DAMPING,
            // Cosmetics
            pulse_peak_scale: PULSE_PEAK_SCALE,
            pulse_half_duration: PULSE_HALF_DURATION,
            hud_font_size: HUD_FONT_SIZE,
        }
    }
}

impl GameConfig {
    /// Build the track described by this config, centred on the origin.
    pub fn track(&self) -> GameResult<Track> {
        Track::new(Vec2::ZERO, self.track_center_radius, self.track_width)
    }

    /// Every numeric tuning value, keyed by its TOML name.
    fn numeric_fields(&self) -> [(&'static str, f32); 27] {
        [
            ("track_center_radius", self.track_center_radius),
            ("track_width", self.track_width),
            ("wall_segment_thickness", self.wall_segment_thickness),
            ("box_wall_thickness", self.box_wall_thickness),
            ("player_radius", self.player_radius),
            ("player_restitution", self.player_restitution),
            ("orbit_start_speed", self.orbit_start_speed),
            ("orbit_max_speed", self.orbit_max_speed),
            ("orbit_min_speed", self.orbit_min_speed),
            ("orbit_speed_step", self.orbit_speed_step),
            ("orbit_speed_decay", self.orbit_speed_decay),
            ("orbit_radius_step", self.orbit_radius_step),
            ("orbit_wall_margin", self.orbit_wall_margin),
            ("orbit_velocity_gain", self.orbit_velocity_gain),
            ("orbital_friction", self.orbital_friction),
            ("orbital_linear_damping", self.orbital_linear_damping),
            ("roller_move_force", self.roller_move_force),
            ("roller_spin_step", self.roller_spin_step),
            ("roller_spin_repeat_secs", self.roller_spin_repeat_secs),
            ("roller_max_speed", self.roller_max_speed),
            ("roller_max_angvel", self.roller_max_angvel),
            ("roller_spin_kick", self.roller_spin_kick),
            ("roller_friction", self.roller_friction),
            ("roller_linear_damping", self.roller_linear_damping),
            ("pulse_peak_scale", self.pulse_peak_scale),
            ("pulse_half_duration", self.pulse_half_duration),
            ("hud_font_size", self.hud_font_size),
        ]
    }

    /// Reject configurations that would break the track or the controllers.
    ///
    /// Every numeric value must be finite; limits, steps, durations and
    /// physical sizes must not be negative.
    pub fn validate(&self) -> GameResult<()> {
        for (field, value) in self.numeric_fields() {
            if !value.is_finite() {
                return Err(GameError::InvalidTuning {
                    field,
                    reason: format!("{value} is not a finite number"),
                });
            }
        }
        for (field, value) in [
            ("wall_segment_thickness", self.wall_segment_thickness),
            ("box_wall_thickness", self.box_wall_thickness),
            ("player_radius", self.player_radius),
            ("player_restitution", self.player_restitution),
            ("orbit_speed_step", self.orbit_speed_step),
            ("orbit_radius_step", self.orbit_radius_step),
            ("orbit_wall_margin", self.orbit_wall_margin),
            ("orbit_velocity_gain", self.orbit_velocity_gain),
            ("orbital_friction", self.orbital_friction),
            ("orbital_linear_damping", self.orbital_linear_damping),
            ("roller_spin_repeat_secs", self.roller_spin_repeat_secs),
            ("roller_max_speed", self.roller_max_speed),
            ("roller_max_angvel", self.roller_max_angvel),
            ("roller_spin_kick", self.roller_spin_kick),
            ("roller_friction", self.roller_friction),
            ("roller_linear_damping", self.roller_linear_damping),
            ("pulse_half_duration", self.pulse_half_duration),
        ] {
            if value < 0.0 {
                return Err(GameError::InvalidTuning {
                    field,
                    reason: format!("must not be negative, got {value}"),
                });
            }
        }
        if self.player_radius <= 0.0 {
            return Err(GameError::InvalidTuning {
                field: "player_radius",
                reason: format!("must be positive, got {}", self.player_radius),
            });
        }

        let track = self.track()?;
        self.inner_wall
            .validate(WallSide::Inner, track.inner_radius())?;
        self.outer_wall
            .validate(WallSide::Outer, track.outer_radius())?;

        if 2.0 * self.orbit_wall_margin >= self.track_width {
            return Err(GameError::InvalidOrbitLimits {
                reason: format!(
                    "wall margin {} leaves no room on a track {} wide",
                    self.orbit_wall_margin, self.track_width
                ),
            });
        }
        if !(self.orbit_min_speed >= 0.0) || self.orbit_min_speed > self.orbit_max_speed {
            return Err(GameError::InvalidOrbitLimits {
                reason: format!(
                    "min speed {} must lie in [0, max speed {}]",
                    self.orbit_min_speed, self.orbit_max_speed
                ),
            });
        }
        if !(0.0..=1.0).contains(&self.orbit_speed_decay) {
            return Err(GameError::InvalidOrbitLimits {
                reason: format!("speed decay {} must lie in [0, 1]", self.orbit_speed_decay),
            });
        }
        Ok(())
    }

    /// Parse a config from TOML text and validate it.
    pub fn from_toml_str(path: &str, contents: &str) -> GameResult<Self> {
        let config: GameConfig = toml::from_str(contents).map_err(|source| GameError::ConfigParse {
            path: path.to_string(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate the file at `path`.
    ///
    /// Returns `Ok(None)` when the file does not exist.
    pub fn load(path: &str) -> GameResult<Option<Self>> {
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_toml_str(path, &contents).map(Some),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(GameError::ConfigRead {
                path: path.to_string(),
                source,
            }),
        }
    }
}

/// Config file path: `$HADRON_CONFIG` if set, else `assets/game.toml`.
pub fn config_path() -> String {
    std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string())
}

/// Startup system: attempt to load the config file and overwrite the
/// `GameConfig` resource with it.
///
/// A missing file is not an error (defaults are already in place from
/// `insert_resource`).  Read, parse and validation failures are logged and
/// the compiled defaults are kept.
pub fn load_game_config(mut config: ResMut<GameConfig>) {
    let path = config_path();
    match GameConfig::load(&path) {
        Ok(Some(loaded)) => {
            *config = loaded;
            info!("Loaded game config from {path}");
        }
        Ok(None) => info!("No {path} found; using compiled defaults"),
        Err(e) => warn!("{e}; using defaults"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        GameConfig::default().validate().unwrap();
    }

    #[test]
    fn wider_track_keeps_the_default_box_valid() {
        let config = GameConfig {
            track_width: 200.0,
            ..Default::default()
        };
        config.validate().unwrap();
    }

    #[test]
    fn partial_toml_overrides_only_named_keys() {
        let config = GameConfig::from_toml_str(
            "test.toml",
            "player_mode = \"roller\"\ntrack_width = 160.0\n",
        )
        .unwrap();
        assert_eq!(config.player_mode, PlayerMode::Roller);
        assert_eq!(config.track_width, 160.0);
        assert_eq!(config.orbit_max_speed, ORBIT_MAX_SPEED);
        assert!(!config.player_mode.has_orbital());
    }

    #[test]
    fn margin_wider_than_track_is_rejected() {
        let err = GameConfig::from_toml_str("test.toml", "orbit_wall_margin = 60.0\n").unwrap_err();
        assert!(matches!(err, GameError::InvalidOrbitLimits { .. }));
    }

    #[test]
    fn min_speed_above_max_is_rejected() {
        let err = GameConfig::from_toml_str(
            "test.toml",
            "orbit_min_speed = 4.0\norbit_max_speed = 3.0\n",
        )
        .unwrap_err();
        assert!(matches!(err, GameError::InvalidOrbitLimits { .. }));
    }

    #[test]
    fn non_finite_limits_are_rejected() {
        for toml in [
            "orbit_max_speed = nan\n",
            "orbit_wall_margin = nan\n",
            "orbit_min_speed = -inf\n",
            "roller_max_speed = inf\n",
            "player_radius = nan\n",
        ] {
            let err = GameConfig::from_toml_str("test.toml", toml).unwrap_err();
            assert!(
                matches!(err, GameError::InvalidTuning { .. }),
                "{toml:?} gave {err}"
            );
        }
    }

    #[test]
    fn negative_roller_caps_are_rejected() {
        for (toml, key) in [
            ("roller_max_angvel = -0.3\n", "roller_max_angvel"),
            ("roller_max_speed = -1.0\n", "roller_max_speed"),
            ("orbit_wall_margin = -5.0\n", "orbit_wall_margin"),
        ] {
            let err = GameConfig::from_toml_str("test.toml", toml).unwrap_err();
            assert!(
                matches!(err, GameError::InvalidTuning { field, .. } if field == key),
                "{toml:?} gave {err}"
            );
        }
    }

    #[test]
    fn accepted_configs_never_invert_controller_bounds() {
        use crate::player::{OrbitLimits, RollerTuning};

        // Zero caps are legal and must still give ordered clamp bounds.
        let config = GameConfig::from_toml_str(
            "test.toml",
            "roller_max_speed = 0.0\nroller_max_angvel = 0.0\norbit_min_speed = 0.0\n",
        )
        .unwrap();
        let limits = OrbitLimits::new(&config, &config.track().unwrap());
        assert!(limits.min_radius <= limits.max_radius);
        assert!(-limits.max_speed <= limits.max_speed);
        let tuning = RollerTuning::new(&config, 60.0);
        assert!(-tuning.max_angvel <= tuning.max_angvel);
        assert!(tuning.max_speed >= 0.0);
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = GameConfig::from_toml_str("test.toml", "track_width = \"wide\"").unwrap_err();
        assert!(matches!(err, GameError::ConfigParse { .. }));
    }

    #[test]
    fn shipped_config_matches_defaults() {
        let shipped =
            GameConfig::from_toml_str(DEFAULT_CONFIG_PATH, include_str!("../assets/game.toml"))
                .unwrap();
        let defaults = GameConfig::default();
        assert_eq!(shipped.player_mode, defaults.player_mode);
        assert_eq!(shipped.show_debug_hud, defaults.show_debug_hud);
        assert_eq!(shipped.show_wall_outlines, defaults.show_wall_outlines);
        assert_eq!(shipped.physics_debug, defaults.physics_debug);
        assert_eq!(shipped.inner_wall, defaults.inner_wall);
        assert_eq!(shipped.outer_wall, defaults.outer_wall);
        // Every numeric key, including the ones game.toml leaves out.
        for ((key, file), (_, compiled)) in
            shipped.numeric_fields().into_iter().zip(defaults.numeric_fields())
        {
            assert_eq!(file, compiled, "{key} differs from its compiled default");
        }
    }

    #[test]
    fn missing_file_is_not_an_error() {
        assert!(GameConfig::load("definitely/not/here.toml").unwrap().is_none());
    }
}
