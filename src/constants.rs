//! Centralised gameplay and physics constants.
//!
//! All tuneable values live here so they can be found, reasoned-about, and
//! modified in one place without source-diving across multiple modules.
//! [`crate::config::GameConfig::default`] is built from these values, and
//! `assets/game.toml` can override any of them at startup.
//!
//! ## Units
//!
//! Controller values that were tuned frame-by-frame are expressed **per fixed
//! tick**; the controllers run in `FixedUpdate` at [`FIXED_TICK_HZ`].  World
//! units are pixels (`pixels_per_meter(1.0)`), y-up.

// ── Window ────────────────────────────────────────────────────────────────────

pub const WINDOW_WIDTH: u32 = 800;
pub const WINDOW_HEIGHT: u32 = 600;

/// Fixed-timestep rate for the motion controllers (ticks per second).
pub const FIXED_TICK_HZ: f64 = 60.0;

// ── Track ─────────────────────────────────────────────────────────────────────

/// Radius of the track's centre line (world units).
pub const TRACK_CENTER_RADIUS: f32 = 200.0;

/// Full width of the track between the inner and outer walls.
///
/// Inner wall sits at `TRACK_CENTER_RADIUS − TRACK_WIDTH / 2` (140),
/// outer wall at `TRACK_CENTER_RADIUS + TRACK_WIDTH / 2` (260).
pub const TRACK_WIDTH: f32 = 120.0;

// ── Walls ─────────────────────────────────────────────────────────────────────

/// Thickness of a discrete wall segment collider when approximating a circle.
pub const WALL_SEGMENT_THICKNESS: f32 = 8.0;

/// Number of chords used by a segmented circular wall.
pub const WALL_SEGMENT_COUNT: usize = 32;

/// Thickness of each side of a box wall.
pub const BOX_WALL_THICKNESS: f32 = 20.0;

/// Smallest segment count that still encloses an area.
pub const MIN_WALL_SEGMENTS: usize = 3;

/// Outline stroke width for drawn walls (gizmo line width).
pub const WALL_LINE_WIDTH: f32 = 4.0;

// ── Players: shared ───────────────────────────────────────────────────────────

/// Collider and visual radius of both player particles.
pub const PLAYER_RADIUS: f32 = 8.0;

/// Marble-like bounciness off walls.
pub const PLAYER_RESTITUTION: f32 = 0.95;

// ── Orbital player ────────────────────────────────────────────────────────────

/// Orbit speed (angular lead in radians per tick) the orbital starts with.
pub const ORBIT_START_SPEED: f32 = 0.1;

/// Upper bound on `|orbit_speed|`.
pub const ORBIT_MAX_SPEED: f32 = 3.0;

/// Idle decay never lets `|orbit_speed|` fall below this.
pub const ORBIT_MIN_SPEED: f32 = 0.1;

/// Additive change to orbit speed per tick while Up/Down is held.
pub const ORBIT_SPEED_STEP: f32 = 0.001;

/// Multiplicative decay applied to orbit speed per idle tick.
pub const ORBIT_SPEED_DECAY: f32 = 0.95;

/// Change to orbit radius per tick while Left/Right is held.
pub const ORBIT_RADIUS_STEP: f32 = 5.0;

/// Distance kept between the orbit and either wall.
pub const ORBIT_WALL_MARGIN: f32 = 20.0;

/// Fraction of the position→target gap covered per tick.
pub const ORBIT_VELOCITY_GAIN: f32 = 0.08;

pub const ORBITAL_FRICTION: f32 = 0.01;

/// Linear damping (1/s); roughly a 1% per-tick air drag at 60 Hz.
pub const ORBITAL_LINEAR_DAMPING: f32 = 0.6;

// ── Roller player ─────────────────────────────────────────────────────────────

/// Force applied per held WASD key (world units, Rapier scale 1.0).
pub const ROLLER_MOVE_FORCE: f32 = 60_000.0;

/// Angular velocity added per Q/E repeat (radians per tick).
pub const ROLLER_SPIN_STEP: f32 = 0.05;

/// Minimum interval between two Q/E spin repeats while the key is held.
pub const ROLLER_SPIN_REPEAT_SECS: f32 = 0.05;

/// Linear speed cap (world units per tick).
pub const ROLLER_MAX_SPEED: f32 = 10.0;

/// Angular speed cap (radians per tick).
pub const ROLLER_MAX_ANGVEL: f32 = 0.3;

/// Full width of the random spin kick on a wall hit (radians per tick).
/// The kick is drawn from `[−kick/2, +kick/2]`.
pub const ROLLER_SPIN_KICK: f32 = 0.02;

pub const ROLLER_FRICTION: f32 = 0.02;

/// Linear damping (1/s); roughly a 2% per-tick air drag at 60 Hz.
pub const ROLLER_LINEAR_DAMPING: f32 = 1.2;

// ── Cosmetics ─────────────────────────────────────────────────────────────────

/// Peak visual scale of the wall-contact pulse.
pub const PULSE_PEAK_SCALE: f32 = 1.2;

/// Duration of one leg of the pulse (grow, then the same again to shrink).
pub const PULSE_HALF_DURATION: f32 = 0.1;

// ── HUD ───────────────────────────────────────────────────────────────────────

pub const HUD_FONT_SIZE: f32 = 14.0;
pub const TITLE_FONT_SIZE: f32 = 24.0;
