//! Player input and movement systems.
//!
//! ## Pipeline
//!
//! 1. [`keyboard_to_intent_system`] (`Update`) samples the arrow keys into
//!    [`OrbitalIntent`] and WASD/Q/E into [`RollerIntent`].
//! 2. [`orbital_controller_system`] (`FixedUpdate`) turns `OrbitalIntent` into
//!    a `Velocity` for every orbital player.
//! 3. [`roller_controller_system`] (`FixedUpdate`) turns `RollerIntent` into
//!    `ExternalForce` and spin, then applies the speed caps.
//!
//! The intent resources are the only link between input and physics, so tests
//! populate them directly and run only the controller systems.

use super::orbital::OrbitLimits;
use super::roller::{cap_angular_speed, cap_linear_speed, movement_force, RollerTuning};
use super::state::{Orbit, OrbitalIntent, Player, Roller, RollerIntent};
use crate::config::GameConfig;
use crate::constants::FIXED_TICK_HZ;
use crate::track::Track;
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

/// Controller ticks per second, as `f32`.
pub fn tick_hz() -> f32 {
    FIXED_TICK_HZ as f32
}

// ── Step 1: Keyboard → Intent ─────────────────────────────────────────────────

/// Sample the keyboard into both intent resources.
///
/// | Key     | Effect                         |
/// |---------|--------------------------------|
/// | ↑ / ↓   | orbital speed up / down        |
/// | ← / →   | orbital radius in / out        |
/// | W A S D | roller force up/left/down/right|
/// | Q / E   | roller spin CCW / CW           |
///
/// Both resources are overwritten every frame, never accumulated.
pub fn keyboard_to_intent_system(
    keys: Res<ButtonInput<KeyCode>>,
    mut orbital: ResMut<OrbitalIntent>,
    mut roller: ResMut<RollerIntent>,
) {
    *orbital = OrbitalIntent {
        faster: keys.pressed(KeyCode::ArrowUp),
        slower: keys.pressed(KeyCode::ArrowDown),
        inward: keys.pressed(KeyCode::ArrowLeft),
        outward: keys.pressed(KeyCode::ArrowRight),
    };

    let mut direction = Vec2::ZERO;
    if keys.pressed(KeyCode::KeyA) {
        direction.x -= 1.0;
    }
    if keys.pressed(KeyCode::KeyD) {
        direction.x += 1.0;
    }
    if keys.pressed(KeyCode::KeyW) {
        direction.y += 1.0;
    }
    if keys.pressed(KeyCode::KeyS) {
        direction.y -= 1.0;
    }

    let mut spin = 0.0;
    if keys.pressed(KeyCode::KeyQ) {
        spin += 1.0;
    }
    if keys.pressed(KeyCode::KeyE) {
        spin -= 1.0;
    }

    *roller = RollerIntent { direction, spin };
}

// ── Step 2: Orbital controller ────────────────────────────────────────────────

/// Retarget every orbital player and hand the resulting velocity to Rapier.
///
/// Does nothing until the [`Track`] exists.
pub fn orbital_controller_system(
    mut q: Query<(&Transform, &mut Orbit, &mut Velocity), With<Player>>,
    intent: Res<OrbitalIntent>,
    track: Option<Res<Track>>,
    config: Res<GameConfig>,
) {
    let Some(track) = track else {
        return;
    };
    let limits = OrbitLimits::new(&config, &track);

    for (transform, mut orbit, mut velocity) in q.iter_mut() {
        let position = transform.translation.truncate();
        let per_tick = orbit.step(position, &intent, &track, &limits);
        velocity.linvel = per_tick * tick_hz();
    }
}

// ── Step 3: Roller controller ─────────────────────────────────────────────────

/// Apply WASD force and Q/E spin to every roller player, then cap its speeds.
pub fn roller_controller_system(
    mut q: Query<(&mut Roller, &mut ExternalForce, &mut Velocity), With<Player>>,
    intent: Res<RollerIntent>,
    time: Res<Time>,
    config: Res<GameConfig>,
) {
    let tuning = RollerTuning::new(&config, tick_hz());
    let dt = time.delta_secs();

    for (mut roller, mut force, mut velocity) in q.iter_mut() {
        force.force = movement_force(&intent, tuning.move_force);
        velocity.angvel += roller.spin_delta(&intent, dt, &tuning);

        velocity.linvel = cap_linear_speed(velocity.linvel, tuning.max_speed);
        velocity.angvel = cap_angular_speed(velocity.angvel, tuning.max_angvel);
    }
}

// ── Unit tests ────────────────────────────────────────────────────────────────
