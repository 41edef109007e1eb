//! Roller motion controller: free movement under WASD force, Q/E spin, and
//! speed caps.  Bouncing is left entirely to collider restitution.

use super::state::{Roller, RollerIntent};
use crate::config::GameConfig;
use bevy::prelude::*;

/// Tuning for one roller tick, already converted to per-second units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RollerTuning {
    pub move_force: f32,
    /// Angular velocity added per spin repeat (rad/s).
    pub spin_step: f32,
    pub spin_repeat_secs: f32,
    /// Linear speed cap (units/s).
    pub max_speed: f32,
    /// Angular speed cap (rad/s).
    pub max_angvel: f32,
}

impl RollerTuning {
    /// Convert the per-tick config values at `tick_hz` ticks per second.
    pub fn new(config: &GameConfig, tick_hz: f32) -> Self {
        Self {
            move_force: config.roller_move_force,
            spin_step: config.roller_spin_step * tick_hz,
            spin_repeat_secs: config.roller_spin_repeat_secs,
            max_speed: config.roller_max_speed * tick_hz,
            max_angvel: config.roller_max_angvel * tick_hz,
        }
    }
}

/// Force for the held WASD keys.  Diagonals are not normalised, so two keys
/// push harder than one.
pub fn movement_force(intent: &RollerIntent, move_force: f32) -> Vec2 {
    intent.direction * move_force
}

/// Rescale `linvel` down to `max_speed` if it is faster.
pub fn cap_linear_speed(linvel: Vec2, max_speed: f32) -> Vec2 {
    let speed = linvel.length();
    if speed > max_speed {
        linvel * (max_speed / speed)
    } else {
        linvel
    }
}

pub fn cap_angular_speed(angvel: f32, max_angvel: f32) -> f32 {
    angvel.clamp(-max_angvel, max_angvel)
}

impl Roller {
    /// Advance the spin repeat timer by `dt` and return the angular velocity
    /// change to apply this tick.
    ///
    /// A fresh press spins immediately; holding the key repeats at most once
    /// per `spin_repeat_secs`.
    pub fn spin_delta(&mut self, intent: &RollerIntent, dt: f32, tuning: &RollerTuning) -> f32 {
        self.spin_cooldown = (self.spin_cooldown - dt).max(0.0);
        if intent.spin == 0.0 {
            // Releasing the key re-arms it.
            self.spin_cooldown = 0.0;
            return 0.0;
        }
        if self.spin_cooldown > 0.0 {
            return 0.0;
        }
        self.spin_cooldown = tuning.spin_repeat_secs;
        intent.spin.signum() * tuning.spin_step
    }
}
