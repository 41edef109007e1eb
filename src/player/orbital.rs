//! Orbital motion controller.
//!
//! A proportional position-seeking controller, not orbital mechanics: every
//! tick it measures the player's current angle around the track centre, picks
//! a target point `speed` radians further along at the desired radius, and
//! sets the velocity to a fixed fraction of the gap.  Because the angle is
//! re-measured every tick, wall bounces are absorbed naturally.

use super::state::{Orbit, OrbitalIntent};
use crate::config::GameConfig;
use crate::track::Track;
use bevy::prelude::*;

/// Limits and step sizes the controller works within.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitLimits {
    pub min_speed: f32,
    pub max_speed: f32,
    pub speed_step: f32,
    pub speed_decay: f32,
    pub min_radius: f32,
    pub max_radius: f32,
    pub radius_step: f32,
    pub velocity_gain: f32,
}

impl OrbitLimits {
    /// Radius band is `[inner + margin, outer − margin]` of `track`.
    pub fn new(config: &GameConfig, track: &Track) -> Self {
        Self {
            min_speed: config.orbit_min_speed,
            max_speed: config.orbit_max_speed,
            speed_step: config.orbit_speed_step,
            speed_decay: config.orbit_speed_decay,
            min_radius: track.inner_radius() + config.orbit_wall_margin,
            max_radius: track.outer_radius() - config.orbit_wall_margin,
            radius_step: config.orbit_radius_step,
            velocity_gain: config.orbit_velocity_gain,
        }
    }
}

impl Orbit {
    /// Up/Down adjust the speed additively; with neither held the speed decays
    /// toward `±min_speed`.  Up wins when both are held.
    ///
    /// The result always lies in `[−max_speed, +max_speed]`.
    pub fn apply_speed_input(&mut self, intent: &OrbitalIntent, limits: &OrbitLimits) {
        if intent.faster {
            self.speed = (self.speed + limits.speed_step).min(limits.max_speed);
        } else if intent.slower {
            self.speed = (self.speed - limits.speed_step).max(-limits.max_speed);
        } else {
            self.speed *= limits.speed_decay;
            if self.speed.abs() < limits.min_speed {
                // A speed of exactly zero keeps the positive direction.
                self.speed = self.speed.signum() * limits.min_speed;
            }
        }
        self.speed = self.speed.clamp(-limits.max_speed, limits.max_speed);
    }

    /// Left moves the orbit inward, Right outward (Left wins when both are
    /// held).  The result always lies in `[min_radius, max_radius]`.
    pub fn apply_radius_input(&mut self, intent: &OrbitalIntent, limits: &OrbitLimits) {
        if intent.inward {
            self.radius -= limits.radius_step;
        } else if intent.outward {
            self.radius += limits.radius_step;
        }
        self.radius = self.radius.clamp(limits.min_radius, limits.max_radius);
    }

    /// Point the controller steers toward from `position`.
    pub fn target_point(&self, position: Vec2, track: &Track) -> Vec2 {
        let angle = track.angle_of(position) + self.speed;
        track.point_at(angle, self.radius)
    }

    /// One controller tick: apply `intent`, then return the velocity (world
    /// units **per tick**) that moves `position` toward the new target.
    pub fn step(
        &mut self,
        position: Vec2,
        intent: &OrbitalIntent,
        track: &Track,
        limits: &OrbitLimits,
    ) -> Vec2 {
        self.apply_speed_input(intent, limits);
        self.apply_radius_input(intent, limits);
        (self.target_point(position, track) - position) * limits.velocity_gain
    }
}
