//! Player module: the two player particles, their controllers, wall-contact
//! bookkeeping, and rendering.
//!
//! ## Sub-module layout
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | [`state`] | ECS components (`Player`, `PlayerKind`, `Orbit`, `Roller`, `CollisionCounter`, `ImpactPulse`, `PlayerSprite`) and the intent resources |
//! | [`orbital`] | Orbital controller math: speed/radius input, target point, per-tick velocity |
//! | [`roller`] | Roller controller math: WASD force, Q/E spin repeat, speed caps |
//! | [`control`] | Keyboard sampling and the `FixedUpdate` controller systems |
//! | [`collision`] | Wall-contact counting, contact pulse trigger, roller spin kick |
//! | [`rendering`] | Sprite disc mesh, contact pulse scaling, spin marker |
//!
//! All public items are re-exported at this level so that the rest of the crate
//! can use flat `crate::player::*` imports.

pub mod collision;
pub mod control;
pub mod orbital;
pub mod rendering;
pub mod roller;
pub mod state;

pub use collision::wall_contact_system;
pub use control::{
    keyboard_to_intent_system, orbital_controller_system, roller_controller_system, tick_hz,
};
pub use orbital::OrbitLimits;
pub use rendering::{
    attach_player_sprite_mesh_system, impact_pulse_system, player_spin_marker_system,
};
pub use roller::RollerTuning;
pub use state::{
    CollisionCounter, ImpactPulse, Orbit, OrbitalIntent, Player, PlayerKind, PlayerSprite, Roller,
    RollerIntent,
};

use crate::config::GameConfig;
use crate::track::Track;
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;
use std::f32::consts::PI;

// ── Spawn ──────────────────────────────────────────────────────────────────────

/// Start position of a player of `kind`: orbital at angle 0, roller opposite
/// it at angle π, both on the track centre line.
pub fn start_position(kind: PlayerKind, track: &Track) -> Vec2 {
    let angle = match kind {
        PlayerKind::Orbital => 0.0,
        PlayerKind::Roller => PI,
    };
    track.point_at(angle, track.center_radius())
}

/// Spawn the players enabled by `config.player_mode`.
///
/// Each player is a dynamic ball with a child [`PlayerSprite`] carrying its
/// visible disc.
///
/// Collision groups:
/// - `GROUP_2`: players belong to this group
/// - collide with `GROUP_1` (walls) and `GROUP_2` (each other)
pub fn spawn_players_system(
    mut commands: Commands,
    config: Res<GameConfig>,
    track: Option<Res<Track>>,
) {
    let Some(track) = track else {
        warn!("No track present; players not spawned");
        return;
    };

    let mut kinds = Vec::with_capacity(2);
    if config.player_mode.has_orbital() {
        kinds.push(PlayerKind::Orbital);
    }
    if config.player_mode.has_roller() {
        kinds.push(PlayerKind::Roller);
    }

    for kind in kinds {
        let position = start_position(kind, &track);
        let (friction, linear_damping) = match kind {
            PlayerKind::Orbital => (config.orbital_friction, config.orbital_linear_damping),
            PlayerKind::Roller => (config.roller_friction, config.roller_linear_damping),
        };

        let mut player = commands.spawn((
            Player,
            kind,
            CollisionCounter::default(),
            ImpactPulse::default(),
            (
                RigidBody::Dynamic,
                Collider::ball(config.player_radius),
                Velocity::zero(),
                ExternalForce::default(),
                Damping {
                    linear_damping,
                    angular_damping: 0.0,
                },
                Restitution::coefficient(config.player_restitution),
                Friction::coefficient(friction),
                CollisionGroups::new(
                    bevy_rapier2d::geometry::Group::GROUP_2,
                    bevy_rapier2d::geometry::Group::GROUP_1 | bevy_rapier2d::geometry::Group::GROUP_2,
                ),
                ActiveEvents::COLLISION_EVENTS,
            ),
            Transform::from_translation(position.extend(1.0)),
            Visibility::default(),
        ));
        match kind {
            PlayerKind::Orbital => player.insert(Orbit::starting(&config)),
            PlayerKind::Roller => player.insert(Roller::default()),
        };
        player.with_children(|parent| {
            parent.spawn((
                PlayerSprite {
                    color: kind.color(),
                    radius: config.player_radius,
                },
                Transform::default(),
                Visibility::default(),
            ));
        });

        info!("{} player spawned at ({:.0}, {:.0})", kind.label(), position.x, position.y);
    }
}

// ── Plugin ─────────────────────────────────────────────────────────────────────

/// Registers the intent resources and every player system.
///
/// Spawning is left to the caller's startup chain because it needs the
/// [`Track`] resource inserted first.
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<OrbitalIntent>()
            .init_resource::<RollerIntent>()
            .add_systems(
                Update,
                (
                    keyboard_to_intent_system,
                    attach_player_sprite_mesh_system,
                    impact_pulse_system,
                    player_spin_marker_system,
                ),
            )
            .add_systems(
                FixedUpdate,
                (orbital_controller_system, roller_controller_system),
            )
            // After Rapier has produced this frame's collision events.
            .add_systems(
                PostUpdate,
                wall_contact_system.after(PhysicsSet::Writeback),
            );
    }
}
