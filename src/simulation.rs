//! Simulation plugin: fixed controller tick, zero-gravity physics, and the
//! startup chain that builds the scene.

use crate::config::load_game_config;
use crate::constants::FIXED_TICK_HZ;
use crate::graphics::{configure_gizmos, exit_on_escape_system, setup_camera};
use crate::player::{spawn_players_system, PlayerPlugin};
use crate::rendering::{
    setup_debug_hud, setup_title_text, sync_overlay_from_config_system, HudPlugin,
};
use crate::walls::{spawn_track_surface_system, spawn_track_system, wall_outline_gizmo_system};
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

/// Expects `GameConfig` to be inserted and Rapier to be added by the caller.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(Time::<Fixed>::from_hz(FIXED_TICK_HZ))
            .add_plugins((PlayerPlugin, HudPlugin))
            .add_systems(
                Startup,
                (
                    // Config first so every other startup system sees the final values.
                    load_game_config,
                    (setup_physics_config, sync_overlay_from_config_system),
                    // Inserts Track, which the player spawn reads.
                    spawn_track_system,
                    (
                        setup_camera,
                        configure_gizmos,
                        spawn_track_surface_system,
                        spawn_players_system,
                        setup_title_text,
                        setup_debug_hud,
                    ),
                )
                    .chain(),
            )
            .add_systems(Update, (wall_outline_gizmo_system, exit_on_escape_system));
    }
}

/// Configure Rapier physics: no gravity on a top-down track.
fn setup_physics_config(mut config: Query<&mut RapierConfiguration>) {
    for mut cfg in config.iter_mut() {
        cfg.gravity = Vec2::ZERO;
    }
}
