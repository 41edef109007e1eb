use bevy::prelude::*;
use bevy::window::WindowResolution;
use bevy_rapier2d::prelude::*;

use hadron::config::GameConfig;
use hadron::constants::{WINDOW_HEIGHT, WINDOW_WIDTH};
use hadron::simulation::SimulationPlugin;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Hadron Collider".into(),
                resolution: WindowResolution::new(WINDOW_WIDTH, WINDOW_HEIGHT),
                ..Default::default()
            }),
            ..Default::default()
        }))
        .insert_resource(ClearColor(Color::BLACK))
        // Compiled defaults; load_game_config overwrites them from
        // assets/game.toml (if present) in the Startup schedule.
        .insert_resource(GameConfig::default())
        // pixels_per_meter(1.0) keeps world units equal to pixels, so the
        // per-tick tuning values map directly onto Rapier velocities.
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::pixels_per_meter(1.0))
        // Off until physics_debug or F3 enables it.
        .add_plugins(RapierDebugRenderPlugin {
            enabled: false,
            ..Default::default()
        })
        .add_plugins(SimulationPlugin)
        .run();
}
