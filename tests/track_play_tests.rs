//! Headless tests for the assembled track scene.
//!
//! Most tests use [`MinimalPlugins`] with no window, rendering or Rapier
//! pipeline, so they run fast and deterministically in CI.  Controllers are
//! driven from `Update` and collision messages are written by hand.  The last
//! test adds [`RapierPhysicsPlugin`] on a fixed 60 Hz clock.
//!
//! Covered scenarios:
//! 1. Keyboard state maps onto both intent resources.
//! 2. Track and players spawn together from one config.
//! 3. Holding Up + Right drives the orbit to its speed step and radius cap.
//! 4. A wall contact counts only for the player that touched the wall.
//! 5. With the real Rapier pipeline, a roller driven into the inner wall
//!    produces a counted contact through the spawned collision groups.

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use bevy_rapier2d::prelude::*;
use bevy_rapier2d::rapier::geometry::CollisionEventFlags;
use hadron::config::GameConfig;
use hadron::player::{
    keyboard_to_intent_system, orbital_controller_system, spawn_players_system,
    wall_contact_system, CollisionCounter, Orbit, OrbitalIntent, Player, PlayerKind, Roller,
    RollerIntent,
};
use hadron::walls::{spawn_track_system, WallRegistry};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Headless app with track and players spawned from the default config.
fn scene_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.insert_resource(GameConfig::default());
    app.init_resource::<ButtonInput<KeyCode>>();
    app.init_resource::<OrbitalIntent>();
    app.init_resource::<RollerIntent>();
    app.add_message::<CollisionEvent>();
    app.add_systems(Startup, (spawn_track_system, spawn_players_system).chain());
    app.add_systems(
        Update,
        (
            keyboard_to_intent_system,
            orbital_controller_system.after(keyboard_to_intent_system),
            wall_contact_system,
        ),
    );
    app.update();
    app
}

fn player_of(app: &mut App, kind: PlayerKind) -> Entity {
    let mut q = app
        .world_mut()
        .query_filtered::<(Entity, &PlayerKind), With<Player>>();
    q.iter(app.world())
        .find(|(_, k)| **k == kind)
        .map(|(e, _)| e)
        .expect("player not spawned")
}

fn press(app: &mut App, keys: &[KeyCode]) {
    let mut input = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
    for key in keys {
        input.press(*key);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[test]
fn keyboard_fills_both_intents() {
    let mut app = scene_app();
    press(
        &mut app,
        &[KeyCode::ArrowUp, KeyCode::ArrowLeft, KeyCode::KeyW, KeyCode::KeyD, KeyCode::KeyE],
    );
    app.update();

    let orbital = *app.world().resource::<OrbitalIntent>();
    assert!(orbital.faster && orbital.inward);
    assert!(!orbital.slower && !orbital.outward);

    let roller = *app.world().resource::<RollerIntent>();
    assert_eq!(roller.direction, Vec2::new(1.0, 1.0));
    assert_eq!(roller.spin, -1.0);
}

#[test]
fn scene_spawns_walls_and_both_players() {
    let mut app = scene_app();
    assert!(!app.world().resource::<WallRegistry>().is_empty());

    let orbital = player_of(&mut app, PlayerKind::Orbital);
    let roller = player_of(&mut app, PlayerKind::Roller);
    assert!(app.world().get::<Orbit>(orbital).is_some());
    assert!(app.world().get::<Roller>(roller).is_some());
    assert!(app.world().get::<Orbit>(roller).is_none());
}

#[test]
fn held_arrows_speed_up_and_push_orbit_outward() {
    let mut app = scene_app();
    let orbital = player_of(&mut app, PlayerKind::Orbital);
    press(&mut app, &[KeyCode::ArrowUp, KeyCode::ArrowRight]);

    for _ in 0..50 {
        app.update();
    }

    let config = GameConfig::default();
    let orbit = *app.world().get::<Orbit>(orbital).unwrap();
    let expected_speed = config.orbit_start_speed + 50.0 * config.orbit_speed_step;
    assert!((orbit.speed - expected_speed).abs() < 1e-4, "speed {}", orbit.speed);
    // Default track: outer 260, margin 20.
    assert_eq!(orbit.radius, 240.0);
}

#[test]
fn wall_contact_counts_for_the_touching_player_only() {
    let mut app = scene_app();
    let orbital = player_of(&mut app, PlayerKind::Orbital);
    let roller = player_of(&mut app, PlayerKind::Roller);
    let wall = app.world().resource::<WallRegistry>().outer()[0];

    app.world_mut().write_message(CollisionEvent::Started(
        wall,
        roller,
        CollisionEventFlags::empty(),
    ));
    app.world_mut().write_message(CollisionEvent::Started(
        orbital,
        roller,
        CollisionEventFlags::empty(),
    ));
    app.update();

    assert_eq!(app.world().get::<CollisionCounter>(roller).unwrap().count(), 1);
    assert_eq!(app.world().get::<CollisionCounter>(orbital).unwrap().count(), 0);
}

/// Headless app running Rapier itself, so contacts come from the spawned
/// colliders rather than hand-written messages.
fn physics_app() -> App {
    let mut app = App::new();
    app.add_plugins((
        MinimalPlugins,
        TransformPlugin,
        RapierPhysicsPlugin::<NoUserData>::pixels_per_meter(1.0),
    ));
    app.insert_resource(GameConfig::default());
    app.insert_resource(TimeUpdateStrategy::ManualDuration(
        std::time::Duration::from_secs_f32(1.0 / 60.0),
    ));
    app.add_systems(Startup, (spawn_track_system, spawn_players_system).chain());
    app.add_systems(
        PostUpdate,
        wall_contact_system.after(PhysicsSet::Writeback),
    );
    app.finish();
    app.update();

    // Top-down track: match the game's zero gravity.
    let mut q = app.world_mut().query::<&mut RapierConfiguration>();
    for mut cfg in q.iter_mut(app.world_mut()) {
        cfg.gravity = Vec2::ZERO;
    }
    app
}

#[test]
fn rapier_contact_with_inner_wall_is_counted() {
    let mut app = physics_app();
    let orbital = player_of(&mut app, PlayerKind::Orbital);
    let roller = player_of(&mut app, PlayerKind::Roller);

    // Roller starts at (-200, 0); the inner wall is a ball of radius 140.
    app.world_mut().get_mut::<Velocity>(roller).unwrap().linvel = Vec2::new(400.0, 0.0);

    for _ in 0..60 {
        app.update();
    }

    let hits = app.world().get::<CollisionCounter>(roller).unwrap().count();
    assert!(hits >= 1, "roller never registered a wall contact");
    assert_eq!(app.world().get::<CollisionCounter>(orbital).unwrap().count(), 0);
}
