//! Wall-contact bookkeeping.
//!
//! [`wall_contact_system`] listens for `CollisionEvent::Started`; when one
//! side is a player and the other is a wall in the [`WallRegistry`]:
//!
//! 1. the player's [`CollisionCounter`] is incremented and stamped,
//! 2. its [`ImpactPulse`] is (re)started,
//! 3. a roller additionally receives a random spin kick.
//!
//! Contacts carry no other gameplay consequence; the bounce itself is
//! Rapier's restitution.

use super::control::tick_hz;
use super::state::{CollisionCounter, ImpactPulse, Player, Roller};
use crate::config::GameConfig;
use crate::walls::WallRegistry;
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;
use rand::Rng;

/// Split a contact into `(player, wall)` if it is a player–wall contact.
///
/// Player–player and wall–wall contacts return `None`.
pub fn player_wall_pair(
    e1: Entity,
    e2: Entity,
    registry: &WallRegistry,
    is_player: impl Fn(Entity) -> bool,
) -> Option<(Entity, Entity)> {
    if is_player(e1) && registry.contains(e2) {
        Some((e1, e2))
    } else if is_player(e2) && registry.contains(e1) {
        Some((e2, e1))
    } else {
        None
    }
}

/// Count wall contacts, start the sprite pulse, and kick roller spin.
#[allow(clippy::type_complexity)]
pub fn wall_contact_system(
    mut collision_events: MessageReader<CollisionEvent>,
    registry: Option<Res<WallRegistry>>,
    mut q_players: Query<
        (
            &mut CollisionCounter,
            &mut ImpactPulse,
            Option<&mut Velocity>,
            Has<Roller>,
        ),
        With<Player>,
    >,
    time: Res<Time>,
    config: Res<GameConfig>,
) {
    let Some(registry) = registry else {
        return;
    };

    let now = time.elapsed_secs();
    let mut rng = rand::thread_rng();

    for event in collision_events.read() {
        let (e1, e2) = match event {
            CollisionEvent::Started(e1, e2, _) => (*e1, *e2),
            CollisionEvent::Stopped(..) => continue,
        };

        let Some((player, wall)) =
            player_wall_pair(e1, e2, &registry, |e| q_players.contains(e))
        else {
            continue;
        };

        let Ok((mut counter, mut pulse, velocity, is_roller)) = q_players.get_mut(player) else {
            continue;
        };

        counter.record(now);
        pulse.trigger();

        if is_roller {
            if let Some(mut velocity) = velocity {
                let kick = rng.gen_range(-0.5..0.5) * config.roller_spin_kick * tick_hz();
                velocity.angvel += kick;
            }
        }

        debug!(
            "Wall contact: player {:?} hit {:?} wall {:?} (count {})",
            player,
            registry.side_of(wall),
            wall,
            counter.count()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::track::WallSide;
    use bevy_rapier2d::rapier::geometry::CollisionEventFlags;

    /// Headless app with the message channel and resources the contact system
    /// reads; no Rapier pipeline, events are written by hand.
    fn build_test_app() -> (App, Entity, Entity) {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_message::<CollisionEvent>();
        app.insert_resource(GameConfig::default());

        let inner = app.world_mut().spawn_empty().id();
        let outer = app.world_mut().spawn_empty().id();
        let mut registry = WallRegistry::default();
        registry.register(WallSide::Inner, inner);
        registry.register(WallSide::Outer, outer);
        app.insert_resource(registry);

        app.add_systems(Update, wall_contact_system);
        (app, inner, outer)
    }

    fn spawn_player(app: &mut App, roller: bool) -> Entity {
        let mut e = app.world_mut().spawn((
            Player,
            CollisionCounter::default(),
            ImpactPulse::default(),
            Velocity::zero(),
        ));
        if roller {
            e.insert(Roller::default());
        }
        e.id()
    }

    fn started(a: Entity, b: Entity) -> CollisionEvent {
        CollisionEvent::Started(a, b, CollisionEventFlags::empty())
    }

    fn count(app: &App, e: Entity) -> u32 {
        app.world().get::<CollisionCounter>(e).unwrap().count()
    }

    #[test]
    fn started_wall_contact_counts_in_either_order() {
        let (mut app, inner, outer) = build_test_app();
        let player = spawn_player(&mut app, false);

        app.world_mut().write_message(started(player, inner));
        app.world_mut().write_message(started(outer, player));
        app.update();

        assert_eq!(count(&app, player), 2);
        assert!(app.world().get::<ImpactPulse>(player).unwrap().is_running());
    }

    #[test]
    fn stopped_and_non_wall_contacts_are_ignored() {
        let (mut app, inner, _) = build_test_app();
        let a = spawn_player(&mut app, false);
        let b = spawn_player(&mut app, true);

        app.world_mut()
            .write_message(CollisionEvent::Stopped(a, inner, CollisionEventFlags::empty()));
        app.world_mut().write_message(started(a, b));
        app.update();

        assert_eq!(count(&app, a), 0);
        assert_eq!(count(&app, b), 0);
        assert!(!app.world().get::<ImpactPulse>(a).unwrap().is_running());
    }

    #[test]
    fn counter_never_decreases_across_frames() {
        let (mut app, inner, _) = build_test_app();
        let player = spawn_player(&mut app, false);

        let mut last = 0;
        for frame in 0..10 {
            if frame % 3 == 0 {
                app.world_mut().write_message(started(player, inner));
            }
            app.update();
            let now = count(&app, player);
            assert!(now >= last, "counter went from {last} to {now}");
            last = now;
        }
        assert_eq!(last, 4);
    }

    #[test]
    fn roller_hit_kicks_spin_within_bounds() {
        let (mut app, _, outer) = build_test_app();
        let roller = spawn_player(&mut app, true);
        let orbital = spawn_player(&mut app, false);

        app.world_mut().write_message(started(roller, outer));
        app.world_mut().write_message(started(orbital, outer));
        app.update();

        let bound = 0.5 * GameConfig::default().roller_spin_kick * tick_hz();
        let roller_spin = app.world().get::<Velocity>(roller).unwrap().angvel;
        assert!(roller_spin.abs() <= bound + 1e-6);
        assert_eq!(app.world().get::<Velocity>(orbital).unwrap().angvel, 0.0);
        assert_eq!(count(&app, roller), 1);
        assert_eq!(count(&app, orbital), 1);
    }

    #[test]
    fn pair_helper_rejects_wall_wall() {
        let mut world = World::new();
        let w1 = world.spawn_empty().id();
        let w2 = world.spawn_empty().id();
        let mut registry = WallRegistry::default();
        registry.register(WallSide::Inner, w1);
        registry.register(WallSide::Inner, w2);
        assert_eq!(player_wall_pair(w1, w2, &registry, |_| false), None);
    }
}
