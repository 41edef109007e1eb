//! Player components and resources.
//!
//! All ECS components and Bevy resources that describe player state live here.
//! Systems that mutate this state are in the sibling modules:
//! - [`super::control`]: input sampling and the controller systems
//! - [`super::collision`]: wall-contact bookkeeping
//! - [`super::rendering`]: sprite mesh, contact pulse, spin marker

use crate::config::GameConfig;
use bevy::prelude::*;

// ── Components ─────────────────────────────────────────────────────────────────

/// Marker component for every player particle.
#[derive(Component)]
pub struct Player;

/// Which controller drives a player.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerKind {
    Orbital,
    Roller,
}

impl PlayerKind {
    pub fn label(self) -> &'static str {
        match self {
            PlayerKind::Orbital => "Orbital",
            PlayerKind::Roller => "Roller",
        }
    }

    /// Sprite fill: orbital green, roller orange.
    pub fn color(self) -> Color {
        match self {
            PlayerKind::Orbital => Color::srgb(0.0, 1.0, 0.0),
            PlayerKind::Roller => Color::srgb(1.0, 0.53, 0.0),
        }
    }
}

/// Orbit state of an orbital player.
///
/// The orbit *angle* is not stored: it is recomputed from the body position
/// every tick, so wall bounces feed straight back into the controller.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Orbit {
    /// Target distance from the track centre; always inside the wall margins.
    pub radius: f32,
    /// Angular lead (radians per tick) of the target point ahead of the
    /// player; always within `[−max, +max]`.
    pub speed: f32,
}

/// Spin repeat state of a roller player.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Roller {
    /// Seconds until Q/E may add spin again.
    pub spin_cooldown: f32,
}

/// Counts wall contacts.  Only ever increments.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct CollisionCounter {
    count: u32,
    /// `Time::elapsed_secs` of the most recent counted contact.
    last_contact_secs: Option<f32>,
}

impl CollisionCounter {
    /// Record one wall contact at `now` (elapsed seconds).
    pub fn record(&mut self, now: f32) {
        self.count = self.count.saturating_add(1);
        self.last_contact_secs = Some(now);
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn last_contact_secs(&self) -> Option<f32> {
        self.last_contact_secs
    }

    /// Seconds since the last contact, or `None` before the first one.
    pub fn secs_since_contact(&self, now: f32) -> Option<f32> {
        self.last_contact_secs.map(|t| (now - t).max(0.0))
    }
}

/// Cosmetic scale pulse played on the player's sprite after a wall contact.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct ImpactPulse {
    /// Seconds since the pulse started; `None` when idle.
    pub elapsed: Option<f32>,
}

impl ImpactPulse {
    /// Start (or restart) the pulse from scale 1.0.
    pub fn trigger(&mut self) {
        self.elapsed = Some(0.0);
    }

    pub fn is_running(&self) -> bool {
        self.elapsed.is_some()
    }
}

/// Child entity carrying the player's visible disc.
///
/// Scaling happens on this child so the pulse never touches the parent's
/// collider.
#[derive(Component, Debug, Clone, Copy)]
pub struct PlayerSprite {
    pub color: Color,
    pub radius: f32,
}

// ── Resources ──────────────────────────────────────────────────────────────────

/// Orbital controls sampled from the keyboard this frame.
///
/// Written by [`super::control::keyboard_to_intent_system`], read by the
/// orbital controller.  Tests populate it directly.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrbitalIntent {
    /// Up arrow.
    pub faster: bool,
    /// Down arrow.
    pub slower: bool,
    /// Left arrow.
    pub inward: bool,
    /// Right arrow.
    pub outward: bool,
}

/// Roller controls sampled from the keyboard this frame.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct RollerIntent {
    /// Sum of held WASD directions (each component in `−1..=1`, y-up).
    pub direction: Vec2,
    /// `+1` for Q (counter-clockwise), `−1` for E (clockwise), `0` for
    /// neither or both.
    pub spin: f32,
}

// ── Construction helpers ───────────────────────────────────────────────────────

impl Orbit {
    /// Starting orbit: on the track centre line at the configured start speed.
    pub fn starting(config: &GameConfig) -> Self {
        Self {
            radius: config.track_center_radius,
            speed: config.orbit_start_speed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_only_counts_up() {
        let mut counter = CollisionCounter::default();
        assert_eq!(counter.count(), 0);
        assert_eq!(counter.secs_since_contact(5.0), None);

        counter.record(1.0);
        counter.record(2.5);
        assert_eq!(counter.count(), 2);
        assert_eq!(counter.last_contact_secs(), Some(2.5));
        assert_eq!(counter.secs_since_contact(4.0), Some(1.5));
    }

    #[test]
    fn pulse_trigger_restarts_from_zero() {
        let mut pulse = ImpactPulse {
            elapsed: Some(0.07),
        };
        pulse.trigger();
        assert_eq!(pulse.elapsed, Some(0.0));
        assert!(pulse.is_running());
        assert!(!ImpactPulse::default().is_running());
    }
}
