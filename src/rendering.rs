//! HUD and overlay state: title text, per-player debug readout, and the
//! keyboard toggles for the optional overlay layers.
//!
//! ## Layer Model
//!
//! | Layer              | Technology | Default              | Controlled by        |
//! |--------------------|------------|----------------------|----------------------|
//! | Track surface      | `Mesh2d`   | always               | —                    |
//! | Wall outlines      | Gizmos     | `show_wall_outlines` | `F2`                 |
//! | Player discs       | `Mesh2d`   | always               | —                    |
//! | Spin markers       | Gizmos     | always               | —                    |
//! | Title              | Bevy UI    | always               | —                    |
//! | Debug HUD          | Bevy UI    | `show_debug_hud`     | `F1`                 |
//! | Rapier debug render| Rapier     | `physics_debug`      | `F3`                 |
//!
//! ## System Responsibilities
//!
//! | System                           | Schedule | Purpose                                |
//! |----------------------------------|----------|----------------------------------------|
//! | `sync_overlay_from_config_system`| Startup  | Seed `OverlayState` from `GameConfig`  |
//! | `setup_title_text`               | Startup  | Spawn the title node                   |
//! | `setup_debug_hud`                | Startup  | Spawn one readout panel per player     |
//! | `overlay_toggle_system`          | Update   | F1/F2/F3 toggles                       |
//! | `sync_debug_hud_visibility_system`| Update  | Show/hide the readout panels           |
//! | `debug_hud_display_system`       | Update   | Refresh readout text                   |

use crate::config::GameConfig;
use crate::constants::TITLE_FONT_SIZE;
use crate::player::{CollisionCounter, Orbit, Player, PlayerKind};
use crate::track::Track;
use bevy::prelude::*;
use bevy_rapier2d::prelude::Velocity;
use bevy_rapier2d::render::DebugRenderContext;

// ── Overlay state resource ────────────────────────────────────────────────────

/// Which optional overlay layers are rendered at runtime.
///
/// Seeded from [`GameConfig`] at startup, then flipped by the function keys.
#[derive(Resource, Clone, Debug, Default)]
pub struct OverlayState {
    /// Show the per-player debug readout.
    pub show_debug_hud: bool,
    /// Draw wall pieces as coloured gizmo outlines.
    pub show_wall_outlines: bool,
}

// ── Component markers ─────────────────────────────────────────────────────────

/// Marker for the title text node.
#[derive(Component)]
pub struct TitleText;

/// Root node of one player's debug readout.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct DebugHudPanel(pub PlayerKind);

// ── Debug readout ─────────────────────────────────────────────────────────────

/// Snapshot of one player's state, as shown in the debug HUD.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerDebugInfo {
    pub kind: PlayerKind,
    pub position: Vec2,
    pub distance_from_center: f32,
    pub speed: f32,
    pub rotation_degrees: f32,
    pub angular_velocity: f32,
    pub collisions: u32,
    pub secs_since_contact: Option<f32>,
    /// Orbital only.
    pub orbit: Option<Orbit>,
    /// Orbital only: whether the body has been pushed inside the inner wall.
    pub inside_inner_wall: Option<bool>,
}

impl PlayerDebugInfo {
    /// Collect the readout for one player at elapsed time `now`.
    pub fn gather(
        kind: PlayerKind,
        transform: &Transform,
        velocity: &Velocity,
        counter: &CollisionCounter,
        orbit: Option<&Orbit>,
        track: &Track,
        now: f32,
    ) -> Self {
        let position = transform.translation.truncate();
        let distance_from_center = track.distance_from_center(position);
        let (_, _, angle) = transform.rotation.to_euler(EulerRot::XYZ);
        Self {
            kind,
            position,
            distance_from_center,
            speed: velocity.linvel.length(),
            rotation_degrees: angle.to_degrees(),
            angular_velocity: velocity.angvel,
            collisions: counter.count(),
            secs_since_contact: counter.secs_since_contact(now),
            orbit: orbit.copied(),
            inside_inner_wall: orbit.map(|_| distance_from_center < track.inner_radius()),
        }
    }

    /// Multi-line text for the HUD panel.
    pub fn format_lines(&self) -> String {
        let mut lines = vec![format!("{} player", self.kind.label())];
        if let Some(orbit) = self.orbit {
            lines.push(format!("Orbit speed: {:.3}", orbit.speed));
            lines.push(format!("Orbit radius: {:.1}", orbit.radius));
        }
        lines.push(format!("Speed: {:.1}", self.speed));
        lines.push(format!("Distance: {:.1}", self.distance_from_center));
        lines.push(format!(
            "Position: ({:.0}, {:.0})",
            self.position.x, self.position.y
        ));
        lines.push(format!("Rotation: {:.0}°", self.rotation_degrees));
        if self.kind == PlayerKind::Roller {
            lines.push(format!("Spin: {:.2}", self.angular_velocity));
        }
        lines.push(format!("Collisions: {}", self.collisions));
        lines.push(match self.secs_since_contact {
            Some(secs) => format!("Last hit: {secs:.1}s ago"),
            None => "Last hit: never".to_string(),
        });
        if let Some(inside) = self.inside_inner_wall {
            lines.push(format!("Inside inner wall: {}", if inside { "yes" } else { "no" }));
        }
        lines.join("\n")
    }
}

// ── Startup ───────────────────────────────────────────────────────────────────

/// Seed [`OverlayState`] and the Rapier debug renderer from the loaded config.
///
/// Must run after [`crate::config::load_game_config`].
pub fn sync_overlay_from_config_system(
    config: Res<GameConfig>,
    mut overlay: ResMut<OverlayState>,
    debug_render: Option<ResMut<DebugRenderContext>>,
) {
    overlay.show_debug_hud = config.show_debug_hud;
    overlay.show_wall_outlines = config.show_wall_outlines;
    if let Some(mut ctx) = debug_render {
        ctx.enabled = config.physics_debug;
    }
}

/// Spawn the title text centred along the top edge.
pub fn setup_title_text(mut commands: Commands) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(10.0),
                width: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                ..default()
            },
            TitleText,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("Hadron Collider - Loop Racing"),
                TextFont {
                    font_size: TITLE_FONT_SIZE,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));
        });
}

/// Spawn one readout panel per enabled player: orbital top-left, roller
/// top-right.
pub fn setup_debug_hud(mut commands: Commands, config: Res<GameConfig>) {
    let top = Val::Px(20.0 + TITLE_FONT_SIZE);
    let mut panels = Vec::with_capacity(2);
    if config.player_mode.has_orbital() {
        panels.push((
            PlayerKind::Orbital,
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(10.0),
                top,
                ..default()
            },
        ));
    }
    if config.player_mode.has_roller() {
        panels.push((
            PlayerKind::Roller,
            Node {
                position_type: PositionType::Absolute,
                right: Val::Px(10.0),
                top,
                ..default()
            },
        ));
    }

    for (kind, node) in panels {
        commands
            .spawn((node, DebugHudPanel(kind), Visibility::Hidden))
            .with_children(|parent| {
                parent.spawn((
                    Text::new(format!("{} player", kind.label())),
                    TextFont {
                        font_size: config.hud_font_size,
                        ..default()
                    },
                    TextColor(kind.color()),
                ));
            });
    }
}

// ── Update ────────────────────────────────────────────────────────────────────

/// `F1` debug HUD, `F2` wall outlines, `F3` Rapier debug render.
pub fn overlay_toggle_system(
    keys: Res<ButtonInput<KeyCode>>,
    mut overlay: ResMut<OverlayState>,
    debug_render: Option<ResMut<DebugRenderContext>>,
) {
    if keys.just_pressed(KeyCode::F1) {
        overlay.show_debug_hud = !overlay.show_debug_hud;
    }
    if keys.just_pressed(KeyCode::F2) {
        overlay.show_wall_outlines = !overlay.show_wall_outlines;
    }
    if keys.just_pressed(KeyCode::F3) {
        if let Some(mut ctx) = debug_render {
            ctx.enabled = !ctx.enabled;
        }
    }
}

pub fn sync_debug_hud_visibility_system(
    overlay: Res<OverlayState>,
    mut query: Query<&mut Visibility, With<DebugHudPanel>>,
) {
    if !overlay.is_changed() {
        return;
    }
    let vis = if overlay.show_debug_hud {
        Visibility::Visible
    } else {
        Visibility::Hidden
    };
    for mut v in query.iter_mut() {
        *v = vis;
    }
}

/// Refresh each panel from its player's current state.
#[allow(clippy::type_complexity)]
pub fn debug_hud_display_system(
    overlay: Res<OverlayState>,
    track: Option<Res<Track>>,
    time: Res<Time>,
    q_players: Query<
        (
            &PlayerKind,
            &Transform,
            &Velocity,
            &CollisionCounter,
            Option<&Orbit>,
        ),
        With<Player>,
    >,
    q_panels: Query<(&DebugHudPanel, &Children)>,
    mut q_text: Query<&mut Text>,
) {
    if !overlay.show_debug_hud {
        return;
    }
    let Some(track) = track else {
        return;
    };
    let now = time.elapsed_secs();

    for (kind, transform, velocity, counter, orbit) in q_players.iter() {
        let info =
            PlayerDebugInfo::gather(*kind, transform, velocity, counter, orbit, &track, now);
        for (panel, children) in q_panels.iter() {
            if panel.0 != *kind {
                continue;
            }
            for child in children.iter() {
                if let Ok(mut text) = q_text.get_mut(child) {
                    *text = Text::new(info.format_lines());
                }
            }
        }
    }
}

// ── Plugin ────────────────────────────────────────────────────────────────────

/// Registers [`OverlayState`] and the per-frame HUD systems.
///
/// The startup systems are chained by [`crate::simulation::SimulationPlugin`]
/// after the config has loaded.
pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<OverlayState>().add_systems(
            Update,
            (
                overlay_toggle_system,
                sync_debug_hud_visibility_system.after(overlay_toggle_system),
                debug_hud_display_system,
            ),
        );
    }
}
