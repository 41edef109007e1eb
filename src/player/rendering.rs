//! Player-specific rendering: sprite disc fill, wall-contact pulse, and the
//! spin marker that makes rotation visible on a round body.
//!
//! ## Layer model
//!
//! | Layer          | Technology | Default | Notes                                |
//! |----------------|------------|---------|--------------------------------------|
//! | Sprite disc    | `Mesh2d`   | ON      | on the [`PlayerSprite`] child         |
//! | Contact pulse  | `Transform`| —       | scales the child, never the collider |
//! | Spin marker    | Gizmos     | ON      | centre → rim line along local +X     |

use super::state::{ImpactPulse, Player, PlayerSprite};
use crate::config::GameConfig;
use bevy::prelude::*;
use bevy_asset::RenderAssetUsages;
use bevy_mesh::{Indices, PrimitiveTopology};
use std::f32::consts::TAU;

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Fan-triangulated disc of `radius` with `segments` rim vertices.
pub fn disc_mesh(radius: f32, segments: u32) -> Mesh {
    let mut positions: Vec<[f32; 3]> = vec![[0.0, 0.0, 0.0]];
    for i in 0..segments {
        let p = Vec2::from_angle(i as f32 / segments as f32 * TAU) * radius;
        positions.push([p.x, p.y, 0.0]);
    }
    let normals: Vec<[f32; 3]> = vec![[0.0, 0.0, 1.0]; positions.len()];

    let mut indices: Vec<u32> = Vec::with_capacity(segments as usize * 3);
    for i in 0..segments {
        indices.extend_from_slice(&[0, 1 + i, 1 + (i + 1) % segments]);
    }

    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::RENDER_WORLD,
    );
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
    mesh.insert_indices(Indices::U32(indices));
    mesh
}

/// Visual scale of the contact pulse `elapsed` seconds after it started.
///
/// Linear yoyo: 1.0 → `peak` over `half_duration`, then back to 1.0 over the
/// same time.  Outside `[0, 2·half_duration]` the scale is 1.0.
pub fn pulse_scale(elapsed: f32, half_duration: f32, peak: f32) -> f32 {
    if half_duration <= 0.0 || elapsed <= 0.0 || elapsed >= 2.0 * half_duration {
        return 1.0;
    }
    let t = elapsed / half_duration;
    let leg = if t <= 1.0 { t } else { 2.0 - t };
    1.0 + (peak - 1.0) * leg
}

// ── Spawn-time mesh attachment ────────────────────────────────────────────────

/// Attach a filled disc `Mesh2d` to every newly spawned player sprite.
///
/// Runs once per sprite entity (via [`Added<PlayerSprite>`]).
pub fn attach_player_sprite_mesh_system(
    mut commands: Commands,
    query: Query<(Entity, &PlayerSprite), Added<PlayerSprite>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    for (entity, sprite) in query.iter() {
        let mesh_handle = meshes.add(disc_mesh(sprite.radius, 24));
        let mat_handle = materials.add(ColorMaterial::from_color(sprite.color));
        commands
            .entity(entity)
            .insert((Mesh2d(mesh_handle), MeshMaterial2d(mat_handle)));
    }
}

// ── Pulse ─────────────────────────────────────────────────────────────────────

/// Advance every running [`ImpactPulse`] and scale the player's sprite child.
pub fn impact_pulse_system(
    mut q_players: Query<(&mut ImpactPulse, &Children), With<Player>>,
    mut q_sprites: Query<&mut Transform, With<PlayerSprite>>,
    time: Res<Time>,
    config: Res<GameConfig>,
) {
    let dt = time.delta_secs();
    for (mut pulse, children) in q_players.iter_mut() {
        let Some(elapsed) = pulse.elapsed else {
            continue;
        };
        let elapsed = elapsed + dt;
        let scale = pulse_scale(elapsed, config.pulse_half_duration, config.pulse_peak_scale);
        pulse.elapsed = if elapsed >= 2.0 * config.pulse_half_duration {
            None
        } else {
            Some(elapsed)
        };

        for child in children.iter() {
            if let Ok(mut transform) = q_sprites.get_mut(child) {
                transform.scale = Vec3::new(scale, scale, 1.0);
            }
        }
    }
}

// ── Gizmos ────────────────────────────────────────────────────────────────────

/// Draw a short white spoke from each player's centre along its local +X so
/// that spin is visible.
pub fn player_spin_marker_system(
    mut gizmos: Gizmos,
    q_players: Query<&Transform, With<Player>>,
    config: Res<GameConfig>,
) {
    for transform in q_players.iter() {
        let pos = transform.translation.truncate();
        let rim = pos + transform.rotation.mul_vec3(Vec3::X).truncate() * config.player_radius;
        gizmos.line_2d(pos, rim, Color::WHITE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pulse_peaks_halfway_and_settles() {
        assert_eq!(pulse_scale(0.0, 0.1, 1.2), 1.0);
        assert!((pulse_scale(0.05, 0.1, 1.2) - 1.1).abs() < 1e-5);
        assert!((pulse_scale(0.1, 0.1, 1.2) - 1.2).abs() < 1e-5);
        assert!((pulse_scale(0.15, 0.1, 1.2) - 1.1).abs() < 1e-5);
        assert_eq!(pulse_scale(0.2, 0.1, 1.2), 1.0);
        assert_eq!(pulse_scale(5.0, 0.1, 1.2), 1.0);
    }

    #[test]
    fn zero_duration_pulse_is_a_no_op() {
        assert_eq!(pulse_scale(0.05, 0.0, 1.2), 1.0);
    }

    #[test]
    fn disc_mesh_is_a_closed_fan() {
        let mesh = disc_mesh(8.0, 12);
        assert_eq!(mesh.count_vertices(), 13);
        assert_eq!(mesh.indices().map(|i| i.len()), Some(36));
    }

    #[test]
    fn pulse_scales_child_and_finishes() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(GameConfig::default());
        app.add_systems(Update, impact_pulse_system);

        let player = app
            .world_mut()
            .spawn((
                Player,
                ImpactPulse {
                    elapsed: Some(0.05),
                },
            ))
            .id();
        let sprite = app
            .world_mut()
            .spawn((
                PlayerSprite {
                    color: Color::WHITE,
                    radius: 8.0,
                },
                Transform::default(),
                ChildOf(player),
            ))
            .id();

        // First update has a zero delta: scale reflects elapsed = 0.05.
        app.update();
        let scale = app.world().get::<Transform>(sprite).unwrap().scale.x;
        assert!((scale - 1.1).abs() < 1e-4, "got {scale}");

        // Force the pulse past its end.
        app.world_mut().get_mut::<ImpactPulse>(player).unwrap().elapsed = Some(1.0);
        app.update();
        assert_eq!(app.world().get::<Transform>(sprite).unwrap().scale.x, 1.0);
        assert!(!app.world().get::<ImpactPulse>(player).unwrap().is_running());
    }
}
