//! Wall construction and the wall registry.
//!
//! ## Flow
//!
//! 1. [`spawn_track_system`] builds the [`Track`] from [`GameConfig`], turns
//!    each wall's [`WallShape`] into [`WallPiece`]s, and spawns one static
//!    Rapier collider per piece.
//! 2. Every spawned collider entity is recorded in the [`WallRegistry`]
//!    resource.  Player collision handling asks the registry whether the other
//!    body in a contact is a wall.
//! 3. [`wall_outline_gizmo_system`] draws each piece every frame; the
//!    translucent track surface is a retained `Mesh2d` ring.
//!
//! ## Collision groups
//!
//! | Layer   | Group   | Collides with                 |
//! |---------|---------|-------------------------------|
//! | Walls   | GROUP_1 | GROUP_2 (players)             |
//! | Players | GROUP_2 | GROUP_1 \| GROUP_2            |

use crate::config::GameConfig;
use crate::rendering::OverlayState;
use crate::track::{box_segments, ring_segments, Track, WallSegment, WallShape, WallSide};
use bevy::prelude::*;
use bevy_asset::RenderAssetUsages;
use bevy_mesh::{Indices, PrimitiveTopology};
use bevy_rapier2d::prelude::*;
use std::f32::consts::TAU;

// ── Components & Resources ────────────────────────────────────────────────────

/// Marker for static wall collider entities; records which boundary it forms.
#[derive(Component, Debug, Clone, Copy)]
pub struct Wall(pub WallSide);

/// Geometry of one static wall collider.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub enum WallPiece {
    /// Solid disc (a whole circular wall as one body).
    Ball { center: Vec2, radius: f32 },
    /// Straight cuboid segment.
    Segment(WallSegment),
}

/// Every wall collider in the scene, split by side.
///
/// Filled once by [`spawn_track_system`] and never mutated afterwards.
#[derive(Resource, Debug, Default, Clone)]
pub struct WallRegistry {
    inner: Vec<Entity>,
    outer: Vec<Entity>,
}

impl WallRegistry {
    pub fn register(&mut self, side: WallSide, entity: Entity) {
        match side {
            WallSide::Inner => self.inner.push(entity),
            WallSide::Outer => self.outer.push(entity),
        }
    }

    pub fn inner(&self) -> &[Entity] {
        &self.inner
    }

    pub fn outer(&self) -> &[Entity] {
        &self.outer
    }

    /// Which wall `entity` belongs to, if it is a registered wall at all.
    pub fn side_of(&self, entity: Entity) -> Option<WallSide> {
        if self.inner.contains(&entity) {
            Some(WallSide::Inner)
        } else if self.outer.contains(&entity) {
            Some(WallSide::Outer)
        } else {
            None
        }
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.side_of(entity).is_some()
    }

    pub fn len(&self) -> usize {
        self.inner.len() + self.outer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Marker for the translucent track-surface mesh.
#[derive(Component)]
pub struct TrackSurface;

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Turn a wall shape into collider pieces for a boundary of `radius`.
pub fn wall_pieces(
    shape: WallShape,
    side: WallSide,
    center: Vec2,
    radius: f32,
    segment_thickness: f32,
    box_thickness: f32,
) -> Vec<WallPiece> {
    match shape {
        WallShape::Circle => vec![WallPiece::Ball { center, radius }],
        WallShape::Segmented { segments } => {
            ring_segments(center, radius, segments, segment_thickness)
                .into_iter()
                .map(WallPiece::Segment)
                .collect()
        }
        WallShape::Box { size } => box_segments(
            center,
            WallShape::box_size(size, side, radius),
            box_thickness,
            side,
        )
        .into_iter()
        .map(WallPiece::Segment)
        .collect(),
    }
}

impl WallPiece {
    fn collider(&self) -> Collider {
        match *self {
            WallPiece::Ball { radius, .. } => Collider::ball(radius),
            WallPiece::Segment(seg) => Collider::cuboid(seg.length / 2.0, seg.thickness / 2.0),
        }
    }

    fn transform(&self) -> Transform {
        match *self {
            WallPiece::Ball { center, .. } => Transform::from_translation(center.extend(0.0)),
            WallPiece::Segment(seg) => Transform::from_translation(seg.position.extend(0.0))
                .with_rotation(Quat::from_rotation_z(seg.rotation)),
        }
    }
}

// ── Startup ───────────────────────────────────────────────────────────────────

/// Startup system: insert the [`Track`] resource, spawn both walls, and insert
/// the filled [`WallRegistry`].
///
/// Must run after [`crate::config::load_game_config`] and before any system
/// that spawns players (they read the `Track` resource).
pub fn spawn_track_system(mut commands: Commands, config: Res<GameConfig>) {
    let track = match config.track() {
        Ok(track) => track,
        Err(e) => {
            error!("{e}; track not spawned");
            return;
        }
    };

    let mut registry = WallRegistry::default();
    for (side, shape, radius) in [
        (WallSide::Inner, config.inner_wall, track.inner_radius()),
        (WallSide::Outer, config.outer_wall, track.outer_radius()),
    ] {
        let pieces = wall_pieces(
            shape,
            side,
            track.center(),
            radius,
            config.wall_segment_thickness,
            config.box_wall_thickness,
        );
        for piece in &pieces {
            let entity = commands
                .spawn((
                    Wall(side),
                    *piece,
                    RigidBody::Fixed,
                    piece.collider(),
                    CollisionGroups::new(
                        bevy_rapier2d::geometry::Group::GROUP_1,
                        bevy_rapier2d::geometry::Group::GROUP_2,
                    ),
                    piece.transform(),
                ))
                .id();
            registry.register(side, entity);
        }
        info!("Created {} {} wall piece(s) ({:?})", pieces.len(), side.as_str(), shape);
    }

    commands.insert_resource(track);
    commands.insert_resource(registry);
}

/// Startup system: spawn the translucent ring between the two walls.
pub fn spawn_track_surface_system(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    track: Option<Res<Track>>,
) {
    let Some(track) = track else {
        return;
    };
    let mesh = meshes.add(annulus_mesh(track.inner_radius(), track.outer_radius(), 96));
    let mat = materials.add(ColorMaterial::from_color(Color::srgba(0.25, 0.25, 0.35, 0.3)));
    commands.spawn((
        TrackSurface,
        Mesh2d(mesh),
        MeshMaterial2d(mat),
        // Behind walls and players.
        Transform::from_translation(track.center().extend(-1.0)),
    ));
}

// ── Rendering ─────────────────────────────────────────────────────────────────

fn wall_color(side: WallSide) -> Color {
    match side {
        WallSide::Inner => Color::srgb(0.0, 0.0, 1.0),
        WallSide::Outer => Color::srgb(1.0, 0.0, 0.0),
    }
}

/// Draw every wall piece as a coloured outline (inner blue, outer red).
pub fn wall_outline_gizmo_system(
    mut gizmos: Gizmos,
    walls: Query<(&Wall, &WallPiece)>,
    overlay: Res<OverlayState>,
) {
    if !overlay.show_wall_outlines {
        return;
    }
    for (wall, piece) in walls.iter() {
        let color = wall_color(wall.0);
        match *piece {
            WallPiece::Ball { center, radius } => {
                gizmos.circle_2d(center, radius, color);
            }
            WallPiece::Segment(seg) => {
                let (start, end) = seg.endpoints();
                gizmos.line_2d(start, end, color);
            }
        }
    }
}

/// Build a flat ring mesh between `inner` and `outer` radii.
///
/// `segments` quads around the circle, two triangles each.
pub fn annulus_mesh(inner: f32, outer: f32, segments: u32) -> Mesh {
    let mut positions: Vec<[f32; 3]> = Vec::with_capacity(segments as usize * 2);
    for i in 0..segments {
        let dir = Vec2::from_angle(i as f32 / segments as f32 * TAU);
        let a = dir * inner;
        let b = dir * outer;
        positions.push([a.x, a.y, 0.0]);
        positions.push([b.x, b.y, 0.0]);
    }
    let normals: Vec<[f32; 3]> = vec![[0.0, 0.0, 1.0]; positions.len()];

    let mut indices: Vec<u32> = Vec::with_capacity(segments as usize * 6);
    for i in 0..segments {
        let i0 = i * 2;
        let i1 = ((i + 1) % segments) * 2;
        // inner_i, outer_i, outer_next / inner_i, outer_next, inner_next
        indices.extend_from_slice(&[i0, i0 + 1, i1 + 1, i0, i1 + 1, i1]);
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
