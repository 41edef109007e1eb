//! Track geometry: the ring the players race around, and the static wall
//! segments that approximate its boundaries.
//!
//! Everything here is plain geometry with no ECS access; [`crate::walls`]
//! turns the segments into Rapier colliders.

use crate::constants::{MIN_WALL_SEGMENTS, WALL_SEGMENT_COUNT};
use crate::error::{GameError, GameResult};
use bevy::prelude::*;
use serde::Deserialize;
use std::f32::consts::{FRAC_PI_2, SQRT_2, TAU};

// ── Track ─────────────────────────────────────────────────────────────────────

/// The circular track: a centre point, the radius of its centre line, and
/// its width.  Walls sit at `center_radius ± width / 2`.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct Track {
    center: Vec2,
    center_radius: f32,
    width: f32,
}

impl Track {
    /// Build a track, rejecting a non-positive width or an inner wall that
    /// would collapse through the centre.
    pub fn new(center: Vec2, center_radius: f32, width: f32) -> GameResult<Self> {
        if !(width > 0.0) || !(center_radius - width / 2.0 > 0.0) {
            return Err(GameError::InvalidTrack {
                center_radius,
                width,
            });
        }
        Ok(Self {
            center,
            center_radius,
            width,
        })
    }

    pub fn center(&self) -> Vec2 {
        self.center
    }

    pub fn center_radius(&self) -> f32 {
        self.center_radius
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn inner_radius(&self) -> f32 {
        self.center_radius - self.width / 2.0
    }

    pub fn outer_radius(&self) -> f32 {
        self.center_radius + self.width / 2.0
    }

    /// Angle of `pos` around the track centre, in `(−π, π]`.
    pub fn angle_of(&self, pos: Vec2) -> f32 {
        let d = pos - self.center;
        d.y.atan2(d.x)
    }

    /// Point on the circle of `radius` at `angle` around the centre.
    pub fn point_at(&self, angle: f32, radius: f32) -> Vec2 {
        self.center + Vec2::from_angle(angle) * radius
    }

    pub fn distance_from_center(&self, pos: Vec2) -> f32 {
        pos.distance(self.center)
    }
}

// ── Wall segments ─────────────────────────────────────────────────────────────

/// One static, straight piece of wall.
///
/// `position` is the segment midpoint; the segment runs `length` along its
/// local x-axis after rotating by `rotation` radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallSegment {
    pub position: Vec2,
    pub length: f32,
    pub thickness: f32,
    pub rotation: f32,
}

impl WallSegment {
    /// Segment running from `start` to `end`.
    pub fn between(start: Vec2, end: Vec2, thickness: f32) -> Self {
        let d = end - start;
        Self {
            position: (start + end) * 0.5,
            length: d.length(),
            thickness,
            rotation: d.y.atan2(d.x),
        }
    }

    /// The two endpoints along the segment's length axis.
    pub fn endpoints(&self) -> (Vec2, Vec2) {
        let half = Vec2::from_angle(self.rotation) * (self.length / 2.0);
        (self.position - half, self.position + half)
    }
}

/// `segments` chords approximating a circle of `radius` around `center`.
///
/// Chord `i` runs from angle `i·τ/n` to `(i+1)·τ/n`, so consecutive chords
/// share endpoints and the set closes on itself.
pub fn ring_segments(
    center: Vec2,
    radius: f32,
    segments: usize,
    thickness: f32,
) -> Vec<WallSegment> {
    (0..segments)
        .map(|i| {
            let a0 = i as f32 / segments as f32 * TAU;
            let a1 = (i + 1) as f32 / segments as f32 * TAU;
            WallSegment::between(
                center + Vec2::from_angle(a0) * radius,
                center + Vec2::from_angle(a1) * radius,
                thickness,
            )
        })
        .collect()
}

/// The four sides (top, right, bottom, left) of a square box wall centred on
/// `center`.
///
/// `size` is the side length of the face the track sees: the inside face of
/// an outer box, the outside face of an inner box.  Each side is offset by
/// half its `thickness` away from the track so that face sits exactly on the
/// `±size/2` lines, and outer sides are lengthened to close the corners.
pub fn box_segments(center: Vec2, size: f32, thickness: f32, side: WallSide) -> Vec<WallSegment> {
    let (offset, length) = match side {
        WallSide::Outer => (size / 2.0 + thickness / 2.0, size + 2.0 * thickness),
        WallSide::Inner => (size / 2.0 - thickness / 2.0, size),
    };
    [
        (Vec2::new(0.0, offset), 0.0),
        (Vec2::new(offset, 0.0), FRAC_PI_2),
        (Vec2::new(0.0, -offset), 0.0),
        (Vec2::new(-offset, 0.0), FRAC_PI_2),
    ]
    .into_iter()
    .map(|(offset, rotation)| WallSegment {
        position: center + offset,
        length,
        thickness,
        rotation,
    })
    .collect()
}

// ── Wall shape ────────────────────────────────────────────────────────────────

/// How a wall boundary is turned into colliders.
///
/// In `assets/game.toml`:
///
/// ```toml
/// inner_wall = { kind = "circle" }
/// outer_wall = { kind = "segmented", segments = 48 }
/// # or: outer_wall = { kind = "segmented" }         (32 chords)
/// # or: outer_wall = { kind = "box" }               (square hugging the wall radius)
/// # or: outer_wall = { kind = "box", size = 600.0 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WallShape {
    /// A single static ball collider of the wall radius.
    Circle,
    /// `segments` cuboid chords approximating the wall circle.
    Segmented {
        #[serde(default = "default_segment_count")]
        segments: usize,
    },
    /// Four cuboid sides of a square whose track-facing face has side
    /// `size`.  When omitted, an outer box is circumscribed about the wall
    /// radius and an inner box is inscribed in it.
    Box {
        #[serde(default)]
        size: Option<f32>,
    },
}

fn default_segment_count() -> usize {
    WALL_SEGMENT_COUNT
}

/// Which boundary of the track a wall forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WallSide {
    Inner,
    Outer,
}

impl WallSide {
    pub fn as_str(self) -> &'static str {
        match self {
            WallSide::Inner => "inner",
            WallSide::Outer => "outer",
        }
    }
}

impl WallShape {
    /// Track-facing side length of a box wall forming the `side` boundary at
    /// `radius`.
    pub fn box_size(size: Option<f32>, side: WallSide, radius: f32) -> f32 {
        size.unwrap_or(match side {
            WallSide::Outer => 2.0 * radius,
            WallSide::Inner => radius * SQRT_2,
        })
    }

    /// Check that the shape can form the `side` boundary at `radius`.
    ///
    /// An outer box's inside faces must not cut inside the outer radius.  An
    /// inner box's corners must not poke out past the inner radius.
    pub fn validate(&self, side: WallSide, radius: f32) -> GameResult<()> {
        let shape = match *self {
            WallShape::Box { size } => WallShape::Box {
                size: Some(Self::box_size(size, side, radius)),
            },
            other => other,
        };
        let reason = match (shape, side) {
            (WallShape::Circle, _) => None,
            (WallShape::Segmented { segments }, _) if segments < MIN_WALL_SEGMENTS => Some(format!(
                "{} segments cannot enclose a circle (need at least {})",
                segments, MIN_WALL_SEGMENTS
            )),
            (WallShape::Segmented { .. }, _) => None,
            (WallShape::Box { size: Some(size) }, _) if !(size > 0.0) => {
                Some(format!("box size must be positive, got {}", size))
            }
            (WallShape::Box { size: Some(size) }, WallSide::Outer) if size / 2.0 < radius => {
                Some(format!(
                    "box of size {} cuts inside the outer radius {}",
                    size, radius
                ))
            }
            // Small tolerance so the inscribed default is accepted.
            (WallShape::Box { size: Some(size) }, WallSide::Inner)
                if size / 2.0 * SQRT_2 > radius + 1e-3 =>
            {
                Some(format!(
                    "box of size {} has corners past the inner radius {}",
                    size, radius
                ))
            }
            (WallShape::Box { .. }, _) => None,
        };
        match reason {
            Some(reason) => Err(GameError::InvalidWallShape {
                wall: side.as_str(),
                reason,
            }),
            None => Ok(()),
        }
    }
}
