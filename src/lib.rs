//! Hadron Collider: a two-player loop-racing arcade game.
//!
//! Two particles share an annular track bounded by an inner and an outer
//! wall.  The orbital player steers a target orbit around the centre; the
//! roller player pushes freely and spins.  Every wall contact is counted.

pub mod config;
pub mod constants;
pub mod error;
pub mod graphics;
pub mod player;
pub mod rendering;
pub mod simulation;
pub mod track;
pub mod walls;
