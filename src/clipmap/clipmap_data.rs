//! Clipmap Data - Pure DOP
//!
//! NO METHODS. Just data.
//! Mesh generation is in clipmap_meshes.rs, per-frame snapping in
//! clipmap_operations.rs.

use crate::constants::clipmap::{MAX_LEVEL_COUNT, TILES_PER_RING};
use bytemuck::{Pod, Zeroable};
use glam::Vec2;

/// Grid-space mesh on the xz plane; `[x, z]` in units of one ring cell
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClipmapMesh {
    pub vertices: Vec<[f32; 2]>,
    pub indices: Vec<u32>,
}

/// The five archetypes, built once
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClipmapMeshes {
    pub tile: ClipmapMesh,
    pub filler: ClipmapMesh,
    pub trim: ClipmapMesh,
    pub cross: ClipmapMesh,
    pub seam: ClipmapMesh,
}

/// World placement of one archetype instance
///
/// world = position + rotate(local * scale, rotation)
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct ClipmapInstance {
    pub position: [f32; 2],
    pub scale: f32,
    /// Clockwise quarter turns seen from +y: (x, z) -> (z, -x)
    pub rotation: u32,
}

static_assertions::const_assert_eq!(std::mem::size_of::<ClipmapInstance>(), 16);

/// Transforms for one ring, overwritten in place on re-snap
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ClipmapRing {
    pub level: u32,
    pub scale: f32,
    pub snapped: Vec2,
    pub tile_count: u32,
    pub tiles: [ClipmapInstance; TILES_PER_RING],
    pub filler: Option<ClipmapInstance>,
    pub trim: Option<ClipmapInstance>,
    pub seam: Option<ClipmapInstance>,
}

/// Bit `l` set when ring `l` was re-snapped
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResnapMask(pub u32);

#[derive(Debug, Clone, PartialEq)]
pub struct ClipmapState {
    pub tile_resolution: u32,
    pub level_count: u32,
    pub meshes: ClipmapMeshes,
    /// `f32::MAX` until the first snap
    pub last_snapped: [Vec2; MAX_LEVEL_COUNT],
    pub rings: [ClipmapRing; MAX_LEVEL_COUNT],
    pub cross: Option<ClipmapInstance>,
}

/// Instance totals across all rings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClipmapDrawCounts {
    pub tiles: u32,
    pub fillers: u32,
    pub trims: u32,
    pub seams: u32,
    pub crosses: u32,
}
