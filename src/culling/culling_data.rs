//! Culling Data - Pure DOP
//!
//! NO METHODS. Just data.
//! Traversal, LOD map and patch building live in their own operation files.

use crate::bounds::Frustum;
use crate::constants::quadtree::MAX_TERRAIN_MIP_LEVEL;
use crate::gpu_buffer::StructuredBuffer;
use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

/// LOD map cell not covered by any accepted node
pub const LOD_UNSET: u8 = u8::MAX;

/// One drawable patch, packed into the per-view patch buffer
/// Must match shader layout exactly
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct RenderPatch {
    /// World xz of the patch minimum corner
    pub position: [f32; 2],
    /// World edge length
    pub size: f32,
    /// Mip of the node this patch came from (0 = coarsest)
    pub lod: u32,
    pub min_height: f32,
    pub max_height: f32,
    /// Mips the neighbour is coarser by: -x, +x, -z, +z
    pub lod_transition: [u32; 4],
    /// Row in the material table
    pub material_index: u32,
    /// Array offset of the source node
    pub node_offset: u32,
}

static_assertions::const_assert_eq!(std::mem::size_of::<RenderPatch>(), 48);

/// Patch / node sides, in `lod_transition` order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    NegX = 0,
    PosX = 1,
    NegZ = 2,
    PosZ = 3,
}

pub const ALL_SIDES: [Side; 4] = [Side::NegX, Side::PosX, Side::NegZ, Side::PosZ];

/// What the traversal does with one node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeDecision {
    Cull,
    Accept,
    Subdivide,
}

/// One traversal's view: culling frustum plus the LOD reference
///
/// Light views keep the main camera's origin and projection scale so shadow
/// geometry matches what the camera draws.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraversalView {
    pub view_proj: Mat4,
    pub frustum: Frustum,
    pub lod_origin: Vec3,
    pub projection_scale: f32,
}

/// LOD selection parameters, copied out of the terrain config
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LodSettings {
    pub mip_count: u32,
    /// Quads per node edge at any mip (patches per axis * patch grid)
    pub quads_per_node_edge: u32,
    pub screen_error_threshold: f32,
    pub lod_floor_pixels: f32,
    pub height_error_weight: f32,
}

/// Node work queues and the accepted-node list for one view
///
/// Entries are node array offsets. `current` and `next` ping-pong between
/// levels.
#[derive(Debug, Clone)]
pub struct TraversalBuffers {
    pub current: StructuredBuffer<u32>,
    pub next: StructuredBuffer<u32>,
    pub final_nodes: StructuredBuffer<u32>,
}

/// Selected mip per finest-level cell
#[derive(Debug, Clone, PartialEq)]
pub struct LodMap {
    /// Cells per row (finest mip node width)
    pub width: u32,
    pub mip_count: u32,
    pub cells: Vec<u8>,
}

/// Visible patch count finalized for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VisiblePatchCounter {
    pub count: u32,
    pub frame: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LevelStats {
    pub visited: u32,
    pub accepted: u32,
    pub subdivided: u32,
    pub culled: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraversalStats {
    pub level_count: u32,
    pub levels: [LevelStats; MAX_TERRAIN_MIP_LEVEL as usize],
    pub final_nodes: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PatchBuildStats {
    pub tested: u32,
    pub visible: u32,
    pub holes: u32,
}

/// Everything one view produced this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewCullStats {
    pub traversal: TraversalStats,
    pub patches: PatchBuildStats,
    pub instance_count: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameCullStats {
    pub frame: u64,
    pub main: ViewCullStats,
    pub lights: Vec<ViewCullStats>,
}
