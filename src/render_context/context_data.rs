//! Terrain Render Context Data - Pure DOP
//!
//! NO METHODS. Just data.
//! Everything the terrain needs across frames lives in one explicit
//! context; context_operations.rs transforms it.

use crate::config::TerrainConfig;
use crate::culling::{LodMap, RenderPatch, TraversalBuffers, VisiblePatchCounter};
use crate::gpu_buffer::StructuredBuffer;
use crate::heightmap::{Heightmap, MinMaxPyramid};
use crate::indirect::{DrawTarget, IndirectCommandBuffer, IndirectDrawCommand};
use crate::patch_mesh::PatchMesh;
use crate::quadtree::QuadTree;
use crate::terrain_space::TerrainSpace;
use bytemuck::{Pod, Zeroable};

/// Rows in the material table
pub const MAX_TERRAIN_MATERIALS: usize = 64;

/// Material table row, uploaded verbatim for the shading pass
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct TerrainMaterial {
    pub albedo_texture: u32,
    pub normal_texture: u32,
    pub mask_texture: u32,
    pub flags: u32,
    pub base_color: [f32; 4],
    pub roughness: f32,
    pub metallic: f32,
    pub uv_scale: f32,
    pub normal_strength: f32,
}

static_assertions::const_assert_eq!(std::mem::size_of::<TerrainMaterial>(), 48);

/// Everything a rebuild depends on; compared by value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TerrainDescriptor {
    pub heightmap_hash: u32,
    pub width: u32,
    pub height: u32,
    pub terrain_size: f32,
    pub origin: [f32; 2],
    pub height_scale: f32,
    pub mip_count: u32,
}

/// Built once per heightmap, read-only while culling
#[derive(Debug, Clone)]
pub struct TerrainResources {
    pub descriptor: TerrainDescriptor,
    pub heightmap: Heightmap,
    pub space: TerrainSpace,
    pub pyramid: MinMaxPyramid,
    pub quadtree: QuadTree,
}

/// Per-view buffers: one for the main camera, one per shadow light
#[derive(Debug, Clone)]
pub struct ViewResources {
    pub target: DrawTarget,
    pub traversal: TraversalBuffers,
    pub lod_map: LodMap,
    pub patches: StructuredBuffer<RenderPatch>,
    pub counter: VisiblePatchCounter,
    pub commands: IndirectCommandBuffer,
}

#[derive(Debug, Clone)]
pub struct TerrainRenderContext {
    pub config: TerrainConfig,
    pub terrain: Option<TerrainResources>,
    pub patch_mesh: PatchMesh,
    pub command_template: IndirectDrawCommand,
    pub materials: StructuredBuffer<TerrainMaterial>,
    pub main_view: ViewResources,
    pub shadow_views: Vec<ViewResources>,
    /// Last frame culled; 0 before the first
    pub frame: u64,
}

/// What the draw pass reads for one target
#[derive(Debug, Clone, Copy)]
pub struct DrawPacket<'a> {
    pub frame: u64,
    pub command: &'a IndirectDrawCommand,
    pub patches: &'a [RenderPatch],
}
