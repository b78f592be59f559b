//! Quadtree Data - Pure DOP
//!
//! NO METHODS. Just data.
//! All transformations happen in quadtree_operations.rs

use bytemuck::{Pod, Zeroable};

/// Neighbour adjacency bits (same-mip neighbour exists on that side)
pub const NEIGHBOR_NEG_X: u32 = 1 << 0;
pub const NEIGHBOR_POS_X: u32 = 1 << 1;
pub const NEIGHBOR_NEG_Z: u32 = 1 << 2;
pub const NEIGHBOR_POS_Z: u32 = 1 << 3;

/// Node flag: no valid height sample under this node
pub const NODE_FLAG_EMPTY: u32 = 1 << 0;

/// Terrain quadtree node, stored in the flat node buffer
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct TNode {
    /// World rectangle: x_min, z_min, width, height
    pub rect: [f32; 4],
    /// Minimum height over the covered area (world units)
    pub min_height: f32,
    /// Maximum height over the covered area (world units)
    pub max_height: f32,
    /// Mip level (0 = coarsest)
    pub mip: u32,
    /// Linear index within the mip
    pub index: u32,
    /// NEIGHBOR_* bits
    pub neighbor_flags: u32,
    /// NODE_FLAG_* bits
    pub flags: u32,
    pub _padding: [u32; 2],
}

static_assertions::const_assert_eq!(std::mem::size_of::<TNode>(), 48);

/// Flat-array quadtree; node (mip, index) lives at
/// `specific_mip_level_node_in_array_offset(mip, index)`
#[derive(Debug, Clone, PartialEq)]
pub struct QuadTree {
    pub nodes: Vec<TNode>,
    pub mip_count: u32,
    pub terrain_size: f32,
    pub origin: [f32; 2],
    /// Height samples read while building
    pub samples_taken: usize,
}

/// Build statistics
#[derive(Debug, Clone, Copy, Default)]
pub struct QuadTreeStats {
    pub node_count: usize,
    pub leaf_count: usize,
    pub empty_nodes: usize,
    pub samples_taken: usize,
    pub memory_usage_kb: f32,
}
