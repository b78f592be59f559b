//! Quadtree Operations - Pure DOP Functions
//!
//! Builds the flat node array once per heightmap. Leaves sample the
//! heightmap directly; internal nodes merge their four children.

use super::node_index::{
    child_indices, node_coords, specific_mip_level_node_count,
    specific_mip_level_node_in_array_offset, specific_mip_level_node_width,
    specific_mip_level_width, to_mip_level_node_count, validate_mip_count,
};
use super::quadtree_data::{
    QuadTree, QuadTreeStats, TNode, NEIGHBOR_NEG_X, NEIGHBOR_NEG_Z, NEIGHBOR_POS_X, NEIGHBOR_POS_Z,
    NODE_FLAG_EMPTY,
};
use crate::error::TerrainResult;
use crate::heightmap::{is_height_sentinel, sample_height, Heightmap};
use crate::terrain_space::TerrainSpace;
use bytemuck::Zeroable;
use glam::Vec2;

/// Running min/max while building
#[derive(Clone, Copy)]
struct HeightRange {
    min: f32,
    max: f32,
    empty: bool,
}

impl HeightRange {
    const EMPTY: Self = Self {
        min: f32::MAX,
        max: f32::MIN,
        empty: true,
    };

    fn include(&mut self, other: HeightRange) {
        if other.empty {
            return;
        }
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
        self.empty = false;
    }
}

struct BuildState<'a> {
    heightmap: &'a Heightmap,
    space: &'a TerrainSpace,
    mip_count: u32,
    nodes: Vec<TNode>,
    samples_taken: usize,
}

/// Check if node is a leaf (finest mip)
pub fn is_leaf(tree: &QuadTree, node: &TNode) -> bool {
    node.mip + 1 == tree.mip_count
}

/// Check if node has no valid height data
pub fn is_empty(node: &TNode) -> bool {
    node.flags & NODE_FLAG_EMPTY != 0
}

/// World-space rectangle of a node
pub fn node_rect(space: &TerrainSpace, mip: u32, index: u32) -> [f32; 4] {
    let (x, z) = node_coords(mip, index);
    let width = specific_mip_level_width(space.size, mip);
    [
        space.origin.x + x as f32 * width,
        space.origin.y + z as f32 * width,
        width,
        width,
    ]
}

/// Same-mip neighbour bits for a node
pub fn neighbor_flags(mip: u32, index: u32) -> u32 {
    let (x, z) = node_coords(mip, index);
    let last = specific_mip_level_node_width(mip) - 1;
    let mut flags = 0;
    if x > 0 {
        flags |= NEIGHBOR_NEG_X;
    }
    if x < last {
        flags |= NEIGHBOR_POS_X;
    }
    if z > 0 {
        flags |= NEIGHBOR_NEG_Z;
    }
    if z < last {
        flags |= NEIGHBOR_POS_Z;
    }
    flags
}

/// Build the quadtree over a heightmap
///
/// The array length is exactly `to_mip_level_node_count(mip_count - 1)`.
pub fn build_quadtree(
    heightmap: &Heightmap,
    space: &TerrainSpace,
    mip_count: u32,
) -> TerrainResult<QuadTree> {
    validate_mip_count(mip_count)?;

    let total = to_mip_level_node_count(mip_count - 1) as usize;
    let mut state = BuildState {
        heightmap,
        space,
        mip_count,
        nodes: vec![TNode::zeroed(); total],
        samples_taken: 0,
    };

    for index in 0..specific_mip_level_node_count(0) {
        build_node(&mut state, 0, index);
    }

    log::info!(
        "[build_quadtree] Built {} nodes over {} mips ({} height samples)",
        state.nodes.len(),
        mip_count,
        state.samples_taken
    );

    Ok(QuadTree {
        nodes: state.nodes,
        mip_count,
        terrain_size: space.size,
        origin: space.origin.to_array(),
        samples_taken: state.samples_taken,
    })
}

fn build_node(state: &mut BuildState, mip: u32, index: u32) -> HeightRange {
    let rect = node_rect(state.space, mip, index);

    let range = if mip + 1 == state.mip_count {
        sample_leaf(state, rect)
    } else {
        let mut range = HeightRange::EMPTY;
        for child in child_indices(mip, index) {
            let child_range = build_node(state, mip + 1, child);
            range.include(child_range);
        }
        range
    };

    let (min_height, max_height, flags) = if range.empty {
        (0.0, 0.0, NODE_FLAG_EMPTY)
    } else {
        (
            range.min * state.space.height_scale,
            range.max * state.space.height_scale,
            0,
        )
    };

    let offset = specific_mip_level_node_in_array_offset(mip, index) as usize;
    state.nodes[offset] = TNode {
        rect,
        min_height,
        max_height,
        mip,
        index,
        neighbor_flags: neighbor_flags(mip, index),
        flags,
        _padding: [0; 2],
    };

    range
}

/// Min/max over every integer texel inside the closed leaf rectangle
fn sample_leaf(state: &mut BuildState, rect: [f32; 4]) -> HeightRange {
    let min = Vec2::new(rect[0], rect[1]);
    let max = min + Vec2::new(rect[2], rect[3]);
    let (x0, y0, x1, y1) = state.space.texel_rect(min, max);

    let mut range = HeightRange::EMPTY;
    for y in y0..=y1 {
        for x in x0..=x1 {
            let h = sample_height(state.heightmap, x as f32, y as f32);
            state.samples_taken += 1;
            if is_height_sentinel(h) {
                continue;
            }
            range.include(HeightRange {
                min: h,
                max: h,
                empty: false,
            });
        }
    }
    range
}

/// Get node by address
pub fn get_node(tree: &QuadTree, mip: u32, index: u32) -> Option<&TNode> {
    if mip >= tree.mip_count || index >= specific_mip_level_node_count(mip) {
        return None;
    }
    tree.nodes
        .get(specific_mip_level_node_in_array_offset(mip, index) as usize)
}

/// All nodes of one mip level
pub fn mip_nodes(tree: &QuadTree, mip: u32) -> &[TNode] {
    if mip >= tree.mip_count {
        return &[];
    }
    let start = specific_mip_level_node_in_array_offset(mip, 0) as usize;
    let end = to_mip_level_node_count(mip) as usize;
    &tree.nodes[start..end]
}

/// Raw bytes for upload
pub fn node_bytes(tree: &QuadTree) -> &[u8] {
    bytemuck::cast_slice(&tree.nodes)
}

/// Get quadtree statistics
pub fn get_stats(tree: &QuadTree) -> QuadTreeStats {
    QuadTreeStats {
        node_count: tree.nodes.len(),
        leaf_count: mip_nodes(tree, tree.mip_count - 1).len(),
        empty_nodes: tree.nodes.iter().filter(|n| is_empty(n)).count(),
        samples_taken: tree.samples_taken,
        memory_usage_kb: std::mem::size_of_val(tree.nodes.as_slice()) as f32 / 1024.0,
    }
}
