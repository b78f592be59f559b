//! LOD map - selected mip per finest-level cell
//!
//! Written after traversal, read by the patch builder to find coarser
//! neighbours and stitch T-junctions.

use super::culling_data::{LodMap, Side, LOD_UNSET};
use crate::error::TerrainResult;
use crate::quadtree::{
    node_coords, specific_mip_level_node_width, validate_mip_count, QuadTree, TNode,
};

pub fn create_lod_map(mip_count: u32) -> TerrainResult<LodMap> {
    validate_mip_count(mip_count)?;
    let width = specific_mip_level_node_width(mip_count - 1);
    Ok(LodMap {
        width,
        mip_count,
        cells: vec![LOD_UNSET; (width * width) as usize],
    })
}

pub fn reset_lod_map(map: &mut LodMap) {
    map.cells.fill(LOD_UNSET);
}

/// Finest-level cell range `[x0, x1) x [z0, z1)` covered by a node
fn node_cells(map: &LodMap, node: &TNode) -> (u32, u32, u32, u32) {
    let shift = map.mip_count - 1 - node.mip;
    let (x, z) = node_coords(node.mip, node.index);
    (x << shift, z << shift, (x + 1) << shift, (z + 1) << shift)
}

/// Stamp every accepted node's mip into the cells it covers
pub fn write_lod_map(map: &mut LodMap, tree: &QuadTree, final_nodes: &[u32]) {
    reset_lod_map(map);
    for &offset in final_nodes {
        let node = &tree.nodes[offset as usize];
        let (x0, z0, x1, z1) = node_cells(map, node);
        for z in z0..z1 {
            let row = (z * map.width) as usize;
            map.cells[row + x0 as usize..row + x1 as usize].fill(node.mip as u8);
        }
    }
}

/// Selected mip at a cell, `None` if unset or outside the map
pub fn lod_at(map: &LodMap, x: i64, z: i64) -> Option<u8> {
    if x < 0 || z < 0 || x >= map.width as i64 || z >= map.width as i64 {
        return None;
    }
    let value = map.cells[(z as u32 * map.width + x as u32) as usize];
    (value != LOD_UNSET).then_some(value)
}

/// How many mips coarser the neighbour across `side` is (0 if same or finer)
///
/// A coarser neighbour always spans the whole edge, so one cell is enough.
pub fn lod_transition(map: &LodMap, node: &TNode, side: Side) -> u32 {
    let (x0, z0, x1, z1) = node_cells(map, node);
    let (x, z) = match side {
        Side::NegX => (x0 as i64 - 1, z0 as i64),
        Side::PosX => (x1 as i64, z0 as i64),
        Side::NegZ => (x0 as i64, z0 as i64 - 1),
        Side::PosZ => (x0 as i64, z1 as i64),
    };
    match lod_at(map, x, z) {
        Some(neighbour) if (neighbour as u32) < node.mip => node.mip - neighbour as u32,
        _ => 0,
    }
}
