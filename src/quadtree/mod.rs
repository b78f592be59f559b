/// Quadtree Module - flat-array terrain quadtree
///
/// - node_index.rs: (mip, index) <-> array offset arithmetic
/// - quadtree_data.rs: TNode and QuadTree data
/// - quadtree_operations.rs: one-time node generation from a heightmap

pub mod node_index;
pub mod quadtree_data;
pub mod quadtree_operations;

pub use node_index::{
    checked_node_offset, child_indices, mip_level_node_offset, node_address_from_offset,
    node_coords, node_index_at, parent_index, specific_mip_level_node_count,
    specific_mip_level_node_in_array_offset, specific_mip_level_node_width,
    specific_mip_level_width, to_mip_level_node_count, validate_mip_count,
};
pub use quadtree_data::{
    QuadTree, QuadTreeStats, TNode, NEIGHBOR_NEG_X, NEIGHBOR_NEG_Z, NEIGHBOR_POS_X,
    NEIGHBOR_POS_Z, NODE_FLAG_EMPTY,
};
pub use quadtree_operations::{
    build_quadtree, get_node, get_stats, is_empty, is_leaf, mip_nodes, neighbor_flags,
    node_bytes, node_rect,
};
