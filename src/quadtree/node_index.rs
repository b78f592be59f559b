//! Quadtree node addressing
//!
//! Maps (mip level, index within mip) to an offset in the flat node array.
//! Mip 0 is the coarsest level. All functions are exact integer arithmetic.

use crate::constants::quadtree::{
    MAX_TERRAIN_MIP_LEVEL, ROOT_LEVEL_NODE_COUNT_BIT, ROOT_LEVEL_NODE_WIDTH,
    SUB_LEVEL_NODE_COUNT_BIT,
};
use crate::error::{invalid_config, TerrainError, TerrainResult};

/// Mip counts outside `1..=MAX_TERRAIN_MIP_LEVEL` have no finest level or
/// overflow the u32 offsets
pub fn validate_mip_count(mip_count: u32) -> TerrainResult<()> {
    if mip_count == 0 || mip_count > MAX_TERRAIN_MIP_LEVEL {
        return Err(invalid_config(
            "mip_level_count",
            mip_count,
            "must be between 1 and 8",
        ));
    }
    Ok(())
}

/// Number of nodes at a single mip level
pub const fn specific_mip_level_node_count(mip: u32) -> u32 {
    1 << (ROOT_LEVEL_NODE_COUNT_BIT + mip * SUB_LEVEL_NODE_COUNT_BIT)
}

/// Nodes per row at a single mip level
pub const fn specific_mip_level_node_width(mip: u32) -> u32 {
    ROOT_LEVEL_NODE_WIDTH << mip
}

/// Cumulative node count of mips `0..=mip`
pub const fn to_mip_level_node_count(mip: u32) -> u32 {
    let mut total = 0;
    let mut level = 0;
    while level <= mip {
        total += specific_mip_level_node_count(level);
        level += 1;
    }
    total
}

/// Offset of the first node of `mip` (cumulative count of the coarser mips)
pub const fn mip_level_node_offset(mip: u32) -> u32 {
    if mip == 0 {
        0
    } else {
        to_mip_level_node_count(mip - 1)
    }
}

/// Offset of node `index` of `mip` in the flat array
pub const fn specific_mip_level_node_in_array_offset(mip: u32, index: u32) -> u32 {
    mip_level_node_offset(mip) + index
}

/// World-space width of one node at `mip`
pub fn specific_mip_level_width(terrain_size: f32, mip: u32) -> f32 {
    terrain_size / specific_mip_level_node_width(mip) as f32
}

/// Checked variant of [`specific_mip_level_node_in_array_offset`]
pub fn checked_node_offset(mip: u32, index: u32, mip_count: u32) -> TerrainResult<u32> {
    if mip >= mip_count || index >= specific_mip_level_node_count(mip) {
        return Err(TerrainError::NodeIndexOutOfRange {
            mip,
            index: index as u64,
        });
    }
    Ok(specific_mip_level_node_in_array_offset(mip, index))
}

/// Inverse of [`specific_mip_level_node_in_array_offset`]
pub fn node_address_from_offset(offset: u32, mip_count: u32) -> TerrainResult<(u32, u32)> {
    for mip in 0..mip_count {
        let end = to_mip_level_node_count(mip);
        if offset < end {
            return Ok((mip, offset - mip_level_node_offset(mip)));
        }
    }
    Err(TerrainError::NodeIndexOutOfRange {
        mip: mip_count,
        index: offset as u64,
    })
}

/// Grid coordinates of a node within its mip (row-major)
pub const fn node_coords(mip: u32, index: u32) -> (u32, u32) {
    let width = specific_mip_level_node_width(mip);
    (index % width, index / width)
}

/// Index of the node at grid coordinates `(x, z)` within `mip`
pub const fn node_index_at(mip: u32, x: u32, z: u32) -> u32 {
    z * specific_mip_level_node_width(mip) + x
}

/// The four children at `mip + 1`, ordered (x, z): (0,0) (1,0) (0,1) (1,1)
pub const fn child_indices(mip: u32, index: u32) -> [u32; 4] {
    let (x, z) = node_coords(mip, index);
    let child = mip + 1;
    [
        node_index_at(child, 2 * x, 2 * z),
        node_index_at(child, 2 * x + 1, 2 * z),
        node_index_at(child, 2 * x, 2 * z + 1),
        node_index_at(child, 2 * x + 1, 2 * z + 1),
    ]
}

/// Parent index at `mip - 1`; `None` for the root mip
pub const fn parent_index(mip: u32, index: u32) -> Option<u32> {
    if mip == 0 {
        return None;
    }
    let (x, z) = node_coords(mip, index);
    Some(node_index_at(mip - 1, x / 2, z / 2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::quadtree::TERRAIN_MIP_LEVEL;
    use std::collections::HashSet;

    #[test]
    fn test_known_counts() {
        assert_eq!(specific_mip_level_node_count(0), 64);
        assert_eq!(specific_mip_level_node_count(1), 256);
        assert_eq!(specific_mip_level_node_count(5), 65536);
        assert_eq!(specific_mip_level_node_width(0), 8);
        assert_eq!(specific_mip_level_node_width(5), 256);
        assert_eq!(to_mip_level_node_count(0), 64);
        assert_eq!(to_mip_level_node_count(1), 320);
        assert_eq!(to_mip_level_node_count(5), 87360);
    }

    #[test]
    fn test_known_offsets() {
        assert_eq!(specific_mip_level_node_in_array_offset(0, 0), 0);
        assert_eq!(specific_mip_level_node_in_array_offset(0, 63), 63);
        assert_eq!(specific_mip_level_node_in_array_offset(1, 0), 64);
        assert_eq!(specific_mip_level_node_in_array_offset(2, 5), 325);
        assert_eq!(specific_mip_level_node_in_array_offset(5, 0), 21824);
    }

    #[test]
    fn test_offsets_exact_and_injective() {
        let mut seen = HashSet::new();
        for mip in 0..TERRAIN_MIP_LEVEL {
            for index in 0..specific_mip_level_node_count(mip) {
                let offset = specific_mip_level_node_in_array_offset(mip, index);
                let expected = if mip == 0 {
                    index
                } else {
                    to_mip_level_node_count(mip - 1) + index
                };
                assert_eq!(offset, expected);
                assert!(seen.insert(offset), "duplicate offset {offset}");
            }
        }
        assert_eq!(seen.len() as u32, to_mip_level_node_count(TERRAIN_MIP_LEVEL - 1));
    }

    #[test]
    fn test_inverse_round_trip() {
        for offset in (0..to_mip_level_node_count(TERRAIN_MIP_LEVEL - 1)).step_by(97) {
            let (mip, index) = node_address_from_offset(offset, TERRAIN_MIP_LEVEL).unwrap();
            assert_eq!(specific_mip_level_node_in_array_offset(mip, index), offset);
        }
        assert!(node_address_from_offset(87360, TERRAIN_MIP_LEVEL).is_err());
    }

    #[test]
    fn test_checked_offset() {
        assert_eq!(checked_node_offset(1, 3, 6).unwrap(), 67);
        assert!(checked_node_offset(0, 64, 6).is_err());
        assert!(checked_node_offset(6, 0, 6).is_err());
    }

    #[test]
    fn test_children_and_parent() {
        for mip in 0..3 {
            for index in 0..specific_mip_level_node_count(mip) {
                for child in child_indices(mip, index) {
                    assert!(child < specific_mip_level_node_count(mip + 1));
                    assert_eq!(parent_index(mip + 1, child), Some(index));
                }
            }
        }
        assert_eq!(parent_index(0, 5), None);
    }

    #[test]
    fn test_mip_count_range() {
        assert!(validate_mip_count(1).is_ok());
        assert!(validate_mip_count(8).is_ok());
        assert!(matches!(
            validate_mip_count(0),
            Err(TerrainError::InvalidConfig { ref field, .. }) if field == "mip_level_count"
        ));
        assert!(validate_mip_count(9).is_err());
    }

    #[test]
    fn test_level_width() {
        assert_eq!(specific_mip_level_width(1024.0, 0), 128.0);
        assert_eq!(specific_mip_level_width(1024.0, 5), 4.0);
    }
}
