/// Heightmap Module - Data-Oriented Programming (DOP) style
///
/// - heightmap_data.rs: decoded heightmap / normal map data
/// - heightmap_operations.rs: decoding and sentinel-aware sampling
/// - pyramid.rs: min/max height mip chain for conservative bounds

pub mod heightmap_data;
pub mod heightmap_operations;
pub mod pyramid;

pub use heightmap_data::{HeightEncoding, Heightmap, NormalMap};
pub use heightmap_operations::{
    content_hash, create_constant_heightmap, create_heightmap, create_normal_map,
    decode_height, heightmap_from_rgba8, in_bounds, is_height_sentinel, load_heightmap,
    normal_map_from_rgba8, sample_height, sample_normal, texel,
};
pub use pyramid::{MinMaxPyramid, PyramidLevel};
