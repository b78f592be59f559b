/// Bounds Module - AABBs and frustum tests used by terrain culling

pub mod aabb;
pub mod frustum;

pub use aabb::{
    aabb_center, aabb_contains_point, aabb_distance_to_point, aabb_from_rect, aabb_half_extents,
    create_aabb, Aabb,
};
pub use frustum::{test_aabb_to_plane, Frustum, Plane};
