/// Data-Oriented Axis-Aligned Bounding Box
///
/// Pure functions for terrain bounds - no methods, just data transformations.
use glam::Vec3;

/// Axis-Aligned Bounding Box - pure data structure
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

/// Create new AABB from min/max points
pub fn create_aabb(min: Vec3, max: Vec3) -> Aabb {
    Aabb { min, max }
}

/// Create AABB from a world xz rectangle and a height range
/// Pure function - lifts a terrain footprint into 3D
pub fn aabb_from_rect(rect: [f32; 4], min_height: f32, max_height: f32) -> Aabb {
    Aabb {
        min: Vec3::new(rect[0], min_height, rect[1]),
        max: Vec3::new(rect[0] + rect[2], max_height, rect[1] + rect[3]),
    }
}

/// Get center point of AABB
pub fn aabb_center(aabb: &Aabb) -> Vec3 {
    (aabb.min + aabb.max) * 0.5
}

/// Get half extents of AABB
pub fn aabb_half_extents(aabb: &Aabb) -> Vec3 {
    (aabb.max - aabb.min) * 0.5
}

/// Test if AABB contains a point
pub fn aabb_contains_point(aabb: &Aabb, point: Vec3) -> bool {
    point.cmpge(aabb.min).all() && point.cmple(aabb.max).all()
}

/// Distance from a point to the closest point of the AABB (0 inside)
pub fn aabb_distance_to_point(aabb: &Aabb, point: Vec3) -> f32 {
    let closest = point.clamp(aabb.min, aabb.max);
    closest.distance(point)
}
