//! View frustum planes and AABB tests
//!
//! Planes point inwards: a point is inside when `dot(normal, p) + d >= 0`.

use super::aabb::Aabb;
use glam::{Mat4, Vec3, Vec4};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub normal: Vec3,
    pub d: f32,
}

impl Plane {
    /// Normalize plane equation
    pub fn from_vec4(v: Vec4) -> Self {
        let normal = v.truncate();
        let length = normal.length();
        if length > 0.0 {
            Self {
                normal: normal / length,
                d: v.w / length,
            }
        } else {
            Self { normal, d: v.w }
        }
    }

    pub fn signed_distance(&self, point: Vec3) -> f32 {
        self.normal.dot(point) + self.d
    }

    pub fn to_array(&self) -> [f32; 4] {
        [self.normal.x, self.normal.y, self.normal.z, self.d]
    }
}

/// Returns false only when the whole box lies behind the plane
pub fn test_aabb_to_plane(aabb: &Aabb, plane: &Plane) -> bool {
    // Positive vertex: the box corner furthest along the plane normal
    let positive = Vec3::select(plane.normal.cmpge(Vec3::ZERO), aabb.max, aabb.min);
    plane.signed_distance(positive) >= 0.0
}

/// 6 planes: left, right, bottom, top, near, far
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frustum {
    pub planes: [Plane; 6],
}

impl Frustum {
    /// Extract planes using Gribb-Hartmann for a 0..1 depth range
    pub fn from_view_projection(vp: &Mat4) -> Self {
        let r0 = vp.row(0);
        let r1 = vp.row(1);
        let r2 = vp.row(2);
        let r3 = vp.row(3);

        Self {
            planes: [
                Plane::from_vec4(r3 + r0),
                Plane::from_vec4(r3 - r0),
                Plane::from_vec4(r3 + r1),
                Plane::from_vec4(r3 - r1),
                Plane::from_vec4(r2),
                Plane::from_vec4(r3 - r2),
            ],
        }
    }

    /// False if the box lies completely outside any plane
    pub fn intersects_aabb(&self, aabb: &Aabb) -> bool {
        self.planes.iter().all(|plane| test_aabb_to_plane(aabb, plane))
    }

    pub fn contains_point(&self, point: Vec3) -> bool {
        self.planes.iter().all(|plane| plane.signed_distance(point) >= 0.0)
    }

    pub fn to_arrays(&self) -> [[f32; 4]; 6] {
        self.planes.map(|p| p.to_array())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounds::aabb::create_aabb;

    fn looking_down_neg_z() -> Frustum {
        let view = Mat4::look_at_rh(Vec3::ZERO, Vec3::NEG_Z, Vec3::Y);
        let proj = Mat4::perspective_rh(60f32.to_radians(), 1.0, 0.1, 100.0);
        Frustum::from_view_projection(&(proj * view))
    }

    #[test]
    fn test_points() {
        let frustum = looking_down_neg_z();
        assert!(frustum.contains_point(Vec3::new(0.0, 0.0, -10.0)));
        assert!(!frustum.contains_point(Vec3::new(0.0, 0.0, 10.0)));
        assert!(!frustum.contains_point(Vec3::new(0.0, 0.0, -200.0)));
        assert!(!frustum.contains_point(Vec3::new(50.0, 0.0, -10.0)));
    }

    #[test]
    fn test_boxes() {
        let frustum = looking_down_neg_z();
        let inside = create_aabb(Vec3::new(-1.0, -1.0, -11.0), Vec3::new(1.0, 1.0, -9.0));
        let behind = create_aabb(Vec3::new(-1.0, -1.0, 5.0), Vec3::new(1.0, 1.0, 9.0));
        let straddling = create_aabb(Vec3::new(-1.0, -1.0, -5.0), Vec3::new(1.0, 1.0, 5.0));
        assert!(frustum.intersects_aabb(&inside));
        assert!(!frustum.intersects_aabb(&behind));
        assert!(frustum.intersects_aabb(&straddling));
    }

    #[test]
    fn test_orthographic_planes() {
        let view = Mat4::look_at_rh(Vec3::new(0.0, 10.0, 0.0), Vec3::ZERO, Vec3::Z);
        let proj = Mat4::orthographic_rh(-5.0, 5.0, -5.0, 5.0, 0.0, 20.0);
        let frustum = Frustum::from_view_projection(&(proj * view));
        assert!(frustum.contains_point(Vec3::new(4.0, 0.0, 4.0)));
        assert!(!frustum.contains_point(Vec3::new(6.0, 0.0, 0.0)));
    }
}
