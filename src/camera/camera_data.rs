//! Camera data structures - Pure DOP
//!
//! NO METHODS. Just data.
//! All transformations happen in camera_operations.rs

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// Camera data structure - pure data, no methods
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraData {
    /// Camera position in world space
    pub position: Vec3,

    /// Yaw rotation (radians, around Y axis)
    pub yaw_radians: f32,

    /// Pitch rotation (radians, around X axis)
    pub pitch_radians: f32,

    /// Field of view (vertical, radians)
    pub fov_radians: f32,

    /// Aspect ratio (width / height)
    pub aspect_ratio: f32,

    /// Near clipping plane distance
    pub near_plane: f32,

    /// Far clipping plane distance
    pub far_plane: f32,
}

/// Shadow-casting directional light
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    /// Direction the light travels (towards the ground)
    pub direction: Vec3,

    /// Half size of the orthographic shadow volume
    pub shadow_half_extent: f32,

    /// Distance from the shadow centre back to the light eye
    pub shadow_distance: f32,

    /// Depth range of the shadow volume
    pub shadow_depth: f32,
}

/// Per-view culling constants uploaded for the traversal
/// Must match shader layout exactly
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct GpuViewData {
    pub view_proj: [[f32; 4]; 4],
    /// LOD origin (xyz) + projection scale (w)
    pub lod_origin: [f32; 4],
    /// 6 planes: left, right, bottom, top, near, far
    pub frustum_planes: [[f32; 4]; 6],
}

static_assertions::const_assert_eq!(std::mem::size_of::<GpuViewData>(), 176);

impl Default for CameraData {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 100.0, 0.0),
            yaw_radians: 0.0,
            pitch_radians: 0.0,
            fov_radians: 70.0_f32.to_radians(),
            aspect_ratio: 16.0 / 9.0,
            near_plane: 0.1,
            far_plane: 10000.0,
        }
    }
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self {
            direction: Vec3::new(0.3, -1.0, 0.2),
            shadow_half_extent: 512.0,
            shadow_distance: 2000.0,
            shadow_depth: 4000.0,
        }
    }
}
