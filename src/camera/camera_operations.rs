//! Camera operations - Pure DOP functions
//!
//! All functions are pure: they take data, return new data, no side effects.
//! Matrices are right-handed with a 0..1 depth range.

use super::camera_data::{CameraData, DirectionalLight, GpuViewData};
use crate::bounds::Frustum;
use glam::{Mat4, Vec3};

// ============================================================================
// INITIALIZATION
// ============================================================================

/// Initialize camera with default settings
pub fn init_camera(position: Vec3, yaw: f32, pitch: f32) -> CameraData {
    CameraData {
        position,
        yaw_radians: yaw,
        pitch_radians: clamp_pitch(pitch),
        ..Default::default()
    }
}

// ============================================================================
// VIEW/PROJECTION MATRICES
// ============================================================================

/// Build view matrix from camera data
pub fn build_view_matrix(camera: &CameraData) -> Mat4 {
    let forward = calculate_forward_vector(camera.yaw_radians, camera.pitch_radians);
    Mat4::look_to_rh(camera.position, forward, Vec3::Y)
}

/// Build projection matrix from camera data
pub fn build_projection_matrix(camera: &CameraData) -> Mat4 {
    Mat4::perspective_rh(
        camera.fov_radians,
        camera.aspect_ratio,
        camera.near_plane,
        camera.far_plane,
    )
}

/// Build combined view-projection
pub fn build_view_projection(camera: &CameraData) -> Mat4 {
    build_projection_matrix(camera) * build_view_matrix(camera)
}

/// Pixels per world unit at distance 1 for a viewport height
pub fn projection_scale(camera: &CameraData, viewport_height: u32) -> f32 {
    viewport_height as f32 / (2.0 * (camera.fov_radians * 0.5).tan())
}

/// Orthographic view-projection for a directional light, centred on `focus`
pub fn build_light_view_projection(light: &DirectionalLight, focus: Vec3) -> Mat4 {
    let direction = light.direction.try_normalize().unwrap_or(Vec3::NEG_Y);
    let eye = focus - direction * light.shadow_distance;
    // Avoid a degenerate basis when the light points straight down
    let up = if direction.abs_diff_eq(Vec3::NEG_Y, 1e-3) || direction.abs_diff_eq(Vec3::Y, 1e-3) {
        Vec3::Z
    } else {
        Vec3::Y
    };
    let view = Mat4::look_to_rh(eye, direction, up);
    let e = light.shadow_half_extent;
    let proj = Mat4::orthographic_rh(-e, e, -e, e, 0.0, light.shadow_depth);
    proj * view
}

/// Pack per-view constants for upload
pub fn build_gpu_view_data(
    view_proj: &Mat4,
    lod_origin: Vec3,
    projection_scale: f32,
) -> GpuViewData {
    GpuViewData {
        view_proj: view_proj.to_cols_array_2d(),
        lod_origin: lod_origin.extend(projection_scale).to_array(),
        frustum_planes: Frustum::from_view_projection(view_proj).to_arrays(),
    }
}

// ============================================================================
// MOVEMENT
// ============================================================================

/// Move camera forward by distance (in camera's forward direction)
pub fn move_forward(camera: &CameraData, distance: f32) -> CameraData {
    let forward = calculate_forward_vector(camera.yaw_radians, camera.pitch_radians);
    CameraData {
        position: camera.position + forward * distance,
        ..*camera
    }
}

/// Rotate camera by yaw/pitch deltas (radians)
pub fn rotate(camera: &CameraData, yaw_delta: f32, pitch_delta: f32) -> CameraData {
    CameraData {
        yaw_radians: camera.yaw_radians + yaw_delta,
        pitch_radians: clamp_pitch(camera.pitch_radians + pitch_delta),
        ..*camera
    }
}

// ============================================================================
// UTILITIES
// ============================================================================

fn clamp_pitch(pitch: f32) -> f32 {
    // Clamp pitch to avoid gimbal lock
    const PITCH_LIMIT: f32 = std::f32::consts::FRAC_PI_2 - 0.01;
    pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT)
}

/// Calculate forward vector from yaw and pitch
pub fn calculate_forward_vector(yaw: f32, pitch: f32) -> Vec3 {
    Vec3::new(
        yaw.cos() * pitch.cos(),
        pitch.sin(),
        yaw.sin() * pitch.cos(),
    )
    .normalize()
}
