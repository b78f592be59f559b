/// Camera Module - Data-Oriented Programming (DOP) style
///
/// - camera_data.rs: camera, directional light and GPU view data
/// - camera_operations.rs: pure functions producing matrices and view constants

pub mod camera_data;
pub mod camera_operations;

pub use camera_data::{CameraData, DirectionalLight, GpuViewData};

pub use camera_operations::{
    build_gpu_view_data, build_light_view_projection, build_projection_matrix,
    build_view_matrix, build_view_projection, calculate_forward_vector, init_camera,
    move_forward, projection_scale, rotate,
};
