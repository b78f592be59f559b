//! Mapping between world space and heightmap texel space
//!
//! The terrain is a square of `size` world units starting at `origin` on the
//! xz plane; its corners map onto the heightmap's corner texels.

use glam::Vec2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TerrainSpace {
    pub origin: Vec2,
    pub size: f32,
    pub height_scale: f32,
    pub texel_width: u32,
    pub texel_height: u32,
}

impl TerrainSpace {
    pub fn new(
        origin: Vec2,
        size: f32,
        height_scale: f32,
        texel_width: u32,
        texel_height: u32,
    ) -> Self {
        Self {
            origin,
            size,
            height_scale,
            texel_width,
            texel_height,
        }
    }

    fn texels_per_unit(&self) -> Vec2 {
        Vec2::new(
            (self.texel_width - 1) as f32 / self.size,
            (self.texel_height - 1) as f32 / self.size,
        )
    }

    /// World xz to continuous texel coordinates
    pub fn world_to_texel(&self, world: Vec2) -> Vec2 {
        (world - self.origin) * self.texels_per_unit()
    }

    /// Continuous texel coordinates to world xz
    pub fn texel_to_world(&self, texel: Vec2) -> Vec2 {
        texel / self.texels_per_unit() + self.origin
    }

    /// Inclusive texel rectangle covering a world rectangle, clamped to the map
    pub fn texel_rect(&self, min: Vec2, max: Vec2) -> (u32, u32, u32, u32) {
        let lo = self.world_to_texel(min).floor();
        let hi = self.world_to_texel(max).ceil();
        let clamp_x = |v: f32| v.clamp(0.0, (self.texel_width - 1) as f32) as u32;
        let clamp_y = |v: f32| v.clamp(0.0, (self.texel_height - 1) as f32) as u32;
        (clamp_x(lo.x), clamp_y(lo.y), clamp_x(hi.x), clamp_y(hi.y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corners_map_to_corner_texels() {
        let space = TerrainSpace::new(Vec2::new(-512.0, -512.0), 1024.0, 1.0, 1025, 1025);
        assert_eq!(space.world_to_texel(Vec2::new(-512.0, -512.0)), Vec2::ZERO);
        assert_eq!(space.world_to_texel(Vec2::new(512.0, 512.0)), Vec2::splat(1024.0));
        assert_eq!(space.texel_to_world(Vec2::splat(512.0)), Vec2::ZERO);
    }

    #[test]
    fn test_texel_rect_is_clamped_and_inclusive() {
        let space = TerrainSpace::new(Vec2::ZERO, 64.0, 1.0, 33, 33);
        assert_eq!(space.texel_rect(Vec2::new(3.0, 3.0), Vec2::new(9.0, 9.0)), (1, 1, 5, 5));
        assert_eq!(space.texel_rect(Vec2::splat(-10.0), Vec2::splat(100.0)), (0, 0, 32, 32));
    }
}
