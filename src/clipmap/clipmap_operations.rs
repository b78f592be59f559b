//! Clipmap Operations - per-frame ring snapping
//!
//! Ring `l` has cell size `2^l` and is positioned from
//! `floor(camera / 2^l) * 2^l`. A ring's transforms depend only on that
//! snapped position, so a ring is rewritten only when it changes.

use super::clipmap_data::{
    ClipmapDrawCounts, ClipmapInstance, ClipmapMesh, ClipmapRing, ClipmapState, ResnapMask,
};
use super::clipmap_meshes::generate;
use crate::config::ClipmapConfig;
use crate::constants::clipmap::MAX_LEVEL_COUNT;
use crate::error::{invalid_config, TerrainResult};
use glam::Vec2;

/// Trim orientation per quadrant bits (bit 1: x, bit 0: z), in clockwise quarter turns
const TRIM_ROTATIONS: [u32; 4] = [0, 1, 3, 2];

impl ResnapMask {
    pub fn contains(&self, level: u32) -> bool {
        self.0 & (1 << level) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn count(&self) -> u32 {
        self.0.count_ones()
    }
}

pub fn create_clipmap(config: &ClipmapConfig) -> TerrainResult<ClipmapState> {
    if config.tile_resolution < 2 {
        return Err(invalid_config(
            "clipmap.tile_resolution",
            config.tile_resolution,
            "must be at least 2",
        ));
    }
    if config.level_count == 0 || config.level_count as usize > MAX_LEVEL_COUNT {
        return Err(invalid_config(
            "clipmap.level_count",
            config.level_count,
            "must be between 1 and 16",
        ));
    }

    Ok(ClipmapState {
        tile_resolution: config.tile_resolution,
        level_count: config.level_count,
        meshes: generate(config.tile_resolution),
        last_snapped: [Vec2::splat(f32::MAX); MAX_LEVEL_COUNT],
        rings: [ClipmapRing::default(); MAX_LEVEL_COUNT],
        cross: None,
    })
}

pub fn level_scale(level: u32) -> f32 {
    (1u32 << level) as f32
}

pub fn snapped_position(camera_xz: Vec2, scale: f32) -> Vec2 {
    (camera_xz / scale).floor() * scale
}

/// Quarter turns that put the trim on the side of the hole this ring leaves open
pub fn trim_rotation(camera_xz: Vec2, next_snapped: Vec2, scale: f32) -> u32 {
    let d = camera_xz - next_snapped;
    let mut r = 0;
    r |= if d.x >= scale { 0 } else { 2 };
    r |= if d.y >= scale { 0 } else { 1 };
    TRIM_ROTATIONS[r]
}

/// Apply an instance transform to a mesh-space vertex
pub fn instance_to_world(instance: &ClipmapInstance, local: [f32; 2]) -> Vec2 {
    let v = Vec2::from(local) * instance.scale;
    let rotated = match instance.rotation % 4 {
        0 => v,
        1 => Vec2::new(v.y, -v.x),
        2 => -v,
        _ => Vec2::new(-v.y, v.x),
    };
    Vec2::from(instance.position) + rotated
}

/// World positions of every vertex of `mesh` placed by `instance`
pub fn instance_vertices(mesh: &ClipmapMesh, instance: &ClipmapInstance) -> Vec<Vec2> {
    mesh.vertices
        .iter()
        .map(|&v| instance_to_world(instance, v))
        .collect()
}

fn place(position: Vec2, scale: f32, rotation: u32) -> ClipmapInstance {
    ClipmapInstance {
        position: position.to_array(),
        scale,
        rotation,
    }
}

fn resnap_ring(state: &mut ClipmapState, level: u32, camera_xz: Vec2, snapped: Vec2) {
    let t = state.tile_resolution;
    let scale = level_scale(level);
    let tile_size = (t << level) as f32;
    let base = snapped - Vec2::splat((t << (level + 1)) as f32);
    let last_level = level + 1 == state.level_count;

    let ring = &mut state.rings[level as usize];
    ring.level = level;
    ring.scale = scale;
    ring.snapped = snapped;

    let mut count = 0;
    for z in 0..4u32 {
        for x in 0..4u32 {
            // Inner 2x2 is covered by the finer ring
            if level != 0 && (x == 1 || x == 2) && (z == 1 || z == 2) {
                continue;
            }
            let fill = Vec2::new((x >= 2) as u32 as f32, (z >= 2) as u32 as f32) * scale;
            let tile_min = base + Vec2::new(x as f32, z as f32) * tile_size + fill;
            ring.tiles[count] = place(tile_min, scale, 0);
            count += 1;
        }
    }
    ring.tile_count = count as u32;

    ring.filler = (level != 0).then(|| place(snapped, scale, 0));

    if last_level {
        ring.trim = None;
        ring.seam = None;
    } else {
        let next_scale = scale * 2.0;
        let next_snapped = snapped_position(snapped, next_scale);
        let tile_centre = snapped + Vec2::splat(scale * 0.5);
        ring.trim = Some(place(tile_centre, scale, trim_rotation(camera_xz, next_snapped, scale)));

        let next_base = next_snapped - Vec2::splat((t << (level + 1)) as f32);
        ring.seam = Some(place(next_base, scale, 0));
    }

    if level == 0 {
        state.cross = Some(place(snapped, scale, 0));
    }
}

/// Re-snap every ring whose snapped position moved
pub fn snap(state: &mut ClipmapState, camera_xz: Vec2) -> ResnapMask {
    let mut mask = ResnapMask::default();

    for level in 0..state.level_count {
        let snapped = snapped_position(camera_xz, level_scale(level));
        if state.last_snapped[level as usize] == snapped {
            continue;
        }
        state.last_snapped[level as usize] = snapped;
        resnap_ring(state, level, camera_xz, snapped);
        mask.0 |= 1 << level;
    }

    if !mask.is_empty() {
        log::debug!(
            "[Clipmap::snap] Re-snapped {} of {} rings at ({:.1}, {:.1})",
            mask.count(),
            state.level_count,
            camera_xz.x,
            camera_xz.y
        );
    }

    mask
}

/// Active rings, finest first
pub fn active_rings(state: &ClipmapState) -> &[ClipmapRing] {
    &state.rings[..state.level_count as usize]
}

pub fn draw_counts(state: &ClipmapState) -> ClipmapDrawCounts {
    let mut counts = ClipmapDrawCounts {
        crosses: state.cross.is_some() as u32,
        ..Default::default()
    };
    for ring in active_rings(state) {
        counts.tiles += ring.tile_count;
        counts.fillers += ring.filler.is_some() as u32;
        counts.trims += ring.trim.is_some() as u32;
        counts.seams += ring.seam.is_some() as u32;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipmap::clipmap_meshes::hole_vertex_resolution;

    fn clipmap(tile_resolution: u32, level_count: u32) -> ClipmapState {
        create_clipmap(&ClipmapConfig {
            tile_resolution,
            level_count,
        })
        .unwrap()
    }

    fn bounds(points: &[Vec2]) -> (Vec2, Vec2) {
        points.iter().fold(
            (Vec2::splat(f32::MAX), Vec2::splat(f32::MIN)),
            |(lo, hi), &p| (lo.min(p), hi.max(p)),
        )
    }

    #[test]
    fn test_first_snap_positions_every_ring() {
        let mut state = clipmap(48, 7);
        let mask = snap(&mut state, Vec2::new(0.5, 0.5));
        assert_eq!(mask.count(), 7);
        assert_eq!(
            draw_counts(&state),
            ClipmapDrawCounts {
                tiles: 16 + 6 * 12,
                fillers: 6,
                trims: 6,
                seams: 6,
                crosses: 1,
            }
        );
    }

    #[test]
    fn test_snap_is_idempotent() {
        let mut state = clipmap(48, 7);
        snap(&mut state, Vec2::new(10.3, -7.9));
        let before = state.clone();
        let mask = snap(&mut state, Vec2::new(10.3, -7.9));
        assert!(mask.is_empty());
        assert_eq!(state, before);
    }

    #[test]
    fn test_only_crossed_rings_resnap() {
        let mut state = clipmap(48, 7);
        snap(&mut state, Vec2::new(0.5, 0.5));
        let coarse = state.rings[1];

        // One level-0 cell: level 1 (cell 2) stays put
        let mask = snap(&mut state, Vec2::new(1.5, 0.5));
        assert!(mask.contains(0));
        assert_eq!(mask.count(), 1);
        assert_eq!(state.rings[1], coarse);

        // Crossing x = 2 moves levels 0 and 1 but not level 2 (cell 4)
        let mask = snap(&mut state, Vec2::new(2.5, 0.5));
        assert!(mask.contains(0) && mask.contains(1));
        assert!(!mask.contains(2));
        assert_eq!(mask.count(), 2);

        // Small motion inside the same cell does nothing
        assert!(snap(&mut state, Vec2::new(2.9, 0.9)).is_empty());
    }

    #[test]
    fn test_ring_layout() {
        let mut state = clipmap(4, 3);
        snap(&mut state, Vec2::new(5.5, 9.25));
        let ring = &state.rings[1];
        assert_eq!(ring.snapped, Vec2::new(4.0, 8.0));
        assert_eq!(ring.tile_count, 12);
        // Bottom-left tile starts 2 tiles (of 8 world units) below the snapped point
        assert_eq!(ring.tiles[0].position, [4.0 - 16.0, 8.0 - 16.0]);
        // Last tile is shifted by the filler cell on both axes
        assert_eq!(ring.tiles[11].position, [4.0 + 8.0 + 2.0, 8.0 + 8.0 + 2.0]);
        assert!(state.rings[2].trim.is_none());
        assert!(state.rings[0].filler.is_none());
    }

    #[test]
    fn test_trim_fills_next_ring_hole() {
        let t = 4;
        let n = hole_vertex_resolution(t) as f32;
        for camera in [
            Vec2::new(0.5, 0.5),
            Vec2::new(1.5, 0.5),
            Vec2::new(0.5, 1.5),
            Vec2::new(1.5, 1.5),
            Vec2::new(-3.2, 6.7),
        ] {
            let mut state = clipmap(t, 4);
            snap(&mut state, camera);
            for level in 0..3 {
                let ring = &state.rings[level];
                let seam = ring.seam.unwrap();
                let trim = ring.trim.unwrap();

                let hole_min = Vec2::from(seam.position);
                let hole_max = hole_min + Vec2::splat(n * ring.scale);
                let (lo, hi) = bounds(&instance_vertices(&state.meshes.trim, &trim));
                assert!(lo.abs_diff_eq(hole_min, 1e-4), "camera {camera:?} level {level}");
                assert!(hi.abs_diff_eq(hole_max, 1e-4), "camera {camera:?} level {level}");

                // The seam traces the same border
                let (lo, hi) = bounds(&instance_vertices(&state.meshes.seam, &seam));
                assert!(lo.abs_diff_eq(hole_min, 1e-4));
                assert!(hi.abs_diff_eq(hole_max, 1e-4));

                // The hole is the next ring's inner edge
                let next = &state.rings[level + 1];
                let next_tile = Vec2::from(next.tiles[0].position);
                let tile_size = (t << (level + 1)) as f32;
                assert!(hole_min.abs_diff_eq(next_tile + Vec2::splat(tile_size), 1e-4));
            }
        }
    }

    #[test]
    fn test_trim_rotation_quadrants() {
        let next = Vec2::ZERO;
        assert_eq!(trim_rotation(Vec2::new(1.5, 1.5), next, 1.0), 0);
        assert_eq!(trim_rotation(Vec2::new(1.5, 0.5), next, 1.0), 1);
        assert_eq!(trim_rotation(Vec2::new(0.5, 1.5), next, 1.0), 3);
        assert_eq!(trim_rotation(Vec2::new(0.5, 0.5), next, 1.0), 2);
    }

    #[test]
    fn test_invalid_level_count() {
        let config = ClipmapConfig {
            tile_resolution: 48,
            level_count: 17,
        };
        assert!(create_clipmap(&config).is_err());
    }
}
