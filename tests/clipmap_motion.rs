//! Clipmap re-snapping along a camera path

use glam::Vec2;
use hearth_terrain::clipmap::{active_rings, draw_counts};
use hearth_terrain::{create_clipmap, snap, ClipmapConfig};

#[test]
fn coarse_rings_resnap_less_often() {
    let config = ClipmapConfig::default();
    let mut state = create_clipmap(&config).unwrap();
    let mut resnaps = vec![0u32; config.level_count as usize];

    for step in 0..2000 {
        let t = step as f32 * 0.37;
        let camera = Vec2::new(t, 0.5 * t + (t * 0.05).sin() * 20.0);
        let mask = snap(&mut state, camera);
        for (level, count) in resnaps.iter_mut().enumerate() {
            if mask.contains(level as u32) {
                *count += 1;
            }
        }
    }

    for pair in resnaps.windows(2) {
        assert!(pair[1] <= pair[0], "{:?}", resnaps);
    }
    assert!(resnaps[0] > resnaps[config.level_count as usize - 1]);
}

#[test]
fn rings_track_the_camera() {
    let mut state = create_clipmap(&ClipmapConfig::default()).unwrap();
    let camera = Vec2::new(1234.6, -87.2);
    snap(&mut state, camera);

    for ring in active_rings(&state) {
        let offset = camera - ring.snapped;
        assert!(offset.x >= 0.0 && offset.x < ring.scale);
        assert!(offset.y >= 0.0 && offset.y < ring.scale);
    }

    let counts = draw_counts(&state);
    assert_eq!(counts.crosses, 1);
    assert_eq!(counts.tiles, 16 + 12 * (state.level_count - 1));
}
