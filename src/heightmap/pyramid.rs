//! Min/Max height pyramid
//!
//! Two mip chains built from the base heightmap. Texel `(x, y)` of mip `k`
//! holds the min (max) over base texels `[x << k, ((x + 1) << k) - 1]` on
//! both axes, clipped to the map, so every query is conservative.

use super::heightmap_data::Heightmap;
use rayon::prelude::*;

/// One level of the pyramid
#[derive(Debug, Clone, PartialEq)]
pub struct PyramidLevel {
    pub width: u32,
    pub height: u32,
    pub min: Vec<f32>,
    pub max: Vec<f32>,
}

impl PyramidLevel {
    fn at(&self, x: u32, y: u32) -> (f32, f32) {
        let i = (y * self.width + x) as usize;
        (self.min[i], self.max[i])
    }
}

/// Min/max mip chain down to 1x1
#[derive(Debug, Clone, PartialEq)]
pub struct MinMaxPyramid {
    levels: Vec<PyramidLevel>,
}

impl MinMaxPyramid {
    /// Build the full chain from a heightmap
    pub fn build(heightmap: &Heightmap) -> Self {
        let base = PyramidLevel {
            width: heightmap.width,
            height: heightmap.height,
            min: heightmap.texels.clone(),
            max: heightmap.texels.clone(),
        };

        let mut levels = vec![base];
        while let Some(last) = levels.last() {
            if last.width == 1 && last.height == 1 {
                break;
            }
            let next = downsample(last);
            levels.push(next);
        }

        log::info!(
            "[MinMaxPyramid::build] {} levels from {}x{} heightmap",
            levels.len(),
            heightmap.width,
            heightmap.height
        );

        Self { levels }
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    pub fn level(&self, mip: usize) -> Option<&PyramidLevel> {
        self.levels.get(mip)
    }

    /// Min/max over the whole heightmap
    pub fn global_bounds(&self) -> (f32, f32) {
        match self.levels.last() {
            Some(top) => top.at(0, 0),
            None => (0.0, 0.0),
        }
    }

    /// Conservative min/max over an inclusive base-texel rectangle
    ///
    /// Coordinates are clamped to the heightmap. The query reads at most 2x2
    /// texels from the first mip where the rectangle fits.
    pub fn bounds_for_texel_rect(&self, x0: u32, y0: u32, x1: u32, y1: u32) -> (f32, f32) {
        let base = &self.levels[0];
        let (x0, x1) = (x0.min(x1).min(base.width - 1), x1.max(x0).min(base.width - 1));
        let (y0, y1) = (y0.min(y1).min(base.height - 1), y1.max(y0).min(base.height - 1));

        let mut mip = 0;
        while mip + 1 < self.levels.len()
            && ((x1 >> mip) - (x0 >> mip) > 1 || (y1 >> mip) - (y0 >> mip) > 1)
        {
            mip += 1;
        }

        let level = &self.levels[mip];
        let mut lo = f32::MAX;
        let mut hi = f32::MIN;
        for y in (y0 >> mip)..=(y1 >> mip) {
            for x in (x0 >> mip)..=(x1 >> mip) {
                let (min, max) = level.at(x, y);
                lo = lo.min(min);
                hi = hi.max(max);
            }
        }
        (lo, hi)
    }
}

fn downsample(prev: &PyramidLevel) -> PyramidLevel {
    let width = prev.width.div_ceil(2);
    let height = prev.height.div_ceil(2);
    let mut min = vec![0.0; (width * height) as usize];
    let mut max = vec![0.0; (width * height) as usize];

    min.par_chunks_mut(width as usize)
        .zip(max.par_chunks_mut(width as usize))
        .enumerate()
        .for_each(|(y, (min_row, max_row))| {
            let y = y as u32;
            let sy0 = 2 * y;
            let sy1 = (2 * y + 1).min(prev.height - 1);
            for x in 0..width {
                let sx0 = 2 * x;
                let sx1 = (2 * x + 1).min(prev.width - 1);
                let mut lo = f32::MAX;
                let mut hi = f32::MIN;
                for sy in sy0..=sy1 {
                    for sx in sx0..=sx1 {
                        let (a, b) = prev.at(sx, sy);
                        lo = lo.min(a);
                        hi = hi.max(b);
                    }
                }
                min_row[x as usize] = lo;
                max_row[x as usize] = hi;
            }
        });

    PyramidLevel {
        width,
        height,
        min,
        max,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heightmap::create_heightmap;
    use rand::{Rng, SeedableRng};

    fn random_heightmap(width: u32, height: u32, seed: u64) -> Heightmap {
        let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
        let texels = (0..width * height).map(|_| rng.gen_range(0.0..1.0)).collect();
        create_heightmap(width, height, texels).unwrap()
    }

    fn brute_force(hm: &Heightmap, x0: u32, y0: u32, x1: u32, y1: u32) -> (f32, f32) {
        let mut lo = f32::MAX;
        let mut hi = f32::MIN;
        for y in y0..=y1 {
            for x in x0..=x1 {
                let v = hm.texels[(y * hm.width + x) as usize];
                lo = lo.min(v);
                hi = hi.max(v);
            }
        }
        (lo, hi)
    }

    #[test]
    fn test_chain_reaches_single_texel() {
        let pyramid = MinMaxPyramid::build(&random_heightmap(13, 7, 1));
        let dims: Vec<(u32, u32)> = (0..pyramid.level_count())
            .map(|i| {
                let l = pyramid.level(i).unwrap();
                (l.width, l.height)
            })
            .collect();
        assert_eq!(dims, vec![(13, 7), (7, 4), (4, 2), (2, 1), (1, 1)]);
    }

    #[test]
    fn test_global_bounds_match_data() {
        let hm = random_heightmap(33, 17, 2);
        let pyramid = MinMaxPyramid::build(&hm);
        assert_eq!(pyramid.global_bounds(), brute_force(&hm, 0, 0, 32, 16));
    }

    #[test]
    fn test_rect_bounds_are_conservative() {
        let hm = random_heightmap(65, 65, 3);
        let pyramid = MinMaxPyramid::build(&hm);
        let mut rng = rand::rngs::StdRng::seed_from_u64(4);
        for _ in 0..200 {
            let x0 = rng.gen_range(0..65);
            let y0 = rng.gen_range(0..65);
            let x1 = rng.gen_range(x0..65);
            let y1 = rng.gen_range(y0..65);
            let (lo, hi) = pyramid.bounds_for_texel_rect(x0, y0, x1, y1);
            let (true_lo, true_hi) = brute_force(&hm, x0, y0, x1, y1);
            assert!(lo <= true_lo && hi >= true_hi);
        }
    }

    #[test]
    fn test_single_texel_query_is_exact() {
        let hm = random_heightmap(16, 16, 5);
        let pyramid = MinMaxPyramid::build(&hm);
        let v = hm.texels[(3 * 16 + 9) as usize];
        assert_eq!(pyramid.bounds_for_texel_rect(9, 3, 9, 3), (v, v));
    }
}
