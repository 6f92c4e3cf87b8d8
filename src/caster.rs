//! Fixed-step ray marching against the grid map.
//!
//! Each screen column gets one ray. A ray advances by `step` world units,
//! sampling the cell under its tip, until it strikes a wall, leaves the map
//! or reaches `depth`. Work per ray is therefore bounded by `depth / step`
//! samples.
//!
//! Columns are independent and only read the map, so a full frame is cast
//! in parallel with rayon.

use rayon::prelude::*;

use crate::map::GridMap;
use crate::player::Player;
use crate::trig::{SinCos, sin_cos};

/// Smallest distance a ray ever reports; keeps projection finite
pub const MIN_DISTANCE: f32 = 1e-3;
/// Reference march step
pub const STEP: f32 = 0.1;
/// Reference maximum ray length
pub const DEPTH: f32 = 20.0;

/// Marching parameters shared by every ray of a frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CastParams {
    pub step: f32,
    pub depth: f32,
}

impl Default for CastParams {
    fn default() -> Self {
        Self {
            step: STEP,
            depth: DEPTH,
        }
    }
}

impl CastParams {
    /// Upper bound on samples taken by one ray
    pub fn max_samples(&self) -> usize {
        let step = self.step.max(f32::EPSILON);
        (self.depth.max(0.0) / step).ceil() as usize
    }
}

/// Result of one cast
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// In `[MIN_DISTANCE, depth]`
    pub distance: f32,
    /// Terminal sample point
    pub x: f32,
    pub y: f32,
    /// False when the ray ran out of depth or left the map
    pub hit_wall: bool,
}

/// Angle of the ray for `column`, sweeping `fov` centred on `facing`.
#[inline]
pub fn ray_angle(facing: f32, column: usize, width: usize, fov: f32) -> f32 {
    let width = width.max(1) as f32;
    facing - fov / 2.0 + (column as f32 / width) * fov
}

/// Cast a single ray from `origin` along `angle`.
pub fn cast_ray(map: &GridMap, origin: (f32, f32), angle: f32, params: &CastParams) -> RayHit {
    cast_ray_with(map, origin, sin_cos(angle), params)
}

/// Cast a single ray with a precomputed `(sin, cos)` direction.
pub fn cast_ray_with(
    map: &GridMap,
    origin: (f32, f32),
    (dir_x, dir_y): (f32, f32),
    params: &CastParams,
) -> RayHit {
    let (ox, oy) = origin;
    let depth = params.depth.max(MIN_DISTANCE);
    let samples = params.max_samples();

    let mut last = (ox, oy);
    for i in 1..=samples {
        // Multiply instead of accumulating so the distance does not drift
        let distance = (i as f32 * params.step).min(depth);
        let x = ox + dir_x * distance;
        let y = oy + dir_y * distance;
        last = (x, y);

        let ix = x.floor() as i64;
        let iy = y.floor() as i64;
        if !map.contains_cell(ix, iy) {
            return RayHit {
                distance: depth,
                x,
                y,
                hit_wall: false,
            };
        }
        if map.is_wall_cell(ix, iy) {
            return RayHit {
                distance: distance.max(MIN_DISTANCE),
                x,
                y,
                hit_wall: true,
            };
        }
    }

    RayHit {
        distance: depth,
        x: last.0,
        y: last.1,
        hit_wall: false,
    }
}

/// Cast every column of a frame in parallel, results in column order.
pub fn cast_columns<T: SinCos>(
    map: &GridMap,
    player: &Player,
    params: &CastParams,
    width: usize,
    fov: f32,
    trig: &T,
) -> Vec<RayHit> {
    let origin = player.position();
    (0..width)
        .into_par_iter()
        .map(|column| {
            let angle = ray_angle(player.angle, column, width, fov);
            cast_ray_with(map, origin, trig.sin_cos(angle), params)
        })
        .collect()
}

/// Single-threaded version of [`cast_columns`]
pub fn cast_columns_sequential<T: SinCos>(
    map: &GridMap,
    player: &Player,
    params: &CastParams,
    width: usize,
    fov: f32,
    trig: &T,
) -> Vec<RayHit> {
    let origin = player.position();
    (0..width)
        .map(|column| {
            let angle = ray_angle(player.angle, column, width, fov);
            cast_ray_with(map, origin, trig.sin_cos(angle), params)
        })
        .collect()
}
