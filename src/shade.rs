//! Column projection and shading.
//!
//! A hit distance becomes a vertical wall strip by inverse-distance
//! perspective: `ceiling = h/2 - h/d`, `floor = h - ceiling`. The strip colour
//! comes either from distance alone or from the light model.

use crate::caster::{MIN_DISTANCE, RayHit};
use crate::color::Rgb;
use crate::config::RenderConfig;
use crate::lighting::LightSet;

/// How wall strips get their brightness
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShadingMode {
    /// Brightness falls off linearly with distance
    Distance,
    /// Point lights plus a distance ambient term
    #[default]
    Lit,
}

impl ShadingMode {
    pub fn toggled(self) -> Self {
        match self {
            ShadingMode::Distance => ShadingMode::Lit,
            ShadingMode::Lit => ShadingMode::Distance,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ShadingMode::Distance => "distance",
            ShadingMode::Lit => "lit",
        }
    }
}

/// Vertical split of one column, in screen rows
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnSpan {
    pub ceiling: f32,
    pub floor: f32,
}

impl ColumnSpan {
    /// Integer rows clamped to `[0, height]`
    pub fn clamped(&self, height: usize) -> (i32, i32) {
        let h = height as f32;
        let ceiling = self.ceiling.clamp(0.0, h) as i32;
        let floor = self.floor.clamp(0.0, h) as i32;
        (ceiling, floor)
    }
}

/// Project a hit distance onto a screen of `screen_height` rows.
#[inline]
pub fn project(hit_distance: f32, screen_height: usize) -> ColumnSpan {
    let h = screen_height as f32;
    let d = if hit_distance.is_finite() {
        hit_distance.max(MIN_DISTANCE)
    } else {
        f32::MAX
    };
    let ceiling = h / 2.0 - h / d;
    ColumnSpan {
        ceiling,
        floor: h - ceiling,
    }
}

/// Distance-only wall shade: full brightness at the eye, black at `depth`.
pub fn shade_distance(hit_distance: f32, depth: f32) -> Rgb {
    if depth <= 0.0 {
        return Rgb::wall(0);
    }
    let level = (255.0 * (1.0 - hit_distance / depth)).clamp(0.0, 255.0) as u8;
    Rgb::wall(level)
}

/// Lit wall shade from a combined intensity in `[0, 1]`.
pub fn shade_lit(intensity: f32, base_brightness: f32) -> Rgb {
    let level = (base_brightness * intensity).round();
    let level = if level.is_nan() { 0.0 } else { level.clamp(0.0, 255.0) };
    Rgb::wall(level as u8)
}

/// Shading result for one screen column
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnShade {
    pub x: usize,
    pub span: ColumnSpan,
    pub wall: Rgb,
    /// Light intensity used for the wall (1 - d/depth in distance mode)
    pub intensity: f32,
}

/// Project and shade the ray cast for column `x`.
pub fn shade_column(
    x: usize,
    hit: &RayHit,
    lights: &LightSet,
    config: &RenderConfig,
) -> ColumnShade {
    let depth = config.cast.depth;
    let span = project(hit.distance, config.height());
    let (wall, intensity) = match config.shading {
        ShadingMode::Distance => {
            let intensity = (1.0 - hit.distance / depth).clamp(0.0, 1.0);
            (shade_distance(hit.distance, depth), intensity)
        }
        ShadingMode::Lit => {
            let intensity = lights.intensity_for(
                hit.x,
                hit.y,
                hit.distance,
                depth,
                hit.hit_wall,
                config.depth_policy,
            );
            (shade_lit(intensity, config.wall_brightness), intensity)
        }
    };
    ColumnShade {
        x,
        span,
        wall,
        intensity,
    }
}
