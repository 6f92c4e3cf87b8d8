//! Startup configuration for the renderer core

use std::f32::consts::FRAC_PI_3;

use crate::caster::CastParams;
use crate::lighting::{AMBIENT_WEIGHT, DepthPolicy};
use crate::player::{BASE_SPEED, TURN_SPEED};
use crate::shade::ShadingMode;
use crate::trig::{SinCosTable, TrigSource};

/// Fixed parameters of a render session
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Framebuffer size in pixels; one ray per column
    pub screen_size: (usize, usize),
    /// Horizontal field of view in radians
    pub fov: f32,
    pub cast: CastParams,
    /// Minimap pixels per map cell (0 disables the minimap)
    pub minimap_scale: usize,
    pub shading: ShadingMode,
    pub depth_policy: DepthPolicy,
    /// Wall channel value at full illumination
    pub wall_brightness: f32,
    pub ambient_weight: f32,
    pub move_speed: f32,
    pub turn_speed: f32,
    pub trig: TrigSource,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            screen_size: (640, 480),
            fov: FRAC_PI_3,
            cast: CastParams::default(),
            minimap_scale: 5,
            shading: ShadingMode::Lit,
            depth_policy: DepthPolicy::ShadeAsWall,
            wall_brightness: 255.0,
            ambient_weight: AMBIENT_WEIGHT,
            move_speed: BASE_SPEED,
            turn_speed: TURN_SPEED,
            trig: TrigSource::Exact,
        }
    }
}

impl RenderConfig {
    pub fn width(&self) -> usize {
        self.screen_size.0
    }

    pub fn height(&self) -> usize {
        self.screen_size.1
    }

    /// Switch ray directions to a fixed-step lookup table
    pub fn with_trig_table(mut self, entries: usize) -> Self {
        self.trig = TrigSource::Table(SinCosTable::new(entries));
        self
    }

    /// Reject configurations that would make the core misbehave
    pub fn validate(&self) -> Result<(), String> {
        let (w, h) = self.screen_size;
        if w == 0 || h == 0 {
            return Err(format!("screen size must be non-zero, got {}x{}", w, h));
        }
        if !(self.fov.is_finite() && self.fov > 0.0) {
            return Err(format!("field of view must be positive, got {}", self.fov));
        }
        if !(self.cast.step.is_finite() && self.cast.step > 0.0) {
            return Err(format!("march step must be positive, got {}", self.cast.step));
        }
        if !(self.cast.depth.is_finite() && self.cast.depth > self.cast.step) {
            return Err(format!(
                "max depth {} must exceed the march step {}",
                self.cast.depth, self.cast.step
            ));
        }
        Ok(())
    }
}
