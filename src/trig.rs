//! Sine/cosine sources for ray directions and movement.

use std::f32::consts::TAU;

/// Exact sine and cosine of `angle`.
#[inline]
pub fn sin_cos(angle: f32) -> (f32, f32) {
    angle.sin_cos()
}

/// Anything that can turn an angle into `(sin, cos)`.
pub trait SinCos: Sync {
    fn sin_cos(&self, angle: f32) -> (f32, f32);
}

/// Direct evaluation, no caching
#[derive(Debug, Clone, Copy, Default)]
pub struct Exact;

impl SinCos for Exact {
    #[inline]
    fn sin_cos(&self, angle: f32) -> (f32, f32) {
        sin_cos(angle)
    }
}

/// Fixed-step lookup table over `[0, 2π)`.
///
/// Lookups snap to the nearest entry, so the error is bounded by half the
/// angular step. Angles outside the range are wrapped first.
#[derive(Debug, Clone)]
pub struct SinCosTable {
    sin: Vec<f32>,
    cos: Vec<f32>,
    step: f32,
}

impl SinCosTable {
    pub const DEFAULT_ENTRIES: usize = 4096;

    pub fn new(entries: usize) -> Self {
        let entries = entries.max(4);
        let step = TAU / entries as f32;
        let (sin, cos) = (0..entries)
            .map(|i| sin_cos(i as f32 * step))
            .unzip();
        Self { sin, cos, step }
    }

    pub fn len(&self) -> usize {
        self.sin.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sin.is_empty()
    }

    /// Angular distance between two neighbouring entries
    pub fn step(&self) -> f32 {
        self.step
    }

    #[inline]
    fn index(&self, angle: f32) -> usize {
        if !angle.is_finite() {
            return 0;
        }
        let wrapped = angle.rem_euclid(TAU);
        (wrapped / self.step).round() as usize % self.sin.len()
    }
}

impl Default for SinCosTable {
    fn default() -> Self {
        Self::new(Self::DEFAULT_ENTRIES)
    }
}

impl SinCos for SinCosTable {
    #[inline]
    fn sin_cos(&self, angle: f32) -> (f32, f32) {
        let i = self.index(angle);
        (self.sin[i], self.cos[i])
    }
}

/// Which trig source the renderer uses
#[derive(Debug, Clone, Default)]
pub enum TrigSource {
    #[default]
    Exact,
    Table(SinCosTable),
}

impl SinCos for TrigSource {
    #[inline]
    fn sin_cos(&self, angle: f32) -> (f32, f32) {
        match self {
            TrigSource::Exact => sin_cos(angle),
            TrigSource::Table(table) => table.sin_cos(angle),
        }
    }
}
