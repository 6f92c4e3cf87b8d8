//! Point-light model for wall shading.
//!
//! Each light falls off linearly to zero at its range. The lights are summed,
//! an ambient term favouring near walls is added, and the result is clamped to
//! `[0, 1]`.

use crate::player::Player;

/// Reference ambient weight for the distance term
pub const AMBIENT_WEIGHT: f32 = 0.3;

/// A point light in world coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightSource {
    pub x: f32,
    pub y: f32,
    /// Base intensity, not clamped
    pub intensity: f32,
    /// World units; contribution reaches zero here
    pub range: f32,
}

impl LightSource {
    pub fn new(x: f32, y: f32, intensity: f32, range: f32) -> Self {
        Self { x, y, intensity, range }
    }

    /// Linear falloff in `[0, 1]` at distance `dist` from the light
    #[inline]
    pub fn falloff(&self, dist: f32) -> f32 {
        if self.range <= 0.0 {
            return 0.0;
        }
        (1.0 - dist / self.range).max(0.0)
    }

    /// Light arriving at `(x, y)`
    #[inline]
    pub fn contribution(&self, x: f32, y: f32) -> f32 {
        let dx = x - self.x;
        let dy = y - self.y;
        self.intensity * self.falloff((dx * dx + dy * dy).sqrt())
    }
}

/// What to do with rays that ran out of depth without striking a wall
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DepthPolicy {
    /// Light the terminal sample point like a distant wall
    #[default]
    ShadeAsWall,
    /// Skip the lights, keep only the ambient term
    AmbientOnly,
}

/// The session's lights, with an optional one that follows the player
#[derive(Debug, Clone)]
pub struct LightSet {
    lights: Vec<LightSource>,
    player_light: Option<usize>,
    pub ambient_weight: f32,
}

impl LightSet {
    pub fn new(lights: Vec<LightSource>) -> Self {
        Self {
            lights,
            player_light: None,
            ambient_weight: AMBIENT_WEIGHT,
        }
    }

    /// Add a light that tracks the player position
    pub fn with_player_light(mut self, light: LightSource) -> Self {
        match self.player_light {
            Some(i) => self.lights[i] = light,
            None => {
                self.lights.push(light);
                self.player_light = Some(self.lights.len() - 1);
            }
        }
        self
    }

    pub fn with_ambient(mut self, weight: f32) -> Self {
        self.ambient_weight = weight;
        self
    }

    /// Reference scene: three fixed lights plus a player lantern
    pub fn default_scene(player: &Player) -> Self {
        Self::new(vec![
            LightSource::new(11.0, 11.0, 1.0, 3.0),
            LightSource::new(3.0, 3.0, 0.8, 4.0),
            LightSource::new(16.5, 16.5, 0.9, 5.0),
        ])
        .with_player_light(LightSource::new(player.x, player.y, 0.8, 4.0))
    }

    pub fn len(&self) -> usize {
        self.lights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lights.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LightSource> {
        self.lights.iter()
    }

    pub fn player_light(&self) -> Option<&LightSource> {
        self.player_light.map(|i| &self.lights[i])
    }

    /// Whether the light at `index` is the one attached to the player
    pub fn is_player_light(&self, index: usize) -> bool {
        self.player_light == Some(index)
    }

    /// Move the attached light to the player position.
    pub fn sync_player_light(&mut self, x: f32, y: f32) {
        if let Some(i) = self.player_light {
            self.lights[i].x = x;
            self.lights[i].y = y;
        }
    }

    /// Sum of all light contributions at `(x, y)`, unclamped
    pub fn direct(&self, x: f32, y: f32) -> f32 {
        self.lights.iter().map(|l| l.contribution(x, y)).sum()
    }

    /// Ambient term: brighter for nearer walls
    #[inline]
    pub fn ambient(&self, hit_distance: f32, depth: f32) -> f32 {
        if depth <= 0.0 {
            return 0.0;
        }
        self.ambient_weight * (1.0 - hit_distance / depth).max(0.0)
    }

    /// Combined illumination at a ray's terminal point, in `[0, 1]`.
    pub fn intensity(&self, x: f32, y: f32, hit_distance: f32, depth: f32) -> f32 {
        (self.direct(x, y) + self.ambient(hit_distance, depth)).clamp(0.0, 1.0)
    }

    /// Illumination honoring the max-depth policy
    pub fn intensity_for(
        &self,
        x: f32,
        y: f32,
        hit_distance: f32,
        depth: f32,
        hit_wall: bool,
        policy: DepthPolicy,
    ) -> f32 {
        match (policy, hit_wall) {
            (DepthPolicy::AmbientOnly, false) => self.ambient(hit_distance, depth).clamp(0.0, 1.0),
            _ => self.intensity(x, y, hit_distance, depth),
        }
    }
}

impl Default for LightSet {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}
