//! Per-tick simulation state and the draw commands of one render pass.
//!
//! `World` is the single owned instance of map, player and lights. Each tick
//! first mutates it (`step`), then borrows it immutably for the parallel
//! column pass (`render`), so movement can never interleave with casting.

use rayon::prelude::*;

use crate::caster::{RayHit, cast_columns};
use crate::color::{Rgb, palette};
use crate::config::RenderConfig;
use crate::lighting::LightSet;
use crate::map::GridMap;
use crate::player::{InputState, Player};
use crate::shade::{ColumnShade, ShadingMode, shade_column};

/// Length of the minimap facing indicator in pixels
const FACING_LINE_LEN: f32 = 5.0;

/// One primitive for the harness to draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    /// Vertical 1-pixel line from `y0` (inclusive) to `y1` (exclusive)
    VLine { x: i32, y0: i32, y1: i32, color: Rgb },
    /// Axis-aligned filled rectangle
    Rect { x: i32, y: i32, w: i32, h: i32, color: Rgb },
    Line { x0: i32, y0: i32, x1: i32, y1: i32, color: Rgb },
    Circle { cx: i32, cy: i32, r: i32, color: Rgb, filled: bool },
}

/// Everything produced by one render pass
#[derive(Debug, Clone)]
pub struct Frame {
    pub elapsed: f32,
    pub player: Player,
    pub columns: Vec<ColumnShade>,
    pub commands: Vec<DrawCommand>,
}

/// Simulation state owned by the frame loop
#[derive(Debug, Clone)]
pub struct World {
    pub map: GridMap,
    pub player: Player,
    pub lights: LightSet,
    pub config: RenderConfig,
    pub show_minimap: bool,
}

impl World {
    pub fn new(map: GridMap, player: Player, lights: LightSet, config: RenderConfig) -> Self {
        let player = player.with_speeds(config.move_speed, config.turn_speed);
        let lights = lights.with_ambient(config.ambient_weight);
        Self {
            map,
            player,
            lights,
            config,
            show_minimap: true,
        }
    }

    /// Reference spawn and light scene on a custom map
    pub fn with_map(map: GridMap, config: RenderConfig) -> Self {
        let player = Player::default();
        let lights = LightSet::default_scene(&player);
        Self::new(map, player, lights, config)
    }

    pub fn set_shading(&mut self, mode: ShadingMode) {
        self.config.shading = mode;
    }

    /// Update phase: move the player and re-sync the attached light.
    pub fn step(&mut self, input: &InputState, elapsed: f32) -> bool {
        if input.is_idle() {
            return false;
        }
        let moved = self.player.update(&self.map, input, elapsed);
        if moved {
            self.lights.sync_player_light(self.player.x, self.player.y);
        }
        moved
    }

    /// Cast every column for the current state
    pub fn cast(&self) -> Vec<RayHit> {
        cast_columns(
            &self.map,
            &self.player,
            &self.config.cast,
            self.config.width(),
            self.config.fov,
            &self.config.trig,
        )
    }

    /// Render phase: cast, shade and emit draw commands.
    pub fn render(&self, elapsed: f32) -> Frame {
        let hits = self.cast();
        let columns: Vec<ColumnShade> = hits
            .par_iter()
            .enumerate()
            .map(|(x, hit)| shade_column(x, hit, &self.lights, &self.config))
            .collect();

        let minimap_cells = self.map.width() * self.map.height();
        let mut commands = Vec::with_capacity(columns.len() * 3 + minimap_cells + 8);
        let height = self.config.height();
        for column in &columns {
            push_column(&mut commands, column, height);
        }
        if self.show_minimap && self.config.minimap_scale > 0 {
            self.push_minimap(&mut commands);
        }

        Frame {
            elapsed,
            player: self.player,
            columns,
            commands,
        }
    }

    /// Top-left corner of the minimap in screen pixels
    pub fn minimap_origin(&self) -> (i32, i32) {
        let scale = self.config.minimap_scale as i32;
        let x = self.config.width() as i32 - scale * self.map.width() as i32 - 2;
        (x, 0)
    }

    fn push_minimap(&self, commands: &mut Vec<DrawCommand>) {
        let scale = self.config.minimap_scale as i32;
        let (ox, oy) = self.minimap_origin();
        let to_screen = |x: f32, y: f32| {
            (ox + (x * scale as f32) as i32, oy + (y * scale as f32) as i32)
        };

        for (x, y, cell) in self.map.cells() {
            let color = if cell.is_wall() {
                palette::MINIMAP_WALL
            } else {
                palette::MINIMAP_OPEN
            };
            commands.push(DrawCommand::Rect {
                x: ox + x as i32 * scale,
                y: oy + y as i32 * scale,
                w: scale,
                h: scale,
                color,
            });
        }

        if self.config.shading == ShadingMode::Lit {
            for (i, light) in self.lights.iter().enumerate() {
                let (cx, cy) = to_screen(light.x, light.y);
                // Marker brightness follows the light's intensity
                let base = if self.lights.is_player_light(i) {
                    palette::MINIMAP_PLAYER_LIGHT
                } else {
                    palette::MINIMAP_LIGHT
                };
                let color = base.scaled(light.intensity);
                commands.push(DrawCommand::Circle {
                    cx,
                    cy,
                    r: (light.range * scale as f32) as i32,
                    color,
                    filled: false,
                });
            }
        }

        let (px, py) = to_screen(self.player.x, self.player.y);
        let (s, c) = self.player.direction();
        commands.push(DrawCommand::Line {
            x0: px,
            y0: py,
            x1: px + (FACING_LINE_LEN * s).round() as i32,
            y1: py + (FACING_LINE_LEN * c).round() as i32,
            color: palette::MINIMAP_FACING,
        });
        commands.push(DrawCommand::Circle {
            cx: px,
            cy: py,
            r: scale,
            color: palette::MINIMAP_PLAYER,
            filled: true,
        });
    }
}

/// Ceiling, wall and floor strips for one column
fn push_column(commands: &mut Vec<DrawCommand>, column: &ColumnShade, height: usize) {
    let x = column.x as i32;
    let (ceiling, floor) = column.span.clamped(height);
    commands.push(DrawCommand::VLine {
        x,
        y0: 0,
        y1: ceiling,
        color: palette::CEILING,
    });
    commands.push(DrawCommand::VLine {
        x,
        y0: ceiling,
        y1: floor,
        color: column.wall,
    });
    commands.push(DrawCommand::VLine {
        x,
        y0: floor,
        y1: height as i32,
        color: palette::FLOOR,
    });
}
