//! Interactive first-person viewer - keyboard drives the player in real-time

use std::path::PathBuf;
use std::time::{Duration, Instant};

use minifb::{Key, KeyRepeat, Window, WindowOptions};

use crate::color::palette;
use crate::config::RenderConfig;
use crate::frame::World;
use crate::map::GridMap;
use crate::player::InputState;
use crate::render::Canvas;

/// Longest frame step fed to the simulation
const MAX_FRAME_STEP: Duration = Duration::from_millis(100);

/// Configuration for the interactive viewer
#[derive(Clone, Debug)]
pub struct ViewerConfig {
    /// Core render parameters
    pub render: RenderConfig,
    /// Layout file; `None` uses the built-in map
    pub map_path: Option<PathBuf>,
    /// Frame rate cap
    pub target_fps: usize,
    pub title: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            render: RenderConfig::default(),
            map_path: None,
            target_fps: 60,
            title: "Raycast Lights (ESC to exit)".to_string(),
        }
    }
}

impl ViewerConfig {
    /// Load the configured map, falling back to the built-in layout
    pub fn load_map(&self) -> Result<GridMap, String> {
        match &self.map_path {
            Some(path) => {
                let map = GridMap::load(path).map_err(|e| format!("{}: {}", path.display(), e))?;
                log::info!(
                    "Loaded map {} ({}x{})",
                    path.display(),
                    map.width(),
                    map.height()
                );
                Ok(map)
            }
            None => Ok(GridMap::default_layout()),
        }
    }
}

/// Poll the window into a key snapshot
pub fn read_input(window: &Window) -> InputState {
    InputState {
        forward: window.is_key_down(Key::W),
        backward: window.is_key_down(Key::S),
        strafe_left: window.is_key_down(Key::A),
        strafe_right: window.is_key_down(Key::D),
        rotate_left: window.is_key_down(Key::Left),
        rotate_right: window.is_key_down(Key::Right),
        quit: window.is_key_down(Key::Escape),
    }
}

/// Interactive viewer owning the window and the simulation state
pub struct InteractiveViewer {
    world: World,
    window: Window,
    canvas: Canvas,
    target_fps: usize,
}

impl InteractiveViewer {
    /// Create a new interactive viewer with the given configuration
    pub fn new(config: ViewerConfig) -> Result<Self, String> {
        config.render.validate()?;
        let map = config.load_map()?;
        let (width, height) = config.render.screen_size;

        let window = Window::new(
            &config.title,
            width,
            height,
            WindowOptions {
                resize: false,
                ..WindowOptions::default()
            },
        )
        .map_err(|e| e.to_string())?;

        let world = World::with_map(map, config.render);
        if world.map.is_wall(world.player.x, world.player.y) {
            return Err(format!(
                "spawn point ({}, {}) is inside a wall",
                world.player.x, world.player.y
            ));
        }

        Ok(Self {
            world,
            window,
            canvas: Canvas::new(width, height),
            target_fps: config.target_fps,
        })
    }

    /// Run the viewer loop until the window closes or ESC is pressed
    pub fn run(&mut self) -> Result<(), String> {
        let (width, height) = self.world.config.screen_size;
        self.window.set_target_fps(self.target_fps);

        log::info!("Controls:");
        log::info!("  W/S        - Forward / Backward");
        log::info!("  A/D        - Strafe left / right");
        log::info!("  LEFT/RIGHT - Rotate");
        log::info!("  L          - Toggle distance / lit shading");
        log::info!("  M          - Toggle minimap");
        log::info!("  ESC        - Exit");
        log::info!(
            "Shading: {}, {} lights",
            self.world.config.shading.as_str(),
            self.world.lights.len()
        );

        let mut last_tick = Instant::now();
        let mut frames = 0u32;
        let mut last_fps_log = Instant::now();

        while self.window.is_open() {
            let input = read_input(&self.window);
            if input.quit {
                break;
            }

            if self.window.is_key_pressed(Key::L, KeyRepeat::No) {
                let mode = self.world.config.shading.toggled();
                self.world.set_shading(mode);
                log::info!("Shading: {}", mode.as_str());
            }
            if self.window.is_key_pressed(Key::M, KeyRepeat::No) {
                self.world.show_minimap = !self.world.show_minimap;
                log::info!("Minimap: {}", if self.world.show_minimap { "on" } else { "off" });
            }

            // Frame clock with a cap to avoid huge jumps
            let now = Instant::now();
            let elapsed = now.duration_since(last_tick).min(MAX_FRAME_STEP).as_secs_f32();
            last_tick = now;

            self.world.step(&input, elapsed);
            let frame = self.world.render(elapsed);

            self.canvas.clear(palette::BACKGROUND);
            self.canvas.draw_all(&frame.commands);
            self.window
                .update_with_buffer(self.canvas.pixels(), width, height)
                .map_err(|e| e.to_string())?;

            frames += 1;
            let since = now.duration_since(last_fps_log).as_secs_f32();
            if since >= 1.0 {
                log::debug!(
                    "FPS: {:.1} at ({:.2}, {:.2}) angle {:.2}",
                    frames as f32 / since,
                    frame.player.x,
                    frame.player.y,
                    frame.player.angle
                );
                frames = 0;
                last_fps_log = now;
            }
        }

        Ok(())
    }
}
