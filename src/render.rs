//! Software rasterizer for draw commands and PPM snapshot export

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::color::{Rgb, palette};
use crate::frame::DrawCommand;

/// Pixel buffer in minifb layout (`0x00RRGGBB`, row-major)
#[derive(Debug, Clone)]
pub struct Canvas {
    width: usize,
    height: usize,
    pixels: Vec<u32>,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![palette::BACKGROUND.to_u32(); width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub fn clear(&mut self, color: Rgb) {
        self.pixels.fill(color.to_u32());
    }

    /// Pixel at `(x, y)`, `None` outside the canvas
    pub fn get(&self, x: i32, y: i32) -> Option<Rgb> {
        self.index(x, y).map(|i| Rgb::from_u32(self.pixels[i]))
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(y as usize * self.width + x as usize)
    }

    #[inline]
    fn plot(&mut self, x: i32, y: i32, color: u32) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color;
        }
    }

    /// Horizontal run from `x0` to `x1` inclusive, clipped
    fn hspan(&mut self, x0: i32, x1: i32, y: i32, color: u32) {
        if y < 0 || y as usize >= self.height || self.width == 0 {
            return;
        }
        let (lo, hi) = if x0 <= x1 { (x0, x1) } else { (x1, x0) };
        let lo = lo.max(0);
        let hi = hi.min(self.width as i32 - 1);
        if lo > hi {
            return;
        }
        let row = y as usize * self.width;
        self.pixels[row + lo as usize..=row + hi as usize].fill(color);
    }

    /// Rasterize one command, clipping to the canvas
    pub fn draw(&mut self, command: &DrawCommand) {
        match *command {
            DrawCommand::VLine { x, y0, y1, color } => {
                if x < 0 || x as usize >= self.width {
                    return;
                }
                let (lo, hi) = if y0 <= y1 { (y0, y1) } else { (y1, y0) };
                let lo = lo.max(0);
                let hi = hi.min(self.height as i32);
                let color = color.to_u32();
                for y in lo..hi {
                    self.pixels[y as usize * self.width + x as usize] = color;
                }
            }
            DrawCommand::Rect { x, y, w, h, color } => {
                if w <= 0 || h <= 0 {
                    return;
                }
                let color = color.to_u32();
                for row in y..y + h {
                    self.hspan(x, x + w - 1, row, color);
                }
            }
            DrawCommand::Line { x0, y0, x1, y1, color } => {
                self.line(x0, y0, x1, y1, color.to_u32());
            }
            DrawCommand::Circle {
                cx,
                cy,
                r,
                color,
                filled,
            } => {
                self.circle(cx, cy, r, color.to_u32(), filled);
            }
        }
    }

    pub fn draw_all(&mut self, commands: &[DrawCommand]) {
        for command in commands {
            self.draw(command);
        }
    }

    /// Bresenham line, endpoints inclusive
    fn line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: u32) {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut x, mut y) = (x0, y0);
        loop {
            self.plot(x, y, color);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Midpoint circle; filled circles are drawn as horizontal spans
    fn circle(&mut self, cx: i32, cy: i32, r: i32, color: u32, filled: bool) {
        if r < 0 {
            return;
        }
        if r == 0 {
            self.plot(cx, cy, color);
            return;
        }
        let mut x = r;
        let mut y = 0;
        let mut err = 1 - r;
        while x >= y {
            if filled {
                self.hspan(cx - x, cx + x, cy + y, color);
                self.hspan(cx - x, cx + x, cy - y, color);
                self.hspan(cx - y, cx + y, cy + x, color);
                self.hspan(cx - y, cx + y, cy - x, color);
            } else {
                for (px, py) in [
                    (x, y),
                    (y, x),
                    (-y, x),
                    (-x, y),
                    (-x, -y),
                    (-y, -x),
                    (y, -x),
                    (x, -y),
                ] {
                    self.plot(cx + px, cy + py, color);
                }
            }
            y += 1;
            if err < 0 {
                err += 2 * y + 1;
            } else {
                x -= 1;
                err += 2 * (y - x) + 1;
            }
        }
    }
}

/// Save a canvas as an ASCII PPM (P3) image
pub fn save_ppm<P: AsRef<Path>>(canvas: &Canvas, path: P) -> io::Result<()> {
    let file = File::create(path)?;
    let mut out = BufWriter::new(file);
    writeln!(out, "P3")?;
    writeln!(out, "{} {}", canvas.width, canvas.height)?;
    writeln!(out, "255")?;

    for row in canvas.pixels.chunks(canvas.width.max(1)) {
        for &pixel in row {
            let c = Rgb::from_u32(pixel);
            write!(out, "{} {} {} ", c.r, c.g, c.b)?;
        }
        writeln!(out)?;
    }

    out.flush()
}
