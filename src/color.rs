//! Colors used by the column shader, minimap and rasterizer

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    /// Wall tint for a brightness level: grey with a slight blue lift
    pub fn wall(level: u8) -> Self {
        Rgb::new(level, level, level.saturating_add(15))
    }

    /// Pack as `0x00RRGGBB` (minifb buffer layout)
    #[inline]
    pub fn to_u32(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// Unpack from `0x00RRGGBB`
    #[inline]
    pub fn from_u32(value: u32) -> Self {
        Rgb::new((value >> 16) as u8, (value >> 8) as u8, value as u8)
    }

    /// Scale every channel by `factor`, saturating at 0 and 255
    pub fn scaled(self, factor: f32) -> Self {
        let ch = |c: u8| (c as f32 * factor).round().clamp(0.0, 255.0) as u8;
        Rgb::new(ch(self.r), ch(self.g), ch(self.b))
    }
}

/// Fixed palette
pub mod palette {
    use super::Rgb;

    pub const BACKGROUND: Rgb = Rgb::new(0, 0, 10);
    pub const CEILING: Rgb = Rgb::new(0, 0, 65);
    pub const FLOOR: Rgb = Rgb::new(0, 0, 35);

    pub const MINIMAP_WALL: Rgb = Rgb::WHITE;
    pub const MINIMAP_OPEN: Rgb = Rgb::new(50, 50, 50);
    pub const MINIMAP_PLAYER: Rgb = Rgb::new(255, 0, 0);
    pub const MINIMAP_FACING: Rgb = Rgb::new(255, 255, 0);
    pub const MINIMAP_LIGHT: Rgb = Rgb::new(255, 160, 40);
    pub const MINIMAP_PLAYER_LIGHT: Rgb = Rgb::new(255, 230, 150);
}
