//! Host-agnostic draw commands.
//!
//! A frame is rendered into a list of [`DrawCommand`]s in canvas
//! coordinates. The window host rasterizes them with wgpu; tests simply
//! inspect them.

use glam::Vec2;

/// 8-bit RGBA color, non-premultiplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Self = Self::rgba(255, 255, 255, 255);
    pub const BLACK: Self = Self::rgba(0, 0, 0, 255);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// From float channels in 0..=255; values are clamped and rounded.
    pub fn from_channels(r: f32, g: f32, b: f32, a: f32) -> Self {
        let c = |v: f32| v.clamp(0.0, 255.0).round() as u8;
        Self::rgba(c(r), c(g), c(b), c(a))
    }

    /// Linear-light RGBA in 0..=1 for an sRGB render target.
    pub fn to_linear(self) -> [f32; 4] {
        fn channel(c: u8) -> f32 {
            let c = c as f32 / 255.0;
            if c <= 0.04045 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }
        [channel(self.r), channel(self.g), channel(self.b), self.a as f32 / 255.0]
    }
}

/// Re-map `value` from `[start1, stop1]` to `[start2, stop2]`. Not clamped.
pub fn map_range(value: f32, start1: f32, stop1: f32, start2: f32, stop2: f32) -> f32 {
    start2 + (stop2 - start2) * ((value - start1) / (stop1 - start1))
}

/// One primitive of a frame.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Fill the whole canvas.
    Clear(Color),
    /// Axis-aligned filled rectangle.
    Rect { origin: Vec2, size: Vec2, fill: Color },
    /// Closed polygon through `points` in order.
    Polygon {
        points: Vec<Vec2>,
        fill: Option<Color>,
        stroke: Option<Color>,
    },
}
