//! Immediate-mode 2D drawing surface
//!
//! The simulation draws through the [`Surface`] trait so it never touches a
//! real display. The browser build backs it with a canvas 2D context; tests
//! and the native runner use [`RecordingSurface`] or [`NullSurface`].

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod recording;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use recording::{DrawCall, RecordingSurface};

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Straight-alpha RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// Opacity (0-1)
    pub a: f32,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);
    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);
    pub const GOLD: Rgba = Rgba::rgb(255, 215, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Same color with a different opacity (clamped to 0-1)
    pub fn with_alpha(self, a: f32) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    /// CSS `rgba()` string for canvas style properties
    pub fn to_css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// Compositing mode for subsequent draw calls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendMode {
    /// Source-over
    #[default]
    Normal,
    /// Additive ("lighter"): overlapping light brightens
    Additive,
}

/// Drop shadow used as a glow behind glyphs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glow {
    pub blur: f32,
    pub color: Rgba,
}

/// How a text glyph is placed and styled
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphStyle {
    /// Font size in pixels
    pub size: f32,
    /// Flip horizontally around the anchor point
    pub mirrored: bool,
    /// Global alpha applied to the whole draw call
    pub alpha: f32,
    pub color: Rgba,
    pub glow: Option<Glow>,
}

/// A 2D immediate-mode drawing context
pub trait Surface {
    fn set_blend(&mut self, mode: BlendMode);
    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Rgba);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba);
    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba);
    fn draw_glyph(&mut self, glyph: &str, at: Vec2, style: &GlyphStyle);
}

/// Surface that discards everything (headless stepping)
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSurface;

impl Surface for NullSurface {
    fn set_blend(&mut self, _mode: BlendMode) {}
    fn fill_rect(&mut self, _origin: Vec2, _size: Vec2, _color: Rgba) {}
    fn fill_circle(&mut self, _center: Vec2, _radius: f32, _color: Rgba) {}
    fn stroke_line(&mut self, _from: Vec2, _to: Vec2, _width: f32, _color: Rgba) {}
    fn draw_glyph(&mut self, _glyph: &str, _at: Vec2, _style: &GlyphStyle) {}
}
