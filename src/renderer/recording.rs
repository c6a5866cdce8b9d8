//! Surface that records draw calls instead of rasterizing them

use glam::Vec2;

use super::{BlendMode, GlyphStyle, Rgba, Surface};

/// One recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Blend(BlendMode),
    Rect { origin: Vec2, size: Vec2, color: Rgba },
    Circle { center: Vec2, radius: f32, color: Rgba },
    Line { from: Vec2, to: Vec2, width: f32, color: Rgba },
    Glyph { glyph: String, at: Vec2, style: GlyphStyle },
}

/// Keeps every draw call of the current frame in order
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub calls: Vec<DrawCall>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }

    pub fn circles(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Circle { .. }))
            .count()
    }

    pub fn lines(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Line { .. }))
            .count()
    }

    pub fn glyphs(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Glyph { .. }))
            .count()
    }
}

impl Surface for RecordingSurface {
    fn set_blend(&mut self, mode: BlendMode) {
        self.calls.push(DrawCall::Blend(mode));
    }

    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Rgba) {
        self.calls.push(DrawCall::Rect { origin, size, color });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        self.calls.push(DrawCall::Circle {
            center,
            radius,
            color,
        });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba) {
        self.calls.push(DrawCall::Line {
            from,
            to,
            width,
            color,
        });
    }

    fn draw_glyph(&mut self, glyph: &str, at: Vec2, style: &GlyphStyle) {
        self.calls.push(DrawCall::Glyph {
            glyph: glyph.to_string(),
            at,
            style: *style,
        });
    }
}
