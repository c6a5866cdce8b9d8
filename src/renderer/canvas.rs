//! Canvas 2D backend (browser only)

use glam::Vec2;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::{BlendMode, GlyphStyle, Rgba, Surface};

const GLYPH_FONT: &str = "Arial";

/// [`Surface`] backed by a `CanvasRenderingContext2d`
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Acquire the 2D context of a canvas
    pub fn new(canvas: &HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self { ctx })
    }

    fn check(op: &str, result: Result<(), JsValue>) {
        if let Err(e) = result {
            log::warn!("Canvas {} failed: {:?}", op, e);
        }
    }
}

impl Surface for CanvasSurface {
    fn set_blend(&mut self, mode: BlendMode) {
        let op = match mode {
            BlendMode::Normal => "source-over",
            BlendMode::Additive => "lighter",
        };
        Self::check("composite", self.ctx.set_global_composite_operation(op));
    }

    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Rgba) {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx
            .fill_rect(origin.x as f64, origin.y as f64, size.x as f64, size.y as f64);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.begin_path();
        Self::check(
            "arc",
            self.ctx.arc(
                center.x as f64,
                center.y as f64,
                radius.max(0.0) as f64,
                0.0,
                std::f64::consts::TAU,
            ),
        );
        self.ctx.fill();
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba) {
        self.ctx.begin_path();
        self.ctx.move_to(from.x as f64, from.y as f64);
        self.ctx.line_to(to.x as f64, to.y as f64);
        self.ctx.set_stroke_style_str(&color.to_css());
        self.ctx.set_line_width(width as f64);
        self.ctx.stroke();
    }

    fn draw_glyph(&mut self, glyph: &str, at: Vec2, style: &GlyphStyle) {
        self.ctx.save();
        self.ctx.set_global_alpha(style.alpha.clamp(0.0, 1.0) as f64);
        if let Some(glow) = style.glow {
            self.ctx.set_shadow_blur(glow.blur as f64);
            self.ctx.set_shadow_color(&glow.color.to_css());
        }
        Self::check("translate", self.ctx.translate(at.x as f64, at.y as f64));
        if style.mirrored {
            Self::check("scale", self.ctx.scale(-1.0, 1.0));
        }
        self.ctx.set_font(&format!("{}px {}", style.size, GLYPH_FONT));
        self.ctx.set_fill_style_str(&style.color.to_css());
        Self::check("fill_text", self.ctx.fill_text(glyph, 0.0, 0.0));
        self.ctx.restore();
    }
}
