//! The galloping horse: loops across the bottom of the surface with a
//! vertical bob and a short afterimage trail

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::{Bounds, Entity, Fate};
use crate::consts::*;
use crate::renderer::{Glow, GlyphStyle, Rgba, Surface};

/// Sprite glyph
pub const HORSE_GLYPH: &str = "\u{1F40E}";

#[derive(Debug, Clone)]
pub struct Mover {
    pub pos: Vec2,
    /// Glyph size in pixels
    pub size: f32,
    /// Horizontal pixels per tick
    pub speed: f32,
    /// Drives the vertical bob
    pub phase: f32,
    /// Recent positions, newest first
    pub trail: Vec<Vec2>,
    /// Completed laps
    pub laps: u32,
    /// No bob and no glow
    pub reduced_motion: bool,
}

impl Mover {
    pub fn new(bounds: Bounds, rng: &mut Pcg32) -> Self {
        let mut mover = Self {
            pos: Vec2::ZERO,
            size: 0.0,
            speed: 0.0,
            phase: 0.0,
            trail: Vec::with_capacity(MOVER_TRAIL_LEN + 1),
            laps: 0,
            reduced_motion: false,
        };
        mover.reset(bounds, rng);
        mover
    }

    /// Speed range `[min, max)` for a surface width
    pub fn speed_range(width: f32) -> (f32, f32) {
        let min = MOVER_BASE_SPEED + width * MOVER_SPEED_FACTOR;
        (min, min + MOVER_SPEED_SPREAD)
    }

    /// Glyph size for a surface width
    pub fn size_for(width: f32) -> f32 {
        (width * MOVER_SIZE_FACTOR).min(MOVER_MAX_SIZE)
    }

    /// Put the horse back off the left edge with a fresh random speed
    pub fn reset(&mut self, bounds: Bounds, rng: &mut Pcg32) {
        let (min, max) = Self::speed_range(bounds.width);
        self.size = Self::size_for(bounds.width);
        self.pos = Vec2::new(MOVER_START_X, self.baseline(bounds));
        self.speed = min + rng.random::<f32>() * (max - min);
        self.phase = 0.0;
        self.trail.clear();
    }

    fn baseline(&self, bounds: Bounds) -> f32 {
        bounds.height - self.size
    }

    fn bob_amplitude(&self) -> f32 {
        if self.reduced_motion {
            0.0
        } else {
            MOVER_BOB_AMPLITUDE
        }
    }
}

impl Entity for Mover {
    fn advance(&mut self, bounds: Bounds, rng: &mut Pcg32) -> Fate {
        self.pos.x += self.speed;
        self.pos.y = self.baseline(bounds) + self.phase.sin() * self.bob_amplitude();
        self.phase += MOVER_PHASE_STEP;

        self.trail.insert(0, self.pos);
        self.trail.truncate(MOVER_TRAIL_LEN);

        if self.pos.x > bounds.width + MOVER_EXIT_MARGIN {
            self.reset(bounds, rng);
            self.laps += 1;
        }

        Fate::Alive
    }

    fn render(&self, surface: &mut dyn Surface, _time_secs: f64) {
        // Oldest first so fresher afterimages stack on top
        for (age, pos) in self.trail.iter().enumerate().rev() {
            let style = GlyphStyle {
                size: self.size,
                mirrored: true,
                alpha: (MOVER_TRAIL_LEN - 1 - age) as f32 * MOVER_TRAIL_ALPHA_STEP,
                color: Rgba::GOLD.with_alpha(0.5),
                glow: None,
            };
            surface.draw_glyph(HORSE_GLYPH, *pos, &style);
        }

        let glow = (!self.reduced_motion).then_some(Glow {
            blur: MOVER_GLOW_BLUR,
            color: Rgba::GOLD,
        });
        let style = GlyphStyle {
            size: self.size,
            mirrored: true,
            alpha: 1.0,
            color: Rgba::WHITE,
            glow,
        };
        surface.draw_glyph(HORSE_GLYPH, self.pos, &style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{DrawCall, RecordingSurface};
    use rand::SeedableRng;

    const BOUNDS: Bounds = Bounds {
        width: 1000.0,
        height: 700.0,
    };

    #[test]
    fn test_reset_state() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mover = Mover::new(BOUNDS, &mut rng);
        assert_eq!(mover.pos, Vec2::new(-150.0, 600.0));
        assert_eq!(mover.size, 100.0);
        assert_eq!(mover.phase, 0.0);
        assert!(mover.trail.is_empty());
        let (min, max) = Mover::speed_range(1000.0);
        assert!(mover.speed >= min && mover.speed < max);
    }

    #[test]
    fn test_size_scales_with_width_and_caps() {
        assert_eq!(Mover::size_for(500.0), 60.0);
        assert_eq!(Mover::size_for(4000.0), MOVER_MAX_SIZE);
    }

    #[test]
    fn test_trail_capped_and_newest_first() {
        let mut rng = Pcg32::seed_from_u64(4);
        let mut mover = Mover::new(BOUNDS, &mut rng);
        for i in 0..20 {
            mover.advance(BOUNDS, &mut rng);
            assert_eq!(mover.trail.len(), (i + 1).min(MOVER_TRAIL_LEN));
            assert_eq!(mover.trail[0], mover.pos);
        }
        assert!(mover.trail.windows(2).all(|w| w[0].x > w[1].x));
    }

    #[test]
    fn test_bob_follows_phase() {
        let mut rng = Pcg32::seed_from_u64(4);
        let mut mover = Mover::new(BOUNDS, &mut rng);
        mover.advance(BOUNDS, &mut rng);
        // First tick uses phase 0
        assert!((mover.pos.y - 600.0).abs() < 1e-4);
        mover.advance(BOUNDS, &mut rng);
        assert!((mover.pos.y - (600.0 + 0.2f32.sin() * 15.0)).abs() < 1e-4);
        for _ in 0..50 {
            mover.advance(BOUNDS, &mut rng);
            assert!((mover.pos.y - 600.0).abs() <= MOVER_BOB_AMPLITUDE + 1e-4);
        }
    }

    #[test]
    fn test_wraps_past_right_edge_with_new_speed() {
        let mut rng = Pcg32::seed_from_u64(8);
        let mut mover = Mover::new(BOUNDS, &mut rng);
        let mut ticks = 0;
        let mut last_x = mover.pos.x;
        let mut last_speed = mover.speed;
        while mover.laps == 0 {
            last_x = mover.pos.x;
            last_speed = mover.speed;
            mover.advance(BOUNDS, &mut rng);
            ticks += 1;
            assert!(ticks < 10_000, "horse never wrapped");
        }
        assert!(last_x + last_speed > BOUNDS.width + MOVER_EXIT_MARGIN);
        assert_eq!(mover.pos.x, MOVER_START_X);
        assert!(mover.trail.is_empty());
        let (min, max) = Mover::speed_range(BOUNDS.width);
        assert!(mover.speed >= min && mover.speed < max);
    }

    #[test]
    fn test_laps_are_not_periodic() {
        let mut rng = Pcg32::seed_from_u64(8);
        let mut mover = Mover::new(BOUNDS, &mut rng);
        let mut speeds = vec![mover.speed];
        while mover.laps < 5 {
            let laps = mover.laps;
            mover.advance(BOUNDS, &mut rng);
            if mover.laps != laps {
                speeds.push(mover.speed);
            }
        }
        speeds.dedup();
        assert!(speeds.len() > 1);
    }

    #[test]
    fn test_render_afterimages_then_glowing_glyph() {
        let mut rng = Pcg32::seed_from_u64(4);
        let mut mover = Mover::new(BOUNDS, &mut rng);
        for _ in 0..10 {
            mover.advance(BOUNDS, &mut rng);
        }
        let mut surface = RecordingSurface::new();
        mover.render(&mut surface, 0.0);

        assert_eq!(surface.glyphs(), MOVER_TRAIL_LEN + 1);
        let styles: Vec<GlyphStyle> = surface
            .calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Glyph { style, .. } => Some(*style),
                _ => None,
            })
            .collect();
        // Afterimages brighten toward the newest, then the live glyph
        assert!(styles[..MOVER_TRAIL_LEN].windows(2).all(|w| w[0].alpha < w[1].alpha));
        assert!(styles[..MOVER_TRAIL_LEN].iter().all(|s| s.glow.is_none() && s.mirrored));
        let live = styles[MOVER_TRAIL_LEN];
        assert_eq!(live.alpha, 1.0);
        assert!(live.glow.is_some());
    }

    #[test]
    fn test_oldest_afterimage_is_invisible() {
        let mut rng = Pcg32::seed_from_u64(9);
        let mut mover = Mover::new(BOUNDS, &mut rng);
        for _ in 0..MOVER_TRAIL_LEN {
            mover.advance(BOUNDS, &mut rng);
        }
        let mut surface = RecordingSurface::new();
        mover.render(&mut surface, 0.0);

        let alphas: Vec<f32> = surface
            .calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Glyph { style, .. } => Some(style.alpha),
                _ => None,
            })
            .collect();
        assert_eq!(alphas.len(), MOVER_TRAIL_LEN + 1);
        assert_eq!(alphas[0], 0.0);
        assert!((alphas[MOVER_TRAIL_LEN - 1] - 0.6).abs() < 1e-6);
        assert_eq!(alphas[MOVER_TRAIL_LEN], 1.0);
    }

    #[test]
    fn test_reduced_motion_disables_bob_and_glow() {
        let mut rng = Pcg32::seed_from_u64(4);
        let mut mover = Mover::new(BOUNDS, &mut rng);
        mover.reduced_motion = true;
        for _ in 0..10 {
            mover.advance(BOUNDS, &mut rng);
            assert_eq!(mover.pos.y, 600.0);
        }
        let mut surface = RecordingSurface::new();
        mover.render(&mut surface, 0.0);
        assert!(surface.calls.iter().all(|c| match c {
            DrawCall::Glyph { style, .. } => style.glow.is_none(),
            _ => true,
        }));
    }
}
