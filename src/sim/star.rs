//! Twinkling background star

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::{Bounds, Entity, Fate};
use crate::consts::{STAR_BAND, STAR_MAX_RADIUS};
use crate::renderer::{Rgba, Surface};

/// A static point whose brightness is a pure function of wall-clock time
#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    pub pos: Vec2,
    pub radius: f32,
    pub phase_offset: f32,
}

impl Star {
    /// Random star in the upper band of the surface
    pub fn random(bounds: Bounds, rng: &mut Pcg32) -> Self {
        let pos = Vec2::new(
            rng.random::<f32>() * bounds.width,
            rng.random::<f32>() * bounds.height * STAR_BAND,
        );
        Self {
            pos,
            radius: rng.random::<f32>() * STAR_MAX_RADIUS,
            // The x coordinate doubles as the twinkle phase
            phase_offset: pos.x,
        }
    }

    /// Brightness at a given time, in [0, 1]
    pub fn alpha(&self, time_secs: f64) -> f32 {
        (time_secs + self.phase_offset as f64).sin().abs() as f32
    }
}

impl Entity for Star {
    fn advance(&mut self, _bounds: Bounds, _rng: &mut Pcg32) -> Fate {
        Fate::Alive
    }

    fn render(&self, surface: &mut dyn Surface, time_secs: f64) {
        surface.fill_circle(
            self.pos,
            self.radius,
            Rgba::WHITE.with_alpha(self.alpha(time_secs)),
        );
    }
}
