//! Explosion fragments and the burst factory

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::{Bounds, Entity, Fate};
use crate::consts::{
    PARTICLE_DECAY, PARTICLE_FRICTION, PARTICLE_GRAVITY, PARTICLE_MAX_SPEED, PARTICLE_MIN_SPEED,
    PARTICLE_RADIUS,
};
use crate::direction;
use crate::renderer::{Rgba, Surface};

/// Burst colors; one is picked per burst
pub const PALETTE: [Rgba; 6] = [
    Rgba::rgb(255, 0, 0),     // red
    Rgba::rgb(255, 215, 0),   // gold
    Rgba::rgb(0, 255, 0),     // green
    Rgba::rgb(0, 255, 255),   // cyan
    Rgba::rgb(255, 0, 255),   // magenta
    Rgba::rgb(255, 255, 255), // white
];

/// A single fading spark
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: Rgba,
    /// 1 at spawn, decreases every tick
    pub opacity: f32,
    pub friction: f32,
    pub gravity: f32,
}

impl Particle {
    /// Spark at `center` flying in a random direction
    pub fn new(center: Vec2, color: Rgba, rng: &mut Pcg32) -> Self {
        let angle = rng.random::<f32>() * std::f32::consts::TAU;
        let speed =
            PARTICLE_MIN_SPEED + rng.random::<f32>() * (PARTICLE_MAX_SPEED - PARTICLE_MIN_SPEED);
        Self {
            pos: center,
            vel: direction(angle) * speed,
            color,
            opacity: 1.0,
            friction: PARTICLE_FRICTION,
            gravity: PARTICLE_GRAVITY,
        }
    }
}

impl Entity for Particle {
    fn advance(&mut self, _bounds: Bounds, _rng: &mut Pcg32) -> Fate {
        // Friction first, so this tick's gravity is not damped
        self.vel *= self.friction;
        self.vel.y += self.gravity;
        self.pos += self.vel;
        self.opacity -= PARTICLE_DECAY;

        if self.opacity <= 0.0 {
            Fate::Expired
        } else {
            Fate::Alive
        }
    }

    fn render(&self, surface: &mut dyn Surface, _time_secs: f64) {
        surface.fill_circle(self.pos, PARTICLE_RADIUS, self.color.with_alpha(self.opacity));
    }
}

/// Spawn one monochrome burst of `count` sparks at `center`
///
/// Returns the burst color.
pub fn spawn_burst(
    particles: &mut Vec<Particle>,
    center: Vec2,
    count: usize,
    rng: &mut Pcg32,
) -> Rgba {
    let color = PALETTE[rng.random_range(0..PALETTE.len())];
    particles.reserve(count);
    for _ in 0..count {
        particles.push(Particle::new(center, color, rng));
    }
    color
}
