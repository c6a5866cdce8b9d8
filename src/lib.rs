//! Firework Horse - a looping decorative canvas animation
//!
//! Core modules:
//! - `sim`: Simulation (stars, projectiles, particles, the horse) and the per-frame tick
//! - `renderer`: Immediate-mode drawing surface abstraction and its backends
//! - `platform`: Frame scheduling and pointer input adaptation
//! - `settings`: User-tunable settings and quality presets

pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{QualityPreset, Settings};
pub use sim::Simulation;

use glam::Vec2;

/// Animation constants
pub mod consts {
    /// Fraction of the surface height (from the top) where stars may appear
    pub const STAR_BAND: f32 = 0.7;
    /// Maximum star radius in pixels
    pub const STAR_MAX_RADIUS: f32 = 2.0;

    /// Initial projectile speed (pixels per tick)
    pub const PROJECTILE_START_SPEED: f32 = 2.0;
    /// Multiplicative speed growth per tick
    pub const PROJECTILE_ACCELERATION: f32 = 1.05;
    /// Number of past positions kept for the rocket trail
    pub const PROJECTILE_TRAIL_LEN: usize = 3;
    /// Rocket trail stroke width
    pub const PROJECTILE_LINE_WIDTH: f32 = 2.0;
    /// Fraction of the upper surface used for autonomous launch targets
    pub const AUTO_TARGET_BAND: f32 = 0.4;

    /// Particle launch speed range (pixels per tick)
    pub const PARTICLE_MIN_SPEED: f32 = 1.0;
    pub const PARTICLE_MAX_SPEED: f32 = 6.0;
    /// Velocity damping per tick
    pub const PARTICLE_FRICTION: f32 = 0.96;
    /// Downward acceleration per tick
    pub const PARTICLE_GRAVITY: f32 = 0.1;
    /// Opacity lost per tick
    pub const PARTICLE_DECAY: f32 = 0.015;
    /// Rendered particle radius
    pub const PARTICLE_RADIUS: f32 = 2.5;

    /// Horizontal position the horse restarts from
    pub const MOVER_START_X: f32 = -150.0;
    /// Distance past the right edge before the horse wraps
    pub const MOVER_EXIT_MARGIN: f32 = 200.0;
    /// Glyph size as a fraction of surface width, and its cap
    pub const MOVER_SIZE_FACTOR: f32 = 0.12;
    pub const MOVER_MAX_SIZE: f32 = 100.0;
    /// Speed = base + width * factor + random spread
    pub const MOVER_BASE_SPEED: f32 = 3.0;
    pub const MOVER_SPEED_FACTOR: f32 = 0.002;
    pub const MOVER_SPEED_SPREAD: f32 = 2.0;
    /// Vertical bob
    pub const MOVER_BOB_AMPLITUDE: f32 = 15.0;
    pub const MOVER_PHASE_STEP: f32 = 0.2;
    /// Number of afterimages
    pub const MOVER_TRAIL_LEN: usize = 5;
    /// Global alpha step between afterimages
    pub const MOVER_TRAIL_ALPHA_STEP: f32 = 0.15;
    /// Glow radius around the live glyph
    pub const MOVER_GLOW_BLUR: f32 = 30.0;
}

/// Heading (radians) of the vector from `from` to `to`
#[inline]
pub fn heading(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x)
}

/// Unit vector for a heading in radians
#[inline]
pub fn direction(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}
