//! Simulation module
//!
//! All animation logic lives here:
//! - Fixed per-tick increments (speed is tied to the host refresh rate)
//! - Seeded RNG only, so runs are reproducible
//! - Drawing only through the [`Surface`](crate::renderer::Surface) trait

pub mod mover;
pub mod particle;
pub mod projectile;
pub mod star;
pub mod state;
pub mod tick;

pub use mover::Mover;
pub use particle::{PALETTE, Particle, spawn_burst};
pub use projectile::{ExpiryPolicy, Projectile};
pub use star::Star;
pub use state::{Bounds, LaunchOrigin, SimEvent, Simulation};
pub use tick::tick;

use rand_pcg::Pcg32;

use crate::renderer::Surface;

/// Outcome of advancing an entity by one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fate {
    Alive,
    /// Terminal: remove from the owning collection
    Expired,
}

/// Shared capability of everything the loop animates
pub trait Entity {
    /// Advance by one tick
    fn advance(&mut self, bounds: Bounds, rng: &mut Pcg32) -> Fate;

    /// Draw the current state; `time_secs` is wall-clock time
    fn render(&self, surface: &mut dyn Surface, time_secs: f64);
}
