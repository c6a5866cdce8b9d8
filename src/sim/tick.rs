//! Per-frame simulation-and-render pass
//!
//! Layering order each tick:
//! 1. Translucent black wash (leaves fading trails behind everything)
//! 2. Stars, additive
//! 3. Maybe an autonomous launch
//! 4. Rockets, newest first: draw, advance, burst on expiry
//! 5. Sparks, newest first: draw, advance, drop on expiry
//! 6. Horse, normal blending: advance, draw

use glam::Vec2;

use super::state::{SimEvent, Simulation};
use super::{Entity, Fate};
use crate::renderer::{BlendMode, NullSurface, Rgba, Surface};

/// Advance the simulation by one tick, drawing as it goes
///
/// Events left over from the previous tick are discarded first; hosts that
/// want them call `drain_events` between ticks.
pub fn tick(sim: &mut Simulation, surface: &mut dyn Surface, time_secs: f64) {
    sim.events.clear();
    sim.time_ticks += 1;
    let bounds = sim.bounds;

    surface.set_blend(BlendMode::Normal);
    surface.fill_rect(
        Vec2::ZERO,
        bounds.size(),
        Rgba::BLACK.with_alpha(sim.settings.fade_alpha),
    );

    surface.set_blend(BlendMode::Additive);
    for star in &sim.stars {
        star.render(surface, time_secs);
    }

    sim.maybe_auto_launch();

    // Reverse index order keeps the remaining indices valid across removal
    let mut i = sim.projectiles.len();
    while i > 0 {
        i -= 1;
        sim.projectiles[i].render(surface, time_secs);
        if sim.projectiles[i].advance(bounds, &mut sim.rng) == Fate::Expired {
            let rocket = sim.projectiles.remove(i);
            sim.burst(rocket.pos);
        }
    }

    let mut i = sim.particles.len();
    while i > 0 {
        i -= 1;
        sim.particles[i].render(surface, time_secs);
        if sim.particles[i].advance(bounds, &mut sim.rng) == Fate::Expired {
            sim.particles.remove(i);
        }
    }

    surface.set_blend(BlendMode::Normal);
    let laps = sim.mover.laps;
    sim.mover.advance(bounds, &mut sim.rng);
    if sim.mover.laps != laps {
        sim.events.push(SimEvent::MoverLapped {
            laps: sim.mover.laps,
            speed: sim.mover.speed,
        });
    }
    sim.mover.render(surface, time_secs);

    sim.flush_trim_report();
}

impl Simulation {
    /// One tick without drawing anything
    pub fn advance(&mut self) {
        tick(self, &mut NullSurface, 0.0);
    }
}
