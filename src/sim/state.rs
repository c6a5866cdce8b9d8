//! Simulation state: every live collection plus the horse, owned in one place

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::{Mover, Particle, Projectile, Star, spawn_burst};
use crate::consts::AUTO_TARGET_BAND;
use crate::renderer::Rgba;
use crate::settings::Settings;

/// Drawable area in surface pixels (origin top-left, y down)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    /// Negative or non-finite sizes collapse to zero
    pub fn new(width: f32, height: f32) -> Self {
        let sane = |v: f32| if v.is_finite() && v > 0.0 { v } else { 0.0 };
        Self {
            width: sane(width),
            height: sane(height),
        }
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Launch point for pointer-triggered rockets
    pub fn bottom_center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height)
    }
}

/// What triggered a launch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchOrigin {
    Pointer,
    Auto,
}

/// Notable things that happened in the simulation
#[derive(Debug, Clone, PartialEq)]
pub enum SimEvent {
    Launched {
        origin: LaunchOrigin,
        from: Vec2,
        to: Vec2,
    },
    Burst {
        at: Vec2,
        color: Rgba,
        count: usize,
    },
    MoverLapped {
        laps: u32,
        speed: f32,
    },
    /// Oldest entities dropped to respect population caps
    Trimmed {
        projectiles: usize,
        particles: usize,
    },
}

/// The whole animation
#[derive(Debug, Clone)]
pub struct Simulation {
    /// Seed for reproducibility
    pub seed: u64,
    pub bounds: Bounds,
    pub settings: Settings,
    pub stars: Vec<Star>,
    /// Rockets in flight (append order)
    pub projectiles: Vec<Projectile>,
    /// Live sparks (append order, oldest first)
    pub particles: Vec<Particle>,
    pub mover: Mover,
    /// Tick counter
    pub time_ticks: u64,
    /// Events from the current tick, plus launches made since it ran
    pub events: Vec<SimEvent>,
    pub(crate) rng: Pcg32,
    /// Trim counts not yet reported
    pending_trim: (usize, usize),
}

impl Simulation {
    /// Seed the stars and build the horse for a surface of the given size
    pub fn new(seed: u64, width: f32, height: f32, settings: Settings) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let bounds = Bounds::new(width, height);

        let stars = (0..settings.quality.star_count())
            .map(|_| Star::random(bounds, &mut rng))
            .collect();
        let mut mover = Mover::new(bounds, &mut rng);
        mover.reduced_motion = settings.reduced_motion;

        Self {
            seed,
            bounds,
            settings,
            stars,
            projectiles: Vec::new(),
            particles: Vec::new(),
            mover,
            time_ticks: 0,
            events: Vec::new(),
            rng,
            pending_trim: (0, 0),
        }
    }

    /// Track a new surface size; entities in flight are left where they are
    pub fn resize(&mut self, width: f32, height: f32) {
        self.bounds = Bounds::new(width, height);
        log::debug!("Surface resized to {}x{}", self.bounds.width, self.bounds.height);
    }

    /// Queue a rocket from `source` toward `target`
    pub fn launch(&mut self, source: Vec2, target: Vec2, origin: LaunchOrigin) {
        let cap = self.settings.max_projectiles();
        if cap > 0 && self.projectiles.len() >= cap {
            let excess = self.projectiles.len() + 1 - cap;
            self.projectiles.drain(..excess);
            self.pending_trim.0 += excess;
        }

        self.projectiles
            .push(Projectile::new(source, target, self.settings.expiry));
        self.events.push(SimEvent::Launched {
            origin,
            from: source,
            to: target,
        });
    }

    /// Rocket from the bottom center of the surface toward a point
    pub fn launch_toward(&mut self, target: Vec2) {
        let source = self.bounds.bottom_center();
        self.launch(source, target, LaunchOrigin::Pointer);
    }

    /// Roll for an autonomous launch from a random bottom point
    pub(crate) fn maybe_auto_launch(&mut self) {
        let roll: f32 = self.rng.random();
        if roll >= self.settings.effective_launch_chance() {
            return;
        }

        let Bounds { width, height } = self.bounds;
        let source = Vec2::new(self.rng.random::<f32>() * width, height);
        let target = Vec2::new(
            self.rng.random::<f32>() * width,
            self.rng.random::<f32>() * height * AUTO_TARGET_BAND,
        );
        self.launch(source, target, LaunchOrigin::Auto);
    }

    /// Spawn a burst at `at`, dropping the oldest sparks past the cap
    pub(crate) fn burst(&mut self, at: Vec2) {
        let count = self.settings.burst_size;
        let color = spawn_burst(&mut self.particles, at, count, &mut self.rng);

        let cap = self.settings.max_particles();
        if self.particles.len() > cap {
            let excess = self.particles.len() - cap;
            self.particles.drain(..excess);
            self.pending_trim.1 += excess;
        }

        self.events.push(SimEvent::Burst { at, color, count });
    }

    /// Report trims accumulated since the last call (at most one warning)
    pub(crate) fn flush_trim_report(&mut self) {
        let (projectiles, particles) = std::mem::take(&mut self.pending_trim);
        if projectiles == 0 && particles == 0 {
            return;
        }
        log::warn!(
            "Population cap reached: dropped {} rockets, {} sparks",
            projectiles,
            particles
        );
        self.events.push(SimEvent::Trimmed {
            projectiles,
            particles,
        });
    }

    /// Take the events recorded so far
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::QualityPreset;

    #[test]
    fn test_new_seeds_stars_and_mover() {
        let sim = Simulation::new(1, 800.0, 600.0, Settings::default());
        assert_eq!(sim.stars.len(), 100);
        assert!(sim.projectiles.is_empty());
        assert!(sim.particles.is_empty());
        assert_eq!(sim.mover.pos.x, -150.0);
    }

    #[test]
    fn test_same_seed_same_sky() {
        let a = Simulation::new(99, 800.0, 600.0, Settings::default());
        let b = Simulation::new(99, 800.0, 600.0, Settings::default());
        assert_eq!(a.stars, b.stars);
        assert_eq!(a.mover.speed, b.mover.speed);
    }

    #[test]
    fn test_bounds_sanitized() {
        assert_eq!(Bounds::new(-5.0, f32::NAN), Bounds::default());
        assert_eq!(Bounds::new(10.0, 20.0).bottom_center(), Vec2::new(5.0, 20.0));
    }

    #[test]
    fn test_resize_keeps_entities() {
        let mut sim = Simulation::new(1, 800.0, 600.0, Settings::default());
        sim.launch_toward(Vec2::new(100.0, 100.0));
        let pos = sim.projectiles[0].pos;
        sim.resize(200.0, 100.0);
        assert_eq!(sim.bounds, Bounds::new(200.0, 100.0));
        assert_eq!(sim.projectiles[0].pos, pos);
        assert_eq!(sim.stars.len(), 100);
    }

    #[test]
    fn test_launch_toward_starts_bottom_center() {
        let mut sim = Simulation::new(1, 800.0, 600.0, Settings::default());
        sim.launch_toward(Vec2::new(120.0, 80.0));
        assert_eq!(sim.projectiles.len(), 1);
        assert_eq!(sim.projectiles[0].pos, Vec2::new(400.0, 600.0));
        assert_eq!(sim.projectiles[0].target, Vec2::new(120.0, 80.0));
        assert_eq!(
            sim.drain_events(),
            vec![SimEvent::Launched {
                origin: LaunchOrigin::Pointer,
                from: Vec2::new(400.0, 600.0),
                to: Vec2::new(120.0, 80.0),
            }]
        );
        assert!(sim.events.is_empty());
    }

    #[test]
    fn test_projectile_cap_drops_oldest() {
        let mut sim = Simulation::new(1, 800.0, 600.0, Settings::from_preset(QualityPreset::Low));
        let cap = sim.settings.max_projectiles();
        for i in 0..cap + 3 {
            sim.launch_toward(Vec2::new(i as f32, 10.0));
        }
        assert_eq!(sim.projectiles.len(), cap);
        // The three oldest were dropped
        assert_eq!(sim.projectiles[0].target.x, 3.0);
        sim.flush_trim_report();
        assert!(sim.events.contains(&SimEvent::Trimmed {
            projectiles: 3,
            particles: 0,
        }));
    }

    #[test]
    fn test_particle_cap_drops_oldest() {
        let mut sim = Simulation::new(1, 800.0, 600.0, Settings::from_preset(QualityPreset::Low));
        let cap = sim.settings.max_particles();
        let bursts = cap / sim.settings.burst_size + 2;
        for _ in 0..bursts {
            sim.burst(Vec2::new(10.0, 10.0));
        }
        sim.burst(Vec2::new(500.0, 500.0));
        assert_eq!(sim.particles.len(), cap);
        // Newest burst survived intact at the end
        let tail = &sim.particles[cap - sim.settings.burst_size..];
        assert!(tail.iter().all(|p| p.pos == Vec2::new(500.0, 500.0)));
    }

    #[test]
    fn test_auto_launch_disabled() {
        let settings = Settings {
            auto_launch: false,
            ..Settings::default()
        };
        let mut sim = Simulation::new(1, 800.0, 600.0, settings);
        for _ in 0..1000 {
            sim.maybe_auto_launch();
        }
        assert!(sim.projectiles.is_empty());
    }

    #[test]
    fn test_auto_launch_targets_upper_band() {
        let settings = Settings {
            auto_launch_chance: 1.0,
            ..Settings::default()
        };
        let mut sim = Simulation::new(1, 800.0, 600.0, settings);
        for _ in 0..50 {
            sim.maybe_auto_launch();
        }
        assert_eq!(sim.projectiles.len(), 50);
        for p in &sim.projectiles {
            assert_eq!(p.pos.y, 600.0);
            assert!(p.pos.x >= 0.0 && p.pos.x < 800.0);
            assert!(p.target.y >= 0.0 && p.target.y < 600.0 * AUTO_TARGET_BAND);
        }
    }

    #[test]
    fn test_zero_sized_surface() {
        let settings = Settings {
            auto_launch_chance: 1.0,
            ..Settings::default()
        };
        let mut sim = Simulation::new(1, 0.0, 0.0, settings);
        sim.maybe_auto_launch();
        sim.launch_toward(Vec2::new(30.0, 30.0));
        assert_eq!(sim.projectiles.len(), 2);
    }
}
