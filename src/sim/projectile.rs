//! Launch rocket: accelerates from a source point toward a target and
//! expires when it gets there (or leaves the surface)

use glam::Vec2;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::{Bounds, Entity, Fate};
use crate::consts::{
    PROJECTILE_ACCELERATION, PROJECTILE_LINE_WIDTH, PROJECTILE_START_SPEED, PROJECTILE_TRAIL_LEN,
};
use crate::renderer::{Rgba, Surface};
use crate::{direction, heading};

/// When a rocket counts as arrived
///
/// The bounds test (reached the target height, or left the surface
/// horizontally) always applies; `Proximity` additionally expires the rocket
/// once the remaining distance drops below a fraction of the initial one.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExpiryPolicy {
    #[default]
    Bounds,
    Proximity { fraction: f32 },
}

/// A rocket in flight
#[derive(Debug, Clone)]
pub struct Projectile {
    pub pos: Vec2,
    pub target: Vec2,
    /// Fixed heading from source to target (radians)
    pub angle: f32,
    /// Grows geometrically every tick
    pub speed: f32,
    /// Last positions, newest first; length is constant
    pub trail: Vec<Vec2>,
    initial_distance: f32,
    policy: ExpiryPolicy,
}

impl Projectile {
    pub fn new(source: Vec2, target: Vec2, policy: ExpiryPolicy) -> Self {
        Self {
            pos: source,
            target,
            angle: heading(source, target),
            speed: PROJECTILE_START_SPEED,
            trail: vec![source; PROJECTILE_TRAIL_LEN],
            initial_distance: source.distance(target),
            policy,
        }
    }

    /// Shift the trail: drop the oldest point, record the current position
    fn record_trail(&mut self) {
        self.trail.pop();
        self.trail.insert(0, self.pos);
    }

    /// Oldest recorded position (start of the drawn streak)
    pub fn tail(&self) -> Vec2 {
        self.trail.last().copied().unwrap_or(self.pos)
    }

    fn has_arrived(&self, bounds: Bounds) -> bool {
        let reached_height = self.pos.y <= self.target.y;
        let left_surface = self.pos.x < 0.0 || self.pos.x > bounds.width;
        let close_enough = match self.policy {
            ExpiryPolicy::Bounds => false,
            ExpiryPolicy::Proximity { fraction } => {
                self.pos.distance(self.target) < self.initial_distance * fraction
            }
        };
        reached_height || left_surface || close_enough
    }
}

impl Entity for Projectile {
    fn advance(&mut self, bounds: Bounds, _rng: &mut Pcg32) -> Fate {
        self.record_trail();
        self.speed *= PROJECTILE_ACCELERATION;
        self.pos += direction(self.angle) * self.speed;

        if self.has_arrived(bounds) {
            Fate::Expired
        } else {
            Fate::Alive
        }
    }

    fn render(&self, surface: &mut dyn Surface, _time_secs: f64) {
        surface.stroke_line(self.tail(), self.pos, PROJECTILE_LINE_WIDTH, Rgba::GOLD);
    }
}
