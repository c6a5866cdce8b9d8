//! Pointer input adaptation
//!
//! Every qualifying event launches exactly one rocket from the bottom
//! center of the surface toward the event position. No debouncing.

use glam::Vec2;

use crate::sim::Simulation;

/// Host-independent pointer event
#[derive(Debug, Clone, PartialEq)]
pub enum PointerInput {
    /// Mouse button / pen press
    Down { x: f32, y: f32 },
    /// Touch start with all active touch points, in order
    TouchStart(Vec<Vec2>),
}

impl PointerInput {
    /// Surface coordinate the event points at
    pub fn target(&self) -> Option<Vec2> {
        let point = match self {
            PointerInput::Down { x, y } => Vec2::new(*x, *y),
            PointerInput::TouchStart(touches) => *touches.first()?,
        };
        point.is_finite().then_some(point)
    }
}

/// Launch a rocket for a pointer event; returns whether one was launched
pub fn handle_pointer(sim: &mut Simulation, event: &PointerInput) -> bool {
    match event.target() {
        Some(target) => {
            sim.launch_toward(target);
            log::debug!("Pointer launch toward ({:.0}, {:.0})", target.x, target.y);
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;

    fn sim() -> Simulation {
        Simulation::new(1, 800.0, 600.0, Settings::default())
    }

    #[test]
    fn test_pointer_down_launches_from_bottom_center() {
        let mut sim = sim();
        assert!(handle_pointer(&mut sim, &PointerInput::Down { x: 250.0, y: 90.0 }));
        assert_eq!(sim.projectiles.len(), 1);
        assert_eq!(sim.projectiles[0].pos, Vec2::new(400.0, 600.0));
        assert_eq!(sim.projectiles[0].target, Vec2::new(250.0, 90.0));
    }

    #[test]
    fn test_touch_uses_first_point() {
        let mut sim = sim();
        let touch = PointerInput::TouchStart(vec![Vec2::new(10.0, 20.0), Vec2::new(700.0, 50.0)]);
        assert!(handle_pointer(&mut sim, &touch));
        assert_eq!(sim.projectiles.len(), 1);
        assert_eq!(sim.projectiles[0].target, Vec2::new(10.0, 20.0));
    }

    #[test]
    fn test_empty_touch_launches_nothing() {
        let mut sim = sim();
        assert!(!handle_pointer(&mut sim, &PointerInput::TouchStart(Vec::new())));
        assert!(sim.projectiles.is_empty());
    }

    #[test]
    fn test_no_debounce() {
        let mut sim = sim();
        for _ in 0..5 {
            handle_pointer(&mut sim, &PointerInput::Down { x: 1.0, y: 1.0 });
        }
        assert_eq!(sim.projectiles.len(), 5);
    }

    #[test]
    fn test_before_first_resize() {
        let mut sim = Simulation::new(1, 0.0, 0.0, Settings::default());
        assert!(handle_pointer(&mut sim, &PointerInput::Down { x: 30.0, y: 40.0 }));
        assert_eq!(sim.projectiles[0].pos, Vec2::ZERO);
        sim.advance();
    }

    #[test]
    fn test_non_finite_coordinates_ignored() {
        let mut sim = sim();
        assert!(!handle_pointer(&mut sim, &PointerInput::Down { x: f32::NAN, y: 1.0 }));
        assert!(sim.projectiles.is_empty());
    }
}
