//! Platform abstraction layer
//!
//! Handles host differences for:
//! - Frame scheduling (`requestAnimationFrame` on web, manual elsewhere)
//! - Pointer input events

pub mod input;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use input::{PointerInput, handle_pointer};
#[cfg(target_arch = "wasm32")]
pub use web::AnimationFrameScheduler;

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::renderer::Surface;
use crate::sim::{SimEvent, Simulation, tick};

/// Frame callback; receives the host timestamp in milliseconds
pub type FrameCallback = Box<dyn FnOnce(f64)>;

/// Something that can run a callback at the next display refresh
pub trait FrameScheduler {
    fn schedule_next_frame(&self, callback: FrameCallback);
}

/// The simulation together with the surface it draws on
pub struct Scene<S: Surface> {
    pub sim: Simulation,
    pub surface: S,
    /// Frames rendered so far
    pub frames: u64,
    /// Simulation events logged so far
    pub reported: u64,
}

impl<S: Surface> Scene<S> {
    pub fn new(sim: Simulation, surface: S) -> Self {
        Self {
            sim,
            surface,
            frames: 0,
            reported: 0,
        }
    }

    /// Run one tick at host time `time_ms`
    pub fn frame(&mut self, time_ms: f64) {
        // Input arrives between frames; report it before the tick clears it
        self.report_events();
        tick(&mut self.sim, &mut self.surface, time_ms / 1000.0);
        self.frames += 1;
        self.report_events();
    }

    fn report_events(&mut self) {
        for event in self.sim.drain_events() {
            log_event(&event);
            self.reported += 1;
        }
    }
}

fn log_event(event: &SimEvent) {
    match event {
        SimEvent::Launched { origin, from, to } => {
            log::debug!("{:?} launch ({:.0}, {:.0}) -> ({:.0}, {:.0})", origin, from.x, from.y, to.x, to.y)
        }
        SimEvent::Burst { at, count, .. } => {
            log::debug!("Burst of {} at ({:.0}, {:.0})", count, at.x, at.y)
        }
        SimEvent::MoverLapped { laps, speed } => {
            log::debug!("Horse lap {} (next speed {:.2})", laps, speed)
        }
        // Already reported as a warning
        SimEvent::Trimmed { .. } => {}
    }
}

/// Start the perpetual frame loop: every frame ticks the scene and
/// schedules the next one
pub fn start_loop<F, S>(scene: Rc<RefCell<Scene<S>>>, scheduler: Rc<F>)
where
    F: FrameScheduler + 'static,
    S: Surface + 'static,
{
    let next = Rc::clone(&scheduler);
    scheduler.schedule_next_frame(Box::new(move |time_ms| {
        scene.borrow_mut().frame(time_ms);
        start_loop(scene, next);
    }));
}

/// Scheduler whose frames fire only when asked (native runner, tests)
#[derive(Default)]
pub struct ManualScheduler {
    pending: RefCell<VecDeque<FrameCallback>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of callbacks waiting for a frame
    pub fn pending(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Fire the oldest pending callback; false if none was waiting
    pub fn fire(&self, time_ms: f64) -> bool {
        let callback = self.pending.borrow_mut().pop_front();
        match callback {
            Some(callback) => {
                callback(time_ms);
                true
            }
            None => false,
        }
    }
}

impl FrameScheduler for ManualScheduler {
    fn schedule_next_frame(&self, callback: FrameCallback) {
        self.pending.borrow_mut().push_back(callback);
    }
}
