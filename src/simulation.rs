//! Simulation handle: one world, its clock and the frame sequence
//!
//! Each handle owns its own state; there are no globals, so any number of
//! simulations can run side by side. The host drives it:
//! `frame` from its animation callback, `pointer_*` from its input
//! listeners, `apply_floor_movement` from its scroll listener.

use glam::Vec2;

use crate::Bounds;
use crate::config::{DeviceClass, SimConfig};
use crate::error::Result;
use crate::renderer::{Surface, draw_world};
use crate::sim::{BodyId, FrameClock, World};

pub struct Simulation {
    world: World,
    clock: FrameClock,
    destroyed: bool,
}

impl Simulation {
    /// Create a simulation with `target_body_count` bodies
    ///
    /// `texture_sources` are opaque handles for the host's image loader; body
    /// `i` uses `texture_sources[i % len]`.
    pub fn new(
        bounds: Bounds,
        texture_sources: &[String],
        target_body_count: usize,
        config: SimConfig,
        seed: u64,
        start_ms: f64,
    ) -> Result<Self> {
        let bounds = bounds.validate()?;
        let clock = FrameClock::new(config.min_frame_ms(), start_ms);
        let world = World::spawn(bounds, texture_sources.len(), target_body_count, config, seed);
        Ok(Self {
            world,
            clock,
            destroyed: false,
        })
    }

    /// Create with the body count and sizes for a viewport width
    pub fn for_viewport(
        bounds: Bounds,
        viewport_width: f32,
        texture_sources: &[String],
        seed: u64,
        start_ms: f64,
    ) -> Result<Self> {
        let device = DeviceClass::from_viewport_width(viewport_width);
        Self::new(
            bounds,
            texture_sources,
            device.body_count(),
            SimConfig::for_device(device),
            seed,
            start_ms,
        )
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn resize(&mut self, bounds: Bounds) -> Result<()> {
        self.world.resize(bounds.validate()?);
        Ok(())
    }

    /// Host animation callback. Returns whether a tick ran.
    ///
    /// Tick order: integrate, draw, resolve collisions and re-clamp.
    pub fn frame<S: Surface>(&mut self, now_ms: f64, surface: &mut S) -> bool {
        if self.destroyed {
            return false;
        }
        let Some(dt_ms) = self.clock.poll(now_ms) else {
            return false;
        };
        self.world.integrate(dt_ms);
        draw_world(surface, &self.world);
        self.world.collide();
        true
    }

    pub fn pointer_down(&mut self, x: f32, y: f32) -> Option<BodyId> {
        self.world.pointer_down(Vec2::new(x, y))
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.world.pointer_move(Vec2::new(x, y));
    }

    pub fn pointer_up(&mut self) {
        self.world.pointer_up();
    }

    pub fn pointer_cancel(&mut self) {
        self.world.pointer_cancel();
    }

    pub fn apply_floor_movement(&mut self, scroll_delta: f32) {
        self.world.apply_floor_movement(scroll_delta);
    }

    /// Stop ticking. Any held body is released first.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.world.pointer_cancel();
        self.destroyed = true;
        log::info!("Simulation destroyed after {} ticks", self.world.time_ticks);
    }
}
