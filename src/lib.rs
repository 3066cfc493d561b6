//! Ball Pit - a draggable 2D ball pit rendered to a raster surface
//!
//! Core modules:
//! - `sim`: Deterministic simulation (integration, sleep, collisions, dragging)
//! - `renderer`: Backend-agnostic drawing of bodies onto a `Surface`
//! - `platform`: Browser bindings (canvas surface, texture loading, frame loop)
//! - `config`: Data-driven tuning and device classes

pub mod config;
pub mod error;
pub mod platform;
pub mod renderer;
pub mod sim;
pub mod simulation;

pub use config::{DeviceClass, SimConfig};
pub use error::{Error, Result};
pub use simulation::Simulation;

use serde::{Deserialize, Serialize};

/// Reference tuning values. `SimConfig::default()` is built from these.
pub mod consts {
    /// Downward acceleration added to `vel.y` every tick
    pub const GRAVITY: f32 = 0.2;
    /// Uniform velocity multiplier applied every tick
    pub const FRICTION: f32 = 0.99;
    /// Fraction of velocity kept (sign flipped) after a wall bounce
    pub const RESTITUTION: f32 = 0.7;

    /// Speed below which a body starts settling
    pub const SETTLE_THRESHOLD: f32 = 0.15;
    /// Time a body must stay slow before it falls asleep
    pub const SETTLE_DELAY_MS: f32 = 2000.0;

    /// Extra slack for the axis-aligned broad phase reject
    pub const BROAD_PHASE_MARGIN: f32 = 20.0;

    /// Scroll delta to horizontal velocity factor (0.5 / 20)
    pub const FLOOR_IMPULSE: f32 = 0.025;

    /// Frame cadence the per-tick constants were tuned against
    pub const TARGET_FPS: f32 = 60.0;
    /// Nominal tick duration, used when no elapsed time is known
    pub const NOMINAL_DT_MS: f32 = 1000.0 / TARGET_FPS;

    /// Gap between the ball edge and the texture clip circle
    pub const TEXTURE_INSET: f32 = 10.0;

    /// Viewports at or below this width count as mobile
    pub const MOBILE_MAX_WIDTH: f32 = 768.0;
}

/// Size of the rendering surface in surface pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Reject negative or non-finite dimensions. Zero is allowed.
    pub fn validate(self) -> Result<Self> {
        let ok = |v: f32| v.is_finite() && v >= 0.0;
        if ok(self.width) && ok(self.height) {
            Ok(self)
        } else {
            Err(Error::InvalidBounds {
                width: self.width,
                height: self.height,
            })
        }
    }
}
