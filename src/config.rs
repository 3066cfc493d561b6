//! Simulation tuning and device classes
//!
//! Every constant the physics and renderer read lives in `SimConfig` so hosts
//! can override them with a JSON blob. Missing fields fall back to the
//! reference values in `crate::consts`.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::Result;

/// Device class, picked from the hosting viewport width
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DeviceClass {
    Mobile,
    #[default]
    Desktop,
}

impl DeviceClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceClass::Mobile => "Mobile",
            DeviceClass::Desktop => "Desktop",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "mobile" | "phone" => Some(DeviceClass::Mobile),
            "desktop" => Some(DeviceClass::Desktop),
            _ => None,
        }
    }

    /// Classify a viewport by its CSS width
    pub fn from_viewport_width(width: f32) -> Self {
        if width <= MOBILE_MAX_WIDTH {
            DeviceClass::Mobile
        } else {
            DeviceClass::Desktop
        }
    }

    /// Number of bodies to spawn (fewer on constrained viewports)
    pub fn body_count(&self) -> usize {
        match self {
            DeviceClass::Mobile => 13,
            DeviceClass::Desktop => 26,
        }
    }

    /// Spawn radius range `(min, max)`, max exclusive
    pub fn radius_range(&self) -> (f32, f32) {
        match self {
            DeviceClass::Mobile => (30.0, 50.0),
            DeviceClass::Desktop => (50.0, 90.0),
        }
    }
}

/// Physics and render tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Device class used for spawn sizing
    pub device: DeviceClass,

    // === Integrator ===
    pub gravity: f32,
    pub friction: f32,
    pub restitution: f32,

    // === Sleep ===
    pub settle_threshold: f32,
    pub settle_delay_ms: f32,

    // === Collisions ===
    pub broad_phase_margin: f32,

    // === Disturbance ===
    /// Horizontal velocity added per unit of scroll (sign inverted)
    pub floor_impulse: f32,

    // === Clock ===
    pub target_fps: f32,

    // === Spawning ===
    /// Max absolute initial speed per axis
    pub spawn_speed: f32,

    // === Renderer ===
    pub texture_inset: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            device: DeviceClass::Desktop,

            gravity: GRAVITY,
            friction: FRICTION,
            restitution: RESTITUTION,

            settle_threshold: SETTLE_THRESHOLD,
            settle_delay_ms: SETTLE_DELAY_MS,

            broad_phase_margin: BROAD_PHASE_MARGIN,

            floor_impulse: FLOOR_IMPULSE,

            target_fps: TARGET_FPS,

            spawn_speed: 2.0,

            texture_inset: TEXTURE_INSET,
        }
    }
}

impl SimConfig {
    /// Defaults for a device class
    pub fn for_device(device: DeviceClass) -> Self {
        Self {
            device,
            ..Self::default()
        }
    }

    /// Parse a (possibly partial) JSON override on top of the defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        log::info!("Loaded simulation config ({})", config.device.as_str());
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Minimum wall-clock time between two executed ticks
    pub fn min_frame_ms(&self) -> f64 {
        if self.target_fps > 0.0 {
            1000.0 / self.target_fps as f64
        } else {
            0.0
        }
    }
}
