//! A single simulated disc

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Stable handle to a body. Bodies are never removed, so this is its index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BodyId(pub u32);

impl BodyId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Index into the texture palette supplied at creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextureId(pub u32);

/// Motion state of a body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BodyState {
    /// Moving normally
    Awake,
    /// Slower than the settle threshold for `idle_ms`
    Settling { idle_ms: f32 },
    /// Frozen: zero velocity, skipped by the integrator
    Asleep,
    /// Held by the pointer; position is set by the drag session
    Dragging,
}

/// A ball in the pit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    pub id: BodyId,
    pub pos: Vec2,
    pub vel: Vec2,
    radius: f32,
    /// Logo drawn inside the ball once loaded
    pub texture: Option<TextureId>,
    pub state: BodyState,
}

impl Body {
    pub fn new(id: BodyId, pos: Vec2, vel: Vec2, radius: f32, texture: Option<TextureId>) -> Self {
        debug_assert!(radius > 0.0, "body radius must be positive");
        Self {
            id,
            pos,
            vel,
            radius,
            texture,
            state: BodyState::Awake,
        }
    }

    /// Radius is fixed for the lifetime of the body
    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    #[inline]
    pub fn is_sleeping(&self) -> bool {
        self.state == BodyState::Asleep
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.state == BodyState::Dragging
    }

    /// Accumulated low-speed time
    pub fn idle_ms(&self) -> f32 {
        match self.state {
            BodyState::Settling { idle_ms } => idle_ms,
            _ => 0.0,
        }
    }

    /// Circle membership test (edge inclusive)
    pub fn contains_point(&self, p: Vec2) -> bool {
        self.pos.distance(p) <= self.radius
    }

    /// Exact circle overlap test
    pub fn overlaps(&self, other: &Body) -> bool {
        self.pos.distance(other.pos) < self.radius + other.radius
    }
}
