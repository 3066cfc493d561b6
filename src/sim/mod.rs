//! Deterministic simulation module
//!
//! All physics lives here. This module must stay pure:
//! - Per-tick constants, elapsed time only drives sleeping
//! - Seeded RNG only
//! - Stable iteration order (by body id)
//! - No rendering or platform dependencies

pub mod body;
pub mod clock;
pub mod collision;
pub mod drag;
pub mod integrate;
pub mod sleep;
pub mod world;

pub use body::{Body, BodyId, BodyState, TextureId};
pub use clock::FrameClock;
pub use collision::{Contact, resolve_collisions};
pub use drag::{DragController, DragSession};
pub use integrate::integrate;
pub use sleep::{update_sleep, wake};
pub use world::World;
