//! Platform layer
//!
//! Browser bindings live in `web` (wasm32 only): a canvas-backed `Surface`,
//! async texture loading, and the `BallPit` handle the page drives. Native
//! builds run headless through `renderer::DrawList`.

#[cfg(target_arch = "wasm32")]
pub mod web;

/// Derive a spawn seed from a host timestamp in milliseconds
pub fn seed_from_time(ms: f64) -> u64 {
    // Mix the bits so consecutive page loads spread out
    (ms.to_bits()).wrapping_mul(0x9E37_79B9_7F4A_7C15).rotate_left(17)
}
