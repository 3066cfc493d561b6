//! Idle tracking: settle slow bodies, freeze them, wake them on demand
//!
//! State machine per body:
//! `Awake <-> Settling -> Asleep -> Awake`, with `Dragging` entered from any
//! state by the drag controller and left back to `Awake` on release.

use glam::Vec2;

use super::body::{Body, BodyState};
use crate::config::SimConfig;

/// Advance a body's idle timer after integration
///
/// Dragged and sleeping bodies are left alone.
pub fn update_sleep(body: &mut Body, dt_ms: f32, config: &SimConfig) {
    let idle_ms = match body.state {
        BodyState::Awake => 0.0,
        BodyState::Settling { idle_ms } => idle_ms,
        BodyState::Asleep | BodyState::Dragging => return,
    };

    if body.vel.length() >= config.settle_threshold {
        body.state = BodyState::Awake;
        return;
    }

    let idle_ms = idle_ms + dt_ms;
    if idle_ms > config.settle_delay_ms {
        body.vel = Vec2::ZERO;
        body.state = BodyState::Asleep;
        log::debug!("Body {} fell asleep at {:?}", body.id.0, body.pos);
    } else {
        body.state = BodyState::Settling { idle_ms };
    }
}

/// Wake a sleeping or settling body and reset its idle timer
///
/// A dragged body stays dragged.
pub fn wake(body: &mut Body) {
    match body.state {
        BodyState::Asleep => {
            body.state = BodyState::Awake;
            log::debug!("Body {} woke up", body.id.0);
        }
        BodyState::Settling { .. } => body.state = BodyState::Awake,
        BodyState::Awake | BodyState::Dragging => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::body::BodyId;

    fn slow_body() -> Body {
        Body::new(BodyId(0), Vec2::new(50.0, 50.0), Vec2::new(0.05, 0.0), 10.0, None)
    }

    #[test]
    fn test_slow_body_accumulates_idle_time() {
        let config = SimConfig::default();
        let mut body = slow_body();
        update_sleep(&mut body, 16.0, &config);
        assert_eq!(body.state, BodyState::Settling { idle_ms: 16.0 });
        update_sleep(&mut body, 16.0, &config);
        assert_eq!(body.idle_ms(), 32.0);
    }

    #[test]
    fn test_fast_body_resets_idle_time() {
        let config = SimConfig::default();
        let mut body = slow_body();
        update_sleep(&mut body, 500.0, &config);
        body.vel = Vec2::new(1.0, 0.0);
        update_sleep(&mut body, 16.0, &config);
        assert_eq!(body.state, BodyState::Awake);
        assert_eq!(body.idle_ms(), 0.0);
    }

    #[test]
    fn test_falls_asleep_only_after_delay_exceeded() {
        let config = SimConfig::default();
        let mut body = slow_body();
        update_sleep(&mut body, config.settle_delay_ms, &config);
        // Exactly at the delay is not enough
        assert!(!body.is_sleeping());
        update_sleep(&mut body, 1.0, &config);
        assert!(body.is_sleeping());
        assert_eq!(body.vel, Vec2::ZERO);
    }

    #[test]
    fn test_wake_resets_timer() {
        let config = SimConfig::default();
        let mut body = slow_body();
        update_sleep(&mut body, 3000.0, &config);
        assert!(body.is_sleeping());
        wake(&mut body);
        assert_eq!(body.state, BodyState::Awake);

        update_sleep(&mut body, 100.0, &config);
        wake(&mut body);
        assert_eq!(body.idle_ms(), 0.0);
    }

    #[test]
    fn test_wake_keeps_drag() {
        let mut body = slow_body();
        body.state = BodyState::Dragging;
        wake(&mut body);
        assert!(body.is_dragging());
        update_sleep(&mut body, 5000.0, &SimConfig::default());
        assert!(body.is_dragging());
    }
}
