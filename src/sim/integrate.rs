//! Per-tick motion: gravity, position step, wall bounce, friction
//!
//! Constants are per tick, not per second. Elapsed time only feeds the
//! sleep manager.

use glam::Vec2;

use super::body::Body;
use super::sleep::update_sleep;
use crate::Bounds;
use crate::config::SimConfig;

/// Advance one body by a tick. No-op for sleeping or dragged bodies.
pub fn integrate(body: &mut Body, bounds: Bounds, dt_ms: f32, config: &SimConfig) {
    if body.is_sleeping() || body.is_dragging() {
        return;
    }

    body.vel.y += config.gravity;
    body.pos += body.vel;

    let r = body.radius();
    bounce_axis(&mut body.pos.x, &mut body.vel.x, r, bounds.width, config.restitution);
    bounce_axis(&mut body.pos.y, &mut body.vel.y, r, bounds.height, config.restitution);

    body.vel *= config.friction;

    update_sleep(body, dt_ms, config);
}

/// Clamp one axis into `[r, bound - r]`, reflecting and damping on contact
fn bounce_axis(pos: &mut f32, vel: &mut f32, r: f32, bound: f32, restitution: f32) {
    if bound - r < r {
        // Surface narrower than the ball: park it in the middle
        *pos = bound * 0.5;
        *vel = 0.0;
        return;
    }
    if *pos < r {
        *pos = r;
        *vel *= -restitution;
    }
    if *pos > bound - r {
        *pos = bound - r;
        *vel *= -restitution;
    }
}

/// Position-only clamp into the bounds, used after collisions and resizes
pub fn contain(pos: Vec2, r: f32, bounds: Bounds) -> Vec2 {
    Vec2::new(clamp_axis(pos.x, r, bounds.width), clamp_axis(pos.y, r, bounds.height))
}

#[inline]
fn clamp_axis(pos: f32, r: f32, bound: f32) -> f32 {
    if bound - r < r {
        bound * 0.5
    } else {
        pos.clamp(r, bound - r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::body::{BodyId, BodyState};

    const BOUNDS: Bounds = Bounds::new(800.0, 600.0);

    fn body(pos: Vec2, vel: Vec2) -> Body {
        Body::new(BodyId(0), pos, vel, 50.0, None)
    }

    #[test]
    fn test_free_flight_step() {
        let config = SimConfig::default();
        let mut b = body(Vec2::new(400.0, 300.0), Vec2::new(2.0, -1.0));
        integrate(&mut b, BOUNDS, NOMINAL_DT_MS, &config);

        assert!((b.pos.x - 402.0).abs() < 1e-4);
        assert!((b.pos.y - (300.0 - 1.0 + GRAVITY)).abs() < 1e-4);
        assert!((b.vel.x - 2.0 * FRICTION).abs() < 1e-5);
        assert!((b.vel.y - (-1.0 + GRAVITY) * FRICTION).abs() < 1e-5);
    }

    #[test]
    fn test_resting_on_floor_bounces() {
        let config = SimConfig::default();
        let floor = BOUNDS.height - 50.0;
        let mut b = body(Vec2::new(400.0, floor), Vec2::ZERO);
        integrate(&mut b, BOUNDS, NOMINAL_DT_MS, &config);

        assert_eq!(b.pos.y, floor);
        let expected = -GRAVITY * RESTITUTION * FRICTION;
        assert!(b.vel.y < 0.0);
        assert!((b.vel.y - expected).abs() < 1e-6, "vy = {}", b.vel.y);
    }

    #[test]
    fn test_wall_bounce_is_inelastic() {
        let config = SimConfig::default();
        let mut b = body(Vec2::new(55.0, 300.0), Vec2::new(-10.0, 0.0));
        integrate(&mut b, BOUNDS, NOMINAL_DT_MS, &config);

        assert_eq!(b.pos.x, 50.0);
        assert!((b.vel.x - 10.0 * RESTITUTION * FRICTION).abs() < 1e-4);
    }

    #[test]
    fn test_sleeping_and_dragged_bodies_are_frozen() {
        let config = SimConfig::default();
        for state in [BodyState::Asleep, BodyState::Dragging] {
            let mut b = body(Vec2::new(400.0, 300.0), Vec2::new(3.0, 3.0));
            b.state = state;
            integrate(&mut b, BOUNDS, NOMINAL_DT_MS, &config);
            assert_eq!(b.pos, Vec2::new(400.0, 300.0));
            assert_eq!(b.vel, Vec2::new(3.0, 3.0));
        }
    }

    #[test]
    fn test_degenerate_bounds_park_at_midpoint() {
        let config = SimConfig::default();
        let mut b = body(Vec2::new(400.0, 300.0), Vec2::new(5.0, 5.0));
        integrate(&mut b, Bounds::new(0.0, 60.0), NOMINAL_DT_MS, &config);

        assert_eq!(b.pos, Vec2::new(0.0, 30.0));
        assert!(b.pos.is_finite() && b.vel.is_finite());
    }

    #[test]
    fn test_contain_clamps_without_nan() {
        let bounds = Bounds::new(800.0, 600.0);
        assert_eq!(contain(Vec2::new(-10.0, 900.0), 50.0, bounds), Vec2::new(50.0, 550.0));
        assert_eq!(contain(Vec2::new(10.0, 10.0), 50.0, Bounds::new(0.0, 0.0)), Vec2::ZERO);
    }
}
