//! Ball-ball collision detection and response
//!
//! Every unordered pair is visited once per tick in body order. Resolution
//! is an equal-mass 50/50 separation followed by a straight swap of the two
//! velocity vectors (no impulse solve).

use glam::Vec2;

use super::body::Body;
use super::sleep::wake;

/// Outcome of a narrow-phase test
#[derive(Debug, Clone)]
pub struct Contact {
    /// Unit vector from the first body toward the second
    pub normal: Vec2,
    /// How far the circles overlap
    pub penetration: f32,
}

/// Cheap axis-aligned reject. `true` means the pair cannot be touching.
#[inline]
pub fn broad_phase_reject(a: &Body, b: &Body, margin: f32) -> bool {
    let reach = a.radius() + b.radius() + margin;
    (a.pos.x - b.pos.x).abs() > reach || (a.pos.y - b.pos.y).abs() > reach
}

/// Exact circle overlap test
pub fn narrow_phase(a: &Body, b: &Body) -> Option<Contact> {
    let delta = b.pos - a.pos;
    let distance = delta.length();
    let radii = a.radius() + b.radius();
    if distance >= radii {
        return None;
    }
    // Coincident centres have no direction; push apart along x
    let normal = if distance > 0.0 { delta / distance } else { Vec2::X };
    Some(Contact {
        normal,
        penetration: radii - distance,
    })
}

/// Separate, exchange velocities and wake both bodies
///
/// A dragged body belongs to the pointer: it is never moved here, and its
/// partner takes the whole separation plus the dragged body's velocity.
pub fn resolve(a: &mut Body, b: &mut Body, contact: &Contact) {
    let offset = contact.normal * contact.penetration;
    match (a.is_dragging(), b.is_dragging()) {
        (false, false) => {
            a.pos -= offset * 0.5;
            b.pos += offset * 0.5;
            std::mem::swap(&mut a.vel, &mut b.vel);
        }
        (true, false) => {
            b.pos += offset;
            b.vel = a.vel;
        }
        (false, true) => {
            a.pos -= offset;
            a.vel = b.vel;
        }
        (true, true) => {}
    }
    wake(a);
    wake(b);
}

/// Detect and resolve all overlapping pairs. Returns the number resolved.
pub fn resolve_collisions(bodies: &mut [Body], margin: f32) -> usize {
    let mut resolved = 0;
    for i in 0..bodies.len() {
        for j in (i + 1)..bodies.len() {
            let (head, tail) = bodies.split_at_mut(j);
            let a = &mut head[i];
            let b = &mut tail[0];

            if broad_phase_reject(a, b, margin) {
                continue;
            }
            if let Some(contact) = narrow_phase(a, b) {
                resolve(a, b, &contact);
                resolved += 1;
            }
        }
    }
    resolved
}
