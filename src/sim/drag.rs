//! Pointer/touch dragging
//!
//! A drag session ties one pointer to one body. While it lasts the pointer
//! owns the body's position; releasing leaves the last pointer delta as the
//! body's velocity, which is how a throw happens.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::{Body, BodyId, BodyState};

/// The active pointer-to-body association
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragSession {
    pub body: BodyId,
    pub last_pointer: Vec2,
}

/// Translates pointer events into drag sessions. At most one at a time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DragController {
    session: Option<DragSession>,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// Grab the first body under the pointer, in body order
    ///
    /// Ignored while another session is active. Returns the grabbed body.
    pub fn pointer_down(&mut self, bodies: &mut [Body], p: Vec2) -> Option<BodyId> {
        if self.session.is_some() {
            return None;
        }
        let body = bodies.iter_mut().find(|b| b.contains_point(p))?;
        body.vel = Vec2::ZERO;
        body.state = BodyState::Dragging;
        self.session = Some(DragSession {
            body: body.id,
            last_pointer: p,
        });
        log::debug!("Drag started on body {} at {:?}", body.id.0, p);
        Some(body.id)
    }

    /// Move the dragged body to the pointer and record the pointer delta
    pub fn pointer_move(&mut self, bodies: &mut [Body], p: Vec2) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if let Some(body) = bodies.get_mut(session.body.index()) {
            body.vel = p - session.last_pointer;
            body.pos = p;
        }
        session.last_pointer = p;
    }

    /// End the session; the body keeps its drag velocity
    pub fn pointer_up(&mut self, bodies: &mut [Body]) {
        let Some(session) = self.session.take() else {
            return;
        };
        if let Some(body) = bodies.get_mut(session.body.index()) {
            body.state = BodyState::Awake;
            log::debug!("Drag released on body {} with velocity {:?}", body.id.0, body.vel);
        }
    }

    /// Same as `pointer_up`: a cancelled touch still releases the body
    pub fn pointer_cancel(&mut self, bodies: &mut [Body]) {
        self.pointer_up(bodies);
    }
}
