use wingsuit_core::Vec3;

use crate::draw::{DrawRequest, MaterialKey, ShapeId};
use crate::transform::Transform;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum RingKind { Gate, Finish }

/// Torus gate facing +Z. Once collected it stays collected.
#[derive(Clone, Debug)]
pub struct Ring {
    base: Transform,
    radius: f32,
    collided: bool,
    since_collected: f32,
    pub kind: RingKind,
}

impl Ring {
    /// `scale` is the generating scale of the unit torus; the passable
    /// diameter is twice that.
    pub fn new(kind: RingKind, center: Vec3, scale: f32) -> Self {
        Self {
            base: Transform::translation(center) * Transform::uniform_scale(scale),
            radius: 2.0 * scale,
            collided: false,
            since_collected: 0.0,
            kind,
        }
    }

    #[inline] pub fn base_transform(&self) -> &Transform { &self.base }
    #[inline] pub fn center(&self) -> Vec3 { self.base.position() }
    /// Diameter-like size; a pass must land within `radius / 2 + tolerance`.
    #[inline] pub fn radius(&self) -> f32 { self.radius }
    #[inline] pub fn is_collided(&self) -> bool { self.collided }
    /// Seconds since the ring was collected.
    #[inline] pub fn since_collected(&self) -> f32 { self.since_collected }

    /// Returns `true` only the first time.
    pub fn mark_collided(&mut self) -> bool {
        let first = !self.collided;
        self.collided = true;
        first
    }

    pub fn update(&mut self, dt: f32) {
        if self.collided { self.since_collected += dt; }
    }

    pub fn draw<F: FnMut(&DrawRequest)>(&self, acc: &Transform, out: &mut F) {
        let key = match (self.kind, self.collided) {
            (RingKind::Finish, _) => MaterialKey::FinishRing,
            (RingKind::Gate, false) => MaterialKey::Ring,
            (RingKind::Gate, true) => MaterialKey::RingCollected,
        };
        out(&DrawRequest::new(ShapeId::Torus, acc.compose(&self.base), key));
    }
}
