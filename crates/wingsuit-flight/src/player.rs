use std::f32::consts::FRAC_PI_2;

use wingsuit_core::Vec3;
use wingsuit_scene::{DrawRequest, MaterialKey, ShapeId, Transform};

use crate::controller::{FlightCtrl, FlightState, HeldControls};

/// The wingsuit flyer. Keeps the previous frame's transform so collision can
/// test the segment travelled in the last step.
#[derive(Clone, Debug)]
pub struct Player {
    ctrl: FlightCtrl,
    state: FlightState,
    base: Transform,
    prev_base: Transform,
}

impl Player {
    pub fn new(ctrl: FlightCtrl) -> Self {
        let state = ctrl.initial_state();
        let base = ctrl.orientation(&state);
        Self { ctrl, state, base, prev_base: base }
    }

    #[inline] pub fn state(&self) -> &FlightState { &self.state }
    #[inline] pub fn controller(&self) -> &FlightCtrl { &self.ctrl }
    #[inline] pub fn base_transform(&self) -> &Transform { &self.base }
    #[inline] pub fn prev_transform(&self) -> &Transform { &self.prev_base }
    #[inline] pub fn position(&self) -> Vec3 { self.base.position() }
    #[inline] pub fn prev_position(&self) -> Vec3 { self.prev_base.position() }

    pub fn apply_controls(&mut self, held: &HeldControls) {
        self.ctrl.apply_controls(&mut self.state, held);
    }

    /// Move `dt` seconds and rebuild the orientation.
    pub fn advance(&mut self, dt: f32) {
        self.prev_base = self.base;
        self.ctrl.integrate(&mut self.state, dt);
        self.base = self.ctrl.orientation(&self.state);
    }

    /// One full frame: controls, then a single integration step.
    pub fn update(&mut self, held: &HeldControls, dt: f32) {
        self.apply_controls(held);
        self.advance(dt);
    }

    /// Body sphere plus two swept wing cones.
    pub fn draw<F: FnMut(&DrawRequest)>(&self, acc: &Transform, out: &mut F) {
        let own = acc.compose(&self.base);
        out(&DrawRequest::new(ShapeId::Sphere, own * Transform::uniform_scale(1.5), MaterialKey::Suit));
        for angle in [FRAC_PI_2, -FRAC_PI_2] {
            let wing = own * Transform::rotation(angle, Vec3::Y) * Transform::scale(2.0, 1.0, 5.0);
            out(&DrawRequest::new(ShapeId::Cone, wing, MaterialKey::Suit));
        }
    }
}
