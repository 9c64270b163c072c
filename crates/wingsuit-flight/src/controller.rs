use glam::{Mat3, Mat4};

use wingsuit_core::{arr3, FlightParams, Vec3, LATERAL_LIMIT};
use wingsuit_scene::Transform;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FlightState {
    pub position: Vec3,
    /// Unit length after every control application.
    pub direction: Vec3,
    pub speed: f32,
    /// Strafe steps in `[-LATERAL_LIMIT, LATERAL_LIMIT]`.
    pub lateral_offset: i32,
}

/// Which steering inputs are held down this frame.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct HeldControls {
    pub flatten: bool,
    pub dive: bool,
    pub bank_left: bool,
    pub bank_right: bool,
    pub lateral_left: bool,
    pub lateral_right: bool,
}

impl HeldControls {
    #[inline] pub fn any(&self) -> bool { *self != Self::default() }
}

#[derive(Copy, Clone, Debug)]
pub struct FlightCtrl {
    pub params: FlightParams,
}

impl FlightCtrl {
    pub fn new(params: FlightParams) -> Self { Self { params } }

    #[inline]
    fn initial_direction(&self) -> Vec3 {
        arr3(self.params.initial_direction).try_normalize().unwrap_or(Vec3::Z)
    }

    pub fn initial_state(&self) -> FlightState {
        FlightState {
            position: arr3(self.params.start_position),
            direction: self.initial_direction(),
            speed: self.params.initial_speed,
            lateral_offset: 0,
        }
    }

    /// Apply one frame of held controls: flatten, dive, bank left, bank right,
    /// strafe left, strafe right, strafe decay. Speed is clamped and the
    /// direction renormalized afterwards.
    pub fn apply_controls(&self, s: &mut FlightState, held: &HeldControls) {
        let p = &self.params;

        if held.flatten {
            if s.speed > p.min_speed { s.speed -= p.flatten_decel; }
            if s.direction.y < p.max_vertical { s.direction.y += p.tilt_step; }
        }
        if held.dive {
            if s.speed < p.max_speed { s.speed += p.dive_accel; }
            s.direction.y -= p.tilt_step;
        }
        if held.bank_left { s.direction = rotate_xz(s.direction, -p.bank_angle); }
        if held.bank_right { s.direction = rotate_xz(s.direction, p.bank_angle); }

        if held.lateral_left { s.lateral_offset += 1; }
        if held.lateral_right { s.lateral_offset -= 1; }
        s.lateral_offset = s.lateral_offset.clamp(-LATERAL_LIMIT, LATERAL_LIMIT);
        if !held.lateral_left && !held.lateral_right && s.lateral_offset != 0 {
            s.lateral_offset -= s.lateral_offset.signum();
        }

        s.speed = s.speed.clamp(p.min_speed, p.max_speed);
        s.direction = s.direction.try_normalize().unwrap_or_else(|| self.initial_direction());
    }

    /// Advance the position by `dt` seconds along the direction plus the strafe.
    pub fn integrate(&self, s: &mut FlightState, dt: f32) {
        let side = s.direction.cross(Vec3::Y);
        let strafe = s.lateral_offset as f32 * self.params.lateral_speed * dt;
        s.position += s.direction * s.speed * dt + side * strafe;
    }

    /// `T(position) * R(direction, roll) * look(-horizontal(direction))`.
    /// Roll is proportional to the strafe offset.
    pub fn orientation(&self, s: &FlightState) -> Transform {
        let roll = s.lateral_offset as f32 / LATERAL_LIMIT as f32 * self.params.max_roll;
        Transform::translation(s.position)
            * Transform::rotation(roll, s.direction)
            * look_basis(s.direction)
    }
}

/// Rotate the (x, z) components by `angle` in the horizontal plane.
#[inline]
fn rotate_xz(v: Vec3, angle: f32) -> Vec3 {
    let (sin, cos) = angle.sin_cos();
    Vec3::new(v.x * cos - v.z * sin, v.y, v.x * sin + v.z * cos)
}

/// Basis with +Z pointing opposite the horizontal heading and +Y world-up.
/// Straight up or down has no heading; the default basis is kept then.
fn look_basis(dir: Vec3) -> Transform {
    let Some(z) = Vec3::new(-dir.x, 0.0, -dir.z).try_normalize() else {
        return Transform::IDENTITY;
    };
    let y = Vec3::Y;
    let x = y.cross(z);
    Transform::from_matrix(Mat4::from_mat3(Mat3::from_cols(x, y, z)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctrl() -> FlightCtrl { FlightCtrl::new(FlightParams::default()) }

    fn held(f: impl FnOnce(&mut HeldControls)) -> HeldControls {
        let mut h = HeldControls::default();
        f(&mut h);
        h
    }

    #[test]
    fn initial_state_is_normalized() {
        let s = ctrl().initial_state();
        assert!((s.direction.length() - 1.0).abs() < 1e-6);
        assert_eq!(s.position, Vec3::new(0.0, 40.0, 0.0));
        assert_eq!(s.speed, 40.0);
    }

    #[test]
    fn direction_stays_unit_under_every_input_mix() {
        let c = ctrl();
        let mut s = c.initial_state();
        for i in 0..500u32 {
            let h = HeldControls {
                flatten: i % 3 == 0,
                dive: i % 2 == 0,
                bank_left: i % 5 == 0,
                bank_right: i % 7 == 0,
                lateral_left: i % 11 < 4,
                lateral_right: i % 13 < 2,
            };
            c.apply_controls(&mut s, &h);
            assert!((s.direction.length() - 1.0).abs() < 1e-5);
            assert!((c.params.min_speed..=c.params.max_speed).contains(&s.speed));
            assert!(s.lateral_offset.abs() <= LATERAL_LIMIT);
        }
    }

    #[test]
    fn dive_saturates_at_max_speed() {
        let c = ctrl();
        let mut s = c.initial_state();
        let h = held(|h| h.dive = true);
        for _ in 0..1000 { c.apply_controls(&mut s, &h); }
        assert_eq!(s.speed, c.params.max_speed);
        assert!(s.direction.y < -0.99);
    }

    #[test]
    fn flatten_bottoms_out_at_min_speed() {
        let c = ctrl();
        let mut s = c.initial_state();
        let h = held(|h| h.flatten = true);
        for _ in 0..1000 { c.apply_controls(&mut s, &h); }
        assert_eq!(s.speed, c.params.min_speed);
        // Pitch rises until it reaches the vertical cap, then holds.
        assert!(s.direction.y >= c.params.max_vertical - 0.02);
    }

    #[test]
    fn flatten_leaves_level_flight_alone() {
        let c = ctrl();
        let mut s = c.initial_state();
        s.direction = Vec3::Z;
        c.apply_controls(&mut s, &held(|h| h.flatten = true));
        assert_eq!(s.direction, Vec3::Z);
        assert_eq!(s.speed, 40.0 - c.params.flatten_decel);
    }

    #[test]
    fn bank_left_turns_toward_positive_x() {
        let c = ctrl();
        let mut s = c.initial_state();
        c.apply_controls(&mut s, &held(|h| h.bank_left = true));
        assert!(s.direction.x > 0.0);
        let mut r = c.initial_state();
        c.apply_controls(&mut r, &held(|h| h.bank_right = true));
        assert!((r.direction.x + s.direction.x).abs() < 1e-6);
        // Banking only swings the heading; the pitch component is untouched.
        assert!((s.direction.y - c.initial_state().direction.y).abs() < 1e-6);
    }

    #[test]
    fn lateral_offset_clamps_at_limit() {
        let c = ctrl();
        let mut s = c.initial_state();
        let h = held(|h| h.lateral_left = true);
        for _ in 0..50 { c.apply_controls(&mut s, &h); }
        assert_eq!(s.lateral_offset, LATERAL_LIMIT);
        let h = held(|h| h.lateral_right = true);
        for _ in 0..50 { c.apply_controls(&mut s, &h); }
        assert_eq!(s.lateral_offset, -LATERAL_LIMIT);
    }

    #[test]
    fn lateral_offset_decays_to_zero_in_offset_frames() {
        let c = ctrl();
        let mut s = c.initial_state();
        s.lateral_offset = -7;
        for frame in 1..=7 {
            c.apply_controls(&mut s, &HeldControls::default());
            assert_eq!(s.lateral_offset, -7 + frame);
        }
        c.apply_controls(&mut s, &HeldControls::default());
        assert_eq!(s.lateral_offset, 0);
    }

    #[test]
    fn both_lateral_inputs_cancel_without_decay() {
        let c = ctrl();
        let mut s = c.initial_state();
        s.lateral_offset = 5;
        c.apply_controls(&mut s, &held(|h| { h.lateral_left = true; h.lateral_right = true; }));
        assert_eq!(s.lateral_offset, 5);
    }

    #[test]
    fn integrate_moves_along_direction_and_strafes_sideways() {
        let c = ctrl();
        let mut s = c.initial_state();
        let start = s.position;
        c.integrate(&mut s, 0.5);
        assert!(((s.position - start) - s.direction * 20.0).length() < 1e-4);

        let mut s = c.initial_state();
        s.direction = Vec3::Z;
        s.lateral_offset = 10;
        c.integrate(&mut s, 1.0);
        // dir × up for +Z heading is -X; 10 steps at 0.5 units each.
        assert!((s.position - Vec3::new(-5.0, 40.0, 40.0)).length() < 1e-4);
    }

    #[test]
    fn orientation_faces_horizontal_heading_without_roll() {
        let c = ctrl();
        let s = c.initial_state();
        let t = c.orientation(&s);
        assert!((t.position() - s.position).length() < 1e-6);
        let fwd = t.transform_vector(Vec3::NEG_Z);
        assert!((fwd - Vec3::Z).length() < 1e-5, "{fwd:?}");
        assert!((t.transform_vector(Vec3::Y) - Vec3::Y).length() < 1e-5);
    }

    #[test]
    fn strafe_rolls_the_body() {
        let c = ctrl();
        let mut s = c.initial_state();
        s.lateral_offset = LATERAL_LIMIT;
        let up = c.orientation(&s).transform_vector(Vec3::Y);
        assert!(up.angle_between(Vec3::Y) > 0.3);
        assert!((up.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn vertical_heading_keeps_default_basis() {
        let c = ctrl();
        let mut s = c.initial_state();
        s.direction = Vec3::NEG_Y;
        let t = c.orientation(&s);
        assert!(t.matrix().is_finite());
        assert!((t.transform_vector(Vec3::Z) - Vec3::Z).length() < 1e-6);
    }

    #[test]
    fn any_reports_held_inputs() {
        assert!(!HeldControls::default().any());
        assert!(held(|h| h.bank_right = true).any());
    }
}
