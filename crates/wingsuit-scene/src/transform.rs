use std::ops::Mul;

use wingsuit_core::{Mat4, Vec3};

/// Affine placement of a node relative to its parent.
///
/// Values are never edited in place: composing produces a new `Transform`,
/// and `a.compose(&b)` applies `b` first (`a * b`).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Transform(Mat4);

impl Default for Transform {
    fn default() -> Self { Self::IDENTITY }
}

impl Transform {
    pub const IDENTITY: Transform = Transform(Mat4::IDENTITY);

    #[inline] pub fn from_matrix(m: Mat4) -> Self { Self(m) }
    #[inline] pub fn matrix(&self) -> Mat4 { self.0 }

    #[inline] pub fn translation(v: Vec3) -> Self { Self(Mat4::from_translation(v)) }

    /// Rotation by `angle` radians about `axis`. A zero axis yields identity.
    pub fn rotation(angle: f32, axis: Vec3) -> Self {
        let axis = axis.normalize_or_zero();
        if axis == Vec3::ZERO { return Self::IDENTITY; }
        Self(Mat4::from_axis_angle(axis, angle))
    }

    #[inline] pub fn scale(x: f32, y: f32, z: f32) -> Self { Self(Mat4::from_scale(Vec3::new(x, y, z))) }
    #[inline] pub fn uniform_scale(s: f32) -> Self { Self::scale(s, s, s) }

    #[inline]
    pub fn compose(&self, local: &Transform) -> Transform { Transform(self.0 * local.0) }

    #[inline] pub fn inverse(&self) -> Transform { Transform(self.0.inverse()) }

    /// World-space translation (column 3).
    #[inline] pub fn position(&self) -> Vec3 { self.0.w_axis.truncate() }

    #[inline] pub fn transform_point(&self, p: Vec3) -> Vec3 { self.0.transform_point3(p) }
    #[inline] pub fn transform_vector(&self, v: Vec3) -> Vec3 { self.0.transform_vector3(v) }
}

impl Mul for Transform {
    type Output = Transform;
    fn mul(self, rhs: Transform) -> Transform { self.compose(&rhs) }
}

impl From<Mat4> for Transform {
    fn from(m: Mat4) -> Self { Self(m) }
}
