pub use glam::{Mat4, Vec3};

#[inline] pub fn vec3(x: f32, y: f32, z: f32) -> Vec3 { Vec3::new(x, y, z) }
#[inline] pub fn arr3(a: [f32; 3]) -> Vec3 { Vec3::from_array(a) }
