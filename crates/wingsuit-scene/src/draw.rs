use crate::transform::Transform;

/// Primitive meshes the renderer keeps in its shape catalog.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ShapeId { Sphere, Cone, Cylinder, Torus, Cube, Square }

/// Phong-style parameters the renderer applies to a shape.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MaterialHint {
    pub key: MaterialKey,
    pub ambient: f32,
    pub diffusivity: f32,
    /// sRGB 8-bit color.
    pub color: [u8; 3],
}

/// Fixed material catalog for world content.
#[repr(u8)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum MaterialKey {
    Suit,
    Ring,
    RingCollected,
    FinishRing,
    Snow,
    FinishSnow,
    Bark,
    Leaves,
    Stone,
    Mountain,
}

#[inline]
const fn hex(rgb: u32) -> [u8; 3] { [(rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8] }

const fn mh(key: MaterialKey, ambient: f32, diffusivity: f32, rgb: u32) -> MaterialHint {
    MaterialHint { key, ambient, diffusivity, color: hex(rgb) }
}

pub fn material(key: MaterialKey) -> MaterialHint {
    use MaterialKey::*;
    match key {
        Suit          => mh(key, 0.90, 0.0, 0xDD571C),
        Ring          => mh(key, 0.40, 0.6, 0xFF0000),
        RingCollected => mh(key, 0.40, 0.6, 0x2ECC40),
        FinishRing    => mh(key, 0.60, 0.6, 0xFFD700),
        Snow          => mh(key, 0.85, 0.6, 0xF4F5E2),
        FinishSnow    => mh(key, 0.85, 0.6, 0xDDEEDD),
        Bark          => mh(key, 0.40, 0.6, 0x964B00),
        Leaves        => mh(key, 0.40, 0.6, 0x2C493F),
        Stone         => mh(key, 0.40, 0.6, 0x7F8386),
        Mountain      => mh(key, 0.50, 0.6, 0xA9ADB3),
    }
}

/// One shape to draw this frame, already in world space.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DrawRequest {
    pub shape: ShapeId,
    pub transform: Transform,
    pub material: MaterialHint,
}

impl DrawRequest {
    #[inline]
    pub fn new(shape: ShapeId, transform: Transform, key: MaterialKey) -> Self {
        Self { shape, transform, material: material(key) }
    }
}
