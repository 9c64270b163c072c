use glam::Vec2;
use wingsuit_core::Vec3;

/// Point where the segment `prev -> cur` crosses depth `z`, if it does so
/// this step (`prev.z < z <= cur.z`). A zero-length step yields `prev`.
#[inline]
pub fn crossing_point(prev: Vec3, cur: Vec3, z: f32) -> Option<Vec3> {
    if !(prev.z < z && z <= cur.z) { return None; }
    let denom = cur.z - prev.z;
    let t = if denom != 0.0 { (z - prev.z) / denom } else { 0.0 };
    Some(prev.lerp(cur, t))
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RingCheck {
    NotReached,
    Missed { distance: f32 },
    Passed { distance: f32 },
}

/// Gate test for a ring facing +Z. The crossing point must land strictly
/// within `radius / 2 + tolerance` of the centre in the ring plane.
pub fn ring_check(center: Vec3, radius: f32, tolerance: f32, prev: Vec3, cur: Vec3) -> RingCheck {
    let Some(hit) = crossing_point(prev, cur, center.z) else { return RingCheck::NotReached };
    let distance = Vec2::new(hit.x - center.x, hit.y - center.y).length();
    if distance < radius * 0.5 + tolerance {
        RingCheck::Passed { distance }
    } else {
        RingCheck::Missed { distance }
    }
}

/// Signed distance of `p` above the plane through `origin` with unit normal `up`.
#[inline]
pub fn plane_clearance(origin: Vec3, up: Vec3, p: Vec3) -> f32 { (p - origin).dot(up) }

/// Point-in-cone test in the obstacle's upright frame: base disc at y = 0,
/// apex at y = `height`, every radius widened by `skin`.
pub fn cone_contact(local: Vec3, base_radius: f32, height: f32, skin: f32) -> bool {
    if height <= 0.0 { return false; }
    if local.y < -skin || local.y > height + skin { return false; }
    let d = Vec2::new(local.x, local.z).length();
    if d > base_radius + skin { return false; }
    d < base_radius / height * (height - local.y) + skin
}
