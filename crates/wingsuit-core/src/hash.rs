use blake3::Hasher;
use crate::types::Vec3;

const CONTEXT: &str = "wingsuit session state v1";

/// Keyed blake3 digest of a session snapshot. Sections are tagged so that a
/// run with fewer rings can never collide with one that has more.
pub struct StateHasher(Hasher);

impl Default for StateHasher {
    fn default() -> Self { Self::new() }
}

impl StateHasher {
    pub fn new() -> Self { StateHasher(Hasher::new_derive_key(CONTEXT)) }

    /// Starts a named section holding `len` records.
    pub fn section(&mut self, tag: &str, len: usize) {
        self.0.update(tag.as_bytes());
        self.0.update(&(len as u64).to_le_bytes());
    }

    pub fn update_f32(&mut self, v: f32) { self.0.update(&v.to_le_bytes()); }
    pub fn update_u32(&mut self, v: u32) { self.0.update(&v.to_le_bytes()); }
    pub fn update_i32(&mut self, v: i32) { self.0.update(&v.to_le_bytes()); }
    pub fn update_bool(&mut self, v: bool) { self.0.update(&[v as u8]); }
    pub fn update_vec3(&mut self, v: Vec3) {
        for c in v.to_array() { self.update_f32(c); }
    }

    /// Ring gate: center, radius and whether it has been collected.
    pub fn update_ring(&mut self, center: Vec3, radius: f32, collected: bool) {
        self.update_vec3(center);
        self.update_f32(radius);
        self.update_bool(collected);
    }

    pub fn finalize(self) -> [u8; 32] { *self.0.finalize().as_bytes() }
}
