//! Procedural layout of the slope: ground segments, the obstacles standing on
//! them, and the ring gates along the glide path.
//!
//! Every sample is drawn from the caller's RNG, so a seeded `StdRng` replays
//! the same world and an unseeded one yields a fresh layout on every reset.

use std::ops::Range;

use rand::Rng;
use tracing::debug;

use wingsuit_core::{arr3, vec3, GenerationBounds, GenerationCounts, WorldConfig};
use wingsuit_scene::{
    Ground, GroundKind, Mountain, MountainBand, NodeKind, Ring, RingKind, Rock, SceneNode,
    Transform, Tree,
};

/// Builds world content from a validated `WorldConfig`. The ground tilt and its
/// inverse are computed once here and baked into every node.
#[derive(Clone, Debug)]
pub struct WorldGenerator {
    cfg: WorldConfig,
    tilt: Transform,
    upright: Transform,
}

impl WorldGenerator {
    pub fn new(cfg: &WorldConfig) -> Self {
        Self {
            cfg: cfg.clone(),
            tilt: Transform::from_matrix(cfg.ground_rotation()),
            upright: Transform::from_matrix(cfg.inverse_ground_rotation()),
        }
    }

    #[inline] pub fn config(&self) -> &WorldConfig { &self.cfg }

    /// Obstacles for one ground segment, positioned in the tilted ground frame.
    /// Tree and mountain cones keep their full reach outside the corridor
    /// around the start x (the tilt leaves x unchanged).
    pub fn generate<R: Rng + ?Sized>(&self, counts: &GenerationCounts, rng: &mut R) -> Vec<SceneNode> {
        let b = &self.cfg.bounds;
        let lane = self.cfg.flight.start_position[0];
        let mut out = Vec::with_capacity(counts.total());

        for _ in 0..counts.trees {
            let cone = self.cfg.collision.tree;
            let scale = rng.gen_range(b.scale_min..b.scale_max);
            let clear = b.corridor_half_width + cone.reach(scale);
            let x = sample_outside(rng, -b.x_half_width..b.x_half_width, lane, clear);
            let y = rng.gen_range(0.0..b.depth);
            let rock_offset_x = rng.gen_range(0.0..b.rock_offset_max);
            let rock_scale = rng.gen_range(b.scale_min..b.scale_max);
            let tree = Tree {
                scale,
                cone_radius: cone.base_radius * scale,
                cone_height: cone.height * scale,
                rock_offset_x,
                rock_scale,
                upright: self.upright,
            };
            out.push(SceneNode::new(NodeKind::Tree(tree), Transform::translation(vec3(x, y, b.tree_z))));
        }

        for _ in 0..counts.rocks {
            let x = rng.gen_range(-b.x_half_width..b.x_half_width);
            let y = rng.gen_range(0.0..b.depth);
            let scale = rng.gen_range(b.scale_min..b.scale_max);
            let offset_x = rng.gen_range(0.0..b.rock_offset_max);
            let rock = Rock { offset_x, scale, upright: self.upright };
            out.push(SceneNode::new(NodeKind::Rock(rock), Transform::translation(vec3(x, y, b.rock_z))));
        }

        for _ in 0..counts.mountains {
            let band = match rng.gen_range(0..3u8) {
                0 => MountainBand::Left,
                1 => MountainBand::Center,
                _ => MountainBand::Right,
            };
            let cone = self.cfg.collision.mountain;
            let scale = rng.gen_range(b.scale_min..b.scale_max);
            let clear = b.corridor_half_width + cone.reach(scale);
            let x = sample_outside(rng, band_range(b, band), lane, clear);
            let y = rng.gen_range(0.0..b.depth);
            let mountain = Mountain {
                scale,
                band,
                cone_radius: cone.base_radius * scale,
                cone_height: cone.height * scale,
                upright: self.upright,
            };
            out.push(SceneNode::new(NodeKind::Mountain(mountain), Transform::translation(vec3(x, y, b.mountain_z))));
        }

        out
    }

    /// One ground quad at slope position `index` with its obstacle field.
    pub fn ground_segment<R: Rng + ?Sized>(
        &self,
        index: usize,
        kind: GroundKind,
        counts: &GenerationCounts,
        rng: &mut R,
    ) -> SceneNode {
        let ground = Ground { kind, tilt: self.tilt, extent: self.cfg.ground_extent };
        let base = Transform::translation(self.cfg.segment_origin(index));
        SceneNode::new(NodeKind::Ground(ground), base).with_children(self.generate(counts, rng))
    }

    /// The regular segments followed by the finish segment, under one root.
    pub fn generate_world<R: Rng + ?Sized>(&self, rng: &mut R) -> SceneNode {
        let mut root = SceneNode::group();
        for i in 0..self.cfg.ground_segments {
            root.push_child(self.ground_segment(i, GroundKind::Regular, &self.cfg.counts, rng));
        }
        let finish = self.cfg.ground_segments;
        root.push_child(self.ground_segment(finish, GroundKind::Finish, &self.cfg.finish.counts, rng));

        debug!(
            segments = self.cfg.ground_segments + 1,
            trees = root.count(|k| matches!(k, NodeKind::Tree(_))),
            rocks = root.count(|k| matches!(k, NodeKind::Rock(_))),
            mountains = root.count(|k| matches!(k, NodeKind::Mountain(_))),
            "world generated"
        );
        root
    }

    /// Gates spaced along the nominal glide path, jittered in x and y.
    pub fn generate_rings<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Ring> {
        let layout = &self.cfg.rings;
        let start = arr3(self.cfg.flight.start_position);
        let rings: Vec<Ring> = (0..layout.count)
            .map(|i| {
                let z = layout.first_z + layout.spacing * i as f32;
                let x = start.x + jitter(rng, layout.x_jitter);
                let y = self.cfg.path_height(z) + jitter(rng, layout.y_jitter);
                let scale = rng.gen_range(layout.scale_min..layout.scale_max);
                Ring::new(RingKind::Gate, vec3(x, y, z), scale)
            })
            .collect();
        debug!(count = rings.len(), "rings generated");
        rings
    }

    pub fn finish_ring(&self) -> Ring {
        let f = &self.cfg.finish;
        let x = self.cfg.flight.start_position[0];
        Ring::new(RingKind::Finish, vec3(x, self.cfg.path_height(f.ring_z), f.ring_z), f.ring_scale)
    }
}

/// Uniform over `range` with `(center - clear, center + clear)` cut out.
/// Always consumes one sample. A fully covered range yields its start.
fn sample_outside<R: Rng + ?Sized>(rng: &mut R, range: Range<f32>, center: f32, clear: f32) -> f32 {
    let left = (center - clear).min(range.end) - range.start;
    let right_start = (center + clear).max(range.start);
    let left = left.max(0.0);
    let right = (range.end - right_start).max(0.0);
    let total = left + right;
    if !(total > 0.0) { return range.start; }
    let u = rng.gen_range(0.0..total);
    if u < left { range.start + u } else { right_start + (u - left) }
}

/// Symmetric offset in `[-amp, amp)`; always consumes one sample.
#[inline]
fn jitter<R: Rng + ?Sized>(rng: &mut R, amp: f32) -> f32 {
    (rng.gen::<f32>() * 2.0 - 1.0) * amp
}

pub fn band_range(b: &GenerationBounds, band: MountainBand) -> Range<f32> {
    let edge = b.mountain_band_edge;
    let outer = edge + b.mountain_band_width;
    match band {
        MountainBand::Left => -outer..-edge,
        MountainBand::Center => -edge..edge,
        MountainBand::Right => edge..outer,
    }
}
