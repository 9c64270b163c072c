//! Geometric tests that turn one step of player motion into game events:
//! ring gates, the finish, the ground planes and the conical obstacles.

pub mod primitives;

use tracing::debug;

use wingsuit_core::{CollisionParams, Vec3, WorldConfig};
use wingsuit_scene::{NodeKind, Ring, RingKind, SceneNode, Transform};

pub use primitives::{cone_contact, crossing_point, plane_clearance, ring_check, RingCheck};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ObstacleKind { Tree, Mountain }

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum CollisionEvent {
    FinishRing,
    DepthReached { z: f32 },
    Ground { clearance: f32 },
    /// `at` is the world position of the obstacle's base.
    Obstacle { kind: ObstacleKind, at: Vec3 },
    Ring { index: usize },
}

impl CollisionEvent {
    #[inline] pub fn is_fatal(&self) -> bool { matches!(self, Self::Ground { .. } | Self::Obstacle { .. }) }
    #[inline] pub fn is_win(&self) -> bool { matches!(self, Self::FinishRing | Self::DepthReached { .. }) }
}

#[derive(Copy, Clone, Debug)]
pub struct CollisionEngine {
    params: CollisionParams,
    win_depth_z: f32,
}

impl CollisionEngine {
    pub fn new(cfg: &WorldConfig) -> Self {
        Self { params: cfg.collision, win_depth_z: cfg.finish.win_depth_z }
    }

    #[inline] pub fn params(&self) -> &CollisionParams { &self.params }

    fn tolerance(&self, kind: RingKind) -> f32 {
        match kind {
            RingKind::Gate => self.params.ring_tolerance,
            RingKind::Finish => self.params.finish_ring_tolerance,
        }
    }

    /// Marks `ring` collected and returns `true` if the step `prev -> cur`
    /// threads it. A collected ring never fires again.
    pub fn pass_ring(&self, ring: &mut Ring, prev: Vec3, cur: Vec3) -> bool {
        if ring.is_collided() { return false; }
        match ring_check(ring.center(), ring.radius(), self.tolerance(ring.kind), prev, cur) {
            RingCheck::Passed { distance } => {
                debug!(kind = ?ring.kind, z = ring.center().z, distance, "ring passed");
                ring.mark_collided()
            }
            RingCheck::Missed { distance } => {
                debug!(kind = ?ring.kind, z = ring.center().z, distance, "ring missed");
                false
            }
            RingCheck::NotReached => false,
        }
    }

    /// Lowest clearance under the fatal threshold across every ground plane.
    pub fn ground_hit(&self, world: &SceneNode, p: Vec3) -> Option<f32> {
        let mut worst: Option<f32> = None;
        world.walk(&Transform::IDENTITY, &mut |node, acc| {
            let NodeKind::Ground(g) = &node.kind else { return };
            let own = acc.compose(node.base_transform());
            let up = own.compose(&g.tilt).transform_vector(Vec3::NEG_Z).normalize_or_zero();
            let clearance = plane_clearance(own.position(), up, p);
            if clearance < self.params.ground_threshold && worst.map_or(true, |w| clearance < w) {
                worst = Some(clearance);
            }
        });
        worst
    }

    /// First tree or mountain (pre-order) whose cone contains `p`.
    pub fn obstacle_hit(&self, world: &SceneNode, p: Vec3) -> Option<(ObstacleKind, Vec3)> {
        let mut hit = None;
        world.walk(&Transform::IDENTITY, &mut |node, acc| {
            if hit.is_some() { return; }
            let (kind, radius, height, skin) = match &node.kind {
                NodeKind::Tree(t) => (ObstacleKind::Tree, t.cone_radius, t.cone_height, self.params.tree.skin),
                NodeKind::Mountain(m) => (ObstacleKind::Mountain, m.cone_radius, m.cone_height, self.params.mountain.skin),
                _ => return,
            };
            let Some(frame) = node.standing_frame(acc) else { return };
            let local = frame.inverse().transform_point(p);
            if cone_contact(local, radius, height, skin) {
                hit = Some((kind, frame.position()));
            }
        });
        hit
    }

    /// Full pass for one step. Winning and fatal outcomes end the pass early;
    /// ring gates are all checked and may fire together.
    pub fn evaluate(
        &self,
        world: &SceneNode,
        rings: &mut [Ring],
        finish: &mut Ring,
        prev: Vec3,
        cur: Vec3,
    ) -> Vec<CollisionEvent> {
        if self.pass_ring(finish, prev, cur) {
            return vec![CollisionEvent::FinishRing];
        }
        if cur.z >= self.win_depth_z {
            return vec![CollisionEvent::DepthReached { z: cur.z }];
        }
        if let Some(clearance) = self.ground_hit(world, cur) {
            return vec![CollisionEvent::Ground { clearance }];
        }
        if let Some((kind, at)) = self.obstacle_hit(world, cur) {
            return vec![CollisionEvent::Obstacle { kind, at }];
        }
        rings
            .iter_mut()
            .enumerate()
            .filter_map(|(index, ring)| self.pass_ring(ring, prev, cur).then_some(CollisionEvent::Ring { index }))
            .collect()
    }
}
