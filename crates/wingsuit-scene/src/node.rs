use wingsuit_core::Vec3;

use crate::draw::{DrawRequest, MaterialKey, ShapeId};
use crate::transform::Transform;

/// Tree trunk and canopy each span this many units before instance scaling.
pub const TREE_HEIGHT: f32 = 10.0;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum GroundKind { Regular, Finish }

/// Lateral lane a mountain was placed in.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum MountainBand { Left, Center, Right }

/// Tilted terrain quad; children are placed in its tilted frame.
#[derive(Copy, Clone, Debug)]
pub struct Ground {
    pub kind: GroundKind,
    pub tilt: Transform,
    /// Half-size of the quad (the unit square spans [-1, 1]).
    pub extent: f32,
}

#[derive(Copy, Clone, Debug)]
pub struct Tree {
    pub scale: f32,
    /// Collision cone, already scaled.
    pub cone_radius: f32,
    pub cone_height: f32,
    /// Boulder drawn at the foot of every tree.
    pub rock_offset_x: f32,
    pub rock_scale: f32,
    /// Cancels the ground tilt so the trunk stands world-vertical.
    pub upright: Transform,
}

#[derive(Copy, Clone, Debug)]
pub struct Rock {
    pub offset_x: f32,
    pub scale: f32,
    pub upright: Transform,
}

#[derive(Copy, Clone, Debug)]
pub struct Mountain {
    pub scale: f32,
    pub band: MountainBand,
    pub cone_radius: f32,
    pub cone_height: f32,
    pub upright: Transform,
}

#[derive(Copy, Clone, Debug)]
pub enum NodeKind {
    Group,
    Ground(Ground),
    Tree(Tree),
    Rock(Rock),
    Mountain(Mountain),
}

/// A node owns its subtree; dropping it drops every descendant.
#[derive(Clone, Debug)]
pub struct SceneNode {
    base: Transform,
    children: Vec<SceneNode>,
    pub kind: NodeKind,
}

impl SceneNode {
    pub fn new(kind: NodeKind, base: Transform) -> Self {
        Self { base, children: Vec::new(), kind }
    }

    pub fn group() -> Self { Self::new(NodeKind::Group, Transform::IDENTITY) }

    #[inline] pub fn base_transform(&self) -> &Transform { &self.base }
    #[inline] pub fn set_base_transform(&mut self, t: Transform) { self.base = t; }

    #[inline] pub fn children(&self) -> &[SceneNode] { &self.children }
    pub fn push_child(&mut self, child: SceneNode) { self.children.push(child); }
    pub fn extend_children<I: IntoIterator<Item = SceneNode>>(&mut self, it: I) { self.children.extend(it); }

    pub fn with_children<I: IntoIterator<Item = SceneNode>>(mut self, it: I) -> Self {
        self.children.extend(it);
        self
    }

    /// Advance the subtree by `dt`. Terrain and obstacles are static after
    /// generation, so only the recursion is observable here.
    pub fn update(&mut self, dt: f32) {
        for child in &mut self.children {
            child.update(dt);
        }
    }

    /// Transform handed to this node's children. Ground nodes pass their
    /// tilted frame down; everything else passes `acc * base`.
    pub fn child_transform(&self, acc: &Transform) -> Transform {
        let own = acc.compose(&self.base);
        match &self.kind {
            NodeKind::Ground(g) => own.compose(&g.tilt),
            _ => own,
        }
    }

    /// Upright frame of a standing obstacle: origin at its base, +Y world-up.
    pub fn standing_frame(&self, acc: &Transform) -> Option<Transform> {
        let upright = match &self.kind {
            NodeKind::Tree(t) => t.upright,
            NodeKind::Rock(r) => r.upright,
            NodeKind::Mountain(m) => m.upright,
            NodeKind::Group | NodeKind::Ground(_) => return None,
        };
        Some(acc.compose(&self.base).compose(&upright))
    }

    /// Depth-first pre-order walk. `f` receives each node with the
    /// accumulated transform its parent handed it.
    pub fn walk<F: FnMut(&SceneNode, &Transform)>(&self, acc: &Transform, f: &mut F) {
        f(self, acc);
        let next = self.child_transform(acc);
        for child in &self.children {
            child.walk(&next, f);
        }
    }

    /// Emit draw requests for this node and its subtree.
    pub fn draw<F: FnMut(&DrawRequest)>(&self, acc: &Transform, out: &mut F) {
        self.draw_self(acc, out);
        let next = self.child_transform(acc);
        for child in &self.children {
            child.draw(&next, out);
        }
    }

    fn draw_self<F: FnMut(&DrawRequest)>(&self, acc: &Transform, out: &mut F) {
        let own = acc.compose(&self.base);
        match &self.kind {
            NodeKind::Group => {}
            NodeKind::Ground(g) => {
                let key = match g.kind {
                    GroundKind::Regular => MaterialKey::Snow,
                    GroundKind::Finish => MaterialKey::FinishSnow,
                };
                let quad = own * g.tilt * Transform::scale(g.extent, g.extent, 1.0);
                out(&DrawRequest::new(ShapeId::Square, quad, key));
            }
            NodeKind::Tree(t) => {
                let boulder = *acc
                    * Transform::translation(Vec3::new(t.rock_offset_x, -1.5, 5.5))
                    * self.base
                    * t.upright
                    * Transform::scale(5.0, 3.0, 5.5)
                    * Transform::uniform_scale(t.rock_scale);
                out(&DrawRequest::new(ShapeId::Cube, boulder, MaterialKey::Stone));

                let stem = own * t.upright * Transform::uniform_scale(t.scale);
                let trunk = stem * Transform::scale(1.0, TREE_HEIGHT, 1.0);
                out(&DrawRequest::new(ShapeId::Cylinder, trunk, MaterialKey::Bark));
                let canopy = stem
                    * Transform::translation(Vec3::new(0.0, TREE_HEIGHT, 0.0))
                    * Transform::scale(1.5, TREE_HEIGHT, 1.5);
                out(&DrawRequest::new(ShapeId::Cone, canopy, MaterialKey::Leaves));
            }
            NodeKind::Rock(r) => {
                let boulder = *acc
                    * Transform::translation(Vec3::new(r.offset_x, -1.5, 5.5))
                    * self.base
                    * r.upright
                    * Transform::scale(5.0, 3.0, 5.5)
                    * Transform::uniform_scale(r.scale);
                out(&DrawRequest::new(ShapeId::Cube, boulder, MaterialKey::Stone));
            }
            NodeKind::Mountain(m) => {
                let peak = own * m.upright * Transform::scale(m.cone_radius, m.cone_height, m.cone_radius);
                out(&DrawRequest::new(ShapeId::Cone, peak, MaterialKey::Mountain));
            }
        }
    }

    /// Number of nodes in the subtree (self included) matching `pred`.
    pub fn count<P: Fn(&NodeKind) -> bool>(&self, pred: P) -> usize {
        let mut n = 0;
        self.walk(&Transform::IDENTITY, &mut |node, _| if pred(&node.kind) { n += 1 });
        n
    }
}
