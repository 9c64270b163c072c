//! Transform hierarchy for the wingsuit world.
//!
//! A `SceneNode` owns its children outright; dropping the root drops the
//! world. Drawing walks the tree and hands `DrawRequest`s to a visitor, so the
//! renderer never sees the node types themselves.

pub mod transform;
pub mod draw;
pub mod node;
pub mod ring;

pub use transform::Transform;
pub use draw::{DrawRequest, MaterialHint, MaterialKey, ShapeId, material};
pub use node::{Ground, GroundKind, Mountain, MountainBand, NodeKind, Rock, SceneNode, Tree};
pub use ring::{Ring, RingKind};
