//! Scene model.
//!
//! Responsibilities:
//! - own the live set of renderable nodes (insertion order = draw order)
//! - keep shape-specific constructors and helpers isolated per shape file
//!   under `scene::shapes`
//! - answer world-space bounds queries (local bounds + node position)

mod graph;

pub mod shapes;

pub use graph::{Node, NodeId, Scene};
pub use shapes::Shape;
