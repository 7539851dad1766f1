use core::ops::{Index, IndexMut};

use crate::coords::{Bounds, Vec2};
use crate::paint::Color;

use super::shapes::Shape;

/// Handle to a node in a [`Scene`].
///
/// Ids are positional and remain stable until [`Scene::clear`], which
/// invalidates all of them.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct NodeId(pub(crate) usize);

/// A live scene element: a shape plus its mutable per-step state.
///
/// `position` and `velocity` are the only state an animation step is
/// expected to mutate; `bounds` never depends on them.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub shape: Shape,
    pub position: Vec2,
    pub velocity: Vec2,
    pub color: Color,
}

impl Node {
    pub fn new(shape: Shape) -> Self {
        Self {
            shape,
            position: Vec2::zero(),
            velocity: Vec2::zero(),
            color: Color::WHITE,
        }
    }

    /// Local bounds translated into world space by the node's position.
    #[inline]
    pub fn world_bounds(&self) -> Bounds {
        self.shape.bounds().translated(self.position)
    }
}

/// Ordered collection of live nodes. Insertion order is draw order.
#[derive(Debug, Default)]
pub struct Scene {
    nodes: Vec<Node>,
}

impl Scene {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a node built from `shape` with default state. O(1) amortized.
    pub fn add(&mut self, shape: Shape) -> NodeId {
        self.add_node(Node::new(shape))
    }

    pub fn add_node(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    /// Removes every node. Outstanding [`NodeId`]s become invalid.
    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    /// Nodes in draw order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    #[inline]
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Node> {
        self.nodes.iter_mut()
    }

    pub fn world_bounds(&self, id: NodeId) -> Option<Bounds> {
        self.get(id).map(Node::world_bounds)
    }
}

impl Index<NodeId> for Scene {
    type Output = Node;

    /// # Panics
    /// Panics if `id` was invalidated by [`Scene::clear`].
    #[inline]
    fn index(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }
}

impl IndexMut<NodeId> for Scene {
    #[inline]
    fn index_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::shapes::Square;

    // ── ordering ──────────────────────────────────────────────────────────

    #[test]
    fn insertion_order_is_draw_order() {
        let mut scene = Scene::new();
        let a = scene.add(Shape::Point);
        let b = scene.add(Shape::Square(Square::default()));
        assert_eq!(a, NodeId(0));
        assert_eq!(b, NodeId(1));

        let shapes: Vec<_> = scene.iter().map(|n| n.shape.clone()).collect();
        assert_eq!(
            shapes,
            vec![Shape::Point, Shape::Square(Square::default())]
        );
    }

    #[test]
    fn clear_empties_the_scene() {
        let mut scene = Scene::new();
        scene.add(Shape::Point);
        scene.add(Shape::Point);
        scene.clear();
        assert!(scene.is_empty());
    }

    // ── bounds ────────────────────────────────────────────────────────────

    #[test]
    fn world_bounds_translate_by_position() {
        let mut scene = Scene::new();
        let id = scene.add(Shape::Square(Square::default()));
        scene[id].position = Vec2::new(10.0, -4.0);
        assert_eq!(
            scene.world_bounds(id),
            Some(Bounds::new(9.5, -4.5, 10.5, -3.5))
        );
    }

    #[test]
    fn world_bounds_for_stale_id_is_none() {
        let mut scene = Scene::new();
        let id = scene.add(Shape::Point);
        scene.clear();
        assert_eq!(scene.world_bounds(id), None);
    }
}
