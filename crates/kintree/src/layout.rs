//! Centered recursive tree layout.
//!
//! Every node occupies a fixed `120×60` box. A node's horizontal slot is an
//! offset measured in units of `NODE_WIDTH + GAP`; the root sits at offset 0
//! and a node with `k` children spreads them over `k` consecutive slots
//! centered on its own slot. Subtree widths are not measured, so children of
//! neighboring branches may share slots when the tree is unbalanced.

use std::collections::HashMap;

use log::{debug, trace};

use kintree_core::geometry::{Bounds, Point, Size};

use crate::structure::TreeNode;

/// Width of a node box.
pub const NODE_WIDTH: f32 = 120.0;
/// Height of a node box.
pub const NODE_HEIGHT: f32 = 60.0;
/// Vertical distance between the tops of two consecutive levels.
pub const LEVEL_HEIGHT: f32 = 100.0;
/// Horizontal gap between neighboring slots.
pub const GAP: f32 = 100.0;

/// Size of every node box.
pub const NODE_SIZE: Size = Size::new(NODE_WIDTH, NODE_HEIGHT);

/// A member id with the top-left corner of its node box.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedNode {
    id: String,
    position: Point,
}

impl PositionedNode {
    pub fn new(id: impl Into<String>, position: Point) -> Self {
        Self {
            id: id.into(),
            position,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn x(&self) -> f32 {
        self.position.x()
    }

    pub fn y(&self) -> f32 {
        self.position.y()
    }

    pub fn position(&self) -> Point {
        self.position
    }

    /// The node's `120×60` box.
    pub fn bounds(&self) -> Bounds {
        Bounds::new_from_top_left(self.position, NODE_SIZE)
    }
}

/// Positions every node of the subtree rooted at `root`, in pre-order.
///
/// # Example
///
/// ```
/// # use kintree::{layout::layout, structure::build_forest};
/// # use kintree_core::family::Member;
/// let members = vec![
///     Member::root("root", "Root"),
///     Member::new("a", "A").with_parent("root"),
/// ];
/// let forest = build_forest(&members).unwrap();
///
/// let positions = layout(forest.primary().unwrap());
/// assert_eq!(positions[1].id(), "a");
/// assert_eq!((positions[1].x(), positions[1].y()), (0.0, 100.0));
/// ```
pub fn layout(root: &TreeNode<'_>) -> Vec<PositionedNode> {
    let mut positions = Vec::with_capacity(root.node_count());
    place(root, 0.0, 0, &mut positions);
    positions
}

fn place(node: &TreeNode<'_>, offset: f32, level: usize, out: &mut Vec<PositionedNode>) {
    let position = Point::new(offset * (NODE_WIDTH + GAP), level as f32 * LEVEL_HEIGHT);
    out.push(PositionedNode::new(node.id(), position));

    let children = node.children();
    let first = offset - (children.len() as f32 - 1.0) / 2.0;
    for (i, child) in children.iter().enumerate() {
        place(child, first + i as f32, level + 1, out);
    }
}

/// Number of nodes at each depth of the subtree, root level first.
pub fn level_widths(root: &TreeNode<'_>) -> Vec<usize> {
    let mut widths = Vec::new();
    let mut level: Vec<&TreeNode<'_>> = vec![root];
    while !level.is_empty() {
        widths.push(level.len());
        level = level
            .into_iter()
            .flat_map(|node| node.children().iter())
            .collect();
    }
    widths
}

/// A computed layout with lookup by member id.
#[derive(Debug, Clone, Default)]
pub struct TreeLayout {
    nodes: Vec<PositionedNode>,
    index: HashMap<String, usize>,
}

impl TreeLayout {
    /// Lays out the subtree rooted at `root`.
    pub fn new(root: &TreeNode<'_>) -> Self {
        let layout = Self::from_positions(layout(root));
        debug!(
            nodes = layout.len(),
            levels:? = level_widths(root);
            "Tree layout calculated"
        );
        trace!(layout:?; "Tree layout");
        layout
    }

    /// Wraps precomputed positions. The first entry for an id wins lookups.
    pub fn from_positions(nodes: Vec<PositionedNode>) -> Self {
        let mut index = HashMap::with_capacity(nodes.len());
        for (i, node) in nodes.iter().enumerate() {
            index.entry(node.id.clone()).or_insert(i);
        }
        Self { nodes, index }
    }

    pub fn nodes(&self) -> &[PositionedNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Top-left corner of member `id`'s box, if it was laid out.
    pub fn position(&self, id: &str) -> Option<Point> {
        self.index.get(id).map(|&i| self.nodes[i].position)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Union of every node box; zero bounds for an empty layout.
    pub fn bounds(&self) -> Bounds {
        self.nodes
            .iter()
            .map(PositionedNode::bounds)
            .reduce(|acc, bounds| acc.merge(&bounds))
            .unwrap_or_default()
    }
}


#[cfg(test)]
mod proptest_tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use kintree_core::family::Member;

    use super::*;
    use crate::structure::build_forest;

    /// A single-rooted tree: member `i > 0` points at some member before it.
    fn tree_members() -> impl Strategy<Value = Vec<Member>> {
        prop::collection::vec(any::<prop::sample::Index>(), 0..30).prop_map(|parents| {
            let mut members = vec![Member::root("m0", "Root")];
            for (i, parent) in parents.into_iter().enumerate() {
                let id = i + 1;
                members.push(
                    Member::new(format!("m{id}"), format!("Member {id}"))
                        .with_parent(format!("m{}", parent.index(id))),
                );
            }
            members
        })
    }

    proptest! {
        #[test]
        fn one_position_per_node_with_root_at_origin(members in tree_members()) {
            let forest = build_forest(&members).unwrap();
            let root = forest.primary().unwrap();
            let positions = layout(root);

            prop_assert_eq!(positions.len(), root.node_count());
            prop_assert_eq!(positions[0].id(), "m0");
            prop_assert_eq!(positions[0].position(), Point::new(0.0, 0.0));
        }

        #[test]
        fn children_are_symmetric_about_parent(members in tree_members()) {
            let forest = build_forest(&members).unwrap();
            let root = forest.primary().unwrap();
            let layout = TreeLayout::new(root);

            for node in root.iter() {
                let Some(parent) = layout.position(node.id()) else {
                    continue;
                };
                let spread: f32 = node
                    .children()
                    .iter()
                    .filter_map(|child| layout.position(child.id()))
                    .map(|child| child.x() - parent.x())
                    .sum();
                prop_assert!(approx_eq!(f32, spread, 0.0, epsilon = 1e-2));
                for child in node.children() {
                    let child_y = layout.position(child.id()).map(Point::y);
                    prop_assert_eq!(child_y, Some(parent.y() + LEVEL_HEIGHT));
                }
            }
        }
    }
}
