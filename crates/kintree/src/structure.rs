//! Tree construction from a flat member list.
//!
//! [`build_forest`] groups members by their `parent_id` and attaches children
//! recursively, depth-first, starting at every parentless member. Sibling
//! order always equals the order of the input list.
//!
//! Members whose parent chain ends in an id that does not exist are left out
//! of the forest and logged. Members whose parent chain loops back on itself
//! make the build fail with [`StructureError::CycleDetected`].

use std::collections::HashSet;

use indexmap::IndexMap;
use log::{debug, info, trace, warn};
use thiserror::Error;

use kintree_core::family::Member;

/// Errors raised while building the forest.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StructureError {
    #[error("parent references form a cycle through: {}", members.join(", "))]
    CycleDetected { members: Vec<String> },
}

/// A member together with its children, in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode<'a> {
    member: &'a Member,
    children: Vec<TreeNode<'a>>,
}

impl<'a> TreeNode<'a> {
    pub fn member(&self) -> &'a Member {
        self.member
    }

    pub fn id(&self) -> &'a str {
        self.member.id()
    }

    pub fn children(&self) -> &[TreeNode<'a>] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(TreeNode::node_count).sum::<usize>()
    }

    /// Iterates the subtree in pre-order.
    pub fn iter(&self) -> impl Iterator<Item = &TreeNode<'a>> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.children.iter().rev());
            Some(node)
        })
    }
}

/// One tree per parentless member, in input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Forest<'a> {
    trees: Vec<TreeNode<'a>>,
}

impl<'a> Forest<'a> {
    pub fn trees(&self) -> &[TreeNode<'a>] {
        &self.trees
    }

    /// The first tree; the designated root's tree when the root leads the list.
    pub fn primary(&self) -> Option<&TreeNode<'a>> {
        self.trees.first()
    }

    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }

    /// Total number of nodes across all trees.
    pub fn node_count(&self) -> usize {
        self.trees.iter().map(TreeNode::node_count).sum()
    }
}

/// Builds the forest induced by the members' parent references.
///
/// # Errors
///
/// Returns [`StructureError::CycleDetected`] when parent references loop.
///
/// # Example
///
/// ```
/// # use kintree::structure::build_forest;
/// # use kintree_core::family::Member;
/// let members = vec![
///     Member::root("root", "Root"),
///     Member::new("a", "A").with_parent("root"),
///     Member::new("b", "B").with_parent("root"),
/// ];
///
/// let forest = build_forest(&members).unwrap();
/// let root = forest.primary().unwrap();
///
/// assert_eq!(root.id(), "root");
/// assert_eq!(root.children().len(), 2);
/// assert_eq!(forest.node_count(), 3);
/// ```
pub fn build_forest(members: &[Member]) -> Result<Forest<'_>, StructureError> {
    info!(members = members.len(); "Building forest");

    let mut children_of: IndexMap<&str, Vec<usize>> = IndexMap::new();
    for (index, member) in members.iter().enumerate() {
        if let Some(parent_id) = member.parent_id() {
            children_of.entry(parent_id).or_default().push(index);
        }
    }

    let mut builder = Builder {
        members,
        children_of: &children_of,
        path: Vec::new(),
        placed: vec![false; members.len()],
    };

    let mut trees = Vec::new();
    for (index, member) in members.iter().enumerate() {
        if member.parent_id().is_none() {
            trees.push(builder.build(index)?);
        }
    }

    let placed = builder.placed;
    if placed.iter().any(|placed| !placed) {
        classify_unplaced(members, &placed)?;
    }

    let forest = Forest { trees };
    debug!(trees = forest.trees.len(), nodes = forest.node_count(); "Forest built");
    trace!(forest:?; "Built forest");
    Ok(forest)
}

struct Builder<'a, 'i> {
    members: &'a [Member],
    children_of: &'i IndexMap<&'a str, Vec<usize>>,
    path: Vec<usize>,
    placed: Vec<bool>,
}

impl<'a> Builder<'a, '_> {
    fn build(&mut self, index: usize) -> Result<TreeNode<'a>, StructureError> {
        let members = self.members;
        let member = &members[index];
        let id = member.id();

        // A duplicated id can lead back to a member on the current path.
        if let Some(start) = self
            .path
            .iter()
            .position(|&ancestor| self.members[ancestor].id() == id)
        {
            let members = self.path[start..]
                .iter()
                .map(|&ancestor| self.members[ancestor].id().to_string())
                .collect();
            return Err(StructureError::CycleDetected { members });
        }

        self.placed[index] = true;
        self.path.push(index);

        let child_indices = self.children_of.get(id).map(Vec::as_slice).unwrap_or_default();
        let mut children = Vec::with_capacity(child_indices.len());
        for &child in child_indices {
            children.push(self.build(child)?);
        }

        self.path.pop();
        Ok(TreeNode { member, children })
    }
}

/// Sorts every member left out of the forest into dangling or cyclic.
fn classify_unplaced(members: &[Member], placed: &[bool]) -> Result<(), StructureError> {
    let index_of: IndexMap<&str, usize> = members
        .iter()
        .enumerate()
        .rev()
        .map(|(index, member)| (member.id(), index))
        .collect();

    let mut on_cycle: HashSet<usize> = HashSet::new();

    for (index, member) in members.iter().enumerate() {
        if placed[index] {
            continue;
        }

        let mut seen: Vec<usize> = vec![index];
        let mut current = index;
        loop {
            let Some(parent_id) = members[current].parent_id() else {
                break;
            };
            let Some(&parent) = index_of.get(parent_id) else {
                warn!(member = member.id(), parent = parent_id; "Skipping member with dangling parent reference");
                break;
            };
            if let Some(start) = seen.iter().position(|&visited| visited == parent) {
                on_cycle.extend(&seen[start..]);
                break;
            }
            seen.push(parent);
            current = parent;
        }
    }

    if on_cycle.is_empty() {
        return Ok(());
    }

    let members = members
        .iter()
        .enumerate()
        .filter(|(index, _)| on_cycle.contains(index))
        .map(|(_, member)| member.id().to_string())
        .collect();
    Err(StructureError::CycleDetected { members })
}
