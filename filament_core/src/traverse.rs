// Copyright 2026 the Filament Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tree traversal with early-exit selection.
//!
//! [`traverse`] walks from a start node either up through `parent` links or
//! down through its subtree, asking a visitor about every node it reaches.
//! The first node the visitor selects is returned and the walk stops there.
//!
//! # Ordering
//!
//! - **Descending** walks are depth-first pre-order: a node is visited before
//!   its children, and a node's whole subtree is visited before its next
//!   sibling. The walk never leaves the start node's subtree.
//! - **Ascending** walks visit the parent, then the grandparent, up to the
//!   root. Siblings of ancestors are never visited.
//!
//! The start node itself is never visited. A stale or detached start yields
//! `None`.
//!
//! All walks are iterative and read the tree through [`NodeTree`] only.

use crate::introspect::Introspector;
use crate::node::{NodeId, NodeTree};

/// Which way a traversal moves from its start node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Toward the root, through `parent` links.
    Ascending,
    /// Into the start node's subtree, in pre-order.
    Descending,
}

/// A visitor's verdict on one node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Visit {
    /// Keep walking.
    #[default]
    Continue,
    /// Keep walking, but do not enter this node's children.
    ///
    /// Ascending walks treat this as [`Continue`](Self::Continue).
    Skip,
    /// Stop and return this node.
    Select,
}

impl From<bool> for Visit {
    fn from(select: bool) -> Self {
        if select { Self::Select } else { Self::Continue }
    }
}

impl From<()> for Visit {
    fn from((): ()) -> Self {
        Self::Continue
    }
}

/// Walks from `start` in `direction`, returning the first node `visit`
/// selects.
///
/// `visit` may return a [`Visit`], a `bool` (`true` selects), or `()` (keep
/// walking), which makes collecting visitors easy to write:
///
/// ```
/// # use filament_core::node::{NodeId, NodeTree};
/// # use filament_core::traverse::{Direction, traverse};
/// # fn demo<T: NodeTree>(tree: &T, start: NodeId) {
/// let mut seen = Vec::new();
/// traverse(tree, start, Direction::Ascending, |n| seen.push(n));
/// # }
/// ```
pub fn traverse<T, R>(
    tree: &T,
    start: NodeId,
    direction: Direction,
    visit: impl FnMut(NodeId) -> R,
) -> Option<NodeId>
where
    T: NodeTree + ?Sized,
    R: Into<Visit>,
{
    Introspector::new(tree).traverse(start, direction, visit)
}

/// Outcome of a raw walk, before tracing.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Walk {
    pub(crate) selected: Option<NodeId>,
    pub(crate) visited: u32,
}

pub(crate) fn walk<T, R>(
    tree: &T,
    start: NodeId,
    direction: Direction,
    mut visit: impl FnMut(NodeId) -> R,
) -> Walk
where
    T: NodeTree + ?Sized,
    R: Into<Visit>,
{
    let mut visited = 0_u32;
    let selected = match direction {
        Direction::Ascending => {
            let mut found = None;
            for node in Ancestors::new(tree, start) {
                visited = visited.saturating_add(1);
                if visit(node).into() == Visit::Select {
                    found = Some(node);
                    break;
                }
            }
            found
        }
        Direction::Descending => {
            let mut found = None;
            let mut nodes = Descendants::new(tree, start);
            while let Some(node) = nodes.next() {
                visited = visited.saturating_add(1);
                match visit(node).into() {
                    Visit::Continue => {}
                    Visit::Skip => nodes.skip_subtree(),
                    Visit::Select => {
                        found = Some(node);
                        break;
                    }
                }
            }
            found
        }
    };
    Walk { selected, visited }
}

/// An iterator over the direct children of a node.
#[derive(Debug)]
pub struct Children<'a, T: ?Sized> {
    tree: &'a T,
    current: Option<NodeId>,
}

impl<'a, T: NodeTree + ?Sized> Children<'a, T> {
    /// Creates an iterator over the children of `parent`.
    #[must_use]
    pub fn new(tree: &'a T, parent: NodeId) -> Self {
        Self {
            tree,
            current: tree.first_child(parent),
        }
    }
}

impl<T: NodeTree + ?Sized> Iterator for Children<'_, T> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let node = self.current?;
        self.current = self.tree.next_sibling(node);
        Some(node)
    }
}

/// An iterator over the strict ancestors of a node, nearest first.
#[derive(Debug)]
pub struct Ancestors<'a, T: ?Sized> {
    tree: &'a T,
    current: Option<NodeId>,
}

impl<'a, T: NodeTree + ?Sized> Ancestors<'a, T> {
    /// Creates an iterator over the ancestors of `start`.
    #[must_use]
    pub fn new(tree: &'a T, start: NodeId) -> Self {
        Self {
            tree,
            current: tree.parent(start),
        }
    }
}

impl<T: NodeTree + ?Sized> Iterator for Ancestors<'_, T> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let node = self.current?;
        self.current = self.tree.parent(node);
        Some(node)
    }
}

/// A pre-order iterator over the strict descendants of a node.
///
/// Uses the tree's parent links to climb back out of finished subtrees, so it
/// needs no stack.
#[derive(Debug)]
pub struct Descendants<'a, T: ?Sized> {
    tree: &'a T,
    root: NodeId,
    last: Option<NodeId>,
    next: Option<NodeId>,
}

impl<'a, T: NodeTree + ?Sized> Descendants<'a, T> {
    /// Creates an iterator over the subtree below `root`.
    #[must_use]
    pub fn new(tree: &'a T, root: NodeId) -> Self {
        Self {
            tree,
            root,
            last: None,
            next: tree.first_child(root),
        }
    }

    /// Skips the children of the node most recently returned by `next`.
    pub fn skip_subtree(&mut self) {
        if let Some(last) = self.last {
            self.next = self.advance(last, false);
        }
    }

    fn advance(&self, from: NodeId, descend: bool) -> Option<NodeId> {
        if descend {
            if let Some(child) = self.tree.first_child(from) {
                return Some(child);
            }
        }
        let mut node = from;
        loop {
            if node == self.root {
                return None;
            }
            if let Some(sibling) = self.tree.next_sibling(node) {
                return Some(sibling);
            }
            node = self.tree.parent(node)?;
        }
    }
}

impl<T: NodeTree + ?Sized> Iterator for Descendants<'_, T> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let node = self.next?;
        self.last = Some(node);
        self.next = self.advance(node, true);
        Some(node)
    }
}
