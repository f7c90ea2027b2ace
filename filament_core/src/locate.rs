// Copyright 2026 the Filament Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Finding the nearest node of a kind.

use crate::introspect::Introspector;
use crate::node::{NodeId, NodeKind, NodeTree};
use crate::traverse::Direction;

/// Returns the nearest node of `kind` in `direction` that passes `filter`.
///
/// The start node is not a candidate.
pub fn nearest_of_kind<T: NodeTree + ?Sized>(
    tree: &T,
    node: NodeId,
    direction: Direction,
    kind: NodeKind,
    filter: impl FnMut(&T, NodeId) -> bool,
) -> Option<NodeId> {
    Introspector::new(tree).nearest_of_kind(node, direction, kind, filter)
}

/// Returns the first host node in pre-order below `node`.
pub fn nearest_host_descendant<T: NodeTree + ?Sized>(tree: &T, node: NodeId) -> Option<NodeId> {
    nearest_of_kind(tree, node, Direction::Descending, NodeKind::Host, |_, _| true)
}

/// Returns the closest host ancestor of `node`.
pub fn nearest_host_ancestor<T: NodeTree + ?Sized>(tree: &T, node: NodeId) -> Option<NodeId> {
    nearest_of_kind(tree, node, Direction::Ascending, NodeKind::Host, |_, _| true)
}

/// Returns the root of the tree `node` belongs to.
pub fn enclosing_root<T: NodeTree + ?Sized>(tree: &T, node: NodeId) -> Option<NodeId> {
    nearest_of_kind(tree, node, Direction::Ascending, NodeKind::Root, |_, _| true)
}

/// Returns the payload of the nearest host node in `direction`.
pub fn nearest_host_payload<T: NodeTree + ?Sized>(
    tree: &T,
    node: NodeId,
    direction: Direction,
) -> Option<&T::Payload> {
    let host = nearest_of_kind(tree, node, direction, NodeKind::Host, |_, _| true)?;
    tree.payload(host)
}
