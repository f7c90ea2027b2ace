// Copyright 2026 the Filament Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Binding snapshots and bridges.
//!
//! A *binding* is a `(key, value)` pair declared by a [`NodeKind::Binding`]
//! node and visible to all of its descendants; the nearest declaration of a
//! key shadows outer ones.
//!
//! [`snapshot`] captures what a node currently sees. [`make_bridge`] turns a
//! snapshot into a [`Bridge`], which re-declares the same bindings around
//! content that will be mounted in a different tree, so that reads inside
//! that content resolve exactly as they would at the original node.
//!
//! Bridges are live. The component that owns one re-captures on every render
//! ([`Invocation::refresh_bridge`](crate::identity::Invocation::refresh_bridge)),
//! and the engine re-wraps the bridged content each time it renders it.
//!
//! [`NodeKind::Binding`]: crate::node::NodeKind::Binding

mod bridge;
mod snapshot;

pub use bridge::Bridge;
pub use snapshot::BindingSnapshot;

pub(crate) use snapshot::capture;

use crate::introspect::Introspector;
use crate::node::{NodeId, NodeTree};

/// Captures the bindings visible at `node`.
///
/// Walks the ancestors of `node` (not `node` itself), nearest first, keeping
/// the first value seen for each key. Stops after `region` when given.
pub fn snapshot<T: NodeTree + ?Sized>(
    tree: &T,
    node: NodeId,
    region: Option<NodeId>,
) -> BindingSnapshot<T::Value> {
    Introspector::new(tree).snapshot(node, region)
}

/// Builds a bridge that re-declares `snapshot` around arbitrary content.
#[must_use]
pub fn make_bridge<V>(snapshot: BindingSnapshot<V>) -> Bridge<V> {
    Bridge::new(snapshot)
}
