// Copyright 2026 the Filament Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The read-only view of an engine's node graph.

use super::id::{BindingKey, InvocationToken, NodeId};

/// What a node is, as far as introspection cares.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Wraps a concrete backend instance (the node's payload).
    Host,
    /// A logical grouping produced by a component or fragment.
    Composite,
    /// The root of one tree instance.
    Root,
    /// Introduces or overrides a binding value for its descendants.
    Binding,
}

/// Read access to a tree of render nodes owned by an external engine.
///
/// Implementations must treat every [`NodeId`] as a weak reference: a handle
/// whose node has been destroyed (or whose slot has been reused) reads as
/// absent. None of these methods may panic on a stale handle.
pub trait NodeTree {
    /// The backend instance attached to [`NodeKind::Host`] nodes.
    type Payload;
    /// The value carried by [`NodeKind::Binding`] nodes.
    type Value: Clone;

    /// Returns whether `id` names a live node.
    fn is_alive(&self, id: NodeId) -> bool;

    /// Returns the parent of `id`, if any.
    fn parent(&self, id: NodeId) -> Option<NodeId>;

    /// Returns the first child of `id`, if any.
    fn first_child(&self, id: NodeId) -> Option<NodeId>;

    /// Returns the next sibling of `id`, if any.
    fn next_sibling(&self, id: NodeId) -> Option<NodeId>;

    /// Returns the kind of `id`, or `None` if the handle is stale.
    fn kind(&self, id: NodeId) -> Option<NodeKind>;

    /// Returns the backend instance of a host node, or the container
    /// description of a root node.
    fn payload(&self, id: NodeId) -> Option<&Self::Payload>;

    /// Returns the key and current value declared by a binding node.
    fn binding(&self, id: NodeId) -> Option<(BindingKey, &Self::Value)>;

    /// Returns the token stored in the node's per-invocation state.
    fn invocation_token(&self, id: NodeId) -> Option<InvocationToken>;

    /// Returns whether `id` is a provider that opens a bound region.
    fn opens_region(&self, id: NodeId) -> bool;
}

impl<T: NodeTree + ?Sized> NodeTree for &T {
    type Payload = T::Payload;
    type Value = T::Value;

    fn is_alive(&self, id: NodeId) -> bool {
        (**self).is_alive(id)
    }

    fn parent(&self, id: NodeId) -> Option<NodeId> {
        (**self).parent(id)
    }

    fn first_child(&self, id: NodeId) -> Option<NodeId> {
        (**self).first_child(id)
    }

    fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        (**self).next_sibling(id)
    }

    fn kind(&self, id: NodeId) -> Option<NodeKind> {
        (**self).kind(id)
    }

    fn payload(&self, id: NodeId) -> Option<&Self::Payload> {
        (**self).payload(id)
    }

    fn binding(&self, id: NodeId) -> Option<(BindingKey, &Self::Value)> {
        (**self).binding(id)
    }

    fn invocation_token(&self, id: NodeId) -> Option<InvocationToken> {
        (**self).invocation_token(id)
    }

    fn opens_region(&self, id: NodeId) -> bool {
        (**self).opens_region(id)
    }
}
