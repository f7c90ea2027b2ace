// Copyright 2026 the Filament Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Resolving "which node am I" from inside a render invocation.
//!
//! A component's render logic does not receive its node. Instead, the engine
//! opens an [`Invocation`] right before running the component:
//!
//! 1. [`Invocation::begin`] mints a fresh [`InvocationToken`] and records the
//!    root of the bound region the node was constructed under (threaded down
//!    the tree by the engine, `None` outside any region).
//! 2. The engine stores the token in the node's per-invocation state, where
//!    [`NodeTree::invocation_token`] can read it.
//! 3. Component code calls [`Invocation::current_node`], which searches the
//!    region's subtree for the node holding that token.
//!
//! There is no process-wide "current node". Tokens are unique per process,
//! so invocations that interleave, suspend and resume, recurse, or run on
//! other threads in other trees cannot observe each other's identity. The
//! search starts at the invocation's own region root and does not descend
//! into nested region providers.

use core::cell::Cell;

use crate::binding::{BindingSnapshot, Bridge};
use crate::error::Error;
use crate::introspect::Introspector;
use crate::node::{InvocationToken, NodeId, NodeTree};
use crate::traverse::{self, Direction, Visit};

/// The engine-side handle for one render invocation.
///
/// Valid during the invocation and afterwards until the engine starts the
/// next invocation of the same node (which stores a newer token).
#[derive(Debug)]
pub struct Invocation {
    token: InvocationToken,
    region: Option<NodeId>,
    resolved: Cell<Option<NodeId>>,
}

impl Invocation {
    /// Opens an invocation for a node constructed under `region`.
    ///
    /// Store [`token`](Self::token) on the node before running component
    /// logic.
    #[must_use]
    pub fn begin(region: Option<NodeId>) -> Self {
        Self {
            token: InvocationToken::next(),
            region,
            resolved: Cell::new(None),
        }
    }

    /// Returns this invocation's token.
    #[must_use]
    pub fn token(&self) -> InvocationToken {
        self.token
    }

    /// Returns the root of the bound region, if the node is inside one.
    #[must_use]
    pub fn region(&self) -> Option<NodeId> {
        self.region
    }

    /// Returns the node this invocation renders.
    ///
    /// Repeated calls return the same node. Fails with [`Error::NotBound`]
    /// outside a bound region (or once the region's provider is gone) and
    /// with [`Error::Unresolved`] if the engine never stored the token.
    pub fn current_node<T: NodeTree + ?Sized>(&self, tree: &T) -> Result<NodeId, Error> {
        Introspector::new(tree).resolve(self)
    }

    /// Captures the bindings visible at this invocation's node, up to and
    /// including the region root.
    pub fn snapshot<T: NodeTree + ?Sized>(
        &self,
        tree: &T,
    ) -> Result<BindingSnapshot<T::Value>, Error> {
        Introspector::new(tree).snapshot_for(self)
    }

    /// Re-captures this invocation's bindings into an existing bridge.
    ///
    /// Call on every render of the component that owns `bridge` so content
    /// wrapped by it observes current values.
    pub fn refresh_bridge<T: NodeTree + ?Sized>(
        &self,
        tree: &T,
        bridge: &Bridge<T::Value>,
    ) -> Result<(), Error> {
        Introspector::new(tree).refresh_bridge(self, bridge)
    }
}

/// Resolves `invocation` against `tree`, reporting whether the cache answered.
pub(crate) fn resolve<T: NodeTree + ?Sized>(
    tree: &T,
    invocation: &Invocation,
) -> (Result<NodeId, Error>, bool) {
    let not_bound = Error::NotBound {
        operation: "current_node",
    };
    let Some(region) = invocation.region else {
        return (Err(not_bound), false);
    };
    if !tree.is_alive(region) {
        return (Err(not_bound), false);
    }

    // A cached node stays valid only while it still holds our token.
    if let Some(node) = invocation.resolved.get() {
        if tree.invocation_token(node) == Some(invocation.token) {
            return (Ok(node), true);
        }
        invocation.resolved.set(None);
    }

    match search(tree, region, invocation.token) {
        Some(node) => {
            invocation.resolved.set(Some(node));
            (Ok(node), false)
        }
        None => (Err(Error::Unresolved(invocation.token)), false),
    }
}

fn search<T: NodeTree + ?Sized>(
    tree: &T,
    region: NodeId,
    token: InvocationToken,
) -> Option<NodeId> {
    if tree.invocation_token(region) == Some(token) {
        return Some(region);
    }
    traverse::walk(tree, region, Direction::Descending, |node| {
        if tree.invocation_token(node) == Some(token) {
            Visit::Select
        } else if tree.opens_region(node) {
            Visit::Skip
        } else {
            Visit::Continue
        }
    })
    .selected
}
