// Copyright 2026 the Filament Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A borrowed view of a tree that runs introspection calls and traces them.
//!
//! The free functions in [`traverse`](crate::traverse),
//! [`locate`](crate::locate), and [`binding`](crate::binding), and the
//! methods on [`Invocation`], are shorthands for an [`Introspector`] built
//! with [`Tracer::none`]. Build one yourself to route events to a
//! [`TraceSink`](crate::trace::TraceSink).

use crate::binding::{self, Bridge, BindingSnapshot};
use crate::error::Error;
use crate::identity::{self, Invocation};
use crate::node::{NodeId, NodeKind, NodeTree};
use crate::trace::{BridgeEvent, ResolveEvent, SnapshotEvent, Tracer, TraverseEvent};
use crate::traverse::{self, Direction, Visit};

/// Runs introspection calls against one tree.
pub struct Introspector<'a, T: ?Sized> {
    tree: &'a T,
    tracer: Tracer<'a>,
}

impl<T: ?Sized> core::fmt::Debug for Introspector<'_, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Introspector")
            .field("tracer", &self.tracer)
            .finish_non_exhaustive()
    }
}

impl<'a, T: NodeTree + ?Sized> Introspector<'a, T> {
    /// Creates an introspector that emits no trace events.
    #[must_use]
    pub fn new(tree: &'a T) -> Self {
        Self {
            tree,
            tracer: Tracer::none(),
        }
    }

    /// Creates an introspector that reports to `tracer`.
    #[must_use]
    pub fn with_tracer(tree: &'a T, tracer: Tracer<'a>) -> Self {
        Self { tree, tracer }
    }

    /// Returns the underlying tree.
    #[must_use]
    pub fn tree(&self) -> &'a T {
        self.tree
    }

    /// See [`traverse::traverse`].
    pub fn traverse<R: Into<Visit>>(
        &mut self,
        start: NodeId,
        direction: Direction,
        visit: impl FnMut(NodeId) -> R,
    ) -> Option<NodeId> {
        let walk = traverse::walk(self.tree, start, direction, visit);
        self.tracer.traverse(&TraverseEvent {
            start,
            direction,
            visited: walk.visited,
            selected: walk.selected,
        });
        walk.selected
    }

    /// See [`locate::nearest_of_kind`](crate::locate::nearest_of_kind).
    pub fn nearest_of_kind(
        &mut self,
        node: NodeId,
        direction: Direction,
        kind: NodeKind,
        mut filter: impl FnMut(&T, NodeId) -> bool,
    ) -> Option<NodeId> {
        let tree = self.tree;
        self.traverse(node, direction, |n| tree.kind(n) == Some(kind) && filter(tree, n))
    }

    /// See [`Invocation::current_node`].
    pub fn resolve(&mut self, invocation: &Invocation) -> Result<NodeId, Error> {
        let (outcome, cached) = identity::resolve(self.tree, invocation);
        self.tracer.resolve(&ResolveEvent {
            token: invocation.token(),
            region: invocation.region(),
            outcome,
            cached,
        });
        outcome
    }

    /// See [`binding::snapshot`].
    pub fn snapshot(
        &mut self,
        node: NodeId,
        region: Option<NodeId>,
    ) -> BindingSnapshot<T::Value> {
        let snapshot = binding::capture(self.tree, node, region);
        self.tracer.snapshot(&SnapshotEvent {
            node,
            region,
            entries: snapshot.len(),
        });
        snapshot
    }

    /// See [`Invocation::snapshot`].
    pub fn snapshot_for(
        &mut self,
        invocation: &Invocation,
    ) -> Result<BindingSnapshot<T::Value>, Error> {
        let region = invocation.region().ok_or(Error::NotBound {
            operation: "snapshot",
        })?;
        let node = self.resolve(invocation)?;
        Ok(self.snapshot(node, Some(region)))
    }

    /// See [`Invocation::refresh_bridge`].
    pub fn refresh_bridge(
        &mut self,
        invocation: &Invocation,
        bridge: &Bridge<T::Value>,
    ) -> Result<(), Error> {
        let region = invocation.region().ok_or(Error::NotBound {
            operation: "refresh_bridge",
        })?;
        let node = self.resolve(invocation)?;
        let snapshot = self.snapshot(node, Some(region));
        let entries = snapshot.len();
        bridge.refresh(snapshot);
        self.tracer.bridge_refresh(&BridgeEvent { node, entries });
        Ok(())
    }
}
