// Copyright 2026 the Filament Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The context a component receives while it renders.

use alloc::rc::Rc;
use core::any::Any;

use filament_core::binding::{BindingSnapshot, Bridge};
use filament_core::error::{self, Error};
use filament_core::identity::Invocation;
use filament_core::introspect::Introspector;
use filament_core::node::{BindingKey, NodeId, NodeKind, NodeTree};
use filament_core::trace::{TraceSink, Tracer};
use filament_core::traverse::{self, Direction};

use crate::store::{Hooks, NodeStore};

/// One render invocation of a component.
///
/// Identity questions ([`current_node`](Self::current_node) and everything
/// built on it) go through the invocation's token and therefore need a bound
/// region above the component. [`read`](Self::read) and
/// [`remember`](Self::remember) are plain engine features and work anywhere.
pub struct Scope<'a, P, V> {
    store: &'a NodeStore<P, V>,
    node: NodeId,
    invocation: Invocation,
    hooks: Hooks,
    cursor: usize,
    sink: Option<&'a mut dyn TraceSink>,
}

impl<P, V> core::fmt::Debug for Scope<'_, P, V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Scope")
            .field("invocation", &self.invocation)
            .field("hooks", &self.hooks.len())
            .finish_non_exhaustive()
    }
}

impl<'a, P, V: Clone> Scope<'a, P, V> {
    pub(crate) fn new(
        store: &'a NodeStore<P, V>,
        node: NodeId,
        invocation: Invocation,
        hooks: Hooks,
        sink: Option<&'a mut dyn TraceSink>,
    ) -> Self {
        Self {
            store,
            node,
            invocation,
            hooks,
            cursor: 0,
            sink,
        }
    }

    pub(crate) fn into_hooks(self) -> Hooks {
        self.hooks
    }

    /// Returns the tree being rendered.
    #[must_use]
    pub fn tree(&self) -> &'a NodeStore<P, V> {
        self.store
    }

    /// Returns the invocation handle for this render.
    #[must_use]
    pub fn invocation(&self) -> &Invocation {
        &self.invocation
    }

    /// Returns the node this component is rendering into.
    pub fn current_node(&mut self) -> Result<NodeId, Error> {
        let (mut introspector, invocation) = self.introspector();
        introspector.resolve(invocation)
    }

    /// Returns the value of the nearest enclosing declaration of `key`.
    #[must_use]
    pub fn read(&self, key: BindingKey) -> Option<V> {
        let store = self.store;
        let decl = traverse::traverse(store, self.node, Direction::Ascending, |n| {
            store.binding(n).is_some_and(|(k, _)| k == key)
        })?;
        store.binding(decl).map(|(_, value)| value.clone())
    }

    /// Returns state that persists across renders of this node.
    ///
    /// State is matched by call order: the `n`th call in one render gets the
    /// value created by the `n`th call in the first render.
    ///
    /// # Panics
    ///
    /// Panics if the `n`th call asks for a different type than it did before.
    pub fn remember<T: 'static>(&mut self, init: impl FnOnce() -> T) -> Rc<T> {
        let slot = self.cursor;
        self.cursor += 1;
        if let Some(existing) = self.hooks.get(slot) {
            return match Rc::clone(existing).downcast::<T>() {
                Ok(value) => value,
                Err(_) => panic!("hook {slot} changed type between renders"),
            };
        }
        let value = Rc::new(init());
        let erased: Rc<dyn Any> = value.clone();
        self.hooks.push(erased);
        value
    }

    /// Captures the bindings visible at this component, up to the region
    /// root.
    pub fn snapshot(&mut self) -> Result<BindingSnapshot<V>, Error> {
        let (mut introspector, invocation) = self.introspector();
        introspector.snapshot_for(invocation)
    }

    /// Returns the root node of the tree this component is mounted in.
    pub fn container(&mut self) -> Result<NodeId, Error> {
        let node = self.current_node()?;
        let (mut introspector, _) = self.introspector();
        error::require(introspector.nearest_of_kind(
            node,
            Direction::Ascending,
            NodeKind::Root,
            |_, _| true,
        ))
    }

    /// Returns the container of the tree this component is mounted in.
    ///
    /// `None` when the tree was created without one, see
    /// [`Root::with_container`](crate::Root::with_container).
    pub fn container_payload(&mut self) -> Result<Option<&'a P>, Error> {
        let root = self.container()?;
        let store: &'a NodeStore<P, V> = self.store;
        Ok(store.payload(root))
    }

    /// Returns the closest host node above this component, if any.
    pub fn nearest_host_ancestor(&mut self) -> Result<Option<NodeId>, Error> {
        self.nearest_host(Direction::Ascending)
    }

    /// Returns the first host node this component mounted, as of its
    /// previous render.
    pub fn nearest_host_descendant(&mut self) -> Result<Option<NodeId>, Error> {
        self.nearest_host(Direction::Descending)
    }

    fn nearest_host(&mut self, direction: Direction) -> Result<Option<NodeId>, Error> {
        let node = self.current_node()?;
        let (mut introspector, _) = self.introspector();
        Ok(introspector.nearest_of_kind(node, direction, NodeKind::Host, |_, _| true))
    }

    fn introspector(&mut self) -> (Introspector<'_, NodeStore<P, V>>, &Invocation) {
        let tracer = match self.sink.as_deref_mut() {
            Some(sink) => Tracer::new(sink),
            None => Tracer::none(),
        };
        (
            Introspector::with_tracer(self.store, tracer),
            &self.invocation,
        )
    }
}

impl<P, V: Clone + 'static> Scope<'_, P, V> {
    /// Returns a bridge carrying this component's bindings.
    ///
    /// The same bridge is returned on every render and refreshed each time,
    /// so content wrapped by it (and every clone of it) sees current values.
    pub fn use_bridge(&mut self) -> Result<Bridge<V>, Error> {
        let bridge = self.remember(Bridge::<V>::default);
        let (mut introspector, invocation) = self.introspector();
        introspector.refresh_bridge(invocation, &bridge)?;
        Ok(Bridge::clone(&bridge))
    }
}
