// Copyright 2026 the Filament Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Independent trees and the positional reconciler that mounts elements.

use alloc::boxed::Box;
use alloc::vec;
use alloc::vec::Vec;

use filament_core::identity::Invocation;
use filament_core::locate;
use filament_core::node::{NodeId, NodeKind, NodeTree};
use filament_core::trace::TraceSink;
use filament_core::traverse::{Descendants, Direction};
use hashbrown::HashMap;

use crate::element::{Component, Element, Tag};
use crate::scope::Scope;
use crate::store::NodeStore;

/// One independently rooted tree.
///
/// Each call to [`render`](Self::render) reconciles the root's content
/// against the previous render:
///
/// - Children are matched by position. A mounted node is reused when the new
///   element is of the same sort: the same [`Component`], a declaration of
///   the same key, or the same structural variant.
/// - Unmatched nodes are removed together with their subtrees.
/// - Components run before their children are reconciled, each with a fresh
///   [`Invocation`] whose token is stored on the node first.
pub struct Root<P, V> {
    store: NodeStore<P, V>,
    node: NodeId,
    tags: HashMap<NodeId, Tag<P, V>>,
    sink: Option<Box<dyn TraceSink>>,
}

impl<P, V> core::fmt::Debug for Root<P, V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Root")
            .field("node", &self.node)
            .field("store", &self.store)
            .field("traced", &self.sink.is_some())
            .finish_non_exhaustive()
    }
}

impl<P, V: Clone> Default for Root<P, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P, V: Clone> Root<P, V> {
    /// Creates an empty tree.
    #[must_use]
    pub fn new() -> Self {
        let mut store = NodeStore::new();
        let node = store.create_node(NodeKind::Root);
        Self {
            store,
            node,
            tags: HashMap::new(),
            sink: None,
        }
    }

    /// Creates an empty tree whose root node carries `container`.
    ///
    /// Components mounted in the tree read it back through
    /// [`Scope::container_payload`].
    #[must_use]
    pub fn with_container(container: P) -> Self {
        let mut root = Self::new();
        root.store.set_payload(root.node, container);
        root
    }

    /// Returns the container the tree was created with, if any.
    #[must_use]
    pub fn container(&self) -> Option<&P> {
        self.store.payload(self.node)
    }

    /// Returns the tree's root node.
    #[must_use]
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Returns the node store.
    #[must_use]
    pub fn store(&self) -> &NodeStore<P, V> {
        &self.store
    }

    /// Routes introspection events raised by components to `sink`.
    pub fn set_trace_sink(&mut self, sink: Box<dyn TraceSink>) {
        self.sink = Some(sink);
    }

    /// Removes and returns the trace sink.
    pub fn take_trace_sink(&mut self) -> Option<Box<dyn TraceSink>> {
        self.sink.take()
    }

    /// Mounts `element` as the tree's content, reusing what matches.
    pub fn render(&mut self, element: Element<P, V>) {
        self.reconcile(self.node, vec![element], None);
    }

    /// Removes all content.
    pub fn unmount(&mut self) {
        self.reconcile(self.node, Vec::new(), None);
    }

    /// Returns the payload of the first host node in the tree.
    #[must_use]
    pub fn head(&self) -> Option<&P> {
        locate::nearest_host_payload(&self.store, self.node, Direction::Descending)
    }

    fn reconcile(&mut self, parent: NodeId, elements: Vec<Element<P, V>>, region: Option<NodeId>) {
        let mut previous = self.store.children(parent).collect::<Vec<_>>().into_iter();
        let mut mounted = Vec::with_capacity(elements.len());

        for element in elements {
            let node = match previous.next() {
                Some(node) if self.reusable(node, &element) => {
                    self.store.remove_from_parent(node);
                    node
                }
                Some(node) => {
                    self.destroy(node);
                    self.mount(&element)
                }
                None => self.mount(&element),
            };
            mounted.push((node, element));
        }
        for node in previous {
            self.destroy(node);
        }

        // Attach everything first so components can find themselves.
        for &(node, _) in &mounted {
            self.store.add_child(parent, node);
        }
        for (node, element) in mounted {
            self.update(node, element, region);
        }
    }

    fn reusable(&self, node: NodeId, element: &Element<P, V>) -> bool {
        self.tags
            .get(&node)
            .is_some_and(|tag| tag.same(&element.tag()))
    }

    fn mount(&mut self, element: &Element<P, V>) -> NodeId {
        let node = self.store.create_node(element.kind());
        if matches!(element, Element::Region(_)) {
            self.store.set_opens_region(node, true);
        }
        self.tags.insert(node, element.tag());
        node
    }

    fn destroy(&mut self, node: NodeId) {
        let doomed: Vec<NodeId> = core::iter::once(node)
            .chain(Descendants::new(&self.store, node))
            .collect();
        if self.store.parent(node).is_some() {
            self.store.remove_from_parent(node);
        }
        // Reverse pre-order: every node goes after its whole subtree.
        for id in doomed.into_iter().rev() {
            self.tags.remove(&id);
            self.store.destroy_node(id);
        }
    }

    fn update(&mut self, node: NodeId, element: Element<P, V>, region: Option<NodeId>) {
        match element {
            Element::Host { payload, children } => {
                self.store.set_payload(node, payload);
                self.reconcile(node, children, region);
            }
            Element::Provide {
                key,
                value,
                children,
            } => {
                self.store.set_binding(node, key, value);
                self.reconcile(node, children, region);
            }
            Element::Region(children) => self.reconcile(node, children, Some(node)),
            Element::Fragment(children) => self.reconcile(node, children, region),
            Element::Component(component) => {
                let child = self.invoke(node, &component, region);
                self.reconcile(node, vec![child], region);
            }
            Element::Bridged { bridge, content } => {
                let child = bridge.wrap(*content, |key, value, inner| {
                    Element::provide(key, value, vec![inner])
                });
                self.reconcile(node, vec![child], region);
            }
        }
    }

    fn invoke(
        &mut self,
        node: NodeId,
        component: &Component<P, V>,
        region: Option<NodeId>,
    ) -> Element<P, V> {
        let invocation = Invocation::begin(region);
        self.store.set_invocation_token(node, invocation.token());
        let hooks = self.store.take_hooks(node);

        let sink: Option<&mut dyn TraceSink> = match &mut self.sink {
            Some(sink) => Some(&mut **sink),
            None => None,
        };
        let mut scope = Scope::new(&self.store, node, invocation, hooks, sink);
        let child = component.call(&mut scope);
        let hooks = scope.into_hooks();

        self.store.restore_hooks(node, hooks);
        child
    }
}
