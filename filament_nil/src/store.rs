// Copyright 2026 the Filament Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Struct-of-arrays node storage with allocation, topology, and per-node state.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::any::Any;

use filament_core::node::{BindingKey, InvocationToken, NodeId, NodeKind, NodeTree};
use filament_core::traverse::Children;

/// Sentinel value indicating "no node" in index fields.
const INVALID: u32 = u32::MAX;

/// Hook state remembered by a component across renders, in call order.
pub(crate) type Hooks = Vec<Rc<dyn Any>>;

/// Struct-of-arrays storage for all nodes of one tree.
///
/// Nodes are addressed by [`NodeId`] handles. Internally, each node occupies
/// a slot in parallel arrays. Destroyed nodes are recycled via a free list,
/// and generation counters prevent stale handle access.
///
/// Mutation with a stale handle panics. Reads through [`NodeTree`] treat a
/// stale handle as absent.
pub struct NodeStore<P, V> {
    // -- Topology --
    parent: Vec<u32>,
    first_child: Vec<u32>,
    next_sibling: Vec<u32>,
    prev_sibling: Vec<u32>,

    // -- Node data --
    kind: Vec<NodeKind>,
    payload: Vec<Option<P>>,
    binding: Vec<Option<(BindingKey, V)>>,
    opens_region: Vec<bool>,

    // -- Per-invocation state --
    token: Vec<Option<InvocationToken>>,
    hooks: Vec<Hooks>,

    // -- Allocation --
    generation: Vec<u32>,
    live: Vec<bool>,
    free_list: Vec<u32>,
    len: u32,
}

impl<P, V> core::fmt::Debug for NodeStore<P, V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("NodeStore")
            .field("len", &self.len)
            .field("free", &self.free_list.len())
            .finish_non_exhaustive()
    }
}

impl<P, V> Default for NodeStore<P, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P, V> NodeStore<P, V> {
    /// Creates an empty node store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            parent: Vec::new(),
            first_child: Vec::new(),
            next_sibling: Vec::new(),
            prev_sibling: Vec::new(),
            kind: Vec::new(),
            payload: Vec::new(),
            binding: Vec::new(),
            opens_region: Vec::new(),
            token: Vec::new(),
            hooks: Vec::new(),
            generation: Vec::new(),
            live: Vec::new(),
            free_list: Vec::new(),
            len: 0,
        }
    }

    // -- Allocation API --

    /// Creates a new node of `kind` and returns its handle.
    ///
    /// The node starts detached, with no payload, binding, token, or state.
    pub fn create_node(&mut self, kind: NodeKind) -> NodeId {
        let idx = if let Some(idx) = self.free_list.pop() {
            // Reuse a freed slot.
            let i = idx as usize;
            self.generation[i] += 1;
            self.parent[i] = INVALID;
            self.first_child[i] = INVALID;
            self.next_sibling[i] = INVALID;
            self.prev_sibling[i] = INVALID;
            self.kind[i] = kind;
            self.live[i] = true;
            idx
        } else {
            // Allocate a new slot.
            let idx = self.len;
            self.len += 1;
            self.parent.push(INVALID);
            self.first_child.push(INVALID);
            self.next_sibling.push(INVALID);
            self.prev_sibling.push(INVALID);
            self.kind.push(kind);
            self.payload.push(None);
            self.binding.push(None);
            self.opens_region.push(false);
            self.token.push(None);
            self.hooks.push(Vec::new());
            self.generation.push(0);
            self.live.push(true);
            idx
        };

        NodeId::new(idx, self.generation[idx as usize])
    }

    /// Destroys a node, freeing its slot for reuse.
    ///
    /// # Panics
    ///
    /// Panics if the node has children (remove them first) or if the handle
    /// is stale.
    pub fn destroy_node(&mut self, id: NodeId) {
        let i = self.validate(id);
        assert!(
            self.first_child[i] == INVALID,
            "cannot destroy node with children"
        );

        // Remove from parent's child list if attached.
        if self.parent[i] != INVALID {
            self.unlink_from_parent(i);
        }

        self.payload[i] = None;
        self.binding[i] = None;
        self.opens_region[i] = false;
        self.token[i] = None;
        self.hooks[i].clear();

        // Bump generation so old handles immediately fail validation.
        self.generation[i] += 1;
        self.live[i] = false;
        self.free_list.push(id.index());
    }

    /// Returns the number of live nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.live.iter().filter(|&&alive| alive).count()
    }

    // -- Topology API --

    /// Adds `child` as the last child of `parent`.
    ///
    /// # Panics
    ///
    /// Panics if either handle is stale, or if `child` already has a parent.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) {
        let p = self.validate(parent);
        let c = self.validate(child);
        assert!(self.parent[c] == INVALID, "child already has a parent");

        self.parent[c] = parent.index();
        self.prev_sibling[c] = INVALID;
        self.next_sibling[c] = INVALID;

        if self.first_child[p] == INVALID {
            self.first_child[p] = child.index();
        } else {
            // Walk to last child.
            let mut last = self.first_child[p];
            while self.next_sibling[last as usize] != INVALID {
                last = self.next_sibling[last as usize];
            }
            self.next_sibling[last as usize] = child.index();
            self.prev_sibling[c] = last;
        }
    }

    /// Inserts `child` before `sibling` in the sibling list.
    ///
    /// # Panics
    ///
    /// Panics if handles are stale, `child` already has a parent, or `sibling`
    /// has no parent.
    pub fn insert_before(&mut self, child: NodeId, sibling: NodeId) {
        let c = self.validate(child);
        let s = self.validate(sibling);
        assert!(self.parent[c] == INVALID, "child already has a parent");
        let p = self.parent[s];
        assert!(p != INVALID, "sibling has no parent");

        self.parent[c] = p;
        self.next_sibling[c] = sibling.index();
        self.prev_sibling[c] = self.prev_sibling[s];

        if self.prev_sibling[s] != INVALID {
            self.next_sibling[self.prev_sibling[s] as usize] = child.index();
        } else {
            // `sibling` was the first child.
            self.first_child[p as usize] = child.index();
        }
        self.prev_sibling[s] = child.index();
    }

    /// Removes `child` from its current parent.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale or the node has no parent.
    pub fn remove_from_parent(&mut self, child: NodeId) {
        let c = self.validate(child);
        assert!(self.parent[c] != INVALID, "node has no parent");
        self.unlink_from_parent(c);
    }

    // -- Node data API --

    /// Sets the backend instance of a host node, or the container of a root
    /// node.
    pub fn set_payload(&mut self, id: NodeId, payload: P) {
        let i = self.validate(id);
        self.payload[i] = Some(payload);
    }

    /// Sets the key and value declared by a binding node.
    pub fn set_binding(&mut self, id: NodeId, key: BindingKey, value: V) {
        let i = self.validate(id);
        self.binding[i] = Some((key, value));
    }

    /// Replaces the value declared by a binding node, keeping its key.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale or the node declares no binding.
    pub fn set_binding_value(&mut self, id: NodeId, value: V) {
        let i = self.validate(id);
        match &mut self.binding[i] {
            Some((_, slot)) => *slot = value,
            None => panic!("node {id:?} declares no binding"),
        }
    }

    /// Marks a node as the provider of a bound region.
    pub fn set_opens_region(&mut self, id: NodeId, opens: bool) {
        let i = self.validate(id);
        self.opens_region[i] = opens;
    }

    // -- Per-invocation state API --

    /// Stores the token of the node's current render invocation.
    pub fn set_invocation_token(&mut self, id: NodeId, token: InvocationToken) {
        let i = self.validate(id);
        self.token[i] = Some(token);
    }

    /// Moves the node's hook state out for the duration of a render.
    pub(crate) fn take_hooks(&mut self, id: NodeId) -> Hooks {
        let i = self.validate(id);
        core::mem::take(&mut self.hooks[i])
    }

    /// Puts hook state back after a render.
    pub(crate) fn restore_hooks(&mut self, id: NodeId, hooks: Hooks) {
        let i = self.validate(id);
        self.hooks[i] = hooks;
    }

    // -- Internal helpers --

    /// Returns the slot of a live handle.
    fn slot(&self, id: NodeId) -> Option<usize> {
        let i = id.index() as usize;
        (i < self.len as usize && self.live[i] && self.generation[i] == id.generation())
            .then_some(i)
    }

    /// Turns a raw link into a handle.
    fn link(&self, idx: u32) -> Option<NodeId> {
        (idx != INVALID).then(|| NodeId::new(idx, self.generation[idx as usize]))
    }

    /// Panics if the handle is stale; returns its slot otherwise.
    fn validate(&self, id: NodeId) -> usize {
        match self.slot(id) {
            Some(i) => i,
            None => panic!(
                "stale NodeId: {id:?} (current gen: {})",
                self.generation
                    .get(id.index() as usize)
                    .copied()
                    .unwrap_or(u32::MAX)
            ),
        }
    }

    /// Removes slot `i` from its parent's child list.
    fn unlink_from_parent(&mut self, i: usize) {
        let p = self.parent[i];
        let prev = self.prev_sibling[i];
        let next = self.next_sibling[i];

        if prev != INVALID {
            self.next_sibling[prev as usize] = next;
        } else {
            // Was first child.
            self.first_child[p as usize] = next;
        }

        if next != INVALID {
            self.prev_sibling[next as usize] = prev;
        }

        self.parent[i] = INVALID;
        self.prev_sibling[i] = INVALID;
        self.next_sibling[i] = INVALID;
    }
}

impl<P, V: Clone> NodeStore<P, V> {
    /// Returns an iterator over the direct children of a node.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    #[must_use]
    pub fn children(&self, id: NodeId) -> Children<'_, Self> {
        self.validate(id);
        Children::new(self, id)
    }
}

impl<P, V: Clone> NodeTree for NodeStore<P, V> {
    type Payload = P;
    type Value = V;

    fn is_alive(&self, id: NodeId) -> bool {
        self.slot(id).is_some()
    }

    fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.link(self.parent[self.slot(id)?])
    }

    fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.link(self.first_child[self.slot(id)?])
    }

    fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.link(self.next_sibling[self.slot(id)?])
    }

    fn kind(&self, id: NodeId) -> Option<NodeKind> {
        Some(self.kind[self.slot(id)?])
    }

    fn payload(&self, id: NodeId) -> Option<&P> {
        self.payload[self.slot(id)?].as_ref()
    }

    fn binding(&self, id: NodeId) -> Option<(BindingKey, &V)> {
        let (key, value) = self.binding[self.slot(id)?].as_ref()?;
        Some((*key, value))
    }

    fn invocation_token(&self, id: NodeId) -> Option<InvocationToken> {
        self.token[self.slot(id)?]
    }

    fn opens_region(&self, id: NodeId) -> bool {
        self.slot(id).is_some_and(|i| self.opens_region[i])
    }
}
