// Copyright 2026 the Filament Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A hand-built tree for unit tests.

use alloc::vec::Vec;

use crate::node::{BindingKey, InvocationToken, NodeId, NodeKind, NodeTree};

#[derive(Debug)]
struct Slot {
    parent: Option<u32>,
    first_child: Option<u32>,
    next_sibling: Option<u32>,
    kind: NodeKind,
    payload: Option<&'static str>,
    binding: Option<(BindingKey, i32)>,
    token: Option<InvocationToken>,
    region: bool,
    alive: bool,
}

/// Append-only tree whose payloads are names and binding values are `i32`.
#[derive(Debug)]
pub(crate) struct Fixture {
    slots: Vec<Slot>,
}

impl Fixture {
    pub(crate) fn new() -> Self {
        let mut t = Self { slots: Vec::new() };
        t.alloc(NodeKind::Root);
        t
    }

    pub(crate) fn root(&self) -> NodeId {
        NodeId::new(0, 0)
    }

    pub(crate) fn composite(&mut self, parent: NodeId) -> NodeId {
        self.child(parent, NodeKind::Composite)
    }

    pub(crate) fn host(&mut self, parent: NodeId, name: &'static str) -> NodeId {
        let id = self.child(parent, NodeKind::Host);
        self.slots[id.idx as usize].payload = Some(name);
        id
    }

    pub(crate) fn detached_host(&mut self, name: &'static str) -> NodeId {
        let id = self.alloc(NodeKind::Host);
        self.slots[id.idx as usize].payload = Some(name);
        id
    }

    pub(crate) fn add_binding(&mut self, parent: NodeId, key: BindingKey, value: i32) -> NodeId {
        let id = self.child(parent, NodeKind::Binding);
        self.slots[id.idx as usize].binding = Some((key, value));
        id
    }

    pub(crate) fn region(&mut self, parent: NodeId) -> NodeId {
        let id = self.composite(parent);
        self.slots[id.idx as usize].region = true;
        id
    }

    pub(crate) fn set_value(&mut self, id: NodeId, value: i32) {
        if let Some((_, v)) = &mut self.slots[id.idx as usize].binding {
            *v = value;
        }
    }

    pub(crate) fn set_token(&mut self, id: NodeId, token: InvocationToken) {
        self.slots[id.idx as usize].token = Some(token);
    }

    pub(crate) fn kill(&mut self, id: NodeId) {
        self.slots[id.idx as usize].alive = false;
    }

    fn alloc(&mut self, kind: NodeKind) -> NodeId {
        let idx = u32::try_from(self.slots.len()).unwrap();
        self.slots.push(Slot {
            parent: None,
            first_child: None,
            next_sibling: None,
            kind,
            payload: None,
            binding: None,
            token: None,
            region: false,
            alive: true,
        });
        NodeId::new(idx, 0)
    }

    fn child(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let id = self.alloc(kind);
        let p = parent.idx;
        self.slots[id.idx as usize].parent = Some(p);
        match self.slots[p as usize].first_child {
            None => self.slots[p as usize].first_child = Some(id.idx),
            Some(mut last) => {
                while let Some(next) = self.slots[last as usize].next_sibling {
                    last = next;
                }
                self.slots[last as usize].next_sibling = Some(id.idx);
            }
        }
        id
    }

    fn live(&self, id: NodeId) -> Option<&Slot> {
        self.slots
            .get(id.idx as usize)
            .filter(|s| s.alive && id.generation == 0)
    }

    fn handle(&self, idx: Option<u32>) -> Option<NodeId> {
        idx.map(|i| NodeId::new(i, 0))
            .filter(|&id| self.live(id).is_some())
    }
}

impl NodeTree for Fixture {
    type Payload = &'static str;
    type Value = i32;

    fn is_alive(&self, id: NodeId) -> bool {
        self.live(id).is_some()
    }

    fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.handle(self.live(id)?.parent)
    }

    fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.handle(self.live(id)?.first_child)
    }

    fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.handle(self.live(id)?.next_sibling)
    }

    fn kind(&self, id: NodeId) -> Option<NodeKind> {
        Some(self.live(id)?.kind)
    }

    fn payload(&self, id: NodeId) -> Option<&&'static str> {
        self.live(id)?.payload.as_ref()
    }

    fn binding(&self, id: NodeId) -> Option<(BindingKey, &i32)> {
        let (key, value) = self.live(id)?.binding.as_ref()?;
        Some((*key, value))
    }

    fn invocation_token(&self, id: NodeId) -> Option<InvocationToken> {
        self.live(id)?.token
    }

    fn opens_region(&self, id: NodeId) -> bool {
        self.live(id).is_some_and(|s| s.region)
    }
}
