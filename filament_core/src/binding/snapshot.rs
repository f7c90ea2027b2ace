// Copyright 2026 the Filament Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Capturing the bindings visible at a node.

use alloc::vec::Vec;

use hashbrown::HashSet;

use crate::node::{BindingKey, NodeId, NodeKind, NodeTree};
use crate::traverse::Ancestors;

/// The bindings visible at one node, innermost declaration first.
///
/// Each key appears once, holding the value of its nearest declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BindingSnapshot<V> {
    entries: Vec<(BindingKey, V)>,
}

impl<V> Default for BindingSnapshot<V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<V> BindingSnapshot<V> {
    /// Creates an empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of captured keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether no bindings were visible.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the captured value for `key`.
    #[must_use]
    pub fn get(&self, key: BindingKey) -> Option<&V> {
        self.entries
            .iter()
            .find_map(|(k, v)| (*k == key).then_some(v))
    }

    /// Iterates entries, innermost first.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (BindingKey, &V)> + '_ {
        self.entries.iter().map(|(k, v)| (*k, v))
    }

    /// Iterates keys, innermost first.
    pub fn keys(&self) -> impl DoubleEndedIterator<Item = BindingKey> + '_ {
        self.entries.iter().map(|(k, _)| *k)
    }
}

/// Captures bindings declared by the ancestors of `node`, stopping after
/// `region` if given.
pub(crate) fn capture<T: NodeTree + ?Sized>(
    tree: &T,
    node: NodeId,
    region: Option<NodeId>,
) -> BindingSnapshot<T::Value> {
    let mut seen = HashSet::new();
    let mut entries = Vec::new();
    for ancestor in Ancestors::new(tree, node) {
        if tree.kind(ancestor) == Some(NodeKind::Binding) {
            if let Some((key, value)) = tree.binding(ancestor) {
                // Outer redeclarations of a seen key are shadowed.
                if seen.insert(key) {
                    entries.push((key, value.clone()));
                }
            }
        }
        if Some(ancestor) == region {
            break;
        }
    }
    BindingSnapshot { entries }
}
