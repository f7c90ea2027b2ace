// Copyright 2026 the Filament Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Re-declaring captured bindings around content for another tree.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;

use super::snapshot::BindingSnapshot;
use crate::node::BindingKey;

/// A reusable wrapper that re-declares a captured set of bindings.
///
/// Clones share one live snapshot: after [`refresh`](Self::refresh), every
/// clone wraps with the new values. Engines should call [`wrap`](Self::wrap)
/// each time the bridged content renders rather than once up front, so the
/// content never sees a stale value.
#[derive(Debug)]
pub struct Bridge<V> {
    live: Rc<RefCell<BindingSnapshot<V>>>,
}

impl<V> Clone for Bridge<V> {
    fn clone(&self) -> Self {
        Self {
            live: Rc::clone(&self.live),
        }
    }
}

impl<V> Default for Bridge<V> {
    fn default() -> Self {
        Self::new(BindingSnapshot::default())
    }
}

impl<V> Bridge<V> {
    /// Creates a bridge over `snapshot`.
    #[must_use]
    pub fn new(snapshot: BindingSnapshot<V>) -> Self {
        Self {
            live: Rc::new(RefCell::new(snapshot)),
        }
    }

    /// Replaces the live snapshot seen by this bridge and all its clones.
    pub fn refresh(&self, snapshot: BindingSnapshot<V>) {
        *self.live.borrow_mut() = snapshot;
    }

    /// Returns the number of declarations the bridge re-creates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.live.borrow().len()
    }

    /// Returns whether the bridge re-creates nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live.borrow().is_empty()
    }

    /// Returns whether two bridges share the same live snapshot.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.live, &other.live)
    }
}

impl<V: Clone> Bridge<V> {
    /// Returns a copy of the current live snapshot.
    #[must_use]
    pub fn snapshot(&self) -> BindingSnapshot<V> {
        self.live.borrow().clone()
    }

    /// Wraps `content` in one declaration per captured binding.
    ///
    /// `declare(key, value, inner)` must return `inner` nested inside a
    /// declaration of `key = value`. The innermost captured binding is
    /// declared directly around `content` and the outermost ends up outside,
    /// reproducing the resolution order of the original chain.
    pub fn wrap<C>(&self, content: C, mut declare: impl FnMut(BindingKey, V, C) -> C) -> C {
        // Copy out first: `declare` may render and refresh this bridge.
        let entries: Vec<(BindingKey, V)> = self
            .live
            .borrow()
            .iter()
            .map(|(k, v)| (k, v.clone()))
            .collect();
        entries
            .into_iter()
            .fold(content, |inner, (key, value)| declare(key, value, inner))
    }
}
