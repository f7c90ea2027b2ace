// Copyright 2026 the Filament Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Node, binding, and invocation identity types.

use core::fmt;
use core::num::NonZeroU64;
use core::sync::atomic::{AtomicU64, Ordering};

/// A handle to a node in an engine-owned arena.
///
/// Contains both a slot index and a generation counter so that stale handles
/// can be detected after a node is destroyed and the slot is reused. A
/// `NodeId` never owns the node it names.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    /// Slot index into the engine's arrays.
    pub(crate) idx: u32,
    /// Generation counter; must match the engine's generation for this slot.
    pub(crate) generation: u32,
}

impl NodeId {
    /// Builds a handle from its raw parts.
    ///
    /// Engines mint handles with this; introspection code only ever copies
    /// the handles an engine hands out.
    #[inline]
    #[must_use]
    pub const fn new(index: u32, generation: u32) -> Self {
        Self {
            idx: index,
            generation,
        }
    }

    /// Returns the raw slot index.
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.idx
    }

    /// Returns the generation counter.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({}@gen{})", self.idx, self.generation)
    }
}

static NEXT_BINDING_KEY: AtomicU64 = AtomicU64::new(1);
static NEXT_TOKEN: AtomicU64 = AtomicU64::new(1);

fn next_nonzero(counter: &AtomicU64) -> NonZeroU64 {
    // Counters start at 1 and would need 2^64 allocations to wrap.
    let raw = counter.fetch_add(1, Ordering::Relaxed);
    NonZeroU64::new(raw).unwrap_or(NonZeroU64::MIN)
}

/// Identity of one logical binding channel (a theme, a locale, a store...).
///
/// Keys compare by identity: every call to [`BindingKey::new`] yields a key
/// distinct from all others in the process.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BindingKey(NonZeroU64);

impl BindingKey {
    /// Allocates a fresh key.
    #[must_use]
    #[expect(
        clippy::new_without_default,
        reason = "each call mints a distinct identity"
    )]
    pub fn new() -> Self {
        Self(next_nonzero(&NEXT_BINDING_KEY))
    }

    /// Returns the raw key value (for diagnostics only).
    #[inline]
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0.get()
    }
}

impl fmt::Debug for BindingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BindingKey({})", self.0)
    }
}

/// A token minted once per render invocation.
///
/// The engine stores the token in the invoked node's per-invocation state;
/// the resolver finds the node again by matching it. Tokens are unique across
/// every tree and thread in the process.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct InvocationToken(NonZeroU64);

impl InvocationToken {
    /// Allocates a fresh token.
    #[must_use]
    pub fn next() -> Self {
        Self(next_nonzero(&NEXT_TOKEN))
    }

    /// Returns the raw token value (for diagnostics only).
    #[inline]
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0.get()
    }
}

impl fmt::Debug for InvocationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "InvocationToken({})", self.0)
    }
}
