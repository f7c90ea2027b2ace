// Copyright 2026 the Filament Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for introspection calls.
//!
//! This module provides a [`TraceSink`] trait with one method per kind of
//! introspection call. All method bodies default to no-ops, so implementing
//! only the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing (zero overhead). When
//! **on**, each method performs a single `Option` branch before dispatching.
//!
//! Sinks for development use (pretty-printing, recording, JSON export) live
//! in `filament_debug`.

use crate::error::Error;
use crate::node::{InvocationToken, NodeId};
use crate::traverse::Direction;

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted when a traversal finishes.
#[derive(Clone, Copy, Debug)]
pub struct TraverseEvent {
    /// Node the walk started from (never itself visited).
    pub start: NodeId,
    /// Walk direction.
    pub direction: Direction,
    /// Number of nodes handed to the visitor.
    pub visited: u32,
    /// Node the visitor selected, if any.
    pub selected: Option<NodeId>,
}

/// Emitted when an invocation resolves (or fails to resolve) its node.
#[derive(Clone, Copy, Debug)]
pub struct ResolveEvent {
    /// The invocation's token.
    pub token: InvocationToken,
    /// Root of the bound region the invocation runs in.
    pub region: Option<NodeId>,
    /// Resolved node, or the error surfaced to the caller.
    pub outcome: Result<NodeId, Error>,
    /// Whether the answer came from the invocation's cache.
    pub cached: bool,
}

/// Emitted when a binding snapshot is taken.
#[derive(Clone, Copy, Debug)]
pub struct SnapshotEvent {
    /// Node whose visible bindings were captured.
    pub node: NodeId,
    /// Region root the ascent stopped at, if any.
    pub region: Option<NodeId>,
    /// Number of distinct keys captured.
    pub entries: usize,
}

/// Emitted when a bridge's live snapshot is replaced.
#[derive(Clone, Copy, Debug)]
pub struct BridgeEvent {
    /// Node whose bindings now back the bridge.
    pub node: NodeId,
    /// Number of declarations the bridge now re-creates.
    pub entries: usize,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from introspection calls.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called after every traversal.
    fn on_traverse(&mut self, e: &TraverseEvent) {
        _ = e;
    }

    /// Called after every identity resolution attempt.
    fn on_resolve(&mut self, e: &ResolveEvent) {
        _ = e;
    }

    /// Called after a binding snapshot is taken.
    fn on_snapshot(&mut self, e: &SnapshotEvent) {
        _ = e;
    }

    /// Called after a bridge is refreshed.
    fn on_bridge_refresh(&mut self, e: &BridgeEvent) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer from an optional sink.
    #[inline]
    #[must_use]
    pub fn from_option(sink: Option<&'a mut dyn TraceSink>) -> Self {
        match sink {
            Some(sink) => Self::new(sink),
            None => Self::none(),
        }
    }

    /// Emits a [`TraverseEvent`].
    #[inline]
    pub fn traverse(&mut self, e: &TraverseEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_traverse(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`ResolveEvent`].
    #[inline]
    pub fn resolve(&mut self, e: &ResolveEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_resolve(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`SnapshotEvent`].
    #[inline]
    pub fn snapshot(&mut self, e: &SnapshotEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_snapshot(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`BridgeEvent`].
    #[inline]
    pub fn bridge_refresh(&mut self, e: &BridgeEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_bridge_refresh(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
