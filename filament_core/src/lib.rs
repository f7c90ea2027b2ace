// Copyright 2026 the Filament Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Runtime introspection for retained-mode render trees.
//!
//! `filament_core` reads a tree of render nodes owned by an external engine
//! and lets code running inside a node's render pass find its own node, walk
//! the tree, locate host nodes and roots, and carry the bindings visible at a
//! node into a second, independently rooted tree. It is `no_std` compatible
//! (with `alloc`) and never mutates the tree it inspects.
//!
//! # Architecture
//!
//! ```text
//!   Engine: begins render of node N
//!       │
//!       ▼
//!   Invocation::begin(region) ──► token stored on N ──► component logic
//!                                                           │
//!                 ┌─────────────────────────────────────────┘
//!                 ▼
//!   current_node() / snapshot() / nearest_of_kind()
//!                 │
//!                 ▼
//!   traverse() over NodeTree  ──►  Bridge ──► wrapped content, rendered
//!                                             later into another tree
//! ```
//!
//! **[`node`]**: [`NodeId`](node::NodeId) handles, [`NodeKind`](node::NodeKind),
//! binding keys, invocation tokens, and the [`NodeTree`](node::NodeTree)
//! trait engines implement.
//!
//! **[`traverse`]**: Ascending and descending walks with early-exit
//! selection.
//!
//! **[`identity`]**: [`Invocation`](identity::Invocation): resolving the
//! current node without a global "current owner".
//!
//! **[`binding`]**: Binding snapshots and live [`Bridge`](binding::Bridge)s.
//!
//! **[`locate`]**: Nearest host descendant/ancestor and enclosing root.
//!
//! **[`introspect`]**: [`Introspector`](introspect::Introspector), the traced
//! form of every call above.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types,
//! with a zero-overhead [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod binding;
pub mod error;
pub mod identity;
pub mod introspect;
pub mod locate;
pub mod node;
pub mod trace;
pub mod traverse;

pub use error::Error;

#[cfg(test)]
mod fixture;
