// Copyright 2026 the Filament Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Node data model.
//!
//! A *node* is one position in a render tree maintained by an external
//! engine. Each node has:
//!
//! - An identity ([`NodeId`]): a generational handle that reads as absent
//!   once the node is destroyed, so handles held across a suspension never
//!   alias a newer node.
//! - Topology: parent, first-child, and next-sibling links forming an
//!   ordered tree.
//! - A [`NodeKind`], plus a payload for host nodes and a `(key, value)` pair
//!   for binding nodes.
//! - Per-invocation state, of which introspection reads exactly one thing:
//!   the [`InvocationToken`] of the node's latest render.
//!
//! The engine exposes all of this through [`NodeTree`]. Nothing in this
//! crate mutates a tree.

mod id;
mod tree;

pub use id::{BindingKey, InvocationToken, NodeId};
pub use tree::{NodeKind, NodeTree};
