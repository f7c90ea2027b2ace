// Copyright 2026 the Filament Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording, pretty-printing, and JSON export for filament diagnostics.
//!
//! This crate provides [`TraceSink`](filament_core::trace::TraceSink)
//! implementations for development and post-mortem analysis:
//!
//! - [`pretty::PrettyPrintSink`]: human-readable one-line-per-event output.
//! - [`recorder::RecorderSink`]: compact binary recording with
//!   [`recorder::decode`] for playback.
//! - [`json::export`]: writes recorded bytes as a JSON array.

pub mod json;
pub mod pretty;
pub mod recorder;

/// Formats a node handle as `index@generation`.
pub(crate) fn node_label(node: filament_core::node::NodeId) -> String {
    format!("{}@{}", node.index(), node.generation())
}
