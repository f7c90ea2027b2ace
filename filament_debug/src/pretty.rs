// Copyright 2026 the Filament Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr). Nodes are
//! printed as `index@generation`.

use std::io::Write;

use filament_core::node::NodeId;
use filament_core::trace::{BridgeEvent, ResolveEvent, SnapshotEvent, TraceSink, TraverseEvent};
use filament_core::traverse::Direction;

use crate::node_label;

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns its writer.
    pub fn into_writer(self) -> W {
        self.writer
    }
}

fn direction_name(direction: Direction) -> &'static str {
    match direction {
        Direction::Ascending => "up",
        Direction::Descending => "down",
    }
}

fn maybe(node: Option<NodeId>) -> String {
    node.map_or_else(|| "-".to_owned(), node_label)
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_traverse(&mut self, e: &TraverseEvent) {
        let _ = writeln!(
            self.writer,
            "[traverse] {} from {} visited={} selected={}",
            direction_name(e.direction),
            node_label(e.start),
            e.visited,
            maybe(e.selected),
        );
    }

    fn on_resolve(&mut self, e: &ResolveEvent) {
        let cached = if e.cached { " (cached)" } else { "" };
        let _ = match e.outcome {
            Ok(node) => writeln!(
                self.writer,
                "[resolve] token={} region={} node={}{cached}",
                e.token.get(),
                maybe(e.region),
                node_label(node),
            ),
            Err(err) => writeln!(
                self.writer,
                "[resolve] token={} region={} FAILED: {err}",
                e.token.get(),
                maybe(e.region),
            ),
        };
    }

    fn on_snapshot(&mut self, e: &SnapshotEvent) {
        let _ = writeln!(
            self.writer,
            "[snapshot] node={} region={} entries={}",
            node_label(e.node),
            maybe(e.region),
            e.entries,
        );
    }

    fn on_bridge_refresh(&mut self, e: &BridgeEvent) {
        let _ = writeln!(
            self.writer,
            "[bridge] node={} entries={}",
            node_label(e.node),
            e.entries,
        );
    }
}

#[cfg(test)]
mod tests {
    use filament_core::Error;
    use filament_core::node::InvocationToken;

    use super::*;

    fn printed(f: impl FnOnce(&mut PrettyPrintSink<Vec<u8>>)) -> String {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        f(&mut sink);
        String::from_utf8(sink.into_writer()).unwrap()
    }

    #[test]
    fn pretty_print_traverse() {
        let output = printed(|sink| {
            sink.on_traverse(&TraverseEvent {
                start: NodeId::new(3, 0),
                direction: Direction::Ascending,
                visited: 2,
                selected: Some(NodeId::new(1, 4)),
            });
        });
        assert_eq!(output, "[traverse] up from 3@0 visited=2 selected=1@4\n");
    }

    #[test]
    fn pretty_print_failed_resolve() {
        let output = printed(|sink| {
            sink.on_resolve(&ResolveEvent {
                token: InvocationToken::next(),
                region: None,
                outcome: Err(Error::NotBound {
                    operation: "current_node",
                }),
                cached: false,
            });
        });
        assert!(output.starts_with("[resolve]"), "got: {output}");
        assert!(output.contains("region=-"), "got: {output}");
        assert!(output.contains("FAILED: `current_node`"), "got: {output}");
    }

    #[test]
    fn pretty_print_cached_resolve() {
        let output = printed(|sink| {
            sink.on_resolve(&ResolveEvent {
                token: InvocationToken::next(),
                region: Some(NodeId::new(0, 0)),
                outcome: Ok(NodeId::new(5, 2)),
                cached: true,
            });
        });
        assert!(output.contains("node=5@2 (cached)"), "got: {output}");
    }
}
