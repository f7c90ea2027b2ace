// Copyright 2026 the Filament Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON exporter.
//!
//! [`export`] reads recorded bytes from a [`RecorderSink`](super::recorder::RecorderSink)
//! and writes them as a JSON array, one object per event in recording order:
//!
//! ```json
//! { "seq": 0, "name": "Resolve", "args": { "token": 12, "node": "3@0", ... } }
//! ```
//!
//! Nodes are written as `"index@generation"` strings, absent nodes as `null`.

use std::io::{self, Write};

use serde_json::{Value, json};

use filament_core::node::NodeId;

use crate::node_label;
use crate::recorder::{Outcome, RecordedEvent, decode};

/// Exports recorded events as a JSON array.
pub fn export(bytes: &[u8], writer: &mut dyn Write) -> io::Result<()> {
    let mut events: Vec<Value> = Vec::new();

    for (seq, recorded) in decode(bytes).enumerate() {
        let (name, args) = match recorded {
            RecordedEvent::Traverse(e) => (
                "Traverse",
                json!({
                    "start": node_label(e.start),
                    "direction": format!("{:?}", e.direction),
                    "visited": e.visited,
                    "selected": maybe(e.selected),
                }),
            ),
            RecordedEvent::Resolve(e) => {
                let (node, error) = match e.outcome {
                    Outcome::Resolved(node) => (Some(node), None),
                    Outcome::NotBound { operation } => {
                        (None, Some(format!("NotBound({operation})")))
                    }
                    Outcome::NoMatch => (None, Some("NoMatch".to_owned())),
                    Outcome::Unresolved => (None, Some("Unresolved".to_owned())),
                };
                (
                    "Resolve",
                    json!({
                        "token": e.token,
                        "region": maybe(e.region),
                        "node": maybe(node),
                        "error": error,
                        "cached": e.cached,
                    }),
                )
            }
            RecordedEvent::Snapshot(e) => (
                "Snapshot",
                json!({
                    "node": node_label(e.node),
                    "region": maybe(e.region),
                    "entries": e.entries,
                }),
            ),
            RecordedEvent::BridgeRefresh(e) => (
                "BridgeRefresh",
                json!({
                    "node": node_label(e.node),
                    "entries": e.entries,
                }),
            ),
        };
        events.push(json!({
            "seq": seq,
            "name": name,
            "args": args,
        }));
    }

    serde_json::to_writer_pretty(writer, &events)?;
    Ok(())
}

fn maybe(node: Option<NodeId>) -> Value {
    node.map_or(Value::Null, |n| Value::String(node_label(n)))
}
