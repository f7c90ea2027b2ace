// Copyright 2026 the Filament Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compact binary event recording and decoding.
//!
//! [`RecorderSink`] implements [`TraceSink`] and encodes events into a
//! `Vec<u8>` as fixed-size little-endian records. [`decode`] reads them back
//! as an iterator of [`RecordedEvent`].
//!
//! Invocation tokens are stored as raw integers, and a [`NotBound`] outcome
//! keeps its operation name only when it is one of [`OPERATIONS`].
//!
//! [`NotBound`]: filament_core::Error::NotBound

use filament_core::Error;
use filament_core::node::NodeId;
use filament_core::trace::{BridgeEvent, ResolveEvent, SnapshotEvent, TraceSink, TraverseEvent};
use filament_core::traverse::Direction;

// ---------------------------------------------------------------------------
// Event type discriminants
// ---------------------------------------------------------------------------

const TAG_TRAVERSE: u8 = 1;
const TAG_RESOLVE: u8 = 2;
const TAG_SNAPSHOT: u8 = 3;
const TAG_BRIDGE_REFRESH: u8 = 4;

const OUTCOME_RESOLVED: u8 = 0;
const OUTCOME_NOT_BOUND: u8 = 1;
const OUTCOME_NO_MATCH: u8 = 2;
const OUTCOME_UNRESOLVED: u8 = 3;

/// Operation names a recording can carry for [`Outcome::NotBound`].
pub const OPERATIONS: [&str; 3] = ["current_node", "snapshot", "refresh_bridge"];

/// Stands in for operation names outside [`OPERATIONS`].
pub const UNKNOWN_OPERATION: &str = "unknown";

// ---------------------------------------------------------------------------
// RecorderSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that encodes events into a compact binary buffer.
#[derive(Debug, Default)]
pub struct RecorderSink {
    buf: Vec<u8>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a view of the recorded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the recorder and returns the recorded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    // -- encoding helpers --------------------------------------------------

    fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    fn write_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_count(&mut self, n: usize) {
        self.write_u32(u32::try_from(n).unwrap_or(u32::MAX));
    }

    fn write_node(&mut self, node: NodeId) {
        self.write_u32(node.index());
        self.write_u32(node.generation());
    }

    fn write_option_node(&mut self, node: Option<NodeId>) {
        match node {
            Some(node) => {
                self.write_u8(1);
                self.write_node(node);
            }
            None => {
                self.write_u8(0);
                self.write_node(NodeId::new(0, 0));
            }
        }
    }

    fn write_direction(&mut self, direction: Direction) {
        self.write_u8(match direction {
            Direction::Ascending => 0,
            Direction::Descending => 1,
        });
    }

    fn write_outcome(&mut self, outcome: Result<NodeId, Error>) {
        let (tag, node, operation) = match outcome {
            Ok(node) => (OUTCOME_RESOLVED, node, 0),
            Err(Error::NotBound { operation }) => {
                let code = OPERATIONS
                    .iter()
                    .position(|&name| name == operation)
                    .and_then(|i| u8::try_from(i).ok())
                    .unwrap_or(u8::MAX);
                (OUTCOME_NOT_BOUND, NodeId::new(0, 0), code)
            }
            Err(Error::NoMatch) => (OUTCOME_NO_MATCH, NodeId::new(0, 0), 0),
            Err(Error::Unresolved(_)) => (OUTCOME_UNRESOLVED, NodeId::new(0, 0), 0),
        };
        self.write_u8(tag);
        self.write_node(node);
        self.write_u8(operation);
    }
}

impl TraceSink for RecorderSink {
    fn on_traverse(&mut self, e: &TraverseEvent) {
        self.write_u8(TAG_TRAVERSE);
        self.write_node(e.start);
        self.write_direction(e.direction);
        self.write_u32(e.visited);
        self.write_option_node(e.selected);
    }

    fn on_resolve(&mut self, e: &ResolveEvent) {
        self.write_u8(TAG_RESOLVE);
        self.write_u64(e.token.get());
        self.write_option_node(e.region);
        self.write_outcome(e.outcome);
        self.write_u8(u8::from(e.cached));
    }

    fn on_snapshot(&mut self, e: &SnapshotEvent) {
        self.write_u8(TAG_SNAPSHOT);
        self.write_node(e.node);
        self.write_option_node(e.region);
        self.write_count(e.entries);
    }

    fn on_bridge_refresh(&mut self, e: &BridgeEvent) {
        self.write_u8(TAG_BRIDGE_REFRESH);
        self.write_node(e.node);
        self.write_count(e.entries);
    }
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// How a recorded resolution ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The invocation's node.
    Resolved(NodeId),
    /// [`Error::NotBound`].
    NotBound {
        /// The attempted operation, or [`UNKNOWN_OPERATION`].
        operation: &'static str,
    },
    /// [`Error::NoMatch`].
    NoMatch,
    /// [`Error::Unresolved`].
    Unresolved,
}

/// A decoded [`ResolveEvent`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecordedResolve {
    /// Raw invocation token.
    pub token: u64,
    /// Region root the invocation ran in.
    pub region: Option<NodeId>,
    /// How resolution ended.
    pub outcome: Outcome,
    /// Whether the invocation's cache answered.
    pub cached: bool,
}

/// A decoded event from a binary recording.
#[derive(Clone, Copy, Debug)]
pub enum RecordedEvent {
    /// A [`TraverseEvent`].
    Traverse(TraverseEvent),
    /// A [`ResolveEvent`].
    Resolve(RecordedResolve),
    /// A [`SnapshotEvent`].
    Snapshot(SnapshotEvent),
    /// A [`BridgeEvent`].
    BridgeRefresh(BridgeEvent),
}

/// Decodes a byte slice produced by [`RecorderSink`] into an iterator of
/// [`RecordedEvent`].
///
/// Decoding stops at the first unknown tag or truncated record.
pub fn decode(bytes: &[u8]) -> DecodeIter<'_> {
    DecodeIter {
        data: bytes,
        pos: 0,
    }
}

/// Iterator over decoded events.
#[derive(Debug)]
pub struct DecodeIter<'a> {
    data: &'a [u8],
    pos: usize,
}

impl DecodeIter<'_> {
    fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn read_u8(&mut self) -> Option<u8> {
        if self.remaining() < 1 {
            return None;
        }
        let v = self.data[self.pos];
        self.pos += 1;
        Some(v)
    }

    fn read_u32(&mut self) -> Option<u32> {
        if self.remaining() < 4 {
            return None;
        }
        let v = u32::from_le_bytes(self.data[self.pos..self.pos + 4].try_into().ok()?);
        self.pos += 4;
        Some(v)
    }

    fn read_u64(&mut self) -> Option<u64> {
        if self.remaining() < 8 {
            return None;
        }
        let v = u64::from_le_bytes(self.data[self.pos..self.pos + 8].try_into().ok()?);
        self.pos += 8;
        Some(v)
    }

    fn read_count(&mut self) -> Option<usize> {
        usize::try_from(self.read_u32()?).ok()
    }

    fn read_node(&mut self) -> Option<NodeId> {
        Some(NodeId::new(self.read_u32()?, self.read_u32()?))
    }

    fn read_option_node(&mut self) -> Option<Option<NodeId>> {
        let present = self.read_u8()?;
        let node = self.read_node()?;
        Some((present != 0).then_some(node))
    }

    fn read_direction(&mut self) -> Option<Direction> {
        Some(match self.read_u8()? {
            0 => Direction::Ascending,
            _ => Direction::Descending,
        })
    }

    fn read_outcome(&mut self) -> Option<Outcome> {
        let tag = self.read_u8()?;
        let node = self.read_node()?;
        let operation = self.read_u8()?;
        Some(match tag {
            OUTCOME_RESOLVED => Outcome::Resolved(node),
            OUTCOME_NOT_BOUND => Outcome::NotBound {
                operation: OPERATIONS
                    .get(usize::from(operation))
                    .copied()
                    .unwrap_or(UNKNOWN_OPERATION),
            },
            OUTCOME_NO_MATCH => Outcome::NoMatch,
            _ => Outcome::Unresolved,
        })
    }

    fn decode_traverse(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Traverse(TraverseEvent {
            start: self.read_node()?,
            direction: self.read_direction()?,
            visited: self.read_u32()?,
            selected: self.read_option_node()?,
        }))
    }

    fn decode_resolve(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Resolve(RecordedResolve {
            token: self.read_u64()?,
            region: self.read_option_node()?,
            outcome: self.read_outcome()?,
            cached: self.read_u8()? != 0,
        }))
    }

    fn decode_snapshot(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Snapshot(SnapshotEvent {
            node: self.read_node()?,
            region: self.read_option_node()?,
            entries: self.read_count()?,
        }))
    }

    fn decode_bridge_refresh(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::BridgeRefresh(BridgeEvent {
            node: self.read_node()?,
            entries: self.read_count()?,
        }))
    }
}

impl Iterator for DecodeIter<'_> {
    type Item = RecordedEvent;

    fn next(&mut self) -> Option<RecordedEvent> {
        let tag = self.read_u8()?;
        match tag {
            TAG_TRAVERSE => self.decode_traverse(),
            TAG_RESOLVE => self.decode_resolve(),
            TAG_SNAPSHOT => self.decode_snapshot(),
            TAG_BRIDGE_REFRESH => self.decode_bridge_refresh(),
            _ => {
                // Unknown tag: stop decoding.
                self.pos = self.data.len();
                None
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use filament_core::node::InvocationToken;

    use super::*;

    fn node(i: u32) -> NodeId {
        NodeId::new(i, 1)
    }

    #[test]
    fn resolve_outcomes_survive_recording() {
        let token = InvocationToken::next();
        let mut rec = RecorderSink::new();
        for (outcome, cached) in [
            (Ok(node(4)), true),
            (
                Err(Error::NotBound {
                    operation: "snapshot",
                }),
                false,
            ),
            (
                Err(Error::NotBound {
                    operation: "something_else",
                }),
                false,
            ),
            (Err(Error::Unresolved(token)), false),
        ] {
            rec.on_resolve(&ResolveEvent {
                token,
                region: Some(node(0)),
                outcome,
                cached,
            });
        }

        let outcomes: Vec<_> = decode(rec.as_bytes())
            .map(|e| match e {
                RecordedEvent::Resolve(r) => {
                    assert_eq!(r.token, token.get());
                    assert_eq!(r.region, Some(node(0)));
                    (r.outcome, r.cached)
                }
                other => panic!("unexpected {other:?}"),
            })
            .collect();
        assert_eq!(
            outcomes,
            vec![
                (Outcome::Resolved(node(4)), true),
                (
                    Outcome::NotBound {
                        operation: "snapshot"
                    },
                    false
                ),
                (
                    Outcome::NotBound {
                        operation: UNKNOWN_OPERATION
                    },
                    false
                ),
                (Outcome::Unresolved, false),
            ]
        );
    }

    #[test]
    fn mixed_events_decode_in_order() {
        let mut rec = RecorderSink::new();
        rec.on_traverse(&TraverseEvent {
            start: node(1),
            direction: Direction::Descending,
            visited: 3,
            selected: None,
        });
        rec.on_snapshot(&SnapshotEvent {
            node: node(2),
            region: None,
            entries: 2,
        });
        rec.on_bridge_refresh(&BridgeEvent {
            node: node(2),
            entries: 2,
        });

        let events: Vec<_> = decode(rec.as_bytes()).collect();
        assert_eq!(events.len(), 3);
        assert!(matches!(
            events[0],
            RecordedEvent::Traverse(TraverseEvent {
                direction: Direction::Descending,
                visited: 3,
                selected: None,
                ..
            })
        ));
        assert!(matches!(
            events[1],
            RecordedEvent::Snapshot(SnapshotEvent {
                region: None,
                entries: 2,
                ..
            })
        ));
        assert!(matches!(
            events[2],
            RecordedEvent::BridgeRefresh(BridgeEvent { entries: 2, .. })
        ));
    }

    #[test]
    fn truncated_recording_stops_cleanly() {
        let mut rec = RecorderSink::new();
        rec.on_bridge_refresh(&BridgeEvent {
            node: node(0),
            entries: 1,
        });
        rec.on_bridge_refresh(&BridgeEvent {
            node: node(1),
            entries: 1,
        });
        let bytes = rec.into_bytes();
        let cut = &bytes[..bytes.len() - 2];
        assert_eq!(decode(cut).count(), 1);
    }

    #[test]
    fn unknown_tag_stops_decoding() {
        assert_eq!(decode(&[0xff, 1, 2, 3]).count(), 0);
    }
}
