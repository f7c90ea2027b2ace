// Copyright 2026 the Filament Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors surfaced by introspection calls.
//!
//! Only misuse is an error. A traversal that finds nothing, or a handle whose
//! node has since been destroyed, is an ordinary absent result (`None`).
//! [`require`] turns such an absence into [`Error::NoMatch`] for callers that
//! cannot proceed without a node.

use core::fmt;

use crate::node::{InvocationToken, NodeId};

/// Errors from identity resolution and binding capture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// The operation ran outside any bound region.
    NotBound {
        /// The operation that was attempted.
        operation: &'static str,
    },
    /// A node the caller required was not found.
    NoMatch,
    /// No node in the region carries the invocation's token.
    ///
    /// The engine did not store the token before running the component.
    Unresolved(InvocationToken),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotBound { operation } => write!(
                f,
                "`{operation}` requires a bound region; mount a region provider above this node"
            ),
            Self::NoMatch => f.write_str("no node matched the traversal"),
            Self::Unresolved(token) => write!(
                f,
                "no node in the bound region carries {token:?}; the engine must store the token before rendering"
            ),
        }
    }
}

impl core::error::Error for Error {}

/// Converts an absent traversal result into [`Error::NoMatch`].
pub fn require(node: Option<NodeId>) -> Result<NodeId, Error> {
    node.ok_or(Error::NoMatch)
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn not_bound_message_names_the_operation() {
        let msg = Error::NotBound {
            operation: "current_node",
        }
        .to_string();
        assert!(msg.contains("current_node"), "got: {msg}");
        assert!(msg.contains("bound region"), "got: {msg}");
    }

    #[test]
    fn require_maps_absence_to_no_match() {
        assert_eq!(require(None), Err(Error::NoMatch));
        let id = NodeId::new(1, 0);
        assert_eq!(require(Some(id)), Ok(id));
    }
}
