// Copyright 2026 the Filament Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A minimal retained-mode engine that renders into nothing.
//!
//! `filament_nil` owns its nodes in an arena, mounts [`Element`]
//! descriptions into it, and runs [`Component`]s with a [`Scope`] that
//! exposes everything `filament_core` can answer from inside a render. Trees
//! hold no backend resources: a host node's payload is whatever value the
//! caller chose.
//!
//! ```
//! use filament_nil::{Component, Element, Root};
//!
//! let probe = Component::<&str, i32>::new(|cx| {
//!     assert!(cx.current_node().is_ok(), "inside a region");
//!     Element::host("leaf")
//! });
//!
//! let mut root: Root<&str, i32> = Root::new();
//! root.render(Element::region(vec![probe.element()]));
//! assert_eq!(root.head(), Some(&"leaf"));
//! ```
//!
//! Several [`Root`]s can exist side by side, including inside one another's
//! components; a [`Bridge`](filament_core::binding::Bridge) obtained from
//! [`Scope::use_bridge`] carries bindings from one to the next.
//!
//! # Crate features
//!
//! - `trace` (disabled by default): Forwards to `filament_core/trace`, so
//!   sinks installed with [`Root::set_trace_sink`] receive events.

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

mod element;
mod root;
mod scope;
mod store;

pub use element::{Component, Element};
pub use root::Root;
pub use scope::Scope;
pub use store::NodeStore;
