// Copyright 2026 the Filament Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Events raised by components rendering in the reference engine.

use std::cell::RefCell;
use std::rc::Rc;

use filament_core::node::BindingKey;
use filament_core::trace::{BridgeEvent, ResolveEvent, SnapshotEvent, TraceSink, TraverseEvent};
use filament_debug::recorder::{Outcome, RecordedEvent, RecorderSink, decode};
use filament_nil::{Component, Element, Root};

/// Lets the test read a recorder the tree owns.
#[derive(Debug)]
struct Shared(Rc<RefCell<RecorderSink>>);

impl TraceSink for Shared {
    fn on_traverse(&mut self, e: &TraverseEvent) {
        self.0.borrow_mut().on_traverse(e);
    }

    fn on_resolve(&mut self, e: &ResolveEvent) {
        self.0.borrow_mut().on_resolve(e);
    }

    fn on_snapshot(&mut self, e: &SnapshotEvent) {
        self.0.borrow_mut().on_snapshot(e);
    }

    fn on_bridge_refresh(&mut self, e: &BridgeEvent) {
        self.0.borrow_mut().on_bridge_refresh(e);
    }
}

#[test]
fn component_calls_are_recorded() {
    let key = BindingKey::new();
    let recorder = Rc::new(RefCell::new(RecorderSink::new()));
    let test = Component::<&'static str, i32>::new(|cx| {
        let node = cx.current_node().expect("inside a region");
        assert_eq!(cx.current_node(), Ok(node));
        let snapshot = cx.snapshot().expect("inside a region");
        assert_eq!(snapshot.len(), 1);
        Element::empty()
    });

    let mut root = Root::new();
    root.set_trace_sink(Box::new(Shared(Rc::clone(&recorder))));
    root.render(Element::region(vec![Element::provide(
        key,
        1,
        vec![test.element()],
    )]));

    let recorder = recorder.borrow();
    let events: Vec<RecordedEvent> = decode(recorder.as_bytes()).collect();
    let cached: Vec<bool> = events
        .iter()
        .filter_map(|e| match e {
            RecordedEvent::Resolve(r) => {
                assert!(matches!(r.outcome, Outcome::Resolved(_)));
                Some(r.cached)
            }
            _ => None,
        })
        .collect();
    // The snapshot resolves once more, from the cache.
    assert_eq!(cached, vec![false, true, true]);
    assert!(matches!(
        events.last(),
        Some(RecordedEvent::Snapshot(SnapshotEvent { entries: 1, .. }))
    ));
}

#[test]
fn bridge_refreshes_are_recorded() {
    let key = BindingKey::new();
    let recorder = Rc::new(RefCell::new(RecorderSink::new()));
    let test = Component::<&'static str, i32>::new(|cx| {
        let _bridge = cx.use_bridge().expect("inside a region");
        Element::empty()
    });

    let mut root = Root::new();
    root.set_trace_sink(Box::new(Shared(Rc::clone(&recorder))));
    let tree = |value| {
        Element::region(vec![Element::provide(
            key,
            value,
            vec![test.element()],
        )])
    };
    root.render(tree(1));
    root.render(tree(2));

    let recorder = recorder.borrow();
    let refreshes = decode(recorder.as_bytes())
        .filter(|e| matches!(e, RecordedEvent::BridgeRefresh(BridgeEvent { entries: 1, .. })))
        .count();
    assert_eq!(refreshes, 2);
}

#[test]
fn unbound_resolution_is_recorded() {
    let recorder = Rc::new(RefCell::new(RecorderSink::new()));
    let test = Component::<&'static str, i32>::new(|cx| {
        assert!(cx.current_node().is_err());
        Element::empty()
    });

    let mut root = Root::new();
    root.set_trace_sink(Box::new(Shared(Rc::clone(&recorder))));
    root.render(test.element());

    let recorder = recorder.borrow();
    let events: Vec<RecordedEvent> = decode(recorder.as_bytes()).collect();
    assert_eq!(events.len(), 1);
    assert!(matches!(
        events[0],
        RecordedEvent::Resolve(r) if r.outcome == Outcome::NotBound { operation: "current_node" }
    ));
}
