// Copyright 2026 the Filament Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Independent trees rendering on separate threads at the same time.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::{Arc, Barrier};
use std::thread;

use filament_core::node::{BindingKey, NodeId};
use filament_nil::{Component, Element, Root};

type El = Element<u32, u32>;

/// Renders `width` identical components in a region a few times and checks
/// each one resolved to its own position on every pass.
fn render_on_this_thread(width: usize, passes: usize, barrier: &Barrier) -> usize {
    let key = BindingKey::new();
    let seen: Rc<RefCell<Vec<(NodeId, Option<u32>)>>> = Rc::new(RefCell::new(Vec::new()));
    let probe = {
        let seen = Rc::clone(&seen);
        Component::<u32, u32>::new(move |cx| {
            let node = cx.current_node().expect("inside a region");
            seen.borrow_mut().push((node, cx.read(key)));
            El::host(0)
        })
    };

    let mut root = Root::new();
    let mut checked = 0;
    barrier.wait();
    for pass in 0..passes {
        let value = u32::try_from(pass).expect("few passes");
        root.render(El::region(vec![El::provide(
            key,
            value,
            (0..width).map(|_| probe.element()).collect(),
        )]));

        let region = root.store().children(root.node()).next().expect("region");
        let decl = root.store().children(region).next().expect("declaration");
        let positions: Vec<(NodeId, Option<u32>)> = root
            .store()
            .children(decl)
            .map(|node| (node, Some(value)))
            .collect();
        assert_eq!(*seen.borrow(), positions);
        seen.borrow_mut().clear();
        checked += positions.len();
    }
    checked
}

#[test]
fn trees_on_different_threads_resolve_independently() {
    const THREADS: usize = 4;
    const WIDTH: usize = 8;
    const PASSES: usize = 16;

    let barrier = Arc::new(Barrier::new(THREADS));
    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || render_on_this_thread(WIDTH, PASSES, &barrier))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().expect("render thread"), WIDTH * PASSES);
    }
}
