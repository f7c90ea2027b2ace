// Copyright 2026 the Filament Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Carrying bindings from one tree into another.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use filament_core::binding::Bridge;
use filament_core::node::{BindingKey, NodeKind, NodeTree};
use filament_nil::{Component, Element, Root};

type El = Element<&'static str, i32>;
type Comp = Component<&'static str, i32>;
type Tree = Root<&'static str, i32>;

/// Reads `key` wherever it is rendered.
fn reader(key: BindingKey, seen: &Rc<Cell<Option<i32>>>) -> Comp {
    let seen = Rc::clone(seen);
    Comp::new(move |cx| {
        seen.set(cx.read(key));
        El::empty()
    })
}

/// Renders `content` into `secondary`, wrapped in this component's bridge,
/// and keeps the bridge in `kept`.
fn portal(
    secondary: &Rc<RefCell<Tree>>,
    content: Comp,
    kept: &Rc<RefCell<Option<Bridge<i32>>>>,
) -> Comp {
    let secondary = Rc::clone(secondary);
    let kept = Rc::clone(kept);
    Comp::new(move |cx| {
        let bridge = cx.use_bridge().expect("inside a region");
        *kept.borrow_mut() = Some(bridge.clone());
        secondary
            .borrow_mut()
            .render(El::bridge(bridge, content.element()));
        El::empty()
    })
}

#[test]
fn innermost_declaration_wins_across_trees() {
    let x = BindingKey::new();
    let seen = Rc::new(Cell::new(None));
    let secondary = Rc::new(RefCell::new(Tree::new()));
    let kept = Rc::new(RefCell::new(None));
    let portal = portal(&secondary, reader(x, &seen), &kept);

    let mut primary = Tree::new();
    primary.render(El::region(vec![El::provide(
        x,
        1,
        vec![El::provide(x, 2, vec![portal.element()])],
    )]));

    assert_eq!(seen.get(), Some(2));
    let bridge = kept.borrow().clone().expect("portal rendered");
    let snapshot = bridge.snapshot();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot.get(x), Some(&2));

    // One declaration per distinct key lands in the secondary tree.
    let secondary = secondary.borrow();
    let store = secondary.store();
    let declarations = filament_core::traverse::Descendants::new(store, secondary.node())
        .filter(|&n| store.kind(n) == Some(NodeKind::Binding))
        .count();
    assert_eq!(declarations, 1);
}

#[test]
fn bridged_content_follows_value_changes() {
    let x = BindingKey::new();
    let seen = Rc::new(Cell::new(None));
    let secondary = Rc::new(RefCell::new(Tree::new()));
    let kept = Rc::new(RefCell::new(None));
    let portal = portal(&secondary, reader(x, &seen), &kept);
    let tree = |value| El::region(vec![El::provide(x, value, vec![portal.element()])]);

    let mut primary = Tree::new();
    primary.render(tree(2));
    assert_eq!(seen.get(), Some(2));
    let first = kept.borrow().clone().expect("portal rendered");

    primary.render(tree(3));
    assert_eq!(seen.get(), Some(3));

    // The same bridge is refreshed in place, so older clones see the change.
    let second = kept.borrow().clone().expect("portal rendered");
    assert!(first.ptr_eq(&second));
    assert_eq!(first.snapshot().get(x), Some(&3));
}

#[test]
fn refreshed_bridge_shows_up_on_next_secondary_render() {
    let x = BindingKey::new();
    let seen = Rc::new(Cell::new(None));
    let kept: Rc<RefCell<Option<Bridge<i32>>>> = Rc::new(RefCell::new(None));
    let holder = {
        let kept = Rc::clone(&kept);
        Comp::new(move |cx| {
            *kept.borrow_mut() = Some(cx.use_bridge().expect("inside a region"));
            El::empty()
        })
    };
    let read_x = reader(x, &seen);
    let tree = |value| El::region(vec![El::provide(x, value, vec![holder.element()])]);

    let mut primary = Tree::new();
    let mut secondary = Tree::new();
    primary.render(tree(5));
    let bridge = kept.borrow().clone().expect("holder rendered");

    secondary.render(El::bridge(bridge.clone(), read_x.element()));
    assert_eq!(seen.get(), Some(5));

    // The primary render refreshes the bridge; the secondary tree picks the
    // new value up the next time it renders.
    primary.render(tree(6));
    assert_eq!(seen.get(), Some(5));
    secondary.render(El::bridge(bridge, read_x.element()));
    assert_eq!(seen.get(), Some(6));
}

#[test]
fn declarations_outside_the_region_stay_behind() {
    let inside = BindingKey::new();
    let outside = BindingKey::new();
    let seen_inside = Rc::new(Cell::new(None));
    let seen_outside = Rc::new(Cell::new(None));
    let secondary = Rc::new(RefCell::new(Tree::new()));
    let kept = Rc::new(RefCell::new(None));

    let both = {
        let read_inside = reader(inside, &seen_inside);
        let read_outside = reader(outside, &seen_outside);
        Comp::new(move |_| El::Fragment(vec![read_inside.element(), read_outside.element()]))
    };
    let portal = portal(&secondary, both, &kept);

    let mut primary = Tree::new();
    primary.render(El::provide(
        outside,
        9,
        vec![El::region(vec![El::provide(inside, 4, vec![portal.element()])])],
    ));

    assert_eq!(seen_inside.get(), Some(4));
    assert_eq!(seen_outside.get(), None);
}

#[test]
fn snapshot_is_idempotent_and_innermost_first() {
    let a = BindingKey::new();
    let b = BindingKey::new();
    let checked = Rc::new(Cell::new(false));
    let test = {
        let checked = Rc::clone(&checked);
        Comp::new(move |cx| {
            let first = cx.snapshot().expect("inside a region");
            let second = cx.snapshot().expect("inside a region");
            assert_eq!(first, second);
            assert_eq!(first.keys().collect::<Vec<_>>(), vec![a, b]);
            assert_eq!(first.get(a), Some(&3));
            checked.set(true);
            El::empty()
        })
    };

    let mut root = Tree::new();
    root.render(El::region(vec![El::provide(
        a,
        1,
        vec![El::provide(b, 2, vec![El::provide(a, 3, vec![test.element()])])],
    )]));
    assert!(checked.get());
}

#[test]
fn use_bridge_outside_a_region_fails() {
    let failed = Rc::new(Cell::new(false));
    let test = {
        let failed = Rc::clone(&failed);
        Comp::new(move |cx| {
            failed.set(cx.use_bridge().is_err());
            El::empty()
        })
    };

    let mut root = Tree::new();
    root.render(El::provide(BindingKey::new(), 1, vec![test.element()]));
    assert!(failed.get());
}
