// Copyright 2026 the Filament Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Element descriptions handed to [`Root::render`](crate::Root::render).

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;

use filament_core::binding::Bridge;
use filament_core::node::{BindingKey, NodeKind};

use crate::scope::Scope;

/// Render logic shared by every mount of one component.
type RenderFn<P, V> = dyn Fn(&mut Scope<'_, P, V>) -> Element<P, V>;

/// A component: render logic with a stable identity.
///
/// Two elements refer to the same component when they were made from clones
/// of the same `Component`. The reconciler reuses a mounted node (and its
/// remembered state) only for the same component.
pub struct Component<P, V> {
    render: Rc<RenderFn<P, V>>,
}

impl<P, V> Clone for Component<P, V> {
    fn clone(&self) -> Self {
        Self {
            render: Rc::clone(&self.render),
        }
    }
}

impl<P, V> core::fmt::Debug for Component<P, V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Component({:#x})", self.id())
    }
}

impl<P, V> Component<P, V> {
    /// Wraps render logic into a component.
    pub fn new(render: impl Fn(&mut Scope<'_, P, V>) -> Element<P, V> + 'static) -> Self {
        Self {
            render: Rc::new(render),
        }
    }

    /// Returns an element that mounts this component.
    #[must_use]
    pub fn element(&self) -> Element<P, V> {
        Element::Component(self.clone())
    }

    /// Whether both refer to the same render logic.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.render, &other.render)
    }

    fn id(&self) -> usize {
        Rc::as_ptr(&self.render).cast::<()>().addr()
    }

    pub(crate) fn call(&self, scope: &mut Scope<'_, P, V>) -> Element<P, V> {
        (self.render)(scope)
    }
}

/// A description of what to mount at one position.
pub enum Element<P, V> {
    /// A host node carrying a backend instance.
    Host {
        /// The backend instance.
        payload: P,
        /// Child elements.
        children: Vec<Element<P, V>>,
    },
    /// A user component.
    Component(Component<P, V>),
    /// A binding declaration visible to everything below it.
    Provide {
        /// The binding's identity.
        key: BindingKey,
        /// The declared value.
        value: V,
        /// Child elements.
        children: Vec<Element<P, V>>,
    },
    /// A bound region provider: components below can resolve their node.
    Region(Vec<Element<P, V>>),
    /// Groups children without any node semantics of its own.
    Fragment(Vec<Element<P, V>>),
    /// Content re-wrapped in a bridge's declarations on every render.
    Bridged {
        /// The bridge whose live snapshot is replayed.
        bridge: Bridge<V>,
        /// The wrapped content.
        content: Box<Element<P, V>>,
    },
}

impl<P, V> core::fmt::Debug for Element<P, V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Host { children, .. } => f
                .debug_struct("Host")
                .field("children", &children.len())
                .finish_non_exhaustive(),
            Self::Component(c) => core::fmt::Debug::fmt(c, f),
            Self::Provide { key, children, .. } => f
                .debug_struct("Provide")
                .field("key", key)
                .field("children", &children.len())
                .finish_non_exhaustive(),
            Self::Region(children) => f.debug_tuple("Region").field(&children.len()).finish(),
            Self::Fragment(children) => f.debug_tuple("Fragment").field(&children.len()).finish(),
            Self::Bridged { bridge, .. } => f
                .debug_struct("Bridged")
                .field("entries", &bridge.len())
                .finish_non_exhaustive(),
        }
    }
}

impl<P, V> Element<P, V> {
    /// A host node without children.
    pub fn host(payload: P) -> Self {
        Self::Host {
            payload,
            children: Vec::new(),
        }
    }

    /// A host node with children.
    pub fn host_with(payload: P, children: Vec<Self>) -> Self {
        Self::Host { payload, children }
    }

    /// A binding declaration around `children`.
    pub fn provide(key: BindingKey, value: V, children: Vec<Self>) -> Self {
        Self::Provide {
            key,
            value,
            children,
        }
    }

    /// A bound region around `children`.
    pub fn region(children: Vec<Self>) -> Self {
        Self::Region(children)
    }

    /// Renders nothing.
    pub fn empty() -> Self {
        Self::Fragment(Vec::new())
    }

    /// Wraps `content` in the bindings `bridge` currently holds.
    ///
    /// The wrapping is redone every time the element is rendered, so a
    /// refreshed bridge shows up on the next render of `content`.
    pub fn bridge(bridge: Bridge<V>, content: Self) -> Self {
        Self::Bridged {
            bridge,
            content: Box::new(content),
        }
    }

    /// The node kind mounted for this element.
    pub(crate) fn kind(&self) -> NodeKind {
        match self {
            Self::Host { .. } => NodeKind::Host,
            Self::Provide { .. } => NodeKind::Binding,
            Self::Component(_) | Self::Region(_) | Self::Fragment(_) | Self::Bridged { .. } => {
                NodeKind::Composite
            }
        }
    }

    /// The identity a mounted node must carry to be reused for this element.
    pub(crate) fn tag(&self) -> Tag<P, V> {
        match self {
            Self::Host { .. } => Tag::Host,
            Self::Component(c) => Tag::Component(c.clone()),
            Self::Provide { key, .. } => Tag::Provide(*key),
            Self::Region(_) => Tag::Region,
            Self::Fragment(_) => Tag::Fragment,
            Self::Bridged { .. } => Tag::Bridged,
        }
    }
}

/// What a mounted node was created for.
///
/// A component tag keeps the component alive, so its address cannot be
/// reused by another component while the node exists.
pub(crate) enum Tag<P, V> {
    Host,
    Component(Component<P, V>),
    Provide(BindingKey),
    Region,
    Fragment,
    Bridged,
}

impl<P, V> Tag<P, V> {
    /// Whether a node tagged `self` can be reused for an element tagged
    /// `other`.
    pub(crate) fn same(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Host, Self::Host)
            | (Self::Region, Self::Region)
            | (Self::Fragment, Self::Fragment)
            | (Self::Bridged, Self::Bridged) => true,
            (Self::Component(a), Self::Component(b)) => a.ptr_eq(b),
            (Self::Provide(a), Self::Provide(b)) => a == b,
            _ => false,
        }
    }
}
