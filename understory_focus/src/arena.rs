// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A minimal retained element tree implementing [`FocusTree`].
//!
//! [`Arena`] is meant for hosts that do not have an element tree of their own
//! (for example a game menu drawn by hand), for tests, and for demos. It does
//! no layout: rectangles are whatever the host sets, and scroll writes are
//! recorded but do not move children.
//!
//! ```rust
//! use kurbo::{Rect, Size};
//! use understory_focus::arena::{Arena, Element};
//! use understory_focus::{Direction, Navigator, ScrollSpeed};
//!
//! let mut arena = Arena::new(Size::new(100.0, 100.0));
//! let root = arena.root();
//! let a = arena.insert(root, Element::button(Rect::new(0.0, 0.0, 10.0, 10.0)));
//! let b = arena.insert(root, Element::button(Rect::new(20.0, 0.0, 30.0, 10.0)));
//!
//! let mut nav = Navigator::new(arena);
//! nav.set_root(root);
//! nav.select_node(a);
//! assert!(nav.fire(Direction::Right, ScrollSpeed::Instant));
//! assert_eq!(nav.selected(), Some(b));
//! assert_eq!(nav.tree().focused(), Some(b));
//! ```

use alloc::vec::Vec;

use kurbo::{Rect, Size, Vec2};

use crate::node::{ElementKind, InputType, Markers, NodeTraits, TextCaret};
use crate::scroll::{Axis, ScrollContainer};
use crate::FocusTree;

/// Identifier of a node in an [`Arena`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// Scroll state of an arena node.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Scroll {
    /// Size of the scrollable content; the visible size is the node's rect.
    pub content_size: Size,
    /// Current offset.
    pub offset: Vec2,
    /// Whether this is the document scroller.
    pub document: bool,
}

/// Description of a node to insert.
#[derive(Clone, Debug, Default)]
pub struct Element {
    /// Bounds in viewport coordinates.
    pub rect: Rect,
    /// Element kind.
    pub kind: ElementKind,
    /// ARIA role.
    pub role: Option<&'static str>,
    /// Tab index.
    pub tab_index: Option<i32>,
    /// Caret state for text inputs.
    pub caret: Option<TextCaret>,
    /// Scroll state for scrollers.
    pub scroll: Option<Scroll>,
}

impl Element {
    /// A non-interactive container.
    pub fn container(rect: Rect) -> Self {
        Self {
            rect,
            ..Self::default()
        }
    }

    /// A button.
    pub fn button(rect: Rect) -> Self {
        Self {
            rect,
            kind: ElementKind::Button,
            ..Self::default()
        }
    }

    /// A text input of the given type with an empty value.
    pub fn input(rect: Rect, ty: InputType) -> Self {
        Self {
            rect,
            kind: ElementKind::Input(ty),
            caret: Some(TextCaret::default()),
            ..Self::default()
        }
    }

    /// A container whose content of `content_size` scrolls within `rect`.
    pub fn scroller(rect: Rect, content_size: Size) -> Self {
        Self {
            rect,
            scroll: Some(Scroll {
                content_size,
                ..Scroll::default()
            }),
            ..Self::default()
        }
    }
}

#[derive(Clone, Debug)]
struct Slot {
    element: Element,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    markers: Markers,
}

/// A flat tree of [`Element`]s plus a log of what the navigator did to it.
#[derive(Clone, Debug)]
pub struct Arena {
    slots: Vec<Slot>,
    viewport: Size,
    focused: Option<NodeId>,
    activations: Vec<NodeId>,
    clicks: Vec<NodeId>,
    back_navigations: usize,
    scroll_writes: Vec<(NodeId, Axis, f64)>,
}

impl Arena {
    /// Create an arena holding a single root container covering `viewport`.
    pub fn new(viewport: Size) -> Self {
        let root = Slot {
            element: Element::container(viewport.to_rect()),
            parent: None,
            children: Vec::new(),
            markers: Markers::empty(),
        };
        Self {
            slots: alloc::vec![root],
            viewport,
            focused: None,
            activations: Vec::new(),
            clicks: Vec::new(),
            back_navigations: 0,
            scroll_writes: Vec::new(),
        }
    }

    /// The root container.
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Append `element` as the last child of `parent`.
    pub fn insert(&mut self, parent: NodeId, element: Element) -> NodeId {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "NodeId uses 32-bit indices by design."
        )]
        let id = NodeId(self.slots.len() as u32);
        self.slots.push(Slot {
            element,
            parent: Some(parent),
            children: Vec::new(),
            markers: Markers::empty(),
        });
        self.slots[parent.idx()].children.push(id);
        id
    }

    /// Unlink `node` (and its subtree) from its parent.
    pub fn detach(&mut self, node: NodeId) {
        if let Some(parent) = self.slots[node.idx()].parent.take() {
            self.slots[parent.idx()].children.retain(|&c| c != node);
        }
    }

    /// The element stored for `node`.
    pub fn element(&self, node: NodeId) -> &Element {
        &self.slots[node.idx()].element
    }

    /// Mutable access to the element stored for `node`.
    pub fn element_mut(&mut self, node: NodeId) -> &mut Element {
        &mut self.slots[node.idx()].element
    }

    /// Move `node` to `rect`.
    pub fn set_rect(&mut self, node: NodeId, rect: Rect) {
        self.slots[node.idx()].element.rect = rect;
    }

    /// Selection markers currently applied to `node`.
    pub fn markers(&self, node: NodeId) -> Markers {
        self.slots[node.idx()].markers
    }

    /// The node that last received input focus.
    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    /// Every activation, oldest first.
    pub fn activations(&self) -> &[NodeId] {
        &self.activations
    }

    /// Every click, oldest first.
    pub fn clicks(&self) -> &[NodeId] {
        &self.clicks
    }

    /// Number of back navigations performed.
    pub fn back_navigations(&self) -> usize {
        self.back_navigations
    }

    /// Every scroll offset written, oldest first.
    pub fn scroll_writes(&self) -> &[(NodeId, Axis, f64)] {
        &self.scroll_writes
    }

    /// Current scroll offset of `node` (zero if it does not scroll).
    pub fn scroll_offset(&self, node: NodeId) -> Vec2 {
        self.slots[node.idx()]
            .element
            .scroll
            .map_or(Vec2::ZERO, |s| s.offset)
    }
}

impl FocusTree for Arena {
    type Node = NodeId;

    fn rect(&self, node: NodeId) -> Rect {
        self.slots[node.idx()].element.rect
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.slots[node.idx()].parent
    }

    fn children(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.slots[node.idx()].children.iter().copied()
    }

    fn activate(&mut self, node: NodeId) {
        self.focused = Some(node);
        self.activations.push(node);
    }

    fn viewport(&self) -> Size {
        self.viewport
    }

    fn click(&mut self, node: NodeId) {
        self.clicks.push(node);
    }

    fn navigate_back(&mut self) {
        self.back_navigations += 1;
    }

    fn describe(&self, node: NodeId) -> NodeTraits<'_> {
        let e = &self.slots[node.idx()].element;
        NodeTraits {
            kind: e.kind,
            role: e.role,
            tab_index: e.tab_index,
            caret: e.caret,
        }
    }

    fn set_markers(&mut self, node: NodeId, markers: Markers, enabled: bool) {
        self.slots[node.idx()].markers.set(markers, enabled);
    }

    fn scroll_container(&self, node: NodeId) -> Option<ScrollContainer> {
        let e = &self.slots[node.idx()].element;
        e.scroll.map(|s| ScrollContainer {
            bounds: e.rect,
            content_size: s.content_size,
            client_size: e.rect.size(),
            offset: s.offset,
            document: s.document,
        })
    }

    fn set_scroll_offset(&mut self, node: NodeId, axis: Axis, offset: f64) {
        self.scroll_writes.push((node, axis, offset));
        if let Some(scroll) = self.slots[node.idx()].element.scroll.as_mut() {
            match axis {
                Axis::Horizontal => scroll.offset.x = offset,
                Axis::Vertical => scroll.offset.y = offset,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_detach_maintain_links() {
        let mut arena = Arena::new(Size::new(100.0, 100.0));
        let root = arena.root();
        let a = arena.insert(root, Element::container(Rect::new(0.0, 0.0, 50.0, 50.0)));
        let b = arena.insert(a, Element::button(Rect::new(0.0, 0.0, 10.0, 10.0)));
        assert_eq!(arena.parent(b), Some(a));
        assert!(arena.is_attached(b, root));
        arena.detach(a);
        assert!(!arena.is_attached(b, root));
        assert_eq!(arena.children(root).count(), 0);
    }

    #[test]
    fn markers_and_scroll_writes_are_recorded() {
        let mut arena = Arena::new(Size::new(100.0, 100.0));
        let root = arena.root();
        let s = arena.insert(
            root,
            Element::scroller(Rect::new(0.0, 0.0, 50.0, 50.0), Size::new(50.0, 200.0)),
        );
        arena.set_markers(s, Markers::SELECTED | Markers::DIRECT, true);
        arena.set_markers(s, Markers::DIRECT, false);
        assert_eq!(arena.markers(s), Markers::SELECTED);

        arena.set_scroll_offset(s, Axis::Vertical, 30.0);
        assert_eq!(arena.scroll_offset(s), Vec2::new(0.0, 30.0));
        let c = arena.scroll_container(s).unwrap();
        assert_eq!(c.client_size, Size::new(50.0, 50.0));
        assert!(arena.scroll_container(root).is_none());
    }
}
