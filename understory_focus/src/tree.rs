// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The host tree as seen by the navigator.

use kurbo::{Rect, Size};

use crate::node::{Markers, NodeTraits, is_focusable_by_default};
use crate::scroll::{Axis, ScrollContainer};

/// Access to the host's element tree.
///
/// The navigator never owns nodes; it holds copies of `Node` handles and asks
/// the tree for geometry and structure on demand. Required methods cover
/// structure, geometry, and activation; the rest have defaults suitable for
/// hosts without markers, scrolling, or element metadata.
pub trait FocusTree {
    /// Handle of an element. Equality is identity.
    type Node: Copy + Eq + core::fmt::Debug;

    /// Current bounds of `node` in viewport coordinates.
    fn rect(&self, node: Self::Node) -> Rect;

    /// Parent of `node`, or `None` at the top of the tree or once detached.
    fn parent(&self, node: Self::Node) -> Option<Self::Node>;

    /// Children of `node` in tree order.
    fn children(&self, node: Self::Node) -> impl Iterator<Item = Self::Node> + '_;

    /// Give `node` input focus.
    fn activate(&mut self, node: Self::Node);

    /// Size of the visible viewport.
    fn viewport(&self) -> Size;

    /// Trigger the default action of `node` (a click).
    fn click(&mut self, node: Self::Node) {
        let _ = node;
    }

    /// Perform the platform "back" navigation.
    fn navigate_back(&mut self) {}

    /// Element metadata for eligibility and form handling.
    fn describe(&self, node: Self::Node) -> NodeTraits<'_> {
        let _ = node;
        NodeTraits::default()
    }

    /// Whether `node` may receive focus. Defaults to [`is_focusable_by_default`].
    fn is_focusable(&self, node: Self::Node) -> bool {
        is_focusable_by_default(&self.describe(node))
    }

    /// Add (`enabled = true`) or remove selection markers on `node`.
    fn set_markers(&mut self, node: Self::Node, markers: Markers, enabled: bool) {
        let _ = (node, markers, enabled);
    }

    /// Scroll state of `node`, or `None` if it never scrolls.
    fn scroll_container(&self, node: Self::Node) -> Option<ScrollContainer> {
        let _ = node;
        None
    }

    /// Set the scroll offset of `node` along `axis`.
    fn set_scroll_offset(&mut self, node: Self::Node, axis: Axis, offset: f64) {
        let _ = (node, axis, offset);
    }

    /// Returns `true` if `node` is `root` or one of its descendants.
    fn is_attached(&self, node: Self::Node, root: Self::Node) -> bool {
        let mut cur = Some(node);
        while let Some(n) = cur {
            if n == root {
                return true;
            }
            cur = self.parent(n);
        }
        false
    }
}
