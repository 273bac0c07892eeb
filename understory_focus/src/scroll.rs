// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll reconciliation: keep the selection visible inside nested scrollers.
//!
//! After a move, [`ScrollAnimator::reconcile`] walks from the new selection up
//! through every ancestor. For each ancestor that can scroll on an axis, it
//! checks where the selection *will* be once the adjustments queued for inner
//! scrollers have been applied, and queues the minimal scroll that brings it
//! fully into view (no centering).
//!
//! Depending on [`ScrollSpeed`], adjustments are applied immediately or
//! animated linearly; hosts drive animations by calling
//! [`ScrollAnimator::advance`] once per frame until it returns `false`.

use alloc::vec::Vec;

use kurbo::{Point, Rect, Size, Vec2};

use crate::{Error, FocusTree};

/// How the selection is scrolled into view.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollSpeed {
    /// Never scroll.
    Disabled,
    /// Jump to the target offset.
    Instant,
    /// Animate at the given speed in pixels per second.
    Animated(f64),
}

impl ScrollSpeed {
    /// Animated scrolling at `pixels_per_second`, which must be finite and positive.
    pub fn animated(pixels_per_second: f64) -> Result<Self, Error> {
        if pixels_per_second.is_finite() && pixels_per_second > 0.0 {
            Ok(Self::Animated(pixels_per_second))
        } else {
            Err(Error::InvalidScrollSpeed(pixels_per_second))
        }
    }
}

impl Default for ScrollSpeed {
    fn default() -> Self {
        Self::Animated(1000.0)
    }
}

/// A scroll axis.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Left/right scrolling (`scroll_left`).
    Horizontal,
    /// Up/down scrolling (`scroll_top`).
    Vertical,
}

/// Scroll state reported by the host for a scrollable node.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ScrollContainer {
    /// Bounds of the container in viewport coordinates.
    pub bounds: Rect,
    /// Full size of the scrollable content.
    pub content_size: Size,
    /// Size of the visible area inside the container.
    pub client_size: Size,
    /// Current scroll offset (`x` horizontal, `y` vertical).
    pub offset: Vec2,
    /// The top-level document scroller. Its visible area is the viewport,
    /// not its own layout box.
    pub document: bool,
}

/// A queued scroll animation on one axis of one node.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ScrollAnimation<K> {
    /// The scrolling node.
    pub node: K,
    /// The animated axis.
    pub axis: Axis,
    /// Offset when the animation was queued.
    pub from: f64,
    /// Offset to reach.
    pub to: f64,
    /// Duration in milliseconds.
    pub duration_ms: f64,
    /// Timestamp of the first frame, set by [`ScrollAnimator::advance`].
    pub started_at: Option<u64>,
}

impl<K> ScrollAnimation<K> {
    fn progress(&self, now: u64) -> f64 {
        let start = self.started_at.unwrap_or(now);
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        let elapsed = now.saturating_sub(start) as f64;
        (elapsed / self.duration_ms).min(1.0)
    }
}

/// Linear interpolation between `start` and `end`.
pub fn lerp(start: f64, end: f64, progress: f64) -> f64 {
    start + (end - start) * progress
}

/// Owner of in-flight scroll animations.
#[derive(Clone, Debug)]
pub struct ScrollAnimator<K> {
    running: Vec<ScrollAnimation<K>>,
}

impl<K> Default for ScrollAnimator<K> {
    fn default() -> Self {
        Self {
            running: Vec::new(),
        }
    }
}

impl<K: Copy + Eq> ScrollAnimator<K> {
    /// Create an animator with nothing in flight.
    pub fn new() -> Self {
        Self::default()
    }

    /// Animations that have not finished yet.
    pub fn animations(&self) -> &[ScrollAnimation<K>] {
        &self.running
    }

    /// Returns `true` while any animation still needs frames.
    pub fn is_running(&self) -> bool {
        !self.running.is_empty()
    }

    /// Queue the scrolls needed to bring `node` into view in every scrolling ancestor.
    pub fn reconcile<T>(&mut self, tree: &mut T, node: K, speed: ScrollSpeed)
    where
        T: FocusTree<Node = K>,
    {
        if speed == ScrollSpeed::Disabled {
            return;
        }

        let rect = tree.rect(node);
        let (width, height) = (rect.width(), rect.height());
        let (mut left, mut top) = (rect.x0, rect.y0);

        let mut cur = tree.parent(node);
        while let Some(parent) = cur {
            cur = tree.parent(parent);
            let Some(container) = tree.scroll_container(parent) else {
                continue;
            };
            let visible = if container.document {
                Rect::from_origin_size(Point::ORIGIN, tree.viewport())
            } else {
                container.bounds
            };

            if container.content_size.height > container.client_size.height {
                let from = container.offset.y;
                let to = reveal(from, top - visible.y0, height, visible.height());
                if to != from {
                    self.queue(tree, parent, Axis::Vertical, from, to, speed);
                    top += from - to;
                }
            }

            if container.content_size.width > container.client_size.width {
                let from = container.offset.x;
                let to = reveal(from, left - visible.x0, width, visible.width());
                if to != from {
                    self.queue(tree, parent, Axis::Horizontal, from, to, speed);
                    left += from - to;
                }
            }
        }
    }

    fn queue<T>(
        &mut self,
        tree: &mut T,
        node: K,
        axis: Axis,
        from: f64,
        to: f64,
        speed: ScrollSpeed,
    ) where
        T: FocusTree<Node = K>,
    {
        match speed {
            ScrollSpeed::Disabled => {}
            ScrollSpeed::Animated(pixels_per_second)
                if pixels_per_second.is_finite() && pixels_per_second > 0.0 =>
            {
                // A newer target for the same scroller supersedes the old one.
                self.running.retain(|a| !(a.node == node && a.axis == axis));
                self.running.push(ScrollAnimation {
                    node,
                    axis,
                    from,
                    to,
                    duration_ms: (to - from).abs() / pixels_per_second * 1000.0,
                    started_at: None,
                });
            }
            // Speeds that would never finish jump instead.
            ScrollSpeed::Animated(_) | ScrollSpeed::Instant => {
                tree.set_scroll_offset(node, axis, to);
            }
        }
    }

    /// Step every animation to `now` (milliseconds) and drop finished ones.
    ///
    /// Returns `true` if another frame is needed.
    pub fn advance<T>(&mut self, tree: &mut T, now: u64) -> bool
    where
        T: FocusTree<Node = K>,
    {
        self.running.retain_mut(|anim| {
            if anim.started_at.is_none() {
                anim.started_at = Some(now);
            }
            let progress = anim.progress(now);
            tree.set_scroll_offset(anim.node, anim.axis, lerp(anim.from, anim.to, progress));
            progress < 1.0
        });
        self.is_running()
    }
}

/// The offset closest to `offset` that shows `extent` pixels starting at
/// `start` (relative to the visible area) inside `visible` pixels.
fn reveal(offset: f64, start: f64, extent: f64, visible: f64) -> f64 {
    let shows_start = offset + start;
    let shows_end = offset + start + extent - visible;
    if shows_start < offset {
        shows_start
    } else if shows_end > offset {
        shows_end
    } else {
        offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::{Arena, Element, NodeId};

    fn list_fixture(content_height: f64) -> (Arena, NodeId) {
        let mut arena = Arena::new(Size::new(400.0, 400.0));
        let root = arena.root();
        let content = Size::new(100.0, content_height);
        let list = arena.insert(
            root,
            Element::scroller(Rect::new(0.0, 0.0, 100.0, 100.0), content),
        );
        (arena, list)
    }

    #[test]
    fn instant_scrolls_down_just_enough() {
        let (mut arena, list) = list_fixture(400.0);
        let item = arena.insert(list, Element::button(Rect::new(0.0, 120.0, 50.0, 170.0)));
        let mut animator = ScrollAnimator::new();
        animator.reconcile(&mut arena, item, ScrollSpeed::Instant);
        assert_eq!(arena.scroll_writes(), &[(list, Axis::Vertical, 70.0)]);
        assert!(!animator.is_running());
    }

    #[test]
    fn instant_scrolls_up_to_the_top_edge() {
        let (mut arena, list) = list_fixture(400.0);
        arena.element_mut(list).scroll.as_mut().unwrap().offset.y = 100.0;
        let item = arena.insert(list, Element::button(Rect::new(0.0, -30.0, 50.0, 20.0)));
        ScrollAnimator::new().reconcile(&mut arena, item, ScrollSpeed::Instant);
        assert_eq!(arena.scroll_offset(list), Vec2::new(0.0, 70.0));
    }

    #[test]
    fn visible_or_unscrollable_targets_are_left_alone() {
        let (mut arena, list) = list_fixture(400.0);
        let visible = arena.insert(list, Element::button(Rect::new(0.0, 10.0, 50.0, 60.0)));
        let mut animator = ScrollAnimator::new();
        animator.reconcile(&mut arena, visible, ScrollSpeed::Instant);

        let (mut short, tight) = list_fixture(100.0);
        let below = short.insert(tight, Element::button(Rect::new(0.0, 120.0, 50.0, 170.0)));
        animator.reconcile(&mut short, below, ScrollSpeed::Instant);
        animator.reconcile(&mut arena, visible, ScrollSpeed::Disabled);

        assert!(arena.scroll_writes().is_empty());
        assert!(short.scroll_writes().is_empty());
    }

    #[test]
    fn animation_interpolates_from_the_first_frame() {
        let (mut arena, list) = list_fixture(400.0);
        let item = arena.insert(list, Element::button(Rect::new(0.0, 120.0, 50.0, 170.0)));
        let mut animator = ScrollAnimator::new();
        animator.reconcile(&mut arena, item, ScrollSpeed::Animated(1000.0));
        assert!(arena.scroll_writes().is_empty());
        assert_eq!(animator.animations()[0].duration_ms, 70.0);

        assert!(animator.advance(&mut arena, 1_000));
        assert_eq!(arena.scroll_offset(list).y, 0.0);
        assert!(animator.advance(&mut arena, 1_035));
        assert_eq!(arena.scroll_offset(list).y, 35.0);
        assert!(!animator.advance(&mut arena, 1_070));
        assert_eq!(arena.scroll_offset(list).y, 70.0);
        assert!(animator.animations().is_empty());
    }

    #[test]
    fn newer_target_supersedes_running_animation() {
        let (mut arena, list) = list_fixture(400.0);
        let near = arena.insert(list, Element::button(Rect::new(0.0, 120.0, 50.0, 170.0)));
        let far = arena.insert(list, Element::button(Rect::new(0.0, 200.0, 50.0, 250.0)));
        let mut animator = ScrollAnimator::new();
        animator.reconcile(&mut arena, near, ScrollSpeed::default());
        animator.reconcile(&mut arena, far, ScrollSpeed::default());
        assert_eq!(animator.animations().len(), 1);
        assert_eq!(animator.animations()[0].to, 150.0);
    }

    #[test]
    fn document_scroller_uses_the_viewport() {
        let mut arena = Arena::new(Size::new(200.0, 200.0));
        let root = arena.root();
        let mut page = Element::scroller(
            Rect::new(0.0, 0.0, 200.0, 1000.0),
            Size::new(200.0, 2000.0),
        );
        page.scroll.as_mut().unwrap().document = true;
        let page = arena.insert(root, page);
        let item = arena.insert(page, Element::button(Rect::new(0.0, 500.0, 50.0, 550.0)));

        ScrollAnimator::new().reconcile(&mut arena, item, ScrollSpeed::Instant);
        assert_eq!(arena.scroll_writes(), &[(page, Axis::Vertical, 350.0)]);

        arena.element_mut(page).scroll.as_mut().unwrap().document = false;
        arena.element_mut(page).scroll.as_mut().unwrap().offset = Vec2::ZERO;
        ScrollAnimator::new().reconcile(&mut arena, item, ScrollSpeed::Instant);
        assert_eq!(arena.scroll_writes().len(), 1);
    }

    #[test]
    fn nested_scrollers_account_for_inner_adjustments() {
        let mut arena = Arena::new(Size::new(400.0, 400.0));
        let root = arena.root();
        let outer = arena.insert(
            root,
            Element::scroller(Rect::new(0.0, 0.0, 200.0, 200.0), Size::new(200.0, 1000.0)),
        );
        let inner = arena.insert(
            outer,
            Element::scroller(Rect::new(0.0, 300.0, 100.0, 400.0), Size::new(100.0, 800.0)),
        );
        let item = arena.insert(inner, Element::button(Rect::new(0.0, 650.0, 50.0, 700.0)));

        ScrollAnimator::new().reconcile(&mut arena, item, ScrollSpeed::Instant);
        assert_eq!(
            arena.scroll_writes(),
            &[
                (inner, Axis::Vertical, 300.0),
                (outer, Axis::Vertical, 200.0),
            ]
        );
    }

    #[test]
    fn horizontal_overflow_scrolls_left() {
        let mut arena = Arena::new(Size::new(400.0, 400.0));
        let root = arena.root();
        let row = arena.insert(
            root,
            Element::scroller(Rect::new(0.0, 0.0, 100.0, 50.0), Size::new(500.0, 50.0)),
        );
        let item = arena.insert(row, Element::button(Rect::new(180.0, 0.0, 230.0, 50.0)));
        ScrollAnimator::new().reconcile(&mut arena, item, ScrollSpeed::Instant);
        assert_eq!(arena.scroll_writes(), &[(row, Axis::Horizontal, 130.0)]);
    }

    #[test]
    fn unusable_animated_speeds_scroll_instantly() {
        for speed in [0.0, -250.0, f64::NAN, f64::INFINITY] {
            let (mut arena, list) = list_fixture(400.0);
            let item = arena.insert(list, Element::button(Rect::new(0.0, 120.0, 50.0, 170.0)));
            let mut animator = ScrollAnimator::new();
            animator.reconcile(&mut arena, item, ScrollSpeed::Animated(speed));
            assert!(!animator.is_running(), "{speed} must not animate");
            assert_eq!(arena.scroll_offset(list).y, 70.0);
            assert!(!animator.advance(&mut arena, 16));
        }
    }

    #[test]
    fn animated_speed_must_be_positive() {
        assert_eq!(
            ScrollSpeed::animated(500.0),
            Ok(ScrollSpeed::Animated(500.0))
        );
        assert!(ScrollSpeed::animated(0.0).is_err());
        assert!(ScrollSpeed::animated(f64::NAN).is_err());
    }
}
