// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The focus navigator.
//!
//! [`Navigator`] owns the host tree, the collaborator registry, and a
//! [`FocusPolicy`]. It tracks the current selection and the chain of
//! ancestors between it and the focus root, keeps
//! [`Markers::SELECTED`] / [`Markers::DIRECT`] in sync on those nodes, and
//! turns a [`Direction`] into a move, a click, or a back navigation.
//!
//! ## Event flow
//!
//! [`Navigator::fire`] runs in three phases:
//!
//! 1. For directional input, compute a candidate with the policy (this also
//!    updates the history lane). Any other input resets the lane.
//! 2. Bubble a [`NavigationEvent`] from the selection up to, but excluding,
//!    the root. Collaborators may stop propagation, cancel, or replace the
//!    candidate.
//! 3. Unless cancelled, perform the default action.
//!
//! Everything is single-threaded and synchronous: collaborators run inside
//! `fire`, and the selection is committed before the tree's
//! [`activate`](FocusTree::activate) hook is called, so a host that reports the
//! activation back through [`Navigator::on_focus_change`] sees a no-op.

use alloc::vec::Vec;
use core::fmt;

use kurbo::Rect;
use smallvec::SmallVec;

use crate::{
    DEFAULT_RECT, Direction, FocusEntry, FocusPolicy, FocusSpace, FocusTree, Heading, Markers,
    NavigationEvent, NoRegistry, Registry, ScrollAnimator, ScrollSpeed, SearchOrigin, ShadowPolicy,
    is_degenerate, next_history_rect, round_rect,
};

/// The current selection and the path above it.
#[derive(Clone, Debug, PartialEq)]
pub struct Selection<K> {
    /// The selected node.
    pub node: K,
    /// The selected node followed by its ancestors up to, but excluding, the
    /// root, as they were when the selection was made.
    pub ancestors: SmallVec<[K; 8]>,
    /// Pixel-rounded bounds cached at selection time. Used as the reference
    /// rectangle if the node is later detached from the root.
    pub reference: Rect,
}

/// Spatial focus navigator.
///
/// `T` is the host tree, `R` looks up collaborators, and `P` picks candidates.
pub struct Navigator<T: FocusTree, R = NoRegistry, P = ShadowPolicy> {
    tree: T,
    registry: R,
    policy: P,
    root: Option<T::Node>,
    subscribed: bool,
    selection: Option<Selection<T::Node>>,
    history: Rect,
    scroll: ScrollAnimator<T::Node>,
    candidates: Vec<FocusEntry<T::Node>>,
}

impl<T: FocusTree, R, P> fmt::Debug for Navigator<T, R, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Navigator")
            .field("root", &self.root)
            .field("subscribed", &self.subscribed)
            .field("selection", &self.selection)
            .field("history", &self.history)
            .field("scroll", &self.scroll)
            .finish_non_exhaustive()
    }
}

impl<T: FocusTree> Navigator<T> {
    /// Create a navigator without collaborators, using [`ShadowPolicy`].
    pub fn new(tree: T) -> Self {
        Self::with_registry(tree, NoRegistry)
    }
}

impl<T: FocusTree, R: Registry<T::Node>> Navigator<T, R> {
    /// Create a navigator with a collaborator registry, using [`ShadowPolicy`].
    pub fn with_registry(tree: T, registry: R) -> Self {
        Self::with_policy(tree, registry, ShadowPolicy::default())
    }
}

impl<T, R, P> Navigator<T, R, P>
where
    T: FocusTree,
    R: Registry<T::Node>,
    P: FocusPolicy<T::Node>,
{
    /// Create a navigator with a registry and a custom policy.
    pub fn with_policy(tree: T, registry: R, policy: P) -> Self {
        Self {
            tree,
            registry,
            policy,
            root: None,
            subscribed: false,
            selection: None,
            history: DEFAULT_RECT,
            scroll: ScrollAnimator::new(),
            candidates: Vec::new(),
        }
    }

    /// The host tree.
    pub fn tree(&self) -> &T {
        &self.tree
    }

    /// Mutable access to the host tree, for layout changes between inputs.
    pub fn tree_mut(&mut self) -> &mut T {
        &mut self.tree
    }

    /// The collaborator registry.
    pub fn registry(&self) -> &R {
        &self.registry
    }

    /// Mutable access to the collaborator registry.
    pub fn registry_mut(&mut self) -> &mut R {
        &mut self.registry
    }

    /// The candidate selection policy.
    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// The focus root, if one has been set.
    pub fn root(&self) -> Option<T::Node> {
        self.root
    }

    /// The selected node.
    pub fn selected(&self) -> Option<T::Node> {
        self.selection.as_ref().map(|s| s.node)
    }

    /// The current selection with its ancestor chain.
    pub fn selection(&self) -> Option<&Selection<T::Node>> {
        self.selection.as_ref()
    }

    /// The selected node and its ancestors below the root (empty with no selection).
    pub fn ancestors(&self) -> &[T::Node] {
        match &self.selection {
            Some(s) => &s.ancestors,
            None => &[],
        }
    }

    /// Bounds cached when the current selection was made.
    pub fn reference_rect(&self) -> Option<Rect> {
        self.selection.as_ref().map(|s| s.reference)
    }

    /// The history lane used to prefer aligned candidates.
    pub fn history_rect(&self) -> Rect {
        self.history
    }

    /// Whether focus requests and focus reports are currently accepted.
    pub fn is_subscribed(&self) -> bool {
        self.subscribed
    }

    /// In-flight scroll animations.
    pub fn scroll_animator(&self) -> &ScrollAnimator<T::Node> {
        &self.scroll
    }

    /// Returns `true` while scroll animations still need frames.
    pub fn is_scrolling(&self) -> bool {
        self.scroll.is_running()
    }

    /// Step scroll animations to `now` (milliseconds).
    ///
    /// Returns `true` if another frame is needed.
    pub fn advance_scroll(&mut self, now: u64) -> bool {
        self.scroll.advance(&mut self.tree, now)
    }

    /// Set the subtree that navigation is confined to.
    ///
    /// This (re)subscribes the navigator to programmatic focus requests and
    /// focus reports. The current selection is kept; if it lies outside the
    /// new root it is treated as detached until something else is selected.
    pub fn set_root(&mut self, root: T::Node) {
        tracing::debug!(?root, "focus root set");
        self.root = Some(root);
        self.subscribed = true;
    }

    /// Stop reacting to focus requests and focus reports.
    ///
    /// Explicit calls to [`select_node`](Self::select_node) and
    /// [`fire`](Self::fire) keep working.
    pub fn teardown(&mut self) {
        tracing::debug!("navigator torn down");
        self.subscribed = false;
    }

    /// The host reports that `node` received input focus by other means
    /// (pointer, tab key, script).
    ///
    /// Nodes outside the focus root are ignored.
    pub fn on_focus_change(&mut self, node: T::Node) {
        if !self.subscribed || !self.is_inside_root(node) {
            return;
        }
        self.select_node(node);
    }

    /// Drain programmatic focus requests from the registry and honor them in order.
    ///
    /// Requests drained while unsubscribed, and requests for nodes outside
    /// the focus root, are discarded.
    pub fn process_focus_requests(&mut self) {
        while let Some(node) = self.registry.take_focus_request() {
            if self.subscribed && self.is_inside_root(node) {
                tracing::trace!(?node, "focus requested");
                self.select_node(node);
            }
        }
    }

    /// Make `next` the selection.
    ///
    /// Markers and [`Collaborator::on_focus`](crate::Collaborator::on_focus)
    /// notifications are applied only where the selection path changes, and
    /// never to the root or anything above it. The tree's `activate` hook runs
    /// last, after the new selection is committed. Selecting the current
    /// selection again does nothing.
    pub fn select_node(&mut self, next: T::Node) {
        let previous = self.selected();
        if previous == Some(next) {
            return;
        }

        let attached = match (previous, self.root) {
            (Some(prev), Some(root)) => {
                self.tree.is_attached(prev, root) && self.tree.is_attached(next, root)
            }
            _ => false,
        };
        let old = self.selection.take();
        let mut ancestors: SmallVec<[T::Node; 8]> = SmallVec::new();

        match previous {
            Some(prev) if attached => {
                let common = self.common_ancestor(next, prev);
                self.tree.set_markers(prev, Markers::DIRECT, false);

                let mut cur = Some(prev);
                while let Some(el) = cur {
                    if Some(el) == common || Some(el) == self.root {
                        break;
                    }
                    self.tree.set_markers(el, Markers::SELECTED, false);
                    self.notify_focus(el, None);
                    cur = self.tree.parent(el);
                }

                let mut cur = Some(next);
                while let Some(el) = cur {
                    if Some(el) == common || Some(el) == self.root {
                        break;
                    }
                    self.tree.set_markers(el, Markers::SELECTED, true);
                    self.notify_focus(el, Some(next));
                    ancestors.push(el);
                    cur = self.tree.parent(el);
                }

                // Ancestors that stay on the path are told about the new selection too.
                let mut cur = common.filter(|&c| self.is_inside_root(c));
                while let Some(el) = cur {
                    if Some(el) == self.root {
                        break;
                    }
                    self.notify_focus(el, Some(next));
                    ancestors.push(el);
                    cur = self.tree.parent(el);
                }
            }
            _ => {
                if let Some(old) = old {
                    tracing::trace!(previous = ?old.node, "previous selection detached");
                    self.tree.set_markers(old.node, Markers::DIRECT, false);
                    for &el in &old.ancestors {
                        self.tree.set_markers(el, Markers::SELECTED, false);
                    }
                }
                if self.is_inside_root(next) {
                    let mut cur = Some(next);
                    while let Some(el) = cur {
                        if Some(el) == self.root {
                            break;
                        }
                        self.tree.set_markers(el, Markers::SELECTED, true);
                        self.notify_focus(el, Some(next));
                        ancestors.push(el);
                        cur = self.tree.parent(el);
                    }
                } else {
                    tracing::trace!(?next, "selected node is outside the focus root");
                    self.tree.set_markers(next, Markers::SELECTED, true);
                    self.notify_focus(next, Some(next));
                    ancestors.push(next);
                }
            }
        }

        let reference = round_rect(self.tree.rect(next));
        self.selection = Some(Selection {
            node: next,
            ancestors,
            reference,
        });
        self.tree.set_markers(next, Markers::DIRECT, true);
        tracing::debug!(?previous, ?next, "selection changed");
        self.tree.activate(next);
    }

    /// Handle one input.
    ///
    /// Returns `true` if the input was consumed: a move happened, a click or
    /// back navigation was performed, or a collaborator cancelled the event.
    /// Returns `false` when a directional move found nothing, when submitting
    /// with no selection, and for inputs with no default action.
    pub fn fire(&mut self, direction: Direction, speed: ScrollSpeed) -> bool {
        let candidate = match direction.heading() {
            Some(heading) => self.find_next_focus(heading),
            None => {
                self.history = DEFAULT_RECT;
                None
            }
        };

        let source = self.selected();
        let mut event = NavigationEvent::new(direction, source, candidate);
        if let (Some(selected), Some(root)) = (source, self.root)
            && self.tree.is_attached(selected, root)
        {
            self.bubble(selected, root, &mut event);
        }

        if event.cancelled {
            tracing::debug!(?direction, "navigation cancelled by collaborator");
            return true;
        }

        if direction.is_directional() {
            let Some(next) = event.candidate else {
                tracing::trace!(?direction, "no candidate");
                return false;
            };
            self.select_node(next);
            self.scroll.reconcile(&mut self.tree, next, speed);
            return true;
        }

        match direction {
            Direction::Submit => match source {
                Some(selected) => {
                    self.tree.click(selected);
                    true
                }
                None => false,
            },
            Direction::Back => {
                self.tree.navigate_back();
                true
            }
            _ => false,
        }
    }

    /// Choose the best candidate along `heading` without moving.
    ///
    /// Updates the history lane: it narrows to the new candidate on success
    /// and resets on failure.
    pub fn find_next_focus(&mut self, heading: Heading) -> Option<T::Node> {
        let Some(root) = self.root else {
            self.history = DEFAULT_RECT;
            return None;
        };

        let reference = match &self.selection {
            Some(s) if self.tree.is_attached(s.node, root) => round_rect(self.tree.rect(s.node)),
            Some(s) => s.reference,
            None => DEFAULT_RECT,
        };
        let viewport = self.tree.viewport();
        let origin = SearchOrigin {
            reference,
            history: self.history,
            max_distance: viewport.width.max(viewport.height),
        };

        self.collect_candidates(root);
        let space = FocusSpace {
            nodes: &self.candidates,
        };
        let found = self.policy.next(heading, &origin, &space).cloned();

        match found {
            Some(entry) => {
                self.history = next_history_rect(heading, self.history, reference, entry.rect);
                tracing::trace!(?heading, candidate = ?entry.id, "candidate found");
                Some(entry.id)
            }
            None => {
                self.history = DEFAULT_RECT;
                None
            }
        }
    }

    /// Rebuild the candidate snapshot from a pre-order walk of `root`'s descendants.
    fn collect_candidates(&mut self, root: T::Node) {
        self.candidates.clear();
        let selected = self.selected();
        let mut stack: SmallVec<[T::Node; 32]> = SmallVec::new();
        push_children(&self.tree, root, &mut stack);
        while let Some(node) = stack.pop() {
            push_children(&self.tree, node, &mut stack);
            if Some(node) == selected {
                continue;
            }
            if !(self.tree.is_focusable(node) || self.registry.contains(node)) {
                continue;
            }
            let rect = self.tree.rect(node);
            if is_degenerate(rect) {
                continue;
            }
            self.candidates.push(FocusEntry {
                id: node,
                rect: round_rect(rect),
            });
        }
    }

    fn bubble(&mut self, start: T::Node, root: T::Node, event: &mut NavigationEvent<T::Node>) {
        let mut cur = Some(start);
        while !event.propagation_stopped {
            let Some(el) = cur else {
                tracing::warn!(
                    direction = ?event.direction,
                    "focusable element was moved outside of the focus root"
                );
                break;
            };
            if el == root {
                break;
            }
            if let Some(collaborator) = self.registry.find(el) {
                collaborator.fire_event(event);
            }
            cur = self.tree.parent(el);
        }
    }

    /// Returns `true` if `node` lies under the focus root, or no root is set.
    fn is_inside_root(&self, node: T::Node) -> bool {
        match self.root {
            Some(root) => self.tree.is_attached(node, root),
            None => true,
        }
    }

    /// First proper ancestor of `a` that is also a proper ancestor of `b`.
    fn common_ancestor(&self, a: T::Node, b: T::Node) -> Option<T::Node> {
        let mut above_b: SmallVec<[T::Node; 16]> = SmallVec::new();
        let mut cur = self.tree.parent(b);
        while let Some(el) = cur {
            above_b.push(el);
            cur = self.tree.parent(el);
        }
        let mut cur = self.tree.parent(a);
        while let Some(el) = cur {
            if above_b.contains(&el) {
                return Some(el);
            }
            cur = self.tree.parent(el);
        }
        None
    }

    fn notify_focus(&mut self, node: T::Node, next: Option<T::Node>) {
        if let Some(collaborator) = self.registry.find(node) {
            collaborator.on_focus(next);
        }
    }
}

/// Push the children of `node` so that popping yields them in tree order.
fn push_children<T: FocusTree>(tree: &T, node: T::Node, stack: &mut SmallVec<[T::Node; 32]>) {
    let start = stack.len();
    stack.extend(tree.children(node));
    stack[start..].reverse();
}
