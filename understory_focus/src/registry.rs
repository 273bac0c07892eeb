// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Collaborators: host objects attached to nodes that observe and steer navigation.

use crate::NavigationEvent;

/// Behavior attached to a node by the UI binding layer.
///
/// Both methods have no-op defaults so a collaborator can implement only
/// what it needs.
pub trait Collaborator<K> {
    /// Called for every node whose membership in the selection path changes,
    /// and for the unchanged ancestors above them.
    ///
    /// `next` is the new selection, or `None` when this node just left the
    /// selection path.
    fn on_focus(&mut self, next: Option<K>) {
        let _ = next;
    }

    /// Called while a [`NavigationEvent`] bubbles from the selection toward the root.
    fn fire_event(&mut self, event: &mut NavigationEvent<K>) {
        let _ = event;
    }
}

/// Look up the collaborator attached to a node.
///
/// Nodes without a collaborator are skipped silently during walks.
pub trait Registry<K> {
    /// Returns `true` if `node` has a collaborator. Such nodes are always focus candidates.
    fn contains(&self, node: K) -> bool;

    /// Returns the collaborator attached to `node`, if any.
    fn find(&mut self, node: K) -> Option<&mut dyn Collaborator<K>>;

    /// Returns the next pending programmatic focus request, if any.
    ///
    /// Collaborators use this to ask for focus (for example when a dialog
    /// opens). The navigator drains requests in
    /// [`Navigator::process_focus_requests`](crate::Navigator::process_focus_requests).
    fn take_focus_request(&mut self) -> Option<K> {
        None
    }
}

/// A registry with no collaborators.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoRegistry;

impl<K> Registry<K> for NoRegistry {
    #[inline]
    fn contains(&self, _node: K) -> bool {
        false
    }

    #[inline]
    fn find(&mut self, _node: K) -> Option<&mut dyn Collaborator<K>> {
        None
    }
}
