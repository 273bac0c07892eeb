// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::Direction;

/// A navigation attempt, bubbled from the selection toward the focus root.
///
/// Collaborators receive it through
/// [`Collaborator::fire_event`](crate::Collaborator::fire_event) and may:
///
/// - [`cancel`](Self::cancel) it, in which case the navigator takes no default
///   action but still reports the input as handled;
/// - [`stop_propagation`](Self::stop_propagation), so no further ancestors see it;
/// - overwrite [`candidate`](Self::candidate) to redirect a directional move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavigationEvent<K> {
    /// The input that triggered this attempt.
    pub direction: Direction,
    /// The selection when the attempt started.
    pub source: Option<K>,
    /// Where focus will move for directional input; `None` if nothing qualifies.
    pub candidate: Option<K>,
    /// Set when a collaborator has taken over the input.
    pub cancelled: bool,
    /// Set when bubbling should not continue to further ancestors.
    pub propagation_stopped: bool,
}

impl<K> NavigationEvent<K> {
    /// Create an event that has not been cancelled or stopped.
    pub fn new(direction: Direction, source: Option<K>, candidate: Option<K>) -> Self {
        Self {
            direction,
            source,
            candidate,
            cancelled: false,
            propagation_stopped: false,
        }
    }

    /// Suppress the navigator's default handling of this input.
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    /// Stop notifying further ancestors.
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }
}
