// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Candidate snapshots and pluggable selection policies.

use kurbo::Rect;

use crate::Heading;
use crate::score::ScoreWeights;

/// A single focusable candidate within a [`FocusSpace`].
#[derive(Clone, Debug, PartialEq)]
pub struct FocusEntry<K> {
    /// Identifier for this focusable node.
    pub id: K,
    /// Pixel-rounded bounds in viewport coordinates.
    pub rect: Rect,
}

/// A read-only view of focusable candidates.
///
/// The [`Navigator`](crate::Navigator) builds one per directional move from a
/// pre-order walk of the focus root, so entries appear in tree order. Policies
/// should treat it as an immutable snapshot.
#[derive(Clone, Debug)]
pub struct FocusSpace<'a, K> {
    /// Focusable candidates, excluding the current selection.
    pub nodes: &'a [FocusEntry<K>],
}

/// Where a directional search starts from.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SearchOrigin {
    /// Bounds of the current selection (or the cached bounds if it was detached).
    pub reference: Rect,
    /// Cross-axis lane remembered from previous moves.
    pub history: Rect,
    /// Distance beyond which candidates are ignored.
    pub max_distance: f64,
}

/// Trait for directional focus policies.
///
/// A policy receives a heading, the search origin, and a read-only view of
/// candidates, and returns the chosen entry if any.
pub trait FocusPolicy<K> {
    /// Pick the next focus target, or `None` when nothing is reachable.
    fn next<'a>(
        &self,
        heading: Heading,
        origin: &SearchOrigin,
        space: &FocusSpace<'a, K>,
    ) -> Option<&'a FocusEntry<K>>;
}

/// Shadow-and-history scoring policy.
///
/// Every candidate is scored with [`ScoreWeights::score`]; the highest
/// non-zero score wins and ties keep the candidate that appears first.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShadowPolicy {
    /// Weights for the individual scoring terms.
    pub weights: ScoreWeights,
}

impl<K> FocusPolicy<K> for ShadowPolicy {
    fn next<'a>(
        &self,
        heading: Heading,
        origin: &SearchOrigin,
        space: &FocusSpace<'a, K>,
    ) -> Option<&'a FocusEntry<K>> {
        let mut best: Option<&'a FocusEntry<K>> = None;
        let mut best_score = 0.0;
        for entry in space.nodes {
            let score = self.weights.score(
                heading,
                origin.max_distance,
                &origin.history,
                &origin.reference,
                &entry.rect,
            );
            if score > best_score {
                best_score = score;
                best = Some(entry);
            }
        }
        best
    }
}
