// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometric scoring of focus candidates.
//!
//! A candidate is scored relative to a *reference* rectangle (the current
//! selection) and a *history* rectangle (the cross-axis lane the user has been
//! travelling along). A score of `0.0` means the candidate is not reachable in
//! that heading; otherwise higher is better.
//!
//! The score combines three terms:
//!
//! - **Primary axis distance**: the gap between facing edges along the travel
//!   axis, inverted against `max_distance` and boosted by the fraction of the
//!   candidate that lies in the reference's *shadow* (its cross-axis overlap).
//! - **Secondary axis distance**: for candidates entirely outside the shadow,
//!   the cross-axis gap, inverted the same way.
//! - **History shadow**: for candidates inside the shadow, the fraction that
//!   also overlaps the history rectangle. With the default weights this term
//!   dominates, which keeps repeated moves on the same row or column.

use kurbo::Rect;

use crate::Heading;

/// Weights applied to each scoring term.
///
/// The defaults are calibration values carried over from tuning against real
/// layouts; they are not derived from first principles.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoreWeights {
    /// Weight of the (inverted, shadow-boosted) primary axis distance.
    pub primary_axis_distance: f64,
    /// Weight of the (inverted) secondary axis distance.
    pub secondary_axis_distance: f64,
    /// Weight of the fraction of the candidate inside the history rectangle.
    pub history_shadow: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            primary_axis_distance: 30.0,
            secondary_axis_distance: 20.0,
            history_shadow: 100_000.0,
        }
    }
}

/// Fraction of the potential extent that lies in the shadow of the reference extent.
///
/// The overlap length is divided by the shorter of the two extents, so the
/// result is in `[0, 1]` and symmetric when both extents have the same length.
/// Returns `0.0` when the extents do not overlap or either is empty.
pub fn percent_in_shadow(min_ref: f64, max_ref: f64, min_pot: f64, max_pot: f64) -> f64 {
    if min_ref >= max_pot || max_ref <= min_pot {
        return 0.0;
    }
    let overlap = max_ref.min(max_pot) - min_ref.max(min_pot);
    let short_edge = (max_pot - min_pot).min(max_ref - min_ref);
    if short_edge <= 0.0 {
        0.0
    } else {
        overlap / short_edge
    }
}

/// Score `candidate` with the default [`ScoreWeights`].
pub fn score(
    heading: Heading,
    max_distance: f64,
    history: &Rect,
    reference: &Rect,
    candidate: &Rect,
) -> f64 {
    ScoreWeights::default().score(heading, max_distance, history, reference, candidate)
}

impl ScoreWeights {
    /// Score `candidate` for a move along `heading` away from `reference`.
    ///
    /// `max_distance` is the cutoff horizon (typically the larger screen
    /// dimension): candidates further than that on either axis score `0.0`.
    pub fn score(
        &self,
        heading: Heading,
        max_distance: f64,
        history: &Rect,
        reference: &Rect,
        candidate: &Rect,
    ) -> f64 {
        // Reject anything that does not extend past the reference's leading edge.
        let behind = match heading {
            Heading::Left => candidate.x0 >= reference.x0,
            Heading::Right => candidate.x1 <= reference.x1,
            Heading::Up => candidate.y0 >= reference.y0,
            Heading::Down => candidate.y1 <= reference.y1,
        };
        if behind {
            return 0.0;
        }

        let primary = match heading {
            Heading::Left => reference.x0 - candidate.x1,
            Heading::Right => candidate.x0 - reference.x1,
            Heading::Up => reference.y0 - candidate.y1,
            Heading::Down => candidate.y0 - reference.y1,
        };

        // Cross-axis extents as (reference, candidate, history) spans.
        let (r, c, h) = if heading.is_horizontal() {
            (
                (reference.y0, reference.y1),
                (candidate.y0, candidate.y1),
                (history.y0, history.y1),
            )
        } else {
            (
                (reference.x0, reference.x1),
                (candidate.x0, candidate.x1),
                (history.x0, history.x1),
            )
        };

        let in_shadow = percent_in_shadow(r.0, r.1, c.0, c.1);
        let mut secondary = 0.0;
        let mut in_history = 0.0;
        if in_shadow > 0.0 {
            in_history = percent_in_shadow(h.0, h.1, c.0, c.1);
        } else if r.1 <= c.0 {
            secondary = c.0 - r.1;
        } else {
            secondary = r.0 - c.1;
        }

        if primary < 0.0 {
            return 0.0;
        }
        let mut primary = max_distance - primary;
        let secondary = max_distance - secondary;
        if primary < 0.0 || secondary < 0.0 {
            return 0.0;
        }
        primary += primary * in_shadow;
        primary * self.primary_axis_distance
            + secondary * self.secondary_axis_distance
            + in_history * self.history_shadow
    }
}
