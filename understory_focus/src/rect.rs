// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rectangle helpers shared by scoring and the navigator.
//!
//! Rectangles are [`kurbo::Rect`] in viewport coordinates: `x0` is the left
//! edge, `y0` the top, `x1` the right and `y1` the bottom.

use kurbo::Rect;

use crate::Heading;

/// Reference rectangle used when nothing better is known.
///
/// Every edge sits at `-1` rather than `0` so that elements touching the
/// viewport edge still overlap it in shadow tests.
pub const DEFAULT_RECT: Rect = Rect::new(-1.0, -1.0, -1.0, -1.0);

/// Snap a rectangle to whole pixels.
///
/// Every edge is floored, so `bottom == top + height` and `right == left + width`
/// still hold exactly afterwards.
pub fn round_rect(rect: Rect) -> Rect {
    rect.floor()
}

/// Returns `true` if the rectangle is less than a pixel wide or tall.
///
/// Such elements are not focus candidates.
pub fn is_degenerate(rect: Rect) -> bool {
    rect.width() < 1.0 || rect.height() < 1.0
}

/// Compute the history rectangle after a successful move along `heading`.
///
/// The axis perpendicular to travel becomes the intersection of the
/// candidate, the reference and the previous history extents; when that
/// intersection is empty the candidate's own extent is used instead. The
/// axis parallel to travel is unbounded.
pub fn next_history_rect(
    heading: Heading,
    history: Rect,
    reference: Rect,
    candidate: Rect,
) -> Rect {
    if heading.is_horizontal() {
        let mut top = candidate.y0.max(reference.y0).max(history.y0);
        let mut bottom = candidate.y1.min(reference.y1).min(history.y1);
        if bottom <= top {
            top = candidate.y0;
            bottom = candidate.y1;
        }
        Rect::new(f64::NEG_INFINITY, top, f64::INFINITY, bottom)
    } else {
        let mut left = candidate.x0.max(reference.x0).max(history.x0);
        let mut right = candidate.x1.min(reference.x1).min(history.x1);
        if right <= left {
            left = candidate.x0;
            right = candidate.x1;
        }
        Rect::new(left, f64::NEG_INFINITY, right, f64::INFINITY)
    }
}
