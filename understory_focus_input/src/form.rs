// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Leave keys to form controls when they would edit text.

use understory_focus::{Direction, ElementKind, FocusTree};

/// Returns `true` if `direction` should be left to the native handling of
/// the selected form control instead of moving focus.
///
/// - Submit goes to the control if the selection is, or is inside, a form,
///   an input, or a text area.
/// - Up and down always navigate.
/// - Left, right, and back go to single-line text inputs (text, search, url,
///   tel, password) when a range is selected or the caret can still move that
///   way. Multi-line text areas always navigate.
pub fn is_for_form<T: FocusTree>(
    tree: &T,
    direction: Direction,
    selected: Option<T::Node>,
) -> bool {
    let Some(selected) = selected else {
        return false;
    };

    if direction == Direction::Submit {
        let mut cur = Some(selected);
        while let Some(node) = cur {
            if matches!(
                tree.describe(node).kind,
                ElementKind::Form | ElementKind::Input(_) | ElementKind::TextArea
            ) {
                return true;
            }
            cur = tree.parent(node);
        }
        return false;
    }

    let traits = tree.describe(selected);
    let ElementKind::Input(ty) = traits.kind else {
        return false;
    };
    if matches!(direction, Direction::Up | Direction::Down) || !ty.is_text_like() {
        return false;
    }
    let Some(caret) = traits.caret else {
        return false;
    };
    if caret.has_range() {
        return true;
    }
    match direction {
        Direction::Left | Direction::Back => caret.start > 0,
        Direction::Right => caret.start < caret.len,
        _ => false,
    }
}
