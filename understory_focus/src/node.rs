// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-node traits the host reports, and the default focus eligibility test.

bitflags::bitflags! {
    /// Presentational selection markers applied by the navigator.
    ///
    /// The host decides what they look like; the navigator only toggles them.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Markers: u8 {
        /// Node is the selection or one of its ancestors below the root.
        const SELECTED = 0b0000_0001;
        /// Node is the selection itself.
        const DIRECT   = 0b0000_0010;
    }
}

/// ARIA roles whose elements can receive focus.
pub const FOCUSABLE_ROLES: [&str; 14] = [
    "button",
    "checkbox",
    "combobox",
    "link",
    "menuitem",
    "menuitemcheckbox",
    "menuitemradio",
    "option",
    "radio",
    "slider",
    "spinbutton",
    "tab",
    "textbox",
    "treeitem",
];

/// The kind of element a node represents.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// A hyperlink.
    Anchor,
    /// A push button.
    Button,
    /// A form input of the given type.
    Input(InputType),
    /// A drop-down list.
    Select,
    /// A multi-line text area.
    TextArea,
    /// A form container.
    Form,
    /// Anything else.
    #[default]
    Other,
}

/// Input types that matter to directional navigation.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum InputType {
    /// Single-line plain text.
    #[default]
    Text,
    /// Search field.
    Search,
    /// URL field.
    Url,
    /// Telephone number field.
    Tel,
    /// Password field.
    Password,
    /// Any other input (checkbox, range, ...).
    Other,
}

impl InputType {
    /// Returns `true` for single-line inputs where arrow keys move a caret.
    pub const fn is_text_like(self) -> bool {
        !matches!(self, Self::Other)
    }
}

/// Caret and selection state of a text control, in characters.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TextCaret {
    /// Start of the selection (the caret position when collapsed).
    pub start: usize,
    /// End of the selection.
    pub end: usize,
    /// Length of the control's value.
    pub len: usize,
}

impl TextCaret {
    /// Returns `true` when a range (not just a caret) is selected.
    pub const fn has_range(&self) -> bool {
        self.start != self.end
    }
}

/// What the host knows about a node.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct NodeTraits<'a> {
    /// Element kind.
    pub kind: ElementKind,
    /// ARIA role, if declared.
    pub role: Option<&'a str>,
    /// Declared tab index, if any.
    pub tab_index: Option<i32>,
    /// Caret state for text controls.
    pub caret: Option<TextCaret>,
}

/// Default eligibility test.
///
/// A node can receive focus if it is an interactive control, carries a
/// role from [`FOCUSABLE_ROLES`], or declares a non-negative tab index.
/// Registered collaborators are eligible as well; the navigator checks that
/// separately.
pub fn is_focusable_by_default(traits: &NodeTraits<'_>) -> bool {
    matches!(
        traits.kind,
        ElementKind::Anchor
            | ElementKind::Button
            | ElementKind::Input(_)
            | ElementKind::Select
            | ElementKind::TextArea
    ) || traits.role.is_some_and(|r| FOCUSABLE_ROLES.contains(&r))
        || traits.tab_index.is_some_and(|t| t >= 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn controls_are_focusable() {
        for kind in [
            ElementKind::Anchor,
            ElementKind::Button,
            ElementKind::Input(InputType::Other),
            ElementKind::Select,
            ElementKind::TextArea,
        ] {
            let traits = NodeTraits {
                kind,
                ..NodeTraits::default()
            };
            assert!(is_focusable_by_default(&traits), "{kind:?}");
        }
        assert!(!is_focusable_by_default(&NodeTraits {
            kind: ElementKind::Form,
            ..NodeTraits::default()
        }));
    }

    #[test]
    fn roles_and_tab_index_make_plain_nodes_focusable() {
        let plain = NodeTraits::default();
        assert!(!is_focusable_by_default(&plain));
        assert!(is_focusable_by_default(&NodeTraits {
            role: Some("menuitem"),
            ..plain
        }));
        assert!(!is_focusable_by_default(&NodeTraits {
            role: Some("presentation"),
            ..plain
        }));
        assert!(is_focusable_by_default(&NodeTraits {
            tab_index: Some(0),
            ..plain
        }));
        assert!(!is_focusable_by_default(&NodeTraits {
            tab_index: Some(-1),
            ..plain
        }));
    }
}
