// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Navigation directions and their directional subset.

use crate::Error;

/// A discrete navigation input.
///
/// The four cardinal variants drive candidate search; everything else is an
/// action that is routed to collaborators unchanged.
///
/// Each variant is bound to a button of the standard gamepad mapping, see
/// [`Direction::button_index`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    /// Activate the selected element (A / Enter).
    Submit,
    /// Go back (B / Backspace).
    Back,
    /// The X face button.
    X,
    /// The Y face button.
    Y,
    /// Left bumper.
    TabLeft,
    /// Right bumper.
    TabRight,
    /// Left trigger.
    TabUp,
    /// Right trigger.
    TabDown,
    /// The view (back/select) button.
    View,
    /// The menu (start) button.
    Menu,
    /// Move focus up.
    Up,
    /// Move focus down.
    Down,
    /// Move focus left.
    Left,
    /// Move focus right.
    Right,
}

impl Direction {
    /// Every direction, in the order a gamepad poll reports them.
    pub const ALL: [Self; 14] = [
        Self::Left,
        Self::Right,
        Self::Down,
        Self::Up,
        Self::TabLeft,
        Self::TabRight,
        Self::TabDown,
        Self::TabUp,
        Self::View,
        Self::Menu,
        Self::Submit,
        Self::Back,
        Self::X,
        Self::Y,
    ];

    /// Index of the button bound to this direction in the standard gamepad mapping.
    pub const fn button_index(self) -> u8 {
        match self {
            Self::Submit => 0,
            Self::Back => 1,
            Self::X => 2,
            Self::Y => 3,
            Self::TabLeft => 4,
            Self::TabRight => 5,
            Self::TabUp => 6,
            Self::TabDown => 7,
            Self::View => 8,
            Self::Menu => 9,
            Self::Up => 12,
            Self::Down => 13,
            Self::Left => 14,
            Self::Right => 15,
        }
    }

    /// Returns the heading for the four cardinal directions, `None` for actions.
    pub const fn heading(self) -> Option<Heading> {
        match self {
            Self::Left => Some(Heading::Left),
            Self::Right => Some(Heading::Right),
            Self::Up => Some(Heading::Up),
            Self::Down => Some(Heading::Down),
            _ => None,
        }
    }

    /// Returns `true` for left/right/up/down.
    pub const fn is_directional(self) -> bool {
        self.heading().is_some()
    }
}

impl TryFrom<u8> for Direction {
    type Error = Error;

    fn try_from(button: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|d| d.button_index() == button)
            .ok_or(Error::UnknownButton(button))
    }
}

/// One of the four directions that move focus spatially.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Heading {
    /// Toward smaller x.
    Left,
    /// Toward larger x.
    Right,
    /// Toward smaller y.
    Up,
    /// Toward larger y.
    Down,
}

impl Heading {
    /// Returns `true` when travel is along the x axis.
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }
}

impl From<Heading> for Direction {
    fn from(heading: Heading) -> Self {
        match heading {
            Heading::Left => Self::Left,
            Heading::Right => Self::Right,
            Heading::Up => Self::Up,
            Heading::Down => Self::Down,
        }
    }
}

impl TryFrom<Direction> for Heading {
    type Error = Error;

    fn try_from(direction: Direction) -> Result<Self, Self::Error> {
        direction.heading().ok_or(Error::NotDirectional(direction))
    }
}
