// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Key codes to directions.
//!
//! Codes are the legacy DOM `keyCode` values. Each direction accepts several
//! aliases: the keyboard key, the gamepad "virtual key" codes some platforms
//! synthesize from controller input, and the dedicated navigation keys of TV
//! remotes.

use hashbrown::HashMap;
use understory_focus::Direction;

/// Default bindings, in lookup priority order.
pub const DIRECTION_CODES: [(Direction, &[u32]); 14] = [
    // Arrow, left stick, D-pad, navigation key.
    (Direction::Left, &[37, 214, 205, 140]),
    (Direction::Right, &[39, 213, 206, 141]),
    (Direction::Up, &[38, 211, 203, 138]),
    (Direction::Down, &[40, 212, 204, 139]),
    // Enter, space, navigation accept, gamepad A.
    (Direction::Submit, &[13, 32, 142, 195]),
    // Backspace, gamepad B.
    (Direction::Back, &[8, 196]),
    // Numpad keys paired with the matching gamepad buttons.
    (Direction::X, &[103, 197]),
    (Direction::Y, &[105, 198]),
    (Direction::TabLeft, &[100, 200]),
    (Direction::TabRight, &[102, 199]),
    (Direction::TabUp, &[104, 201]),
    (Direction::TabDown, &[98, 202]),
    (Direction::View, &[111, 208]),
    (Direction::Menu, &[106, 207]),
];

/// Lookup table from key code to [`Direction`].
#[derive(Clone, Debug)]
pub struct KeyMap {
    codes: HashMap<u32, Direction>,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyMap {
    /// A map holding every binding in [`DIRECTION_CODES`].
    pub fn new() -> Self {
        let mut map = Self::empty();
        for (direction, codes) in DIRECTION_CODES {
            for &code in codes {
                // Earlier rows win if a code is listed twice.
                map.codes.entry(code).or_insert(direction);
            }
        }
        map
    }

    /// A map with no bindings.
    pub fn empty() -> Self {
        Self {
            codes: HashMap::new(),
        }
    }

    /// Bind `code` to `direction`, returning the previous binding.
    pub fn bind(&mut self, code: u32, direction: Direction) -> Option<Direction> {
        self.codes.insert(code, direction)
    }

    /// Remove the binding for `code`.
    pub fn unbind(&mut self, code: u32) -> Option<Direction> {
        self.codes.remove(&code)
    }

    /// The direction bound to `code`.
    pub fn direction(&self, code: u32) -> Option<Direction> {
        self.codes.get(&code).copied()
    }
}

/// A key press as delivered by the host.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct KeyDown {
    /// Legacy `keyCode` of the key.
    pub key_code: u32,
    default_prevented: bool,
}

impl KeyDown {
    /// A key press nobody has handled yet.
    pub fn new(key_code: u32) -> Self {
        Self {
            key_code,
            default_prevented: false,
        }
    }

    /// Mark the key as consumed so the host skips its native behavior.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Whether some handler already consumed the key.
    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}
