// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Focus Input: keyboard and gamepad backends for `understory_focus`.
//!
//! [`FocusInput`] wraps a [`Navigator`](understory_focus::Navigator) and turns
//! raw input into navigation:
//!
//! - **Keyboard.** Key codes are looked up in a [`KeyMap`] (arrow keys, enter,
//!   backspace, numpad, and the gamepad/remote "virtual key" aliases). Keys a
//!   focused text field would use for editing are left alone ([`is_for_form`]).
//! - **Gamepads.** Each frame, every connected device is read from a
//!   [`GamepadSource`] and debounced per button by [`PadChannels`]: directions
//!   repeat while held, action buttons fire once per press.
//! - **Frames.** The driver asks a [`FrameClock`] for frames while devices are
//!   connected or a scroll animation is running, and never otherwise.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::{Rect, Size};
//! use understory_focus::arena::{Arena, Element};
//! use understory_focus::{Navigator, ScrollSpeed};
//! use understory_focus_input::{
//!     FocusInput, FrameQueue, GamepadButtons, GamepadId, GamepadSnapshot, GamepadSource,
//!     InputConfig, KeyDown,
//! };
//!
//! struct OnePad(GamepadSnapshot);
//!
//! impl GamepadSource for OnePad {
//!     fn snapshots(&mut self) -> impl Iterator<Item = GamepadSnapshot> + '_ {
//!         core::iter::once(self.0)
//!     }
//! }
//!
//! let mut arena = Arena::new(Size::new(300.0, 100.0));
//! let root = arena.root();
//! let a = arena.insert(root, Element::button(Rect::new(0.0, 0.0, 50.0, 50.0)));
//! let b = arena.insert(root, Element::button(Rect::new(100.0, 0.0, 150.0, 50.0)));
//!
//! let pad = GamepadSnapshot { id: GamepadId(0), connected: true, ..Default::default() };
//! let config = InputConfig { scroll_speed: ScrollSpeed::Instant, ..Default::default() };
//! let mut input =
//!     FocusInput::new(Navigator::new(arena), OnePad(pad), FrameQueue::new(), config).unwrap();
//! input.bootstrap(root);
//! assert!(input.clock().pending().is_some());
//!
//! // Right arrow from nothing selected lands on the first button.
//! let mut key = KeyDown::new(39);
//! assert!(input.handle_key_down(&mut key));
//! assert!(key.default_prevented());
//! assert_eq!(input.navigator().selected(), Some(a));
//!
//! // D-pad right on the next frame moves on.
//! input.source_mut().0.buttons = GamepadButtons::DPAD_RIGHT;
//! let events = input.on_frame(16);
//! assert_eq!(events.len(), 1);
//! assert!(events[0].handled);
//! assert_eq!(input.navigator().selected(), Some(b));
//! ```
//!
//! This crate is `no_std`.

#![no_std]

mod config;
mod driver;
mod form;
mod frame;
mod gamepad;
mod keymap;

pub use config::{ConfigError, InputConfig};
pub use driver::{FocusInput, InputEvent};
pub use form::is_for_form;
pub use frame::{FrameClock, FrameId, FrameQueue};
pub use gamepad::{
    GamepadButtons, GamepadId, GamepadSnapshot, GamepadSource, NoGamepads, PadChannels,
};
pub use keymap::{DIRECTION_CODES, KeyDown, KeyMap};
