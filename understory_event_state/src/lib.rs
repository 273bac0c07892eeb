// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Event State: small state machines for input handling.
//!
//! Raw input devices report *levels* ("the stick is pushed left right now"),
//! while UI code wants discrete *events* ("move left once"). The types here
//! sit between the two. They hold no device handles and never read a clock;
//! callers pass in the current level and timestamp on every poll.
//!
//! - [`debounce::DirectionalDebouncer`]: press, pause, then repeat. Suited
//!   to joysticks and D-pads held down to scroll through a list.
//! - [`debounce::FiredDebouncer`]: fire once per press. Suited to action
//!   buttons.
//!
//! ```
//! use understory_event_state::debounce::{DirectionalDebouncer, FiredDebouncer};
//!
//! let mut stick = DirectionalDebouncer::new();
//! assert!(stick.attempt(true, 0));
//! assert!(!stick.attempt(true, 100));
//! assert!(stick.attempt(true, 500));
//!
//! let mut a = FiredDebouncer::new();
//! assert!(a.attempt(true));
//! assert!(!a.attempt(true));
//! ```
//!
//! This crate is `no_std`.

#![no_std]

pub mod debounce;
