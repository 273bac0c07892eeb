// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Focus: spatial focus navigation for directional input.
//!
//! Keyboards, gamepads, and TV remotes produce "move left / right / up / down"
//! rather than pointer positions. This crate decides which element should
//! receive focus next, maintains selection markers along the path from the
//! focus root to the selection, lets host collaborators veto or redirect
//! moves, and keeps the selection scrolled into view.
//!
//! The pieces:
//! - A **host tree** ([`FocusTree`]) exposing structure, geometry, and a few
//!   side effects (activation, click, back, scroll offsets, markers).
//! - **Collaborators** ([`Collaborator`] via a [`Registry`]) attached to nodes,
//!   which observe selection changes and receive bubbling [`NavigationEvent`]s.
//! - A **policy** ([`FocusPolicy`]) that picks a candidate from a read-only
//!   [`FocusSpace`]. The default [`ShadowPolicy`] scores candidates by how much
//!   they overlap the selection on the cross axis, how far away they are, and
//!   how well they line up with the lane remembered from previous moves.
//! - The [`Navigator`], which ties these together.
//!
//! ## Minimal example
//!
//! A 2×2 grid driven through the bundled [`arena::Arena`] tree:
//!
//! ```rust
//! use kurbo::{Rect, Size};
//! use understory_focus::arena::{Arena, Element};
//! use understory_focus::{Direction, Markers, Navigator, ScrollSpeed};
//!
//! let mut arena = Arena::new(Size::new(200.0, 200.0));
//! let root = arena.root();
//! let cell = |x: f64, y: f64| Element::button(Rect::new(x, y, x + 50.0, y + 50.0));
//! let top_left = arena.insert(root, cell(0.0, 0.0));
//! let top_right = arena.insert(root, cell(100.0, 0.0));
//! let bottom_left = arena.insert(root, cell(0.0, 100.0));
//! let _bottom_right = arena.insert(root, cell(100.0, 100.0));
//!
//! let mut nav = Navigator::new(arena);
//! nav.set_root(root);
//! nav.select_node(top_left);
//!
//! assert!(nav.fire(Direction::Right, ScrollSpeed::Instant));
//! assert_eq!(nav.selected(), Some(top_right));
//! assert!(nav.fire(Direction::Left, ScrollSpeed::Instant));
//! assert!(nav.fire(Direction::Down, ScrollSpeed::Instant));
//! assert_eq!(nav.selected(), Some(bottom_left));
//! assert!(nav.tree().markers(bottom_left).contains(Markers::DIRECT));
//!
//! // Nothing lies further down.
//! assert!(!nav.fire(Direction::Down, ScrollSpeed::Instant));
//! ```
//!
//! ## Scoring
//!
//! [`score`] and [`percent_in_shadow`] are public so hosts can build their own
//! policies on top of the same geometry. Scores are relative: only their order
//! matters, and `0` means "not a candidate".
//!
//! ## History
//!
//! After a move the navigator remembers a lane ([`Navigator::history_rect`])
//! spanning the overlap of the old and new selection on the cross axis and
//! unbounded along the travel axis. Subsequent moves prefer candidates inside
//! that lane, so a sequence of Up/Down moves through a ragged layout does not
//! drift sideways. The lane resets on any non-directional input and whenever a
//! move finds nothing.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod arena;
mod direction;
mod error;
mod event;
mod navigator;
mod node;
mod policy;
mod rect;
mod registry;
mod score;
mod scroll;
mod tree;

pub use direction::{Direction, Heading};
pub use error::Error;
pub use event::NavigationEvent;
pub use navigator::{Navigator, Selection};
pub use node::{
    ElementKind, FOCUSABLE_ROLES, InputType, Markers, NodeTraits, TextCaret,
    is_focusable_by_default,
};
pub use policy::{FocusEntry, FocusPolicy, FocusSpace, SearchOrigin, ShadowPolicy};
pub use rect::{DEFAULT_RECT, is_degenerate, next_history_rect, round_rect};
pub use registry::{Collaborator, NoRegistry, Registry};
pub use score::{ScoreWeights, percent_in_shadow, score};
pub use scroll::{Axis, ScrollAnimation, ScrollAnimator, ScrollContainer, ScrollSpeed, lerp};
pub use tree::FocusTree;
