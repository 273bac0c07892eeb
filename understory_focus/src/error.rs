// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::Direction;

/// Errors raised when converting raw input or validating configuration.
///
/// Navigation itself never fails: a missing candidate or a cancelled event is
/// reported through the `bool`/`Option` results of the [`Navigator`](crate::Navigator).
#[derive(Copy, Clone, Debug, PartialEq, thiserror::Error)]
pub enum Error {
    /// No direction is bound to this standard-gamepad button index.
    #[error("no direction is bound to gamepad button {0}")]
    UnknownButton(u8),
    /// An action was used where a heading (left/right/up/down) is required.
    #[error("{0:?} is an action, not a heading")]
    NotDirectional(Direction),
    /// Animated scroll speeds must be finite and strictly positive.
    #[error("scroll speed must be finite and positive, got {0}")]
    InvalidScrollSpeed(f64),
}
