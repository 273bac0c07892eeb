// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Debouncers that turn a sampled boolean level into discrete events.
//!
//! ## Directional repeat
//!
//! [`DirectionalDebouncer`] fires as soon as its input becomes active, waits
//! [`RepeatTiming::initial_ms`] before firing again, then repeats every
//! [`RepeatTiming::fast_ms`] for as long as the input stays active. Any sample
//! with the input inactive resets it, so the next activation fires
//! immediately and starts the long wait over.
//!
//! ```
//! use understory_event_state::debounce::{DebounceStage, DirectionalDebouncer};
//!
//! let mut d = DirectionalDebouncer::new();
//! let fired: Vec<u64> = (0..=800)
//!     .step_by(50)
//!     .filter(|&t| d.attempt(true, t))
//!     .collect();
//! assert_eq!(fired, [0, 500, 650, 800]);
//! assert_eq!(d.stage(), DebounceStage::Fast);
//! ```
//!
//! ## Edge trigger
//!
//! [`FiredDebouncer`] fires on the inactive → active edge only.
//!
//! ```
//! use understory_event_state::debounce::FiredDebouncer;
//!
//! let mut d = FiredDebouncer::new();
//! let levels = [false, true, true, false, true];
//! let fired: Vec<bool> = levels.iter().map(|&l| d.attempt(l)).collect();
//! assert_eq!(fired, [false, true, false, false, true]);
//! ```

/// Where a [`DirectionalDebouncer`] is in its repeat cycle.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum DebounceStage {
    /// Input is inactive.
    #[default]
    Idle,
    /// Input fired once and is waiting out the initial delay.
    Held,
    /// Input is repeating at the fast interval.
    Fast,
}

/// Repeat timing for [`DirectionalDebouncer`], in milliseconds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RepeatTiming {
    /// Delay between the first event and the first repeat.
    pub initial_ms: u64,
    /// Delay between subsequent repeats.
    pub fast_ms: u64,
}

impl Default for RepeatTiming {
    fn default() -> Self {
        Self {
            initial_ms: 500,
            fast_ms: 150,
        }
    }
}

/// Press, pause, then repeat.
#[derive(Clone, Debug, Default)]
pub struct DirectionalDebouncer {
    /// Repeat timing.
    pub timing: RepeatTiming,
    stage: DebounceStage,
    held_at: u64,
}

impl DirectionalDebouncer {
    /// Create an idle debouncer with the default [`RepeatTiming`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an idle debouncer with custom timing.
    pub fn with_timing(timing: RepeatTiming) -> Self {
        Self {
            timing,
            ..Self::default()
        }
    }

    /// Current stage.
    pub fn stage(&self) -> DebounceStage {
        self.stage
    }

    /// Sample the input at `now` (milliseconds) and report whether to emit an event.
    ///
    /// Timestamps are expected to be non-decreasing; a timestamp earlier than
    /// the last event is treated as no time having passed.
    pub fn attempt(&mut self, active: bool, now: u64) -> bool {
        if !active {
            self.stage = DebounceStage::Idle;
            return false;
        }

        let wait = match self.stage {
            DebounceStage::Idle => {
                self.stage = DebounceStage::Held;
                self.held_at = now;
                return true;
            }
            DebounceStage::Held => self.timing.initial_ms,
            DebounceStage::Fast => self.timing.fast_ms,
        };
        if now.saturating_sub(self.held_at) < wait {
            return false;
        }
        self.held_at = now;
        self.stage = DebounceStage::Fast;
        true
    }

    /// Return to [`DebounceStage::Idle`].
    pub fn reset(&mut self) {
        self.stage = DebounceStage::Idle;
    }
}

/// Fire once per activation.
#[derive(Copy, Clone, Debug, Default)]
pub struct FiredDebouncer {
    active: bool,
}

impl FiredDebouncer {
    /// Create a debouncer that considers the input inactive.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the last sample was active.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Sample the input and report whether it just became active.
    pub fn attempt(&mut self, active: bool) -> bool {
        let was_active = core::mem::replace(&mut self.active, active);
        active && !was_active
    }

    /// Forget the last sample, so an input that is still held fires again.
    pub fn reset(&mut self) {
        self.active = false;
    }
}
