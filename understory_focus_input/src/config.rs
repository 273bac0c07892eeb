// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tunables for the input driver.

use understory_event_state::debounce::RepeatTiming;
use understory_focus::ScrollSpeed;

/// Configuration for [`FocusInput`](crate::FocusInput).
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InputConfig {
    /// How moves scroll the new selection into view.
    pub scroll_speed: ScrollSpeed,
    /// Stick deflection (0..1) that counts as a directional press.
    pub joystick_threshold: f64,
    /// Repeat timing for held directions.
    pub repeat: RepeatTiming,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            scroll_speed: ScrollSpeed::default(),
            joystick_threshold: 0.5,
            repeat: RepeatTiming::default(),
        }
    }
}

impl InputConfig {
    /// Check that every value is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let threshold = self.joystick_threshold;
        if !(threshold > 0.0 && threshold < 1.0) {
            return Err(ConfigError::InvalidJoystickThreshold(threshold));
        }
        if let ScrollSpeed::Animated(speed) = self.scroll_speed {
            ScrollSpeed::animated(speed)?;
        }
        if self.repeat.fast_ms == 0 {
            return Err(ConfigError::ZeroRepeatInterval);
        }
        Ok(())
    }
}

/// Invalid [`InputConfig`] values.
#[derive(Copy, Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// The threshold must lie strictly between 0 and 1.
    #[error("joystick threshold must be between 0 and 1 (exclusive), got {0}")]
    InvalidJoystickThreshold(f64),
    /// A held direction would repeat on every frame.
    #[error("fast repeat interval must be at least 1 ms")]
    ZeroRepeatInterval,
    /// Rejected by the navigation engine.
    #[error(transparent)]
    Focus(#[from] understory_focus::Error),
}
