// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gamepad state and per-device debouncing.
//!
//! Devices are read through a [`GamepadSource`], which returns a fresh
//! [`GamepadSnapshot`] per device on every poll. Each connected device gets
//! its own [`PadChannels`]: a repeating debouncer for each of the four
//! directions (stick deflection or D-pad) and an edge-triggered debouncer for
//! each of the ten action buttons.

use smallvec::SmallVec;
use understory_event_state::debounce::{DirectionalDebouncer, FiredDebouncer, RepeatTiming};
use understory_focus::{Direction, Heading};

use crate::InputConfig;

bitflags::bitflags! {
    /// Pressed buttons, one bit per index of the standard gamepad mapping.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct GamepadButtons: u32 {
        /// Bottom face button (A).
        const A = 1 << 0;
        /// Right face button (B).
        const B = 1 << 1;
        /// Left face button (X).
        const X = 1 << 2;
        /// Top face button (Y).
        const Y = 1 << 3;
        /// Left bumper.
        const LEFT_BUMPER = 1 << 4;
        /// Right bumper.
        const RIGHT_BUMPER = 1 << 5;
        /// Left trigger.
        const LEFT_TRIGGER = 1 << 6;
        /// Right trigger.
        const RIGHT_TRIGGER = 1 << 7;
        /// View / select / back.
        const VIEW = 1 << 8;
        /// Menu / start.
        const MENU = 1 << 9;
        /// Left stick click.
        const LEFT_STICK = 1 << 10;
        /// Right stick click.
        const RIGHT_STICK = 1 << 11;
        /// D-pad up.
        const DPAD_UP = 1 << 12;
        /// D-pad down.
        const DPAD_DOWN = 1 << 13;
        /// D-pad left.
        const DPAD_LEFT = 1 << 14;
        /// D-pad right.
        const DPAD_RIGHT = 1 << 15;
        /// Guide / home.
        const HOME = 1 << 16;
    }
}

impl GamepadButtons {
    /// The button at `index` in the standard mapping, or empty past the last one.
    pub fn from_index(index: u8) -> Self {
        1_u32
            .checked_shl(u32::from(index))
            .map_or(Self::empty(), Self::from_bits_truncate)
    }

    /// The button bound to `direction`.
    pub fn for_direction(direction: Direction) -> Self {
        Self::from_index(direction.button_index())
    }
}

/// Identifier the platform assigns to a device.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GamepadId(pub u32);

/// State of one device at one instant.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct GamepadSnapshot {
    /// Which device.
    pub id: GamepadId,
    /// `false` once the device has gone away.
    pub connected: bool,
    /// Pressed buttons.
    pub buttons: GamepadButtons,
    /// Left stick, `[x, y]` in `-1..=1` with positive y pointing down.
    pub axes: [f64; 2],
}

impl GamepadSnapshot {
    /// Whether the left stick is pushed past `threshold` toward `heading`.
    pub fn stick_toward(&self, heading: Heading, threshold: f64) -> bool {
        match heading {
            Heading::Left => self.axes[0] < -threshold,
            Heading::Right => self.axes[0] > threshold,
            Heading::Up => self.axes[1] < -threshold,
            Heading::Down => self.axes[1] > threshold,
        }
    }
}

/// Where gamepad state comes from.
pub trait GamepadSource {
    /// Current state of every device the platform knows about.
    fn snapshots(&mut self) -> impl Iterator<Item = GamepadSnapshot> + '_;

    /// Whether an on-screen keyboard is covering the UI. Gamepad input is
    /// ignored while it is, since the keyboard consumes it.
    fn keyboard_visible(&self) -> bool {
        false
    }
}

/// A [`GamepadSource`] with no devices, for keyboard-only hosts.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoGamepads;

impl GamepadSource for NoGamepads {
    fn snapshots(&mut self) -> impl Iterator<Item = GamepadSnapshot> + '_ {
        core::iter::empty()
    }
}

#[derive(Clone, Debug)]
enum Channel {
    Repeat(DirectionalDebouncer),
    Edge(FiredDebouncer),
}

/// Debounce state for one device.
#[derive(Clone, Debug)]
pub struct PadChannels {
    channels: [(Direction, Channel); 14],
}

impl Default for PadChannels {
    fn default() -> Self {
        Self::new(RepeatTiming::default())
    }
}

impl PadChannels {
    /// Fresh channels, all released.
    pub fn new(repeat: RepeatTiming) -> Self {
        Self {
            channels: Direction::ALL.map(|d| {
                let channel = if d.is_directional() {
                    Channel::Repeat(DirectionalDebouncer::with_timing(repeat))
                } else {
                    Channel::Edge(FiredDebouncer::new())
                };
                (d, channel)
            }),
        }
    }

    /// Feed one snapshot and collect the directions that fire, in
    /// [`Direction::ALL`] order.
    pub fn poll(
        &mut self,
        pad: &GamepadSnapshot,
        now: u64,
        config: &InputConfig,
    ) -> SmallVec<[Direction; 4]> {
        let mut fired = SmallVec::new();
        for (direction, channel) in &mut self.channels {
            let button = GamepadButtons::for_direction(*direction);
            let pressed = pad.buttons.contains(button);
            let fire = match channel {
                Channel::Repeat(debouncer) => {
                    let stick = direction
                        .heading()
                        .is_some_and(|h| pad.stick_toward(h, config.joystick_threshold));
                    debouncer.attempt(pressed || stick, now)
                }
                Channel::Edge(debouncer) => debouncer.attempt(pressed),
            };
            if fire {
                fired.push(*direction);
            }
        }
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pad(buttons: GamepadButtons, axes: [f64; 2]) -> GamepadSnapshot {
        GamepadSnapshot {
            id: GamepadId(1),
            connected: true,
            buttons,
            axes,
        }
    }

    fn stick(x: f64, y: f64) -> GamepadSnapshot {
        pad(GamepadButtons::empty(), [x, y])
    }

    #[test]
    fn buttons_follow_the_standard_mapping() {
        let button = GamepadButtons::for_direction;
        assert_eq!(button(Direction::Submit), GamepadButtons::A);
        assert_eq!(button(Direction::Back), GamepadButtons::B);
        assert_eq!(button(Direction::TabUp), GamepadButtons::LEFT_TRIGGER);
        assert_eq!(button(Direction::TabDown), GamepadButtons::RIGHT_TRIGGER);
        assert_eq!(button(Direction::Left), GamepadButtons::DPAD_LEFT);
        assert_eq!(GamepadButtons::from_index(40), GamepadButtons::empty());
    }

    #[test]
    fn stick_needs_to_pass_threshold() {
        let config = InputConfig::default();
        let mut ch = PadChannels::default();
        assert!(ch.poll(&stick(-0.4, 0.0), 0, &config).is_empty());
        assert_eq!(
            ch.poll(&stick(-0.6, 0.0), 16, &config).as_slice(),
            &[Direction::Left]
        );
        let mut ch = PadChannels::default();
        assert_eq!(
            ch.poll(&stick(0.0, 0.9), 0, &config).as_slice(),
            &[Direction::Down]
        );
    }

    #[test]
    fn dpad_and_stick_share_a_channel() {
        let config = InputConfig::default();
        let mut ch = PadChannels::default();
        let dpad = pad(GamepadButtons::DPAD_RIGHT, [0.0, 0.0]);
        assert_eq!(ch.poll(&dpad, 0, &config).as_slice(), &[Direction::Right]);
        // Switching from D-pad to stick while held does not fire again.
        assert!(ch.poll(&stick(0.8, 0.0), 100, &config).is_empty());
        assert_eq!(
            ch.poll(&stick(0.8, 0.0), 500, &config).as_slice(),
            &[Direction::Right]
        );
    }

    #[test]
    fn actions_fire_once_per_press_in_poll_order() {
        let config = InputConfig::default();
        let mut ch = PadChannels::default();
        let held =
            GamepadButtons::A | GamepadButtons::Y | GamepadButtons::MENU | GamepadButtons::DPAD_UP;
        assert_eq!(
            ch.poll(&pad(held, [0.0, 0.0]), 0, &config).as_slice(),
            &[
                Direction::Up,
                Direction::Menu,
                Direction::Submit,
                Direction::Y,
            ]
        );
        assert!(ch.poll(&pad(held, [0.0, 0.0]), 16, &config).is_empty());
        assert!(ch.poll(&stick(0.0, 0.0), 32, &config).is_empty());
        let submit = pad(GamepadButtons::A, [0.0, 0.0]);
        assert_eq!(
            ch.poll(&submit, 48, &config).as_slice(),
            &[Direction::Submit]
        );
    }
}
