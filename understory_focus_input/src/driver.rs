// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The input driver: keyboard, gamepads, and frames into a [`Navigator`].

use hashbrown::HashMap;
use smallvec::SmallVec;
use understory_focus::{Direction, FocusPolicy, FocusTree, Navigator, Registry, ShadowPolicy};

use crate::{
    ConfigError, FrameClock, FrameId, GamepadId, GamepadSnapshot, GamepadSource, InputConfig,
    KeyDown, KeyMap, PadChannels, is_for_form,
};

/// A direction produced by a gamepad during [`FocusInput::on_frame`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct InputEvent {
    /// The device that produced it.
    pub device: GamepadId,
    /// What was pressed.
    pub direction: Direction,
    /// Whether the navigator acted on it.
    pub handled: bool,
}

/// Feeds keyboard and gamepad input to a [`Navigator`].
///
/// The driver is inert until [`bootstrap`](Self::bootstrap). After that:
///
/// - the host forwards key presses to [`handle_key_down`](Self::handle_key_down),
///   newly connected devices to [`gamepad_connected`](Self::gamepad_connected),
///   and focus changes made outside the navigator to [`focus_in`](Self::focus_in);
/// - whenever gamepads are connected or a scroll animation is running, the
///   driver keeps exactly one frame requested from its [`FrameClock`], and the
///   host calls [`on_frame`](Self::on_frame) when it arrives.
///
/// [`teardown`](Self::teardown) cancels the outstanding frame, forgets every
/// device, and unsubscribes the navigator.
pub struct FocusInput<T, R, S, C, P = ShadowPolicy>
where
    T: FocusTree,
{
    navigator: Navigator<T, R, P>,
    source: S,
    clock: C,
    keymap: KeyMap,
    config: InputConfig,
    pads: HashMap<GamepadId, PadChannels>,
    frame: Option<FrameId>,
    active: bool,
}

impl<T: FocusTree, R, S, C, P> core::fmt::Debug for FocusInput<T, R, S, C, P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FocusInput")
            .field("navigator", &self.navigator)
            .field("config", &self.config)
            .field("pads", &self.pads.len())
            .field("frame", &self.frame)
            .field("active", &self.active)
            .finish_non_exhaustive()
    }
}

impl<T, R, S, C, P> FocusInput<T, R, S, C, P>
where
    T: FocusTree,
    R: Registry<T::Node>,
    P: FocusPolicy<T::Node>,
    S: GamepadSource,
    C: FrameClock,
{
    /// Create a driver with the default [`KeyMap`].
    pub fn new(
        navigator: Navigator<T, R, P>,
        source: S,
        clock: C,
        config: InputConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            navigator,
            source,
            clock,
            keymap: KeyMap::new(),
            config,
            pads: HashMap::new(),
            frame: None,
            active: false,
        })
    }

    /// Replace the key bindings.
    pub fn with_keymap(mut self, keymap: KeyMap) -> Self {
        self.keymap = keymap;
        self
    }

    /// Start handling input, with navigation confined to `root`.
    ///
    /// Devices the source already reports as connected are picked up.
    pub fn bootstrap(&mut self, root: T::Node) {
        self.active = true;
        let connected: SmallVec<[GamepadId; 4]> = self
            .source
            .snapshots()
            .filter(|pad| pad.connected)
            .map(|pad| pad.id)
            .collect();
        for id in connected {
            tracing::debug!(?id, "gamepad present at startup");
            self.pads.insert(id, PadChannels::new(self.config.repeat));
        }
        self.navigator.set_root(root);
        self.schedule_frame();
    }

    /// Move navigation to a different subtree.
    ///
    /// Ignored before [`bootstrap`](Self::bootstrap) and after
    /// [`teardown`](Self::teardown); only `bootstrap` resumes input handling.
    pub fn set_root(&mut self, root: T::Node) {
        if !self.active {
            tracing::trace!(?root, "focus root change ignored while inactive");
            return;
        }
        self.navigator.set_root(root);
    }

    /// Stop handling input and release the pending frame.
    pub fn teardown(&mut self) {
        self.navigator.teardown();
        self.pads.clear();
        if let Some(id) = self.frame.take() {
            self.clock.cancel_frame(id);
        }
        self.active = false;
    }

    /// The navigator being driven.
    pub fn navigator(&self) -> &Navigator<T, R, P> {
        &self.navigator
    }

    /// Mutable access to the navigator.
    pub fn navigator_mut(&mut self) -> &mut Navigator<T, R, P> {
        &mut self.navigator
    }

    /// The gamepad source.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// The frame clock.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Mutable access to the frame clock.
    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    /// The configuration in use.
    pub fn config(&self) -> &InputConfig {
        &self.config
    }

    /// Number of devices being polled.
    pub fn gamepad_count(&self) -> usize {
        self.pads.len()
    }

    /// The outstanding frame request, if any.
    pub fn pending_frame(&self) -> Option<FrameId> {
        self.frame
    }

    /// Handle a key press.
    ///
    /// Returns `true` and calls [`KeyDown::prevent_default`] if the key was
    /// mapped, not claimed by a text field, and acted on by the navigator.
    /// Keys something else already consumed are ignored.
    pub fn handle_key_down(&mut self, key: &mut KeyDown) -> bool {
        if !self.active || key.default_prevented() {
            return false;
        }
        let Some(direction) = self.keymap.direction(key.key_code) else {
            return false;
        };
        tracing::trace!(code = key.key_code, ?direction, "key mapped");
        if is_for_form(self.navigator.tree(), direction, self.navigator.selected()) {
            return false;
        }
        let handled = self.dispatch(direction);
        if handled {
            key.prevent_default();
        }
        handled
    }

    /// A device was connected. Its debounce state starts fresh, even if it
    /// was already known.
    pub fn gamepad_connected(&mut self, pad: GamepadSnapshot) {
        if !self.active {
            return;
        }
        tracing::debug!(id = ?pad.id, "gamepad connected");
        let channels = PadChannels::new(self.config.repeat);
        self.pads.insert(pad.id, channels);
        if let Some(id) = self.frame.take() {
            self.clock.cancel_frame(id);
        }
        self.schedule_frame();
    }

    /// Focus moved to `node` by other means (pointer, script).
    pub fn focus_in(&mut self, node: T::Node) {
        self.navigator.on_focus_change(node);
    }

    /// Run one frame at `now` (milliseconds): poll every known device,
    /// dispatch what fired, and step scroll animations.
    pub fn on_frame(&mut self, now: u64) -> SmallVec<[InputEvent; 4]> {
        self.frame = None;
        let mut events = SmallVec::new();

        if self.active && !self.pads.is_empty() {
            let keyboard_visible = self.source.keyboard_visible();
            let snapshots: SmallVec<[GamepadSnapshot; 4]> = self.source.snapshots().collect();
            for pad in snapshots {
                if !pad.connected {
                    if self.pads.remove(&pad.id).is_some() {
                        tracing::debug!(id = ?pad.id, "gamepad disconnected");
                    }
                    continue;
                }
                if keyboard_visible {
                    continue;
                }
                let Some(channels) = self.pads.get_mut(&pad.id) else {
                    continue;
                };
                let fired = channels.poll(&pad, now, &self.config);
                for direction in fired {
                    let handled = self.dispatch(direction);
                    events.push(InputEvent {
                        device: pad.id,
                        direction,
                        handled,
                    });
                }
            }
        }

        self.navigator.advance_scroll(now);
        self.schedule_frame();
        events
    }

    fn dispatch(&mut self, direction: Direction) -> bool {
        let handled = self.navigator.fire(direction, self.config.scroll_speed);
        self.schedule_frame();
        handled
    }

    fn schedule_frame(&mut self) {
        let wanted = (self.active && !self.pads.is_empty()) || self.navigator.is_scrolling();
        if wanted && self.frame.is_none() {
            self.frame = Some(self.clock.request_frame());
        }
    }
}
