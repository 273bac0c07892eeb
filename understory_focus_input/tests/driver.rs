// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end tests of `FocusInput` over an arena tree.

use kurbo::{Rect, Size};
use understory_focus::arena::{Arena, Element, NodeId};
use understory_focus::{Direction, ElementKind, InputType, Navigator, ScrollSpeed, TextCaret};
use understory_focus_input::{
    FocusInput, FrameClock, FrameId, GamepadButtons, GamepadId, GamepadSnapshot, GamepadSource,
    InputConfig, KeyDown, NoGamepads,
};

#[derive(Default)]
struct Pads {
    pads: Vec<GamepadSnapshot>,
    keyboard: bool,
}

impl Pads {
    fn press(&mut self, id: u32, buttons: GamepadButtons) {
        if let Some(p) = self.pads.iter_mut().find(|p| p.id == GamepadId(id)) {
            p.buttons = buttons;
        }
    }
}

impl GamepadSource for Pads {
    fn snapshots(&mut self) -> impl Iterator<Item = GamepadSnapshot> + '_ {
        self.pads.iter().copied()
    }

    fn keyboard_visible(&self) -> bool {
        self.keyboard
    }
}

#[derive(Debug, Default)]
struct Clock {
    next: u64,
    requested: Vec<FrameId>,
    cancelled: Vec<FrameId>,
}

impl FrameClock for Clock {
    fn request_frame(&mut self) -> FrameId {
        self.next += 1;
        self.requested.push(FrameId(self.next));
        FrameId(self.next)
    }

    fn cancel_frame(&mut self, id: FrameId) {
        self.cancelled.push(id);
    }
}

fn pad(id: u32) -> GamepadSnapshot {
    GamepadSnapshot {
        id: GamepadId(id),
        connected: true,
        ..GamepadSnapshot::default()
    }
}

fn instant() -> InputConfig {
    InputConfig {
        scroll_speed: ScrollSpeed::Instant,
        ..InputConfig::default()
    }
}

/// A row of three buttons.
fn row() -> (Arena, [NodeId; 3]) {
    let mut arena = Arena::new(Size::new(400.0, 100.0));
    let root = arena.root();
    let a = arena.insert(root, Element::button(Rect::new(0.0, 0.0, 50.0, 50.0)));
    let b = arena.insert(root, Element::button(Rect::new(100.0, 0.0, 150.0, 50.0)));
    let c = arena.insert(root, Element::button(Rect::new(200.0, 0.0, 250.0, 50.0)));
    (arena, [a, b, c])
}

fn driver<S: GamepadSource>(
    arena: Arena,
    source: S,
    config: InputConfig,
) -> FocusInput<Arena, understory_focus::NoRegistry, S, Clock> {
    FocusInput::new(Navigator::new(arena), source, Clock::default(), config).unwrap()
}

#[test]
fn keys_are_ignored_until_bootstrap_and_after_teardown() {
    let (arena, [a, ..]) = row();
    let root = arena.root();
    let mut input = driver(arena, NoGamepads, instant());

    let mut key = KeyDown::new(39);
    assert!(!input.handle_key_down(&mut key));
    assert!(!key.default_prevented());

    input.bootstrap(root);
    assert!(input.handle_key_down(&mut KeyDown::new(39)));
    assert_eq!(input.navigator().selected(), Some(a));

    input.teardown();
    assert!(!input.handle_key_down(&mut KeyDown::new(39)));
    assert_eq!(input.navigator().selected(), Some(a));
}

#[test]
fn unmapped_and_consumed_keys_pass_through() {
    let (arena, _) = row();
    let root = arena.root();
    let mut input = driver(arena, NoGamepads, instant());
    input.bootstrap(root);

    assert!(!input.handle_key_down(&mut KeyDown::new(65)));
    let mut consumed = KeyDown::new(39);
    consumed.prevent_default();
    assert!(!input.handle_key_down(&mut consumed));
    assert_eq!(input.navigator().selected(), None);
}

#[test]
fn unhandled_keys_are_not_prevented() {
    let (arena, [_, _, c]) = row();
    let root = arena.root();
    let mut input = driver(arena, NoGamepads, instant());
    input.bootstrap(root);
    input.focus_in(c);

    let mut right = KeyDown::new(39);
    assert!(!input.handle_key_down(&mut right));
    assert!(!right.default_prevented());

    let mut enter = KeyDown::new(13);
    assert!(input.handle_key_down(&mut enter));
    assert!(enter.default_prevented());
    assert_eq!(input.navigator().tree().clicks(), &[c]);
}

#[test]
fn text_fields_keep_editing_keys() {
    let mut arena = Arena::new(Size::new(400.0, 100.0));
    let root = arena.root();
    let before = arena.insert(root, Element::button(Rect::new(0.0, 0.0, 50.0, 50.0)));
    let field = arena.insert(
        root,
        Element::input(Rect::new(100.0, 0.0, 200.0, 50.0), InputType::Text),
    );
    arena.element_mut(field).caret = Some(TextCaret {
        start: 2,
        end: 2,
        len: 4,
    });
    let mut input = driver(arena, NoGamepads, instant());
    input.bootstrap(root);
    input.focus_in(field);

    let mut left = KeyDown::new(37);
    assert!(!input.handle_key_down(&mut left));
    assert!(!left.default_prevented());
    assert_eq!(input.navigator().selected(), Some(field));

    // Enter belongs to the field too.
    assert!(!input.handle_key_down(&mut KeyDown::new(13)));

    // Caret at the start: left leaves the field.
    input.navigator_mut().tree_mut().element_mut(field).caret = Some(TextCaret::default());
    assert!(input.handle_key_down(&mut KeyDown::new(37)));
    assert_eq!(input.navigator().selected(), Some(before));
    assert_eq!(
        input.navigator().tree().element(field).kind,
        ElementKind::Input(InputType::Text)
    );
}

#[test]
fn held_direction_repeats_across_frames() {
    let (arena, [a, b, c]) = row();
    let root = arena.root();
    let mut source = Pads::default();
    source.pads.push(pad(1));
    let mut input = driver(arena, source, instant());
    input.bootstrap(root);
    input.focus_in(a);

    input.source_mut().press(1, GamepadButtons::DPAD_RIGHT);
    assert_eq!(input.on_frame(0).len(), 1);
    assert_eq!(input.navigator().selected(), Some(b));
    assert!(input.on_frame(250).is_empty());
    let events = input.on_frame(500);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].direction, Direction::Right);
    assert!(events[0].handled);
    assert_eq!(input.navigator().selected(), Some(c));

    // Nothing further right: the repeat still fires but is not handled.
    let events = input.on_frame(650);
    assert_eq!(events.len(), 1);
    assert!(!events[0].handled);
}

#[test]
fn action_buttons_go_through_the_navigator() {
    let (arena, [a, ..]) = row();
    let root = arena.root();
    let mut source = Pads::default();
    source.pads.push(pad(7));
    let mut input = driver(arena, source, instant());
    input.bootstrap(root);
    input.focus_in(a);

    let held = GamepadButtons::A | GamepadButtons::B | GamepadButtons::Y;
    input.source_mut().press(7, held);
    let events = input.on_frame(0);
    let fired: Vec<_> = events.iter().map(|e| (e.direction, e.handled)).collect();
    assert_eq!(
        fired,
        [
            (Direction::Submit, true),
            (Direction::Back, true),
            (Direction::Y, false)
        ]
    );
    assert_eq!(input.navigator().tree().clicks(), &[a]);
    assert_eq!(input.navigator().tree().back_navigations(), 1);
    assert!(events.iter().all(|e| e.device == GamepadId(7)));
}

#[test]
fn polling_stops_when_the_last_pad_disconnects() {
    let (arena, _) = row();
    let root = arena.root();
    let mut source = Pads::default();
    source.pads.push(pad(1));
    let mut input = driver(arena, source, instant());
    input.bootstrap(root);
    assert_eq!(input.gamepad_count(), 1);
    assert!(input.pending_frame().is_some());

    input.on_frame(0);
    assert!(input.pending_frame().is_some());

    input.source_mut().pads[0].connected = false;
    input.on_frame(16);
    assert_eq!(input.gamepad_count(), 0);
    assert_eq!(input.pending_frame(), None);

    // A new connection restarts polling.
    input.source_mut().pads[0].connected = true;
    input.gamepad_connected(pad(1));
    assert_eq!(input.gamepad_count(), 1);
    assert!(input.pending_frame().is_some());
}

#[test]
fn connecting_replaces_the_pending_frame() {
    let (arena, _) = row();
    let root = arena.root();
    let mut source = Pads::default();
    source.pads.push(pad(1));
    let mut input = driver(arena, source, instant());
    input.bootstrap(root);
    let first = input.pending_frame().unwrap();

    input.source_mut().pads.push(pad(2));
    input.gamepad_connected(pad(2));
    assert_eq!(input.clock().cancelled, [first]);
    assert_ne!(input.pending_frame(), Some(first));
    assert_eq!(input.gamepad_count(), 2);
}

#[test]
fn on_screen_keyboard_suspends_gamepad_input() {
    let (arena, [a, ..]) = row();
    let root = arena.root();
    let mut source = Pads::default();
    source.pads.push(pad(1));
    source.keyboard = true;
    let mut input = driver(arena, source, instant());
    input.bootstrap(root);
    input.focus_in(a);

    input.source_mut().press(1, GamepadButtons::DPAD_RIGHT);
    assert!(input.on_frame(0).is_empty());
    assert_eq!(input.navigator().selected(), Some(a));
    assert!(input.pending_frame().is_some());

    input.source_mut().keyboard = false;
    assert_eq!(input.on_frame(16).len(), 1);
}

#[test]
fn teardown_cancels_frames_and_forgets_pads() {
    let (arena, [a, b, _]) = row();
    let root = arena.root();
    let mut source = Pads::default();
    source.pads.push(pad(1));
    let mut input = driver(arena, source, instant());
    input.bootstrap(root);
    let pending = input.pending_frame().unwrap();

    input.teardown();
    assert_eq!(input.clock().cancelled, [pending]);
    assert_eq!(input.pending_frame(), None);
    assert_eq!(input.gamepad_count(), 0);

    // Focus reports are ignored, and connections are not tracked.
    input.focus_in(a);
    assert_eq!(input.navigator().selected(), None);
    input.gamepad_connected(pad(1));
    assert_eq!(input.gamepad_count(), 0);

    // Bootstrapping again resumes.
    input.bootstrap(root);
    input.focus_in(b);
    assert_eq!(input.navigator().selected(), Some(b));
}

#[test]
fn changing_the_root_does_not_resume_after_teardown() {
    let mut arena = Arena::new(Size::new(400.0, 400.0));
    let root = arena.root();
    let panel = arena.insert(root, Element::container(Rect::new(0.0, 0.0, 400.0, 200.0)));
    let a = arena.insert(panel, Element::button(Rect::new(0.0, 0.0, 50.0, 50.0)));
    let b = arena.insert(panel, Element::button(Rect::new(100.0, 0.0, 150.0, 50.0)));
    let mut input = driver(arena, NoGamepads, instant());
    input.bootstrap(root);
    input.set_root(panel);
    assert_eq!(input.navigator().root(), Some(panel));

    input.teardown();
    input.set_root(root);
    assert_eq!(input.navigator().root(), Some(panel));
    assert!(!input.navigator().is_subscribed());
    input.focus_in(a);
    assert_eq!(input.navigator().selected(), None);
    assert!(!input.handle_key_down(&mut KeyDown::new(39)));

    input.bootstrap(panel);
    input.focus_in(a);
    assert!(input.handle_key_down(&mut KeyDown::new(39)));
    assert_eq!(input.navigator().selected(), Some(b));
}

#[test]
fn scroll_animations_request_frames_until_done() {
    let mut arena = Arena::new(Size::new(200.0, 200.0));
    let root = arena.root();
    let list = arena.insert(
        root,
        Element::scroller(Rect::new(0.0, 0.0, 100.0, 100.0), Size::new(100.0, 400.0)),
    );
    let first = arena.insert(list, Element::button(Rect::new(0.0, 0.0, 50.0, 50.0)));
    let _below = arena.insert(list, Element::button(Rect::new(0.0, 120.0, 50.0, 170.0)));
    let config = InputConfig {
        scroll_speed: ScrollSpeed::Animated(1000.0),
        ..InputConfig::default()
    };
    let mut input = driver(arena, NoGamepads, config);
    input.bootstrap(root);
    assert_eq!(input.pending_frame(), None);
    input.focus_in(first);

    assert!(input.handle_key_down(&mut KeyDown::new(40)));
    assert!(input.navigator().is_scrolling());
    assert!(input.pending_frame().is_some());

    input.on_frame(1_000);
    assert!(input.pending_frame().is_some());
    input.on_frame(1_035);
    assert_eq!(input.navigator().tree().scroll_offset(list).y, 35.0);
    input.on_frame(1_070);
    assert_eq!(input.navigator().tree().scroll_offset(list).y, 70.0);
    assert!(!input.navigator().is_scrolling());
    assert_eq!(input.pending_frame(), None);
}

#[test]
fn invalid_config_is_rejected() {
    let (arena, _) = row();
    let config = InputConfig {
        joystick_threshold: 0.0,
        ..InputConfig::default()
    };
    let built = FocusInput::new(Navigator::new(arena), NoGamepads, Clock::default(), config);
    assert!(built.is_err());
}
