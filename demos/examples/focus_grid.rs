// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Spatial navigation over a 3x3 grid and a scrolling list.
//!
//! This example shows how to:
//! - describe a scene with `understory_focus::arena`,
//! - attach collaborators that wrap focus from the start of each grid row
//!   to its end,
//! - drive the navigator from key codes and a scripted gamepad with
//!   `understory_focus_input`, stepping frames from a host loop.
//!
//! Run:
//! - `cargo run -p understory_demos --example focus_grid`

use std::collections::HashMap;

use kurbo::{Rect, Size};
use understory_event_state::debounce::RepeatTiming;
use understory_focus::arena::{Arena, Element, NodeId};
use understory_focus::{Collaborator, Direction, NavigationEvent, Navigator, Registry, ScrollSpeed};
use understory_focus_input::{
    FocusInput, FrameQueue, GamepadButtons, GamepadId, GamepadSnapshot, GamepadSource,
    InputConfig, KeyDown,
};

/// Sends focus to the end of the row when a move runs off its start.
///
/// Rows only wrap leftwards: moving right from the end of a row enters the
/// list beside the grid.
#[derive(Debug)]
struct RowWrap {
    end: NodeId,
}

impl Collaborator<NodeId> for RowWrap {
    fn fire_event(&mut self, event: &mut NavigationEvent<NodeId>) {
        if event.direction == Direction::Left && event.candidate.is_none() {
            event.candidate = Some(self.end);
            event.stop_propagation();
        }
    }
}

#[derive(Debug, Default)]
struct Wraps(HashMap<NodeId, RowWrap>);

impl Registry<NodeId> for Wraps {
    fn contains(&self, node: NodeId) -> bool {
        self.0.contains_key(&node)
    }

    fn find(&mut self, node: NodeId) -> Option<&mut dyn Collaborator<NodeId>> {
        self.0.get_mut(&node).map(|w| w as &mut dyn Collaborator<NodeId>)
    }
}

/// One controller whose buttons follow a script of `(from_ms, buttons)` steps.
#[derive(Debug)]
struct ScriptedPad {
    pad: GamepadSnapshot,
    script: Vec<(u64, GamepadButtons)>,
}

impl ScriptedPad {
    fn seek(&mut self, now: u64) {
        self.pad.buttons = self
            .script
            .iter()
            .rev()
            .find(|(at, _)| *at <= now)
            .map_or(GamepadButtons::empty(), |(_, b)| *b);
    }
}

impl GamepadSource for ScriptedPad {
    fn snapshots(&mut self) -> impl Iterator<Item = GamepadSnapshot> + '_ {
        std::iter::once(self.pad)
    }
}

fn main() {
    let mut arena = Arena::new(Size::new(400.0, 300.0));
    let root = arena.root();
    let mut names: HashMap<NodeId, String> = HashMap::new();

    let mut grid = [[root; 3]; 3];
    for (row, cells) in grid.iter_mut().enumerate() {
        for (col, cell) in cells.iter_mut().enumerate() {
            let x = 20.0 + col as f64 * 100.0;
            let y = 20.0 + row as f64 * 60.0;
            *cell = arena.insert(root, Element::button(Rect::new(x, y, x + 80.0, y + 40.0)));
            names.insert(*cell, format!("cell {row},{col}"));
        }
    }

    let list = arena.insert(
        root,
        Element::scroller(Rect::new(320.0, 20.0, 390.0, 200.0), Size::new(70.0, 600.0)),
    );
    for i in 0..6 {
        let y = 20.0 + f64::from(i) * 100.0;
        let item = arena.insert(list, Element::button(Rect::new(325.0, y, 385.0, y + 80.0)));
        names.insert(item, format!("item {i}"));
    }

    let mut wraps = Wraps::default();
    for cells in &grid {
        wraps.0.insert(cells[0], RowWrap { end: cells[2] });
    }

    let pad = ScriptedPad {
        pad: GamepadSnapshot {
            id: GamepadId(0),
            connected: true,
            ..Default::default()
        },
        script: vec![
            (0, GamepadButtons::empty()),
            (100, GamepadButtons::DPAD_RIGHT),
            (140, GamepadButtons::empty()),
            (200, GamepadButtons::DPAD_DOWN),
            (1_000, GamepadButtons::empty()),
            (1_100, GamepadButtons::A),
        ],
    };
    let config = InputConfig {
        scroll_speed: ScrollSpeed::animated(800.0).expect("valid speed"),
        repeat: RepeatTiming::default(),
        ..Default::default()
    };
    let mut input = FocusInput::new(
        Navigator::with_registry(arena, wraps),
        pad,
        FrameQueue::new(),
        config,
    )
    .expect("valid config");
    input.bootstrap(root);
    let name = |node: Option<NodeId>| node.and_then(|n| names.get(&n)).map_or("-", |s| s.as_str());

    // Keyboard: wrap left from the start of the top row, then step right into
    // the list and down.
    let keys = [("right", 39), ("left", 37), ("right", 39), ("down", 40)];
    for (label, code) in keys {
        let mut key = KeyDown::new(code);
        let handled = input.handle_key_down(&mut key);
        println!(
            "key {label:<5} handled={handled:<5} -> {}",
            name(input.navigator().selected())
        );
    }

    // Gamepad: tap right into the list, hold down to repeat, then press A.
    input.focus_in(grid[1][2]);
    let mut now = 0;
    while input.clock_mut().take().is_some() && now <= 1_500 {
        input.source_mut().seek(now);
        for event in input.on_frame(now) {
            println!(
                "{now:>5} ms pad {:?} {:?} handled={} -> {}",
                event.device.0,
                event.direction,
                event.handled,
                name(input.navigator().selected())
            );
        }
        now += 16;
    }

    let tree = input.navigator().tree();
    println!("list scrolled to y={}", tree.scroll_offset(list).y);
    let clicks: Vec<_> = tree.clicks().iter().map(|&n| name(Some(n))).collect();
    println!("clicked: {clicks:?}");
}
