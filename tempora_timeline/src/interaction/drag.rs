// Copyright 2025 the Tempora Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Press/drag bookkeeping for a pointer surface.
//!
//! 1) [`DragTracker::press`] records the position and target under the button.
//! 2) [`DragTracker::update`] returns the movement since the previous position
//!    and whether this is the first movement of the gesture.
//! 3) [`DragTracker::release`] ends the gesture and reports whether it moved.

use kurbo::{Point, Vec2};

use crate::event::EventTarget;

/// Tracks one pressed pointer.
#[derive(Clone, Copy, Debug, Default)]
pub struct DragTracker {
    start_pos: Option<Point>,
    last_pos: Option<Point>,
    target: EventTarget,
    moved: bool,
}

/// One movement step of a pressed pointer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragStep {
    /// Movement since the previous step (or the press).
    pub delta: Vec2,
    /// `true` for the first step after the press.
    pub first: bool,
}

impl DragTracker {
    /// Starts tracking a press at `pos` over `target`.
    pub fn press(&mut self, pos: Point, target: EventTarget) {
        self.start_pos = Some(pos);
        self.last_pos = Some(pos);
        self.target = target;
        self.moved = false;
    }

    /// Records a move to `pos`; `None` when no button is pressed.
    pub fn update(&mut self, pos: Point) -> Option<DragStep> {
        let last = self.last_pos?;
        self.last_pos = Some(pos);
        let first = !self.moved;
        self.moved = true;
        Some(DragStep {
            delta: pos - last,
            first,
        })
    }

    /// Offset of `pos` from the press position.
    #[must_use]
    pub fn total_offset(&self, pos: Point) -> Option<Vec2> {
        self.start_pos.map(|start| pos - start)
    }

    /// Ends the gesture, returning whether the pointer moved while pressed.
    ///
    /// Returns `None` if nothing was pressed.
    pub fn release(&mut self) -> Option<bool> {
        self.start_pos.take()?;
        self.last_pos = None;
        Some(core::mem::take(&mut self.moved))
    }

    /// Returns `true` while a button is pressed.
    #[must_use]
    pub fn is_pressed(&self) -> bool {
        self.start_pos.is_some()
    }

    /// Where the press started.
    #[must_use]
    pub fn start_pos(&self) -> Option<Point> {
        self.start_pos
    }

    /// The target under the pointer when the press started.
    #[must_use]
    pub fn target(&self) -> EventTarget {
        self.target
    }
}
