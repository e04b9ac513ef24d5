// Copyright 2025 the Tempora Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Normalized events and the raw input they are made from.

use alloc::string::String;

use bitflags::bitflags;
use kurbo::{Point, Vec2};
use tempora_edit::ElementPart;

use crate::ids::{LayerId, ViewId};

bitflags! {
    /// Modifier keys held while an event happened.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Shift.
        const SHIFT = 1 << 0;
        /// Control.
        const CTRL = 1 << 1;
        /// Alt / Option.
        const ALT = 1 << 2;
        /// Meta / Command / Windows.
        const META = 1 << 3;
    }
}

impl Modifiers {
    /// Maps a key name to the modifier it controls, if any.
    #[must_use]
    pub fn from_key(key: &str) -> Self {
        match key {
            "Shift" => Self::SHIFT,
            "Control" => Self::CTRL,
            "Alt" => Self::ALT,
            "Meta" => Self::META,
            _ => Self::empty(),
        }
    }
}

/// What kind of interaction an event reports.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A pointer button was pressed.
    MouseDown,
    /// The pointer moved with no button pressed.
    MouseMove,
    /// A pointer button was released.
    MouseUp,
    /// A press and release without movement in between.
    Click,
    /// The pointer moved for the first time while pressed.
    DragStart,
    /// The pointer moved while pressed; carries the delta since the last event.
    Drag,
    /// The button was released after dragging.
    DragEnd,
    /// A key was pressed.
    KeyDown,
    /// A key was released.
    KeyUp,
}

/// A reference to one drawn item.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ItemRef {
    /// View the item is drawn in.
    pub view: ViewId,
    /// Layer that owns the item.
    pub layer: LayerId,
    /// Index of the item in the layer's dataset.
    pub item: usize,
    /// Part of the item's drawing that was hit.
    pub part: ElementPart,
}

/// What an event happened on.
///
/// Hit testing belongs to the host: it resolves the pointer position to a
/// target before feeding [`RawInput`] to a surface.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum EventTarget {
    /// The whole document; used by keyboard events.
    #[default]
    Document,
    /// The background of a view.
    View(ViewId),
    /// A drawn item.
    Item(ItemRef),
}

impl EventTarget {
    /// The view the target belongs to, if any.
    #[must_use]
    pub fn view(&self) -> Option<ViewId> {
        match self {
            Self::Document => None,
            Self::View(view) => Some(*view),
            Self::Item(item) => Some(item.view),
        }
    }

    /// The item the target refers to, if any.
    #[must_use]
    pub fn item(&self) -> Option<&ItemRef> {
        match self {
            Self::Item(item) => Some(item),
            _ => None,
        }
    }
}

/// Pixel movement carried by drag events.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct PointerDelta {
    /// Horizontal movement, positive to the right.
    pub dx: f64,
    /// Vertical movement, positive downward.
    pub dy: f64,
}

impl From<Vec2> for PointerDelta {
    fn from(v: Vec2) -> Self {
        Self { dx: v.x, dy: v.y }
    }
}

/// An event as seen by listeners and interaction states.
#[derive(Clone, Debug, PartialEq)]
pub struct TimelineEvent {
    /// What happened.
    pub kind: EventKind,
    /// What it happened on.
    pub target: EventTarget,
    /// Pointer position in the surface's pixel space, for pointer events.
    pub position: Option<Point>,
    /// Raw pointer movement, for drag events.
    pub original: Option<PointerDelta>,
    /// Key name, for keyboard events.
    pub key: Option<String>,
    /// Modifier keys held when the event happened.
    pub modifiers: Modifiers,
}

impl TimelineEvent {
    /// Creates an event with no position, delta, key or modifiers.
    #[must_use]
    pub fn new(kind: EventKind, target: EventTarget) -> Self {
        Self {
            kind,
            target,
            position: None,
            original: None,
            key: None,
            modifiers: Modifiers::empty(),
        }
    }

    /// Sets the pointer position.
    #[must_use]
    pub fn with_position(mut self, position: Point) -> Self {
        self.position = Some(position);
        self
    }

    /// Sets the raw pointer movement.
    #[must_use]
    pub fn with_delta(mut self, dx: f64, dy: f64) -> Self {
        self.original = Some(PointerDelta { dx, dy });
        self
    }

    /// Sets the key name.
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Sets the held modifiers.
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// The pointer movement; zero when the event carries none.
    #[must_use]
    pub fn delta(&self) -> Vec2 {
        self.original.map_or(Vec2::ZERO, |d| Vec2::new(d.dx, d.dy))
    }
}

/// Input as delivered by the host, before normalization.
#[derive(Clone, Debug, PartialEq)]
pub enum RawInput {
    /// A pointer button went down over `target`.
    PointerDown {
        /// Pointer position.
        position: Point,
        /// Hit-test result.
        target: EventTarget,
    },
    /// The pointer moved over `target`.
    PointerMove {
        /// Pointer position.
        position: Point,
        /// Hit-test result.
        target: EventTarget,
    },
    /// A pointer button went up over `target`.
    PointerUp {
        /// Pointer position.
        position: Point,
        /// Hit-test result.
        target: EventTarget,
    },
    /// A key went down.
    KeyDown {
        /// Key name, for example `"a"`, `"Escape"` or `"Shift"`.
        key: String,
    },
    /// A key went up.
    KeyUp {
        /// Key name.
        key: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_delta_reads_as_zero() {
        let event = TimelineEvent::new(EventKind::Drag, EventTarget::Document);
        assert_eq!(event.delta(), Vec2::ZERO);
        assert_eq!(event.with_delta(3.0, -2.0).delta(), Vec2::new(3.0, -2.0));
    }

    #[test]
    fn targets_know_their_view() {
        let view = ViewId::from_index(2);
        let item = ItemRef {
            view,
            layer: LayerId::new(0),
            item: 5,
            part: ElementPart::Body,
        };
        assert_eq!(EventTarget::Document.view(), None);
        assert_eq!(EventTarget::View(view).view(), Some(view));
        assert_eq!(EventTarget::Item(item).view(), Some(view));
        assert_eq!(EventTarget::Item(item).item(), Some(&item));
    }
}
