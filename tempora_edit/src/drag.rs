// Copyright 2025 the Tempora Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag-constraint engine: pixel deltas in, domain mutations out.
//!
//! Every operation follows the same recipe:
//!
//! 1) Force the delta of each non-editable field to zero.
//! 2) Map the item's current geometry into pixel space with the scales.
//! 3) Apply the delta in pixel space, rejecting moves that would leave the
//!    scale range and clamping widths to [`MIN_PIXEL_WIDTH`].
//! 4) Invert the result back into the domain and write it through the
//!    layer's accessors.
//!
//! The returned [`DragOutcome`] says which fields changed and which were
//! held back by the range, so callers can redraw or log precisely.

use kurbo::Vec2;
use tempora_params::{AccessorSet, Field};
use tempora_scale::Scale;

use crate::EditConstraints;

/// Smallest width, in pixels, a resize may leave.
pub const MIN_PIXEL_WIDTH: f64 = 1.0;

/// How a drag gesture edits an item.
///
/// The mode is chosen once, from the grabbed [`ElementPart`], when the
/// gesture starts, and stays fixed until it ends.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum DragMode {
    /// Translate the item.
    #[default]
    Move,
    /// Move the left edge; the right edge stays put.
    ExtendLeft,
    /// Move the right edge; the left edge stays put.
    ExtendRight,
}

impl DragMode {
    /// Selects the mode for a gesture that grabbed `part`.
    #[must_use]
    pub fn for_part(part: ElementPart) -> Self {
        match part {
            ElementPart::HandleLeft => Self::ExtendLeft,
            ElementPart::HandleRight => Self::ExtendRight,
            ElementPart::Body => Self::Move,
        }
    }

    /// Parses a mode name.
    ///
    /// Accepts `move`/`mv`, `extend-left`/`extendLeft`/`l` and
    /// `extend-right`/`extendRight`/`r`. Anything else is `None`, which
    /// callers treat as a no-op drag.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "move" | "mv" => Some(Self::Move),
            "extend-left" | "extendLeft" | "l" => Some(Self::ExtendLeft),
            "extend-right" | "extendRight" | "r" => Some(Self::ExtendRight),
            _ => None,
        }
    }
}

/// The part of an item's drawing a pointer grabbed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ElementPart {
    /// The shape itself.
    #[default]
    Body,
    /// The resize handle on the left edge.
    HandleLeft,
    /// The resize handle on the right edge.
    HandleRight,
}

impl ElementPart {
    /// Classifies an element from its whitespace-separated class list.
    ///
    /// Handles carry a `left` or `right` class; `right` wins if both appear.
    ///
    /// ```rust
    /// use tempora_edit::ElementPart;
    ///
    /// assert_eq!(ElementPart::from_class_list("handle left"), ElementPart::HandleLeft);
    /// assert_eq!(ElementPart::from_class_list("item selected"), ElementPart::Body);
    /// ```
    #[must_use]
    pub fn from_class_list(classes: &str) -> Self {
        let mut part = Self::Body;
        for class in classes.split_whitespace() {
            match class {
                "left" if part == Self::Body => part = Self::HandleLeft,
                "right" => part = Self::HandleRight,
                _ => {}
            }
        }
        part
    }
}

/// What a drag operation did to an item.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DragOutcome {
    /// Fields that were written.
    pub changed: EditConstraints,
    /// Fields whose update was rejected or clamped by range or minimum width.
    pub clamped: EditConstraints,
}

impl DragOutcome {
    /// An outcome where nothing happened.
    pub const NONE: Self = Self {
        changed: EditConstraints::empty(),
        clamped: EditConstraints::empty(),
    };

    /// Returns `true` if no field was written.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.changed.is_empty()
    }
}

impl Default for DragOutcome {
    fn default() -> Self {
        Self::NONE
    }
}

/// The pair of scales an item is laid out with.
#[derive(Copy, Clone, Debug)]
pub struct Axes<'a> {
    /// Horizontal scale, mapping start and duration.
    pub x: &'a dyn Scale,
    /// Vertical scale, mapping y and height.
    pub y: &'a dyn Scale,
}

/// Replaces non-finite components with zero, so malformed events are no-ops.
fn sanitize(delta: Vec2) -> Vec2 {
    let finite = |v: f64| if v.is_finite() { v } else { 0.0 };
    Vec2::new(finite(delta.x), finite(delta.y))
}

/// Translates a segment by `delta` pixels.
///
/// Horizontally, the item moves only if its whole pixel span stays within
/// the x range. Vertically, the delta is in screen space (down is positive)
/// while y values grow upward from the bottom of the y extent, so the item's
/// displayed top is `max - height - y` and must stay within the extent
/// together with its bottom. Vertical positions and heights are measured with
/// [`Scale::distance`], so ascending and descending y ranges behave alike.
pub fn move_segment<D>(
    accessors: &AccessorSet<D>,
    axes: Axes<'_>,
    edits: EditConstraints,
    item: &mut D,
    delta: Vec2,
) -> DragOutcome {
    let delta = sanitize(delta);
    let dx = if edits.contains(EditConstraints::X) {
        delta.x
    } else {
        0.0
    };
    let dy = if edits.contains(EditConstraints::Y) {
        delta.y
    } else {
        0.0
    };

    let mut outcome = DragOutcome::NONE;

    if dx != 0.0 {
        let width = axes.x.apply(accessors.read(Field::Duration, item));
        let pos_x = axes.x.apply(accessors.read(Field::Start, item));
        let target_x = pos_x + dx;

        if axes.x.contains_span(target_x, width) {
            accessors.write(Field::Start, item, axes.x.invert(target_x));
            outcome.changed |= EditConstraints::X;
        } else {
            tracing::trace!(target_x, width, "horizontal move rejected by range");
            outcome.clamped |= EditConstraints::X;
        }
    }

    if dy != 0.0 {
        let pos_y = axes.y.distance(accessors.read(Field::Y, item));
        let height = axes.y.distance(accessors.read(Field::Height, item));
        let target_y = pos_y - dy;
        let extent = axes.y.extent();
        let top = extent.end - height - target_y;

        if top >= extent.start && top + height <= extent.end {
            accessors.write(Field::Y, item, axes.y.invert_distance(target_y));
            outcome.changed |= EditConstraints::Y;
        } else {
            tracing::trace!(target_y, height, "vertical move rejected by range");
            outcome.clamped |= EditConstraints::Y;
        }
    }

    outcome
}

/// Moves the left edge of a segment by `dx` pixels, keeping the right edge.
///
/// Requires [`EditConstraints::WIDTH`]. The width is clamped to
/// [`MIN_PIXEL_WIDTH`]; the start always follows the pointer.
pub fn extend_left<D>(
    accessors: &AccessorSet<D>,
    x: &dyn Scale,
    edits: EditConstraints,
    item: &mut D,
    dx: f64,
) -> DragOutcome {
    let dx = sanitize(Vec2::new(dx, 0.0)).x;
    if !edits.contains(EditConstraints::WIDTH) || dx == 0.0 {
        return DragOutcome::NONE;
    }

    let mut outcome = DragOutcome::NONE;
    let mut width = x.apply(accessors.read(Field::Duration, item)) - dx;
    if width < MIN_PIXEL_WIDTH {
        width = MIN_PIXEL_WIDTH;
        outcome.clamped |= EditConstraints::WIDTH;
    }
    accessors.write(Field::Duration, item, x.invert(width));

    let pos_x = x.apply(accessors.read(Field::Start, item)) + dx;
    accessors.write(Field::Start, item, x.invert(pos_x));

    outcome.changed |= EditConstraints::WIDTH | EditConstraints::X;
    outcome
}

/// Moves the right edge of a segment by `dx` pixels, keeping the left edge.
///
/// Requires [`EditConstraints::WIDTH`]. The width is clamped to
/// [`MIN_PIXEL_WIDTH`].
pub fn extend_right<D>(
    accessors: &AccessorSet<D>,
    x: &dyn Scale,
    edits: EditConstraints,
    item: &mut D,
    dx: f64,
) -> DragOutcome {
    let dx = sanitize(Vec2::new(dx, 0.0)).x;
    if !edits.contains(EditConstraints::WIDTH) || dx == 0.0 {
        return DragOutcome::NONE;
    }

    let mut outcome = DragOutcome::NONE;
    let mut width = x.apply(accessors.read(Field::Duration, item)) + dx;
    if width < MIN_PIXEL_WIDTH {
        width = MIN_PIXEL_WIDTH;
        outcome.clamped |= EditConstraints::WIDTH;
    }
    accessors.write(Field::Duration, item, x.invert(width));

    outcome.changed |= EditConstraints::WIDTH;
    outcome
}

/// Runs the operation for `mode` on a segment.
pub fn drag_segment<D>(
    accessors: &AccessorSet<D>,
    axes: Axes<'_>,
    edits: EditConstraints,
    item: &mut D,
    mode: DragMode,
    delta: Vec2,
) -> DragOutcome {
    match mode {
        DragMode::Move => move_segment(accessors, axes, edits, item, delta),
        DragMode::ExtendLeft => extend_left(accessors, axes.x, edits, item, delta.x),
        DragMode::ExtendRight => extend_right(accessors, axes.x, edits, item, delta.x),
    }
}

/// Moves a single domain position by `dx` pixels.
///
/// Used by point-like layers such as cursors. Returns the new domain value,
/// or `None` when the target pixel falls outside the range extent (both
/// bounds inclusive) or the delta is zero.
#[must_use]
pub fn move_point(scale: &dyn Scale, value: f64, dx: f64) -> Option<f64> {
    let dx = sanitize(Vec2::new(dx, 0.0)).x;
    if dx == 0.0 {
        return None;
    }
    let target = scale.apply(value) + dx;
    let extent = scale.extent();
    if target >= extent.start && target <= extent.end {
        Some(scale.invert(target))
    } else {
        tracing::trace!(target, "point move rejected by range");
        None
    }
}

/// Capability of layers whose items can be dragged and resized.
///
/// The drag engine talks to layers only through this trait. Implementations
/// mutate the item at `item` and request a redraw of that item alone.
pub trait Editable {
    /// Translates the item by a pixel delta.
    fn move_item(&mut self, item: usize, delta: Vec2) -> DragOutcome;

    /// Moves the left edge of the item. Point-like layers ignore it.
    fn extend_left(&mut self, item: usize, delta: Vec2) -> DragOutcome {
        let _ = (item, delta);
        DragOutcome::NONE
    }

    /// Moves the right edge of the item. Point-like layers ignore it.
    fn extend_right(&mut self, item: usize, delta: Vec2) -> DragOutcome {
        let _ = (item, delta);
        DragOutcome::NONE
    }

    /// Routes one drag step to the operation selected for the gesture.
    fn handle_drag(&mut self, item: usize, mode: DragMode, delta: Vec2) -> DragOutcome {
        match mode {
            DragMode::Move => self.move_item(item, delta),
            DragMode::ExtendLeft => self.extend_left(item, delta),
            DragMode::ExtendRight => self.extend_right(item, delta),
        }
    }
}
