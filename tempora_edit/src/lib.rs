// Copyright 2025 the Tempora Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tempora Edit: direct-manipulation math for timeline items.
//!
//! This crate turns pixel-space pointer input into domain-space data edits:
//!
//! - [`EditConstraints`]: which fields of an item a layer lets users change.
//! - [`DragMode`] and [`ElementPart`]: what a drag gesture does, chosen once
//!   from the part of the drawing that was grabbed.
//! - [`move_segment`], [`extend_left`], [`extend_right`] and [`move_point`]:
//!   the constrained edit operations. Moves that would leave a scale's range
//!   are rejected per axis, resizes never go below [`MIN_PIXEL_WIDTH`].
//! - [`Editable`]: the capability a layer implements so that an interaction
//!   state can drive these operations without knowing the layer's type.
//! - [`BrushMode`], [`brush_matches`] and [`Brushable`]: rectangular
//!   selection.
//!
//! Items are never touched directly: every read and write goes through the
//! layer's [`AccessorSet`](tempora_params::AccessorSet), and every pixel
//! value goes through a [`Scale`](tempora_scale::Scale).
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Vec2;
//! use tempora_edit::{drag_segment, Axes, DragMode, EditConstraints, ElementPart};
//! use tempora_params::{AccessorSet, Field, SegmentDatum};
//! use tempora_scale::LinearScale;
//!
//! struct Clip { start: f64, duration: f64 }
//!
//! impl SegmentDatum for Clip {
//!     fn start(&self) -> f64 { self.start }
//!     fn set_start(&mut self, v: f64) { self.start = v; }
//!     fn duration(&self) -> f64 { self.duration }
//!     fn set_duration(&mut self, v: f64) { self.duration = v; }
//! }
//!
//! let x = LinearScale::new(0.0..10.0, 0.0..100.0);
//! let y = LinearScale::identity(0.0..50.0);
//! let accessors = AccessorSet::<Clip>::from_datum();
//! let mut clip = Clip { start: 2.0, duration: 3.0 };
//!
//! // Grabbing the right handle and dragging 10px to the right adds one unit.
//! let mode = DragMode::for_part(ElementPart::from_class_list("handle right"));
//! let outcome = drag_segment(
//!     &accessors,
//!     Axes { x: &x, y: &y },
//!     EditConstraints::all(),
//!     &mut clip,
//!     mode,
//!     Vec2::new(10.0, 0.0),
//! );
//! assert!(outcome.changed.contains(EditConstraints::WIDTH));
//! assert_eq!(clip.start, 2.0);
//! assert!((clip.duration - 4.0).abs() < 1e-9);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod brush;
mod constraints;
mod drag;

pub use brush::{BrushMode, Brushable, brush_matches, overlaps_x, overlaps_y};
pub use constraints::EditConstraints;
pub use drag::{
    Axes, DragMode, DragOutcome, Editable, ElementPart, MIN_PIXEL_WIDTH, drag_segment,
    extend_left, extend_right, move_point, move_segment,
};
