// Copyright 2025 the Tempora Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The drawing seam.
//!
//! Layers never hand domain values to the scene: everything here is already
//! in the pixel space of the view, with the layer's `top` offset applied.

use alloc::rc::Rc;
use alloc::string::String;
use core::cell::RefCell;

use kurbo::{Line, Rect};

use crate::ids::LayerId;

/// Scene shared between the views and layers drawing into it.
pub type SharedScene = Rc<RefCell<dyn Scene>>;

/// Pre-computed geometry of one drawn part of an item.
#[derive(Clone, Debug, PartialEq)]
pub enum ItemShape {
    /// The body of a segment.
    Segment {
        /// Rectangle in view pixels.
        rect: Rect,
        /// Fill color.
        color: String,
        /// Fill opacity.
        opacity: f64,
    },
    /// The resize handles of an editable segment.
    Handles {
        /// Left handle.
        left: Line,
        /// Right handle.
        right: Line,
        /// Stroke color.
        color: String,
        /// Stroke width.
        stroke_width: f64,
        /// Stroke opacity.
        opacity: f64,
    },
    /// A cursor-like marker.
    Marker {
        /// The vertical line.
        line: Line,
        /// Bounds of the head mark, when drawn.
        head: Option<Rect>,
        /// Stroke and fill color.
        color: String,
        /// Stroke width.
        stroke_width: f64,
        /// Opacity of line and head.
        opacity: f64,
    },
}

/// Receives drawing updates from layers.
pub trait Scene {
    /// Creates or updates the drawing of one part of an item.
    fn draw_item(&mut self, layer: LayerId, item: usize, shape: &ItemShape);

    /// Removes every drawn part of an item that left the dataset.
    fn remove_item(&mut self, layer: LayerId, item: usize);

    /// Marks an item as selected or unselected.
    fn set_selected(&mut self, layer: LayerId, item: usize, selected: bool);
}
