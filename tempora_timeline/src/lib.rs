// Copyright 2025 the Tempora Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tempora Timeline: views, layers and interaction states for timelines.
//!
//! A [`Timeline`] owns a collection of [`View`]s. Each view stacks
//! [`Layer`]s that share the view's x and y [`Scale`](tempora_scale::Scale)s
//! and draw into a [`Scene`] supplied by the host. The timeline also owns
//! the interaction sources (one [`Keyboard`] for the document and one
//! [`Surface`] per view) and at most one active [`InteractionState`].
//!
//! Host input flows like this:
//!
//! 1. The host hit-tests the pointer and calls [`Timeline::dispatch`] with a
//!    [`RawInput`] for the view's [`SourceId`].
//! 2. The source normalizes it into [`TimelineEvent`]s: mouse, click and drag
//!    events for surfaces, key events for the keyboard.
//! 3. Each event goes to the external listeners registered with
//!    [`Timeline::on_event`], then to the active state.
//! 4. [`EditState`] turns drags on items into constrained edits through
//!    [`Layer::as_editable`]; [`BrushState`] turns drags on a view into a
//!    rectangular selection through [`Layer::as_brushable`].
//!
//! Layers come in three flavours:
//!
//! - [`SegmentLayer`]: read-only time segments.
//! - [`EditableSegmentLayer`]: segments with resize handles that can be
//!   moved and resized.
//! - [`MarkerLayer`]: a single draggable cursor.
//!
//! ## Minimal example
//!
//! ```rust
//! use std::rc::Rc;
//! use kurbo::{Point, Size};
//! use tempora_edit::ElementPart;
//! use tempora_params::SegmentDatum;
//! use tempora_scale::LinearScale;
//! use tempora_timeline::{
//!     EditState, EditableSegmentLayer, EventTarget, ItemRef, RawInput, SourceId, Timeline,
//!     View, shared_data,
//! };
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
//! let mut timeline = Timeline::new();
//! let view = timeline.register(View::new(
//!     Rc::new(LinearScale::new(0.0..10.0, 0.0..100.0)),
//!     Rc::new(LinearScale::identity(0.0..50.0)),
//!     Size::new(100.0, 50.0),
//! ));
//!
//! let clips = shared_data([Clip { start: 2.0, duration: 3.0 }]);
//! let mut segments = EditableSegmentLayer::from_datum();
//! segments.set_data(clips.clone());
//! let (v, ids) = timeline.view_mut(view).unwrap();
//! let layer = v.add_layer(segments, ids);
//!
//! timeline.set_state(EditState::new());
//!
//! // The host hit-tested the clip body at x = 25.
//! let clip = EventTarget::Item(ItemRef { view, layer, item: 0, part: ElementPart::Body });
//! let surface = SourceId::Surface(view);
//! timeline.dispatch(surface, &RawInput::PointerDown { position: Point::new(25.0, 45.0), target: clip });
//! timeline.dispatch(surface, &RawInput::PointerMove { position: Point::new(35.0, 45.0), target: clip });
//! timeline.dispatch(surface, &RawInput::PointerUp { position: Point::new(35.0, 45.0), target: clip });
//!
//! // 10 pixels are one domain unit.
//! assert!((clips.borrow()[0].start - 3.0).abs() < 1e-9);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod event;
mod ids;
mod interaction;
mod layer;
mod scene;
mod state;
mod timeline;
mod view;

pub use event::{
    EventKind, EventTarget, ItemRef, Modifiers, PointerDelta, RawInput, TimelineEvent,
};
pub use ids::{IdGenerator, LayerId, ViewId};
pub use interaction::{DragStep, DragTracker, InteractionSource, Keyboard, SourceId, Surface};
pub use layer::{
    EditableSegmentLayer, Layer, LayerContext, MARK_HEIGHT, MarkerLayer, SegmentLayer,
    SharedData, shared_data,
};
pub use scene::{ItemShape, Scene, SharedScene};
pub use state::{BrushState, EditState, InteractionState};
pub use timeline::Timeline;
pub use view::{View, ViewCollection};
