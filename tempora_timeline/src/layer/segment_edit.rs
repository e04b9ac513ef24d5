// Copyright 2025 the Tempora Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;
use core::fmt;

use kurbo::{Line, Point, Rect, Vec2};
use tempora_edit::{
    Brushable, BrushMode, DragOutcome, EditConstraints, Editable, MIN_PIXEL_WIDTH, extend_left,
    extend_right, move_segment,
};
use tempora_params::{AccessorSet, ParamStore, SegmentDatum, keys};

use crate::ids::{IdGenerator, LayerId};
use crate::layer::{Layer, LayerContext, SegmentLayer, SharedData};
use crate::scene::{ItemShape, SharedScene};

/// A [`SegmentLayer`] whose items can be dragged and resized.
///
/// Draws the wrapped layer first, then a handle line on each side of every
/// item. Grabbing the body moves the item, grabbing a handle resizes it.
/// Which fields may change is read from the `edits` parameter
/// ([`EditConstraints`], all fields by default).
pub struct EditableSegmentLayer<D> {
    segments: SegmentLayer<D>,
}

/// Layer parameters controlling the handles.
#[derive(Copy, Clone, Debug)]
struct HandleParams {
    width: f64,
    opacity: f64,
    min_width: f64,
}

impl<D> EditableSegmentLayer<D> {
    /// Wraps a segment layer, registering the editing defaults.
    #[must_use]
    pub fn new(mut segments: SegmentLayer<D>) -> Self {
        segments
            .params_mut()
            .set_default(keys::EDITS, EditConstraints::all())
            .set_default(keys::HANDLER_WIDTH, 2.0_f64)
            .set_default(keys::HANDLER_OPACITY, 0.0_f64)
            .set_default(keys::MIN_WIDTH, MIN_PIXEL_WIDTH);
        Self { segments }
    }

    /// Creates an editable layer reading its items through `accessors`.
    #[must_use]
    pub fn with_accessors(accessors: AccessorSet<D>) -> Self {
        Self::new(SegmentLayer::with_accessors(accessors))
    }

    /// The wrapped layer.
    #[must_use]
    pub fn segments(&self) -> &SegmentLayer<D> {
        &self.segments
    }

    /// The wrapped layer, mutably.
    pub fn segments_mut(&mut self) -> &mut SegmentLayer<D> {
        &mut self.segments
    }

    /// Replaces the dataset. Call [`Layer::update`] to redraw.
    pub fn set_data(&mut self, data: SharedData<D>) -> &mut Self {
        self.segments.set_data(data);
        self
    }

    /// The dataset.
    #[must_use]
    pub fn data(&self) -> &SharedData<D> {
        self.segments.data()
    }

    /// Fields a drag may change.
    #[must_use]
    pub fn edits(&self) -> EditConstraints {
        self.segments
            .params()
            .get_or(keys::EDITS, EditConstraints::all())
    }

    /// Sets the fields a drag may change.
    pub fn set_edits(&mut self, edits: EditConstraints) -> &mut Self {
        self.segments.params_mut().set(keys::EDITS, edits);
        self
    }

    fn handle_params(&self) -> HandleParams {
        let params = self.segments.params();
        HandleParams {
            width: params.get_or(keys::HANDLER_WIDTH, 2.0),
            opacity: params.get_or(keys::HANDLER_OPACITY, 0.0),
            min_width: params.get_or(keys::MIN_WIDTH, MIN_PIXEL_WIDTH),
        }
    }

    /// Horizontal offset of the right handle from the item's left edge.
    ///
    /// Items narrower than two handles keep their right handle just past the
    /// left one so both stay grabbable.
    #[must_use]
    pub fn right_handle_offset(&self, width_px: f64) -> f64 {
        let handles = self.handle_params();
        if width_px < handles.width * 2.0 {
            handles.width + handles.min_width
        } else {
            width_px - handles.width * 0.5
        }
    }

    fn handle_shape(&self, rect: Rect, color: String) -> ItemShape {
        let handles = self.handle_params();
        let left_x = rect.x0 + handles.width * 0.5;
        let right_x = rect.x0 + self.right_handle_offset(rect.width());
        ItemShape::Handles {
            left: Line::new(Point::new(left_x, rect.y0), Point::new(left_x, rect.y1)),
            right: Line::new(Point::new(right_x, rect.y0), Point::new(right_x, rect.y1)),
            color,
            stroke_width: handles.width,
            opacity: handles.opacity,
        }
    }

    fn draw_handles(&self, drawn: &[(usize, Rect)]) {
        let (Some(binding), Some(scene)) = (self.segments.binding(), self.segments.scene()) else {
            return;
        };
        let data = self.segments.data().borrow();
        let mut scene = scene.borrow_mut();
        for &(index, rect) in drawn {
            let color = self.segments.accessors().read_color(&data[index]);
            scene.draw_item(binding.id, index, &self.handle_shape(rect, color));
        }
    }

    /// Runs one edit on the item at `index` and redraws it if anything changed.
    fn edit(
        &mut self,
        index: usize,
        op: impl FnOnce(&AccessorSet<D>, &Self, EditConstraints, &mut D) -> DragOutcome,
    ) -> DragOutcome {
        let edits = self.edits();
        let outcome = {
            let data = self.segments.data();
            let mut data = data.borrow_mut();
            let Some(item) = data.get_mut(index) else {
                tracing::warn!(
                    layer = self.segments.id().map(LayerId::get),
                    index,
                    "drag on unknown item"
                );
                return DragOutcome::NONE;
            };
            op(self.segments.accessors(), self, edits, item)
        };
        if !outcome.is_noop() {
            self.draw(Some(index));
        }
        outcome
    }
}

impl<D: SegmentDatum + 'static> EditableSegmentLayer<D> {
    /// Creates an editable layer using the items' [`SegmentDatum`] impl.
    #[must_use]
    pub fn from_datum() -> Self {
        Self::new(SegmentLayer::from_datum())
    }
}

impl<D> fmt::Debug for EditableSegmentLayer<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditableSegmentLayer")
            .field("segments", &self.segments)
            .finish()
    }
}

impl<D> Layer for EditableSegmentLayer<D> {
    fn params(&self) -> &ParamStore {
        self.segments.params()
    }

    fn params_mut(&mut self) -> &mut ParamStore {
        self.segments.params_mut()
    }

    fn load(&mut self, ctx: &LayerContext, ids: &mut IdGenerator) {
        self.segments.load(ctx, ids);
    }

    fn bind(&mut self, scene: SharedScene) {
        self.segments.attach(scene);
        self.update();
    }

    fn unbind(&mut self) {
        self.segments.detach();
    }

    fn update(&mut self) {
        self.segments.reconcile();
        self.draw(None);
    }

    fn draw(&mut self, only: Option<usize>) {
        self.draw_handles(&self.segments.draw_bodies(only));
    }

    fn x_zoom(&mut self) {
        self.draw(None);
    }

    fn as_editable(&mut self) -> Option<&mut dyn Editable> {
        Some(self)
    }

    fn as_brushable(&mut self) -> Option<&mut dyn Brushable> {
        Some(self)
    }
}

impl<D> Editable for EditableSegmentLayer<D> {
    fn move_item(&mut self, item: usize, delta: Vec2) -> DragOutcome {
        self.edit(item, |accessors, layer, edits, datum| {
            let Some(binding) = layer.segments.binding() else {
                return DragOutcome::NONE;
            };
            move_segment(accessors, binding.axes(), edits, datum, delta)
        })
    }

    fn extend_left(&mut self, item: usize, delta: Vec2) -> DragOutcome {
        self.edit(item, |accessors, layer, edits, datum| {
            let Some(binding) = layer.segments.binding() else {
                return DragOutcome::NONE;
            };
            extend_left(accessors, &*binding.x, edits, datum, delta.x)
        })
    }

    fn extend_right(&mut self, item: usize, delta: Vec2) -> DragOutcome {
        self.edit(item, |accessors, layer, edits, datum| {
            let Some(binding) = layer.segments.binding() else {
                return DragOutcome::NONE;
            };
            extend_right(accessors, &*binding.x, edits, datum, delta.x)
        })
    }
}

impl<D> Brushable for EditableSegmentLayer<D> {
    fn brush(&mut self, extent: Rect, mode: BrushMode) -> usize {
        self.segments.brush(extent, mode)
    }

    fn clear_selection(&mut self) {
        self.segments.clear_selection();
    }

    fn is_selected(&self, item: usize) -> bool {
        self.segments.is_selected(item)
    }
}
