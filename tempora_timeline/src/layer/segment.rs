// Copyright 2025 the Tempora Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::rc::Rc;
use alloc::vec;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;

use kurbo::Rect;
use tempora_edit::{BrushMode, Brushable, brush_matches};
use tempora_params::{AccessorSet, Field, ParamStore, SegmentDatum, keys};
use tempora_scale::Scale;

use crate::ids::{IdGenerator, LayerId};
use crate::layer::{Binding, Layer, LayerContext, SharedData, register_layer_defaults};
use crate::scene::{ItemShape, SharedScene};

/// Draws one rectangle per item.
///
/// Item geometry comes from the layer's [`AccessorSet`]: start and duration
/// through the x scale, y and height through the y scale. The vertical axis
/// grows upward from the bottom of the y extent, so an item's top edge sits
/// at `max - height - y` pixels, offset by the `top` parameter. Ascending and
/// descending y ranges lay items out the same way.
pub struct SegmentLayer<D> {
    params: ParamStore,
    accessors: AccessorSet<D>,
    data: SharedData<D>,
    binding: Option<Binding>,
    scene: Option<SharedScene>,
    drawn: usize,
    selected: Vec<bool>,
}

impl<D> SegmentLayer<D> {
    /// Creates a layer with constant accessors and an empty dataset.
    #[must_use]
    pub fn new() -> Self {
        Self::with_accessors(AccessorSet::new())
    }

    /// Creates a layer reading its items through `accessors`.
    #[must_use]
    pub fn with_accessors(accessors: AccessorSet<D>) -> Self {
        let mut params = ParamStore::new();
        register_layer_defaults(&mut params);
        Self {
            params,
            accessors,
            data: Rc::new(RefCell::new(Vec::new())),
            binding: None,
            scene: None,
            drawn: 0,
            selected: Vec::new(),
        }
    }

    /// Replaces the dataset. Call [`Layer::update`] to redraw.
    pub fn set_data(&mut self, data: SharedData<D>) -> &mut Self {
        self.data = data;
        self
    }

    /// The dataset.
    #[must_use]
    pub fn data(&self) -> &SharedData<D> {
        &self.data
    }

    /// The accessors.
    #[must_use]
    pub fn accessors(&self) -> &AccessorSet<D> {
        &self.accessors
    }

    /// Mutable accessors.
    pub fn accessors_mut(&mut self) -> &mut AccessorSet<D> {
        &mut self.accessors
    }

    /// Id assigned by the view, once loaded.
    #[must_use]
    pub fn id(&self) -> Option<LayerId> {
        self.binding.as_ref().map(|b| b.id)
    }

    pub(crate) fn binding(&self) -> Option<&Binding> {
        self.binding.as_ref()
    }

    pub(crate) fn scene(&self) -> Option<&SharedScene> {
        self.scene.as_ref()
    }

    /// Pixel rectangle of `item`, or `None` before the layer is loaded.
    #[must_use]
    pub fn item_rect(&self, item: &D) -> Option<Rect> {
        let x = self.x_px(item)?;
        let width = self.width_px(item)?;
        let height = self.height_px(item)?;
        let y = self.y_px(item)?;
        let bottom = self.binding.as_ref()?.y.extent().end;
        let top = bottom - height - y + self.params.get_or(keys::TOP, 0.0);
        Some(Rect::new(x, top, x + width, top + height))
    }

    /// Start of `item` in x pixels.
    #[must_use]
    pub fn x_px(&self, item: &D) -> Option<f64> {
        self.project(Field::Start, item)
    }

    /// Duration of `item` in x pixels.
    #[must_use]
    pub fn width_px(&self, item: &D) -> Option<f64> {
        self.project(Field::Duration, item)
    }

    /// Vertical position of `item` in y pixels, measured up from the bottom of
    /// the y extent.
    #[must_use]
    pub fn y_px(&self, item: &D) -> Option<f64> {
        self.project(Field::Y, item)
    }

    /// Height of `item` in y pixels.
    #[must_use]
    pub fn height_px(&self, item: &D) -> Option<f64> {
        self.project(Field::Height, item)
    }

    fn project(&self, field: Field, item: &D) -> Option<f64> {
        let binding = self.binding.as_ref()?;
        let value = self.accessors.read(field, item);
        Some(match field {
            Field::Start | Field::Duration => binding.x.apply(value),
            _ => binding.y.distance(value),
        })
    }

    /// Returns `true` if the item at `index` is selected.
    #[must_use]
    pub fn is_item_selected(&self, index: usize) -> bool {
        self.selected.get(index).copied().unwrap_or(false)
    }

    /// Indices of the selected items.
    pub fn selected_items(&self) -> impl Iterator<Item = usize> + '_ {
        self.selected
            .iter()
            .enumerate()
            .filter_map(|(i, selected)| selected.then_some(i))
    }

    /// Draws the body of one item (or all of them) and returns the drawn rectangles.
    pub(crate) fn draw_bodies(&self, only: Option<usize>) -> Vec<(usize, Rect)> {
        let (Some(binding), Some(scene)) = (self.binding.as_ref(), self.scene.as_ref()) else {
            tracing::trace!("draw skipped: layer not bound");
            return Vec::new();
        };
        let data = self.data.borrow();
        let indices = match only {
            Some(index) if index < data.len() => index..index + 1,
            Some(index) => {
                tracing::warn!(layer = binding.id.get(), index, "draw of unknown item");
                0..0
            }
            None => 0..data.len(),
        };

        let mut scene = scene.borrow_mut();
        let mut drawn = Vec::with_capacity(indices.len());
        for index in indices {
            let item = &data[index];
            let Some(rect) = self.item_rect(item) else {
                continue;
            };
            let shape = ItemShape::Segment {
                rect,
                color: self.accessors.read_color(item),
                opacity: self.accessors.read(Field::Opacity, item),
            };
            scene.draw_item(binding.id, index, &shape);
            drawn.push((index, rect));
        }
        drawn
    }

    pub(crate) fn attach(&mut self, scene: SharedScene) {
        self.scene = Some(scene);
    }

    /// Removes drawings of items that left the dataset and resizes the selection.
    pub(crate) fn reconcile(&mut self) {
        let len = self.data.borrow().len();
        self.erase_from(len);
        self.selected.resize(len, false);
    }

    /// Removes every drawing and forgets the scene.
    pub(crate) fn detach(&mut self) {
        self.erase_from(0);
        self.scene = None;
    }

    fn erase_from(&mut self, len: usize) {
        if let (Some(binding), Some(scene)) = (self.binding.as_ref(), self.scene.as_ref()) {
            let mut scene = scene.borrow_mut();
            for index in len..self.drawn {
                scene.remove_item(binding.id, index);
            }
        }
        // Nothing is drawn while detached.
        self.drawn = if self.scene.is_some() { len } else { 0 };
    }

    fn set_selection(&mut self, selection: Vec<bool>) -> usize {
        if let (Some(binding), Some(scene)) = (self.binding.as_ref(), self.scene.as_ref()) {
            let mut scene = scene.borrow_mut();
            for (index, selected) in selection.iter().enumerate() {
                scene.set_selected(binding.id, index, *selected);
            }
        }
        self.selected = selection;
        self.selected.iter().filter(|s| **s).count()
    }
}

impl<D: SegmentDatum + 'static> SegmentLayer<D> {
    /// Creates a layer whose accessors use the items' [`SegmentDatum`] impl.
    #[must_use]
    pub fn from_datum() -> Self {
        Self::with_accessors(AccessorSet::from_datum())
    }
}

impl<D> Default for SegmentLayer<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D> fmt::Debug for SegmentLayer<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SegmentLayer")
            .field("params", &self.params)
            .field("accessors", &self.accessors)
            .field("items", &self.data.borrow().len())
            .field("binding", &self.binding)
            .field("bound", &self.scene.is_some())
            .field("drawn", &self.drawn)
            .field("selected", &self.selected)
            .finish()
    }
}

impl<D> Layer for SegmentLayer<D> {
    fn params(&self) -> &ParamStore {
        &self.params
    }

    fn params_mut(&mut self) -> &mut ParamStore {
        &mut self.params
    }

    fn load(&mut self, ctx: &LayerContext, _ids: &mut IdGenerator) {
        self.binding = Some(Binding::load(&mut self.params, ctx));
        self.accessors.apply_presentation(&self.params);
    }

    fn bind(&mut self, scene: SharedScene) {
        self.attach(scene);
        self.update();
    }

    fn unbind(&mut self) {
        self.detach();
    }

    fn update(&mut self) {
        self.reconcile();
        self.draw(None);
    }

    fn draw(&mut self, only: Option<usize>) {
        self.draw_bodies(only);
    }

    fn x_zoom(&mut self) {
        self.draw(None);
    }

    fn as_brushable(&mut self) -> Option<&mut dyn Brushable> {
        Some(self)
    }
}

impl<D> Brushable for SegmentLayer<D> {
    /// Only layers with the `selectable` parameter set take part in brushing.
    fn brush(&mut self, extent: Rect, mode: BrushMode) -> usize {
        if !self.params.get_or(keys::SELECTABLE, false) {
            return 0;
        }
        let selection: Vec<bool> = {
            let data = self.data.borrow();
            data.iter()
                .map(|item| {
                    self.item_rect(item)
                        .is_some_and(|rect| brush_matches(rect, extent, mode))
                })
                .collect()
        };
        let count = self.set_selection(selection);
        tracing::debug!(
            layer = self.id().map(LayerId::get),
            count,
            ?mode,
            "brush evaluated"
        );
        count
    }

    fn clear_selection(&mut self) {
        if self.selected.iter().any(|s| *s) {
            let len = self.selected.len();
            self.set_selection(vec![false; len]);
        }
    }

    fn is_selected(&self, item: usize) -> bool {
        self.is_item_selected(item)
    }
}
