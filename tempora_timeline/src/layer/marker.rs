// Copyright 2025 the Tempora Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;
use core::fmt;

use kurbo::{Line, Point, Rect, Vec2};
use tempora_edit::{DragOutcome, EditConstraints, Editable, move_point};
use tempora_params::{ParamStore, keys};

use crate::ids::{IdGenerator, LayerId};
use crate::layer::{Binding, Layer, LayerContext, register_layer_defaults};
use crate::scene::{ItemShape, SharedScene};

/// Height of the head mark in pixels.
pub const MARK_HEIGHT: f64 = 8.0;

/// Horizontal extent of the head mark around the marker position.
const MARK_SPAN: (f64, f64) = (-3.0, 4.0);

/// A single vertical cursor, for example the playback position.
///
/// The marker is one item (index `0`) whose position is set with
/// [`MarkerLayer::set_current_time`] and can be dragged horizontally within
/// the x range.
pub struct MarkerLayer {
    params: ParamStore,
    position: f64,
    binding: Option<Binding>,
    scene: Option<SharedScene>,
}

impl MarkerLayer {
    /// Creates a cursor at `0.0`.
    #[must_use]
    pub fn new() -> Self {
        let mut params = ParamStore::new();
        register_layer_defaults(&mut params);
        params
            .set_default(keys::TYPE, String::from("cursor"))
            .set_default(keys::DISPLAY_MARK, true)
            .set_default(keys::WIDTH, 1.0_f64)
            .set_default(keys::COLOR, String::from("#000000"))
            .set_default(keys::OPACITY, 0.7_f64);
        Self {
            params,
            position: 0.0,
            binding: None,
            scene: None,
        }
    }

    /// Moves the cursor to `time`, in domain units. Call [`Layer::draw`] to
    /// redraw.
    pub fn set_current_time(&mut self, time: f64) -> &mut Self {
        self.position = time;
        self
    }

    /// The cursor position, in domain units.
    #[must_use]
    pub fn current_time(&self) -> f64 {
        self.position
    }

    /// The id from the `id` parameter; generated on load when not set.
    #[must_use]
    pub fn marker_id(&self) -> Option<&str> {
        self.params.get_ref::<String>(keys::ID).ok().map(String::as_str)
    }

    fn shape(&self, binding: &Binding) -> ItemShape {
        let x = binding.x.apply(self.position);
        let top = self.params.get_or(keys::TOP, 0.0);
        let height = self.params.get_or(keys::HEIGHT, 1.0);
        let display_mark = self.params.get_or(keys::DISPLAY_MARK, true);

        let (y0, y1) = if display_mark {
            (MARK_HEIGHT, height - MARK_HEIGHT)
        } else {
            (0.0, height)
        };
        let head = display_mark
            .then(|| Rect::new(x + MARK_SPAN.0, top, x + MARK_SPAN.1, top + MARK_HEIGHT));

        ItemShape::Marker {
            line: Line::new(Point::new(x, top + y0), Point::new(x, top + y1)),
            head,
            color: self.params.get_or(keys::COLOR, String::from("#000000")),
            stroke_width: self.params.get_or(keys::WIDTH, 1.0),
            opacity: self.params.get_or(keys::OPACITY, 0.7),
        }
    }
}

impl fmt::Debug for MarkerLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MarkerLayer")
            .field("params", &self.params)
            .field("position", &self.position)
            .field("binding", &self.binding)
            .field("bound", &self.scene.is_some())
            .finish()
    }
}

impl Default for MarkerLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl Layer for MarkerLayer {
    fn params(&self) -> &ParamStore {
        &self.params
    }

    fn params_mut(&mut self) -> &mut ParamStore {
        &mut self.params
    }

    fn load(&mut self, ctx: &LayerContext, ids: &mut IdGenerator) {
        if !self.params.contains(keys::ID) {
            let id = ids.next(self.params.name());
            self.params.set(keys::ID, id);
        }
        self.binding = Some(Binding::load(&mut self.params, ctx));
    }

    fn bind(&mut self, scene: SharedScene) {
        self.scene = Some(scene);
        self.update();
    }

    fn update(&mut self) {
        self.draw(None);
    }

    fn draw(&mut self, only: Option<usize>) {
        if only.is_some_and(|index| index != 0) {
            return;
        }
        let (Some(binding), Some(scene)) = (self.binding.as_ref(), self.scene.as_ref()) else {
            return;
        };
        let shape = self.shape(binding);
        scene.borrow_mut().draw_item(binding.id, 0, &shape);
    }

    fn unbind(&mut self) {
        let Some(scene) = self.scene.take() else {
            return;
        };
        if let Some(binding) = self.binding.as_ref() {
            scene.borrow_mut().remove_item(binding.id, 0);
        }
    }

    fn x_zoom(&mut self) {
        self.update();
    }

    fn as_editable(&mut self) -> Option<&mut dyn Editable> {
        Some(self)
    }
}

impl Editable for MarkerLayer {
    fn move_item(&mut self, item: usize, delta: Vec2) -> DragOutcome {
        if item != 0 {
            tracing::warn!(
                layer = self.binding.as_ref().map(|b| b.id).map(LayerId::get),
                item,
                "marker has a single item"
            );
            return DragOutcome::NONE;
        }
        let Some(binding) = self.binding.as_ref() else {
            return DragOutcome::NONE;
        };
        match move_point(&*binding.x, self.position, delta.x) {
            Some(position) => {
                self.position = position;
                self.draw(Some(0));
                DragOutcome {
                    changed: EditConstraints::X,
                    clamped: EditConstraints::empty(),
                }
            }
            None if delta.x.is_finite() && delta.x != 0.0 => DragOutcome {
                changed: EditConstraints::empty(),
                clamped: EditConstraints::X,
            },
            None => DragOutcome::NONE,
        }
    }
}
