// Copyright 2025 the Tempora Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Views: windows onto a timeline, each with its own scales and layers.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::fmt;

use kurbo::Size;
use tempora_scale::Scale;

use crate::ids::{IdGenerator, LayerId, ViewId};
use crate::layer::{Layer, LayerContext};
use crate::scene::SharedScene;

/// An ordered stack of layers sharing one x scale, one y scale and a size.
///
/// Layers are loaded when the view is registered on a timeline, and bound
/// (first drawn) once the view has a scene. A layer added after either step
/// catches up immediately.
pub struct View {
    x_scale: Rc<dyn Scale>,
    y_scale: Rc<dyn Scale>,
    size: Size,
    layers: Vec<(LayerId, Box<dyn Layer>)>,
    next_layer: u32,
    scene: Option<SharedScene>,
    loaded: bool,
}

impl View {
    /// Creates an empty view.
    #[must_use]
    pub fn new(x_scale: Rc<dyn Scale>, y_scale: Rc<dyn Scale>, size: Size) -> Self {
        Self {
            x_scale,
            y_scale,
            size,
            layers: Vec::new(),
            next_layer: 0,
            scene: None,
            loaded: false,
        }
    }

    /// The horizontal scale.
    #[must_use]
    pub fn x_scale(&self) -> &Rc<dyn Scale> {
        &self.x_scale
    }

    /// The vertical scale.
    #[must_use]
    pub fn y_scale(&self) -> &Rc<dyn Scale> {
        &self.y_scale
    }

    /// The view size in pixels.
    #[must_use]
    pub fn size(&self) -> Size {
        self.size
    }

    /// Returns `true` once the view was registered on a timeline.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Appends a layer on top of the existing ones.
    ///
    /// `ids` is only consulted when the view is already loaded; pass the
    /// timeline's generator (see [`Timeline::ids_mut`](crate::Timeline::ids_mut)).
    pub fn add_layer(&mut self, layer: impl Layer + 'static, ids: &mut IdGenerator) -> LayerId {
        self.push_layer(Box::new(layer), ids)
    }

    /// Appends an already boxed layer.
    pub fn push_layer(&mut self, mut layer: Box<dyn Layer>, ids: &mut IdGenerator) -> LayerId {
        let id = LayerId::new(self.next_layer);
        self.next_layer += 1;
        if self.loaded {
            layer.load(&self.context(id), ids);
            if let Some(scene) = &self.scene {
                layer.bind(Rc::clone(scene));
            }
        }
        self.layers.push((id, layer));
        id
    }

    /// Removes a layer, returning it.
    ///
    /// The layer is unbound first, so its drawing leaves the scene.
    pub fn remove_layer(&mut self, id: LayerId) -> Option<Box<dyn Layer>> {
        let index = self.layers.iter().position(|(l, _)| *l == id)?;
        let (_, mut layer) = self.layers.remove(index);
        layer.unbind();
        tracing::debug!(?id, "layer removed");
        Some(layer)
    }

    /// The layer with `id`.
    #[must_use]
    pub fn layer(&self, id: LayerId) -> Option<&dyn Layer> {
        self.layers
            .iter()
            .find(|(l, _)| *l == id)
            .map(|(_, layer)| &**layer)
    }

    /// The layer with `id`, mutably.
    pub fn layer_mut(&mut self, id: LayerId) -> Option<&mut (dyn Layer + 'static)> {
        self.layers
            .iter_mut()
            .find(|(l, _)| *l == id)
            .map(|(_, layer)| &mut **layer)
    }

    /// Iterates layers bottom to top.
    pub fn layers(&self) -> impl Iterator<Item = (LayerId, &dyn Layer)> + '_ {
        self.layers.iter().map(|(id, layer)| (*id, &**layer))
    }

    /// Iterates layers bottom to top, mutably.
    pub fn layers_mut(&mut self) -> impl Iterator<Item = (LayerId, &mut (dyn Layer + 'static))> + '_ {
        self.layers.iter_mut().map(|(id, layer)| (*id, &mut **layer))
    }

    /// Number of layers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Returns `true` if the view has no layers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Attaches the view to a scene. Loaded layers are bound right away.
    pub fn set_scene(&mut self, scene: SharedScene) {
        if self.loaded {
            for (_, layer) in &mut self.layers {
                layer.bind(Rc::clone(&scene));
            }
        }
        self.scene = Some(scene);
    }

    /// Loads every layer with the view's scales and size, then binds them if
    /// a scene is attached.
    pub(crate) fn load(&mut self, ids: &mut IdGenerator) {
        self.loaded = true;
        for index in 0..self.layers.len() {
            let ctx = self.context(self.layers[index].0);
            let layer = &mut self.layers[index].1;
            layer.load(&ctx, ids);
            if let Some(scene) = &self.scene {
                layer.bind(Rc::clone(scene));
            }
        }
    }

    /// Updates every layer.
    pub fn update(&mut self) {
        for (_, layer) in &mut self.layers {
            layer.update();
        }
    }

    /// Redraws every layer.
    pub fn draw(&mut self) {
        for (_, layer) in &mut self.layers {
            layer.draw(None);
        }
    }

    /// Notifies every layer that the horizontal zoom changed.
    pub fn x_zoom(&mut self) {
        for (_, layer) in &mut self.layers {
            layer.x_zoom();
        }
    }

    fn context(&self, layer: LayerId) -> LayerContext {
        LayerContext {
            layer,
            x_scale: Rc::clone(&self.x_scale),
            y_scale: Rc::clone(&self.y_scale),
            width: self.size.width,
            height: self.size.height,
        }
    }
}

impl fmt::Debug for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("View")
            .field("x_scale", &self.x_scale)
            .field("y_scale", &self.y_scale)
            .field("size", &self.size)
            .field("layers", &self.layers)
            .field("has_scene", &self.scene.is_some())
            .field("loaded", &self.loaded)
            .finish_non_exhaustive()
    }
}

/// The views of a timeline, in registration order.
#[derive(Debug, Default)]
pub struct ViewCollection {
    views: Vec<View>,
}

impl ViewCollection {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a view and returns its id.
    pub(crate) fn push(&mut self, view: View) -> ViewId {
        let id = ViewId::from_index(self.views.len());
        self.views.push(view);
        id
    }

    /// The view with `id`.
    #[must_use]
    pub fn get(&self, id: ViewId) -> Option<&View> {
        self.views.get(id.index())
    }

    /// The view with `id`, mutably.
    pub fn get_mut(&mut self, id: ViewId) -> Option<&mut View> {
        self.views.get_mut(id.index())
    }

    /// The layer `layer` of view `view`, mutably.
    pub fn layer_mut(&mut self, view: ViewId, layer: LayerId) -> Option<&mut (dyn Layer + 'static)> {
        self.get_mut(view)?.layer_mut(layer)
    }

    /// Iterates views with their ids.
    pub fn iter(&self) -> impl Iterator<Item = (ViewId, &View)> + '_ {
        self.views
            .iter()
            .enumerate()
            .map(|(i, v)| (ViewId::from_index(i), v))
    }

    /// Iterates views with their ids, mutably.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (ViewId, &mut View)> + '_ {
        self.views
            .iter_mut()
            .enumerate()
            .map(|(i, v)| (ViewId::from_index(i), v))
    }

    /// Number of views.
    #[must_use]
    pub fn len(&self) -> usize {
        self.views.len()
    }

    /// Returns `true` if no view is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }
}

impl<'a> IntoIterator for &'a ViewCollection {
    type Item = &'a View;
    type IntoIter = core::slice::Iter<'a, View>;

    fn into_iter(self) -> Self::IntoIter {
        self.views.iter()
    }
}
