// Copyright 2025 the Tempora Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layers: renderable units bound to a dataset.
//!
//! A layer is created detached, configured through its
//! [`ParamStore`](tempora_params::ParamStore), then added to a
//! [`View`](crate::View). When the view is registered, the layer is
//! [loaded](Layer::load) with the view's shared scales, and once the view has
//! a scene it is [bound](Layer::bind), which triggers the first
//! [update](Layer::update). Removing a layer from its view
//! [unbinds](Layer::unbind) it, clearing its drawing from the scene.
//!
//! Capabilities beyond drawing are exposed through
//! [`Layer::as_editable`] and [`Layer::as_brushable`], so interaction states
//! can drive any layer without knowing its concrete type.

use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;
use core::ops::Range;

use tempora_edit::{Axes, Brushable, Editable};
use tempora_params::{ParamStore, keys};
use tempora_scale::{LinearScale, Scale};

use crate::ids::{IdGenerator, LayerId};
use crate::scene::SharedScene;

mod marker;
mod segment;
mod segment_edit;

pub use marker::{MARK_HEIGHT, MarkerLayer};
pub use segment::SegmentLayer;
pub use segment_edit::EditableSegmentLayer;

/// A dataset shared between the application and a layer.
///
/// The engine mutates items in place during drags but never adds or removes
/// items.
pub type SharedData<D> = Rc<RefCell<Vec<D>>>;

/// Wraps `items` as a [`SharedData`].
pub fn shared_data<D>(items: impl IntoIterator<Item = D>) -> SharedData<D> {
    Rc::new(RefCell::new(items.into_iter().collect()))
}

/// What a view hands to its layers on load.
#[derive(Clone, Debug)]
pub struct LayerContext {
    /// Id of the layer within its view.
    pub layer: LayerId,
    /// Horizontal scale shared by every layer of the view.
    pub x_scale: Rc<dyn Scale>,
    /// Vertical scale shared by every layer of the view.
    pub y_scale: Rc<dyn Scale>,
    /// View width in pixels.
    pub width: f64,
    /// View height in pixels.
    pub height: f64,
}

/// A renderable unit of a view.
pub trait Layer: fmt::Debug {
    /// Configuration of the layer.
    fn params(&self) -> &ParamStore;

    /// Mutable configuration of the layer.
    fn params_mut(&mut self) -> &mut ParamStore;

    /// Binds the layer to its view's scales and size.
    fn load(&mut self, ctx: &LayerContext, ids: &mut IdGenerator);

    /// Attaches the layer to a scene and draws it for the first time.
    fn bind(&mut self, scene: SharedScene);

    /// Removes every item the layer drew and detaches it from its scene.
    ///
    /// The layer keeps its scales, so binding it again redraws it.
    fn unbind(&mut self);

    /// Reconciles the drawing with the dataset, then redraws everything.
    fn update(&mut self);

    /// Redraws one item, or every item when `only` is `None`.
    fn draw(&mut self, only: Option<usize>);

    /// Reacts to a change of the horizontal zoom.
    fn x_zoom(&mut self) {}

    /// The drag capability, if the layer's items can be edited.
    fn as_editable(&mut self) -> Option<&mut dyn Editable> {
        None
    }

    /// The brush capability, if the layer's items can be selected.
    fn as_brushable(&mut self) -> Option<&mut dyn Brushable> {
        None
    }
}

/// Registers the defaults every layer shares.
pub(crate) fn register_layer_defaults(params: &mut ParamStore) {
    params
        .set_default(keys::NAME, String::from("layer"))
        .set_default(keys::OPACITY, 1.0_f64)
        .set_default(keys::HEIGHT, 1.0_f64)
        .set_default(keys::TOP, 0.0_f64)
        .set_default(keys::COLOR, String::from("#000"))
        .set_default(keys::SELECTABLE, false);
}

/// Scales and id a layer received on load.
#[derive(Clone, Debug)]
pub(crate) struct Binding {
    pub(crate) id: LayerId,
    pub(crate) x: Rc<dyn Scale>,
    pub(crate) y: Rc<dyn Scale>,
}

impl Binding {
    /// Resolves the scales of a layer from its view and its own overrides.
    ///
    /// `x_domain` remaps the view's x range; `y_domain` and `y_range` together
    /// give the layer its own vertical scale. The view height replaces the
    /// `height` default.
    pub(crate) fn load(params: &mut ParamStore, ctx: &LayerContext) -> Self {
        params.set_default(keys::HEIGHT, ctx.height);

        let x = match params.get_opt::<Range<f64>>(keys::X_DOMAIN) {
            Some(domain) => {
                Rc::new(LinearScale::new(domain, ctx.x_scale.range())) as Rc<dyn Scale>
            }
            None => Rc::clone(&ctx.x_scale),
        };
        let y = match (
            params.get_opt::<Range<f64>>(keys::Y_DOMAIN),
            params.get_opt::<Range<f64>>(keys::Y_RANGE),
        ) {
            (Some(domain), Some(range)) => Rc::new(LinearScale::new(domain, range)) as Rc<dyn Scale>,
            _ => Rc::clone(&ctx.y_scale),
        };

        tracing::debug!(layer = ctx.layer.get(), name = params.name(), "layer loaded");
        Self {
            id: ctx.layer,
            x,
            y,
        }
    }

    pub(crate) fn axes(&self) -> Axes<'_> {
        Axes {
            x: &*self.x,
            y: &*self.y,
        }
    }
}
