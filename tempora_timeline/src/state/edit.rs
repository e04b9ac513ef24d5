// Copyright 2025 the Tempora Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use tempora_edit::DragMode;

use crate::event::{EventKind, ItemRef, TimelineEvent};
use crate::state::InteractionState;
use crate::view::ViewCollection;

/// Drags and resizes items of editable layers.
///
/// A gesture starts when a drag starts on an item. Its [`DragMode`] is chosen
/// from the grabbed part and kept until the drag ends; every drag event in
/// between is applied to that item through its layer's
/// [`Editable`](tempora_edit::Editable) capability.
#[derive(Clone, Debug, Default)]
pub struct EditState {
    gesture: Option<(ItemRef, DragMode)>,
}

impl EditState {
    /// Creates an idle edit state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The item being dragged and the mode of the gesture, if any.
    #[must_use]
    pub fn gesture(&self) -> Option<(ItemRef, DragMode)> {
        self.gesture
    }
}

impl InteractionState for EditState {
    fn name(&self) -> &str {
        "edit"
    }

    fn exit(&mut self, _views: &mut ViewCollection) {
        self.gesture = None;
    }

    fn handle_event(&mut self, event: &TimelineEvent, views: &mut ViewCollection) {
        match event.kind {
            EventKind::DragStart => {
                self.gesture = event.target.item().map(|item| {
                    let mode = DragMode::for_part(item.part);
                    tracing::debug!(item = item.item, ?mode, "edit gesture started");
                    (*item, mode)
                });
            }
            EventKind::Drag => {
                let Some((item, mode)) = self.gesture else {
                    return;
                };
                let Some(layer) = views.layer_mut(item.view, item.layer) else {
                    tracing::warn!(?item, "drag targets an unknown layer");
                    return;
                };
                match layer.as_editable() {
                    Some(editable) => {
                        let outcome = editable.handle_drag(item.item, mode, event.delta());
                        tracing::trace!(?outcome, "drag applied");
                    }
                    None => tracing::trace!(?item, "layer is not editable"),
                }
            }
            EventKind::DragEnd => {
                self.gesture = None;
            }
            _ => {}
        }
    }
}
