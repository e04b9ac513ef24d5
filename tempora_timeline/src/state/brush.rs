// Copyright 2025 the Tempora Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Rect;
use tempora_edit::BrushMode;

use crate::event::{EventKind, TimelineEvent};
use crate::ids::ViewId;
use crate::state::InteractionState;
use crate::view::ViewCollection;

/// Selects items by dragging a rectangle over a view.
///
/// The rectangle is anchored where the drag starts and follows the pointer.
/// On every drag event each brushable layer of the view re-evaluates its
/// whole selection. Leaving the state clears every selection.
#[derive(Clone, Debug, Default)]
pub struct BrushState {
    mode: BrushMode,
    brush: Option<(ViewId, Rect)>,
}

impl BrushState {
    /// Creates a brush state testing the axes in `mode`.
    #[must_use]
    pub fn new(mode: BrushMode) -> Self {
        Self { mode, brush: None }
    }

    /// The axes tested.
    #[must_use]
    pub fn mode(&self) -> BrushMode {
        self.mode
    }

    /// The current brush rectangle and its view, while brushing.
    #[must_use]
    pub fn extent(&self) -> Option<(ViewId, Rect)> {
        self.brush
    }
}

impl InteractionState for BrushState {
    fn name(&self) -> &str {
        "brush"
    }

    fn exit(&mut self, views: &mut ViewCollection) {
        self.brush = None;
        for (_, view) in views.iter_mut() {
            for (_, layer) in view.layers_mut() {
                if let Some(brushable) = layer.as_brushable() {
                    brushable.clear_selection();
                }
            }
        }
    }

    fn handle_event(&mut self, event: &TimelineEvent, views: &mut ViewCollection) {
        match event.kind {
            EventKind::DragStart => {
                self.brush = match (event.target.view(), event.position) {
                    (Some(view), Some(anchor)) => Some((view, Rect::from_points(anchor, anchor))),
                    _ => None,
                };
            }
            EventKind::Drag => {
                let Some((view_id, rect)) = self.brush.as_mut() else {
                    return;
                };
                let delta = event.delta();
                rect.x1 += delta.x;
                rect.y1 += delta.y;
                let (view_id, extent) = (*view_id, *rect);

                let Some(view) = views.get_mut(view_id) else {
                    tracing::warn!(?view_id, "brush over an unknown view");
                    return;
                };
                let mut selected = 0;
                for (_, layer) in view.layers_mut() {
                    if let Some(brushable) = layer.as_brushable() {
                        selected += brushable.brush(extent, self.mode);
                    }
                }
                tracing::trace!(?extent, selected, "brushed");
            }
            EventKind::DragEnd => {
                self.brush = None;
            }
            _ => {}
        }
    }
}
