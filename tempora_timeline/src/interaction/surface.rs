// Copyright 2025 the Tempora Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use smallvec::{SmallVec, smallvec};

use crate::event::{EventKind, EventTarget, RawInput, TimelineEvent};
use crate::ids::ViewId;
use crate::interaction::InteractionSource;
use crate::interaction::drag::DragTracker;

/// Pointer source bound to one view.
///
/// Turns press/move/release into mouse, click and drag events. Drag events
/// keep the target that was under the pointer at press time for the whole
/// gesture, and carry the movement since the previous event in
/// [`TimelineEvent::original`].
#[derive(Clone, Debug)]
pub struct Surface {
    view: ViewId,
    drag: DragTracker,
}

impl Surface {
    /// Creates a surface for `view`.
    #[must_use]
    pub fn new(view: ViewId) -> Self {
        Self {
            view,
            drag: DragTracker::default(),
        }
    }

    /// The view this surface is bound to.
    #[must_use]
    pub fn view(&self) -> ViewId {
        self.view
    }

    /// Returns `true` while a button is held on this surface.
    #[must_use]
    pub fn is_pressed(&self) -> bool {
        self.drag.is_pressed()
    }
}

impl InteractionSource for Surface {
    fn normalize(&mut self, input: &RawInput) -> SmallVec<[TimelineEvent; 2]> {
        match input {
            RawInput::PointerDown { position, target } => {
                self.drag.press(*position, *target);
                smallvec![TimelineEvent::new(EventKind::MouseDown, *target).with_position(*position)]
            }
            RawInput::PointerMove { position, target } => {
                let Some(step) = self.drag.update(*position) else {
                    return smallvec![
                        TimelineEvent::new(EventKind::MouseMove, *target).with_position(*position)
                    ];
                };
                let grabbed = self.drag.target();
                let mut events = SmallVec::new();
                if step.first {
                    let start = self.drag.start_pos().unwrap_or(*position);
                    events.push(TimelineEvent::new(EventKind::DragStart, grabbed).with_position(start));
                }
                events.push(
                    TimelineEvent::new(EventKind::Drag, grabbed)
                        .with_position(*position)
                        .with_delta(step.delta.x, step.delta.y),
                );
                events
            }
            RawInput::PointerUp { position, target } => {
                let grabbed = self.drag.target();
                let up = TimelineEvent::new(EventKind::MouseUp, *target).with_position(*position);
                match self.drag.release() {
                    Some(true) => smallvec![
                        TimelineEvent::new(EventKind::DragEnd, grabbed).with_position(*position),
                        up,
                    ],
                    Some(false) => smallvec![
                        up,
                        TimelineEvent::new(EventKind::Click, grabbed).with_position(*position),
                    ],
                    None => smallvec![up],
                }
            }
            RawInput::KeyDown { .. } | RawInput::KeyUp { .. } => SmallVec::new(),
        }
    }
}
