// Copyright 2025 the Tempora Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use crate::event::{RawInput, TimelineEvent};
use crate::ids::{IdGenerator, ViewId};
use crate::interaction::{InteractionSource, Keyboard, SourceId, Surface};
use crate::state::InteractionState;
use crate::view::{View, ViewCollection};

type Listener = Box<dyn FnMut(&TimelineEvent)>;

/// The central controller: owns the views, the interaction sources and the
/// active interaction state, and routes every event.
///
/// Routing is two-step: external listeners registered with
/// [`Timeline::on_event`] see each event first, then the active state (if
/// any) handles it. Listeners therefore observe data as it was before the
/// state mutated anything for that event.
pub struct Timeline {
    views: ViewCollection,
    state: Option<Box<dyn InteractionState>>,
    listeners: Vec<Listener>,
    keyboard: Keyboard,
    surfaces: Vec<Surface>,
    ids: IdGenerator,
}

impl Timeline {
    /// Creates a timeline with no views and no state.
    ///
    /// The document keyboard source exists from the start.
    #[must_use]
    pub fn new() -> Self {
        Self {
            views: ViewCollection::new(),
            state: None,
            listeners: Vec::new(),
            keyboard: Keyboard::new(),
            surfaces: Vec::new(),
            ids: IdGenerator::new(),
        }
    }

    /// Replaces the active state, returning the previous one.
    ///
    /// The previous state's `exit` runs before the new state's `enter`.
    pub fn set_state(
        &mut self,
        state: impl InteractionState + 'static,
    ) -> Option<Box<dyn InteractionState>> {
        self.set_boxed_state(Box::new(state))
    }

    /// Replaces the active state with an already boxed one.
    pub fn set_boxed_state(
        &mut self,
        mut state: Box<dyn InteractionState>,
    ) -> Option<Box<dyn InteractionState>> {
        let mut previous = self.state.take();
        if let Some(previous) = previous.as_mut() {
            previous.exit(&mut self.views);
        }
        tracing::debug!(
            from = previous.as_ref().map(|s| s.name()),
            to = state.name(),
            "state transition"
        );
        state.enter(&mut self.views);
        self.state = Some(state);
        previous
    }

    /// The active state, if one was ever set.
    #[must_use]
    pub fn state(&self) -> Option<&dyn InteractionState> {
        self.state.as_deref()
    }

    /// Registers an external listener. Listeners are called in registration
    /// order, before the active state.
    pub fn on_event(&mut self, listener: impl FnMut(&TimelineEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Routes one event: listeners first, then the active state.
    pub fn handle_event(&mut self, event: &TimelineEvent) {
        tracing::trace!(kind = ?event.kind, target = ?event.target, "routing event");
        for listener in &mut self.listeners {
            listener(event);
        }
        if let Some(state) = self.state.as_mut() {
            state.handle_event(event, &mut self.views);
        }
    }

    /// Feeds host input to a source and routes the events it produces.
    ///
    /// Pointer events carry the modifiers currently held on the keyboard.
    /// Input for a view that was never registered is dropped.
    pub fn dispatch(&mut self, source: SourceId, input: &RawInput) {
        let events = match source {
            SourceId::Keyboard => self.keyboard.normalize(input),
            SourceId::Surface(view) => {
                let Some(surface) = self.surfaces.get_mut(view.index()) else {
                    tracing::warn!(?view, "input for an unregistered view");
                    return;
                };
                let modifiers = self.keyboard.modifiers();
                let mut events = surface.normalize(input);
                for event in &mut events {
                    event.modifiers = modifiers;
                }
                events
            }
        };
        for event in &events {
            self.handle_event(event);
        }
    }

    /// Adds a view, loads its layers, and creates the view's pointer surface.
    pub fn register(&mut self, mut view: View) -> ViewId {
        view.load(&mut self.ids);
        let id = self.views.push(view);
        self.surfaces.push(Surface::new(id));
        tracing::debug!(?id, "view registered");
        id
    }

    /// The registered views.
    #[must_use]
    pub fn views(&self) -> &ViewCollection {
        &self.views
    }

    /// The registered views, mutably.
    pub fn views_mut(&mut self) -> &mut ViewCollection {
        &mut self.views
    }

    /// The view with `id`.
    #[must_use]
    pub fn view(&self, id: ViewId) -> Option<&View> {
        self.views.get(id)
    }

    /// The view with `id`, mutably, together with the id generator needed to
    /// add layers to it.
    pub fn view_mut(&mut self, id: ViewId) -> Option<(&mut View, &mut IdGenerator)> {
        let view = self.views.get_mut(id)?;
        Some((view, &mut self.ids))
    }

    /// The per-timeline id generator.
    pub fn ids_mut(&mut self) -> &mut IdGenerator {
        &mut self.ids
    }

    /// The document keyboard source.
    #[must_use]
    pub fn keyboard(&self) -> &Keyboard {
        &self.keyboard
    }

    /// The pointer surface of a view.
    #[must_use]
    pub fn surface(&self, view: ViewId) -> Option<&Surface> {
        self.surfaces.get(view.index())
    }

    /// Updates every view.
    pub fn update(&mut self) {
        for (_, view) in self.views.iter_mut() {
            view.update();
        }
    }

    /// Redraws every view.
    pub fn draw(&mut self) {
        for (_, view) in self.views.iter_mut() {
            view.draw();
        }
    }

    /// Tells every view that the horizontal zoom changed.
    pub fn x_zoom(&mut self) {
        for (_, view) in self.views.iter_mut() {
            view.x_zoom();
        }
    }
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Timeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Timeline")
            .field("views", &self.views)
            .field("state", &self.state)
            .field("listeners", &self.listeners.len())
            .field("keyboard", &self.keyboard)
            .field("surfaces", &self.surfaces)
            .field("ids", &self.ids)
            .finish()
    }
}

impl<'a> IntoIterator for &'a Timeline {
    type Item = &'a View;
    type IntoIter = core::slice::Iter<'a, View>;

    fn into_iter(self) -> Self::IntoIter {
        (&self.views).into_iter()
    }
}
