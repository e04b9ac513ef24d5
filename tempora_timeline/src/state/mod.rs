// Copyright 2025 the Tempora Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Interaction states: what user input means right now.
//!
//! A [`Timeline`](crate::Timeline) has at most one active state. Setting a
//! new one calls [`InteractionState::exit`] on the outgoing state before
//! [`InteractionState::enter`] on the incoming one, so two states are never
//! entered at the same time.

use core::fmt;

use crate::event::TimelineEvent;
use crate::view::ViewCollection;

mod brush;
mod edit;

pub use brush::BrushState;
pub use edit::EditState;

/// A named interaction mode.
///
/// States receive the timeline's views on every call, so they can edit
/// layers without holding references to them between events.
pub trait InteractionState: fmt::Debug {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Called when the state becomes active.
    fn enter(&mut self, views: &mut ViewCollection) {
        let _ = views;
    }

    /// Called when the state is replaced.
    fn exit(&mut self, views: &mut ViewCollection) {
        let _ = views;
    }

    /// Handles one routed event.
    fn handle_event(&mut self, event: &TimelineEvent, views: &mut ViewCollection);
}
