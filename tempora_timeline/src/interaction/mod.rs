// Copyright 2025 the Tempora Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Interaction sources: where timeline events come from.
//!
//! A timeline owns one [`Keyboard`] for the whole document and one
//! [`Surface`] per registered view. Each source turns host input
//! ([`RawInput`](crate::RawInput)) into zero or more
//! [`TimelineEvent`](crate::TimelineEvent)s; the timeline routes those.

use smallvec::SmallVec;

use crate::event::{RawInput, TimelineEvent};
use crate::ids::ViewId;

mod drag;
mod keyboard;
mod surface;

pub use drag::{DragStep, DragTracker};
pub use keyboard::Keyboard;
pub use surface::Surface;

/// Normalizes host input into timeline events.
pub trait InteractionSource {
    /// Converts one input into the events it produces, in delivery order.
    ///
    /// Input the source does not handle yields no events.
    fn normalize(&mut self, input: &RawInput) -> SmallVec<[TimelineEvent; 2]>;
}

/// Names an interaction source of a timeline.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SourceId {
    /// The document keyboard.
    Keyboard,
    /// The pointer surface of a view.
    Surface(ViewId),
}
