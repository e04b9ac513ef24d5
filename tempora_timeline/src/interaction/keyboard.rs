// Copyright 2025 the Tempora Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use smallvec::{SmallVec, smallvec};

use crate::event::{EventKind, EventTarget, Modifiers, RawInput, TimelineEvent};
use crate::interaction::InteractionSource;

/// Document-wide keyboard source.
///
/// Tracks held modifier keys so that pointer events can report them too.
#[derive(Clone, Debug, Default)]
pub struct Keyboard {
    modifiers: Modifiers,
}

impl Keyboard {
    /// Creates a keyboard source with no keys held.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Modifiers currently held.
    #[must_use]
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }
}

impl InteractionSource for Keyboard {
    fn normalize(&mut self, input: &RawInput) -> SmallVec<[TimelineEvent; 2]> {
        let (kind, key) = match input {
            RawInput::KeyDown { key } => {
                self.modifiers |= Modifiers::from_key(key);
                (EventKind::KeyDown, key)
            }
            RawInput::KeyUp { key } => {
                self.modifiers -= Modifiers::from_key(key);
                (EventKind::KeyUp, key)
            }
            _ => return SmallVec::new(),
        };
        smallvec![
            TimelineEvent::new(kind, EventTarget::Document)
                .with_key(key.clone())
                .with_modifiers(self.modifiers)
        ]
    }
}
