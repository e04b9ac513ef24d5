// Copyright 2025 the Tempora Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tempora Params: per-layer configuration and field accessors.
//!
//! Every renderable layer of a timeline owns two small stores:
//!
//! - a [`ParamStore`], mapping named keys to type-erased values with
//!   documented defaults. Required keys that are neither set nor defaulted
//!   fail with [`ParamError::Missing`] instead of silently reading as unset;
//! - an [`AccessorSet`], holding one [`FieldAccessor`] per semantic field
//!   (start, duration, vertical position, height, color, opacity, stroke
//!   width). Accessors decouple the fields of application data from
//!   rendering, and double as writers when a drag mutates an item.
//!
//! ## Minimal example
//!
//! ```rust
//! use tempora_params::{keys, AccessorSet, Field, ParamStore, SegmentDatum};
//!
//! struct Clip { start: f64, duration: f64 }
//!
//! impl SegmentDatum for Clip {
//!     fn start(&self) -> f64 { self.start }
//!     fn set_start(&mut self, v: f64) { self.start = v; }
//!     fn duration(&self) -> f64 { self.duration }
//!     fn set_duration(&mut self, v: f64) { self.duration = v; }
//! }
//!
//! let mut params = ParamStore::new();
//! params.set_default(keys::OPACITY, 1.0_f64).set(keys::COLOR, String::from("#369"));
//!
//! let mut accessors = AccessorSet::<Clip>::from_datum();
//! accessors.apply_presentation(&params);
//!
//! let mut clip = Clip { start: 1.0, duration: 2.0 };
//! accessors.write(Field::Start, &mut clip, 3.0);
//! assert_eq!(clip.start, 3.0);
//! assert_eq!(accessors.read_color(&clip), "#369");
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod accessor;
mod error;
pub mod keys;
mod store;
mod value;

pub use accessor::{AccessorSet, Field, FieldAccessor, SegmentDatum};
pub use error::ParamError;
pub use store::{ParamKey, ParamStore};
pub use value::ParamValue;
