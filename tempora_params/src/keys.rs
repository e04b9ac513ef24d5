// Copyright 2025 the Tempora Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Well-known parameter keys shared by layers and states.

/// Layer name (`String`).
pub const NAME: &str = "name";
/// Layer opacity (`f64`).
pub const OPACITY: &str = "opacity";
/// Layer height in pixels (`f64`).
pub const HEIGHT: &str = "height";
/// Vertical offset of the layer in pixels (`f64`).
pub const TOP: &str = "top";
/// Layer color (`String`).
pub const COLOR: &str = "color";
/// Stroke width in pixels (`f64`).
pub const WIDTH: &str = "width";
/// Whether brushing may select items (`bool`).
pub const SELECTABLE: &str = "selectable";
/// Optional x domain override (`core::ops::Range<f64>`).
pub const X_DOMAIN: &str = "x_domain";
/// Optional y domain override (`core::ops::Range<f64>`).
pub const Y_DOMAIN: &str = "y_domain";
/// Optional y range override (`core::ops::Range<f64>`).
pub const Y_RANGE: &str = "y_range";
/// Editable fields of a layer.
pub const EDITS: &str = "edits";
/// Resize handle width in pixels (`f64`).
pub const HANDLER_WIDTH: &str = "handler_width";
/// Resize handle opacity (`f64`).
pub const HANDLER_OPACITY: &str = "handler_opacity";
/// Smallest drawn item width in pixels (`f64`).
pub const MIN_WIDTH: &str = "min_width";
/// Marker kind (`String`).
pub const TYPE: &str = "type";
/// Generated layer id (`String`).
pub const ID: &str = "id";
/// Whether a marker draws its head mark (`bool`).
pub const DISPLAY_MARK: &str = "display_mark";
