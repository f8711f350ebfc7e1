// Copyright 2025 the Tastemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tastemap View 2D: the map viewport and its overview/focus controller.
//!
//! This crate provides a small, headless model of the zoomable map view. It
//! focuses on:
//! - Camera / viewport state (pan + zoom) over the fitted map plane.
//! - Coordinate conversion between world (fitted map) and view space.
//! - Zoom limits and a translate extent that keeps the map on screen.
//! - Animated moves between transforms.
//! - A [`ViewController`] that frames a selected region next to the detail
//!   panel and returns to the overview on deselect.
//!
//! It does **not** own any shapes or rendering backend. Callers are
//! expected to:
//! - Fit the map with `tastemap_geo` and pass the fitted bounds in.
//! - Wire pointer/wheel input into [`ViewController::pan_by`] and
//!   [`ViewController::zoom_at`].
//! - Supply a monotonic clock value with every call that can start or sample
//!   an animation.
//!
//! ## Minimal example
//!
//! ```rust
//! use core::time::Duration;
//! use kurbo::Rect;
//! use tastemap_view2d::{ViewConfig, ViewController};
//!
//! let map_bounds = Rect::new(10.0, 110.0, 790.0, 490.0);
//! let mut view = ViewController::new(ViewConfig::default(), 800.0, 600.0, map_bounds);
//!
//! // Select a region whose fitted bounds are known.
//! let now = Duration::from_millis(16);
//! let target = view.focus("ITA", Rect::new(380.0, 200.0, 410.0, 240.0), now);
//! assert_eq!(view.active(), Some(&"ITA"));
//!
//! // Half-way through the animation the scale is on its way up.
//! let mid = view.current_transform(now + Duration::from_millis(375));
//! assert!(mid.k > 1.0 && mid.k < target.k);
//! ```
//!
//! ## Design notes
//!
//! - Cameras are axis‑aligned with a **uniform** zoom factor.
//! - Panning operates in view space; zooming is expressed as a scalar.
//! - Clamping follows the "contain the view in an extent" rule: the visible
//!   world rectangle is pushed back inside the extent, or centered on it when
//!   it is larger.
//!
//! This crate is `no_std`.

#![no_std]

extern crate alloc;

mod controller;
mod modes;
mod transform;
mod viewport2d;

pub use controller::{ViewConfig, ViewController, ViewState};
pub use modes::{ClampMode, Orientation};
pub use transform::{Transition, ZoomTransform, ease_cubic_in_out};
pub use viewport2d::{Viewport2D, Viewport2DDebugInfo};
