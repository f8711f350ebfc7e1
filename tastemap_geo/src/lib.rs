// Copyright 2025 the Tastemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tastemap Geo: projecting country shapes onto a screen-space viewport.
//!
//! This crate is the geometry fitter of Tastemap. It knows nothing about
//! visits or panels; it only turns longitude/latitude shapes into screen
//! coordinates for a given viewport size:
//! - [`MultiPolygon`] / [`Polygon`] / [`LonLat`]: the shapes loaded from the
//!   region collection.
//! - [`Projection`]: a Natural Earth projection with a uniform scale and a
//!   translation, fitted to a padded viewport.
//! - [`MapGeometry`]: the fitted projection plus one screen-space
//!   [`kurbo::BezPath`] and bounding box per shape.
//!
//! The fit is a pure function of the viewport: callers rebuild the
//! [`MapGeometry`] whenever the width or height changes instead of updating
//! it in place.
//!
//! ## Minimal example
//!
//! ```rust
//! use tastemap_geo::{LonLat, MapGeometry, MultiPolygon, Polygon};
//!
//! let square = MultiPolygon::from(Polygon::new(vec![
//!     LonLat::new(-10.0, -10.0),
//!     LonLat::new(10.0, -10.0),
//!     LonLat::new(10.0, 10.0),
//!     LonLat::new(-10.0, 10.0),
//!     LonLat::new(-10.0, -10.0),
//! ]));
//!
//! let geometry = MapGeometry::build(800.0, 400.0, 10.0, [&square]).unwrap();
//! let bounds = geometry.map_bounds();
//! assert!(bounds.x0 >= 10.0 - 1e-9 && bounds.x1 <= 790.0 + 1e-9);
//! ```
//!
//! This crate is `no_std`.

#![no_std]

extern crate alloc;

mod geometry;
mod projection;
mod shape;

pub use geometry::{MapGeometry, projected_bounds, region_path};
pub use projection::{Projection, natural_earth, natural_earth_invert};
pub use shape::{LonLat, MultiPolygon, Polygon, Ring};
