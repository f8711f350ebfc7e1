// Copyright 2025 the Tastemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tastemap Data: loading the visit list, country shapes and lookup tables.
//!
//! Four inputs feed the map:
//! - a YAML visit list, parsed into [`VisitRecord`]s;
//! - a GeoJSON `FeatureCollection` of country shapes, parsed into a [`RegionSet`];
//! - two flat JSON tables keyed by three-letter code ([`CodeTable`]): continent
//!   names and two-letter flag codes.
//!
//! [`Dataset::load`] reads all of them through [`DataSource`]s and fails soft:
//! a source that is missing or unparsable leaves its part empty, is logged at
//! `warn` level, and is listed in the [`LoadReport`]. The rest of the data
//! still loads.
//!
//! ```rust
//! use tastemap_data::{Dataset, Sources, TextSource};
//!
//! let data = Dataset::load(&Sources {
//!     visits: Box::new(TextSource::new(
//!         "- {country: Italy, date: 2024-03-05, restaurant: Da Mario}",
//!     )),
//!     ..Sources::default()
//! });
//!
//! assert!(data.visited().contains("ITALY"));
//! assert!(data.regions().is_none());
//! assert!(!data.report().is_complete());
//! ```
//!
//! Country names are matched case-insensitively and exactly: a visit to
//! `"italy"` colors the region named `"Italy"`, but nothing colors a region
//! for `"Ital"`.

mod dataset;
mod error;
mod lookup;
mod region;
mod source;
mod visit;

pub use dataset::{Dataset, LoadFailure, LoadReport, SourceKind, Sources};
pub use error::{DataError, Result};
pub use lookup::{CodeTable, parse_code_table};
pub use region::{DEFAULT_EXCLUDED, Region, RegionCode, RegionSet, parse_regions};
pub use source::{DataSource, FileSource, MissingSource, TextSource};
pub use visit::{VisitRecord, VisitedSet, parse_visits};
