// Copyright 2025 the Tastemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tastemap Stats: numbers derived from a loaded dataset.
//!
//! Everything here is a pure function of a [`tastemap_data::Dataset`] (and,
//! for the calendar, of "today"). Nothing renders and nothing is cached;
//! callers recompute whenever a panel opens.
//!
//! - [`overall_ratio`]: visited regions over all regions, one decimal.
//! - [`continent_ratios`]: the same per continent, whole percent.
//! - [`most_visited`]: countries by number of visits.
//! - [`monthly_activity`]: which months had a visit, and the share of elapsed
//!   months that did.
//! - [`Summary`]: all of the above at once.
//!
//! ```rust
//! use tastemap_data::VisitRecord;
//! use tastemap_stats::most_visited;
//!
//! let visits = [
//!     VisitRecord::new("Italy", "2024-03-05", "Da Mario"),
//!     VisitRecord::new("Japan", "2024-04-01", "Sushi Dai"),
//!     VisitRecord::new("italy", "2024-05-11", "Roscioli"),
//! ];
//! let ranking = most_visited(&visits, 10);
//! assert_eq!(ranking[0].name, "Italy");
//! assert_eq!(ranking[0].count, 2);
//! ```

mod activity;
mod coverage;
mod ranking;
mod summary;

pub use activity::{Activity, MonthState, YearRow, monthly_activity, parse_visit_date};
pub use coverage::{ContinentRatio, Ratio, continent_ratios, overall_ratio};
pub use ranking::{RankedCountry, most_visited};
pub use summary::{Summary, SummaryOptions};

/// `part / total` as a whole percentage; `0` for an empty total.
#[allow(
    clippy::cast_possible_truncation,
    reason = "the ratio is within [0, 1], so the percentage fits in u32"
)]
fn rounded_percent(part: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (part as f64 * 100.0 / total as f64).round() as u32
}
