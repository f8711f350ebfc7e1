// Copyright 2025 the Tastemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::collections::HashSet;

use chrono::NaiveDate;
use tastemap_data::Dataset;

use crate::activity::{Activity, monthly_activity};
use crate::coverage::{ContinentRatio, Ratio, continent_ratios, overall_ratio};
use crate::ranking::{RankedCountry, most_visited};

/// Knobs for [`Summary::compute_with`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SummaryOptions {
    /// Rows in the most-visited list.
    pub ranking_size: usize,
    /// Bucket for regions with no continent entry.
    pub fallback_continent: String,
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self {
            ranking_size: 10,
            fallback_continent: "Other".to_owned(),
        }
    }
}

/// Everything the statistics and calendar panels show.
///
/// Computed on demand from the dataset; nothing here is cached.
#[derive(Clone, Debug, PartialEq)]
pub struct Summary {
    /// Number of visit records.
    pub visit_count: usize,
    /// Number of distinct restaurant names, ignoring case.
    pub restaurant_count: usize,
    /// Share of all regions visited.
    pub overall: Ratio,
    /// Share per continent.
    pub continents: Vec<ContinentRatio>,
    /// Most visited countries.
    pub ranking: Vec<RankedCountry>,
    /// Month calendar.
    pub activity: Activity,
}

impl Summary {
    /// Computes the summary with default options.
    #[must_use]
    pub fn compute(dataset: &Dataset, today: NaiveDate) -> Self {
        Self::compute_with(dataset, today, &SummaryOptions::default())
    }

    /// Computes the summary.
    #[must_use]
    pub fn compute_with(dataset: &Dataset, today: NaiveDate, options: &SummaryOptions) -> Self {
        let visits = dataset.visits();
        let restaurant_count = visits
            .iter()
            .map(|v| v.restaurant.trim().to_lowercase())
            .collect::<HashSet<_>>()
            .len();
        Self {
            visit_count: visits.len(),
            restaurant_count,
            overall: overall_ratio(dataset),
            continents: continent_ratios(dataset, &options.fallback_continent),
            ranking: most_visited(visits, options.ranking_size),
            activity: monthly_activity(visits, today),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use tastemap_data::{CodeTable, Dataset, Region, VisitRecord};
    use tastemap_geo::MultiPolygon;

    use super::{Summary, SummaryOptions};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()
    }

    #[test]
    fn empty_dataset_summarizes_to_zero() {
        let data = Dataset::from_parts(
            Vec::new(),
            Some(
                [Region::new("ITA", "Italy", MultiPolygon::default())]
                    .into_iter()
                    .collect(),
            ),
            CodeTable::new(),
            CodeTable::new(),
        );
        let summary = Summary::compute(&data, today());
        assert_eq!(summary.visit_count, 0);
        assert_eq!(summary.restaurant_count, 0);
        assert_eq!((summary.overall.visited, summary.overall.total), (0, 1));
        assert!(summary.ranking.is_empty());
        assert!(summary.activity.years.is_empty());
        assert_eq!(summary.continents[0].name, "Other");
    }

    #[test]
    fn counts_visits_and_distinct_restaurants() {
        let visits = vec![
            VisitRecord::new("Italy", "2024-03-05", "Roscioli"),
            VisitRecord::new("Italy", "2024-03-09", "roscioli"),
            VisitRecord::new("Japan", "2024-04-01", "Sushi Dai"),
        ];
        let data = Dataset::from_parts(visits, None, CodeTable::new(), CodeTable::new());
        let summary = Summary::compute_with(
            &data,
            today(),
            &SummaryOptions {
                ranking_size: 1,
                fallback_continent: "Elsewhere".to_owned(),
            },
        );
        assert_eq!(summary.visit_count, 3);
        assert_eq!(summary.restaurant_count, 2);
        assert_eq!(summary.ranking.len(), 1);
        assert_eq!(summary.ranking[0].name, "Italy");
        assert_eq!(summary.activity.active_months, 2);
        assert_eq!(summary.activity.elapsed_months, 6);
    }
}
