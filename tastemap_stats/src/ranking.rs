// Copyright 2025 the Tastemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::collections::HashMap;

use tastemap_data::VisitRecord;

/// One row of the most-visited list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RankedCountry {
    /// Country as first written in the visit list.
    pub name: String,
    /// Number of visits, whatever the spelling.
    pub count: usize,
}

/// Countries by visit count, most visited first, at most `limit` rows.
///
/// Countries are grouped by lowercase name, whether or not a region matches.
/// Equal counts keep the order in which the countries first appear.
#[must_use]
pub fn most_visited(visits: &[VisitRecord], limit: usize) -> Vec<RankedCountry> {
    let mut slots: HashMap<String, usize> = HashMap::new();
    let mut ranking: Vec<RankedCountry> = Vec::new();
    for visit in visits {
        let slot = *slots.entry(visit.country_key()).or_insert_with(|| {
            ranking.push(RankedCountry {
                name: visit.country.clone(),
                count: 0,
            });
            ranking.len() - 1
        });
        ranking[slot].count += 1;
    }

    // Stable sort, so ties stay in first-encounter order.
    ranking.sort_by(|a, b| b.count.cmp(&a.count));
    ranking.truncate(limit);
    ranking
}
