// Copyright 2025 the Tastemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::collections::BTreeMap;

use tastemap_data::{Dataset, Region};

use crate::rounded_percent;

/// How many of a group of regions have been visited.
#[derive(Clone, Debug, PartialEq)]
pub struct Ratio {
    /// Regions with at least one visit.
    pub visited: usize,
    /// Regions in the group.
    pub total: usize,
    /// `visited / total` as a percentage rounded to one decimal; `0.0` when
    /// the group is empty.
    pub percent: f64,
}

impl Ratio {
    fn new(visited: usize, total: usize) -> Self {
        let percent = if total == 0 {
            0.0
        } else {
            (visited as f64 * 1000.0 / total as f64).round() / 10.0
        };
        Self {
            visited,
            total,
            percent,
        }
    }
}

/// Visited share of one continent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContinentRatio {
    /// Continent name, or the fallback bucket name.
    pub name: String,
    /// Regions with at least one visit.
    pub visited: usize,
    /// Regions on the continent.
    pub total: usize,
    /// Percentage rounded to the nearest integer.
    pub percent: u32,
}

/// Regions counted once per code; with duplicate codes the one the lookup
/// index resolves to is used.
fn distinct_regions(dataset: &Dataset) -> impl Iterator<Item = &Region> {
    dataset.regions().into_iter().flat_map(|set| {
        set.iter()
            .enumerate()
            .filter(move |(i, r)| set.index_of(r.code.as_str()) == Some(*i))
            .map(|(_, r)| r)
    })
}

/// Share of all regions that have been visited.
#[must_use]
pub fn overall_ratio(dataset: &Dataset) -> Ratio {
    let (visited, total) = distinct_regions(dataset).fold((0, 0), |(v, t), region| {
        (v + usize::from(dataset.is_visited(region)), t + 1)
    });
    Ratio::new(visited, total)
}

/// Visited share per continent, highest percentage first, ties by name.
///
/// Regions with no continent entry are counted under `fallback`.
#[must_use]
pub fn continent_ratios(dataset: &Dataset, fallback: &str) -> Vec<ContinentRatio> {
    let mut groups: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
    for region in distinct_regions(dataset) {
        let name = dataset
            .continent_of(region.code.as_str())
            .unwrap_or(fallback);
        let entry = groups.entry(name).or_default();
        entry.0 += usize::from(dataset.is_visited(region));
        entry.1 += 1;
    }

    let mut ratios: Vec<_> = groups
        .into_iter()
        .map(|(name, (visited, total))| ContinentRatio {
            name: name.to_owned(),
            visited,
            total,
            percent: rounded_percent(visited, total),
        })
        .collect();
    ratios.sort_by(|a, b| b.percent.cmp(&a.percent).then_with(|| a.name.cmp(&b.name)));
    ratios
}
