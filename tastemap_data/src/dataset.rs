// Copyright 2025 the Tastemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::fmt;

use tracing::{info, warn};

use crate::error::DataError;
use crate::lookup::{CodeTable, parse_code_table};
use crate::region::{DEFAULT_EXCLUDED, Region, RegionSet, parse_regions};
use crate::source::{DataSource, MissingSource};
use crate::visit::{VisitRecord, VisitedSet, parse_visits};

/// Which input a load failure concerns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// The visit list.
    Visits,
    /// The region collection.
    Regions,
    /// Code to continent table.
    Continents,
    /// Three-letter to two-letter code table.
    Alpha2,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Visits => "visits",
            Self::Regions => "regions",
            Self::Continents => "continents",
            Self::Alpha2 => "alpha2",
        })
    }
}

/// One source that could not be used.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadFailure {
    /// The source.
    pub kind: SourceKind,
    /// `true` if the source was absent, `false` if it was present but unparsable.
    pub missing: bool,
    /// Human-readable reason.
    pub reason: String,
}

/// What went wrong while loading, if anything.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Failed sources, in load order.
    pub failures: Vec<LoadFailure>,
}

impl LoadReport {
    /// Returns `true` if every source loaded.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Returns `true` if `kind` failed to load.
    #[must_use]
    pub fn failed(&self, kind: SourceKind) -> bool {
        self.failures.iter().any(|f| f.kind == kind)
    }

    fn record(&mut self, kind: SourceKind, err: &DataError) {
        let missing = err.is_missing();
        warn!(source = %kind, missing, error = %err, "data source unavailable, using empty default");
        self.failures.push(LoadFailure {
            kind,
            missing,
            reason: err.to_string(),
        });
    }
}

/// The four inputs of a load.
#[derive(Debug)]
pub struct Sources {
    /// Visit list (YAML).
    pub visits: Box<dyn DataSource>,
    /// Region collection (GeoJSON).
    pub regions: Box<dyn DataSource>,
    /// Code to continent table (JSON).
    pub continents: Box<dyn DataSource>,
    /// Code to two-letter code table (JSON).
    pub alpha2: Box<dyn DataSource>,
    /// Region codes to drop from the collection.
    pub excluded: Vec<String>,
}

impl Default for Sources {
    fn default() -> Self {
        Self {
            visits: Box::new(MissingSource("visits")),
            regions: Box::new(MissingSource("regions")),
            continents: Box::new(MissingSource("continents")),
            alpha2: Box::new(MissingSource("alpha2")),
            excluded: DEFAULT_EXCLUDED.iter().map(|c| (*c).to_owned()).collect(),
        }
    }
}

/// Everything the map needs, loaded once.
///
/// Every source is read before this is returned. A source that fails leaves
/// its part empty; the failure is listed in [`Dataset::report`].
#[derive(Clone, Debug, Default)]
pub struct Dataset {
    visits: Vec<VisitRecord>,
    visited: VisitedSet,
    regions: Option<RegionSet>,
    continents: CodeTable,
    alpha2: CodeTable,
    report: LoadReport,
}

impl Dataset {
    /// Reads and parses every source, failing soft per source.
    pub fn load(sources: &Sources) -> Self {
        let mut report = LoadReport::default();

        let visits = sources
            .visits
            .read_to_string()
            .and_then(|text| parse_visits(&text))
            .unwrap_or_else(|err| {
                report.record(SourceKind::Visits, &err);
                Vec::new()
            });
        let regions = sources
            .regions
            .read_to_string()
            .and_then(|text| parse_regions(&text, &sources.excluded))
            .map_err(|err| report.record(SourceKind::Regions, &err))
            .ok();
        let mut table = |source: &dyn DataSource, kind| {
            source
                .read_to_string()
                .and_then(|text| parse_code_table(&text))
                .unwrap_or_else(|err| {
                    report.record(kind, &err);
                    CodeTable::new()
                })
        };
        let continents = table(sources.continents.as_ref(), SourceKind::Continents);
        let alpha2 = table(sources.alpha2.as_ref(), SourceKind::Alpha2);

        let dataset = Self::from_parts(visits, regions, continents, alpha2).with_report(report);
        info!(
            visits = dataset.visits.len(),
            visited = dataset.visited.len(),
            regions = dataset.regions.as_ref().map_or(0, RegionSet::len),
            failures = dataset.report.failures.len(),
            "dataset loaded"
        );
        dataset
    }

    /// Assembles a dataset from already-parsed parts.
    ///
    /// `regions` is `None` when the region collection is unavailable.
    pub fn from_parts(
        visits: Vec<VisitRecord>,
        regions: Option<RegionSet>,
        continents: CodeTable,
        alpha2: CodeTable,
    ) -> Self {
        Self {
            visited: VisitedSet::from_visits(&visits),
            visits,
            regions,
            continents,
            alpha2,
            report: LoadReport::default(),
        }
    }

    fn with_report(mut self, report: LoadReport) -> Self {
        self.report = report;
        self
    }

    /// Returns the visits in file order.
    #[must_use]
    pub fn visits(&self) -> &[VisitRecord] {
        &self.visits
    }

    /// Returns the set of visited country names.
    #[must_use]
    pub fn visited(&self) -> &VisitedSet {
        &self.visited
    }

    /// Returns the regions, or `None` if the collection could not be loaded.
    #[must_use]
    pub fn regions(&self) -> Option<&RegionSet> {
        self.regions.as_ref()
    }

    /// Returns the code to continent table.
    #[must_use]
    pub fn continents(&self) -> &CodeTable {
        &self.continents
    }

    /// Returns the code to two-letter code table.
    #[must_use]
    pub fn alpha2(&self) -> &CodeTable {
        &self.alpha2
    }

    /// Returns the load report.
    #[must_use]
    pub fn report(&self) -> &LoadReport {
        &self.report
    }

    /// Returns `true` if at least one visit names `region`.
    #[must_use]
    pub fn is_visited(&self, region: &Region) -> bool {
        self.visited.contains(&region.name)
    }

    /// Returns the visits to `region` in file order.
    pub fn visits_for_region<'a>(
        &'a self,
        region: &'a Region,
    ) -> impl Iterator<Item = &'a VisitRecord> + 'a {
        let name = region.name.to_lowercase();
        self.visits
            .iter()
            .filter(move |v| v.country.to_lowercase() == name)
    }

    /// Returns the regions no visit names, in file order.
    pub fn unvisited_regions(&self) -> impl Iterator<Item = &Region> {
        self.regions
            .iter()
            .flatten()
            .filter(|r| !self.is_visited(r))
    }

    /// Returns the continent of the region with `code`.
    #[must_use]
    pub fn continent_of(&self, code: &str) -> Option<&str> {
        self.continents.get(code)
    }

    /// Returns the two-letter code of the region with `code`.
    #[must_use]
    pub fn flag_code(&self, code: &str) -> Option<&str> {
        self.alpha2.get(code)
    }

    /// Returns the region whose display name matches `country`.
    #[must_use]
    pub fn region_for_country(&self, country: &str) -> Option<&Region> {
        self.regions.as_ref()?.by_name(country)
    }
}

#[cfg(test)]
mod tests {
    use super::{Dataset, SourceKind, Sources};
    use crate::source::{MissingSource, TextSource};

    const REGIONS: &str = r#"{"type": "FeatureCollection", "features": [
      {"id": "ITA", "properties": {"name": "Italy"},
       "geometry": {"type": "Polygon", "coordinates": [[[6,36],[18,36],[18,47],[6,36]]]}},
      {"id": "JPN", "properties": {"name": "Japan"},
       "geometry": {"type": "Polygon", "coordinates": [[[130,31],[141,31],[141,41],[130,31]]]}},
      {"id": "PER", "properties": {"name": "Peru"},
       "geometry": {"type": "Polygon", "coordinates": [[[-81,-18],[-69,-18],[-69,0],[-81,-18]]]}}
    ]}"#;

    const VISITS: &str = r#"
- {country: Italy, date: 2024-03-05, restaurant: Da Mario}
- {country: japan, date: 2023-11-20, restaurant: Sushi Dai}
- {country: ITALY, date: 2024-04-01, restaurant: Roscioli}
- {country: Atlantis, date: 2020-01-01, restaurant: Nowhere}
"#;

    fn sources() -> Sources {
        Sources {
            visits: Box::new(TextSource::new(VISITS)),
            regions: Box::new(TextSource::new(REGIONS)),
            continents: Box::new(TextSource::new(r#"{"ITA": "Europe", "JPN": "Asia"}"#)),
            alpha2: Box::new(TextSource::new(r#"{"ITA": "IT", "JPN": "JP"}"#)),
            ..Sources::default()
        }
    }

    #[test]
    fn loads_every_source() {
        let data = Dataset::load(&sources());
        assert!(data.report().is_complete());
        assert_eq!(data.visits().len(), 4);
        assert_eq!(data.regions().unwrap().len(), 3);
        assert_eq!(data.continent_of("ita"), Some("Europe"));
        assert_eq!(data.flag_code("JPN"), Some("JP"));
    }

    #[test]
    fn matches_visits_to_regions_case_insensitively() {
        let data = Dataset::load(&sources());
        let italy = data.region_for_country("italy").unwrap();
        let restaurants: Vec<_> = data
            .visits_for_region(italy)
            .map(|v| v.restaurant.as_str())
            .collect();
        assert_eq!(restaurants, ["Da Mario", "Roscioli"]);

        let unvisited: Vec<_> = data.unvisited_regions().map(|r| r.code.as_str()).collect();
        assert_eq!(unvisited, ["PER"]);
        assert!(data.region_for_country("Atlantis").is_none());
    }

    #[test]
    fn failed_sources_default_to_empty() {
        let data = Dataset::load(&Sources {
            visits: Box::new(TextSource::new("- [broken")),
            alpha2: Box::new(MissingSource("alpha2")),
            ..sources()
        });

        assert!(data.visits().is_empty());
        assert!(data.visited().is_empty());
        assert_eq!(data.regions().unwrap().len(), 3);
        assert_eq!(data.flag_code("ITA"), None);

        let report = data.report();
        assert!(report.failed(SourceKind::Visits));
        assert!(report.failed(SourceKind::Alpha2));
        assert!(!report.failed(SourceKind::Regions));
        assert!(!report.failures[0].missing);
        assert!(report.failures[1].missing);
    }

    #[test]
    fn missing_regions_leave_no_collection() {
        let data = Dataset::load(&Sources::default());
        assert!(data.regions().is_none());
        assert_eq!(data.report().failures.len(), 4);
        assert_eq!(data.unvisited_regions().count(), 0);
    }
}
