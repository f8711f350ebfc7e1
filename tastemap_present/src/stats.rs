// Copyright 2025 the Tastemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt::Write as _;

use tastemap_stats::Summary;

use crate::markup::escape_html;
use crate::panel::{PanelKind, PanelView};

/// The statistics panel: coverage, continent bars and the most-visited list.
///
/// Entries of the most-visited list carry `data-country`; hosts turn a click
/// on one into a selection of that country.
#[derive(Clone, Debug, PartialEq)]
pub struct StatsPanel {
    summary: Summary,
}

impl StatsPanel {
    /// Wraps a freshly computed summary.
    #[must_use]
    pub fn new(summary: Summary) -> Self {
        Self { summary }
    }

    /// Returns the summary shown.
    #[must_use]
    pub fn summary(&self) -> &Summary {
        &self.summary
    }
}

impl PanelView for StatsPanel {
    fn kind(&self) -> PanelKind {
        PanelKind::Stats
    }

    fn title(&self) -> String {
        "Statistics".to_owned()
    }

    fn write_body(&self, out: &mut String) {
        let s = &self.summary;
        let _ = write!(
            out,
            "<p class=\"stats-header\">{} visits at {} restaurants</p>\
             <div class=\"stats-overall\"><span class=\"stats-percent\">{:.1}%</span> \
             <span class=\"stats-ratio\">{} of {} countries</span></div>",
            s.visit_count, s.restaurant_count, s.overall.percent, s.overall.visited, s.overall.total,
        );

        if !s.continents.is_empty() {
            out.push_str("<h3>By continent</h3><ul class=\"continents\">");
            for c in &s.continents {
                let _ = write!(
                    out,
                    "<li class=\"continent\"><span class=\"continent-name\">{}</span>\
                     <span class=\"bar\"><span class=\"bar-fill\" style=\"width:{}%\"></span></span>\
                     <span class=\"continent-value\">{}/{} ({}%)</span></li>",
                    escape_html(&c.name),
                    c.percent,
                    c.visited,
                    c.total,
                    c.percent,
                );
            }
            out.push_str("</ul>");
        }

        out.push_str("<h3>Most visited</h3>");
        if s.ranking.is_empty() {
            out.push_str("<p class=\"ranking-empty\">No visits yet.</p>");
            return;
        }
        out.push_str("<ol class=\"ranking\">");
        for entry in &s.ranking {
            let name = escape_html(&entry.name);
            let _ = write!(
                out,
                "<li class=\"ranking-entry\" role=\"button\" tabindex=\"0\" data-country=\"{name}\">\
                 <span class=\"ranking-name\">{name}</span>\
                 <span class=\"ranking-count\">{}</span></li>",
                entry.count
            );
        }
        out.push_str("</ol>");
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use tastemap_data::{CodeTable, Dataset, Region, VisitRecord};
    use tastemap_geo::MultiPolygon;
    use tastemap_stats::Summary;

    use super::StatsPanel;
    use crate::panel::render_panel;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 12, 1).unwrap()
    }

    fn regions() -> Option<tastemap_data::RegionSet> {
        Some(
            [
                Region::new("ITA", "Italy", MultiPolygon::default()),
                Region::new("JPN", "Japan", MultiPolygon::default()),
                Region::new("PER", "Peru", MultiPolygon::default()),
                Region::new("FRA", "France", MultiPolygon::default()),
            ]
            .into_iter()
            .collect(),
        )
    }

    #[test]
    fn renders_coverage_bars_and_ranking() {
        let data = Dataset::from_parts(
            vec![
                VisitRecord::new("Italy", "2024-03-05", "a"),
                VisitRecord::new("Japan", "2024-04-01", "b"),
                VisitRecord::new("Italy", "2024-05-01", "c"),
            ],
            regions(),
            [("ITA", "Europe"), ("FRA", "Europe"), ("JPN", "Asia")]
                .into_iter()
                .collect(),
            CodeTable::new(),
        );
        let html = render_panel(&StatsPanel::new(Summary::compute(&data, today())));

        assert!(html.contains("3 visits at 3 restaurants"));
        assert!(html.contains("<span class=\"stats-percent\">50.0%</span>"));
        assert!(html.contains("2 of 4 countries"));
        assert!(html.contains("style=\"width:100%\""));
        let italy = html.find("data-country=\"Italy\"").unwrap();
        let japan = html.find("data-country=\"Japan\"").unwrap();
        assert!(italy < japan, "Italy has more visits");
    }

    #[test]
    fn empty_dataset_shows_zero_and_no_ranking() {
        let data = Dataset::from_parts(Vec::new(), regions(), CodeTable::new(), CodeTable::new());
        let html = render_panel(&StatsPanel::new(Summary::compute(&data, today())));
        assert!(html.contains("0.0%"));
        assert!(html.contains("0 of 4 countries"));
        assert!(html.contains("ranking-empty"));
        assert!(!html.contains("ranking-entry"));
    }
}
