// Copyright 2025 the Tastemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt::Write as _;

use tastemap_data::{Dataset, Region, VisitRecord};

use crate::markup::{escape_html, flag_emoji, format_rating, format_visit_date, safe_link};
use crate::panel::{PanelKind, PanelView};

/// One restaurant card.
#[derive(Clone, Debug, PartialEq)]
pub struct TripCard {
    /// Restaurant name.
    pub restaurant: String,
    /// Display date, absent when the visit has no date.
    pub date: Option<String>,
    /// Rating out of 5.
    pub rating: Option<f64>,
    /// Link to the restaurant, kept only for web URLs.
    pub link: Option<String>,
    /// Free-text note.
    pub note: Option<String>,
}

impl TripCard {
    /// Builds a card from a visit.
    #[must_use]
    pub fn from_visit(visit: &VisitRecord) -> Self {
        Self {
            restaurant: visit.restaurant.clone(),
            date: visit.date.as_deref().map(format_visit_date),
            rating: visit.rating,
            link: visit.maps_url.as_deref().and_then(safe_link).map(str::to_owned),
            note: visit.notes.clone(),
        }
    }

    fn write(&self, out: &mut String) {
        let _ = write!(
            out,
            "<article class=\"trip\"><h3 class=\"trip-name\">{}</h3>",
            escape_html(&self.restaurant)
        );
        if let Some(date) = &self.date {
            let _ = write!(out, "<p class=\"trip-date\">{}</p>", escape_html(date));
        }
        if let Some(rating) = self.rating {
            let rating = format_rating(rating);
            let _ = write!(
                out,
                "<p class=\"trip-rating\" aria-label=\"Rated {rating} out of 5\">\u{2605} {rating}/5</p>"
            );
        }
        if let Some(link) = &self.link {
            let _ = write!(
                out,
                "<a class=\"trip-link\" href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">Open in Maps</a>",
                escape_html(link)
            );
        }
        if let Some(note) = &self.note {
            let _ = write!(
                out,
                "<blockquote class=\"trip-note\">\u{201c}{}\u{201d}</blockquote>",
                escape_html(note)
            );
        }
        out.push_str("</article>");
    }
}

/// The panel listing trips to one region.
#[derive(Clone, Debug, PartialEq)]
pub struct DetailPanel {
    /// Region display name.
    pub name: String,
    /// Flag emoji, empty when unknown.
    pub flag: String,
    /// Cards in visit-list order; empty for an undiscovered region.
    pub trips: Vec<TripCard>,
}

impl DetailPanel {
    /// Builds the panel for `region`.
    #[must_use]
    pub fn for_region(dataset: &Dataset, region: &Region) -> Self {
        Self {
            name: region.name.clone(),
            flag: dataset
                .flag_code(region.code.as_str())
                .map(flag_emoji)
                .unwrap_or_default(),
            trips: dataset
                .visits_for_region(region)
                .map(TripCard::from_visit)
                .collect(),
        }
    }
}

impl PanelView for DetailPanel {
    fn kind(&self) -> PanelKind {
        PanelKind::Detail
    }

    fn title(&self) -> String {
        if self.flag.is_empty() {
            self.name.clone()
        } else {
            format!("{} {}", self.flag, self.name)
        }
    }

    fn write_body(&self, out: &mut String) {
        if self.trips.is_empty() {
            out.push_str(
                "<p class=\"trips-empty\">No visits here yet. Somewhere new to discover!</p>",
            );
            return;
        }
        let _ = write!(
            out,
            "<p class=\"trips-count\">{} {}</p><div class=\"trips\">",
            self.trips.len(),
            if self.trips.len() == 1 { "visit" } else { "visits" }
        );
        for trip in &self.trips {
            trip.write(out);
        }
        out.push_str("</div>");
    }
}

#[cfg(test)]
mod tests {
    use tastemap_data::{CodeTable, Dataset, Region, VisitRecord};
    use tastemap_geo::MultiPolygon;

    use super::DetailPanel;
    use crate::panel::{PanelView, render_panel};

    fn dataset(visits: Vec<VisitRecord>) -> Dataset {
        Dataset::from_parts(
            visits,
            Some(
                [
                    Region::new("ITA", "Italy", MultiPolygon::default()),
                    Region::new("PER", "Peru", MultiPolygon::default()),
                ]
                .into_iter()
                .collect(),
            ),
            CodeTable::new(),
            [("ITA", "IT")].into_iter().collect(),
        )
    }

    #[test]
    fn lists_trips_with_optional_lines() {
        let mut full = VisitRecord::new("Italy", "2024-03-05", "Tom & Jerry's");
        full.rating = Some(4.5);
        full.maps_url = Some("https://maps.example/?a=1&b=2".to_owned());
        full.notes = Some("<great>".to_owned());
        let mut bare = VisitRecord::new("italy", "", "Bar");
        bare.date = None;
        let data = dataset(vec![full, bare, VisitRecord::new("Peru", "2022-01-01", "Central")]);

        let italy = data.region_for_country("Italy").unwrap();
        let panel = DetailPanel::for_region(&data, italy);
        assert_eq!(panel.trips.len(), 2);
        assert_eq!(panel.title(), "\u{1F1EE}\u{1F1F9} Italy");

        let html = render_panel(&panel);
        assert!(html.contains("Tom &amp; Jerry&#39;s"));
        assert!(html.contains("<p class=\"trip-date\">Mar 5, 2024</p>"));
        assert_eq!(html.matches("trip-date").count(), 1);
        assert!(html.contains("4.5/5"));
        assert!(html.contains("href=\"https://maps.example/?a=1&amp;b=2\""));
        assert!(html.contains("&lt;great&gt;"));
        assert!(html.contains("2 visits"));
    }

    #[test]
    fn unvisited_region_shows_empty_message_and_no_flag() {
        let data = dataset(Vec::new());
        let peru = data.region_for_country("Peru").unwrap();
        let panel = DetailPanel::for_region(&data, peru);
        assert!(panel.trips.is_empty());
        assert_eq!(panel.title(), "Peru");
        assert!(render_panel(&panel).contains("trips-empty"));
    }

    #[test]
    fn unsafe_links_are_dropped() {
        let mut visit = VisitRecord::new("Italy", "2024-03-05", "X");
        visit.maps_url = Some("javascript:alert(1)".to_owned());
        let data = dataset(vec![visit]);
        let panel = DetailPanel::for_region(&data, data.region_for_country("Italy").unwrap());
        assert_eq!(panel.trips[0].link, None);
    }
}
