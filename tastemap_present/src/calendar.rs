// Copyright 2025 the Tastemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt::Write as _;

use tastemap_data::VisitRecord;
use tastemap_stats::{Activity, MonthState};

use crate::markup::escape_html;
use crate::panel::{PanelKind, PanelView};

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// A populated month cell: the first visit of that month.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonthVisit {
    /// Country of the visit, used to select its region.
    pub country: String,
    /// Restaurant of the visit.
    pub restaurant: String,
    /// Visits that month.
    pub count: usize,
}

/// One cell of the calendar grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CalendarCell {
    /// Not reached yet.
    Future,
    /// No visit.
    Empty,
    /// At least one visit.
    Visited(MonthVisit),
}

/// The visit calendar: one row of twelve months per year.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CalendarPanel {
    /// `(year, cells)` rows, oldest first.
    pub rows: Vec<(i32, Vec<CalendarCell>)>,
    /// Share of elapsed months with a visit, whole percent.
    pub rate: u32,
    /// Elapsed months with a visit.
    pub active_months: usize,
    /// Elapsed months.
    pub elapsed_months: usize,
}

impl CalendarPanel {
    /// Resolves an [`Activity`] against the visit list it was computed from.
    #[must_use]
    pub fn new(activity: &Activity, visits: &[VisitRecord]) -> Self {
        let rows = activity
            .years
            .iter()
            .map(|row| {
                let cells = row
                    .months
                    .iter()
                    .map(|state| match *state {
                        MonthState::Future => CalendarCell::Future,
                        MonthState::Empty => CalendarCell::Empty,
                        MonthState::Visited { first, count } => match visits.get(first) {
                            Some(v) => CalendarCell::Visited(MonthVisit {
                                country: v.country.clone(),
                                restaurant: v.restaurant.clone(),
                                count,
                            }),
                            None => CalendarCell::Empty,
                        },
                    })
                    .collect();
                (row.year, cells)
            })
            .collect();
        Self {
            rows,
            rate: activity.rate,
            active_months: activity.active_months,
            elapsed_months: activity.elapsed_months,
        }
    }
}

impl PanelView for CalendarPanel {
    fn kind(&self) -> PanelKind {
        PanelKind::Calendar
    }

    fn title(&self) -> String {
        "Calendar".to_owned()
    }

    fn write_body(&self, out: &mut String) {
        if self.rows.is_empty() {
            out.push_str("<p class=\"calendar-empty\">No dated visits yet.</p>");
            return;
        }
        let _ = write!(
            out,
            "<p class=\"calendar-rate\">Active in {}% of months ({} of {})</p><table class=\"calendar\"><thead><tr><th></th>",
            self.rate, self.active_months, self.elapsed_months
        );
        for m in MONTHS {
            let _ = write!(out, "<th>{m}</th>");
        }
        out.push_str("</tr></thead><tbody>");

        for (year, cells) in &self.rows {
            let _ = write!(out, "<tr><th scope=\"row\">{year}</th>");
            for (cell, month) in cells.iter().zip(MONTHS) {
                match cell {
                    CalendarCell::Future => out.push_str("<td class=\"month future\"></td>"),
                    CalendarCell::Empty => out.push_str("<td class=\"month empty\"></td>"),
                    CalendarCell::Visited(v) => {
                        let extra = if v.count > 1 {
                            format!(" (+{} more)", v.count - 1)
                        } else {
                            String::new()
                        };
                        let _ = write!(
                            out,
                            "<td class=\"month visited\" role=\"button\" tabindex=\"0\" data-country=\"{}\" title=\"{month} {year}: {} in {}{extra}\"></td>",
                            escape_html(&v.country),
                            escape_html(&v.restaurant),
                            escape_html(&v.country),
                        );
                    }
                }
            }
            out.push_str("</tr>");
        }
        out.push_str("</tbody></table>");
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use tastemap_data::VisitRecord;
    use tastemap_stats::monthly_activity;

    use super::{CalendarCell, CalendarPanel};
    use crate::panel::render_panel;

    #[test]
    fn resolves_cells_and_renders_states() {
        let visits = [
            VisitRecord::new("Italy", "2024-02-10", "Da Mario"),
            VisitRecord::new("Japan", "2024-02-20", "Sushi <Dai>"),
        ];
        let today = NaiveDate::from_ymd_opt(2024, 4, 15).unwrap();
        let panel = CalendarPanel::new(&monthly_activity(&visits, today), &visits);

        assert_eq!(panel.rows.len(), 1);
        let (year, cells) = &panel.rows[0];
        assert_eq!(*year, 2024);
        assert_eq!(cells[0], CalendarCell::Empty);
        assert!(matches!(&cells[1], CalendarCell::Visited(v) if v.country == "Italy" && v.count == 2));
        assert_eq!(cells[4], CalendarCell::Future);

        let html = render_panel(&panel);
        assert_eq!(html.matches("month future").count(), 8);
        assert_eq!(html.matches("month visited").count(), 1);
        assert!(html.contains("data-country=\"Italy\""));
        assert!(html.contains("Feb 2024: Da Mario in Italy (+1 more)"));
        assert!(html.contains("Active in 25% of months (1 of 4)"));
    }

    #[test]
    fn no_dated_visits_render_a_message() {
        let today = NaiveDate::from_ymd_opt(2024, 4, 15).unwrap();
        let panel = CalendarPanel::new(&monthly_activity(&[], today), &[]);
        assert!(render_panel(&panel).contains("calendar-empty"));
    }
}
