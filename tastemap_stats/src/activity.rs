// Copyright 2025 the Tastemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use chrono::{Datelike, NaiveDate};
use tastemap_data::VisitRecord;

use crate::rounded_percent;

/// State of one month cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MonthState {
    /// After the current month; left out of the activity rate.
    Future,
    /// No visit that month.
    Empty,
    /// At least one visit that month.
    Visited {
        /// Index of the first visit of the month in the visit list.
        first: usize,
        /// Number of visits that month.
        count: usize,
    },
}

/// One year of month cells, January first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct YearRow {
    /// Calendar year.
    pub year: i32,
    /// Twelve cells, January to December.
    pub months: [MonthState; 12],
}

/// Visits per month from the first visited year through the current one.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Activity {
    /// One row per year, oldest first.
    pub years: Vec<YearRow>,
    /// Non-future months with at least one visit.
    pub active_months: usize,
    /// Non-future months in the calendar.
    pub elapsed_months: usize,
    /// `active_months / elapsed_months`, rounded to the nearest integer.
    pub rate: u32,
}

/// Parses a `YYYY-MM-DD` visit date.
#[must_use]
pub fn parse_visit_date(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").ok()
}

/// Builds the month calendar of `visits` as seen on `today`.
///
/// Visits without a date or with an unparsable one are skipped. Months after
/// `today`'s month are future months, including any in later years.
#[must_use]
pub fn monthly_activity(visits: &[VisitRecord], today: NaiveDate) -> Activity {
    let dated: Vec<(usize, NaiveDate)> = visits
        .iter()
        .enumerate()
        .filter_map(|(i, v)| Some((i, parse_visit_date(v.date.as_deref()?)?)))
        .collect();
    let (Some(first), Some(last)) = (
        dated.iter().map(|(_, d)| d.year()).min(),
        dated.iter().map(|(_, d)| d.year()).max(),
    ) else {
        return Activity::default();
    };
    let last = last.max(today.year());

    let current = (today.year(), today.month0() as usize);
    let mut years: Vec<YearRow> = (first..=last)
        .map(|year| YearRow {
            year,
            months: core::array::from_fn(|m| {
                if (year, m) > current {
                    MonthState::Future
                } else {
                    MonthState::Empty
                }
            }),
        })
        .collect();

    for (index, date) in dated {
        let row = &mut years[(date.year() - first) as usize];
        match &mut row.months[date.month0() as usize] {
            MonthState::Future => {}
            cell @ MonthState::Empty => {
                *cell = MonthState::Visited {
                    first: index,
                    count: 1,
                };
            }
            MonthState::Visited { count, .. } => *count += 1,
        }
    }

    let cells = || years.iter().flat_map(|row| row.months.iter());
    let elapsed_months = cells().filter(|m| **m != MonthState::Future).count();
    let active_months = cells()
        .filter(|m| matches!(m, MonthState::Visited { .. }))
        .count();

    Activity {
        rate: rounded_percent(active_months, elapsed_months),
        active_months,
        elapsed_months,
        years,
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use tastemap_data::VisitRecord;

    use super::{MonthState, monthly_activity, parse_visit_date};

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_iso_dates_only() {
        assert_eq!(parse_visit_date("2024-03-05"), Some(day(2024, 3, 5)));
        assert_eq!(parse_visit_date(" 2024-03-05 "), Some(day(2024, 3, 5)));
        assert_eq!(parse_visit_date("05/03/2024"), None);
        assert_eq!(parse_visit_date("2024-02-30"), None);
    }

    #[test]
    fn single_visit_rate_is_one_over_elapsed_months() {
        let visits = [VisitRecord::new("Italy", "2023-06-10", "a")];
        let activity = monthly_activity(&visits, day(2024, 3, 15));

        // 12 months of 2023 plus January to March 2024.
        assert_eq!(activity.elapsed_months, 15);
        assert_eq!(activity.active_months, 1);
        assert_eq!(activity.rate, 7);
        assert_eq!(activity.years.len(), 2);
        assert_eq!(
            activity.years[0].months[5],
            MonthState::Visited { first: 0, count: 1 }
        );
        assert_eq!(activity.years[1].months[2], MonthState::Empty);
        assert_eq!(activity.years[1].months[3], MonthState::Future);
    }

    #[test]
    fn keeps_first_visit_of_each_month() {
        let visits = [
            VisitRecord::new("Italy", "2024-01-20", "a"),
            VisitRecord::new("Japan", "2024-01-02", "b"),
            VisitRecord::new("Peru", "2024-02-01", "c"),
        ];
        let activity = monthly_activity(&visits, day(2024, 12, 31));
        assert_eq!(
            activity.years[0].months[0],
            MonthState::Visited { first: 0, count: 2 }
        );
        assert_eq!(activity.active_months, 2);
        assert_eq!(activity.elapsed_months, 12);
        assert_eq!(activity.rate, 17);
    }

    #[test]
    fn skips_undated_and_future_visits() {
        let mut undated = VisitRecord::new("Italy", "", "a");
        undated.date = None;
        let visits = [
            undated,
            VisitRecord::new("Japan", "sometime", "b"),
            VisitRecord::new("Peru", "2025-06-01", "c"),
        ];
        let activity = monthly_activity(&visits, day(2024, 6, 1));

        // The calendar reaches the future year but nothing there counts.
        assert_eq!(activity.years.len(), 1);
        assert_eq!(activity.years[0].year, 2025);
        assert!(activity.years[0].months.iter().all(|m| *m == MonthState::Future));
        assert_eq!(activity.elapsed_months, 0);
        assert_eq!(activity.rate, 0);
    }

    #[test]
    fn no_dated_visits_give_empty_calendar() {
        let activity = monthly_activity(&[], day(2024, 1, 1));
        assert!(activity.years.is_empty());
        assert_eq!(activity.rate, 0);
    }
}
