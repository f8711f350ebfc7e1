// Copyright 2025 the Tastemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::collections::HashSet;

use serde::Deserialize;
use serde_yaml::Value;
use tracing::warn;

use crate::error::{DataError, Result};

/// One logged restaurant visit.
#[derive(Clone, Debug, PartialEq)]
pub struct VisitRecord {
    /// Country name as written in the visit list.
    pub country: String,
    /// Visit date, expected as `YYYY-MM-DD`. Kept as written.
    pub date: Option<String>,
    /// Restaurant name.
    pub restaurant: String,
    /// Rating in `0..=5`.
    pub rating: Option<f64>,
    /// Free-text notes.
    pub notes: Option<String>,
    /// Link to the restaurant on a map service.
    pub maps_url: Option<String>,
}

impl VisitRecord {
    /// Creates a record with only the required fields set.
    pub fn new(country: impl Into<String>, date: impl Into<String>, restaurant: impl Into<String>) -> Self {
        Self {
            country: country.into(),
            date: Some(date.into()),
            restaurant: restaurant.into(),
            rating: None,
            notes: None,
            maps_url: None,
        }
    }

    /// Returns the lowercase country name used for matching and grouping.
    #[must_use]
    pub fn country_key(&self) -> String {
        self.country.to_lowercase()
    }
}

/// The loosely-typed shape of one entry; every field is checked by hand.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawVisit {
    country: Option<Value>,
    date: Option<Value>,
    restaurant: Option<Value>,
    rating: Option<Value>,
    notes: Option<Value>,
    maps_url: Option<Value>,
}

/// Parses a YAML visit list.
///
/// Accepts either a top-level sequence or a mapping with a `visits` sequence;
/// an empty document is an empty list. Entries that lack a country or a
/// restaurant are skipped with a warning, so one bad entry does not hide the
/// rest of the list.
pub fn parse_visits(text: &str) -> Result<Vec<VisitRecord>> {
    let doc: Value = serde_yaml::from_str(text)?;
    let items = match doc {
        Value::Null => return Ok(Vec::new()),
        Value::Sequence(items) => items,
        Value::Mapping(mut map) => match map.remove("visits") {
            Some(Value::Sequence(items)) => items,
            Some(Value::Null) => return Ok(Vec::new()),
            _ => {
                return Err(DataError::Shape(
                    "expected a `visits` list at the top level".to_owned(),
                ));
            }
        },
        _ => return Err(DataError::Shape("expected a list of visits".to_owned())),
    };

    let mut visits = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        match record_from_value(item) {
            Ok(record) => visits.push(record),
            Err(reason) => warn!(index, %reason, "skipping visit entry"),
        }
    }
    Ok(visits)
}

fn record_from_value(value: Value) -> Result<VisitRecord, String> {
    let raw: RawVisit = serde_yaml::from_value(value).map_err(|e| e.to_string())?;

    let country = required_text(raw.country.as_ref(), "country")?;
    let restaurant = required_text(raw.restaurant.as_ref(), "restaurant")?;
    let date = raw.date.as_ref().and_then(scalar_text);
    let rating = raw.rating.as_ref().and_then(|v| match rating_value(v) {
        Some(r) => Some(r),
        None => {
            warn!(%country, %restaurant, "ignoring rating outside 0-5");
            None
        }
    });

    Ok(VisitRecord {
        country,
        date,
        restaurant,
        rating,
        notes: raw.notes.as_ref().and_then(scalar_text),
        maps_url: raw.maps_url.as_ref().and_then(scalar_text),
    })
}

fn required_text(value: Option<&Value>, field: &str) -> Result<String, String> {
    value
        .and_then(scalar_text)
        .ok_or_else(|| format!("missing `{field}`"))
}

/// Renders a scalar as trimmed text; empty strings and non-scalars are `None`.
fn scalar_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_owned(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

fn rating_value(value: &Value) -> Option<f64> {
    let rating = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse().ok()?,
        _ => return None,
    };
    (rating.is_finite() && (0.0..=5.0).contains(&rating)).then_some(rating)
}

/// Lowercase country names that appear in at least one visit.
///
/// Built in one pass from the whole visit list; never updated incrementally.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VisitedSet {
    names: HashSet<String>,
}

impl VisitedSet {
    /// Collects the visited set from a visit list.
    pub fn from_visits<'a>(visits: impl IntoIterator<Item = &'a VisitRecord>) -> Self {
        Self {
            names: visits.into_iter().map(VisitRecord::country_key).collect(),
        }
    }

    /// Case-insensitive, exact match on the whole name.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(&name.to_lowercase())
    }

    /// Returns the number of distinct names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` if nothing was visited.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterates over the lowercase names in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}
