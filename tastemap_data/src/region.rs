// Copyright 2025 the Tastemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::collections::HashMap;
use std::fmt;

use serde::Deserialize;
use serde_json::{Map, Value};
use tastemap_geo::{LonLat, MultiPolygon, Polygon, Ring};
use tracing::{debug, warn};

use crate::error::{DataError, Result};

/// Codes of territories too small to show or click at world scale.
///
/// Matched by code only; there is no geometric test.
pub const DEFAULT_EXCLUDED: &[&str] = &[
    "ATA", "ATF", "HMD", "SGS", "BVT", "IOT", "UMI", "CCK", "CXR", "NFK", "PCN", "TKL", "NIU",
    "WLF", "SHN", "SPM", "MAF", "BLM", "VAT", "MCO", "SMR", "LIE", "AND", "MLT", "NRU", "TUV",
];

/// A three-letter region code, stored uppercase.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegionCode(String);

impl RegionCode {
    /// Creates a code, normalizing it to uppercase.
    pub fn new(code: &str) -> Self {
        Self(code.trim().to_uppercase())
    }

    /// Returns the code text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RegionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RegionCode {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

/// One country or territory on the map.
#[derive(Clone, Debug, PartialEq)]
pub struct Region {
    /// Three-letter code.
    pub code: RegionCode,
    /// Display name; matched case-insensitively against visit countries.
    pub name: String,
    /// Boundary in longitude/latitude.
    pub boundary: MultiPolygon,
}

impl Region {
    /// Creates a region.
    pub fn new(code: impl Into<RegionCode>, name: impl Into<String>, boundary: MultiPolygon) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            boundary,
        }
    }
}

/// The loaded regions in file order, indexed by code and by name.
#[derive(Clone, Debug, Default)]
pub struct RegionSet {
    regions: Vec<Region>,
    by_code: HashMap<RegionCode, usize>,
    by_name: HashMap<String, usize>,
}

impl RegionSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a region. A repeated code or name points the index at the
    /// newer region; the older one stays in iteration order.
    pub fn push(&mut self, region: Region) {
        let index = self.regions.len();
        if self.by_code.insert(region.code.clone(), index).is_some() {
            debug!(code = %region.code, "duplicate region code, later entry wins");
        }
        self.by_name.insert(region.name.to_lowercase(), index);
        self.regions.push(region);
    }

    /// Looks a region up by code (any case).
    #[must_use]
    pub fn get(&self, code: &str) -> Option<&Region> {
        self.index_of(code).map(|i| &self.regions[i])
    }

    /// Returns the position of the region with `code`.
    #[must_use]
    pub fn index_of(&self, code: &str) -> Option<usize> {
        self.by_code.get(&RegionCode::new(code)).copied()
    }

    /// Looks a region up by display name, case-insensitively.
    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<&Region> {
        self.index_of_name(name).map(|i| &self.regions[i])
    }

    /// Returns the position of the region named `name` (any case).
    #[must_use]
    pub fn index_of_name(&self, name: &str) -> Option<usize> {
        self.by_name.get(&name.to_lowercase()).copied()
    }

    /// Returns the region at `index`.
    #[must_use]
    pub fn at(&self, index: usize) -> Option<&Region> {
        self.regions.get(index)
    }

    /// Iterates in file order.
    pub fn iter(&self) -> std::slice::Iter<'_, Region> {
        self.regions.iter()
    }

    /// Returns the number of regions, duplicates included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Returns `true` if there are no regions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

impl FromIterator<Region> for RegionSet {
    fn from_iter<T: IntoIterator<Item = Region>>(iter: T) -> Self {
        let mut set = Self::new();
        for region in iter {
            set.push(region);
        }
        set
    }
}

impl<'a> IntoIterator for &'a RegionSet {
    type Item = &'a Region;
    type IntoIter = std::slice::Iter<'a, Region>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    properties: Option<Map<String, Value>>,
    #[serde(default)]
    geometry: Option<Geometry>,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    coordinates: Value,
}

/// Parses a GeoJSON `FeatureCollection` of country shapes.
///
/// Features whose code appears in `excluded` are dropped. Features without a
/// code, a name or a polygonal geometry are skipped with a warning.
pub fn parse_regions(text: &str, excluded: &[String]) -> Result<RegionSet> {
    let collection: FeatureCollection = serde_json::from_str(text)?;
    if collection.kind != "FeatureCollection" {
        return Err(DataError::Shape(format!(
            "expected a FeatureCollection, found {}",
            collection.kind
        )));
    }

    let excluded: Vec<RegionCode> = excluded.iter().map(|c| RegionCode::new(c)).collect();
    let mut set = RegionSet::new();
    for (index, feature) in collection.features.into_iter().enumerate() {
        match region_from_feature(feature) {
            Ok(region) if excluded.contains(&region.code) => {
                debug!(code = %region.code, "excluding small territory");
            }
            Ok(region) => set.push(region),
            Err(reason) => warn!(index, %reason, "skipping region feature"),
        }
    }
    Ok(set)
}

fn region_from_feature(feature: Feature) -> Result<Region, String> {
    let properties = feature.properties.unwrap_or_default();
    let code = feature
        .id
        .as_ref()
        .and_then(code_text)
        .or_else(|| property_text(&properties, &["iso_a3", "ISO_A3"]))
        .ok_or("missing code")?;
    let name = property_text(&properties, &["name", "ADMIN", "NAME"]).ok_or("missing name")?;
    let geometry = feature.geometry.ok_or("missing geometry")?;

    let boundary = match geometry.kind.as_str() {
        "Polygon" => MultiPolygon::from(polygon(&geometry.coordinates)?),
        "MultiPolygon" => {
            let parts = geometry
                .coordinates
                .as_array()
                .ok_or("MultiPolygon coordinates are not an array")?;
            MultiPolygon::new(parts.iter().map(polygon).collect::<Result<_, _>>()?)
        }
        other => return Err(format!("unsupported geometry type {other}")),
    };
    if boundary.is_empty() {
        return Err("empty geometry".to_owned());
    }

    Ok(Region::new(RegionCode::new(&code), name, boundary))
}

fn code_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() && s != "-99" => Some(s.clone()),
        _ => None,
    }
}

fn property_text(properties: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| properties.get(*key))
        .find_map(code_text)
}

fn polygon(value: &Value) -> Result<Polygon, String> {
    let mut rings = value
        .as_array()
        .ok_or("polygon is not an array of rings")?
        .iter()
        .map(ring);
    let exterior = rings.next().ok_or("polygon has no rings")??;
    let holes = rings.collect::<Result<Vec<_>, _>>()?;
    Ok(Polygon::with_holes(exterior, holes))
}

fn ring(value: &Value) -> Result<Ring, String> {
    value
        .as_array()
        .ok_or("ring is not an array of positions")?
        .iter()
        .map(|pos| -> Result<LonLat, String> {
            let pos = pos.as_array().ok_or("position is not an array")?;
            match (pos.first().and_then(Value::as_f64), pos.get(1).and_then(Value::as_f64)) {
                (Some(lon), Some(lat)) => Ok(LonLat::new(lon, lat)),
                _ => Err("position needs two numbers".to_owned()),
            }
        })
        .collect()
}
