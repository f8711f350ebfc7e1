// Copyright 2025 the Tastemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

/// A geographic position in degrees.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct LonLat {
    /// Longitude in degrees, east positive.
    pub lon: f64,
    /// Latitude in degrees, north positive.
    pub lat: f64,
}

impl LonLat {
    /// Creates a position from longitude and latitude in degrees.
    #[must_use]
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

/// A closed ring of positions.
///
/// Rings read from GeoJSON repeat their first vertex at the end; both forms are
/// accepted everywhere in this crate.
pub type Ring = Vec<LonLat>;

/// A polygon: one exterior ring followed by zero or more holes.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Polygon {
    /// The outer boundary.
    pub exterior: Ring,
    /// Interior rings cut out of the exterior.
    pub holes: Vec<Ring>,
}

impl Polygon {
    /// Creates a polygon with no holes.
    #[must_use]
    pub fn new(exterior: Ring) -> Self {
        Self {
            exterior,
            holes: Vec::new(),
        }
    }

    /// Creates a polygon with holes.
    #[must_use]
    pub fn with_holes(exterior: Ring, holes: Vec<Ring>) -> Self {
        Self { exterior, holes }
    }

    /// Iterates over the exterior ring and then every hole.
    pub fn rings(&self) -> impl Iterator<Item = &Ring> {
        core::iter::once(&self.exterior).chain(self.holes.iter())
    }
}

/// The boundary of one region: any number of polygons.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct MultiPolygon {
    /// The member polygons, in source order.
    pub polygons: Vec<Polygon>,
}

impl MultiPolygon {
    /// Creates a multipolygon from its member polygons.
    #[must_use]
    pub fn new(polygons: Vec<Polygon>) -> Self {
        Self { polygons }
    }

    /// Returns `true` if there is no vertex to draw.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions().next().is_none()
    }

    /// Iterates over every ring of every polygon.
    pub fn rings(&self) -> impl Iterator<Item = &Ring> {
        self.polygons.iter().flat_map(Polygon::rings)
    }

    /// Iterates over every vertex of every ring.
    pub fn positions(&self) -> impl Iterator<Item = LonLat> + '_ {
        self.rings().flat_map(|ring| ring.iter().copied())
    }
}

impl From<Polygon> for MultiPolygon {
    fn from(polygon: Polygon) -> Self {
        Self {
            polygons: alloc::vec![polygon],
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::{LonLat, MultiPolygon, Polygon};

    #[test]
    fn rings_visit_exterior_before_holes() {
        let outer = vec![LonLat::new(0.0, 0.0), LonLat::new(4.0, 0.0), LonLat::new(4.0, 4.0)];
        let hole = vec![LonLat::new(1.0, 1.0), LonLat::new(2.0, 1.0), LonLat::new(2.0, 2.0)];
        let poly = Polygon::with_holes(outer.clone(), vec![hole.clone()]);

        let rings: vec::Vec<_> = poly.rings().collect();
        assert_eq!(rings, [&outer, &hole]);
    }

    #[test]
    fn empty_multipolygon_has_no_positions() {
        assert!(MultiPolygon::default().is_empty());
        assert!(MultiPolygon::from(Polygon::new(vec![])).is_empty());
        assert!(!MultiPolygon::from(Polygon::new(vec![LonLat::new(1.0, 2.0)])).is_empty());
    }
}
