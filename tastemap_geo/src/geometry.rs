// Copyright 2025 the Tastemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use kurbo::{BezPath, Rect};

use crate::projection::Projection;
use crate::shape::{LonLat, MultiPolygon, Ring};

/// Builds the screen-space outline of a shape.
///
/// Each ring becomes one closed subpath. A repeated closing vertex is dropped
/// since the subpath is closed explicitly; rings with fewer than three distinct
/// vertices are skipped.
#[must_use]
pub fn region_path(projection: &Projection, shape: &MultiPolygon) -> BezPath {
    let mut path = BezPath::new();
    for ring in shape.rings() {
        let vertices = open_ring(ring);
        if vertices.len() < 3 {
            continue;
        }
        let mut iter = vertices.iter();
        if let Some(first) = iter.next() {
            path.move_to(projection.project(*first));
        }
        for pos in iter {
            path.line_to(projection.project(*pos));
        }
        path.close_path();
    }
    path
}

/// Returns the screen-space bounding box of a shape, or `None` if it has no
/// vertices.
#[must_use]
pub fn projected_bounds(projection: &Projection, shape: &MultiPolygon) -> Option<Rect> {
    shape.positions().fold(None, |acc, pos| {
        let pt = projection.project(pos);
        Some(match acc {
            Some(r) => r.union_pt(pt),
            None => Rect::from_points(pt, pt),
        })
    })
}

fn open_ring(ring: &Ring) -> &[LonLat] {
    match (ring.first(), ring.last()) {
        (Some(first), Some(last)) if ring.len() > 1 && first == last => &ring[..ring.len() - 1],
        _ => ring,
    }
}

/// A fitted projection together with the screen geometry it produces.
///
/// Shapes are addressed by their position in the sequence passed to
/// [`MapGeometry::build`].
#[derive(Clone, Debug)]
pub struct MapGeometry {
    width: f64,
    height: f64,
    projection: Projection,
    paths: Vec<BezPath>,
    bounds: Vec<Option<Rect>>,
    map_bounds: Rect,
}

impl MapGeometry {
    /// Fits a projection to a `width` x `height` viewport (inset by `margin`)
    /// and projects every shape.
    ///
    /// Returns `None` if the shapes cannot be fitted; see
    /// [`Projection::fit_extent`].
    pub fn build<'a, I>(width: f64, height: f64, margin: f64, shapes: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a MultiPolygon>,
    {
        let shapes: Vec<&MultiPolygon> = shapes.into_iter().collect();
        let projection = Projection::fit_size(width, height, margin, shapes.iter().copied())?;

        let paths = shapes
            .iter()
            .map(|shape| region_path(&projection, shape))
            .collect();
        let bounds: Vec<Option<Rect>> = shapes
            .iter()
            .map(|shape| projected_bounds(&projection, shape))
            .collect();
        let map_bounds = bounds
            .iter()
            .flatten()
            .copied()
            .reduce(|a, b| a.union(b))?;

        Some(Self {
            width,
            height,
            projection,
            paths,
            bounds,
            map_bounds,
        })
    }

    /// Returns the viewport width this geometry was fitted to.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Returns the viewport height this geometry was fitted to.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Returns the fitted projection.
    #[must_use]
    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    /// Returns the screen path of the shape at `index`.
    #[must_use]
    pub fn path(&self, index: usize) -> Option<&BezPath> {
        self.paths.get(index)
    }

    /// Returns the screen bounding box of the shape at `index`.
    #[must_use]
    pub fn bounds(&self, index: usize) -> Option<Rect> {
        self.bounds.get(index).copied().flatten()
    }

    /// Returns the bounding box of every projected shape.
    #[must_use]
    pub fn map_bounds(&self) -> Rect {
        self.map_bounds
    }

    /// Returns the number of shapes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Returns `true` if no shapes were projected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use kurbo::{PathEl, Vec2};

    use super::{MapGeometry, projected_bounds, region_path};
    use crate::projection::Projection;
    use crate::shape::{LonLat, MultiPolygon, Polygon};

    fn square(lon: f64, lat: f64, size: f64) -> MultiPolygon {
        MultiPolygon::from(Polygon::new(vec![
            LonLat::new(lon, lat),
            LonLat::new(lon + size, lat),
            LonLat::new(lon + size, lat + size),
            LonLat::new(lon, lat + size),
            LonLat::new(lon, lat),
        ]))
    }

    #[test]
    fn path_closes_each_ring_once_and_drops_repeated_vertex() {
        let proj = Projection::new(100.0, Vec2::new(0.0, 0.0));
        let mut shape = square(0.0, 0.0, 10.0);
        shape.polygons.push(Polygon::new(vec![
            LonLat::new(20.0, 0.0),
            LonLat::new(25.0, 0.0),
            LonLat::new(25.0, 5.0),
        ]));

        let path = region_path(&proj, &shape);
        let elements: vec::Vec<PathEl> = path.elements().to_vec();
        let moves = elements.iter().filter(|el| matches!(el, PathEl::MoveTo(_))).count();
        let lines = elements.iter().filter(|el| matches!(el, PathEl::LineTo(_))).count();
        let closes = elements.iter().filter(|el| matches!(el, PathEl::ClosePath)).count();
        assert_eq!((moves, lines, closes), (2, 3 + 2, 2));
    }

    #[test]
    fn degenerate_rings_are_skipped() {
        let proj = Projection::new(100.0, Vec2::new(0.0, 0.0));
        let shape = MultiPolygon::from(Polygon::new(vec![
            LonLat::new(0.0, 0.0),
            LonLat::new(1.0, 0.0),
            LonLat::new(0.0, 0.0),
        ]));
        assert!(region_path(&proj, &shape).elements().is_empty());
    }

    #[test]
    fn bounds_cover_projected_vertices() {
        let proj = Projection::new(100.0, Vec2::new(400.0, 300.0));
        let shape = square(-10.0, -10.0, 20.0);
        let bounds = projected_bounds(&proj, &shape).unwrap();
        for pos in shape.positions() {
            let p = proj.project(pos);
            assert!(
                p.x >= bounds.x0 && p.x <= bounds.x1 && p.y >= bounds.y0 && p.y <= bounds.y1,
                "{p:?} outside {bounds:?}"
            );
        }
        assert!(projected_bounds(&proj, &MultiPolygon::default()).is_none());
    }

    #[test]
    fn build_indexes_shapes_in_input_order() {
        let a = square(-60.0, -20.0, 10.0);
        let b = square(40.0, 10.0, 10.0);
        let geometry = MapGeometry::build(800.0, 400.0, 10.0, [&a, &b]).unwrap();

        assert_eq!(geometry.len(), 2);
        let ba = geometry.bounds(0).unwrap();
        let bb = geometry.bounds(1).unwrap();
        assert!(ba.center().x < bb.center().x, "west shape should be left");
        assert!(ba.center().y > bb.center().y, "south shape should be lower");
        assert!(geometry.bounds(2).is_none());

        let all = geometry.map_bounds();
        assert!((all.x0 - 10.0).abs() < 1e-6 || (all.y0 - 10.0).abs() < 1e-6);
    }

    #[test]
    fn rebuilding_for_a_new_size_refits() {
        let a = square(-60.0, -20.0, 100.0);
        let small = MapGeometry::build(400.0, 300.0, 10.0, [&a]).unwrap();
        let large = MapGeometry::build(800.0, 600.0, 10.0, [&a]).unwrap();
        assert!(large.map_bounds().width() > small.map_bounds().width());
        assert_eq!((large.width(), large.height()), (800.0, 600.0));
    }
}
