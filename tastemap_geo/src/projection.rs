// Copyright 2025 the Tastemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _; // for `abs`
use kurbo::{Point, Rect, Vec2};

use crate::shape::{LonLat, MultiPolygon};

const INVERT_EPSILON: f64 = 1e-9;
const INVERT_ITERATIONS: usize = 25;

/// Natural Earth I forward projection.
///
/// Takes longitude/latitude in radians and returns unit-scale plane
/// coordinates with `y` pointing north.
#[must_use]
pub fn natural_earth(lambda: f64, phi: f64) -> (f64, f64) {
    let phi2 = phi * phi;
    let phi4 = phi2 * phi2;
    let x = lambda
        * (0.8707 - 0.131_979 * phi2
            + phi4 * (-0.013_791 + phi4 * (0.003_971 * phi2 - 0.001_529 * phi4)));
    let y = phi
        * (1.007_226
            + phi2 * (0.015_085 + phi4 * (-0.044_475 + 0.028_874 * phi2 - 0.005_916 * phi4)));
    (x, y)
}

/// Natural Earth I inverse projection.
///
/// Solves for latitude with Newton iteration, then recovers longitude. Both
/// results are in radians.
#[must_use]
pub fn natural_earth_invert(x: f64, y: f64) -> (f64, f64) {
    let mut phi = y;
    for _ in 0..INVERT_ITERATIONS {
        let phi2 = phi * phi;
        let phi4 = phi2 * phi2;
        let delta = (phi
            * (1.007_226
                + phi2 * (0.015_085 + phi4 * (-0.044_475 + 0.028_874 * phi2 - 0.005_916 * phi4)))
            - y)
            / (1.007_226
                + phi2
                    * (0.015_085 * 3.0
                        + phi4
                            * (-0.044_475 * 7.0 + 0.028_874 * 9.0 * phi2
                                - 0.005_916 * 11.0 * phi4)));
        phi -= delta;
        if delta.abs() <= INVERT_EPSILON {
            break;
        }
    }
    let phi2 = phi * phi;
    let lambda = x
        / (0.8707
            + phi2
                * (-0.131_979
                    + phi2 * (-0.013_791 + phi2 * phi2 * phi2 * (0.003_971 - 0.001_529 * phi2))));
    (lambda, phi)
}

/// A fitted Natural Earth projection: `screen = translate + scale * raw`, with
/// `y` flipped so north is up on screen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    scale: f64,
    translate: Vec2,
}

impl Projection {
    /// Creates a projection from an explicit scale and translation.
    #[must_use]
    pub const fn new(scale: f64, translate: Vec2) -> Self {
        Self { scale, translate }
    }

    /// Returns the uniform scale applied to raw projected coordinates.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Returns the screen-space position of raw `(0, 0)`.
    #[must_use]
    pub fn translate(&self) -> Vec2 {
        self.translate
    }

    /// Projects a geographic position to screen coordinates.
    #[must_use]
    pub fn project(&self, pos: LonLat) -> Point {
        let (x, y) = natural_earth(pos.lon.to_radians(), pos.lat.to_radians());
        Point::new(
            self.translate.x + self.scale * x,
            self.translate.y - self.scale * y,
        )
    }

    /// Maps a screen position back to geography.
    ///
    /// Returns `None` for points that fall outside the projected globe.
    #[must_use]
    pub fn invert(&self, pt: Point) -> Option<LonLat> {
        if self.scale <= 0.0 {
            return None;
        }
        let x = (pt.x - self.translate.x) / self.scale;
        let y = (self.translate.y - pt.y) / self.scale;
        let (lambda, phi) = natural_earth_invert(x, y);
        let pos = LonLat::new(lambda.to_degrees(), phi.to_degrees());
        let inside = pos.lon.is_finite()
            && pos.lat.is_finite()
            && (-180.0..=180.0).contains(&pos.lon)
            && (-90.0..=90.0).contains(&pos.lat);
        inside.then_some(pos)
    }

    /// Fits the given shapes into `extent`, preserving aspect ratio and
    /// centering the shorter axis.
    ///
    /// Returns `None` when the shapes have no extent (no vertices, or all
    /// vertices on one line) or the extent itself is empty.
    pub fn fit_extent<'a, I>(extent: Rect, shapes: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a MultiPolygon>,
    {
        let raw = raw_bounds(shapes)?;
        let (w, h) = (extent.width(), extent.height());
        if w <= 0.0 || h <= 0.0 || raw.width() <= 0.0 || raw.height() <= 0.0 {
            return None;
        }
        let scale = (w / raw.width()).min(h / raw.height());
        // `raw` is in y-down space, so the translation is the same on both axes.
        let translate = Vec2::new(
            extent.x0 + (w - scale * (raw.x0 + raw.x1)) * 0.5,
            extent.y0 + (h - scale * (raw.y0 + raw.y1)) * 0.5,
        );
        Some(Self { scale, translate })
    }

    /// Fits the given shapes into a `width` x `height` viewport inset by
    /// `margin` on every side.
    pub fn fit_size<'a, I>(width: f64, height: f64, margin: f64, shapes: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a MultiPolygon>,
    {
        let extent = Rect::new(margin, margin, width - margin, height - margin);
        Self::fit_extent(extent, shapes)
    }
}

/// Bounds of the shapes at unit scale, in y-down space.
fn raw_bounds<'a, I>(shapes: I) -> Option<Rect>
where
    I: IntoIterator<Item = &'a MultiPolygon>,
{
    let mut bounds: Option<Rect> = None;
    for shape in shapes {
        for pos in shape.positions() {
            let (x, y) = natural_earth(pos.lon.to_radians(), pos.lat.to_radians());
            let pt = Point::new(x, -y);
            bounds = Some(match bounds {
                Some(b) => b.union_pt(pt),
                None => Rect::from_points(pt, pt),
            });
        }
    }
    bounds
}
