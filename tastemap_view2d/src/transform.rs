// Copyright 2025 the Tastemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;
use core::time::Duration;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _; // for `powf`
use kurbo::{Affine, Point, Vec2};

/// A uniform zoom transform: `view = translate + k * world`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomTransform {
    /// Scale factor.
    pub k: f64,
    /// Horizontal translation in view units.
    pub x: f64,
    /// Vertical translation in view units.
    pub y: f64,
}

impl ZoomTransform {
    /// The identity transform (`k = 1`, no translation).
    pub const IDENTITY: Self = Self {
        k: 1.0,
        x: 0.0,
        y: 0.0,
    };

    /// Creates a transform from scale and translation.
    #[must_use]
    pub const fn new(k: f64, x: f64, y: f64) -> Self {
        Self { k, x, y }
    }

    /// Returns the translation as a vector.
    #[must_use]
    pub fn translation(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Maps a world point into view space.
    #[must_use]
    pub fn apply(&self, pt: Point) -> Point {
        Point::new(self.x + self.k * pt.x, self.y + self.k * pt.y)
    }

    /// Maps a view point back into world space.
    #[must_use]
    pub fn invert(&self, pt: Point) -> Point {
        Point::new((pt.x - self.x) / self.k, (pt.y - self.y) / self.k)
    }

    /// Returns the equivalent affine matrix.
    #[must_use]
    pub fn to_affine(&self) -> Affine {
        Affine::translate(self.translation()) * Affine::scale(self.k)
    }

    /// Interpolates between two transforms as seen through a view centered on
    /// `view_center`.
    ///
    /// The scale is interpolated geometrically and the world point under the
    /// view center linearly, so zooming reads as a steady dolly rather than a
    /// swoop towards the origin.
    #[must_use]
    pub fn interpolate(&self, to: &Self, t: f64, view_center: Point) -> Self {
        if t <= 0.0 {
            return *self;
        }
        if t >= 1.0 {
            return *to;
        }
        let k = self.k * (to.k / self.k).powf(t);
        let from_world = self.invert(view_center);
        let to_world = to.invert(view_center);
        let world = from_world.lerp(to_world, t);
        Self {
            k,
            x: view_center.x - world.x * k,
            y: view_center.y - world.y * k,
        }
    }
}

impl Default for ZoomTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Formats as an SVG/CSS transform list: `translate(x,y) scale(k)`.
impl fmt::Display for ZoomTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "translate({},{}) scale({})", self.x, self.y, self.k)
    }
}

/// Cubic ease-in-out on `[0, 1]`.
#[must_use]
pub fn ease_cubic_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0) * 2.0;
    if t <= 1.0 {
        t * t * t / 2.0
    } else {
        let t = t - 2.0;
        (t * t * t + 2.0) / 2.0
    }
}

/// An animated move between two transforms.
///
/// Time is a monotonic offset supplied by the caller (for example, time since
/// the host started), which keeps sampling deterministic.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transition {
    from: ZoomTransform,
    to: ZoomTransform,
    start: Duration,
    duration: Duration,
    view_center: Point,
}

impl Transition {
    /// Starts a transition at `start`.
    #[must_use]
    pub fn new(
        from: ZoomTransform,
        to: ZoomTransform,
        start: Duration,
        duration: Duration,
        view_center: Point,
    ) -> Self {
        Self {
            from,
            to,
            start,
            duration,
            view_center,
        }
    }

    /// Returns the transform the transition ends on.
    #[must_use]
    pub fn target(&self) -> ZoomTransform {
        self.to
    }

    /// Returns linear progress in `[0, 1]` at `now`.
    #[must_use]
    pub fn progress(&self, now: Duration) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_sub(self.start);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    /// Returns `true` once `now` is at or past the end.
    #[must_use]
    pub fn is_finished(&self, now: Duration) -> bool {
        self.progress(now) >= 1.0
    }

    /// Samples the eased transform at `now`.
    #[must_use]
    pub fn sample(&self, now: Duration) -> ZoomTransform {
        let t = ease_cubic_in_out(self.progress(now));
        self.from.interpolate(&self.to, t, self.view_center)
    }
}

#[cfg(test)]
mod tests {
    use alloc::format;
    use core::time::Duration;

    use kurbo::Point;

    use super::{Transition, ZoomTransform, ease_cubic_in_out};

    #[test]
    fn apply_and_affine_agree() {
        let t = ZoomTransform::new(2.5, 40.0, -10.0);
        let p = Point::new(3.0, 7.0);
        let a = t.apply(p);
        let b = t.to_affine() * p;
        assert!((a.x - b.x).abs() < 1e-12 && (a.y - b.y).abs() < 1e-12);
        let back = t.invert(a);
        assert!((back.x - 3.0).abs() < 1e-12 && (back.y - 7.0).abs() < 1e-12);
    }

    #[test]
    fn display_is_an_svg_transform_list() {
        let t = ZoomTransform::new(2.0, 10.5, -3.0);
        assert_eq!(format!("{t}"), "translate(10.5,-3) scale(2)");
    }

    #[test]
    fn ease_hits_endpoints_and_midpoint() {
        assert_eq!(ease_cubic_in_out(0.0), 0.0);
        assert_eq!(ease_cubic_in_out(1.0), 1.0);
        assert!((ease_cubic_in_out(0.5) - 0.5).abs() < 1e-12);
        assert!(ease_cubic_in_out(0.25) < 0.25);
    }

    #[test]
    fn interpolation_scales_geometrically() {
        let center = Point::new(400.0, 300.0);
        let a = ZoomTransform::IDENTITY;
        let b = ZoomTransform::new(4.0, -800.0, -600.0);
        let mid = a.interpolate(&b, 0.5, center);
        assert!((mid.k - 2.0).abs() < 1e-12);
    }

    #[test]
    fn transition_samples_endpoints_and_finishes() {
        let from = ZoomTransform::IDENTITY;
        let to = ZoomTransform::new(3.0, -200.0, -100.0);
        let start = Duration::from_millis(1_000);
        let tr = Transition::new(from, to, start, Duration::from_millis(750), Point::new(400.0, 300.0));

        assert_eq!(tr.sample(start), from);
        assert!(!tr.is_finished(start + Duration::from_millis(300)));
        assert_eq!(tr.sample(start + Duration::from_millis(750)), to);
        assert!(tr.is_finished(start + Duration::from_millis(751)));
        // Sampling before the start clamps to the beginning.
        assert_eq!(tr.sample(Duration::ZERO), from);
    }
}
