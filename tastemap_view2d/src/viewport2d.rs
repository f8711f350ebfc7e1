// Copyright 2025 the Tastemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _; // for `abs`
use kurbo::{Affine, Point, Rect, Vec2};

use crate::modes::ClampMode;
use crate::transform::ZoomTransform;

/// 2D viewport over the fitted map plane.
///
/// World coordinates are the screen coordinates produced by the fitted
/// projection at the un-zoomed transform; the viewport adds a uniform pan+zoom
/// on top. It can be used to:
/// - Convert points and rectangles between world and view coordinates.
/// - Pan and zoom around a chosen anchor point.
/// - Keep the view inside a translate extent so the map cannot be dragged
///   off-screen.
#[derive(Clone, Debug)]
pub struct Viewport2D {
    view_rect: Rect,
    translate_extent: Option<Rect>,
    zoom: f64,
    pan: Vec2,
    min_zoom: f64,
    max_zoom: f64,
    clamp_mode: ClampMode,
    world_to_view: Affine,
    view_to_world: Affine,
}

impl Viewport2D {
    /// Creates a new viewport covering `view_rect` with default zoom and clamping.
    ///
    /// - Initial zoom is `1.0`.
    /// - Initial pan is zero (world origin maps to the view rect origin).
    /// - Zoom is clamped to the range `[1e-3, 1e3]` by default.
    #[must_use]
    pub fn new(view_rect: Rect) -> Self {
        let mut vp = Self {
            view_rect,
            translate_extent: None,
            zoom: 1.0,
            pan: Vec2::ZERO,
            min_zoom: 1e-3,
            max_zoom: 1e3,
            clamp_mode: ClampMode::default(),
            world_to_view: Affine::IDENTITY,
            view_to_world: Affine::IDENTITY,
        };
        vp.rebuild_transforms();
        vp
    }

    /// Returns the current view rectangle in device coordinates.
    #[must_use]
    pub fn view_rect(&self) -> Rect {
        self.view_rect
    }

    /// Sets the view rectangle in device coordinates.
    ///
    /// This does not change zoom or pan, but it may affect the visible world
    /// region. Transforms are rebuilt to account for the new rect.
    pub fn set_view_rect(&mut self, rect: Rect) {
        if self.view_rect == rect {
            return;
        }
        self.view_rect = rect;
        self.rebuild_transforms();
        self.clamp_to_bounds();
    }

    /// Sets the world-space rectangle the visible region must stay within.
    pub fn set_translate_extent(&mut self, extent: Option<Rect>) {
        if self.translate_extent == extent {
            return;
        }
        self.translate_extent = extent;
        self.clamp_to_bounds();
    }

    /// Returns the current translate extent, if any.
    #[must_use]
    pub fn translate_extent(&self) -> Option<Rect> {
        self.translate_extent
    }

    /// Returns the current uniform zoom factor.
    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Returns the current pan offset in view coordinates.
    #[must_use]
    pub fn pan(&self) -> Vec2 {
        self.pan
    }

    /// Returns the configured `(min, max)` zoom factors.
    #[must_use]
    pub fn zoom_limits(&self) -> (f64, f64) {
        (self.min_zoom, self.max_zoom)
    }

    /// Sets the minimum and maximum zoom factors.
    ///
    /// The provided range is normalized so that `min_zoom <= max_zoom`. The
    /// current zoom is clamped into the new range.
    pub fn set_zoom_limits(&mut self, min_zoom: f64, max_zoom: f64) {
        let (min_zoom, max_zoom) = if min_zoom <= max_zoom {
            (min_zoom, max_zoom)
        } else {
            (max_zoom, min_zoom)
        };
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom;
        self.set_zoom(self.zoom);
    }

    /// Sets the clamp mode for panning relative to the translate extent.
    pub fn set_clamp_mode(&mut self, mode: ClampMode) {
        if self.clamp_mode != mode {
            self.clamp_mode = mode;
            self.clamp_to_bounds();
        }
    }

    /// Returns the current clamp mode.
    #[must_use]
    pub fn clamp_mode(&self) -> ClampMode {
        self.clamp_mode
    }

    /// Sets the zoom factor, clamping it into the configured zoom range.
    pub fn set_zoom(&mut self, zoom: f64) {
        let clamped = zoom.clamp(self.min_zoom, self.max_zoom);
        if (self.zoom - clamped).abs() < f64::EPSILON {
            return;
        }
        self.zoom = clamped;
        self.rebuild_transforms();
        self.clamp_to_bounds();
    }

    /// Returns the current world → view transform.
    #[must_use]
    pub fn transform(&self) -> ZoomTransform {
        let origin = self.view_rect.origin().to_vec2();
        let t = origin + self.pan;
        ZoomTransform::new(self.zoom, t.x, t.y)
    }

    /// Replaces zoom and pan with `transform`, then applies zoom limits and
    /// clamping.
    pub fn set_transform(&mut self, transform: ZoomTransform) {
        self.zoom = transform.k.clamp(self.min_zoom, self.max_zoom);
        self.pan = transform.translation() - self.view_rect.origin().to_vec2();
        self.rebuild_transforms();
        self.clamp_to_bounds();
    }

    /// Pans the view by a delta in view/device space.
    ///
    /// This adjusts the pan offset and then applies clamping relative to the
    /// translate extent if configured.
    pub fn pan_by_view(&mut self, delta: Vec2) {
        if delta == Vec2::ZERO {
            return;
        }
        self.pan += delta;
        self.rebuild_transforms();
        self.clamp_to_bounds();
    }

    /// Zooms around a given anchor point in view/device coordinates.
    ///
    /// The anchor point remains fixed in view space as much as possible under
    /// the new zoom level.
    pub fn zoom_about_view_point(&mut self, anchor_view: Point, factor: f64) {
        if factor <= 0.0 {
            return;
        }
        let old_zoom = self.zoom;
        let new_zoom = (old_zoom * factor).clamp(self.min_zoom, self.max_zoom);
        if (new_zoom - old_zoom).abs() < f64::EPSILON {
            return;
        }

        let old_world = self.view_to_world_point(anchor_view);
        self.zoom = new_zoom;
        self.rebuild_transforms();
        let new_anchor_view = self.world_to_view_point(old_world);
        let delta_view = anchor_view - new_anchor_view;
        self.pan += delta_view;
        self.rebuild_transforms();
        self.clamp_to_bounds();
    }

    /// Centers the view on the given world‑space point.
    pub fn center_on(&mut self, world_pt: Point) {
        let view_center = self.view_rect.center();
        let world_in_view = self.world_to_view_point(world_pt);
        let delta = view_center - world_in_view;
        self.pan_by_view(delta);
    }

    /// Returns the visible world‑space rectangle.
    #[must_use]
    pub fn visible_world_rect(&self) -> Rect {
        self.view_to_world_rect(self.view_rect)
    }

    /// Converts a world‑space point into view/device coordinates.
    #[must_use]
    pub fn world_to_view_point(&self, pt: Point) -> Point {
        self.world_to_view * pt
    }

    /// Converts a view/device‑space point into world coordinates.
    #[must_use]
    pub fn view_to_world_point(&self, pt: Point) -> Point {
        self.view_to_world * pt
    }

    /// Converts a world‑space rectangle into view/device coordinates.
    #[must_use]
    pub fn world_to_view_rect(&self, rect: Rect) -> Rect {
        // Uniform positive zoom keeps axis order, so the two corners suffice.
        Rect::from_points(
            self.world_to_view * rect.origin(),
            self.world_to_view * Point::new(rect.max_x(), rect.max_y()),
        )
    }

    /// Converts a view/device‑space rectangle into world coordinates.
    #[must_use]
    pub fn view_to_world_rect(&self, rect: Rect) -> Rect {
        Rect::from_points(
            self.view_to_world * rect.origin(),
            self.view_to_world * Point::new(rect.max_x(), rect.max_y()),
        )
    }

    /// Returns the current world‑units‑per‑pixel ratio.
    ///
    /// Used to keep outlines a constant on-screen width while zoomed.
    #[must_use]
    pub fn world_units_per_pixel(&self) -> f64 {
        1.0 / self.zoom
    }

    /// Snapshot of the current viewport state for debugging and inspection.
    #[must_use]
    pub fn debug_info(&self) -> Viewport2DDebugInfo {
        Viewport2DDebugInfo {
            view_rect: self.view_rect,
            translate_extent: self.translate_extent,
            visible_world_rect: self.visible_world_rect(),
            zoom: self.zoom,
            pan: self.pan,
            min_zoom: self.min_zoom,
            max_zoom: self.max_zoom,
            clamp_mode: self.clamp_mode,
        }
    }

    fn rebuild_transforms(&mut self) {
        let view_origin = self.view_rect.origin().to_vec2();
        let scale = self.zoom;
        // World → view: scale, then translate by pan into the view rect.
        self.world_to_view = Affine::translate(view_origin + self.pan) * Affine::scale(scale);
        self.view_to_world = self.world_to_view.inverse();
    }

    fn clamp_to_bounds(&mut self) {
        if self.clamp_mode == ClampMode::None {
            return;
        }
        let extent = match self.translate_extent {
            Some(e) if e.width() > 0.0 && e.height() > 0.0 => e,
            _ => return,
        };

        let visible = self.visible_world_rect();
        if visible.width() <= 0.0 || visible.height() <= 0.0 {
            return;
        }

        // World-space shift of the visible rect that brings it inside the
        // extent, or centers it when it is larger than the extent.
        let dx = contain_axis(visible.x0 - extent.x0, visible.x1 - extent.x1);
        let dy = contain_axis(visible.y0 - extent.y0, visible.y1 - extent.y1);

        if dx != 0.0 || dy != 0.0 {
            // Moving the world by `d` in world units moves the visible rect by `-d`.
            self.pan += Vec2::new(dx * self.zoom, dy * self.zoom);
            self.rebuild_transforms();
        }
    }
}

fn contain_axis(low: f64, high: f64) -> f64 {
    if high > low {
        (low + high) * 0.5
    } else if low < 0.0 {
        low
    } else {
        high.max(0.0)
    }
}

/// Debug snapshot of a [`Viewport2D`] state.
#[derive(Clone, Copy, Debug)]
pub struct Viewport2DDebugInfo {
    /// Current view rectangle in device coordinates.
    pub view_rect: Rect,
    /// Optional translate extent used for clamping.
    pub translate_extent: Option<Rect>,
    /// World‑space rectangle currently visible through the view.
    pub visible_world_rect: Rect,
    /// Current uniform zoom factor.
    pub zoom: f64,
    /// Current pan offset in view coordinates.
    pub pan: Vec2,
    /// Minimum zoom factor.
    pub min_zoom: f64,
    /// Maximum zoom factor.
    pub max_zoom: f64,
    /// Clamp mode for panning relative to the extent.
    pub clamp_mode: ClampMode,
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect, Vec2};

    use super::{ClampMode, Viewport2D};
    use crate::transform::ZoomTransform;

    fn clamped(width: f64, height: f64, margin: f64) -> Viewport2D {
        let view_rect = Rect::new(0.0, 0.0, width, height);
        let mut vp = Viewport2D::new(view_rect);
        vp.set_zoom_limits(1.0, 8.0);
        vp.set_translate_extent(Some(view_rect.inflate(margin, margin)));
        vp
    }

    #[test]
    fn basic_world_view_roundtrip() {
        let view_rect = Rect::new(0.0, 0.0, 800.0, 600.0);
        let vp = Viewport2D::new(view_rect);

        let world_pt = Point::new(10.0, -5.0);
        let view_pt = vp.world_to_view_point(world_pt);
        let world_back = vp.view_to_world_point(view_pt);
        assert!((world_back.x - world_pt.x).abs() < 1e-9);
        assert!((world_back.y - world_pt.y).abs() < 1e-9);
    }

    #[test]
    fn zoom_about_anchor_keeps_anchor_fixed() {
        let mut vp = clamped(800.0, 600.0, 50.0);

        // Choose an anchor at the center of the view.
        let anchor_view = vp.view_rect().center();
        let world_at_anchor_before = vp.view_to_world_point(anchor_view);

        vp.zoom_about_view_point(anchor_view, 2.0);
        let world_at_anchor_after = vp.view_to_world_point(anchor_view);

        assert!((vp.zoom() - 2.0).abs() < 1e-12);
        assert!((world_at_anchor_after.x - world_at_anchor_before.x).abs() < 1e-9);
        assert!((world_at_anchor_after.y - world_at_anchor_before.y).abs() < 1e-9);
    }

    #[test]
    fn zoom_is_limited() {
        let mut vp = clamped(800.0, 600.0, 50.0);
        vp.zoom_about_view_point(Point::new(100.0, 100.0), 100.0);
        assert_eq!(vp.zoom(), 8.0);
        vp.zoom_about_view_point(Point::new(100.0, 100.0), 0.001);
        assert_eq!(vp.zoom(), 1.0);
    }

    #[test]
    fn pan_stops_at_translate_extent() {
        let mut vp = clamped(800.0, 600.0, 50.0);

        vp.pan_by_view(Vec2::new(1_000.0, -1_000.0));
        // At k = 1 the view can slide by at most the margin.
        assert_eq!(vp.transform(), ZoomTransform::new(1.0, 50.0, -50.0));

        let visible = vp.visible_world_rect();
        let extent = vp.translate_extent().unwrap();
        assert!(visible.x0 >= extent.x0 - 1e-9 && visible.y1 <= extent.y1 + 1e-9);
    }

    #[test]
    fn zoomed_view_pans_within_extent() {
        let mut vp = clamped(800.0, 600.0, 50.0);
        vp.set_zoom(4.0);
        vp.pan_by_view(Vec2::new(-100_000.0, 0.0));
        let visible = vp.visible_world_rect();
        assert!((visible.x1 - 850.0).abs() < 1e-9, "{visible:?}");
    }

    #[test]
    fn oversized_view_is_centered_on_extent() {
        let view_rect = Rect::new(0.0, 0.0, 800.0, 600.0);
        let mut vp = Viewport2D::new(view_rect);
        vp.set_zoom_limits(0.1, 8.0);
        vp.set_translate_extent(Some(Rect::new(0.0, 0.0, 100.0, 100.0)));
        vp.set_zoom(0.5);

        let visible = vp.visible_world_rect();
        let center = visible.center();
        assert!((center.x - 50.0).abs() < 1e-9 && (center.y - 50.0).abs() < 1e-9);
    }

    #[test]
    fn clamp_mode_none_allows_free_pan() {
        let mut vp = clamped(800.0, 600.0, 50.0);
        vp.set_clamp_mode(ClampMode::None);
        vp.pan_by_view(Vec2::new(5_000.0, 0.0));
        assert_eq!(vp.pan(), Vec2::new(5_000.0, 0.0));
    }

    #[test]
    fn set_transform_applies_limits_and_extent() {
        let mut vp = clamped(800.0, 600.0, 50.0);
        vp.set_transform(ZoomTransform::new(20.0, 0.0, 0.0));
        assert_eq!(vp.zoom(), 8.0);

        vp.set_transform(ZoomTransform::new(2.0, -400.0, -300.0));
        assert_eq!(vp.transform(), ZoomTransform::new(2.0, -400.0, -300.0));
        let visible = vp.visible_world_rect();
        assert_eq!(visible, Rect::new(200.0, 150.0, 600.0, 450.0));
    }

    #[test]
    fn center_on_and_debug_info() {
        let mut vp = clamped(800.0, 600.0, 50.0);
        vp.set_zoom(2.0);
        vp.center_on(Point::new(400.0, 300.0));
        let c = vp.world_to_view_point(Point::new(400.0, 300.0));
        assert!((c.x - 400.0).abs() < 1e-9 && (c.y - 300.0).abs() < 1e-9);

        let info = vp.debug_info();
        assert_eq!(info.view_rect, vp.view_rect());
        assert_eq!(info.clamp_mode, ClampMode::ContainView);
        assert!((vp.world_units_per_pixel() - 0.5).abs() < 1e-12);
        assert!(info.min_zoom <= info.max_zoom);
    }
}
