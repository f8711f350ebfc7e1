// Copyright 2025 the Tastemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overview/focus state machine on top of [`Viewport2D`].

use core::time::Duration;

use kurbo::{Point, Rect, Vec2};
use tracing::debug;

use crate::modes::{ClampMode, Orientation};
use crate::transform::{Transition, ZoomTransform};
use crate::viewport2d::Viewport2D;

/// Tunables for [`ViewController`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewConfig {
    /// Upper zoom limit for user zoom.
    pub max_zoom: f64,
    /// Upper limit on the scale chosen when focusing a region.
    pub focus_max_scale: f64,
    /// Fraction of the viewport a focused region's box may occupy.
    pub focus_padding: f64,
    /// How far (in view units) the map may be dragged past each viewport edge.
    pub pan_margin: f64,
    /// Focus anchor for landscape viewports, as fractions of width/height.
    pub landscape_anchor: Vec2,
    /// Focus anchor for portrait viewports, as fractions of width/height.
    pub portrait_anchor: Vec2,
    /// Length of the animated move to a focused region.
    pub transition: Duration,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            max_zoom: 8.0,
            focus_max_scale: 8.0,
            focus_padding: 0.9,
            pan_margin: 50.0,
            landscape_anchor: Vec2::new(0.35, 0.5),
            portrait_anchor: Vec2::new(0.5, 0.3),
            transition: Duration::from_millis(750),
        }
    }
}

/// What the map is currently showing.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum ViewState<K> {
    /// The whole map, at the default transform for the orientation.
    #[default]
    Overview,
    /// One region, placed next to (landscape) or above (portrait) the
    /// detail panel.
    Focused(K),
}

/// Drives the map viewport through overview and focused states.
///
/// `K` identifies regions; the controller only stores it to report which
/// region is active, so at most one region is ever active.
#[derive(Clone, Debug)]
pub struct ViewController<K> {
    config: ViewConfig,
    viewport: Viewport2D,
    map_bounds: Rect,
    orientation: Orientation,
    state: ViewState<K>,
    transition: Option<Transition>,
}

impl<K> ViewController<K> {
    /// Creates a controller for a `width` x `height` viewport showing a map
    /// whose fitted screen bounds are `map_bounds`.
    #[must_use]
    pub fn new(config: ViewConfig, width: f64, height: f64, map_bounds: Rect) -> Self {
        let mut controller = Self {
            config,
            viewport: Viewport2D::new(Rect::new(0.0, 0.0, width, height)),
            map_bounds,
            orientation: Orientation::of(width, height),
            state: ViewState::Overview,
            transition: None,
        };
        controller.viewport.set_clamp_mode(ClampMode::ContainView);
        controller.resize(width, height, map_bounds);
        controller
    }

    /// Returns the controller configuration.
    #[must_use]
    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    /// Returns the underlying viewport (at the target of any running transition).
    #[must_use]
    pub fn viewport(&self) -> &Viewport2D {
        &self.viewport
    }

    /// Returns the current viewport orientation.
    #[must_use]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Returns the current state.
    #[must_use]
    pub fn state(&self) -> &ViewState<K> {
        &self.state
    }

    /// Returns the focused region, if any.
    #[must_use]
    pub fn active(&self) -> Option<&K> {
        match &self.state {
            ViewState::Focused(key) => Some(key),
            ViewState::Overview => None,
        }
    }

    /// Returns the lowest zoom the user can reach.
    #[must_use]
    pub fn min_zoom(&self) -> f64 {
        self.viewport.zoom_limits().0
    }

    /// Returns `true` while an animated move is in progress at `now`.
    #[must_use]
    pub fn is_animating(&self, now: Duration) -> bool {
        self.transition.is_some_and(|t| !t.is_finished(now))
    }

    /// Applies a new viewport size and the map bounds fitted for it.
    ///
    /// Zoom limits and pan bounds are recomputed and the view resets to the
    /// default transform for the new orientation. The focused region, if any,
    /// stays active.
    pub fn resize(&mut self, width: f64, height: f64, map_bounds: Rect) {
        let view_rect = Rect::new(0.0, 0.0, width, height);
        self.map_bounds = map_bounds;
        self.orientation = Orientation::of(width, height);
        self.transition = None;

        self.viewport.set_view_rect(view_rect);
        let margin = self.config.pan_margin;
        self.viewport
            .set_translate_extent(Some(view_rect.inflate(margin, margin)));
        let min_zoom = self.compute_min_zoom();
        self.viewport.set_zoom_limits(min_zoom, self.config.max_zoom);
        self.viewport.set_transform(self.default_transform());
        debug!(
            width,
            height,
            min_zoom,
            orientation = ?self.orientation,
            "viewport resized"
        );
    }

    /// Returns the resting transform for the overview state.
    ///
    /// Landscape viewports use the identity (the fitted map as-is). Portrait
    /// viewports zoom to the minimum zoom, which fills the height, and center
    /// the map.
    #[must_use]
    pub fn default_transform(&self) -> ZoomTransform {
        match self.orientation {
            Orientation::Landscape => ZoomTransform::IDENTITY,
            Orientation::Portrait => {
                let k = self.compute_min_zoom();
                let view_center = self.viewport.view_rect().center();
                let map_center = self.map_bounds.center();
                ZoomTransform::new(
                    k,
                    view_center.x - map_center.x * k,
                    view_center.y - map_center.y * k,
                )
            }
        }
    }

    /// Computes the transform that frames `bounds` (world space) next to the
    /// detail panel.
    #[must_use]
    pub fn focus_transform(&self, bounds: Rect) -> ZoomTransform {
        let view = self.viewport.view_rect();
        let (width, height) = (view.width(), view.height());
        let ratio = (bounds.width() / width).max(bounds.height() / height);
        let scale = if ratio > 0.0 {
            (self.config.focus_padding / ratio).min(self.config.focus_max_scale)
        } else {
            self.config.focus_max_scale
        };
        let (min_zoom, max_zoom) = self.viewport.zoom_limits();
        let scale = scale.clamp(min_zoom, max_zoom);

        let fractions = match self.orientation {
            Orientation::Landscape => self.config.landscape_anchor,
            Orientation::Portrait => self.config.portrait_anchor,
        };
        let anchor = Point::new(
            view.x0 + width * fractions.x,
            view.y0 + height * fractions.y,
        );
        let center = bounds.center();
        ZoomTransform::new(scale, anchor.x - center.x * scale, anchor.y - center.y * scale)
    }

    /// Focuses `key`, whose fitted screen bounds are `bounds`, starting an
    /// animated move at `now`.
    ///
    /// Focusing another region while one is focused replaces it; the move
    /// starts from wherever the view currently is.
    pub fn focus(&mut self, key: K, bounds: Rect, now: Duration) -> ZoomTransform {
        let from = self.current_transform(now);
        let target = self.focus_transform(bounds);
        self.state = ViewState::Focused(key);
        self.animate_to(from, target, now)
    }

    /// Leaves the focused state and animates back to the overview.
    ///
    /// Returns the region that was focused, if any.
    pub fn deselect(&mut self, now: Duration) -> Option<K> {
        let previous = match core::mem::take(&mut self.state) {
            ViewState::Focused(key) => key,
            ViewState::Overview => return None,
        };
        let from = self.current_transform(now);
        let target = self.default_transform();
        self.animate_to(from, target, now);
        Some(previous)
    }

    /// Pans by a view-space delta (drag). Interrupts any running transition.
    pub fn pan_by(&mut self, delta: Vec2, now: Duration) {
        self.interrupt(now);
        self.viewport.pan_by_view(delta);
    }

    /// Zooms by `factor` about a view-space point (wheel or pinch).
    /// Interrupts any running transition.
    pub fn zoom_at(&mut self, anchor: Point, factor: f64, now: Duration) {
        self.interrupt(now);
        self.viewport.zoom_about_view_point(anchor, factor);
    }

    /// Drops a finished transition. Returns `true` while still animating.
    pub fn tick(&mut self, now: Duration) -> bool {
        match self.transition {
            Some(t) if t.is_finished(now) => {
                self.transition = None;
                false
            }
            Some(_) => true,
            None => false,
        }
    }

    /// Returns the transform to draw with at `now`.
    #[must_use]
    pub fn current_transform(&self, now: Duration) -> ZoomTransform {
        match self.transition {
            Some(t) => t.sample(now),
            None => self.viewport.transform(),
        }
    }

    fn animate_to(&mut self, from: ZoomTransform, target: ZoomTransform, now: Duration) -> ZoomTransform {
        self.viewport.set_transform(target);
        let target = self.viewport.transform();
        let center = self.viewport.view_rect().center();
        self.transition = Some(Transition::new(
            from,
            target,
            now,
            self.config.transition,
            center,
        ));
        debug!(k = target.k, x = target.x, y = target.y, "view transition started");
        target
    }

    fn interrupt(&mut self, now: Duration) {
        if let Some(t) = self.transition.take()
            && !t.is_finished(now)
        {
            self.viewport.set_transform(t.sample(now));
        }
    }

    fn compute_min_zoom(&self) -> f64 {
        let min_zoom = match self.orientation {
            Orientation::Landscape => 1.0,
            Orientation::Portrait => {
                let map_height = self.map_bounds.height();
                if map_height > 0.0 {
                    (self.viewport.view_rect().height() / map_height).max(1.0)
                } else {
                    1.0
                }
            }
        };
        min_zoom.min(self.config.max_zoom)
    }
}

#[cfg(test)]
mod tests {
    use core::time::Duration;

    use kurbo::{Point, Rect, Vec2};

    use super::{ViewConfig, ViewController, ViewState};
    use crate::modes::Orientation;
    use crate::transform::ZoomTransform;

    const T0: Duration = Duration::from_secs(1);

    /// Bounds of a 2:1 map fitted into `width` x `height` with a 10 unit margin.
    fn fitted_map(width: f64, height: f64) -> Rect {
        let w = width - 20.0;
        let h = (w / 2.0).min(height - 20.0);
        let w = h * 2.0;
        Rect::from_center_size((width / 2.0, height / 2.0), (w, h))
    }

    fn landscape() -> ViewController<&'static str> {
        ViewController::new(ViewConfig::default(), 1200.0, 800.0, fitted_map(1200.0, 800.0))
    }

    #[test]
    fn starts_in_overview_at_identity() {
        let vc = landscape();
        assert_eq!(vc.state(), &ViewState::Overview);
        assert_eq!(vc.orientation(), Orientation::Landscape);
        assert_eq!(vc.min_zoom(), 1.0);
        assert_eq!(vc.current_transform(T0), ZoomTransform::IDENTITY);
    }

    #[test]
    fn focus_scales_to_padding_and_anchors_left_of_center() {
        let mut vc = landscape();
        let bounds = Rect::new(500.0, 300.0, 620.0, 380.0);
        let target = vc.focus("ITA", bounds, T0);

        // 0.9 / max(120 / 1200, 80 / 800) = 9, capped at 8.
        assert_eq!(target.k, 8.0);
        let anchor = target.apply(bounds.center());
        assert!((anchor.x - 1200.0 * 0.35).abs() < 1e-9, "{anchor:?}");
        assert!((anchor.y - 400.0).abs() < 1e-9, "{anchor:?}");
        assert_eq!(vc.active(), Some(&"ITA"));
    }

    #[test]
    fn large_regions_get_headroom() {
        let mut vc = landscape();
        let bounds = Rect::new(100.0, 100.0, 700.0, 300.0);
        let target = vc.focus("RUS", bounds, T0);
        // 0.9 / max(600 / 1200, 200 / 800) = 1.8
        assert!((target.k - 1.8).abs() < 1e-12);
    }

    #[test]
    fn focus_animates_then_settles() {
        let mut vc = landscape();
        let target = vc.focus("JPN", Rect::new(900.0, 250.0, 960.0, 330.0), T0);

        assert!(vc.is_animating(T0 + Duration::from_millis(100)));
        let mid = vc.current_transform(T0 + Duration::from_millis(375));
        assert!(mid.k > 1.0 && mid.k < target.k);

        let end = T0 + Duration::from_millis(750);
        assert!(!vc.tick(end));
        assert_eq!(vc.current_transform(end), target);
    }

    #[test]
    fn refocusing_replaces_the_active_region() {
        let mut vc = landscape();
        vc.focus("ITA", Rect::new(500.0, 300.0, 620.0, 380.0), T0);
        vc.focus("JPN", Rect::new(900.0, 250.0, 960.0, 330.0), T0 + Duration::from_millis(200));
        assert_eq!(vc.active(), Some(&"JPN"));
    }

    #[test]
    fn deselect_returns_to_overview() {
        let mut vc = landscape();
        assert_eq!(vc.deselect(T0), None);

        vc.focus("ITA", Rect::new(500.0, 300.0, 620.0, 380.0), T0);
        let later = T0 + Duration::from_secs(2);
        assert_eq!(vc.deselect(later), Some("ITA"));
        assert_eq!(vc.active(), None);
        let settled = later + Duration::from_secs(1);
        assert_eq!(vc.current_transform(settled), ZoomTransform::IDENTITY);
    }

    #[test]
    fn portrait_min_zoom_fills_height_and_centers() {
        let mut vc = landscape();
        let (w, h) = (400.0, 800.0);
        let map = fitted_map(w, h);
        vc.resize(w, h, map);

        assert_eq!(vc.orientation(), Orientation::Portrait);
        let min_zoom = vc.min_zoom();
        assert!(min_zoom > 1.0, "portrait min zoom {min_zoom}");
        assert!((min_zoom - h / map.height()).abs() < 1e-12);

        let t = vc.current_transform(T0);
        assert_eq!(t, vc.default_transform());
        let top = t.apply(Point::new(map.center().x, map.y0));
        let bottom = t.apply(Point::new(map.center().x, map.y1));
        assert!(top.y.abs() < 1e-9 && (bottom.y - h).abs() < 1e-9);
        assert!((top.x - w / 2.0).abs() < 1e-9);
    }

    #[test]
    fn back_to_landscape_resets_to_identity() {
        let mut vc = ViewController::<u32>::new(
            ViewConfig::default(),
            400.0,
            800.0,
            fitted_map(400.0, 800.0),
        );
        vc.zoom_at(Point::new(200.0, 400.0), 1.5, T0);
        vc.resize(1200.0, 800.0, fitted_map(1200.0, 800.0));
        assert_eq!(vc.min_zoom(), 1.0);
        assert_eq!(vc.current_transform(T0), ZoomTransform::IDENTITY);
    }

    #[test]
    fn user_pan_interrupts_transition() {
        let mut vc = landscape();
        vc.focus("ITA", Rect::new(500.0, 300.0, 620.0, 380.0), T0);
        let mid = T0 + Duration::from_millis(300);
        let before = vc.current_transform(mid);
        vc.pan_by(Vec2::new(5.0, 0.0), mid);
        assert!(!vc.is_animating(mid));
        let after = vc.current_transform(mid);
        assert!((after.k - before.k).abs() < 1e-12);
    }
}
