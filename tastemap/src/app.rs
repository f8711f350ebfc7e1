// Copyright 2025 the Tastemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::fmt;
use std::time::Duration;

use chrono::NaiveDate;
use kurbo::{Point, Shape as _};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tastemap_data::{Dataset, Region, RegionSet, Sources};
use tastemap_event_state::debounce::Debouncer;
use tastemap_event_state::drag::{DragEnd, PanDrag};
use tastemap_geo::MapGeometry;
use tastemap_present::{
    CalendarPanel, DetailPanel, DismissReason, MapStyle, Overlays, PanelKind, StatsPanel,
    render_map_pending, render_map_svg, render_map_unavailable, render_panel,
};
use tastemap_stats::{Summary, monthly_activity};
use tastemap_view2d::{ViewController, ZoomTransform};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::discover::{Discovery, discover};

/// A user action delivered by the host.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// A click on the region with this code.
    ClickRegion(String),
    /// A click on the overlay backdrop.
    ClickOutside,
    /// The Escape key.
    Escape,
    /// The overlay's close control.
    CloseControl,
    /// The discover control: focus a random unvisited region.
    Discover,
    /// Open the statistics panel.
    OpenStats,
    /// Open the calendar panel.
    OpenCalendar,
    /// A country picked from the statistics or calendar panel.
    SelectEntry(String),
    /// Pointer pressed on the map, in view coordinates.
    DragStart(Point),
    /// Pointer moved while pressed.
    DragMove(Point),
    /// Pointer released. A release close to the press point is a click on
    /// whatever region lies under it.
    DragEnd(Point),
    /// Wheel or pinch zoom by `factor` about `at`; see
    /// [`Config::wheel_factor`](crate::Config::wheel_factor).
    Wheel {
        /// Zoom anchor in view coordinates.
        at: Point,
        /// Multiplicative zoom factor.
        factor: f64,
    },
    /// The viewport changed size. Applied after a quiet period; see
    /// [`App::tick`].
    Resize {
        /// New width.
        width: f64,
        /// New height.
        height: f64,
    },
}

/// A message for the user that is not tied to a panel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    /// Discover found no unvisited region.
    AllVisited,
    /// A selected entry names a country with no region on the map.
    UnknownCountry(String),
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllVisited => f.write_str("You have visited every country on the map!"),
            Self::UnknownCountry(name) => write!(f, "{name} is not on the map."),
        }
    }
}

/// Whether the map can be drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MapStatus {
    /// Regions are loaded and fitted.
    Ready,
    /// Regions are loaded but the map area is too small to fit them, as
    /// before the host has laid it out. The next usable [`Event::Resize`]
    /// fits them.
    Pending,
    /// No regions to draw; the map area shows a message instead.
    Unavailable,
}

/// What the host should refresh after an event or tick.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Update {
    /// Redraw the map ([`App::map_svg`]).
    pub map: bool,
    /// Re-render the overlay ([`App::overlay_html`]).
    pub overlay: bool,
    /// A transition is running; keep calling [`App::tick`].
    pub animating: bool,
    /// A notice to show, if any.
    pub notice: Option<Notice>,
    /// A resize is waiting out its quiet period; call [`App::tick`] at or
    /// after this time to apply it.
    pub wake_at: Option<Duration>,
}

#[derive(Debug)]
struct MapView {
    geometry: MapGeometry,
    controller: ViewController<usize>,
}

impl MapView {
    fn new(config: &Config, geometry: MapGeometry, width: f64, height: f64) -> Self {
        let controller =
            ViewController::new(config.view_config(), width, height, geometry.map_bounds());
        Self {
            geometry,
            controller,
        }
    }
}

/// The application: loaded data, map view state and open overlays.
///
/// Time is passed in as a monotonic offset on every call, so the same event
/// sequence always produces the same result.
#[derive(Debug)]
pub struct App {
    config: Config,
    style: MapStyle,
    dataset: Dataset,
    map: Option<MapView>,
    /// Region selected while the map is not fitted yet.
    pending_focus: Option<usize>,
    overlays: Overlays,
    drag: PanDrag,
    pending_resize: Debouncer<(f64, f64)>,
    animating: bool,
    notice: Option<Notice>,
    rng: StdRng,
}

impl App {
    /// Creates the application for a `width` x `height` map area.
    #[must_use]
    pub fn new(config: Config, dataset: Dataset, width: f64, height: f64) -> Self {
        Self::with_rng(config, dataset, width, height, StdRng::from_entropy())
    }

    /// Like [`App::new`], with the random source used by discover.
    #[must_use]
    pub fn with_rng(config: Config, dataset: Dataset, width: f64, height: f64, rng: StdRng) -> Self {
        let map = build_map(&config, &dataset, width, height);
        if !has_regions(&dataset) {
            warn!("no regions to draw, map unavailable");
        } else if map.is_none() {
            debug!(width, height, "map area too small to fit, waiting for a resize");
        }
        Self {
            style: MapStyle::default(),
            map,
            pending_focus: None,
            overlays: Overlays::new(),
            drag: PanDrag::with_click_tolerance(config.click_tolerance),
            pending_resize: Debouncer::new(config.resize_debounce()),
            animating: false,
            notice: None,
            rng,
            dataset,
            config,
        }
    }

    /// Loads `sources`, dropping the configured excluded codes, and creates
    /// the application.
    #[must_use]
    pub fn load(config: Config, mut sources: Sources, width: f64, height: f64) -> Self {
        sources.excluded.clone_from(&config.excluded);
        let dataset = Dataset::load(&sources);
        Self::new(config, dataset, width, height)
    }

    /// Replaces the map colors.
    pub fn set_style(&mut self, style: MapStyle) {
        self.style = style;
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the loaded data.
    #[must_use]
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Returns whether the map can be drawn.
    #[must_use]
    pub fn map_status(&self) -> MapStatus {
        match (&self.map, has_regions(&self.dataset)) {
            (Some(_), _) => MapStatus::Ready,
            (None, true) => MapStatus::Pending,
            (None, false) => MapStatus::Unavailable,
        }
    }

    /// Returns the open overlay, if any.
    #[must_use]
    pub fn open_panel(&self) -> Option<PanelKind> {
        self.overlays.current()
    }

    /// Returns the notice raised by the last event, if any.
    #[must_use]
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Returns the focused region, if any.
    #[must_use]
    pub fn active_region(&self) -> Option<&Region> {
        let index = match &self.map {
            Some(map) => *map.controller.active()?,
            None => self.pending_focus?,
        };
        self.dataset.regions()?.at(index)
    }

    /// Returns the zoom transform to draw with at `now`.
    #[must_use]
    pub fn current_transform(&self, now: Duration) -> ZoomTransform {
        self.map
            .as_ref()
            .map_or(ZoomTransform::IDENTITY, |map| map.controller.current_transform(now))
    }

    /// Returns the lowest zoom the user can reach.
    #[must_use]
    pub fn min_zoom(&self) -> f64 {
        self.map.as_ref().map_or(1.0, |map| map.controller.min_zoom())
    }

    /// Returns the map viewport size.
    #[must_use]
    pub fn size(&self) -> Option<(f64, f64)> {
        let map = self.map.as_ref()?;
        Some((map.geometry.width(), map.geometry.height()))
    }

    /// Returns when [`App::tick`] next has work to do besides animation: the
    /// end of a pending resize's quiet period.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending_resize.deadline()
    }

    /// Returns the region under a view-space point at `now`.
    #[must_use]
    pub fn region_at(&self, pos: Point, now: Duration) -> Option<&Region> {
        let index = self.region_index_at(pos, now)?;
        self.dataset.regions()?.at(index)
    }

    /// Handles one user action at `now`.
    pub fn handle(&mut self, event: Event, now: Duration) -> Update {
        self.notice = None;
        let mut update = match event {
            Event::ClickRegion(code) => self.select_code(&code, now),
            Event::ClickOutside => self.dismiss(DismissReason::ClickOutside, now),
            Event::Escape => self.dismiss(DismissReason::Escape, now),
            Event::CloseControl => self.dismiss(DismissReason::CloseControl, now),
            Event::Discover => self.discover(now),
            Event::OpenStats => self.open(PanelKind::Stats, now),
            Event::OpenCalendar => self.open(PanelKind::Calendar, now),
            Event::SelectEntry(country) => self.select_entry(&country, now),
            Event::DragStart(pos) => {
                self.drag.start(pos);
                Update::default()
            }
            Event::DragMove(pos) => match (self.drag.update(pos), self.map.as_mut()) {
                (Some(delta), Some(map)) => {
                    map.controller.pan_by(delta, now);
                    redraw_map()
                }
                _ => Update::default(),
            },
            Event::DragEnd(pos) => match self.drag.end(pos) {
                DragEnd::Click => match self.region_index_at(pos, now) {
                    Some(index) => self.focus_index(index, now),
                    None => Update::default(),
                },
                DragEnd::Pan | DragEnd::Idle => Update::default(),
            },
            Event::Wheel { at, factor } => match self.map.as_mut() {
                Some(map) if factor.is_finite() && factor > 0.0 => {
                    map.controller.zoom_at(at, factor, now);
                    redraw_map()
                }
                _ => Update::default(),
            },
            Event::Resize { width, height } => {
                self.pending_resize.push((width, height), now);
                Update::default()
            }
        };
        update.animating = self.is_animating(now);
        self.animating |= update.animating;
        update.notice.clone_from(&self.notice);
        update.wake_at = self.next_deadline();
        update
    }

    /// Advances time: applies a resize whose quiet period has passed and
    /// steps any running transition.
    pub fn tick(&mut self, now: Duration) -> Update {
        let mut update = Update::default();
        if let Some((width, height)) = self.pending_resize.poll(now) {
            update.map |= self.apply_resize(width, height, now);
        }
        let animating = self
            .map
            .as_mut()
            .is_some_and(|map| map.controller.tick(now));
        // One more frame when a transition ends, at its exact target.
        update.map |= animating || self.animating;
        update.animating = animating;
        update.wake_at = self.next_deadline();
        self.animating = animating;
        update
    }

    /// Renders the map at `now`, or a placeholder when it cannot be drawn.
    #[must_use]
    pub fn map_svg(&self, now: Duration) -> String {
        match &self.map {
            Some(map) => render_map_svg(
                &map.geometry,
                &self.dataset,
                map.controller.active().copied(),
                map.controller.current_transform(now),
                &self.style,
            ),
            None if has_regions(&self.dataset) => render_map_pending(),
            None => render_map_unavailable(),
        }
    }

    /// Renders the open overlay, computing statistics as of `today`.
    #[must_use]
    pub fn overlay_html(&self, today: NaiveDate) -> Option<String> {
        let visits = self.dataset.visits();
        let html = match self.overlays.current()? {
            PanelKind::Detail => {
                let region = self.active_region()?;
                render_panel(&DetailPanel::for_region(&self.dataset, region))
            }
            PanelKind::Stats => render_panel(&StatsPanel::new(Summary::compute_with(
                &self.dataset,
                today,
                &self.config.summary_options(),
            ))),
            PanelKind::Calendar => {
                render_panel(&CalendarPanel::new(&monthly_activity(visits, today), visits))
            }
        };
        Some(html)
    }

    fn is_animating(&self, now: Duration) -> bool {
        self.map
            .as_ref()
            .is_some_and(|map| map.controller.is_animating(now))
    }

    fn region_index_at(&self, pos: Point, now: Duration) -> Option<usize> {
        let map = self.map.as_ref()?;
        let world = map.controller.current_transform(now).invert(pos);
        let active = map.controller.active().copied();
        // Painted last, so it wins where shapes overlap.
        let mut order = active.into_iter().chain((0..map.geometry.len()).rev());
        order.find(|&index| {
            map.geometry
                .bounds(index)
                .is_some_and(|bounds| bounds.contains(world))
                && map
                    .geometry
                    .path(index)
                    .is_some_and(|path| path.contains(world))
        })
    }

    fn focus_index(&mut self, index: usize, now: Duration) -> Update {
        let Some(map) = self.map.as_mut() else {
            // Focused once the map is fitted.
            if self.dataset.regions().and_then(|r| r.at(index)).is_none() {
                return Update::default();
            }
            self.pending_focus = Some(index);
            self.overlays.open(PanelKind::Detail);
            return Update {
                overlay: true,
                ..Update::default()
            };
        };
        let Some(bounds) = map.geometry.bounds(index) else {
            return Update::default();
        };
        map.controller.focus(index, bounds, now);
        self.overlays.open(PanelKind::Detail);
        if let Some(region) = self.dataset.regions().and_then(|r| r.at(index)) {
            info!(code = %region.code, name = %region.name, "region focused");
        }
        Update {
            map: true,
            overlay: true,
            ..Update::default()
        }
    }

    fn deselect(&mut self, now: Duration) -> bool {
        let previous = match self.map.as_mut() {
            Some(map) => map.controller.deselect(now),
            None => self.pending_focus.take(),
        };
        if let Some(index) = previous {
            debug!(index, "region deselected");
        }
        previous.is_some()
    }

    fn select_code(&mut self, code: &str, now: Duration) -> Update {
        match self.dataset.regions().and_then(|r| r.index_of(code)) {
            Some(index) => self.focus_index(index, now),
            None => {
                debug!(code, "click on unknown region code");
                Update::default()
            }
        }
    }

    fn select_entry(&mut self, country: &str, now: Duration) -> Update {
        match self.dataset.regions().and_then(|r| r.index_of_name(country)) {
            Some(index) => {
                self.deselect(now);
                self.focus_index(index, now)
            }
            None => {
                debug!(country, "selected entry has no region");
                self.notice = Some(Notice::UnknownCountry(country.to_owned()));
                Update::default()
            }
        }
    }

    fn dismiss(&mut self, reason: DismissReason, now: Duration) -> Update {
        let closed = self.overlays.dismiss(reason);
        let deselected = match closed {
            Some(PanelKind::Detail) | None => self.deselect(now),
            Some(PanelKind::Stats | PanelKind::Calendar) => false,
        };
        Update {
            map: deselected,
            overlay: closed.is_some(),
            ..Update::default()
        }
    }

    fn open(&mut self, kind: PanelKind, now: Duration) -> Update {
        let deselected = self.deselect(now);
        self.overlays.open(kind);
        Update {
            map: deselected,
            overlay: true,
            ..Update::default()
        }
    }

    fn discover(&mut self, now: Duration) -> Update {
        let Some(regions) = self.dataset.regions().filter(|r| !r.is_empty()) else {
            debug!("discover ignored, map unavailable");
            return Update::default();
        };
        let candidates: Vec<usize> = regions
            .iter()
            .enumerate()
            .filter(|(index, region)| {
                regions.index_of(region.code.as_str()) == Some(*index)
                    && !self.dataset.is_visited(region)
            })
            .map(|(index, _)| index)
            .collect();

        match discover(&candidates, &mut self.rng) {
            Discovery::Region(index) => {
                debug!(candidates = candidates.len(), index, "discovered region");
                self.deselect(now);
                self.focus_index(index, now)
            }
            Discovery::Exhausted => {
                info!("every region visited, nothing to discover");
                self.notice = Some(Notice::AllVisited);
                Update::default()
            }
        }
    }

    fn apply_resize(&mut self, width: f64, height: f64, now: Duration) -> bool {
        let Some(geometry) = self.fit(width, height) else {
            warn!(width, height, "cannot fit the map to this size, keeping the previous fit");
            return false;
        };
        if let Some(map) = self.map.as_mut() {
            map.controller.resize(width, height, geometry.map_bounds());
            map.geometry = geometry;
        } else {
            let mut map = MapView::new(&self.config, geometry, width, height);
            if let Some(index) = self.pending_focus.take()
                && let Some(bounds) = map.geometry.bounds(index)
            {
                map.controller.focus(index, bounds, now);
            }
            self.map = Some(map);
        }
        self.animating = false;
        true
    }

    fn fit(&self, width: f64, height: f64) -> Option<MapGeometry> {
        fit_geometry(&self.config, &self.dataset, width, height)
    }
}

fn has_regions(dataset: &Dataset) -> bool {
    !dataset.regions().is_none_or(RegionSet::is_empty)
}

fn redraw_map() -> Update {
    Update {
        map: true,
        ..Update::default()
    }
}

fn fit_geometry(config: &Config, dataset: &Dataset, width: f64, height: f64) -> Option<MapGeometry> {
    if width.is_nan() || height.is_nan() || width <= 0.0 || height <= 0.0 {
        return None;
    }
    let regions = dataset.regions()?;
    MapGeometry::build(
        width,
        height,
        config.fit_margin,
        regions.iter().map(|r| &r.boundary),
    )
}

fn build_map(config: &Config, dataset: &Dataset, width: f64, height: f64) -> Option<MapView> {
    let geometry = fit_geometry(config, dataset, width, height)?;
    Some(MapView::new(config, geometry, width, height))
}
