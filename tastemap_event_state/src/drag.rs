// Copyright 2025 the Tastemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag-to-pan state: movement deltas while the pointer is down, and a
//! click/pan decision when it is released.
//!
//! ## Usage
//!
//! 1) Call [`PanDrag::start`] on pointer down with the pointer position.
//! 2) On each move, call [`PanDrag::update`] and pan the map by the returned delta.
//! 3) On pointer up, call [`PanDrag::end`]: a gesture that stayed within the
//!    click tolerance is reported as [`DragEnd::Click`] so the host can treat
//!    it as a region click rather than a pan.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use tastemap_event_state::drag::{DragEnd, PanDrag};
//!
//! let mut drag = PanDrag::default();
//!
//! drag.start(Point::new(10.0, 20.0));
//! let delta = drag.update(Point::new(40.0, 20.0)).unwrap();
//! assert_eq!(delta.x, 30.0);
//!
//! assert_eq!(drag.end(Point::new(40.0, 20.0)), DragEnd::Pan);
//! assert!(!drag.is_dragging());
//! ```

use kurbo::{Point, Vec2};

/// Default distance (view units) a pointer may travel and still count as a click.
pub const DEFAULT_CLICK_TOLERANCE: f64 = 4.0;

/// How a finished gesture should be interpreted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragEnd {
    /// No drag was in progress.
    Idle,
    /// The pointer barely moved: treat as a click at the release point.
    Click,
    /// The pointer moved far enough to have panned the map.
    Pan,
}

/// Tracks one pointer drag for panning the map.
#[derive(Debug, Clone, Copy)]
pub struct PanDrag {
    start_pos: Option<Point>,
    last_pos: Option<Point>,
    moved: bool,
    click_tolerance: f64,
}

impl Default for PanDrag {
    fn default() -> Self {
        Self::with_click_tolerance(DEFAULT_CLICK_TOLERANCE)
    }
}

impl PanDrag {
    /// Creates a tracker with a custom click tolerance.
    #[must_use]
    pub fn with_click_tolerance(click_tolerance: f64) -> Self {
        Self {
            start_pos: None,
            last_pos: None,
            moved: false,
            click_tolerance,
        }
    }

    /// Starts tracking a new drag from `pos`, abandoning any previous one.
    pub fn start(&mut self, pos: Point) {
        self.start_pos = Some(pos);
        self.last_pos = Some(pos);
        self.moved = false;
    }

    /// Records a pointer move, returning the delta since the previous position.
    ///
    /// Returns `None` when no drag is in progress.
    pub fn update(&mut self, pos: Point) -> Option<Vec2> {
        let start = self.start_pos?;
        let last = self.last_pos.replace(pos).unwrap_or(start);
        if (pos - start).hypot() > self.click_tolerance {
            self.moved = true;
        }
        Some(pos - last)
    }

    /// Returns the offset from the drag start, if dragging.
    #[must_use]
    pub fn total_offset(&self, current_pos: Point) -> Option<Vec2> {
        self.start_pos.map(|start| current_pos - start)
    }

    /// Ends the drag at `pos` and classifies it.
    pub fn end(&mut self, pos: Point) -> DragEnd {
        let Some(start) = self.start_pos.take() else {
            return DragEnd::Idle;
        };
        self.last_pos = None;
        let moved = self.moved || (pos - start).hypot() > self.click_tolerance;
        self.moved = false;
        if moved { DragEnd::Pan } else { DragEnd::Click }
    }

    /// Returns `true` while a drag is active.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.start_pos.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_drag_is_idle() {
        let mut drag = PanDrag::default();
        assert!(!drag.is_dragging());
        assert_eq!(drag.update(Point::new(1.0, 1.0)), None);
        assert_eq!(drag.end(Point::new(1.0, 1.0)), DragEnd::Idle);
    }

    #[test]
    fn updates_report_incremental_deltas() {
        let mut drag = PanDrag::default();
        drag.start(Point::new(10.0, 20.0));

        assert_eq!(drag.update(Point::new(15.0, 25.0)), Some(Vec2::new(5.0, 5.0)));
        assert_eq!(drag.update(Point::new(12.0, 30.0)), Some(Vec2::new(-3.0, 5.0)));
        assert_eq!(
            drag.total_offset(Point::new(12.0, 30.0)),
            Some(Vec2::new(2.0, 10.0))
        );
    }

    #[test]
    fn small_wiggle_is_a_click() {
        let mut drag = PanDrag::default();
        drag.start(Point::new(100.0, 100.0));
        drag.update(Point::new(101.0, 102.0));
        assert_eq!(drag.end(Point::new(101.0, 101.0)), DragEnd::Click);
    }

    #[test]
    fn returning_to_start_is_still_a_pan() {
        let mut drag = PanDrag::default();
        drag.start(Point::new(100.0, 100.0));
        drag.update(Point::new(160.0, 100.0));
        drag.update(Point::new(100.0, 100.0));
        assert_eq!(drag.end(Point::new(100.0, 100.0)), DragEnd::Pan);
    }

    #[test]
    fn restart_resets_movement() {
        let mut drag = PanDrag::with_click_tolerance(2.0);
        drag.start(Point::new(0.0, 0.0));
        drag.update(Point::new(50.0, 0.0));
        drag.start(Point::new(0.0, 0.0));
        assert_eq!(drag.end(Point::new(1.0, 0.0)), DragEnd::Click);
    }
}
