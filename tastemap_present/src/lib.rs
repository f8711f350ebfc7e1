// Copyright 2025 the Tastemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tastemap Present: turning loaded data and view state into markup.
//!
//! This crate produces text for the host to insert: an SVG document for the
//! map and HTML fragments for the overlay panels. It holds no application
//! state beyond [`Overlays`], which records the one panel that is open.
//!
//! - Markup helpers: [`escape_html`], [`format_visit_date`], [`flag_emoji`],
//!   [`region_classes`].
//! - Panels: [`DetailPanel`], [`StatsPanel`] and [`CalendarPanel`] implement
//!   [`PanelView`]; [`render_panel`] wraps any of them in the shared chrome.
//! - Map: [`render_map_svg`] with a [`MapStyle`], or
//!   [`render_map_unavailable`] when there are no regions to draw, or
//!   [`render_map_pending`] while the map area is too small to fit them.
//!
//! Every string that comes from the data files is escaped before it is
//! written.
//!
//! ```rust
//! use tastemap_present::{escape_html, flag_emoji, format_visit_date, region_classes};
//!
//! assert_eq!(format_visit_date("2024-03-05"), "Mar 5, 2024");
//! assert_eq!(escape_html("Fish & Chips"), "Fish &amp; Chips");
//! assert_eq!(flag_emoji("IT"), "\u{1F1EE}\u{1F1F9}");
//! assert_eq!(region_classes(true, false), "region visited");
//! ```

mod calendar;
mod detail;
mod markup;
mod overlay;
mod panel;
mod stats;
mod svg;

pub use calendar::{CalendarCell, CalendarPanel, MonthVisit};
pub use detail::{DetailPanel, TripCard};
pub use markup::{escape_html, flag_emoji, format_visit_date, region_classes};
pub use overlay::{DismissReason, Overlays};
pub use panel::{PanelKind, PanelView, render_panel};
pub use stats::StatsPanel;
pub use svg::{MapStyle, render_map_pending, render_map_svg, render_map_unavailable};
