// Copyright 2025 the Tastemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tastemap: a world map of the countries where you have eaten.
//!
//! This crate ties the others together. [`App`] owns the loaded
//! [`Dataset`](tastemap_data::Dataset), the fitted map, the viewport
//! controller and the open overlay. The host feeds it [`Event`]s and clock
//! ticks and draws whatever the returned [`Update`] says changed:
//!
//! - [`App::map_svg`] renders the map at a point in time.
//! - [`App::overlay_html`] renders the open panel, if any.
//! - [`App::notice`] carries one-off messages such as [`Notice::AllVisited`].
//!
//! Settings come from a YAML [`Config`]; every field has a default.
//!
//! ```rust
//! use std::time::Duration;
//!
//! use tastemap::{App, Config, Event, MapStatus};
//! use tastemap_data::Dataset;
//!
//! // Nothing loaded: the map area shows a message and input is ignored.
//! let mut app = App::new(Config::default(), Dataset::default(), 800.0, 500.0);
//! assert_eq!(app.map_status(), MapStatus::Unavailable);
//! assert!(app.map_svg(Duration::ZERO).contains("map-unavailable"));
//!
//! let update = app.handle(Event::Discover, Duration::ZERO);
//! assert!(!update.map);
//! ```

mod app;
mod config;
mod discover;

pub use app::{App, Event, MapStatus, Notice, Update};
pub use config::{Config, ConfigError};
pub use discover::{Discovery, discover};
