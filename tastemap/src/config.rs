// Copyright 2025 the Tastemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::path::{Path, PathBuf};
use std::time::Duration;

use kurbo::Vec2;
use serde::Deserialize;
use tastemap_data::DEFAULT_EXCLUDED;
use tastemap_stats::SummaryOptions;
use tastemap_view2d::ViewConfig;
use thiserror::Error;

/// Errors raised while loading a [`Config`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        /// Config file path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The YAML is malformed or has fields of the wrong type.
    #[error("invalid config: {0}")]
    Parse(#[from] serde_yaml::Error),
    /// A value is out of range.
    #[error("invalid config value `{field}`: {reason}")]
    Invalid {
        /// Offending field.
        field: &'static str,
        /// What is wrong with it.
        reason: &'static str,
    },
}

/// Application settings. Every field has a default, so an empty file is a
/// valid configuration.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Inset (view units) between the fitted map and each viewport edge.
    pub fit_margin: f64,
    /// How far the map may be dragged past each viewport edge.
    pub pan_margin: f64,
    /// Upper limit for user zoom.
    pub max_zoom: f64,
    /// Upper limit on the scale used to focus a region.
    pub focus_max_scale: f64,
    /// Share of the viewport a focused region may fill.
    pub focus_padding: f64,
    /// Focus anchor in landscape, as `[x, y]` fractions of the viewport.
    pub landscape_anchor: [f64; 2],
    /// Focus anchor in portrait, as `[x, y]` fractions of the viewport.
    pub portrait_anchor: [f64; 2],
    /// Length of the focus animation in milliseconds.
    pub transition_ms: u64,
    /// Quiet period before a resize is applied, in milliseconds.
    pub resize_debounce_ms: u64,
    /// Zoom exponent per wheel delta unit; see [`Config::wheel_factor`].
    pub wheel_step: f64,
    /// Pointer travel (view units) below which a drag counts as a click.
    pub click_tolerance: f64,
    /// Region codes left off the map.
    pub excluded: Vec<String>,
    /// Rows in the most-visited list.
    pub ranking_size: usize,
    /// Bucket name for regions with no continent.
    pub fallback_continent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fit_margin: 10.0,
            pan_margin: 50.0,
            max_zoom: 8.0,
            focus_max_scale: 8.0,
            focus_padding: 0.9,
            landscape_anchor: [0.35, 0.5],
            portrait_anchor: [0.5, 0.3],
            transition_ms: 750,
            resize_debounce_ms: 150,
            wheel_step: 0.002,
            click_tolerance: 4.0,
            excluded: DEFAULT_EXCLUDED.iter().map(|c| (*c).to_owned()).collect(),
            ranking_size: 10,
            fallback_continent: "Other".to_owned(),
        }
    }
}

impl Config {
    /// Parses and validates a YAML configuration.
    pub fn from_yaml_str(input: &str) -> Result<Self, ConfigError> {
        let config: Self = if input.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(input)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a YAML configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&raw)
    }

    /// Checks value ranges. `NaN` fails every check.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let in_unit = |[x, y]: [f64; 2]| (0.0..=1.0).contains(&x) && (0.0..=1.0).contains(&y);
        let checks = [
            (self.fit_margin >= 0.0, "fit_margin", "must be zero or more"),
            (self.pan_margin >= 0.0, "pan_margin", "must be zero or more"),
            (self.max_zoom >= 1.0, "max_zoom", "must be at least 1"),
            (self.focus_max_scale > 0.0, "focus_max_scale", "must be positive"),
            (
                self.focus_padding > 0.0 && self.focus_padding <= 1.0,
                "focus_padding",
                "must be in (0, 1]",
            ),
            (
                in_unit(self.landscape_anchor),
                "landscape_anchor",
                "fractions must be in [0, 1]",
            ),
            (
                in_unit(self.portrait_anchor),
                "portrait_anchor",
                "fractions must be in [0, 1]",
            ),
            (self.wheel_step > 0.0, "wheel_step", "must be positive"),
            (self.click_tolerance >= 0.0, "click_tolerance", "must be zero or more"),
        ];
        match checks.into_iter().find(|(ok, ..)| !ok) {
            Some((_, field, reason)) => Err(ConfigError::Invalid { field, reason }),
            None => Ok(()),
        }
    }

    /// Zoom factor for a wheel delta, positive deltas zooming out.
    #[must_use]
    pub fn wheel_factor(&self, delta: f64) -> f64 {
        (-delta * self.wheel_step).exp2()
    }

    /// Settings for the viewport controller.
    #[must_use]
    pub fn view_config(&self) -> ViewConfig {
        ViewConfig {
            max_zoom: self.max_zoom,
            focus_max_scale: self.focus_max_scale,
            focus_padding: self.focus_padding,
            pan_margin: self.pan_margin,
            landscape_anchor: Vec2::new(self.landscape_anchor[0], self.landscape_anchor[1]),
            portrait_anchor: Vec2::new(self.portrait_anchor[0], self.portrait_anchor[1]),
            transition: Duration::from_millis(self.transition_ms),
        }
    }

    /// Settings for the statistics summary.
    #[must_use]
    pub fn summary_options(&self) -> SummaryOptions {
        SummaryOptions {
            ranking_size: self.ranking_size,
            fallback_continent: self.fallback_continent.clone(),
        }
    }

    /// Quiet period before a resize is applied.
    #[must_use]
    pub fn resize_debounce(&self) -> Duration {
        Duration::from_millis(self.resize_debounce_ms)
    }
}
