// Copyright 2025 the Tastemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Clamp behavior for panning relative to the optional translate extent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ClampMode {
    /// Do not apply any clamping; the view may move freely.
    None,
    /// Keep the visible world rectangle inside the translate extent.
    ///
    /// When the visible rectangle is larger than the extent along an axis, it
    /// is centered on the extent along that axis instead.
    #[default]
    ContainView,
}

/// Viewport shape, which decides the default view and where focused regions
/// are placed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Orientation {
    /// Width at least as large as height; detail panel docks to the side.
    #[default]
    Landscape,
    /// Taller than wide; detail panel docks to the bottom.
    Portrait,
}

impl Orientation {
    /// Classifies a viewport size.
    #[must_use]
    pub fn of(width: f64, height: f64) -> Self {
        if height > width {
            Self::Portrait
        } else {
            Self::Landscape
        }
    }
}
