// Copyright 2025 the Tastemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use tracing::debug;

use crate::panel::PanelKind;

/// How the user closed an overlay. Every reason closes the same way.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DismissReason {
    /// The close control in the panel header.
    CloseControl,
    /// A click on the backdrop outside the panel.
    ClickOutside,
    /// The Escape key.
    Escape,
}

/// Tracks which overlay panel is open.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Overlays {
    open: Option<PanelKind>,
}

impl Overlays {
    /// Creates the state with nothing open.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the open panel.
    #[must_use]
    pub fn current(&self) -> Option<PanelKind> {
        self.open
    }

    /// Returns `true` if `kind` is open.
    #[must_use]
    pub fn is_open(&self, kind: PanelKind) -> bool {
        self.open == Some(kind)
    }

    /// Opens `kind`, replacing and returning any panel already open.
    pub fn open(&mut self, kind: PanelKind) -> Option<PanelKind> {
        self.open.replace(kind)
    }

    /// Closes the open panel and returns it.
    pub fn dismiss(&mut self, reason: DismissReason) -> Option<PanelKind> {
        let closed = self.open.take();
        if let Some(kind) = closed {
            debug!(panel = %kind, ?reason, "overlay dismissed");
        }
        closed
    }
}

#[cfg(test)]
mod tests {
    use super::{DismissReason, Overlays};
    use crate::panel::PanelKind;

    #[test]
    fn at_most_one_panel_is_open() {
        let mut overlays = Overlays::new();
        assert_eq!(overlays.open(PanelKind::Stats), None);
        assert_eq!(overlays.open(PanelKind::Calendar), Some(PanelKind::Stats));
        assert!(overlays.is_open(PanelKind::Calendar));
        assert!(!overlays.is_open(PanelKind::Stats));
    }

    #[test]
    fn every_reason_dismisses_uniformly() {
        for reason in [
            DismissReason::CloseControl,
            DismissReason::ClickOutside,
            DismissReason::Escape,
        ] {
            let mut overlays = Overlays::new();
            overlays.open(PanelKind::Detail);
            assert_eq!(overlays.dismiss(reason), Some(PanelKind::Detail));
            assert_eq!(overlays.current(), None);
            assert_eq!(overlays.dismiss(reason), None);
        }
    }
}
