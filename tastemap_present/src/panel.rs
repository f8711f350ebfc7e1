// Copyright 2025 the Tastemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;
use core::fmt::Write as _;

use crate::markup::escape_html;

/// The overlay panels. At most one is open at a time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PanelKind {
    /// Trips to one region.
    Detail,
    /// Coverage and ranking.
    Stats,
    /// Month calendar.
    Calendar,
}

impl PanelKind {
    /// Returns the lowercase name used in class names.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Detail => "detail",
            Self::Stats => "stats",
            Self::Calendar => "calendar",
        }
    }
}

impl fmt::Display for PanelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A panel's content, without the shared overlay chrome.
pub trait PanelView {
    /// Which panel this is.
    fn kind(&self) -> PanelKind;

    /// Plain-text title; escaped when rendered.
    fn title(&self) -> String;

    /// Appends the panel body as HTML.
    ///
    /// Implementations must escape every data-sourced string they write.
    fn write_body(&self, out: &mut String);
}

/// Wraps a panel body in the overlay chrome: backdrop, title and close control.
///
/// Hosts route clicks on `data-action="close"` to a close-control dismissal
/// and clicks on the backdrop (outside `.overlay-panel`) to a click-outside
/// dismissal.
#[must_use]
pub fn render_panel<P: PanelView + ?Sized>(panel: &P) -> String {
    let kind = panel.kind();
    let mut out = String::new();
    let _ = write!(
        out,
        "<div class=\"overlay overlay-{kind}\" data-action=\"dismiss\">\
         <section class=\"overlay-panel\" role=\"dialog\" aria-modal=\"true\" aria-labelledby=\"overlay-title\">\
         <header class=\"overlay-header\"><h2 id=\"overlay-title\">{}</h2>\
         <button type=\"button\" class=\"overlay-close\" data-action=\"close\" aria-label=\"Close\">&times;</button>\
         </header><div class=\"overlay-body\">",
        escape_html(&panel.title())
    );
    panel.write_body(&mut out);
    out.push_str("</div></section></div>");
    out
}

#[cfg(test)]
mod tests {
    use super::{PanelKind, PanelView, render_panel};

    struct Note(&'static str);

    impl PanelView for Note {
        fn kind(&self) -> PanelKind {
            PanelKind::Stats
        }

        fn title(&self) -> String {
            self.0.to_owned()
        }

        fn write_body(&self, out: &mut String) {
            out.push_str("<p>body</p>");
        }
    }

    #[test]
    fn wraps_body_in_chrome() {
        let html = render_panel(&Note("Fish & Chips"));
        assert!(html.starts_with("<div class=\"overlay overlay-stats\""));
        assert!(html.contains("<h2 id=\"overlay-title\">Fish &amp; Chips</h2>"));
        assert!(html.contains("data-action=\"close\""));
        assert!(html.contains("<div class=\"overlay-body\"><p>body</p></div>"));
    }

    #[test]
    fn works_through_trait_objects() {
        let panel: Box<dyn PanelView> = Box::new(Note("x"));
        assert!(render_panel(panel.as_ref()).contains("<p>body</p>"));
    }
}
