// Copyright 2025 the Tastemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! SVG output for the map.
//!
//! The document is one `<path>` per region inside a single `<g>` carrying the
//! zoom transform. Paths keep their fitted screen coordinates; only the group
//! transform changes while panning and zooming, and the stroke width is
//! divided by the zoom so borders keep a constant on-screen width.

use core::fmt::Write as _;

use kurbo::{BezPath, PathEl};
use peniko::Color;
use tastemap_data::Dataset;
use tastemap_geo::MapGeometry;
use tastemap_view2d::ZoomTransform;

use crate::markup::{escape_html, region_classes};

/// Colors and widths of the map.
#[derive(Clone, Debug, PartialEq)]
pub struct MapStyle {
    /// Background behind the land.
    pub ocean: Color,
    /// Regions with no visit.
    pub land: Color,
    /// Regions with at least one visit.
    pub visited: Color,
    /// The selected region.
    pub active: Color,
    /// Region borders.
    pub border: Color,
    /// Border width in screen pixels at any zoom.
    pub border_width: f64,
}

impl Default for MapStyle {
    fn default() -> Self {
        Self {
            ocean: Color::from_rgb8(0xdb, 0xea, 0xfe),
            land: Color::from_rgb8(0xe5, 0xe7, 0xeb),
            visited: Color::from_rgb8(0xf9, 0x73, 0x16),
            active: Color::from_rgb8(0xdc, 0x26, 0x26),
            border: Color::from_rgb8(0xff, 0xff, 0xff),
            border_width: 0.5,
        }
    }
}

impl MapStyle {
    fn fill(&self, visited: bool, active: bool) -> Color {
        if active {
            self.active
        } else if visited {
            self.visited
        } else {
            self.land
        }
    }
}

/// Renders the map as a standalone SVG document.
///
/// `geometry` must have been built from `dataset`'s regions in iteration
/// order. `active` is the index of the selected region; it is drawn last so
/// its border sits on top of its neighbors.
#[must_use]
pub fn render_map_svg(
    geometry: &MapGeometry,
    dataset: &Dataset,
    active: Option<usize>,
    transform: ZoomTransform,
    style: &MapStyle,
) -> String {
    let width = fmt_num(geometry.width());
    let height = fmt_num(geometry.height());
    let (border, border_alpha) = color_to_svg(style.border);

    let mut svg = String::new();
    let _ = writeln!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" class=\"map\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">"
    );
    let _ = write!(
        svg,
        "<rect class=\"ocean\" width=\"{width}\" height=\"{height}\"{}/>",
        fill_attrs(style.ocean)
    );
    let _ = write!(
        svg,
        "<g class=\"regions\" transform=\"{transform}\" stroke=\"{border}\" stroke-width=\"{}\"",
        fmt_num(style.border_width / transform.k)
    );
    if border_alpha < 1.0 {
        let _ = write!(svg, " stroke-opacity=\"{}\"", fmt_num(f64::from(border_alpha)));
    }
    svg.push('>');

    if let Some(regions) = dataset.regions() {
        let order = (0..regions.len())
            .filter(|i| Some(*i) != active)
            .chain(active.filter(|i| *i < regions.len()));
        for index in order {
            let (Some(region), Some(path)) = (regions.at(index), geometry.path(index)) else {
                continue;
            };
            let visited = dataset.is_visited(region);
            let is_active = Some(index) == active;
            let _ = write!(
                svg,
                "<path class=\"{}\" data-code=\"{}\"{} d=\"{}\"><title>{}</title></path>",
                region_classes(visited, is_active),
                escape_html(region.code.as_str()),
                fill_attrs(style.fill(visited, is_active)),
                bez_path_to_svg_d(path),
                escape_html(&region.name),
            );
        }
    }

    svg.push_str("</g></svg>");
    svg
}

/// The placeholder shown while the map area is too small to fit the map, such
/// as before the host has laid it out.
#[must_use]
pub fn render_map_pending() -> String {
    "<div class=\"map-pending\" aria-busy=\"true\"></div>".to_owned()
}

/// The message shown in place of the map when no regions could be loaded.
#[must_use]
pub fn render_map_unavailable() -> String {
    "<div class=\"map-unavailable\" role=\"status\">\
     <p>The world map could not be loaded.</p>\
     <p>Your visits, statistics and calendar are still available.</p>\
     </div>"
        .to_owned()
}

fn fill_attrs(color: Color) -> String {
    let (hex, alpha) = color_to_svg(color);
    if alpha < 1.0 {
        format!(" fill=\"{hex}\" fill-opacity=\"{}\"", fmt_num(f64::from(alpha)))
    } else {
        format!(" fill=\"{hex}\"")
    }
}

fn color_to_svg(color: Color) -> (String, f32) {
    let rgba = color.to_rgba8();
    let a = f32::from(rgba.a) / 255.0;
    (format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b), a)
}

fn bez_path_to_svg_d(path: &BezPath) -> String {
    let mut d = String::new();
    for el in path.iter() {
        match el {
            PathEl::MoveTo(p) => {
                let _ = write!(d, "M{} {}", fmt_num(p.x), fmt_num(p.y));
            }
            PathEl::LineTo(p) => {
                let _ = write!(d, "L{} {}", fmt_num(p.x), fmt_num(p.y));
            }
            // Region outlines are polylines; a curve is written as a line to its end point.
            PathEl::QuadTo(_, p) | PathEl::CurveTo(_, _, p) => {
                let _ = write!(d, "L{} {}", fmt_num(p.x), fmt_num(p.y));
            }
            PathEl::ClosePath => d.push('Z'),
        }
    }
    d
}

/// Formats with at most two decimals and no trailing zeros.
fn fmt_num(v: f64) -> String {
    if !v.is_finite() {
        return format!("{v}");
    }
    let mut s = format!("{v:.2}");
    while s.contains('.') && s.ends_with('0') {
        s.pop();
    }
    if s.ends_with('.') {
        s.pop();
    }
    if s == "-0" {
        s.remove(0);
    }
    s
}
