// Copyright 2025 the Tastemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Small text helpers shared by every panel.

use tastemap_stats::parse_visit_date;

/// Escapes `& < > " '` so data can be placed in element text or a quoted
/// attribute.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Formats `2024-03-05` as `Mar 5, 2024`; any other text comes back as written.
///
/// The result is plain text and still needs [`escape_html`].
#[must_use]
pub fn format_visit_date(date: &str) -> String {
    match parse_visit_date(date) {
        Some(day) => day.format("%b %-d, %Y").to_string(),
        None => date.to_owned(),
    }
}

/// Builds the flag emoji for a two-letter code from regional indicator symbols.
///
/// Returns an empty string unless `code` is exactly two ASCII letters.
#[must_use]
pub fn flag_emoji(code: &str) -> String {
    let code = code.trim();
    if code.len() != 2 || !code.bytes().all(|b| b.is_ascii_alphabetic()) {
        return String::new();
    }
    code.bytes()
        .filter_map(|b| char::from_u32(0x1F1E6 + u32::from(b.to_ascii_uppercase() - b'A')))
        .collect()
}

/// The class list of a region's path.
#[must_use]
pub fn region_classes(visited: bool, active: bool) -> &'static str {
    match (visited, active) {
        (false, false) => "region",
        (true, false) => "region visited",
        (false, true) => "region active",
        (true, true) => "region visited active",
    }
}

/// Returns `url` if it is an absolute `http` or `https` link.
pub(crate) fn safe_link(url: &str) -> Option<&str> {
    let url = url.trim();
    let lower = url.to_ascii_lowercase();
    (lower.starts_with("https://") || lower.starts_with("http://")).then_some(url)
}

/// Formats a rating without a trailing `.0`.
pub(crate) fn format_rating(rating: f64) -> String {
    let text = format!("{rating:.1}");
    match text.strip_suffix(".0") {
        Some(whole) => whole.to_owned(),
        None => text,
    }
}
