//! # Rendering
//!
//! Server-side HTML for the dashboard page and SVG for the radar chart.
//! Output is plain strings; no template engine and no client-side script.

pub mod page;
pub mod svg;

pub use page::{DashboardView, Notice, dashboard, error_page};
pub use svg::radar_svg;

/// Escape text for HTML element content and double-quoted attributes.
pub fn escape(text: &str) -> String {
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
