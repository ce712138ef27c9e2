//! Radar chart as a standalone SVG document.
//!
//! Angular layout: the first axis points east (0°) and the rest follow
//! counter-clockwise at equal spacing, in taxonomy order.

#![allow(clippy::float_arithmetic)]

use super::escape;
use kicksfo_core::{Fill, RadarChart, Score};
use std::f64::consts::TAU;

const WIDTH: f64 = 760.0;
const HEIGHT: f64 = 600.0;
const CENTER_X: f64 = 340.0;
const CENTER_Y: f64 = 320.0;
const RADIUS: f64 = 200.0;
const LABEL_OFFSET: f64 = 24.0;

const BACKGROUND: &str = "#111111";
const GRID: &str = "#506784";
const FOREGROUND: &str = "#f2f5fa";
const FILL_OPACITY: &str = "0.5";

/// Trace colours, cycled when there are more athletes than entries.
const PALETTE: [&str; 10] = [
    "#636efa", "#EF553B", "#00cc96", "#ab63fa", "#FFA15A", "#19d3f3", "#FF6692", "#B6E880",
    "#FF97FF", "#FECB52",
];

/// Grid rings, as fractions of the radial range, labelled in percent.
const RINGS: [u8; 5] = [20, 40, 60, 80, 100];

/// Position of spoke `index` of `count` at `fraction` of the full radius.
fn point(index: usize, count: usize, fraction: f64) -> (f64, f64) {
    let angle = TAU * index as f64 / count.max(1) as f64;
    let r = RADIUS * fraction.clamp(0.0, 1.0);
    (CENTER_X + r * angle.cos(), CENTER_Y - r * angle.sin())
}

/// Map a score onto `0.0..=1.0` of the chart's radial range.
fn fraction(score: Score, range: [u8; 2]) -> f64 {
    let [lo, hi] = range;
    let span = f64::from(hi.saturating_sub(lo)).max(1.0);
    (score.percent() - f64::from(lo)) / span
}

/// Render a radar chart. An empty chart still draws its grid and labels.
pub fn radar_svg(chart: &RadarChart) -> String {
    let count = chart.axes.len();
    let mut svg = String::new();

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 {WIDTH} {HEIGHT}\" \
         width=\"{WIDTH}\" height=\"{HEIGHT}\" role=\"img\" aria-label=\"{}\" \
         font-family=\"sans-serif\">\n",
        escape(&chart.title)
    ));
    svg.push_str(&format!(
        "<rect width=\"100%\" height=\"100%\" fill=\"{BACKGROUND}\"/>\n"
    ));
    svg.push_str(&format!(
        "<text x=\"24\" y=\"40\" fill=\"{FOREGROUND}\" font-size=\"20\">{}</text>\n",
        escape(&chart.title)
    ));

    // Grid rings and their percentage labels along the first spoke.
    for ring in RINGS {
        let ring_fraction = f64::from(ring) / 100.0;
        svg.push_str(&format!(
            "<circle cx=\"{CENTER_X}\" cy=\"{CENTER_Y}\" r=\"{:.1}\" fill=\"none\" \
             stroke=\"{GRID}\" stroke-width=\"1\"/>\n",
            RADIUS * ring_fraction
        ));
        let [lo, hi] = chart.radial_range;
        let label = f64::from(lo) + f64::from(hi.saturating_sub(lo)) * ring_fraction;
        svg.push_str(&format!(
            "<text x=\"{:.1}\" y=\"{:.1}\" fill=\"{GRID}\" font-size=\"10\" \
             text-anchor=\"middle\">{label:.0}</text>\n",
            CENTER_X + RADIUS * ring_fraction,
            CENTER_Y + 14.0
        ));
    }

    // Spokes and axis labels.
    for (index, axis) in chart.axes.iter().enumerate() {
        let (x, y) = point(index, count, 1.0);
        svg.push_str(&format!(
            "<line x1=\"{CENTER_X}\" y1=\"{CENTER_Y}\" x2=\"{x:.1}\" y2=\"{y:.1}\" \
             stroke=\"{GRID}\" stroke-width=\"1\"/>\n"
        ));

        let angle = TAU * index as f64 / count.max(1) as f64;
        let anchor = if angle.cos() > 0.1 {
            "start"
        } else if angle.cos() < -0.1 {
            "end"
        } else {
            "middle"
        };
        let lx = CENTER_X + (RADIUS + LABEL_OFFSET) * angle.cos();
        let ly = CENTER_Y - (RADIUS + LABEL_OFFSET) * angle.sin() + 4.0;
        svg.push_str(&format!(
            "<text x=\"{lx:.1}\" y=\"{ly:.1}\" fill=\"{FOREGROUND}\" font-size=\"12\" \
             text-anchor=\"{anchor}\">{}</text>\n",
            escape(axis.as_str())
        ));
    }

    // One closed path per athlete, following the trace's own closure point.
    for (trace_index, trace) in chart.traces.iter().enumerate() {
        let colour = PALETTE[trace_index % PALETTE.len()];
        let mut path = String::new();
        for (i, score) in trace.r.iter().enumerate() {
            let (x, y) = point(i % count.max(1), count, fraction(*score, chart.radial_range));
            let op = if i == 0 { 'M' } else { 'L' };
            path.push_str(&format!("{op}{x:.1},{y:.1} "));
        }
        path.push('Z');

        let fill = match trace.fill {
            Fill::ToSelf => colour,
            Fill::None => "none",
        };
        svg.push_str(&format!(
            "<path class=\"trace\" data-athlete=\"{}\" d=\"{path}\" fill=\"{fill}\" \
             fill-opacity=\"{FILL_OPACITY}\" stroke=\"{colour}\" stroke-width=\"2\"/>\n",
            escape(&trace.name)
        ));

        // Legend entry.
        let ly = 70.0 + 22.0 * trace_index as f64;
        svg.push_str(&format!(
            "<rect x=\"{:.1}\" y=\"{:.1}\" width=\"14\" height=\"14\" fill=\"{colour}\"/>\n",
            WIDTH - 150.0,
            ly - 11.0
        ));
        svg.push_str(&format!(
            "<text x=\"{:.1}\" y=\"{ly:.1}\" fill=\"{FOREGROUND}\" font-size=\"13\">{}</text>\n",
            WIDTH - 128.0,
            escape(&trace.name)
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

#[cfg(test)]
mod tests {
    use super::*;
    use kicksfo_core::{Analysis, Taxonomy};

    #[test]
    fn first_spoke_points_east() {
        let (x, y) = point(0, 12, 1.0);
        assert!((x - (CENTER_X + RADIUS)).abs() < 1e-9);
        assert!((y - CENTER_Y).abs() < 1e-9);
    }

    #[test]
    fn fraction_scales_to_range() {
        assert!((fraction(Score::MAX, [0, 100]) - 1.0).abs() < 1e-9);
        assert!(fraction(Score::ZERO, [0, 100]).abs() < 1e-9);
    }

    #[test]
    fn svg_has_one_path_per_trace_and_every_axis_label() {
        let taxonomy = Taxonomy::standard();
        let analysis = Analysis::sample(taxonomy);
        let chart = analysis
            .radar(taxonomy, &analysis.athletes())
            .expect("chart");
        let svg = radar_svg(&chart);

        assert!(svg.starts_with("<svg"));
        assert_eq!(svg.matches("class=\"trace\"").count(), 3);
        for axis in taxonomy.axes() {
            assert!(svg.contains(axis.as_str()));
        }
        assert!(svg.contains("data-athlete=\"김선수\""));
    }

    #[test]
    fn empty_chart_draws_grid_only() {
        let chart = RadarChart::empty(Taxonomy::standard());
        let svg = radar_svg(&chart);
        assert_eq!(svg.matches("class=\"trace\"").count(), 0);
        assert_eq!(svg.matches("<circle").count(), RINGS.len());
    }

    #[test]
    fn names_are_escaped() {
        let mut chart = RadarChart::empty(Taxonomy::standard());
        chart.title = "<b>".to_string();
        let svg = radar_svg(&chart);
        assert!(svg.contains("&lt;b&gt;"));
        assert!(!svg.contains("<b>"));
    }
}
