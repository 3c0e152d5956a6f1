//! Box-plot figure rendering.
//!
//! Each figure is one landscape page: a framed plot area with major and
//! minor y ticks, one box per series at evenly spaced x positions, and a
//! title plus axis captions. Whiskers use a zero reach, so they sit on
//! the quartiles and every sample outside the box is drawn as a flier.

use crate::statistics::BoxSummary;

use super::pdf::{text_width, Canvas, Document};

/// Page size in points: 12 by 6 inches.
const PAGE_WIDTH: f32 = 864.0;
const PAGE_HEIGHT: f32 = 432.0;

const MARGIN_LEFT: f32 = 76.0;
const MARGIN_RIGHT: f32 = 20.0;
const MARGIN_TOP: f32 = 42.0;
const MARGIN_BOTTOM: f32 = 54.0;

const TITLE_SIZE: f32 = 14.0;
const LABEL_SIZE: f32 = 11.0;
const TICK_SIZE: f32 = 9.0;

const TICK_LEN: f32 = 4.0;
const MINOR_TICK_LEN: f32 = 2.0;
/// Minor tick subdivisions per major interval (three minors between two
/// majors).
const MINOR_DIVISIONS: usize = 4;
/// Whisker reach in interquartile ranges (zero: whiskers on the
/// quartiles).
const WHISKER_REACH: f64 = 0.0;
/// Deepest space reserved for rotated x labels before they get cut off.
const MAX_NAME_DEPTH: f32 = 150.0;

/// X-axis labelling of a figure.
pub enum TickLabels<'a> {
    /// Number the positions 1..n, matching the ids in the legend table.
    Position,
    /// One name per position, drawn rotated a quarter turn clockwise.
    Names(&'a [String]),
}

/// Static description of one chart.
pub struct Figure<'a> {
    /// Title across the top of the page.
    pub title: &'a str,
    /// Caption under the x axis.
    pub x_label: &'a str,
    /// Caption along the y axis.
    pub y_label: &'a str,
    /// Fixed upper y bound (the axis then starts at zero); autoscale
    /// from the data when `None`.
    pub y_limit: Option<f64>,
    /// Per-position x tick labelling.
    pub ticks: TickLabels<'a>,
}

/// Render one figure over `series` into single-page PDF bytes.
///
/// Series keep their position and x tick even when empty; only the box
/// is skipped.
pub fn render(figure: &Figure<'_>, series: &[Vec<f64>]) -> Vec<u8> {
    let mut canvas = Canvas::new();

    // Rotated names need extra room under the axis.
    let bottom = match &figure.ticks {
        TickLabels::Position => MARGIN_BOTTOM,
        TickLabels::Names(names) => {
            let deepest = names
                .iter()
                .map(|n| text_width(n, TICK_SIZE))
                .fold(0.0_f32, f32::max);
            MARGIN_BOTTOM + deepest.min(MAX_NAME_DEPTH)
        }
    };

    let plot_x = MARGIN_LEFT;
    let plot_y = bottom;
    let plot_w = PAGE_WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_h = PAGE_HEIGHT - bottom - MARGIN_TOP;

    let (y_min, y_max) = y_range(figure.y_limit, series);
    let y_of = |v: f64| plot_y + (((v - y_min) / (y_max - y_min)) as f32) * plot_h;

    // Frame.
    canvas.line_width(1.0).stroke_color(0.0, 0.0, 0.0);
    canvas.stroke_rect(plot_x, plot_y, plot_w, plot_h);

    // Major y ticks with labels, minors in between.
    let majors = ticks(y_min, y_max, 6);
    for &t in &majors {
        let y = y_of(t);
        canvas.line(plot_x - TICK_LEN, y, plot_x, y);
        let label = format_tick(t);
        canvas.text(
            plot_x - TICK_LEN - 3.0 - text_width(&label, TICK_SIZE),
            y - TICK_SIZE * 0.35,
            TICK_SIZE,
            &label,
        );
    }
    if let Some(step) = majors.windows(2).next().map(|w| w[1] - w[0]) {
        let minor = step / MINOR_DIVISIONS as f64;
        let mut base = majors[0] - step;
        while base < y_max {
            for k in 1..MINOR_DIVISIONS {
                let v = base + minor * k as f64;
                if v > y_min && v < y_max {
                    let y = y_of(v);
                    canvas.line(plot_x - MINOR_TICK_LEN, y, plot_x, y);
                }
            }
            base += step;
        }
    }

    // X ticks, one per series position.
    let spacing = plot_w / (series.len() as f32 + 1.0);
    for i in 0..series.len() {
        let x = plot_x + spacing * (i as f32 + 1.0);
        canvas.line(x, plot_y - TICK_LEN, x, plot_y);
        match &figure.ticks {
            TickLabels::Position => {
                let label = (i + 1).to_string();
                canvas.text(
                    x - text_width(&label, TICK_SIZE) / 2.0,
                    plot_y - TICK_LEN - TICK_SIZE,
                    TICK_SIZE,
                    &label,
                );
            }
            TickLabels::Names(names) => {
                if let Some(name) = names.get(i) {
                    canvas.text_down(
                        x + TICK_SIZE * 0.25,
                        plot_y - TICK_LEN - 3.0,
                        TICK_SIZE,
                        name,
                    );
                }
            }
        }
    }

    // Title and axis captions.
    canvas.text(
        plot_x + plot_w / 2.0 - text_width(figure.title, TITLE_SIZE) / 2.0,
        plot_y + plot_h + 12.0,
        TITLE_SIZE,
        figure.title,
    );
    canvas.text(
        plot_x + plot_w / 2.0 - text_width(figure.x_label, LABEL_SIZE) / 2.0,
        18.0,
        LABEL_SIZE,
        figure.x_label,
    );
    canvas.text_up(
        20.0,
        plot_y + plot_h / 2.0 - text_width(figure.y_label, LABEL_SIZE) / 2.0,
        LABEL_SIZE,
        figure.y_label,
    );

    // Boxes, clipped to the plot area so a fixed y limit cuts cleanly.
    canvas.push_clip(plot_x, plot_y, plot_w, plot_h);
    for (i, samples) in series.iter().enumerate() {
        let Some(summary) = BoxSummary::from_samples(samples, WHISKER_REACH) else {
            continue;
        };
        let x = plot_x + spacing * (i as f32 + 1.0);
        let half = spacing * 0.25;
        draw_box(&mut canvas, &summary, x, half, &y_of);
    }
    canvas.pop_clip();

    let mut doc = Document::new(PAGE_WIDTH, PAGE_HEIGHT);
    doc.add_page(canvas);
    doc.finish()
}

/// Draw one box with whiskers, median, and fliers at center `x`.
fn draw_box(
    canvas: &mut Canvas,
    summary: &BoxSummary,
    x: f32,
    half: f32,
    y_of: &impl Fn(f64) -> f32,
) {
    let q1 = y_of(summary.q1);
    let q3 = y_of(summary.q3);
    let low = y_of(summary.whisker_low);
    let high = y_of(summary.whisker_high);

    // Whisker stems and caps; with a zero reach these coincide with the
    // box edges.
    canvas.line_width(1.0).stroke_color(0.0, 0.0, 0.0);
    canvas.line(x, q1, x, low);
    canvas.line(x, q3, x, high);
    canvas.line(x - half / 2.0, low, x + half / 2.0, low);
    canvas.line(x - half / 2.0, high, x + half / 2.0, high);

    // Box and median.
    canvas.stroke_color(0.0, 0.0, 1.0);
    canvas.stroke_rect(x - half, q1, half * 2.0, q3 - q1);
    canvas.stroke_color(1.0, 0.0, 0.0);
    canvas.line(x - half, y_of(summary.median), x + half, y_of(summary.median));

    // Fliers.
    canvas.line_width(0.75).stroke_color(0.0, 0.0, 1.0);
    for &v in &summary.fliers {
        canvas.plus_marker(x, y_of(v), 2.5);
    }
}

/// Y range of a figure: a fixed limit spans from zero, otherwise the
/// data's extent padded by 5% (and a unit band around degenerate data).
fn y_range(limit: Option<f64>, series: &[Vec<f64>]) -> (f64, f64) {
    if let Some(limit) = limit {
        return (0.0, limit);
    }

    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for samples in series {
        for &v in samples {
            lo = lo.min(v);
            hi = hi.max(v);
        }
    }
    if !lo.is_finite() || !hi.is_finite() {
        return (0.0, 1.0);
    }
    if lo == hi {
        return (lo - 0.5, hi + 0.5);
    }
    let pad = (hi - lo) * 0.05;
    (lo - pad, hi + pad)
}

/// Evenly spaced tick values covering `[lo, hi]` at a 1/2/5 step sized
/// for roughly `target` intervals.
fn ticks(lo: f64, hi: f64, target: usize) -> Vec<f64> {
    let span = hi - lo;
    debug_assert!(span > 0.0, "tick range must not be empty");

    let raw = span / target as f64;
    let magnitude = 10.0_f64.powf(raw.log10().floor());
    let normalized = raw / magnitude;
    let step = if normalized <= 1.0 {
        1.0
    } else if normalized <= 2.0 {
        2.0
    } else if normalized <= 5.0 {
        5.0
    } else {
        10.0
    } * magnitude;

    let mut out = Vec::new();
    let mut t = (lo / step).ceil() * step;
    while t <= hi + step * 1e-9 {
        out.push(t);
        t += step;
    }
    out
}

/// Format a tick value: integers without a fraction, everything else
/// with two decimals.
fn format_tick(value: f64) -> String {
    if value == value.trunc() && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value:.2}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn ticks_pick_round_steps() {
        let t = ticks(0.0, 100.0, 6);
        assert_eq!(t.len(), 6);
        assert_close(t[0], 0.0);
        assert_close(t[1], 20.0);
        assert_close(t[5], 100.0);
    }

    #[test]
    fn ticks_cover_fractional_ranges() {
        let t = ticks(0.0, 1.0, 6);
        assert_close(t[0], 0.0);
        assert_close(t[1], 0.2);
        assert_eq!(t.len(), 6);
    }

    #[test]
    fn ticks_start_inside_the_range() {
        let t = ticks(13.0, 87.0, 6);
        assert!(t.first().copied().unwrap() >= 13.0);
        assert!(t.last().copied().unwrap() <= 87.0 + 1e-9);
        for w in t.windows(2) {
            assert_close(w[1] - w[0], 20.0);
        }
    }

    #[test]
    fn y_range_fixed_limit_starts_at_zero() {
        assert_eq!(y_range(Some(400.0), &[vec![900.0]]), (0.0, 400.0));
    }

    #[test]
    fn y_range_autoscale_pads_the_extent() {
        let (lo, hi) = y_range(None, &[vec![10.0, 20.0], vec![30.0]]);
        assert_close(lo, 9.0);
        assert_close(hi, 31.0);
    }

    #[test]
    fn y_range_of_no_samples_is_unit() {
        assert_eq!(y_range(None, &[vec![], vec![]]), (0.0, 1.0));
        assert_eq!(y_range(None, &[]), (0.0, 1.0));
    }

    #[test]
    fn y_range_of_constant_data_is_widened() {
        assert_eq!(y_range(None, &[vec![5.0, 5.0]]), (4.5, 5.5));
    }

    #[test]
    fn format_tick_drops_trailing_zeroes() {
        assert_eq!(format_tick(20.0), "20");
        assert_eq!(format_tick(-5.0), "-5");
        assert_eq!(format_tick(0.25), "0.25");
    }

    #[test]
    fn renders_positioned_figure() {
        let figure = Figure {
            title: "Duration of Events",
            x_label: "Event ID (see legend)",
            y_label: "Time (msec)",
            y_limit: None,
            ticks: TickLabels::Position,
        };
        let series = vec![vec![1.0, 2.0, 3.0, 9.0], vec![4.0, 5.0]];
        let bytes = render(&figure, &series);
        assert!(bytes.starts_with(b"%PDF-"));
        assert!(bytes.len() > 500);
    }

    #[test]
    fn renders_named_figure_with_limit() {
        let names = vec!["responseStart".to_owned(), "domComplete".to_owned()];
        let figure = Figure {
            title: "Navigation Timing API",
            x_label: "Event",
            y_label: "Time (msec)",
            y_limit: Some(500.0),
            ticks: TickLabels::Names(&names),
        };
        let series = vec![vec![80.0, 90.0], vec![700.0, 900.0]];
        let bytes = render(&figure, &series);
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn renders_empty_series_without_boxes() {
        let figure = Figure {
            title: "Beginning of Events",
            x_label: "Event ID (see legend)",
            y_label: "Time (msec)",
            y_limit: None,
            ticks: TickLabels::Position,
        };
        let bytes = render(&figure, &[Vec::new(), Vec::new()]);
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn renders_figure_with_no_series_at_all() {
        let figure = Figure {
            title: "End of Events",
            x_label: "Event ID (see legend)",
            y_label: "Time (msec)",
            y_limit: None,
            ticks: TickLabels::Position,
        };
        let bytes = render(&figure, &[]);
        assert!(bytes.starts_with(b"%PDF-"));
    }
}
