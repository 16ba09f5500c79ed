//! Bar Chart
//!
//! Vertical bars with a top-down gradient, the value above each bar and a
//! rotated label underneath.

use std::f64::consts::FRAC_PI_4;

use super::canvas::{Canvas, LinearGradient, Paint, TextAlign};
use super::{draw_placeholder, sanitize, LABEL_COLOR, PADDING, VALUE_COLOR};

/// Narrowest bar ever drawn
pub const MIN_BAR_WIDTH: f64 = 32.0;

/// Horizontal pitch of one bar, as a multiple of its width
pub const BAR_PITCH: f64 = 1.5;

/// Corner radius of each bar
pub const BAR_RADIUS: f64 = 8.0;

const BAR_FONT: &str = "14px Inter";

/// One labeled value
#[derive(Debug, Clone, PartialEq)]
pub struct BarDatum {
    pub label: String,
    pub value: f64,
}

impl BarDatum {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// Gradient endpoints for the bars
#[derive(Debug, Clone, PartialEq)]
pub struct BarStyle {
    pub color_start: String,
    pub color_end: String,
}

impl Default for BarStyle {
    fn default() -> Self {
        Self {
            color_start: "#4b7bec".to_string(),
            color_end: "#3dc1d3".to_string(),
        }
    }
}

/// Geometry of a single bar
#[derive(Debug, Clone, PartialEq)]
pub struct BarGeometry {
    pub label: String,
    /// Sanitized value
    pub value: f64,
    /// Horizontal center
    pub center_x: f64,
    /// Top edge
    pub top: f64,
    pub height: f64,
}

/// Computed bar chart layout
#[derive(Debug, Clone, PartialEq)]
pub struct BarLayout {
    pub bar_width: f64,
    pub chart_height: f64,
    /// Value mapped to the full chart height
    pub max_value: f64,
    /// Y of the bars' bottom edge
    pub baseline: f64,
    pub bars: Vec<BarGeometry>,
}

/// Lay out bars for a `width` x `height` surface.
///
/// Returns `None` for an empty series. The largest value fills the whole
/// chart height; when every value is zero all bars are flat.
pub fn bar_layout(width: f64, height: f64, series: &[BarDatum]) -> Option<BarLayout> {
    if series.is_empty() {
        return None;
    }

    let chart_height = (height - PADDING * 2.0).max(0.0);
    let bar_width = ((width - PADDING * 2.0) / (series.len() as f64 * BAR_PITCH)).max(MIN_BAR_WIDTH);
    let baseline = height - PADDING;

    let values: Vec<f64> = series.iter().map(|d| sanitize(d.value)).collect();
    let max_value = values.iter().copied().fold(0.0_f64, f64::max);
    let max_value = if max_value > 0.0 { max_value } else { 1.0 };

    let bars = series
        .iter()
        .zip(values)
        .enumerate()
        .map(|(index, (datum, value))| {
            let bar_height = value / max_value * chart_height;
            BarGeometry {
                label: datum.label.clone(),
                value,
                center_x: PADDING + index as f64 * (bar_width * BAR_PITCH) + bar_width / 2.0,
                top: baseline - bar_height,
                height: bar_height,
            }
        })
        .collect();

    Some(BarLayout {
        bar_width,
        chart_height,
        max_value,
        baseline,
        bars,
    })
}

/// Paint a bar chart filling the canvas
pub fn draw_bar_chart(canvas: &mut dyn Canvas, series: &[BarDatum], style: &BarStyle) {
    let width = canvas.width();
    let height = canvas.height();
    canvas.clear_rect(0.0, 0.0, width, height);

    let Some(layout) = bar_layout(width, height, series) else {
        draw_placeholder(canvas, 16.0, height / 2.0);
        return;
    };

    canvas.set_font(BAR_FONT);
    canvas.set_text_align(TextAlign::Center);

    let half = layout.bar_width / 2.0;
    for bar in &layout.bars {
        canvas.set_fill_style(Paint::Linear(LinearGradient::two_stop(
            bar.center_x - half,
            bar.top,
            bar.center_x + half,
            layout.baseline,
            &style.color_start,
            &style.color_end,
        )));
        canvas.begin_path();
        canvas.round_rect(bar.center_x - half, bar.top, layout.bar_width, bar.height, BAR_RADIUS);
        canvas.fill();

        canvas.set_fill_style(Paint::color(VALUE_COLOR));
        canvas.fill_text(&bar.value.to_string(), bar.center_x, bar.top - 8.0);

        canvas.save();
        canvas.set_fill_style(Paint::color(LABEL_COLOR));
        canvas.translate(bar.center_x, layout.baseline + 14.0);
        canvas.rotate(-FRAC_PI_4);
        canvas.fill_text(&bar.label, 0.0, 0.0);
        canvas.restore();
    }
}
