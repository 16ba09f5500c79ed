//! Chart Rendering
//!
//! Stateless bar and donut chart painters over the [`Canvas`] trait.
//!
//! Each chart is split into a pure layout function (`bar_layout`,
//! `donut_layout`) and a painter that walks the layout. Painters never fail:
//! non-finite or negative values count as zero, and a series with nothing to
//! show paints a "No data available" placeholder.

mod bar;
mod canvas;
mod donut;

pub use bar::{
    bar_layout, draw_bar_chart, BarDatum, BarGeometry, BarLayout, BarStyle, BAR_PITCH,
    BAR_RADIUS, MIN_BAR_WIDTH,
};
pub use canvas::{
    Canvas, ColorStop, Composite, DrawCommand, LinearGradient, Paint, RecordingCanvas, TextAlign,
};
pub use donut::{
    donut_layout, draw_donut_chart, DonutLayout, DonutSegment, SegmentArc, DONUT_CAPTION,
    INNER_RADIUS_RATIO, START_ANGLE,
};

/// Margin between the plot area and the surface edge
pub const PADDING: f64 = 32.0;

/// Text painted when a series has nothing to show
pub const PLACEHOLDER_TEXT: &str = "No data available";

const PLACEHOLDER_COLOR: &str = "#9ca3af";
const PLACEHOLDER_FONT: &str = "16px Inter";
const VALUE_COLOR: &str = "#1f2937";
const LABEL_COLOR: &str = "#6b7280";

/// Coerce a raw series value: non-finite and negative become zero
pub fn sanitize(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

fn draw_placeholder(canvas: &mut dyn Canvas, x: f64, y: f64) {
    canvas.set_fill_style(Paint::color(PLACEHOLDER_COLOR));
    canvas.set_font(PLACEHOLDER_FONT);
    canvas.fill_text(PLACEHOLDER_TEXT, x, y);
}
