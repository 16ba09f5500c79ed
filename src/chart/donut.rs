//! Donut Chart
//!
//! Proportional ring segments, clockwise from 12 o'clock, with a caption
//! in the hole.

use std::f64::consts::{FRAC_PI_2, TAU};

use super::canvas::{Canvas, Composite, LinearGradient, Paint, TextAlign};
use super::{draw_placeholder, sanitize, PLACEHOLDER_FONT};

/// Caption centered in the ring
pub const DONUT_CAPTION: &str = "Stock Health";

/// Inner hole radius as a fraction of the outer radius
pub const INNER_RADIUS_RATIO: f64 = 0.55;

/// Gap between the ring and the surface edge
const RING_MARGIN: f64 = 20.0;

/// Angle of the first segment's leading edge
pub const START_ANGLE: f64 = -FRAC_PI_2;

const CAPTION_COLOR: &str = "#111827";

/// One donut input segment
#[derive(Debug, Clone, PartialEq)]
pub struct DonutSegment {
    pub value: f64,
    pub color_start: String,
    pub color_end: String,
}

impl DonutSegment {
    pub fn new(value: f64, color_start: &str, color_end: &str) -> Self {
        Self {
            value,
            color_start: color_start.to_string(),
            color_end: color_end.to_string(),
        }
    }
}

/// Angular span assigned to one segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentArc {
    pub value: f64,
    pub start_angle: f64,
    pub end_angle: f64,
}

impl SegmentArc {
    pub fn span(&self) -> f64 {
        self.end_angle - self.start_angle
    }
}

/// Computed donut layout
#[derive(Debug, Clone, PartialEq)]
pub struct DonutLayout {
    pub center_x: f64,
    pub center_y: f64,
    pub radius: f64,
    pub inner_radius: f64,
    pub total: f64,
    /// One arc per input segment, in input order
    pub arcs: Vec<SegmentArc>,
}

/// Lay out a donut for a `width` x `height` surface.
///
/// Returns `None` when the series is empty or sums to zero. The last arc
/// ends exactly one full turn after [`START_ANGLE`].
pub fn donut_layout(width: f64, height: f64, segments: &[DonutSegment]) -> Option<DonutLayout> {
    let values: Vec<f64> = segments.iter().map(|s| sanitize(s.value)).collect();
    let total: f64 = values.iter().sum();
    if total <= 0.0 {
        return None;
    }

    let radius = (width.min(height) / 2.0 - RING_MARGIN).max(0.0);
    let last = values.len() - 1;
    let mut start_angle = START_ANGLE;

    let arcs = values
        .iter()
        .enumerate()
        .map(|(index, &value)| {
            let end_angle = if index == last {
                START_ANGLE + TAU
            } else {
                start_angle + value / total * TAU
            };
            let arc = SegmentArc {
                value,
                start_angle,
                end_angle,
            };
            start_angle = end_angle;
            arc
        })
        .collect();

    Some(DonutLayout {
        center_x: width / 2.0,
        center_y: height / 2.0,
        radius,
        inner_radius: radius * INNER_RADIUS_RATIO,
        total,
        arcs,
    })
}

/// Paint a donut chart filling the canvas
pub fn draw_donut_chart(canvas: &mut dyn Canvas, segments: &[DonutSegment]) {
    let width = canvas.width();
    let height = canvas.height();
    canvas.clear_rect(0.0, 0.0, width, height);

    let Some(layout) = donut_layout(width, height, segments) else {
        draw_placeholder(canvas, width / 2.0 - 60.0, height / 2.0);
        return;
    };

    let (cx, cy, r) = (layout.center_x, layout.center_y, layout.radius);

    for (segment, arc) in segments.iter().zip(&layout.arcs) {
        canvas.begin_path();
        canvas.move_to(cx, cy);
        canvas.arc(cx, cy, r, arc.start_angle, arc.end_angle);
        canvas.close_path();
        canvas.set_fill_style(Paint::Linear(LinearGradient::two_stop(
            cx,
            cy - r,
            cx,
            cy + r,
            &segment.color_start,
            &segment.color_end,
        )));
        canvas.fill();
    }

    canvas.set_composite(Composite::DestinationOut);
    canvas.begin_path();
    canvas.arc(cx, cy, layout.inner_radius, 0.0, TAU);
    canvas.fill();
    canvas.set_composite(Composite::SourceOver);

    canvas.set_fill_style(Paint::color(CAPTION_COLOR));
    canvas.set_font(PLACEHOLDER_FONT);
    canvas.set_text_align(TextAlign::Center);
    canvas.fill_text(DONUT_CAPTION, cx, cy + 6.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::canvas::{DrawCommand, RecordingCanvas};
    use crate::chart::PLACEHOLDER_TEXT;

    fn segments(values: &[f64]) -> Vec<DonutSegment> {
        values
            .iter()
            .map(|v| DonutSegment::new(*v, "#f97316", "#facc15"))
            .collect()
    }

    #[test]
    fn test_spans_partition_full_circle() {
        let layout = donut_layout(300.0, 300.0, &segments(&[1.0, 1.0, 1.0, 7.0, 0.3])).unwrap();
        let total_span: f64 = layout.arcs.iter().map(SegmentArc::span).sum();

        assert!((total_span - TAU).abs() < 1e-12);
        assert_eq!(layout.arcs.last().unwrap().end_angle, START_ANGLE + TAU);
        assert_eq!(layout.arcs[0].start_angle, START_ANGLE);
        for pair in layout.arcs.windows(2) {
            assert_eq!(pair[0].end_angle, pair[1].start_angle);
        }
    }

    #[test]
    fn test_spans_follow_input_order() {
        let layout = donut_layout(300.0, 200.0, &segments(&[3.0, 1.0, 0.0, 4.0])).unwrap();
        let spans: Vec<f64> = layout.arcs.iter().map(SegmentArc::span).collect();

        assert!((spans[0] - TAU * 3.0 / 8.0).abs() < 1e-12);
        assert!((spans[1] - TAU / 8.0).abs() < 1e-12);
        assert_eq!(spans[2], 0.0);
        assert!((spans[3] - TAU / 2.0).abs() < 1e-12);
        assert_eq!(layout.total, 8.0);
    }

    #[test]
    fn test_geometry() {
        let layout = donut_layout(300.0, 200.0, &segments(&[1.0])).unwrap();
        assert_eq!(layout.center_x, 150.0);
        assert_eq!(layout.center_y, 100.0);
        assert_eq!(layout.radius, 80.0);
        assert!((layout.inner_radius - 44.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_and_zero_series_have_no_layout() {
        assert!(donut_layout(300.0, 300.0, &[]).is_none());
        assert!(donut_layout(300.0, 300.0, &segments(&[0.0, 0.0, 0.0])).is_none());
        assert!(donut_layout(300.0, 300.0, &segments(&[f64::NAN, -2.0])).is_none());
    }

    #[test]
    fn test_placeholder_drawn_without_arcs() {
        let mut canvas = RecordingCanvas::new(300.0, 300.0);
        draw_donut_chart(&mut canvas, &segments(&[0.0, 0.0]));

        assert_eq!(canvas.texts(), vec![PLACEHOLDER_TEXT]);
        assert!(!canvas
            .commands()
            .iter()
            .any(|c| matches!(c, DrawCommand::Arc { .. })));
    }

    #[test]
    fn test_ring_cut_out_and_caption() {
        let mut canvas = RecordingCanvas::new(300.0, 300.0);
        draw_donut_chart(&mut canvas, &segments(&[2.0, 5.0, 3.0]));

        let commands = canvas.commands();
        let cut = commands
            .iter()
            .position(|c| *c == DrawCommand::SetComposite { composite: Composite::DestinationOut })
            .unwrap();
        let segment_fills = commands[..cut]
            .iter()
            .filter(|c| matches!(c, DrawCommand::Fill))
            .count();

        assert_eq!(segment_fills, 3);
        assert!(matches!(
            commands[cut + 2],
            DrawCommand::Arc { radius, .. } if (radius - 130.0 * INNER_RADIUS_RATIO).abs() < 1e-9
        ));
        assert_eq!(canvas.texts(), vec![DONUT_CAPTION]);
    }
}
