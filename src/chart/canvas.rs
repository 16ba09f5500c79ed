//! Drawing Surface
//!
//! The immediate-mode 2D surface the chart renderers paint onto, and a
//! recording implementation that captures the calls as data.

use serde::Serialize;

/// A gradient color stop
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorStop {
    pub offset: f64,
    pub color: String,
}

/// Linear gradient between two points
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinearGradient {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
    pub stops: Vec<ColorStop>,
}

impl LinearGradient {
    /// Two-stop gradient from `start` at offset 0 to `end` at offset 1
    pub fn two_stop(x0: f64, y0: f64, x1: f64, y1: f64, start: &str, end: &str) -> Self {
        Self {
            x0,
            y0,
            x1,
            y1,
            stops: vec![
                ColorStop { offset: 0.0, color: start.to_string() },
                ColorStop { offset: 1.0, color: end.to_string() },
            ],
        }
    }
}

/// Fill style
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Paint {
    Color { color: String },
    Linear(LinearGradient),
}

impl Paint {
    pub fn color(color: &str) -> Self {
        Paint::Color { color: color.to_string() }
    }
}

/// Horizontal text anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TextAlign {
    #[default]
    Start,
    Center,
}

/// Compositing mode for subsequent fills
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Composite {
    #[default]
    SourceOver,
    /// Fills erase what is underneath
    DestinationOut,
}

/// 2D immediate-mode drawing surface.
///
/// Mirrors the subset of an HTML canvas context the charts use. Calls are
/// infallible: a surface that cannot draw simply ignores them.
pub trait Canvas {
    /// Surface width in pixels
    fn width(&self) -> f64;

    /// Surface height in pixels
    fn height(&self) -> f64;

    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64);
    fn set_fill_style(&mut self, paint: Paint);
    fn set_font(&mut self, font: &str);
    fn set_text_align(&mut self, align: TextAlign);
    fn set_composite(&mut self, op: Composite);

    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn arc(&mut self, x: f64, y: f64, radius: f64, start_angle: f64, end_angle: f64);
    fn round_rect(&mut self, x: f64, y: f64, w: f64, h: f64, radius: f64);
    fn close_path(&mut self);
    fn fill(&mut self);

    fn fill_text(&mut self, text: &str, x: f64, y: f64);

    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, x: f64, y: f64);
    fn rotate(&mut self, angle: f64);
}

/// One recorded canvas call
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "op")]
pub enum DrawCommand {
    ClearRect { x: f64, y: f64, w: f64, h: f64 },
    SetFillStyle { paint: Paint },
    SetFont { font: String },
    SetTextAlign { align: TextAlign },
    SetComposite { composite: Composite },
    BeginPath,
    MoveTo { x: f64, y: f64 },
    Arc { x: f64, y: f64, radius: f64, start_angle: f64, end_angle: f64 },
    RoundRect { x: f64, y: f64, w: f64, h: f64, radius: f64 },
    ClosePath,
    Fill,
    FillText { text: String, x: f64, y: f64 },
    Save,
    Restore,
    Translate { x: f64, y: f64 },
    Rotate { angle: f64 },
}

/// A [`Canvas`] that records every call.
///
/// Clearing the whole surface discards the commands recorded so far, so
/// `commands()` always describes what is currently on the surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordingCanvas {
    width: f64,
    height: f64,
    commands: Vec<DrawCommand>,
}

impl RecordingCanvas {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    /// Commands painted since the last full clear
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Text strings painted, in order
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::FillText { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Number of `fill` calls
    pub fn fill_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Fill))
            .count()
    }

    /// Resize the surface, erasing it like a canvas element does
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
        self.commands.clear();
    }

    fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }
}

impl Canvas for RecordingCanvas {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        if x <= 0.0 && y <= 0.0 && x + w >= self.width && y + h >= self.height {
            self.commands.clear();
        }
        self.push(DrawCommand::ClearRect { x, y, w, h });
    }

    fn set_fill_style(&mut self, paint: Paint) {
        self.push(DrawCommand::SetFillStyle { paint });
    }

    fn set_font(&mut self, font: &str) {
        self.push(DrawCommand::SetFont { font: font.to_string() });
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.push(DrawCommand::SetTextAlign { align });
    }

    fn set_composite(&mut self, composite: Composite) {
        self.push(DrawCommand::SetComposite { composite });
    }

    fn begin_path(&mut self) {
        self.push(DrawCommand::BeginPath);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.push(DrawCommand::MoveTo { x, y });
    }

    fn arc(&mut self, x: f64, y: f64, radius: f64, start_angle: f64, end_angle: f64) {
        self.push(DrawCommand::Arc { x, y, radius, start_angle, end_angle });
    }

    fn round_rect(&mut self, x: f64, y: f64, w: f64, h: f64, radius: f64) {
        self.push(DrawCommand::RoundRect { x, y, w, h, radius });
    }

    fn close_path(&mut self) {
        self.push(DrawCommand::ClosePath);
    }

    fn fill(&mut self) {
        self.push(DrawCommand::Fill);
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        self.push(DrawCommand::FillText { text: text.to_string(), x, y });
    }

    fn save(&mut self) {
        self.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        self.push(DrawCommand::Restore);
    }

    fn translate(&mut self, x: f64, y: f64) {
        self.push(DrawCommand::Translate { x, y });
    }

    fn rotate(&mut self, angle: f64) {
        self.push(DrawCommand::Rotate { angle });
    }
}
