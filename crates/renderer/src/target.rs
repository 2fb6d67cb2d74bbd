//! Drawing surface abstraction.
//!
//! Layers never touch a canvas directly. They call [`RenderTarget`], which is
//! implemented by [`CommandRecorder`] (an inspectable command list) and by
//! [`crate::raster::RasterTarget`] (pixels).

use serde::{Deserialize, Serialize};

use crate::gradient::Color;
use crate::projection::ScreenPoint;

/// Horizontal alignment of text relative to its anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

/// One drawing primitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    FillRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Color,
    },
    Line {
        from: ScreenPoint,
        to: ScreenPoint,
        width: f32,
        color: Color,
    },
    FillPolygon {
        points: Vec<ScreenPoint>,
        color: Color,
    },
    /// `at` is the baseline point; `anchor` picks which end of the text sits on it.
    Text {
        text: String,
        at: ScreenPoint,
        size: f32,
        color: Color,
        anchor: TextAnchor,
    },
}

/// Sink for drawing primitives.
pub trait RenderTarget {
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color);

    fn draw_line(&mut self, from: ScreenPoint, to: ScreenPoint, width: f32, color: Color);

    fn fill_polygon(&mut self, points: &[ScreenPoint], color: Color);

    fn draw_text(&mut self, text: &str, at: ScreenPoint, size: f32, color: Color, anchor: TextAnchor);

    /// Execute a recorded command.
    fn execute(&mut self, command: &DrawCommand) {
        match command {
            DrawCommand::FillRect {
                x,
                y,
                width,
                height,
                color,
            } => self.fill_rect(*x, *y, *width, *height, *color),
            DrawCommand::Line {
                from,
                to,
                width,
                color,
            } => self.draw_line(*from, *to, *width, *color),
            DrawCommand::FillPolygon { points, color } => self.fill_polygon(points, *color),
            DrawCommand::Text {
                text,
                at,
                size,
                color,
                anchor,
            } => self.draw_text(text, *at, *size, *color, *anchor),
        }
    }
}

/// Replay a command list onto another target.
pub fn replay(commands: &[DrawCommand], target: &mut dyn RenderTarget) {
    for command in commands {
        target.execute(command);
    }
}

/// Records every primitive in call order.
#[derive(Debug, Clone, Default)]
pub struct CommandRecorder {
    commands: Vec<DrawCommand>,
}

impl CommandRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<DrawCommand> {
        self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Serialize the command list as pretty JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.commands)
    }
}

impl RenderTarget for CommandRecorder {
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color) {
        self.commands.push(DrawCommand::FillRect {
            x,
            y,
            width,
            height,
            color,
        });
    }

    fn draw_line(&mut self, from: ScreenPoint, to: ScreenPoint, width: f32, color: Color) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            width,
            color,
        });
    }

    fn fill_polygon(&mut self, points: &[ScreenPoint], color: Color) {
        self.commands.push(DrawCommand::FillPolygon {
            points: points.to_vec(),
            color,
        });
    }

    fn draw_text(&mut self, text: &str, at: ScreenPoint, size: f32, color: Color, anchor: TextAnchor) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            at,
            size,
            color,
            anchor,
        });
    }

    fn execute(&mut self, command: &DrawCommand) {
        self.commands.push(command.clone());
    }
}
