//! Render sink abstraction
//!
//! The simulation never touches pixels. Each frame the scene module emits an
//! ordered list of draw primitives in viewport coordinates; a frontend drains
//! them into whatever surface it owns. Sinks must not fail.

use glam::Vec2;

use crate::sim::Rect;

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color(pub u8, pub u8, pub u8);

pub const WHITE: Color = Color(255, 255, 255);
pub const BLACK: Color = Color(0, 0, 0);
pub const SKY_BLUE: Color = Color(92, 148, 252);
pub const GOLD: Color = Color(255, 215, 0);
pub const LAVA_RED: Color = Color(200, 0, 0);
pub const PIPE_GREEN: Color = Color(0, 200, 0);

/// Text sizes the sink is expected to support
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSize {
    Small,
    Medium,
    Large,
}

/// A single draw primitive, in viewport pixel coordinates
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    FillRect { rect: Rect, color: Color },
    /// 1px outline
    StrokeRect { rect: Rect, color: Color },
    FillEllipse { rect: Rect, color: Color },
    FillCircle { center: Vec2, radius: f32, color: Color },
    Text {
        text: String,
        /// Top-left anchor, or the horizontal center when `centered`
        pos: Vec2,
        size: TextSize,
        color: Color,
        centered: bool,
    },
}

/// Accepts ordered draw calls for one frame; infallible by contract
pub trait RenderSink {
    fn submit(&mut self, cmd: DrawCmd);
}

/// Sink that records commands in submission order (tests, headless runs)
#[derive(Debug, Default)]
pub struct FrameRecorder {
    pub cmds: Vec<DrawCmd>,
}

impl FrameRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.cmds.clear();
    }

    pub fn len(&self) -> usize {
        self.cmds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty()
    }

    /// All text commands, for HUD assertions
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.cmds.iter().filter_map(|c| match c {
            DrawCmd::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl RenderSink for FrameRecorder {
    fn submit(&mut self, cmd: DrawCmd) {
        self.cmds.push(cmd);
    }
}
