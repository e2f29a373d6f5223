//! Surface that records every call, for tests.

use glam::Vec2;

use super::traits::{Rgba, Surface};

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    ClearRect(Vec2, Vec2),
    Save,
    Restore,
    Translate(Vec2),
    Rotate(f32),
    BeginPath,
    MoveTo(Vec2),
    LineTo(Vec2),
    Arc { center: Vec2, radius: f32 },
    Ellipse { center: Vec2, radii: Vec2, rotation: f32 },
    ClosePath,
    Fill(Rgba),
    Stroke { color: Rgba, width: f32 },
}

#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub calls: Vec<DrawCall>,
    fill: Rgba,
    stroke: Rgba,
    width: f32,
    depth: usize,
    max_depth: usize,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self {
            width: 1.0,
            ..Self::default()
        }
    }

    pub fn count(&self, pred: impl Fn(&DrawCall) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }

    pub fn strokes(&self) -> Vec<(Rgba, f32)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Stroke { color, width } => Some((*color, *width)),
                _ => None,
            })
            .collect()
    }

    /// Current save/restore nesting depth.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}

impl Surface for RecordingSurface {
    fn clear_rect(&mut self, origin: Vec2, size: Vec2) {
        self.calls.push(DrawCall::ClearRect(origin, size));
    }

    fn save(&mut self) {
        self.depth += 1;
        self.max_depth = self.max_depth.max(self.depth);
        self.calls.push(DrawCall::Save);
    }

    fn restore(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.calls.push(DrawCall::Restore);
    }

    fn translate(&mut self, offset: Vec2) {
        self.calls.push(DrawCall::Translate(offset));
    }

    fn rotate(&mut self, angle: f32) {
        self.calls.push(DrawCall::Rotate(angle));
    }

    fn begin_path(&mut self) {
        self.calls.push(DrawCall::BeginPath);
    }

    fn move_to(&mut self, p: Vec2) {
        self.calls.push(DrawCall::MoveTo(p));
    }

    fn line_to(&mut self, p: Vec2) {
        self.calls.push(DrawCall::LineTo(p));
    }

    fn arc(&mut self, center: Vec2, radius: f32, _start: f32, _end: f32) {
        self.calls.push(DrawCall::Arc { center, radius });
    }

    fn ellipse(&mut self, center: Vec2, radii: Vec2, rotation: f32) {
        self.calls.push(DrawCall::Ellipse { center, radii, rotation });
    }

    fn close_path(&mut self) {
        self.calls.push(DrawCall::ClosePath);
    }

    fn set_fill(&mut self, color: Rgba) {
        self.fill = color;
    }

    fn set_stroke(&mut self, color: Rgba) {
        self.stroke = color;
    }

    fn set_line_width(&mut self, width: f32) {
        self.width = width;
    }

    fn fill(&mut self) {
        self.calls.push(DrawCall::Fill(self.fill));
    }

    fn stroke(&mut self) {
        self.calls.push(DrawCall::Stroke {
            color: self.stroke,
            width: self.width,
        });
    }
}
