//! Drawing surface contract.
//!
//! The scene renderer never talks to a concrete backend. It issues path-based
//! 2D commands against a [`Surface`], which the browser bridge implements over
//! `CanvasRenderingContext2d` and the `vectors` feature implements with lyon
//! tessellation. The primitive set mirrors the Canvas 2D API.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// RGBA colour, each component in 0.0 - 1.0.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create a colour from RGB u8 values (0-255) and a float alpha.
    pub fn rgb8(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a,
        }
    }

    /// Same colour with a different alpha.
    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Same colour with its alpha multiplied by `factor`.
    pub fn fade(self, factor: f32) -> Self {
        Self { a: self.a * factor, ..self }
    }

    /// CSS `rgba(...)` form, as accepted by canvas fill/stroke styles.
    pub fn to_css(self) -> String {
        format!(
            "rgba({}, {}, {}, {:.4})",
            (self.r.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.g.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.b.clamp(0.0, 1.0) * 255.0).round() as u8,
            self.a.clamp(0.0, 1.0),
        )
    }

    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);
}

impl Default for Rgba {
    fn default() -> Self {
        Self::TRANSPARENT
    }
}

/// Path-based 2D drawing target.
///
/// Transform calls (`translate`, `rotate`) compose onto the current
/// transform; `save`/`restore` push and pop it together with the fill and
/// stroke state. Points passed to path calls are in the current local space.
pub trait Surface {
    /// Clear an axis-aligned rectangle in surface space.
    fn clear_rect(&mut self, origin: Vec2, size: Vec2);

    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, offset: Vec2);
    fn rotate(&mut self, angle: f32);

    /// Discard the current path and start a new one.
    fn begin_path(&mut self);
    fn move_to(&mut self, p: Vec2);
    fn line_to(&mut self, p: Vec2);
    /// Circular arc from `start` to `end` radians (clockwise in y-down space).
    fn arc(&mut self, center: Vec2, radius: f32, start: f32, end: f32);
    /// Full ellipse with the given radii, rotated by `rotation` radians.
    fn ellipse(&mut self, center: Vec2, radii: Vec2, rotation: f32);
    fn close_path(&mut self);

    fn set_fill(&mut self, color: Rgba);
    fn set_stroke(&mut self, color: Rgba);
    fn set_line_width(&mut self, width: f32);

    /// Fill the current path with the current fill colour.
    fn fill(&mut self);
    /// Stroke the current path with the current stroke colour and width.
    fn stroke(&mut self);

    // ── Convenience helpers built on the primitives ─────────────────────

    /// Fill a full circle.
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        self.begin_path();
        self.arc(center, radius, 0.0, std::f32::consts::TAU);
        self.set_fill(color);
        self.fill();
    }

    /// Stroke a single straight segment.
    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba) {
        self.begin_path();
        self.move_to(from);
        self.line_to(to);
        self.set_line_width(width);
        self.set_stroke(color);
        self.stroke();
    }

    /// Stroke an open polyline. Fewer than two points draws nothing.
    fn stroke_polyline(&mut self, points: &[Vec2], width: f32, color: Rgba) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        if rest.is_empty() {
            return;
        }
        self.begin_path();
        self.move_to(*first);
        for p in rest {
            self.line_to(*p);
        }
        self.set_line_width(width);
        self.set_stroke(color);
        self.stroke();
    }
}
