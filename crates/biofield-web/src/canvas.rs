use glam::Vec2;
use biofield::{Rgba, Surface};
use web_sys::CanvasRenderingContext2d;

/// [`Surface`] over a browser 2D canvas context.
///
/// The context only rejects transform and arc calls for non-finite
/// arguments; those results are dropped and the frame carries on.
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }
}

impl Surface for CanvasSurface {
    fn clear_rect(&mut self, origin: Vec2, size: Vec2) {
        self.ctx
            .clear_rect(origin.x as f64, origin.y as f64, size.x as f64, size.y as f64);
    }

    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn translate(&mut self, offset: Vec2) {
        let _ = self.ctx.translate(offset.x as f64, offset.y as f64);
    }

    fn rotate(&mut self, angle: f32) {
        let _ = self.ctx.rotate(angle as f64);
    }

    fn begin_path(&mut self) {
        self.ctx.begin_path();
    }

    fn move_to(&mut self, p: Vec2) {
        self.ctx.move_to(p.x as f64, p.y as f64);
    }

    fn line_to(&mut self, p: Vec2) {
        self.ctx.line_to(p.x as f64, p.y as f64);
    }

    fn arc(&mut self, center: Vec2, radius: f32, start: f32, end: f32) {
        let _ = self.ctx.arc(
            center.x as f64,
            center.y as f64,
            radius.max(0.0) as f64,
            start as f64,
            end as f64,
        );
    }

    fn ellipse(&mut self, center: Vec2, radii: Vec2, rotation: f32) {
        let _ = self.ctx.ellipse(
            center.x as f64,
            center.y as f64,
            radii.x.max(0.0) as f64,
            radii.y.max(0.0) as f64,
            rotation as f64,
            0.0,
            std::f64::consts::TAU,
        );
    }

    fn close_path(&mut self) {
        self.ctx.close_path();
    }

    fn set_fill(&mut self, color: Rgba) {
        self.ctx.set_fill_style_str(&color.to_css());
    }

    fn set_stroke(&mut self, color: Rgba) {
        self.ctx.set_stroke_style_str(&color.to_css());
    }

    fn set_line_width(&mut self, width: f32) {
        self.ctx.set_line_width(width as f64);
    }

    fn fill(&mut self) {
        self.ctx.fill();
    }

    fn stroke(&mut self) {
        self.ctx.stroke();
    }
}
