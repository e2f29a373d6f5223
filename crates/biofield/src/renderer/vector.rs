//! Lyon-based tessellating surface.
//!
//! Implements [`Surface`] on the CPU: path commands are flattened, run through
//! lyon's fill and stroke tessellators, and appended to a flat triangle-list
//! vertex buffer a GPU host can upload as-is.
//!
//! # Usage
//!
//! ```ignore
//! let mut surface = VectorSurface::new();
//! biofield::systems::render::draw(&scene, &config, &mut surface);
//! upload(surface.vertices());
//! ```

use bytemuck::{Pod, Zeroable};
use glam::{Affine2, Vec2};
use lyon::math::point;
use lyon::path::Path;
use lyon::tessellation::{
    BuffersBuilder, FillOptions, FillTessellator, FillVertex, FillVertexConstructor,
    StrokeOptions, StrokeTessellator, StrokeVertex, StrokeVertexConstructor, VertexBuffers,
};

use super::traits::{Rgba, Surface};

/// Per-vertex data for vector/polygon rendering.
/// 6 floats = 24 bytes per vertex.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct VectorVertex {
    pub x: f32,
    pub y: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl VectorVertex {
    /// Number of floats per vertex.
    pub const FLOATS: usize = 6;
    /// Stride in bytes.
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4; // 24

    fn at(x: f32, y: f32, color: Rgba) -> Self {
        Self { x, y, r: color.r, g: color.g, b: color.b, a: color.a }
    }
}

/// Vertex constructor for lyon fill tessellation.
struct FillVertexCtor {
    color: Rgba,
}

impl FillVertexConstructor<VectorVertex> for FillVertexCtor {
    fn new_vertex(&mut self, vertex: FillVertex) -> VectorVertex {
        VectorVertex::at(vertex.position().x, vertex.position().y, self.color)
    }
}

/// Vertex constructor for lyon stroke tessellation.
struct StrokeVertexCtor {
    color: Rgba,
}

impl StrokeVertexConstructor<VectorVertex> for StrokeVertexCtor {
    fn new_vertex(&mut self, vertex: StrokeVertex) -> VectorVertex {
        VectorVertex::at(vertex.position().x, vertex.position().y, self.color)
    }
}

/// Flattened subpath, already in surface space.
#[derive(Debug, Clone, Default)]
struct SubPath {
    points: Vec<Vec2>,
    closed: bool,
}

/// Transform and style saved by `save`.
#[derive(Debug, Clone, Copy)]
struct DrawState {
    transform: Affine2,
    fill: Rgba,
    stroke: Rgba,
    line_width: f32,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            transform: Affine2::IDENTITY,
            fill: Rgba::TRANSPARENT,
            stroke: Rgba::TRANSPARENT,
            line_width: 1.0,
        }
    }
}

/// Tessellating [`Surface`].
///
/// `clear_rect` drops everything drawn so far; a vertex buffer has no notion
/// of clearing a sub-rectangle.
pub struct VectorSurface {
    fill_tess: FillTessellator,
    stroke_tess: StrokeTessellator,
    geometry: VertexBuffers<VectorVertex, u32>,
    buffer: Vec<f32>,
    state: DrawState,
    stack: Vec<DrawState>,
    path: Vec<SubPath>,
}

impl VectorSurface {
    pub fn new() -> Self {
        Self {
            fill_tess: FillTessellator::new(),
            stroke_tess: StrokeTessellator::new(),
            geometry: VertexBuffers::new(),
            buffer: Vec::with_capacity(16384 * VectorVertex::FLOATS),
            state: DrawState::default(),
            stack: Vec::new(),
            path: Vec::new(),
        }
    }

    /// Number of vertices currently in the buffer.
    pub fn vertex_count(&self) -> usize {
        self.buffer.len() / VectorVertex::FLOATS
    }

    /// The triangle list as typed vertices.
    pub fn vertices(&self) -> &[VectorVertex] {
        bytemuck::cast_slice(&self.buffer)
    }

    fn to_surface(&self, p: Vec2) -> Vec2 {
        self.state.transform.transform_point2(p)
    }

    fn current_subpath(&mut self) -> &mut SubPath {
        if self.path.last().map_or(true, |s| s.closed) {
            self.path.push(SubPath::default());
        }
        let last = self.path.len() - 1;
        &mut self.path[last]
    }

    /// Build a lyon path from the subpaths with at least `min_points` points.
    fn build_path(&self, min_points: usize, force_close: bool) -> Option<Path> {
        let mut builder = Path::builder();
        let mut any = false;
        for sub in self.path.iter().filter(|s| s.points.len() >= min_points) {
            builder.begin(point(sub.points[0].x, sub.points[0].y));
            for p in &sub.points[1..] {
                builder.line_to(point(p.x, p.y));
            }
            builder.end(sub.closed || force_close);
            any = true;
        }
        any.then(|| builder.build())
    }

    /// Flush indexed geometry to the flat buffer as triangle list.
    fn flush_geometry(&mut self) {
        for idx in &self.geometry.indices {
            let v = &self.geometry.vertices[*idx as usize];
            self.buffer.extend_from_slice(&[v.x, v.y, v.r, v.g, v.b, v.a]);
        }
        self.geometry.vertices.clear();
        self.geometry.indices.clear();
    }

    /// Append flattened arc points to the current subpath.
    fn push_curve(&mut self, points: Vec<Vec2>) {
        let mapped: Vec<Vec2> = points.into_iter().map(|p| self.to_surface(p)).collect();
        self.current_subpath().points.extend(mapped);
    }
}

/// Segment count for a curve of the given sweep and radius.
fn segments(sweep: f32, radius: f32) -> usize {
    ((sweep.abs() * radius.max(0.0) / 2.0).ceil() as usize).clamp(8, 128)
}

impl Default for VectorSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for VectorSurface {
    fn clear_rect(&mut self, _origin: Vec2, _size: Vec2) {
        self.buffer.clear();
    }

    fn save(&mut self) {
        self.stack.push(self.state);
    }

    fn restore(&mut self) {
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
    }

    fn translate(&mut self, offset: Vec2) {
        self.state.transform = self.state.transform * Affine2::from_translation(offset);
    }

    fn rotate(&mut self, angle: f32) {
        self.state.transform = self.state.transform * Affine2::from_angle(angle);
    }

    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn move_to(&mut self, p: Vec2) {
        let p = self.to_surface(p);
        self.path.push(SubPath {
            points: vec![p],
            closed: false,
        });
    }

    fn line_to(&mut self, p: Vec2) {
        let p = self.to_surface(p);
        self.current_subpath().points.push(p);
    }

    fn arc(&mut self, center: Vec2, radius: f32, start: f32, end: f32) {
        if radius <= 0.0 {
            return;
        }
        let sweep = end - start;
        let n = segments(sweep, radius);
        let points = (0..=n)
            .map(|i| center + Vec2::from_angle(start + sweep * i as f32 / n as f32) * radius)
            .collect();
        self.push_curve(points);
    }

    fn ellipse(&mut self, center: Vec2, radii: Vec2, rotation: f32) {
        if radii.x <= 0.0 || radii.y <= 0.0 {
            return;
        }
        let n = segments(std::f32::consts::TAU, radii.max_element());
        let rot = Vec2::from_angle(rotation);
        let points = (0..n)
            .map(|i| {
                let t = std::f32::consts::TAU * i as f32 / n as f32;
                center + rot.rotate(Vec2::new(t.cos() * radii.x, t.sin() * radii.y))
            })
            .collect();
        // An ellipse is its own closed subpath
        self.path.push(SubPath::default());
        self.push_curve(points);
        if let Some(last) = self.path.last_mut() {
            last.closed = true;
        }
    }

    fn close_path(&mut self) {
        if let Some(last) = self.path.last_mut() {
            last.closed = true;
        }
    }

    fn set_fill(&mut self, color: Rgba) {
        self.state.fill = color;
    }

    fn set_stroke(&mut self, color: Rgba) {
        self.state.stroke = color;
    }

    fn set_line_width(&mut self, width: f32) {
        self.state.line_width = width;
    }

    fn fill(&mut self) {
        let Some(path) = self.build_path(3, true) else {
            return;
        };
        let result = self.fill_tess.tessellate_path(
            &path,
            &FillOptions::tolerance(0.5),
            &mut BuffersBuilder::new(&mut self.geometry, FillVertexCtor { color: self.state.fill }),
        );

        if result.is_ok() {
            self.flush_geometry();
        } else {
            log::debug!("fill tessellation failed: {:?}", result);
            self.geometry.vertices.clear();
            self.geometry.indices.clear();
        }
    }

    fn stroke(&mut self) {
        if self.state.line_width <= 0.0 {
            return;
        }
        let Some(path) = self.build_path(2, false) else {
            return;
        };
        let result = self.stroke_tess.tessellate_path(
            &path,
            &StrokeOptions::tolerance(0.5).with_line_width(self.state.line_width),
            &mut BuffersBuilder::new(&mut self.geometry, StrokeVertexCtor { color: self.state.stroke }),
        );

        if result.is_ok() {
            self.flush_geometry();
        } else {
            log::debug!("stroke tessellation failed: {:?}", result);
            self.geometry.vertices.clear();
            self.geometry.indices.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::config::FieldConfig;
    use crate::systems::generate::generate;
    use crate::systems::render::draw;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use std::mem::size_of;

    const BLUE: Rgba = Rgba::new(0.0, 0.0, 1.0, 0.5);

    #[test]
    fn vector_vertex_is_24_bytes() {
        assert_eq!(size_of::<VectorVertex>(), 24);
        assert_eq!(VectorVertex::FLOATS, 6);
        assert_eq!(VectorVertex::STRIDE_BYTES, 24);
    }

    #[test]
    fn filled_triangle_is_one_triangle() {
        let mut s = VectorSurface::new();
        s.begin_path();
        s.move_to(Vec2::new(0.0, 0.0));
        s.line_to(Vec2::new(100.0, 0.0));
        s.line_to(Vec2::new(50.0, 100.0));
        s.close_path();
        s.set_fill(BLUE);
        s.fill();

        assert_eq!(s.vertex_count(), 3);
        assert!(s.vertices().iter().all(|v| v.b == 1.0 && v.a == 0.5));
    }

    #[test]
    fn circle_and_line_produce_vertices() {
        let mut s = VectorSurface::new();
        s.fill_circle(Vec2::new(50.0, 50.0), 25.0, BLUE);
        let after_circle = s.vertex_count();
        assert!(after_circle > 0);

        s.stroke_line(Vec2::ZERO, Vec2::new(100.0, 100.0), 2.0, BLUE);
        assert!(s.vertex_count() > after_circle);
    }

    #[test]
    fn degenerate_paths_produce_nothing() {
        let mut s = VectorSurface::new();
        s.begin_path();
        s.move_to(Vec2::ZERO);
        s.stroke();
        s.fill();
        s.fill_circle(Vec2::ZERO, 0.0, BLUE);
        s.stroke_polyline(&[Vec2::ZERO], 1.0, BLUE);
        s.stroke_line(Vec2::ZERO, Vec2::ONE, 0.0, BLUE);
        assert_eq!(s.vertex_count(), 0);
    }

    #[test]
    fn transform_is_applied_and_restored() {
        let mut s = VectorSurface::new();
        s.save();
        s.translate(Vec2::new(1000.0, 0.0));
        s.fill_circle(Vec2::ZERO, 5.0, BLUE);
        s.restore();
        assert!(s.vertices().iter().all(|v| v.x > 990.0));

        s.clear_rect(Vec2::ZERO, Vec2::splat(2000.0));
        s.fill_circle(Vec2::ZERO, 5.0, BLUE);
        assert!(s.vertices().iter().all(|v| v.x < 10.0));
    }

    #[test]
    fn rotation_turns_local_axes() {
        let mut s = VectorSurface::new();
        s.rotate(std::f32::consts::FRAC_PI_2);
        s.fill_circle(Vec2::new(100.0, 0.0), 2.0, BLUE);
        // Local +x maps to surface +y
        for v in s.vertices() {
            assert!(v.x.abs() < 3.0 && (v.y - 100.0).abs() < 3.0, "vertex at ({}, {})", v.x, v.y);
        }
    }

    #[test]
    fn ellipse_is_stroked_as_closed_loop() {
        let mut s = VectorSurface::new();
        s.begin_path();
        s.ellipse(Vec2::new(50.0, 50.0), Vec2::new(20.0, 8.0), 0.4);
        s.set_line_width(1.0);
        s.set_stroke(BLUE);
        s.stroke();
        assert!(s.vertex_count() > 0);
        for v in s.vertices() {
            assert!(Vec2::new(v.x, v.y).distance(Vec2::new(50.0, 50.0)) < 22.0);
        }
    }

    #[test]
    fn clear_resets_buffer() {
        let mut s = VectorSurface::new();
        s.fill_circle(Vec2::new(50.0, 50.0), 25.0, BLUE);
        assert!(s.vertex_count() > 0);
        s.clear_rect(Vec2::ZERO, Vec2::splat(100.0));
        assert_eq!(s.vertex_count(), 0);
    }

    #[test]
    fn full_scene_tessellates() {
        let cfg = FieldConfig::default();
        let mut rng = SmallRng::seed_from_u64(21);
        let scene = generate(&cfg, Vec2::new(800.0, 600.0), &mut rng);

        let mut s = VectorSurface::new();
        draw(&scene, &cfg, &mut s);
        let first = s.vertex_count();
        assert!(first > 0);
        assert_eq!(first % 3, 0, "output is a triangle list");

        // Each frame starts from a clear, so redrawing does not accumulate
        draw(&scene, &cfg, &mut s);
        assert_eq!(s.vertex_count(), first);
    }
}
