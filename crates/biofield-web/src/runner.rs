use biofield::{Backdrop, FieldConfig, FrameStatus, InputEvent};
use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::canvas::CanvasSurface;
use crate::error::BridgeError;

/// Binds a [`Backdrop`] to one page canvas.
///
/// The page owns the animation loop: it forwards DOM events and calls
/// [`tick`](Self::tick) from `requestAnimationFrame`. wasm-bindgen cannot
/// export this struct's borrow pattern directly, so the crate root keeps a
/// `thread_local!` runner and exposes free functions.
pub struct BackdropRunner {
    backdrop: Backdrop,
    surface: CanvasSurface,
    canvas: HtmlCanvasElement,
}

impl BackdropRunner {
    /// Find the canvas by id, size it to the window, and build a dormant
    /// backdrop for it.
    pub fn attach(canvas_id: &str, config: FieldConfig) -> Result<Self, BridgeError> {
        let window = web_sys::window().ok_or(BridgeError::MissingWindow)?;
        let document = window.document().ok_or(BridgeError::MissingWindow)?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
            .ok_or_else(|| BridgeError::MissingCanvas(canvas_id.to_string()))?;
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|obj| obj.dyn_into::<CanvasRenderingContext2d>().ok())
            .ok_or(BridgeError::ContextUnavailable)?;

        let dimension = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
            v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32
        };
        let viewport = Vec2::new(dimension(window.inner_width()), dimension(window.inner_height()));
        canvas.set_width(viewport.x as u32);
        canvas.set_height(viewport.y as u32);

        let seed = (js_sys::Math::random() * u64::MAX as f64) as u64;
        Ok(Self {
            backdrop: Backdrop::new(config, viewport, seed),
            surface: CanvasSurface::new(ctx),
            canvas,
        })
    }

    pub fn push_input(&mut self, event: InputEvent) {
        self.backdrop.push_input(event);
    }

    /// Match the canvas backing store to the new window size and queue the
    /// resize for the next tick.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.canvas.set_width(width.max(0.0) as u32);
        self.canvas.set_height(height.max(0.0) as u32);
        self.backdrop.push_input(InputEvent::Resize { width, height });
    }

    /// Parse and apply a JSON config override.
    pub fn load_config(&mut self, json: &str) -> Result<(), BridgeError> {
        let config = FieldConfig::from_json(json)?;
        self.backdrop.set_config(config);
        Ok(())
    }

    /// Run one frame. Returns whether anything was drawn.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        self.backdrop.tick(now_ms, &mut self.surface) == FrameStatus::Rendered
    }
}
