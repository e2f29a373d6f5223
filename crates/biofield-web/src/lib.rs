//! Browser bridge for the biofield backdrop.
//!
//! Exposes free `#[wasm_bindgen]` functions over a single `thread_local!`
//! [`BackdropRunner`]. The page script wires DOM events to the exports and
//! drives `backdrop_tick` from `requestAnimationFrame`:
//!
//! ```ignore
//! import init, * as bg from "./biofield_web.js";
//! await init();
//! if (bg.backdrop_init("bg-canvas", document.documentElement.dataset.theme)) {
//!   addEventListener("mousemove", e => bg.backdrop_pointer_move(e.clientX, e.clientY));
//!   const loop = t => { bg.backdrop_tick(t); requestAnimationFrame(loop); };
//!   requestAnimationFrame(loop);
//! }
//! ```
//!
//! Until `backdrop_init` succeeds every other export is a no-op.

pub mod canvas;
pub mod error;
pub mod runner;

pub use canvas::CanvasSurface;
pub use error::BridgeError;
pub use runner::BackdropRunner;

use std::cell::RefCell;

use biofield::{FieldConfig, InputEvent};
use wasm_bindgen::prelude::*;

thread_local! {
    static RUNNER: RefCell<Option<BackdropRunner>> = RefCell::new(None);
}

/// Run `f` against the runner, or do nothing when none is attached.
fn with_runner<R>(f: impl FnOnce(&mut BackdropRunner) -> R) -> Option<R> {
    RUNNER.with(|cell| cell.borrow_mut().as_mut().map(f))
}

/// Attach to the canvas with id `canvas_id`. `theme` is the page's current
/// theme attribute, if any. Returns false (and logs a warning) when the
/// canvas cannot be used.
#[wasm_bindgen]
pub fn backdrop_init(canvas_id: &str, theme: Option<String>) -> bool {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    match BackdropRunner::attach(canvas_id, FieldConfig::default()) {
        Ok(mut runner) => {
            runner.push_input(InputEvent::ThemeChanged(theme));
            RUNNER.with(|cell| *cell.borrow_mut() = Some(runner));
            log::info!("biofield: attached to #{}", canvas_id);
            true
        }
        Err(e) => {
            log::warn!("biofield: {}; backdrop disabled", e);
            false
        }
    }
}

/// Advance and draw one frame. Returns whether a frame was drawn.
#[wasm_bindgen]
pub fn backdrop_tick(now_ms: f64) -> bool {
    with_runner(|r| r.tick(now_ms)).unwrap_or(false)
}

#[wasm_bindgen]
pub fn backdrop_pointer_move(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerMove { x, y }));
}

#[wasm_bindgen]
pub fn backdrop_pointer_leave() {
    with_runner(|r| r.push_input(InputEvent::PointerLeave));
}

#[wasm_bindgen]
pub fn backdrop_scroll(offset: f32) {
    with_runner(|r| r.push_input(InputEvent::Scroll { offset }));
}

#[wasm_bindgen]
pub fn backdrop_resize(width: f32, height: f32) {
    with_runner(|r| r.resize(width, height));
}

/// Forward a change of the page theme attribute (`None` when removed).
#[wasm_bindgen]
pub fn backdrop_theme_changed(theme: Option<String>) {
    with_runner(|r| r.push_input(InputEvent::ThemeChanged(theme)));
}

/// Apply a JSON config override. Returns false if the JSON is invalid or no
/// backdrop is attached; the current config stays in place.
#[wasm_bindgen]
pub fn backdrop_load_config(json: &str) -> bool {
    match with_runner(|r| r.load_config(json)) {
        Some(Ok(())) => true,
        Some(Err(e)) => {
            log::error!("biofield: {}", e);
            false
        }
        None => false,
    }
}
