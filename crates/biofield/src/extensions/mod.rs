// extensions/mod.rs
//
// Math helpers decoupled from the scene.

pub mod easing;

pub use easing::{lerp, lerp_vec2, damp_factor, approach, approach_vec2};
