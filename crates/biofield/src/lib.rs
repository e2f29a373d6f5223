pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod input;
pub mod extensions;

// Re-export key types at crate root for convenience
pub use api::backdrop::{Backdrop, FrameStatus};
pub use api::config::{
    FieldConfig, Span, MotionConfig, AtomConfig, MoleculeConfig, HelixConfig,
    InputConfig, BondConfig, Palette, FrameConfig,
};
pub use components::{Atom, Helix, Molecule, MoleculeShape};
pub use core::gate::{Gate, GateState, Transition};
pub use core::scene::Scene;
pub use core::time::FrameClock;
pub use input::queue::{InputEvent, InputQueue};
pub use input::tracker::{InputFrame, InputTracker};
pub use renderer::traits::{Rgba, Surface};
pub use systems::render::bond_opacity;

#[cfg(feature = "vectors")]
pub use renderer::vector::{VectorSurface, VectorVertex};

pub use extensions::{lerp, lerp_vec2, damp_factor, approach, approach_vec2};
