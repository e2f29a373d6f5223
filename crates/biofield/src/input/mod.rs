pub mod queue;
pub mod tracker;

pub use queue::{InputEvent, InputQueue};
pub use tracker::{InputFrame, InputTracker};
