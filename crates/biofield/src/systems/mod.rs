pub mod generate;
pub mod physics;
pub mod render;
