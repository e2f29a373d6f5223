pub mod gate;
pub mod scene;
pub mod time;
