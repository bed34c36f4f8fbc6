//! Event stream renderers and informational listings

pub mod console;
pub mod info;
pub mod outcome;
pub mod renderer;
