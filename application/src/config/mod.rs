//! Application-level configuration.
//!
//! - [`CouncilSettings`] - personas, models, prompts and pacing for every run

pub mod council_settings;

pub use council_settings::{
    CouncilSettings, DEFAULT_FINALIZER_CHUNK_SIZE, DEFAULT_FINALIZER_PACING, MockPacing,
};
