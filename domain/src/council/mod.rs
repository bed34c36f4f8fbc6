//! Council pipeline domain
//!
//! Value objects and pure rules for the four-stage council: drafts,
//! batched critique with winner resolution, blueprint, and the outbound
//! event protocol.

pub mod batch;
pub mod event;
pub mod stage;
pub mod value_objects;
pub mod verdict;
