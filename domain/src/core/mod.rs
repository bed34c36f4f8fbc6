//! Core domain concepts shared across all subdomains.
//!
//! - [`model::ModelId`] - an opaque provider model identifier
//! - [`query::Query`] - a validated query to put before the council
//! - [`error::DomainError`] - domain-level errors

pub mod error;
pub mod model;
pub mod query;
