//! Utilities
//!
//! - [`logger`] - tracing subscriber setup
//! - [`validation`] - input checks and slug generation
//! - [`extract`] - JSON / query extractors with uniform error bodies

pub mod extract;
pub mod logger;
pub mod validation;

pub use extract::{ValidJson, ValidQuery};
