//! Configuration validation
//!
//! Validates engine configurations before any computation runs.

mod error;
mod validator;

#[cfg(test)]
mod proptests;

pub use error::ValidationError;
pub use validator::{validate_config, validation_notes};
