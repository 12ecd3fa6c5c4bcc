//! Error type for the core primitives.
//!
//! The core crate can only fail on invalid caller input (out-of-range or
//! non-finite coordinates); everything else in it is total.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid {what}: {message}")]
    InvalidInput { what: &'static str, message: String },
}

impl CoreError {
    pub fn invalid_input(what: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            what,
            message: message.into(),
        }
    }
}

pub type CoreResult<T> = std::result::Result<T, CoreError>;
