//! Error conversion implementations.
//!
//! This module contains From trait implementations to convert from
//! standard-library error types to the unified Error type.

use super::types::Error;

impl From<std::alloc::LayoutError> for Error {
    fn from(err: std::alloc::LayoutError) -> Self {
        Error::Layout(err)
    }
}

impl From<std::fmt::Error> for Error {
    fn from(err: std::fmt::Error) -> Self {
        Error::Other(format!("Formatting failed: {}", err))
    }
}
