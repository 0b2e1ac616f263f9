//! UI error types

use super::backend::BackendError;
use crate::foundation::collections::ElementId;
use thiserror::Error;

/// Errors raised by element tree operations
///
/// A failed operation has not partially mutated the tree unless its
/// documentation says otherwise.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UiError {
    /// The request makes no sense for the given elements (cycles, missing
    /// elements, hooks the element type does not implement)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// An id that is not (or no longer) part of the tree
    #[error("Invalid request: unknown element {0:?}")]
    UnknownElement(ElementId),

    /// Render backend failure
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),
}

impl UiError {
    /// Shorthand for [`UiError::InvalidRequest`]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        UiError::InvalidRequest(message.into())
    }

    /// Returns true for the invalid-request class (including unknown elements)
    pub fn is_invalid_request(&self) -> bool {
        matches!(self, UiError::InvalidRequest(_) | UiError::UnknownElement(_))
    }
}
