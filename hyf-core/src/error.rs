//! Typed errors for forecast normalization.

use std::fmt;

/// Errors that can occur when normalizing a raw prediction payload.
///
/// Returned as values, never panicked: callers are expected to branch on
/// the variant. `SelectionNotFound` and `EmptySeries` indicate a well-formed
/// payload that simply lacks the requested data, while `MalformedPayload`
/// means the input matched no supported shape or failed field validation.
#[derive(Debug, PartialEq, Clone)]
pub enum NormalizationError {
    /// The requested site or sector is absent from a hierarchical payload.
    SelectionNotFound(String),
    /// The resolved series exists but contains zero days.
    EmptySeries(String),
    /// Required fields missing, wrong-typed, or dates failed validation.
    MalformedPayload(String),
}

impl fmt::Display for NormalizationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NormalizationError::SelectionNotFound(detail) => {
                write!(f, "selection not found: {}", detail)
            }
            NormalizationError::EmptySeries(detail) => {
                write!(f, "empty forecast series: {}", detail)
            }
            NormalizationError::MalformedPayload(detail) => {
                write!(f, "malformed payload: {}", detail)
            }
        }
    }
}

impl std::error::Error for NormalizationError {}
