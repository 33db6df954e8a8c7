//! Failure types of the normalization pipeline.

/// Every recovery strategy was exhausted. Carries a bounded preview of the raw input.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Failed to parse JSON after multiple attempts. Original content preview: {preview}")]
pub struct ParseFailure {
    pub preview: String,
}

/// The parsed value is not a JSON object.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Invalid response: not an object (got {kind})")]
pub struct ShapeFailure {
    pub kind: &'static str,
}

/// Either stage of `normalize` failed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NormalizeError {
    #[error(transparent)]
    Parse(#[from] ParseFailure),
    #[error(transparent)]
    Shape(#[from] ShapeFailure),
}
