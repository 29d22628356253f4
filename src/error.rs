use thiserror::Error;

/// Precondition failures surface here before any processing starts. Internal
/// invariant violations (broken ring links, heap order) are defects, not
/// recoverable conditions, and stay `assert!`/`debug_assert!` panics.
#[derive(Debug, Error)]
pub enum Error {
    #[error("field length {got} does not match width*height = {expected}")]
    FieldSizeMismatch { expected: usize, got: usize },

    #[error("field desc parse error: {0}")]
    Desc(#[from] serde_json::Error),
}
