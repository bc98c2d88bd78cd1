use thiserror::Error;

/// Failure of the field-lookup boundary.
///
/// A failed lookup is distinct from a lookup that simply had nothing new to
/// offer; the latter is not an error at all.
#[derive(Debug, Error)]
pub enum AiError {
    #[error("invalid lookup input: {0}")]
    InvalidInput(String),

    #[error("lookup failed: {0}")]
    LookupFailed(String),

    #[error("lookup returned {0}, expected an object")]
    NotAnObject(String),

    #[error("malformed lookup response: {0}")]
    InvalidResponse(String),
}
