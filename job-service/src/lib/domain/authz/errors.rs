use thiserror::Error;

/// Error for authorization policy denials.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AccessError {
    #[error("Access denied")]
    Forbidden,
}
