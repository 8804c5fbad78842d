use thiserror::Error;

pub type Result<T> = std::result::Result<T, ChallengeError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChallengeError {
    /// Malformed coordinates, a route that is not a permutation of the node
    /// range, or a dimension the requested function does not support.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unknown benchmark function '{0}'")]
    UnknownFunction(String),
}

impl ChallengeError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        ChallengeError::InvalidInput(msg.into())
    }
}
