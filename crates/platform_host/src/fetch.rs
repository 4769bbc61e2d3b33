//! Error taxonomy shared by every network-backed host contract.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Failure of a backend or fragment request.
pub enum FetchError {
    /// The server answered with a non-success HTTP status.
    #[error("HTTP error! status: {0}")]
    Status(u16),
    /// The request never produced a response (offline, CORS, aborted).
    #[error("network error: {0}")]
    Network(String),
    /// The response body could not be decoded.
    #[error("malformed response: {0}")]
    Decode(String),
    /// The backend answered with `success: false`.
    #[error("{0}")]
    Rejected(String),
    /// The capability does not exist on the current target.
    #[error("unavailable: {0}")]
    Unavailable(String),
}

impl FetchError {
    /// Returns the user-facing reason text used in toasts and failure lists.
    pub fn reason(&self) -> String {
        match self {
            Self::Rejected(message) => message.clone(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_reason_is_the_backend_message_verbatim() {
        assert_eq!(
            FetchError::Rejected("file is locked".to_string()).reason(),
            "file is locked"
        );
        assert_eq!(FetchError::Status(404).reason(), "HTTP error! status: 404");
    }
}
