//! Client error types

use thiserror::Error;

use crate::transport::TransportError;

/// Result type alias
pub type Result<T> = std::result::Result<T, ClientError>;

/// A bucket name rejected by the local naming rules.
///
/// The service enforces the same rules, but they are checked here first so
/// a bad name never costs a network round trip.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BucketNameError {
    /// A character outside letters, digits, `-`, `_`, `.`
    #[error("Bucket names can only contain letters, numbers, -, _, or .")]
    InvalidCharacter,

    /// First character is not a letter or digit
    #[error("Bucket names can only start with letters or numbers.")]
    InvalidStart,

    /// Last character is not a letter or digit
    #[error("Bucket names can only end with letters or numbers.")]
    InvalidEnd,

    /// Length outside 3..=63
    #[error("Bucket names must contain 3 to 63 characters.")]
    InvalidLength,
}

/// Client errors
#[derive(Error, Debug)]
pub enum ClientError {
    /// Local validation failure; nothing was sent
    #[error("invalid bucket name: {0}")]
    InvalidBucketName(#[from] BucketNameError),

    /// The service rejected the request (any status >= 300), or the
    /// sentinel `404 Server not found.` when the host did not resolve
    #[error("{status}: {reason}")]
    Service { status: u16, reason: String },

    /// Transport fault passed through untranslated
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl ClientError {
    /// Status code of a service rejection, if that is what this is
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Service { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Check if this is a "not found" rejection
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Service { status: 404, .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_error_display() {
        let error = ClientError::Service {
            status: 404,
            reason: "Not Found".to_string(),
        };
        assert_eq!(error.to_string(), "404: Not Found");
        assert!(error.is_not_found());
        assert_eq!(error.status(), Some(404));
    }

    #[test]
    fn test_bucket_name_error_wraps() {
        let error = ClientError::from(BucketNameError::InvalidLength);
        assert!(matches!(
            error,
            ClientError::InvalidBucketName(BucketNameError::InvalidLength)
        ));
        assert!(!error.is_not_found());
        assert_eq!(error.status(), None);
    }
}
