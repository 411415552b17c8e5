//! API Error Taxonomy
//!
//! Three failure classes with distinct handling: validation errors stay
//! client-side and never reach the network, auth errors send the user to
//! the sign-in page, and remote errors surface as transient toasts.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Client-side rejection; shown inline, no request is made.
    #[error("{0}")]
    Validation(String),

    /// Missing or expired session.
    #[error("{0}")]
    Auth(String),

    /// Network or service failure; the operation is abandoned.
    #[error("{0}")]
    Remote(String),
}

impl ApiError {
    /// Classify a non-2xx HTTP response.
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            401 | 403 => ApiError::Auth(message),
            _ => ApiError::Remote(message),
        }
    }

    pub fn is_auth(&self) -> bool {
        matches!(self, ApiError::Auth(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert!(ApiError::from_status(401, "expired".into()).is_auth());
        assert!(ApiError::from_status(403, "forbidden".into()).is_auth());
        assert_eq!(
            ApiError::from_status(500, "boom".into()),
            ApiError::Remote("boom".into())
        );
        assert_eq!(
            ApiError::from_status(400, "bad".into()),
            ApiError::Remote("bad".into())
        );
    }

    #[test]
    fn test_display_passes_message_through() {
        let err = ApiError::Validation("Glucose level must be between 10 and 600".into());
        assert_eq!(
            err.to_string(),
            "Glucose level must be between 10 and 600"
        );
    }
}
