//! Domain-level error type.
//!
//! These errors are transport agnostic. The inbound HTTP adapter maps them to
//! status codes and the `{message, cause?}` JSON envelope; nothing in here
//! knows about actix.

use serde::Serialize;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorCode {
    /// The request is malformed or fails validation.
    InvalidRequest,
    /// Authentication failed or is missing.
    Unauthorized,
    /// Authenticated but not permitted to act on this target.
    Forbidden,
    /// The requested account does not exist.
    NotFound,
}

/// Domain error payload.
///
/// Serializes to the wire envelope `{"message": ..., "cause": ...}` with
/// `cause` omitted when absent; the code never appears in a response body and
/// only selects the HTTP status.
///
/// # Examples
/// ```
/// use account_api::domain::{Error, ErrorCode};
///
/// let err = Error::not_found("No user found");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// assert!(err.cause().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Error {
    #[serde(skip)]
    code: ErrorCode,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    cause: Option<String>,
}

impl Error {
    /// Create a new error with the given code and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            cause: None,
        }
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Convenience constructor for [`ErrorCode::Unauthorized`].
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    /// Convenience constructor for [`ErrorCode::Forbidden`].
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Forbidden, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Attach the `cause` field of the wire envelope.
    ///
    /// # Examples
    /// ```
    /// use account_api::domain::Error;
    ///
    /// let err = Error::invalid_request("Account creation failed")
    ///     .with_cause("Already same user_id is used");
    /// assert_eq!(err.cause(), Some("Already same user_id is used"));
    /// ```
    pub fn with_cause(mut self, cause: impl Into<String>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message returned to clients.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Supplementary failure detail returned to clients.
    pub fn cause(&self) -> Option<&str> {
        self.cause.as_deref()
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.cause {
            Some(cause) => write!(f, "{}: {cause}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, to_value};

    #[test]
    fn serializes_message_only_when_cause_absent() {
        let err = Error::unauthorized("Authentication failed");
        let value = to_value(&err).expect("error serializes");
        assert_eq!(value, json!({ "message": "Authentication failed" }));
    }

    #[test]
    fn serializes_cause_when_present() {
        let err = Error::invalid_request("Account creation failed")
            .with_cause("Input length is incorrect");
        let value = to_value(&err).expect("error serializes");
        assert_eq!(
            value,
            json!({
                "message": "Account creation failed",
                "cause": "Input length is incorrect",
            })
        );
    }

    #[test]
    fn display_includes_cause() {
        let err = Error::invalid_request("User update failed")
            .with_cause("Required nickname or comment");
        assert_eq!(
            err.to_string(),
            "User update failed: Required nickname or comment"
        );
    }
}
