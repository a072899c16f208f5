//! Domain-level error type.
//!
//! Services convert port failures into this type so the event layer can
//! render one notice regardless of whether the API, the credential store or a
//! validation step failed.

use std::fmt;

use crate::domain::ports::{CredentialStoreError, StoryApiError};
use crate::domain::{LoginValidationError, MalformedUrlError, StoryValidationError};

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorCode {
    /// The story API could not be reached.
    Network,
    /// The story API answered with a non-success status.
    Api,
    /// The story API answered with a body we could not decode.
    InvalidResponse,
    /// A story URL is not an absolute URL with a host.
    MalformedUrl,
    /// Caller input failed validation before any request was sent.
    InvalidRequest,
    /// The operation needs an active user session.
    Unauthorized,
    /// A referenced story is not known locally.
    NotFound,
    /// Stored credentials could not be read or written.
    Storage,
}

impl ErrorCode {
    fn fallback_message(self) -> &'static str {
        match self {
            Self::Network => "story api unreachable",
            Self::Api => "story api rejected the request",
            Self::InvalidResponse => "story api returned an unreadable response",
            Self::MalformedUrl => "story url is malformed",
            Self::InvalidRequest => "request is invalid",
            Self::Unauthorized => "login required",
            Self::NotFound => "story not found",
            Self::Storage => "credential storage failed",
        }
    }
}

/// Validation errors emitted by [`Error::try_new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorValidationError {
    /// The message was blank once trimmed.
    EmptyMessage,
}

impl fmt::Display for ErrorValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyMessage => write!(f, "error message must not be empty"),
        }
    }
}

impl std::error::Error for ErrorValidationError {}

/// Domain error payload.
///
/// ## Invariants
/// - `message` is non-empty once trimmed of whitespace.
/// - `status` is only set for [`ErrorCode::Api`].
///
/// # Examples
/// ```
/// use snooze::domain::{Error, ErrorCode};
///
/// let err = Error::api(404, "story not found");
/// assert_eq!(err.code(), ErrorCode::Api);
/// assert_eq!(err.status(), Some(404));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    code: ErrorCode,
    message: String,
    status: Option<u16>,
}

impl Error {
    /// Create a new error; a blank message falls back to the code's default
    /// description.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        match Self::try_new(code, message) {
            Ok(value) => value,
            Err(ErrorValidationError::EmptyMessage) => Self {
                code,
                message: code.fallback_message().to_owned(),
                status: None,
            },
        }
    }

    /// Fallible constructor that validates the message content.
    pub fn try_new(code: ErrorCode, message: impl Into<String>) -> Result<Self, ErrorValidationError> {
        let message = message.into();
        if message.trim().is_empty() {
            return Err(ErrorValidationError::EmptyMessage);
        }
        Ok(Self {
            code,
            message,
            status: None,
        })
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// HTTP status reported by the API, when the failure came from one.
    pub fn status(&self) -> Option<u16> {
        self.status
    }

    /// Convenience constructor for [`ErrorCode::Network`].
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Network, message)
    }

    /// Convenience constructor for [`ErrorCode::Api`] carrying the status.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            ..Self::new(ErrorCode::Api, message)
        }
    }

    /// Convenience constructor for [`ErrorCode::InvalidResponse`].
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidResponse, message)
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Convenience constructor for [`ErrorCode::Unauthorized`].
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::Storage`].
    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Storage, message)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(f, "{} (status {status})", self.message),
            None => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for Error {}

impl From<StoryApiError> for Error {
    fn from(value: StoryApiError) -> Self {
        match value {
            StoryApiError::Network { message } => Self::network(message),
            StoryApiError::Api { status, message } => Self::api(status, message),
            StoryApiError::Decode { message } => Self::invalid_response(message),
            StoryApiError::InvalidRequest { message } => Self::invalid_request(message),
        }
    }
}

impl From<CredentialStoreError> for Error {
    fn from(value: CredentialStoreError) -> Self {
        Self::storage(value.to_string())
    }
}

impl From<MalformedUrlError> for Error {
    fn from(value: MalformedUrlError) -> Self {
        Self::new(ErrorCode::MalformedUrl, value.to_string())
    }
}

impl From<StoryValidationError> for Error {
    fn from(value: StoryValidationError) -> Self {
        Self::invalid_request(value.to_string())
    }
}

impl From<LoginValidationError> for Error {
    fn from(value: LoginValidationError) -> Self {
        Self::invalid_request(value.to_string())
    }
}
