//! Error handling for podcatalog.
//!
//! Provides a unified error handling system based on gRPC status codes,
//! with mapping from transport and parsing errors to appropriate categories.
//!
//! # Error Categories
//!
//! Errors are categorized into standard types that map to HTTP status codes:
//! * Authentication/authorization failures (401, 403)
//! * Missing resources (404)
//! * Client errors (400, 429)
//! * Server errors (500, 503)
//! * Timeouts (504)
//! * Provider contract violations (502)
//!
//! Any error returned by a remote catalog call is a *remote failure* and is
//! propagated unmodified; see [`Error::is_remote_failure`]. A query that
//! matches nothing is not an error at all but an empty collection.
//!
//! # Example
//!
//! ```rust
//! use podcatalog::error::{Error, ErrorKind, Result};
//!
//! fn lookup(id: &str) -> Result<&str> {
//!     id.split('_')
//!         .nth(2)
//!         .ok_or_else(|| Error::invalid_argument(format!("malformed id: {id}")))
//! }
//! ```

#![allow(clippy::enum_glob_use)]

use std::fmt;
use thiserror::Error;

/// Main error type combining error kind and details.
///
/// Provides:
/// * Categorized error types ([`ErrorKind`])
/// * Underlying error details
/// * Conversion from common error types
#[derive(Debug)]
pub struct Error {
    /// Classification of the error
    pub kind: ErrorKind,

    /// Details of the underlying error
    pub error: Box<dyn std::error::Error + Send + Sync>,

    /// Set on every error returned by a remote catalog call.
    remote: bool,
}

impl Error {
    /// Attempts to downcast the underlying error to a concrete type.
    ///
    /// # Returns
    /// * `Some(&E)` - If the underlying error is of type `E`
    /// * `None` - If the underlying error is not of type `E`
    #[must_use]
    pub fn downcast<E>(&self) -> Option<&E>
    where
        E: std::error::Error + 'static,
    {
        self.error.downcast_ref::<E>()
    }

    /// Marks this error as returned by a remote catalog call, whatever its
    /// kind.
    #[must_use]
    pub fn into_remote(mut self) -> Self {
        self.remote = true;
        self
    }

    /// Whether this error originates from the remote catalog: any error a
    /// catalog call returned, including provider 404s, and any transport
    /// trouble.
    ///
    /// Argument errors raised before any call is made, lookups that find
    /// nothing locally, and pagination contract violations are not remote
    /// failures.
    #[must_use]
    pub fn is_remote_failure(&self) -> bool {
        use ErrorKind::*;
        self.remote
            || matches!(
                self.kind,
                DeadlineExceeded
                    | Unauthenticated
                    | PermissionDenied
                    | ResourceExhausted
                    | FailedPrecondition
                    | Unavailable
                    | DataLoss
                    | Unknown
            )
    }
}

/// Standard result type for podcatalog operations.
///
/// Wraps the standard `Result` type with our custom [`struct@Error`] type.
pub type Result<T> = std::result::Result<T, Error>;

/// Error categories based on gRPC status codes.
///
/// See [gRPC status codes](https://github.com/googleapis/googleapis/blob/master/google/rpc/code.proto)
/// for the original definitions.
#[expect(clippy::module_name_repetitions)]
#[derive(Clone, Copy, Debug, Eq, Error, Hash, Ord, PartialEq, PartialOrd)]
#[repr(u32)]
pub enum ErrorKind {
    /// HTTP Mapping: 500 Internal Server Error
    #[error("unknown error")]
    Unknown = 2,

    /// HTTP Mapping: 400 Bad Request
    #[error("invalid argument specified")]
    InvalidArgument = 3,

    /// HTTP Mapping: 504 Gateway Timeout
    #[error("operation timed out")]
    DeadlineExceeded = 4,

    /// HTTP Mapping: 404 Not Found
    #[error("not found")]
    NotFound = 5,

    /// HTTP Mapping: 403 Forbidden
    #[error("permission denied")]
    PermissionDenied = 7,

    /// HTTP Mapping: 401 Unauthorized
    #[error("no valid authentication credentials")]
    Unauthenticated = 16,

    /// HTTP Mapping: 429 Too Many Requests
    #[error("resource has been exhausted")]
    ResourceExhausted = 8,

    /// HTTP Mapping: 400 Bad Request
    #[error("invalid state")]
    FailedPrecondition = 9,

    /// HTTP Mapping: 500 Internal Server Error
    #[error("internal error")]
    Internal = 13,

    /// HTTP Mapping: 503 Service Unavailable
    #[error("service unavailable")]
    Unavailable = 14,

    /// HTTP Mapping: 500 Internal Server Error
    #[error("unrecoverable data loss or corruption")]
    DataLoss = 15,

    /// HTTP Mapping: 502 Bad Gateway
    ///
    /// The provider returned a pagination cursor that does not move forward.
    #[error("inconsistent pagination")]
    InconsistentPagination = 100,
}

impl Error {
    /// Creates a new error with specified kind and details.
    pub fn new<E>(kind: ErrorKind, error: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self {
            kind,
            error: error.into(),
            remote: false,
        }
    }

    /// Creates an error for data corruption or loss.
    ///
    /// Maps to HTTP 500 Internal Server Error. Use when a response body
    /// could not be received in full.
    pub fn data_loss<E>(error: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::new(ErrorKind::DataLoss, error)
    }

    /// Creates an error for operations that exceeded their deadline.
    ///
    /// Maps to HTTP 504 Gateway Timeout.
    pub fn deadline_exceeded<E>(error: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::new(ErrorKind::DeadlineExceeded, error)
    }

    /// Creates an error for operations that failed due to provider state.
    ///
    /// Maps to HTTP 400 Bad Request. Used for provider replies with an
    /// unexpected status code.
    pub fn failed_precondition<E>(error: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::new(ErrorKind::FailedPrecondition, error)
    }

    /// Creates an error for a pagination cursor that fails to advance.
    ///
    /// Maps to HTTP 502 Bad Gateway. Following such a cursor would never
    /// terminate, so the whole aggregation is abandoned.
    pub fn inconsistent_pagination<E>(error: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::new(ErrorKind::InconsistentPagination, error)
    }

    /// Creates an error for internal errors.
    ///
    /// Maps to HTTP 500 Internal Server Error. Use for unexpected internal
    /// errors that shouldn't occur during normal operation.
    pub fn internal<E>(error: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::new(ErrorKind::Internal, error)
    }

    /// Creates an error for invalid arguments.
    ///
    /// Maps to HTTP 400 Bad Request. Use when provided arguments
    /// don't meet validation requirements.
    ///
    /// # Examples
    ///
    /// ```rust
    /// let err = Error::invalid_argument("catalog id malformed");
    /// assert_eq!(err.kind, ErrorKind::InvalidArgument);
    /// ```
    pub fn invalid_argument<E>(error: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::new(ErrorKind::InvalidArgument, error)
    }

    /// Creates an error for missing resources.
    ///
    /// Maps to HTTP 404 Not Found.
    pub fn not_found<E>(error: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::new(ErrorKind::NotFound, error)
    }

    /// Creates an error for permission denied conditions.
    ///
    /// Maps to HTTP 403 Forbidden.
    pub fn permission_denied<E>(error: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::new(ErrorKind::PermissionDenied, error)
    }

    /// Creates an error for exhausted resources.
    ///
    /// Maps to HTTP 429 Too Many Requests. The provider answers this way
    /// when the monthly quota of the API key is used up.
    pub fn resource_exhausted<E>(error: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::new(ErrorKind::ResourceExhausted, error)
    }

    /// Creates an error for authentication failures.
    ///
    /// Maps to HTTP 401 Unauthorized. Use when:
    /// * The API key is invalid
    /// * The API key is missing
    pub fn unauthenticated<E>(error: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::new(ErrorKind::Unauthenticated, error)
    }

    /// Creates an error for unavailable services.
    ///
    /// Maps to HTTP 503 Service Unavailable.
    pub fn unavailable<E>(error: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::new(ErrorKind::Unavailable, error)
    }

    /// Creates an error for unknown errors.
    ///
    /// Maps to HTTP 500 Internal Server Error. Use when the error
    /// doesn't fit any other category.
    pub fn unknown<E>(error: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::new(ErrorKind::Unknown, error)
    }
}

/// Returns the underlying error source.
impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.error.source()
    }
}

/// Formats the error for display, showing both kind and details.
///
/// Format: "{kind}: {details}"
impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "{}: ", self.kind)?;
        self.error.fmt(fmt)
    }
}

/// Converts IO errors into appropriate error kinds.
///
/// Maps standard IO errors to their logical equivalents:
/// * `NotFound` -> `NotFound`
/// * `PermissionDenied` -> `PermissionDenied`
/// * `TimedOut` -> `DeadlineExceeded`
/// * etc.
impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        use std::io::ErrorKind::*;
        match err.kind() {
            NotFound => Self::not_found(err),
            PermissionDenied => Self::permission_denied(err),
            AddrNotAvailable | ConnectionRefused | NotConnected => Self::unavailable(err),
            UnexpectedEof => Self::data_loss(err),
            TimedOut => Self::deadline_exceeded(err),
            InvalidInput | InvalidData => Self::invalid_argument(err),
            _ => Self::unknown(err),
        }
    }
}

/// Converts HTTP client errors into appropriate error kinds.
///
/// Maps HTTP errors based on their nature:
/// * Body errors -> `DataLoss`
/// * Decode errors -> `DataLoss`
/// * Connect errors -> `Unavailable`
/// * Timeout errors -> `DeadlineExceeded`
/// * etc.
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_body() || err.is_decode() {
            return Self::data_loss(err);
        }

        if err.is_builder() {
            return Self::internal(err);
        }

        if err.is_connect() || err.is_redirect() {
            return Self::unavailable(err);
        }

        if err.is_status() {
            return Self::failed_precondition(err);
        }

        if err.is_timeout() {
            return Self::deadline_exceeded(err);
        }

        Self::unknown(err)
    }
}

/// Converts provider reply status codes into appropriate error kinds.
impl From<http::StatusCode> for Error {
    fn from(status: http::StatusCode) -> Self {
        let message = format!("provider replied with {status}");
        match status.as_u16() {
            401 => Self::unauthenticated(message),
            403 => Self::permission_denied(message),
            404 => Self::not_found(message),
            429 => Self::resource_exhausted(message),
            500..=599 => Self::unavailable(message),
            _ => Self::failed_precondition(message),
        }
    }
}

/// Converts JSON errors into `DataLoss`.
///
/// A provider reply that does not parse cannot be used for anything.
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::data_loss(err)
    }
}

/// Converts invalid header errors to `InvalidArgument`.
impl From<http::header::InvalidHeaderValue> for Error {
    fn from(e: http::header::InvalidHeaderValue) -> Self {
        Self::invalid_argument(e.to_string())
    }
}

/// Converts URL parsing errors to `Internal`.
impl From<url::ParseError> for Error {
    fn from(e: url::ParseError) -> Self {
        Self::internal(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_kind_and_details() {
        let err = Error::not_found("genre \"Comedy\" does not exist");
        assert_eq!(
            err.to_string(),
            "not found: genre \"Comedy\" does not exist"
        );
    }

    #[test]
    fn status_codes_map_to_kinds() {
        assert_eq!(
            Error::from(http::StatusCode::UNAUTHORIZED).kind,
            ErrorKind::Unauthenticated
        );
        assert_eq!(
            Error::from(http::StatusCode::TOO_MANY_REQUESTS).kind,
            ErrorKind::ResourceExhausted
        );
        assert_eq!(
            Error::from(http::StatusCode::BAD_GATEWAY).kind,
            ErrorKind::Unavailable
        );
        assert_eq!(
            Error::from(http::StatusCode::BAD_REQUEST).kind,
            ErrorKind::FailedPrecondition
        );
    }

    #[test]
    fn remote_failures_are_distinguishable() {
        assert!(Error::unavailable("connection refused").is_remote_failure());
        assert!(Error::from(http::StatusCode::TOO_MANY_REQUESTS).is_remote_failure());
        assert!(!Error::inconsistent_pagination("cursor stuck").is_remote_failure());
        assert!(!Error::invalid_argument("bad id").is_remote_failure());
    }

    #[test]
    fn catalog_not_found_is_remote_only_when_marked() {
        let local = Error::from(http::StatusCode::NOT_FOUND);
        assert_eq!(local.kind, ErrorKind::NotFound);
        assert!(!local.is_remote_failure());

        let remote = local.into_remote();
        assert_eq!(remote.kind, ErrorKind::NotFound);
        assert!(remote.is_remote_failure());
    }

    #[test]
    fn downcast_reaches_the_underlying_error() {
        let io = std::io::Error::new(std::io::ErrorKind::TimedOut, "slow");
        let err = Error::from(io);
        assert_eq!(err.kind, ErrorKind::DeadlineExceeded);
        assert!(err.downcast::<std::io::Error>().is_some());
    }
}
