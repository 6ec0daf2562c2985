//! Error types shared across the crate.
//!
//! Two families: configuration problems are fatal and surface at startup
//! (or indicate a wiring bug, for `use_auth` outside its provider), while
//! identity-operation failures are recovered at the call site and shown
//! inline next to the form that triggered them. Neither ever mutates the
//! session state.

use thiserror::Error;

/// Fatal configuration problems. Not recoverable at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A required build-time configuration value is missing or empty.
    #[error("missing required configuration value: {0}")]
    Missing(&'static str),

    /// The session store was read outside its provider scope.
    #[error("use_auth must be used within an AuthProvider")]
    OutsideProvider,
}

/// Failures reported by the identity service or the transport to it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The service rejected the email/password pair.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// The request never produced a response.
    #[error("could not reach the identity service: {0}")]
    Network(String),

    /// The service answered with an error status.
    #[error("identity service rejected the request: {0}")]
    Rejected(String),

    /// The response body did not match the expected shape.
    #[error("unexpected identity service response: {0}")]
    Decode(String),

    /// The operation was invoked outside a browser build.
    #[error("authentication requires a browser environment")]
    Unsupported,
}
