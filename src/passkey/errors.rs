//! Passkey error types
//!
//! `PasskeyError` is what a host ultimately sees: each variant maps to the
//! string code carried by a failure event.

use std::fmt;
use thiserror::Error;

/// Code reported when the caller supplied no challenge JSON
pub const MISSING_REQUEST: &str = "MISSING_REQUEST";
/// Code reported when no foreground activity can host the credential UI
pub const NULL_ACTIVITY: &str = "NULL_ACTIVITY";
/// Code reported when the provider returned a credential kind the bridge does not relay
pub const INVALID_CREDENTIAL_TYPE: &str = "INVALID_CREDENTIAL_TYPE";

/// Failure reported by the platform credential provider
///
/// `error_type` is the provider's own identifier and is forwarded verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderError {
    pub error_type: String,
    pub message: Option<String>,
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(message) => write!(f, "{}: {message}", self.error_type),
            None => f.write_str(&self.error_type),
        }
    }
}

impl std::error::Error for ProviderError {}

impl ProviderError {
    /// The user dismissed the credential picker
    pub const TYPE_USER_CANCELED: &'static str =
        "android.credentials.GetCredentialException.TYPE_USER_CANCELED";
    /// No stored credential matched the request
    pub const TYPE_NO_CREDENTIAL: &'static str =
        "android.credentials.GetCredentialException.TYPE_NO_CREDENTIAL";
    /// The operation was interrupted and may be retried by the user
    pub const TYPE_INTERRUPTED: &'static str =
        "android.credentials.GetCredentialException.TYPE_INTERRUPTED";
    /// Unknown provider failure
    pub const TYPE_UNKNOWN: &'static str =
        "android.credentials.GetCredentialException.TYPE_UNKNOWN";
    /// Registration dismissed by the user
    pub const TYPE_CREATE_USER_CANCELED: &'static str =
        "android.credentials.CreateCredentialException.TYPE_USER_CANCELED";
    /// No create option could satisfy the request
    pub const TYPE_CREATE_NO_CREATE_OPTIONS: &'static str =
        "android.credentials.CreateCredentialException.TYPE_NO_CREATE_OPTIONS";

    /// Create an error with only a type identifier
    #[must_use]
    pub fn new(error_type: impl Into<String>) -> Self {
        Self {
            error_type: error_type.into(),
            message: None,
        }
    }

    /// Attach a human readable message
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// Error types for passkey login and registration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasskeyError {
    /// Required challenge JSON was absent
    #[error("Missing request JSON")]
    MissingRequest,
    /// No foreground activity is attached
    #[error("No active activity to host the credential UI")]
    NoActiveContext,
    /// The provider rejected or could not complete the request
    #[error("Provider failure: {0}")]
    Provider(#[from] ProviderError),
    /// The provider returned a credential kind the bridge does not relay
    #[error("Invalid credential type: {0}")]
    InvalidCredentialType(String),
}

impl PasskeyError {
    /// Code carried by the failure event
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            PasskeyError::MissingRequest => MISSING_REQUEST,
            PasskeyError::NoActiveContext => NULL_ACTIVITY,
            PasskeyError::Provider(err) => &err.error_type,
            PasskeyError::InvalidCredentialType(_) => INVALID_CREDENTIAL_TYPE,
        }
    }
}

/// Errors raised while assembling a bridge
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("No credential provider configured")]
    MissingProvider,
    #[error("No notification sink configured")]
    MissingSink,
    #[error("No tokio runtime available: {0}")]
    NoRuntime(#[from] tokio::runtime::TryCurrentError),
}
