//! Request and result envelopes exchanged with the credential provider
//!
//! The `WebAuthn` JSON carried in these types is opaque to this crate. It is
//! handed to the provider as received and returned to the host unmodified.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One kind of credential a login request is willing to accept
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CredentialOption {
    /// A saved password from the user's password provider
    Password,
    /// A passkey from the user's public key credential provider
    PublicKey {
        /// `PublicKeyCredentialRequestOptions` JSON
        request_json: String,
        /// Only offer credentials available on this device, no hybrid flows
        prefer_immediately_available: bool,
    },
}

/// Request to retrieve an existing credential
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct GetCredentialRequest {
    pub options: Vec<CredentialOption>,
}

impl GetCredentialRequest {
    /// Create a request offering the given options in order
    #[must_use]
    pub fn new(options: Vec<CredentialOption>) -> Self {
        Self { options }
    }

    /// The passkey option carried by this request, if any
    #[must_use]
    pub fn public_key_option(&self) -> Option<&CredentialOption> {
        self.options
            .iter()
            .find(|option| matches!(option, CredentialOption::PublicKey { .. }))
    }

    /// Whether saved passwords are offered
    #[must_use]
    pub fn offers_password(&self) -> bool {
        self.options.contains(&CredentialOption::Password)
    }
}

/// Request to register a new passkey
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct CreatePublicKeyCredentialRequest {
    /// `PublicKeyCredentialCreationOptions` JSON
    pub request_json: String,
    pub prefer_immediately_available: bool,
}

impl CreatePublicKeyCredentialRequest {
    #[must_use]
    pub fn new(request_json: String, prefer_immediately_available: bool) -> Self {
        Self {
            request_json,
            prefer_immediately_available,
        }
    }
}

/// Credential returned by a successful login
#[derive(Clone, PartialEq, Eq)]
pub enum Credential {
    /// A passkey assertion
    PublicKey {
        /// `WebAuthn` authentication response JSON
        authentication_response_json: String,
    },
    /// A saved username and password
    Password { id: String, password: String },
    /// Any credential kind the bridge has no mapping for
    Other {
        credential_type: String,
        data: serde_json::Value,
    },
}

impl Credential {
    /// Short name of the credential kind, safe to log
    #[must_use]
    pub fn kind(&self) -> &str {
        match self {
            Credential::PublicKey { .. } => "public_key",
            Credential::Password { .. } => "password",
            Credential::Other {
                credential_type, ..
            } => credential_type.as_str(),
        }
    }
}

// Passwords must never reach the logs
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credential::PublicKey {
                authentication_response_json,
            } => f
                .debug_struct("PublicKey")
                .field("authentication_response_json", authentication_response_json)
                .finish(),
            Credential::Password { id, .. } => f
                .debug_struct("Password")
                .field("id", id)
                .field("password", &"<redacted>")
                .finish(),
            Credential::Other {
                credential_type,
                data,
            } => f
                .debug_struct("Other")
                .field("credential_type", credential_type)
                .field("data", data)
                .finish(),
        }
    }
}

/// Response of a successful login
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GetCredentialResponse {
    pub credential: Credential,
}

impl GetCredentialResponse {
    #[must_use]
    pub fn new(credential: Credential) -> Self {
        Self { credential }
    }
}

/// Response of a successful registration
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CreateCredentialResponse {
    /// A newly created passkey
    PublicKey {
        /// `WebAuthn` registration response JSON
        registration_response_json: String,
    },
    /// Provider-specific result data
    Other {
        credential_type: String,
        data: serde_json::Value,
    },
}

/// The opaque string form relayed to the host on registration success
impl fmt::Display for CreateCredentialResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CreateCredentialResponse::PublicKey {
                registration_response_json,
            } => f.write_str(registration_response_json),
            CreateCredentialResponse::Other { data, .. } => write!(f, "{data}"),
        }
    }
}
