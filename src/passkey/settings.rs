//! Passkey settings
//!
//! This module defines settings that shape the requests sent to the credential
//! manager and how returned credentials are reported.

use serde::{Deserialize, Serialize};

/// Passkey settings for login and registration requests
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PasskeySettings {
    /// Value used when the caller does not say whether only immediately
    /// available credentials should be offered
    pub default_prefer_immediate: bool,
    /// Offer saved passwords alongside passkeys in login requests
    pub offer_password_option: bool,
    /// Report password credentials as a successful login instead of
    /// `INVALID_CREDENTIAL_TYPE`
    pub accept_password_credentials: bool,
}

impl Default for PasskeySettings {
    fn default() -> Self {
        Self {
            default_prefer_immediate: true,
            offer_password_option: true,
            accept_password_credentials: false,
        }
    }
}
