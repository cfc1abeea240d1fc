//! Credential provider seam
//!
//! The platform credential manager performs every `WebAuthn` ceremony. Hosts
//! implement this trait over their platform API (or a fake in tests) and
//! inject it into the bridge.

use async_trait::async_trait;

use super::errors::ProviderError;
use super::types::{
    CreateCredentialResponse, CreatePublicKeyCredentialRequest, GetCredentialRequest,
    GetCredentialResponse,
};
use crate::lifecycle::ActivityHandle;

/// Asynchronous access to the platform credential manager
///
/// Calls may suspend for a long time while the user interacts with the
/// platform UI. Implementations must not block the runtime thread.
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    /// Retrieve a stored credential
    ///
    /// # Arguments
    /// * `request` - Credential kinds the caller accepts
    /// * `activity` - Foreground surface hosting the credential picker
    ///
    /// # Errors
    /// Returns the provider's typed failure when the user cancels, no
    /// credential matches, or the platform cannot complete the request.
    async fn get_credential(
        &self,
        request: GetCredentialRequest,
        activity: &ActivityHandle,
    ) -> Result<GetCredentialResponse, ProviderError>;

    /// Register a new passkey
    ///
    /// # Errors
    /// Returns the provider's typed failure when the user cancels or the
    /// platform cannot create the credential.
    async fn create_credential(
        &self,
        request: CreatePublicKeyCredentialRequest,
        activity: &ActivityHandle,
    ) -> Result<CreateCredentialResponse, ProviderError>;
}
