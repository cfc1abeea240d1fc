//! Test fixtures providing pre-built test objects
//!
//! Sample `WebAuthn` JSON shaped like what a relying party server and the
//! platform credential manager exchange, plus a bridge wired to mocks.

use serde_json::json;
use std::sync::Arc;

use super::constants::{TEST_ACTIVITY, TEST_CHALLENGE, TEST_CREDENTIAL_ID, TEST_RP_ID};
use super::mock::{MockCredentialProvider, RecordingSink};
use crate::lifecycle::{ActivityHandle, ActivityLifecycle};
use crate::passkey::{PasskeyBridge, PasskeySettings};

/// Central fixture provider for all test data
pub struct TestFixtures;

impl TestFixtures {
    /// `PublicKeyCredentialRequestOptions` JSON
    #[must_use]
    pub fn request_options_json() -> String {
        json!({
            "challenge": TEST_CHALLENGE,
            "rpId": TEST_RP_ID,
            "timeout": 60000,
            "userVerification": "preferred",
            "allowCredentials": []
        })
        .to_string()
    }

    /// `PublicKeyCredentialCreationOptions` JSON
    #[must_use]
    pub fn creation_options_json() -> String {
        json!({
            "challenge": TEST_CHALLENGE,
            "rp": { "id": TEST_RP_ID, "name": "Example" },
            "user": { "id": "dXNlci0x", "name": "test@example.com", "displayName": "Test User" },
            "pubKeyCredParams": [
                { "type": "public-key", "alg": -7 },
                { "type": "public-key", "alg": -257 }
            ],
            "timeout": 60000,
            "attestation": "none",
            "authenticatorSelection": {
                "residentKey": "required",
                "userVerification": "preferred"
            }
        })
        .to_string()
    }

    /// Authentication response JSON as returned by the credential manager
    #[must_use]
    pub fn authentication_response_json() -> String {
        json!({
            "id": TEST_CREDENTIAL_ID,
            "rawId": TEST_CREDENTIAL_ID,
            "type": "public-key",
            "response": {
                "clientDataJSON": "eyJ0eXBlIjoid2ViYXV0aG4uZ2V0In0",
                "authenticatorData": "SZYN5YgOjGh0NBcPZHZgW4_krrmihjLHmVzzuoMdl2MFAAAAAA",
                "signature": "MEUCIQDsig",
                "userHandle": "dXNlci0x"
            }
        })
        .to_string()
    }

    /// Registration response JSON as returned by the credential manager
    #[must_use]
    pub fn registration_response_json() -> String {
        json!({
            "id": TEST_CREDENTIAL_ID,
            "rawId": TEST_CREDENTIAL_ID,
            "type": "public-key",
            "response": {
                "clientDataJSON": "eyJ0eXBlIjoid2ViYXV0aG4uY3JlYXRlIn0",
                "attestationObject": "o2NmbXRkbm9uZQ"
            }
        })
        .to_string()
    }

    /// Lifecycle with a foreground activity attached
    #[must_use]
    pub fn attached_lifecycle() -> ActivityLifecycle {
        ActivityLifecycle::with_activity(ActivityHandle::new(TEST_ACTIVITY))
    }

    /// Bridge over `provider` with an attached activity and default settings
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    #[must_use]
    pub fn harness(provider: MockCredentialProvider) -> TestHarness {
        Self::harness_with(provider, Self::attached_lifecycle(), PasskeySettings::default())
    }

    /// Bridge over `provider` with the given lifecycle and settings
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    #[must_use]
    pub fn harness_with(
        provider: MockCredentialProvider,
        lifecycle: ActivityLifecycle,
        settings: PasskeySettings,
    ) -> TestHarness {
        let provider = Arc::new(provider);
        let sink = Arc::new(RecordingSink::new());
        let bridge = PasskeyBridge::builder()
            .with_provider(provider.clone())
            .with_sink(sink.clone())
            .with_lifecycle(lifecycle.clone())
            .with_settings(settings)
            .build()
            .expect("test harness requires a tokio runtime");

        TestHarness {
            bridge,
            provider,
            sink,
            lifecycle,
        }
    }
}

/// A bridge together with handles to its mocked collaborators
pub struct TestHarness {
    pub bridge: PasskeyBridge,
    pub provider: Arc<MockCredentialProvider>,
    pub sink: Arc<RecordingSink>,
    pub lifecycle: ActivityLifecycle,
}
