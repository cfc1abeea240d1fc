//! Testing utilities for passkey-bridge
//!
//! Hosts and this crate's own tests use these helpers to drive the bridge
//! without a platform credential manager.
//!
//! ## Organization
//!
//! - [`fixtures`] - Sample `WebAuthn` payloads and pre-wired bridges
//! - [`assertions`] - Assertion helpers over recorded events
//! - [`mock`] - Scripted provider and recording sink
//!
//! ## Usage
//!
//! Enable the `testing` feature to use these helpers outside this crate.
//!
//! ```rust,ignore
//! use passkey_bridge::testing::{fixtures::TestFixtures, mock::MockCredentialProvider};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let harness = TestFixtures::harness(MockCredentialProvider::echo());
//! harness
//!     .bridge
//!     .login(Some(TestFixtures::request_options_json()), None)
//!     .wait()
//!     .await;
//! assert_eq!(harness.sink.len(), 1);
//! # }
//! ```

pub mod assertions;
pub mod fixtures;
pub mod mock;

// Re-export commonly used items for convenience
pub use assertions::*;
pub use fixtures::{TestFixtures, TestHarness};
pub use mock::{MockCredentialProvider, RecordingSink};

/// Common test constants
pub mod constants {
    /// Relying party used by the sample payloads
    pub const TEST_RP_ID: &str = "example.com";

    /// Base64url challenge used by the sample payloads
    pub const TEST_CHALLENGE: &str = "dGVzdC1jaGFsbGVuZ2UtMTIz";

    /// Base64url credential id used by the sample payloads
    pub const TEST_CREDENTIAL_ID: &str = "Y3JlZGVudGlhbC1pZC00NTY";

    /// Name given to the attached test activity
    pub const TEST_ACTIVITY: &str = "MainActivity";
}
