#![warn(clippy::pedantic)]
#![warn(clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Relay passkey login and registration requests to a platform credential
//! manager and report each outcome to a plugin host.

/// Version of the passkey-bridge library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod lifecycle;
pub mod passkey;
pub mod plugin;
pub mod settings;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
pub mod utils;

/// Re-export commonly used items
pub use lifecycle::{ActivityHandle, ActivityLifecycle};
pub use passkey::{
    BridgeError, CredentialProvider, NotificationSink, PasskeyBridge, PasskeyBridgeBuilder,
    PasskeyError, PasskeyEvent, PasskeyTask, ProviderError,
};
pub use plugin::{MethodCall, MethodResult, PasskeyPlugin};
pub use settings::BridgeSettings;
