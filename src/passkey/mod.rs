//! Passkey relay between a host application and the platform credential manager
//!
//! This module owns the request envelopes, the provider and sink seams, and the
//! bridge that ties them together. It performs no `WebAuthn` processing of its
//! own: challenge and response JSON pass through untouched.

// Core settings
mod settings;
pub use settings::PasskeySettings;

// Request and result envelopes
mod types;
pub use types::*;

// Failure codes
mod errors;
pub use errors::{BridgeError, PasskeyError, ProviderError};

// Collaborator seams
mod events;
pub use events::{ChannelSink, HostInvocation, NotificationSink, PasskeyEvent};

mod provider;
pub use provider::CredentialProvider;

// Service layer
mod bridge;
pub use bridge::{PasskeyBridge, PasskeyBridgeBuilder, PasskeyTask};
