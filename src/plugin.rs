//! Plugin method channel
//!
//! Hosts deliver calls as a method name plus JSON arguments. This module
//! routes the passkey methods to the bridge and answers every call right
//! away; the outcome of a passkey call arrives later through the sink.

use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::lifecycle::ActivityLifecycle;
use crate::passkey::{BridgeError, ChannelSink, CredentialProvider, HostInvocation, PasskeyBridge};
use crate::settings::BridgeSettings;

/// Method that starts a passkey login
pub const GET_PASSKEY: &str = "getPasskey";
/// Method that starts a passkey registration
pub const CREATE_PASSKEY: &str = "createPasskey";

const REQUEST_JSON_ARG: &str = "requestJson";
const PREFER_IMMEDIATE_ARG: &str = "preferImmediatelyAvailableCredentials";

/// A call received from the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodCall {
    pub method: String,
    #[serde(default)]
    pub arguments: Value,
}

impl MethodCall {
    #[must_use]
    pub fn new(method: &str, arguments: Value) -> Self {
        Self {
            method: method.to_string(),
            arguments,
        }
    }

    /// String argument, or `None` if absent or not a string
    #[must_use]
    pub fn string_argument(&self, name: &str) -> Option<String> {
        self.arguments
            .get(name)
            .and_then(Value::as_str)
            .map(ToString::to_string)
    }

    /// Boolean argument, or `None` if absent or not a boolean
    #[must_use]
    pub fn bool_argument(&self, name: &str) -> Option<bool> {
        self.arguments.get(name).and_then(Value::as_bool)
    }

    /// The method name up to the first `.`, used for routing
    #[must_use]
    pub fn route(&self) -> &str {
        self.method
            .split_once('.')
            .map_or(self.method.as_str(), |(first, _)| first)
    }
}

/// Immediate reply to a host call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MethodResult {
    Success(Value),
    NotImplemented,
}

/// Routes host method calls to a passkey bridge
#[derive(Clone)]
pub struct PasskeyPlugin {
    bridge: PasskeyBridge,
}

impl PasskeyPlugin {
    #[must_use]
    pub fn new(bridge: PasskeyBridge) -> Self {
        Self { bridge }
    }

    /// Wire a plugin whose events reach the host over a channel
    ///
    /// Returns the plugin and the receiver the host drains invocations from.
    ///
    /// # Errors
    ///
    /// Returns an error if no tokio runtime is current.
    pub fn with_channel(
        settings: &BridgeSettings,
        provider: Arc<dyn CredentialProvider>,
        lifecycle: ActivityLifecycle,
    ) -> Result<(Self, mpsc::UnboundedReceiver<HostInvocation>), BridgeError> {
        let (sink, receiver) = ChannelSink::new(&settings.channel.event_prefix);
        let bridge = PasskeyBridge::builder()
            .with_provider(provider)
            .with_sink(Arc::new(sink))
            .with_lifecycle(lifecycle)
            .with_settings(settings.passkeys.clone())
            .build()?;
        Ok((Self::new(bridge), receiver))
    }

    #[must_use]
    pub fn bridge(&self) -> &PasskeyBridge {
        &self.bridge
    }

    /// Handle one call from the host
    pub fn handle(&self, call: &MethodCall) -> MethodResult {
        match call.route() {
            GET_PASSKEY => {
                debug!("Host requested passkey login");
                // The outcome is reported through the sink
                let _task = self.bridge.login(
                    call.string_argument(REQUEST_JSON_ARG),
                    call.bool_argument(PREFER_IMMEDIATE_ARG),
                );
                MethodResult::Success(Value::Null)
            }
            CREATE_PASSKEY => {
                debug!("Host requested passkey registration");
                let _task = self.bridge.register(
                    call.string_argument(REQUEST_JSON_ARG),
                    call.bool_argument(PREFER_IMMEDIATE_ARG),
                );
                MethodResult::Success(Value::Null)
            }
            other => {
                debug!("Method {other} not implemented");
                MethodResult::NotImplemented
            }
        }
    }
}
