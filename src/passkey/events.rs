//! Outcome events and the sinks that deliver them to the host

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use tokio::sync::mpsc;

/// The four outcomes a bridge invocation can report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PasskeyEvent {
    #[serde(rename = "onGetPasskeySuccess")]
    GetSuccess,
    #[serde(rename = "onGetPasskeyFailed")]
    GetFailed,
    #[serde(rename = "onCreatePasskeySuccess")]
    CreateSuccess,
    #[serde(rename = "onCreatePasskeyFailed")]
    CreateFailed,
}

impl PasskeyEvent {
    /// Event name as seen by the host
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            PasskeyEvent::GetSuccess => "onGetPasskeySuccess",
            PasskeyEvent::GetFailed => "onGetPasskeyFailed",
            PasskeyEvent::CreateSuccess => "onCreatePasskeySuccess",
            PasskeyEvent::CreateFailed => "onCreatePasskeyFailed",
        }
    }

    #[must_use]
    pub fn is_failure(self) -> bool {
        matches!(self, PasskeyEvent::GetFailed | PasskeyEvent::CreateFailed)
    }
}

impl fmt::Display for PasskeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Receives the single outcome of every login or registration
///
/// Implementations are shared across tasks and may be called from any
/// runtime worker thread.
pub trait NotificationSink: Send + Sync {
    /// Deliver one outcome
    ///
    /// # Arguments
    /// * `event` - Which outcome occurred
    /// * `payload` - Response JSON on success, failure code otherwise
    fn notify(&self, event: PasskeyEvent, payload: &str);
}

/// A method invocation addressed to the host side of a plugin channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostInvocation {
    pub method: String,
    pub arguments: String,
}

/// Sink that forwards events to the host over an mpsc channel
///
/// Each event becomes a `HostInvocation` whose method is
/// `<prefix>.<eventName>`, for example `passkey.onGetPasskeySuccess`.
/// The channel is unbounded so a slow host never costs an outcome; events
/// are only dropped once the host has closed its receiver.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    prefix: String,
    sender: mpsc::UnboundedSender<HostInvocation>,
}

impl ChannelSink {
    /// Create a sink and the receiver the host reads invocations from
    #[must_use]
    pub fn new(prefix: &str) -> (Self, mpsc::UnboundedReceiver<HostInvocation>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (
            Self {
                prefix: prefix.to_string(),
                sender,
            },
            receiver,
        )
    }

    /// Method name used for an event
    #[must_use]
    pub fn method_for(&self, event: PasskeyEvent) -> String {
        if self.prefix.is_empty() {
            event.as_str().to_string()
        } else {
            format!("{}.{}", self.prefix, event.as_str())
        }
    }
}

impl NotificationSink for ChannelSink {
    fn notify(&self, event: PasskeyEvent, payload: &str) {
        let invocation = HostInvocation {
            method: self.method_for(event),
            arguments: payload.to_string(),
        };
        match self.sender.send(invocation) {
            Ok(()) => debug!("Delivered {event} to host channel"),
            Err(_) => warn!("Host channel closed, dropping {event}"),
        }
    }
}
