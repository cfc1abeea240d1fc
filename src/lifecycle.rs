//! Foreground activity tracking
//!
//! The platform credential UI needs a foreground activity to attach to. The
//! host reports attach and detach transitions here. Every attachment carries
//! a cancellation token, so work started for an activity stops reporting once
//! that activity is torn down.

use log::{debug, info};
use std::sync::{Arc, PoisonError, RwLock};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

/// Identity of a foreground activity handed to the credential provider
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ActivityHandle {
    id: Uuid,
    name: String,
}

impl ActivityHandle {
    /// Create a handle with a fresh identity
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
        }
    }

    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A foreground activity together with the token scoping work started for it
#[derive(Debug, Clone)]
pub struct ActiveContext {
    pub activity: ActivityHandle,
    pub token: CancellationToken,
}

#[derive(Debug)]
struct Attachment {
    activity: ActivityHandle,
    token: CancellationToken,
}

/// Shared view of the host's current foreground activity
#[derive(Debug, Clone, Default)]
pub struct ActivityLifecycle {
    current: Arc<RwLock<Option<Attachment>>>,
}

impl ActivityLifecycle {
    /// Create a lifecycle with no activity attached
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a lifecycle with an activity already attached
    #[must_use]
    pub fn with_activity(activity: ActivityHandle) -> Self {
        let lifecycle = Self::new();
        lifecycle.attach(activity);
        lifecycle
    }

    /// Attach a foreground activity
    ///
    /// Replacing a different activity cancels work started for the old one.
    pub fn attach(&self, activity: ActivityHandle) {
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = current.as_ref() {
            if previous.activity == activity {
                return;
            }
            previous.token.cancel();
        }
        info!("Attached activity {} ({})", activity.name(), activity.id());
        *current = Some(Attachment {
            activity,
            token: CancellationToken::new(),
        });
    }

    /// Detach the current activity, cancelling work started for it
    pub fn detach(&self) -> Option<ActivityHandle> {
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        current.take().map(|attachment| {
            attachment.token.cancel();
            info!(
                "Detached activity {} ({})",
                attachment.activity.name(),
                attachment.activity.id()
            );
            attachment.activity
        })
    }

    /// Detach while the activity is recreated for a configuration change
    ///
    /// The old activity instance is destroyed, so its work is cancelled the
    /// same way as a full detach.
    pub fn detach_for_config_changes(&self) -> Option<ActivityHandle> {
        debug!("Detaching activity for configuration change");
        self.detach()
    }

    /// Attach the activity recreated after a configuration change
    pub fn reattach_for_config_changes(&self, activity: ActivityHandle) {
        debug!("Reattaching activity after configuration change");
        self.attach(activity);
    }

    /// The current activity and a token cancelled when it detaches
    #[must_use]
    pub fn current(&self) -> Option<ActiveContext> {
        let current = self.current.read().unwrap_or_else(PoisonError::into_inner);
        current.as_ref().map(|attachment| ActiveContext {
            activity: attachment.activity.clone(),
            token: attachment.token.child_token(),
        })
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}
