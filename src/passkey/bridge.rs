//! Passkey bridge service
//!
//! `PasskeyBridge` validates a login or registration call, builds the
//! provider request, runs the provider call on the runtime, and reports
//! exactly one event to the notification sink. Calls that are cancelled by
//! the host lifecycle report nothing.

use log::{debug, error, info};
use serde_json::json;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use super::errors::{BridgeError, PasskeyError};
use super::events::{NotificationSink, PasskeyEvent};
use super::provider::CredentialProvider;
use super::settings::PasskeySettings;
use super::types::{
    CreateCredentialResponse, CreatePublicKeyCredentialRequest, Credential, CredentialOption,
    GetCredentialRequest,
};
use crate::lifecycle::{ActiveContext, ActivityLifecycle};

/// Handle to one bridge invocation
///
/// Hosts may drop it; the invocation still runs to completion. Awaiting
/// `wait` resolves once the outcome has been reported (or the invocation
/// was cancelled).
#[derive(Debug)]
pub struct PasskeyTask {
    handle: Option<JoinHandle<()>>,
}

impl PasskeyTask {
    fn rejected() -> Self {
        Self { handle: None }
    }

    fn dispatched(handle: JoinHandle<()>) -> Self {
        Self {
            handle: Some(handle),
        }
    }

    /// Whether the request reached the credential provider
    #[must_use]
    pub fn is_dispatched(&self) -> bool {
        self.handle.is_some()
    }

    /// Wait for the invocation to finish
    pub async fn wait(self) {
        if let Some(handle) = self.handle {
            if let Err(e) = handle.await {
                error!("Passkey task did not complete: {e}");
            }
        }
    }
}

/// Relays passkey requests from a host to the platform credential provider
#[derive(Clone)]
pub struct PasskeyBridge {
    provider: Arc<dyn CredentialProvider>,
    sink: Arc<dyn NotificationSink>,
    lifecycle: ActivityLifecycle,
    settings: PasskeySettings,
    runtime: Handle,
}

impl PasskeyBridge {
    /// Start building a bridge
    #[must_use]
    pub fn builder() -> PasskeyBridgeBuilder {
        PasskeyBridgeBuilder::new()
    }

    /// The lifecycle this bridge reads the foreground activity from
    #[must_use]
    pub fn lifecycle(&self) -> &ActivityLifecycle {
        &self.lifecycle
    }

    #[must_use]
    pub fn settings(&self) -> &PasskeySettings {
        &self.settings
    }

    /// Retrieve an existing passkey
    ///
    /// # Arguments
    /// * `request_json` - `PublicKeyCredentialRequestOptions` JSON
    /// * `prefer_immediate` - Only offer credentials available on this device;
    ///   the configured default applies when absent
    ///
    /// Reports `onGetPasskeySuccess` with the authentication response JSON,
    /// or `onGetPasskeyFailed` with a failure code.
    pub fn login(
        &self,
        request_json: Option<String>,
        prefer_immediate: Option<bool>,
    ) -> PasskeyTask {
        let (request_json, context) = match self.prepare(request_json) {
            Ok(prepared) => prepared,
            Err(err) => {
                report_failure(self.sink.as_ref(), PasskeyEvent::GetFailed, &err);
                return PasskeyTask::rejected();
            }
        };

        let request = self.login_request(request_json, prefer_immediate);
        let provider = Arc::clone(&self.provider);
        let sink = Arc::clone(&self.sink);
        let accept_password = self.settings.accept_password_credentials;

        debug!(
            "Dispatching login with {} option(s) to activity {}",
            request.options.len(),
            context.activity.name()
        );
        let handle = self.runtime.spawn(async move {
            let ActiveContext { activity, token } = context;
            let result = tokio::select! {
                biased;
                () = token.cancelled() => None,
                result = provider.get_credential(request, &activity) => Some(result),
            };
            let Some(result) = result else {
                debug!("Login cancelled, activity {} detached", activity.name());
                return;
            };

            match result
                .map_err(PasskeyError::from)
                .and_then(|response| {
                    debug!("Provider returned a {} credential", response.credential.kind());
                    login_payload(response.credential, accept_password)
                })
            {
                Ok(payload) => {
                    info!("Passkey login succeeded");
                    sink.notify(PasskeyEvent::GetSuccess, &payload);
                }
                Err(err) => report_failure(sink.as_ref(), PasskeyEvent::GetFailed, &err),
            }
        });
        PasskeyTask::dispatched(handle)
    }

    /// Register a new passkey
    ///
    /// # Arguments
    /// * `request_json` - `PublicKeyCredentialCreationOptions` JSON
    /// * `prefer_immediate` - the configured default applies when absent
    ///
    /// Reports `onCreatePasskeySuccess` with the provider's result in string
    /// form, or `onCreatePasskeyFailed` with a failure code.
    pub fn register(
        &self,
        request_json: Option<String>,
        prefer_immediate: Option<bool>,
    ) -> PasskeyTask {
        let (request_json, context) = match self.prepare(request_json) {
            Ok(prepared) => prepared,
            Err(err) => {
                report_failure(self.sink.as_ref(), PasskeyEvent::CreateFailed, &err);
                return PasskeyTask::rejected();
            }
        };

        let request = CreatePublicKeyCredentialRequest::new(
            request_json,
            prefer_immediate.unwrap_or(self.settings.default_prefer_immediate),
        );
        let provider = Arc::clone(&self.provider);
        let sink = Arc::clone(&self.sink);

        debug!("Dispatching registration to activity {}", context.activity.name());
        let handle = self.runtime.spawn(async move {
            let ActiveContext { activity, token } = context;
            let result = tokio::select! {
                biased;
                () = token.cancelled() => None,
                result = provider.create_credential(request, &activity) => Some(result),
            };
            let Some(result) = result else {
                debug!("Registration cancelled, activity {} detached", activity.name());
                return;
            };

            match result {
                Ok(response) => {
                    info!("Passkey registration succeeded");
                    sink.notify(PasskeyEvent::CreateSuccess, &registration_payload(&response));
                }
                Err(err) => report_failure(
                    sink.as_ref(),
                    PasskeyEvent::CreateFailed,
                    &PasskeyError::from(err),
                ),
            }
        });
        PasskeyTask::dispatched(handle)
    }

    /// Check the inputs every invocation needs before reaching the provider
    fn prepare(
        &self,
        request_json: Option<String>,
    ) -> Result<(String, ActiveContext), PasskeyError> {
        let request_json = request_json.ok_or(PasskeyError::MissingRequest)?;
        let context = self
            .lifecycle
            .current()
            .ok_or(PasskeyError::NoActiveContext)?;
        Ok((request_json, context))
    }

    fn login_request(
        &self,
        request_json: String,
        prefer_immediate: Option<bool>,
    ) -> GetCredentialRequest {
        let mut options = Vec::with_capacity(2);
        if self.settings.offer_password_option {
            options.push(CredentialOption::Password);
        }
        options.push(CredentialOption::PublicKey {
            request_json,
            prefer_immediately_available: prefer_immediate
                .unwrap_or(self.settings.default_prefer_immediate),
        });
        GetCredentialRequest::new(options)
    }
}

/// Map a returned credential to the success payload, or reject its kind
fn login_payload(credential: Credential, accept_password: bool) -> Result<String, PasskeyError> {
    match credential {
        Credential::PublicKey {
            authentication_response_json,
        } => Ok(authentication_response_json),
        Credential::Password { id, password } if accept_password => {
            Ok(json!({ "type": "password", "id": id, "password": password }).to_string())
        }
        Credential::Password { .. } => Err(PasskeyError::InvalidCredentialType(
            "password".to_string(),
        )),
        Credential::Other {
            credential_type, ..
        } => Err(PasskeyError::InvalidCredentialType(credential_type)),
    }
}

fn registration_payload(response: &CreateCredentialResponse) -> String {
    response.to_string()
}

fn report_failure(sink: &dyn NotificationSink, event: PasskeyEvent, err: &PasskeyError) {
    error!("{event}: {err}");
    sink.notify(event, err.code());
}

/// Builder assembling a `PasskeyBridge` from its collaborators
#[derive(Default)]
pub struct PasskeyBridgeBuilder {
    provider: Option<Arc<dyn CredentialProvider>>,
    sink: Option<Arc<dyn NotificationSink>>,
    lifecycle: Option<ActivityLifecycle>,
    settings: Option<PasskeySettings>,
    runtime: Option<Handle>,
}

impl PasskeyBridgeBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Platform credential provider the bridge dispatches to
    #[must_use]
    pub fn with_provider(mut self, provider: Arc<dyn CredentialProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Sink receiving every outcome
    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn NotificationSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Lifecycle shared with the host; a detached lifecycle is used if unset
    #[must_use]
    pub fn with_lifecycle(mut self, lifecycle: ActivityLifecycle) -> Self {
        self.lifecycle = Some(lifecycle);
        self
    }

    #[must_use]
    pub fn with_settings(mut self, settings: PasskeySettings) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Runtime the provider calls run on; defaults to the current runtime
    #[must_use]
    pub fn with_runtime(mut self, runtime: Handle) -> Self {
        self.runtime = Some(runtime);
        self
    }

    /// Assemble the bridge
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No provider or sink was supplied
    /// - No runtime was supplied and none is current
    pub fn build(self) -> Result<PasskeyBridge, BridgeError> {
        let provider = self.provider.ok_or(BridgeError::MissingProvider)?;
        let sink = self.sink.ok_or(BridgeError::MissingSink)?;
        let runtime = match self.runtime {
            Some(runtime) => runtime,
            None => Handle::try_current()?,
        };

        Ok(PasskeyBridge {
            provider,
            sink,
            lifecycle: self.lifecycle.unwrap_or_default(),
            settings: self.settings.unwrap_or_default(),
            runtime,
        })
    }
}
