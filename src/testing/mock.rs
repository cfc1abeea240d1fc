//! Mock objects and fake implementations for testing
//!
//! This module provides a scripted credential provider and a recording
//! notification sink for exercising the bridge without a platform.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::Notify;

use crate::lifecycle::ActivityHandle;
use crate::passkey::{
    CreateCredentialResponse, CreatePublicKeyCredentialRequest, Credential, CredentialOption,
    CredentialProvider, GetCredentialRequest, GetCredentialResponse, NotificationSink,
    PasskeyEvent, ProviderError,
};

type GetResult = Result<GetCredentialResponse, ProviderError>;
type CreateResult = Result<CreateCredentialResponse, ProviderError>;

/// Scripted credential provider
///
/// Queued responses are returned in order. Once the queue is empty the
/// provider either echoes the request (see [`MockCredentialProvider::echo`])
/// or fails with `TYPE_NO_CREDENTIAL`.
#[derive(Default)]
pub struct MockCredentialProvider {
    get_responses: Mutex<VecDeque<GetResult>>,
    create_responses: Mutex<VecDeque<CreateResult>>,
    get_calls: Mutex<Vec<(GetCredentialRequest, ActivityHandle)>>,
    create_calls: Mutex<Vec<(CreatePublicKeyCredentialRequest, ActivityHandle)>>,
    echo: bool,
    delay: Option<Duration>,
    gate: Option<Arc<Notify>>,
}

impl MockCredentialProvider {
    /// Create a provider with nothing queued
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a provider that answers every call from its request JSON
    ///
    /// Logins succeed with `response:<request_json>` and registrations with
    /// `registration:<request_json>`.
    #[must_use]
    pub fn echo() -> Self {
        Self {
            echo: true,
            ..Self::default()
        }
    }

    /// Queue a login outcome
    #[must_use]
    pub fn with_get_response(self, response: GetResult) -> Self {
        lock(&self.get_responses).push_back(response);
        self
    }

    /// Queue a successful login returning `credential`
    #[must_use]
    pub fn with_credential(self, credential: Credential) -> Self {
        self.with_get_response(Ok(GetCredentialResponse::new(credential)))
    }

    /// Queue a registration outcome
    #[must_use]
    pub fn with_create_response(self, response: CreateResult) -> Self {
        lock(&self.create_responses).push_back(response);
        self
    }

    /// Sleep before answering each call
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Hold every call until `gate` is notified
    #[must_use]
    pub fn with_gate(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    #[must_use]
    pub fn get_call_count(&self) -> usize {
        lock(&self.get_calls).len()
    }

    #[must_use]
    pub fn create_call_count(&self) -> usize {
        lock(&self.create_calls).len()
    }

    /// Login requests received so far
    #[must_use]
    pub fn get_requests(&self) -> Vec<GetCredentialRequest> {
        lock(&self.get_calls)
            .iter()
            .map(|(request, _)| request.clone())
            .collect()
    }

    /// Registration requests received so far
    #[must_use]
    pub fn create_requests(&self) -> Vec<CreatePublicKeyCredentialRequest> {
        lock(&self.create_calls)
            .iter()
            .map(|(request, _)| request.clone())
            .collect()
    }

    /// Activities the provider was asked to present on
    #[must_use]
    pub fn activities(&self) -> Vec<ActivityHandle> {
        let gets = lock(&self.get_calls);
        let creates = lock(&self.create_calls);
        gets.iter()
            .map(|(_, activity)| activity.clone())
            .chain(creates.iter().map(|(_, activity)| activity.clone()))
            .collect()
    }

    async fn pause(&self) {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
    }

    fn echo_login(request: &GetCredentialRequest) -> GetResult {
        match request.public_key_option() {
            Some(CredentialOption::PublicKey { request_json, .. }) => {
                Ok(GetCredentialResponse::new(Credential::PublicKey {
                    authentication_response_json: format!("response:{request_json}"),
                }))
            }
            _ => Err(ProviderError::new(ProviderError::TYPE_NO_CREDENTIAL)),
        }
    }
}

#[async_trait]
impl CredentialProvider for MockCredentialProvider {
    async fn get_credential(
        &self,
        request: GetCredentialRequest,
        activity: &ActivityHandle,
    ) -> Result<GetCredentialResponse, ProviderError> {
        lock(&self.get_calls).push((request.clone(), activity.clone()));
        self.pause().await;

        let queued = lock(&self.get_responses).pop_front();
        match queued {
            Some(response) => response,
            None if self.echo => Self::echo_login(&request),
            None => Err(ProviderError::new(ProviderError::TYPE_NO_CREDENTIAL)),
        }
    }

    async fn create_credential(
        &self,
        request: CreatePublicKeyCredentialRequest,
        activity: &ActivityHandle,
    ) -> Result<CreateCredentialResponse, ProviderError> {
        lock(&self.create_calls).push((request.clone(), activity.clone()));
        self.pause().await;

        let queued = lock(&self.create_responses).pop_front();
        match queued {
            Some(response) => response,
            None if self.echo => Ok(CreateCredentialResponse::PublicKey {
                registration_response_json: format!("registration:{}", request.request_json),
            }),
            None => Err(ProviderError::new(
                ProviderError::TYPE_CREATE_NO_CREATE_OPTIONS,
            )),
        }
    }
}

/// Notification sink recording every event it receives
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<(PasskeyEvent, String)>>,
}

impl RecordingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Events received so far, in delivery order
    #[must_use]
    pub fn events(&self) -> Vec<(PasskeyEvent, String)> {
        lock(&self.events).clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        lock(&self.events).len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl NotificationSink for RecordingSink {
    fn notify(&self, event: PasskeyEvent, payload: &str) {
        lock(&self.events).push((event, payload.to_string()));
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_provider_returns_queued_then_default() {
        let provider = MockCredentialProvider::new().with_credential(Credential::PublicKey {
            authentication_response_json: "{}".to_string(),
        });
        let activity = ActivityHandle::new("Main");
        let request = GetCredentialRequest::new(vec![CredentialOption::Password]);

        let first = provider.get_credential(request.clone(), &activity).await;
        assert!(first.is_ok());

        let second = provider.get_credential(request, &activity).await;
        assert_eq!(
            second.unwrap_err().error_type,
            ProviderError::TYPE_NO_CREDENTIAL
        );
        assert_eq!(provider.get_call_count(), 2);
        assert_eq!(provider.activities(), vec![activity.clone(), activity]);
    }

    #[tokio::test]
    async fn test_mock_provider_echo() {
        let provider = MockCredentialProvider::echo();
        let activity = ActivityHandle::new("Main");

        let created = provider
            .create_credential(
                CreatePublicKeyCredentialRequest::new("abc".to_string(), true),
                &activity,
            )
            .await
            .unwrap();
        assert_eq!(created.to_string(), "registration:abc");
        assert_eq!(provider.create_requests()[0].request_json, "abc");
    }

    #[test]
    fn test_recording_sink() {
        let sink = RecordingSink::new();
        assert!(sink.is_empty());

        sink.notify(PasskeyEvent::GetFailed, "NULL_ACTIVITY");
        assert_eq!(
            sink.events(),
            vec![(PasskeyEvent::GetFailed, "NULL_ACTIVITY".to_string())]
        );
    }
}
