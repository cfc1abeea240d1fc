//! Host method channel tests
//!
//! Calls arrive as method names with JSON arguments and outcomes leave as
//! `passkey.<event>` invocations on the host channel.

use passkey_bridge::lifecycle::ActivityLifecycle;
use passkey_bridge::passkey::{Credential, HostInvocation};
use passkey_bridge::plugin::{
    MethodCall, MethodResult, PasskeyPlugin, CREATE_PASSKEY, GET_PASSKEY,
};
use passkey_bridge::settings::BridgeSettings;
use passkey_bridge::testing::{MockCredentialProvider, TestFixtures};
use serde_json::{json, Value};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;

async fn next_invocation(receiver: &mut UnboundedReceiver<HostInvocation>) -> HostInvocation {
    tokio::time::timeout(Duration::from_secs(2), receiver.recv())
        .await
        .expect("host invocation should arrive")
        .expect("channel should stay open")
}

#[tokio::test]
async fn test_get_passkey_round_trip() {
    let response_json = TestFixtures::authentication_response_json();
    let provider = MockCredentialProvider::new().with_credential(Credential::PublicKey {
        authentication_response_json: response_json.clone(),
    });
    let (plugin, mut receiver) = PasskeyPlugin::with_channel(
        &BridgeSettings::default(),
        Arc::new(provider),
        TestFixtures::attached_lifecycle(),
    )
    .unwrap();

    let result = plugin.handle(&MethodCall::new(
        GET_PASSKEY,
        json!({
            "requestJson": TestFixtures::request_options_json(),
            "preferImmediatelyAvailableCredentials": null
        }),
    ));
    assert_eq!(result, MethodResult::Success(Value::Null));

    let invocation = next_invocation(&mut receiver).await;
    assert_eq!(invocation.method, "passkey.onGetPasskeySuccess");
    assert_eq!(invocation.arguments, response_json);
}

#[tokio::test]
async fn test_undrained_host_receives_every_outcome() {
    let provider = Arc::new(MockCredentialProvider::echo());
    let (plugin, mut receiver) = PasskeyPlugin::with_channel(
        &BridgeSettings::default(),
        provider.clone(),
        TestFixtures::attached_lifecycle(),
    )
    .unwrap();

    let tasks: Vec<_> = (0..100)
        .map(|i| plugin.bridge().login(Some(format!("r{i}")), None))
        .collect();
    for task in tasks {
        task.wait().await;
    }
    assert_eq!(provider.get_call_count(), 100);

    let mut payloads = HashSet::new();
    while let Ok(invocation) = receiver.try_recv() {
        assert_eq!(invocation.method, "passkey.onGetPasskeySuccess");
        payloads.insert(invocation.arguments);
    }
    let expected: HashSet<String> = (0..100).map(|i| format!("response:r{i}")).collect();
    assert_eq!(payloads, expected);
}

#[tokio::test]
async fn test_create_passkey_without_request() {
    let (plugin, mut receiver) = PasskeyPlugin::with_channel(
        &BridgeSettings::default(),
        Arc::new(MockCredentialProvider::echo()),
        TestFixtures::attached_lifecycle(),
    )
    .unwrap();

    let result = plugin.handle(&MethodCall::new(
        CREATE_PASSKEY,
        json!({ "preferImmediatelyAvailableCredentials": true }),
    ));
    assert_eq!(result, MethodResult::Success(Value::Null));

    let invocation = next_invocation(&mut receiver).await;
    assert_eq!(invocation.method, "passkey.onCreatePasskeyFailed");
    assert_eq!(invocation.arguments, "MISSING_REQUEST");
    assert!(receiver.try_recv().is_err());
}

#[tokio::test]
async fn test_create_passkey_without_activity() {
    let (plugin, mut receiver) = PasskeyPlugin::with_channel(
        &BridgeSettings::default(),
        Arc::new(MockCredentialProvider::echo()),
        ActivityLifecycle::new(),
    )
    .unwrap();

    plugin.handle(&MethodCall::new(
        CREATE_PASSKEY,
        json!({ "requestJson": TestFixtures::creation_options_json() }),
    ));

    let invocation = next_invocation(&mut receiver).await;
    assert_eq!(invocation.method, "passkey.onCreatePasskeyFailed");
    assert_eq!(invocation.arguments, "NULL_ACTIVITY");
}

#[tokio::test]
async fn test_create_passkey_success_with_custom_prefix() {
    let mut settings = BridgeSettings::default();
    settings.channel.event_prefix = "auth".to_string();
    let (plugin, mut receiver) = PasskeyPlugin::with_channel(
        &settings,
        Arc::new(MockCredentialProvider::echo()),
        TestFixtures::attached_lifecycle(),
    )
    .unwrap();

    plugin.handle(&MethodCall::new(
        "createPasskey.v2",
        json!({ "requestJson": "{}", "preferImmediatelyAvailableCredentials": false }),
    ));

    let invocation = next_invocation(&mut receiver).await;
    assert_eq!(invocation.method, "auth.onCreatePasskeySuccess");
    assert_eq!(invocation.arguments, "registration:{}");
}

#[tokio::test]
async fn test_non_string_request_json_is_missing() {
    let provider = Arc::new(MockCredentialProvider::echo());
    let (plugin, mut receiver) = PasskeyPlugin::with_channel(
        &BridgeSettings::default(),
        provider.clone(),
        TestFixtures::attached_lifecycle(),
    )
    .unwrap();

    plugin.handle(&MethodCall::new(GET_PASSKEY, json!({ "requestJson": {"challenge": "x"} })));

    let invocation = next_invocation(&mut receiver).await;
    assert_eq!(invocation.method, "passkey.onGetPasskeyFailed");
    assert_eq!(invocation.arguments, "MISSING_REQUEST");
    assert_eq!(provider.get_call_count(), 0);
}

#[tokio::test]
async fn test_unknown_method_is_not_implemented() {
    let provider = Arc::new(MockCredentialProvider::echo());
    let (plugin, mut receiver) = PasskeyPlugin::with_channel(
        &BridgeSettings::default(),
        provider.clone(),
        TestFixtures::attached_lifecycle(),
    )
    .unwrap();

    let result = plugin.handle(&MethodCall::new("getPlatformVersion", Value::Null));

    assert_eq!(result, MethodResult::NotImplemented);
    assert!(receiver.try_recv().is_err());
    assert_eq!(provider.get_call_count(), 0);
    assert_eq!(provider.create_call_count(), 0);
}
