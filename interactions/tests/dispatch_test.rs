//! Integration tests for the interaction dispatch pipeline.

mod helpers;

use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use helpers::{
    command_body, ping_body, recording_callback, signed, test_application, EchoHandler,
    MockTransport, Signer, SlowHandler,
};
use howl_common::{InteractionResponseType, InteractionType};
use howl_interactions::application::{
    HookResult, InteractionError, InteractionHooks, RequestAuth,
};
use howl_interactions::ApplicationOptions;
use howl_interactions::Application;

const TIMESTAMP: &str = "1700000000";

#[tokio::test]
async fn ping_with_valid_signature_answers_pong() {
    let signer = Signer::new();
    let app = test_application(
        MockTransport::new(),
        EchoHandler::new(),
        &signer,
        Duration::from_millis(500),
    );

    let body = ping_body();
    let (signature, timestamp) = signer.auth(TIMESTAMP, &body);
    let (respond, sent) = recording_callback();

    app.handle_interaction(respond, &body, signed(&signature, &timestamp))
        .await
        .unwrap();

    let sent = sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].kind, InteractionResponseType::Pong);
}

#[tokio::test]
async fn invalid_signature_is_rejected_before_any_routing() {
    let signer = Signer::new();
    let handler = EchoHandler::new();
    let app = test_application(
        MockTransport::new(),
        Arc::clone(&handler) as Arc<dyn howl_interactions::InteractionHandler>,
        &signer,
        Duration::from_millis(500),
    );

    let body = ping_body();
    // Signed over a different body.
    let signature = signer.sign(TIMESTAMP, "{}");
    let (respond, sent) = recording_callback();

    let err = app
        .handle_interaction(respond, &body, signed(&signature, TIMESTAMP))
        .await
        .unwrap_err();

    assert!(matches!(err, InteractionError::Unauthorized { body: raw } if raw == body));
    assert!(sent.lock().unwrap().is_empty());
    assert!(!handler.invoked.load(Ordering::SeqCst));
}

#[tokio::test]
async fn missing_timestamp_is_rejected() {
    let signer = Signer::new();
    let app = test_application(
        MockTransport::new(),
        EchoHandler::new(),
        &signer,
        Duration::from_millis(500),
    );

    let body = ping_body();
    let signature = signer.sign(TIMESTAMP, &body);
    let (respond, sent) = recording_callback();

    let err = app
        .handle_interaction(
            respond,
            &body,
            RequestAuth::Signed {
                signature: Some(&signature),
                timestamp: None,
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, InteractionError::Unauthorized { .. }));
    assert!(sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn insecure_auth_skips_verification() {
    let signer = Signer::new();
    let app = test_application(
        MockTransport::new(),
        EchoHandler::new(),
        &signer,
        Duration::from_millis(500),
    );

    let (respond, sent) = recording_callback();
    app.handle_interaction(respond, &ping_body(), RequestAuth::Insecure)
        .await
        .unwrap();

    assert_eq!(sent.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn command_routes_to_the_configured_handler() {
    let signer = Signer::new();
    let handler = EchoHandler::new();
    let app = test_application(
        MockTransport::new(),
        Arc::clone(&handler) as Arc<dyn howl_interactions::InteractionHandler>,
        &signer,
        Duration::from_millis(500),
    );

    let body = command_body("ping");
    let (signature, timestamp) = signer.auth(TIMESTAMP, &body);
    let (respond, sent) = recording_callback();

    app.handle_interaction(respond, &body, signed(&signature, &timestamp))
        .await
        .unwrap();

    assert!(handler.invoked.load(Ordering::SeqCst));
    let sent = sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].kind, InteractionResponseType::ChannelMessageWithSource);
}

#[tokio::test]
async fn slow_handler_times_out_but_the_sink_stays_usable() {
    let signer = Signer::new();
    let app = test_application(
        MockTransport::new(),
        Arc::new(SlowHandler {
            delay: Duration::from_millis(120),
        }),
        &signer,
        Duration::from_millis(40),
    );

    let (respond, sent) = recording_callback();
    let err = app
        .handle_interaction(respond, &command_body("ping"), RequestAuth::Insecure)
        .await
        .unwrap_err();

    match err {
        InteractionError::HandlerTimedOut { interaction } => {
            assert_eq!(interaction.kind, InteractionType::ApplicationCommand);
        }
        other => panic!("expected timeout, got {other:?}"),
    }
    assert!(sent.lock().unwrap().is_empty());

    // The handler keeps running past the deadline and its late response
    // still reaches the callback.
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(sent.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn hook_short_circuits_routing() {
    let signer = Signer::new();
    let handler = EchoHandler::new();
    let options = ApplicationOptions::new(
        helpers::CLIENT_ID,
        signer.public_key_hex(),
        "test-token",
    );
    let app = Application::builder(options)
        .handler(Arc::clone(&handler) as Arc<dyn howl_interactions::InteractionHandler>)
        .transport(MockTransport::new())
        .hooks(InteractionHooks::on_interaction(|context| {
            Box::pin(async move {
                context
                    .sink
                    .send(howl_common::InteractionResponse::channel_message(
                        serde_json::json!({"content": "intercepted"}),
                    ))
                    .await
                    .unwrap();
                HookResult::Handled
            })
        }))
        .build()
        .unwrap();

    let (respond, sent) = recording_callback();
    app.handle_interaction(respond, &command_body("ping"), RequestAuth::Insecure)
        .await
        .unwrap();

    assert!(!handler.invoked.load(Ordering::SeqCst));
    let sent = sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].kind, InteractionResponseType::ChannelMessageWithSource);
}

#[tokio::test]
async fn unknown_interaction_kind_is_rejected() {
    let signer = Signer::new();
    let app = test_application(
        MockTransport::new(),
        EchoHandler::new(),
        &signer,
        Duration::from_millis(500),
    );

    let body = serde_json::json!({
        "id": "10",
        "application_id": helpers::CLIENT_ID,
        "type": 99,
        "token": "continuation",
        "version": 1,
    })
    .to_string();

    let (respond, sent) = recording_callback();
    let err = app
        .handle_interaction(respond, &body, RequestAuth::Insecure)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        InteractionError::UnknownInteractionType { kind: 99, .. }
    ));
    assert!(sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn malformed_body_is_an_invalid_payload() {
    let signer = Signer::new();
    let app = test_application(
        MockTransport::new(),
        EchoHandler::new(),
        &signer,
        Duration::from_millis(500),
    );

    let (respond, _) = recording_callback();
    let err = app
        .handle_interaction(respond, "not json", RequestAuth::Insecure)
        .await
        .unwrap_err();

    assert!(matches!(err, InteractionError::InvalidPayload(_)));
}
