//! Shared test helpers: a recording mock transport, canned handlers, and
//! request signing.

// Each test binary compiles this module separately and uses a subset of it.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use howl_common::InteractionResponse;
use howl_interactions::application::{
    Application, InteractionHandler, RequestAuth, ResponseCallback, ResponseSink,
};
use howl_interactions::components::{CacheError, MemoryStateCache, StateCache};
use howl_interactions::rest::{Method, Request, RestError, Transport};
use howl_interactions::ApplicationOptions;
use serde_json::Value;
use vodozemac::Ed25519Keypair;

/// Client id used by every test application.
pub const CLIENT_ID: &str = "100200300400";

/// Transport double that records every request and answers from a queue.
/// An empty queue answers `null`, which covers deletes.
#[derive(Default)]
pub struct MockTransport {
    requests: Mutex<Vec<Request>>,
    responses: Mutex<VecDeque<Value>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push_response(&self, response: Value) {
        self.responses.lock().unwrap().push_back(response);
    }

    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }

    pub fn count(&self, method: Method) -> usize {
        self.requests()
            .iter()
            .filter(|request| request.method == method)
            .count()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn execute(&self, request: Request) -> Result<Value, RestError> {
        self.requests.lock().unwrap().push(request);
        Ok(self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Value::Null))
    }
}

/// Signs request bodies the way the platform does.
pub struct Signer {
    keypair: Ed25519Keypair,
}

impl Signer {
    pub fn new() -> Self {
        Self {
            keypair: Ed25519Keypair::new(),
        }
    }

    pub fn public_key_hex(&self) -> String {
        hex::encode(self.keypair.public_key().as_bytes())
    }

    pub fn sign(&self, timestamp: &str, body: &str) -> String {
        let mut message = Vec::new();
        message.extend_from_slice(timestamp.as_bytes());
        message.extend_from_slice(body.as_bytes());
        hex::encode(self.keypair.sign(&message).to_bytes())
    }

    /// `RequestAuth` pieces for a correctly signed request.
    pub fn auth(&self, timestamp: &str, body: &str) -> (String, String) {
        (self.sign(timestamp, body), timestamp.to_owned())
    }
}

/// Callback that records every delivered response.
pub fn recording_callback() -> (ResponseCallback, Arc<Mutex<Vec<InteractionResponse>>>) {
    let sent = Arc::new(Mutex::new(Vec::new()));
    let recorded = Arc::clone(&sent);
    let callback: ResponseCallback = Arc::new(move |response| {
        let recorded = Arc::clone(&recorded);
        Box::pin(async move {
            recorded.lock().unwrap().push(response);
            Ok(())
        })
    });
    (callback, sent)
}

/// Handler that answers every routed interaction with a fixed message.
pub struct EchoHandler {
    pub invoked: AtomicBool,
}

impl EchoHandler {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            invoked: AtomicBool::new(false),
        })
    }
}

#[async_trait]
impl InteractionHandler for EchoHandler {
    async fn handle_command(
        &self,
        _application: Application,
        _interaction: howl_common::Interaction,
        sink: ResponseSink,
    ) -> anyhow::Result<()> {
        self.invoked.store(true, Ordering::SeqCst);
        sink.send(InteractionResponse::channel_message(
            serde_json::json!({"content": "echo"}),
        ))
        .await?;
        Ok(())
    }

    async fn handle_autocomplete(
        &self,
        _application: Application,
        _interaction: howl_common::Interaction,
        sink: ResponseSink,
    ) -> anyhow::Result<()> {
        self.invoked.store(true, Ordering::SeqCst);
        sink.send(InteractionResponse::autocomplete_result(
            serde_json::json!({"choices": []}),
        ))
        .await?;
        Ok(())
    }

    async fn handle_component(
        &self,
        _application: Application,
        _interaction: howl_common::Interaction,
        sink: ResponseSink,
    ) -> anyhow::Result<()> {
        self.invoked.store(true, Ordering::SeqCst);
        sink.send(InteractionResponse::deferred_message_update())
            .await?;
        Ok(())
    }
}

/// Handler that waits before responding; with a delay past the deadline it
/// drives the timeout path.
pub struct SlowHandler {
    pub delay: Duration,
}

#[async_trait]
impl InteractionHandler for SlowHandler {
    async fn handle_command(
        &self,
        _application: Application,
        _interaction: howl_common::Interaction,
        sink: ResponseSink,
    ) -> anyhow::Result<()> {
        tokio::time::sleep(self.delay).await;
        sink.send(InteractionResponse::channel_message(
            serde_json::json!({"content": "late"}),
        ))
        .await?;
        Ok(())
    }

    async fn handle_autocomplete(
        &self,
        _application: Application,
        _interaction: howl_common::Interaction,
        _sink: ResponseSink,
    ) -> anyhow::Result<()> {
        Ok(())
    }

    async fn handle_component(
        &self,
        _application: Application,
        _interaction: howl_common::Interaction,
        _sink: ResponseSink,
    ) -> anyhow::Result<()> {
        Ok(())
    }
}

/// State cache wrapper counting backend calls.
pub struct CountingCache {
    inner: MemoryStateCache,
    pub sets: AtomicUsize,
    pub gets: AtomicUsize,
    pub last_ttl: AtomicU64,
}

impl CountingCache {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            inner: MemoryStateCache::new(),
            sets: AtomicUsize::new(0),
            gets: AtomicUsize::new(0),
            last_ttl: AtomicU64::new(0),
        })
    }
}

#[async_trait]
impl StateCache for CountingCache {
    async fn set(&self, key: &str, ttl: u64, value: String) -> Result<(), CacheError> {
        self.sets.fetch_add(1, Ordering::SeqCst);
        self.last_ttl.store(ttl, Ordering::SeqCst);
        self.inner.set(key, ttl, value).await
    }

    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        self.inner.get(key).await
    }
}

/// An application wired to the mock transport with a short test deadline.
pub fn test_application(
    transport: Arc<MockTransport>,
    handler: Arc<dyn InteractionHandler>,
    signer: &Signer,
    timeout: Duration,
) -> Application {
    let options =
        ApplicationOptions::new(CLIENT_ID, signer.public_key_hex(), "test-token").timeout(timeout);
    Application::builder(options)
        .handler(handler)
        .transport(transport)
        .build()
        .unwrap()
}

/// Raw body of a ping interaction.
pub fn ping_body() -> String {
    serde_json::json!({
        "id": "10",
        "application_id": CLIENT_ID,
        "type": 1,
        "token": "continuation",
        "version": 1,
    })
    .to_string()
}

/// Raw body of a chat-input command invocation.
pub fn command_body(name: &str) -> String {
    serde_json::json!({
        "id": "11",
        "application_id": CLIENT_ID,
        "type": 2,
        "token": "continuation",
        "version": 1,
        "data": {"id": "55", "name": name, "type": 1},
    })
    .to_string()
}

/// A remote command object as the list endpoint returns it.
pub fn api_command(id: &str, kind: u8, name: &str, description: &str) -> Value {
    serde_json::json!({
        "id": id,
        "application_id": CLIENT_ID,
        "type": kind,
        "name": name,
        "description": description,
        "version": "1",
    })
}

/// Signed auth for `handle_interaction`, borrowing the owned header pair.
pub fn signed<'a>(signature: &'a str, timestamp: &'a str) -> RequestAuth<'a> {
    RequestAuth::Signed {
        signature: Some(signature),
        timestamp: Some(timestamp),
    }
}
