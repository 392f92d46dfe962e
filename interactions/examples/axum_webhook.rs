//! Minimal webhook endpoint wired into the interaction dispatcher.
//!
//! Run with:
//! `HOWL_CLIENT_ID=... HOWL_PUBLIC_KEY=... HOWL_TOKEN=... cargo run --example axum_webhook`

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use howl_common::Interaction;
use howl_interactions::builders::{MessageBuilder, SlashCommandBuilder};
use howl_interactions::commands::Command;
use howl_interactions::{
    Application, ApplicationOptions, InteractionError, InteractionHandler, RequestAuth,
    ResponseCallback, ResponseSink,
};
use serde_json::Value;
use tracing::info;

struct PingPongHandler;

#[async_trait]
impl InteractionHandler for PingPongHandler {
    async fn handle_command(
        &self,
        _application: Application,
        interaction: Interaction,
        sink: ResponseSink,
    ) -> anyhow::Result<()> {
        let name = interaction
            .command_data()
            .map(|data| data.name)
            .unwrap_or_default();

        let message = match name.as_str() {
            "ping" => MessageBuilder::content("Pong!"),
            other => MessageBuilder::content(format!("No handler for /{other}")).ephemeral(true),
        };
        sink.send(message.into_channel_message()).await?;
        Ok(())
    }

    async fn handle_autocomplete(
        &self,
        _application: Application,
        _interaction: Interaction,
        sink: ResponseSink,
    ) -> anyhow::Result<()> {
        sink.send(howl_common::InteractionResponse::autocomplete_result(
            serde_json::json!({"choices": []}),
        ))
        .await?;
        Ok(())
    }

    async fn handle_component(
        &self,
        _application: Application,
        _interaction: Interaction,
        sink: ResponseSink,
    ) -> anyhow::Result<()> {
        sink.send(howl_common::InteractionResponse::deferred_message_update())
            .await?;
        Ok(())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "axum_webhook=debug,howl_interactions=debug".into()),
        )
        .init();

    let options = ApplicationOptions::from_env()?;
    let app = Application::builder(options)
        .handler(Arc::new(PingPongHandler))
        .build()?;

    app.commands()
        .register(vec![Command::slash(SlashCommandBuilder::new(
            "ping", "Pong!",
        ))])
        .await?;

    let router = Router::new()
        .route("/interactions", post(interactions))
        .with_state(app);

    let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
    info!("Listening on 0.0.0.0:8080");
    axum::serve(listener, router).await?;
    Ok(())
}

async fn interactions(
    State(app): State<Application>,
    headers: HeaderMap,
    body: String,
) -> Result<Json<Value>, StatusCode> {
    let signature = headers
        .get("X-Signature-Ed25519")
        .and_then(|value| value.to_str().ok());
    let timestamp = headers
        .get("X-Signature-Timestamp")
        .and_then(|value| value.to_str().ok());

    // The dispatcher resolves once the handler finishes; the response itself
    // arrives through the callback, usually earlier.
    let (tx, rx) = tokio::sync::oneshot::channel();
    let tx = Arc::new(Mutex::new(Some(tx)));
    let respond: ResponseCallback = Arc::new(move |response| {
        let tx = Arc::clone(&tx);
        Box::pin(async move {
            if let Some(tx) = tx.lock().expect("response channel poisoned").take() {
                let _ = tx.send(response);
            }
            Ok(())
        })
    });

    let auth = RequestAuth::Signed {
        signature,
        timestamp,
    };

    match app.handle_interaction(respond, &body, auth).await {
        Ok(()) => {}
        Err(InteractionError::Unauthorized { .. }) => return Err(StatusCode::UNAUTHORIZED),
        Err(InteractionError::InvalidPayload(_)) => return Err(StatusCode::BAD_REQUEST),
        Err(error) => {
            tracing::error!("Interaction handling failed: {}", error);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    }

    match rx.await {
        Ok(response) => Ok(Json(
            serde_json::to_value(&response).map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?,
        )),
        Err(_) => Err(StatusCode::INTERNAL_SERVER_ERROR),
    }
}
