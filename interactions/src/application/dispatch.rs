//! Interaction dispatch state machine.

use std::sync::Arc;

use howl_common::{Interaction, InteractionResponse, InteractionType};
use howl_crypto::verify_interaction_signature;
use thiserror::Error;
use tracing::{debug, warn};

use super::alarm::DeadlineAlarm;
use super::hooks::{HookResult, InteractionContext};
use super::sink::{ResponseCallback, ResponseSink, SinkError};
use super::Application;

/// Authentication input for one webhook request.
#[derive(Debug, Clone, Copy)]
pub enum RequestAuth<'a> {
    /// Verify the signature headers against the raw body. A missing header
    /// rejects the request.
    Signed {
        /// Hex-encoded detached signature header.
        signature: Option<&'a str>,
        /// Timestamp header, signed together with the body.
        timestamp: Option<&'a str>,
    },
    /// Skip verification entirely. This bypasses a security control; only
    /// for transports that are trusted end to end, such as local testing.
    Insecure,
}

/// Errors from handling one interaction request.
#[derive(Debug, Error)]
pub enum InteractionError {
    /// Signature missing or invalid. No deadline was started and nothing
    /// was routed.
    #[error("interaction request failed signature verification")]
    Unauthorized {
        /// Raw request body, verbatim.
        body: String,
    },
    /// The body did not parse as an interaction envelope.
    #[error("invalid interaction payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),
    /// No response was delivered before the deadline. The routed handler
    /// may still complete afterward; nothing it already did is rolled back.
    #[error("no response was delivered before the deadline")]
    HandlerTimedOut {
        /// The interaction that timed out.
        interaction: Interaction,
    },
    /// Interaction kind outside the known set.
    #[error("unknown interaction type {kind}")]
    UnknownInteractionType {
        /// Raw kind tag.
        kind: u8,
        /// The unrouted interaction.
        interaction: Interaction,
    },
    /// Delivering the inline pong failed.
    #[error(transparent)]
    Response(#[from] SinkError),
    /// The routed handler returned an error.
    #[error("interaction handler failed: {0}")]
    Handler(anyhow::Error),
}

#[derive(Clone, Copy)]
enum RoutedKind {
    Command,
    Autocomplete,
    Component,
}

impl Application {
    /// Handle one incoming interaction request.
    ///
    /// `body` must be the exact bytes received; authentication depends on
    /// byte-exact reproduction. Exactly one of response delivery (through
    /// `respond`) or a returned error happens per call. The deadline starts
    /// once the request is authenticated and is cleared on every terminal
    /// path except the timeout itself.
    pub async fn handle_interaction(
        &self,
        respond: ResponseCallback,
        body: &str,
        auth: RequestAuth<'_>,
    ) -> Result<(), InteractionError> {
        if let RequestAuth::Signed {
            signature,
            timestamp,
        } = auth
        {
            let verified = match (signature, timestamp) {
                (Some(signature), Some(timestamp)) => verify_interaction_signature(
                    &self.inner.public_key,
                    timestamp,
                    signature,
                    body,
                ),
                _ => false,
            };
            if !verified {
                warn!("Rejected interaction with missing or invalid signature");
                return Err(InteractionError::Unauthorized {
                    body: body.to_owned(),
                });
            }
        }

        let interaction: Interaction = serde_json::from_str(body)?;

        // The deadline is armed here, before hooks and routing, so every
        // later phase counts against it.
        let alarm = DeadlineAlarm::new(self.inner.timeout);
        let sink = ResponseSink::new(respond, alarm.handle());

        if let Some(hook) = &self.inner.hooks.interaction {
            let context = InteractionContext {
                application: self.clone(),
                interaction: interaction.clone(),
                sink: sink.clone(),
            };
            let outcome = tokio::select! {
                () = alarm.fired() => {
                    warn!(interaction = %interaction.id, "Hook did not finish before the deadline");
                    return Err(InteractionError::HandlerTimedOut { interaction });
                }
                outcome = hook(context) => outcome,
            };
            if outcome == HookResult::Handled {
                debug!(interaction = %interaction.id, "Interaction short-circuited by hook");
                alarm.cancel();
                return Ok(());
            }
        }

        match interaction.kind {
            InteractionType::Ping => {
                // Fixed one-shot acknowledgment, handled inline. Delivery
                // through the sink clears the deadline.
                sink.send(InteractionResponse::pong()).await?;
                debug!(interaction = %interaction.id, "Answered ping");
                Ok(())
            }
            InteractionType::ApplicationCommand => {
                self.route(RoutedKind::Command, interaction, sink, &alarm)
                    .await
            }
            InteractionType::ApplicationCommandAutocomplete => {
                self.route(RoutedKind::Autocomplete, interaction, sink, &alarm)
                    .await
            }
            InteractionType::MessageComponent | InteractionType::ModalSubmit => {
                self.route(RoutedKind::Component, interaction, sink, &alarm)
                    .await
            }
            InteractionType::Unknown(kind) => {
                alarm.cancel();
                warn!(kind, "Received interaction of unknown type");
                Err(InteractionError::UnknownInteractionType { kind, interaction })
            }
        }
    }

    /// Hand the interaction to the configured handler on its own task and
    /// race it against the deadline. On timeout the task keeps running and
    /// the sink stays usable; only the dispatch future fails.
    async fn route(
        &self,
        routed: RoutedKind,
        interaction: Interaction,
        sink: ResponseSink,
        alarm: &DeadlineAlarm,
    ) -> Result<(), InteractionError> {
        let handler = Arc::clone(&self.inner.handler);
        let application = self.clone();
        let task_interaction = interaction.clone();

        let task = tokio::spawn(async move {
            match routed {
                RoutedKind::Command => {
                    handler
                        .handle_command(application, task_interaction, sink)
                        .await
                }
                RoutedKind::Autocomplete => {
                    handler
                        .handle_autocomplete(application, task_interaction, sink)
                        .await
                }
                RoutedKind::Component => {
                    handler
                        .handle_component(application, task_interaction, sink)
                        .await
                }
            }
        });

        tokio::select! {
            () = alarm.fired() => {
                warn!(interaction = %interaction.id, "No response delivered before the deadline");
                Err(InteractionError::HandlerTimedOut { interaction })
            }
            joined = task => {
                alarm.cancel();
                match joined {
                    Ok(Ok(())) => Ok(()),
                    Ok(Err(error)) => Err(InteractionError::Handler(error)),
                    Err(join_error) => Err(InteractionError::Handler(anyhow::anyhow!(
                        "handler task panicked: {join_error}"
                    ))),
                }
            }
        }
    }
}
