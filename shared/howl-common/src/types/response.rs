//! Interaction Response Types

use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_repr::{Deserialize_repr, Serialize_repr};

/// Kind of an interaction response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_repr, Deserialize_repr)]
#[repr(u8)]
pub enum InteractionResponseType {
    /// Acknowledgment of a ping.
    Pong = 1,
    /// Respond with a message.
    ChannelMessageWithSource = 4,
    /// Acknowledge now, send the message later.
    DeferredChannelMessageWithSource = 5,
    /// Acknowledge a component interaction, edit the message later.
    DeferredMessageUpdate = 6,
    /// Edit the message the component was attached to.
    UpdateMessage = 7,
    /// Autocomplete suggestions.
    ApplicationCommandAutocompleteResult = 8,
    /// Open a modal.
    Modal = 9,
}

/// Outbound response envelope. Exactly one is delivered per interaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionResponse {
    /// Response kind.
    #[serde(rename = "type")]
    pub kind: InteractionResponseType,
    /// Kind-specific payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl InteractionResponse {
    /// Fixed acknowledgment for a ping interaction.
    #[must_use]
    pub const fn pong() -> Self {
        Self {
            kind: InteractionResponseType::Pong,
            data: None,
        }
    }

    /// Respond with a message payload.
    #[must_use]
    pub const fn channel_message(data: Value) -> Self {
        Self {
            kind: InteractionResponseType::ChannelMessageWithSource,
            data: Some(data),
        }
    }

    /// Acknowledge now and follow up within the platform's followup window.
    #[must_use]
    pub const fn deferred_channel_message() -> Self {
        Self {
            kind: InteractionResponseType::DeferredChannelMessageWithSource,
            data: None,
        }
    }

    /// Acknowledge a component interaction without an immediate edit.
    #[must_use]
    pub const fn deferred_message_update() -> Self {
        Self {
            kind: InteractionResponseType::DeferredMessageUpdate,
            data: None,
        }
    }

    /// Edit the message the interaction's component was attached to.
    #[must_use]
    pub const fn update_message(data: Value) -> Self {
        Self {
            kind: InteractionResponseType::UpdateMessage,
            data: Some(data),
        }
    }

    /// Autocomplete choices, `{"choices": [...]}`.
    #[must_use]
    pub const fn autocomplete_result(data: Value) -> Self {
        Self {
            kind: InteractionResponseType::ApplicationCommandAutocompleteResult,
            data: Some(data),
        }
    }

    /// Open a modal.
    #[must_use]
    pub const fn modal(data: Value) -> Self {
        Self {
            kind: InteractionResponseType::Modal,
            data: Some(data),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pong_wire_shape() {
        let encoded = serde_json::to_value(InteractionResponse::pong()).unwrap();
        assert_eq!(encoded, serde_json::json!({"type": 1}));
    }
}
