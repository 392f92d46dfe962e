//! Message Builder

use howl_common::{InteractionResponse, MessageFlags};
use serde::Serialize;
use serde_json::Value;

use super::ActionRowBuilder;

/// Builder for an interaction response message payload.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MessageBuilder {
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tts: Option<bool>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    embeds: Vec<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    allowed_mentions: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    flags: Option<u64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    components: Vec<Value>,
}

impl MessageBuilder {
    /// Start an empty message.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a plain text message.
    #[must_use]
    pub fn content(text: impl Into<String>) -> Self {
        Self {
            content: Some(text.into()),
            ..Self::default()
        }
    }

    /// Set the text content.
    #[must_use]
    pub fn set_content(mut self, text: impl Into<String>) -> Self {
        self.content = Some(text.into());
        self
    }

    /// Send as text-to-speech.
    #[must_use]
    pub const fn tts(mut self, tts: bool) -> Self {
        self.tts = Some(tts);
        self
    }

    /// Restrict which mentions in the content actually ping.
    #[must_use]
    pub fn allowed_mentions(mut self, allowed_mentions: Value) -> Self {
        self.allowed_mentions = Some(allowed_mentions);
        self
    }

    /// Append an embed payload.
    #[must_use]
    pub fn embed(mut self, embed: Value) -> Self {
        self.embeds.push(embed);
        self
    }

    /// Append a row of components.
    #[must_use]
    pub fn component_row(mut self, row: &ActionRowBuilder) -> Self {
        self.components.push(row.to_json());
        self
    }

    /// Show the message only to the invoking user.
    #[must_use]
    pub fn ephemeral(self, value: bool) -> Self {
        self.flag(MessageFlags::EPHEMERAL, value)
    }

    /// Do not render embeds for links in the content.
    #[must_use]
    pub fn suppress_embeds(self, value: bool) -> Self {
        self.flag(MessageFlags::SUPPRESS_EMBEDS, value)
    }

    fn flag(mut self, flag: MessageFlags, value: bool) -> Self {
        let mut flags = MessageFlags::from_bits_truncate(self.flags.unwrap_or(0));
        flags.set(flag, value);
        self.flags = Some(flags.bits());
        self
    }

    /// Serialize to the response-message payload shape.
    #[must_use]
    pub fn to_json(&self) -> Value {
        super::to_json(self)
    }

    /// Wrap as a message response.
    #[must_use]
    pub fn into_channel_message(self) -> InteractionResponse {
        InteractionResponse::channel_message(self.to_json())
    }

    /// Wrap as an edit of the message the interaction came from.
    #[must_use]
    pub fn into_update_message(self) -> InteractionResponse {
        InteractionResponse::update_message(self.to_json())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ephemeral_sets_and_clears_the_flag() {
        let message = MessageBuilder::content("secret").ephemeral(true);
        assert_eq!(message.to_json()["flags"], 64);

        let message = message.ephemeral(false);
        assert_eq!(message.to_json()["flags"], 0);
    }

    #[test]
    fn flags_accumulate() {
        let message = MessageBuilder::content("quiet")
            .ephemeral(true)
            .suppress_embeds(true);
        assert_eq!(message.to_json()["flags"], 64 | 4);
    }

    #[test]
    fn channel_message_response_shape() {
        let response = MessageBuilder::content("hi").into_channel_message();
        let encoded = serde_json::to_value(&response).unwrap();
        assert_eq!(encoded["type"], 4);
        assert_eq!(encoded["data"]["content"], "hi");
    }
}
