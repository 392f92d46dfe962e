//! Interaction Envelope Types

use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_repr::{Deserialize_repr, Serialize_repr};

use super::{ApplicationCommandType, ComponentType, Snowflake};

/// Kind of an incoming interaction.
///
/// Kinds outside the known set are preserved as [`Unknown`](Self::Unknown)
/// so the dispatcher can reject them without failing to parse the envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum InteractionType {
    /// Liveness probe; answered with a fixed pong.
    Ping,
    /// A user invoked an application command.
    ApplicationCommand,
    /// A user interacted with a message component.
    MessageComponent,
    /// An autocomplete request for a command option.
    ApplicationCommandAutocomplete,
    /// A user submitted a modal.
    ModalSubmit,
    /// A kind this library does not know about.
    Unknown(u8),
}

impl From<u8> for InteractionType {
    fn from(value: u8) -> Self {
        match value {
            1 => Self::Ping,
            2 => Self::ApplicationCommand,
            3 => Self::MessageComponent,
            4 => Self::ApplicationCommandAutocomplete,
            5 => Self::ModalSubmit,
            other => Self::Unknown(other),
        }
    }
}

impl From<InteractionType> for u8 {
    fn from(value: InteractionType) -> Self {
        match value {
            InteractionType::Ping => 1,
            InteractionType::ApplicationCommand => 2,
            InteractionType::MessageComponent => 3,
            InteractionType::ApplicationCommandAutocomplete => 4,
            InteractionType::ModalSubmit => 5,
            InteractionType::Unknown(other) => other,
        }
    }
}

/// An incoming interaction event.
///
/// Created by the platform, parsed once per request, never persisted. The
/// kind-specific payload stays as raw JSON; use [`Interaction::command_data`]
/// and friends to view it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interaction {
    /// Interaction id.
    pub id: Snowflake,
    /// Id of the receiving application.
    pub application_id: Snowflake,
    /// Interaction kind.
    #[serde(rename = "type")]
    pub kind: InteractionType,
    /// Kind-specific payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    /// Guild the interaction was sent from, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<Snowflake>,
    /// Channel the interaction was sent from, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<Snowflake>,
    /// Guild member that triggered the interaction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member: Option<Value>,
    /// User that triggered the interaction (DM context).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<Value>,
    /// Continuation token for responding to the interaction.
    pub token: String,
    /// Envelope version, currently always 1.
    pub version: u8,
    /// Message the interaction was attached to (components).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<Value>,
    /// Locale of the invoking user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    /// Preferred locale of the guild.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guild_locale: Option<String>,
    /// Permissions of the application in the source context.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_permissions: Option<String>,
}

impl Interaction {
    /// Command invocation payload, for command and autocomplete kinds.
    #[must_use]
    pub fn command_data(&self) -> Option<CommandInteractionData> {
        self.data
            .as_ref()
            .and_then(|data| serde_json::from_value(data.clone()).ok())
    }

    /// Component interaction payload.
    #[must_use]
    pub fn component_data(&self) -> Option<ComponentInteractionData> {
        self.data
            .as_ref()
            .and_then(|data| serde_json::from_value(data.clone()).ok())
    }

    /// Modal submit payload.
    #[must_use]
    pub fn modal_data(&self) -> Option<ModalInteractionData> {
        self.data
            .as_ref()
            .and_then(|data| serde_json::from_value(data.clone()).ok())
    }
}

/// Payload of a command invocation or autocomplete interaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandInteractionData {
    /// Id of the invoked command.
    pub id: Snowflake,
    /// Name of the invoked command.
    pub name: String,
    /// Kind of the invoked command.
    #[serde(rename = "type", default)]
    pub kind: ApplicationCommandType,
    /// Options supplied by the user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Value>,
    /// Resolved entities referenced by the options.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved: Option<Value>,
    /// Target of a user or message context command.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_id: Option<Snowflake>,
}

/// Payload of a message component interaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentInteractionData {
    /// Custom id routing the interaction back to application logic.
    pub custom_id: String,
    /// Kind of the source component.
    pub component_type: ComponentType,
    /// Selected values, for select menus.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<String>>,
}

/// Payload of a modal submit interaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModalInteractionData {
    /// Custom id routing the submit back to application logic.
    pub custom_id: String,
    /// Submitted input rows.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub components: Option<Value>,
}
