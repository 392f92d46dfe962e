//! Application Command Types

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_repr::{Deserialize_repr, Serialize_repr};

use super::Snowflake;

/// Localization map keyed by locale tag.
pub type LocalizationMap = BTreeMap<String, String>;

/// Kind of an application command.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize_repr, Deserialize_repr,
)]
#[repr(u8)]
pub enum ApplicationCommandType {
    /// Slash command, invoked from the chat input.
    #[default]
    ChatInput = 1,
    /// Context menu command on a user.
    User = 2,
    /// Context menu command on a message.
    Message = 3,
}

impl ApplicationCommandType {
    /// Stable name for logging.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ChatInput => "chat_input",
            Self::User => "user",
            Self::Message => "message",
        }
    }
}

impl std::fmt::Display for ApplicationCommandType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of a chat-input command option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_repr, Deserialize_repr)]
#[repr(u8)]
pub enum CommandOptionType {
    /// Nested sub-command.
    SubCommand = 1,
    /// Group of sub-commands.
    SubCommandGroup = 2,
    /// String input.
    String = 3,
    /// Integer input.
    Integer = 4,
    /// Boolean input.
    Boolean = 5,
    /// User mention.
    User = 6,
    /// Channel mention.
    Channel = 7,
    /// Role mention.
    Role = 8,
    /// User or role mention.
    Mentionable = 9,
    /// Floating point input.
    Number = 10,
    /// File attachment.
    Attachment = 11,
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// A fixed choice for a command option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandOptionChoice {
    /// Display name.
    pub name: String,
    /// Localized display names.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_localizations: Option<LocalizationMap>,
    /// Value submitted when chosen.
    pub value: Value,
}

/// An option on a chat-input command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandOption {
    /// Option kind.
    #[serde(rename = "type")]
    pub kind: CommandOptionType,
    /// Option name.
    pub name: String,
    /// Localized option names.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_localizations: Option<LocalizationMap>,
    /// Option description.
    pub description: String,
    /// Localized option descriptions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_localizations: Option<LocalizationMap>,
    /// Whether the option must be supplied.
    #[serde(default, skip_serializing_if = "is_false")]
    pub required: bool,
    /// Fixed choices, exclusive with autocomplete.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<CommandOptionChoice>>,
    /// Nested options, for sub-commands and groups.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<CommandOption>>,
    /// Permitted channel kinds, for channel options.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_types: Option<Vec<u8>>,
    /// Minimum value, for numeric options.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_value: Option<Value>,
    /// Maximum value, for numeric options.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_value: Option<Value>,
    /// Minimum length, for string options.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u16>,
    /// Maximum length, for string options.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u16>,
    /// Whether the option serves autocomplete suggestions.
    #[serde(default, skip_serializing_if = "is_false")]
    pub autocomplete: bool,
}

impl CommandOption {
    /// Canonical form used for structural comparison: empty collections
    /// collapse to absent, recursively.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        if self.choices.as_ref().is_some_and(Vec::is_empty) {
            self.choices = None;
        }
        if self.name_localizations.as_ref().is_some_and(BTreeMap::is_empty) {
            self.name_localizations = None;
        }
        if self
            .description_localizations
            .as_ref()
            .is_some_and(BTreeMap::is_empty)
        {
            self.description_localizations = None;
        }
        if let Some(options) = self.options.take() {
            let options: Vec<Self> = options.into_iter().map(Self::normalized).collect();
            self.options = if options.is_empty() {
                None
            } else {
                Some(options)
            };
        }
        self
    }
}

/// A command as declared remotely on the platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiCommand {
    /// Remote identifier assigned by the platform.
    pub id: Snowflake,
    /// Owning application.
    pub application_id: Snowflake,
    /// Command kind; the platform omits it for chat-input commands.
    #[serde(rename = "type", default)]
    pub kind: ApplicationCommandType,
    /// Guild the command is scoped to, absent for global commands.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<Snowflake>,
    /// Command name.
    pub name: String,
    /// Localized command names.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_localizations: Option<LocalizationMap>,
    /// Command description, empty for context menu commands.
    #[serde(default)]
    pub description: String,
    /// Localized command descriptions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_localizations: Option<LocalizationMap>,
    /// Declared options.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<CommandOption>>,
    /// Permission bit set required to use the command.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_member_permissions: Option<String>,
    /// Whether the command is usable in DMs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dm_permission: Option<bool>,
    /// Whether the command is age-restricted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nsfw: Option<bool>,
    /// Autoincrementing version identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<Snowflake>,
}
