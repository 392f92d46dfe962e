//! Command Builders
//!
//! Declarative command payloads with the structural equality used by
//! reconciliation: every field the builder serializes must match the remote
//! value, collections compared in canonical form, remote-only fields
//! ignored.

use howl_common::{
    ApiCommand, ApplicationCommandType, CommandOption, CommandOptionChoice, CommandOptionType,
    LocalizationMap,
};
use serde::Serialize;
use serde_json::Value;

/// Builder for a chat-input (slash) command payload.
#[derive(Debug, Clone, Serialize)]
pub struct SlashCommandBuilder {
    #[serde(rename = "type")]
    kind: ApplicationCommandType,
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    name_localizations: Option<LocalizationMap>,
    description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description_localizations: Option<LocalizationMap>,
    options: Vec<CommandOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    default_member_permissions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    dm_permission: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    nsfw: Option<bool>,
}

impl SlashCommandBuilder {
    /// Start a slash command payload.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind: ApplicationCommandType::ChatInput,
            name: name.into(),
            name_localizations: None,
            description: description.into(),
            description_localizations: None,
            options: Vec::new(),
            default_member_permissions: None,
            dm_permission: None,
            nsfw: None,
        }
    }

    /// Command name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Append an option. Order is significant on the platform.
    #[must_use]
    pub fn option(mut self, option: CommandOption) -> Self {
        self.options.push(option);
        self
    }

    /// Localize the command name.
    #[must_use]
    pub fn name_localization(mut self, locale: impl Into<String>, name: impl Into<String>) -> Self {
        self.name_localizations
            .get_or_insert_with(LocalizationMap::new)
            .insert(locale.into(), name.into());
        self
    }

    /// Localize the command description.
    #[must_use]
    pub fn description_localization(
        mut self,
        locale: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        self.description_localizations
            .get_or_insert_with(LocalizationMap::new)
            .insert(locale.into(), description.into());
        self
    }

    /// Restrict the command to members holding this permission bit set.
    #[must_use]
    pub fn default_member_permissions(mut self, permissions: impl Into<String>) -> Self {
        self.default_member_permissions = Some(permissions.into());
        self
    }

    /// Allow or forbid use in DMs.
    #[must_use]
    pub const fn dm_permission(mut self, allowed: bool) -> Self {
        self.dm_permission = Some(allowed);
        self
    }

    /// Mark the command age-restricted.
    #[must_use]
    pub const fn nsfw(mut self, nsfw: bool) -> Self {
        self.nsfw = Some(nsfw);
        self
    }

    /// Serialize to the create-command payload shape.
    #[must_use]
    pub fn to_json(&self) -> Value {
        super::to_json(self)
    }

    /// Structural comparison against a remotely-declared command.
    #[must_use]
    pub fn equals(&self, remote: &ApiCommand) -> bool {
        self.kind == remote.kind
            && self.name == remote.name
            && self.description == remote.description
            && options_equal(&self.options, remote.options.as_deref())
            && localizations_equal(
                self.name_localizations.as_ref(),
                remote.name_localizations.as_ref(),
            )
            && localizations_equal(
                self.description_localizations.as_ref(),
                remote.description_localizations.as_ref(),
            )
            && self.default_member_permissions == remote.default_member_permissions
            && bool_equal(self.dm_permission, remote.dm_permission, true)
            && bool_equal(self.nsfw, remote.nsfw, false)
    }
}

/// Builder for a user context menu command payload.
#[derive(Debug, Clone, Serialize)]
pub struct UserCommandBuilder {
    #[serde(rename = "type")]
    kind: ApplicationCommandType,
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    name_localizations: Option<LocalizationMap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    default_member_permissions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    dm_permission: Option<bool>,
}

impl UserCommandBuilder {
    /// Start a user command payload.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            kind: ApplicationCommandType::User,
            name: name.into(),
            name_localizations: None,
            default_member_permissions: None,
            dm_permission: None,
        }
    }

    /// Command name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Localize the command name.
    #[must_use]
    pub fn name_localization(mut self, locale: impl Into<String>, name: impl Into<String>) -> Self {
        self.name_localizations
            .get_or_insert_with(LocalizationMap::new)
            .insert(locale.into(), name.into());
        self
    }

    /// Restrict the command to members holding this permission bit set.
    #[must_use]
    pub fn default_member_permissions(mut self, permissions: impl Into<String>) -> Self {
        self.default_member_permissions = Some(permissions.into());
        self
    }

    /// Allow or forbid use in DMs.
    #[must_use]
    pub const fn dm_permission(mut self, allowed: bool) -> Self {
        self.dm_permission = Some(allowed);
        self
    }

    /// Serialize to the create-command payload shape.
    #[must_use]
    pub fn to_json(&self) -> Value {
        super::to_json(self)
    }

    /// Structural comparison against a remotely-declared command.
    #[must_use]
    pub fn equals(&self, remote: &ApiCommand) -> bool {
        context_menu_equals(
            self.kind,
            &self.name,
            self.name_localizations.as_ref(),
            self.default_member_permissions.as_ref(),
            self.dm_permission,
            remote,
        )
    }
}

/// Builder for a message context menu command payload.
#[derive(Debug, Clone, Serialize)]
pub struct MessageCommandBuilder {
    #[serde(rename = "type")]
    kind: ApplicationCommandType,
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    name_localizations: Option<LocalizationMap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    default_member_permissions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    dm_permission: Option<bool>,
}

impl MessageCommandBuilder {
    /// Start a message command payload.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            kind: ApplicationCommandType::Message,
            name: name.into(),
            name_localizations: None,
            default_member_permissions: None,
            dm_permission: None,
        }
    }

    /// Command name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Localize the command name.
    #[must_use]
    pub fn name_localization(mut self, locale: impl Into<String>, name: impl Into<String>) -> Self {
        self.name_localizations
            .get_or_insert_with(LocalizationMap::new)
            .insert(locale.into(), name.into());
        self
    }

    /// Restrict the command to members holding this permission bit set.
    #[must_use]
    pub fn default_member_permissions(mut self, permissions: impl Into<String>) -> Self {
        self.default_member_permissions = Some(permissions.into());
        self
    }

    /// Allow or forbid use in DMs.
    #[must_use]
    pub const fn dm_permission(mut self, allowed: bool) -> Self {
        self.dm_permission = Some(allowed);
        self
    }

    /// Serialize to the create-command payload shape.
    #[must_use]
    pub fn to_json(&self) -> Value {
        super::to_json(self)
    }

    /// Structural comparison against a remotely-declared command.
    #[must_use]
    pub fn equals(&self, remote: &ApiCommand) -> bool {
        context_menu_equals(
            self.kind,
            &self.name,
            self.name_localizations.as_ref(),
            self.default_member_permissions.as_ref(),
            self.dm_permission,
            remote,
        )
    }
}

/// Builder for a single command option.
#[derive(Debug, Clone)]
pub struct CommandOptionBuilder {
    option: CommandOption,
}

impl CommandOptionBuilder {
    /// Start an option of the given kind.
    #[must_use]
    pub fn new(
        kind: CommandOptionType,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            option: CommandOption {
                kind,
                name: name.into(),
                name_localizations: None,
                description: description.into(),
                description_localizations: None,
                required: false,
                choices: None,
                options: None,
                channel_types: None,
                min_value: None,
                max_value: None,
                min_length: None,
                max_length: None,
                autocomplete: false,
            },
        }
    }

    /// Start a sub-command option.
    #[must_use]
    pub fn subcommand(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(CommandOptionType::SubCommand, name, description)
    }

    /// Start a sub-command group option.
    #[must_use]
    pub fn subcommand_group(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(CommandOptionType::SubCommandGroup, name, description)
    }

    /// Mark the option required.
    #[must_use]
    pub const fn required(mut self, required: bool) -> Self {
        self.option.required = required;
        self
    }

    /// Serve autocomplete suggestions for this option.
    #[must_use]
    pub const fn autocomplete(mut self, autocomplete: bool) -> Self {
        self.option.autocomplete = autocomplete;
        self
    }

    /// Append a fixed choice.
    #[must_use]
    pub fn choice(mut self, name: impl Into<String>, value: Value) -> Self {
        self.option
            .choices
            .get_or_insert_with(Vec::new)
            .push(CommandOptionChoice {
                name: name.into(),
                name_localizations: None,
                value,
            });
        self
    }

    /// Append a nested option (sub-commands and groups only).
    #[must_use]
    pub fn option(mut self, option: CommandOption) -> Self {
        self.option.options.get_or_insert_with(Vec::new).push(option);
        self
    }

    /// Bound the value range of a numeric option.
    #[must_use]
    pub fn value_range(mut self, min: Option<Value>, max: Option<Value>) -> Self {
        self.option.min_value = min;
        self.option.max_value = max;
        self
    }

    /// Bound the length of a string option.
    #[must_use]
    pub const fn length_range(mut self, min: Option<u16>, max: Option<u16>) -> Self {
        self.option.min_length = min;
        self.option.max_length = max;
        self
    }

    /// Finish the option.
    #[must_use]
    pub fn build(self) -> CommandOption {
        self.option
    }
}

fn options_equal(local: &[CommandOption], remote: Option<&[CommandOption]>) -> bool {
    let local: Vec<CommandOption> = local.iter().cloned().map(CommandOption::normalized).collect();
    let remote: Vec<CommandOption> = remote
        .unwrap_or(&[])
        .iter()
        .cloned()
        .map(CommandOption::normalized)
        .collect();
    local == remote
}

fn localizations_equal(local: Option<&LocalizationMap>, remote: Option<&LocalizationMap>) -> bool {
    match (local, remote) {
        (None, None) => true,
        (Some(map), None) | (None, Some(map)) => map.is_empty(),
        (Some(local), Some(remote)) => local == remote,
    }
}

fn bool_equal(local: Option<bool>, remote: Option<bool>, default: bool) -> bool {
    local.unwrap_or(default) == remote.unwrap_or(default)
}

fn context_menu_equals(
    kind: ApplicationCommandType,
    name: &str,
    name_localizations: Option<&LocalizationMap>,
    default_member_permissions: Option<&String>,
    dm_permission: Option<bool>,
    remote: &ApiCommand,
) -> bool {
    kind == remote.kind
        && name == remote.name
        && localizations_equal(name_localizations, remote.name_localizations.as_ref())
        && default_member_permissions == remote.default_member_permissions.as_ref()
        && bool_equal(dm_permission, remote.dm_permission, true)
}
