//! Command Registry
//!
//! Local command declarations and their reconciliation against the
//! platform's remote declared set.

pub mod manager;
pub mod registered;

pub use manager::{CommandManager, RegistryError};
pub use registered::{
    RegisteredCommand, RegisteredCommandGroup, RegisteredMessageCommand, RegisteredSlashCommand,
    RegisteredUserCommand,
};

use howl_common::{ApiCommand, ApplicationCommandType};
use serde_json::Value;

use crate::builders::{MessageCommandBuilder, SlashCommandBuilder, UserCommandBuilder};
use crate::components::ComponentDef;

/// A chat-input command declaration.
#[derive(Debug)]
pub struct SlashCommand {
    /// Declarative payload, the source of truth for the remote shape.
    pub builder: SlashCommandBuilder,
    /// Component definitions owned by this command; their ids are
    /// namespaced under the command name at registration.
    pub components: Vec<ComponentDef>,
}

/// A chat-input command group declaration: its children are sub-commands
/// and the group itself is not directly invocable.
#[derive(Debug)]
pub struct CommandGroup {
    /// Declarative payload carrying the sub-command options.
    pub builder: SlashCommandBuilder,
    /// Component definitions owned by this group.
    pub components: Vec<ComponentDef>,
}

/// A user context menu command declaration.
#[derive(Debug)]
pub struct UserCommand {
    /// Declarative payload.
    pub builder: UserCommandBuilder,
}

/// A message context menu command declaration.
#[derive(Debug)]
pub struct MessageCommand {
    /// Declarative payload.
    pub builder: MessageCommandBuilder,
}

/// A command declaration to be reconciled and registered, discriminated by
/// declared kind.
#[derive(Debug)]
pub enum Command {
    /// Directly-invocable chat-input command.
    Slash(SlashCommand),
    /// Chat-input command group.
    Group(CommandGroup),
    /// User context menu command.
    User(UserCommand),
    /// Message context menu command.
    Message(MessageCommand),
}

impl Command {
    /// A slash command without owned components.
    #[must_use]
    pub const fn slash(builder: SlashCommandBuilder) -> Self {
        Self::Slash(SlashCommand {
            builder,
            components: Vec::new(),
        })
    }

    /// A slash command owning component definitions.
    #[must_use]
    pub const fn slash_with_components(
        builder: SlashCommandBuilder,
        components: Vec<ComponentDef>,
    ) -> Self {
        Self::Slash(SlashCommand {
            builder,
            components,
        })
    }

    /// A command group.
    #[must_use]
    pub const fn group(builder: SlashCommandBuilder) -> Self {
        Self::Group(CommandGroup {
            builder,
            components: Vec::new(),
        })
    }

    /// A user context menu command.
    #[must_use]
    pub const fn user(builder: UserCommandBuilder) -> Self {
        Self::User(UserCommand { builder })
    }

    /// A message context menu command.
    #[must_use]
    pub const fn message(builder: MessageCommandBuilder) -> Self {
        Self::Message(MessageCommand { builder })
    }

    /// Declared command kind.
    #[must_use]
    pub const fn kind(&self) -> ApplicationCommandType {
        match self {
            Self::Slash(_) | Self::Group(_) => ApplicationCommandType::ChatInput,
            Self::User(_) => ApplicationCommandType::User,
            Self::Message(_) => ApplicationCommandType::Message,
        }
    }

    /// Declared command name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Slash(command) => command.builder.name(),
            Self::Group(group) => group.builder.name(),
            Self::User(command) => command.builder.name(),
            Self::Message(command) => command.builder.name(),
        }
    }

    /// Owned component definitions, if any.
    #[must_use]
    pub fn components(&self) -> &[ComponentDef] {
        match self {
            Self::Slash(command) => &command.components,
            Self::Group(group) => &group.components,
            Self::User(_) | Self::Message(_) => &[],
        }
    }

    /// Declarative payload for the remote API.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Slash(command) => command.builder.to_json(),
            Self::Group(group) => group.builder.to_json(),
            Self::User(command) => command.builder.to_json(),
            Self::Message(command) => command.builder.to_json(),
        }
    }

    /// Structural comparison against a remotely-declared command.
    #[must_use]
    pub fn equals(&self, remote: &ApiCommand) -> bool {
        match self {
            Self::Slash(command) => command.builder.equals(remote),
            Self::Group(group) => group.builder.equals(remote),
            Self::User(command) => command.builder.equals(remote),
            Self::Message(command) => command.builder.equals(remote),
        }
    }
}
