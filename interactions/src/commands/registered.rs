//! Registered command variants.

use std::sync::Arc;

use howl_common::{ApplicationCommandType, Snowflake};
use serde_json::Value;

use super::{Command, CommandGroup, MessageCommand, SlashCommand, UserCommand};

/// A chat-input command reconciled with the platform.
#[derive(Debug, Clone)]
pub struct RegisteredSlashCommand {
    /// Remote identifier, sticky until unregistered.
    pub id: Snowflake,
    /// The declaration this registration was created from.
    pub command: Arc<SlashCommand>,
}

/// A chat-input command group reconciled with the platform.
#[derive(Debug, Clone)]
pub struct RegisteredCommandGroup {
    /// Remote identifier, sticky until unregistered.
    pub id: Snowflake,
    /// The declaration this registration was created from.
    pub group: Arc<CommandGroup>,
}

/// A user context menu command reconciled with the platform.
#[derive(Debug, Clone)]
pub struct RegisteredUserCommand {
    /// Remote identifier, sticky until unregistered.
    pub id: Snowflake,
    /// The declaration this registration was created from.
    pub command: Arc<UserCommand>,
}

/// A message context menu command reconciled with the platform.
#[derive(Debug, Clone)]
pub struct RegisteredMessageCommand {
    /// Remote identifier, sticky until unregistered.
    pub id: Snowflake,
    /// The declaration this registration was created from.
    pub command: Arc<MessageCommand>,
}

/// A command registered with the platform, discriminated by declared kind.
#[derive(Debug, Clone)]
pub enum RegisteredCommand {
    /// Directly-invocable chat-input command.
    Slash(RegisteredSlashCommand),
    /// Chat-input command group.
    Group(RegisteredCommandGroup),
    /// User context menu command.
    User(RegisteredUserCommand),
    /// Message context menu command.
    Message(RegisteredMessageCommand),
}

impl RegisteredCommand {
    pub(crate) fn new(command: Command, id: Snowflake) -> Self {
        match command {
            Command::Slash(command) => Self::Slash(RegisteredSlashCommand {
                id,
                command: Arc::new(command),
            }),
            Command::Group(group) => Self::Group(RegisteredCommandGroup {
                id,
                group: Arc::new(group),
            }),
            Command::User(command) => Self::User(RegisteredUserCommand {
                id,
                command: Arc::new(command),
            }),
            Command::Message(command) => Self::Message(RegisteredMessageCommand {
                id,
                command: Arc::new(command),
            }),
        }
    }

    /// Remote identifier assigned by the platform.
    #[must_use]
    pub fn id(&self) -> &Snowflake {
        match self {
            Self::Slash(command) => &command.id,
            Self::Group(group) => &group.id,
            Self::User(command) => &command.id,
            Self::Message(command) => &command.id,
        }
    }

    /// Declared command name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Slash(command) => command.command.builder.name(),
            Self::Group(group) => group.group.builder.name(),
            Self::User(command) => command.command.builder.name(),
            Self::Message(command) => command.command.builder.name(),
        }
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

    /// Declarative payload for this command's current local shape.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Slash(command) => command.command.builder.to_json(),
            Self::Group(group) => group.group.builder.to_json(),
            Self::User(command) => command.command.builder.to_json(),
            Self::Message(command) => command.command.builder.to_json(),
        }
    }
}
