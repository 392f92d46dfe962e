//! Declarative Builders
//!
//! Payload builders for commands, message components, and response
//! messages. Command builders are the source of truth for the remote shape
//! during reconciliation.

pub mod command;
pub mod component;
pub mod message;

pub use command::{
    CommandOptionBuilder, MessageCommandBuilder, SlashCommandBuilder, UserCommandBuilder,
};
pub use component::{
    ActionRowBuilder, ButtonBuilder, ModalBuilder, SelectMenuBuilder, SelectMenuOption,
    TextInputBuilder,
};
pub use message::MessageBuilder;

use serde::Serialize;
use serde_json::Value;

pub(crate) fn to_json<T: Serialize>(value: &T) -> Value {
    serde_json::to_value(value).expect("builder serialization is infallible")
}
