//! Message Component Types

use bitflags::bitflags;
use serde_repr::{Deserialize_repr, Serialize_repr};

/// Maximum length of a component custom id on the platform.
pub const CUSTOM_ID_LENGTH: usize = 100;

/// Kind of a message component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_repr, Deserialize_repr)]
#[repr(u8)]
pub enum ComponentType {
    /// Container row for other components.
    ActionRow = 1,
    /// Clickable button.
    Button = 2,
    /// Select menu with string options.
    StringSelect = 3,
    /// Free-form text input, modals only.
    TextInput = 4,
    /// Select menu over users.
    UserSelect = 5,
    /// Select menu over roles.
    RoleSelect = 6,
    /// Select menu over users and roles.
    MentionableSelect = 7,
    /// Select menu over channels.
    ChannelSelect = 8,
}

/// Visual style of a button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_repr, Deserialize_repr)]
#[repr(u8)]
pub enum ButtonStyle {
    /// Blurple call-to-action.
    Primary = 1,
    /// Grey secondary action.
    Secondary = 2,
    /// Green confirmation.
    Success = 3,
    /// Red destructive action.
    Danger = 4,
    /// Grey link button, navigates to a URL instead of interacting.
    Link = 5,
}

/// Style of a modal text input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_repr, Deserialize_repr)]
#[repr(u8)]
pub enum TextInputStyle {
    /// Single line.
    Short = 1,
    /// Multi line.
    Paragraph = 2,
}

bitflags! {
    /// Flags applied to an outbound message.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct MessageFlags: u64 {
        /// Do not render embeds for links in the content.
        const SUPPRESS_EMBEDS = 1 << 2;
        /// Only the invoking user can see the message.
        const EPHEMERAL = 1 << 6;
    }
}
