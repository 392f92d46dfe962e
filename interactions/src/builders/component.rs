//! Component Builders

use howl_common::{ButtonStyle, ComponentType, TextInputStyle};
use serde::Serialize;
use serde_json::Value;

fn is_false(value: &bool) -> bool {
    !*value
}

/// Builder for a button component.
#[derive(Debug, Clone, Serialize)]
pub struct ButtonBuilder {
    #[serde(rename = "type")]
    kind: ComponentType,
    style: ButtonStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    emoji: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    custom_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<String>,
    #[serde(skip_serializing_if = "is_false")]
    disabled: bool,
}

impl ButtonBuilder {
    /// Start a button of the given style.
    #[must_use]
    pub const fn new(style: ButtonStyle) -> Self {
        Self {
            kind: ComponentType::Button,
            style,
            label: None,
            emoji: None,
            custom_id: None,
            url: None,
            disabled: false,
        }
    }

    /// Button label text.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Emoji rendered on the button.
    #[must_use]
    pub fn emoji(mut self, emoji: Value) -> Self {
        self.emoji = Some(emoji);
        self
    }

    /// Custom id routing clicks back to application logic. Set by the
    /// component registry when binding state; exclusive with `url`.
    #[must_use]
    pub fn custom_id(mut self, custom_id: impl Into<String>) -> Self {
        self.custom_id = Some(custom_id.into());
        self
    }

    /// Navigation target for link-style buttons; exclusive with `custom_id`.
    #[must_use]
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Render the button greyed out.
    #[must_use]
    pub const fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Serialize to the wire shape.
    #[must_use]
    pub fn to_json(&self) -> Value {
        super::to_json(self)
    }
}

/// One selectable option of a select menu.
#[derive(Debug, Clone, Serialize)]
pub struct SelectMenuOption {
    /// Display label.
    pub label: String,
    /// Value submitted when selected.
    pub value: String,
    /// Longer description shown under the label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Emoji rendered next to the label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emoji: Option<Value>,
    /// Whether the option starts selected.
    #[serde(skip_serializing_if = "is_false")]
    pub default: bool,
}

impl SelectMenuOption {
    /// A plain label/value option.
    #[must_use]
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            description: None,
            emoji: None,
            default: false,
        }
    }
}

/// Builder for a select menu component.
#[derive(Debug, Clone, Serialize)]
pub struct SelectMenuBuilder {
    #[serde(rename = "type")]
    kind: ComponentType,
    #[serde(skip_serializing_if = "Option::is_none")]
    custom_id: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    options: Vec<SelectMenuOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    placeholder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    min_values: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_values: Option<u8>,
    #[serde(skip_serializing_if = "is_false")]
    disabled: bool,
}

impl SelectMenuBuilder {
    /// Start a string select menu.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            kind: ComponentType::StringSelect,
            custom_id: None,
            options: Vec::new(),
            placeholder: None,
            min_values: None,
            max_values: None,
            disabled: false,
        }
    }

    /// Use an entity-backed select kind (user, role, channel, mentionable).
    #[must_use]
    pub const fn kind(mut self, kind: ComponentType) -> Self {
        self.kind = kind;
        self
    }

    /// Custom id routing selections back to application logic. Set by the
    /// component registry when binding state.
    #[must_use]
    pub fn custom_id(mut self, custom_id: impl Into<String>) -> Self {
        self.custom_id = Some(custom_id.into());
        self
    }

    /// Append a selectable option (string selects only).
    #[must_use]
    pub fn option(mut self, option: SelectMenuOption) -> Self {
        self.options.push(option);
        self
    }

    /// Placeholder shown before any selection.
    #[must_use]
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Bound how many options may be selected.
    #[must_use]
    pub const fn values_range(mut self, min: Option<u8>, max: Option<u8>) -> Self {
        self.min_values = min;
        self.max_values = max;
        self
    }

    /// Render the menu greyed out.
    #[must_use]
    pub const fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Serialize to the wire shape.
    #[must_use]
    pub fn to_json(&self) -> Value {
        super::to_json(self)
    }
}

impl Default for SelectMenuBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for a modal text input.
#[derive(Debug, Clone, Serialize)]
pub struct TextInputBuilder {
    #[serde(rename = "type")]
    kind: ComponentType,
    style: TextInputStyle,
    custom_id: String,
    label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    min_length: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_length: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    required: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    placeholder: Option<String>,
}

impl TextInputBuilder {
    /// Start a text input with its own row-local custom id.
    #[must_use]
    pub fn new(
        custom_id: impl Into<String>,
        label: impl Into<String>,
        style: TextInputStyle,
    ) -> Self {
        Self {
            kind: ComponentType::TextInput,
            style,
            custom_id: custom_id.into(),
            label: label.into(),
            min_length: None,
            max_length: None,
            required: None,
            value: None,
            placeholder: None,
        }
    }

    /// Bound the input length.
    #[must_use]
    pub const fn length_range(mut self, min: Option<u16>, max: Option<u16>) -> Self {
        self.min_length = min;
        self.max_length = max;
        self
    }

    /// Require the input to be filled.
    #[must_use]
    pub const fn required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    /// Pre-filled value.
    #[must_use]
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Placeholder shown while empty.
    #[must_use]
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Serialize to the wire shape.
    #[must_use]
    pub fn to_json(&self) -> Value {
        super::to_json(self)
    }
}

/// Builder for an action row wrapping message components.
#[derive(Debug, Clone, Serialize)]
pub struct ActionRowBuilder {
    #[serde(rename = "type")]
    kind: ComponentType,
    components: Vec<Value>,
}

impl ActionRowBuilder {
    /// Start an empty row.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            kind: ComponentType::ActionRow,
            components: Vec::new(),
        }
    }

    /// Append a button.
    #[must_use]
    pub fn button(mut self, button: &ButtonBuilder) -> Self {
        self.components.push(button.to_json());
        self
    }

    /// Append a select menu. A row holds at most one.
    #[must_use]
    pub fn select_menu(mut self, menu: &SelectMenuBuilder) -> Self {
        self.components.push(menu.to_json());
        self
    }

    /// Append an already-serialized component.
    #[must_use]
    pub fn component(mut self, component: Value) -> Self {
        self.components.push(component);
        self
    }

    /// Serialize to the wire shape.
    #[must_use]
    pub fn to_json(&self) -> Value {
        super::to_json(self)
    }
}

impl Default for ActionRowBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for a modal.
#[derive(Debug, Clone, Serialize)]
pub struct ModalBuilder {
    #[serde(skip_serializing_if = "Option::is_none")]
    custom_id: Option<String>,
    title: String,
    components: Vec<Value>,
}

impl ModalBuilder {
    /// Start a modal with the given title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            custom_id: None,
            title: title.into(),
            components: Vec::new(),
        }
    }

    /// Custom id routing the submit back to application logic. Set by the
    /// component registry when binding state.
    #[must_use]
    pub fn custom_id(mut self, custom_id: impl Into<String>) -> Self {
        self.custom_id = Some(custom_id.into());
        self
    }

    /// Append a text input, wrapped in its own action row.
    #[must_use]
    pub fn text_input(mut self, input: &TextInputBuilder) -> Self {
        self.components
            .push(ActionRowBuilder::new().component(input.to_json()).to_json());
        self
    }

    /// Serialize to the wire shape.
    #[must_use]
    pub fn to_json(&self) -> Value {
        super::to_json(self)
    }
}
