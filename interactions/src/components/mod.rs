//! Component Registry
//!
//! Stateless component templates keyed by string id, and the manager that
//! binds serialized state into their identifiers at response-build time.

pub mod manager;
pub mod state;

pub use manager::{ComponentError, ComponentManager, ResolvedState};
pub use state::{CacheError, MemoryStateCache, RedisStateCache, StateCache, DEFAULT_STATE_TTL};

use serde_json::Value;

use crate::builders::{ButtonBuilder, ModalBuilder, SelectMenuBuilder};

/// Separator between a component's definition id and its state segment
/// inside a custom id.
pub const STATE_SEPARATOR: char = '|';

/// Identifier budget: definition id plus state segment must fit within 99
/// characters, leaving room for the separator inside the platform's
/// 100-character custom id limit.
pub const ID_BUDGET: usize = 99;

/// A stateless component template registered with a [`ComponentManager`].
///
/// Definitions never carry state themselves; a bound instance is produced
/// per response with the state segment embedded in its custom id.
#[derive(Debug, Clone)]
pub enum ComponentDef {
    /// Button template.
    Button {
        /// Registry id, unique within one manager.
        id: String,
        /// Presentation template; its custom id is overwritten at bind time.
        template: ButtonBuilder,
    },
    /// Select menu template.
    SelectMenu {
        /// Registry id, unique within one manager.
        id: String,
        /// Presentation template; its custom id is overwritten at bind time.
        template: SelectMenuBuilder,
    },
    /// Modal template.
    Modal {
        /// Registry id, unique within one manager.
        id: String,
        /// Presentation template; its custom id is overwritten at bind time.
        template: ModalBuilder,
    },
}

impl ComponentDef {
    /// Button definition.
    #[must_use]
    pub fn button(id: impl Into<String>, template: ButtonBuilder) -> Self {
        Self::Button {
            id: id.into(),
            template,
        }
    }

    /// Select menu definition.
    #[must_use]
    pub fn select_menu(id: impl Into<String>, template: SelectMenuBuilder) -> Self {
        Self::SelectMenu {
            id: id.into(),
            template,
        }
    }

    /// Modal definition.
    #[must_use]
    pub fn modal(id: impl Into<String>, template: ModalBuilder) -> Self {
        Self::Modal {
            id: id.into(),
            template,
        }
    }

    /// Registry id of this definition.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Button { id, .. } | Self::SelectMenu { id, .. } | Self::Modal { id, .. } => id,
        }
    }

    /// A copy of this definition with its id namespaced under a parent
    /// command name. Pure construction; the original is left untouched so a
    /// shared definition is never silently renamed.
    #[must_use]
    pub fn namespaced(&self, parent: &str) -> Self {
        let id = format!("{parent}.{}", self.id());
        match self {
            Self::Button { template, .. } => Self::Button {
                id,
                template: template.clone(),
            },
            Self::SelectMenu { template, .. } => Self::SelectMenu {
                id,
                template: template.clone(),
            },
            Self::Modal { template, .. } => Self::Modal {
                id,
                template: template.clone(),
            },
        }
    }

    /// Produce a bound instance with `state` embedded in the custom id.
    #[must_use]
    pub fn create_instance(&self, state: &str) -> ComponentInstance {
        match self {
            Self::Button { id, template } => ComponentInstance::Button(
                template
                    .clone()
                    .custom_id(format!("{id}{STATE_SEPARATOR}{state}")),
            ),
            Self::SelectMenu { id, template } => ComponentInstance::SelectMenu(
                template
                    .clone()
                    .custom_id(format!("{id}{STATE_SEPARATOR}{state}")),
            ),
            Self::Modal { id, template } => ComponentInstance::Modal(
                template
                    .clone()
                    .custom_id(format!("{id}{STATE_SEPARATOR}{state}")),
            ),
        }
    }
}

/// A component instance bound to one response, ready to serialize.
#[derive(Debug, Clone)]
pub enum ComponentInstance {
    /// Bound button.
    Button(ButtonBuilder),
    /// Bound select menu.
    SelectMenu(SelectMenuBuilder),
    /// Bound modal.
    Modal(ModalBuilder),
}

impl ComponentInstance {
    /// Serialize to the wire shape.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Button(builder) => builder.to_json(),
            Self::SelectMenu(builder) => builder.to_json(),
            Self::Modal(builder) => builder.to_json(),
        }
    }

    /// The bound button, if this is one.
    #[must_use]
    pub const fn as_button(&self) -> Option<&ButtonBuilder> {
        match self {
            Self::Button(builder) => Some(builder),
            _ => None,
        }
    }

    /// The bound select menu, if this is one.
    #[must_use]
    pub const fn as_select_menu(&self) -> Option<&SelectMenuBuilder> {
        match self {
            Self::SelectMenu(builder) => Some(builder),
            _ => None,
        }
    }

    /// The bound modal, if this is one.
    #[must_use]
    pub const fn as_modal(&self) -> Option<&ModalBuilder> {
        match self {
            Self::Modal(builder) => Some(builder),
            _ => None,
        }
    }
}
