//! Command manager: local registry plus remote reconciliation.

use std::collections::HashMap;
use std::sync::Arc;

use dashmap::DashMap;
use howl_common::{ApiCommand, ApplicationCommandType, Snowflake};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::{Command, RegisteredCommand};
use crate::components::ComponentManager;
use crate::rest::{routes, Request, RestError, Transport};

/// Errors from command registry operations.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// No command registered under `(kind, name)`.
    #[error("command {name} ({kind}) is not registered")]
    NotFound {
        /// Command name.
        name: String,
        /// Command kind.
        kind: ApplicationCommandType,
    },
    /// The remote create/update reported no usable identifier.
    #[error("command {0} failed to register")]
    RegistrationFailed(String),
    /// Remote API failure, propagated unmodified.
    #[error(transparent)]
    Rest(#[from] RestError),
    /// One or more remote deletions failed during pruning; the rest were
    /// still attempted.
    #[error("failed to delete {} unregistered command(s)", .0.len())]
    DeleteUnregistered(Vec<(Snowflake, RestError)>),
}

/// Remote commands partitioned by kind and name.
type PartitionedCommands = HashMap<ApplicationCommandType, HashMap<String, ApiCommand>>;

fn partition(commands: Vec<ApiCommand>) -> PartitionedCommands {
    let mut parsed = PartitionedCommands::new();
    for command in commands {
        parsed
            .entry(command.kind)
            .or_default()
            .insert(command.name.clone(), command);
    }
    parsed
}

/// Registry of commands for one scope (global, or a single guild overlay),
/// reconciling local declarations against the platform's declared set.
///
/// Three independent name-to-command maps, one per command kind, selected by
/// the explicit kind argument on every operation. Reads happen during
/// routing; writes only during explicit register/unregister calls, with no
/// internal ordering between concurrent batches (last write wins).
#[derive(Clone)]
pub struct CommandManager {
    rest: Arc<dyn Transport>,
    components: ComponentManager,
    application_id: Snowflake,
    guild_id: Option<Snowflake>,
    remove_unregistered: bool,
    chat_input: Arc<DashMap<String, RegisteredCommand>>,
    user: Arc<DashMap<String, RegisteredCommand>>,
    message: Arc<DashMap<String, RegisteredCommand>>,
}

impl CommandManager {
    pub(crate) fn new(
        rest: Arc<dyn Transport>,
        components: ComponentManager,
        application_id: Snowflake,
        guild_id: Option<Snowflake>,
        remove_unregistered: bool,
    ) -> Self {
        Self {
            rest,
            components,
            application_id,
            guild_id,
            remove_unregistered,
            chat_input: Arc::new(DashMap::new()),
            user: Arc::new(DashMap::new()),
            message: Arc::new(DashMap::new()),
        }
    }

    /// Guild this registry is scoped to, if not global.
    #[must_use]
    pub fn guild_id(&self) -> Option<&Snowflake> {
        self.guild_id.as_ref()
    }

    fn map(&self, kind: ApplicationCommandType) -> &DashMap<String, RegisteredCommand> {
        match kind {
            ApplicationCommandType::ChatInput => &self.chat_input,
            ApplicationCommandType::User => &self.user,
            ApplicationCommandType::Message => &self.message,
        }
    }

    fn route(&self) -> String {
        match &self.guild_id {
            None => routes::application_commands(&self.application_id),
            Some(guild_id) => routes::application_guild_commands(&self.application_id, guild_id),
        }
    }

    fn command_route(&self, command_id: &str) -> String {
        match &self.guild_id {
            None => routes::application_command(&self.application_id, command_id),
            Some(guild_id) => {
                routes::application_guild_command(&self.application_id, guild_id, command_id)
            }
        }
    }

    /// Whether a command is registered.
    #[must_use]
    pub fn has(&self, name: &str, kind: ApplicationCommandType) -> bool {
        self.map(kind).contains_key(name)
    }

    /// Fetch a registered command.
    #[must_use]
    pub fn get(&self, name: &str, kind: ApplicationCommandType) -> Option<RegisteredCommand> {
        self.map(kind).get(name).map(|entry| entry.value().clone())
    }

    /// Rename a registered command locally. The remote command stays
    /// identified by its id; issue an update separately if the remote name
    /// must change too.
    pub fn rename(
        &self,
        old_name: &str,
        new_name: &str,
        kind: ApplicationCommandType,
    ) -> Result<(), RegistryError> {
        let map = self.map(kind);
        let (_, command) = map.remove(old_name).ok_or_else(|| RegistryError::NotFound {
            name: old_name.to_owned(),
            kind,
        })?;
        map.insert(new_name.to_owned(), command);
        Ok(())
    }

    /// Register commands, reconciling each against the remote declared set.
    ///
    /// Per command: owned component definitions are namespaced under the
    /// command name and registered first; an identically-shaped remote
    /// command is adopted without a write, a differing one is updated in
    /// place (preserving its id), a missing one is created. A failed
    /// command aborts the batch, leaving prior commands registered.
    pub async fn register(
        &self,
        commands: Vec<Command>,
    ) -> Result<Vec<RegisteredCommand>, RegistryError> {
        let mut remote = partition(self.api_commands(true).await?);
        let mut registered = Vec::with_capacity(commands.len());

        for command in commands {
            let kind = command.kind();
            let name = command.name().to_owned();

            let namespaced: Vec<_> = command
                .components()
                .iter()
                .map(|component| component.namespaced(&name))
                .collect();
            self.components.register(namespaced);

            let existing = remote.entry(kind).or_default().remove(&name);
            let id = match existing {
                Some(api) if command.equals(&api) => {
                    debug!(command = %name, kind = %kind, id = %api.id, "Remote command up to date");
                    api.id
                }
                Some(api) => {
                    let updated = self.update_api_command(command.to_json(), &api.id).await?;
                    info!(command = %name, kind = %kind, id = %updated.id, "Updated remote command");
                    updated.id
                }
                None => {
                    let created = self.create_api_command(command.to_json()).await?;
                    info!(command = %name, kind = %kind, id = %created.id, "Created remote command");
                    created.id
                }
            };

            if id.is_empty() {
                return Err(RegistryError::RegistrationFailed(name));
            }

            let value = RegisteredCommand::new(command, id);
            self.map(kind).insert(name, value.clone());
            registered.push(value);
        }

        if self.remove_unregistered {
            self.delete_unregistered().await?;
        }

        Ok(registered)
    }

    /// Unregister a command locally, optionally deleting it remotely.
    /// Remote deletion failure propagates.
    pub async fn unregister(
        &self,
        name: &str,
        kind: ApplicationCommandType,
        delete_remote: bool,
    ) -> Result<(), RegistryError> {
        let (_, command) = self
            .map(kind)
            .remove(name)
            .ok_or_else(|| RegistryError::NotFound {
                name: name.to_owned(),
                kind,
            })?;

        if delete_remote {
            self.delete_api_command(command.id()).await?;
            info!(command = %name, kind = %kind, id = %command.id(), "Deleted remote command");
        }
        Ok(())
    }

    /// Delete every remote command whose `(kind, name)` pair is not locally
    /// registered. Best effort: a failed deletion does not stop the rest,
    /// failures are aggregated into the error.
    pub async fn delete_unregistered(&self) -> Result<(), RegistryError> {
        let remote = self.api_commands(true).await?;
        let mut failures = Vec::new();

        for api in remote {
            if self.has(&api.name, api.kind) {
                continue;
            }
            match self.delete_api_command(&api.id).await {
                Ok(()) => {
                    info!(command = %api.name, kind = %api.kind, id = %api.id, "Deleted unregistered remote command");
                }
                Err(error) => {
                    warn!(
                        command = %api.name,
                        id = %api.id,
                        "Failed to delete unregistered command: {}", error
                    );
                    failures.push((api.id, error));
                }
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(RegistryError::DeleteUnregistered(failures))
        }
    }

    /// Declarative payloads for every locally registered command.
    #[must_use]
    pub fn to_api_commands(&self) -> Vec<Value> {
        self.chat_input
            .iter()
            .chain(self.user.iter())
            .chain(self.message.iter())
            .map(|entry| entry.to_json())
            .collect()
    }

    /// Fetch the remote commands for this scope.
    ///
    /// `with_localizations` selects full localization maps instead of the
    /// fields localized for the requesting locale.
    pub async fn api_commands(
        &self,
        with_localizations: bool,
    ) -> Result<Vec<ApiCommand>, RestError> {
        let value = self
            .rest
            .execute(
                Request::get(self.route())
                    .query("with_localizations", with_localizations.to_string()),
            )
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Replace the entire remote command set for this scope.
    pub async fn bulk_overwrite_api_commands(
        &self,
        commands: Vec<Value>,
    ) -> Result<Vec<ApiCommand>, RestError> {
        let value = self
            .rest
            .execute(Request::put(self.route()).json(Value::Array(commands)))
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Create a remote command.
    pub async fn create_api_command(&self, payload: Value) -> Result<ApiCommand, RegistryError> {
        let name = command_name(&payload);
        let value = self
            .rest
            .execute(Request::post(self.route()).json(payload))
            .await?;
        serde_json::from_value(value).map_err(|_| RegistryError::RegistrationFailed(name))
    }

    /// Update a remote command in place. The payload never carries the
    /// immutable `type` field.
    pub async fn update_api_command(
        &self,
        mut payload: Value,
        command_id: &str,
    ) -> Result<ApiCommand, RegistryError> {
        let name = command_name(&payload);
        if let Some(object) = payload.as_object_mut() {
            object.remove("type");
        }
        let value = self
            .rest
            .execute(Request::patch(self.command_route(command_id)).json(payload))
            .await?;
        serde_json::from_value(value).map_err(|_| RegistryError::RegistrationFailed(name))
    }

    /// Delete a remote command.
    pub async fn delete_api_command(&self, command_id: &str) -> Result<(), RestError> {
        self.rest
            .execute(Request::delete(self.command_route(command_id)))
            .await?;
        Ok(())
    }
}

fn command_name(payload: &Value) -> String {
    payload
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_owned()
}
