//! Interaction Dispatcher
//!
//! Top-level entry point: authenticates webhook requests, enforces the
//! response deadline, evaluates the pre-dispatch hook, and routes
//! interactions by kind to the configured handler.

mod alarm;
mod dispatch;
mod handler;
mod hooks;
mod sink;

pub use dispatch::{InteractionError, RequestAuth};
pub use handler::InteractionHandler;
pub use hooks::{HookResult, InteractionContext, InteractionHook, InteractionHooks};
pub use sink::{CallbackError, ResponseCallback, ResponseSink, SinkError};

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use howl_common::Snowflake;
use howl_crypto::types::Ed25519PublicKey;
use howl_crypto::{public_key_from_hex, SignatureKeyError};
use thiserror::Error;

use crate::commands::CommandManager;
use crate::components::{ComponentManager, StateCache};
use crate::config::ApplicationOptions;
use crate::rest::{HttpTransport, RestError, Transport};

/// Errors from building an [`Application`].
#[derive(Debug, Error)]
pub enum BuildError {
    /// The configured public key could not be parsed.
    #[error(transparent)]
    Key(#[from] SignatureKeyError),
    /// The default HTTP transport could not be constructed.
    #[error(transparent)]
    Rest(#[from] RestError),
    /// No interaction handler was supplied.
    #[error("an interaction handler is required")]
    MissingHandler,
}

struct AppInner {
    client_id: Snowflake,
    public_key: Ed25519PublicKey,
    timeout: Duration,
    remove_unregistered: bool,
    hooks: InteractionHooks,
    handler: Arc<dyn InteractionHandler>,
    rest: Arc<dyn Transport>,
    components: ComponentManager,
    commands: CommandManager,
    guild_commands: DashMap<Snowflake, CommandManager>,
}

/// Top-level framework handle: the registries plus the interaction dispatch
/// pipeline. Cheap to clone.
#[derive(Clone)]
pub struct Application {
    inner: Arc<AppInner>,
}

impl Application {
    /// Start building an application from its options.
    #[must_use]
    pub fn builder(options: ApplicationOptions) -> ApplicationBuilder {
        ApplicationBuilder {
            options,
            handler: None,
            hooks: InteractionHooks::default(),
            transport: None,
            cache: None,
        }
    }

    /// Application client id.
    #[must_use]
    pub fn client_id(&self) -> &Snowflake {
        &self.inner.client_id
    }

    /// Global command registry.
    #[must_use]
    pub fn commands(&self) -> &CommandManager {
        &self.inner.commands
    }

    /// Command registry overlay for one guild, created on first use. Each
    /// guild is an independent namespace.
    #[must_use]
    pub fn guild_commands(&self, guild_id: &str) -> CommandManager {
        self.inner
            .guild_commands
            .entry(guild_id.to_owned())
            .or_insert_with(|| {
                CommandManager::new(
                    Arc::clone(&self.inner.rest),
                    self.inner.components.clone(),
                    self.inner.client_id.clone(),
                    Some(guild_id.to_owned()),
                    self.inner.remove_unregistered,
                )
            })
            .value()
            .clone()
    }

    /// Component registry.
    #[must_use]
    pub fn components(&self) -> &ComponentManager {
        &self.inner.components
    }

    /// REST transport, for consumers issuing their own API calls.
    #[must_use]
    pub fn rest(&self) -> &Arc<dyn Transport> {
        &self.inner.rest
    }
}

/// Builder wiring the collaborators into an [`Application`].
pub struct ApplicationBuilder {
    options: ApplicationOptions,
    handler: Option<Arc<dyn InteractionHandler>>,
    hooks: InteractionHooks,
    transport: Option<Arc<dyn Transport>>,
    cache: Option<Arc<dyn StateCache>>,
}

impl ApplicationBuilder {
    /// Handler for routed (non-ping) interactions. Required.
    #[must_use]
    pub fn handler(mut self, handler: Arc<dyn InteractionHandler>) -> Self {
        self.handler = Some(handler);
        self
    }

    /// Pre-dispatch hooks.
    #[must_use]
    pub fn hooks(mut self, hooks: InteractionHooks) -> Self {
        self.hooks = hooks;
        self
    }

    /// REST transport override. Defaults to [`HttpTransport`] with the
    /// configured bot token.
    #[must_use]
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// State cache for oversized component state. Without one, oversized
    /// state is rejected.
    #[must_use]
    pub fn cache(mut self, cache: Arc<dyn StateCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Finish the application.
    pub fn build(self) -> Result<Application, BuildError> {
        let handler = self.handler.ok_or(BuildError::MissingHandler)?;
        let public_key = public_key_from_hex(&self.options.public_key)?;

        let rest: Arc<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(HttpTransport::new(&self.options.token)?),
        };

        let components = match self.cache {
            Some(cache) => ComponentManager::with_cache(cache),
            None => ComponentManager::new(),
        };

        let commands = CommandManager::new(
            Arc::clone(&rest),
            components.clone(),
            self.options.client_id.clone(),
            None,
            self.options.remove_unregistered,
        );

        Ok(Application {
            inner: Arc::new(AppInner {
                client_id: self.options.client_id,
                public_key,
                timeout: self.options.timeout,
                remove_unregistered: self.options.remove_unregistered,
                hooks: self.hooks,
                handler,
                rest,
                components,
                commands,
                guild_commands: DashMap::new(),
            }),
        })
    }
}
