//! Component manager: registration plus state binding.

use std::sync::Arc;

use dashmap::DashMap;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use super::state::{CacheError, StateCache};
use super::{ComponentDef, ComponentInstance, ID_BUDGET, STATE_SEPARATOR};

/// Errors from component registry operations.
#[derive(Debug, Error)]
pub enum ComponentError {
    /// No definition registered under the requested id.
    #[error("component {0} is not registered")]
    NotFound(String),
    /// State did not fit the identifier budget and no cache is configured.
    #[error("component state too large for {0}, configure a state cache")]
    StateTooLarge(String),
    /// State payload failed to serialize.
    #[error("failed to serialize component state: {0}")]
    Serialize(#[from] serde_json::Error),
    /// Cache collaborator failure.
    #[error(transparent)]
    Cache(#[from] CacheError),
}

/// A received custom id split back into definition id and state payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedState {
    /// Definition id, before the separator.
    pub component_id: String,
    /// State payload, with cache handles resolved back to the stored value.
    pub state: String,
}

/// In-memory mapping from component id to definition, with state binding.
///
/// Reads happen during routing and response building; writes only during
/// explicit register/unregister calls. Interleaving those without external
/// synchronization is last-write-wins.
#[derive(Clone, Default)]
pub struct ComponentManager {
    components: Arc<DashMap<String, ComponentDef>>,
    cache: Option<Arc<dyn StateCache>>,
}

impl ComponentManager {
    /// A manager with no state cache: oversized state is rejected.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A manager that offloads oversized state to `cache`.
    #[must_use]
    pub fn with_cache(cache: Arc<dyn StateCache>) -> Self {
        Self {
            components: Arc::new(DashMap::new()),
            cache: Some(cache),
        }
    }

    /// Whether a definition is registered under `id`.
    #[must_use]
    pub fn has(&self, id: &str) -> bool {
        self.components.contains_key(id)
    }

    /// Fetch a registered definition.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<ComponentDef> {
        self.components.get(id).map(|entry| entry.value().clone())
    }

    /// Register definitions, keyed by their ids. Re-registering an id
    /// replaces the previous definition.
    pub fn register(&self, components: impl IntoIterator<Item = ComponentDef>) {
        for component in components {
            self.components.insert(component.id().to_owned(), component);
        }
    }

    /// Remove a definition.
    pub fn unregister(&self, id: &str) {
        self.components.remove(id);
    }

    /// Produce a bound instance of the definition registered under `name`,
    /// with `data` serialized into its custom id.
    ///
    /// When `id.len() + serialized.len()` exceeds the identifier budget the
    /// serialized state is stored in the configured cache under a random
    /// handle (for `ttl` seconds, the cache default when `None`) and the
    /// handle is embedded instead, keeping the custom id within the
    /// platform ceiling.
    pub async fn create_instance<T: Serialize>(
        &self,
        name: &str,
        data: &T,
        ttl: Option<u64>,
    ) -> Result<ComponentInstance, ComponentError> {
        let definition = self
            .get(name)
            .ok_or_else(|| ComponentError::NotFound(name.to_owned()))?;

        let mut state = serde_json::to_string(data)?;

        if definition.id().len() + state.len() > ID_BUDGET {
            let Some(cache) = &self.cache else {
                return Err(ComponentError::StateTooLarge(name.to_owned()));
            };

            let handle = Uuid::new_v4().to_string();
            let ttl = ttl.unwrap_or_else(|| cache.default_ttl());
            cache.set(&handle, ttl, state).await?;

            debug!(component = %name, handle = %handle, ttl, "Offloaded component state to cache");
            state = handle;
        }

        Ok(definition.create_instance(&state))
    }

    /// Split a received custom id and resolve its state segment, fetching
    /// cache-offloaded payloads back through the configured cache.
    pub async fn resolve_state(&self, custom_id: &str) -> Result<ResolvedState, ComponentError> {
        let (component_id, state) = custom_id
            .split_once(STATE_SEPARATOR)
            .unwrap_or((custom_id, ""));

        if let Some(cache) = &self.cache {
            if let Some(stored) = cache.get(state).await? {
                return Ok(ResolvedState {
                    component_id: component_id.to_owned(),
                    state: stored,
                });
            }
        }

        Ok(ResolvedState {
            component_id: component_id.to_owned(),
            state: state.to_owned(),
        })
    }
}
