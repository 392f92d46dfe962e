//! Application Configuration
//!
//! Options for constructing an application, loadable from environment
//! variables.

use std::env;
use std::time::Duration;

use anyhow::{Context, Result};
use howl_common::Snowflake;

/// Default deadline for delivering an interaction response.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(2500);

/// Options for constructing an application.
#[derive(Debug, Clone)]
pub struct ApplicationOptions {
    /// Application client id.
    pub client_id: Snowflake,

    /// Hex-encoded public key used to verify interaction signatures.
    pub public_key: String,

    /// Bot token used by the default REST transport.
    pub token: String,

    /// Deadline for delivering an interaction response (default: 2500 ms).
    pub timeout: Duration,

    /// Delete remote commands that are not locally registered at the end of
    /// each `register` batch.
    pub remove_unregistered: bool,
}

impl ApplicationOptions {
    /// Options with the default timeout.
    #[must_use]
    pub fn new(
        client_id: impl Into<Snowflake>,
        public_key: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            public_key: public_key.into(),
            token: token.into(),
            timeout: DEFAULT_TIMEOUT,
            remove_unregistered: false,
        }
    }

    /// Override the response deadline.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Prune remote commands that are not locally registered after each
    /// `register` batch.
    #[must_use]
    pub const fn remove_unregistered(mut self, remove: bool) -> Self {
        self.remove_unregistered = remove;
        self
    }

    /// Load options from environment variables.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            client_id: env::var("HOWL_CLIENT_ID").context("HOWL_CLIENT_ID must be set")?,
            public_key: env::var("HOWL_PUBLIC_KEY").context("HOWL_PUBLIC_KEY must be set")?,
            token: env::var("HOWL_TOKEN").context("HOWL_TOKEN must be set")?,
            timeout: env::var("HOWL_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map_or(DEFAULT_TIMEOUT, Duration::from_millis),
            remove_unregistered: env::var("HOWL_REMOVE_UNREGISTERED")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
        })
    }
}
