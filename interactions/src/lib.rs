//! Howl Interactions
//!
//! Framework for receiving webhook-delivered interaction events from the
//! platform, keeping locally-declared commands and message components
//! reconciled with the remote declared set, and offloading oversized
//! component state to a pluggable cache.

pub mod application;
pub mod builders;
pub mod commands;
pub mod components;
pub mod config;
pub mod rest;

pub use application::{
    Application, ApplicationBuilder, BuildError, HookResult, InteractionContext, InteractionError,
    InteractionHandler, InteractionHooks, RequestAuth, ResponseCallback, ResponseSink, SinkError,
};
pub use config::ApplicationOptions;
