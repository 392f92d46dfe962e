//! Pre-dispatch hooks.

use std::sync::Arc;

use futures::future::BoxFuture;
use howl_common::Interaction;

use super::sink::ResponseSink;
use super::Application;

/// Outcome of the global pre-dispatch hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookResult {
    /// Continue routing the interaction.
    Continue,
    /// The hook handled the interaction; skip routing. The hook is
    /// responsible for having delivered (or intentionally withheld) the
    /// response.
    Handled,
}

/// The global pre-dispatch hook signature.
pub type InteractionHook =
    Arc<dyn Fn(InteractionContext) -> BoxFuture<'static, HookResult> + Send + Sync>;

/// Hooks evaluated before an interaction is routed.
///
/// Immutable after construction; configured on the application builder.
#[derive(Clone, Default)]
pub struct InteractionHooks {
    /// Runs first, on every authenticated interaction.
    pub interaction: Option<InteractionHook>,
}

impl InteractionHooks {
    /// Hooks with a global pre-dispatch hook set.
    #[must_use]
    pub fn on_interaction<F>(hook: F) -> Self
    where
        F: Fn(InteractionContext) -> BoxFuture<'static, HookResult> + Send + Sync + 'static,
    {
        Self {
            interaction: Some(Arc::new(hook)),
        }
    }
}

/// Read-only context handed to the global hook.
#[derive(Clone)]
pub struct InteractionContext {
    /// The receiving application.
    pub application: Application,
    /// The authenticated, parsed interaction.
    pub interaction: Interaction,
    /// Deadline-aware response sink; a hook that handles the interaction
    /// delivers its response through this.
    pub sink: ResponseSink,
}
