//! Routed interaction handlers.

use async_trait::async_trait;
use howl_common::Interaction;

use super::sink::ResponseSink;
use super::Application;

/// Handlers for routed (non-ping) interactions, supplied by the consumer.
///
/// The dispatcher owns authentication, the deadline, and routing; what a
/// command or component actually does lives behind this trait. Each method
/// receives the application handle, the parsed interaction, and a
/// deadline-aware response sink. Handlers run on their own task and may
/// complete after the dispatch future has already timed out; the sink stays
/// usable either way.
#[async_trait]
pub trait InteractionHandler: Send + Sync {
    /// An application command invocation.
    async fn handle_command(
        &self,
        application: Application,
        interaction: Interaction,
        sink: ResponseSink,
    ) -> anyhow::Result<()>;

    /// An autocomplete request for a command option.
    async fn handle_autocomplete(
        &self,
        application: Application,
        interaction: Interaction,
        sink: ResponseSink,
    ) -> anyhow::Result<()>;

    /// A message component interaction or modal submit.
    async fn handle_component(
        &self,
        application: Application,
        interaction: Interaction,
        sink: ResponseSink,
    ) -> anyhow::Result<()>;
}
