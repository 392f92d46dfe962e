//! REST API route construction.

/// Base URL of the platform API.
pub const API_BASE_URL: &str = "https://discord.com/api/v10";

/// Global command collection of an application.
#[must_use]
pub fn application_commands(application_id: &str) -> String {
    format!("applications/{application_id}/commands")
}

/// A single global command.
#[must_use]
pub fn application_command(application_id: &str, command_id: &str) -> String {
    format!("applications/{application_id}/commands/{command_id}")
}

/// Guild-scoped command collection of an application.
#[must_use]
pub fn application_guild_commands(application_id: &str, guild_id: &str) -> String {
    format!("applications/{application_id}/guilds/{guild_id}/commands")
}

/// A single guild-scoped command.
#[must_use]
pub fn application_guild_command(application_id: &str, guild_id: &str, command_id: &str) -> String {
    format!("applications/{application_id}/guilds/{guild_id}/commands/{command_id}")
}
