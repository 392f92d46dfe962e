//! Integration tests for command reconciliation against a mock transport.

mod helpers;

use std::sync::Arc;
use std::time::Duration;

use helpers::{api_command, test_application, EchoHandler, MockTransport, Signer, CLIENT_ID};
use howl_common::ApplicationCommandType;
use howl_interactions::builders::{ButtonBuilder, SlashCommandBuilder, UserCommandBuilder};
use howl_interactions::commands::{Command, RegistryError};
use howl_interactions::components::ComponentDef;
use howl_interactions::rest::Method;
use howl_interactions::Application;

fn app_with(transport: Arc<MockTransport>) -> Application {
    test_application(
        transport,
        EchoHandler::new(),
        &Signer::new(),
        Duration::from_millis(500),
    )
}

fn ping() -> Command {
    Command::slash(SlashCommandBuilder::new("ping", "Pong!"))
}

fn echo() -> Command {
    Command::slash(SlashCommandBuilder::new("echo", "Echo a message"))
}

#[tokio::test]
async fn missing_remote_command_is_created() {
    let transport = MockTransport::new();
    transport.push_response(serde_json::json!([]));
    transport.push_response(api_command("900", 1, "ping", "Pong!"));

    let app = app_with(Arc::clone(&transport));
    let registered = app.commands().register(vec![ping()]).await.unwrap();

    assert_eq!(registered.len(), 1);
    assert_eq!(registered[0].id(), "900");

    let requests = transport.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].method, Method::Get);
    assert_eq!(requests[0].route, format!("applications/{CLIENT_ID}/commands"));
    assert_eq!(requests[1].method, Method::Post);
}

#[tokio::test]
async fn identical_remote_command_is_adopted_without_writes() {
    let transport = MockTransport::new();
    transport.push_response(serde_json::json!([api_command("900", 1, "ping", "Pong!")]));

    let app = app_with(Arc::clone(&transport));
    let registered = app.commands().register(vec![ping()]).await.unwrap();

    assert_eq!(registered[0].id(), "900");
    assert_eq!(transport.count(Method::Post), 0);
    assert_eq!(transport.count(Method::Patch), 0);
    assert_eq!(transport.count(Method::Get), 1);
}

#[tokio::test]
async fn differing_remote_command_is_updated_without_its_type() {
    let transport = MockTransport::new();
    transport.push_response(serde_json::json!([api_command("900", 1, "ping", "Old words")]));
    transport.push_response(api_command("900", 1, "ping", "Pong!"));

    let app = app_with(Arc::clone(&transport));
    let registered = app.commands().register(vec![ping()]).await.unwrap();

    // The update goes to the existing command's id, and that id sticks.
    assert_eq!(registered[0].id(), "900");

    let requests = transport.requests();
    assert_eq!(transport.count(Method::Patch), 1);
    assert_eq!(transport.count(Method::Post), 0);

    let update = &requests[1];
    assert_eq!(update.method, Method::Patch);
    assert!(update.route.ends_with("/commands/900"));
    let body = update.body.as_ref().unwrap();
    assert!(body.get("type").is_none());
    assert_eq!(body["description"], "Pong!");
}

#[tokio::test]
async fn mixed_batch_creates_only_the_missing_command() {
    let transport = MockTransport::new();
    transport.push_response(serde_json::json!([api_command("900", 1, "ping", "Pong!")]));
    transport.push_response(api_command("901", 1, "echo", "Echo a message"));

    let app = app_with(Arc::clone(&transport));
    app.commands().register(vec![ping(), echo()]).await.unwrap();

    assert_eq!(transport.count(Method::Post), 1);
    assert_eq!(transport.count(Method::Patch), 0);

    let commands = app.commands();
    assert!(commands.has("ping", ApplicationCommandType::ChatInput));
    assert!(commands.has("echo", ApplicationCommandType::ChatInput));
    assert_eq!(
        commands
            .get("ping", ApplicationCommandType::ChatInput)
            .unwrap()
            .id(),
        "900"
    );
    assert_eq!(
        commands
            .get("echo", ApplicationCommandType::ChatInput)
            .unwrap()
            .id(),
        "901"
    );
}

#[tokio::test]
async fn create_without_an_id_fails_that_command_only() {
    let transport = MockTransport::new();
    transport.push_response(serde_json::json!([]));
    transport.push_response(api_command("900", 1, "ping", "Pong!"));
    // The echo create comes back with no usable identifier.
    transport.push_response(serde_json::json!({}));

    let app = app_with(Arc::clone(&transport));
    let err = app
        .commands()
        .register(vec![ping(), echo()])
        .await
        .unwrap_err();

    assert!(matches!(err, RegistryError::RegistrationFailed(name) if name == "echo"));
    // The earlier command in the batch stays registered.
    assert!(app.commands().has("ping", ApplicationCommandType::ChatInput));
    assert!(!app.commands().has("echo", ApplicationCommandType::ChatInput));
}

#[tokio::test]
async fn owned_components_are_namespaced_under_the_command() {
    let transport = MockTransport::new();
    transport.push_response(serde_json::json!([]));
    transport.push_response(api_command("900", 1, "ping", "Pong!"));

    let app = app_with(Arc::clone(&transport));
    let command = Command::slash_with_components(
        SlashCommandBuilder::new("ping", "Pong!"),
        vec![ComponentDef::button(
            "confirm",
            ButtonBuilder::new(howl_common::ButtonStyle::Primary).label("Again"),
        )],
    );
    app.commands().register(vec![command]).await.unwrap();

    assert!(app.components().has("ping.confirm"));
    assert!(!app.components().has("confirm"));
}

#[tokio::test]
async fn delete_unregistered_removes_only_remote_strays() {
    let transport = MockTransport::new();
    transport.push_response(serde_json::json!([]));
    transport.push_response(api_command("900", 1, "ping", "Pong!"));

    let app = app_with(Arc::clone(&transport));
    app.commands().register(vec![ping()]).await.unwrap();

    // One matching remote command, one stray.
    transport.push_response(serde_json::json!([
        api_command("900", 1, "ping", "Pong!"),
        api_command("666", 1, "stale", "Left behind"),
    ]));

    app.commands().delete_unregistered().await.unwrap();

    let deletes: Vec<_> = transport
        .requests()
        .into_iter()
        .filter(|request| request.method == Method::Delete)
        .collect();
    assert_eq!(deletes.len(), 1);
    assert!(deletes[0].route.ends_with("/commands/666"));
}

#[tokio::test]
async fn unregister_can_cascade_a_remote_delete() {
    let transport = MockTransport::new();
    transport.push_response(serde_json::json!([]));
    transport.push_response(api_command("900", 1, "ping", "Pong!"));

    let app = app_with(Arc::clone(&transport));
    app.commands().register(vec![ping()]).await.unwrap();

    app.commands()
        .unregister("ping", ApplicationCommandType::ChatInput, true)
        .await
        .unwrap();

    assert!(!app.commands().has("ping", ApplicationCommandType::ChatInput));
    let requests = transport.requests();
    let delete = requests.last().unwrap();
    assert_eq!(delete.method, Method::Delete);
    assert!(delete.route.ends_with("/commands/900"));

    let err = app
        .commands()
        .unregister("ping", ApplicationCommandType::ChatInput, false)
        .await
        .unwrap_err();
    assert!(matches!(err, RegistryError::NotFound { .. }));
}

#[tokio::test]
async fn rename_is_purely_local() {
    let transport = MockTransport::new();
    transport.push_response(serde_json::json!([]));
    transport.push_response(api_command("900", 1, "ping", "Pong!"));

    let app = app_with(Arc::clone(&transport));
    app.commands().register(vec![ping()]).await.unwrap();
    let writes_before = transport.requests().len();

    app.commands()
        .rename("ping", "pong", ApplicationCommandType::ChatInput)
        .unwrap();

    assert!(!app.commands().has("ping", ApplicationCommandType::ChatInput));
    let renamed = app
        .commands()
        .get("pong", ApplicationCommandType::ChatInput)
        .unwrap();
    assert_eq!(renamed.id(), "900");
    assert_eq!(transport.requests().len(), writes_before);

    let err = app
        .commands()
        .rename("ghost", "spirit", ApplicationCommandType::ChatInput)
        .unwrap_err();
    assert!(matches!(err, RegistryError::NotFound { .. }));
}

#[tokio::test]
async fn guild_scopes_are_independent_namespaces() {
    let transport = MockTransport::new();
    // Global register.
    transport.push_response(serde_json::json!([]));
    transport.push_response(api_command("900", 1, "ping", "Pong!"));
    // Guild register of the same (type, name).
    transport.push_response(serde_json::json!([]));
    transport.push_response(api_command("901", 1, "ping", "Pong!"));

    let app = app_with(Arc::clone(&transport));
    app.commands().register(vec![ping()]).await.unwrap();

    let guild = app.guild_commands("42424242");
    guild.register(vec![ping()]).await.unwrap();

    let requests = transport.requests();
    assert!(requests[2]
        .route
        .contains(&format!("applications/{CLIENT_ID}/guilds/42424242/commands")));

    assert_eq!(
        app.commands()
            .get("ping", ApplicationCommandType::ChatInput)
            .unwrap()
            .id(),
        "900"
    );
    assert_eq!(
        guild
            .get("ping", ApplicationCommandType::ChatInput)
            .unwrap()
            .id(),
        "901"
    );
}

#[tokio::test]
async fn bulk_overwrite_replaces_the_remote_set() {
    let transport = MockTransport::new();
    transport.push_response(serde_json::json!([]));
    transport.push_response(api_command("900", 1, "ping", "Pong!"));

    let app = app_with(Arc::clone(&transport));
    app.commands().register(vec![ping()]).await.unwrap();

    transport.push_response(serde_json::json!([api_command("900", 1, "ping", "Pong!")]));
    let payloads = app.commands().to_api_commands();
    let remote = app
        .commands()
        .bulk_overwrite_api_commands(payloads)
        .await
        .unwrap();

    assert_eq!(remote.len(), 1);
    let requests = transport.requests();
    let put = requests.last().unwrap();
    assert_eq!(put.method, Method::Put);
    assert!(put.body.as_ref().unwrap().is_array());
}

#[tokio::test]
async fn context_menu_commands_register_under_their_own_kind() {
    let transport = MockTransport::new();
    transport.push_response(serde_json::json!([]));
    transport.push_response(api_command("902", 2, "Report", ""));

    let app = app_with(Arc::clone(&transport));
    app.commands()
        .register(vec![Command::user(UserCommandBuilder::new("Report"))])
        .await
        .unwrap();

    assert!(app.commands().has("Report", ApplicationCommandType::User));
    assert!(!app
        .commands()
        .has("Report", ApplicationCommandType::ChatInput));
}
