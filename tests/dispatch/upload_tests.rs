//! Uploading exported definitions to the command directory.

use rstest::rstest;
use serde_json::json;
use switchboard::interaction::{
    adapters::memory::InMemoryCommandDirectory,
    config::ClientConfig,
    domain::{CommandBuilder, CommandKind, CommandOption, DestinationId, OptionType},
    ports::DirectoryError,
    services::InteractionClient,
};

use super::helpers::{directory, echo};

fn populated_client(config: ClientConfig) -> InteractionClient {
    let mut client = InteractionClient::new(config);
    for (name, description) in [("list", "List tags"), ("add", "Add a tag")] {
        client
            .add_command(
                CommandBuilder::slash("tag", "Manage tags")
                    .subcommand(name, description)
                    .build(echo)
                    .expect("tag subcommand"),
            )
            .expect("tag registration");
    }
    client
        .add_command(
            CommandBuilder::context_menu("Quote", CommandKind::Message)
                .build(echo)
                .expect("quote menu"),
        )
        .expect("quote registration");
    client
        .add_command(
            CommandBuilder::slash("config", "Manage configuration")
                .subcommand_group("set", "Set a value")
                .subcommand("key", "Set one key")
                .option(
                    CommandOption::new(OptionType::String, "value", "New value")
                        .with_required(true),
                )
                .build(echo)
                .expect("config set key"),
        )
        .expect("config registration");
    client
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn global_upload_has_the_directory_wire_shape(directory: InMemoryCommandDirectory) {
    let client = populated_client(ClientConfig::gateway());

    client
        .register_commands(&directory)
        .await
        .expect("upload should succeed");

    let uploaded = serde_json::to_value(directory.definitions(None)).expect("serializable");
    assert_eq!(
        uploaded,
        json!([
            {
                "name": "Quote",
                "type": 3,
                "description": "",
                "default_permission": true,
            },
            {
                "name": "tag",
                "type": 1,
                "description": "Manage tags",
                "options": [
                    { "type": 1, "name": "list", "description": "List tags" },
                    { "type": 1, "name": "add", "description": "Add a tag" },
                ],
                "default_permission": true,
            },
            {
                "name": "config",
                "type": 1,
                "description": "Manage configuration",
                "options": [{
                    "type": 2,
                    "name": "set",
                    "description": "Set a value",
                    "options": [{
                        "type": 1,
                        "name": "key",
                        "description": "Set one key",
                        "options": [{
                            "type": 3,
                            "name": "value",
                            "description": "New value",
                            "required": true,
                        }],
                    }],
                }],
                "default_permission": true,
            },
        ])
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn repeated_uploads_replace_previous_definitions(directory: InMemoryCommandDirectory) {
    let client = populated_client(ClientConfig::gateway());

    let first = client
        .register_commands(&directory)
        .await
        .expect("first upload");
    let second = client
        .register_commands(&directory)
        .await
        .expect("second upload");

    assert_eq!(first, second);
    assert_eq!(directory.uploads().len(), 2);
    assert_eq!(directory.definitions(None).len(), 3);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn destination_override_uploads_only_to_that_destination(
    directory: InMemoryCommandDirectory,
) {
    let destination = DestinationId::new(5150);
    let client = populated_client(ClientConfig::gateway().with_destination_override(destination));

    client
        .register_commands(&directory)
        .await
        .expect("upload should succeed");

    assert!(directory.definitions(None).is_empty());
    assert_eq!(directory.definitions(Some(destination)).len(), 3);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rejected_upload_surfaces_the_reason() {
    let client = populated_client(ClientConfig::gateway());
    let directory = InMemoryCommandDirectory::rejecting("invalid form body");

    let result = client.register_commands(&directory).await;

    assert!(matches!(result, Err(DirectoryError::Rejected(reason)) if reason == "invalid form body"));
    assert!(directory.uploads().is_empty());
}
