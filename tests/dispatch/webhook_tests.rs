//! Webhook-mode dispatch of decoded wire payloads.

use std::sync::Arc;

use rstest::rstest;
use serde_json::json;
use switchboard::interaction::{
    adapters::memory::CollectingErrorListener,
    config::ClientConfig,
    domain::{
        CommandBuilder, CommandOption, DispatchError, HandlerError, InteractionContext,
        InteractionResponse, OptionType,
    },
    services::InteractionClient,
};

use super::helpers::{command_payload, echo, listener};

fn client_with(listener: &CollectingErrorListener) -> InteractionClient {
    let mut client = InteractionClient::new(ClientConfig::webhook())
        .with_error_listener(Arc::new(listener.clone()));
    client
        .add_command(
            CommandBuilder::slash("say", "Repeat something")
                .option(CommandOption::new(OptionType::String, "text", "What to say").with_required(true))
                .build(echo)
                .expect("say command"),
        )
        .expect("say registration");
    client
        .add_command(
            CommandBuilder::slash("tag", "Manage tags")
                .subcommand("show", "Show a tag")
                .option(CommandOption::new(OptionType::String, "name", "Tag name").with_required(true))
                .connect("name", "text")
                .build(echo)
                .expect("tag show"),
        )
        .expect("tag show registration");
    client
        .add_command(
            CommandBuilder::slash("config", "Manage configuration")
                .subcommand_group("flags", "Feature flags")
                .subcommand("enable", "Enable a flag")
                .option(CommandOption::new(OptionType::String, "flag", "Flag name"))
                .build(|context: InteractionContext, arguments| async move {
                    let flag = arguments.get_str("flag").unwrap_or("all").to_owned();
                    context.respond(format!("enabled {flag}")).await?;
                    Ok::<_, HandlerError>(())
                })
                .expect("config flags enable"),
        )
        .expect("config registration");
    client
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn bare_command_answers_inline(listener: CollectingErrorListener) {
    let client = client_with(&listener);
    let event = command_payload("say", json!([{ "name": "text", "type": 3, "value": "hello" }]));

    let response = client.on_event(event).await;

    assert_eq!(response, Some(InteractionResponse::message("hello")));
    assert!(listener.errors().is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn subcommand_answers_with_renamed_option(listener: CollectingErrorListener) {
    let client = client_with(&listener);
    let event = command_payload(
        "tag",
        json!([{
            "name": "show",
            "type": 1,
            "options": [{ "name": "name", "type": 3, "value": "faq" }],
        }]),
    );

    let response = client.on_event(event).await;

    assert_eq!(response, Some(InteractionResponse::message("faq")));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn grouped_subcommand_answers_inline(listener: CollectingErrorListener) {
    let client = client_with(&listener);
    let event = command_payload(
        "config",
        json!([{
            "name": "flags",
            "type": 2,
            "options": [{
                "name": "enable",
                "type": 1,
                "options": [{ "name": "flag", "type": 3, "value": "beta" }],
            }],
        }]),
    );

    let response = client.on_event(event).await;

    assert_eq!(response, Some(InteractionResponse::message("enabled beta")));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn missing_required_option_reaches_listener(listener: CollectingErrorListener) {
    let client = client_with(&listener);

    let response = client.on_event(command_payload("say", json!([]))).await;

    assert_eq!(response, None);
    let errors = listener.errors();
    assert_eq!(errors.len(), 1);
    assert!(matches!(
        errors.first(),
        Some((label, DispatchError::InvalidOptionParameter { missing, .. }))
            if label == "say" && missing == &["text"]
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn group_without_subcommand_is_dropped(listener: CollectingErrorListener) {
    let client = client_with(&listener);
    let event = command_payload("config", json!([{ "name": "flags", "type": 2, "options": [] }]));

    assert_eq!(client.on_event(event).await, None);
    assert!(listener.errors().is_empty());
}
