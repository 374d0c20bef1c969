//! Endpoint-mode dispatch through the responder port.

use std::sync::Arc;
use std::time::Duration;

use rstest::rstest;
use serde_json::json;
use switchboard::interaction::{
    adapters::memory::{CollectingErrorListener, RecordingResponder},
    config::ClientConfig,
    domain::{
        CommandBuilder, ComponentCallback, DispatchError, HandlerError, InteractionContext,
        InteractionResponse,
    },
    ports::ResponderError,
    services::InteractionClient,
};

use super::helpers::{button_payload, command_payload, echo, listener, responder};

fn gateway_client(
    responder: &RecordingResponder,
    listener: &CollectingErrorListener,
) -> InteractionClient {
    InteractionClient::new(ClientConfig::gateway())
        .with_responder(Arc::new(responder.clone()))
        .with_error_listener(Arc::new(listener.clone()))
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn button_prefix_callback_responds_through_endpoint(
    responder: RecordingResponder,
    listener: CollectingErrorListener,
) {
    let mut client = gateway_client(&responder, &listener);
    client
        .add_callback(ComponentCallback::new(
            "poll:",
            |context: InteractionContext, _arguments| async move {
                let choice = context.label().trim_start_matches("poll:").to_owned();
                context.respond(format!("voted {choice}")).await?;
                Ok::<_, HandlerError>(())
            },
        ))
        .expect("poll callback");
    let event = button_payload("poll:blue");
    let id = event.id;

    client
        .dispatch(event)
        .expect("button should route")
        .await
        .expect("handler task");

    assert_eq!(
        responder.response_for(id).expect("responses"),
        Some(InteractionResponse::message("voted blue"))
    );
    assert!(listener.errors().is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn gateway_event_returns_before_handler_finishes(
    responder: RecordingResponder,
    listener: CollectingErrorListener,
) {
    let mut client = gateway_client(&responder, &listener);
    client
        .add_command(
            CommandBuilder::slash("report", "Build a report")
                .build(|context: InteractionContext, _arguments| async move {
                    tokio::time::sleep(Duration::from_millis(50)).await;
                    context.respond("report ready").await?;
                    Ok::<_, HandlerError>(())
                })
                .expect("report command"),
        )
        .expect("report registration");

    let response = client.on_event(command_payload("report", json!([]))).await;

    assert_eq!(response, None);
    assert!(responder.responses().expect("responses").is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn second_initial_response_is_rejected(
    responder: RecordingResponder,
    listener: CollectingErrorListener,
) {
    let mut client = gateway_client(&responder, &listener);
    client
        .add_command(
            CommandBuilder::slash("twice", "Answer twice")
                .build(|context: InteractionContext, _arguments| async move {
                    context.respond("first").await?;
                    context.respond("second").await?;
                    Ok::<_, HandlerError>(())
                })
                .expect("twice command"),
        )
        .expect("twice registration");

    client
        .dispatch(command_payload("twice", json!([])))
        .expect("twice should route")
        .await
        .expect("handler task");

    assert_eq!(responder.responses().expect("responses").len(), 1);
    let errors = listener.errors();
    let Some((_, DispatchError::Handler { error, .. })) = errors.first() else {
        panic!("expected a handler error, got {errors:?}");
    };
    assert!(matches!(
        error.inner().downcast_ref::<ResponderError>(),
        Some(ResponderError::AlreadyResponded(_))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn detached_client_cannot_respond(listener: CollectingErrorListener) {
    let mut client =
        InteractionClient::new(ClientConfig::gateway()).with_error_listener(Arc::new(listener.clone()));
    client
        .add_command(CommandBuilder::slash("say", "Repeat").build(echo).expect("say"))
        .expect("say registration");

    client
        .dispatch(command_payload("say", json!([])))
        .expect("say should route")
        .await
        .expect("handler task");

    assert!(matches!(
        listener.errors().first(),
        Some((_, DispatchError::Handler { .. }))
    ));
}
