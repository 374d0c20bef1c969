//! Shared helpers for in-memory dispatch tests.

use std::sync::atomic::{AtomicU64, Ordering};

use rstest::fixture;
use serde_json::{Value, json};
use switchboard::interaction::{
    adapters::memory::{CollectingErrorListener, InMemoryCommandDirectory, RecordingResponder},
    domain::{Arguments, HandlerError, Interaction, InteractionContext},
};

static NEXT_ID: AtomicU64 = AtomicU64::new(900_000);

/// Provides a listener that collects unrecovered dispatch errors.
#[fixture]
pub fn listener() -> CollectingErrorListener {
    CollectingErrorListener::new()
}

/// Provides a responder that records endpoint responses.
#[fixture]
pub fn responder() -> RecordingResponder {
    RecordingResponder::new()
}

/// Provides an empty command directory.
#[fixture]
pub fn directory() -> InMemoryCommandDirectory {
    InMemoryCommandDirectory::new()
}

/// Decodes a wire payload, assigning a fresh interaction id.
///
/// # Panics
///
/// Panics when the payload is not a valid interaction.
pub fn decode(mut payload: Value) -> Interaction {
    if let Some(fields) = payload.as_object_mut() {
        fields.insert(
            "id".to_owned(),
            json!(NEXT_ID.fetch_add(1, Ordering::Relaxed).to_string()),
        );
        fields.insert("token".to_owned(), json!("continuation-token"));
    }
    serde_json::from_value(payload).expect("payload should decode")
}

/// Builds an application command payload.
pub fn command_payload(name: &str, options: Value) -> Interaction {
    decode(json!({
        "type": 2,
        "guild_id": "5150",
        "data": { "name": name, "type": 1, "options": options },
    }))
}

/// Builds a button press payload.
pub fn button_payload(custom_id: &str) -> Interaction {
    decode(json!({
        "type": 3,
        "data": { "custom_id": custom_id, "component_type": 2 },
    }))
}

/// Handler that echoes its `text` argument back as the initial response.
pub async fn echo(context: InteractionContext, arguments: Arguments) -> Result<(), HandlerError> {
    let text = arguments.get_str("text").unwrap_or("(nothing)").to_owned();
    context.respond(text).await?;
    Ok(())
}
