//! Initial responses to interactions.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::{OptionChoice, UnknownTypeCode};

/// Kind of interaction response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum ResponseKind {
    /// Acknowledges a ping.
    Pong = 1,
    /// Responds with a message.
    ChannelMessageWithSource = 4,
    /// Acknowledges now and sends a message later.
    DeferredChannelMessageWithSource = 5,
    /// Acknowledges a component interaction without a visible change.
    DeferredUpdateMessage = 6,
    /// Edits the message the component is attached to.
    UpdateMessage = 7,
    /// Returns autocomplete suggestions.
    ApplicationCommandAutocompleteResult = 8,
    /// Opens a modal form.
    Modal = 9,
}

impl TryFrom<u8> for ResponseKind {
    type Error = UnknownTypeCode;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Self::Pong),
            4 => Ok(Self::ChannelMessageWithSource),
            5 => Ok(Self::DeferredChannelMessageWithSource),
            6 => Ok(Self::DeferredUpdateMessage),
            7 => Ok(Self::UpdateMessage),
            8 => Ok(Self::ApplicationCommandAutocompleteResult),
            9 => Ok(Self::Modal),
            _ => Err(UnknownTypeCode {
                kind: "response type",
                code,
            }),
        }
    }
}

impl From<ResponseKind> for u8 {
    fn from(kind: ResponseKind) -> Self {
        kind as Self
    }
}

/// Initial response to an interaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionResponse {
    /// Response kind.
    #[serde(rename = "type")]
    pub kind: ResponseKind,
    /// Kind-specific payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl InteractionResponse {
    /// Creates a response with an arbitrary payload.
    #[must_use]
    pub const fn new(kind: ResponseKind, data: Option<Value>) -> Self {
        Self { kind, data }
    }

    /// Acknowledges a ping.
    #[must_use]
    pub const fn pong() -> Self {
        Self::new(ResponseKind::Pong, None)
    }

    /// Responds with a plain text message.
    #[must_use]
    pub fn message(content: impl Into<String>) -> Self {
        Self::new(
            ResponseKind::ChannelMessageWithSource,
            Some(json!({ "content": content.into() })),
        )
    }

    /// Acknowledges the interaction and defers the message.
    #[must_use]
    pub const fn deferred() -> Self {
        Self::new(ResponseKind::DeferredChannelMessageWithSource, None)
    }

    /// Returns autocomplete suggestions.
    #[must_use]
    pub fn autocomplete(choices: &[OptionChoice]) -> Self {
        Self::new(
            ResponseKind::ApplicationCommandAutocompleteResult,
            Some(json!({ "choices": choices })),
        )
    }
}
