//! Decoded inbound interaction events.
//!
//! Only the fields the dispatcher reads are modelled explicitly. Entity
//! payloads (members, users, resolved objects) stay as raw JSON values and
//! are handed to handlers untouched.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use super::{CommandKind, OptionType, Snowflake, UnknownTypeCode};

/// Kind of interaction event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum InteractionKind {
    /// Endpoint liveness probe.
    Ping = 1,
    /// Application command invocation.
    ApplicationCommand = 2,
    /// Message component (button, select menu) interaction.
    MessageComponent = 3,
    /// Autocomplete request for a focused option.
    ApplicationCommandAutocomplete = 4,
    /// Modal form submission.
    ModalSubmit = 5,
}

impl TryFrom<u8> for InteractionKind {
    type Error = UnknownTypeCode;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Self::Ping),
            2 => Ok(Self::ApplicationCommand),
            3 => Ok(Self::MessageComponent),
            4 => Ok(Self::ApplicationCommandAutocomplete),
            5 => Ok(Self::ModalSubmit),
            _ => Err(UnknownTypeCode {
                kind: "interaction type",
                code,
            }),
        }
    }
}

impl From<InteractionKind> for u8 {
    fn from(kind: InteractionKind) -> Self {
        kind as Self
    }
}

/// A received interaction event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    /// Interaction identifier.
    pub id: Snowflake,
    /// Application the interaction targets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_id: Option<Snowflake>,
    /// Event kind.
    #[serde(rename = "type")]
    pub kind: InteractionKind,
    /// Event payload.
    #[serde(default)]
    pub data: InteractionData,
    /// Destination the interaction was triggered in, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<Snowflake>,
    /// Channel the interaction was triggered in, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<Snowflake>,
    /// Invoking member, for interactions inside a destination.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member: Option<Value>,
    /// Invoking user, for direct interactions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<Value>,
    /// Continuation token used when responding through the endpoint.
    #[serde(default)]
    pub token: String,
}

/// Payload of an interaction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InteractionData {
    /// Invoked command name.
    #[serde(default)]
    pub name: String,
    /// Invoked command kind.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub command_kind: Option<CommandKind>,
    /// Supplied options, possibly nested under subcommand wrappers.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<InteractionDataOption>,
    /// Component or modal custom-id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_id: Option<String>,
    /// Component type code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_type: Option<u8>,
    /// Values picked in a select menu.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<String>,
    /// Target of a context-menu command.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_id: Option<Snowflake>,
    /// Entities referenced by option values, keyed by identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved: Option<ResolvedData>,
}

/// One supplied option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionDataOption {
    /// Option name.
    pub name: String,
    /// Option type.
    #[serde(rename = "type")]
    pub kind: OptionType,
    /// Raw value for leaf options.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    /// Nested options for subcommand wrappers.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<Self>,
    /// Whether this option is being autocompleted.
    #[serde(default)]
    pub focused: bool,
}

/// Entities referenced by an interaction, delivered inline with the event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolvedData {
    /// Resolved users.
    #[serde(default)]
    pub users: BTreeMap<String, Value>,
    /// Resolved destination members.
    #[serde(default)]
    pub members: BTreeMap<String, Value>,
    /// Resolved roles.
    #[serde(default)]
    pub roles: BTreeMap<String, Value>,
    /// Resolved channels.
    #[serde(default)]
    pub channels: BTreeMap<String, Value>,
    /// Resolved messages.
    #[serde(default)]
    pub messages: BTreeMap<String, Value>,
}

impl ResolvedData {
    /// Looks up an entity by identifier.
    ///
    /// Members take precedence over users so that destination-specific data
    /// is preferred, followed by roles, channels, and messages.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Value> {
        [
            &self.members,
            &self.users,
            &self.roles,
            &self.channels,
            &self.messages,
        ]
        .into_iter()
        .find_map(|entities| entities.get(id))
    }
}
