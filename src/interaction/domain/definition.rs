//! Upload-ready command definitions.

use serde::{Deserialize, Serialize};

use super::{CommandOption, DefinitionError, DestinationId, UnknownTypeCode};

/// Kind of application command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum CommandKind {
    /// Slash command typed into the chat input.
    ChatInput = 1,
    /// Context-menu entry on a user.
    User = 2,
    /// Context-menu entry on a message.
    Message = 3,
}

impl TryFrom<u8> for CommandKind {
    type Error = UnknownTypeCode;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Self::ChatInput),
            2 => Ok(Self::User),
            3 => Ok(Self::Message),
            _ => Err(UnknownTypeCode {
                kind: "command type",
                code,
            }),
        }
    }
}

impl From<CommandKind> for u8 {
    fn from(kind: CommandKind) -> Self {
        kind as Self
    }
}

/// Deployment boundary a definition applies to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CommandScope {
    /// Available in every destination.
    #[default]
    Global,
    /// Bound to a single destination.
    Destination(DestinationId),
}

impl CommandScope {
    /// Returns the destination identifier for scoped definitions.
    #[must_use]
    pub const fn destination(self) -> Option<DestinationId> {
        match self {
            Self::Global => None,
            Self::Destination(id) => Some(id),
        }
    }
}

/// Command definition as understood by the external command directory.
///
/// The scope is not part of the wire shape; it decides which bulk upload the
/// definition belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandDefinition {
    /// Command name.
    pub name: String,
    /// Command kind.
    #[serde(rename = "type")]
    pub kind: CommandKind,
    /// Description; empty for context menus.
    #[serde(default)]
    pub description: String,
    /// Declared options, including subcommand wrappers.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<CommandOption>,
    /// Whether the command is enabled by default.
    #[serde(default = "enabled_by_default")]
    pub default_permission: bool,
    /// Deployment scope.
    #[serde(skip)]
    pub scope: CommandScope,
}

const fn enabled_by_default() -> bool {
    true
}

impl CommandDefinition {
    /// Creates a global definition without options.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: CommandKind, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            description: description.into(),
            options: Vec::new(),
            default_permission: true,
            scope: CommandScope::Global,
        }
    }

    /// Replaces the options.
    #[must_use]
    pub fn with_options(mut self, options: Vec<CommandOption>) -> Self {
        self.options = options;
        self
    }

    /// Sets the deployment scope.
    #[must_use]
    pub const fn with_scope(mut self, scope: CommandScope) -> Self {
        self.scope = scope;
        self
    }

    /// Sets whether the command is enabled by default.
    #[must_use]
    pub const fn with_default_permission(mut self, default_permission: bool) -> Self {
        self.default_permission = default_permission;
        self
    }

    /// Validates the definition and every option in it.
    ///
    /// # Errors
    ///
    /// Returns [`DefinitionError::MissingDescription`] for a chat-input
    /// command without a description,
    /// [`DefinitionError::ContextMenuOptions`] for a context menu with
    /// options, or the first option validation failure.
    pub fn validate(&self) -> Result<(), DefinitionError> {
        match self.kind {
            CommandKind::ChatInput if self.description.trim().is_empty() => {
                return Err(DefinitionError::MissingDescription {
                    command: self.name.clone(),
                });
            }
            CommandKind::User | CommandKind::Message if !self.options.is_empty() => {
                return Err(DefinitionError::ContextMenuOptions {
                    command: self.name.clone(),
                });
            }
            _ => {}
        }
        self.options.iter().try_for_each(CommandOption::validate)
    }
}
