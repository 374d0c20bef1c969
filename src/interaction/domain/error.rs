//! Error types for command definitions, registration, and dispatch.

use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Error returned when a numeric wire code has no matching variant.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown {kind} code: {code}")]
pub struct UnknownTypeCode {
    /// Name of the enumeration being decoded.
    pub kind: &'static str,
    /// The unrecognised code.
    pub code: u8,
}

/// Errors raised while assembling a command or option definition.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DefinitionError {
    /// Chat-input commands must carry a description.
    #[error("description must be set for chat-input command '{command}'")]
    MissingDescription {
        /// Command name.
        command: String,
    },

    /// Subcommands and groups are exclusive to chat-input commands.
    #[error("subcommands are exclusive to chat-input commands ('{command}')")]
    SubcommandRequiresChatInput {
        /// Command name.
        command: String,
    },

    /// A subcommand was declared without a description.
    #[error("subcommand '{subcommand}' of '{command}' must have a description")]
    MissingSubcommandDescription {
        /// Command name.
        command: String,
        /// Subcommand name.
        subcommand: String,
    },

    /// A subcommand group was declared without a subcommand.
    #[error("subcommand group '{group}' of '{command}' requires a subcommand")]
    GroupWithoutSubcommand {
        /// Command name.
        command: String,
        /// Group name.
        group: String,
    },

    /// A subcommand group was declared without a description.
    #[error("subcommand group '{group}' of '{command}' must have a description")]
    MissingGroupDescription {
        /// Command name.
        command: String,
        /// Group name.
        group: String,
    },

    /// Context menus cannot use the chat-input kind.
    #[error("context menu '{command}' cannot be a chat-input command")]
    ChatInputContextMenu {
        /// Command name.
        command: String,
    },

    /// Context menus cannot declare options.
    #[error("context menu '{command}' cannot declare options")]
    ContextMenuOptions {
        /// Command name.
        command: String,
    },

    /// An option has an invalid shape for its type.
    #[error("invalid option '{option}': {reason}")]
    InvalidOption {
        /// Option name.
        option: String,
        /// Validation reason.
        reason: String,
    },

    /// Choices and autocomplete cannot be combined on one option.
    #[error("option '{option}' cannot combine choices with autocomplete")]
    ChoicesWithAutocomplete {
        /// Option name.
        option: String,
    },

    /// A parameter has no kind to infer an option type from.
    #[error("parameter '{parameter}' has no declared kind to infer an option type from")]
    UninferableParameter {
        /// Parameter name.
        parameter: String,
    },
}

/// Identifies a registry slot in error messages.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RegistryKey {
    /// A command slot at any hierarchy level.
    Command {
        /// Top-level command name.
        command: String,
        /// Subcommand group name, when nested in a group.
        group: Option<String>,
        /// Subcommand name, when the slot is a subcommand.
        subcommand: Option<String>,
    },
    /// A component callback keyed by custom-id.
    Component(String),
    /// An autocomplete callback keyed by its composite key.
    Autocomplete(String),
}

impl fmt::Display for RegistryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Command {
                command,
                group,
                subcommand,
            } => {
                f.write_str(command)?;
                for segment in [group, subcommand].into_iter().flatten() {
                    write!(f, " {segment}")?;
                }
                Ok(())
            }
            Self::Component(custom_id) => write!(f, "component '{custom_id}'"),
            Self::Autocomplete(key) => write!(f, "autocomplete '{key}'"),
        }
    }
}

/// Errors raised synchronously by registry mutation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// The slot is already occupied, either by the same key or by a
    /// conflicting hierarchy shape under the same command name.
    #[error("already registered: {0}")]
    AlreadyExists(RegistryKey),

    /// The slot to remove is empty.
    #[error("not registered: {0}")]
    NotExists(RegistryKey),
}

/// Error produced by a handler body.
///
/// Any `std::error::Error` converts into a `HandlerError`, so handler bodies
/// can propagate failures with `?`.
#[derive(Clone)]
pub struct HandlerError(Arc<dyn std::error::Error + Send + Sync>);

#[derive(Debug, Error)]
#[error("{0}")]
struct MessageError(String);

impl HandlerError {
    /// Creates an error from a plain message.
    pub fn msg(message: impl Into<String>) -> Self {
        Self(Arc::new(MessageError(message.into())))
    }

    /// Returns the wrapped error.
    #[must_use]
    pub fn inner(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        &*self.0
    }
}

impl<E> From<E> for HandlerError
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn from(err: E) -> Self {
        Self(Arc::new(err))
    }
}

impl fmt::Debug for HandlerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("HandlerError").field(&self.0).finish()
    }
}

impl fmt::Display for HandlerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Errors observed while dispatching an interaction to its handler.
///
/// These never reach the event source; they flow through the recovery chain
/// instead.
#[derive(Debug, Clone, Error)]
pub enum DispatchError {
    /// Supplied options do not match the handler's declared parameters.
    #[error(
        "options for '{target}' do not match the handler parameters (missing: {missing:?}, unexpected: {unexpected:?})"
    )]
    InvalidOptionParameter {
        /// Handler label.
        target: String,
        /// Required parameters absent from the supplied options.
        missing: Vec<String>,
        /// Supplied options the handler does not declare.
        unexpected: Vec<String>,
    },

    /// A guard predicate rejected the call.
    #[error("check failed for '{target}'")]
    CheckFailed {
        /// Handler label.
        target: String,
    },

    /// The handler body returned an error.
    #[error("handler for '{target}' failed: {error}")]
    Handler {
        /// Handler label.
        target: String,
        /// Error returned by the handler body.
        error: HandlerError,
    },

    /// The handler body panicked.
    #[error("handler for '{target}' panicked")]
    Panicked {
        /// Handler label.
        target: String,
    },

    /// The handler task was cancelled before completion.
    #[error("handler for '{target}' was cancelled")]
    Cancelled {
        /// Handler label.
        target: String,
    },
}

impl DispatchError {
    /// Returns the label of the handler the error belongs to.
    #[must_use]
    pub fn target(&self) -> &str {
        match self {
            Self::InvalidOptionParameter { target, .. }
            | Self::CheckFailed { target }
            | Self::Handler { target, .. }
            | Self::Panicked { target }
            | Self::Cancelled { target } => target,
        }
    }
}
