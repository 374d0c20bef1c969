//! Declared command parameters and their wire option types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{DefinitionError, UnknownTypeCode};

/// Wire type of a command option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum OptionType {
    /// Nested subcommand.
    SubCommand = 1,
    /// Group of subcommands.
    SubCommandGroup = 2,
    /// Free-form string.
    String = 3,
    /// Integer value.
    Integer = 4,
    /// Boolean value.
    Boolean = 5,
    /// User reference.
    User = 6,
    /// Channel reference.
    Channel = 7,
    /// Role reference.
    Role = 8,
    /// User or role reference.
    Mentionable = 9,
    /// Floating-point value.
    Number = 10,
}

impl OptionType {
    /// Returns `true` for the two container types that nest other options.
    #[must_use]
    pub const fn is_container(self) -> bool {
        matches!(self, Self::SubCommand | Self::SubCommandGroup)
    }

    /// Returns `true` when option values of this type are entity identifiers
    /// that can be replaced by resolved entity objects.
    #[must_use]
    pub const fn resolves_entity(self) -> bool {
        matches!(
            self,
            Self::User | Self::Channel | Self::Role | Self::Mentionable
        )
    }
}

impl TryFrom<u8> for OptionType {
    type Error = UnknownTypeCode;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Ok(match code {
            1 => Self::SubCommand,
            2 => Self::SubCommandGroup,
            3 => Self::String,
            4 => Self::Integer,
            5 => Self::Boolean,
            6 => Self::User,
            7 => Self::Channel,
            8 => Self::Role,
            9 => Self::Mentionable,
            10 => Self::Number,
            _ => {
                return Err(UnknownTypeCode {
                    kind: "option type",
                    code,
                });
            }
        })
    }
}

impl From<OptionType> for u8 {
    fn from(kind: OptionType) -> Self {
        kind as Self
    }
}

/// A fixed value a user may pick for an option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionChoice {
    /// Display name.
    pub name: String,
    /// Value delivered to the handler.
    pub value: Value,
}

impl OptionChoice {
    /// Creates a choice.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A declared command option.
///
/// # Examples
///
/// ```
/// use switchboard::interaction::domain::{CommandOption, OptionType};
///
/// let option = CommandOption::new(OptionType::User, "target", "Who to greet")
///     .with_required(true);
/// assert!(option.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandOption {
    /// Wire type.
    #[serde(rename = "type")]
    pub kind: OptionType,
    /// Option name.
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// Whether the option must be supplied.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,
    /// Fixed choices.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<OptionChoice>,
    /// Nested options, only meaningful for container types.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<Self>,
    /// Whether values are suggested through autocomplete.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub autocomplete: bool,
    /// Channel types accepted by channel options.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub channel_types: Vec<u8>,
}

impl CommandOption {
    /// Creates an optional option without choices or nesting.
    #[must_use]
    pub fn new(kind: OptionType, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            description: description.into(),
            required: false,
            choices: Vec::new(),
            options: Vec::new(),
            autocomplete: false,
            channel_types: Vec::new(),
        }
    }

    /// Creates a subcommand wrapper around leaf options.
    #[must_use]
    pub fn subcommand(
        name: impl Into<String>,
        description: impl Into<String>,
        options: Vec<Self>,
    ) -> Self {
        Self::new(OptionType::SubCommand, name, description).with_options(options)
    }

    /// Creates a subcommand group wrapper around subcommands.
    #[must_use]
    pub fn subcommand_group(
        name: impl Into<String>,
        description: impl Into<String>,
        subcommands: Vec<Self>,
    ) -> Self {
        Self::new(OptionType::SubCommandGroup, name, description).with_options(subcommands)
    }

    /// Sets whether the option is required.
    #[must_use]
    pub const fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Adds a fixed choice.
    #[must_use]
    pub fn with_choice(mut self, choice: OptionChoice) -> Self {
        self.choices.push(choice);
        self
    }

    /// Enables or disables autocomplete.
    #[must_use]
    pub const fn with_autocomplete(mut self, autocomplete: bool) -> Self {
        self.autocomplete = autocomplete;
        self
    }

    /// Replaces the nested options.
    #[must_use]
    pub fn with_options(mut self, options: Vec<Self>) -> Self {
        self.options = options;
        self
    }

    /// Restricts the accepted channel types.
    #[must_use]
    pub fn with_channel_types(mut self, channel_types: impl IntoIterator<Item = u8>) -> Self {
        self.channel_types = channel_types.into_iter().collect();
        self
    }

    /// Validates the option shape recursively.
    ///
    /// # Errors
    ///
    /// Returns [`DefinitionError`] when a group carries choices, has no
    /// subcommands, or nests anything but subcommands; when a subcommand
    /// nests another container; when a leaf option nests options; or when
    /// choices and autocomplete are combined.
    pub fn validate(&self) -> Result<(), DefinitionError> {
        if !self.choices.is_empty() && self.autocomplete {
            return Err(DefinitionError::ChoicesWithAutocomplete {
                option: self.name.clone(),
            });
        }

        match self.kind {
            OptionType::SubCommandGroup => {
                if !self.choices.is_empty() {
                    return Err(self.invalid("subcommand groups cannot have choices"));
                }
                if self.options.is_empty() {
                    return Err(self.invalid("subcommand groups must contain subcommands"));
                }
                if self
                    .options
                    .iter()
                    .any(|nested| nested.kind != OptionType::SubCommand)
                {
                    return Err(self.invalid("subcommand groups may only contain subcommands"));
                }
            }
            OptionType::SubCommand
                if self.options.iter().any(|nested| nested.kind.is_container()) =>
            {
                return Err(self.invalid("subcommands cannot nest subcommands or groups"));
            }
            kind if !kind.is_container() && !self.options.is_empty() => {
                return Err(self.invalid("only subcommands and groups can nest options"));
            }
            _ => {}
        }

        self.options.iter().try_for_each(Self::validate)
    }

    fn invalid(&self, reason: &str) -> DefinitionError {
        DefinitionError::InvalidOption {
            option: self.name.clone(),
            reason: reason.to_owned(),
        }
    }
}
