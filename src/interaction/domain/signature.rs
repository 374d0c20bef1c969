//! Handler parameter declarations and argument validation.

use std::collections::{BTreeMap, BTreeSet};

use super::{Arguments, CommandOption, DefinitionError, DispatchError, OptionType};

/// Native value kinds a handler parameter can declare.
///
/// Used to infer the wire option type of a parameter through a fixed
/// mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterKind {
    /// Text.
    String,
    /// Integer.
    Integer,
    /// Boolean.
    Boolean,
    /// Floating-point number.
    Number,
    /// User entity.
    User,
    /// Destination member entity; maps to the user option type.
    Member,
    /// Channel entity.
    Channel,
    /// Role entity.
    Role,
    /// User or role entity.
    Mentionable,
}

impl ParameterKind {
    /// Returns the wire option type for this kind.
    #[must_use]
    pub const fn option_type(self) -> OptionType {
        match self {
            Self::String => OptionType::String,
            Self::Integer => OptionType::Integer,
            Self::Boolean => OptionType::Boolean,
            Self::Number => OptionType::Number,
            Self::User | Self::Member => OptionType::User,
            Self::Channel => OptionType::Channel,
            Self::Role => OptionType::Role,
            Self::Mentionable => OptionType::Mentionable,
        }
    }
}

/// A parameter declared by a handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterSpec {
    /// Parameter name as seen by the handler.
    pub name: String,
    /// Whether the handler requires the parameter.
    pub required: bool,
    /// Declared kind, used only for option inference.
    pub kind: Option<ParameterKind>,
}

impl ParameterSpec {
    /// Declares a required parameter.
    #[must_use]
    pub fn required(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required: true,
            kind: None,
        }
    }

    /// Declares an optional parameter.
    #[must_use]
    pub fn optional(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required: false,
            kind: None,
        }
    }

    /// Attaches a kind for option inference.
    #[must_use]
    pub const fn with_kind(mut self, kind: ParameterKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Infers the command option describing this parameter.
    ///
    /// # Errors
    ///
    /// Returns [`DefinitionError::UninferableParameter`] when no kind was
    /// declared.
    pub fn to_option(&self, description: impl Into<String>) -> Result<CommandOption, DefinitionError> {
        let kind = self
            .kind
            .ok_or_else(|| DefinitionError::UninferableParameter {
                parameter: self.name.clone(),
            })?;
        Ok(
            CommandOption::new(kind.option_type(), self.name.clone(), description)
                .with_required(self.required),
        )
    }
}

/// Renaming table from wire option names to handler parameter names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Connector(BTreeMap<String, String>);

impl Connector {
    /// Creates an empty connector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps the wire option `from` to the handler parameter `to`.
    pub fn insert(&mut self, from: impl Into<String>, to: impl Into<String>) {
        self.0.insert(from.into(), to.into());
    }

    /// Returns the handler parameter name for a wire option name.
    #[must_use]
    pub fn rename<'a>(&'a self, option: &'a str) -> &'a str {
        self.0.get(option).map_or(option, String::as_str)
    }

    /// Returns `true` when no mappings are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Connector
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(from, to)| (from.into(), to.into()))
                .collect(),
        )
    }
}

/// Parameter set a handler accepts, computed once at build time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HandlerSignature {
    parameters: Vec<ParameterSpec>,
    required: BTreeSet<String>,
    accepted: BTreeSet<String>,
}

impl HandlerSignature {
    /// Creates a signature from explicit parameter declarations.
    #[must_use]
    pub fn new(parameters: Vec<ParameterSpec>) -> Self {
        let required = parameters
            .iter()
            .filter(|parameter| parameter.required)
            .map(|parameter| parameter.name.clone())
            .collect();
        let accepted = parameters
            .iter()
            .map(|parameter| parameter.name.clone())
            .collect();
        Self {
            parameters,
            required,
            accepted,
        }
    }

    /// Derives a signature from leaf options, renamed through `connector`.
    #[must_use]
    pub fn from_options(options: &[CommandOption], connector: &Connector) -> Self {
        Self::new(
            options
                .iter()
                .map(|option| ParameterSpec {
                    name: connector.rename(&option.name).to_owned(),
                    required: option.required,
                    kind: None,
                })
                .collect(),
        )
    }

    /// Returns the declared parameters in declaration order.
    #[must_use]
    pub fn parameters(&self) -> &[ParameterSpec] {
        &self.parameters
    }

    /// Returns the names of required parameters.
    #[must_use]
    pub const fn required(&self) -> &BTreeSet<String> {
        &self.required
    }

    /// Returns the names of every accepted parameter.
    #[must_use]
    pub const fn accepted(&self) -> &BTreeSet<String> {
        &self.accepted
    }

    /// Checks supplied arguments against the signature.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::InvalidOptionParameter`] when a required
    /// parameter is missing or an undeclared argument is supplied.
    pub fn validate(&self, target: &str, arguments: &Arguments) -> Result<(), DispatchError> {
        let missing: Vec<String> = self
            .required
            .iter()
            .filter(|name| !arguments.contains(name))
            .cloned()
            .collect();
        let unexpected: Vec<String> = arguments
            .names()
            .filter(|name| !self.accepted.contains(*name))
            .map(str::to_owned)
            .collect();

        if missing.is_empty() && unexpected.is_empty() {
            return Ok(());
        }
        Err(DispatchError::InvalidOptionParameter {
            target: target.to_owned(),
            missing,
            unexpected,
        })
    }
}
