//! Assembly of registered commands from declarative parts.

use std::future::Future;
use std::sync::Arc;

use super::{
    Arguments, Check, CommandDefinition, CommandKind, CommandLevel, CommandOption, CommandParts,
    CommandScope, Connector, DefinitionError, DestinationId, DispatchError, ErrorHook, Handler,
    HandlerResult, HandlerSignature, InteractionContext, Owner, ParameterSpec, RegisteredCommand,
    handler_fn,
};

/// Builds a [`RegisteredCommand`] and validates its definition.
///
/// # Examples
///
/// ```
/// use switchboard::interaction::domain::{CommandBuilder, CommandOption, OptionType};
///
/// let command = CommandBuilder::slash("config", "Manage configuration")
///     .subcommand_group("set", "Set a value")
///     .subcommand("key", "Set one key")
///     .option(CommandOption::new(OptionType::String, "value", "New value").with_required(true))
///     .build(|_context, _arguments| async { Ok(()) })
///     .expect("valid command");
///
/// assert_eq!(command.subcommand_group(), Some("set"));
/// assert_eq!(command.subcommand(), Some("key"));
/// assert_eq!(command.leaf_options().len(), 1);
/// ```
#[derive(Clone)]
pub struct CommandBuilder {
    name: String,
    description: String,
    kind: CommandKind,
    context_menu: bool,
    subcommand: Option<(String, String)>,
    group: Option<(String, String)>,
    options: Vec<CommandOption>,
    default_permission: bool,
    scope: CommandScope,
    connector: Connector,
    parameters: Option<Vec<ParameterSpec>>,
    checks: Vec<Check>,
    owner: Option<Arc<dyn Owner>>,
    on_error: Option<ErrorHook>,
}

impl CommandBuilder {
    fn with_kind(name: impl Into<String>, description: impl Into<String>, kind: CommandKind) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            kind,
            context_menu: false,
            subcommand: None,
            group: None,
            options: Vec::new(),
            default_permission: true,
            scope: CommandScope::Global,
            connector: Connector::new(),
            parameters: None,
            checks: Vec::new(),
            owner: None,
            on_error: None,
        }
    }

    /// Starts a chat-input command.
    #[must_use]
    pub fn slash(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::with_kind(name, description, CommandKind::ChatInput)
    }

    /// Starts a command of any kind.
    #[must_use]
    pub fn command(
        name: impl Into<String>,
        description: impl Into<String>,
        kind: CommandKind,
    ) -> Self {
        Self::with_kind(name, description, kind)
    }

    /// Starts a context-menu command.
    ///
    /// `kind` must be [`CommandKind::User`] or [`CommandKind::Message`];
    /// anything else fails at build time.
    #[must_use]
    pub fn context_menu(name: impl Into<String>, kind: CommandKind) -> Self {
        let mut builder = Self::with_kind(name, "", kind);
        builder.context_menu = true;
        builder
    }

    /// Places the handler at subcommand `name`.
    #[must_use]
    pub fn subcommand(mut self, name: impl Into<String>, description: impl Into<String>) -> Self {
        self.subcommand = Some((name.into(), description.into()));
        self
    }

    /// Places the subcommand inside group `name`.
    #[must_use]
    pub fn subcommand_group(
        mut self,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        self.group = Some((name.into(), description.into()));
        self
    }

    /// Adds a leaf option.
    #[must_use]
    pub fn option(mut self, option: CommandOption) -> Self {
        self.options.push(option);
        self
    }

    /// Sets whether the command is enabled by default.
    #[must_use]
    pub const fn default_permission(mut self, default_permission: bool) -> Self {
        self.default_permission = default_permission;
        self
    }

    /// Binds the command to a single destination.
    #[must_use]
    pub const fn destination(mut self, destination: DestinationId) -> Self {
        self.scope = CommandScope::Destination(destination);
        self
    }

    /// Delivers wire option `option` to the handler as `parameter`.
    #[must_use]
    pub fn connect(mut self, option: impl Into<String>, parameter: impl Into<String>) -> Self {
        self.connector.insert(option, parameter);
        self
    }

    /// Declares a handler parameter explicitly.
    ///
    /// Once any parameter is declared, the signature is no longer derived
    /// from the leaf options.
    #[must_use]
    pub fn parameter(mut self, parameter: ParameterSpec) -> Self {
        self.parameters.get_or_insert_with(Vec::new).push(parameter);
        self
    }

    /// Adds a guard predicate.
    #[must_use]
    pub fn check(mut self, check: Check) -> Self {
        self.checks.push(check);
        self
    }

    /// Attaches a stateful owner.
    #[must_use]
    pub fn owner(mut self, owner: Arc<dyn Owner>) -> Self {
        self.owner = Some(owner);
        self
    }

    /// Attaches a handler-level recovery hook.
    #[must_use]
    pub fn on_error<F>(mut self, hook: F) -> Self
    where
        F: Fn(&InteractionContext, &DispatchError) -> bool + Send + Sync + 'static,
    {
        self.on_error = Some(Arc::new(hook));
        self
    }

    /// Finishes the command with an async closure as handler.
    ///
    /// # Errors
    ///
    /// Returns [`DefinitionError`] when the declared hierarchy or options are
    /// invalid.
    pub fn build<F, Fut>(self, handler: F) -> Result<RegisteredCommand, DefinitionError>
    where
        F: Fn(InteractionContext, Arguments) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.build_with(handler_fn(handler))
    }

    /// Finishes the command with a shared handler.
    ///
    /// # Errors
    ///
    /// Returns [`DefinitionError`] when the declared hierarchy or options are
    /// invalid.
    pub fn build_with(self, handler: Arc<dyn Handler>) -> Result<RegisteredCommand, DefinitionError> {
        let Self {
            name,
            description,
            kind,
            context_menu,
            subcommand,
            group,
            options,
            default_permission,
            scope,
            connector,
            parameters,
            checks,
            owner,
            on_error,
        } = self;

        if context_menu && kind == CommandKind::ChatInput {
            return Err(DefinitionError::ChatInputContextMenu { command: name });
        }
        if kind == CommandKind::ChatInput && description.trim().is_empty() {
            return Err(DefinitionError::MissingDescription { command: name });
        }

        let (level, wrapped) = wrap_options(&name, kind, subcommand, group, options)?;
        let definition = CommandDefinition::new(name, kind, description)
            .with_options(wrapped)
            .with_default_permission(default_permission)
            .with_scope(scope);
        definition.validate()?;

        Ok(RegisteredCommand::from_parts(CommandParts {
            definition,
            level,
            handler,
            connector,
            signature: parameters.map(HandlerSignature::new),
            checks,
            owner,
            on_error,
        }))
    }
}

fn wrap_options(
    command: &str,
    kind: CommandKind,
    subcommand_spec: Option<(String, String)>,
    group_spec: Option<(String, String)>,
    options: Vec<CommandOption>,
) -> Result<(CommandLevel, Vec<CommandOption>), DefinitionError> {
    if (subcommand_spec.is_some() || group_spec.is_some()) && kind != CommandKind::ChatInput {
        return Err(DefinitionError::SubcommandRequiresChatInput {
            command: command.to_owned(),
        });
    }

    match (group_spec, subcommand_spec) {
        (None, None) => Ok((CommandLevel::Bare, options)),
        (Some((group, _)), None) => Err(DefinitionError::GroupWithoutSubcommand {
            command: command.to_owned(),
            group,
        }),
        (enclosing_group, Some((subcommand, subcommand_description))) => {
            if subcommand_description.trim().is_empty() {
                return Err(DefinitionError::MissingSubcommandDescription {
                    command: command.to_owned(),
                    subcommand,
                });
            }
            let wrapper =
                CommandOption::subcommand(subcommand.clone(), subcommand_description, options);

            let Some((group, group_description)) = enclosing_group else {
                return Ok((CommandLevel::Subcommand(subcommand), vec![wrapper]));
            };
            if group_description.trim().is_empty() {
                return Err(DefinitionError::MissingGroupDescription {
                    command: command.to_owned(),
                    group,
                });
            }
            let group_wrapper =
                CommandOption::subcommand_group(group.clone(), group_description, vec![wrapper]);
            Ok((
                CommandLevel::Grouped { group, subcommand },
                vec![group_wrapper],
            ))
        }
    }
}
