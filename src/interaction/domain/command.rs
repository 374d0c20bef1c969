//! Registered commands and the hierarchy level they occupy.

use std::fmt;
use std::sync::Arc;

use super::{
    Check, CommandDefinition, CommandOption, CommandScope, Connector, ErrorHook, Handler,
    HandlerSignature, Owner, RegistryKey,
};

/// Position of a registered command in the command hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CommandLevel {
    /// A top-level command without subcommands.
    Bare,
    /// A subcommand directly under the command.
    Subcommand(String),
    /// A subcommand inside a subcommand group.
    Grouped {
        /// Group name.
        group: String,
        /// Subcommand name.
        subcommand: String,
    },
}

impl CommandLevel {
    /// Number of wrapper options between the definition and the leaf
    /// options.
    const fn depth(&self) -> usize {
        match self {
            Self::Bare => 0,
            Self::Subcommand(_) => 1,
            Self::Grouped { .. } => 2,
        }
    }
}

/// A command definition bound to its handler.
///
/// Built by [`CommandBuilder`](super::CommandBuilder). The definition stays
/// fixed once registered, apart from the scope the registry may pin.
#[derive(Clone)]
pub struct RegisteredCommand {
    definition: CommandDefinition,
    level: CommandLevel,
    handler: Arc<dyn Handler>,
    connector: Connector,
    signature: HandlerSignature,
    explicit_signature: bool,
    checks: Vec<Check>,
    owner: Option<Arc<dyn Owner>>,
    on_error: Option<ErrorHook>,
}

/// Parts of a registered command, assembled by the builder.
pub(crate) struct CommandParts {
    pub(crate) definition: CommandDefinition,
    pub(crate) level: CommandLevel,
    pub(crate) handler: Arc<dyn Handler>,
    pub(crate) connector: Connector,
    pub(crate) signature: Option<HandlerSignature>,
    pub(crate) checks: Vec<Check>,
    pub(crate) owner: Option<Arc<dyn Owner>>,
    pub(crate) on_error: Option<ErrorHook>,
}

impl RegisteredCommand {
    pub(crate) fn from_parts(parts: CommandParts) -> Self {
        let CommandParts {
            definition,
            level,
            handler,
            connector,
            signature,
            checks,
            owner,
            on_error,
        } = parts;
        let explicit_signature = signature.is_some();
        let mut command = Self {
            definition,
            level,
            handler,
            connector,
            signature: signature.unwrap_or_default(),
            explicit_signature,
            checks,
            owner,
            on_error,
        };
        if !explicit_signature {
            command.signature =
                HandlerSignature::from_options(command.leaf_options(), &command.connector);
        }
        command
    }

    /// Returns the top-level command name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.definition.name
    }

    /// Returns the partial definition contributed by this command.
    #[must_use]
    pub const fn definition(&self) -> &CommandDefinition {
        &self.definition
    }

    /// Returns the hierarchy level.
    #[must_use]
    pub const fn level(&self) -> &CommandLevel {
        &self.level
    }

    /// Returns the subcommand name, if any.
    #[must_use]
    pub fn subcommand(&self) -> Option<&str> {
        match &self.level {
            CommandLevel::Bare => None,
            CommandLevel::Subcommand(subcommand) | CommandLevel::Grouped { subcommand, .. } => {
                Some(subcommand)
            }
        }
    }

    /// Returns the subcommand group name, if any.
    #[must_use]
    pub fn subcommand_group(&self) -> Option<&str> {
        match &self.level {
            CommandLevel::Grouped { group, .. } => Some(group),
            _ => None,
        }
    }

    /// Returns the deployment scope.
    #[must_use]
    pub const fn scope(&self) -> CommandScope {
        self.definition.scope
    }

    /// Pins the command to `scope`.
    pub const fn set_scope(&mut self, scope: CommandScope) {
        self.definition.scope = scope;
    }

    /// Returns the options the handler receives, below any wrappers.
    #[must_use]
    pub fn leaf_options(&self) -> &[CommandOption] {
        let mut options = self.definition.options.as_slice();
        for _ in 0..self.level.depth() {
            options = options
                .first()
                .map_or(&[][..], |wrapper| wrapper.options.as_slice());
        }
        options
    }

    /// Appends a leaf option, as decorators do while a command is being
    /// assembled.
    ///
    /// A derived signature is recomputed; an explicit one is left alone.
    pub fn add_option(&mut self, option: CommandOption) {
        let mut options = &mut self.definition.options;
        for _ in 0..self.level.depth() {
            let Some(wrapper) = options.first_mut() else {
                return;
            };
            options = &mut wrapper.options;
        }
        options.push(option);
        if !self.explicit_signature {
            self.signature = HandlerSignature::from_options(self.leaf_options(), &self.connector);
        }
    }

    /// Appends a guard predicate.
    pub fn add_check(&mut self, check: Check) {
        self.checks.push(check);
    }

    /// Returns the handler.
    #[must_use]
    pub fn handler(&self) -> Arc<dyn Handler> {
        Arc::clone(&self.handler)
    }

    /// Returns the option renaming table.
    #[must_use]
    pub const fn connector(&self) -> &Connector {
        &self.connector
    }

    /// Returns the cached handler signature.
    #[must_use]
    pub const fn signature(&self) -> &HandlerSignature {
        &self.signature
    }

    /// Returns the guard predicates in registration order.
    #[must_use]
    pub fn checks(&self) -> &[Check] {
        &self.checks
    }

    /// Returns the owner, if any.
    #[must_use]
    pub fn owner(&self) -> Option<&Arc<dyn Owner>> {
        self.owner.as_ref()
    }

    /// Returns the handler-level recovery hook, if any.
    #[must_use]
    pub fn error_hook(&self) -> Option<&ErrorHook> {
        self.on_error.as_ref()
    }

    /// Returns the registry slot this command occupies.
    #[must_use]
    pub fn registry_key(&self) -> RegistryKey {
        RegistryKey::Command {
            command: self.name().to_owned(),
            group: self.subcommand_group().map(str::to_owned),
            subcommand: self.subcommand().map(str::to_owned),
        }
    }

    /// Returns the full invocation path, e.g. `config set key`.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        self.registry_key().to_string()
    }
}

impl fmt::Debug for RegisteredCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisteredCommand")
            .field("definition", &self.definition)
            .field("level", &self.level)
            .field("connector", &self.connector)
            .field("signature", &self.signature)
            .field("checks", &self.checks.len())
            .field("owner", &self.owner.as_ref().map(|owner| owner.name()))
            .finish_non_exhaustive()
    }
}
