//! Reconstruction of whole command definitions from the registry.
//!
//! Each registered subcommand carries a partial definition whose only option
//! is its wrapper. Exporting merges those partial trees back under one
//! parent per `(scope, name)` pair and partitions the result by scope.

use indexmap::IndexMap;
use std::collections::BTreeMap;

use crate::interaction::domain::{
    CommandDefinition, CommandOption, CommandScope, DestinationId, OptionType, RegisteredCommand,
};

use super::CommandRegistry;

/// Definitions ready for bulk upload, partitioned by scope.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportedCommands {
    /// Definitions available in every destination.
    pub global: Vec<CommandDefinition>,
    /// Definitions bound to a single destination.
    pub scoped: BTreeMap<DestinationId, Vec<CommandDefinition>>,
}

impl ExportedCommands {
    /// Returns `true` when nothing would be uploaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.global.is_empty() && self.scoped.is_empty()
    }

    /// Finds an exported definition by scope and name.
    #[must_use]
    pub fn find(&self, scope: CommandScope, name: &str) -> Option<&CommandDefinition> {
        let definitions = match scope {
            CommandScope::Global => self.global.as_slice(),
            CommandScope::Destination(destination) => self.scoped.get(&destination)?.as_slice(),
        };
        definitions.iter().find(|definition| definition.name == name)
    }
}

/// Walks the registry and rebuilds upload-ready definitions.
///
/// Bare commands come first, then merged subcommand parents, in the order
/// each parent name was first encountered. Subcommand wrappers precede group
/// wrappers inside a parent. Scope is taken from each leaf, so subcommands of
/// one name registered in different scopes export as separate parents.
#[must_use]
pub fn export(registry: &CommandRegistry) -> ExportedCommands {
    let mut parents: IndexMap<(CommandScope, String), CommandDefinition> = IndexMap::new();

    for command in registry.bare_commands() {
        parents.insert(
            (command.scope(), command.name().to_owned()),
            command.definition().clone(),
        );
    }

    for command in registry.subcommands() {
        parent_for(&mut parents, command)
            .options
            .extend(command.definition().options.iter().cloned());
    }

    for command in registry.grouped_subcommands() {
        let parent = parent_for(&mut parents, command);
        for wrapper in &command.definition().options {
            merge_group(&mut parent.options, wrapper);
        }
    }

    let mut exported = ExportedCommands::default();
    for ((scope, _), definition) in parents {
        match scope {
            CommandScope::Global => exported.global.push(definition),
            CommandScope::Destination(destination) => exported
                .scoped
                .entry(destination)
                .or_default()
                .push(definition),
        }
    }
    tracing::debug!(
        global = exported.global.len(),
        destinations = exported.scoped.len(),
        "exported command definitions"
    );
    exported
}

/// Returns the shared parent for `command`, seeding it from the first leaf
/// encountered with an empty option list.
fn parent_for<'a>(
    parents: &'a mut IndexMap<(CommandScope, String), CommandDefinition>,
    command: &RegisteredCommand,
) -> &'a mut CommandDefinition {
    parents
        .entry((command.scope(), command.name().to_owned()))
        .or_insert_with(|| command.definition().clone().with_options(Vec::new()))
}

fn merge_group(options: &mut Vec<CommandOption>, wrapper: &CommandOption) {
    if let Some(group) = options.iter_mut().find(|option| {
        option.kind == OptionType::SubCommandGroup && option.name == wrapper.name
    }) {
        group.options.extend(wrapper.options.iter().cloned());
        return;
    }
    options.push(wrapper.clone());
}
