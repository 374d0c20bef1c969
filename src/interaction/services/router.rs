//! Resolution of inbound interactions to registered handlers.
//!
//! Routing is a pure function of the registry contents and the event
//! payload; nothing here mutates state.

use crate::interaction::domain::{
    AutocompleteCallback, AutocompleteKey, ComponentCallback, Interaction, InteractionDataOption,
    InteractionKind, OptionType, RegisteredCommand,
};

use super::CommandRegistry;

/// Handler an interaction resolved to, with the options delivered to it.
#[derive(Debug, Clone, Copy)]
pub enum DispatchTarget<'a> {
    /// An application command at any hierarchy level.
    Command {
        /// Resolved command.
        command: &'a RegisteredCommand,
        /// Options at the level the command was found.
        options: &'a [InteractionDataOption],
    },
    /// A component or modal callback.
    Component(&'a ComponentCallback),
    /// An autocomplete callback.
    Autocomplete {
        /// Resolved callback.
        callback: &'a AutocompleteCallback,
        /// Options at the level of the focused option.
        options: &'a [InteractionDataOption],
    },
}

impl DispatchTarget<'_> {
    /// Returns the name the target is reported under in diagnostics.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Command { command, .. } => command.qualified_name(),
            Self::Component(callback) => callback.custom_id().to_owned(),
            Self::Autocomplete { callback, .. } => callback.key().composite(),
        }
    }
}

/// Subcommand path extracted from a command's option list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CommandPath<'a> {
    /// Group name, when the single top-level option is a group.
    pub group: Option<&'a str>,
    /// Subcommand name, when the single option at the current level is a
    /// subcommand.
    pub subcommand: Option<&'a str>,
    /// Options below the extracted wrappers.
    pub options: &'a [InteractionDataOption],
}

/// Splits the wrapper options off a command's option list.
///
/// Group detection runs first on the top level; subcommand detection then
/// runs on whatever list remains. Each step requires exactly one option of
/// the wrapper type.
#[must_use]
pub fn command_path(options: &[InteractionDataOption]) -> CommandPath<'_> {
    let (group, below_group) = unwrap_single(options, OptionType::SubCommandGroup);
    let (subcommand, leaves) = unwrap_single(below_group, OptionType::SubCommand);
    CommandPath {
        group,
        subcommand,
        options: leaves,
    }
}

fn unwrap_single(
    options: &[InteractionDataOption],
    kind: OptionType,
) -> (Option<&str>, &[InteractionDataOption]) {
    match options {
        [single] if single.kind == kind => (Some(single.name.as_str()), single.options.as_slice()),
        _ => (None, options),
    }
}

/// Resolves an interaction to its handler.
///
/// Pings and unroutable events yield `None`.
#[must_use]
pub fn resolve<'a>(
    registry: &'a CommandRegistry,
    interaction: &'a Interaction,
) -> Option<DispatchTarget<'a>> {
    match interaction.kind {
        InteractionKind::ApplicationCommand => resolve_command(registry, interaction),
        InteractionKind::MessageComponent | InteractionKind::ModalSubmit => {
            let custom_id = interaction.data.custom_id.as_deref()?;
            resolve_callback(registry, custom_id).map(DispatchTarget::Component)
        }
        InteractionKind::ApplicationCommandAutocomplete => {
            resolve_autocomplete(registry, interaction)
        }
        InteractionKind::Ping => None,
    }
}

/// Resolves an application command, searching groups, then subcommands,
/// then bare commands.
///
/// A group without a subcommand does not resolve.
#[must_use]
pub fn resolve_command<'a>(
    registry: &'a CommandRegistry,
    interaction: &'a Interaction,
) -> Option<DispatchTarget<'a>> {
    let name = interaction.data.name.as_str();
    let path = command_path(&interaction.data.options);
    let command = match (path.group, path.subcommand) {
        (Some(group), Some(subcommand)) => registry.grouped(name, group, subcommand),
        (Some(_), None) => None,
        (None, Some(subcommand)) => registry.subcommand(name, subcommand),
        (None, None) => registry.command(name),
    }?;
    Some(DispatchTarget::Command {
        command,
        options: path.options,
    })
}

/// Resolves a component custom-id, exactly first, then by prefix.
///
/// When several registered custom-ids are prefixes of `custom_id`, the one
/// registered first wins.
#[must_use]
pub fn resolve_callback<'a>(
    registry: &'a CommandRegistry,
    custom_id: &str,
) -> Option<&'a ComponentCallback> {
    registry.callback(custom_id).or_else(|| {
        registry
            .callbacks()
            .find(|callback| custom_id.starts_with(callback.custom_id()))
    })
}

/// Resolves an autocomplete request through the focused option's composite
/// key. There is no prefix fallback.
#[must_use]
pub fn resolve_autocomplete<'a>(
    registry: &'a CommandRegistry,
    interaction: &'a Interaction,
) -> Option<DispatchTarget<'a>> {
    let path = command_path(&interaction.data.options);
    let focused = path.options.iter().find(|option| option.focused)?;

    let mut key = AutocompleteKey::new(interaction.data.name.as_str(), focused.name.as_str());
    if let Some(group) = path.group {
        key = key.in_group(group);
    }
    if let Some(subcommand) = path.subcommand {
        key = key.in_subcommand(subcommand);
    }

    let callback = registry.autocomplete(&key.composite())?;
    Some(DispatchTarget::Autocomplete {
        callback,
        options: path.options,
    })
}
