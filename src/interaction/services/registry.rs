//! Hierarchical store of registered commands and callbacks.
//!
//! Commands live at one of three levels: bare, subcommand, or subcommand
//! inside a group. A name registered as a bare command cannot also carry
//! subcommands or groups, while subcommands and groups may share a parent.
//! Every map preserves insertion order, which the exporter relies on.

use indexmap::IndexMap;
use indexmap::map::Entry;

use crate::interaction::domain::{
    AutocompleteCallback, AutocompleteKey, CommandLevel, CommandScope, ComponentCallback,
    DestinationId, RegisteredCommand, RegistryError, RegistryKey,
};

use super::exporter::{self, ExportedCommands};

type SubcommandMap = IndexMap<String, RegisteredCommand>;
type GroupMap = IndexMap<String, SubcommandMap>;

/// Owns every registered command and callback.
///
/// Registration is expected to happen during startup; the registry itself
/// performs no synchronisation.
#[derive(Debug, Default, Clone)]
pub struct CommandRegistry {
    commands: IndexMap<String, RegisteredCommand>,
    subcommands: IndexMap<String, SubcommandMap>,
    groups: IndexMap<String, GroupMap>,
    callbacks: IndexMap<String, ComponentCallback>,
    autocompletes: IndexMap<String, AutocompleteCallback>,
    destination_override: Option<DestinationId>,
}

impl CommandRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry that pins every added command to `destination`.
    #[must_use]
    pub fn with_destination_override(destination: DestinationId) -> Self {
        Self {
            destination_override: Some(destination),
            ..Self::default()
        }
    }

    /// Returns the registry-wide destination override, if any.
    #[must_use]
    pub const fn destination_override(&self) -> Option<DestinationId> {
        self.destination_override
    }

    /// Registers a command at the level its labels describe.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::AlreadyExists`] when the slot is taken or the
    /// command name is already used with an incompatible hierarchy shape.
    pub fn add_command(&mut self, mut command: RegisteredCommand) -> Result<(), RegistryError> {
        if let Some(destination) = self.destination_override {
            command.set_scope(CommandScope::Destination(destination));
        }
        if self.occupied(&command) {
            return Err(RegistryError::AlreadyExists(command.registry_key()));
        }

        let name = command.name().to_owned();
        let qualified = command.qualified_name();
        match command.level().clone() {
            CommandLevel::Bare => {
                self.commands.insert(name, command);
            }
            CommandLevel::Subcommand(subcommand) => {
                self.subcommands
                    .entry(name)
                    .or_default()
                    .insert(subcommand, command);
            }
            CommandLevel::Grouped { group, subcommand } => {
                self.groups
                    .entry(name)
                    .or_default()
                    .entry(group)
                    .or_default()
                    .insert(subcommand, command);
            }
        }
        tracing::debug!(command = %qualified, "registered command");
        Ok(())
    }

    fn occupied(&self, command: &RegisteredCommand) -> bool {
        let name = command.name();
        match command.level() {
            CommandLevel::Bare => {
                self.commands.contains_key(name)
                    || self.subcommands.contains_key(name)
                    || self.groups.contains_key(name)
            }
            CommandLevel::Subcommand(subcommand) => {
                self.commands.contains_key(name)
                    || self.subcommand(name, subcommand).is_some()
                    || self
                        .groups
                        .get(name)
                        .is_some_and(|groups| groups.contains_key(subcommand))
            }
            CommandLevel::Grouped { group, subcommand } => {
                self.commands.contains_key(name)
                    || self.grouped(name, group, subcommand).is_some()
                    || self
                        .subcommands
                        .get(name)
                        .is_some_and(|subcommands| subcommands.contains_key(group))
            }
        }
    }

    /// Unregisters the command occupying the same slot as `command`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotExists`] when the slot is empty.
    pub fn remove_command(
        &mut self,
        command: &RegisteredCommand,
    ) -> Result<RegisteredCommand, RegistryError> {
        self.remove_command_at(command.name(), command.subcommand_group(), command.subcommand())
    }

    /// Unregisters the command at an explicit path.
    ///
    /// Parents left without children are dropped, so the name becomes free
    /// for any hierarchy shape again.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotExists`] when the slot is empty, including
    /// a group path without a subcommand.
    pub fn remove_command_at(
        &mut self,
        name: &str,
        group: Option<&str>,
        subcommand: Option<&str>,
    ) -> Result<RegisteredCommand, RegistryError> {
        let removed = match (group, subcommand) {
            (None, None) => self.commands.shift_remove(name),
            (None, Some(child)) => remove_nested(&mut self.subcommands, name, child),
            (Some(group_name), Some(child)) => match self.groups.entry(name.to_owned()) {
                Entry::Occupied(mut groups) => {
                    let removed = remove_nested(groups.get_mut(), group_name, child);
                    if groups.get().is_empty() {
                        groups.shift_remove();
                    }
                    removed
                }
                Entry::Vacant(_) => None,
            },
            (Some(_), None) => None,
        };

        removed.ok_or_else(|| {
            RegistryError::NotExists(RegistryKey::Command {
                command: name.to_owned(),
                group: group.map(str::to_owned),
                subcommand: subcommand.map(str::to_owned),
            })
        })
    }

    /// Registers a component callback under its exact custom-id.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::AlreadyExists`] for a duplicate custom-id.
    pub fn add_callback(&mut self, callback: ComponentCallback) -> Result<(), RegistryError> {
        match self.callbacks.entry(callback.custom_id().to_owned()) {
            Entry::Occupied(entry) => Err(RegistryError::AlreadyExists(RegistryKey::Component(
                entry.key().clone(),
            ))),
            Entry::Vacant(entry) => {
                entry.insert(callback);
                Ok(())
            }
        }
    }

    /// Unregisters the component callback for `custom_id`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotExists`] when nothing is registered.
    pub fn remove_callback(&mut self, custom_id: &str) -> Result<ComponentCallback, RegistryError> {
        self.callbacks
            .shift_remove(custom_id)
            .ok_or_else(|| RegistryError::NotExists(RegistryKey::Component(custom_id.to_owned())))
    }

    /// Registers an autocomplete callback under its composite key.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::AlreadyExists`] for a duplicate key.
    pub fn add_autocomplete(&mut self, callback: AutocompleteCallback) -> Result<(), RegistryError> {
        match self.autocompletes.entry(callback.key().composite()) {
            Entry::Occupied(entry) => Err(RegistryError::AlreadyExists(
                RegistryKey::Autocomplete(entry.key().clone()),
            )),
            Entry::Vacant(entry) => {
                entry.insert(callback);
                Ok(())
            }
        }
    }

    /// Unregisters the autocomplete callback for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotExists`] when nothing is registered.
    pub fn remove_autocomplete(
        &mut self,
        key: &AutocompleteKey,
    ) -> Result<AutocompleteCallback, RegistryError> {
        let composite = key.composite();
        self.autocompletes
            .shift_remove(&composite)
            .ok_or(RegistryError::NotExists(RegistryKey::Autocomplete(composite)))
    }

    /// Looks up a bare command.
    #[must_use]
    pub fn command(&self, name: &str) -> Option<&RegisteredCommand> {
        self.commands.get(name)
    }

    /// Looks up a subcommand directly under `name`.
    #[must_use]
    pub fn subcommand(&self, name: &str, subcommand: &str) -> Option<&RegisteredCommand> {
        self.subcommands.get(name)?.get(subcommand)
    }

    /// Looks up a subcommand inside a group.
    #[must_use]
    pub fn grouped(&self, name: &str, group: &str, subcommand: &str) -> Option<&RegisteredCommand> {
        self.groups.get(name)?.get(group)?.get(subcommand)
    }

    /// Looks up a component callback by exact custom-id.
    #[must_use]
    pub fn callback(&self, custom_id: &str) -> Option<&ComponentCallback> {
        self.callbacks.get(custom_id)
    }

    /// Iterates over component callbacks in registration order.
    pub fn callbacks(&self) -> impl Iterator<Item = &ComponentCallback> {
        self.callbacks.values()
    }

    /// Looks up an autocomplete callback by composite key.
    #[must_use]
    pub fn autocomplete(&self, composite: &str) -> Option<&AutocompleteCallback> {
        self.autocompletes.get(composite)
    }

    /// Iterates over bare commands in registration order.
    pub fn bare_commands(&self) -> impl Iterator<Item = &RegisteredCommand> {
        self.commands.values()
    }

    /// Iterates over subcommands, grouped by parent in first-registration
    /// order.
    pub fn subcommands(&self) -> impl Iterator<Item = &RegisteredCommand> {
        self.subcommands.values().flat_map(IndexMap::values)
    }

    /// Iterates over grouped subcommands, ordered by parent, then group.
    pub fn grouped_subcommands(&self) -> impl Iterator<Item = &RegisteredCommand> {
        self.groups
            .values()
            .flat_map(IndexMap::values)
            .flat_map(IndexMap::values)
    }

    /// Returns the number of registered commands at every level.
    #[must_use]
    pub fn command_count(&self) -> usize {
        self.bare_commands().count() + self.subcommands().count() + self.grouped_subcommands().count()
    }

    /// Rebuilds the upload-ready definition lists.
    #[must_use]
    pub fn export(&self) -> ExportedCommands {
        exporter::export(self)
    }
}

fn remove_nested(
    parents: &mut IndexMap<String, SubcommandMap>,
    parent: &str,
    child: &str,
) -> Option<RegisteredCommand> {
    let children = parents.get_mut(parent)?;
    let removed = children.shift_remove(child);
    if children.is_empty() {
        parents.shift_remove(parent);
    }
    removed
}
