//! Unit tests for resolving interactions to handlers.

use rstest::{fixture, rstest};

use super::fixtures::{
    autocomplete_event, bare, command_event, component_event, focused_option, group_option,
    grouped, noop, ping_event, sub, subcommand_option, value_option,
};
use crate::interaction::{
    domain::{
        AutocompleteCallback, AutocompleteKey, ComponentCallback, Interaction, InteractionData,
        InteractionKind, OptionType,
    },
    services::{
        CommandRegistry, DispatchTarget,
        router::{CommandPath, command_path, resolve, resolve_callback},
    },
};

#[fixture]
fn registry() -> CommandRegistry {
    let mut registry = CommandRegistry::new();
    registry.add_command(bare("ping")).expect("ping");
    registry.add_command(sub("tag", "add")).expect("tag add");
    registry
        .add_command(grouped("config", "set", "key"))
        .expect("config set key");
    registry
        .add_callback(ComponentCallback::new("vote:", noop))
        .expect("vote prefix");
    registry
        .add_callback(ComponentCallback::new("vote:yes", noop))
        .expect("vote yes");
    registry
        .add_callback(ComponentCallback::new("page", noop))
        .expect("page");
    registry
        .add_autocomplete(AutocompleteCallback::new(
            AutocompleteKey::new("tag", "name").in_subcommand("add"),
            noop,
        ))
        .expect("tag add name");
    registry
}

fn resolved_label(registry: &CommandRegistry, interaction: &Interaction) -> Option<String> {
    resolve(registry, interaction).map(|target| target.label())
}

#[rstest]
fn bare_command_resolves_with_top_level_options(registry: CommandRegistry) {
    let event = command_event(
        "ping",
        vec![value_option("verbose", OptionType::Boolean, true)],
    );

    let target = resolve(&registry, &event).expect("ping should resolve");

    assert!(matches!(
        target,
        DispatchTarget::Command { command, options }
            if command.name() == "ping" && options.len() == 1
    ));
}

#[rstest]
fn subcommand_resolves_with_its_own_options(registry: CommandRegistry) {
    let event = command_event(
        "tag",
        vec![subcommand_option(
            "add",
            vec![value_option("name", OptionType::String, "rust")],
        )],
    );

    let target = resolve(&registry, &event).expect("tag add should resolve");

    match target {
        DispatchTarget::Command { command, options } => {
            assert_eq!(command.qualified_name(), "tag add");
            assert_eq!(options.first().map(|option| option.name.as_str()), Some("name"));
        }
        other => panic!("unexpected target: {other:?}"),
    }
}

#[rstest]
fn grouped_subcommand_resolves(registry: CommandRegistry) {
    let event = command_event(
        "config",
        vec![group_option(
            "set",
            vec![subcommand_option(
                "key",
                vec![value_option("value", OptionType::String, "on")],
            )],
        )],
    );

    assert_eq!(
        resolved_label(&registry, &event),
        Some("config set key".to_owned())
    );
}

#[rstest]
fn resolution_is_repeatable(registry: CommandRegistry) {
    let event = command_event("tag", vec![subcommand_option("add", Vec::new())]);

    let first = resolved_label(&registry, &event);
    let second = resolved_label(&registry, &event);

    assert_eq!(first, second);
    assert_eq!(first, Some("tag add".to_owned()));
}

#[rstest]
#[case::unknown_command(command_event("missing", Vec::new()))]
#[case::unknown_subcommand(command_event("tag", vec![subcommand_option("remove", Vec::new())]))]
#[case::group_without_subcommand(command_event("config", vec![group_option("set", Vec::new())]))]
#[case::subcommand_of_bare_name(command_event("ping", vec![subcommand_option("add", Vec::new())]))]
#[case::ping(ping_event())]
fn unroutable_events_resolve_to_nothing(
    registry: CommandRegistry,
    #[case] event: Interaction,
) {
    assert!(resolve(&registry, &event).is_none());
}

#[rstest]
fn multiple_top_level_options_are_not_a_subcommand_path() {
    let options = vec![
        subcommand_option("add", Vec::new()),
        subcommand_option("remove", Vec::new()),
    ];

    let path = command_path(&options);

    assert_eq!(path.group, None);
    assert_eq!(path.subcommand, None);
    assert_eq!(path.options.len(), 2);
}

#[rstest]
fn grouped_path_peels_both_wrappers() {
    let leaf = vec![value_option("value", OptionType::String, "on")];
    let options = vec![group_option("set", vec![subcommand_option("key", leaf.clone())])];

    assert_eq!(
        command_path(&options),
        CommandPath {
            group: Some("set"),
            subcommand: Some("key"),
            options: &leaf,
        }
    );
}

#[rstest]
fn exact_custom_id_wins_over_prefix(registry: CommandRegistry) {
    let callback = resolve_callback(&registry, "vote:yes").expect("callback");

    assert_eq!(callback.custom_id(), "vote:yes");
}

#[rstest]
fn prefix_match_uses_first_registered_prefix(registry: CommandRegistry) {
    assert_eq!(
        resolved_label(&registry, &component_event("vote:no")),
        Some("vote:".to_owned())
    );
    assert_eq!(
        resolved_label(&registry, &component_event("page-3")),
        Some("page".to_owned())
    );
    assert_eq!(resolved_label(&registry, &component_event("other")), None);
}

#[rstest]
fn modal_submit_routes_through_component_table(registry: CommandRegistry) {
    let event = super::fixtures::interaction(
        InteractionKind::ModalSubmit,
        InteractionData {
            custom_id: Some("page:form".to_owned()),
            ..InteractionData::default()
        },
    );

    assert_eq!(resolved_label(&registry, &event), Some("page".to_owned()));
}

#[rstest]
fn autocomplete_resolves_through_focused_option(registry: CommandRegistry) {
    let event = autocomplete_event(
        "tag",
        vec![subcommand_option("add", vec![focused_option("name", "ru")])],
    );

    assert_eq!(
        resolved_label(&registry, &event),
        Some("tag::add:name".to_owned())
    );
}

#[rstest]
fn autocomplete_has_no_prefix_fallback(registry: CommandRegistry) {
    let event = autocomplete_event(
        "tag",
        vec![subcommand_option("add", vec![focused_option("name_extra", "ru")])],
    );

    assert!(resolve(&registry, &event).is_none());
}

#[rstest]
fn autocomplete_without_focused_option_is_dropped(registry: CommandRegistry) {
    let event = autocomplete_event(
        "tag",
        vec![subcommand_option(
            "add",
            vec![value_option("name", OptionType::String, "ru")],
        )],
    );

    assert!(resolve(&registry, &event).is_none());
}
