//! Given steps for interaction behaviour scenarios.

use eyre::WrapErr;
use rstest_bdd_macros::given;
use switchboard::interaction::{
    config::ClientConfig,
    domain::{Check, CommandBuilder, DestinationId, HandlerError, InteractionContext},
};

use super::world::{InteractionWorld, replying};

#[given("a webhook client")]
fn a_webhook_client(world: &mut InteractionWorld) {
    world.reconfigure(ClientConfig::webhook());
}

#[given("a client pinned to destination {destination:u64}")]
fn a_pinned_client(world: &mut InteractionWorld, destination: u64) {
    world.reconfigure(ClientConfig::webhook().with_destination_override(DestinationId::new(destination)));
}

#[given(r#"a command "{name}" that replies "{text}""#)]
fn a_replying_command(
    world: &mut InteractionWorld,
    name: String,
    text: String,
) -> Result<(), eyre::Report> {
    let command = replying(&name, None, text).wrap_err("build replying command")?;
    world
        .client
        .add_command(command)
        .wrap_err("register replying command")
}

#[given(r#"a subcommand "{subcommand}" of "{name}" that replies "{text}""#)]
fn a_replying_subcommand(
    world: &mut InteractionWorld,
    subcommand: String,
    name: String,
    text: String,
) -> Result<(), eyre::Report> {
    let command = replying(&name, Some(&subcommand), text).wrap_err("build replying subcommand")?;
    world
        .client
        .add_command(command)
        .wrap_err("register replying subcommand")
}

#[given(r#"a command "{name}" guarded by a rejecting check"#)]
fn a_guarded_command(world: &mut InteractionWorld, name: String) -> Result<(), eyre::Report> {
    let command = CommandBuilder::slash(name.as_str(), "Guarded command")
        .check(Check::new(|_| false))
        .build(|context: InteractionContext, _arguments| async move {
            context.respond("should not run").await?;
            Ok::<_, HandlerError>(())
        })
        .wrap_err("build guarded command")?;
    world
        .client
        .add_command(command)
        .wrap_err("register guarded command")
}
