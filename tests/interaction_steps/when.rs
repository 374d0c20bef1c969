//! When steps for interaction behaviour scenarios.

use eyre::WrapErr;
use rstest_bdd_macros::when;

use super::world::{InteractionWorld, replying, run_async, subcommand_option};

#[when(r#"the command "{name}" is received"#)]
fn command_received(world: &mut InteractionWorld, name: String) {
    let event = world.command_event(&name, Vec::new());
    world.response = run_async(world.client.on_event(event));
}

#[when(r#"the subcommand "{subcommand}" of "{name}" is received"#)]
fn subcommand_received(world: &mut InteractionWorld, subcommand: String, name: String) {
    let event = world.command_event(&name, vec![subcommand_option(&subcommand)]);
    world.response = run_async(world.client.on_event(event));
}

#[when(r#"another command "{name}" is registered"#)]
fn another_command_registered(
    world: &mut InteractionWorld,
    name: String,
) -> Result<(), eyre::Report> {
    let command = replying(&name, None, "again".to_owned()).wrap_err("build duplicate command")?;
    world.registration = Some(world.client.add_command(command));
    Ok(())
}

#[when("the commands are uploaded")]
fn commands_uploaded(world: &mut InteractionWorld) -> Result<(), eyre::Report> {
    run_async(world.client.register_commands(&world.directory))
        .wrap_err("upload commands to the directory")?;
    Ok(())
}
