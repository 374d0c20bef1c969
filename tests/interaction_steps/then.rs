//! Then steps for interaction behaviour scenarios.

use rstest_bdd_macros::then;
use switchboard::interaction::domain::{
    DestinationId, DispatchError, InteractionResponse, OptionType, RegistryError,
};

use super::world::InteractionWorld;

#[then(r#"the inline response says "{text}""#)]
fn inline_response_says(world: &InteractionWorld, text: String) -> Result<(), eyre::Report> {
    let expected = InteractionResponse::message(text);
    if world.response.as_ref() != Some(&expected) {
        return Err(eyre::eyre!(
            "expected {expected:?}, got {:?}",
            world.response
        ));
    }
    Ok(())
}

#[then("no inline response is returned")]
fn no_inline_response(world: &InteractionWorld) -> Result<(), eyre::Report> {
    if let Some(response) = &world.response {
        return Err(eyre::eyre!("expected no response, got {response:?}"));
    }
    Ok(())
}

#[then(r#"the error listener recorded a check failure for "{name}""#)]
fn listener_recorded_check_failure(
    world: &InteractionWorld,
    name: String,
) -> Result<(), eyre::Report> {
    let errors = world.listener.errors();
    let recorded = errors.iter().any(|(_, error)| {
        matches!(error, DispatchError::CheckFailed { target } if *target == name)
    });
    if !recorded || errors.len() != 1 {
        return Err(eyre::eyre!(
            "expected one check failure for '{name}', got {errors:?}"
        ));
    }
    Ok(())
}

#[then("the error listener recorded nothing")]
fn listener_recorded_nothing(world: &InteractionWorld) -> Result<(), eyre::Report> {
    let errors = world.listener.errors();
    if !errors.is_empty() {
        return Err(eyre::eyre!("expected no errors, got {errors:?}"));
    }
    Ok(())
}

#[then(r#"registration fails because "{name}" already exists"#)]
fn registration_fails(world: &InteractionWorld, name: String) -> Result<(), eyre::Report> {
    let result = world
        .registration
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing registration result in scenario world"))?;
    match result {
        Err(RegistryError::AlreadyExists(key)) if key.to_string() == name => Ok(()),
        other => Err(eyre::eyre!(
            "expected '{name}' to already exist, got {other:?}"
        )),
    }
}

#[then("the global upload contains {count:usize} commands")]
fn global_upload_contains(world: &InteractionWorld, count: usize) -> Result<(), eyre::Report> {
    let uploaded = world.directory.definitions(None);
    if uploaded.len() != count {
        return Err(eyre::eyre!(
            "expected {count} global commands, found {}",
            uploaded.len()
        ));
    }
    Ok(())
}

#[then(r#"the uploaded command "{name}" lists subcommands "{subcommands}""#)]
fn uploaded_command_lists_subcommands(
    world: &InteractionWorld,
    name: String,
    subcommands: String,
) -> Result<(), eyre::Report> {
    let uploaded = world.directory.definitions(None);
    let definition = uploaded
        .iter()
        .find(|definition| definition.name == name)
        .ok_or_else(|| eyre::eyre!("command '{name}' was not uploaded"))?;
    let listed: Vec<&str> = definition
        .options
        .iter()
        .filter(|option| option.kind == OptionType::SubCommand)
        .map(|option| option.name.as_str())
        .collect();
    let expected: Vec<&str> = subcommands.split(',').map(str::trim).collect();
    if listed != expected {
        return Err(eyre::eyre!("expected subcommands {expected:?}, got {listed:?}"));
    }
    Ok(())
}

#[then("destination {destination:u64} received {count:usize} commands")]
fn destination_received(
    world: &InteractionWorld,
    destination: u64,
    count: usize,
) -> Result<(), eyre::Report> {
    let uploaded = world
        .directory
        .definitions(Some(DestinationId::new(destination)));
    if uploaded.len() != count {
        return Err(eyre::eyre!(
            "expected {count} commands for destination {destination}, found {}",
            uploaded.len()
        ));
    }
    Ok(())
}
