//! Shared world state for interaction behaviour scenarios.

use std::sync::Arc;

use rstest::fixture;
use switchboard::interaction::{
    adapters::memory::{CollectingErrorListener, InMemoryCommandDirectory},
    config::ClientConfig,
    domain::{
        CommandBuilder, DefinitionError, HandlerError, Interaction, InteractionContext,
        InteractionData, InteractionDataOption, InteractionKind, InteractionResponse, OptionType,
        RegisteredCommand, RegistryError, Snowflake,
    },
    services::InteractionClient,
};

/// Scenario world for interaction behaviour tests.
pub struct InteractionWorld {
    /// The client under test.
    pub client: InteractionClient,
    /// Listener wired into the client.
    pub listener: CollectingErrorListener,
    /// Directory that receives uploads.
    pub directory: InMemoryCommandDirectory,
    /// Inline response returned for the last received event.
    pub response: Option<InteractionResponse>,
    /// Result of the last registration attempt made in a `when` step.
    pub registration: Option<Result<(), RegistryError>>,
    next_id: u64,
}

impl InteractionWorld {
    /// Creates a world around a webhook client.
    #[must_use]
    pub fn new() -> Self {
        let listener = CollectingErrorListener::new();
        Self {
            client: client_for(ClientConfig::webhook(), &listener),
            listener,
            directory: InMemoryCommandDirectory::new(),
            response: None,
            registration: None,
            next_id: 1,
        }
    }

    /// Replaces the client, keeping the listener attached.
    pub fn reconfigure(&mut self, config: ClientConfig) {
        self.client = client_for(config, &self.listener);
    }

    /// Builds an application command event with the next interaction id.
    pub fn command_event(&mut self, name: &str, options: Vec<InteractionDataOption>) -> Interaction {
        self.next_id += 1;
        Interaction {
            id: Snowflake::new(self.next_id),
            application_id: None,
            kind: InteractionKind::ApplicationCommand,
            data: InteractionData {
                name: name.to_owned(),
                options,
                ..InteractionData::default()
            },
            guild_id: None,
            channel_id: None,
            member: None,
            user: None,
            token: "scenario".to_owned(),
        }
    }
}

impl Default for InteractionWorld {
    fn default() -> Self {
        Self::new()
    }
}

fn client_for(config: ClientConfig, listener: &CollectingErrorListener) -> InteractionClient {
    InteractionClient::new(config).with_error_listener(Arc::new(listener.clone()))
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> InteractionWorld {
    InteractionWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

/// Builds a command that answers with `text`, optionally as a subcommand.
///
/// # Errors
///
/// Returns the builder's [`DefinitionError`] when the shape is invalid.
pub fn replying(
    name: &str,
    subcommand: Option<&str>,
    text: String,
) -> Result<RegisteredCommand, DefinitionError> {
    let mut builder = CommandBuilder::slash(name, format!("{name} command"));
    if let Some(child) = subcommand {
        builder = builder.subcommand(child, format!("{child} subcommand"));
    }
    builder.build(move |context: InteractionContext, _arguments| {
        let reply = text.clone();
        async move {
            context.respond(reply).await?;
            Ok::<_, HandlerError>(())
        }
    })
}

/// Wraps leaf options in a subcommand option.
#[must_use]
pub fn subcommand_option(name: &str) -> InteractionDataOption {
    InteractionDataOption {
        name: name.to_owned(),
        kind: OptionType::SubCommand,
        value: None,
        options: Vec::new(),
        focused: false,
    }
}
