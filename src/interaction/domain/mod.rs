//! Domain model for interaction commands, callbacks, and events.
//!
//! Covers the upload-ready command definitions, the decoded inbound events,
//! the responses sent back, and the handler bindings the registry stores.
//! Infrastructure concerns stay behind the ports.

mod builder;
mod callback;
mod command;
mod context;
mod definition;
mod error;
mod event;
mod handler;
mod ids;
mod option;
mod response;
mod signature;

pub use builder::CommandBuilder;
pub use callback::{AutocompleteCallback, AutocompleteKey, ComponentCallback};
pub(crate) use command::CommandParts;
pub use command::{CommandLevel, RegisteredCommand};
pub use context::InteractionContext;
pub use definition::{CommandDefinition, CommandKind, CommandScope};
pub use error::{
    DefinitionError, DispatchError, HandlerError, RegistryError, RegistryKey, UnknownTypeCode,
};
pub use event::{Interaction, InteractionData, InteractionDataOption, InteractionKind, ResolvedData};
pub use handler::{
    Arguments, BoxFuture, Check, ErrorHook, Handler, HandlerResult, Owner, handler_fn,
};
pub use ids::{DestinationId, ParseSnowflakeError, Snowflake};
pub use option::{CommandOption, OptionChoice, OptionType};
pub use response::{InteractionResponse, ResponseKind};
pub use signature::{Connector, HandlerSignature, ParameterKind, ParameterSpec};
