//! Identifier newtypes for entities referenced by interactions.
//!
//! The event source encodes identifiers as decimal strings, although some
//! producers emit plain integers. Both forms are accepted on input and the
//! string form is always produced on output.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when an identifier cannot be parsed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid snowflake identifier: '{0}'")]
pub struct ParseSnowflakeError(pub String);

/// Numeric identifier used by the event source for every addressable entity.
///
/// # Examples
///
/// ```
/// use switchboard::interaction::domain::Snowflake;
///
/// let id: Snowflake = "80351110224678912".parse().expect("valid id");
/// assert_eq!(id.get(), 80_351_110_224_678_912);
/// assert_eq!(id.to_string(), "80351110224678912");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "SnowflakeRepr", into = "String")]
pub struct Snowflake(u64);

#[derive(Deserialize)]
#[serde(untagged)]
enum SnowflakeRepr {
    Number(u64),
    Text(String),
}

impl Snowflake {
    /// Creates an identifier from its numeric value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl FromStr for Snowflake {
    type Err = ParseSnowflakeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        value
            .trim()
            .parse::<u64>()
            .map(Self)
            .map_err(|_| ParseSnowflakeError(value.to_owned()))
    }
}

impl TryFrom<SnowflakeRepr> for Snowflake {
    type Error = ParseSnowflakeError;

    fn try_from(repr: SnowflakeRepr) -> Result<Self, Self::Error> {
        match repr {
            SnowflakeRepr::Number(value) => Ok(Self(value)),
            SnowflakeRepr::Text(text) => text.parse(),
        }
    }
}

impl From<Snowflake> for String {
    fn from(id: Snowflake) -> Self {
        id.0.to_string()
    }
}

impl From<u64> for Snowflake {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for Snowflake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a deployment destination that commands can be scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DestinationId(Snowflake);

impl DestinationId {
    /// Creates a destination identifier from its numeric value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(Snowflake::new(value))
    }

    /// Returns the underlying snowflake.
    #[must_use]
    pub const fn snowflake(self) -> Snowflake {
        self.0
    }
}

impl From<Snowflake> for DestinationId {
    fn from(id: Snowflake) -> Self {
        Self(id)
    }
}

impl fmt::Display for DestinationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
