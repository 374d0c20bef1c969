//! Client configuration.

use std::time::Duration;

use super::domain::DestinationId;

/// Configuration for an [`InteractionClient`](super::services::InteractionClient).
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use switchboard::interaction::config::ClientConfig;
///
/// let config = ClientConfig::default();
/// assert!(config.respond_via_endpoint);
///
/// let webhook = ClientConfig::webhook().with_initial_response_timeout(Duration::from_secs(1));
/// assert!(!webhook.respond_via_endpoint);
/// assert_eq!(webhook.initial_response_timeout, Duration::from_secs(1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Whether initial responses go through the responder port. When
    /// `false`, `on_event` returns the initial response inline.
    pub respond_via_endpoint: bool,
    /// How long `on_event` waits for an inline response.
    pub initial_response_timeout: Duration,
    /// Destination every registered command is pinned to.
    pub destination_override: Option<DestinationId>,
    /// Buffer size of the channel feeding `wait_interaction` waiters.
    pub wait_channel_capacity: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            respond_via_endpoint: true,
            initial_response_timeout: Duration::from_secs(3),
            destination_override: None,
            wait_channel_capacity: 64,
        }
    }
}

impl ClientConfig {
    /// Configuration for events received over an HTTP webhook, answered
    /// inline.
    #[must_use]
    pub fn webhook() -> Self {
        Self {
            respond_via_endpoint: false,
            ..Self::default()
        }
    }

    /// Configuration for events received over a persistent connection,
    /// answered through the responder port.
    #[must_use]
    pub fn gateway() -> Self {
        Self::default()
    }

    /// Sets the inline response timeout.
    #[must_use]
    pub const fn with_initial_response_timeout(mut self, timeout: Duration) -> Self {
        self.initial_response_timeout = timeout;
        self
    }

    /// Pins every registered command to `destination`.
    ///
    /// Intended for test deployments where global commands would take too
    /// long to propagate.
    #[must_use]
    pub const fn with_destination_override(mut self, destination: DestinationId) -> Self {
        self.destination_override = Some(destination);
        self
    }

    /// Sets the waiter channel capacity. Zero is raised to one.
    #[must_use]
    pub fn with_wait_channel_capacity(mut self, capacity: usize) -> Self {
        self.wait_channel_capacity = capacity.max(1);
        self
    }
}
