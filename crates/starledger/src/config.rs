//! Chain configuration.

use std::time::Duration;

/// Protocol tag carried in the last field of every challenge.
pub const DEFAULT_PROTOCOL_TAG: &str = "starRegistry";

/// Configuration for a [`Chain`](crate::Chain).
#[derive(Debug, Clone)]
pub struct ChainConfig {
    /// How long a challenge stays valid after it is issued.
    pub challenge_window: Duration,
    /// How far ahead of the local clock a challenge timestamp may be.
    pub max_clock_skew: Duration,
    /// Tag that closes every challenge message.
    pub protocol_tag: String,
    /// Whether `validate_chain` also checks positions and previous-hash links.
    pub verify_linkage: bool,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            challenge_window: Duration::from_secs(5 * 60),
            max_clock_skew: Duration::from_secs(30),
            protocol_tag: DEFAULT_PROTOCOL_TAG.to_string(),
            verify_linkage: true,
        }
    }
}
