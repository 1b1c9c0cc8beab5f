//! Error types for srmab.

use thiserror::Error;

/// Errors returned by agent construction, configuration and observation.
///
/// None of these are retryable: every operation in this crate is
/// deterministic given its inputs, so the caller decides whether to abort the
/// run or drop the offending agent.
#[derive(Debug, Error)]
pub enum BanditError {
    /// Reward attributed to an action outside `[0, num_actions)`.
    #[error("action index {index} is out of range for {num_actions} actions")]
    InvalidAction { index: i64, num_actions: usize },

    /// Strategy tag that names no known action-selection strategy.
    #[error("unknown action-selection strategy `{0}` (expected `epsilon_greedy` or `thompson_sampling`)")]
    UnknownStrategy(String),

    /// An agent needs at least one action to choose from.
    #[error("an agent needs at least one action")]
    NoActions,

    /// A numeric parameter is non-finite or outside its domain.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// Error extracting configuration from figment.
    #[error("configuration error: {0}")]
    Config(#[from] Box<figment::Error>),
}

impl From<figment::Error> for BanditError {
    fn from(e: figment::Error) -> Self {
        Self::Config(Box::new(e))
    }
}

/// Result type alias for srmab operations.
pub type Result<T> = std::result::Result<T, BanditError>;
