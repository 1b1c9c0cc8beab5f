//! Decision envelope for strategy outputs.
//!
//! Every selection produces a [`Decision`] that records the chosen action
//! together with typed notes explaining why it was chosen. Engines that only
//! need the index call [`BanditAgent::select_next_action`](crate::BanditAgent::select_next_action);
//! the full envelope is there for logging and offline replay.

use serde::Serialize;

/// Audit notes attached to a decision.
///
/// Prefer adding new variants over changing existing semantics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DecisionNote {
    /// Epsilon-greedy explored: the action was drawn uniformly at random.
    ExploreUniform { epsilon: f64 },

    /// Epsilon-greedy exploited the best average reward.
    ExploitBestAverage { epsilon: f64, average_reward: f64 },

    /// Per-arm posterior samples were drawn and the maximum won.
    SampledPosteriorMax { sample: f64 },

    /// Several actions shared the maximum score; the lowest index was kept.
    TieBrokenLowestIndex { tied: usize },

    /// Every score was NaN, so the first action was returned.
    NoFiniteScoreFallback,

    /// The strategy returned `returned`, outside `[0, num_actions)`; the
    /// agent substituted the last action.
    ActionOutOfRange { returned: usize, num_actions: usize },
}

/// One strategy decision.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Decision {
    /// Name of the strategy that produced this decision.
    pub strategy: &'static str,
    /// Selected action index, always in `[0, num_actions)`.
    pub action: usize,
    /// Agent iteration at which the decision was taken (before the increment).
    pub iteration: u64,
    /// Notes describing why this action was chosen.
    pub notes: Vec<DecisionNote>,
}

impl Decision {
    /// Whether the decision came from uniform exploration.
    pub fn explored(&self) -> bool {
        self.notes
            .iter()
            .any(|n| matches!(n, DecisionNote::ExploreUniform { .. }))
    }

    /// Whether the agent had to replace an out-of-range action.
    pub fn action_was_out_of_range(&self) -> bool {
        self.notes
            .iter()
            .any(|n| matches!(n, DecisionNote::ActionOutOfRange { .. }))
    }
}
