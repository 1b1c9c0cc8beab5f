//! Configuration types for bandit agents.

use serde::{Deserialize, Serialize};

use crate::error::{BanditError, Result};
use crate::stable_hash::agent_seed;
use crate::{EpsilonGreedyConfig, StrategyKind, ThompsonConfig};

/// Configuration for one bandit agent.
///
/// This struct can be deserialized from TOML, JSON, or environment variables
/// using figment (see [`AgentConfigBuilder`](crate::AgentConfigBuilder)).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Agent identifier, used in logs and for default seeding (default: 0)
    #[serde(default)]
    pub agent_id: u32,

    /// Number of candidate actions (default: 1)
    #[serde(default = "default_num_actions")]
    pub num_actions: usize,

    /// Action-selection strategy (default: epsilon_greedy)
    #[serde(default)]
    pub strategy: StrategyKind,

    /// Reward every arm reports before its first observation (default: 0)
    #[serde(default)]
    pub initial_reward: f64,

    #[serde(default)]
    pub epsilon_greedy: EpsilonGreedyConfig,

    #[serde(default)]
    pub thompson: ThompsonConfig,

    /// RNG seed. If None, a seed is derived from `agent_id`.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_num_actions() -> usize {
    1
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            agent_id: 0,
            num_actions: default_num_actions(),
            strategy: StrategyKind::default(),
            initial_reward: 0.0,
            epsilon_greedy: EpsilonGreedyConfig::default(),
            thompson: ThompsonConfig::default(),
            seed: None,
        }
    }
}

impl AgentConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for `num_actions` actions under `strategy`.
    pub fn for_strategy(num_actions: usize, strategy: StrategyKind) -> Self {
        Self {
            num_actions,
            strategy,
            ..Self::default()
        }
    }

    /// Get the effective RNG seed.
    ///
    /// Returns the configured seed or one derived from `agent_id`.
    pub fn effective_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| agent_seed(0, self.agent_id))
    }

    /// Check every value the agent depends on.
    pub fn validate(&self) -> Result<()> {
        self.validate_arms()?;
        match self.strategy {
            StrategyKind::EpsilonGreedy => self.epsilon_greedy.validate(),
            StrategyKind::ThompsonSampling => self.thompson.validate(),
        }
    }

    /// Check only the strategy-independent fields (action count, initial reward).
    pub fn validate_arms(&self) -> Result<()> {
        if self.num_actions == 0 {
            return Err(BanditError::NoActions);
        }
        if !self.initial_reward.is_finite() {
            return Err(BanditError::InvalidParameter {
                name: "initial_reward",
                reason: format!("must be finite, got {}", self.initial_reward),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EpsilonDecay, Posterior};

    #[test]
    fn test_default_config() {
        let config = AgentConfig::default();
        assert_eq!(config.agent_id, 0);
        assert_eq!(config.num_actions, 1);
        assert_eq!(config.strategy, StrategyKind::EpsilonGreedy);
        assert_eq!(config.initial_reward, 0.0);
        assert_eq!(config.epsilon_greedy.initial_epsilon, 1.0);
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_effective_seed() {
        let mut config = AgentConfig::default();
        config.agent_id = 4;
        assert_eq!(config.effective_seed(), agent_seed(0, 4));

        config.seed = Some(17);
        assert_eq!(config.effective_seed(), 17);
    }

    #[test]
    fn test_validate_rejects_zero_actions() {
        let config = AgentConfig::for_strategy(0, StrategyKind::ThompsonSampling);
        assert!(matches!(config.validate(), Err(BanditError::NoActions)));
    }

    #[test]
    fn test_validate_arms_ignores_strategy_sections() {
        let mut config = AgentConfig::for_strategy(2, StrategyKind::EpsilonGreedy);
        config.epsilon_greedy.initial_epsilon = 7.0;
        assert!(config.validate_arms().is_ok());
        assert!(config.validate().is_err());

        config.initial_reward = f64::NAN;
        assert!(matches!(
            config.validate_arms(),
            Err(BanditError::InvalidParameter { name: "initial_reward", .. })
        ));
    }

    #[test]
    fn test_validate_checks_only_active_strategy() {
        let mut config = AgentConfig::for_strategy(3, StrategyKind::ThompsonSampling);
        config.epsilon_greedy.initial_epsilon = 7.0;
        assert!(config.validate().is_ok());

        config.strategy = StrategyKind::EpsilonGreedy;
        assert!(matches!(
            config.validate(),
            Err(BanditError::InvalidParameter { name: "initial_epsilon", .. })
        ));
    }

    #[test]
    fn test_deserialize_config() {
        let toml = r#"
            agent_id = 2
            num_actions = 6
            strategy = "thompson_sampling"
            initial_reward = 0.5
            seed = 99

            [epsilon_greedy]
            initial_epsilon = 0.3
            decay = "constant"

            [thompson]
            posterior = "beta"
        "#;

        let config: AgentConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.agent_id, 2);
        assert_eq!(config.num_actions, 6);
        assert_eq!(config.strategy, StrategyKind::ThompsonSampling);
        assert_eq!(config.initial_reward, 0.5);
        assert_eq!(config.seed, Some(99));
        assert_eq!(config.epsilon_greedy.initial_epsilon, 0.3);
        assert_eq!(config.epsilon_greedy.decay, EpsilonDecay::Constant);
        assert_eq!(config.thompson.posterior, Posterior::Beta);
        assert_eq!(config.thompson.prior_std, 1.0);
    }

    #[test]
    fn test_deserialize_unknown_strategy_fails() {
        let toml = r#"strategy = "softmax""#;
        assert!(toml::from_str::<AgentConfig>(toml).is_err());
    }
}
