//! Builder for layered agent configuration.
//!
//! The builder supports multiple configuration sources using figment:
//! - Default values
//! - Config files (TOML, JSON)
//! - Inline TOML strings
//! - Environment variables
//! - Programmatic overrides

use std::path::Path;

use figment::providers::{Env, Format, Json, Serialized, Toml};
use figment::Figment;

use crate::config::AgentConfig;
use crate::error::Result;
use crate::{BanditAgent, StrategyKind};

/// Builder for an [`AgentConfig`] (and, from it, a [`BanditAgent`]).
///
/// Configuration sources are merged in the following order (later sources
/// override earlier), regardless of the order the builder methods are called:
/// 1. Default values
/// 2. Config files and strings (in order added)
/// 3. Environment variables
/// 4. Programmatic overrides (in order called)
///
/// # Examples
///
/// ```rust
/// use srmab::{AgentConfigBuilder, StrategyKind};
///
/// let agent = AgentConfigBuilder::new()
///     .toml_str("num_actions = 4")
///     .strategy(StrategyKind::ThompsonSampling)
///     .seed(7)
///     .build_agent()
///     .unwrap();
/// assert_eq!(agent.num_actions(), 4);
/// ```
#[derive(Debug)]
pub struct AgentConfigBuilder {
    /// Defaults plus files and strings.
    sources: Figment,
    env_prefix: Option<String>,
    overrides: Figment,
}

impl Default for AgentConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AgentConfigBuilder {
    /// Create a new builder with default configuration.
    pub fn new() -> Self {
        Self {
            sources: Figment::from(Serialized::defaults(AgentConfig::default())),
            env_prefix: None,
            overrides: Figment::new(),
        }
    }

    /// Add a configuration file.
    ///
    /// TOML and JSON are detected by extension; anything else is read as TOML.
    /// Files are merged in the order they are added.
    pub fn file<P: AsRef<Path>>(mut self, path: P) -> Self {
        let path = path.as_ref();
        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        self.sources = match extension.to_lowercase().as_str() {
            "json" => self.sources.merge(Json::file(path)),
            _ => self.sources.merge(Toml::file(path)),
        };
        self
    }

    /// Merge an inline TOML document.
    pub fn toml_str(mut self, toml: &str) -> Self {
        self.sources = self.sources.merge(Toml::string(toml));
        self
    }

    /// Add environment variables with a prefix.
    ///
    /// Variables are read as `{PREFIX}_{KEY}`, with `__` separating nested
    /// keys, e.g. `SRMAB_NUM_ACTIONS`, `SRMAB_EPSILON_GREEDY__INITIAL_EPSILON`.
    /// A second call replaces the prefix.
    pub fn env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_string());
        self
    }

    fn set<V: serde::Serialize>(mut self, key: &str, value: V) -> Self {
        self.overrides = self.overrides.merge(Serialized::default(key, value));
        self
    }

    pub fn agent_id(self, id: u32) -> Self {
        self.set("agent_id", id)
    }

    pub fn num_actions(self, n: usize) -> Self {
        self.set("num_actions", n)
    }

    pub fn strategy(self, strategy: StrategyKind) -> Self {
        self.set("strategy", strategy)
    }

    pub fn initial_reward(self, reward: f64) -> Self {
        self.set("initial_reward", reward)
    }

    pub fn initial_epsilon(self, epsilon: f64) -> Self {
        self.set("epsilon_greedy.initial_epsilon", epsilon)
    }

    /// Fix the RNG seed (otherwise derived from the agent id).
    pub fn seed(self, seed: u64) -> Self {
        self.set("seed", seed)
    }

    /// Extract and validate the merged configuration.
    pub fn build(self) -> Result<AgentConfig> {
        let mut figment = self.sources;
        if let Some(prefix) = &self.env_prefix {
            figment = figment.merge(Env::prefixed(&format!("{prefix}_")).split("__"));
        }
        let config: AgentConfig = figment.merge(self.overrides).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the configuration and construct an agent from it.
    pub fn build_agent(self) -> Result<BanditAgent> {
        BanditAgent::new(self.build()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BanditError;

    #[test]
    fn test_builder_defaults() {
        let config = AgentConfigBuilder::new().build().unwrap();
        assert_eq!(config, AgentConfig::default());
    }

    #[test]
    fn test_overrides_win_over_strings() {
        let config = AgentConfigBuilder::new()
            .toml_str("num_actions = 3\nstrategy = \"thompson_sampling\"")
            .num_actions(8)
            .build()
            .unwrap();
        assert_eq!(config.num_actions, 8);
        assert_eq!(config.strategy, StrategyKind::ThompsonSampling);
    }

    #[test]
    fn test_nested_override() {
        let config = AgentConfigBuilder::new()
            .num_actions(2)
            .initial_epsilon(0.25)
            .build()
            .unwrap();
        assert_eq!(config.epsilon_greedy.initial_epsilon, 0.25);
    }

    #[test]
    fn test_unknown_strategy_is_config_error() {
        let err = AgentConfigBuilder::new()
            .toml_str("strategy = \"round_robin\"")
            .build()
            .unwrap_err();
        assert!(matches!(err, BanditError::Config(_)), "{err}");
    }

    #[test]
    fn test_json_file_then_override() {
        let path = std::env::temp_dir().join(format!("srmab-builder-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"agent_id": 3, "num_actions": 5, "thompson": {"prior_std": 0.5}}"#).unwrap();
        let config = AgentConfigBuilder::new()
            .file(&path)
            .agent_id(9)
            .build()
            .unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(config.agent_id, 9);
        assert_eq!(config.num_actions, 5);
        assert_eq!(config.thompson.prior_std, 0.5);
    }

    #[test]
    fn test_env_overrides_strings() {
        std::env::set_var("SRMAB_BUILDER_TEST_NUM_ACTIONS", "7");
        std::env::set_var("SRMAB_BUILDER_TEST_EPSILON_GREEDY__INITIAL_EPSILON", "0.5");
        let config = AgentConfigBuilder::new()
            .toml_str("num_actions = 2")
            .env_prefix("SRMAB_BUILDER_TEST")
            .build()
            .unwrap();
        assert_eq!(config.num_actions, 7);
        assert_eq!(config.epsilon_greedy.initial_epsilon, 0.5);
    }

    #[test]
    fn test_overrides_win_over_env_whatever_the_call_order() {
        std::env::set_var("SRMAB_BUILDER_ORDER_NUM_ACTIONS", "3");
        std::env::set_var("SRMAB_BUILDER_ORDER_AGENT_ID", "11");
        let config = AgentConfigBuilder::new()
            .num_actions(8)
            .env_prefix("SRMAB_BUILDER_ORDER")
            .toml_str("num_actions = 2\nagent_id = 1")
            .build()
            .unwrap();
        assert_eq!(config.num_actions, 8);
        assert_eq!(config.agent_id, 11);
    }

    #[test]
    fn test_zero_actions_rejected() {
        let err = AgentConfigBuilder::new().num_actions(0).build().unwrap_err();
        assert!(matches!(err, BanditError::NoActions));
    }
}
