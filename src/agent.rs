//! The bandit agent: arm statistics plus a selection strategy.
//!
//! One agent lives per access point. The simulation engine drives it with two
//! independent calls, in whatever order its event timeline dictates:
//!
//! - [`BanditAgent::observe`] attributes a reward to an action.
//! - [`BanditAgent::select_next_action`] asks for the next action to try.
//!
//! Each agent owns its state exclusively; agents never share anything, so an
//! engine may interleave calls across agents freely as long as each agent's
//! own calls stay sequential.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace, warn};

use crate::config::AgentConfig;
use crate::error::{BanditError, Result};
use crate::policy::{build_strategy, SelectionStrategy};
use crate::{Arm, ArmSnapshot, Decision, DecisionNote};

/// Multi-armed-bandit agent over a fixed action set.
///
/// # Example
///
/// ```rust
/// use srmab::{AgentConfig, BanditAgent, StrategyKind};
///
/// let mut agent = BanditAgent::new(AgentConfig::for_strategy(3, StrategyKind::EpsilonGreedy)).unwrap();
/// let action = agent.select_next_action();
/// agent.observe(action, 0.8).unwrap();
/// assert_eq!(agent.iteration(), 2);
/// assert_eq!(agent.arms()[action].times_selected(), 1);
/// ```
#[derive(Debug)]
pub struct BanditAgent {
    cfg: AgentConfig,
    arms: Box<[Arm]>,
    strategy: Box<dyn SelectionStrategy>,
    iteration: u64,
}

impl BanditAgent {
    /// Build an agent with the strategy named in `cfg`.
    ///
    /// Runs the same checks as [`AgentConfig::validate`], each once.
    pub fn new(cfg: AgentConfig) -> Result<Self> {
        cfg.validate_arms()?;
        // Validates the active strategy section.
        let strategy = build_strategy(&cfg, cfg.effective_seed())?;
        Ok(Self::from_parts(cfg, strategy))
    }

    /// Build an agent around a caller-supplied strategy.
    ///
    /// `cfg.strategy` and the strategy-specific sections are ignored, so only
    /// [`AgentConfig::validate_arms`] runs; the remaining fields (id, action
    /// count, initial reward) still apply.
    pub fn with_strategy(cfg: AgentConfig, strategy: Box<dyn SelectionStrategy>) -> Result<Self> {
        cfg.validate_arms()?;
        Ok(Self::from_parts(cfg, strategy))
    }

    fn from_parts(cfg: AgentConfig, strategy: Box<dyn SelectionStrategy>) -> Self {
        let arms = vec![Arm::new(cfg.initial_reward); cfg.num_actions].into_boxed_slice();
        info!(
            agent_id = cfg.agent_id,
            num_actions = cfg.num_actions,
            strategy = strategy.name(),
            "bandit agent initialized"
        );
        Self {
            cfg,
            arms,
            strategy,
            iteration: 1,
        }
    }

    /// Attribute `reward` to `action_ix`.
    ///
    /// An out-of-range index is an upstream logic error: it is reported,
    /// never ignored, and no arm is touched.
    pub fn observe(&mut self, action_ix: usize, reward: f64) -> Result<()> {
        let num_actions = self.arms.len();
        let Some(arm) = self.arms.get_mut(action_ix) else {
            return Err(BanditError::InvalidAction {
                index: i64::try_from(action_ix).unwrap_or(i64::MAX),
                num_actions,
            });
        };
        arm.observe(reward);
        debug!(
            agent_id = self.cfg.agent_id,
            action_ix,
            reward,
            times_selected = arm.times_selected(),
            average_reward = arm.average_reward(),
            "reward observed"
        );
        Ok(())
    }

    /// [`observe`](Self::observe) for engines that carry signed indices
    /// (where `-1` conventionally means "no action").
    pub fn observe_signed(&mut self, action_ix: i64, reward: f64) -> Result<()> {
        match usize::try_from(action_ix) {
            Ok(ix) => self.observe(ix, reward),
            Err(_) => Err(BanditError::InvalidAction {
                index: action_ix,
                num_actions: self.arms.len(),
            }),
        }
    }

    /// Choose the next action and return the full decision record.
    ///
    /// An out-of-range index from the strategy is replaced by the last
    /// action, logged at `warn` and recorded as
    /// [`DecisionNote::ActionOutOfRange`].
    pub fn decide(&mut self) -> Decision {
        let mut d = self.strategy.select(&self.arms, self.iteration);
        let num_actions = self.arms.len();
        if d.action >= num_actions {
            warn!(
                agent_id = self.cfg.agent_id,
                iteration = self.iteration,
                strategy = d.strategy,
                returned = d.action,
                num_actions,
                "strategy returned an out-of-range action; using the last action"
            );
            d.notes.push(DecisionNote::ActionOutOfRange {
                returned: d.action,
                num_actions,
            });
            d.action = num_actions - 1;
        }
        trace!(
            agent_id = self.cfg.agent_id,
            iteration = self.iteration,
            action = d.action,
            strategy = d.strategy,
            explored = d.explored(),
            "action selected"
        );
        self.iteration = self.iteration.saturating_add(1);
        d
    }

    /// Choose the next action index, always in `[0, num_actions)`.
    pub fn select_next_action(&mut self) -> usize {
        self.decide().action
    }

    /// Return every arm to the initial reward and the iteration counter to 1.
    pub fn reset(&mut self) {
        for arm in self.arms.iter_mut() {
            arm.reset();
        }
        self.strategy.reset();
        self.iteration = 1;
    }

    pub fn agent_id(&self) -> u32 {
        self.cfg.agent_id
    }

    pub fn num_actions(&self) -> usize {
        self.arms.len()
    }

    /// Iteration the next selection will run at (starts at 1).
    pub fn iteration(&self) -> u64 {
        self.iteration
    }

    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    /// Current exploration rate, when the strategy has one.
    pub fn epsilon(&self) -> Option<f64> {
        self.strategy.epsilon()
    }

    pub fn arms(&self) -> &[Arm] {
        &self.arms
    }

    pub fn config(&self) -> &AgentConfig {
        &self.cfg
    }

    /// Read-only copy of the agent's statistics for periodic reporting.
    pub fn snapshot(&self) -> AgentSnapshot {
        AgentSnapshot {
            agent_id: self.cfg.agent_id,
            strategy: self.strategy.name().to_string(),
            iteration: self.iteration,
            epsilon: self.strategy.epsilon(),
            arms: self.arms.iter().map(Arm::snapshot).collect(),
        }
    }

    /// Emit the per-arm statistics report as a `debug` event.
    pub fn log_statistics(&self, sim_time: f64) {
        let snap = self.snapshot();
        debug!(
            agent_id = snap.agent_id,
            sim_time,
            iteration = snap.iteration,
            rewards = %snap.rewards_line(),
            cumulative = %snap.cumulative_line(),
            times_selected = %snap.times_selected_line(),
            "arm statistics"
        );
    }
}

/// Point-in-time copy of an agent's state.
///
/// `Display` renders the three-line report engines print to consoles or
/// agent log files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentSnapshot {
    pub agent_id: u32,
    pub strategy: String,
    pub iteration: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub epsilon: Option<f64>,
    pub arms: Vec<ArmSnapshot>,
}

impl AgentSnapshot {
    fn join<T: fmt::Display>(values: impl Iterator<Item = T>) -> String {
        values.map(|v| v.to_string()).collect::<Vec<_>>().join("  ")
    }

    pub fn rewards_line(&self) -> String {
        Self::join(self.arms.iter().map(|a| format!("{:.6}", a.last_reward)))
    }

    pub fn cumulative_line(&self) -> String {
        Self::join(self.arms.iter().map(|a| format!("{:.6}", a.cumulative_reward)))
    }

    pub fn times_selected_line(&self) -> String {
        Self::join(self.arms.iter().map(|a| a.times_selected))
    }

    /// Total observations across all arms.
    pub fn total_observations(&self) -> u64 {
        self.arms.iter().map(|a| a.times_selected).sum()
    }
}

impl fmt::Display for AgentSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Reward per arm: {}", self.rewards_line())?;
        writeln!(f, "Cumulative reward per arm: {}", self.cumulative_line())?;
        write!(f, "Times each arm has been selected: {}", self.times_selected_line())
    }
}
