//! Epsilon-greedy action selection with inverse-square-root decay.
//!
//! At iteration `n` the exploration rate is `initial_epsilon / sqrt(n)`:
//! with that probability an action is drawn uniformly at random, otherwise the
//! action with the best average reward is exploited (lowest index on ties).
//!
//! The RNG is seedable so selection can be reproduced in tests.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::{BanditError, Result};
use crate::policy::{argmax_lowest_index, SelectionStrategy};
use crate::{Arm, Decision, DecisionNote};

/// How epsilon evolves over iterations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EpsilonDecay {
    /// `initial_epsilon / sqrt(iteration)`.
    #[default]
    InverseSqrt,
    /// `initial_epsilon` at every iteration.
    Constant,
}

/// Configuration for epsilon-greedy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EpsilonGreedyConfig {
    /// Exploration rate at iteration 1, in `[0, 1]`.
    pub initial_epsilon: f64,
    pub decay: EpsilonDecay,
}

impl Default for EpsilonGreedyConfig {
    fn default() -> Self {
        Self {
            initial_epsilon: 1.0,
            decay: EpsilonDecay::InverseSqrt,
        }
    }
}

impl EpsilonGreedyConfig {
    pub fn validate(&self) -> Result<()> {
        let e = self.initial_epsilon;
        if !e.is_finite() || !(0.0..=1.0).contains(&e) {
            return Err(BanditError::InvalidParameter {
                name: "initial_epsilon",
                reason: format!("must be a finite value in [0, 1], got {e}"),
            });
        }
        Ok(())
    }

    /// Exploration rate used at `iteration` (iterations start at 1).
    pub fn epsilon_at(&self, iteration: u64) -> f64 {
        match self.decay {
            EpsilonDecay::InverseSqrt => self.initial_epsilon / (iteration.max(1) as f64).sqrt(),
            EpsilonDecay::Constant => self.initial_epsilon,
        }
    }
}

/// Seedable epsilon-greedy strategy.
#[derive(Debug, Clone)]
pub struct EpsilonGreedy {
    cfg: EpsilonGreedyConfig,
    epsilon: f64,
    rng: StdRng,
}

impl EpsilonGreedy {
    /// Create with a fixed seed, clamping `initial_epsilon` into `[0, 1]`.
    pub fn with_seed(mut cfg: EpsilonGreedyConfig, seed: u64) -> Self {
        cfg.initial_epsilon = if cfg.initial_epsilon.is_finite() {
            cfg.initial_epsilon.clamp(0.0, 1.0)
        } else {
            1.0
        };
        Self {
            cfg,
            epsilon: cfg.initial_epsilon,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create with a fixed seed, rejecting an out-of-domain `initial_epsilon`.
    pub fn try_with_seed(cfg: EpsilonGreedyConfig, seed: u64) -> Result<Self> {
        cfg.validate()?;
        Ok(Self::with_seed(cfg, seed))
    }

    pub fn config(&self) -> &EpsilonGreedyConfig {
        &self.cfg
    }
}

impl SelectionStrategy for EpsilonGreedy {
    fn name(&self) -> &'static str {
        "epsilon_greedy"
    }

    fn select(&mut self, arms: &[Arm], iteration: u64) -> Decision {
        self.epsilon = self.cfg.epsilon_at(iteration);
        let epsilon = self.epsilon;

        let mut notes = Vec::new();
        let explore = !arms.is_empty() && self.rng.random::<f64>() < epsilon;
        let action = if explore {
            notes.push(DecisionNote::ExploreUniform { epsilon });
            self.rng.random_range(0..arms.len())
        } else {
            match argmax_lowest_index(arms.iter().map(Arm::average_reward)) {
                Some(best) => {
                    notes.push(DecisionNote::ExploitBestAverage {
                        epsilon,
                        average_reward: best.value,
                    });
                    if best.tied > 1 {
                        notes.push(DecisionNote::TieBrokenLowestIndex { tied: best.tied });
                    }
                    best.index
                }
                None => {
                    notes.push(DecisionNote::NoFiniteScoreFallback);
                    0
                }
            }
        };

        Decision {
            strategy: self.name(),
            action,
            iteration,
            notes,
        }
    }

    fn epsilon(&self) -> Option<f64> {
        Some(self.epsilon)
    }

    fn reset(&mut self) {
        self.epsilon = self.cfg.initial_epsilon;
    }
}
