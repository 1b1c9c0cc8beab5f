//! Thompson sampling over per-arm reward estimates.
//!
//! Each selection draws one sample per arm from a posterior centred on the
//! arm's smoothed `estimated_reward` and picks the largest sample. Posteriors
//! tighten as `times_selected` grows, and an unobserved arm samples with the
//! widest spread, so early iterations explore on their own.
//!
//! Notes:
//! - This policy is **seedable** so selection can be reproducible in tests.
//! - There is no "try every arm once" phase: unobserved arms compete through
//!   their wide posteriors like everyone else.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Beta, Distribution, Normal};
use serde::{Deserialize, Serialize};

use crate::error::{BanditError, Result};
use crate::policy::{argmax_lowest_index, SelectionStrategy};
use crate::{Arm, Decision, DecisionNote};

/// Posterior family used to sample each arm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Posterior {
    /// `Normal(estimated_reward, prior_std / (1 + times_selected))`; suits
    /// unbounded real rewards.
    #[default]
    Gaussian,
    /// `Beta(1 + e*n, 1 + (1 - e)*n)` with `e` clamped to `[0, 1]`; suits
    /// rewards bounded in `[0, 1]`.
    Beta,
}

/// Configuration for Thompson sampling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThompsonConfig {
    pub posterior: Posterior,
    /// Standard deviation of an unobserved arm (Gaussian posterior only, must be > 0).
    pub prior_std: f64,
}

impl Default for ThompsonConfig {
    fn default() -> Self {
        Self {
            posterior: Posterior::Gaussian,
            prior_std: 1.0,
        }
    }
}

impl ThompsonConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.prior_std.is_finite() && self.prior_std > 0.0) {
            return Err(BanditError::InvalidParameter {
                name: "prior_std",
                reason: format!("must be finite and > 0, got {}", self.prior_std),
            });
        }
        Ok(())
    }

    /// Spread of the Gaussian posterior after `times_selected` observations.
    pub fn posterior_std(&self, times_selected: u64) -> f64 {
        self.prior_std / (1.0 + times_selected as f64)
    }
}

/// Seedable Thompson-sampling strategy.
#[derive(Debug, Clone)]
pub struct ThompsonSampling {
    cfg: ThompsonConfig,
    rng: StdRng,
}

impl ThompsonSampling {
    /// Create with a fixed seed (reproducible). An invalid `prior_std` falls back to 1.
    pub fn with_seed(mut cfg: ThompsonConfig, seed: u64) -> Self {
        if cfg.validate().is_err() {
            cfg.prior_std = 1.0;
        }
        Self {
            cfg,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create with a fixed seed, rejecting an invalid configuration.
    pub fn try_with_seed(cfg: ThompsonConfig, seed: u64) -> Result<Self> {
        cfg.validate()?;
        Ok(Self::with_seed(cfg, seed))
    }

    pub fn config(&self) -> &ThompsonConfig {
        &self.cfg
    }

    /// Draw one posterior sample for `arm`.
    pub fn sample_arm(&mut self, arm: &Arm) -> f64 {
        let est = arm.estimated_reward();
        let n = arm.times_selected();
        match self.cfg.posterior {
            Posterior::Gaussian => {
                let std = self.cfg.posterior_std(n);
                match Normal::new(est, std) {
                    Ok(dist) => dist.sample(&mut self.rng),
                    Err(_) => est,
                }
            }
            Posterior::Beta => {
                let e = if est.is_finite() { est.clamp(0.0, 1.0) } else { 0.5 };
                let nf = n as f64;
                match Beta::new(1.0 + e * nf, 1.0 + (1.0 - e) * nf) {
                    Ok(dist) => dist.sample(&mut self.rng),
                    Err(_) => e,
                }
            }
        }
    }
}

impl Default for ThompsonSampling {
    fn default() -> Self {
        Self::with_seed(ThompsonConfig::default(), 0)
    }
}

impl SelectionStrategy for ThompsonSampling {
    fn name(&self) -> &'static str {
        "thompson_sampling"
    }

    /// Sample every arm, return the largest sample (lowest index on ties).
    fn select(&mut self, arms: &[Arm], iteration: u64) -> Decision {
        let samples: Vec<f64> = arms.iter().map(|a| self.sample_arm(a)).collect();
        let mut notes = Vec::with_capacity(2);
        let action = match argmax_lowest_index(samples) {
            Some(best) => {
                notes.push(DecisionNote::SampledPosteriorMax { sample: best.value });
                if best.tied > 1 {
                    notes.push(DecisionNote::TieBrokenLowestIndex { tied: best.tied });
                }
                best.index
            }
            None => {
                notes.push(DecisionNote::NoFiniteScoreFallback);
                0
            }
        };
        Decision {
            strategy: self.name(),
            action,
            iteration,
            notes,
        }
    }
}
