//! The action-selection contract shared by every strategy.
//!
//! [`EpsilonGreedy`](crate::EpsilonGreedy) and
//! [`ThompsonSampling`](crate::ThompsonSampling) both implement
//! [`SelectionStrategy`]. The agent only talks to the trait object, so a new
//! strategy is a new implementation, not a change to
//! [`BanditAgent`](crate::BanditAgent).
//!
//! ```rust
//! use srmab::{Arm, EpsilonGreedy, EpsilonGreedyConfig, SelectionStrategy};
//!
//! fn run<S: SelectionStrategy + ?Sized>(s: &mut S, arms: &mut [Arm]) {
//!     for it in 1..=10u64 {
//!         let d = s.select(arms, it);
//!         arms[d.action].observe(0.7);
//!     }
//! }
//!
//! let mut arms = vec![Arm::new(0.0); 3];
//! let mut eg = EpsilonGreedy::with_seed(EpsilonGreedyConfig::default(), 0);
//! run(&mut eg, &mut arms);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{BanditError, Result};
use crate::{Arm, Decision, EpsilonGreedy, ThompsonSampling};

/// Common interface for action-selection strategies.
pub trait SelectionStrategy: fmt::Debug + Send {
    /// Stable strategy name, used in decisions and logs.
    fn name(&self) -> &'static str;

    /// Choose an action index for `iteration` (1-based).
    ///
    /// `arms` is never empty; the returned [`Decision::action`] must be a
    /// valid index into it.
    fn select(&mut self, arms: &[Arm], iteration: u64) -> Decision;

    /// Current exploration rate, for strategies that have one.
    fn epsilon(&self) -> Option<f64> {
        None
    }

    /// Return to the just-constructed state (RNG streams are not rewound).
    fn reset(&mut self) {}
}

/// Built-in strategy tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    #[default]
    EpsilonGreedy,
    ThompsonSampling,
}

impl StrategyKind {
    /// Integer tag used by simulator input files (`1` = epsilon-greedy,
    /// `2` = Thompson sampling).
    pub fn from_code(code: i32) -> Result<Self> {
        match code {
            1 => Ok(Self::EpsilonGreedy),
            2 => Ok(Self::ThompsonSampling),
            other => Err(BanditError::UnknownStrategy(other.to_string())),
        }
    }

    pub fn code(self) -> i32 {
        match self {
            Self::EpsilonGreedy => 1,
            Self::ThompsonSampling => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::EpsilonGreedy => "epsilon_greedy",
            Self::ThompsonSampling => "thompson_sampling",
        }
    }

    /// Every built-in strategy, in code order.
    pub fn all() -> [Self; 2] {
        [Self::EpsilonGreedy, Self::ThompsonSampling]
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StrategyKind {
    type Err = BanditError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "epsilon_greedy" | "egreedy" => Ok(Self::EpsilonGreedy),
            "thompson_sampling" | "thompson" => Ok(Self::ThompsonSampling),
            _ => Err(BanditError::UnknownStrategy(s.to_string())),
        }
    }
}

/// Build the strategy named by `cfg.strategy`.
pub fn build_strategy(cfg: &crate::AgentConfig, seed: u64) -> Result<Box<dyn SelectionStrategy>> {
    Ok(match cfg.strategy {
        StrategyKind::EpsilonGreedy => {
            Box::new(EpsilonGreedy::try_with_seed(cfg.epsilon_greedy, seed)?)
        }
        StrategyKind::ThompsonSampling => {
            Box::new(ThompsonSampling::try_with_seed(cfg.thompson, seed)?)
        }
    })
}

/// Result of a deterministic argmax.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Argmax {
    pub index: usize,
    pub value: f64,
    /// How many indices share `value` (1 when there is no tie).
    pub tied: usize,
}

/// Index of the greatest value; the lowest index wins ties and NaN never wins.
///
/// Returns `None` when `values` is empty or every value is NaN.
pub fn argmax_lowest_index<I>(values: I) -> Option<Argmax>
where
    I: IntoIterator<Item = f64>,
{
    let mut best: Option<Argmax> = None;
    for (i, v) in values.into_iter().enumerate() {
        if v.is_nan() {
            continue;
        }
        match best.as_mut() {
            None => {
                best = Some(Argmax {
                    index: i,
                    value: v,
                    tied: 1,
                })
            }
            Some(b) if v > b.value => {
                *b = Argmax {
                    index: i,
                    value: v,
                    tied: 1,
                }
            }
            Some(b) if v == b.value => b.tied += 1,
            Some(_) => {}
        }
    }
    best
}
