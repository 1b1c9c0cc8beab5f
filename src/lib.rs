//! `srmab`: multi-armed-bandit agents for 802.11ax spatial-reuse simulation.
//!
//! Each access point in a simulated deployment runs one [`BanditAgent`]. The
//! agent picks an operating action (an OBSS_PD threshold, a transmit power,
//! a spatial-reuse configuration: anything enumerable) from a fixed action
//! set, learns from the rewards the simulator attributes to those actions,
//! and reports its statistics for logging.
//!
//! Alongside the learner sits a small protocol-legality layer:
//!
//! - [`classify_origin`] / [`is_same_spatial_reuse_group`] /
//!   [`BssIdentity::interference_class`]: attribute a received frame to our
//!   own BSS, an SRG overlapping BSS, or another overlapping BSS.
//! - [`check_obss_pd`], [`check_srg_obss_pd`], [`check_non_srg_obss_pd`],
//!   [`check_power_constraint`]: the amendment's numeric constraints on
//!   candidate levels, plus [`SpatialReuseParams`] to apply them by class.
//!
//! **Goals:**
//! - **Deterministic by default**: every agent's RNG is seeded, from its id
//!   when no seed is configured. Same seed + same calls → same decisions.
//! - **Exact reward bookkeeping**: the per-arm recurrences in [`Arm::observe`]
//!   are reproduced bit for bit, including the `+2` smoothing denominator.
//! - **No silent recovery**: out-of-range indices, unknown strategies and
//!   degenerate configs come back as [`BanditError`]s.
//!
//! **Selection strategies:**
//! - [`EpsilonGreedy`]: `epsilon = initial_epsilon / sqrt(iteration)`,
//!   uniform exploration, exploit best average reward.
//! - [`ThompsonSampling`]: Gaussian or Beta posterior over the smoothed
//!   estimate; widest for unobserved arms.
//! - [`SelectionStrategy`]: the trait both implement; pass your own to
//!   [`BanditAgent::with_strategy`].
//!
//! Ties are always broken towards the lowest action index.
//!
//! **Non-goals:**
//! - Not a simulator: no event scheduling, propagation, or CSMA/CA.
//! - No mapping from actions to radio behaviour; actions are just indices.
//!
//! # Example
//!
//! ```rust
//! use srmab::{AgentConfig, BanditAgent, StrategyKind};
//!
//! let mut cfg = AgentConfig::for_strategy(4, StrategyKind::ThompsonSampling);
//! cfg.seed = Some(1);
//! let mut agent = BanditAgent::new(cfg).unwrap();
//!
//! for _ in 0..20 {
//!     let a = agent.select_next_action();
//!     let reward = if a == 2 { 1.0 } else { 0.1 };
//!     agent.observe(a, reward).unwrap();
//! }
//! println!("{}", agent.snapshot());
//! ```

mod error;
pub use error::{BanditError, Result};

mod arm;
pub use arm::*;

mod decision;
pub use decision::*;

mod policy;
pub use policy::*;

mod epsilon_greedy;
pub use epsilon_greedy::*;

mod thompson;
pub use thompson::*;

mod agent;
pub use agent::*;

mod config;
pub use config::*;

mod builder;
pub use builder::*;

mod stable_hash;
pub use stable_hash::*;

pub mod power;

mod frame;
pub use frame::*;

mod spatial_reuse;
pub use spatial_reuse::*;

mod wlan;
pub use wlan::*;

pub const SRMAB_VERSION: &str = env!("CARGO_PKG_VERSION");
