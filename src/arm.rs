//! Per-action reward statistics.
//!
//! One [`Arm`] exists per candidate action. Arms are created once when the
//! agent is built and only ever mutated through [`Arm::observe`], so the
//! invariants below hold for the agent's whole lifetime:
//!
//! - `times_selected` never decreases.
//! - `average_reward` is the exact arithmetic mean of every observed reward
//!   (or the initial reward before the first observation).

use serde::{Deserialize, Serialize};

/// Reward statistics for one action.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Arm {
    initial_reward: f64,
    last_reward: f64,
    cumulative_reward: f64,
    times_selected: u64,
    average_reward: f64,
    estimated_reward: f64,
}

impl Arm {
    /// A fresh arm with every estimate set to `initial_reward`.
    pub fn new(initial_reward: f64) -> Self {
        Self {
            initial_reward,
            last_reward: initial_reward,
            cumulative_reward: 0.0,
            times_selected: 0,
            average_reward: initial_reward,
            estimated_reward: initial_reward,
        }
    }

    /// Record one reward for this arm.
    ///
    /// The smoothed estimate uses `(est * n + r) / (n + 2)` with `n` taken
    /// after the increment, so the first observation divides by 3.
    pub fn observe(&mut self, reward: f64) {
        self.last_reward = reward;
        self.times_selected = self.times_selected.saturating_add(1);
        self.cumulative_reward += reward;
        let n = self.times_selected as f64;
        self.average_reward = self.cumulative_reward / n;
        self.estimated_reward = (self.estimated_reward * n + reward) / (n + 2.0);
    }

    /// Reward given to the most recent observation (initial reward if none).
    pub fn last_reward(&self) -> f64 {
        self.last_reward
    }

    /// Sum of every observed reward.
    pub fn cumulative_reward(&self) -> f64 {
        self.cumulative_reward
    }

    /// Number of observations recorded for this arm.
    pub fn times_selected(&self) -> u64 {
        self.times_selected
    }

    /// Arithmetic mean of observed rewards, or the initial reward if unobserved.
    pub fn average_reward(&self) -> f64 {
        self.average_reward
    }

    /// Smoothed reward estimate consumed by Thompson sampling.
    pub fn estimated_reward(&self) -> f64 {
        self.estimated_reward
    }

    /// Whether this arm has never been observed.
    pub fn is_unobserved(&self) -> bool {
        self.times_selected == 0
    }

    /// Forget every observation.
    pub fn reset(&mut self) {
        *self = Self::new(self.initial_reward);
    }

    /// Read-only copy for reporting.
    pub fn snapshot(&self) -> ArmSnapshot {
        ArmSnapshot {
            last_reward: self.last_reward,
            cumulative_reward: self.cumulative_reward,
            times_selected: self.times_selected,
            average_reward: self.average_reward,
            estimated_reward: self.estimated_reward,
        }
    }
}

/// Point-in-time copy of one arm's statistics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArmSnapshot {
    pub last_reward: f64,
    pub cumulative_reward: f64,
    pub times_selected: u64,
    pub average_reward: f64,
    pub estimated_reward: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_arm_reports_initial_reward() {
        let a = Arm::new(0.25);
        assert_eq!(a.last_reward(), 0.25);
        assert_eq!(a.average_reward(), 0.25);
        assert_eq!(a.estimated_reward(), 0.25);
        assert_eq!(a.cumulative_reward(), 0.0);
        assert!(a.is_unobserved());
    }

    #[test]
    fn first_observation_uses_denominator_three() {
        let mut a = Arm::new(0.0);
        a.observe(0.9);
        // (0 * 1 + 0.9) / 3
        assert!((a.estimated_reward() - 0.3).abs() < 1e-12);
        assert_eq!(a.times_selected(), 1);
        assert_eq!(a.average_reward(), 0.9);
        assert_eq!(a.last_reward(), 0.9);
    }

    #[test]
    fn second_observation_follows_recurrence() {
        let mut a = Arm::new(0.0);
        a.observe(0.9);
        a.observe(0.6);
        // (0.3 * 2 + 0.6) / 4
        assert!((a.estimated_reward() - 0.3).abs() < 1e-12);
        assert!((a.average_reward() - 0.75).abs() < 1e-12);
        assert!((a.cumulative_reward() - 1.5).abs() < 1e-12);
    }

    #[test]
    fn mean_ignores_nonzero_initial_reward() {
        let mut a = Arm::new(5.0);
        a.observe(1.0);
        a.observe(3.0);
        assert_eq!(a.average_reward(), 2.0);
        assert_eq!(a.cumulative_reward(), 4.0);
    }

    #[test]
    fn reset_restores_initial_state() {
        let mut a = Arm::new(0.5);
        a.observe(1.0);
        a.reset();
        assert_eq!(a, Arm::new(0.5));
    }
}
