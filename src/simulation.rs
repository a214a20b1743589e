//! Benchmark-then-learn simulation loop.
//!
//! A run has two phases over the same number of iterations:
//!
//! 1. **Benchmark**: each round regenerates the expected-reward landscape and
//!    draws one reward per arm, bypassing the policy. The per-arm averages show
//!    how the arms compare.
//! 2. **Learning**: each trial asks the bandit for an arm, draws a reward from
//!    the *last* benchmark landscape and feeds it back. The landscape stays
//!    frozen for the whole phase.
//!
//! Trials are strictly sequential; feedback from one trial must be visible to
//! the next selection.

use std::fmt;
use std::fmt::Debug;
use std::hash::Hash;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, trace};

use crate::bandit::Bandit;
use crate::config::SimulationConfig;
use crate::error::{BanditError, Result};
use crate::policy::Policy;
use crate::reward::RewardLandscape;

/// Outcome of one simulation run.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationReport {
    /// Sum of every arm's cumulative reward held by the policy after the run.
    pub total_reward: f64,
    /// Pull count per arm, in arm order.
    pub frequencies: Vec<u64>,
    /// Cumulative reward per arm, in arm order.
    pub per_arm_totals: Vec<f64>,
    /// Benchmark-phase average reward per arm.
    pub relative_rewards: Vec<f64>,
    /// Landscape the learning phase ran against; `None` when no iterations ran.
    pub final_landscape: Option<RewardLandscape>,
}

impl SimulationReport {
    /// Share of pulls that went to the arm with the highest frozen expected reward.
    pub fn best_arm_share(&self) -> Option<f64> {
        let best = self.final_landscape.as_ref()?.best_arm()?;
        let pulls: u64 = self.frequencies.iter().sum();
        if pulls == 0 {
            return None;
        }
        let best_pulls = self.frequencies.get(best).copied()?;
        Some(best_pulls as f64 / pulls as f64)
    }
}

impl fmt::Display for SimulationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Reward comparison of the different arms:")?;
        for (arm, reward) in self.relative_rewards.iter().enumerate() {
            writeln!(f, "  arm {arm}: {reward:.4}")?;
        }
        writeln!(f, "Frequencies:")?;
        for (arm, (pulls, total)) in self.frequencies.iter().zip(&self.per_arm_totals).enumerate() {
            writeln!(f, "  arm {arm}: {pulls} pulls, {total:.2} reward")?;
        }
        write!(f, "Total reward: {:.2}", self.total_reward)
    }
}

/// Drives a bandit through the benchmark and learning phases.
#[derive(Clone, Debug, Default)]
pub struct Simulator {
    config: SimulationConfig,
}

impl Simulator {
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Runs both phases against `bandit`.
    ///
    /// `env_rng` drives landscapes and rewards, `policy_rng` drives arm
    /// selection, so each can be seeded on its own.
    pub fn run<A, P>(
        &self,
        bandit: &mut Bandit<A, P>,
        env_rng: &mut dyn rand::RngCore,
        policy_rng: &mut dyn rand::RngCore,
    ) -> Result<SimulationReport>
    where
        A: Clone + Eq + Hash + Debug,
        P: Policy,
    {
        let n_arms = self.config.landscape.n_arms();
        if n_arms != bandit.n_arms() {
            return Err(BanditError::DimensionMismatch {
                message: format!(
                    "landscape has {} arms, bandit has {}",
                    n_arms,
                    bandit.n_arms()
                ),
            });
        }

        let iterations = self.config.iterations;
        let model = &self.config.reward_model;

        let mut accumulated = vec![0.0; n_arms];
        let mut landscape = None;
        for _ in 0..iterations {
            let current = RewardLandscape::sample(&self.config.landscape, env_rng);
            for (arm, acc) in accumulated.iter_mut().enumerate() {
                *acc += model.sample(arm, current.expected(), env_rng)?;
            }
            landscape = Some(current);
        }

        let relative_rewards: Vec<f64> = if iterations == 0 {
            accumulated
        } else {
            accumulated.iter().map(|r| r / iterations as f64).collect()
        };
        debug!(?relative_rewards, "benchmark phase complete");

        if let Some(landscape) = &landscape {
            for trial in 0..iterations {
                let arm = bandit.select_arm(policy_rng)?;
                let index = bandit.index_of(&arm)?;
                let reward = model.sample(index, landscape.expected(), env_rng)?;
                trace!(trial, arm = index, reward, "trial");
                bandit.record_feedback(&arm, reward)?;
            }
        }

        let summaries = bandit.policy().arm_summaries();
        let report = SimulationReport {
            total_reward: summaries.iter().map(|s| s.total_reward).sum(),
            frequencies: summaries.iter().map(|s| s.pulls).collect(),
            per_arm_totals: summaries.iter().map(|s| s.total_reward).collect(),
            relative_rewards,
            final_landscape: landscape,
        };

        info!(
            iterations,
            total_reward = report.total_reward,
            frequencies = ?report.frequencies,
            "simulation complete"
        );
        Ok(report)
    }
}

/// Runs the default six-arm simulation for `iterations` rounds.
///
/// The environment RNG is seeded with `seed` and the policy RNG with `seed + 1`.
pub fn simulate<A, P>(
    bandit: &mut Bandit<A, P>,
    iterations: usize,
    seed: u64,
) -> Result<SimulationReport>
where
    A: Clone + Eq + Hash + Debug,
    P: Policy,
{
    let simulator = Simulator::new(SimulationConfig::with_iterations(iterations))?;
    let mut env_rng = StdRng::seed_from_u64(seed);
    let mut policy_rng = StdRng::seed_from_u64(seed.wrapping_add(1));
    simulator.run(bandit, &mut env_rng, &mut policy_rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policies::ThompsonSampling;
    use approx::assert_relative_eq;

    fn six_arms() -> Vec<usize> {
        (0..6).collect()
    }

    #[test]
    fn test_total_reward_matches_policy_sums() {
        let mut bandit = Bandit::sliding_window(six_arms(), 0.1).unwrap();
        let report = simulate(&mut bandit, 500, 42).unwrap();

        assert_eq!(report.frequencies.iter().sum::<u64>(), 500);
        assert_relative_eq!(report.total_reward, bandit.total_reward());
        assert_relative_eq!(
            report.total_reward,
            report.per_arm_totals.iter().sum::<f64>()
        );
    }

    #[test]
    fn test_zero_iterations() {
        let mut bandit = Bandit::sliding_window(six_arms(), 0.1).unwrap();
        let report = simulate(&mut bandit, 0, 1).unwrap();

        assert_eq!(report.total_reward, 0.0);
        assert_eq!(report.frequencies, vec![0; 6]);
        assert_eq!(report.relative_rewards, vec![0.0; 6]);
        assert!(report.final_landscape.is_none());
        assert!(report.best_arm_share().is_none());
    }

    #[test]
    fn test_arm_count_must_match_landscape() {
        let mut bandit = Bandit::sliding_window(vec![0, 1, 2], 0.1).unwrap();
        assert!(matches!(
            simulate(&mut bandit, 10, 1),
            Err(BanditError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_same_seed_same_report() {
        let run = |seed| {
            let mut bandit = Bandit::sliding_window(six_arms(), 0.1).unwrap();
            simulate(&mut bandit, 300, seed).unwrap()
        };
        assert_eq!(run(9), run(9));
    }

    #[test]
    fn test_penalty_arms_are_avoided() {
        let mut bandit = Bandit::sliding_window(six_arms(), 0.1).unwrap();
        let report = simulate(&mut bandit, 2000, 7).unwrap();

        // Penalty arms get their forced pull plus a handful of explorations.
        assert!(report.frequencies[4] < 40);
        assert!(report.frequencies[5] < 40);
        assert!(report.relative_rewards[5] < report.relative_rewards[4]);
        assert!(report.relative_rewards[4] < report.relative_rewards[0]);
    }

    #[test]
    fn test_thompson_runs_through_simulator() {
        let mut bandit = Bandit::thompson_sampling(six_arms()).unwrap();
        let report = simulate(&mut bandit, 200, 3).unwrap();
        assert_eq!(report.frequencies.iter().sum::<u64>(), 200);
        assert_relative_eq!(report.total_reward, bandit.total_reward());
    }

    #[test]
    fn test_best_arm_share_with_short_frequencies() {
        let mut report = SimulationReport {
            total_reward: 0.0,
            frequencies: vec![3, 1],
            per_arm_totals: vec![0.0; 2],
            relative_rewards: vec![0.0; 2],
            final_landscape: Some(RewardLandscape::new(vec![0.2, 0.3, 0.9])),
        };
        // Frequencies stop before the best arm.
        assert_eq!(report.best_arm_share(), None);

        report.frequencies = vec![3, 1, 4];
        assert_relative_eq!(report.best_arm_share().unwrap(), 0.5);
    }

    #[test]
    fn test_report_display() {
        let mut bandit = Bandit::sliding_window(six_arms(), 0.1).unwrap();
        let report = simulate(&mut bandit, 50, 2).unwrap();
        let text = report.to_string();
        assert!(text.starts_with("Reward comparison of the different arms:"));
        assert!(text.contains("Frequencies:"));
        assert!(text.contains("Total reward:"));
    }

    #[test]
    fn test_independent_policy_seed() {
        let simulator = Simulator::new(SimulationConfig::with_iterations(100)).unwrap();
        let landscapes: Vec<_> = [1u64, 2]
            .iter()
            .map(|&policy_seed| {
                let mut bandit = Bandit::<usize, ThompsonSampling>::thompson_sampling(six_arms())
                    .unwrap();
                let mut env = StdRng::seed_from_u64(5);
                let mut pol = StdRng::seed_from_u64(policy_seed);
                simulator
                    .run(&mut bandit, &mut env, &mut pol)
                    .unwrap()
                    .relative_rewards
            })
            .collect();
        // The benchmark phase only touches the environment RNG.
        assert_eq!(landscapes[0], landscapes[1]);
    }
}
