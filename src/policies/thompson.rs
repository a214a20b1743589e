use crate::error::{BanditError, Result};
use crate::policy::Policy;
use crate::stats::ArmSummary;
use rand::Rng;
use rand_distr::{Beta, Distribution};

/// Thompson Sampling policy using Beta distribution
///
/// Each arm carries a Beta posterior. Selection draws one sample per arm and
/// plays the largest. Rewards outside `[0, 1]` are folded in asymmetrically:
/// only the positive part counts as success, and anything below 1 counts as
/// failure, so strongly negative rewards pile up failures quickly.
#[derive(Clone, Debug)]
pub struct ThompsonSampling {
    /// Prior alpha parameter for Beta distribution (defaults to 1.0)
    prior_alpha: f64,
    /// Prior beta parameter for Beta distribution (defaults to 1.0)
    prior_beta: f64,
    arms: Vec<ArmStats>,
    /// Largest sample seen on a chosen arm so far
    theta_max: f64,
    last_regret: f64,
}

#[derive(Clone, Debug, Default)]
struct ArmStats {
    successes: f64,
    failures: f64,
    pulls: u64,
    total_reward: f64,
}

impl ArmStats {
    /// Sample from the Beta distribution for this arm
    fn sample<R: Rng + ?Sized>(&self, prior_alpha: f64, prior_beta: f64, rng: &mut R) -> f64 {
        let alpha = self.successes + prior_alpha;
        let beta = self.failures + prior_beta;

        match Beta::new(alpha, beta) {
            Ok(dist) => dist.sample(rng),
            // Degenerate parameters; fall back to the mean
            Err(_) => alpha / (alpha + beta),
        }
    }

    /// Get the expected value (mean) of the Beta distribution
    fn expected_value(&self, prior_alpha: f64, prior_beta: f64) -> f64 {
        let alpha = self.successes + prior_alpha;
        let beta = self.failures + prior_beta;
        alpha / (alpha + beta)
    }
}

impl ThompsonSampling {
    /// Creates a new Thompson Sampling policy with default priors (uniform Beta(1,1))
    pub fn new() -> Self {
        Self {
            prior_alpha: 1.0,
            prior_beta: 1.0,
            arms: Vec::new(),
            theta_max: 0.0,
            last_regret: 0.0,
        }
    }

    /// Creates a new Thompson Sampling policy with specified Beta prior parameters
    ///
    /// Both priors must be positive and finite.
    pub fn with_prior(prior_alpha: f64, prior_beta: f64) -> Result<Self> {
        let valid = |p: f64| p.is_finite() && p > 0.0;
        if !valid(prior_alpha) || !valid(prior_beta) {
            return Err(BanditError::invalid_parameter(
                "Beta priors must be positive",
            ));
        }
        Ok(Self {
            prior_alpha,
            prior_beta,
            ..Self::new()
        })
    }

    /// Gets the prior parameters
    pub fn prior(&self) -> (f64, f64) {
        (self.prior_alpha, self.prior_beta)
    }

    /// Posterior `(alpha, beta)` for an arm, priors included
    pub fn posterior(&self, arm: usize) -> Option<(f64, f64)> {
        self.arms.get(arm).map(|s| {
            (
                s.successes + self.prior_alpha,
                s.failures + self.prior_beta,
            )
        })
    }

    /// Gap between the best sample ever drawn for a chosen arm and the sample
    /// behind the latest choice
    pub fn last_regret(&self) -> f64 {
        self.last_regret
    }
}

impl Default for ThompsonSampling {
    fn default() -> Self {
        Self::new()
    }
}

impl Policy for ThompsonSampling {
    fn reset(&mut self, n_arms: usize) {
        self.arms = vec![ArmStats::default(); n_arms];
        self.theta_max = 0.0;
        self.last_regret = 0.0;
    }

    fn select(&mut self, rng: &mut dyn rand::RngCore) -> Result<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (i, stats) in self.arms.iter().enumerate() {
            let theta = stats.sample(self.prior_alpha, self.prior_beta, rng);
            match best {
                Some((_, top)) if theta <= top => {}
                _ => best = Some((i, theta)),
            }
        }

        let (arm, theta) = best.ok_or(BanditError::EmptyArmSet)?;
        self.theta_max = self.theta_max.max(theta);
        self.last_regret = self.theta_max - theta;
        Ok(arm)
    }

    fn update(&mut self, arm: usize, reward: f64) -> Result<()> {
        let stats = self
            .arms
            .get_mut(arm)
            .ok_or_else(|| BanditError::invalid_arm(arm))?;
        stats.successes += reward.max(0.0);
        stats.failures += 1.0 - reward.min(1.0);
        stats.pulls += 1;
        stats.total_reward += reward;
        Ok(())
    }

    fn expectations(&self) -> Vec<f64> {
        self.arms
            .iter()
            .map(|s| s.expected_value(self.prior_alpha, self.prior_beta))
            .collect()
    }

    fn arm_summaries(&self) -> Vec<ArmSummary> {
        self.arms
            .iter()
            .map(|s| ArmSummary {
                pulls: s.pulls,
                total_reward: s.total_reward,
                estimate: s.expected_value(self.prior_alpha, self.prior_beta),
                discarded: false,
            })
            .collect()
    }
}
