//! Configuration for policies and simulation runs.
//!
//! Every struct here has a `Default` matching the stock setup: a
//! sliding-window epsilon-greedy learner with epsilon 0.1, six arms (four
//! normal, two penalty) and 10 000 iterations. With the `serde` feature they
//! can be loaded from any serde format.

use crate::error::{BanditError, Result};
use crate::policies::{SlidingWindowConfig, SlidingWindowGreedy, ThompsonSampling};
use crate::policy::Policy;
use crate::reward::{LandscapeConfig, RewardModel};

/// Which strategy drives arm selection.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum PolicyConfig {
    SlidingWindow {
        epsilon: f64,
        #[cfg_attr(feature = "serde", serde(default))]
        tuning: SlidingWindowConfig,
    },
    Thompson { prior_alpha: f64, prior_beta: f64 },
}

impl Default for PolicyConfig {
    fn default() -> Self {
        PolicyConfig::SlidingWindow {
            epsilon: 0.1,
            tuning: SlidingWindowConfig::default(),
        }
    }
}

impl PolicyConfig {
    /// Builds the configured policy behind a trait object.
    pub fn build(&self) -> Result<Box<dyn Policy>> {
        Ok(match self {
            PolicyConfig::SlidingWindow { epsilon, tuning } => Box::new(
                SlidingWindowGreedy::with_config(*epsilon, tuning.clone())?,
            ),
            PolicyConfig::Thompson {
                prior_alpha,
                prior_beta,
            } => Box::new(ThompsonSampling::with_prior(*prior_alpha, *prior_beta)?),
        })
    }

    /// Short name used in logs and reports.
    pub fn name(&self) -> &'static str {
        match self {
            PolicyConfig::SlidingWindow { .. } => "sliding-window",
            PolicyConfig::Thompson { .. } => "thompson",
        }
    }
}

/// Parameters of one simulation run.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimulationConfig {
    /// Number of benchmark rounds, and separately of learning trials.
    pub iterations: usize,
    pub landscape: LandscapeConfig,
    pub reward_model: RewardModel,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            iterations: 10_000,
            landscape: LandscapeConfig::default(),
            reward_model: RewardModel::default(),
        }
    }
}

impl SimulationConfig {
    pub fn with_iterations(iterations: usize) -> Self {
        Self {
            iterations,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.reward_model.validate()?;
        if self.landscape.n_arms() == 0 {
            return Err(BanditError::invalid_parameter("landscape has no arms"));
        }
        let finite = [self.landscape.base, self.landscape.spread, self.landscape.perturbation]
            .into_iter()
            .chain(self.landscape.penalty_arms.iter().copied())
            .all(f64::is_finite);
        if !finite {
            return Err(BanditError::invalid_parameter(
                "landscape parameters must be finite",
            ));
        }
        Ok(())
    }
}
