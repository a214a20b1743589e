use crate::error::{BanditError, Result};
use crate::policy::Policy;
use crate::stats::{ArmStatistics, ArmSummary};
use rand::Rng;
use tracing::{debug, trace};

/// What selection does once every arm has been discarded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ExhaustionFallback {
    /// Keep going with pure exploitation over the full arm set.
    #[default]
    Exploit,
    /// Return [`BanditError::AllArmsDiscarded`] from every adaptive selection.
    Fail,
}

/// Tuning knobs for [`SlidingWindowGreedy`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SlidingWindowConfig {
    /// Number of most recent rewards averaged into an arm's estimate.
    pub window_size: usize,
    /// Arms whose estimate drops below this are discarded.
    pub discard_floor: f64,
    /// An arm must have strictly more pulls than this before it can be discarded.
    pub min_pulls_before_discard: u64,
    /// Arm index never picked by random exploration. Out-of-range indices have no effect.
    pub control_arm: Option<usize>,
    /// Whether discarded arms still take part in exploitation.
    pub exploit_discarded: bool,
    pub exhaustion: ExhaustionFallback,
}

impl Default for SlidingWindowConfig {
    fn default() -> Self {
        Self {
            window_size: 25,
            discard_floor: 0.1,
            min_pulls_before_discard: 10,
            control_arm: None,
            exploit_discarded: true,
            exhaustion: ExhaustionFallback::Exploit,
        }
    }
}

impl SlidingWindowConfig {
    fn validate(&self) -> Result<()> {
        if self.window_size == 0 {
            return Err(BanditError::invalid_parameter(
                "window_size must be at least 1",
            ));
        }
        if !self.discard_floor.is_finite() {
            return Err(BanditError::invalid_parameter(
                "discard_floor must be finite",
            ));
        }
        Ok(())
    }
}

/// Exploration probability after `n` total pulls.
pub fn decayed_exploration_rate(n: u64) -> f64 {
    1.0 / (1.0 + n as f64)
}

/// Epsilon-greedy over sliding-window estimates with a decaying exploration
/// rate and permanent discarding of arms that keep paying below a floor.
///
/// Selection, in order:
/// 1. any arm that was never pulled, lowest index first;
/// 2. with probability `1 / (1 + n)`, a uniformly random arm that is neither
///    discarded nor the configured control arm;
/// 3. otherwise the arm with the highest estimate, lowest index on ties.
#[derive(Clone, Debug)]
pub struct SlidingWindowGreedy {
    config: SlidingWindowConfig,
    initial_epsilon: f64,
    exploration_rate: f64,
    total_pulls: u64,
    arms: Vec<ArmStatistics>,
    discarded: Vec<usize>,
}

impl SlidingWindowGreedy {
    /// Creates a policy with the default window, floor and discard threshold.
    pub fn new(initial_epsilon: f64) -> Result<Self> {
        Self::with_config(initial_epsilon, SlidingWindowConfig::default())
    }

    pub fn with_config(initial_epsilon: f64, config: SlidingWindowConfig) -> Result<Self> {
        if !(0.0..=1.0).contains(&initial_epsilon) {
            return Err(BanditError::invalid_parameter(
                "epsilon must be between 0 and 1",
            ));
        }
        config.validate()?;
        Ok(Self {
            config,
            initial_epsilon,
            exploration_rate: initial_epsilon,
            total_pulls: 0,
            arms: Vec::new(),
            discarded: Vec::new(),
        })
    }

    pub fn config(&self) -> &SlidingWindowConfig {
        &self.config
    }

    /// The exploration probability used by the most recent adaptive selection,
    /// or the initial epsilon before the first one.
    pub fn exploration_rate(&self) -> f64 {
        self.exploration_rate
    }

    /// Total feedback calls across all arms.
    pub fn total_pulls(&self) -> u64 {
        self.total_pulls
    }

    /// Discarded arm indices, in the order they were discarded.
    pub fn discarded_arms(&self) -> &[usize] {
        &self.discarded
    }

    pub fn is_discarded(&self, arm: usize) -> bool {
        self.arms.get(arm).is_some_and(ArmStatistics::is_discarded)
    }

    pub fn arm_statistics(&self, arm: usize) -> Option<&ArmStatistics> {
        self.arms.get(arm)
    }

    fn all_discarded(&self) -> bool {
        !self.arms.is_empty() && self.discarded.len() == self.arms.len()
    }

    fn exploration_candidates(&self) -> Vec<usize> {
        self.arms
            .iter()
            .enumerate()
            .filter(|(i, stats)| !stats.is_discarded() && self.config.control_arm != Some(*i))
            .map(|(i, _)| i)
            .collect()
    }

    /// First arm with the highest estimate.
    fn best_arm(&self) -> usize {
        let skip_discarded = !self.config.exploit_discarded && !self.all_discarded();
        let mut best: Option<(usize, f64)> = None;
        for (i, stats) in self.arms.iter().enumerate() {
            if skip_discarded && stats.is_discarded() {
                continue;
            }
            match best {
                Some((_, value)) if stats.estimate() <= value => {}
                _ => best = Some((i, stats.estimate())),
            }
        }
        best.map_or(0, |(i, _)| i)
    }
}

impl Policy for SlidingWindowGreedy {
    fn reset(&mut self, n_arms: usize) {
        self.arms = vec![ArmStatistics::default(); n_arms];
        self.discarded.clear();
        self.total_pulls = 0;
        self.exploration_rate = self.initial_epsilon;
    }

    fn select(&mut self, rng: &mut dyn rand::RngCore) -> Result<usize> {
        if self.arms.is_empty() {
            return Err(BanditError::EmptyArmSet);
        }

        if let Some(unpulled) = self.arms.iter().position(|s| s.pulls() == 0) {
            trace!(arm = unpulled, "forced exploration");
            return Ok(unpulled);
        }

        if self.config.exhaustion == ExhaustionFallback::Fail && self.all_discarded() {
            return Err(BanditError::AllArmsDiscarded {
                n_arms: self.arms.len(),
            });
        }

        self.exploration_rate = decayed_exploration_rate(self.total_pulls);

        if rng.random::<f64>() < self.exploration_rate {
            let candidates = self.exploration_candidates();
            if !candidates.is_empty() {
                let arm = candidates[rng.random_range(0..candidates.len())];
                trace!(arm, rate = self.exploration_rate, "random exploration");
                return Ok(arm);
            }
        }

        Ok(self.best_arm())
    }

    fn update(&mut self, arm: usize, reward: f64) -> Result<()> {
        let stats = self
            .arms
            .get_mut(arm)
            .ok_or_else(|| BanditError::invalid_arm(arm))?;
        stats.record(reward, self.config.window_size);
        self.total_pulls += 1;

        if stats.estimate() < self.config.discard_floor
            && stats.pulls() > self.config.min_pulls_before_discard
            && stats.discard()
        {
            debug!(
                arm,
                estimate = stats.estimate(),
                pulls = stats.pulls(),
                "discarding arm"
            );
            self.discarded.push(arm);
        }
        Ok(())
    }

    fn expectations(&self) -> Vec<f64> {
        self.arms.iter().map(ArmStatistics::estimate).collect()
    }

    fn arm_summaries(&self) -> Vec<ArmSummary> {
        self.arms.iter().map(ArmStatistics::summary).collect()
    }
}
