use crate::config::PolicyConfig;
use crate::error::{BanditError, Result};
use crate::policies::{SlidingWindowGreedy, ThompsonSampling};
use crate::policy::Policy;
use crate::stats::ArmSummary;
use indexmap::IndexSet;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

/// A multi-armed bandit with a specific policy
///
/// The `Bandit` owns a fixed, ordered set of arms and translates between caller
/// arms and the arm indices its policy works with. Arm order is the order given
/// at construction, which is also the tie-break order of the policies.
#[derive(Clone, Debug)]
pub struct Bandit<A, P> {
    arms: IndexSet<A>,
    policy: P,
}

impl<A, P> Bandit<A, P>
where
    A: Clone + Eq + Hash + Debug,
    P: Policy,
{
    /// Creates a new bandit with the given arms and policy
    ///
    /// The policy is reset and sized to the number of arms.
    pub fn new<I>(arms: I, mut policy: P) -> Result<Self>
    where
        I: IntoIterator<Item = A>,
    {
        let mut set = IndexSet::new();
        for arm in arms {
            if set.contains(&arm) {
                return Err(BanditError::DuplicateArm {
                    arm: format!("{arm:?}"),
                });
            }
            set.insert(arm);
        }

        if set.is_empty() {
            return Err(BanditError::EmptyArmSet);
        }

        policy.reset(set.len());
        Ok(Self { arms: set, policy })
    }

    /// Asks the policy for the next arm to pull
    pub fn select_arm(&mut self, rng: &mut dyn rand::RngCore) -> Result<A> {
        let index = self.policy.select(rng)?;
        self.arms
            .get_index(index)
            .cloned()
            .ok_or_else(|| BanditError::invalid_arm(index))
    }

    /// Records the reward observed after pulling `arm`
    pub fn record_feedback(&mut self, arm: &A, reward: f64) -> Result<()> {
        let index = self.index_of(arm)?;
        check_reward(reward)?;
        self.policy.update(index, reward)
    }

    /// Records a batch of feedback
    ///
    /// Every decision and reward is validated before any is applied.
    pub fn fit(&mut self, decisions: &[A], rewards: &[f64]) -> Result<()> {
        if decisions.len() != rewards.len() {
            return Err(BanditError::DimensionMismatch {
                message: format!(
                    "Mismatched dimensions: decisions={}, rewards={}",
                    decisions.len(),
                    rewards.len()
                ),
            });
        }

        let indices = decisions
            .iter()
            .map(|arm| self.index_of(arm))
            .collect::<Result<Vec<_>>>()?;
        for &reward in rewards {
            check_reward(reward)?;
        }

        for (index, &reward) in indices.into_iter().zip(rewards) {
            self.policy.update(index, reward)?;
        }
        Ok(())
    }

    /// Position of `arm` in the arm set
    pub fn index_of(&self, arm: &A) -> Result<usize> {
        self.arms
            .get_index_of(arm)
            .ok_or_else(|| BanditError::invalid_arm(arm))
    }

    /// Current value estimate for each arm
    pub fn expectations(&self) -> HashMap<A, f64> {
        self.arms
            .iter()
            .cloned()
            .zip(self.policy.expectations())
            .collect()
    }

    /// Per-arm reporting snapshot, in arm order
    pub fn arm_summaries(&self) -> Vec<(A, ArmSummary)> {
        self.arms
            .iter()
            .cloned()
            .zip(self.policy.arm_summaries())
            .collect()
    }

    /// Pull count of each arm, in arm order
    pub fn frequencies(&self) -> Vec<u64> {
        self.policy.arm_summaries().iter().map(|s| s.pulls).collect()
    }

    /// Sum of every reward recorded across all arms
    pub fn total_reward(&self) -> f64 {
        self.policy
            .arm_summaries()
            .iter()
            .map(|s| s.total_reward)
            .sum()
    }

    /// Forget everything learned; the arm set is kept
    pub fn reset(&mut self) {
        self.policy.reset(self.arms.len());
    }

    /// Gets the available arms
    pub fn arms(&self) -> &IndexSet<A> {
        &self.arms
    }

    pub fn n_arms(&self) -> usize {
        self.arms.len()
    }

    /// Check if an arm exists in the bandit
    pub fn has_arm(&self, arm: &A) -> bool {
        self.arms.contains(arm)
    }

    /// Gets a reference to the policy
    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// Gets a mutable reference to the policy
    ///
    /// Resizing the policy through this handle desynchronizes it from the arm
    /// set; use [`Bandit::reset`] instead.
    pub fn policy_mut(&mut self) -> &mut P {
        &mut self.policy
    }
}

fn check_reward(reward: f64) -> Result<()> {
    if reward.is_finite() {
        Ok(())
    } else {
        Err(BanditError::InvalidReward { reward })
    }
}

// Convenience constructors for common policies
impl<A> Bandit<A, SlidingWindowGreedy>
where
    A: Clone + Eq + Hash + Debug,
{
    /// Create a sliding-window epsilon-greedy bandit with default tuning
    pub fn sliding_window<I>(arms: I, initial_epsilon: f64) -> Result<Self>
    where
        I: IntoIterator<Item = A>,
    {
        Self::new(arms, SlidingWindowGreedy::new(initial_epsilon)?)
    }
}

impl<A> Bandit<A, ThompsonSampling>
where
    A: Clone + Eq + Hash + Debug,
{
    /// Create a Thompson Sampling bandit
    pub fn thompson_sampling<I>(arms: I) -> Result<Self>
    where
        I: IntoIterator<Item = A>,
    {
        Self::new(arms, ThompsonSampling::new())
    }
}

impl<A> Bandit<A, Box<dyn Policy>>
where
    A: Clone + Eq + Hash + Debug,
{
    /// Create a bandit whose policy is chosen by configuration
    pub fn from_config<I>(arms: I, config: &PolicyConfig) -> Result<Self>
    where
        I: IntoIterator<Item = A>,
    {
        Self::new(arms, config.build()?)
    }
}

/// Builder for creating bandits with a fluent API
pub struct BanditBuilder<A, P> {
    arms: Option<Vec<A>>,
    policy: Option<P>,
}

impl<A, P> Default for BanditBuilder<A, P> {
    fn default() -> Self {
        Self {
            arms: None,
            policy: None,
        }
    }
}

impl<A, P> BanditBuilder<A, P>
where
    A: Clone + Eq + Hash + Debug,
    P: Policy,
{
    /// Set the arms for the bandit
    pub fn arms<I>(mut self, arms: I) -> Self
    where
        I: IntoIterator<Item = A>,
    {
        self.arms = Some(arms.into_iter().collect());
        self
    }

    /// Set the policy for the bandit
    pub fn policy(mut self, policy: P) -> Self {
        self.policy = Some(policy);
        self
    }

    /// Build the bandit
    pub fn build(self) -> Result<Bandit<A, P>> {
        let arms = self.arms.ok_or(BanditError::BuilderError {
            message: "Arms not specified".into(),
        })?;

        let policy = self.policy.ok_or(BanditError::BuilderError {
            message: "Policy not specified".into(),
        })?;

        Bandit::new(arms, policy)
    }
}

impl<A, P> Bandit<A, P> {
    /// Create a new builder for constructing a bandit
    pub fn builder() -> BanditBuilder<A, P> {
        BanditBuilder::default()
    }
}
