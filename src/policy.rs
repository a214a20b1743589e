//! Policy trait definition for multi-armed bandit algorithms

use crate::error::Result;
use crate::stats::ArmSummary;

/// Core trait for bandit learning policies
///
/// Policies work on arm indices. The owning [`Bandit`](crate::Bandit) maps
/// caller arms to indices, sizes the policy through [`Policy::reset`] and
/// validates indices before calling [`Policy::update`].
///
/// The trait takes `dyn rand::RngCore` rather than a generic parameter to stay
/// object-safe, so `Box<dyn Policy>` can be picked at runtime from a
/// [`PolicyConfig`](crate::config::PolicyConfig).
pub trait Policy: Send {
    /// Size per-arm state for `n_arms` arms, discarding everything learned so far
    fn reset(&mut self, n_arms: usize);

    /// Select the index of the next arm to pull
    ///
    /// Selection may update internal schedules (e.g. the exploration rate),
    /// hence `&mut self`.
    fn select(&mut self, rng: &mut dyn rand::RngCore) -> Result<usize>;

    /// Record the reward observed for the arm at `arm`
    ///
    /// Fails with [`BanditError::InvalidArm`](crate::BanditError::InvalidArm)
    /// when `arm` is not below the size given to [`Policy::reset`].
    fn update(&mut self, arm: usize, reward: f64) -> Result<()>;

    /// Current value estimate for each arm, in index order
    fn expectations(&self) -> Vec<f64>;

    /// Reporting snapshot for each arm, in index order
    fn arm_summaries(&self) -> Vec<ArmSummary>;
}

impl Policy for Box<dyn Policy> {
    fn reset(&mut self, n_arms: usize) {
        (**self).reset(n_arms)
    }

    fn select(&mut self, rng: &mut dyn rand::RngCore) -> Result<usize> {
        (**self).select(rng)
    }

    fn update(&mut self, arm: usize, reward: f64) -> Result<()> {
        (**self).update(arm, reward)
    }

    fn expectations(&self) -> Vec<f64> {
        (**self).expectations()
    }

    fn arm_summaries(&self) -> Vec<ArmSummary> {
        (**self).arm_summaries()
    }
}
