//! Per-arm bookkeeping shared by the policies.

/// Statistics kept for one arm over the lifetime of a run.
///
/// Observed rewards are stored in full; the window is applied when the
/// estimate is recomputed, never by truncating storage.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ArmStatistics {
    pulls: u64,
    total_reward: f64,
    rewards: Vec<f64>,
    estimate: f64,
    discarded: bool,
}

impl ArmStatistics {
    /// Number of feedback calls recorded for this arm.
    pub fn pulls(&self) -> u64 {
        self.pulls
    }

    /// Sum of every reward recorded for this arm.
    pub fn total_reward(&self) -> f64 {
        self.total_reward
    }

    /// All observed rewards, oldest first.
    pub fn rewards(&self) -> &[f64] {
        &self.rewards
    }

    /// The windowed mean computed at the last feedback, or 0.0 before any.
    pub fn estimate(&self) -> f64 {
        self.estimate
    }

    pub fn is_discarded(&self) -> bool {
        self.discarded
    }

    /// Records a reward and recomputes the estimate over the last
    /// `window_size` observations.
    pub(crate) fn record(&mut self, reward: f64, window_size: usize) {
        self.pulls += 1;
        self.total_reward += reward;
        self.rewards.push(reward);
        self.estimate = window_mean(&self.rewards, window_size);
    }

    /// Marks the arm discarded. Returns `false` if it already was.
    pub(crate) fn discard(&mut self) -> bool {
        !std::mem::replace(&mut self.discarded, true)
    }

    pub(crate) fn summary(&self) -> ArmSummary {
        ArmSummary {
            pulls: self.pulls,
            total_reward: self.total_reward,
            estimate: self.estimate,
            discarded: self.discarded,
        }
    }
}

/// Mean of the last `window_size` entries of `rewards` (all of them if fewer).
///
/// Returns 0.0 for an empty slice.
pub fn window_mean(rewards: &[f64], window_size: usize) -> f64 {
    let lower = rewards.len().saturating_sub(window_size);
    let window = &rewards[lower..];
    if window.is_empty() {
        return 0.0;
    }
    window.iter().sum::<f64>() / window.len() as f64
}

/// Policy-independent snapshot of one arm, used for reporting.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArmSummary {
    pub pulls: u64,
    pub total_reward: f64,
    pub estimate: f64,
    pub discarded: bool,
}
