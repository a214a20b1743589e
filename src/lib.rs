//! bandit-sim: a multi-armed bandit learner and the simulator that trains it.
//!
//! The default policy is epsilon-greedy over sliding-window estimates:
//! every arm is pulled once, then the exploration rate decays as
//! `1 / (1 + n)` and the best windowed mean is exploited. Arms that keep
//! paying below a floor are dropped from random exploration for good.
//! A Beta-Bernoulli [`ThompsonSampling`](policies::ThompsonSampling) policy
//! plugs in behind the same [`Policy`] trait.
//!
//! All randomness is passed in explicitly, so runs are reproducible from a seed.
//!
//! # Quick Start
//!
//! ```
//! use bandit_sim::Bandit;
//! use rand::SeedableRng;
//!
//! let mut bandit = Bandit::sliding_window(vec!["red", "blue", "green"], 0.1).unwrap();
//! let mut rng = rand::rngs::StdRng::seed_from_u64(42);
//!
//! // The first three picks visit every arm in order
//! for expected in ["red", "blue", "green"] {
//!     let arm = bandit.select_arm(&mut rng).unwrap();
//!     assert_eq!(arm, expected);
//!     bandit.record_feedback(&arm, 0.5).unwrap();
//! }
//! ```
//!
//! # Simulation
//!
//! ```
//! use bandit_sim::{Bandit, simulate};
//!
//! let mut bandit = Bandit::sliding_window(0..6usize, 0.1).unwrap();
//! let report = simulate(&mut bandit, 1_000, 7).unwrap();
//! assert_eq!(report.frequencies.iter().sum::<u64>(), 1_000);
//! ```

mod arm;
mod bandit;
pub mod config;
mod error;
pub mod policies;
mod policy;
pub mod reward;
pub mod simulation;
mod stats;

// Re-export main types
pub use arm::Arm;
pub use bandit::{Bandit, BanditBuilder};
pub use error::{BanditError, Result};
pub use policy::Policy;
pub use simulation::{SimulationReport, Simulator, simulate};
pub use stats::{ArmStatistics, ArmSummary, window_mean};

/// Prelude module for convenient imports.
///
/// # Examples
///
/// ```
/// use bandit_sim::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::{PolicyConfig, SimulationConfig};
    pub use crate::policies::{
        ExhaustionFallback, SlidingWindowConfig, SlidingWindowGreedy, ThompsonSampling,
    };
    pub use crate::reward::{LandscapeConfig, RewardLandscape, RewardModel, generate_reward};
    pub use crate::{
        Arm, Bandit, BanditError, Policy, Result, SimulationReport, Simulator, simulate,
    };
}
