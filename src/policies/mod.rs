//! Arm-selection strategies.
//!
//! [`SlidingWindowGreedy`] is the default learner. [`ThompsonSampling`] is a
//! Bayesian alternative behind the same [`Policy`](crate::Policy) contract.

mod sliding_window;
mod thompson;

pub use sliding_window::{
    ExhaustionFallback, SlidingWindowConfig, SlidingWindowGreedy, decayed_exploration_rate,
};
pub use thompson::ThompsonSampling;
