//! Stochastic reward generation.
//!
//! Nothing here holds state: every function takes the random source it needs,
//! so rewards can be drawn from any thread as long as each has its own RNG.

use crate::error::{BanditError, Result};
use rand::Rng;
use rand_distr::{Distribution, Normal};

/// Draws a reward for `arm` with the default model: the arm's expected reward
/// plus a uniform bonus in `[0, 0.5)`.
pub fn generate_reward(arm: usize, expected: &[f64], rng: &mut dyn rand::RngCore) -> Result<f64> {
    RewardModel::default().sample(arm, expected, rng)
}

/// Noise added on top of an arm's expected reward.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RewardModel {
    /// Standard deviation of zero-mean Gaussian noise. 0 disables it.
    pub noise_std_dev: f64,
    /// Upper bound of the uniform bonus drawn from `[0, uniform_bonus)`.
    pub uniform_bonus: f64,
}

impl Default for RewardModel {
    fn default() -> Self {
        Self {
            noise_std_dev: 0.0,
            uniform_bonus: 0.5,
        }
    }
}

impl RewardModel {
    pub fn with_noise(noise_std_dev: f64) -> Result<Self> {
        let model = Self {
            noise_std_dev,
            ..Self::default()
        };
        model.validate()?;
        Ok(model)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.noise_std_dev.is_finite() || self.noise_std_dev < 0.0 {
            return Err(BanditError::invalid_parameter(
                "noise_std_dev must be finite and non-negative",
            ));
        }
        if !self.uniform_bonus.is_finite() || self.uniform_bonus < 0.0 {
            return Err(BanditError::invalid_parameter(
                "uniform_bonus must be finite and non-negative",
            ));
        }
        Ok(())
    }

    /// Draws one reward for `arm` given per-arm expected rewards.
    pub fn sample(&self, arm: usize, expected: &[f64], rng: &mut dyn rand::RngCore) -> Result<f64> {
        let mean = *expected.get(arm).ok_or_else(|| BanditError::invalid_arm(arm))?;

        let noise = if self.noise_std_dev > 0.0 {
            Normal::new(0.0, self.noise_std_dev)
                .map_err(|e| BanditError::invalid_parameter(e.to_string()))?
                .sample(rng)
        } else {
            0.0
        };

        Ok(mean + noise + rng.random::<f64>() * self.uniform_bonus)
    }
}

/// Shape of the expected-reward landscape regenerated each benchmark round.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LandscapeConfig {
    /// Arms drawn from `[base, base + spread)`.
    pub normal_arms: usize,
    pub base: f64,
    pub spread: f64,
    /// Fixed expected rewards appended after the normal arms.
    pub penalty_arms: Vec<f64>,
    /// Every entry `r` is shifted by `(u - 0.5) * r * perturbation`, `u ~ U[0, 1)`.
    pub perturbation: f64,
}

impl Default for LandscapeConfig {
    fn default() -> Self {
        Self {
            normal_arms: 4,
            base: 1.0,
            spread: 0.5,
            penalty_arms: vec![-5.0, -10.0],
            perturbation: 0.75,
        }
    }
}

impl LandscapeConfig {
    /// Number of arms a landscape of this shape covers.
    pub fn n_arms(&self) -> usize {
        self.normal_arms + self.penalty_arms.len()
    }
}

/// One draw of per-arm expected rewards.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RewardLandscape {
    expected: Vec<f64>,
}

impl RewardLandscape {
    /// Wraps explicit expected rewards, one per arm.
    pub fn new(expected: Vec<f64>) -> Self {
        Self { expected }
    }

    pub fn sample(config: &LandscapeConfig, rng: &mut dyn rand::RngCore) -> Self {
        let mut expected: Vec<f64> = (0..config.normal_arms)
            .map(|_| config.base + rng.random::<f64>() * config.spread)
            .collect();
        expected.extend_from_slice(&config.penalty_arms);

        for reward in expected.iter_mut() {
            *reward += (rng.random::<f64>() - 0.5) * *reward * config.perturbation;
        }

        Self { expected }
    }

    pub fn expected(&self) -> &[f64] {
        &self.expected
    }

    pub fn len(&self) -> usize {
        self.expected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expected.is_empty()
    }

    /// Index of the arm with the highest expected reward.
    pub fn best_arm(&self) -> Option<usize> {
        self.expected
            .iter()
            .enumerate()
            .fold(None, |best: Option<(usize, f64)>, (i, &r)| match best {
                Some((_, top)) if r <= top => best,
                _ => Some((i, r)),
            })
            .map(|(i, _)| i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_reward_within_uniform_band() {
        let mut rng = StdRng::seed_from_u64(42);
        let expected = [1.0, -5.0];
        for _ in 0..1000 {
            let r = generate_reward(0, &expected, &mut rng).unwrap();
            assert!((1.0..1.5).contains(&r));
            let r = generate_reward(1, &expected, &mut rng).unwrap();
            assert!((-5.0..-4.5).contains(&r));
        }
    }

    #[test]
    fn test_reward_rejects_unknown_arm() {
        let mut rng = StdRng::seed_from_u64(42);
        assert!(matches!(
            generate_reward(2, &[1.0, 2.0], &mut rng),
            Err(BanditError::InvalidArm { .. })
        ));
    }

    #[test]
    fn test_reward_is_reproducible_per_seed() {
        let expected = [0.3, 0.6, 0.9];
        let draw = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            (0..3)
                .map(|arm| generate_reward(arm, &expected, &mut rng).unwrap())
                .collect::<Vec<_>>()
        };
        assert_eq!(draw(5), draw(5));
        assert_ne!(draw(5), draw(6));
    }

    #[test]
    fn test_gaussian_noise_spreads_rewards() {
        let model = RewardModel::with_noise(2.0).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let samples: Vec<f64> = (0..2000)
            .map(|_| model.sample(0, &[0.0], &mut rng).unwrap())
            .collect();
        let mean = samples.iter().sum::<f64>() / samples.len() as f64;
        assert!((mean - 0.25).abs() < 0.2, "mean was {mean}");
        assert!(samples.iter().any(|&r| !(0.0..0.5).contains(&r)));
    }

    #[test]
    fn test_invalid_noise_rejected() {
        assert!(RewardModel::with_noise(-1.0).is_err());
        assert!(RewardModel::with_noise(f64::INFINITY).is_err());
    }

    #[test]
    fn test_default_landscape_shape() {
        let config = LandscapeConfig::default();
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..500 {
            let landscape = RewardLandscape::sample(&config, &mut rng);
            assert_eq!(landscape.len(), 6);
            let expected = landscape.expected();
            // base in [1, 1.5) shifted by at most 37.5%
            for &r in &expected[..4] {
                assert!(r >= 1.0 * 0.625 && r < 1.5 * 1.375, "normal arm {r}");
            }
            assert!(expected[4] <= -5.0 * 0.625 && expected[4] >= -5.0 * 1.375);
            assert!(expected[5] <= -10.0 * 0.625 && expected[5] >= -10.0 * 1.375);
            assert!(landscape.best_arm().unwrap() < 4);
        }
    }

    #[test]
    fn test_best_arm_prefers_first_maximum() {
        let landscape = RewardLandscape::new(vec![0.5, 2.0, 2.0, -1.0]);
        assert_eq!(landscape.best_arm(), Some(1));
        assert_eq!(RewardLandscape::new(vec![]).best_arm(), None);
    }
}
