use approx::assert_relative_eq;
use bandit_sim::policies::{SlidingWindowConfig, SlidingWindowGreedy};
use bandit_sim::{Bandit, BanditError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[test]
fn test_three_arm_scenario() {
    let arms = vec!["A", "B", "C"];
    let mut bandit = Bandit::sliding_window(arms.clone(), 0.1).unwrap();
    let mut rng = StdRng::seed_from_u64(2024);

    // Forced exploration visits the arms in order, whatever they pay
    for (expected, reward) in arms.iter().zip([1.0, 0.0, 0.5]) {
        let arm = bandit.select_arm(&mut rng).unwrap();
        assert_eq!(&arm, expected);
        bandit.record_feedback(&arm, reward).unwrap();
    }

    // Forced exploration draws nothing from the RNG, so a clone replays the
    // fourth call's coin flip and, if it explores, its pick.
    let mut lookahead = rng.clone();
    let expected = if lookahead.random::<f64>() < 0.25 {
        arms[lookahead.random_range(0..arms.len())]
    } else {
        "A"
    };

    let fourth = bandit.select_arm(&mut rng).unwrap();
    assert_eq!(fourth, expected);
    assert_relative_eq!(bandit.policy().exploration_rate(), 0.25);
}

#[test]
fn test_fourth_pick_is_greedy_without_exploration_roll() {
    // Find a seed whose first draw lands on the exploitation branch
    let seed = (0..100u64)
        .find(|&s| StdRng::seed_from_u64(s).random::<f64>() >= 0.25)
        .unwrap();

    let mut bandit = Bandit::sliding_window(vec!["A", "B", "C"], 0.1).unwrap();
    bandit.fit(&["A", "B", "C"], &[1.0, 0.0, 0.5]).unwrap();

    let mut rng = StdRng::seed_from_u64(seed);
    assert_eq!(bandit.select_arm(&mut rng).unwrap(), "A");
}

#[test]
fn test_discard_trigger_at_eleventh_pull() {
    let mut bandit = Bandit::sliding_window(vec!["bad", "good"], 0.1).unwrap();
    let mut rng = StdRng::seed_from_u64(0);

    let first = bandit.select_arm(&mut rng).unwrap();
    assert_eq!(first, "bad");
    bandit.record_feedback(&first, 0.05).unwrap();

    for pull in 2..=11u64 {
        assert!(!bandit.policy().is_discarded(0));
        bandit.record_feedback(&"bad", 0.05).unwrap();
        let stats = bandit.policy().arm_statistics(0).unwrap();
        assert_eq!(stats.pulls(), pull);
        assert_eq!(stats.is_discarded(), pull > 10);
    }
    assert_eq!(bandit.policy().discarded_arms(), &[0]);
}

#[test]
fn test_window_mean_tracks_recent_rewards() {
    let mut bandit = Bandit::sliding_window(vec![0usize], 0.1).unwrap();
    for _ in 0..25 {
        bandit.record_feedback(&0, 0.0).unwrap();
    }
    for _ in 0..25 {
        bandit.record_feedback(&0, 2.0).unwrap();
    }

    let stats = bandit.policy().arm_statistics(0).unwrap();
    assert_relative_eq!(stats.estimate(), 2.0);
    assert_eq!(stats.rewards().len(), 50);
    assert_relative_eq!(stats.total_reward(), 50.0);
}

#[test]
fn test_discarded_arm_still_exploitable() {
    // An arm that dips below the floor stays discarded after it recovers and
    // can still win exploitation.
    let mut bandit = Bandit::sliding_window(vec!["x", "y"], 0.0).unwrap();
    for _ in 0..11 {
        bandit.record_feedback(&"x", 0.0).unwrap();
    }
    bandit.record_feedback(&"y", 0.5).unwrap();
    for _ in 0..25 {
        bandit.record_feedback(&"x", 3.0).unwrap();
    }
    assert!(bandit.policy().is_discarded(0));

    let mut rng = StdRng::seed_from_u64(1);
    let picks = (0..100)
        .filter(|_| bandit.select_arm(&mut rng).unwrap() == "x")
        .count();
    assert!(picks >= 85, "x picked {picks} times");
}

#[test]
fn test_custom_window_and_floor() {
    let config = SlidingWindowConfig {
        window_size: 3,
        discard_floor: 1.0,
        min_pulls_before_discard: 2,
        ..Default::default()
    };
    let policy = SlidingWindowGreedy::with_config(0.2, config).unwrap();
    let mut bandit = Bandit::new(vec![1, 2], policy).unwrap();

    bandit.fit(&[1, 1, 1, 1], &[5.0, 0.0, 0.5, 0.5]).unwrap();
    let stats = bandit.policy().arm_statistics(0).unwrap();
    assert_relative_eq!(stats.estimate(), 1.0 / 3.0);
    assert!(stats.is_discarded());
}

#[test]
fn test_invalid_arm_is_reported() {
    let mut bandit = Bandit::sliding_window(vec!["A", "B"], 0.1).unwrap();
    match bandit.record_feedback(&"C", 1.0) {
        Err(BanditError::InvalidArm { arm }) => assert!(arm.contains('C')),
        other => panic!("unexpected result: {other:?}"),
    }
}
