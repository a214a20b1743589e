//! Runs the six-arm benchmark-then-learn simulation and prints the report.
//!
//! Usage:
//! ```
//! cargo run --example simulate -- --iterations 10000 --seed 7
//! RUST_LOG=bandit_sim=debug cargo run --example simulate -- --policy thompson
//! ```

use bandit_sim::prelude::*;
use clap::{Parser, ValueEnum};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PolicyKind {
    SlidingWindow,
    Thompson,
}

#[derive(Parser)]
#[command(name = "simulate", about = "Multi-armed bandit reward simulation")]
struct Cli {
    /// Benchmark rounds and learning trials
    #[arg(long, default_value = "10000")]
    iterations: usize,

    /// Seed for the reward environment
    #[arg(long, default_value = "0")]
    seed: u64,

    /// Seed for arm selection (defaults to seed + 1)
    #[arg(long)]
    policy_seed: Option<u64>,

    #[arg(long, value_enum, default_value = "sliding-window")]
    policy: PolicyKind,

    /// Initial exploration rate for the sliding-window policy
    #[arg(long, default_value = "0.1")]
    epsilon: f64,

    /// Rewards averaged into each arm's estimate
    #[arg(long, default_value = "25")]
    window: usize,

    /// Standard deviation of Gaussian reward noise
    #[arg(long, default_value = "0.0")]
    noise: f64,

    /// Error out instead of exploiting once every arm is discarded
    #[arg(long)]
    fail_when_exhausted: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let policy = match cli.policy {
        PolicyKind::SlidingWindow => PolicyConfig::SlidingWindow {
            epsilon: cli.epsilon,
            tuning: SlidingWindowConfig {
                window_size: cli.window,
                exhaustion: if cli.fail_when_exhausted {
                    ExhaustionFallback::Fail
                } else {
                    ExhaustionFallback::Exploit
                },
                ..Default::default()
            },
        },
        PolicyKind::Thompson => PolicyConfig::Thompson {
            prior_alpha: 1.0,
            prior_beta: 1.0,
        },
    };

    let config = SimulationConfig {
        iterations: cli.iterations,
        reward_model: RewardModel {
            noise_std_dev: cli.noise,
            ..RewardModel::default()
        },
        ..SimulationConfig::default()
    };

    if let Err(e) = run(&policy, config, cli.seed, cli.policy_seed.unwrap_or(cli.seed.wrapping_add(1))) {
        eprintln!("simulation failed: {e}");
        std::process::exit(1);
    }
}

fn run(policy: &PolicyConfig, config: SimulationConfig, seed: u64, policy_seed: u64) -> Result<()> {
    let n_arms = config.landscape.n_arms();
    let simulator = Simulator::new(config)?;
    let mut bandit = Bandit::from_config(Arm::indices(n_arms), policy)?;
    let mut env_rng = StdRng::seed_from_u64(seed);
    let mut policy_rng = StdRng::seed_from_u64(policy_seed);

    println!("=== {} bandit ===\n", policy.name());
    let report = simulator.run(&mut bandit, &mut env_rng, &mut policy_rng)?;
    println!("{report}");

    if let Some(share) = report.best_arm_share() {
        println!("Best arm share: {:.1}%", share * 100.0);
    }
    Ok(())
}
