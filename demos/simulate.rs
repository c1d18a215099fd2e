//! Non-interactive run of both policies against simulated users.

use banditry::{identity_reward, run_rounds, EpsilonGreedy, ThompsonSampling};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), banditry::BanditError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Mean seconds on page per image set.
    let stickiness = [
        ("dog images", 22.0),
        ("cat images", 35.0),
        ("horse images", 12.0),
        ("goat images", 18.0),
    ];
    let mut env = StdRng::seed_from_u64(123);
    let mut egb = EpsilonGreedy::with_seed(0.7, stickiness.iter().map(|(id, _)| *id), 0)?;
    let summary = run_rounds(&mut egb, 1_000, |arm| {
        let mean = stickiness.iter().find(|(id, _)| *id == arm)?.1;
        Some((mean + env.random_range(-10.0_f64..10.0)).max(0.0))
    })?;
    println!("epsilon-greedy pulls: {:?}", summary.pulls);
    print!("{}", egb.report());

    // Conversion rate per button.
    let conversion = [
        ("red button", 0.04),
        ("yellow button", 0.06),
        ("green button", 0.10),
    ];
    let mut tsb = ThompsonSampling::with_seed(conversion.iter().map(|(id, _)| *id), identity_reward, 0)?;
    let summary = run_rounds(&mut tsb, 1_000, |arm| {
        let p = conversion.iter().find(|(id, _)| *id == arm)?.1;
        Some(if env.random::<f64>() < p { 1 } else { -1 })
    })?;
    println!("thompson pulls: {:?}", summary.pulls);
    print!("{}", tsb.report());
    Ok(())
}
