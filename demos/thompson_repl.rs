//! Interactive Thompson-sampling loop over button variants.
//!
//! Enter `1` for a conversion, `-1` otherwise, `-69` to quit.

use std::io::{self, BufRead, Write};

use banditry::{identity_reward, ThompsonSampling};
use tracing_subscriber::EnvFilter;

const EXIT: i64 = -69;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(0);
    let variants = ["red button", "yellow button", "green button"];
    let mut tsb = ThompsonSampling::with_seed(variants, identity_reward, seed)?;

    println!("Enter {EXIT} to exit");
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        let variant = tsb.select()?;
        println!("\nVariant picked by bandit: {variant}\n");
        print!("Enter 1 to simulate a conversion and -1 otherwise: ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else { break };
        let observation: i64 = match line?.trim().parse() {
            Ok(v) => v,
            Err(_) => {
                println!("Not an integer, skipping this round.");
                continue;
            }
        };
        if observation == EXIT {
            break;
        }
        tsb.record_observation(&variant, observation);
        print!("\x1b[2J\x1b[H");
        print!("{}", tsb.report());
    }
    Ok(())
}
