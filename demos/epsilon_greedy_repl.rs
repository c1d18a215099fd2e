//! Interactive epsilon-greedy loop: which landing-page images keep users around?
//!
//! Each round the bandit picks an image set; type how many seconds the user stayed.
//! Enter `-1` to quit. `RUST_LOG=debug` shows explore/exploit decisions.

use std::io::{self, BufRead, Write};

use banditry::EpsilonGreedy;
use tracing_subscriber::EnvFilter;

const EXIT: f64 = -1.0;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(0);
    let groups = ["dog images", "cat images", "horse images", "goat images"];
    let mut egb = EpsilonGreedy::with_seed(0.3, groups, seed)?;

    println!("Interactively see how epsilon-greedy bandits trade off explore and exploit");
    println!("Enter {EXIT} as the time on page to exit\n");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("{}", egb.report());
        let group = egb.select()?;
        println!("Bandit selected {group}!");
        print!("How many seconds did the user spend on the page? ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else { break };
        let seconds: f64 = match line?.trim().parse() {
            Ok(v) => v,
            Err(_) => {
                println!("Not a number, skipping this round.");
                continue;
            }
        };
        if seconds == EXIT {
            break;
        }
        egb.record_observation(&group, seconds);
        print!("\x1b[2J\x1b[H");
    }
    Ok(())
}
