//! Bucket view of the demo tasks.

use clap::Args;
use energytriage_core::{Config, EnergyLevel, TriageSession};

use crate::render;

#[derive(Args)]
pub struct BucketsArgs {
    /// Current energy: high, medium or low (default from config)
    #[arg(long)]
    energy: Option<EnergyLevel>,
    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
}

pub fn run(args: BucketsArgs, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = TriageSession::new(config);
    if let Some(level) = args.energy {
        session.set_energy(level);
    }

    let buckets = session.buckets();
    if args.json {
        let out = serde_json::json!({
            "energy": session.energy(),
            "guidance": session.energy().guidance(),
            "buckets": buckets,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        print!("{}", render::buckets(session.energy(), &buckets));
    }
    Ok(())
}
