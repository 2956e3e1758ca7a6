//! Swipe simulation on the demo tasks.

use clap::Args;
use energytriage_core::{Config, EnergyLevel, TaskId, TriageSession};

use crate::{driver, render};

#[derive(Args)]
pub struct SwipeArgs {
    /// Task ID to swipe
    #[arg(long)]
    task: TaskId,
    /// Horizontal travel; negative swipes left
    #[arg(long, allow_negative_numbers = true)]
    dx: f64,
    /// Vertical travel
    #[arg(long, default_value = "0", allow_negative_numbers = true)]
    dy: f64,
    /// Current energy: high, medium or low (default from config)
    #[arg(long)]
    energy: Option<EnergyLevel>,
    /// Frame length in milliseconds
    #[arg(long, default_value = "16", value_parser = clap::value_parser!(u64).range(1..))]
    frame_ms: u64,
    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
}

pub fn run(args: SwipeArgs, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = TriageSession::new(config);
    if let Some(level) = args.energy {
        session.set_energy(level);
    }

    let report = driver::swipe(&mut session, args.task, args.dx, args.dy, args.frame_ms)?;
    let buckets = session.buckets();

    if args.json {
        let out = serde_json::json!({
            "swipe": report,
            "bucket": buckets.bucket_of(args.task),
            "buckets": buckets,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    let trace: Vec<String> = report
        .phases
        .iter()
        .map(|p| format!("{p:?}").to_lowercase())
        .collect();
    println!("Swipe #{} dx={} dy={}", report.task_id, report.dx, report.dy);
    println!("  phases: {}", trace.join(" -> "));
    println!(
        "  {} after {} frames",
        if report.committed { "committed" } else { "not committed" },
        report.frames
    );
    println!();
    print!("{}", render::buckets(session.energy(), &buckets));
    Ok(())
}
