//! Line-oriented session driver.
//!
//! Each line is one command against a single in-memory session:
//!
//! ```text
//! add <name> [--energy e] [--priority p] [--minutes n] [--type t]
//! energy <level>
//! tap <id>
//! swipe <id> <dx> [dy]
//! show | list | events
//! ```
//!
//! Blank lines and lines starting with `#` are skipped. A rejected command
//! is reported with its line number and the script continues.

use std::io::{BufRead, BufReader};
use std::path::PathBuf;

use clap::Args;
use energytriage_core::{Config, EnergyLevel, Priority, TaskDraft, TaskId, TriageSession};

use crate::{driver, render};

#[derive(Args)]
pub struct ScriptArgs {
    /// Read commands from this file instead of stdin
    #[arg(long)]
    file: Option<PathBuf>,
    /// Start from an empty task list instead of the demo tasks
    #[arg(long)]
    empty: bool,
    /// Frame length in milliseconds for swipe animations
    #[arg(long, default_value = "16", value_parser = clap::value_parser!(u64).range(1..))]
    frame_ms: u64,
}

type CmdResult = Result<(), Box<dyn std::error::Error>>;

pub fn run(args: ScriptArgs, config: &Config) -> CmdResult {
    let mut config = config.clone();
    if args.empty {
        config.session.seed_sample_tasks = false;
    }
    let mut session = TriageSession::new(&config);

    let reader: Box<dyn BufRead> = match &args.file {
        Some(path) => Box::new(BufReader::new(std::fs::File::open(path)?)),
        None => Box::new(BufReader::new(std::io::stdin())),
    };

    let mut failures = 0usize;
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Err(e) = execute(&mut session, line, args.frame_ms) {
            eprintln!("line {}: {e}", index + 1);
            failures += 1;
        }
    }

    if failures > 0 {
        return Err(format!("{failures} command(s) rejected").into());
    }
    Ok(())
}

fn execute(session: &mut TriageSession, line: &str, frame_ms: u64) -> CmdResult {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let (command, rest) = tokens.split_first().ok_or("empty command")?;

    match *command {
        "add" => {
            let task = session.create_task(parse_add(rest)?)?;
            println!("added #{} {}", task.id, task.name);
        }
        "energy" => {
            let level: EnergyLevel = rest.first().ok_or("usage: energy <level>")?.parse()?;
            session.set_energy(level);
            println!("energy {level}: {}", level.guidance());
        }
        "tap" => {
            let id: TaskId = rest.first().ok_or("usage: tap <id>")?.parse()?;
            let task = session.tap(id)?;
            println!("#{} completed={}", task.id, task.completed);
        }
        "swipe" => {
            let usage = "usage: swipe <id> <dx> [dy]";
            let id: TaskId = rest.first().ok_or(usage)?.parse()?;
            let dx: f64 = rest.get(1).ok_or(usage)?.parse()?;
            let dy: f64 = match rest.get(2) {
                Some(raw) => raw.parse()?,
                None => 0.0,
            };
            let report = driver::swipe(session, id, dx, dy, frame_ms)?;
            println!(
                "swipe #{} {} ({} frames)",
                id,
                if report.committed { "committed" } else { "returned" },
                report.frames
            );
        }
        "show" => print!("{}", render::buckets(session.energy(), &session.buckets())),
        "list" => println!("{}", serde_json::to_string_pretty(&session.list())?),
        "events" => {
            for event in session.drain_events() {
                println!("{}", serde_json::to_string(&event)?);
            }
        }
        other => return Err(format!("unknown command: {other}").into()),
    }
    Ok(())
}

/// Parse `add` arguments. The name is every word before the first flag;
/// a flag's value is every word up to the next flag.
fn parse_add(tokens: &[&str]) -> Result<TaskDraft, Box<dyn std::error::Error>> {
    let name_end = tokens.iter().position(|t| t.starts_with("--")).unwrap_or(tokens.len());
    let mut draft = TaskDraft::named(tokens[..name_end].join(" "));

    let mut rest = &tokens[name_end..];
    while let Some((flag, tail)) = rest.split_first() {
        let value_end = tail.iter().position(|t| t.starts_with("--")).unwrap_or(tail.len());
        let value = tail[..value_end].join(" ");
        rest = &tail[value_end..];

        match *flag {
            "--energy" => draft.energy = value.parse::<EnergyLevel>()?,
            "--priority" => draft.priority = value.parse::<Priority>()?,
            "--minutes" => draft.estimated_minutes = TaskDraft::parse_minutes(&value)?,
            "--type" => draft.task_type = value,
            other => return Err(format!("unknown flag for add: {other}").into()),
        }
    }
    Ok(draft)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_add_splits_name_and_flags() {
        let draft = parse_add(&[
            "Write", "report", "--energy", "high", "--minutes", "45", "--type", "Deep", "focus",
        ])
        .unwrap();
        assert_eq!(draft.name, "Write report");
        assert_eq!(draft.energy, EnergyLevel::High);
        assert_eq!(draft.estimated_minutes, 45);
        assert_eq!(draft.task_type, "Deep focus");
        assert_eq!(draft.priority, Priority::Medium);
    }

    #[test]
    fn parse_add_rejects_bad_minutes() {
        assert!(parse_add(&["x", "--minutes", "-5"]).is_err());
        assert!(parse_add(&["x", "--minutes", "soon"]).is_err());
        assert!(parse_add(&["x", "--colour", "red"]).is_err());
    }

    #[test]
    fn execute_runs_a_small_session() {
        let mut config = Config::default();
        config.session.seed_sample_tasks = false;
        let mut session = TriageSession::new(&config);

        execute(&mut session, "add Reply to emails --energy low", 16).unwrap();
        execute(&mut session, "add Write proposal --energy high", 16).unwrap();
        execute(&mut session, "energy low", 16).unwrap();
        execute(&mut session, "swipe 2 150", 16).unwrap();
        assert!(session.store().get(TaskId(2)).unwrap().completed);

        assert!(execute(&mut session, "tap 999", 16).is_err());
        assert!(execute(&mut session, "add    ", 16).is_err());
        assert!(execute(&mut session, "dance", 16).is_err());
        assert_eq!(session.list().len(), 2);
    }
}
