//! Plain-text rendering of the bucket view.

use energytriage_core::{Buckets, EnergyLevel, Task};

fn task_line(task: &Task) -> String {
    let check = if task.completed { "x" } else { " " };
    let kind = if task.task_type.is_empty() {
        String::new()
    } else {
        format!("  [{}]", task.task_type)
    };
    format!(
        "  [{check}] #{:<3} {:<32} {:>4}m  {} energy  {} priority{kind}",
        task.id, task.name, task.estimated_minutes, task.energy, task.priority
    )
}

pub fn buckets(energy: EnergyLevel, buckets: &Buckets) -> String {
    let mut out = format!("Energy: {energy}\n{}\n", energy.guidance());

    out.push_str(&format!(
        "\nMatched to your energy ({} tasks)\n",
        buckets.matched.len()
    ));
    for task in &buckets.matched {
        out.push_str(&task_line(task));
        out.push('\n');
    }

    if !buckets.later.is_empty() {
        out.push_str(&format!(
            "\nSave these for later ({}) - not matched to current energy\n",
            buckets.later.len()
        ));
        for task in &buckets.later {
            out.push_str(&task_line(task));
            out.push('\n');
        }
    }

    if !buckets.completed.is_empty() {
        out.push_str(&format!("\nCompleted ({})\n", buckets.completed.len()));
        for task in &buckets.completed {
            out.push_str(&task_line(task));
            out.push('\n');
        }
    }
    out
}
