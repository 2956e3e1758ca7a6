//! Energy compatibility and bucket partitioning.
//!
//! Compatibility is asymmetric rather than a plain ordering test:
//!
//! ```text
//! current \ required | high | medium | low
//! -------------------+------+--------+-----
//! high               |  yes |   yes  | yes
//! medium             |  no  |   yes  | yes
//! low                |  no  |   no   | yes
//! ```

use serde::{Deserialize, Serialize};

use super::EnergyLevel;
use crate::task::{Task, TaskId};

/// Whether a user at `current` energy should be offered a task that
/// requires `required` energy.
pub fn matches(current: EnergyLevel, required: EnergyLevel) -> bool {
    match current {
        EnergyLevel::High => true,
        EnergyLevel::Medium => required != EnergyLevel::High,
        EnergyLevel::Low => required == EnergyLevel::Low,
    }
}

/// One of the three derived categories a task can fall into.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    Matched,
    Later,
    Completed,
}

/// Derived view of the task list for a given energy level.
///
/// Each bucket keeps the store's insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Buckets {
    pub matched: Vec<Task>,
    pub later: Vec<Task>,
    pub completed: Vec<Task>,
}

impl Buckets {
    /// `(matched, later, completed)` sizes.
    pub fn counts(&self) -> (usize, usize, usize) {
        (self.matched.len(), self.later.len(), self.completed.len())
    }

    pub fn total(&self) -> usize {
        self.matched.len() + self.later.len() + self.completed.len()
    }

    /// Which bucket the task with `id` landed in, if any.
    pub fn bucket_of(&self, id: TaskId) -> Option<Bucket> {
        let has = |tasks: &[Task]| tasks.iter().any(|t| t.id == id);
        if has(&self.matched) {
            Some(Bucket::Matched)
        } else if has(&self.later) {
            Some(Bucket::Later)
        } else if has(&self.completed) {
            Some(Bucket::Completed)
        } else {
            None
        }
    }

    /// Ids per bucket, handy for assertions and compact output.
    pub fn ids(&self) -> (Vec<TaskId>, Vec<TaskId>, Vec<TaskId>) {
        let ids = |tasks: &[Task]| tasks.iter().map(|t| t.id).collect::<Vec<_>>();
        (ids(&self.matched), ids(&self.later), ids(&self.completed))
    }
}

/// Stable three-way partition of `tasks` for the user's `current` energy.
pub fn partition<'a, I>(tasks: I, current: EnergyLevel) -> Buckets
where
    I: IntoIterator<Item = &'a Task>,
{
    let mut buckets = Buckets::default();
    for task in tasks {
        let target = if task.completed {
            &mut buckets.completed
        } else if matches(current, task.energy) {
            &mut buckets.matched
        } else {
            &mut buckets.later
        };
        target.push(task.clone());
    }
    buckets
}
