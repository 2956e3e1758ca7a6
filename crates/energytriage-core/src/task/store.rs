//! In-memory task store.
//!
//! Single owner of the task list. Every successful mutation bumps the
//! revision counter, which is what presentation code watches to know when
//! to re-render. Failed operations leave tasks, revision and outbox as they
//! were.

use chrono::Utc;
use tracing::{debug, info, warn};

use super::{Priority, Task, TaskDraft, TaskId};
use crate::energy::EnergyLevel;
use crate::error::{CoreError, Result, ValidationError};
use crate::events::Event;

#[derive(Debug, Clone)]
pub struct TaskStore {
    tasks: Vec<Task>,
    next_id: u64,
    revision: u64,
    outbox: Vec<Event>,
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskStore {
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            next_id: 1,
            revision: 0,
            outbox: Vec::new(),
        }
    }

    /// Store pre-filled with the demo tasks shown on first launch.
    pub fn with_sample_tasks() -> Self {
        let samples: [(&str, Priority, EnergyLevel, i64, &str, bool); 6] = [
            ("Write client proposal", Priority::High, EnergyLevel::High, 60, "Deep focus", false),
            ("Reply to emails", Priority::Medium, EnergyLevel::Low, 20, "Admin", false),
            ("Review design mockups", Priority::High, EnergyLevel::Medium, 30, "Creative", false),
            ("Organize files", Priority::Low, EnergyLevel::Low, 15, "Admin", false),
            ("Schedule team meeting", Priority::Medium, EnergyLevel::Low, 10, "Admin", false),
            ("Brainstorm campaign ideas", Priority::Medium, EnergyLevel::High, 45, "Creative", true),
        ];

        let mut store = Self::new();
        for (name, priority, energy, minutes, task_type, completed) in samples {
            let draft = TaskDraft {
                name: name.to_string(),
                priority,
                energy,
                estimated_minutes: minutes,
                task_type: task_type.to_string(),
            };
            // Sample drafts are statically valid.
            if let Ok(task) = store.create(draft) {
                if completed {
                    let _ = store.toggle(task.id);
                }
            }
        }
        store.outbox.clear();
        store
    }

    // ── Queries ──────────────────────────────────────────────────────

    /// Snapshot of all tasks in insertion order.
    pub fn list(&self) -> Vec<Task> {
        self.tasks.clone()
    }

    /// Borrowed view of all tasks in insertion order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn contains(&self, id: TaskId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Monotonic counter bumped by every successful create or toggle.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Validate `draft`, append it as a new open task and return it.
    pub fn create(&mut self, draft: TaskDraft) -> Result<Task, ValidationError> {
        let (name, estimated_minutes) = draft.validate()?;

        let id = TaskId(self.next_id);
        self.next_id += 1;

        let task = Task {
            id,
            name,
            priority: draft.priority,
            energy: draft.energy,
            estimated_minutes,
            task_type: draft.task_type,
            completed: false,
            created_at: Utc::now(),
        };
        self.tasks.push(task.clone());
        self.revision += 1;

        info!(task_id = %id, name = %task.name, energy = %task.energy, "task created");
        self.outbox.push(Event::TaskCreated {
            id,
            revision: self.revision,
            at: task.created_at,
        });
        Ok(task)
    }

    /// Flip `completed` on the task with `id` and return the updated task.
    pub fn toggle(&mut self, id: TaskId) -> Result<Task> {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            warn!(task_id = %id, "toggle on unknown task id");
            return Err(CoreError::TaskNotFound(id));
        };

        task.completed = !task.completed;
        let snapshot = task.clone();
        self.revision += 1;

        debug!(task_id = %id, completed = snapshot.completed, revision = self.revision, "task toggled");
        self.outbox.push(Event::TaskToggled {
            id,
            completed: snapshot.completed,
            revision: self.revision,
            at: Utc::now(),
        });
        Ok(snapshot)
    }

    /// Take all events recorded since the last drain.
    pub fn drain_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.outbox)
    }
}
