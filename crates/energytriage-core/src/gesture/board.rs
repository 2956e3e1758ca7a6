//! Registry of per-task swipe engines.
//!
//! Engines are created on press and dropped once they are back at rest, so
//! the board only ever holds gestures that are in flight. Gestures on
//! different tasks never share state.

use std::collections::BTreeMap;

use tracing::debug;

use super::engine::{Effect, SwipeEngine, SwipePhase};
use crate::config::GestureConfig;
use crate::task::TaskId;

#[derive(Debug, Clone, Default)]
pub struct GestureBoard {
    config: GestureConfig,
    engines: BTreeMap<TaskId, SwipeEngine>,
}

impl GestureBoard {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            engines: BTreeMap::new(),
        }
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    pub fn engine(&self, id: TaskId) -> Option<&SwipeEngine> {
        self.engines.get(&id)
    }

    /// Phase for `id`; tasks without a live engine are idle.
    pub fn phase(&self, id: TaskId) -> SwipePhase {
        self.engines.get(&id).map(|e| e.phase()).unwrap_or(SwipePhase::Idle)
    }

    pub fn offset(&self, id: TaskId) -> f64 {
        self.engines.get(&id).map(|e| e.offset()).unwrap_or(0.0)
    }

    /// Number of gestures in flight.
    pub fn active_count(&self) -> usize {
        self.engines.len()
    }

    pub fn active_ids(&self) -> Vec<TaskId> {
        self.engines.keys().copied().collect()
    }

    pub fn press(&mut self, id: TaskId) -> Vec<Effect> {
        let config = &self.config;
        let engine = self
            .engines
            .entry(id)
            .or_insert_with(|| SwipeEngine::new(id, config.clone()));
        let effects = engine.press();
        self.prune(id);
        effects
    }

    pub fn drag(&mut self, id: TaskId, dx: f64, dy: f64) -> Vec<Effect> {
        self.with_engine(id, |e| e.drag(dx, dy))
    }

    pub fn release(&mut self, id: TaskId) -> Vec<Effect> {
        self.with_engine(id, |e| e.release())
    }

    pub fn abandon(&mut self, id: TaskId) -> Vec<Effect> {
        self.with_engine(id, |e| e.abandon())
    }

    /// Advance every running animation by `dt_ms`.
    pub fn tick(&mut self, dt_ms: u64) -> Vec<(TaskId, Effect)> {
        let mut out = Vec::new();
        for (id, engine) in self.engines.iter_mut() {
            out.extend(engine.tick(dt_ms).into_iter().map(|e| (*id, e)));
        }
        self.engines.retain(|_, e| !e.is_at_rest());
        out
    }

    /// Abandon gestures on tasks that are not in `visible`.
    pub fn retain_visible(&mut self, visible: &[TaskId]) -> Vec<(TaskId, Effect)> {
        let gone: Vec<TaskId> = self
            .engines
            .keys()
            .filter(|id| !visible.contains(id))
            .copied()
            .collect();

        let mut out = Vec::new();
        for id in gone {
            debug!(task_id = %id, "abandoning gesture on hidden task");
            out.extend(self.abandon(id).into_iter().map(|e| (id, e)));
        }
        out
    }

    fn with_engine<F>(&mut self, id: TaskId, f: F) -> Vec<Effect>
    where
        F: FnOnce(&mut SwipeEngine) -> Vec<Effect>,
    {
        let Some(engine) = self.engines.get_mut(&id) else {
            return Vec::new();
        };
        let effects = f(engine);
        self.prune(id);
        effects
    }

    fn prune(&mut self, id: TaskId) {
        if self.engines.get(&id).is_some_and(|e| e.is_at_rest()) {
            self.engines.remove(&id);
        }
    }
}
