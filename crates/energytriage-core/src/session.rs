//! Triage session: the surface presentation code talks to.
//!
//! Owns the task store, the current energy selection and the gesture
//! board, and routes gesture effects into store mutations. Everything runs
//! on the caller's thread; animations only progress when `tick` is called.
//!
//! ## Usage
//!
//! ```ignore
//! let mut session = TriageSession::new(&Config::default());
//! session.press(id)?;
//! session.drag(id, 150.0, 0.0);
//! session.release(id);
//! // Once per frame:
//! session.tick(16)?;
//! let buckets = session.buckets();
//! ```

use chrono::Utc;
use tracing::{debug, info};

use crate::config::{Config, GestureConfig};
use crate::energy::{partition, Buckets, EnergyLevel};
use crate::error::{CoreError, Result, ValidationError};
use crate::events::Event;
use crate::gesture::{Effect, GestureBoard, SwipePhase};
use crate::task::{Task, TaskDraft, TaskId, TaskStore};

#[derive(Debug, Clone)]
pub struct TriageSession {
    store: TaskStore,
    energy: EnergyLevel,
    board: GestureBoard,
    outbox: Vec<Event>,
}

impl Default for TriageSession {
    fn default() -> Self {
        Self::with_store(TaskStore::new(), EnergyLevel::default(), GestureConfig::default())
    }
}

impl TriageSession {
    /// Session built from configuration, seeded with the demo tasks when
    /// `session.seed_sample_tasks` is set.
    pub fn new(config: &Config) -> Self {
        let store = if config.session.seed_sample_tasks {
            TaskStore::with_sample_tasks()
        } else {
            TaskStore::new()
        };
        Self::with_store(store, config.session.default_energy, config.gesture.clone())
    }

    pub fn with_store(store: TaskStore, energy: EnergyLevel, gesture: GestureConfig) -> Self {
        Self {
            store,
            energy,
            board: GestureBoard::new(gesture),
            outbox: Vec::new(),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn energy(&self) -> EnergyLevel {
        self.energy
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn list(&self) -> Vec<Task> {
        self.store.list()
    }

    pub fn revision(&self) -> u64 {
        self.store.revision()
    }

    /// Recompute the bucket view from the current store and energy.
    pub fn buckets(&self) -> Buckets {
        partition(self.store.tasks(), self.energy)
    }

    pub fn gesture_phase(&self, id: TaskId) -> SwipePhase {
        self.board.phase(id)
    }

    pub fn gesture_offset(&self, id: TaskId) -> f64 {
        self.board.offset(id)
    }

    pub fn active_gestures(&self) -> usize {
        self.board.active_count()
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn create_task(&mut self, draft: TaskDraft) -> Result<Task, ValidationError> {
        let task = self.store.create(draft)?;
        self.collect_store_events();
        Ok(task)
    }

    /// Discrete toggle from the checkbox. Any gesture on the same task is
    /// dropped since its card moves to another bucket.
    pub fn tap(&mut self, id: TaskId) -> Result<Task> {
        let task = self.store.toggle(id)?;
        self.collect_store_events();
        let effects = self.board.abandon(id);
        self.record_gesture_effects(id, &effects);
        Ok(task)
    }

    /// Change the energy selection. Gestures on tasks that change bucket
    /// are abandoned.
    pub fn set_energy(&mut self, level: EnergyLevel) {
        if level == self.energy {
            return;
        }
        let before = self.buckets();
        let from = self.energy;
        self.energy = level;
        let after = self.buckets();

        info!(%from, to = %level, "energy changed");
        self.outbox.push(Event::EnergyChanged {
            from,
            to: level,
            at: Utc::now(),
        });

        for id in self.board.active_ids() {
            if before.bucket_of(id) != after.bucket_of(id) {
                let effects = self.board.abandon(id);
                self.record_gesture_effects(id, &effects);
            }
        }
    }

    pub fn press(&mut self, id: TaskId) -> Result<Vec<Effect>> {
        if !self.store.contains(id) {
            return Err(CoreError::TaskNotFound(id));
        }
        Ok(self.board.press(id))
    }

    pub fn drag(&mut self, id: TaskId, dx: f64, dy: f64) -> Vec<Effect> {
        self.board.drag(id, dx, dy)
    }

    pub fn release(&mut self, id: TaskId) -> Vec<Effect> {
        self.board.release(id)
    }

    /// Abandon gestures on tasks outside `visible`, e.g. after the list was
    /// filtered or scrolled.
    pub fn retain_visible(&mut self, visible: &[TaskId]) -> Vec<(TaskId, Effect)> {
        let effects = self.board.retain_visible(visible);
        for (id, effect) in &effects {
            self.record_gesture_effects(*id, std::slice::from_ref(effect));
        }
        effects
    }

    /// Advance running animations. Commits are applied to the store before
    /// this returns, so the next `buckets()` sees them.
    pub fn tick(&mut self, dt_ms: u64) -> Result<Vec<(TaskId, Effect)>> {
        let effects = self.board.tick(dt_ms);
        for (id, effect) in &effects {
            if let Effect::Commit { .. } = effect {
                self.store.toggle(*id)?;
                self.collect_store_events();
            }
            self.record_gesture_effects(*id, std::slice::from_ref(effect));
        }
        Ok(effects)
    }

    /// Take all events recorded since the last drain, oldest first.
    pub fn drain_events(&mut self) -> Vec<Event> {
        self.collect_store_events();
        std::mem::take(&mut self.outbox)
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn collect_store_events(&mut self) {
        self.outbox.extend(self.store.drain_events());
    }

    fn record_gesture_effects(&mut self, id: TaskId, effects: &[Effect]) {
        for effect in effects {
            let event = match effect {
                Effect::Commit { direction } => {
                    info!(task_id = %id, ?direction, "swipe committed");
                    Event::GestureCommitted {
                        id,
                        direction: *direction,
                        at: Utc::now(),
                    }
                }
                Effect::Settled => {
                    debug!(task_id = %id, "swipe settled");
                    Event::GestureSettled { id, at: Utc::now() }
                }
                Effect::Abandoned => {
                    debug!(task_id = %id, "swipe abandoned");
                    Event::GestureAbandoned { id, at: Utc::now() }
                }
                Effect::Offset { .. } | Effect::Phase { .. } => continue,
            };
            self.outbox.push(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> TriageSession {
        TriageSession::new(&Config::default())
    }

    fn run_frames(session: &mut TriageSession) -> Vec<(TaskId, Effect)> {
        let mut out = Vec::new();
        for _ in 0..500 {
            if session.active_gestures() == 0 {
                break;
            }
            out.extend(session.tick(16).unwrap());
        }
        out
    }

    #[test]
    fn sample_buckets_at_medium() {
        let (matched, later, completed) = session().buckets().ids();
        assert_eq!(matched, vec![TaskId(2), TaskId(3), TaskId(4), TaskId(5)]);
        assert_eq!(later, vec![TaskId(1)]);
        assert_eq!(completed, vec![TaskId(6)]);
    }

    #[test]
    fn swipe_commit_toggles_after_animation() {
        let mut session = session();
        session.press(TaskId(2)).unwrap();
        session.drag(TaskId(2), 150.0, 0.0);
        session.release(TaskId(2));

        assert_eq!(session.gesture_phase(TaskId(2)), SwipePhase::Committing);
        assert!(!session.store().get(TaskId(2)).unwrap().completed);

        run_frames(&mut session);
        assert!(session.store().get(TaskId(2)).unwrap().completed);
        let (_, _, completed) = session.buckets().ids();
        assert_eq!(completed, vec![TaskId(2), TaskId(6)]);

        let events = session.drain_events();
        assert!(events.iter().any(|e| matches!(e, Event::TaskToggled { id: TaskId(2), completed: true, .. })));
        assert!(events.iter().any(|e| matches!(e, Event::GestureCommitted { id: TaskId(2), .. })));
    }

    #[test]
    fn short_swipe_does_not_toggle() {
        let mut session = session();
        let revision = session.revision();
        session.press(TaskId(2)).unwrap();
        session.drag(TaskId(2), 80.0, 0.0);
        session.release(TaskId(2));
        assert_eq!(session.gesture_phase(TaskId(2)), SwipePhase::Returning);

        run_frames(&mut session);
        assert_eq!(session.gesture_offset(TaskId(2)), 0.0);
        assert_eq!(session.revision(), revision);
        assert!(!session.store().get(TaskId(2)).unwrap().completed);
    }

    #[test]
    fn press_on_unknown_task_fails() {
        let mut session = session();
        let err = session.press(TaskId(999)).unwrap_err();
        assert!(matches!(err, CoreError::TaskNotFound(TaskId(999))));
        assert_eq!(session.active_gestures(), 0);
    }

    #[test]
    fn energy_change_abandons_gestures_that_move_bucket() {
        let mut session = session();
        // Task 3 needs medium energy; task 2 needs low.
        for id in [TaskId(2), TaskId(3)] {
            session.press(id).unwrap();
            session.drag(id, 200.0, 0.0);
            session.release(id);
        }

        session.set_energy(EnergyLevel::Low);
        assert_eq!(session.gesture_phase(TaskId(3)), SwipePhase::Idle);
        assert_eq!(session.gesture_phase(TaskId(2)), SwipePhase::Committing);

        run_frames(&mut session);
        assert!(session.store().get(TaskId(2)).unwrap().completed);
        assert!(!session.store().get(TaskId(3)).unwrap().completed);

        let events = session.drain_events();
        assert!(events.iter().any(|e| matches!(e, Event::GestureAbandoned { id: TaskId(3), .. })));
        assert!(events.iter().any(|e| matches!(e, Event::EnergyChanged { to: EnergyLevel::Low, .. })));
    }

    #[test]
    fn tap_mid_gesture_drops_the_gesture() {
        let mut session = session();
        session.press(TaskId(4)).unwrap();
        session.drag(TaskId(4), 300.0, 0.0);
        session.release(TaskId(4));

        session.tap(TaskId(4)).unwrap();
        assert_eq!(session.active_gestures(), 0);
        run_frames(&mut session);
        // Only the tap toggled it.
        assert!(session.store().get(TaskId(4)).unwrap().completed);
    }

    #[test]
    fn same_energy_is_not_a_change() {
        let mut session = session();
        session.set_energy(EnergyLevel::Medium);
        assert!(session.drain_events().is_empty());
    }

    #[test]
    fn created_task_is_classified() {
        let mut session = TriageSession::default();
        let task = session
            .create_task(TaskDraft {
                energy: EnergyLevel::High,
                ..TaskDraft::named("Deep work")
            })
            .unwrap();
        assert_eq!(session.buckets().ids().1, vec![task.id]);
        session.set_energy(EnergyLevel::High);
        assert_eq!(session.buckets().ids().0, vec![task.id]);
    }
}
