//! Replays a swipe against a session the way a touch surface would:
//! press, a few move samples, release, then frame ticks until rest.

use serde::Serialize;
use tracing::debug;

use energytriage_core::{Effect, SwipePhase, TaskId, TriageSession};

const MOVE_SAMPLES: u32 = 5;
const MAX_FRAMES: u32 = 1_000;

#[derive(Debug, Clone, Serialize)]
pub struct SwipeReport {
    pub task_id: TaskId,
    pub dx: f64,
    pub dy: f64,
    /// Phases in the order they were entered.
    pub phases: Vec<SwipePhase>,
    pub committed: bool,
    pub frames: u32,
}

pub fn swipe(
    session: &mut TriageSession,
    id: TaskId,
    dx: f64,
    dy: f64,
    frame_ms: u64,
) -> Result<SwipeReport, Box<dyn std::error::Error>> {
    if frame_ms == 0 {
        return Err("frame length must be at least 1 ms".into());
    }

    let mut report = SwipeReport {
        task_id: id,
        dx,
        dy,
        phases: vec![SwipePhase::Idle],
        committed: false,
        frames: 0,
    };

    let mut effects = session.press(id)?;
    for step in 1..=MOVE_SAMPLES {
        let t = f64::from(step) / f64::from(MOVE_SAMPLES);
        effects.extend(session.drag(id, dx * t, dy * t));
    }
    effects.extend(session.release(id));
    observe(&mut report, &effects);

    while session.gesture_phase(id) != SwipePhase::Idle {
        if report.frames >= MAX_FRAMES {
            return Err(format!(
                "swipe #{id} still {:?} after {MAX_FRAMES} frames",
                session.gesture_phase(id)
            )
            .into());
        }
        let mut ticked = Vec::new();
        for (task, effect) in session.tick(frame_ms)? {
            if task == id {
                ticked.push(effect);
            } else {
                // Other gestures still advance and commit; only the trace skips them.
                debug!(task_id = %task, ?effect, "effect on another task");
            }
        }
        observe(&mut report, &ticked);
        report.frames += 1;
    }
    Ok(report)
}

fn observe(report: &mut SwipeReport, effects: &[Effect]) {
    for effect in effects {
        match effect {
            Effect::Phase { phase } => report.phases.push(*phase),
            Effect::Commit { .. } => report.committed = true,
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use energytriage_core::{Config, TaskStore};

    fn session() -> TriageSession {
        TriageSession::new(&Config::default())
    }

    #[test]
    fn commit_swipe_reports_full_trace() {
        let mut session = session();
        let report = swipe(&mut session, TaskId(2), 150.0, 0.0, 16).unwrap();
        assert!(report.committed);
        assert_eq!(
            report.phases,
            vec![SwipePhase::Idle, SwipePhase::Dragging, SwipePhase::Committing, SwipePhase::Idle]
        );
        assert!(session.store().get(TaskId(2)).unwrap().completed);
    }

    #[test]
    fn zero_frame_length_is_rejected() {
        let mut session = session();
        let before = session.revision();
        assert!(swipe(&mut session, TaskId(2), 150.0, 0.0, 0).is_err());
        assert_eq!(session.revision(), before);
        assert_eq!(session.gesture_phase(TaskId(2)), SwipePhase::Idle);
    }

    #[test]
    fn exhausted_frame_budget_is_an_error() {
        let mut config = Config::default();
        config.gesture.commit_duration_ms = 60_000;
        let mut session = TriageSession::with_store(
            TaskStore::with_sample_tasks(),
            config.session.default_energy,
            config.gesture,
        );
        let err = swipe(&mut session, TaskId(2), 150.0, 0.0, 16).unwrap_err();
        assert!(err.to_string().contains("after 1000 frames"), "{err}");
        assert!(!session.store().get(TaskId(2)).unwrap().completed);
    }

    #[test]
    fn non_finite_swipe_stays_idle() {
        let mut session = session();
        let report = swipe(&mut session, TaskId(2), f64::NAN, 0.0, 16).unwrap();
        assert!(!report.committed);
        assert_eq!(report.frames, 0);
        assert_eq!(report.phases, vec![SwipePhase::Idle]);
        assert_eq!(session.active_gestures(), 0);
    }
}
