//! Property tests for the swipe engine.

use energytriage_core::{Effect, GestureConfig, SwipeEngine, SwipePhase, TaskId};
use proptest::prelude::*;

const FRAME_MS: u64 = 16;

proptest! {
    #[test]
    fn spring_settles_within_two_seconds(offset in -120.0f64..=120.0) {
        let mut engine = SwipeEngine::new(TaskId(1), GestureConfig::default());
        engine.press();
        engine.drag(offset, 0.0);
        let mut effects = engine.release();

        let mut elapsed = 0;
        while engine.phase() != SwipePhase::Idle && elapsed < 2_000 {
            effects.extend(engine.tick(FRAME_MS));
            elapsed += FRAME_MS;
        }

        prop_assert_eq!(engine.phase(), SwipePhase::Idle, "still moving after {} ms", elapsed);
        prop_assert_eq!(engine.offset(), 0.0);
        prop_assert!(engine.is_at_rest());
        let any_commit = effects.iter().any(|e| matches!(e, Effect::Commit { .. }));
        prop_assert!(!any_commit);
    }

    #[test]
    fn release_beyond_threshold_commits_exactly_once(
        magnitude in 120.5f64..1_000.0,
        left in any::<bool>(),
    ) {
        let offset = if left { -magnitude } else { magnitude };
        let mut engine = SwipeEngine::new(TaskId(1), GestureConfig::default());
        engine.press();
        engine.drag(offset, 0.0);
        let mut effects = engine.release();
        for _ in 0..100 {
            effects.extend(engine.tick(FRAME_MS));
        }

        let commits = effects.iter().filter(|e| matches!(e, Effect::Commit { .. })).count();
        prop_assert_eq!(commits, 1);
        prop_assert!(engine.is_at_rest());
    }
}
