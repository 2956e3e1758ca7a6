//! Swipe-to-toggle state machine.
//!
//! One engine per visible task. The transition function is pure: it takes
//! the current state and a signal and returns the next state plus the
//! effects the caller must apply. The caller drives animations by feeding
//! `Signal::Tick` once per frame.
//!
//! ## State Transitions
//!
//! ```text
//! Idle --move--> Dragging --release, |x| > threshold--> Committing --done--> Idle (+ Commit)
//!                         --release, |x| <= threshold-> Returning  --settled-> Idle
//! any  --press--> Idle (armed, animation cancelled)
//! any  --abandon--> Idle (no commit)
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::motion::{CommitTween, Spring};
use crate::config::GestureConfig;
use crate::task::TaskId;

/// Coarse phase of a swipe, for display and assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwipePhase {
    Idle,
    Dragging,
    Committing,
    Returning,
}

/// Direction of a committed swipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwipeDirection {
    Left,
    Right,
}

impl SwipeDirection {
    fn of(offset: f64) -> Self {
        if offset < 0.0 {
            SwipeDirection::Left
        } else {
            SwipeDirection::Right
        }
    }

    fn sign(self) -> f64 {
        match self {
            SwipeDirection::Left => -1.0,
            SwipeDirection::Right => 1.0,
        }
    }
}

/// Full swipe state. The vertical offset is always zero and not stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "lowercase")]
pub enum SwipeState {
    /// At rest. `armed` is true between a press and its release.
    Idle { armed: bool },
    Dragging { offset: f64 },
    Committing { tween: CommitTween, direction: SwipeDirection },
    Returning { spring: Spring },
}

impl Default for SwipeState {
    fn default() -> Self {
        SwipeState::Idle { armed: false }
    }
}

impl SwipeState {
    pub fn phase(&self) -> SwipePhase {
        match self {
            SwipeState::Idle { .. } => SwipePhase::Idle,
            SwipeState::Dragging { .. } => SwipePhase::Dragging,
            SwipeState::Committing { .. } => SwipePhase::Committing,
            SwipeState::Returning { .. } => SwipePhase::Returning,
        }
    }

    /// Current horizontal offset of the item.
    pub fn offset(&self) -> f64 {
        match self {
            SwipeState::Idle { .. } => 0.0,
            SwipeState::Dragging { offset } => *offset,
            SwipeState::Committing { tween, .. } => tween.offset(),
            SwipeState::Returning { spring } => spring.position,
        }
    }

    /// Idle, unarmed and nothing left to animate.
    pub fn is_at_rest(&self) -> bool {
        matches!(self, SwipeState::Idle { armed: false })
    }
}

/// Input delivered to an engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "signal", rename_all = "lowercase")]
pub enum Signal {
    /// Finger down on the item.
    Press,
    /// Cumulative deltas since the press.
    Move { dx: f64, dy: f64 },
    /// Finger up.
    Release,
    /// Frame tick with elapsed milliseconds since the previous tick.
    Tick { dt_ms: u64 },
    /// The item left the visible set.
    Abandon,
}

/// Output the caller must act on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "lowercase")]
pub enum Effect {
    /// Render the item at this horizontal offset.
    Offset { x: f64 },
    Phase { phase: SwipePhase },
    /// Commit animation reached its end; toggle the owning task.
    Commit { direction: SwipeDirection },
    /// Spring came to rest without committing.
    Settled,
    /// An in-flight gesture was dropped without committing.
    Abandoned,
}

/// Pure transition: `(state, signal) -> (state, effects)`.
pub fn transition(
    state: &SwipeState,
    signal: Signal,
    config: &GestureConfig,
) -> (SwipeState, Vec<Effect>) {
    let mut effects = Vec::new();

    let next = match (state, signal) {
        // Non-finite samples are dropped.
        (_, Signal::Move { dx, dy }) if !dx.is_finite() || !dy.is_finite() => state.clone(),

        (_, Signal::Press) => {
            if state.offset() != 0.0 {
                effects.push(Effect::Offset { x: 0.0 });
            }
            if state.phase() != SwipePhase::Idle {
                effects.push(Effect::Phase { phase: SwipePhase::Idle });
            }
            SwipeState::Idle { armed: true }
        }

        (SwipeState::Idle { armed: true }, Signal::Move { dx, dy }) => {
            if dy.abs() > dx.abs() {
                // Vertical scroll, leave it to the list.
                state.clone()
            } else {
                effects.push(Effect::Phase { phase: SwipePhase::Dragging });
                effects.push(Effect::Offset { x: dx });
                SwipeState::Dragging { offset: dx }
            }
        }

        (SwipeState::Dragging { .. }, Signal::Move { dx, .. }) => {
            effects.push(Effect::Offset { x: dx });
            SwipeState::Dragging { offset: dx }
        }

        (SwipeState::Dragging { offset }, Signal::Release) => {
            let offset = *offset;
            if offset.abs() > config.threshold {
                let direction = SwipeDirection::of(offset);
                let target = direction.sign() * config.commit_distance;
                effects.push(Effect::Phase { phase: SwipePhase::Committing });
                SwipeState::Committing {
                    tween: CommitTween::new(offset, target, config.commit_duration_ms),
                    direction,
                }
            } else {
                effects.push(Effect::Phase { phase: SwipePhase::Returning });
                SwipeState::Returning {
                    spring: Spring::new(offset, config.spring.clone()),
                }
            }
        }

        (SwipeState::Idle { .. }, Signal::Release) => SwipeState::Idle { armed: false },

        (SwipeState::Committing { tween, direction }, Signal::Tick { dt_ms }) => {
            let mut tween = tween.clone();
            tween.advance(dt_ms);
            effects.push(Effect::Offset { x: tween.offset() });
            if tween.is_finished() {
                effects.push(Effect::Commit { direction: *direction });
                effects.push(Effect::Offset { x: 0.0 });
                effects.push(Effect::Phase { phase: SwipePhase::Idle });
                SwipeState::Idle { armed: false }
            } else {
                SwipeState::Committing {
                    tween,
                    direction: *direction,
                }
            }
        }

        (SwipeState::Returning { spring }, Signal::Tick { dt_ms }) => {
            let mut spring = spring.clone();
            spring.advance(dt_ms);
            effects.push(Effect::Offset { x: spring.position });
            if spring.is_settled() {
                effects.push(Effect::Settled);
                effects.push(Effect::Phase { phase: SwipePhase::Idle });
                SwipeState::Idle { armed: false }
            } else {
                SwipeState::Returning { spring }
            }
        }

        (_, Signal::Abandon) => {
            if state.phase() != SwipePhase::Idle {
                if state.offset() != 0.0 {
                    effects.push(Effect::Offset { x: 0.0 });
                }
                effects.push(Effect::Abandoned);
                effects.push(Effect::Phase { phase: SwipePhase::Idle });
            }
            SwipeState::Idle { armed: false }
        }

        // Unarmed moves, moves and releases mid-animation, ticks at rest.
        _ => state.clone(),
    };

    (next, effects)
}

/// Swipe engine bound to a single task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwipeEngine {
    task_id: TaskId,
    state: SwipeState,
    config: GestureConfig,
}

impl SwipeEngine {
    pub fn new(task_id: TaskId, config: GestureConfig) -> Self {
        Self {
            task_id,
            state: SwipeState::default(),
            config,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn task_id(&self) -> TaskId {
        self.task_id
    }

    pub fn state(&self) -> &SwipeState {
        &self.state
    }

    pub fn phase(&self) -> SwipePhase {
        self.state.phase()
    }

    pub fn offset(&self) -> f64 {
        self.state.offset()
    }

    pub fn is_at_rest(&self) -> bool {
        self.state.is_at_rest()
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn handle(&mut self, signal: Signal) -> Vec<Effect> {
        let from = self.state.phase();
        let (next, effects) = transition(&self.state, signal, &self.config);
        self.state = next;
        let to = self.state.phase();
        if from != to {
            debug!(task_id = %self.task_id, ?from, ?to, offset = self.state.offset(), "swipe phase change");
        }
        effects
    }

    pub fn press(&mut self) -> Vec<Effect> {
        self.handle(Signal::Press)
    }

    pub fn drag(&mut self, dx: f64, dy: f64) -> Vec<Effect> {
        self.handle(Signal::Move { dx, dy })
    }

    pub fn release(&mut self) -> Vec<Effect> {
        self.handle(Signal::Release)
    }

    pub fn tick(&mut self, dt_ms: u64) -> Vec<Effect> {
        self.handle(Signal::Tick { dt_ms })
    }

    pub fn abandon(&mut self) -> Vec<Effect> {
        self.handle(Signal::Abandon)
    }
}
