//! Swipe gesture handling.
//!
//! Turns a continuous horizontal drag into a discrete completion toggle,
//! with a commit threshold and an animated settle-back when the threshold
//! is not reached.

mod board;
mod engine;
mod motion;

pub use board::GestureBoard;
pub use engine::{
    transition, Effect, Signal, SwipeDirection, SwipeEngine, SwipePhase, SwipeState,
};
pub use motion::{CommitTween, Spring};
