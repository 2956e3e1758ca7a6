//! # Energy Triage Core Library
//!
//! Business logic for the Energy Triage task list. Given the user's current
//! energy, tasks are split into what fits now, what to save for later and
//! what is done; completion is toggled by tap or by a swipe gesture.
//! A standalone CLI and any GUI are thin layers over the same library.
//!
//! ## Architecture
//!
//! - **Task Store**: owned, in-memory task list with a revision counter
//! - **Energy Matcher**: pure compatibility rule and stable three-way partition
//! - **Gesture Engine**: per-task swipe state machine driven by frame ticks
//! - **Session**: facade wiring the three together for presentation code
//!
//! ## Key Components
//!
//! - [`TaskStore`]: task ownership and mutation
//! - [`partition`]: bucket view for an energy level
//! - [`SwipeEngine`]: commit/cancel swipe state machine
//! - [`TriageSession`]: presentation-facing facade
//! - [`Config`]: gesture and session configuration

pub mod config;
pub mod energy;
pub mod error;
pub mod events;
pub mod gesture;
pub mod session;
pub mod task;

pub use config::{Config, GestureConfig, SessionConfig, SpringConfig};
pub use energy::{matches, partition, Bucket, Buckets, EnergyLevel};
pub use error::{ConfigError, CoreError, Result, ValidationError};
pub use events::Event;
pub use gesture::{Effect, GestureBoard, Signal, SwipeDirection, SwipeEngine, SwipePhase, SwipeState};
pub use session::TriageSession;
pub use task::{Priority, Task, TaskDraft, TaskId, TaskStore, TASK_TYPE_PRESETS};
