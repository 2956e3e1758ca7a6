use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::energy::EnergyLevel;
use crate::gesture::SwipeDirection;
use crate::task::TaskId;

/// Every observable change in the system produces an Event.
/// The presentation layer drains them and re-renders on revision changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TaskCreated {
        id: TaskId,
        revision: u64,
        at: DateTime<Utc>,
    },
    /// Fired on every toggle, including the one that undoes a previous toggle.
    TaskToggled {
        id: TaskId,
        completed: bool,
        revision: u64,
        at: DateTime<Utc>,
    },
    EnergyChanged {
        from: EnergyLevel,
        to: EnergyLevel,
        at: DateTime<Utc>,
    },
    /// A swipe crossed the threshold and its commit animation finished.
    GestureCommitted {
        id: TaskId,
        direction: SwipeDirection,
        at: DateTime<Utc>,
    },
    /// A swipe fell short and sprang back to rest.
    GestureSettled {
        id: TaskId,
        at: DateTime<Utc>,
    },
    /// A gesture in flight was dropped because its task left the view.
    GestureAbandoned {
        id: TaskId,
        at: DateTime<Utc>,
    },
}

impl Event {
    pub fn at(&self) -> DateTime<Utc> {
        match self {
            Event::TaskCreated { at, .. }
            | Event::TaskToggled { at, .. }
            | Event::EnergyChanged { at, .. }
            | Event::GestureCommitted { at, .. }
            | Event::GestureSettled { at, .. }
            | Event::GestureAbandoned { at, .. } => *at,
        }
    }
}
