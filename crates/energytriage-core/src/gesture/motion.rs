//! Animation primitives driven by frame ticks.
//!
//! Both advance on caller-supplied elapsed time; neither owns a clock.

use serde::{Deserialize, Serialize};

use crate::config::SpringConfig;

/// Largest integration step for the spring, in seconds.
const MAX_SPRING_STEP_SECS: f64 = 0.004;

/// Fixed-duration ease-out tween used by the commit animation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitTween {
    pub from: f64,
    pub to: f64,
    pub elapsed_ms: u64,
    pub duration_ms: u64,
}

impl CommitTween {
    pub fn new(from: f64, to: f64, duration_ms: u64) -> Self {
        Self {
            from,
            to,
            elapsed_ms: 0,
            duration_ms,
        }
    }

    /// 0.0 .. 1.0 linear progress.
    pub fn progress(&self) -> f64 {
        if self.duration_ms == 0 {
            return 1.0;
        }
        (self.elapsed_ms as f64 / self.duration_ms as f64).min(1.0)
    }

    pub fn offset(&self) -> f64 {
        if self.is_finished() {
            return self.to;
        }
        let p = self.progress();
        let eased = 1.0 - (1.0 - p) * (1.0 - p);
        self.from + (self.to - self.from) * eased
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed_ms >= self.duration_ms
    }

    pub fn advance(&mut self, dt_ms: u64) {
        self.elapsed_ms = self.elapsed_ms.saturating_add(dt_ms);
    }
}

/// Damped spring pulling an offset back to zero.
///
/// Integrated with semi-implicit Euler in sub-steps of at most 4 ms so large
/// frame gaps stay stable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spring {
    pub position: f64,
    pub velocity: f64,
    pub params: SpringConfig,
}

impl Spring {
    /// A non-finite start position is treated as already at rest.
    pub fn new(position: f64, params: SpringConfig) -> Self {
        Self {
            position: if position.is_finite() { position } else { 0.0 },
            velocity: 0.0,
            params,
        }
    }

    pub fn is_settled(&self) -> bool {
        if !self.position.is_finite() || !self.velocity.is_finite() {
            return true;
        }
        self.position.abs() < self.params.rest_displacement
            && self.velocity.abs() < self.params.rest_velocity
    }

    /// Advance by `dt_ms`, snapping to rest once settled.
    pub fn advance(&mut self, dt_ms: u64) {
        let mut remaining = dt_ms as f64 / 1000.0;
        while remaining > 0.0 && !self.is_settled() {
            let h = remaining.min(MAX_SPRING_STEP_SECS);
            let force = -self.params.stiffness * self.position - self.params.damping * self.velocity;
            self.velocity += force / self.params.mass * h;
            self.position += self.velocity * h;
            remaining -= h;
        }
        if self.is_settled() {
            self.position = 0.0;
            self.velocity = 0.0;
        }
    }
}
