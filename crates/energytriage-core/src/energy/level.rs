//! The three-valued energy scale shared by users and tasks.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Energy level, used both for the effort a task requires and for the
/// user's current capacity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum EnergyLevel {
    /// Peak energy, can take on anything
    High,
    /// Decent energy (default)
    Medium,
    /// Running low, simple tasks only
    Low,
}

impl EnergyLevel {
    /// All levels in picker order.
    pub const ALL: [EnergyLevel; 3] = [EnergyLevel::High, EnergyLevel::Medium, EnergyLevel::Low];

    pub fn as_str(self) -> &'static str {
        match self {
            EnergyLevel::High => "high",
            EnergyLevel::Medium => "medium",
            EnergyLevel::Low => "low",
        }
    }

    /// Advice shown next to the energy picker for this level.
    pub fn guidance(self) -> &'static str {
        match self {
            EnergyLevel::High => "You're at peak energy. Perfect time for challenging tasks!",
            EnergyLevel::Medium => {
                "Decent energy level. Tackle medium-priority tasks or easier high-priority ones."
            }
            EnergyLevel::Low => "Low energy detected. Focus on simple admin tasks or take a break.",
        }
    }
}

impl Default for EnergyLevel {
    fn default() -> Self {
        EnergyLevel::Medium
    }
}

impl fmt::Display for EnergyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EnergyLevel {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "high" | "h" => Ok(EnergyLevel::High),
            "medium" | "med" | "m" => Ok(EnergyLevel::Medium),
            "low" | "l" => Ok(EnergyLevel::Low),
            _ => Err(ValidationError::InvalidEnergy(s.to_string())),
        }
    }
}
