//! TOML-based configuration.
//!
//! Holds tuning for the swipe gesture and session defaults:
//! - commit threshold, commit distance and commit animation length
//! - spring parameters for the settle-back animation
//! - starting energy level and whether to seed the demo tasks
//!
//! Configuration is stored at `~/.config/energytriage/config.toml`.
//! Tasks themselves are never written to disk.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::energy::EnergyLevel;
use crate::error::ConfigError;

/// Spring parameters for the settle-back animation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpringConfig {
    #[serde(default = "default_stiffness")]
    pub stiffness: f64,
    #[serde(default = "default_damping")]
    pub damping: f64,
    #[serde(default = "default_mass")]
    pub mass: f64,
    /// Offset below which the spring may come to rest.
    #[serde(default = "default_rest_threshold")]
    pub rest_displacement: f64,
    /// Speed (units/s) below which the spring may come to rest.
    #[serde(default = "default_rest_threshold")]
    pub rest_velocity: f64,
}

/// Swipe gesture tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GestureConfig {
    /// Horizontal distance a release must exceed to commit.
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    /// Offset the commit animation travels to.
    #[serde(default = "default_commit_distance")]
    pub commit_distance: f64,
    #[serde(default = "default_commit_duration_ms")]
    pub commit_duration_ms: u64,
    #[serde(default)]
    pub spring: SpringConfig,
}

/// Session defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default)]
    pub default_energy: EnergyLevel,
    #[serde(default = "default_true")]
    pub seed_sample_tasks: bool,
}

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub gesture: GestureConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

// Default functions
fn default_threshold() -> f64 {
    120.0
}
fn default_commit_distance() -> f64 {
    500.0
}
fn default_commit_duration_ms() -> u64 {
    200
}
fn default_stiffness() -> f64 {
    170.0
}
fn default_damping() -> f64 {
    26.0
}
fn default_mass() -> f64 {
    1.0
}
fn default_rest_threshold() -> f64 {
    0.5
}
fn default_true() -> bool {
    true
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            stiffness: default_stiffness(),
            damping: default_damping(),
            mass: default_mass(),
            rest_displacement: default_rest_threshold(),
            rest_velocity: default_rest_threshold(),
        }
    }
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            commit_distance: default_commit_distance(),
            commit_duration_ms: default_commit_duration_ms(),
            spring: SpringConfig::default(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            default_energy: EnergyLevel::Medium,
            seed_sample_tasks: true,
        }
    }
}

fn positive(key: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("must be a positive number, got {value}"),
        })
    }
}

impl GestureConfig {
    /// Reject tuning that would make the engine misbehave.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("gesture.threshold", self.threshold)?;
        positive("gesture.commit_distance", self.commit_distance)?;
        if self.commit_distance <= self.threshold {
            return Err(ConfigError::InvalidValue {
                key: "gesture.commit_distance".into(),
                message: format!(
                    "must exceed threshold ({}), got {}",
                    self.threshold, self.commit_distance
                ),
            });
        }
        if self.commit_duration_ms == 0 {
            return Err(ConfigError::InvalidValue {
                key: "gesture.commit_duration_ms".into(),
                message: "must be greater than zero".into(),
            });
        }
        positive("gesture.spring.stiffness", self.spring.stiffness)?;
        positive("gesture.spring.damping", self.spring.damping)?;
        positive("gesture.spring.mass", self.spring.mass)?;
        positive("gesture.spring.rest_displacement", self.spring.rest_displacement)?;
        positive("gesture.spring.rest_velocity", self.spring.rest_velocity)?;
        Ok(())
    }
}

/// Returns `~/.config/energytriage[-dev]/` based on ENERGYTRIAGE_ENV.
///
/// Set ENERGYTRIAGE_ENV=dev to use the development directory.
pub fn config_dir() -> PathBuf {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("ENERGYTRIAGE_ENV").unwrap_or_else(|_| "production".to_string());

    if env == "dev" {
        base_dir.join("energytriage-dev")
    } else {
        base_dir.join("energytriage")
    }
}

impl Config {
    /// Default location of the config file.
    pub fn path() -> PathBuf {
        config_dir().join("config.toml")
    }

    /// Load from the default location, or defaults if no file exists.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Self::path())
    }

    /// Load from `path`, or defaults if the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read, parsed or
    /// fails validation.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(content) => Self::from_toml_str(&content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let cfg: Config = toml::from_str(content)?;
        cfg.gesture.validate()?;
        Ok(cfg)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseFailed(e.to_string()))
    }

    /// Save to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(Self::path())
    }

    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let save_err = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| save_err(e.to_string()))?;
        }
        let content = self.to_toml_string()?;
        std::fs::write(path, content).map_err(|e| save_err(e.to_string()))
    }

    /// Look up a dotted key such as `gesture.spring.damping`.
    pub fn get(&self, key: &str) -> Option<String> {
        let root = serde_json::to_value(self).ok()?;
        let value = get_json_value_by_path(&root, key)?;
        match value {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a dotted key from its string form. The updated config is
    /// validated before it replaces `self`.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut root = serde_json::to_value(&*self)
            .map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        set_json_value_by_path(&mut root, key, value)?;
        let updated: Config = serde_json::from_value(root).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        updated.gesture.validate()?;
        *self = updated;
        Ok(())
    }
}

fn get_json_value_by_path<'a>(root: &'a serde_json::Value, key: &str) -> Option<&'a serde_json::Value> {
    if key.is_empty() {
        return None;
    }

    let mut current = root;
    for part in key.split('.') {
        current = current.get(part)?;
    }
    Some(current)
}

fn set_json_value_by_path(
    root: &mut serde_json::Value,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    let unknown = || ConfigError::InvalidValue {
        key: key.to_string(),
        message: "unknown config key".into(),
    };
    let invalid = |message: String| ConfigError::InvalidValue {
        key: key.to_string(),
        message,
    };

    let mut parts = key.split('.').peekable();
    if key.is_empty() {
        return Err(unknown());
    }

    let mut current = root;
    while let Some(part) = parts.next() {
        if parts.peek().is_none() {
            let obj = current.as_object_mut().ok_or_else(unknown)?;
            let existing = obj.get(part).ok_or_else(unknown)?;

            let new_value = match existing {
                serde_json::Value::Bool(_) => serde_json::Value::Bool(
                    value
                        .parse::<bool>()
                        .map_err(|_| invalid(format!("cannot parse '{value}' as bool")))?,
                ),
                serde_json::Value::Number(_) => {
                    if let Ok(n) = value.parse::<u64>() {
                        serde_json::Value::Number(n.into())
                    } else {
                        value
                            .parse::<f64>()
                            .ok()
                            .and_then(serde_json::Number::from_f64)
                            .map(serde_json::Value::Number)
                            .ok_or_else(|| invalid(format!("cannot parse '{value}' as number")))?
                    }
                }
                serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                    return Err(invalid("cannot replace a whole section".into()));
                }
                _ => serde_json::Value::String(value.into()),
            };

            obj.insert(part.to_string(), new_value);
            return Ok(());
        }

        current = current.get_mut(part).ok_or_else(unknown)?;
    }

    Err(unknown())
}
