use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::EMAIL_CHANNEL;

/// Day identifiers accepted in `schedule_day`.
pub const SCHEDULE_DAYS: [&str; 7] = ["sun", "mon", "tue", "wed", "thu", "fri", "sat"];

/// Monthly frames understood by the scheduler.
pub const SCHEDULE_FRAMES: [&str; 3] = ["first", "mid", "last"];

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Top-level config
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PulseConfig {
    #[serde(default)]
    pub defaults: ChannelDefaults,
    #[serde(default)]
    pub channels: ChannelsConfig,
}

impl PulseConfig {
    /// Parse a TOML document. Missing sections fall back to their defaults.
    pub fn from_toml_str(s: &str) -> crate::Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Parse and reject configurations carrying any error-level issue.
    pub fn load(s: &str) -> crate::Result<Self> {
        let config = Self::from_toml_str(s)?;
        let fatal: Vec<String> = config
            .validate()
            .into_iter()
            .filter(|e| e.severity == ConfigSeverity::Error)
            .map(|e| e.to_string())
            .collect();
        if fatal.is_empty() {
            Ok(config)
        } else {
            Err(crate::Error::Config(fatal.join("; ")))
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// New-channel defaults
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Schedule values stamped onto every freshly created channel, whatever
/// its schedule type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelDefaults {
    #[serde(default = "d_day")]
    pub schedule_day: String,
    #[serde(default = "d_8")]
    pub schedule_hour: u32,
    #[serde(default = "d_frame")]
    pub schedule_frame: String,
}

impl Default for ChannelDefaults {
    fn default() -> Self {
        Self {
            schedule_day: d_day(),
            schedule_hour: d_8(),
            schedule_frame: d_frame(),
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Channel selection
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelsConfig {
    /// Channel type picked first when it is configured.
    #[serde(default = "d_preferred")]
    pub preferred_default: String,
}

impl Default for ChannelsConfig {
    fn default() -> Self {
        Self {
            preferred_default: d_preferred(),
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Config validation
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Severity level for a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSeverity {
    Error,
    Warning,
}

/// A single configuration validation issue.
#[derive(Debug, Clone)]
pub struct ConfigError {
    pub severity: ConfigSeverity,
    pub field: String,
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.severity {
            ConfigSeverity::Error => "ERROR",
            ConfigSeverity::Warning => "WARN",
        };
        write!(f, "[{tag}] {}: {}", self.field, self.message)
    }
}

impl PulseConfig {
    /// Validate the configuration and return a list of issues.
    ///
    /// Returns an empty vec when everything looks good.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.defaults.schedule_hour > 23 {
            errors.push(ConfigError {
                severity: ConfigSeverity::Error,
                field: "defaults.schedule_hour".into(),
                message: format!("hour {} out of range 0..=23", self.defaults.schedule_hour),
            });
        }

        if !SCHEDULE_DAYS.contains(&self.defaults.schedule_day.as_str()) {
            errors.push(ConfigError {
                severity: ConfigSeverity::Error,
                field: "defaults.schedule_day".into(),
                message: format!(
                    "unknown day '{}', expected one of {}",
                    self.defaults.schedule_day,
                    SCHEDULE_DAYS.join(", ")
                ),
            });
        }

        // Frames only matter for monthly schedules, so an odd value is not fatal.
        if !SCHEDULE_FRAMES.contains(&self.defaults.schedule_frame.as_str()) {
            errors.push(ConfigError {
                severity: ConfigSeverity::Warning,
                field: "defaults.schedule_frame".into(),
                message: format!(
                    "unknown frame '{}': monthly channels expect first, mid or last",
                    self.defaults.schedule_frame
                ),
            });
        }

        if self.channels.preferred_default.trim().is_empty() {
            errors.push(ConfigError {
                severity: ConfigSeverity::Error,
                field: "channels.preferred_default".into(),
                message: "preferred channel type must not be empty".into(),
            });
        }

        errors
    }
}

// ── serde default helpers ───────────────────────────────────────────

fn d_day() -> String {
    "mon".into()
}
fn d_8() -> u32 {
    8
}
fn d_frame() -> String {
    "first".into()
}
fn d_preferred() -> String {
    EMAIL_CHANNEL.into()
}
