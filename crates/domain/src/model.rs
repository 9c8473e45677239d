//! Pulse data model: pulses, delivery channels, and channel capability specs.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Channel type key of the email channel, the preferred default.
pub const EMAIL_CHANNEL: &str = "email";

/// A recipient is opaque to validation: a user object or a bare address.
pub type Recipient = Value;

/// Channel specs keyed by channel type, in the order they were supplied.
pub type ChannelSpecs = IndexMap<String, ChannelSpec>;

/// Decode a channel-spec mapping from JSON, keeping key order.
pub fn parse_channel_specs(json: &str) -> crate::Result<ChannelSpecs> {
    Ok(serde_json::from_str(json)?)
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Schedule type
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Cadence category of a channel.
///
/// Unknown values are kept in [`ScheduleType::Other`] so they survive a
/// round-trip and can be reported instead of failing deserialization.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ScheduleType {
    Hourly,
    Daily,
    Weekly,
    Monthly,
    /// Raw cron expression carried in `schedule_frame`.
    CustomCron,
    Other(String),
}

impl ScheduleType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::CustomCron => "customcron",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for ScheduleType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "hourly" => Self::Hourly,
            "daily" => Self::Daily,
            "weekly" => Self::Weekly,
            "monthly" => Self::Monthly,
            "customcron" => Self::CustomCron,
            _ => Self::Other(s),
        }
    }
}

impl From<&str> for ScheduleType {
    fn from(s: &str) -> Self {
        Self::from(s.to_string())
    }
}

impl From<ScheduleType> for String {
    fn from(t: ScheduleType) -> Self {
        match t {
            ScheduleType::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ScheduleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Channel specs
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// A detail field a channel kind asks for (e.g. a Slack channel name).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

/// Capability descriptor for one channel kind.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChannelSpec {
    #[serde(rename = "type")]
    pub channel_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Whether this channel kind is usable at all.
    #[serde(default)]
    pub configured: bool,
    /// Whether channels of this kind must carry recipients.
    #[serde(default)]
    pub recipients: bool,
    #[serde(default)]
    pub fields: Vec<FieldSpec>,
    /// Supported schedule types; the first one is the default.
    #[serde(default)]
    pub schedules: Vec<ScheduleType>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Channels & pulses
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// A configured delivery target.
///
/// `recipients` and `details` distinguish "absent" (`None`) from "empty";
/// the validation rules treat the two differently.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    pub channel_type: String,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub recipients: Option<Vec<Recipient>>,
    #[serde(default)]
    pub details: Option<Map<String, Value>>,
    #[serde(default)]
    pub schedule_type: Option<ScheduleType>,
    #[serde(default)]
    pub schedule_hour: Option<u32>,
    #[serde(default)]
    pub schedule_day: Option<String>,
    /// Monthly frame (`first`, `mid`, `last`), or the raw cron string for
    /// `customcron` schedules.
    #[serde(default)]
    pub schedule_frame: Option<String>,
    /// Fields this crate does not interpret (ids, timestamps, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Reference to a report card included in a pulse.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PulseCard {
    pub id: i64,
    #[serde(default)]
    pub include_csv: bool,
    #[serde(default)]
    pub include_xls: bool,
}

/// A scheduled report/alert.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pulse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub cards: Vec<PulseCard>,
    #[serde(default)]
    pub channels: Vec<Channel>,
    #[serde(default)]
    pub skip_if_empty: bool,
    /// Remaining fields, passed through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Pulse {
    pub fn from_json_str(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schedule_type_parses_known_values() {
        assert_eq!(ScheduleType::from("hourly"), ScheduleType::Hourly);
        assert_eq!(ScheduleType::from("customcron"), ScheduleType::CustomCron);
        assert_eq!(
            ScheduleType::from("yearly"),
            ScheduleType::Other("yearly".into())
        );
    }

    #[test]
    fn schedule_type_serializes_as_plain_string() {
        let json = serde_json::to_string(&ScheduleType::Monthly).unwrap();
        assert_eq!(json, "\"monthly\"");
        let back: ScheduleType = serde_json::from_str("\"fortnightly\"").unwrap();
        assert_eq!(back.to_string(), "fortnightly");
    }

    #[test]
    fn channel_spec_reads_type_key() {
        let spec: ChannelSpec = serde_json::from_value(serde_json::json!({
            "type": "slack",
            "name": "Slack",
            "configured": true,
            "fields": [{ "name": "channel", "required": true }],
            "schedules": ["hourly", "daily"],
        }))
        .unwrap();
        assert_eq!(spec.channel_type, "slack");
        assert!(!spec.recipients);
        assert_eq!(spec.fields[0].name, "channel");
        assert_eq!(spec.schedules, vec![ScheduleType::Hourly, ScheduleType::Daily]);
    }

    #[test]
    fn channel_keeps_absent_and_empty_apart() {
        let absent: Channel = serde_json::from_value(serde_json::json!({
            "channel_type": "email",
        }))
        .unwrap();
        assert!(absent.recipients.is_none());
        assert!(absent.details.is_none());
        assert!(absent.schedule_type.is_none());

        let empty: Channel = serde_json::from_value(serde_json::json!({
            "channel_type": "email",
            "recipients": [],
            "details": {},
        }))
        .unwrap();
        assert_eq!(empty.recipients, Some(vec![]));
        assert_eq!(empty.details, Some(Map::new()));
    }

    #[test]
    fn pulse_keeps_unknown_fields() {
        let pulse = Pulse::from_json_str(
            r#"{
                "id": 7,
                "name": "Weekly revenue",
                "cards": [{ "id": 1, "include_csv": true }],
                "channels": [],
                "collection_id": 12
            }"#,
        )
        .unwrap();
        assert_eq!(pulse.id, Some(7));
        assert!(pulse.cards[0].include_csv);
        assert!(!pulse.cards[0].include_xls);
        assert!(!pulse.skip_if_empty);
        assert_eq!(pulse.extra["collection_id"], 12);

        let back = serde_json::to_value(&pulse).unwrap();
        assert_eq!(back["collection_id"], 12);
    }

    #[test]
    fn malformed_pulse_is_a_json_error() {
        let err = Pulse::from_json_str("{ \"cards\": 3 }").unwrap_err();
        assert!(matches!(err, crate::Error::Json(_)));
    }

    #[test]
    fn channel_specs_keep_insertion_order() {
        let specs = parse_channel_specs(
            r#"{
                "slack": { "type": "slack", "configured": true },
                "email": { "type": "email", "configured": false }
            }"#,
        )
        .unwrap();
        let keys: Vec<&str> = specs.keys().map(String::as_str).collect();
        assert_eq!(keys, ["slack", "email"]);
    }
}
