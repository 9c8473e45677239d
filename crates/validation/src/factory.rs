//! New-channel construction and default channel selection.

use pulse_domain::config::ChannelDefaults;
use pulse_domain::{Channel, ChannelSpec, ChannelSpecs, EMAIL_CHANNEL};
use serde_json::Map;

/// Pick the channel kind a new pulse starts with: email when it is
/// configured, otherwise the first configured kind.
pub fn default_channel(specs: &ChannelSpecs) -> Option<&ChannelSpec> {
    default_channel_preferring(specs, EMAIL_CHANNEL)
}

/// Like [`default_channel`] with a caller-chosen first choice. A missing
/// `preferred` entry is not an error.
pub fn default_channel_preferring<'a>(
    specs: &'a ChannelSpecs,
    preferred: &str,
) -> Option<&'a ChannelSpec> {
    specs
        .get(preferred)
        .filter(|spec| spec.configured)
        .or_else(|| specs.values().find(|spec| spec.configured))
}

/// Fresh, enabled channel for `spec` using the stock [`ChannelDefaults`].
pub fn new_channel(spec: &ChannelSpec) -> Channel {
    new_channel_with(spec, &ChannelDefaults::default())
}

/// Fresh, enabled channel for `spec`.
///
/// The schedule type is the first one `spec` supports. Day, hour and frame
/// are stamped from `defaults` whatever the schedule type is.
pub fn new_channel_with(spec: &ChannelSpec, defaults: &ChannelDefaults) -> Channel {
    if spec.schedules.is_empty() {
        tracing::warn!(channel_type = %spec.channel_type, "channel spec lists no schedules");
    }
    Channel {
        channel_type: spec.channel_type.clone(),
        enabled: true,
        recipients: Some(Vec::new()),
        details: Some(Map::new()),
        schedule_type: spec.schedules.first().cloned(),
        schedule_hour: Some(defaults.schedule_hour),
        schedule_day: Some(defaults.schedule_day.clone()),
        schedule_frame: Some(defaults.schedule_frame.clone()),
        extra: Map::new(),
    }
}
