//! Channel validation against a channel-kind capability spec.

use pulse_domain::{Channel, ChannelSpec, ScheduleType};
use serde_json::Value;

use crate::cron::{check_cron_expression, CronError};

/// First rule a channel breaks.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ChannelIssue {
    #[error("no spec for channel type '{0}'")]
    MissingSpec(String),
    #[error("schedule type is missing")]
    MissingScheduleType,
    #[error("unsupported schedule type '{0}'")]
    UnknownScheduleType(String),
    #[error("custom cron schedule has no expression")]
    MissingCronExpression,
    #[error("invalid cron expression: {0}")]
    InvalidCron(#[from] CronError),
    #[error("{0} schedule needs schedule_day")]
    MissingDay(ScheduleType),
    #[error("{0} schedule needs schedule_hour")]
    MissingHour(ScheduleType),
    #[error("channel has no recipients")]
    MissingRecipients,
    #[error("required field '{0}' is empty")]
    MissingField(String),
}

/// Check `channel` against `spec` and report the first rule it breaks.
///
/// Rules, in order: `spec` must exist, the schedule fields must fit the
/// schedule type, recipients must be present when `spec` asks for them,
/// and every required detail field must be filled in.
pub fn check_channel(channel: &Channel, spec: Option<&ChannelSpec>) -> Result<(), ChannelIssue> {
    let spec = spec.ok_or_else(|| ChannelIssue::MissingSpec(channel.channel_type.clone()))?;
    check_schedule(channel)?;
    check_recipients(channel, spec)?;
    check_required_fields(channel, spec)
}

/// Whether `channel` is dispatchable under `spec`. A missing spec is invalid.
pub fn channel_is_valid(channel: &Channel, spec: Option<&ChannelSpec>) -> bool {
    match check_channel(channel, spec) {
        Ok(()) => true,
        Err(issue) => {
            tracing::debug!(
                channel_type = %channel.channel_type,
                issue = %issue,
                "channel rejected"
            );
            false
        }
    }
}

fn check_schedule(channel: &Channel) -> Result<(), ChannelIssue> {
    let schedule = channel
        .schedule_type
        .as_ref()
        .ok_or(ChannelIssue::MissingScheduleType)?;

    match schedule {
        ScheduleType::CustomCron => {
            let expression = channel
                .schedule_frame
                .as_deref()
                .ok_or(ChannelIssue::MissingCronExpression)?;
            check_cron_expression(expression)?;
            Ok(())
        }
        // A monthly schedule with a frame and an hour is complete. Otherwise
        // it is held to the weekly requirements.
        ScheduleType::Monthly if monthly_is_complete(channel) => Ok(()),
        ScheduleType::Monthly | ScheduleType::Weekly => {
            require_day(channel, schedule)?;
            require_hour(channel, schedule)
        }
        ScheduleType::Daily => require_hour(channel, schedule),
        ScheduleType::Hourly => Ok(()),
        ScheduleType::Other(other) => Err(ChannelIssue::UnknownScheduleType(other.clone())),
    }
}

fn monthly_is_complete(channel: &Channel) -> bool {
    channel.schedule_frame.is_some() && channel.schedule_hour.is_some()
}

fn require_day(channel: &Channel, schedule: &ScheduleType) -> Result<(), ChannelIssue> {
    match channel.schedule_day {
        Some(_) => Ok(()),
        None => Err(ChannelIssue::MissingDay(schedule.clone())),
    }
}

fn require_hour(channel: &Channel, schedule: &ScheduleType) -> Result<(), ChannelIssue> {
    match channel.schedule_hour {
        Some(_) => Ok(()),
        None => Err(ChannelIssue::MissingHour(schedule.clone())),
    }
}

/// Only presence is checked; an empty recipient list passes.
fn check_recipients(channel: &Channel, spec: &ChannelSpec) -> Result<(), ChannelIssue> {
    if spec.recipients && channel.recipients.is_none() {
        return Err(ChannelIssue::MissingRecipients);
    }
    Ok(())
}

/// Required fields are only enforced when the channel carries a `details`
/// map at all. A channel with no `details` passes this rule.
// TODO: fail required fields on a missing `details` map once callers stop
// sending channels without one.
fn check_required_fields(channel: &Channel, spec: &ChannelSpec) -> Result<(), ChannelIssue> {
    let Some(details) = channel.details.as_ref() else {
        return Ok(());
    };
    for field in spec.fields.iter().filter(|f| f.required) {
        if is_blank(details.get(&field.name)) {
            return Err(ChannelIssue::MissingField(field.name.clone()));
        }
    }
    Ok(())
}

fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}
