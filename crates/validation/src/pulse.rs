//! Pulse-level predicates: dispatchability, email delivery, and cleaning.

use pulse_domain::{Channel, ChannelSpecs, Pulse, EMAIL_CHANNEL};

use crate::channel::channel_is_valid;

/// Why a pulse cannot be dispatched.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PulseIssue {
    #[error("pulse has no name")]
    MissingName,
    #[error("pulse has no cards")]
    NoCards,
    #[error("pulse has no valid channel")]
    NoValidChannels,
}

/// Channels of `pulse` that are valid under the channel spec registered for their
/// channel type. A channel whose type has no spec is skipped.
pub fn valid_channels<'a>(
    pulse: &'a Pulse,
    specs: Option<&'a ChannelSpecs>,
) -> impl Iterator<Item = &'a Channel> + 'a {
    pulse.channels.iter().filter(move |channel| {
        let spec = specs.and_then(|s| s.get(&channel.channel_type));
        channel_is_valid(channel, spec)
    })
}

/// Check that `pulse` is named, has cards, and has at least one valid channel.
pub fn check_pulse(pulse: &Pulse, specs: Option<&ChannelSpecs>) -> Result<(), PulseIssue> {
    if pulse.name.as_deref().map_or(true, str::is_empty) {
        return Err(PulseIssue::MissingName);
    }
    if pulse.cards.is_empty() {
        return Err(PulseIssue::NoCards);
    }
    if valid_channels(pulse, specs).next().is_none() {
        return Err(PulseIssue::NoValidChannels);
    }
    Ok(())
}

pub fn pulse_is_valid(pulse: &Pulse, specs: Option<&ChannelSpecs>) -> bool {
    match check_pulse(pulse, specs) {
        Ok(()) => true,
        Err(issue) => {
            tracing::debug!(pulse_id = ?pulse.id, issue = %issue, "pulse not dispatchable");
            false
        }
    }
}

/// Whether any enabled email channel exists. Channel validity is not checked.
pub fn email_is_enabled(pulse: &Pulse) -> bool {
    pulse
        .channels
        .iter()
        .any(|c| c.channel_type == EMAIL_CHANNEL && c.enabled)
}

/// Copy of `pulse` keeping only its valid channels, in their original order.
pub fn clean_pulse(pulse: &Pulse, specs: Option<&ChannelSpecs>) -> Pulse {
    let channels: Vec<Channel> = valid_channels(pulse, specs).cloned().collect();
    let dropped = pulse.channels.len() - channels.len();
    if dropped > 0 {
        tracing::debug!(pulse_id = ?pulse.id, dropped, "dropped invalid channels");
    }
    Pulse {
        channels,
        ..pulse.clone()
    }
}
