//! Validation rules for pulse configurations.
//!
//! Every rule is a pure function over borrowed records:
//! - [`cron`]: restricted cron expressions carried by `customcron` channels
//! - [`channel`]: one channel against its capability spec
//! - [`pulse`]: pulse-level predicates and cleaning
//! - [`factory`]: default channel records and default spec selection

pub mod channel;
pub mod cron;
pub mod factory;
pub mod pulse;

pub use channel::{channel_is_valid, check_channel, ChannelIssue};
pub use cron::{check_cron_expression, validate_cron_expression, CronError, CronFields};
pub use factory::{default_channel, default_channel_preferring, new_channel, new_channel_with};
pub use pulse::{
    check_pulse, clean_pulse, email_is_enabled, pulse_is_valid, valid_channels, PulseIssue,
};
