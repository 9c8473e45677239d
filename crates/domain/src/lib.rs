//! Plain data records shared by the pulse validation rules.
//!
//! Nothing in this crate performs I/O. Records are handed over by the
//! persistence layer (usually as JSON) and are never mutated here.

pub mod config;
pub mod error;
pub mod model;

pub use error::{Error, Result};
pub use model::{
    Channel, ChannelSpec, ChannelSpecs, FieldSpec, Pulse, PulseCard, Recipient, ScheduleType,
    EMAIL_CHANNEL,
};
