//! Telephony leg of a bridged call.
//!
//! # Supported Providers
//!
//! - **Twilio** - REST call placement plus bidirectional media streams

mod base;
pub mod twilio;

pub use base::{CallPlacer, PlacedCall, TelephonyError, TelephonyResult};
pub use twilio::{TwilioClient, TwilioConfig};
