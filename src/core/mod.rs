pub mod realtime;
pub mod relay;
pub mod telephony;

pub use realtime::{OpenAIRealtime, RealtimeConfig, RealtimeError, RealtimeResult};
pub use relay::{CallSession, CallSlot, Session, SessionRegistry};
pub use telephony::{CallPlacer, TelephonyError, TwilioClient, TwilioConfig};
