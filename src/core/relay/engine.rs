//! Relay engine.
//!
//! Runs the two pumps of a bridged call on the connection task:
//!
//! ```text
//! telephony reader --decode--> AudioAppend --> realtime writer
//! realtime reader  --decode--> MediaMessage --> telephony writer
//! ```
//!
//! Each pump processes frames strictly in arrival order. The first pump to
//! exit cancels the shared token, which interrupts the sibling's pending
//! read. Every pump then sends a close frame on the writer it owns, so both
//! sockets are closed whichever side failed. [`run`] returns once both pumps
//! have exited.
//!
//! There is no per-read deadline: a peer that stalls without closing stalls
//! its pump.

use std::fmt::{self, Display};

use futures::stream::{SplitSink, SplitStream};
use futures::{Sink, SinkExt, Stream, StreamExt};
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use super::codec::{self, AiEvent, CodecResult, TelephonyEvent};
use super::frame::{FrameKind, WsFrame};
use super::session::Session;

#[derive(Debug, Error)]
pub enum RelayError {
    /// `relay_session` was called before both legs were attached
    #[error("Session {0} does not hold both legs")]
    LegsMissing(String),
}

pub type RelayResult<T> = Result<T, RelayError>;

/// Relay direction, used in logs and reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    TelephonyToAi,
    AiToTelephony,
}

impl Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TelephonyToAi => write!(f, "telephony->ai"),
            Self::AiToTelephony => write!(f, "ai->telephony"),
        }
    }
}

/// Why a pump stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PumpExit {
    /// The peer sent a close frame or the stream ended
    PeerClosed,
    /// The sibling pump exited first
    Cancelled,
    ReadFailed(String),
    WriteFailed(String),
    /// Malformed JSON, or a recognized event with a malformed body
    Protocol(String),
}

/// Outcome of one pump.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PumpReport {
    pub forwarded: u64,
    pub exit: PumpExit,
}

/// Outcome of a whole relay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayReport {
    pub telephony_to_ai: PumpReport,
    pub ai_to_telephony: PumpReport,
}

/// One side of the relay, split into its read and write halves.
pub struct Leg<R, W> {
    pub reader: R,
    pub writer: W,
}

impl<R, W> Leg<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }
}

impl<S, M> Leg<SplitStream<S>, SplitSink<S, M>>
where
    S: Stream + Sink<M>,
{
    pub fn from_socket(socket: S) -> Self {
        let (writer, reader) = socket.split();
        Self { reader, writer }
    }
}

/// Take both sockets out of `session` and relay until the call ends.
pub async fn relay_session<T, A, MT, MA, TE, AE>(
    session: &Session<T, A>,
) -> RelayResult<RelayReport>
where
    T: Stream<Item = Result<MT, TE>> + Sink<MT>,
    A: Stream<Item = Result<MA, AE>> + Sink<MA>,
    <T as Sink<MT>>::Error: Display,
    <A as Sink<MA>>::Error: Display,
    MT: WsFrame,
    MA: WsFrame,
    TE: Display,
    AE: Display,
{
    let (telephony, ai) = session
        .take_legs()
        .ok_or_else(|| RelayError::LegsMissing(session.id().to_string()))?;

    Ok(run(session, Leg::from_socket(telephony), Leg::from_socket(ai)).await)
}

/// Relay between two already split legs.
pub async fn run<T, A, TR, TW, AR, AW, MT, MA, TE, AE>(
    session: &Session<T, A>,
    telephony: Leg<TR, TW>,
    ai: Leg<AR, AW>,
) -> RelayReport
where
    TR: Stream<Item = Result<MT, TE>> + Unpin,
    TW: Sink<MT> + Unpin,
    AR: Stream<Item = Result<MA, AE>> + Unpin,
    AW: Sink<MA> + Unpin,
    <TW as Sink<MT>>::Error: Display,
    <AW as Sink<MA>>::Error: Display,
    MT: WsFrame,
    MA: WsFrame,
    TE: Display,
    AE: Display,
{
    let cancel = CancellationToken::new();
    let session_id = session.id();
    info!(session_id = %session_id, "Relay started");

    let (telephony_to_ai, ai_to_telephony) = tokio::join!(
        pump(
            Direction::TelephonyToAi,
            session_id,
            telephony.reader,
            ai.writer,
            &cancel,
            |text| translate_telephony(session, text),
        ),
        pump(
            Direction::AiToTelephony,
            session_id,
            ai.reader,
            telephony.writer,
            &cancel,
            |text| translate_ai(session, text),
        ),
    );

    info!(
        session_id = %session_id,
        telephony_to_ai = telephony_to_ai.forwarded,
        ai_to_telephony = ai_to_telephony.forwarded,
        "Relay finished"
    );

    RelayReport {
        telephony_to_ai,
        ai_to_telephony,
    }
}

/// Telephony frame to an optional realtime frame.
fn translate_telephony<T, A>(session: &Session<T, A>, text: &str) -> CodecResult<Option<String>> {
    match codec::decode_telephony(text)? {
        TelephonyEvent::Media { payload } => codec::encode_audio_append(&payload).map(Some),
        TelephonyEvent::Start { stream_sid } => {
            info!(session_id = %session.id(), stream_sid = %stream_sid, "Media stream started");
            if let Some(previous) = session.set_stream_sid(stream_sid) {
                warn!(
                    session_id = %session.id(),
                    previous = %previous,
                    "Stream sid replaced by a later start event"
                );
            }
            Ok(None)
        }
        TelephonyEvent::Stop => {
            info!(session_id = %session.id(), "Media stream stopped");
            Ok(None)
        }
        TelephonyEvent::Other { event } => {
            info!(session_id = %session.id(), event = %event, "Ignoring telephony event");
            debug!(session_id = %session.id(), body = %text, "Ignored telephony frame");
            Ok(None)
        }
    }
}

/// Realtime frame to an optional telephony frame.
fn translate_ai<T, A>(session: &Session<T, A>, text: &str) -> CodecResult<Option<String>> {
    match codec::decode_ai(text)? {
        AiEvent::AudioDelta { delta } => {
            let stream_sid = session.stream_sid();
            if stream_sid.is_empty() {
                warn!(session_id = %session.id(), "Audio delta before stream start");
            }
            codec::encode_media(&stream_sid, &delta).map(Some)
        }
        AiEvent::Other { event_type } => {
            info!(session_id = %session.id(), event = %event_type, "Ignoring realtime event");
            debug!(session_id = %session.id(), body = %text, "Ignored realtime frame");
            Ok(None)
        }
    }
}

async fn pump<R, W, MIn, MOut, RE, F>(
    direction: Direction,
    session_id: &str,
    mut reader: R,
    mut writer: W,
    cancel: &CancellationToken,
    mut translate: F,
) -> PumpReport
where
    R: Stream<Item = Result<MIn, RE>> + Unpin,
    W: Sink<MOut> + Unpin,
    <W as Sink<MOut>>::Error: Display,
    MIn: WsFrame,
    MOut: WsFrame,
    RE: Display,
    F: FnMut(&str) -> CodecResult<Option<String>>,
{
    let mut forwarded = 0u64;

    let exit = loop {
        let next = tokio::select! {
            biased;
            _ = cancel.cancelled() => break PumpExit::Cancelled,
            next = reader.next() => next,
        };

        let frame = match next {
            None => break PumpExit::PeerClosed,
            Some(Err(e)) => break PumpExit::ReadFailed(e.to_string()),
            Some(Ok(frame)) => frame,
        };

        let text = match frame.into_kind() {
            FrameKind::Text(text) => text,
            FrameKind::Binary(data) => match String::from_utf8(data.to_vec()) {
                Ok(text) => text,
                Err(e) => break PumpExit::Protocol(format!("binary frame is not UTF-8: {e}")),
            },
            FrameKind::Control => continue,
            FrameKind::Close => break PumpExit::PeerClosed,
        };

        match translate(&text) {
            Ok(Some(out)) => {
                if let Err(e) = writer.send(MOut::text(out)).await {
                    break PumpExit::WriteFailed(e.to_string());
                }
                forwarded += 1;
            }
            Ok(None) => {}
            Err(e) => break PumpExit::Protocol(e.to_string()),
        }
    };

    match &exit {
        PumpExit::PeerClosed => {
            info!(session_id = %session_id, direction = %direction, "Peer closed, closing both legs")
        }
        PumpExit::Cancelled => {
            debug!(session_id = %session_id, direction = %direction, "Pump cancelled")
        }
        PumpExit::ReadFailed(e) => {
            error!(session_id = %session_id, direction = %direction, "Read failed: {}", e)
        }
        PumpExit::WriteFailed(e) => {
            error!(session_id = %session_id, direction = %direction, "Write failed: {}", e)
        }
        PumpExit::Protocol(e) => {
            error!(session_id = %session_id, direction = %direction, "Protocol error: {}", e)
        }
    }

    cancel.cancel();

    if let Err(e) = writer.send(MOut::close()).await {
        debug!(session_id = %session_id, direction = %direction, "Close frame not sent: {}", e);
    }
    if let Err(e) = writer.close().await {
        debug!(session_id = %session_id, direction = %direction, "Writer close failed: {}", e);
    }

    PumpReport { forwarded, exit }
}
