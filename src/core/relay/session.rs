//! Per-call session state.
//!
//! A [`Session`] is created for every accepted media-stream connection and is
//! passed by reference through the acceptor, the realtime connector and the
//! relay engine. All fields live behind a single synchronous mutex, so the
//! lock can never be held across an `.await` and one leg can never stall the
//! other while waiting on the lock.

use parking_lot::Mutex;

struct SessionInner<T, A> {
    telephony: Option<T>,
    ai: Option<A>,
    telephony_ready: bool,
    stream_sid: String,
}

/// State shared by the two legs of one call.
///
/// `T` is the telephony socket and `A` the realtime socket. `telephony_ready`
/// records that the telephony leg was established for this session; it stays
/// set after [`Session::take_legs`] hands the sockets to the relay.
pub struct Session<T, A> {
    id: String,
    inner: Mutex<SessionInner<T, A>>,
}

impl<T, A> Session<T, A> {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            inner: Mutex::new(SessionInner {
                telephony: None,
                ai: None,
                telephony_ready: false,
                stream_sid: String::new(),
            }),
        }
    }

    /// Session identifier used for log correlation and registry keying.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Store the telephony socket and flag the leg as ready in one step.
    pub fn mark_telephony_ready(&self, socket: T) {
        let mut inner = self.inner.lock();
        inner.telephony = Some(socket);
        inner.telephony_ready = true;
    }

    pub fn is_telephony_ready(&self) -> bool {
        self.inner.lock().telephony_ready
    }

    /// Store the realtime socket once the provider handshake is done.
    pub fn attach_ai(&self, socket: A) {
        self.inner.lock().ai = Some(socket);
    }

    pub fn has_ai(&self) -> bool {
        self.inner.lock().ai.is_some()
    }

    /// Remove both sockets for the relay.
    ///
    /// Returns `None` and leaves the session untouched unless both legs are
    /// present.
    pub fn take_legs(&self) -> Option<(T, A)> {
        let mut inner = self.inner.lock();
        if inner.telephony.is_none() || inner.ai.is_none() {
            return None;
        }
        let telephony = inner.telephony.take()?;
        let ai = inner.ai.take()?;
        Some((telephony, ai))
    }

    /// Current stream session identifier, empty until a `start` event.
    pub fn stream_sid(&self) -> String {
        self.inner.lock().stream_sid.clone()
    }

    /// Record the stream identifier, returning the previous one if any.
    pub fn set_stream_sid(&self, stream_sid: impl Into<String>) -> Option<String> {
        let mut inner = self.inner.lock();
        let previous = std::mem::replace(&mut inner.stream_sid, stream_sid.into());
        (!previous.is_empty()).then_some(previous)
    }
}

impl<T, A> std::fmt::Debug for Session<T, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("telephony_ready", &inner.telephony_ready)
            .field("has_telephony", &inner.telephony.is_some())
            .field("has_ai", &inner.ai.is_some())
            .field("stream_sid", &inner.stream_sid)
            .finish()
    }
}
