//! WebSocket frame abstraction shared by both legs.
//!
//! The telephony leg is served by axum and the realtime leg is dialed with
//! tokio-tungstenite. Both message types are reduced to [`FrameKind`] so the
//! relay pumps can be written once.

use bytes::Bytes;

/// What a received frame means to a pump.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameKind {
    Text(String),
    Binary(Bytes),
    /// Ping, pong or a raw frame: never application data
    Control,
    Close,
}

/// A WebSocket message type a pump can read and write.
pub trait WsFrame: Sized {
    fn text(text: String) -> Self;
    fn close() -> Self;
    fn into_kind(self) -> FrameKind;
}

impl WsFrame for axum::extract::ws::Message {
    fn text(text: String) -> Self {
        Self::Text(text.into())
    }

    fn close() -> Self {
        Self::Close(None)
    }

    fn into_kind(self) -> FrameKind {
        match self {
            Self::Text(text) => FrameKind::Text(text.as_str().to_owned()),
            Self::Binary(data) => FrameKind::Binary(data),
            Self::Ping(_) | Self::Pong(_) => FrameKind::Control,
            Self::Close(_) => FrameKind::Close,
        }
    }
}

impl WsFrame for tokio_tungstenite::tungstenite::Message {
    fn text(text: String) -> Self {
        Self::Text(text.into())
    }

    fn close() -> Self {
        Self::Close(None)
    }

    fn into_kind(self) -> FrameKind {
        match self {
            Self::Text(text) => FrameKind::Text(text.as_str().to_owned()),
            Self::Binary(data) => FrameKind::Binary(data),
            Self::Ping(_) | Self::Pong(_) | Self::Frame(_) => FrameKind::Control,
            Self::Close(_) => FrameKind::Close,
        }
    }
}
