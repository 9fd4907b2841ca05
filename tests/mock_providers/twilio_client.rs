//! Simulated Twilio media-stream client

use futures_util::{SinkExt, StreamExt};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::{self, Message};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

pub struct TwilioStreamClient {
    socket: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl TwilioStreamClient {
    /// Open the media stream the way Twilio does after the callee answers.
    pub async fn connect(server: SocketAddr) -> Result<Self, tungstenite::Error> {
        let (socket, _) = connect_async(format!("ws://{server}/ws")).await?;
        Ok(Self { socket })
    }

    pub async fn send_json(&mut self, value: serde_json::Value) {
        self.socket
            .send(Message::text(value.to_string()))
            .await
            .unwrap();
    }

    pub async fn send_raw(&mut self, text: &str) {
        self.socket
            .send(Message::text(text.to_string()))
            .await
            .unwrap();
    }

    pub async fn start(&mut self, stream_sid: &str) {
        self.send_json(serde_json::json!({
            "event": "start",
            "sequenceNumber": "1",
            "start": {
                "accountSid": "AC123",
                "streamSid": stream_sid,
                "callSid": "CA123",
                "tracks": ["inbound"],
                "mediaFormat": {"encoding": "audio/x-mulaw", "sampleRate": 8000, "channels": 1}
            },
            "streamSid": stream_sid
        }))
        .await;
    }

    pub async fn media(&mut self, stream_sid: &str, payload: &str) {
        self.send_json(serde_json::json!({
            "event": "media",
            "sequenceNumber": "2",
            "media": {"track": "inbound", "chunk": "1", "timestamp": "5", "payload": payload},
            "streamSid": stream_sid
        }))
        .await;
    }

    /// Next text frame from the server, `None` once the socket is closed.
    pub async fn next_text(&mut self) -> Option<String> {
        loop {
            let frame = tokio::time::timeout(Duration::from_secs(5), self.socket.next())
                .await
                .expect("timed out waiting for a frame from the server");
            match frame {
                Some(Ok(Message::Text(text))) => return Some(text.as_str().to_string()),
                Some(Ok(Message::Close(_))) | Some(Err(_)) | None => return None,
                Some(Ok(_)) => continue,
            }
        }
    }

    pub async fn close(mut self) {
        let _ = self.socket.close(None).await;
    }
}
