//! WebSocket mock of the OpenAI Realtime API

use futures_util::{SinkExt, StreamExt};
use parking_lot::Mutex;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tokio_tungstenite::accept_hdr_async;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::tungstenite::handshake::server::{ErrorResponse, Request, Response};

/// What the relay sent to the mock.
#[derive(Debug, Clone, PartialEq)]
pub enum MockEvent {
    Text(String),
    Close,
    /// The stream ended without a close frame
    Disconnected,
}

/// Handshake request as seen by the mock.
#[derive(Debug, Clone, Default)]
pub struct Handshake {
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub openai_beta: Option<String>,
}

pub struct MockRealtimeServer {
    pub addr: SocketAddr,
    pub handshake: Arc<Mutex<Option<Handshake>>>,
    pub connections: Arc<AtomicUsize>,
    events: mpsc::UnboundedReceiver<MockEvent>,
    outbound: mpsc::UnboundedSender<Message>,
}

impl MockRealtimeServer {
    /// Bind on an ephemeral port and accept a single realtime session.
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handshake = Arc::new(Mutex::new(None));
        let connections = Arc::new(AtomicUsize::new(0));
        let (events_tx, events) = mpsc::unbounded_channel();
        let (outbound, outbound_rx) = mpsc::unbounded_channel();

        let task_handshake = handshake.clone();
        let task_connections = connections.clone();
        tokio::spawn(async move {
            if let Ok((stream, _)) = listener.accept().await {
                task_connections.fetch_add(1, Ordering::SeqCst);
                handle_connection(stream, task_handshake, events_tx, outbound_rx).await;
            }
        });

        Self {
            addr,
            handshake,
            connections,
            events,
            outbound,
        }
    }

    /// URL to configure as the realtime endpoint.
    pub fn url(&self) -> String {
        format!("ws://{}/v1/realtime", self.addr)
    }

    /// Push a text frame to the relay.
    pub fn send_text(&self, text: &str) {
        self.outbound.send(Message::text(text.to_string())).unwrap();
    }

    /// Next frame received from the relay.
    pub async fn next_event(&mut self) -> MockEvent {
        tokio::time::timeout(Duration::from_secs(5), self.events.recv())
            .await
            .expect("timed out waiting for a frame from the relay")
            .unwrap_or(MockEvent::Disconnected)
    }

    /// Next text frame parsed as JSON.
    pub async fn next_json(&mut self) -> serde_json::Value {
        match self.next_event().await {
            MockEvent::Text(text) => serde_json::from_str(&text).unwrap(),
            other => panic!("expected a text frame, got {other:?}"),
        }
    }
}

async fn handle_connection(
    stream: TcpStream,
    handshake: Arc<Mutex<Option<Handshake>>>,
    events: mpsc::UnboundedSender<MockEvent>,
    mut outbound: mpsc::UnboundedReceiver<Message>,
) {
    let record = handshake.clone();
    let callback = move |request: &Request, response: Response| -> Result<Response, ErrorResponse> {
        let header = |name: &str| {
            request
                .headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        *record.lock() = Some(Handshake {
            path: request.uri().path().to_string(),
            query: request.uri().query().map(str::to_string),
            authorization: header("authorization"),
            openai_beta: header("openai-beta"),
        });
        Ok(response)
    };

    let Ok(ws_stream) = accept_hdr_async(stream, callback).await else {
        return;
    };
    let (mut write, mut read) = ws_stream.split();

    let writer = tokio::spawn(async move {
        while let Some(message) = outbound.recv().await {
            if write.send(message).await.is_err() {
                break;
            }
        }
    });

    loop {
        match read.next().await {
            Some(Ok(Message::Text(text))) => {
                let _ = events.send(MockEvent::Text(text.as_str().to_string()));
            }
            Some(Ok(Message::Close(_))) => {
                let _ = events.send(MockEvent::Close);
                break;
            }
            Some(Ok(_)) => {}
            Some(Err(_)) | None => {
                let _ = events.send(MockEvent::Disconnected);
                break;
            }
        }
    }

    writer.abort();
}
