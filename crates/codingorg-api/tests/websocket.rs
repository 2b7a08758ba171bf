//! End-to-end WebSocket tests against a server on an ephemeral port.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use codingorg_api::{create_router, ApiConfig, AppState};
use codingorg_crew::ExternalTaskRunner;
use codingorg_events::ConnectionRegistry;
use codingorg_models::{Event, SessionId};
use futures::{SinkExt, StreamExt};
use serde_json::Value;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

const TIMEOUT: Duration = Duration::from_secs(5);

type WsStream = tokio_tungstenite::WebSocketStream<
    tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>,
>;

struct IdleRunner;

#[async_trait]
impl ExternalTaskRunner for IdleRunner {
    fn name(&self) -> &str {
        "idle"
    }

    fn preflight(&self) -> codingorg_crew::Result<()> {
        Ok(())
    }

    async fn execute(&self, _instruction: &str) -> codingorg_crew::Result<String> {
        Ok("nothing to do".into())
    }
}

/// Boots a server and returns its WS URL with the shared state.
async fn boot_server() -> (String, AppState) {
    let state = AppState::new(
        ApiConfig::new("127.0.0.1", 0),
        Arc::new(ConnectionRegistry::new()),
        Arc::new(IdleRunner),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = create_router(state.clone());
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("ws://{}/ws", addr), state)
}

/// Performs the upgrade by hand and returns the raw stream.
async fn raw_upgrade(url: &str) -> TcpStream {
    let authority = url
        .trim_start_matches("ws://")
        .trim_end_matches("/ws");
    let mut stream = TcpStream::connect(authority).await.unwrap();
    let request = format!(
        "GET /ws HTTP/1.1\r\n\
         Host: {authority}\r\n\
         Upgrade: websocket\r\n\
         Connection: Upgrade\r\n\
         Sec-WebSocket-Key: dGhlIHNhbXBsZSBub25jZQ==\r\n\
         Sec-WebSocket-Version: 13\r\n\r\n"
    );
    stream.write_all(request.as_bytes()).await.unwrap();

    let mut head = Vec::new();
    let mut byte = [0u8; 1];
    while !head.ends_with(b"\r\n\r\n") {
        let n = timeout(TIMEOUT, stream.read(&mut byte))
            .await
            .expect("handshake timed out")
            .unwrap();
        assert_eq!(n, 1, "connection closed during handshake");
        head.push(byte[0]);
    }
    let head = String::from_utf8(head).unwrap();
    assert!(head.starts_with("HTTP/1.1 101"), "unexpected response: {head}");
    stream
}

async fn connect(url: &str) -> WsStream {
    let (ws, _) = timeout(TIMEOUT, connect_async(url))
        .await
        .expect("connect timed out")
        .expect("connect failed");
    ws
}

async fn recv_json(ws: &mut WsStream) -> Value {
    loop {
        let msg = timeout(TIMEOUT, ws.next())
            .await
            .expect("receive timed out")
            .expect("stream ended")
            .expect("receive failed");
        if let Message::Text(text) = msg {
            return serde_json::from_str(text.as_str()).unwrap();
        }
    }
}

async fn wait_for_connections(state: &AppState, expected: usize) {
    timeout(TIMEOUT, async {
        while state.registry.len().await != expected {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("connection count never settled");
}

#[tokio::test]
async fn client_message_is_acknowledged() {
    let (url, _state) = boot_server().await;
    let mut ws = connect(&url).await;

    ws.send(Message::Text("hello".into())).await.unwrap();
    let ack = recv_json(&mut ws).await;

    assert_eq!(ack["type"], "ack");
    assert_eq!(ack["message"], "Received: hello");
    assert!(ack["timestamp"].is_string());
}

#[tokio::test]
async fn utf8_binary_frames_are_acknowledged() {
    let (url, _state) = boot_server().await;
    let mut ws = connect(&url).await;

    ws.send(Message::Binary(b"from binary".to_vec().into()))
        .await
        .unwrap();
    let ack = recv_json(&mut ws).await;

    assert_eq!(ack["message"], "Received: from binary");
}

#[tokio::test]
async fn ack_goes_only_to_sender() {
    let (url, state) = boot_server().await;
    let mut first = connect(&url).await;
    let mut second = connect(&url).await;
    wait_for_connections(&state, 2).await;

    first.send(Message::Text("ping".into())).await.unwrap();
    assert_eq!(recv_json(&mut first).await["message"], "Received: ping");

    second.send(Message::Text("pong".into())).await.unwrap();
    // The next frame on the second socket must be its own ack.
    assert_eq!(recv_json(&mut second).await["message"], "Received: pong");
}

#[tokio::test]
async fn broadcast_reaches_every_socket() {
    let (url, state) = boot_server().await;
    let mut first = connect(&url).await;
    let mut second = connect(&url).await;
    wait_for_connections(&state, 2).await;

    let report = state
        .registry
        .broadcast(&Event::status(&SessionId::from("sess-1"), "Task started"))
        .await;
    assert_eq!(report.delivered_count(), 2);

    for ws in [&mut first, &mut second] {
        let event = recv_json(ws).await;
        assert_eq!(event["type"], "status");
        assert_eq!(event["session_id"], "sess-1");
    }
}

#[tokio::test]
async fn closing_the_socket_unregisters_it() {
    let (url, state) = boot_server().await;
    let mut ws = connect(&url).await;
    wait_for_connections(&state, 1).await;

    ws.close(None).await.unwrap();
    wait_for_connections(&state, 0).await;
}

#[tokio::test]
async fn dropping_the_socket_unregisters_it() {
    let (url, state) = boot_server().await;
    let ws = connect(&url).await;
    wait_for_connections(&state, 1).await;

    drop(ws);
    wait_for_connections(&state, 0).await;
}

#[tokio::test]
async fn protocol_error_unregisters_and_closes_once() {
    let (url, state) = boot_server().await;
    let mut stream = raw_upgrade(&url).await;
    wait_for_connections(&state, 1).await;

    // Clients must mask their frames; an unmasked one is a protocol error.
    stream.write_all(&[0x81, 0x02, b'h', b'i']).await.unwrap();
    wait_for_connections(&state, 0).await;

    let mut rest = Vec::new();
    let mut chunk = [0u8; 64];
    loop {
        match timeout(TIMEOUT, stream.read(&mut chunk))
            .await
            .expect("server kept the socket open")
        {
            Ok(0) | Err(_) => break,
            Ok(n) => rest.extend_from_slice(&chunk[..n]),
        }
    }

    // Exactly one close frame carrying 1011 and no other frames.
    let reason = b"internal error";
    let mut expected = vec![0x88, (2 + reason.len()) as u8, 0x03, 0xF3];
    expected.extend_from_slice(reason);
    assert_eq!(rest, expected);
}
