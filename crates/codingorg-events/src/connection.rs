//! Client connection handles.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use codingorg_models::ConnectionId;
use tokio::sync::mpsc::{self, error::TrySendError};

use crate::error::DeliveryError;

/// One live bidirectional client channel as seen by the registry.
///
/// Implementations must be cheap to share (`Arc<dyn Connection>`); the
/// registry only ever sends text and checks liveness.
#[async_trait]
pub trait Connection: Send + Sync {
    /// Stable identity of this connection.
    fn id(&self) -> &ConnectionId;

    /// Whether the connection can still accept messages.
    fn is_alive(&self) -> bool;

    /// Sends one text message.
    ///
    /// Must not wait on a slow peer: a connection that cannot take the
    /// message right now reports an error instead.
    async fn send(&self, text: &str) -> std::result::Result<(), DeliveryError>;
}

/// Connection backed by an mpsc channel drained by a transport writer task.
///
/// The WebSocket gateway spawns one writer per socket that forwards every
/// string received here as a text frame. Sends never wait: when the writer
/// falls behind and the channel fills, the message is dropped with
/// [`DeliveryError::QueueFull`].
pub struct ChannelConnection {
    id: ConnectionId,
    tx: mpsc::Sender<String>,
    alive: AtomicBool,
    connected_at: Instant,
}

impl ChannelConnection {
    /// Creates a connection with a fresh id.
    pub fn new(tx: mpsc::Sender<String>) -> Self {
        Self::with_id(ConnectionId::new(), tx)
    }

    /// Creates a connection with the given id.
    pub fn with_id(id: ConnectionId, tx: mpsc::Sender<String>) -> Self {
        Self {
            id,
            tx,
            alive: AtomicBool::new(true),
            connected_at: Instant::now(),
        }
    }

    /// Marks the connection closed.
    ///
    /// Returns `true` only for the call that actually closed it, so the
    /// caller closing the transport does so exactly once.
    pub fn close(&self) -> bool {
        self.alive.swap(false, Ordering::AcqRel)
    }

    /// Connection age.
    pub fn age(&self) -> Duration {
        self.connected_at.elapsed()
    }
}

#[async_trait]
impl Connection for ChannelConnection {
    fn id(&self) -> &ConnectionId {
        &self.id
    }

    fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Acquire) && !self.tx.is_closed()
    }

    async fn send(&self, text: &str) -> std::result::Result<(), DeliveryError> {
        if !self.alive.load(Ordering::Acquire) {
            return Err(DeliveryError::Closed);
        }
        self.tx.try_send(text.to_string()).map_err(|e| match e {
            TrySendError::Full(_) => DeliveryError::QueueFull,
            TrySendError::Closed(_) => DeliveryError::Closed,
        })
    }
}
