//! ConnectionRegistry - the live connection set with fan-out delivery.
//!
//! Concurrency patterns:
//! - `tokio::sync::RwLock<Vec<..>>` holds the set; registration order is kept
//!   so iteration is deterministic.
//! - Broadcast copies the set under the read lock and releases it before any
//!   send is awaited. Register/unregister never wait on a slow client, and a
//!   broadcast in flight never sees a half-mutated set.
//! - Per-connection sends run concurrently via `join_all`; the call returns
//!   once every send has resolved.

use std::sync::Arc;

use codingorg_models::{ConnectionId, Event};
use futures::future::join_all;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::connection::Connection;
use crate::error::{DeliveryError, EventError, Result};

/// One failed delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryFailure {
    /// Connection the message was meant for.
    pub connection_id: ConnectionId,
    /// Why it was not delivered.
    pub error: DeliveryError,
}

/// Outcome of a broadcast.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeliveryReport {
    /// Connections that accepted the message.
    pub delivered: Vec<ConnectionId>,
    /// Connections that did not.
    pub failed: Vec<DeliveryFailure>,
}

impl DeliveryReport {
    /// Number of successful deliveries.
    pub fn delivered_count(&self) -> usize {
        self.delivered.len()
    }

    /// Number of failed deliveries.
    pub fn failure_count(&self) -> usize {
        self.failed.len()
    }

    /// Number of connections a delivery was attempted for.
    pub fn attempted(&self) -> usize {
        self.delivered.len() + self.failed.len()
    }

    /// True if nothing failed.
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Outcome of a unicast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// The connection accepted the message.
    Delivered,
    /// The connection is not registered; nothing was sent.
    NotRegistered,
    /// The connection is registered but the send failed.
    Failed(DeliveryError),
}

impl Delivery {
    /// True if the message was delivered.
    pub fn is_delivered(&self) -> bool {
        matches!(self, Self::Delivered)
    }
}

/// Tracks live client connections and delivers events to them.
///
/// Failed deliveries are logged and reported but never remove a connection;
/// only the transport boundary calls [`unregister`](Self::unregister).
pub struct ConnectionRegistry {
    connections: RwLock<Vec<Arc<dyn Connection>>>,
}

impl ConnectionRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            connections: RwLock::new(Vec::new()),
        }
    }

    /// Adds a connection to the live set.
    ///
    /// Returns `Ok(false)` if a connection with the same id is already
    /// registered.
    ///
    /// # Errors
    ///
    /// `EventError::InvalidConnection` if the connection has an empty id or is
    /// no longer alive.
    pub async fn register(&self, connection: Arc<dyn Connection>) -> Result<bool> {
        let id = connection.id().clone();
        if id.is_empty() {
            return Err(EventError::InvalidConnection("empty connection id".into()));
        }
        if !connection.is_alive() {
            return Err(EventError::InvalidConnection(format!(
                "connection {} is not alive",
                id
            )));
        }

        let mut conns = self.connections.write().await;
        if conns.iter().any(|c| c.id() == &id) {
            debug!(connection_id = %id, "connection already registered");
            return Ok(false);
        }
        conns.push(connection);
        info!(connection_id = %id, total = conns.len(), "connection registered");
        Ok(true)
    }

    /// Removes a connection from the live set.
    ///
    /// Returns whether a connection was removed; removing an unknown id is a
    /// no-op.
    pub async fn unregister(&self, id: &ConnectionId) -> bool {
        let mut conns = self.connections.write().await;
        let before = conns.len();
        conns.retain(|c| c.id() != id);
        let removed = conns.len() != before;
        if removed {
            info!(connection_id = %id, total = conns.len(), "connection unregistered");
        }
        removed
    }

    /// Delivers an event to every registered connection.
    pub async fn broadcast(&self, event: &Event) -> DeliveryReport {
        let json = match event.to_json() {
            Ok(json) => json,
            Err(e) => {
                warn!(event_type = %event.kind, error = %e, "failed to serialize event");
                return DeliveryReport::default();
            }
        };

        let snapshot: Vec<Arc<dyn Connection>> = self.connections.read().await.clone();
        debug!(
            event_type = %event.kind,
            recipients = snapshot.len(),
            "broadcast event"
        );

        let sends = snapshot.iter().map(|conn| {
            let json = json.as_str();
            async move { (conn.id().clone(), conn.send(json).await) }
        });

        let mut report = DeliveryReport::default();
        for (connection_id, outcome) in join_all(sends).await {
            match outcome {
                Ok(()) => report.delivered.push(connection_id),
                Err(error) => {
                    warn!(
                        connection_id = %connection_id,
                        event_type = %event.kind,
                        error = %error,
                        "failed to deliver event"
                    );
                    report.failed.push(DeliveryFailure {
                        connection_id,
                        error,
                    });
                }
            }
        }
        report
    }

    /// Delivers an event to one registered connection.
    pub async fn unicast(&self, event: &Event, id: &ConnectionId) -> Delivery {
        let target = {
            let conns = self.connections.read().await;
            conns.iter().find(|c| c.id() == id).cloned()
        };
        let Some(conn) = target else {
            debug!(connection_id = %id, event_type = %event.kind, "unicast to unregistered connection");
            return Delivery::NotRegistered;
        };

        let json = match event.to_json() {
            Ok(json) => json,
            Err(e) => {
                warn!(event_type = %event.kind, error = %e, "failed to serialize event");
                return Delivery::Failed(DeliveryError::Transport(e.to_string()));
            }
        };

        match conn.send(&json).await {
            Ok(()) => Delivery::Delivered,
            Err(error) => {
                warn!(
                    connection_id = %id,
                    event_type = %event.kind,
                    error = %error,
                    "failed to deliver event"
                );
                Delivery::Failed(error)
            }
        }
    }

    /// Returns true if the id is registered.
    pub async fn contains(&self, id: &ConnectionId) -> bool {
        self.connections.read().await.iter().any(|c| c.id() == id)
    }

    /// Registered ids in registration order.
    pub async fn connection_ids(&self) -> Vec<ConnectionId> {
        self.connections
            .read()
            .await
            .iter()
            .map(|c| c.id().clone())
            .collect()
    }

    /// Number of registered connections.
    pub async fn len(&self) -> usize {
        self.connections.read().await.len()
    }

    /// Returns true if no connection is registered.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for ConnectionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
