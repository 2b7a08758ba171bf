//! Connection management and event delivery for codingorg.
//!
//! This crate provides the `ConnectionRegistry`, the only owner of the set of
//! live client connections:
//! - Register and unregister connections from concurrent request flows
//! - Broadcast an event to every connection, isolating per-connection failures
//! - Unicast an event to one connection
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use codingorg_events::{ChannelConnection, ConnectionRegistry};
//! use codingorg_models::Event;
//! use tokio::sync::mpsc;
//!
//! # async fn example() -> codingorg_events::Result<()> {
//! let registry = ConnectionRegistry::new();
//!
//! let (tx, mut rx) = mpsc::channel(64);
//! let conn = Arc::new(ChannelConnection::new(tx));
//! registry.register(conn.clone()).await?;
//!
//! let report = registry.broadcast(&Event::ack("hello")).await;
//! assert_eq!(report.delivered_count(), 1);
//! assert!(rx.recv().await.is_some());
//! # Ok(())
//! # }
//! ```

pub mod connection;
pub mod error;
pub mod registry;

pub use connection::{ChannelConnection, Connection};
pub use error::{DeliveryError, EventError, Result};
pub use registry::{ConnectionRegistry, Delivery, DeliveryFailure, DeliveryReport};
