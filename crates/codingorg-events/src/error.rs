//! Error types for connection and delivery operations.

use thiserror::Error;

/// Errors returned by registry operations.
#[derive(Error, Debug)]
pub enum EventError {
    /// The connection handle cannot be registered.
    #[error("invalid connection: {0}")]
    InvalidConnection(String),
}

/// Why a message could not be delivered to one connection.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeliveryError {
    /// The connection is closed or its writer has gone away.
    #[error("connection closed")]
    Closed,

    /// The connection's outbound queue is full; the message was dropped.
    #[error("send queue full")]
    QueueFull,

    /// The transport rejected the message.
    #[error("transport error: {0}")]
    Transport(String),
}

/// Result type alias for registry operations.
pub type Result<T> = std::result::Result<T, EventError>;
