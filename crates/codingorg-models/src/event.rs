//! Events pushed to connected clients.
//!
//! An event is a small JSON object with a `type` discriminator. Events are
//! built once, serialized once per broadcast and never persisted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ids::SessionId;
use crate::task::TaskResult;

/// Kind of an event, serialized as the `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// Acknowledges a message received from a client.
    Ack,
    /// Lifecycle status of a session.
    Status,
    /// Intermediate progress of a session.
    Update,
    /// Terminal success of a session.
    FinalResult,
    /// Terminal failure of a session.
    Error,
}

impl EventKind {
    /// Returns true for kinds that close a session's event stream.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::FinalResult | Self::Error)
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Ack => "ack",
            Self::Status => "status",
            Self::Update => "update",
            Self::FinalResult => "final_result",
            Self::Error => "error",
        };
        f.write_str(s)
    }
}

/// A structured message delivered to one or more connections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Event discriminator.
    #[serde(rename = "type")]
    pub kind: EventKind,

    /// Human-readable text.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub message: Option<String>,

    /// Structured payload.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub data: Option<Value>,

    /// Session that produced the event, if any.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub session_id: Option<SessionId>,

    /// When the event was emitted.
    pub timestamp: DateTime<Utc>,
}

impl Event {
    fn new(kind: EventKind) -> Self {
        Self {
            kind,
            message: None,
            data: None,
            session_id: None,
            timestamp: Utc::now(),
        }
    }

    /// Acknowledgement echoed back to a client.
    pub fn ack(message: impl Into<String>) -> Self {
        Self::new(EventKind::Ack).with_message(message)
    }

    /// Session status change.
    pub fn status(session_id: &SessionId, message: impl Into<String>) -> Self {
        Self::new(EventKind::Status)
            .with_session(session_id)
            .with_message(message)
    }

    /// Intermediate session progress.
    ///
    /// Nothing emits this yet: runners return a single result. Reserved for
    /// a runner that streams its output.
    pub fn update(session_id: &SessionId, data: Value) -> Self {
        Self::new(EventKind::Update)
            .with_session(session_id)
            .with_data(data)
    }

    /// Terminal event for a successful session.
    ///
    /// The serialized result goes in `data`; the output text is repeated in
    /// `message` for clients that only render text.
    pub fn final_result(session_id: &SessionId, result: &TaskResult) -> Self {
        let mut event = Self::new(EventKind::FinalResult).with_session(session_id);
        event.message = Some(result.message().to_string());
        event.data = serde_json::to_value(result).ok();
        event
    }

    /// Terminal event for a failed session.
    pub fn error(session_id: &SessionId, message: impl Into<String>) -> Self {
        Self::new(EventKind::Error)
            .with_session(session_id)
            .with_message(message)
    }

    /// Sets the message text.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Sets the structured payload.
    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    /// Sets the originating session.
    pub fn with_session(mut self, session_id: &SessionId) -> Self {
        self.session_id = Some(session_id.clone());
        self
    }

    /// Serializes the event to a single-line JSON string.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
