//! Correlation types for tracking a single command dispatch
//!
//! Every dispatch carries a `RequestId` so that the start/end log events of
//! one dispatch can be tied together. Network dispatches reuse the id the
//! client put on its frame, which the reply echoes back.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use uuid::Uuid;

/// Unique identifier for a single request or operation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(String);

impl RequestId {
    /// Generate a new random RequestId using UUIDv7
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Get the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Create from an existing string (for deserialization)
    pub fn from_string(s: String) -> Self {
        Self(s)
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which execution line issued a command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    /// Typed on the server's interactive console
    Console,
    /// Received as a datagram from a remote client
    Network,
}

impl Origin {
    pub fn as_str(&self) -> &'static str {
        match self {
            Origin::Console => "console",
            Origin::Network => "network",
        }
    }
}

impl std::fmt::Display for Origin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Context carried through one dispatch for correlation
#[derive(Debug, Clone)]
pub struct DispatchContext {
    pub request_id: RequestId,
    pub origin: Origin,
    pub peer: Option<SocketAddr>,
}

impl DispatchContext {
    /// Context for a command typed on the console
    pub fn console() -> Self {
        Self {
            request_id: RequestId::new(),
            origin: Origin::Console,
            peer: None,
        }
    }

    /// Context for a datagram received from `peer`
    pub fn network(peer: SocketAddr) -> Self {
        Self {
            request_id: RequestId::new(),
            origin: Origin::Network,
            peer: Some(peer),
        }
    }

    /// Reuse the id a client attached to its frame
    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = request_id;
        self
    }

    /// Peer address rendered for log fields (`-` for console dispatches)
    pub fn peer_label(&self) -> String {
        self.peer
            .map(|peer| peer.to_string())
            .unwrap_or_else(|| "-".to_string())
    }
}
