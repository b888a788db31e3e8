//! Datagram wire format
//!
//! One frame per datagram, JSON encoded. A client first sends
//! [`ClientFrame::Handshake`] to learn the advertised command shapes, then
//! one [`ClientFrame::Invoke`] per command; each gets exactly one reply
//! carrying the request id of the frame it answers.

use hbc_core_types::RequestId;
use serde::{Deserialize, Serialize};

use crate::argument::{CommandArgument, CommandData};
use crate::errors::{HbcError, Result};
use crate::model::HumanBeing;

/// Largest payload a single UDP datagram can carry over IPv4
pub const MAX_DATAGRAM_SIZE: usize = 65_507;

/// A command invocation sent by a client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    pub command_name: String,
    pub argument: CommandArgument,
}

impl Request {
    pub fn new(command_name: impl Into<String>, argument: CommandArgument) -> Self {
        Self {
            command_name: command_name.into(),
            argument,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseStatus {
    Ok,
    Error,
}

/// Result of one command execution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub status: ResponseStatus,
    pub payload: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elements: Option<Vec<HumanBeing>>,
}

impl Response {
    pub fn text(payload: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Ok,
            payload: payload.into(),
            elements: None,
        }
    }

    /// Text plus structured rows for display
    pub fn with_elements(payload: impl Into<String>, elements: Vec<HumanBeing>) -> Self {
        Self {
            status: ResponseStatus::Ok,
            payload: payload.into(),
            elements: Some(elements),
        }
    }

    pub fn error(payload: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Error,
            payload: payload.into(),
            elements: None,
        }
    }

    pub fn is_error(&self) -> bool {
        self.status == ResponseStatus::Error
    }

    /// Payload followed by one line per element
    pub fn render(&self) -> String {
        let mut out = self.payload.clone();
        for element in self.elements.iter().flatten() {
            out.push('\n');
            out.push_str(&element.to_string());
        }
        out
    }
}

impl From<&HbcError> for Response {
    fn from(err: &HbcError) -> Self {
        Response::error(err.to_string())
    }
}

/// Frames a client may send
///
/// Every frame carries a fresh [`RequestId`]; resends of the same frame keep
/// it, so a reply can be matched to the request it answers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "body", rename_all = "snake_case")]
pub enum ClientFrame {
    Handshake {
        request_id: RequestId,
    },
    Invoke {
        request_id: RequestId,
        request: Request,
    },
}

impl ClientFrame {
    pub fn handshake() -> Self {
        ClientFrame::Handshake {
            request_id: RequestId::new(),
        }
    }

    pub fn invoke(request: Request) -> Self {
        ClientFrame::Invoke {
            request_id: RequestId::new(),
            request,
        }
    }

    pub fn request_id(&self) -> &RequestId {
        match self {
            ClientFrame::Handshake { request_id } | ClientFrame::Invoke { request_id, .. } => {
                request_id
            }
        }
    }
}

/// Frames the server sends back, echoing the id of the frame they answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "body", rename_all = "snake_case")]
pub enum ServerFrame {
    Commands {
        request_id: RequestId,
        commands: Vec<CommandData>,
    },
    /// `request_id` is absent when the datagram could not be decoded
    Reply {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        request_id: Option<RequestId>,
        response: Response,
    },
}

impl ServerFrame {
    pub fn request_id(&self) -> Option<&RequestId> {
        match self {
            ServerFrame::Commands { request_id, .. } => Some(request_id),
            ServerFrame::Reply { request_id, .. } => request_id.as_ref(),
        }
    }
}

/// Encode a frame into one datagram
///
/// # Errors
///
/// Returns `Protocol` if the frame does not fit in a datagram.
pub fn encode<T: Serialize>(frame: &T) -> Result<Vec<u8>> {
    let bytes = serde_json::to_vec(frame)?;
    if bytes.len() > MAX_DATAGRAM_SIZE {
        return Err(HbcError::Protocol {
            reason: format!(
                "frame of {} bytes exceeds datagram limit of {MAX_DATAGRAM_SIZE}",
                bytes.len()
            ),
        });
    }
    Ok(bytes)
}

/// Decode one datagram
///
/// # Errors
///
/// Returns `Protocol` for anything that is not a well-formed frame.
pub fn decode<'a, T: Deserialize<'a>>(bytes: &'a [u8]) -> Result<T> {
    Ok(serde_json::from_slice(bytes)?)
}
