//! Datagram client with handshake, local validation and resend on timeout

use std::net::SocketAddr;
use std::time::Duration;

use hbc_core::protocol::{self, MAX_DATAGRAM_SIZE};
use hbc_core::rules::validation;
use hbc_core::{
    ClientFrame, CommandArgument, CommandData, HbcError, Request, Response, Result, ServerFrame,
};
use tokio::net::UdpSocket;

/// Connected client that knows the server's advertised commands
#[derive(Debug)]
pub struct UdpClient {
    socket: UdpSocket,
    server: SocketAddr,
    timeout: Duration,
    retries: u32,
    commands: Vec<CommandData>,
}

impl UdpClient {
    /// Bind an ephemeral port, point it at `server` and fetch the command set
    ///
    /// # Errors
    ///
    /// Returns `TransportSetup` if the address does not resolve or the socket
    /// cannot be bound, `Io` if the server never answers the handshake.
    pub async fn connect(server: &str, timeout: Duration, retries: u32) -> Result<Self> {
        let setup_error = |reason: String| HbcError::TransportSetup {
            addr: server.to_string(),
            reason,
        };
        let server_addr = tokio::net::lookup_host(server)
            .await
            .map_err(|e| setup_error(e.to_string()))?
            .next()
            .ok_or_else(|| setup_error("address did not resolve".to_string()))?;
        let local = if server_addr.is_ipv4() {
            "0.0.0.0:0"
        } else {
            "[::]:0"
        };
        let socket = UdpSocket::bind(local)
            .await
            .map_err(|e| setup_error(e.to_string()))?;
        socket
            .connect(server_addr)
            .await
            .map_err(|e| setup_error(e.to_string()))?;

        let mut client = Self {
            socket,
            server: server_addr,
            timeout,
            retries,
            commands: Vec::new(),
        };
        client.commands = match client.exchange(&ClientFrame::handshake()).await? {
            ServerFrame::Commands { commands, .. } => commands,
            ServerFrame::Reply { response, .. } => {
                return Err(HbcError::Protocol {
                    reason: format!("expected command list, got reply: {}", response.payload),
                })
            }
        };
        tracing::debug!(server = %server_addr, commands = client.commands.len(), "handshake complete");
        Ok(client)
    }

    pub fn server(&self) -> SocketAddr {
        self.server
    }

    /// Commands the server advertised, sorted by name
    pub fn commands(&self) -> &[CommandData] {
        &self.commands
    }

    /// Check an invocation against the advertised shape without sending it
    ///
    /// # Errors
    ///
    /// Returns `CommandNotFound`, `InvalidNumberOfArgs` or `Validation`.
    pub fn check(&self, name: &str, argument: &CommandArgument) -> Result<()> {
        let data = self
            .commands
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| HbcError::CommandNotFound {
                name: name.to_string(),
            })?;
        validation::validate_shape(data, argument)
    }

    /// Validate locally, then send and wait for the response
    ///
    /// # Errors
    ///
    /// Local validation errors as for [`UdpClient::check`]; `Io` when every
    /// attempt timed out; `Protocol` for an unexpected reply.
    pub async fn send(&self, request: Request) -> Result<Response> {
        self.check(&request.command_name, &request.argument)?;
        match self.exchange(&ClientFrame::invoke(request)).await? {
            ServerFrame::Reply { response, .. } => Ok(response),
            ServerFrame::Commands { .. } => Err(HbcError::Protocol {
                reason: "expected reply, got command list".to_string(),
            }),
        }
    }

    /// Send `frame` and wait for the reply carrying its request id
    ///
    /// Each attempt waits up to `timeout`; replies to other requests (late
    /// answers to an earlier attempt or command) are dropped while waiting.
    /// A resend keeps the id, so the server may execute the command more
    /// than once.
    async fn exchange(&self, frame: &ClientFrame) -> Result<ServerFrame> {
        let bytes = protocol::encode(frame)?;
        let expected = frame.request_id();
        let mut buf = vec![0u8; MAX_DATAGRAM_SIZE];
        for attempt in 0..=self.retries {
            self.socket
                .send(&bytes)
                .await
                .map_err(|e| HbcError::io("send datagram", &e))?;
            let deadline = tokio::time::Instant::now() + self.timeout;
            loop {
                let len = match tokio::time::timeout_at(deadline, self.socket.recv(&mut buf)).await
                {
                    Ok(Ok(len)) => len,
                    Ok(Err(e)) => return Err(HbcError::io("receive datagram", &e)),
                    Err(_) => {
                        tracing::debug!(server = %self.server, attempt, "reply timed out");
                        break;
                    }
                };
                match protocol::decode::<ServerFrame>(&buf[..len]) {
                    Ok(reply) if reply.request_id() == Some(expected) => return Ok(reply),
                    // The server could not read our frame at all
                    Ok(ServerFrame::Reply {
                        request_id: None,
                        response,
                    }) => {
                        return Err(HbcError::Protocol {
                            reason: response.payload,
                        })
                    }
                    Ok(reply) => tracing::debug!(
                        server = %self.server,
                        expected = %expected,
                        received = ?reply.request_id(),
                        "dropping stale reply"
                    ),
                    Err(err) => {
                        tracing::debug!(server = %self.server, error = %err, "dropping undecodable reply")
                    }
                }
            }
        }
        Err(HbcError::Io {
            op: "await reply".to_string(),
            reason: format!(
                "no reply from {} after {} attempt(s)",
                self.server,
                self.retries + 1
            ),
        })
    }
}
