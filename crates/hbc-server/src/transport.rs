//! The network line: one datagram in, one datagram out

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use hbc_core::hbc_core_types::schema::OP_DATAGRAM;
use hbc_core::hbc_core_types::DispatchContext;
use hbc_core::protocol::{self, MAX_DATAGRAM_SIZE};
use hbc_core::{
    log_op_end, log_op_error, log_op_start, ClientFrame, HbcError, Invoker, Response, Result,
    ServerFrame, ShutdownSignal,
};
use tokio::net::UdpSocket;

/// Bound datagram socket serving client frames
#[derive(Debug)]
pub struct UdpEndpoint {
    socket: UdpSocket,
    local_addr: SocketAddr,
}

impl UdpEndpoint {
    /// Bind `host:port`
    ///
    /// # Errors
    ///
    /// Returns `TransportSetup`, which is fatal for the server.
    pub async fn bind(host: &str, port: u16) -> Result<Self> {
        let addr = format!("{host}:{port}");
        let setup_error = |reason: String| HbcError::TransportSetup {
            addr: addr.clone(),
            reason,
        };
        let socket = UdpSocket::bind((host, port))
            .await
            .map_err(|e| setup_error(e.to_string()))?;
        let local_addr = socket.local_addr().map_err(|e| setup_error(e.to_string()))?;
        tracing::info!(local_addr = %local_addr, "datagram endpoint bound");
        Ok(Self { socket, local_addr })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Answer datagrams until `shutdown` fires
    ///
    /// Receive and send failures are logged and skipped; they never end the
    /// loop.
    pub async fn serve(&self, invoker: Arc<Invoker>, shutdown: ShutdownSignal) {
        let mut buf = vec![0u8; MAX_DATAGRAM_SIZE];
        loop {
            tokio::select! {
                _ = shutdown.triggered() => break,
                received = self.socket.recv_from(&mut buf) => match received {
                    Ok((len, peer)) => {
                        let reply = handle_datagram(&invoker, &buf[..len], peer);
                        if let Err(e) = self.socket.send_to(&reply, peer).await {
                            tracing::warn!(peer = %peer, error = %e, "failed to send reply");
                        }
                    }
                    Err(e) => tracing::warn!(error = %e, "failed to receive datagram"),
                },
            }
        }
        tracing::info!(local_addr = %self.local_addr, "network line stopped");
    }
}

/// Decode one datagram, dispatch it and encode the reply
///
/// Always yields bytes to send back: undecodable input and oversized
/// replies become error replies.
pub fn handle_datagram(invoker: &Invoker, bytes: &[u8], peer: SocketAddr) -> Vec<u8> {
    let decoded = protocol::decode::<ClientFrame>(bytes);
    let dispatch = match &decoded {
        Ok(frame) => DispatchContext::network(peer).with_request_id(frame.request_id().clone()),
        Err(_) => DispatchContext::network(peer),
    };
    log_op_start!(
        OP_DATAGRAM,
        peer = %peer,
        request_id = %dispatch.request_id,
        bytes = bytes.len() as u64
    );
    let start = Instant::now();

    let (request_id, frame) = match decoded {
        Ok(ClientFrame::Handshake { request_id }) => {
            let commands = invoker.advertised_commands();
            (
                Some(request_id.clone()),
                ServerFrame::Commands {
                    request_id,
                    commands,
                },
            )
        }
        Ok(ClientFrame::Invoke {
            request_id,
            request,
        }) => {
            let response = invoker.execute_client_command(request, &dispatch);
            (
                Some(request_id.clone()),
                ServerFrame::Reply {
                    request_id: Some(request_id),
                    response,
                },
            )
        }
        Err(err) => {
            log_op_error!(
                OP_DATAGRAM,
                err,
                duration_ms = start.elapsed().as_millis() as u64,
                peer = %peer,
                request_id = %dispatch.request_id
            );
            (
                None,
                ServerFrame::Reply {
                    request_id: None,
                    response: Response::from(&err),
                },
            )
        }
    };

    let encoded = protocol::encode(&frame).or_else(|err| {
        log_op_error!(
            OP_DATAGRAM,
            err,
            duration_ms = start.elapsed().as_millis() as u64,
            peer = %peer,
            request_id = %dispatch.request_id
        );
        protocol::encode(&ServerFrame::Reply {
            request_id,
            response: Response::from(&err),
        })
    });

    match encoded {
        Ok(reply) => {
            log_op_end!(
                OP_DATAGRAM,
                duration_ms = start.elapsed().as_millis() as u64,
                peer = %peer,
                request_id = %dispatch.request_id,
                reply_bytes = reply.len() as u64
            );
            reply
        }
        // An error reply is a few dozen bytes; encoding it cannot overflow
        Err(err) => {
            tracing::error!(error = %err, "cannot encode error reply");
            Vec::new()
        }
    }
}
