use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use hbc_core::logging_facility::Profile;
use hbc_core::protocol;
use hbc_core::{ClientFrame, CommandData, Response, ServerFrame};
use hbc_server::{Server, ServerConfig};
use tempfile::TempDir;
use tokio::net::UdpSocket;
use tokio::task::JoinHandle;

/// Real server on a loopback ephemeral port, serving in the background
#[allow(dead_code)]
pub async fn spawn_server(dir: &TempDir) -> Arc<Server> {
    let config = ServerConfig {
        host: "127.0.0.1".to_string(),
        port: None,
        data_file: dir.path().join("humans.json"),
        log_profile: Profile::Test,
    };
    let server = Arc::new(Server::start(&config, 0).await.unwrap());
    let serving = Arc::clone(&server);
    tokio::spawn(async move {
        serving
            .endpoint()
            .serve(Arc::clone(serving.invoker()), serving.shutdown().clone())
            .await
    });
    server
}

/// Scripted peer that ignores the first `drop_first` datagrams
///
/// Advertises a single zero-argument `info` command and answers every
/// invocation with `ok`. Stops after a second of silence and returns how
/// many datagrams it received.
#[allow(dead_code)]
pub async fn spawn_lossy_server(drop_first: usize) -> (SocketAddr, JoinHandle<usize>) {
    let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let addr = socket.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        let mut buf = vec![0u8; protocol::MAX_DATAGRAM_SIZE];
        let mut received = 0;
        while let Ok(Ok((len, peer))) =
            tokio::time::timeout(Duration::from_secs(1), socket.recv_from(&mut buf)).await
        {
            received += 1;
            if received <= drop_first {
                continue;
            }
            let reply = match protocol::decode::<ClientFrame>(&buf[..len]).unwrap() {
                ClientFrame::Handshake { request_id } => ServerFrame::Commands {
                    request_id,
                    commands: vec![CommandData::new("info", "Show info", 0, "")],
                },
                ClientFrame::Invoke { request_id, .. } => ServerFrame::Reply {
                    request_id: Some(request_id),
                    response: Response::text("ok"),
                },
            };
            socket
                .send_to(&protocol::encode(&reply).unwrap(), peer)
                .await
                .unwrap();
        }
        received
    });
    (addr, handle)
}

/// Scripted peer that answers every datagram only after `delay`
///
/// Advertises zero-argument `info` and `show` commands and answers an
/// invocation with `reply to <command>`. Every datagram, resends included,
/// gets its own late answer. Stops after a second of silence.
#[allow(dead_code)]
pub async fn spawn_slow_server(delay: Duration) -> SocketAddr {
    let socket = Arc::new(UdpSocket::bind("127.0.0.1:0").await.unwrap());
    let addr = socket.local_addr().unwrap();
    tokio::spawn(async move {
        let mut buf = vec![0u8; protocol::MAX_DATAGRAM_SIZE];
        while let Ok(Ok((len, peer))) =
            tokio::time::timeout(Duration::from_secs(1), socket.recv_from(&mut buf)).await
        {
            let reply = match protocol::decode::<ClientFrame>(&buf[..len]).unwrap() {
                ClientFrame::Handshake { request_id } => ServerFrame::Commands {
                    request_id,
                    commands: vec![
                        CommandData::new("info", "Show info", 0, ""),
                        CommandData::new("show", "Show elements", 0, ""),
                    ],
                },
                ClientFrame::Invoke {
                    request_id,
                    request,
                } => ServerFrame::Reply {
                    request_id: Some(request_id),
                    response: Response::text(format!("reply to {}", request.command_name)),
                },
            };
            let socket = Arc::clone(&socket);
            tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                let _ = socket
                    .send_to(&protocol::encode(&reply).unwrap(), peer)
                    .await;
            });
        }
    });
    addr
}
