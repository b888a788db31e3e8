use std::sync::Arc;
use std::time::Duration;

use hbc_core::protocol;
use hbc_core::{ClientFrame, ServerFrame};
use hbc_server::{Server, ServerConfig};
use tempfile::TempDir;
use tokio::net::UdpSocket;
use tokio::task::JoinHandle;

/// Loopback config with its data file inside `dir`
#[allow(dead_code)]
pub fn loopback_config(dir: &TempDir) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: None,
        data_file: dir.path().join("humans.json"),
        log_profile: hbc_core::logging_facility::Profile::Test,
    }
}

/// Send one frame and wait for the reply
#[allow(dead_code)]
pub async fn exchange(socket: &UdpSocket, frame: &ClientFrame) -> ServerFrame {
    let bytes = protocol::encode(frame).unwrap();
    exchange_raw(socket, &bytes).await
}

#[allow(dead_code)]
pub async fn exchange_raw(socket: &UdpSocket, bytes: &[u8]) -> ServerFrame {
    socket.send(bytes).await.unwrap();
    let mut buf = vec![0u8; protocol::MAX_DATAGRAM_SIZE];
    let len = tokio::time::timeout(Duration::from_secs(5), socket.recv(&mut buf))
        .await
        .expect("reply timed out")
        .unwrap();
    protocol::decode(&buf[..len]).unwrap()
}

/// Serve datagrams in the background until the server's shutdown fires
#[allow(dead_code)]
pub fn spawn_network_line(server: &Arc<Server>) -> JoinHandle<()> {
    let server = Arc::clone(server);
    tokio::spawn(async move {
        server
            .endpoint()
            .serve(Arc::clone(server.invoker()), server.shutdown().clone())
            .await
    })
}
