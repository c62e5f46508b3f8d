use std::net::SocketAddr;

use login_requester::internal::server::{MockServer, MockUser};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Mock login server on an ephemeral port with the default `10000/snai/snai` user
pub async fn spawn_mock_server() -> (SocketAddr, JoinHandle<anyhow::Result<()>>) {
    spawn_mock_server_with(vec![MockUser::default()]).await
}

pub async fn spawn_mock_server_with(
    users: Vec<MockUser>,
) -> (SocketAddr, JoinHandle<anyhow::Result<()>>) {
    let server = MockServer::bind("127.0.0.1:0", users)
        .await
        .expect("Failed to bind mock server");
    server.spawn().expect("Failed to spawn mock server")
}

/// Mock login server with the given users, returning its login URL
pub async fn spawn_login_server_with(
    users: Vec<MockUser>,
) -> (String, JoinHandle<anyhow::Result<()>>) {
    let server = MockServer::bind("127.0.0.1:0", users)
        .await
        .expect("Failed to bind mock server");
    let login_url = server.login_url().expect("Failed to read login URL");
    let (_, handle) = server.spawn().expect("Failed to spawn mock server");
    (login_url, handle)
}

pub async fn spawn_login_server() -> (String, JoinHandle<anyhow::Result<()>>) {
    spawn_login_server_with(vec![MockUser::default()]).await
}

/// Accepts connections and never answers them
pub async fn spawn_silent_server() -> (SocketAddr, JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind silent server");
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((stream, _)) = listener.accept().await {
            held.push(stream);
        }
    });

    (addr, handle)
}

/// An address with nothing listening on it
pub fn unused_addr() -> SocketAddr {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap()
}

pub fn url(addr: SocketAddr, path: &str) -> String {
    format!("http://{}{}", addr, path)
}
