use std::net::SocketAddr;

use api::Server;
use common::logging::{self, CapturedLogs};
use common::{Error, LogConfig, ServerConfig};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::instrument::WithSubscriber;

fn loopback(port: u16) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port,
    }
}

/// Bind on an ephemeral port and serve until the returned sender fires
async fn spawn_server() -> (SocketAddr, oneshot::Sender<()>, JoinHandle<common::Result<()>>) {
    let server = Server::bind(&loopback(0)).await.unwrap();
    let addr = server.local_addr();
    let (tx, rx) = oneshot::channel::<()>();
    let handle = tokio::spawn(server.run_until(async {
        let _ = rx.await;
    }));
    (addr, tx, handle)
}

#[tokio::test]
async fn startup_logs_exactly_one_ready_line() {
    let logs = CapturedLogs::new();
    let dispatch = logging::dispatch(&LogConfig::default(), logs.clone()).unwrap();

    let server = Server::bind(&loopback(0))
        .with_subscriber(dispatch)
        .await
        .unwrap();

    let lines = logs.lines();
    assert_eq!(lines.len(), 1, "unexpected log output: {lines:?}");

    let record: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
    assert_eq!(record["level"], "INFO");
    assert_eq!(record["message"], "Server running");
    assert_eq!(record["addr"], server.local_addr().to_string());
    assert!(record["timestamp"].is_string());
}

#[tokio::test]
async fn occupied_port_fails_without_ready_line() {
    let occupant = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = occupant.local_addr().unwrap().port();

    let logs = CapturedLogs::new();
    let dispatch = logging::dispatch(&LogConfig::default(), logs.clone()).unwrap();

    let result = Server::bind(&loopback(port)).with_subscriber(dispatch).await;

    match result {
        Err(Error::Bind { addr, .. }) => assert_eq!(addr, format!("127.0.0.1:{port}")),
        Err(other) => panic!("expected bind error, got {other:?}"),
        Ok(_) => panic!("bind on an occupied port should fail"),
    }
    assert!(logs.lines().is_empty(), "unexpected log output: {:?}", logs.lines());
}

#[tokio::test]
async fn serves_both_routes_over_tcp() {
    let (addr, shutdown, handle) = spawn_server().await;
    let client = reqwest::Client::new();

    let root = client.get(format!("http://{addr}/")).send().await.unwrap();
    assert_eq!(root.status(), reqwest::StatusCode::OK);
    assert_eq!(
        root.text().await.unwrap(),
        r#"{"message":"Hello from Go Example","version":"1.0.0"}"#
    );

    let health = client.get(format!("http://{addr}/health")).send().await.unwrap();
    assert_eq!(health.status(), reqwest::StatusCode::OK);
    assert_eq!(health.text().await.unwrap(), r#"{"status":"healthy"}"#);

    let missing = client.get(format!("http://{addr}/nope")).send().await.unwrap();
    assert_eq!(missing.status(), reqwest::StatusCode::NOT_FOUND);

    shutdown.send(()).unwrap();
    handle.await.unwrap().unwrap();
}

#[tokio::test]
async fn concurrent_requests_get_independent_responses() {
    let (addr, shutdown, handle) = spawn_server().await;
    let client = reqwest::Client::new();

    let mut tasks = Vec::new();
    for i in 0..32 {
        let client = client.clone();
        let path = if i % 2 == 0 { "/" } else { "/health" };
        let url = format!("http://{addr}{path}");
        tasks.push(tokio::spawn(async move {
            let response = client.get(url).send().await.unwrap();
            let status = response.status();
            (path, status, response.text().await.unwrap())
        }));
    }

    for task in tasks {
        let (path, status, body) = task.await.unwrap();
        assert_eq!(status, reqwest::StatusCode::OK);
        let expected = match path {
            "/" => r#"{"message":"Hello from Go Example","version":"1.0.0"}"#,
            _ => r#"{"status":"healthy"}"#,
        };
        assert_eq!(body, expected, "path = {path}");
    }

    shutdown.send(()).unwrap();
    handle.await.unwrap().unwrap();
}

#[tokio::test]
async fn graceful_shutdown_returns_ok() {
    let (_addr, shutdown, handle) = spawn_server().await;

    shutdown.send(()).unwrap();
    assert!(handle.await.unwrap().is_ok());
}
