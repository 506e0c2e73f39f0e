//! Server lifecycle: serving over a real socket and draining on signal.

mod helpers;

use std::future::IntoFuture;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::sync::watch;

use helpers::{ScriptedTransport, TestApp};

#[tokio::test]
async fn test_server_serves_then_drains_on_shutdown_signal() {
    let app = TestApp::new(ScriptedTransport::default());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
    let server = axum::serve(listener, app.router.clone()).with_graceful_shutdown(async move {
        let _ = shutdown_rx.changed().await;
    });
    let server_task = tokio::spawn(server.into_future());

    let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
    stream
        .write_all(b"GET /api/health HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
        .await
        .unwrap();
    let mut response = String::new();
    stream.read_to_string(&mut response).await.unwrap();
    assert!(response.starts_with("HTTP/1.1 200"), "{response}");

    shutdown_tx.send(true).unwrap();
    let joined = tokio::time::timeout(Duration::from_secs(5), server_task)
        .await
        .expect("Server did not drain after shutdown signal")
        .unwrap();
    assert!(joined.is_ok());
}
