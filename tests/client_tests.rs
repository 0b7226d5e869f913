use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use sockrelay::{ClientError, Connector, ConnectorConfig};
use tokio::io::{AsyncRead, AsyncReadExt, ReadBuf};
use tokio::net::TcpListener;
use tokio::time::timeout;

/// A loopback port with nothing listening on it.
fn closed_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

/// Dummy server: accepts exactly one connection and returns what it read.
async fn spawn_collector() -> (u16, tokio::task::JoinHandle<Vec<u8>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let handle = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let mut received = Vec::new();
        stream.read_to_end(&mut received).await.unwrap();
        received
    });
    (port, handle)
}

/// Input whose first read fails.
struct FailingInput;

impl AsyncRead for FailingInput {
    fn poll_read(self: Pin<&mut Self>, _cx: &mut Context<'_>, _buf: &mut ReadBuf<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Err(io::Error::other("input went away")))
    }
}

#[tokio::test]
async fn client_connect_refused() {
    let cfg = ConnectorConfig::new("127.0.0.1", closed_port().to_string());

    match Connector::connect(&cfg).await {
        Err(e @ ClientError::ConnectFailed { .. }) => {
            assert_eq!(e.exit_code(), 2);
            assert!(e.to_string().contains("connection failed"));
        }
        Err(other) => panic!("Expected ConnectFailed, got {:?}", other),
        Ok(_) => panic!("Expected ConnectFailed, got a connection"),
    }
}

#[tokio::test]
async fn client_unresolvable_host() {
    let cfg = ConnectorConfig::new("no-such-host.invalid", "9");

    let res = timeout(Duration::from_secs(30), Connector::connect(&cfg))
        .await
        .expect("resolver did not answer");
    match res {
        Err(e @ ClientError::Resolve(_)) => assert_eq!(e.exit_code(), 1),
        Err(other) => panic!("Expected Resolve, got {:?}", other),
        Ok(_) => panic!("Expected Resolve, got a connection"),
    }
}

#[tokio::test]
async fn client_relays_input_in_multiple_chunks() {
    let (port, collector) = spawn_collector().await;
    let payload: Vec<u8> = (0..5000u32).map(|i| (i * 7 % 256) as u8).collect();

    let cfg = ConnectorConfig::new("127.0.0.1", port.to_string());
    let connector = Connector::connect(&cfg).await.expect("connect");
    assert_eq!(connector.peer().port(), port);

    let sent = connector.relay_from(&mut payload.as_slice()).await.expect("relay");
    assert_eq!(sent, 5000);

    let received = timeout(Duration::from_secs(5), collector).await.expect("collector").unwrap();
    assert_eq!(received, payload);
}

#[tokio::test]
async fn client_small_chunks_keep_order() {
    let (port, collector) = spawn_collector().await;

    let cfg = ConnectorConfig::new("localhost", port.to_string()).with_chunk_size(3);
    let connector = Connector::connect(&cfg).await.expect("connect");
    let sent = connector
        .relay_from(&mut &b"abcdefghijklmnopqrstuvwxyz"[..])
        .await
        .expect("relay");
    assert_eq!(sent, 26);

    let received = timeout(Duration::from_secs(5), collector).await.expect("collector").unwrap();
    assert_eq!(received, b"abcdefghijklmnopqrstuvwxyz");
}

#[tokio::test]
async fn client_empty_input_closes_cleanly() {
    let (port, collector) = spawn_collector().await;

    let connector = Connector::connect(&ConnectorConfig::new("127.0.0.1", port.to_string())).await.expect("connect");
    let sent = connector.relay_from(&mut tokio::io::empty()).await.expect("relay");
    assert_eq!(sent, 0);

    let received = timeout(Duration::from_secs(5), collector).await.expect("collector").unwrap();
    assert!(received.is_empty());
}

#[tokio::test]
async fn client_input_error_is_not_fatal() {
    let (port, collector) = spawn_collector().await;

    let connector = Connector::connect(&ConnectorConfig::new("127.0.0.1", port.to_string())).await.expect("connect");
    let sent = connector.relay_from(&mut FailingInput).await.expect("read errors end the relay quietly");
    assert_eq!(sent, 0);

    let received = timeout(Duration::from_secs(5), collector).await.expect("collector").unwrap();
    assert!(received.is_empty());
}

#[tokio::test]
async fn client_send_failure_after_peer_drops() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let dropper = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        drop(stream);
    });

    let connector = Connector::connect(&ConnectorConfig::new("127.0.0.1", port.to_string())).await.expect("connect");
    dropper.await.unwrap();

    let mut input = tokio::io::repeat(b'x').take(64 * 1024 * 1024);
    let res = timeout(Duration::from_secs(10), connector.relay_from(&mut input))
        .await
        .expect("relay did not fail in time");
    match res {
        Err(e @ ClientError::Send(_)) => assert_eq!(e.exit_code(), 3),
        other => panic!("Expected Send error, got {:?}", other),
    }
}
