//! End-to-end: a real listener, raw HTTP/1.1 over TCP, graceful shutdown.

use std::sync::Arc;

use posts_api::Server;
use posts_api::posts::{self, PostRegistry};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::oneshot;

async fn roundtrip(addr: std::net::SocketAddr, raw: &str) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(raw.as_bytes()).await.unwrap();
    let mut buf = Vec::new();
    stream.read_to_end(&mut buf).await.unwrap();
    String::from_utf8(buf).unwrap()
}

#[tokio::test]
async fn serves_requests_and_shuts_down() {
    let registry = Arc::new(PostRegistry::with_seed_posts(StdRng::seed_from_u64(5)));
    let server = Server::bind("127.0.0.1:0").await.unwrap();
    let addr = server.local_addr();
    assert_ne!(addr.port(), 0);

    let (stop, stopped) = oneshot::channel::<()>();
    let handle = tokio::spawn(server.serve_with_shutdown(posts::app(Arc::clone(&registry)), async {
        let _ = stopped.await;
    }));

    let res = roundtrip(
        addr,
        "GET /posts HTTP/1.1\r\nhost: localhost\r\nconnection: close\r\n\r\n",
    )
    .await;
    assert!(res.starts_with("HTTP/1.1 200 OK"), "{res}");
    assert!(res.contains("title of post 2"), "{res}");

    let body = r#"{"title":"wire","content":"post"}"#;
    let res = roundtrip(
        addr,
        &format!(
            "POST /posts HTTP/1.1\r\nhost: localhost\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        ),
    )
    .await;
    assert!(res.starts_with("HTTP/1.1 201 Created"), "{res}");
    assert_eq!(registry.len().unwrap(), 3);

    stop.send(()).unwrap();
    handle.await.unwrap().unwrap();
}

#[tokio::test]
async fn bad_address_is_an_error() {
    assert!(matches!(
        Server::bind("not an address").await,
        Err(posts_api::Error::Addr { .. })
    ));
}
