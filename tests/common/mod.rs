//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use trace_proxy::config::ServiceConfig;
use trace_proxy::http::HttpServer;
use trace_proxy::lifecycle::Shutdown;

/// Start the service on an ephemeral port; returns its base URL and the
/// shutdown handle keeping it alive.
pub async fn start_service(config: ServiceConfig) -> (String, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();
    let receiver = shutdown.subscribe();

    let server = HttpServer::new(config).expect("failed to build server");
    tokio::spawn(async move {
        let _ = server.run(listener, receiver).await;
    });

    (format!("http://{}", addr), shutdown)
}

/// Start a mock upstream that returns a fixed 200 response on any path.
pub async fn start_fixed_upstream(body: &'static str) -> SocketAddr {
    start_upstream(move |_path| {
        respond(
            "200 OK",
            &[("content-type", "text/plain".into())],
            body.to_string(),
        )
    })
    .await
}

/// Start a mock upstream serving a redirect chain of `hops` redirects:
/// `/hop/0` → 302 `/hop/1` → ... → `/hop/<hops>` → 200 `final_body`.
/// Each redirect response carries two `set-cookie` values to exercise
/// multi-value header capture.
#[allow(dead_code)]
pub async fn start_redirect_upstream(hops: usize, final_body: &'static str) -> SocketAddr {
    start_upstream(move |path| {
        let n: usize = path
            .strip_prefix("/hop/")
            .and_then(|s| s.parse().ok())
            .unwrap_or(0);
        if n < hops {
            respond(
                "302 Found",
                &[
                    ("location", format!("/hop/{}", n + 1)),
                    ("set-cookie", format!("hop={}", n)),
                    ("set-cookie", "flavor=oatmeal".into()),
                ],
                String::new(),
            )
        } else {
            respond("200 OK", &[], final_body.to_string())
        }
    })
    .await
}

/// Start a mock upstream on an ephemeral port; `f` maps the request path to
/// a full serialized response.
pub async fn start_upstream<F>(f: F) -> SocketAddr
where
    F: Fn(&str) -> String + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let f = Arc::new(f);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    tokio::spawn(async move {
                        let mut buf = vec![0u8; 4096];
                        let mut head = Vec::new();
                        // Read until the end of the request head.
                        loop {
                            match socket.read(&mut buf).await {
                                Ok(0) | Err(_) => break,
                                Ok(n) => {
                                    head.extend_from_slice(&buf[..n]);
                                    if head.windows(4).any(|w| w == b"\r\n\r\n") {
                                        break;
                                    }
                                }
                            }
                        }
                        let path = request_path(&head);
                        let response = f(&path);
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// Extract the path from the request line (`GET /path HTTP/1.1`).
fn request_path(head: &[u8]) -> String {
    let text = String::from_utf8_lossy(head);
    text.lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("/")
        .to_string()
}

fn respond(status: &str, headers: &[(&str, String)], body: String) -> String {
    let mut response = format!("HTTP/1.1 {}\r\n", status);
    for (name, value) in headers {
        response.push_str(&format!("{}: {}\r\n", name, value));
    }
    response.push_str(&format!(
        "content-length: {}\r\nconnection: close\r\n\r\n{}",
        body.len(),
        body
    ));
    response
}

/// An address nothing is listening on (bound then immediately dropped).
#[allow(dead_code)]
pub async fn unreachable_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}
