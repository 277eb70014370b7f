//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use homepage_ab::config::AbConfig;
use homepage_ab::{HttpServer, Shutdown};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

pub const INDEX_HTML: &str = "<html><body>variant A</body></html>";
pub const VARIANT_B_HTML: &str = "<html><body>variant B</body></html>";

/// Request paths (with query) seen by a mock origin, in arrival order.
#[derive(Clone, Default)]
pub struct Hits(Arc<Mutex<Vec<String>>>);

#[allow(dead_code)]
impl Hits {
    pub fn all(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    pub fn count(&self, path: &str) -> usize {
        self.0.lock().unwrap().iter().filter(|p| *p == path).count()
    }
}

/// Start a mock origin answering each request path via `f`.
pub async fn start_origin<F>(f: F) -> (SocketAddr, Hits)
where
    F: Fn(&str) -> (u16, String) + Send + Sync + 'static,
{
    start_slow_origin(f, |_| Duration::ZERO).await
}

/// Like [`start_origin`], but waits `delay(path)` before answering.
pub async fn start_slow_origin<F, D>(f: F, delay: D) -> (SocketAddr, Hits)
where
    F: Fn(&str) -> (u16, String) + Send + Sync + 'static,
    D: Fn(&str) -> Duration + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let hits = Hits::default();
    let f = Arc::new(f);
    let delay = Arc::new(delay);

    let recorded = hits.clone();
    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    let delay = delay.clone();
                    let recorded = recorded.clone();
                    tokio::spawn(async move {
                        let Some(path) = read_request_path(&mut socket).await else {
                            return;
                        };
                        recorded.0.lock().unwrap().push(path.clone());

                        tokio::time::sleep(delay(&path)).await;
                        let (status, body) = f(&path);
                        let status_text = match status {
                            200 => "200 OK",
                            204 => "204 No Content",
                            404 => "404 Not Found",
                            500 => "500 Internal Server Error",
                            503 => "503 Service Unavailable",
                            _ => "200 OK",
                        };
                        let response = format!(
                            "HTTP/1.1 {}\r\nContent-Type: text/html; charset=utf-8\r\nX-Frame-Options: SAMEORIGIN\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                        tokio::time::sleep(Duration::from_millis(10)).await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    (addr, hits)
}

/// Mock static host serving both variant documents and a few assets.
#[allow(dead_code)]
pub async fn start_static_site() -> (SocketAddr, Hits) {
    start_origin(|path| match path.split('?').next().unwrap_or(path) {
        "/" | "/index.html" => (200, INDEX_HTML.to_string()),
        "/index-variant-b.html" => (200, VARIANT_B_HTML.to_string()),
        "/about" => (200, "about page".to_string()),
        _ => (404, "not found".to_string()),
    })
    .await
}

/// Read the request head and return the request target.
async fn read_request_path(socket: &mut tokio::net::TcpStream) -> Option<String> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
    }
    let head = String::from_utf8_lossy(&buf);
    let request_line = head.lines().next()?;
    let target = request_line.split_whitespace().nth(1)?;
    // Absolute-form targets carry scheme and authority; keep path and query.
    let path = match target.find("://") {
        Some(i) => {
            let rest = &target[i + 3..];
            rest.find('/').map(|j| &rest[j..]).unwrap_or("/")
        }
        None => target,
    };
    Some(path.to_string())
}

/// Config pointing at `origin`, with a fresh ephemeral listener.
pub fn config_for(origin: SocketAddr) -> AbConfig {
    let mut config = AbConfig::default();
    config.origin.base_url = format!("http://{origin}");
    config.listener.bind_address = "127.0.0.1:0".into();
    config
}

/// Start the service and return its address plus a shutdown handle.
pub async fn start_service(config: AbConfig) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config).unwrap();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    tokio::time::sleep(Duration::from_millis(50)).await;
    (addr, shutdown)
}

/// A client without a cookie store, so each test controls cookies explicitly.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
