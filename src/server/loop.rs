// Server loop module
// Accepts connections until a shutdown is requested

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Notify;

use super::connection::accept_connection;
use crate::config::AppState;
use crate::logger;

/// Accept loop for the kennels server
///
/// Must run inside a `LocalSet`: every connection is served by a local
/// task. Returns once `shutdown` is notified; connections already being
/// served are left to finish on their own.
pub async fn run_server(listener: TcpListener, state: Arc<AppState>, shutdown: Arc<Notify>) {
    let active_connections = Arc::new(AtomicUsize::new(0));

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        accept_connection(stream, peer_addr, &state, &active_connections);
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            () = shutdown.notified() => break,
        }
    }

    drop(listener);
    logger::log_shutdown(active_connections.load(Ordering::SeqCst));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::server::create_reusable_listener;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;

    async fn send(addr: std::net::SocketAddr, request: &str) -> String {
        let mut stream = TcpStream::connect(addr).await.unwrap();
        stream.write_all(request.as_bytes()).await.unwrap();
        let mut response = Vec::new();
        stream.read_to_end(&mut response).await.unwrap();
        String::from_utf8(response).unwrap()
    }

    async fn with_server<F, Fut>(test: F)
    where
        F: FnOnce(std::net::SocketAddr) -> Fut,
        Fut: std::future::Future<Output = ()>,
    {
        let mut cfg = Config::load_from("does-not-exist/kennels").unwrap();
        cfg.logging.access_log = false;
        let state = Arc::new(AppState::new(&cfg));
        let listener = create_reusable_listener("127.0.0.1:0".parse().unwrap()).unwrap();
        let addr = listener.local_addr().unwrap();
        let shutdown = Arc::new(Notify::new());

        let local = tokio::task::LocalSet::new();
        local
            .run_until(async {
                let server = tokio::task::spawn_local(run_server(listener, state, Arc::clone(&shutdown)));
                test(addr).await;
                shutdown.notify_one();
                server.await.unwrap();
            })
            .await;
    }

    #[tokio::test]
    async fn test_get_over_tcp() {
        with_server(|addr| async move {
            let response = send(
                addr,
                "GET /locations/2 HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
            )
            .await;
            assert!(response.starts_with("HTTP/1.1 200 OK"));
            assert!(response.contains("content-type: application/json"));
            assert!(response.contains("access-control-allow-origin: *"));
            assert!(response.contains("Nashville South"));
        })
        .await;
    }

    #[tokio::test]
    async fn test_post_over_tcp() {
        with_server(|addr| async move {
            let body = r#"{"name":"Jane"}"#;
            let request = format!(
                "POST /customers HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\nContent-Length: {}\r\n\r\n{body}",
                body.len()
            );
            let response = send(addr, &request).await;
            assert!(response.starts_with("HTTP/1.1 201 Created"));
            assert!(response.contains(r#""name":"Jane""#));
            assert!(response.contains(r#""id":2"#));
        })
        .await;
    }

    #[tokio::test]
    async fn test_options_over_tcp() {
        with_server(|addr| async move {
            let response = send(
                addr,
                "OPTIONS /animals HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
            )
            .await;
            assert!(response.starts_with("HTTP/1.1 200 OK"));
            assert!(response.contains("access-control-allow-methods: GET, POST, PUT, DELETE"));
            assert!(response.contains("access-control-allow-headers: X-Requested-With, Content-Type, Accept"));
        })
        .await;
    }

    #[tokio::test]
    async fn test_malformed_json_closes_without_response() {
        with_server(|addr| async move {
            let body = "{not json";
            let request = format!(
                "POST /animals HTTP/1.1\r\nHost: localhost\r\nContent-Length: {}\r\n\r\n{body}",
                body.len()
            );
            let response = send(addr, &request).await;
            assert!(response.is_empty());
        })
        .await;
    }
}
