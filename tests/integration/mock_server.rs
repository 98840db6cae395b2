//! Mock HTTP servers for integration tests

use mockito::{Matcher, Mock, Server, ServerGuard};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

/// Test fixture wrapping a mockito server for the buffered endpoints.
pub struct MockServerFixture {
    pub server: ServerGuard,
    pub base_url: String,
}

impl MockServerFixture {
    pub async fn new() -> Self {
        let server = Server::new_async().await;
        let base_url = server.url();
        Self { server, base_url }
    }

    /// Create a mock for `GET path`
    pub async fn mock_get(&mut self, path: &str, status: usize, body: &str) -> Mock {
        self.server
            .mock("GET", path)
            .with_status(status)
            .with_header("content-type", "text/plain")
            .with_body(body)
            .create_async()
            .await
    }

    /// Create a mock for `POST path` that only matches a JSON request equal to `expected`
    pub async fn mock_post_json(
        &mut self,
        path: &str,
        expected: serde_json::Value,
        status: usize,
        body: &str,
    ) -> Mock {
        self.server
            .mock("POST", path)
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(expected))
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await
    }
}

/// One step of a scripted streaming response.
#[derive(Debug, Clone)]
pub enum StreamAction {
    /// Send bytes as one HTTP chunk.
    Chunk(&'static str),
    Sleep(Duration),
    /// Announce a chunk, send only part of it, then drop the connection.
    Abort(&'static str),
}

/// What the stream server saw from the client.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: String,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl CapturedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("request body is not JSON")
    }
}

/// Single-connection HTTP/1.1 server that answers with a scripted chunked body.
///
/// mockito writes a body in one go, so timed chunks and broken connections
/// need a hand-driven socket.
pub struct StreamServer {
    pub base_url: String,
    handle: JoinHandle<CapturedRequest>,
}

impl StreamServer {
    pub async fn start(script: Vec<StreamAction>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            socket.set_nodelay(true).unwrap();
            let request = read_request(&mut socket).await;

            socket
                .write_all(
                    b"HTTP/1.1 200 OK\r\n\
                      Content-Type: text/event-stream\r\n\
                      Transfer-Encoding: chunked\r\n\
                      Connection: close\r\n\r\n",
                )
                .await
                .unwrap();

            for action in script {
                match action {
                    StreamAction::Chunk(data) => {
                        let frame = format!("{:x}\r\n{}\r\n", data.len(), data);
                        socket.write_all(frame.as_bytes()).await.unwrap();
                        socket.flush().await.unwrap();
                    }
                    StreamAction::Sleep(d) => tokio::time::sleep(d).await,
                    StreamAction::Abort(partial) => {
                        // Claim more bytes than are ever sent.
                        let frame = format!("{:x}\r\n{}", partial.len() + 64, partial);
                        socket.write_all(frame.as_bytes()).await.unwrap();
                        socket.flush().await.unwrap();
                        drop(socket);
                        return request;
                    }
                }
            }

            socket.write_all(b"0\r\n\r\n").await.unwrap();
            socket.flush().await.unwrap();
            request
        });

        Self { base_url, handle }
    }

    /// Wait for the scripted response to finish and return the captured request.
    pub async fn finish(self) -> CapturedRequest {
        self.handle.await.unwrap()
    }
}

async fn read_request(socket: &mut TcpStream) -> CapturedRequest {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    let header_end = loop {
        let n = socket.read(&mut chunk).await.unwrap();
        assert!(n > 0, "client closed before sending a full request");
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).into_owned();
    let mut lines = head.split("\r\n");
    let mut request_line = lines.next().unwrap().split_whitespace();
    let method = request_line.next().unwrap().to_string();
    let path = request_line.next().unwrap().to_string();
    let headers: Vec<(String, String)> = lines
        .filter_map(|l| l.split_once(':'))
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .collect();

    let content_length = headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case("content-length"))
        .map(|(_, v)| v.parse::<usize>().unwrap())
        .unwrap_or(0);

    let mut body = buf[header_end + 4..].to_vec();
    while body.len() < content_length {
        let n = socket.read(&mut chunk).await.unwrap();
        assert!(n > 0, "client closed before sending the full body");
        body.extend_from_slice(&chunk[..n]);
    }

    CapturedRequest {
        method,
        path,
        headers,
        body,
    }
}

/// A base URL nothing is listening on.
pub async fn unreachable_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}
