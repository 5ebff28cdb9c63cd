use std::sync::{Arc, Mutex};

use reqwest::Url;
use serde_json::Value;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

/// What the mock webhook does with one request.
#[derive(Debug, Clone)]
pub(super) enum MockReply {
    Respond { status: u16, body: String },
    /// Hold the connection open without answering.
    Hang,
}

impl MockReply {
    pub(super) fn json(status: u16, body: &str) -> Self {
        MockReply::Respond {
            status,
            body: body.to_owned(),
        }
    }
}

type Responder = dyn Fn(&Value) -> MockReply + Send + Sync;

pub(super) struct MockServer {
    pub(super) url: Url,
    received: Arc<Mutex<Vec<Value>>>,
    handle: JoinHandle<()>,
}

impl MockServer {
    pub(super) fn received(&self) -> Vec<Value> {
        self.received
            .lock()
            .map(|bodies| bodies.clone())
            .unwrap_or_default()
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Spawns a minimal HTTP/1.1 server on an ephemeral port. `responder`
/// sees each request's JSON body (or `Value::Null`).
pub(super) async fn spawn_mock<F>(responder: F) -> Result<MockServer, String>
where
    F: Fn(&Value) -> MockReply + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .map_err(|err| format!("bind mock server failed: {}", err))?;
    let addr = listener
        .local_addr()
        .map_err(|err| format!("mock server addr failed: {}", err))?;
    let url = Url::parse(&format!("http://{}/webhook/load-test", addr))
        .map_err(|err| format!("mock url failed: {}", err))?;

    let responder: Arc<Responder> = Arc::new(responder);
    let received = Arc::new(Mutex::new(Vec::new()));
    let received_in_server = Arc::clone(&received);

    let handle = tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            let responder = Arc::clone(&responder);
            let received = Arc::clone(&received_in_server);
            tokio::spawn(async move {
                drop(handle_connection(stream, responder.as_ref(), &received).await);
            });
        }
    });

    Ok(MockServer {
        url,
        received,
        handle,
    })
}

/// Returns an http URL whose port has nothing listening.
pub(super) async fn closed_port_url() -> Result<Url, String> {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .map_err(|err| format!("bind failed: {}", err))?;
    let addr = listener
        .local_addr()
        .map_err(|err| format!("addr failed: {}", err))?;
    drop(listener);
    Url::parse(&format!("http://{}/hook", addr)).map_err(|err| format!("url failed: {}", err))
}

async fn handle_connection(
    mut stream: TcpStream,
    responder: &Responder,
    received: &Mutex<Vec<Value>>,
) -> std::io::Result<()> {
    let body = read_request_body(&mut stream).await?;
    let json = serde_json::from_slice::<Value>(&body).unwrap_or(Value::Null);
    if let Ok(mut bodies) = received.lock() {
        bodies.push(json.clone());
    }

    match responder(&json) {
        MockReply::Respond { status, body } => {
            let response = format!(
                "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                reason(status),
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).await?;
            stream.flush().await?;
            stream.shutdown().await
        }
        MockReply::Hang => {
            std::future::pending::<()>().await;
            Ok(())
        }
    }
}

async fn read_request_body(stream: &mut TcpStream) -> std::io::Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let read = stream.read(&mut chunk).await?;
        if read == 0 {
            return Ok(Vec::new());
        }
        buffer.extend_from_slice(chunk.get(..read).unwrap_or_default());

        let Some(header_end) = find_header_end(&buffer) else {
            continue;
        };
        let body_start = header_end.saturating_add(4);
        let content_length = content_length(buffer.get(..header_end).unwrap_or_default());
        while buffer.len() < body_start.saturating_add(content_length) {
            let more = stream.read(&mut chunk).await?;
            if more == 0 {
                break;
            }
            buffer.extend_from_slice(chunk.get(..more).unwrap_or_default());
        }
        return Ok(buffer.get(body_start..).unwrap_or_default().to_vec());
    }
}

fn find_header_end(buffer: &[u8]) -> Option<usize> {
    buffer.windows(4).position(|window| window == b"\r\n\r\n")
}

fn content_length(headers: &[u8]) -> usize {
    String::from_utf8_lossy(headers)
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse().ok())
        .unwrap_or(0)
}

const fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        404 => "Not Found",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        _ => "Status",
    }
}
