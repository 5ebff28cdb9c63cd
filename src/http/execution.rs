use chrono::Utc;
use futures_util::StreamExt;
use reqwest::{Client, StatusCode, Url, header::CONTENT_TYPE};
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::metrics::{RequestResult, RequestTask};

use super::payload::{WebhookPayload, WebhookResponse};

/// Status recorded when no HTTP response arrived.
const NO_RESPONSE_STATUS: u16 = 0;

/// Sends one task and turns every outcome, including transport and
/// protocol failures, into a [`RequestResult`].
pub(super) async fn execute_task(client: &Client, target: &Url, task: RequestTask) -> RequestResult {
    let timestamp = Utc::now();
    let payload = WebhookPayload::for_task(task, timestamp);
    let body = match serde_json::to_vec(&payload) {
        Ok(body) => body,
        Err(err) => {
            return RequestResult::failed(
                task,
                NO_RESPONSE_STATUS,
                std::time::Duration::ZERO,
                format!("JSON marshal error: {}", err),
                timestamp,
                0,
            );
        }
    };
    debug!("Request {} payload: {:?}", task.id, payload);

    let started = Instant::now();
    let response = client
        .post(target.clone())
        .header(CONTENT_TYPE, "application/json")
        .body(body)
        .send()
        .await;

    let response = match response {
        Ok(response) => response,
        Err(err) => {
            let latency = started.elapsed();
            let message = format!("HTTP request failed: {}", describe_transport_error(&err));
            warn!("Request {} failed after {:?}: {}", task.id, latency, message);
            return RequestResult::failed(
                task,
                NO_RESPONSE_STATUS,
                latency,
                message,
                timestamp,
                0,
            );
        }
    };

    let status = response.status();
    let body_result = read_body(response).await;
    let latency = started.elapsed();

    let result = match body_result {
        Ok(bytes) => classify(task, status, &bytes, latency, timestamp),
        Err(err) => RequestResult::failed(
            task,
            status.as_u16(),
            latency,
            format!(
                "Failed to read response body: {}",
                describe_transport_error(&err)
            ),
            timestamp,
            0,
        ),
    };

    if result.success {
        info!(
            "Request {} completed in {:?} (workload: {}, execution: {})",
            result.id,
            result.latency,
            result
                .workload_hint
                .map_or_else(|| "n/a".to_owned(), |secs| format!("{}s", secs)),
            result.execution_id().unwrap_or("n/a")
        );
    } else {
        warn!(
            "Request {} failed after {:?}: {}",
            result.id,
            result.latency,
            result.error_message.as_deref().unwrap_or("unknown error")
        );
    }
    result
}

pub(super) fn classify(
    task: RequestTask,
    status: StatusCode,
    body: &[u8],
    latency: std::time::Duration,
    timestamp: chrono::DateTime<Utc>,
) -> RequestResult {
    let response_bytes = u64::try_from(body.len()).unwrap_or(u64::MAX);
    if status != StatusCode::OK {
        return RequestResult::failed(
            task,
            status.as_u16(),
            latency,
            format!(
                "HTTP {}: {}",
                status.as_u16(),
                String::from_utf8_lossy(body).trim()
            ),
            timestamp,
            response_bytes,
        );
    }

    // `null` is valid JSON and carries no fields.
    match serde_json::from_slice::<Option<WebhookResponse>>(body) {
        Ok(parsed) => RequestResult::succeeded(
            task,
            status.as_u16(),
            latency,
            parsed.unwrap_or_default(),
            timestamp,
            response_bytes,
        ),
        Err(err) => RequestResult::failed(
            task,
            status.as_u16(),
            latency,
            format!(
                "Failed to parse webhook response: {} (body: {})",
                err,
                String::from_utf8_lossy(body).trim()
            ),
            timestamp,
            response_bytes,
        ),
    }
}

async fn read_body(response: reqwest::Response) -> Result<Vec<u8>, reqwest::Error> {
    let mut stream = response.bytes_stream();
    let mut body = Vec::new();
    while let Some(chunk) = stream.next().await {
        body.extend_from_slice(&chunk?);
    }
    Ok(body)
}

fn describe_transport_error(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        format!("timed out ({})", err)
    } else if err.is_connect() {
        format!("connection failed ({})", err)
    } else {
        err.to_string()
    }
}
