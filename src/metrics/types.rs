use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::http::WebhookResponse;

/// One request to send. Ids are 1-based and unique within a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTask {
    pub id: u64,
    pub workload_hint: Option<u64>,
}

/// Outcome of a single [`RequestTask`]. Built once by the worker that ran
/// the task and never modified afterwards.
#[derive(Debug, Clone)]
pub struct RequestResult {
    pub id: u64,
    pub success: bool,
    /// `0` when no HTTP response was received.
    pub http_status: u16,
    pub latency: Duration,
    pub payload: Option<WebhookResponse>,
    pub error_message: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub workload_hint: Option<u64>,
    pub response_bytes: u64,
}

impl RequestResult {
    #[must_use]
    pub const fn succeeded(
        task: RequestTask,
        http_status: u16,
        latency: Duration,
        payload: WebhookResponse,
        timestamp: DateTime<Utc>,
        response_bytes: u64,
    ) -> Self {
        Self {
            id: task.id,
            success: true,
            http_status,
            latency,
            payload: Some(payload),
            error_message: None,
            timestamp,
            workload_hint: task.workload_hint,
            response_bytes,
        }
    }

    #[must_use]
    pub const fn failed(
        task: RequestTask,
        http_status: u16,
        latency: Duration,
        error_message: String,
        timestamp: DateTime<Utc>,
        response_bytes: u64,
    ) -> Self {
        Self {
            id: task.id,
            success: false,
            http_status,
            latency,
            payload: None,
            error_message: Some(error_message),
            timestamp,
            workload_hint: task.workload_hint,
            response_bytes,
        }
    }

    #[must_use]
    pub fn execution_id(&self) -> Option<&str> {
        self.payload
            .as_ref()
            .and_then(|payload| payload.execution_id.as_deref())
    }

    /// Workload used for overhead: the hint we sent, else the delay the
    /// server reported.
    #[must_use]
    pub fn effective_workload_secs(&self) -> Option<u64> {
        self.workload_hint.or_else(|| {
            self.payload
                .as_ref()
                .and_then(|payload| payload.delay_seconds)
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverheadStats {
    /// Mean latency of successful requests that carried a workload.
    pub avg_latency: Duration,
    pub avg_workload: Duration,
    /// `(avg_latency - avg_workload) / avg_workload`, as percent x100.
    pub overhead_x100: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateStats {
    pub total: u64,
    pub successful: u64,
    pub failed: u64,
    pub total_duration: Duration,
    pub avg_latency: Duration,
    pub min_latency: Duration,
    pub max_latency: Duration,
    pub p50_latency_ms: u64,
    pub p90_latency_ms: u64,
    pub p99_latency_ms: u64,
    /// Requests per second of batch wall clock, x100.
    pub throughput_x100: u64,
    pub success_rate_x100: u64,
    pub overhead: Option<OverheadStats>,
}
