use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::metrics::RequestTask;

/// JSON body POSTed to the webhook.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct WebhookPayload {
    pub request_id: u64,
    pub message: String,
    /// RFC 3339, UTC.
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workload_sec: Option<u64>,
}

impl WebhookPayload {
    #[must_use]
    pub fn for_task(task: RequestTask, now: DateTime<Utc>) -> Self {
        let message = task.workload_hint.map_or_else(
            || format!("Load test request {}", task.id),
            |secs| format!("Load test request {} - workload {} seconds", task.id, secs),
        );
        Self {
            request_id: task.id,
            message,
            timestamp: now.to_rfc3339_opts(SecondsFormat::Secs, true),
            workload_sec: task.workload_hint,
        }
    }
}

/// Webhook reply. Every field is optional; unknown fields are ignored.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WebhookResponse {
    pub execution_id: Option<String>,
    pub message: Option<String>,
    pub status: Option<String>,
    pub delay_seconds: Option<u64>,
    pub workload_description: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}
