use crate::metrics::RequestResult;

use super::formatting::{format_latency, truncate_chars};

const EXECUTION_ID_LIMIT: usize = 28;
const DESCRIPTION_LIMIT: usize = 25;
const DESCRIPTION_KEEP: usize = 22;
const NOT_AVAILABLE: &str = "N/A";

/// Per-request rows, fastest first.
#[must_use]
pub fn result_table_lines(results: &[RequestResult]) -> Vec<String> {
    let mut sorted: Vec<&RequestResult> = results.iter().collect();
    sorted.sort_by_key(|result| (result.latency, result.id));

    let mut lines = Vec::with_capacity(sorted.len().saturating_add(3));
    lines.push("Detailed Request Results (sorted by response time):".to_owned());
    lines.push(format!(
        "{:<4}| {:<6} | {:>7} | {:<31} | {:<8} | {}",
        "ID", "Status", "Time", "Execution ID", "Workload", "Description"
    ));
    lines.push(
        "----+--------+---------+---------------------------------+----------+---------------------"
            .to_owned(),
    );

    for result in sorted {
        let (status, execution_id, description) = if result.success {
            (
                "OK",
                result.execution_id().map_or_else(
                    || NOT_AVAILABLE.to_owned(),
                    |id| truncate_chars(id, EXECUTION_ID_LIMIT, EXECUTION_ID_LIMIT),
                ),
                result
                    .payload
                    .as_ref()
                    .and_then(|payload| {
                        payload
                            .workload_description
                            .as_deref()
                            .or(payload.message.as_deref())
                    })
                    .map_or_else(
                        || NOT_AVAILABLE.to_owned(),
                        |text| truncate_chars(text, DESCRIPTION_LIMIT, DESCRIPTION_KEEP),
                    ),
            )
        } else {
            ("FAIL", NOT_AVAILABLE.to_owned(), NOT_AVAILABLE.to_owned())
        };
        let workload = result
            .effective_workload_secs()
            .map_or_else(|| NOT_AVAILABLE.to_owned(), |secs| format!("{}s", secs));

        lines.push(format!(
            "{:<4}| {:<6} | {:>7} | {:<31} | {:<8} | {}",
            result.id,
            status,
            format_latency(result.latency),
            execution_id,
            workload,
            description
        ));
    }

    lines
}

/// One line per failed request, in id order.
#[must_use]
pub fn error_lines(results: &[RequestResult]) -> Vec<String> {
    let mut failed: Vec<&RequestResult> = results.iter().filter(|result| !result.success).collect();
    failed.sort_by_key(|result| result.id);

    let mut lines = Vec::with_capacity(failed.len().saturating_add(1));
    lines.push("Error Summary:".to_owned());
    for result in failed {
        lines.push(format!(
            "   Request {}: {}",
            result.id,
            result.error_message.as_deref().unwrap_or("unknown error")
        ));
    }
    lines
}
