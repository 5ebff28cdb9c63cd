//! CSV and JSON exports of a completed run.
use std::path::Path;

use reqwest::Url;
use serde_json::{Value, json};
use tokio::io::{AsyncWriteExt, BufWriter};

use crate::error::ExportError;
use crate::metrics::{AggregateStats, RequestResult};
use crate::report::{format_signed_x100, format_x100};

const CSV_HEADER: &[u8] = b"concurrent_requests,request_id,response_time_seconds,workload_seconds,execution_id,status,timestamp,http_status,error\n";

/// Writes one CSV row per result, ordered by request id.
///
/// # Errors
///
/// Returns an error when the file or its parent directory cannot be written.
pub async fn export_csv(path: &Path, results: &[RequestResult]) -> Result<(), ExportError> {
    ensure_parent(path).await?;
    let write_err = |source| ExportError::Write {
        path: path.to_path_buf(),
        source,
    };

    let file = tokio::fs::File::create(path).await.map_err(write_err)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(CSV_HEADER).await.map_err(write_err)?;

    let concurrent_requests = results.len();
    for result in sorted_by_id(results) {
        let line = format!(
            "{},{},{},{},{},{},{},{},{}\n",
            concurrent_requests,
            result.id,
            seconds_3dp(result.latency),
            result
                .effective_workload_secs()
                .map_or_else(String::new, |secs| secs.to_string()),
            csv_field(result.execution_id().unwrap_or_default()),
            if result.success { "SUCCESS" } else { "ERROR" },
            result.timestamp.to_rfc3339(),
            result.http_status,
            csv_field(result.error_message.as_deref().unwrap_or_default()),
        );
        writer.write_all(line.as_bytes()).await.map_err(write_err)?;
    }
    writer.flush().await.map_err(write_err)?;
    Ok(())
}

/// Writes `{"summary": ..., "results": [...]}` as pretty JSON.
///
/// # Errors
///
/// Returns an error when serialization or the write fails.
pub async fn export_json(
    path: &Path,
    target: &Url,
    stats: &AggregateStats,
    results: &[RequestResult],
) -> Result<(), ExportError> {
    ensure_parent(path).await?;
    let results_json: Vec<Value> = sorted_by_id(results)
        .into_iter()
        .map(|result| {
            json!({
                "request_id": result.id,
                "success": result.success,
                "http_status": result.http_status,
                "latency_ms": u64::try_from(result.latency.as_millis()).unwrap_or(u64::MAX),
                "workload_seconds": result.effective_workload_secs(),
                "timestamp": result.timestamp.to_rfc3339(),
                "response_bytes": result.response_bytes,
                "response": result.payload,
                "error": result.error_message,
            })
        })
        .collect();

    let overhead_json = stats.overhead.as_ref().map(|overhead| {
        json!({
            "avg_latency_ms": millis(overhead.avg_latency),
            "avg_workload_ms": millis(overhead.avg_workload),
            "overhead_percent": decimal(&format_signed_x100(overhead.overhead_x100)),
        })
    });

    let payload = json!({
        "summary": {
            "target": target.as_str(),
            "total_requests": stats.total,
            "successful_requests": stats.successful,
            "failed_requests": stats.failed,
            "total_duration_ms": millis(stats.total_duration),
            "avg_latency_ms": millis(stats.avg_latency),
            "min_latency_ms": millis(stats.min_latency),
            "max_latency_ms": millis(stats.max_latency),
            "p50_latency_ms": stats.p50_latency_ms,
            "p90_latency_ms": stats.p90_latency_ms,
            "p99_latency_ms": stats.p99_latency_ms,
            "requests_per_second": decimal(&format_x100(stats.throughput_x100)),
            "success_rate_percent": decimal(&format_x100(stats.success_rate_x100)),
            "overhead": overhead_json,
        },
        "results": results_json,
    });

    let bytes = serde_json::to_vec_pretty(&payload).map_err(|err| ExportError::Serialize {
        path: path.to_path_buf(),
        source: err,
    })?;
    let write_err = |source| ExportError::Write {
        path: path.to_path_buf(),
        source,
    };
    let file = tokio::fs::File::create(path).await.map_err(write_err)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(&bytes).await.map_err(write_err)?;
    writer.flush().await.map_err(write_err)?;
    Ok(())
}

async fn ensure_parent(path: &Path) -> Result<(), ExportError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => tokio::fs::create_dir_all(parent)
            .await
            .map_err(|err| ExportError::CreateDir {
                path: path.to_path_buf(),
                source: err,
            }),
        Some(_) | None => Ok(()),
    }
}

fn sorted_by_id(results: &[RequestResult]) -> Vec<&RequestResult> {
    let mut sorted: Vec<&RequestResult> = results.iter().collect();
    sorted.sort_by_key(|result| result.id);
    sorted
}

fn seconds_3dp(duration: std::time::Duration) -> String {
    format!("{}.{:03}", duration.as_secs(), duration.subsec_millis())
}

fn millis(duration: std::time::Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Parses a rendered decimal such as `"12.34"` back into a JSON number.
fn decimal(rendered: &str) -> Value {
    serde_json::from_str(rendered.trim_start_matches('+')).unwrap_or(Value::Null)
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_owned()
    }
}
