use reqwest::Url;

use crate::metrics::AggregateStats;

use super::formatting::{format_latency, format_signed_x100, format_x100};

/// Percent scaled by 100.
const FULL_PERCENT_X100: u64 = 10_000;

#[must_use]
pub fn summary_lines(target: &Url, stats: &AggregateStats) -> Vec<String> {
    let failure_rate_x100 = if stats.total > 0 {
        FULL_PERCENT_X100.saturating_sub(stats.success_rate_x100)
    } else {
        0
    };

    let mut lines = vec![
        "LOAD TEST RESULTS".to_owned(),
        "==========================================".to_owned(),
        format!("Target: {}", target),
        format!("Total Requests: {}", stats.total),
        format!(
            "Successful: {} ({}%)",
            stats.successful,
            format_x100(stats.success_rate_x100)
        ),
        format!(
            "Failed: {} ({}%)",
            stats.failed,
            format_x100(failure_rate_x100)
        ),
        format!("Total Duration: {}", format_latency(stats.total_duration)),
        format!("Requests/Second: {}", format_x100(stats.throughput_x100)),
        format!("Avg Latency: {}", format_latency(stats.avg_latency)),
        format!(
            "Min/Max Latency: {} / {}",
            format_latency(stats.min_latency),
            format_latency(stats.max_latency)
        ),
        format!(
            "P50/P90/P99 Latency: {}ms / {}ms / {}ms",
            stats.p50_latency_ms, stats.p90_latency_ms, stats.p99_latency_ms
        ),
    ];

    if let Some(overhead) = stats.overhead.as_ref() {
        lines.push(format!(
            "Avg Response Time (ok): {}",
            format_latency(overhead.avg_latency)
        ));
        lines.push(format!(
            "Avg Workload Time: {}",
            format_latency(overhead.avg_workload)
        ));
        lines.push(format!(
            "Processing Overhead: {}%",
            format_signed_x100(overhead.overhead_x100)
        ));
    }

    lines
}
