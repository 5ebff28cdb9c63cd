use std::time::Duration;

use tracing::warn;

use super::histogram::LatencyHistogram;
use super::types::{AggregateStats, OverheadStats, RequestResult};

/// Scale for x100 fixed-point values.
const X100: u128 = 100;
/// Percent scaled by 100.
const PERCENT_X100: u128 = 10_000;
const MICROS_PER_SEC: u128 = 1_000_000;
const MILLIS_PER_SEC: u64 = 1_000;

#[derive(Default)]
struct OverheadAccumulator {
    count: u64,
    latency_sum: Duration,
    workload_sum_secs: u64,
}

/// Computes summary statistics over a completed batch in a single pass.
///
/// `total_duration` is the wall clock of the whole batch; throughput is
/// derived from it rather than from the sum of request latencies. An empty
/// batch or a zero duration yields zero averages and zero throughput.
#[must_use]
pub fn aggregate(results: &[RequestResult], total_duration: Duration) -> AggregateStats {
    let mut successful: u64 = 0;
    let mut failed: u64 = 0;
    let mut latency_sum = Duration::ZERO;
    let mut min_latency: Option<Duration> = None;
    let mut max_latency = Duration::ZERO;
    let mut overhead = OverheadAccumulator::default();
    let mut histogram = match LatencyHistogram::new() {
        Ok(histogram) => Some(histogram),
        Err(err) => {
            warn!("Percentiles unavailable: {}", err);
            None
        }
    };

    for result in results {
        if result.success {
            successful = successful.saturating_add(1);
            if let Some(workload_secs) = result.effective_workload_secs() {
                overhead.count = overhead.count.saturating_add(1);
                overhead.latency_sum = overhead.latency_sum.saturating_add(result.latency);
                overhead.workload_sum_secs =
                    overhead.workload_sum_secs.saturating_add(workload_secs);
            }
        } else {
            failed = failed.saturating_add(1);
        }

        latency_sum = latency_sum.saturating_add(result.latency);
        min_latency = Some(min_latency.map_or(result.latency, |min| min.min(result.latency)));
        max_latency = max_latency.max(result.latency);

        if let Some(hist) = histogram.as_mut() {
            let latency_ms = u64::try_from(result.latency.as_millis()).unwrap_or(u64::MAX);
            if let Err(err) = hist.record(latency_ms) {
                warn!("Dropping latency sample from percentiles: {}", err);
            }
        }
    }

    let total = successful.saturating_add(failed);
    let (p50_latency_ms, p90_latency_ms, p99_latency_ms) = histogram
        .as_ref()
        .map_or((0, 0, 0), LatencyHistogram::percentiles);

    AggregateStats {
        total,
        successful,
        failed,
        total_duration,
        avg_latency: mean(latency_sum, total),
        min_latency: min_latency.unwrap_or(Duration::ZERO),
        max_latency,
        p50_latency_ms,
        p90_latency_ms,
        p99_latency_ms,
        throughput_x100: throughput_x100(total, total_duration),
        success_rate_x100: ratio_x100(successful, total),
        overhead: overhead_stats(&overhead),
    }
}

fn mean(sum: Duration, count: u64) -> Duration {
    let nanos = sum
        .as_nanos()
        .checked_div(u128::from(count))
        .unwrap_or(0);
    Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX))
}

fn throughput_x100(total: u64, duration: Duration) -> u64 {
    let scaled = u128::from(total)
        .saturating_mul(X100)
        .saturating_mul(MICROS_PER_SEC)
        .checked_div(duration.as_micros())
        .unwrap_or(0);
    u64::try_from(scaled).unwrap_or(u64::MAX)
}

fn ratio_x100(part: u64, whole: u64) -> u64 {
    let scaled = u128::from(part)
        .saturating_mul(PERCENT_X100)
        .checked_div(u128::from(whole))
        .unwrap_or(0);
    u64::try_from(scaled).unwrap_or(u64::MAX)
}

fn overhead_stats(acc: &OverheadAccumulator) -> Option<OverheadStats> {
    if acc.count == 0 {
        return None;
    }
    let avg_latency = mean(acc.latency_sum, acc.count);
    let avg_workload_ms = acc
        .workload_sum_secs
        .saturating_mul(MILLIS_PER_SEC)
        .checked_div(acc.count)?;
    if avg_workload_ms == 0 {
        return None;
    }

    let latency_ms = i128::try_from(avg_latency.as_millis()).ok()?;
    let workload_ms = i128::from(avg_workload_ms);
    let overhead_x100 = latency_ms
        .checked_sub(workload_ms)?
        .checked_mul(i128::try_from(PERCENT_X100).ok()?)?
        .checked_div(workload_ms)?;

    Some(OverheadStats {
        avg_latency,
        avg_workload: Duration::from_millis(avg_workload_ms),
        overhead_x100: i64::try_from(overhead_x100).ok()?,
    })
}
