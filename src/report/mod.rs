//! Text report: summary block, per-request table, and error summary.
mod formatting;
mod summary;
mod table;

#[cfg(test)]
mod tests;

pub use formatting::{format_latency, format_signed_x100, format_x100};
pub use summary::summary_lines;
pub use table::{error_lines, result_table_lines};

use reqwest::Url;

use crate::metrics::{AggregateStats, RequestResult};

/// Prints the full report to stdout.
pub fn print_report(
    target: &Url,
    stats: &AggregateStats,
    results: &[RequestResult],
    show_table: bool,
) {
    let mut lines = summary_lines(target, stats);
    if show_table && !results.is_empty() {
        lines.push(String::new());
        lines.extend(result_table_lines(results));
    }
    if stats.failed > 0 {
        lines.push(String::new());
        lines.extend(error_lines(results));
    }
    for line in lines {
        println!("{}", line);
    }
}
