use clap::Parser;
use std::time::Duration;

use super::defaults::{DEFAULT_WORKLOAD_MAX_SECS, DEFAULT_WORKLOAD_MIN_SECS};
use super::parsers::{parse_duration_arg, parse_positive_usize};
use super::types::{PositiveUsize, WorkloadRange};
use crate::error::{AppError, AppResult};

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Fire N simultaneous webhook POSTs, measure per-request latency, and report throughput and processing overhead."
)]
pub struct LoadTestArgs {
    /// Number of requests to launch at once (positive integer)
    #[arg(value_name = "CONCURRENT_REQUESTS", value_parser = parse_positive_usize)]
    pub concurrent_requests: PositiveUsize,

    /// Target webhook URL
    #[arg(long, short, env = "WEBHOOK_URL")]
    pub url: Option<String>,

    /// Path to a TOML or JSON config file (defaults to ./hookburst.toml or ./hookburst.json)
    #[arg(long, short)]
    pub config: Option<String>,

    /// Per-request timeout (supports ms/s/m/h). No timeout unless set.
    #[arg(long = "timeout", value_parser = parse_duration_arg)]
    pub request_timeout: Option<Duration>,

    /// Smallest workload hint in seconds sent with each request
    #[arg(long = "workload-min", default_value_t = DEFAULT_WORKLOAD_MIN_SECS)]
    pub workload_min: u64,

    /// Largest workload hint in seconds sent with each request
    #[arg(long = "workload-max", default_value_t = DEFAULT_WORKLOAD_MAX_SECS)]
    pub workload_max: u64,

    /// Do not send a workload hint; overhead falls back to server-reported delays
    #[arg(long = "no-workload")]
    pub no_workload: bool,

    /// Skip the per-request results table in the report
    #[arg(long = "no-table")]
    pub no_table: bool,

    /// Write per-request results as CSV to this path
    #[arg(long = "export-csv")]
    pub export_csv: Option<String>,

    /// Write the summary and per-request results as JSON to this path
    #[arg(long = "export-json")]
    pub export_json: Option<String>,

    /// Enable debug logging
    #[arg(long, short)]
    pub verbose: bool,
}

impl LoadTestArgs {
    /// Resolves the workload hint range, or `None` when hints are disabled.
    ///
    /// # Errors
    ///
    /// Returns an error when the minimum exceeds the maximum.
    pub fn workload_range(&self) -> AppResult<Option<WorkloadRange>> {
        if self.no_workload {
            return Ok(None);
        }
        WorkloadRange::new(self.workload_min, self.workload_max)
            .map(Some)
            .map_err(AppError::from)
    }

    #[must_use]
    pub const fn requested(&self) -> usize {
        self.concurrent_requests.get()
    }
}
