use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use futures_util::future::join_all;
use rand::Rng;
use reqwest::{Client, Url};
use tokio::task::JoinError;
use tokio::time::Instant;
use tracing::{error, info};

use crate::args::WorkloadRange;
use crate::error::HttpError;
use crate::metrics::{RequestResult, RequestTask};

use super::client::build_client;
use super::execution::execute_task;

/// Everything the dispatcher needs to reach the webhook.
#[derive(Debug, Clone)]
pub struct DispatchConfig {
    pub target: Url,
    pub request_timeout: Option<Duration>,
    /// `None` sends no workload hint.
    pub workload: Option<WorkloadRange>,
}

/// Completed batch: one result per task, slot `i` holding task `i + 1`.
#[derive(Debug)]
pub struct BatchOutcome {
    pub results: Vec<RequestResult>,
    pub total_duration: Duration,
}

/// Fires a burst of concurrent webhook requests and waits for all of them.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    client: Client,
    target: Arc<Url>,
    workload: Option<WorkloadRange>,
}

impl Dispatcher {
    /// Builds a dispatcher and its HTTP client.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be built.
    pub fn new(config: DispatchConfig) -> Result<Self, HttpError> {
        let client = build_client(&config)?;
        Ok(Self {
            client,
            target: Arc::new(config.target),
            workload: config.workload,
        })
    }

    #[must_use]
    pub fn target(&self) -> &Url {
        &self.target
    }

    /// Creates tasks `1..=requested`, drawing a workload hint for each when
    /// hints are enabled.
    #[must_use]
    pub fn plan(&self, requested: usize) -> Vec<RequestTask> {
        let mut rng = rand::thread_rng();
        (1..=u64::try_from(requested).unwrap_or(u64::MAX))
            .map(|id| RequestTask {
                id,
                workload_hint: self
                    .workload
                    .map(|range| rng.gen_range(range.as_range())),
            })
            .collect()
    }

    /// Launches every task at once and returns when all have finished.
    ///
    /// Each task writes only its own slot; the join is the single barrier
    /// before aggregation. A task that panics still yields a failed result.
    pub async fn run(&self, requested: usize) -> BatchOutcome {
        let tasks = self.plan(requested);
        info!(
            "Launching {} concurrent requests against {}",
            tasks.len(),
            self.target
        );

        let started = Instant::now();
        let handles: Vec<_> = tasks
            .iter()
            .map(|task| {
                let client = self.client.clone();
                let target = Arc::clone(&self.target);
                let task = *task;
                tokio::spawn(async move { execute_task(&client, &target, task).await })
            })
            .collect();
        let joined = join_all(handles).await;
        let total_duration = started.elapsed();

        let results = collect_slots(tasks, joined, total_duration);

        BatchOutcome {
            results,
            total_duration,
        }
    }
}

/// Pairs each task with its joined output. A task that panicked or was
/// aborted becomes a failed result timed at `elapsed`.
pub(super) fn collect_slots(
    tasks: Vec<RequestTask>,
    joined: Vec<Result<RequestResult, JoinError>>,
    elapsed: Duration,
) -> Vec<RequestResult> {
    tasks
        .into_iter()
        .zip(joined)
        .map(|(task, slot)| {
            slot.unwrap_or_else(|err| {
                error!("Request {} task aborted: {}", task.id, err);
                RequestResult::failed(
                    task,
                    0,
                    elapsed,
                    format!("Request task aborted: {}", err),
                    Utc::now(),
                    0,
                )
            })
        })
        .collect()
}
