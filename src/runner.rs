use crate::checks::dispatcher::Dispatcher;
use crate::client;
use crate::config::Config;
use crate::outcome::{CheckOutcome, RunSummary};
use crate::task::Task;
use log::{debug, error, info, warn};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Performs one pass over a fetched task batch: check every task, report every outcome.
pub struct Runner {
    config: Arc<Config>,
    dispatcher: Arc<Dispatcher>,
}

impl Runner {
    pub fn new(config: Config) -> Self {
        let dispatcher = Dispatcher::new(&config);
        Self {
            config: Arc::new(config),
            dispatcher: Arc::new(dispatcher),
        }
    }

    /// Runs the pass to completion. Failing to fetch tasks results in an empty batch and
    /// failing to report a result only affects that one task.
    pub async fn run(&self) -> RunSummary {
        let tasks = match client::fetch_tasks(&self.config).await {
            Ok(tasks) => tasks,
            Err(e) => {
                error!(
                    "Failed to fetch tasks from {}: {}",
                    self.config.endpoints.tasks_url, e
                );
                Vec::new()
            }
        };
        info!("Fetched {} tasks", tasks.len());

        let summary = if self.config.run.concurrency > 1 {
            self.run_concurrently(tasks).await
        } else {
            self.run_sequentially(tasks).await
        };
        info!("Run finished: {}", summary);
        summary
    }

    async fn run_sequentially(&self, tasks: Vec<Task>) -> RunSummary {
        let mut summary = RunSummary::default();
        for task in tasks {
            let (outcome, reported) = process(&self.config, &self.dispatcher, &task).await;
            summary.record(outcome, reported);
        }
        summary
    }

    /// Checks up to `concurrency` tasks at once. Every job owns its task, and reports carry the
    /// task id, so completion order does not matter.
    async fn run_concurrently(&self, tasks: Vec<Task>) -> RunSummary {
        debug!(
            "Checking {} tasks with concurrency {}",
            tasks.len(),
            self.config.run.concurrency
        );
        let semaphore = Arc::new(Semaphore::new(self.config.run.concurrency));
        let mut jobs = JoinSet::new();
        for task in tasks {
            let config = Arc::clone(&self.config);
            let dispatcher = Arc::clone(&self.dispatcher);
            let semaphore = Arc::clone(&semaphore);
            jobs.spawn(async move {
                let _permit = semaphore.acquire_owned().await.ok();
                process(&config, &dispatcher, &task).await
            });
        }

        let mut summary = RunSummary::default();
        while let Some(joined) = jobs.join_next().await {
            match joined {
                Ok((outcome, reported)) => summary.record(outcome, reported),
                Err(e) => error!("Check job did not complete: {}", e),
            }
        }
        summary
    }
}

/// Checks a single task and reports the outcome. Returns the outcome and whether the report
/// was accepted.
async fn process(config: &Config, dispatcher: &Dispatcher, task: &Task) -> (CheckOutcome, bool) {
    let outcome = dispatcher.perform(task).await;
    let reported = match client::report(config, task, outcome).await {
        Ok(()) => true,
        Err(e) => {
            warn!("Failed to report task {}: {}", task.task_id, e);
            false
        }
    };
    (outcome, reported)
}
