//! Core functionality for actual scanning behaviour.
//!
//! A [`Scanner`] fans one probe per target out over a buffered stream and
//! folds the outcomes back in registry order. Probes are futures polled by
//! the calling task, so nothing outlives [`Scanner::run`].
use crate::aggregate::{aggregate, ProbeError, ProbeOutcome, ScanResult};
use crate::registry::{list_targets, Target};
use anyhow::Context;
use futures::{stream, StreamExt};
use log::{debug, info};
use std::{pin::pin, sync::Arc, time::Duration};
use tokio::time::{self, Instant};
use tokio_util::sync::CancellationToken;

mod probe;
pub use probe::{
    HttpTransport, IdentityHeaders, ProbeExecutor, ProbeRequest, RawResponse, ReqwestTransport,
    DEFAULT_TIMEOUT, USER_AGENTS,
};

/// How many probes may be in flight at once when none is configured.
///
/// Larger than the registry, so every probe of a default scan overlaps.
pub const DEFAULT_BATCH_SIZE: u16 = 64;

/// Probes a subject against a list of targets.
///
/// targets are probed concurrently, at most `batch_size` at a time.
/// Timeout is how long a single probe may take before it counts as not found.
/// deadline optionally bounds the whole scan.
#[derive(Debug)]
pub struct Scanner {
    targets: Box<[Target]>,
    batch_size: u16,
    deadline: Option<Duration>,
    executor: Arc<ProbeExecutor>,
}

impl Scanner {
    /// Builds a scanner with no scan-wide deadline.
    pub fn new(
        targets: &[Target],
        transport: Arc<dyn HttpTransport>,
        timeout: Duration,
        tries: u8,
        batch_size: u16,
    ) -> Self {
        Self {
            targets: Box::from(targets),
            batch_size,
            deadline: None,
            executor: Arc::new(ProbeExecutor::new(transport, timeout, tries)),
        }
    }

    /// Bounds the whole scan. Probes still running when it passes are
    /// reported as cancelled.
    #[must_use]
    pub fn with_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.deadline = deadline;
        self
    }

    /// The targets this scanner probes, in report order.
    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    /// Runs every probe and returns once all of them have finished.
    pub async fn run(&self, subject: &str) -> ScanResult {
        self.run_with_cancel(subject, &CancellationToken::new())
            .await
    }

    /// Like [`Scanner::run`], but probes still in flight when `cancel`
    /// fires resolve immediately as cancelled.
    ///
    /// The result always holds exactly one outcome per target, in target
    /// order, whatever order the probes finish in.
    pub async fn run_with_cancel(&self, subject: &str, cancel: &CancellationToken) -> ScanResult {
        let deadline = self.deadline.map(|limit| Instant::now() + limit);
        let batch_size = usize::from(self.batch_size.max(1));

        debug!(
            "Start probing. \nSubject {}\nBatch size {}\nNumber of targets {}\nDeadline {:?}",
            subject,
            batch_size,
            self.targets.len(),
            self.deadline
        );

        let requests = self
            .targets
            .iter()
            .map(|target| ProbeRequest::new(target, subject))
            .enumerate();

        let probes = stream::iter(requests)
            .map(|(index, request)| {
                let executor = Arc::clone(&self.executor);
                async move {
                    let outcome = tokio::select! {
                        biased;
                        () = cancel.cancelled() => cancelled(&request),
                        () = wait_for(deadline) => cancelled(&request),
                        outcome = executor.probe(&request) => outcome,
                    };
                    (index, outcome)
                }
            })
            .buffer_unordered(batch_size);
        let mut probes = pin!(probes);

        let mut slots: Vec<Option<ProbeOutcome>> = vec![None; self.targets.len()];
        while let Some((index, outcome)) = probes.next().await {
            slots[index] = Some(outcome);
        }

        let outcomes = slots
            .into_iter()
            .zip(self.targets.iter())
            .map(|(slot, target)| {
                slot.unwrap_or_else(|| {
                    ProbeOutcome::failed(target.platform_name.clone(), ProbeError::Cancelled)
                })
            })
            .collect();

        let result = aggregate(subject, outcomes);
        info!(
            "Probed {} targets for {:?}: {} found, {} failed",
            result.outcomes.len(),
            subject,
            result.total_found,
            result.failed().count()
        );
        result
    }
}

fn cancelled(request: &ProbeRequest) -> ProbeOutcome {
    debug!("{} cancelled", request.target.platform_name);
    ProbeOutcome::failed(request.target.platform_name.clone(), ProbeError::Cancelled)
}

async fn wait_for(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

/// Searches every registered platform for `subject` with default settings.
///
/// Individual probe failures are reported as "not found". The only error is
/// failing to set up the HTTP client at all.
pub async fn search_targets(subject: &str) -> anyhow::Result<ScanResult> {
    let transport = ReqwestTransport::new().context("Could not build the HTTP client")?;
    let scanner = Scanner::new(
        list_targets(),
        Arc::new(transport),
        DEFAULT_TIMEOUT,
        1,
        DEFAULT_BATCH_SIZE,
    );

    Ok(scanner.run(subject).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    /// Answers every URL containing `hit` with a profile page, everything
    /// else with a 404, after `delay`.
    #[derive(Debug)]
    struct Delayed {
        delay: Duration,
        hit: &'static str,
    }

    #[async_trait]
    impl HttpTransport for Delayed {
        async fn get(
            &self,
            url: &str,
            _headers: &IdentityHeaders,
            _timeout: Duration,
        ) -> Result<RawResponse, ProbeError> {
            time::sleep(self.delay).await;
            if url.contains(self.hit) {
                Ok(RawResponse::new(200, "profile"))
            } else {
                Ok(RawResponse::new(404, ""))
            }
        }
    }

    fn targets() -> Vec<Target> {
        vec![
            Target::new("A", "https://a.test/{{username}}"),
            Target::new("B", "https://b.test/{{username}}"),
            Target::new("C", "https://c.test/{{username}}"),
        ]
    }

    fn scanner(delay: Duration, batch_size: u16) -> Scanner {
        let transport = Arc::new(Delayed { delay, hit: "b.test" });
        Scanner::new(&targets(), transport, DEFAULT_TIMEOUT, 1, batch_size)
    }

    #[tokio::test]
    async fn scanner_runs() {
        let result = scanner(Duration::ZERO, DEFAULT_BATCH_SIZE).run("alice").await;

        assert_eq!(result.subject, "alice");
        assert_eq!(result.total_found, 1);
        assert_eq!(result.outcomes.len(), 3);
        assert!(result.outcomes[1].exists);
        assert_eq!(result.outcomes[1].url.as_deref(), Some("https://b.test/alice"));
    }

    #[tokio::test]
    async fn outcomes_follow_scanner_targets() {
        let scanner = scanner(Duration::ZERO, DEFAULT_BATCH_SIZE);

        let result = scanner.run("alice").await;

        let expected: Vec<_> = scanner.targets().iter().map(|t| &t.platform_name).collect();
        let names: Vec<_> = result.outcomes.iter().map(|o| &o.platform_name).collect();
        assert_eq!(names, expected);
    }

    #[tokio::test]
    async fn empty_target_list_yields_empty_result() {
        let transport = Arc::new(Delayed {
            delay: Duration::ZERO,
            hit: "",
        });
        let scanner = Scanner::new(&[], transport, DEFAULT_TIMEOUT, 1, DEFAULT_BATCH_SIZE);

        let result = scanner.run("alice").await;

        assert_eq!(result.total_found, 0);
        assert!(result.outcomes.is_empty());
    }

    #[tokio::test]
    async fn batch_size_of_one_still_completes() {
        let result = scanner(Duration::ZERO, 1).run("alice").await;

        assert_eq!(result.outcomes.len(), 3);
        assert_eq!(result.total_found, 1);
    }

    #[tokio::test]
    async fn zero_batch_size_is_corrected() {
        let result = scanner(Duration::ZERO, 0).run("alice").await;

        assert_eq!(result.outcomes.len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_scan_is_still_complete() {
        let cancel = CancellationToken::new();
        cancel.cancel();

        let result = scanner(Duration::from_secs(5), DEFAULT_BATCH_SIZE)
            .run_with_cancel("alice", &cancel)
            .await;

        assert_eq!(result.outcomes.len(), 3);
        assert_eq!(result.total_found, 0);
        assert!(result
            .outcomes
            .iter()
            .all(|o| o.error == Some(ProbeError::Cancelled)));
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_mid_scan_keeps_finished_outcomes() {
        // One probe at a time, each taking a second: cancel after the first.
        let scanner = scanner(Duration::from_secs(1), 1);
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        let canceller = async move {
            time::sleep(Duration::from_millis(1_500)).await;
            trigger.cancel();
        };

        let (result, ()) = tokio::join!(scanner.run_with_cancel("bob", &cancel), canceller);

        let names: Vec<_> = result.outcomes.iter().map(|o| o.platform_name.as_str()).collect();
        assert_eq!(names, ["A", "B", "C"]);
        assert_eq!(result.outcomes[0].error, None);
        assert_eq!(result.outcomes[1].error, Some(ProbeError::Cancelled));
        assert_eq!(result.outcomes[2].error, Some(ProbeError::Cancelled));
    }

    #[tokio::test(start_paused = true)]
    async fn deadline_bounds_the_scan() {
        let scanner = scanner(Duration::from_secs(10), DEFAULT_BATCH_SIZE)
            .with_deadline(Some(Duration::from_secs(2)));
        let started = Instant::now();

        let result = scanner.run("alice").await;

        assert!(started.elapsed() < Duration::from_secs(3));
        assert_eq!(result.outcomes.len(), 3);
        assert!(result
            .outcomes
            .iter()
            .all(|o| o.error == Some(ProbeError::Cancelled)));
    }
}
