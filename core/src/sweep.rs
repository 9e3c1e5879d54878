//! # Reachability Sweep
//!
//! Orchestrates probing a list of hosts and collecting one verdict per
//! host. Hosts are independent, so each one is probed in its own task;
//! results are joined back **in input order** so output stays
//! deterministic regardless of which host answers first.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use opskit_common::config::Config;
use tracing::warn;

use crate::probe::{HostReport, Prober, Verdict};

/// Called after each host finishes, with the number completed so far.
pub type ProgressFn = dyn Fn(usize) + Send + Sync;

/// Probes every host in `hosts` and returns one report per host, in
/// input order.
///
/// A failed probe becomes an [`Verdict::Undetermined`] report carrying
/// the cause; it never aborts the remaining hosts. An empty host list
/// yields an empty result.
pub async fn perform_sweep(
    hosts: &[String],
    cfg: &Config,
    prober: Arc<dyn Prober>,
    on_progress: Option<Box<ProgressFn>>,
) -> Vec<HostReport> {
    let completed = Arc::new(AtomicUsize::new(0));
    let callback: Option<Arc<ProgressFn>> = on_progress.map(Arc::from);

    let mut handles = Vec::with_capacity(hosts.len());
    for host in hosts {
        let prober = prober.clone();
        let host = host.clone();
        let count = cfg.probe_count;
        let completed = completed.clone();
        let callback = callback.clone();

        handles.push(tokio::spawn(async move {
            let report = match prober.probe(&host, count).await {
                Ok(verdict) => HostReport {
                    host,
                    verdict,
                    detail: None,
                },
                Err(e) => {
                    warn!(host, error = %e, "probe failed");
                    HostReport {
                        host,
                        verdict: Verdict::Undetermined,
                        detail: Some(e.to_string()),
                    }
                }
            };

            let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
            if let Some(cb) = &callback {
                cb(done);
            }
            report
        }));
    }

    let mut reports = Vec::with_capacity(handles.len());
    for (handle, host) in handles.into_iter().zip(hosts) {
        match handle.await {
            Ok(report) => reports.push(report),
            Err(e) => reports.push(HostReport {
                host: host.clone(),
                verdict: Verdict::Undetermined,
                detail: Some(format!("probe task failed: {e}")),
            }),
        }
    }

    reports
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use opskit_common::error::ProbeError;

    use super::*;

    /// Scripted prober: answers per host, records call order.
    struct MockProber {
        outcomes: HashMap<String, Result<Verdict, ProbeError>>,
        calls: Mutex<Vec<String>>,
    }

    impl MockProber {
        fn new(outcomes: Vec<(&str, Result<Verdict, ProbeError>)>) -> Self {
            Self {
                outcomes: outcomes
                    .into_iter()
                    .map(|(h, v)| (h.to_string(), v))
                    .collect(),
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl Prober for MockProber {
        async fn probe(&self, host: &str, _count: u32) -> Result<Verdict, ProbeError> {
            self.calls.lock().unwrap().push(host.to_string());
            match self.outcomes.get(host) {
                Some(Ok(v)) => Ok(*v),
                Some(Err(e)) => Err(ProbeError::Inconclusive(e.to_string())),
                None => Ok(Verdict::Unreachable),
            }
        }
    }

    fn host_vec(hosts: &[&str]) -> Vec<String> {
        hosts.iter().map(|h| h.to_string()).collect()
    }

    #[tokio::test]
    async fn one_report_per_host_in_input_order() {
        let hosts = host_vec(&["8.8.8.8", "9.76.144.104", "9.76.151.11"]);
        let prober = Arc::new(MockProber::new(vec![
            ("8.8.8.8", Ok(Verdict::Reachable)),
            ("9.76.144.104", Ok(Verdict::Unreachable)),
            ("9.76.151.11", Ok(Verdict::Reachable)),
        ]));

        let reports = perform_sweep(&hosts, &Config::default(), prober, None).await;

        assert_eq!(reports.len(), hosts.len());
        for (report, host) in reports.iter().zip(&hosts) {
            assert_eq!(&report.host, host);
        }
    }

    #[tokio::test]
    async fn reachable_host_renders_successful_ping() {
        let hosts = host_vec(&["8.8.8.8"]);
        let prober = Arc::new(MockProber::new(vec![("8.8.8.8", Ok(Verdict::Reachable))]));

        let reports = perform_sweep(&hosts, &Config::default(), prober, None).await;

        assert_eq!(reports[0].to_string(), "8.8.8.8 : Successful Ping");
    }

    #[tokio::test]
    async fn unreachable_host_renders_failed_ping() {
        let hosts = host_vec(&["8.8.8.8"]);
        let prober = Arc::new(MockProber::new(vec![("8.8.8.8", Ok(Verdict::Unreachable))]));

        let reports = perform_sweep(&hosts, &Config::default(), prober, None).await;

        assert_eq!(reports[0].to_string(), "8.8.8.8 : Failed Ping");
    }

    #[tokio::test]
    async fn probe_failure_does_not_abort_remaining_hosts() {
        let hosts = host_vec(&["10.0.0.1", "10.0.0.2", "10.0.0.3"]);
        let prober = Arc::new(MockProber::new(vec![
            ("10.0.0.1", Ok(Verdict::Reachable)),
            (
                "10.0.0.2",
                Err(ProbeError::Unavailable("no ping".to_string())),
            ),
            ("10.0.0.3", Ok(Verdict::Reachable)),
        ]));

        let reports = perform_sweep(&hosts, &Config::default(), prober, None).await;

        assert_eq!(reports.len(), 3);
        assert_eq!(reports[0].verdict, Verdict::Reachable);
        assert_eq!(reports[1].verdict, Verdict::Undetermined);
        assert!(reports[1].detail.is_some());
        assert_eq!(reports[2].verdict, Verdict::Reachable);
    }

    #[tokio::test]
    async fn empty_host_list_yields_no_reports() {
        let prober = Arc::new(MockProber::new(vec![]));
        let reports = perform_sweep(&[], &Config::default(), prober, None).await;
        assert!(reports.is_empty());
    }

    #[tokio::test]
    async fn progress_callback_reaches_host_count() {
        let hosts = host_vec(&["a.example", "b.example"]);
        let prober = Arc::new(MockProber::new(vec![]));
        let seen = Arc::new(AtomicUsize::new(0));
        let seen_ref = seen.clone();

        let reports = perform_sweep(
            &hosts,
            &Config::default(),
            prober,
            Some(Box::new(move |done| {
                seen_ref.fetch_max(done, Ordering::Relaxed);
            })),
        )
        .await;

        assert_eq!(reports.len(), 2);
        assert_eq!(seen.load(Ordering::Relaxed), 2);
    }
}
