use super::models::{ErrorKind, HealthReport, ProbeResult};
use super::status::{StatusMap, StatusProvider};
use crate::connectors::{Probe, ProbeDescriptor};
use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::Instrument;

/// Ordered collection of configured probes, built once at startup.
pub type DriverSet = Vec<Arc<dyn Probe>>;

/// Runs the driver set and serves status snapshots.
pub struct HealthChecker {
    drivers: DriverSet,
    status: StatusProvider,
}

impl HealthChecker {
    pub fn new(drivers: DriverSet) -> Self {
        Self {
            drivers,
            status: StatusProvider::default(),
        }
    }

    pub fn with_status(mut self, status: StatusProvider) -> Self {
        self.status = status;
        self
    }

    pub fn drivers(&self) -> &[Arc<dyn Probe>] {
        &self.drivers
    }

    /// One result per probe, in completion order.
    pub async fn ping(&self) -> Vec<ProbeResult> {
        run_all(&self.drivers).await
    }

    pub async fn check_all(&self) -> HealthReport {
        aggregate(self.ping().await)
    }

    pub fn status(&self) -> StatusMap {
        self.status.snapshot()
    }
}

/// Checks every probe concurrently, one task each, and waits for all of them.
///
/// Results arrive in completion order. There is no per-probe timeout: a probe
/// that never returns holds the whole cycle. Dropping the returned future
/// aborts the checks still running.
pub async fn run_all(drivers: &[Arc<dyn Probe>]) -> Vec<ProbeResult> {
    let mut tasks = JoinSet::new();
    for probe in drivers {
        tasks.spawn(check_one(Arc::clone(probe)));
    }

    let mut results = Vec::with_capacity(drivers.len());
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(result) => results.push(result),
            Err(err) => {
                tracing::error!("Probe task did not complete: {:?}", err);
                results.push(ProbeResult::failure(
                    ProbeDescriptor::default(),
                    ErrorKind::Internal,
                    format!("probe task failed: {}", err),
                ));
            }
        }
    }

    tracing::debug!(
        probes = drivers.len(),
        failed = results.iter().filter(|r| !r.is_healthy()).count(),
        "Health cycle complete"
    );
    results
}

async fn check_one(probe: Arc<dyn Probe>) -> ProbeResult {
    let descriptor = probe.describe();
    let span = tracing::info_span!("probe", kind = %descriptor.kind, name = %descriptor.name);

    let outcome = AssertUnwindSafe(probe.check())
        .catch_unwind()
        .instrument(span.clone())
        .await;

    span.in_scope(|| match outcome {
        Ok(Ok(())) => ProbeResult::success(descriptor),
        Ok(Err(err)) => {
            tracing::warn!(error_kind = ?err.kind(), "Health check failed: {}", err);
            ProbeResult::from_error(descriptor, &err)
        }
        Err(payload) => {
            let message = format!("probe panicked: {}", panic_message(payload.as_ref()));
            tracing::error!("{}", message);
            ProbeResult::failure(descriptor, ErrorKind::Internal, message)
        }
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "unknown panic"
    }
}

/// Reduces one cycle's results: healthy iff no result carries an error.
pub fn aggregate(results: Vec<ProbeResult>) -> HealthReport {
    let healthy = results.iter().all(ProbeResult::is_healthy);
    HealthReport { healthy, results }
}
