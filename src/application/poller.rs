// Poller - periodic fetch loops feeding the session

use crate::application::session::DashboardSession;
use crate::application::telemetry_repository::TelemetryRepository;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;

/// Drives the two refresh cadences: a fast monitoring loop and a slow
/// metadata loop. Each loop fires immediately on startup, then on its fixed
/// interval. Failures are logged and the next tick retries unconditionally;
/// there is no backoff and no retry cap.
///
/// The loops are independent tasks and responses are not sequenced: whichever
/// response resolves last wins the store (last-writer-wins, a carried-over
/// limitation of the source system).
pub struct Poller {
    repository: Arc<dyn TelemetryRepository>,
    session: Arc<Mutex<DashboardSession>>,
    monitoring_interval: Duration,
    metadata_interval: Duration,
}

impl Poller {
    pub fn new(
        repository: Arc<dyn TelemetryRepository>,
        session: Arc<Mutex<DashboardSession>>,
        monitoring_interval: Duration,
        metadata_interval: Duration,
    ) -> Self {
        Self {
            repository,
            session,
            monitoring_interval,
            metadata_interval,
        }
    }

    /// Spawn both loops. The handles never resolve in normal operation.
    pub fn spawn(self) -> (JoinHandle<()>, JoinHandle<()>) {
        let monitoring = {
            let repository = self.repository.clone();
            let session = self.session.clone();
            let period = self.monitoring_interval;
            tokio::spawn(async move {
                let mut ticker = tokio::time::interval(period);
                loop {
                    ticker.tick().await;
                    poll_monitoring(&repository, &session).await;
                }
            })
        };

        let metadata = {
            let repository = self.repository;
            let session = self.session;
            let period = self.metadata_interval;
            tokio::spawn(async move {
                let mut ticker = tokio::time::interval(period);
                loop {
                    ticker.tick().await;
                    poll_metadata(&repository, &session).await;
                }
            })
        };

        (monitoring, metadata)
    }
}

/// One monitoring tick: fetch outside the lock, then apply the snapshot.
async fn poll_monitoring(
    repository: &Arc<dyn TelemetryRepository>,
    session: &Arc<Mutex<DashboardSession>>,
) {
    match repository.fetch_records().await {
        Ok(records) => {
            tracing::debug!(count = records.len(), "monitoring refresh");
            session.lock().unwrap().monitoring_refresh(records);
        }
        Err(e) => {
            // Prior data stays on screen; the next tick retries.
            tracing::warn!(error = %e, "monitoring fetch failed");
        }
    }
}

async fn poll_metadata(
    repository: &Arc<dyn TelemetryRepository>,
    session: &Arc<Mutex<DashboardSession>>,
) {
    match repository.fetch_records().await {
        Ok(records) => {
            session.lock().unwrap().background_refresh(records);
        }
        Err(e) => {
            tracing::warn!(error = %e, "metadata fetch failed");
        }
    }
}
