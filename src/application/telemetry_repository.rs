// Repository trait for telemetry data access
use crate::domain::telemetry::TelemetryRecord;
use async_trait::async_trait;

#[async_trait]
pub trait TelemetryRepository: Send + Sync {
    /// Fetch the full telemetry payload, normalized into canonical records.
    ///
    /// The returned order carries no meaning; the dataset store re-sorts on
    /// every refresh.
    async fn fetch_records(&self) -> anyhow::Result<Vec<TelemetryRecord>>;
}
