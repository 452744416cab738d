// REST repository implementation over the telemetry endpoint
use crate::application::telemetry_repository::TelemetryRepository;
use crate::domain::telemetry::TelemetryRecord;
use crate::infrastructure::wire::RawTelemetryRow;
use anyhow::{Context, Result};
use async_trait::async_trait;

#[derive(Debug, Clone)]
pub struct RestTelemetryRepository {
    base_url: String,
    client: reqwest::Client,
}

impl RestTelemetryRepository {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    fn endpoint_url(&self) -> String {
        format!("{}/api/datos", self.base_url)
    }
}

#[async_trait]
impl TelemetryRepository for RestTelemetryRepository {
    async fn fetch_records(&self) -> Result<Vec<TelemetryRecord>> {
        let url = self.endpoint_url();

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .context("Failed to reach the telemetry endpoint")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Telemetry fetch failed with status {}: {}", status, body);
        }

        let rows = response
            .json::<Vec<RawTelemetryRow>>()
            .await
            .context("Failed to parse telemetry payload")?;

        Ok(rows.into_iter().map(RawTelemetryRow::normalize).collect())
    }
}
