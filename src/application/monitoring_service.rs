// Monitoring view model - live indicators, rolling charts, alert feed, map

use crate::application::dataset::DatasetStore;
use crate::application::surfaces::{ChartSurface, MapSurface};
use crate::domain::classification::{
    assess_health, classify_movement, HealthStatus, Severity,
};
use crate::domain::telemetry::{format_metric, TelemetryRecord};
use chrono::Utc;
use std::collections::VecDeque;

/// Points kept per rolling chart metric.
pub const ROLLING_CAPACITY: usize = 15;
/// Alert feed cap; oldest entries are evicted.
pub const ALERT_CAPACITY: usize = 20;

const LIVE_MIN_ZOOM: u8 = 14;

/// Latest-record gauge texts, placeholder `--` where the reading is missing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndicatorSet {
    pub ambient_temp: String,
    pub object_temp: String,
    pub heart_rate: String,
    pub oxygen: String,
    pub gyro: String,
    pub satellites: String,
    pub status_label: String,
    pub status_severity: Option<Severity>,
    pub movement: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub message: String,
    pub severity: Severity,
}

/// Derived state for the live monitoring view, refreshed on every poll.
pub struct MonitoringViewModel {
    indicators: IndicatorSet,
    alerts: VecDeque<Alert>,
    labels: VecDeque<String>,
    temp_series: VecDeque<f64>,
    heart_series: VecDeque<f64>,
    temp_chart: Box<dyn ChartSurface>,
    heart_chart: Box<dyn ChartSurface>,
    map: Box<dyn MapSurface>,
}

impl MonitoringViewModel {
    pub fn new(
        temp_chart: Box<dyn ChartSurface>,
        heart_chart: Box<dyn ChartSurface>,
        map: Box<dyn MapSurface>,
    ) -> Self {
        Self {
            indicators: IndicatorSet::default(),
            alerts: VecDeque::new(),
            labels: VecDeque::new(),
            temp_series: VecDeque::new(),
            heart_series: VecDeque::new(),
            temp_chart,
            heart_chart,
            map,
        }
    }

    /// Apply the latest snapshot: refresh indicators, maybe append the rolling
    /// series, raise alerts, and upsert the live map marker.
    pub fn refresh(&mut self, store: &DatasetStore) {
        let Some(latest) = store.latest() else {
            tracing::warn!("no telemetry available for the monitoring panel");
            return;
        };

        let status = assess_health(latest.object_temp, latest.heart_rate);
        self.update_indicators(latest, status);

        if status.severity() == Severity::Critical {
            self.push_alert(latest, status);
        }

        if let Some((lat, lon)) = latest.position() {
            self.update_map(lat, lon, latest.entity_label());
        }

        self.append_series(latest);
    }

    pub fn indicators(&self) -> &IndicatorSet {
        &self.indicators
    }

    /// Newest-first alert feed.
    pub fn alerts(&self) -> impl Iterator<Item = &Alert> {
        self.alerts.iter()
    }

    pub fn series_len(&self) -> usize {
        self.temp_series.len()
    }

    fn update_indicators(&mut self, record: &TelemetryRecord, status: HealthStatus) {
        let gyro = match record.gyro_x {
            Some(gx) => format!(
                "X:{:.2} Y:{:.2} Z:{:.2}",
                gx,
                record.gyro_y.unwrap_or(0.0),
                record.gyro_z.unwrap_or(0.0)
            ),
            None => "-- / -- / --".to_string(),
        };

        self.indicators = IndicatorSet {
            ambient_temp: format_metric(record.ambient_temp, "°C"),
            object_temp: format_metric(record.object_temp, "°C"),
            heart_rate: format_metric(record.heart_rate, "BPM"),
            oxygen: format_metric(record.oxygen, "%"),
            gyro,
            satellites: record
                .satellite_count
                .map(|s| s.to_string())
                .unwrap_or_else(|| "--".to_string()),
            status_label: status.label().to_string(),
            status_severity: Some(status.severity()),
            movement: classify_movement(record.gyro_x, record.gyro_y, record.gyro_z)
                .label()
                .to_string(),
        };
    }

    fn push_alert(&mut self, record: &TelemetryRecord, status: HealthStatus) {
        let message = format!(
            "Cow #{} - {}! Temp: {}, Heart rate: {}",
            record.entity_label(),
            status.label(),
            format_metric(record.object_temp, "°C"),
            format_metric(record.heart_rate, "BPM"),
        );
        tracing::info!(alert = %message, "critical telemetry alert");

        self.alerts.push_front(Alert {
            message,
            severity: status.severity(),
        });
        self.alerts.truncate(ALERT_CAPACITY);
    }

    fn update_map(&mut self, lat: f64, lon: f64, entity: &str) {
        self.map
            .place_marker(lat, lon, &format!("Cow #{entity} located"));

        // Recenter only when the marker left the visible bounds, so manual
        // panning survives quiet updates.
        if !self.map.in_view(lat, lon) {
            let zoom = self.map.zoom().max(LIVE_MIN_ZOOM);
            self.map.set_view(lat, lon, zoom);
        }
    }

    /// Append to the rolling series, skipping stale/incomplete samples: a
    /// record missing either vital leaves the charts untouched.
    fn append_series(&mut self, record: &TelemetryRecord) {
        let (Some(temp), Some(heart)) = (record.object_temp, record.heart_rate) else {
            return;
        };

        let label = match record.timestamp {
            Some(ts) => ts.format("%H:%M:%S").to_string(),
            None => Utc::now().format("%H:%M:%S").to_string(),
        };

        self.labels.push_back(label.clone());
        self.temp_series.push_back(temp);
        self.heart_series.push_back(heart);
        self.temp_chart.append(&label, temp);
        self.heart_chart.append(&label, heart);

        if self.labels.len() > ROLLING_CAPACITY {
            self.labels.pop_front();
            self.temp_series.pop_front();
            self.heart_series.pop_front();
            self.temp_chart.shift();
            self.heart_chart.shift();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::surfaces::test_support::{RecordingChart, RecordingMap, Shared};
    use chrono::TimeZone;

    fn vm() -> MonitoringViewModel {
        MonitoringViewModel::new(
            Box::new(RecordingChart::default()),
            Box::new(RecordingChart::default()),
            Box::new(RecordingMap::default()),
        )
    }

    fn store_with(records: Vec<TelemetryRecord>) -> DatasetStore {
        let mut store = DatasetStore::new();
        store.replace(records);
        store
    }

    fn healthy_record(minute: u32) -> TelemetryRecord {
        TelemetryRecord {
            entity_id: Some("cow-7".to_string()),
            object_temp: Some(38.5),
            heart_rate: Some(60.0),
            timestamp: Some(Utc.with_ymd_and_hms(2025, 6, 1, 9, minute, 0).unwrap()),
            ..Default::default()
        }
    }

    #[test]
    fn test_indicators_show_placeholders_for_missing_fields() {
        let mut vm = vm();
        vm.refresh(&store_with(vec![TelemetryRecord {
            timestamp: Some(Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap()),
            ..Default::default()
        }]));

        let indicators = vm.indicators();
        assert_eq!(indicators.object_temp, "-- °C");
        assert_eq!(indicators.heart_rate, "-- BPM");
        assert_eq!(indicators.gyro, "-- / -- / --");
        assert_eq!(indicators.satellites, "--");
        // Missing vitals default to Healthy; preserved behavior.
        assert_eq!(indicators.status_label, "Healthy");
    }

    #[test]
    fn test_incomplete_sample_skips_series_but_updates_indicators() {
        let mut vm = vm();
        let mut record = healthy_record(0);
        record.heart_rate = None;
        vm.refresh(&store_with(vec![record]));

        assert_eq!(vm.series_len(), 0);
        assert_eq!(vm.indicators().object_temp, "38.5 °C");
    }

    #[test]
    fn test_rolling_series_caps_at_capacity() {
        let mut vm = vm();
        for minute in 0..20 {
            vm.refresh(&store_with(vec![healthy_record(minute)]));
        }
        assert_eq!(vm.series_len(), ROLLING_CAPACITY);
    }

    #[test]
    fn test_critical_record_raises_alert_at_head() {
        let mut vm = vm();
        let mut fever = healthy_record(0);
        fever.object_temp = Some(41.2);
        vm.refresh(&store_with(vec![fever]));

        let mut later = healthy_record(1);
        later.heart_rate = Some(95.0);
        vm.refresh(&store_with(vec![later]));

        let alerts: Vec<_> = vm.alerts().collect();
        assert_eq!(alerts.len(), 2);
        assert!(alerts[0].message.contains("95 BPM"));
        assert_eq!(alerts[0].severity, Severity::Critical);
    }

    #[test]
    fn test_alert_feed_caps_at_twenty() {
        let mut vm = vm();
        for minute in 0..30 {
            let mut fever = healthy_record(minute);
            fever.object_temp = Some(41.0);
            vm.refresh(&store_with(vec![fever]));
        }
        assert_eq!(vm.alerts().count(), ALERT_CAPACITY);
    }

    #[test]
    fn test_notice_severity_does_not_alert() {
        let mut vm = vm();
        let mut in_heat = healthy_record(0);
        in_heat.object_temp = Some(38.5);
        in_heat.heart_rate = Some(70.0);
        vm.refresh(&store_with(vec![in_heat]));
        assert_eq!(vm.alerts().count(), 0);
    }

    #[test]
    fn test_map_recenters_only_when_out_of_view() {
        let map = Shared::<RecordingMap>::default();
        let mut vm = MonitoringViewModel::new(
            Box::new(RecordingChart::default()),
            Box::new(RecordingChart::default()),
            Box::new(map.clone()),
        );

        let mut record = healthy_record(0);
        record.latitude = Some(19.4);
        record.longitude = Some(-99.1);
        vm.refresh(&store_with(vec![record.clone()]));

        {
            let state = map.0.lock().unwrap();
            assert!(state.marker.is_some());
            assert_eq!(state.view_changes, 0);
        }

        map.0.lock().unwrap().everything_in_view = false;
        vm.refresh(&store_with(vec![record]));

        let state = map.0.lock().unwrap();
        assert_eq!(state.view_changes, 1);
        assert_eq!(state.center, (19.4, -99.1));
        assert_eq!(state.zoom, 15); // max(current 15, live minimum 14)
    }

    #[test]
    fn test_marker_label_names_the_entity() {
        let map = Shared::<RecordingMap>::default();
        let mut vm = MonitoringViewModel::new(
            Box::new(RecordingChart::default()),
            Box::new(RecordingChart::default()),
            Box::new(map.clone()),
        );

        let mut record = healthy_record(0);
        record.latitude = Some(19.4);
        record.longitude = Some(-99.1);
        vm.refresh(&store_with(vec![record]));

        let state = map.0.lock().unwrap();
        let (_, _, label) = state.marker.as_ref().unwrap();
        assert_eq!(label, "Cow #cow-7 located");
    }

    #[test]
    fn test_empty_store_leaves_state_untouched() {
        let mut vm = vm();
        vm.refresh(&store_with(vec![healthy_record(0)]));
        let before = vm.indicators().clone();

        vm.refresh(&store_with(vec![]));
        assert_eq!(vm.indicators(), &before);
        assert_eq!(vm.series_len(), 1);
    }
}
