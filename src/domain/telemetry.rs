// Telemetry domain model

use chrono::{DateTime, Utc};

/// One telemetry sample for one animal at one point in time.
///
/// Every measured field is optional: the collars report over flaky links and
/// the endpoint passes unparseable values through as-is, so a missing or
/// garbled reading normalizes to `None` (never NaN, never a zero substitute —
/// zero is a valid reading).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TelemetryRecord {
    pub id: Option<String>,
    pub entity_id: Option<String>,
    pub ambient_temp: Option<f64>,
    pub object_temp: Option<f64>,
    pub heart_rate: Option<f64>,
    pub oxygen: Option<f64>,
    pub gyro_x: Option<f64>,
    pub gyro_y: Option<f64>,
    pub gyro_z: Option<f64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub satellite_count: Option<i64>,
    /// Parsed timestamp; `None` when the wire string was absent or unparseable.
    pub timestamp: Option<DateTime<Utc>>,
    /// Original wire string, kept for display fallback and free-text search.
    pub raw_timestamp: String,
}

impl TelemetryRecord {
    /// Marker position, available only when both coordinates were reported.
    pub fn position(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            _ => None,
        }
    }

    /// Human-readable timestamp: parsed value when available, otherwise the
    /// raw wire string, otherwise a placeholder.
    pub fn display_timestamp(&self) -> String {
        match self.timestamp {
            Some(ts) => ts.format("%Y-%m-%d %H:%M:%S").to_string(),
            None if !self.raw_timestamp.is_empty() => self.raw_timestamp.clone(),
            None => "--".to_string(),
        }
    }

    /// Entity id for labels, with a fallback for untagged collars.
    pub fn entity_label(&self) -> &str {
        self.entity_id.as_deref().unwrap_or("unknown")
    }
}

/// Format an optional metric with a unit suffix, `--` when unmeasured.
pub fn format_metric(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(v) => format!("{v} {unit}"),
        None => format!("-- {unit}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_position_requires_both_coordinates() {
        let mut record = TelemetryRecord {
            latitude: Some(19.4326),
            longitude: None,
            ..Default::default()
        };
        assert_eq!(record.position(), None);

        record.longitude = Some(-99.1332);
        assert_eq!(record.position(), Some((19.4326, -99.1332)));
    }

    #[test]
    fn test_display_timestamp_falls_back_to_raw() {
        let parsed = TelemetryRecord {
            timestamp: Some(Utc.with_ymd_and_hms(2025, 3, 14, 9, 26, 53).unwrap()),
            raw_timestamp: "ignored".to_string(),
            ..Default::default()
        };
        assert_eq!(parsed.display_timestamp(), "2025-03-14 09:26:53");

        let unparsed = TelemetryRecord {
            raw_timestamp: "not-a-date".to_string(),
            ..Default::default()
        };
        assert_eq!(unparsed.display_timestamp(), "not-a-date");

        assert_eq!(TelemetryRecord::default().display_timestamp(), "--");
    }

    #[test]
    fn test_format_metric_placeholder() {
        assert_eq!(format_metric(Some(38.5), "°C"), "38.5 °C");
        assert_eq!(format_metric(None, "BPM"), "-- BPM");
    }
}
