// Wire-row normalization
//
// The endpoint relays whatever landed in the database, so field types are
// untrusted: numbers may arrive as strings, dates in several shapes, and any
// field may be null or missing. Coercion is permissive and silent; a value
// that cannot be read becomes `None`, never an error.

use crate::domain::telemetry::TelemetryRecord;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

/// One raw row as returned by `GET /api/datos`.
#[derive(Debug, Deserialize, Default)]
pub struct RawTelemetryRow {
    #[serde(default)]
    pub id: Value,
    #[serde(default)]
    pub id_vaca: Value,
    #[serde(default)]
    pub temp_ambiente: Value,
    #[serde(default)]
    pub temp_objeto: Value,
    #[serde(default)]
    pub ritmo_cardiaco: Value,
    #[serde(default)]
    pub oxigeno: Value,
    #[serde(default)]
    pub gyro_x: Value,
    #[serde(default)]
    pub gyro_y: Value,
    #[serde(default)]
    pub gyro_z: Value,
    #[serde(default)]
    pub latitud: Value,
    #[serde(default)]
    pub longitud: Value,
    #[serde(default)]
    pub satelites: Value,
    #[serde(default)]
    pub fecha: Value,
}

impl RawTelemetryRow {
    pub fn normalize(self) -> TelemetryRecord {
        let raw_timestamp = coerce_string(&self.fecha).unwrap_or_default();
        let timestamp = parse_timestamp(&raw_timestamp);

        TelemetryRecord {
            id: coerce_string(&self.id),
            entity_id: coerce_string(&self.id_vaca),
            ambient_temp: coerce_f64(&self.temp_ambiente),
            object_temp: coerce_f64(&self.temp_objeto),
            heart_rate: coerce_f64(&self.ritmo_cardiaco),
            oxygen: coerce_f64(&self.oxigeno),
            gyro_x: coerce_f64(&self.gyro_x),
            gyro_y: coerce_f64(&self.gyro_y),
            gyro_z: coerce_f64(&self.gyro_z),
            latitude: coerce_f64(&self.latitud),
            longitude: coerce_f64(&self.longitud),
            satellite_count: coerce_f64(&self.satelites).map(|s| s as i64),
            timestamp,
            raw_timestamp,
        }
    }
}

/// Permissive float coercion: JSON number or numeric string. Unparseable and
/// non-finite inputs read as `None`; NaN never leaves this function.
fn coerce_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|f| f.is_finite()),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            trimmed.parse::<f64>().ok().filter(|f| f.is_finite())
        }
        _ => None,
    }
}

fn coerce_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Parse the wire timestamp: RFC 3339, then RFC 2822 (Flask's jsonify emits
/// HTTP-dates for MySQL datetimes), then the plain `YYYY-MM-DD HH:MM:SS` form
/// with the space swapped for `T` before retrying. Naive times read as UTC.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    let retried = raw.replacen(' ', "T", 1);
    NaiveDateTime::parse_from_str(&retried, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}
