// CSV export of the admin table

use crate::domain::telemetry::TelemetryRecord;
use chrono::Utc;
use thiserror::Error;

/// Wire-order column names, matching the endpoint's field names so an export
/// can be re-ingested or diffed against the database directly.
const COLUMNS: [&str; 13] = [
    "id",
    "id_vaca",
    "temp_ambiente",
    "temp_objeto",
    "ritmo_cardiaco",
    "oxigeno",
    "gyro_x",
    "gyro_y",
    "gyro_z",
    "latitud",
    "longitud",
    "satelites",
    "fecha",
];

#[derive(Debug, Error, PartialEq)]
pub enum ExportError {
    #[error("no records available to export")]
    NoData,
}

/// A rendered export: file name with a sortable timestamp plus the contents.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvExport {
    pub filename: String,
    pub contents: String,
}

/// Serialize records to CSV. Every field is quoted with embedded quotes
/// doubled; missing fields render as empty strings.
pub fn export<'a, I>(records: I) -> Result<CsvExport, ExportError>
where
    I: Iterator<Item = &'a TelemetryRecord>,
{
    let rows: Vec<String> = records.map(row).collect();
    if rows.is_empty() {
        return Err(ExportError::NoData);
    }

    let mut contents = COLUMNS.join(",");
    contents.push('\n');
    for r in rows {
        contents.push_str(&r);
        contents.push('\n');
    }

    let stamp = Utc::now().format("%Y-%m-%d-%H-%M-%S");
    Ok(CsvExport {
        filename: format!("farmwatch_export_{stamp}.csv"),
        contents,
    })
}

fn row(record: &TelemetryRecord) -> String {
    fn opt_f64(v: Option<f64>) -> String {
        v.map(|n| n.to_string()).unwrap_or_default()
    }

    let fields = [
        record.id.clone().unwrap_or_default(),
        record.entity_id.clone().unwrap_or_default(),
        opt_f64(record.ambient_temp),
        opt_f64(record.object_temp),
        opt_f64(record.heart_rate),
        opt_f64(record.oxygen),
        opt_f64(record.gyro_x),
        opt_f64(record.gyro_y),
        opt_f64(record.gyro_z),
        opt_f64(record.latitude),
        opt_f64(record.longitude),
        record
            .satellite_count
            .map(|s| s.to_string())
            .unwrap_or_default(),
        record.raw_timestamp.clone(),
    ];

    fields
        .iter()
        .map(|f| quote(f))
        .collect::<Vec<_>>()
        .join(",")
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TelemetryRecord {
        TelemetryRecord {
            id: Some("12".to_string()),
            entity_id: Some("cow-3".to_string()),
            ambient_temp: Some(24.5),
            object_temp: Some(38.2),
            heart_rate: Some(61.0),
            oxygen: None,
            gyro_x: Some(1.5),
            gyro_y: Some(-0.25),
            gyro_z: Some(0.0),
            latitude: Some(20.9),
            longitude: Some(-89.6),
            satellite_count: Some(7),
            timestamp: None,
            raw_timestamp: "2025-06-01 08:00:00".to_string(),
        }
    }

    /// Minimal parser for the documented quoting rule, used to round-trip.
    fn parse_line(line: &str) -> Vec<String> {
        let mut fields = Vec::new();
        let mut current = String::new();
        let mut chars = line.chars().peekable();
        assert_eq!(chars.next(), Some('"'));
        while let Some(c) = chars.next() {
            match c {
                '"' => match chars.next() {
                    Some('"') => current.push('"'),
                    Some(',') => {
                        fields.push(std::mem::take(&mut current));
                        assert_eq!(chars.next(), Some('"'));
                    }
                    None => fields.push(std::mem::take(&mut current)),
                    other => panic!("unexpected char after quote: {other:?}"),
                },
                c => current.push(c),
            }
        }
        fields
    }

    #[test]
    fn test_header_and_column_order() {
        let records = vec![sample()];
        let export = export(records.iter()).unwrap();
        let header = export.contents.lines().next().unwrap();
        assert_eq!(
            header,
            "id,id_vaca,temp_ambiente,temp_objeto,ritmo_cardiaco,oxigeno,\
             gyro_x,gyro_y,gyro_z,latitud,longitud,satelites,fecha"
        );
    }

    #[test]
    fn test_round_trip_preserves_values() {
        let records = vec![sample()];
        let export = export(records.iter()).unwrap();
        let row = export.contents.lines().nth(1).unwrap();
        let fields = parse_line(row);
        assert_eq!(
            fields,
            vec![
                "12", "cow-3", "24.5", "38.2", "61", "", "1.5", "-0.25", "0", "20.9", "-89.6",
                "7", "2025-06-01 08:00:00"
            ]
        );
    }

    #[test]
    fn test_embedded_quotes_are_doubled() {
        let mut record = sample();
        record.entity_id = Some("cow \"thirteen\"".to_string());
        let export = export(std::iter::once(&record)).unwrap();
        assert!(export.contents.contains("\"cow \"\"thirteen\"\"\""));

        let row = export.contents.lines().nth(1).unwrap();
        assert_eq!(parse_line(row)[1], "cow \"thirteen\"");
    }

    #[test]
    fn test_empty_input_is_an_error() {
        let err = export(std::iter::empty::<&TelemetryRecord>()).unwrap_err();
        assert_eq!(err, ExportError::NoData);
    }

    #[test]
    fn test_filename_is_sortable() {
        let records = vec![sample()];
        let export = export(records.iter()).unwrap();
        assert!(export.filename.starts_with("farmwatch_export_"));
        assert!(export.filename.ends_with(".csv"));
        // farmwatch_export_YYYY-MM-DD-HH-MM-SS.csv
        assert_eq!(export.filename.len(), "farmwatch_export_".len() + 19 + 4);
    }
}
