//! Vitals data model
//!
//! This module contains the core reading types shared by the whole
//! pipeline:
//! - the raw row shape fetched from the storage collaborator
//! - the validated, immutable `VitalsReading` value
//! - timestamp parsing for the text forms the writer produces

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One timestamped vitals record for one patient.
///
/// A reading is never mutated after construction; alert status and
/// per-field flags are derived on demand, never stored back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VitalsReading {
    pub patient_id: String,
    pub name: String,
    pub heart_rate: f64,        // beats per minute
    pub blood_pressure: String, // free-form, e.g. "120/80"
    pub oxygen_level: f64,      // SpO2 as percentage
    pub temperature: f64,       // degrees Celsius
    pub timestamp: DateTime<Utc>,
}

/// A row exactly as fetched, before validation.
///
/// Every field is optional: the writer process owns the table and this
/// side makes no assumptions about its data quality. A NULL column or a
/// value that failed to decode both surface as `None` here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawVitalsRow {
    pub patient_id: Option<String>,
    pub name: Option<String>,
    pub heart_rate: Option<f64>,
    pub blood_pressure: Option<String>,
    pub oxygen_level: Option<f64>,
    pub temperature: Option<f64>,
    pub timestamp: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum VitalsError {
    MissingField(&'static str),
    EmptyPatientId,
    BadTimestamp(String),
}

impl fmt::Display for VitalsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VitalsError::MissingField(field) => write!(f, "Missing or undecodable field: {}", field),
            VitalsError::EmptyPatientId => write!(f, "Patient id is empty"),
            VitalsError::BadTimestamp(raw) => write!(f, "Unparsable timestamp: {}", raw),
        }
    }
}

impl std::error::Error for VitalsError {}

impl RawVitalsRow {
    /// Validate a fetched row into a reading.
    ///
    /// Numeric fields and the timestamp must be present; a blood pressure
    /// string is carried as-is and an absent one becomes empty, since it
    /// is displayed but never evaluated.
    pub fn into_reading(self) -> Result<VitalsReading, VitalsError> {
        let patient_id = self
            .patient_id
            .ok_or(VitalsError::MissingField("patient_id"))?;
        if patient_id.is_empty() {
            return Err(VitalsError::EmptyPatientId);
        }

        let name = self.name.ok_or(VitalsError::MissingField("name"))?;
        let heart_rate = self
            .heart_rate
            .ok_or(VitalsError::MissingField("heart_rate"))?;
        let oxygen_level = self
            .oxygen_level
            .ok_or(VitalsError::MissingField("oxygen_level"))?;
        let temperature = self
            .temperature
            .ok_or(VitalsError::MissingField("temperature"))?;
        let raw_timestamp = self.timestamp.ok_or(VitalsError::MissingField("timestamp"))?;
        let timestamp = parse_timestamp(&raw_timestamp)?;

        Ok(VitalsReading {
            patient_id,
            name,
            heart_rate,
            blood_pressure: self.blood_pressure.unwrap_or_default(),
            oxygen_level,
            temperature,
            timestamp,
        })
    }
}

/// Parse the timestamp text the writer stores.
///
/// Accepts RFC 3339 as well as the bare `YYYY-MM-DD HH:MM:SS[.fff]` form
/// SQLite writers commonly use; the latter is taken as UTC.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, VitalsError> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f")
        .map(|naive| Utc.from_utc_datetime(&naive))
        .map_err(|_| VitalsError::BadTimestamp(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn full_row() -> RawVitalsRow {
        RawVitalsRow {
            patient_id: Some("p-001".to_string()),
            name: Some("Alice".to_string()),
            heart_rate: Some(72.0),
            blood_pressure: Some("120/80".to_string()),
            oxygen_level: Some(98.0),
            temperature: Some(37.0),
            timestamp: Some("2024-03-01 08:30:00".to_string()),
        }
    }

    #[test]
    fn test_valid_row_converts() {
        let reading = full_row().into_reading().unwrap();

        assert_eq!(reading.patient_id, "p-001");
        assert_eq!(reading.name, "Alice");
        assert_eq!(reading.heart_rate, 72.0);
        assert_eq!(reading.blood_pressure, "120/80");
        assert_eq!(reading.timestamp.to_rfc3339(), "2024-03-01T08:30:00+00:00");
    }

    #[test]
    fn test_missing_numeric_field_is_rejected() {
        let mut row = full_row();
        row.heart_rate = None;

        assert_eq!(
            row.into_reading().unwrap_err(),
            VitalsError::MissingField("heart_rate")
        );
    }

    #[test]
    fn test_empty_patient_id_is_rejected() {
        let mut row = full_row();
        row.patient_id = Some(String::new());

        assert_eq!(row.into_reading().unwrap_err(), VitalsError::EmptyPatientId);
    }

    #[test]
    fn test_missing_blood_pressure_becomes_empty_string() {
        let mut row = full_row();
        row.blood_pressure = None;

        assert_eq!(row.into_reading().unwrap().blood_pressure, "");
    }

    #[test]
    fn test_parse_timestamp_accepts_rfc3339() {
        let parsed = parse_timestamp("2024-03-01T08:30:00+01:00").unwrap();
        assert_eq!(parsed.to_rfc3339(), "2024-03-01T07:30:00+00:00");
    }

    #[test]
    fn test_parse_timestamp_accepts_sqlite_text_with_fraction() {
        let parsed = parse_timestamp("2024-03-01 08:30:00.250").unwrap();
        assert_eq!(parsed.timestamp_millis() % 1000, 250);
    }

    #[test]
    fn test_parse_timestamp_rejects_garbage() {
        assert_eq!(
            parse_timestamp("yesterday").unwrap_err(),
            VitalsError::BadTimestamp("yesterday".to_string())
        );
    }
}
