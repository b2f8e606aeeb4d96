use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::vitals::VitalsReading;

/// A single charted point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

/// One patient's unreduced history from the fetched window, split into
/// three independent numeric series for charting. Points are sorted
/// ascending by timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientTrends {
    pub patient: String,
    pub heart_rate: Vec<SeriesPoint>,
    pub oxygen_level: Vec<SeriesPoint>,
    pub temperature: Vec<SeriesPoint>,
}

/// Build the trend series for one patient from the full window.
///
/// A patient with no rows in the window yields empty series rather than an
/// error; the window is shared across all patients, so a quiet patient can
/// be crowded out by an active one.
pub fn patient_trends(name: &str, window: &[VitalsReading]) -> PatientTrends {
    let mut history: Vec<&VitalsReading> = window
        .iter()
        .filter(|reading| reading.name == name)
        .collect();
    history.sort_by_key(|reading| reading.timestamp);

    PatientTrends {
        patient: name.to_string(),
        heart_rate: points(&history, |reading| reading.heart_rate),
        oxygen_level: points(&history, |reading| reading.oxygen_level),
        temperature: points(&history, |reading| reading.temperature),
    }
}

fn points(history: &[&VitalsReading], value: impl Fn(&VitalsReading) -> f64) -> Vec<SeriesPoint> {
    history
        .iter()
        .map(|reading| SeriesPoint {
            timestamp: reading.timestamp,
            value: value(reading),
        })
        .collect()
}
