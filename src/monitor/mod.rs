//! The pure monitoring core
//!
//! One refresh tick flows straight through this module:
//! - validate the fetched rows, dropping and counting malformed ones
//! - classify every reading against the clinical thresholds
//! - reduce the window to the latest reading per patient
//! - carry the selected patient across ticks and build their trend series
//!
//! Everything here is synchronous and side-effect free; fetching and
//! serving live in `source` and `api`.

pub mod classify;
pub mod reduce;
pub mod select;
pub mod series;

pub use classify::{classify, AbnormalFlags, ClassifiedReading, VitalStatus};
pub use reduce::latest_per_patient;
pub use select::Selection;
pub use series::{patient_trends, PatientTrends, SeriesPoint};

use serde::{Deserialize, Serialize};

use crate::vitals::{RawVitalsRow, VitalsReading};

/// Everything the rendering collaborator needs for one frame.
///
/// Rebuilt from scratch on every tick; only the selection carries over.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    /// Latest classified reading per patient, sorted by patient name.
    pub table: Vec<ClassifiedReading>,
    /// Patient names in enumeration order (first encounter in the window);
    /// the selection fallback uses this order.
    pub patients: Vec<String>,
    pub selection: Selection,
    /// Trend series for the selected patient, absent when nothing is
    /// selected.
    pub trends: Option<PatientTrends>,
    /// Malformed rows dropped while validating this window.
    pub skipped_rows: usize,
}

/// Validate fetched rows, returning the good readings and the count of
/// rows dropped. A bad row never aborts the refresh.
pub fn validate_rows(rows: Vec<RawVitalsRow>) -> (Vec<VitalsReading>, usize) {
    let total = rows.len();
    let readings: Vec<VitalsReading> = rows
        .into_iter()
        .filter_map(|row| row.into_reading().ok())
        .collect();
    let skipped = total - readings.len();

    (readings, skipped)
}

/// Build the snapshot for a refresh tick, re-evaluating the previous
/// selection against the fresh patient set.
pub fn refresh_snapshot(
    window: &[VitalsReading],
    skipped: usize,
    previous: &Selection,
) -> DashboardSnapshot {
    let reduced = latest_per_patient(window);
    let patients = patient_names(&reduced);
    let selection = previous.on_refresh(&patients);

    assemble(reduced, patients, selection, window, skipped)
}

/// Build the snapshot after a user picked a patient. The pick is applied
/// verbatim; the window is untouched.
pub fn select_snapshot(
    window: &[VitalsReading],
    skipped: usize,
    selection: Selection,
) -> DashboardSnapshot {
    let reduced = latest_per_patient(window);
    let patients = patient_names(&reduced);

    assemble(reduced, patients, selection, window, skipped)
}

fn patient_names(reduced: &[ClassifiedReading]) -> Vec<String> {
    reduced
        .iter()
        .map(|classified| classified.reading.name.clone())
        .collect()
}

fn assemble(
    mut reduced: Vec<ClassifiedReading>,
    patients: Vec<String>,
    selection: Selection,
    window: &[VitalsReading],
    skipped: usize,
) -> DashboardSnapshot {
    reduced.sort_by(|a, b| a.reading.name.cmp(&b.reading.name));

    let trends = selection
        .selected()
        .map(|name| patient_trends(name, window));

    DashboardSnapshot {
        table: reduced,
        patients,
        selection,
        trends,
        skipped_rows: skipped,
    }
}
