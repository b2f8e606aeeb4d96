//! Vitalboard: a read-only patient vitals monitoring core
//!
//! Vitalboard polls an externally-owned vitals table, classifies every
//! reading against fixed clinical thresholds, reduces the window down to
//! the latest reading per patient, and hands the result to a rendering
//! front end as a JSON snapshot. There is no write path: a separate
//! vitals-writer process owns the table.

pub mod api;
pub mod config;
pub mod error;
pub mod monitor;
pub mod refresh;
pub mod source;
pub mod vitals;

pub use error::DashboardError;
pub use monitor::{
    classify, latest_per_patient, ClassifiedReading, DashboardSnapshot, Selection, VitalStatus,
};
pub use refresh::{Dashboard, RefreshEngine};
pub use source::{SqliteSource, VitalsSource};
pub use vitals::VitalsReading;
