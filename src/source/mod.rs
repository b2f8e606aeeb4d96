//! Input side of the pipeline
//!
//! The vitals table is owned by a separate writer process; this side only
//! ever runs one bounded read per refresh tick. `VitalsSource` is the seam
//! the refresh loop polls through, so tests can swap the database for a
//! canned window.

pub mod sqlite;

pub use sqlite::SqliteSource;

use std::fmt;

use crate::vitals::RawVitalsRow;

/// Default bound on rows fetched per tick, shared across all patients.
/// A very active patient set can crowd a quiet patient's history out of
/// the window.
pub const DEFAULT_WINDOW_ROWS: u32 = 200;

#[derive(Debug)]
pub enum SourceError {
    Connection(String),
    Query(String),
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::Connection(msg) => write!(f, "Source connection error: {}", msg),
            SourceError::Query(msg) => write!(f, "Source query error: {}", msg),
        }
    }
}

impl std::error::Error for SourceError {}

/// A bounded, most-recent-first read of the vitals table.
///
/// Implementations should return at most `limit` rows. Row order is a
/// courtesy, not a contract: the reducer compares timestamps itself.
#[allow(async_fn_in_trait)]
pub trait VitalsSource {
    async fn fetch_recent(&self, limit: u32) -> Result<Vec<RawVitalsRow>, SourceError>;
}
