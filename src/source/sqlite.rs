use sqlx::sqlite::{SqlitePool, SqliteRow};
use sqlx::Row;

use crate::source::{SourceError, VitalsSource};
use crate::vitals::RawVitalsRow;

// The one query this system runs.
const RECENT_VITALS_SQL: &str = "SELECT patient_id, name, heart_rate, blood_pressure, \
     oxygen_level, temperature, timestamp \
     FROM patient_vitals ORDER BY timestamp DESC LIMIT ?";

/// Read-only view over the writer-owned `patient_vitals` table.
pub struct SqliteSource {
    pool: SqlitePool,
}

impl SqliteSource {
    pub async fn connect(url: &str) -> Result<Self, SourceError> {
        let pool = SqlitePool::connect(url)
            .await
            .map_err(|e| SourceError::Connection(e.to_string()))?;

        Ok(SqliteSource { pool })
    }
}

impl VitalsSource for SqliteSource {
    async fn fetch_recent(&self, limit: u32) -> Result<Vec<RawVitalsRow>, SourceError> {
        let rows = sqlx::query(RECENT_VITALS_SQL)
            .bind(limit as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| SourceError::Query(e.to_string()))?;

        Ok(rows.iter().map(raw_row).collect())
    }
}

// SQLite columns are dynamically typed, so a decode failure (text where a
// number belongs) is folded into `None` and handled by row validation
// instead of failing the whole fetch.
fn raw_row(row: &SqliteRow) -> RawVitalsRow {
    RawVitalsRow {
        patient_id: row.try_get("patient_id").unwrap_or(None),
        name: row.try_get("name").unwrap_or(None),
        heart_rate: row.try_get("heart_rate").unwrap_or(None),
        blood_pressure: row.try_get("blood_pressure").unwrap_or(None),
        oxygen_level: row.try_get("oxygen_level").unwrap_or(None),
        temperature: row.try_get("temperature").unwrap_or(None),
        timestamp: row.try_get("timestamp").unwrap_or(None),
    }
}
