//! The refresh loop and shared dashboard state
//!
//! Periodic polling is modeled as a fixed-interval task running one
//! pipeline pass per tick. Ticks are awaited inline, so a slow fetch
//! delays the next run rather than overlapping it. The `Dashboard` cell
//! holds the last good snapshot; a failed fetch leaves it untouched and
//! the next tick is the retry.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use log::{debug, warn};
use tokio::time::{self, MissedTickBehavior};

use crate::error::DashboardError;
use crate::monitor::{self, DashboardSnapshot, PatientTrends, Selection};
use crate::source::VitalsSource;
use crate::vitals::VitalsReading;

#[derive(Debug, Default)]
struct DashboardState {
    // Validated window kept alongside the snapshot so a selection change
    // can rebuild trends without another fetch.
    window: Vec<VitalsReading>,
    snapshot: DashboardSnapshot,
}

/// Shared cell between the refresh task (the only writer of window data)
/// and the API handlers. Lock sections are short and synchronous; nothing
/// holds the lock across an await.
#[derive(Debug, Default)]
pub struct Dashboard {
    state: RwLock<DashboardState>,
}

impl Dashboard {
    pub fn new() -> Self {
        Dashboard::default()
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        self.state.read().unwrap().snapshot.clone()
    }

    /// Install a freshly validated window, carrying the selection across
    /// the tick.
    pub fn apply_window(&self, window: Vec<VitalsReading>, skipped: usize) {
        let mut state = self.state.write().unwrap();
        let previous = state.snapshot.selection.clone();
        let snapshot = monitor::refresh_snapshot(&window, skipped, &previous);
        state.snapshot = snapshot;
        state.window = window;
    }

    /// Apply the user action "pick patient" and return the rebuilt
    /// snapshot. The pick is unconditional; the next refresh reconciles it
    /// against the data.
    pub fn select_patient(&self, name: &str) -> DashboardSnapshot {
        let mut state = self.state.write().unwrap();
        let skipped = state.snapshot.skipped_rows;
        let snapshot = monitor::select_snapshot(&state.window, skipped, Selection::pick(name));
        state.snapshot = snapshot;
        state.snapshot.clone()
    }

    /// Trend series for any patient out of the current window, selected or
    /// not.
    pub fn patient_trends(&self, name: &str) -> PatientTrends {
        let state = self.state.read().unwrap();
        monitor::patient_trends(name, &state.window)
    }
}

/// Drives the fetch-classify-reduce pipeline on a fixed cadence.
pub struct RefreshEngine<S> {
    source: S,
    dashboard: Arc<Dashboard>,
    window_rows: u32,
    interval: Duration,
}

impl<S: VitalsSource> RefreshEngine<S> {
    pub fn new(source: S, dashboard: Arc<Dashboard>, window_rows: u32, interval: Duration) -> Self {
        RefreshEngine {
            source,
            dashboard,
            window_rows,
            interval,
        }
    }

    /// One pipeline pass: bounded fetch, validate, classify, reduce,
    /// install.
    pub async fn tick(&self) -> Result<(), DashboardError> {
        let rows = self.source.fetch_recent(self.window_rows).await?;
        let (window, skipped) = monitor::validate_rows(rows);
        if skipped > 0 {
            debug!("dropped {} malformed rows this tick", skipped);
        }
        self.dashboard.apply_window(window, skipped);

        Ok(())
    }

    /// Poll forever. Errors are terminal for their tick only: the previous
    /// snapshot stays up and the fixed cadence retries, with no backoff.
    pub async fn run(self) {
        let mut ticker = time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            if let Err(e) = self.tick().await {
                warn!("refresh failed, keeping previous snapshot: {}", e);
            }
        }
    }
}
