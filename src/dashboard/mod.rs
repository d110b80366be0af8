//! Dashboard Loader
//!
//! Fetches the three aggregate endpoints concurrently, once per mount, and
//! hands the results to the view-model in [`view`].
//!
//! Each fetch settles independently: a failed endpoint leaves only its own
//! cards on placeholders, the other two still render.

pub mod view;

pub use view::{
    bar_rows, format_count, peak_hour_success, BarColor, BarRow, DashboardView, SectionCard,
    StatCard, DATASET_CAPTION, MERCHANT_ROW_LIMIT, PEAK_HOURS, PLACEHOLDER,
};

use futures_util::future::join3;
use serde::Serialize;

use crate::api::{DashboardSource, FailureBreakdown, Summary, Trends};
use crate::error::ClientResult;

/// Whatever the three endpoints returned; `None` for a failed fetch
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardData {
    pub summary: Option<Summary>,
    pub failures: Option<FailureBreakdown>,
    pub trends: Option<Trends>,
}

impl DashboardData {
    /// Whether every endpoint failed
    pub fn is_empty(&self) -> bool {
        self.summary.is_none() && self.failures.is_none() && self.trends.is_none()
    }

    /// Names of the endpoints that failed
    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.summary.is_none() {
            missing.push("summary");
        }
        if self.failures.is_none() {
            missing.push("failures");
        }
        if self.trends.is_none() {
            missing.push("trends");
        }
        missing
    }
}

/// Dashboard lifecycle as seen by the renderer
#[derive(Debug, Clone, Default, PartialEq)]
pub enum LoadState {
    #[default]
    Loading,
    Ready(DashboardData),
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn data(&self) -> Option<&DashboardData> {
        match self {
            LoadState::Loading => None,
            LoadState::Ready(data) => Some(data),
        }
    }

    /// View-model for the current state (`None` while loading)
    pub fn view(&self) -> Option<DashboardView> {
        self.data().map(DashboardView::build)
    }
}

/// Fetch all three aggregates concurrently and wait for every one to settle
pub async fn load_all<D: DashboardSource + ?Sized>(source: &D) -> DashboardData {
    let (summary, failures, trends) =
        join3(source.summary(), source.failures(), source.trends()).await;

    DashboardData {
        summary: settle("summary", summary),
        failures: settle("failures", failures),
        trends: settle("trends", trends),
    }
}

fn settle<T>(endpoint: &str, result: ClientResult<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::error!(endpoint, "Failed to fetch dashboard data: {}", e);
            None
        }
    }
}

/// Ticket for one mount of the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// Tracks which mount owns the in-flight load
///
/// `begin` on mount, `cancel` on teardown; a load whose ticket is no longer
/// current is dropped by `finish`.
#[derive(Debug, Default)]
pub struct DashboardLoader {
    epoch: u64,
    state: LoadState,
}

impl DashboardLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset to loading and hand out a ticket for the new fetch
    pub fn begin(&mut self) -> LoadTicket {
        self.epoch = self.epoch.wrapping_add(1);
        self.state = LoadState::Loading;
        LoadTicket(self.epoch)
    }

    /// Store the result if the ticket is still current
    pub fn finish(&mut self, ticket: LoadTicket, data: DashboardData) -> bool {
        if ticket.0 != self.epoch {
            tracing::debug!("Discarding dashboard data for a torn-down mount");
            return false;
        }
        self.state = LoadState::Ready(data);
        true
    }

    /// Invalidate any outstanding ticket
    pub fn cancel(&mut self) {
        self.epoch = self.epoch.wrapping_add(1);
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    /// Fetch and store in one step
    pub async fn load<D: DashboardSource + ?Sized>(&mut self, source: &D) -> &LoadState {
        let ticket = self.begin();
        let data = load_all(source).await;
        self.finish(ticket, data);
        &self.state
    }
}
