//! Changelog page state
//!
//! [`ChangelogView`] owns the loaded entries, the active filters and the
//! derived visible list. Loads are asynchronous, so each one is tagged with a
//! [`LoadTicket`]; a result arriving for a stale ticket or after
//! [`ChangelogView::teardown`] is dropped.

use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use lumine_changelog::{ChangelogEntry, FilterCriteria, unique_dates};

use crate::aggregate::aggregate;
use crate::endpoints::Endpoints;
use crate::fetch::{FetchError, TextSource};

/// Load progress of the view
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "message", rename_all = "snake_case")]
pub enum LoadState {
    /// Nothing requested yet
    #[default]
    Idle,
    /// A load is in flight
    Loading,
    /// Entries are available
    Ready,
    /// The last load failed
    Failed(String),
}

/// Identifies one load request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// Entries, filters and visible results of the changelog page
#[derive(Debug, Default)]
pub struct ChangelogView {
    all: Vec<ChangelogEntry>,
    visible: Vec<ChangelogEntry>,
    dates: Vec<String>,
    criteria: FilterCriteria,
    state: LoadState,
    generation: u64,
    torn_down: bool,
}

impl ChangelogView {
    /// Empty idle view
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a load; any earlier ticket becomes stale
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        if !self.torn_down {
            self.state = LoadState::Loading;
        }
        LoadTicket(self.generation)
    }

    /// Apply the outcome of a load
    ///
    /// Returns `false` without touching the view when `ticket` is stale or the
    /// view was torn down. A failure clears the entries; no partial data is
    /// kept.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<ChangelogEntry>, FetchError>,
    ) -> bool {
        if self.torn_down {
            debug!("Dropping load result for torn down view");
            return false;
        }
        if ticket.0 != self.generation {
            debug!(ticket = ticket.0, current = self.generation, "Dropping stale load result");
            return false;
        }

        match result {
            Ok(entries) => {
                self.dates = unique_dates(&entries);
                self.all = entries;
                self.state = LoadState::Ready;
            }
            Err(e) => {
                warn!(error = %e, "Changelog load failed");
                self.all.clear();
                self.dates.clear();
                self.state = LoadState::Failed(e.to_string());
            }
        }
        self.refilter();
        true
    }

    /// Select a date label; an empty label clears the selection
    pub fn set_selected_date(&mut self, date: impl Into<String>) {
        self.criteria.selected_date = date.into();
        self.refilter();
    }

    /// Set the search query; an empty query matches everything
    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.criteria.search_query = query.into();
        self.refilter();
    }

    /// Replace both filters at once
    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
        self.refilter();
    }

    /// Drop both the date and the search filter
    pub fn clear_filters(&mut self) {
        self.criteria = FilterCriteria::default();
        self.refilter();
    }

    /// Mark the view as gone; later load results are ignored
    pub fn teardown(&mut self) {
        self.torn_down = true;
    }

    fn refilter(&mut self) {
        self.visible = self.criteria.apply(&self.all);
    }

    /// Every loaded entry, newest first
    #[must_use]
    pub fn entries(&self) -> &[ChangelogEntry] {
        &self.all
    }

    /// Entries passing the current filters
    #[must_use]
    pub fn visible(&self) -> &[ChangelogEntry] {
        &self.visible
    }

    /// Distinct date labels, descending
    #[must_use]
    pub fn dates(&self) -> &[String] {
        &self.dates
    }

    /// Active filters
    #[must_use]
    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Current load progress
    #[must_use]
    pub fn state(&self) -> &LoadState {
        &self.state
    }

    /// Whether [`ChangelogView::teardown`] was called
    #[must_use]
    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }
}

/// Load all branch changelogs into a shared view
///
/// The lock is held only to begin and to finish the load, never across the
/// network round trip. Returns whether the result was applied.
pub async fn load<S>(
    view: &Mutex<ChangelogView>,
    source: &S,
    endpoints: &Endpoints,
    branches: &[String],
) -> bool
where
    S: TextSource + ?Sized,
{
    let ticket = view.lock().await.begin_load();
    let result = aggregate(source, endpoints, branches).await;
    view.lock().await.finish_load(ticket, result)
}
