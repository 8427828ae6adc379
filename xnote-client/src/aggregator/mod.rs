//! Daily Aggregator
//!
//! Fetches daily summaries for a date range and turns them into the rows
//! of the calendar grid:
//!
//! - **merge**: collapse meals that render identically except for the name
//! - **rows**: fixed meal slots, joined drinks, event columns
//! - **search**: client-side free-text filter over the built rows
//!
//! Date changes re-fetch, search-only changes filter the cached rows.
//! Each fetch takes a generation number; a response that arrives after a
//! newer fetch started is dropped.

mod merge;
mod rows;
mod search;

pub use merge::{display_text, merge_meals};
pub use rows::{DayRow, EVENT_SLOTS, EventCell, MEAL_SLOTS, MealCell, MealSlots, build_rows};
pub use search::{apply_search, matches_search};

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;

use shared::date::{days_before, today_local};

use crate::api::{Resource, XnoteApi};
use crate::presenter::{Confirmation, LoadingGuard, Presenter, ToastKind};
use crate::refresh::RefreshTarget;
use crate::ClientResult;

/// Current filter state of the grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filters {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub search_text: String,
}

impl Filters {
    /// `days` days ending `today`, no search
    pub fn default_range(today: NaiveDate, days: u64) -> Self {
        Self {
            start_date: days_before(today, days),
            end_date: today,
            search_text: String::new(),
        }
    }
}

/// Partial filter change; `None` keeps the current value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterUpdate {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub search_text: Option<String>,
}

impl FilterUpdate {
    pub fn dates(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date: Some(start_date),
            end_date: Some(end_date),
            search_text: None,
        }
    }

    pub fn search(text: impl Into<String>) -> Self {
        Self {
            search_text: Some(text.into()),
            ..Default::default()
        }
    }
}

struct AggregatorState {
    filters: Filters,
    /// Built rows of the last successful fetch, unfiltered
    all_rows: Vec<DayRow>,
    /// `all_rows` narrowed by the search text
    rows: Vec<DayRow>,
    last_error: Option<String>,
}

/// Daily Aggregator
pub struct DailyAggregator {
    api: XnoteApi,
    presenter: Arc<dyn Presenter>,
    default_range_days: u64,
    state: RwLock<AggregatorState>,
    generation: AtomicU64,
}

impl DailyAggregator {
    /// Start with the default range ending today (local time)
    pub fn new(api: XnoteApi, presenter: Arc<dyn Presenter>, default_range_days: u64) -> Self {
        let filters = Filters::default_range(today_local(), default_range_days);
        Self::with_filters(api, presenter, default_range_days, filters)
    }

    pub fn with_filters(
        api: XnoteApi,
        presenter: Arc<dyn Presenter>,
        default_range_days: u64,
        filters: Filters,
    ) -> Self {
        Self {
            api,
            presenter,
            default_range_days,
            state: RwLock::new(AggregatorState {
                filters,
                all_rows: Vec::new(),
                rows: Vec::new(),
                last_error: None,
            }),
            generation: AtomicU64::new(0),
        }
    }

    /// Fetch the current range
    pub async fn load(&self) -> ClientResult<()> {
        let filters = self.filters().await;
        self.fetch(filters.start_date, filters.end_date).await
    }

    /// Apply a filter change.
    ///
    /// A changed date bound re-fetches; a search-only change re-filters the
    /// cached rows without a request. New dates take effect in `filters()`
    /// only once their fetch succeeds, so a failed range is retried by
    /// requesting it again.
    pub async fn set_filters(&self, update: FilterUpdate) -> ClientResult<()> {
        let range = {
            let mut state = self.state.write().await;
            if let Some(text) = update.search_text {
                state.rows = apply_search(&state.all_rows, &text);
                state.filters.search_text = text;
            }
            let start = update.start_date.unwrap_or(state.filters.start_date);
            let end = update.end_date.unwrap_or(state.filters.end_date);
            let dates_changed = start != state.filters.start_date || end != state.filters.end_date;
            dates_changed.then_some((start, end))
        };

        match range {
            Some((start, end)) => self.fetch(start, end).await,
            None => Ok(()),
        }
    }

    /// Re-fetch the current range
    pub async fn refresh(&self) -> ClientResult<()> {
        self.load().await
    }

    /// Reset the range to the default window ending today and re-fetch
    pub async fn refresh_with_default_dates(&self) -> ClientResult<()> {
        let defaults = Filters::default_range(today_local(), self.default_range_days);
        self.fetch(defaults.start_date, defaults.end_date).await
    }

    /// Rows as currently displayed (merged and filtered)
    pub async fn rows(&self) -> Vec<DayRow> {
        self.state.read().await.rows.clone()
    }

    pub async fn filters(&self) -> Filters {
        self.state.read().await.filters.clone()
    }

    /// Message of the last failed fetch, cleared by a successful one
    pub async fn last_error(&self) -> Option<String> {
        self.state.read().await.last_error.clone()
    }

    /// Delete every meal behind a cell after confirmation.
    ///
    /// Returns `false` when the user declined.
    pub async fn delete_meal_cell(&self, cell: &MealCell) -> ClientResult<bool> {
        if cell.ids.is_empty() {
            return Ok(false);
        }
        let count = cell.ids.len();
        let confirmation = Confirmation::CascadeDelete {
            entity: Resource::Meals.noun(count).to_string(),
            count,
            names: vec![cell.text.clone()],
            cascade: None,
        };
        if !self.presenter.confirm(&confirmation) {
            return Ok(false);
        }

        let result = {
            let _loading = LoadingGuard::new(self.presenter.clone());
            self.api.delete_meals_batch(&cell.ids).await
        };
        let outcome = match result {
            Ok(deleted) => {
                self.presenter.toast(
                    &format!("{} {} deleted successfully", deleted, Resource::Meals.noun(deleted)),
                    ToastKind::Success,
                );
                Ok(true)
            }
            Err(e) => {
                tracing::error!("Failed to delete meals {:?}: {}", cell.ids, e);
                self.presenter.error("delete meals", &e.to_string());
                Err(e)
            }
        };

        // the per-id fallback may have deleted a prefix before failing
        self.refresh_quietly().await;
        outcome
    }

    /// Re-fetch after a mutation; the fetch reports its own failure
    async fn refresh_quietly(&self) {
        if let Err(e) = self.refresh().await {
            tracing::debug!("Refresh after meal delete failed: {}", e);
        }
    }

    async fn fetch(&self, start: NaiveDate, end: NaiveDate) -> ClientResult<()> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let result = {
            let _loading = LoadingGuard::new(self.presenter.clone());
            self.api.daily_summary(start, end).await
        };

        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::warn!(%start, %end, "Discarding superseded daily summary response");
            return Ok(());
        }

        match result {
            Ok(summaries) => {
                let all_rows = build_rows(&summaries);
                let mut state = self.state.write().await;
                state.filters.start_date = start;
                state.filters.end_date = end;
                state.rows = apply_search(&all_rows, &state.filters.search_text);
                state.all_rows = all_rows;
                state.last_error = None;
                tracing::debug!(days = state.all_rows.len(), visible = state.rows.len(), "Daily summary loaded");
                Ok(())
            }
            Err(e) => {
                tracing::error!(%start, %end, "Failed to load daily summary: {}", e);
                self.state.write().await.last_error = Some(e.to_string());
                self.presenter.error("load daily summary", &e.to_string());
                Err(e)
            }
        }
    }
}

#[async_trait]
impl RefreshTarget for DailyAggregator {
    fn name(&self) -> &str {
        "daily summary"
    }

    async fn refresh(&self) -> ClientResult<()> {
        DailyAggregator::refresh(self).await
    }
}
