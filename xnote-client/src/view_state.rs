//! URL view state and history
//!
//! `startDate`, `endDate` and `searchText` query parameters persist the
//! grid filters. Back/forward hand the earlier state back to the
//! aggregator without a reload.

use chrono::NaiveDate;

use shared::date::{format_date, parse_date};

use crate::aggregator::{FilterUpdate, Filters};

/// Persisted filter state; `None` dates mean "use the default range"
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub search_text: String,
}

impl ViewState {
    pub fn from_filters(filters: &Filters) -> Self {
        Self {
            start_date: Some(filters.start_date),
            end_date: Some(filters.end_date),
            search_text: filters.search_text.clone(),
        }
    }

    /// Parse a query string (with or without the leading `?`).
    /// Unknown keys and invalid dates are ignored.
    pub fn from_query(query: &str) -> Self {
        let mut state = Self::default();
        for pair in query.trim_start_matches('?').split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let value = decode(value);
            match key {
                "startDate" => state.start_date = parse_date(&value),
                "endDate" => state.end_date = parse_date(&value),
                "searchText" => state.search_text = value,
                _ => {}
            }
        }
        state
    }

    /// Query string without the leading `?`. Blank search is omitted.
    pub fn to_query(&self) -> String {
        let mut params = Vec::new();
        if let Some(start) = self.start_date {
            params.push(format!("startDate={}", format_date(start)));
        }
        if let Some(end) = self.end_date {
            params.push(format!("endDate={}", format_date(end)));
        }
        let search = self.search_text.trim();
        if !search.is_empty() {
            params.push(format!("searchText={}", urlencoding::encode(search)));
        }
        params.join("&")
    }

    /// Full filter update, missing dates replaced by the default range
    pub fn resolved(&self, today: NaiveDate, default_range_days: u64) -> FilterUpdate {
        let defaults = Filters::default_range(today, default_range_days);
        FilterUpdate {
            start_date: Some(self.start_date.unwrap_or(defaults.start_date)),
            end_date: Some(self.end_date.unwrap_or(defaults.end_date)),
            search_text: Some(self.search_text.clone()),
        }
    }
}

/// Form-encoded value: `+` is a space
fn decode(value: &str) -> String {
    let value = value.replace('+', " ");
    match urlencoding::decode(&value) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => value,
    }
}

/// Browser-style history of view states
#[derive(Debug, Clone, Default)]
pub struct ViewHistory {
    entries: Vec<ViewState>,
    cursor: usize,
}

impl ViewHistory {
    pub fn new(initial: ViewState) -> Self {
        Self { entries: vec![initial], cursor: 0 }
    }

    pub fn current(&self) -> Option<&ViewState> {
        self.entries.get(self.cursor)
    }

    /// New entry after the current one; forward entries are dropped
    pub fn push(&mut self, state: ViewState) {
        if self.entries.is_empty() {
            self.entries.push(state);
            self.cursor = 0;
            return;
        }
        self.entries.truncate(self.cursor + 1);
        self.entries.push(state);
        self.cursor = self.entries.len() - 1;
    }

    /// Overwrite the current entry (initial load)
    pub fn replace(&mut self, state: ViewState) {
        match self.entries.get_mut(self.cursor) {
            Some(entry) => *entry = state,
            None => self.push(state),
        }
    }

    pub fn back(&mut self) -> Option<&ViewState> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        self.current()
    }

    pub fn forward(&mut self) -> Option<&ViewState> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        self.current()
    }
}
