//! Client-side query engine: the in-memory filter and the explicit search.
//!
//! `filter` is a pure function over the loaded list. `QueryState` holds the
//! list-page state (search text, region, explicit results, loading, error) and
//! exposes the same transitions whether the front end calls it synchronously
//! (CLI) or splits each call into begin/finish halves around a background
//! request (desktop app).

use crate::api::CountrySource;
use crate::error::FetchError;
use crate::models::{Country, Region};

/// How many filtered matches the passive view shows.
pub const DISPLAY_LIMIT: usize = 20;

pub const LOAD_FAILED: &str = "Failed to load countries data.";
pub const NO_RESULTS: &str = "No countries found with your search and filter.";
pub const SEARCH_FAILED: &str = "Country not found or API error.";

/// Keep records in `region` (exact) whose common name contains `search`
/// (case-insensitive). Empty text and `None` region let everything through.
/// Source order is preserved.
pub fn filter<'a>(all: &'a [Country], search: &str, region: Option<Region>) -> Vec<&'a Country> {
    let needle = search.to_lowercase();
    all.iter()
        .filter(|c| region.is_none_or(|r| r.matches(&c.region)))
        .filter(|c| needle.is_empty() || c.name.common.to_lowercase().contains(&needle))
        .collect()
}

/// Region-only post filter used by the explicit search.
pub fn retain_region(countries: Vec<Country>, region: Option<Region>) -> Vec<Country> {
    match region {
        Some(r) => countries.into_iter().filter(|c| r.matches(&c.region)).collect(),
        None => countries,
    }
}

/// What the list page should show right now.
#[derive(Debug, PartialEq)]
pub enum View<'a> {
    Loading,
    Error(&'a str),
    /// Matches to display; `explicit` is true for remote search results.
    Countries {
        items: Vec<&'a Country>,
        explicit: bool,
    },
    /// Nothing loaded and nothing matching.
    Empty,
}

#[derive(Debug, Clone, Default)]
pub struct QueryState {
    pub search_text: String,
    pub region: Option<Region>,
    all: Vec<Country>,
    results: Vec<Country>,
    loading: bool,
    error: Option<String>,
}

impl QueryState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all(&self) -> &[Country] {
        &self.all
    }

    pub fn results(&self) -> &[Country] {
        &self.results
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Autocomplete: up to `limit` loaded names containing the search text, in
    /// list order. Empty while the text is blank or already names a country.
    pub fn suggestions(&self, limit: usize) -> Vec<&str> {
        let needle = self.search_text.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        let names = self.all.iter().map(|c| c.common_name());
        if names.clone().any(|n| n.to_lowercase() == needle) {
            return Vec::new();
        }
        names
            .filter(|n| n.to_lowercase().contains(&needle))
            .take(limit)
            .collect()
    }

    /// Fetch the full list once. Failures are recorded, never returned.
    pub fn load_all<S: CountrySource + ?Sized>(&mut self, source: &S) {
        let outcome = source.fetch_all_countries();
        self.finish_load(outcome);
    }

    pub fn finish_load(&mut self, outcome: Result<Vec<Country>, FetchError>) {
        match outcome {
            Ok(list) => {
                log::debug!("loaded {} countries", list.len());
                self.all = list;
            }
            Err(e) => {
                log::warn!("loading countries failed: {}", e);
                self.all.clear();
                self.error = Some(LOAD_FAILED.to_string());
            }
        }
    }

    /// Start an explicit search. Returns the term to look up, or `None` when the
    /// search text is blank (a no-op that leaves state untouched).
    pub fn begin_search(&mut self) -> Option<String> {
        let term = self.search_text.trim();
        if term.is_empty() {
            return None;
        }
        let term = term.to_string();
        self.loading = true;
        self.error = None;
        self.results.clear();
        Some(term)
    }

    /// Apply the remote answer: region post-filter, empty means "no results".
    pub fn finish_search(&mut self, outcome: Result<Vec<Country>, FetchError>) {
        self.loading = false;
        match outcome {
            Ok(found) => {
                self.results = retain_region(found, self.region);
                if self.results.is_empty() {
                    self.error = Some(NO_RESULTS.to_string());
                }
            }
            Err(e) => {
                log::debug!("search failed: {}", e);
                self.error = Some(SEARCH_FAILED.to_string());
            }
        }
    }

    /// Explicit search round trip. Returns false when the text was blank.
    pub fn search<S: CountrySource + ?Sized>(&mut self, source: &S) -> bool {
        let Some(term) = self.begin_search() else {
            return false;
        };
        let outcome = source.fetch_country_by_name(&term);
        self.finish_search(outcome);
        true
    }

    /// "Clear Filters": text, region, explicit results and error.
    pub fn clear(&mut self) {
        self.search_text.clear();
        self.region = None;
        self.results.clear();
        self.error = None;
    }

    /// Abandon an in-flight search (its answer will be ignored by the caller).
    pub fn cancel_search(&mut self) {
        self.loading = false;
    }

    /// Full in-memory filter, uncapped.
    pub fn filtered(&self) -> Vec<&Country> {
        filter(&self.all, &self.search_text, self.region)
    }

    /// What to render: explicit results take precedence over the capped filter.
    pub fn view(&self) -> View<'_> {
        if self.loading {
            return View::Loading;
        }
        if let Some(e) = self.error.as_deref() {
            return View::Error(e);
        }
        if !self.results.is_empty() {
            return View::Countries {
                items: self.results.iter().collect(),
                explicit: true,
            };
        }
        let mut items = self.filtered();
        items.truncate(DISPLAY_LIMIT);
        if items.is_empty() {
            View::Empty
        } else {
            View::Countries {
                items,
                explicit: false,
            }
        }
    }

    /// "Showing N countries[ in Region]".
    pub fn headline(&self, shown: usize) -> String {
        match self.region {
            Some(r) => format!("Showing {} countries in {}", shown, r),
            None => format!("Showing {} countries", shown),
        }
    }
}
