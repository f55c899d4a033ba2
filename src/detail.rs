//! Detail lookup and neighbor resolution for a single country.
//!
//! The primary record and its neighbors are fetched independently: a neighbor
//! failure is logged and never fails the detail view.

use crate::api::CountrySource;
use crate::error::{FetchError, Result};
use crate::favorites::{Favorites, FavoritesStore};
use crate::models::{Country, Neighbor};

/// Exact-name lookup. Zero records, or upstream's 404 for an unknown name, is
/// `FetchError::NotFound`.
pub fn lookup<S: CountrySource + ?Sized>(source: &S, name: &str) -> Result<Country> {
    let not_found = || FetchError::NotFound {
        query: name.to_string(),
    };
    let found = match source.fetch_country_by_full_name(name) {
        Ok(found) => found,
        Err(e) if e.status() == Some(404) => return Err(not_found()),
        Err(e) => return Err(e),
    };
    found.into_iter().next().ok_or_else(not_found)
}

/// Neighbor tab content.
#[derive(Debug, Clone, PartialEq)]
pub enum Neighbors {
    /// Record has no border codes; nothing was fetched.
    NoLandBorders,
    Loading,
    Loaded(Vec<Neighbor>),
    /// The batched lookup failed; the tab stays empty.
    Unavailable,
}

/// What the neighbor tab starts with before any fetch completes.
pub fn initial_neighbors(country: &Country) -> Neighbors {
    if country.has_land_borders() {
        Neighbors::Loading
    } else {
        Neighbors::NoLandBorders
    }
}

/// Map a neighbor fetch outcome to tab content, logging failures.
pub fn neighbors_from(outcome: Result<Vec<Country>>) -> Neighbors {
    match outcome {
        Ok(list) => Neighbors::Loaded(list.iter().map(Neighbor::from).collect()),
        Err(e) => {
            log::warn!("error loading neighboring countries: {}", e);
            Neighbors::Unavailable
        }
    }
}

/// One batched lookup for all border codes; none at all without borders.
pub fn resolve_neighbors<S: CountrySource + ?Sized>(source: &S, country: &Country) -> Neighbors {
    if !country.has_land_borders() {
        return Neighbors::NoLandBorders;
    }
    neighbors_from(source.fetch_countries_by_codes(country.border_codes()))
}

/// Tabs of the detail page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Details,
    Neighbors,
}

/// Detail page state. The neighbor part has its own loading/error tracking.
#[derive(Debug, Clone)]
pub struct DetailState {
    pub name: String,
    country: Option<Country>,
    loading: bool,
    error: Option<String>,
    is_favorite: bool,
    pub tab: Tab,
    pub neighbors: Neighbors,
}

impl DetailState {
    /// Fresh state for `name`, marked as loading.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            country: None,
            loading: true,
            error: None,
            is_favorite: false,
            tab: Tab::Details,
            neighbors: Neighbors::Loading,
        }
    }

    pub fn country(&self) -> Option<&Country> {
        self.country.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_favorite(&self) -> bool {
        self.is_favorite
    }

    /// Apply the primary lookup. Returns the border codes to fetch next, if any.
    pub fn finish_lookup<B: FavoritesStore>(
        &mut self,
        outcome: Result<Country>,
        favorites: &Favorites<B>,
    ) -> Option<Vec<String>> {
        self.loading = false;
        match outcome {
            Ok(country) => {
                self.is_favorite = favorites.contains(&country.cca3).unwrap_or_else(|e| {
                    log::warn!("reading favorites failed: {:#}", e);
                    false
                });
                self.neighbors = initial_neighbors(&country);
                let codes = country
                    .has_land_borders()
                    .then(|| country.border_codes().to_vec());
                self.country = Some(country);
                self.error = None;
                codes
            }
            Err(e) => {
                if e.is_not_found() {
                    log::debug!("detail lookup: {}", e);
                } else {
                    log::warn!("detail lookup failed: {}", e);
                }
                self.country = None;
                self.error = Some(format!("Failed to load country data: {}", e));
                None
            }
        }
    }

    pub fn finish_neighbors(&mut self, outcome: Result<Vec<Country>>) {
        self.neighbors = neighbors_from(outcome);
    }

    /// Synchronous load: primary lookup, favorite flag, then neighbors.
    pub fn load<S, B>(source: &S, favorites: &Favorites<B>, name: &str) -> Self
    where
        S: CountrySource + ?Sized,
        B: FavoritesStore,
    {
        let mut state = Self::new(name);
        if let Some(codes) = state.finish_lookup(lookup(source, name), favorites) {
            state.finish_neighbors(source.fetch_countries_by_codes(&codes));
        }
        state
    }

    /// Flip the current country in the favorites set. No-op without a country.
    pub fn toggle_favorite<B: FavoritesStore>(
        &mut self,
        favorites: &mut Favorites<B>,
    ) -> anyhow::Result<bool> {
        let Some(country) = self.country.as_ref() else {
            return Ok(self.is_favorite);
        };
        let set = favorites.toggle(&country.cca3)?;
        self.is_favorite = set.contains(&country.cca3);
        Ok(self.is_favorite)
    }
}
