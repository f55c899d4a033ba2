//! country_explorer
//!
//! A small Rust library for browsing the countries of the world through the
//! public REST Countries API. Pairs with the `cex` CLI and the `cex-gui`
//! desktop app.
//!
//! ### Features
//! - Fetch all countries, search by name (partial or exact), batch by alpha-3 codes
//! - Filter the loaded list by name substring and region, in memory
//! - Detail lookup with neighboring countries
//! - Favorite countries persisted as a JSON set
//! - Export lists as CSV or JSON
//!
//! ### Example
//! ```no_run
//! use country_explorer::{Client, QueryState, Region};
//!
//! let client = Client::default();
//! let mut state = QueryState::new();
//! state.load_all(&client);
//! state.search_text = "land".into();
//! state.region = Some(Region::Europe);
//! for c in state.filtered() {
//!     println!("{}", c.name.common);
//! }
//! ```

pub mod api;
pub mod config;
pub mod detail;
pub mod error;
pub mod favorites;
pub mod format;
pub mod models;
pub mod query;
pub mod route;
pub mod storage;
pub mod task;

pub use api::{Client, CountrySource};
pub use config::Config;
pub use detail::{DetailState, Neighbors};
pub use error::FetchError;
pub use favorites::{Favorites, JsonFileStore, MemoryStore};
pub use models::{Country, Neighbor, Region};
pub use query::{QueryState, View, filter};

/// Text of the About page.
pub const ABOUT: &str = "Country Explorer delivers detailed information about every country in the \
world, using the public REST Countries API (https://restcountries.com). Browse the full list, \
filter it by name and region, run a name search against the API, and open any country for its \
capital, population, currencies, languages, timezones, maps and neighbors. Favorite countries are \
remembered between sessions.";
