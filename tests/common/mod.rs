#![allow(dead_code)]

pub mod mock_api;

use country_explorer::api::CountrySource;
use country_explorer::error::{FetchError, Result};
use country_explorer::models::{Country, CountryName, Flags};
use std::cell::RefCell;

/// Build a minimal record.
pub fn country(common: &str, cca3: &str, region: &str, borders: &[&str]) -> Country {
    Country {
        name: CountryName {
            common: common.into(),
            official: format!("Official {}", common),
            ..Default::default()
        },
        cca3: cca3.into(),
        region: region.into(),
        capital: Some(vec![format!("{} City", common)]),
        borders: if borders.is_empty() {
            None
        } else {
            Some(borders.iter().map(|b| b.to_string()).collect())
        },
        flags: Flags {
            png: format!("https://flagcdn.com/w320/{}.png", cca3.to_lowercase()),
            svg: format!("https://flagcdn.com/{}.svg", cca3.to_lowercase()),
            alt: None,
        },
        population: 1_000,
        ..Default::default()
    }
}

/// A small world in a fixed order.
pub fn world() -> Vec<Country> {
    vec![
        country("Germany", "DEU", "Europe", &["AUT", "FRA", "POL"]),
        country("Peru", "PER", "Americas", &["BOL", "BRA", "CHL"]),
        country("Iceland", "ISL", "Europe", &[]),
        country("Ireland", "IRL", "Europe", &["GBR"]),
        country("Finland", "FIN", "Europe", &["NOR", "SWE", "RUS"]),
        country("Thailand", "THA", "Asia", &["MMR", "KHM", "LAO", "MYS"]),
        country("New Zealand", "NZL", "Oceania", &[]),
        country("Nigeria", "NGA", "Africa", &["BEN", "CMR", "TCD", "NER"]),
        country("Austria", "AUT", "Europe", &["DEU"]),
        country("France", "FRA", "Europe", &["DEU", "BEL"]),
        country("Poland", "POL", "Europe", &["DEU"]),
        country("Greenland", "GRL", "Americas", &[]),
        country("Antarctica", "ATA", "Antarctic", &[]),
    ]
}

/// `n` synthetic European countries named "Land 00", "Land 01", ...
pub fn many(n: usize) -> Vec<Country> {
    (0..n)
        .map(|i| country(&format!("Land {:02}", i), &format!("L{:02}", i), "Europe", &[]))
        .collect()
}

/// In-memory `CountrySource` that records every call.
#[derive(Default)]
pub struct FakeSource {
    pub countries: Vec<Country>,
    pub fail_all: bool,
    pub fail_name: bool,
    pub fail_codes: bool,
    pub calls: RefCell<Vec<String>>,
}

impl FakeSource {
    pub fn new(countries: Vec<Country>) -> Self {
        Self {
            countries,
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }

    fn http_error(path: &str, status: u16) -> FetchError {
        FetchError::Status {
            url: format!("fake://{}", path),
            status,
        }
    }
}

impl CountrySource for FakeSource {
    fn fetch_all_countries(&self) -> Result<Vec<Country>> {
        self.record("all".into());
        if self.fail_all {
            return Err(Self::http_error("all", 500));
        }
        Ok(self.countries.clone())
    }

    /// Upstream answers 404 when nothing matches.
    fn fetch_country_by_name(&self, name: &str) -> Result<Vec<Country>> {
        self.record(format!("name:{}", name));
        if self.fail_name {
            return Err(Self::http_error("name", 503));
        }
        let needle = name.to_lowercase();
        let found: Vec<Country> = self
            .countries
            .iter()
            .filter(|c| c.name.common.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        if found.is_empty() {
            return Err(Self::http_error("name", 404));
        }
        Ok(found)
    }

    fn fetch_country_by_full_name(&self, name: &str) -> Result<Vec<Country>> {
        self.record(format!("full:{}", name));
        Ok(self
            .countries
            .iter()
            .filter(|c| c.name.common.eq_ignore_ascii_case(name))
            .cloned()
            .collect())
    }

    fn fetch_countries_by_codes(&self, codes: &[String]) -> Result<Vec<Country>> {
        self.record(format!("codes:{}", codes.join(",")));
        if self.fail_codes {
            return Err(Self::http_error("alpha", 500));
        }
        Ok(self
            .countries
            .iter()
            .filter(|c| codes.contains(&c.cca3))
            .cloned()
            .collect())
    }
}
