//! Synchronous client for the **REST Countries API (v3.1)**.
//!
//! Four read-only endpoints are wrapped and returned as `models::Country`
//! records:
//! - `GET /all` (the full list)
//! - `GET /name/{name}` (partial name match)
//! - `GET /name/{name}?fullText=true` (exact name match)
//! - `GET /alpha?codes={csv}` (batched lookup by alpha-3 code)
//!
//! ### Notes
//! - One attempt per call: no retries, no caching.
//! - No request timeout unless one is set through `config::Config`.
//! - The upstream `/all` endpoint rejects requests without a `fields` filter, so
//!   the list is fetched with the fields the list view needs (`LIST_FIELDS`).
//!
//! Typical usage:
//! ```no_run
//! # use country_explorer::api::{Client, CountrySource};
//! let client = Client::default();
//! let all = client.fetch_all_countries()?;
//! let germany = client.fetch_country_by_full_name("Germany")?;
//! # Ok::<(), country_explorer::FetchError>(())
//! ```

use crate::config::Config;
use crate::error::{FetchError, Result};
use crate::models::Country;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};
use reqwest::blocking::Client as HttpClient;
use reqwest::redirect::Policy;

/// Fields requested from `/all`; everything else deserializes to defaults.
pub const LIST_FIELDS: &[&str] = &[
    "name",
    "cca3",
    "region",
    "subregion",
    "population",
    "flags",
    "capital",
];

/// The remote lookups the explorer needs.
///
/// `Client` talks HTTP; tests substitute an in-memory source.
pub trait CountrySource {
    /// Every country known upstream.
    fn fetch_all_countries(&self) -> Result<Vec<Country>>;

    /// Countries whose name contains `name` (upstream partial matching).
    fn fetch_country_by_name(&self, name: &str) -> Result<Vec<Country>>;

    /// Countries whose name equals `name` exactly.
    fn fetch_country_by_full_name(&self, name: &str) -> Result<Vec<Country>>;

    /// All countries for the given alpha-3 codes, in one request.
    fn fetch_countries_by_codes(&self, codes: &[String]) -> Result<Vec<Country>>;
}

impl<S: CountrySource + ?Sized> CountrySource for &S {
    fn fetch_all_countries(&self) -> Result<Vec<Country>> {
        (**self).fetch_all_countries()
    }
    fn fetch_country_by_name(&self, name: &str) -> Result<Vec<Country>> {
        (**self).fetch_country_by_name(name)
    }
    fn fetch_country_by_full_name(&self, name: &str) -> Result<Vec<Country>> {
        (**self).fetch_country_by_full_name(name)
    }
    fn fetch_countries_by_codes(&self, codes: &[String]) -> Result<Vec<Country>> {
        (**self).fetch_countries_by_codes(codes)
    }
}

#[derive(Debug, Clone)]
pub struct Client {
    pub base_url: String,
    http: HttpClient,
}

impl Default for Client {
    fn default() -> Self {
        Self::from_config(&Config::default()).expect("reqwest client build")
    }
}

// Path segments keep unreserved characters; spaces and the rest are escaped.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

fn enc(part: &str) -> String {
    percent_encoding::utf8_percent_encode(part, SEGMENT).to_string()
}

fn enc_join<'a>(parts: impl IntoIterator<Item = &'a str>) -> String {
    parts
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(enc)
        .collect::<Vec<_>>()
        .join(",")
}

impl Client {
    pub fn from_config(cfg: &Config) -> anyhow::Result<Self> {
        let http = HttpClient::builder()
            .timeout(cfg.timeout) // None disables the total timeout
            .redirect(Policy::limited(5))
            .user_agent(concat!("country-explorer/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    /// Same HTTP settings, different upstream (mock servers, mirrors).
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn all_url(&self) -> String {
        format!("{}/all?fields={}", self.base_url, LIST_FIELDS.join(","))
    }

    pub fn name_url(&self, name: &str, full_text: bool) -> String {
        let mut url = format!("{}/name/{}", self.base_url, enc(name));
        if full_text {
            url.push_str("?fullText=true");
        }
        url
    }

    pub fn codes_url(&self, codes: &[String]) -> String {
        format!(
            "{}/alpha?codes={}",
            self.base_url,
            enc_join(codes.iter().map(String::as_str))
        )
    }

    /// Single GET, non-2xx mapped to `FetchError::Status`.
    fn get_countries(&self, url: &str) -> Result<Vec<Country>> {
        log::debug!("GET {}", url);
        let resp = self
            .http
            .get(url)
            .send()
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        let body = resp.text().map_err(|source| FetchError::Transport {
            url: url.to_string(),
            source,
        })?;
        parse_countries(url, &body)
    }
}

impl CountrySource for Client {
    fn fetch_all_countries(&self) -> Result<Vec<Country>> {
        self.get_countries(&self.all_url())
    }

    fn fetch_country_by_name(&self, name: &str) -> Result<Vec<Country>> {
        self.get_countries(&self.name_url(name, false))
    }

    fn fetch_country_by_full_name(&self, name: &str) -> Result<Vec<Country>> {
        self.get_countries(&self.name_url(name, true))
    }

    fn fetch_countries_by_codes(&self, codes: &[String]) -> Result<Vec<Country>> {
        if codes.iter().all(|c| c.trim().is_empty()) {
            return Ok(Vec::new());
        }
        self.get_countries(&self.codes_url(codes))
    }
}

/// Decode a JSON array of country records. `url` is only used for the error.
pub fn parse_countries(url: &str, body: &str) -> Result<Vec<Country>> {
    serde_json::from_str(body).map_err(|e| FetchError::Decode {
        url: url.to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> Client {
        Client::default().with_base_url("http://localhost:3000/v3.1/")
    }

    #[test]
    fn urls_match_upstream_routes() {
        let c = client();
        assert_eq!(
            c.all_url(),
            "http://localhost:3000/v3.1/all?fields=name,cca3,region,subregion,population,flags,capital"
        );
        assert_eq!(c.name_url("peru", false), "http://localhost:3000/v3.1/name/peru");
        assert_eq!(
            c.name_url("United States", true),
            "http://localhost:3000/v3.1/name/United%20States?fullText=true"
        );
        assert_eq!(
            c.codes_url(&["FRA".into(), " BEL ".into(), "".into(), "LUX".into()]),
            "http://localhost:3000/v3.1/alpha?codes=FRA,BEL,LUX"
        );
    }

    #[test]
    fn names_with_reserved_characters_stay_in_one_segment() {
        let c = client();
        assert_eq!(
            c.name_url("Côte d'Ivoire", true),
            "http://localhost:3000/v3.1/name/C%C3%B4te%20d%27Ivoire?fullText=true"
        );
        assert_eq!(c.name_url("a/b", false), "http://localhost:3000/v3.1/name/a%2Fb");
    }

    #[test]
    fn detail_names_are_sent_verbatim() {
        assert_eq!(
            client().name_url(" Peru ", true),
            "http://localhost:3000/v3.1/name/%20Peru%20?fullText=true"
        );
    }

    #[test]
    fn empty_code_list_skips_the_request() {
        // Base URL is unroutable; any request would fail.
        let c = Client::default().with_base_url("http://127.0.0.1:9");
        assert!(c.fetch_countries_by_codes(&[]).unwrap().is_empty());
    }

    #[test]
    fn decode_error_names_the_url() {
        let err = parse_countries("http://x/all", "{\"status\":404}").unwrap_err();
        match err {
            FetchError::Decode { url, .. } => assert_eq!(url, "http://x/all"),
            other => panic!("unexpected {other:?}"),
        }
    }
}
