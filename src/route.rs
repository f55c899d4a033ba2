//! Navigation targets: `/`, `/country`, `/about`, `/country/:name`.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Route {
    /// Landing page.
    #[default]
    Hero,
    /// Searchable country list.
    Countries,
    About,
    /// Detail page; the name is the common name, used verbatim as lookup key.
    Country(String),
}

const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

impl Route {
    /// Parse a path. Unknown paths yield `None`.
    pub fn parse(path: &str) -> Option<Route> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "" => Some(Route::Hero),
            "/country" => Some(Route::Countries),
            "/about" => Some(Route::About),
            other => {
                let name = other.strip_prefix("/country/")?;
                if name.is_empty() || name.contains('/') {
                    return None;
                }
                let decoded = percent_decode_str(name).decode_utf8().ok()?;
                Some(Route::Country(decoded.into_owned()))
            }
        }
    }

    pub fn country(name: &str) -> Route {
        Route::Country(name.to_string())
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Hero => f.write_str("/"),
            Route::Countries => f.write_str("/country"),
            Route::About => f.write_str("/about"),
            Route::Country(name) => write!(
                f,
                "/country/{}",
                percent_encoding::utf8_percent_encode(name, SEGMENT)
            ),
        }
    }
}
