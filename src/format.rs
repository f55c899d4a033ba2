//! Text helpers shared by the CLI and the desktop app: numbers, lists and the
//! small summaries shown on country cards and detail pages.

use crate::models::Country;
use num_format::{Locale, ToFormattedString};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};

/// Placeholder for a value the record doesn't have.
pub const MISSING: &str = "—";

/// How many timezones are listed before collapsing into "+N more".
pub const TIMEZONES_SHOWN: usize = 5;

/// Map a user-provided locale tag to a `num_format::Locale` and its decimal separator char.
///
/// Supported tags (case-insensitive): `en`, `us`, `en_US`, `de`, `de_DE`, `german`,
/// `fr`, `es`, `it`, `pt`, `nl`. Defaults to English.
pub fn map_locale(tag: &str) -> (&'static Locale, char) {
    match tag.to_lowercase().as_str() {
        "de" | "de_de" | "german" => (&Locale::de, ','),
        "fr" | "fr_fr" => (&Locale::fr, ','),
        "es" | "es_es" => (&Locale::es, ','),
        "it" | "it_it" => (&Locale::it, ','),
        "pt" | "pt_pt" | "pt_br" => (&Locale::pt, ','),
        "nl" | "nl_nl" => (&Locale::nl, ','),
        _ => (&Locale::en, '.'),
    }
}

/// Integer with thousands separators, e.g. `83,240,525` / `83.240.525`.
pub fn grouped(n: u64, locale: &str) -> String {
    let (loc, _) = map_locale(locale);
    n.to_formatted_string(loc)
}

/// Decimal with grouped integer part and at most three fraction digits.
pub fn grouped_f64(v: f64, locale: &str) -> String {
    let (loc, dec) = map_locale(locale);
    let sign = if v < 0.0 { "-" } else { "" };
    let s = format!("{:.3}", v.abs());
    let (int_part, frac) = s.split_once('.').unwrap_or((s.as_str(), ""));
    let int_val: u64 = int_part.parse().unwrap_or(0);
    let frac = frac.trim_end_matches('0');
    if frac.is_empty() {
        format!("{}{}", sign, int_val.to_formatted_string(loc))
    } else {
        format!("{}{}{}{}", sign, int_val.to_formatted_string(loc), dec, frac)
    }
}

/// Short population magnitude: "83.2 million", "12.3 thousand", "999".
pub fn population_summary(population: u64) -> String {
    let p = population as f64;
    if p >= 1.0e6 {
        format!("{:.1} million", p / 1.0e6)
    } else if p >= 1.0e3 {
        format!("{:.1} thousand", p / 1.0e3)
    } else {
        population.to_string()
    }
}

fn or_missing(s: String) -> String {
    if s.is_empty() { MISSING.to_string() } else { s }
}

pub fn text_or_missing(s: Option<&str>) -> String {
    or_missing(s.unwrap_or_default().to_string())
}

pub fn capitals(c: &Country) -> String {
    or_missing(c.capital.as_deref().unwrap_or_default().join(", "))
}

/// "Euro (€), Swiss franc (Fr.)"
pub fn currencies(c: &Country) -> String {
    let Some(map) = c.currencies.as_ref() else {
        return MISSING.to_string();
    };
    or_missing(
        map.values()
            .map(|cur| format!("{} ({})", cur.name, cur.symbol.as_deref().unwrap_or("")))
            .collect::<Vec<_>>()
            .join(", "),
    )
}

pub fn currency_codes(c: &Country) -> String {
    let Some(map) = c.currencies.as_ref() else {
        return MISSING.to_string();
    };
    or_missing(map.keys().cloned().collect::<Vec<_>>().join(", "))
}

pub fn language_names(c: &Country) -> Vec<&str> {
    c.languages
        .as_ref()
        .map(|m| m.values().map(String::as_str).collect())
        .unwrap_or_default()
}

pub fn languages(c: &Country) -> String {
    or_missing(language_names(c).join(", "))
}

pub fn language_count(c: &Country) -> String {
    match c.languages.as_ref() {
        Some(m) => m.len().to_string(),
        None => MISSING.to_string(),
    }
}

/// First `TIMEZONES_SHOWN` zones, plus a "+N more" marker when there are more.
pub fn timezones(c: &Country) -> Vec<String> {
    let mut out: Vec<String> = c
        .timezones
        .iter()
        .take(TIMEZONES_SHOWN)
        .cloned()
        .collect();
    if c.timezones.len() > TIMEZONES_SHOWN {
        out.push(format!("+{} more", c.timezones.len() - TIMEZONES_SHOWN));
    }
    out
}

pub fn borders_summary(c: &Country) -> String {
    match c.border_codes().len() {
        0 => "No land borders".to_string(),
        n => format!("{} countries", n),
    }
}

pub fn yes_no(b: bool) -> &'static str {
    if b { "Yes" } else { "No" }
}

/// Tri-state: unknown independence renders as missing.
pub fn independent(c: &Country) -> &'static str {
    match c.independent {
        Some(b) => yes_no(b),
        None => MISSING,
    }
}

/// First Gini value, whatever the survey year.
pub fn gini(c: &Country) -> String {
    c.gini
        .as_ref()
        .and_then(|g| g.values().next())
        .map(|v| v.to_string())
        .unwrap_or_else(|| MISSING.to_string())
}

pub fn driving_side(c: &Country) -> String {
    c.car
        .as_ref()
        .and_then(|car| car.side.as_deref())
        .filter(|s| !s.is_empty())
        .map(capitalize)
        .unwrap_or_else(|| MISSING.to_string())
}

pub fn continents(c: &Country) -> String {
    or_missing(c.continents.join(", "))
}

pub fn tlds(c: &Country) -> String {
    or_missing(c.tld.join(", "))
}

pub fn area(c: &Country, locale: &str) -> String {
    match c.area {
        Some(a) if a != 0.0 => format!("{} km²", grouped_f64(a, locale)),
        _ => format!("{} km²", MISSING),
    }
}

/// "83,240,525 (83.2 million)"
pub fn population(c: &Country, locale: &str) -> String {
    format!(
        "{} ({})",
        grouped(c.population, locale),
        population_summary(c.population)
    )
}

const WIKI: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub fn wikipedia_url(c: &Country) -> String {
    format!(
        "https://en.wikipedia.org/wiki/{}",
        percent_encoding::utf8_percent_encode(&c.name.common, WIKI)
    )
}

/// One-line card text: name, region, subregion, population.
pub fn summary_line(c: &Country, locale: &str) -> String {
    format!(
        "{} [{}]  region: {}  subregion: {}  population: {}",
        c.name.common,
        c.cca3,
        text_or_missing(Some(c.region.as_str())),
        text_or_missing(c.subregion.as_deref()),
        grouped(c.population, locale)
    )
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
