use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Continental regions offered by the region filter.
///
/// The API also reports `"Antarctic"`, which is not filterable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Region {
    Africa,
    Americas,
    Asia,
    Europe,
    Oceania,
}

impl Region {
    pub const ALL: [Region; 5] = [
        Region::Africa,
        Region::Americas,
        Region::Asia,
        Region::Europe,
        Region::Oceania,
    ];

    /// Exact spelling used in the API's `region` field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Africa => "Africa",
            Region::Americas => "Americas",
            Region::Asia => "Asia",
            Region::Europe => "Europe",
            Region::Oceania => "Oceania",
        }
    }

    /// Case-sensitive match against a record's `region` field.
    pub fn matches(&self, region: &str) -> bool {
        self.as_str() == region
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Region {
    type Err = String;

    /// User input is accepted case-insensitively; records are still matched exactly.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Region::ALL
            .into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                format!(
                    "unknown region '{}', expected one of: Africa, Americas, Asia, Europe, Oceania",
                    wanted
                )
            })
    }
}

/// Serde helper: treat an explicit JSON `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NativeName {
    #[serde(default)]
    pub official: String,
    #[serde(default)]
    pub common: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryName {
    pub common: String,
    #[serde(default)]
    pub official: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub native_name: BTreeMap<String, NativeName>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Currency {
    #[serde(default)]
    pub name: String,
    pub symbol: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Flags {
    #[serde(default)]
    pub png: String,
    #[serde(default)]
    pub svg: String,
    pub alt: Option<String>,
}

impl Flags {
    /// Preferred image URL: SVG first, PNG as fallback.
    pub fn best(&self) -> Option<&str> {
        [self.svg.as_str(), self.png.as_str()]
            .into_iter()
            .find(|u| !u.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoatOfArms {
    pub png: Option<String>,
    pub svg: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Maps {
    #[serde(default)]
    pub google_maps: String,
    #[serde(default)]
    pub open_street_maps: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Car {
    #[serde(default)]
    pub signs: Vec<String>,
    pub side: Option<String>,
}

/// One record from the REST Countries v3.1 API.
///
/// Only the fields the explorer shows are modelled; everything the API may omit
/// deserializes to an empty default. Records are never mutated after fetching.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Country {
    pub name: CountryName,
    /// Alpha-3 code, the identity key.
    pub cca3: String,
    #[serde(default)]
    pub cca2: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tld: Vec<String>,
    pub independent: Option<bool>,
    #[serde(default)]
    pub un_member: bool,
    pub currencies: Option<BTreeMap<String, Currency>>,
    pub capital: Option<Vec<String>>,
    #[serde(default)]
    pub region: String,
    pub subregion: Option<String>,
    pub languages: Option<BTreeMap<String, String>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub latlng: Vec<f64>,
    #[serde(default)]
    pub landlocked: bool,
    pub borders: Option<Vec<String>>,
    pub area: Option<f64>,
    pub flag: Option<String>,
    #[serde(default)]
    pub maps: Maps,
    #[serde(default)]
    pub population: u64,
    /// Gini index keyed by survey year.
    pub gini: Option<BTreeMap<String, f64>>,
    pub car: Option<Car>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub timezones: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub continents: Vec<String>,
    #[serde(default)]
    pub flags: Flags,
    pub coat_of_arms: Option<CoatOfArms>,
}

impl Country {
    pub fn common_name(&self) -> &str {
        &self.name.common
    }

    /// Border codes, empty when the API omits the field.
    pub fn border_codes(&self) -> &[String] {
        self.borders.as_deref().unwrap_or(&[])
    }

    pub fn has_land_borders(&self) -> bool {
        !self.border_codes().is_empty()
    }

    pub fn first_capital(&self) -> Option<&str> {
        self.capital
            .as_deref()
            .and_then(|c| c.first())
            .map(String::as_str)
    }
}

/// The subset of a neighboring country shown on a neighbor card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Neighbor {
    pub cca3: String,
    pub name: String,
    pub capital: Option<String>,
    pub flag_png: String,
}

impl From<&Country> for Neighbor {
    fn from(c: &Country) -> Self {
        Self {
            cca3: c.cca3.clone(),
            name: c.name.common.clone(),
            capital: c.first_capital().map(str::to_string),
            flag_png: c.flags.png.clone(),
        }
    }
}
