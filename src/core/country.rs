//! # Country Records
//!
//! The normalized, immutable record the rest of the core works with.
//! Wire-format quirks (missing fields, nulls, nested name objects) are
//! absorbed in `api::types` before a `Country` is ever built.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Common and official names of a country.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct CountryName {
    pub common: String,
    pub official: String,
}

/// Flag image references.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Flags {
    pub png: Option<String>,
    pub svg: Option<String>,
    pub alt: Option<String>,
}

/// A currency entry, keyed by its ISO code in `Country::currencies`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Currency {
    pub name: String,
    pub symbol: Option<String>,
}

/// One country's dataset entry.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Country {
    /// ISO 3166-1 alpha-3 code. Unique across the dataset.
    pub cca3: String,
    pub name: CountryName,
    pub population: u64,
    /// Square kilometres. `None` when the dataset omits it.
    pub area: Option<f64>,
    pub region: String,
    pub subregion: Option<String>,
    pub un_member: bool,
    pub independent: bool,
    /// cca3 codes of bordering countries.
    pub borders: Vec<String>,
    pub flags: Flags,
    /// Unicode regional-indicator pair, e.g. "🇫🇷".
    pub flag_emoji: Option<String>,
    pub capital: Vec<String>,
    pub languages: BTreeMap<String, String>,
    pub currencies: BTreeMap<String, Currency>,
    pub continents: Vec<String>,
}

impl Country {
    /// Area used for ordering: absent counts as zero.
    pub fn area_or_zero(&self) -> f64 {
        self.area.unwrap_or(0.0)
    }

    /// Case-insensitive identifier comparison.
    pub fn has_code(&self, code: &str) -> bool {
        self.cca3.eq_ignore_ascii_case(code)
    }
}
