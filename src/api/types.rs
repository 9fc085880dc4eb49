//! Wire format of the REST Countries v3.1 `/all` payload.
//!
//! Only `cca3` and `name` are required; every other field is optional on the
//! wire and normalized when converted into `core::country::Country`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::core::country::{Country, CountryName, Currency, Flags};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RawName {
    pub common: String,
    #[serde(default)]
    pub official: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct RawFlags {
    pub png: Option<String>,
    pub svg: Option<String>,
    pub alt: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct RawCurrency {
    #[serde(default)]
    pub name: String,
    pub symbol: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RawCountry {
    pub cca3: String,
    pub name: RawName,
    #[serde(default)]
    pub population: Option<u64>,
    #[serde(default)]
    pub area: Option<f64>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub subregion: Option<String>,
    #[serde(default)]
    pub un_member: Option<bool>,
    #[serde(default)]
    pub independent: Option<bool>,
    #[serde(default)]
    pub borders: Option<Vec<String>>,
    #[serde(default)]
    pub flags: Option<RawFlags>,
    #[serde(default)]
    pub flag: Option<String>,
    #[serde(default)]
    pub capital: Option<Vec<String>>,
    #[serde(default)]
    pub languages: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub currencies: Option<BTreeMap<String, RawCurrency>>,
    #[serde(default)]
    pub continents: Option<Vec<String>>,
}

impl From<RawCountry> for Country {
    fn from(raw: RawCountry) -> Self {
        let flags = raw.flags.unwrap_or_default();
        Country {
            cca3: raw.cca3,
            name: CountryName {
                common: raw.name.common,
                official: raw.name.official,
            },
            population: raw.population.unwrap_or(0),
            // Negative or non-finite areas are treated as unknown.
            area: raw.area.filter(|a| a.is_finite() && *a >= 0.0),
            region: raw.region.unwrap_or_default(),
            subregion: raw.subregion.filter(|s| !s.is_empty()),
            un_member: raw.un_member.unwrap_or(false),
            independent: raw.independent.unwrap_or(false),
            borders: raw.borders.unwrap_or_default(),
            flags: Flags {
                png: flags.png,
                svg: flags.svg,
                alt: flags.alt,
            },
            flag_emoji: raw.flag,
            capital: raw.capital.unwrap_or_default(),
            languages: raw.languages.unwrap_or_default(),
            currencies: raw
                .currencies
                .unwrap_or_default()
                .into_iter()
                .map(|(code, c)| {
                    (
                        code,
                        Currency {
                            name: c.name,
                            symbol: c.symbol,
                        },
                    )
                })
                .collect(),
            continents: raw.continents.unwrap_or_default(),
        }
    }
}

/// Parses a full `/all` payload.
pub fn parse_countries(body: &str) -> Result<Vec<Country>, serde_json::Error> {
    let raw: Vec<RawCountry> = serde_json::from_str(body)?;
    Ok(raw.into_iter().map(Country::from).collect())
}
