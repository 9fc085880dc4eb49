//! # Detail View Model
//!
//! Flattens a `Country` into display strings. Every field that may be
//! missing gets a placeholder here, so renderers never branch on absence.

use std::sync::Arc;

use crate::core::country::Country;

pub const NOT_AVAILABLE: &str = "Not Available";
pub const NOT_APPLICABLE: &str = "N/A";
pub const NONE: &str = "None";
pub const NO_NEIGHBOURS: &str = "No Neighboring Countries";

#[derive(Debug, Clone)]
pub struct CountryDetail {
    pub cca3: String,
    pub flag: String,
    pub flag_url: Option<String>,
    pub common_name: String,
    pub official_name: String,
    pub population: String,
    pub area: String,
    pub capital: String,
    pub subregion: String,
    pub languages: String,
    pub currencies: String,
    pub continents: String,
    pub neighbours: Vec<Arc<Country>>,
}

impl CountryDetail {
    pub fn new(country: &Country, neighbours: Vec<Arc<Country>>) -> Self {
        let population = if country.population == 0 {
            NOT_APPLICABLE.to_string()
        } else {
            group_thousands(country.population)
        };

        let area = match country.area {
            Some(area) if area > 0.0 => format_area(area),
            _ => NOT_APPLICABLE.to_string(),
        };

        let languages = join_or(country.languages.values().map(String::as_str), NONE);
        let currencies = join_or(country.currencies.values().map(|c| c.name.as_str()), NONE);
        let continents = join_or(country.continents.iter().map(String::as_str), NOT_AVAILABLE);

        Self {
            cca3: country.cca3.clone(),
            flag: country.flag_emoji.clone().unwrap_or_default(),
            flag_url: country.flags.png.clone(),
            common_name: non_empty_or(&country.name.common, NOT_AVAILABLE),
            official_name: non_empty_or(&country.name.official, NOT_AVAILABLE),
            population,
            area,
            capital: country
                .capital
                .first()
                .map_or_else(|| NOT_AVAILABLE.to_string(), |c| non_empty_or(c, NOT_AVAILABLE)),
            subregion: country
                .subregion
                .as_deref()
                .map_or_else(|| NOT_AVAILABLE.to_string(), |s| non_empty_or(s, NOT_AVAILABLE)),
            languages,
            currencies,
            continents,
            neighbours,
        }
    }
}

fn non_empty_or(value: &str, placeholder: &str) -> String {
    if value.trim().is_empty() {
        placeholder.to_string()
    } else {
        value.to_string()
    }
}

fn join_or<'a>(values: impl Iterator<Item = &'a str>, placeholder: &str) -> String {
    let joined = values.collect::<Vec<_>>().join(", ");
    if joined.is_empty() {
        placeholder.to_string()
    } else {
        joined
    }
}

/// `1234567` → `"1,234,567"`.
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Grouped integer part, up to three fractional digits with trailing zeros
/// dropped: `181035.0` → `"181,035"`, `0.44` → `"0.44"`.
pub fn format_area(area: f64) -> String {
    let rounded = (area * 1000.0).round() / 1000.0;
    let whole = rounded.trunc();
    let fraction = format!("{:.3}", rounded - whole);
    let fraction = fraction.trim_start_matches('0').trim_end_matches('0');
    // Sub-unit areas are well inside u64.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let grouped = group_thousands(whole as u64);
    if fraction == "." {
        grouped
    } else {
        format!("{grouped}{fraction}")
    }
}
