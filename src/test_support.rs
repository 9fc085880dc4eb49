//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use async_trait::async_trait;
use chrono::Local;
use std::sync::Arc;

use crate::api::{CountrySource, FetchError};
use crate::core::action::{Action, update};
use crate::core::country::{Country, CountryName};
use crate::core::state::App;

/// A source that never returns anything useful, for tests that don't fetch.
pub struct NoopSource;

#[async_trait]
impl CountrySource for NoopSource {
    fn name(&self) -> &str {
        "noop"
    }

    async fn fetch_countries(&self) -> Result<Vec<Country>, FetchError> {
        Ok(Vec::new())
    }
}

/// Builds a minimal record: UN member, independent, subregion "<region> sub".
pub fn country(code: &str, name: &str, population: u64, area: Option<f64>, region: &str) -> Country {
    Country {
        cca3: code.to_string(),
        name: CountryName {
            common: name.to_string(),
            official: name.to_string(),
        },
        population,
        area,
        region: region.to_string(),
        subregion: Some(format!("{region} sub")),
        un_member: true,
        independent: true,
        ..Default::default()
    }
}

fn with(
    mut c: Country,
    subregion: &str,
    borders: &[&str],
    un_member: bool,
    independent: bool,
) -> Country {
    c.subregion = Some(subregion.to_string());
    c.borders = borders.iter().map(|b| (*b).to_string()).collect();
    c.un_member = un_member;
    c.independent = independent;
    c.continents = vec![c.region.clone()];
    c
}

/// A dozen real-ish records covering every region used in tests.
pub fn fixture_records() -> Vec<Country> {
    vec![
        with(
            country("USA", "United States", 329_484_123, Some(9_372_610.0), "Americas"),
            "North America",
            &["CAN", "MEX"],
            true,
            true,
        ),
        with(
            country("CAN", "Canada", 38_005_238, Some(9_984_670.0), "Americas"),
            "North America",
            &["USA"],
            true,
            true,
        ),
        with(
            country("MEX", "Mexico", 128_932_753, Some(1_964_375.0), "Americas"),
            "North America",
            &["BLZ", "GTM", "USA"],
            true,
            true,
        ),
        with(
            country("GBR", "United Kingdom", 67_215_293, Some(242_900.0), "Europe"),
            "Northern Europe",
            &["IRL"],
            true,
            true,
        ),
        with(
            country("FRA", "France", 67_391_582, Some(551_695.0), "Europe"),
            "Western Europe",
            &["AND", "BEL", "DEU", "ITA", "LUX", "MCO", "ESP", "CHE"],
            true,
            true,
        ),
        with(
            country("ESP", "Spain", 47_351_567, Some(505_992.0), "Europe"),
            "Southern Europe",
            &["AND", "FRA", "GIB", "PRT", "MAR"],
            true,
            true,
        ),
        with(
            country("ARE", "United Arab Emirates", 9_890_400, Some(83_600.0), "Asia"),
            "Western Asia",
            &["OMN", "SAU"],
            true,
            true,
        ),
        with(
            country("JPN", "Japan", 125_836_021, Some(377_930.0), "Asia"),
            "Eastern Asia",
            &[],
            true,
            true,
        ),
        with(
            country("AUS", "Australia", 25_687_041, Some(7_692_024.0), "Oceania"),
            "Australia and New Zealand",
            &[],
            true,
            true,
        ),
        with(
            country("FJI", "Fiji", 896_444, Some(18_272.0), "Oceania"),
            "Melanesia",
            &[],
            true,
            true,
        ),
        with(
            country("NGA", "Nigeria", 206_139_587, Some(923_768.0), "Africa"),
            "Western Africa",
            &["BEN", "CMR", "TCD", "NER"],
            true,
            true,
        ),
        with(
            country("ESH", "Western Sahara", 510_713, Some(266_000.0), "Africa"),
            "Northern Africa",
            &["DZA", "MRT", "MAR"],
            false,
            false,
        ),
    ]
}

pub fn fixture_countries() -> Vec<Arc<Country>> {
    fixture_records().into_iter().map(Arc::new).collect()
}

/// Creates a test App with a NoopSource.
pub fn test_app() -> App {
    App::new(Arc::new(NoopSource))
}

/// A test App that has already received the fixture records.
pub fn loaded_app() -> App {
    let mut app = test_app();
    update(&mut app, Action::Load);
    update(
        &mut app,
        Action::FetchSucceeded {
            countries: fixture_records(),
            fetched_at: Local::now(),
        },
    );
    app
}
