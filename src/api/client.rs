//! HTTP source backed by the REST Countries API.
//!
//! The public `/all` endpoint refuses requests without a `fields` query and
//! caps it at ten fields, so a bare endpoint is fetched once per entry of
//! `FIELD_GROUPS` and the partial records are merged by `cca3`. An endpoint
//! that already carries a query string is fetched exactly as given.

use async_trait::async_trait;
use log::{debug, info, warn};
use serde_json::{Map, Value};
use std::collections::HashMap;

use super::source::{CountrySource, FetchError};
use super::types::{RawCountry, parse_countries};
use crate::core::config::DEFAULT_ENDPOINT;
use crate::core::country::Country;

/// Fields Atlas reads, split to stay within the per-request limit.
/// The first group carries everything the list needs; later groups only
/// add to records the first one returned.
pub const FIELD_GROUPS: [&str; 2] = [
    "cca3,name,population,area,region,subregion,unMember,independent,borders,flag",
    "cca3,flags,capital,languages,currencies,continents",
];

/// Fetches the dataset from `endpoint`.
pub struct RestCountriesClient {
    endpoint: String,
    client: reqwest::Client,
}

impl RestCountriesClient {
    /// Creates a new client.
    ///
    /// # Arguments
    /// * `endpoint` - Optional custom URL (defaults to REST Countries `/v3.1/all`)
    pub fn new(endpoint: Option<String>) -> Self {
        Self {
            endpoint: endpoint.unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            client: reqwest::Client::new(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// URLs to fetch, in merge order.
    pub fn request_urls(&self) -> Vec<String> {
        if self.endpoint.contains('?') {
            return vec![self.endpoint.clone()];
        }
        FIELD_GROUPS
            .iter()
            .map(|fields| format!("{}?fields={fields}", self.endpoint))
            .collect()
    }

    async fn get_body(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        debug!("REST Countries response status: {}", response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let err_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("REST Countries error: {} - {}", status, err_body);
            return Err(FetchError::Status {
                status,
                message: err_body,
            });
        }

        response
            .text()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))
    }
}

/// Folds partial records into `merged`, keyed by `cca3`.
/// With `extend_only`, records whose code is not already present are dropped.
fn merge_records(
    merged: &mut Vec<Map<String, Value>>,
    index: &mut HashMap<String, usize>,
    records: Vec<Map<String, Value>>,
    extend_only: bool,
) {
    for record in records {
        let code = record.get("cca3").and_then(Value::as_str).map(str::to_owned);
        match code.as_ref().and_then(|c| index.get(c).copied()) {
            Some(slot) => merged[slot].extend(record),
            None if extend_only => {}
            None => {
                if let Some(code) = code {
                    index.insert(code, merged.len());
                }
                merged.push(record);
            }
        }
    }
}

#[async_trait]
impl CountrySource for RestCountriesClient {
    fn name(&self) -> &str {
        "restcountries"
    }

    async fn fetch_countries(&self) -> Result<Vec<Country>, FetchError> {
        let urls = self.request_urls();

        if let [url] = urls.as_slice() {
            info!("Fetching countries from {}", url);
            let body = self.get_body(url).await?;
            let countries = parse_countries(&body)?;
            info!("Fetched {} countries ({} bytes)", countries.len(), body.len());
            return Ok(countries);
        }

        let mut merged = Vec::new();
        let mut index = HashMap::new();
        for (i, url) in urls.iter().enumerate() {
            info!("Fetching countries from {}", url);
            let body = self.get_body(url).await?;
            let records: Vec<Map<String, Value>> = serde_json::from_str(&body)?;
            merge_records(&mut merged, &mut index, records, i > 0);
        }

        let countries = merged
            .into_iter()
            .map(|record| {
                serde_json::from_value::<RawCountry>(Value::Object(record)).map(Country::from)
            })
            .collect::<Result<Vec<_>, _>>()?;
        info!("Fetched {} countries in {} requests", countries.len(), urls.len());
        Ok(countries)
    }
}
