//! Local JSON snapshot in the same format as the `/all` endpoint.
//! Useful offline, and when the public API is rate limited.

use async_trait::async_trait;
use log::info;
use std::path::PathBuf;

use super::source::{CountrySource, FetchError};
use super::types::parse_countries;
use crate::core::country::Country;

pub struct SnapshotSource {
    path: PathBuf,
}

impl SnapshotSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait]
impl CountrySource for SnapshotSource {
    fn name(&self) -> &str {
        "snapshot"
    }

    async fn fetch_countries(&self) -> Result<Vec<Country>, FetchError> {
        info!("Reading countries from {}", self.path.display());
        let body = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| FetchError::Io(format!("{}: {e}", self.path.display())))?;
        Ok(parse_countries(&body)?)
    }
}
