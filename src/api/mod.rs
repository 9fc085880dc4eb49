pub mod client;
pub mod snapshot;
pub mod source;
pub mod types;

pub use client::RestCountriesClient;
pub use snapshot::SnapshotSource;
pub use source::{CountrySource, FetchError};
pub use types::{RawCountry, parse_countries};
