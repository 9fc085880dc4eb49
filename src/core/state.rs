//! # Application State
//!
//! Core business state for Atlas. Domain logic only, no TUI types.
//! Presentation state (cursor positions, open overlays) lives in `tui`.
//!
//! ```text
//! App
//! ├── source: Arc<dyn CountrySource>   // fetch collaborator
//! ├── status: FetchStatus              // idle / loading / succeeded / failed
//! ├── error: Option<String>            // last fetch failure
//! ├── all_countries: Vec<Arc<Country>> // full fetched list
//! ├── countries: Vec<Arc<Country>>     // derived list (filtered + sorted)
//! ├── criteria: Criteria               // active filters and sort key
//! ├── selection: Selection             // last record the user picked
//! ├── route: Route                     // list or details/<code>
//! ├── status_message: String           // status bar text
//! └── loaded_at: Option<DateTime>      // when the full list arrived
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use chrono::{DateTime, Local};
use std::sync::Arc;

use crate::api::CountrySource;
use crate::core::config::ResolvedConfig;
use crate::core::country::Country;
use crate::core::criteria::Criteria;
use crate::core::detail::CountryDetail;
use crate::core::navigation::Route;
use crate::core::pipeline::derive;
use crate::core::selection::{Selection, neighbours};

/// Lifecycle of the one fetch per load trigger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FetchStatus {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed,
}

pub struct App {
    pub source: Arc<dyn CountrySource>,
    pub status: FetchStatus,
    pub error: Option<String>,
    pub all_countries: Vec<Arc<Country>>,
    pub countries: Vec<Arc<Country>>,
    pub criteria: Criteria,
    pub selection: Selection,
    pub route: Route,
    pub status_message: String,
    pub loaded_at: Option<DateTime<Local>>,
}

impl App {
    pub fn new(source: Arc<dyn CountrySource>) -> Self {
        Self {
            source,
            status: FetchStatus::Idle,
            error: None,
            all_countries: Vec::new(),
            countries: Vec::new(),
            criteria: Criteria::default(),
            selection: Selection::default(),
            route: Route::List,
            status_message: String::from("Welcome to Atlas!"),
            loaded_at: None,
        }
    }

    /// Builds the initial state with the configured starting criteria.
    pub fn from_config(source: Arc<dyn CountrySource>, config: &ResolvedConfig) -> Self {
        let mut app = Self::new(source);
        app.criteria = config.criteria.clone();
        app
    }

    /// Replaces the derived list from the full list and current criteria.
    pub fn recompute(&mut self) {
        self.countries = derive(&self.all_countries, &self.criteria);
    }

    pub fn is_loading(&self) -> bool {
        self.status == FetchStatus::Loading
    }

    /// Record shown on the detail route, if the route is a detail route and
    /// its code resolves.
    pub fn detail_country(&self) -> Option<&Arc<Country>> {
        let code = self.route.details_code()?;
        self.selection.resolve(code, &self.all_countries)
    }

    /// Display model for the detail route.
    pub fn detail(&self) -> Option<CountryDetail> {
        self.detail_country().map(|country| {
            let borders = neighbours(country, &self.all_countries);
            CountryDetail::new(country, borders)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_app;

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert_eq!(app.status, FetchStatus::Idle);
        assert!(app.error.is_none());
        assert!(app.all_countries.is_empty());
        assert!(app.countries.is_empty());
        assert_eq!(app.criteria, Criteria::default());
        assert!(app.selection.current().is_none());
        assert_eq!(app.route, Route::List);
        assert_eq!(app.status_message, "Welcome to Atlas!");
    }

    #[test]
    fn test_detail_is_none_on_list_route() {
        let app = test_app();
        assert!(app.detail().is_none());
    }
}
