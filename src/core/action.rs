//! # Actions
//!
//! Everything that can happen in Atlas becomes an `Action`.
//! User types in the search box? That's `Action::SetSearch(text)`.
//! The fetch comes back? That's `Action::FetchSucceeded { .. }`.
//!
//! `update()` applies an action to the state and returns an `Effect` telling
//! the shell what I/O to perform next. No I/O happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! Every criterion change re-runs the pipeline from the full list before
//! `update` returns, so a half-filtered list is never observable.

use chrono::{DateTime, Local};
use log::{debug, info, warn};
use std::sync::Arc;

use crate::core::country::Country;
use crate::core::criteria::{Criteria, SortBy};
use crate::core::navigation::Route;
use crate::core::state::{App, FetchStatus};

#[derive(Debug, Clone)]
pub enum Action {
    /// Start (or restart) the fetch.
    Load,
    FetchSucceeded {
        countries: Vec<Country>,
        fetched_at: DateTime<Local>,
    },
    FetchFailed(String),

    SetSearch(String),
    ToggleRegion(String),
    SetRegions(Vec<String>),
    ToggleUnMember,
    ToggleIndependent,
    SetSortBy(SortBy),
    ResetCriteria,

    /// Remember a record for the detail view.
    Select(Arc<Country>),
    /// Show the detail view for a cca3 code.
    OpenDetails(String),
    BackToList,

    Quit,
}

/// Side effect requested by `update`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    SpawnFetch,
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Load => {
            if app.is_loading() {
                debug!("Load ignored: fetch already in flight");
                return Effect::None;
            }
            app.status = FetchStatus::Loading;
            app.error = None;
            app.status_message = format!("Loading countries from {}...", app.source.name());
            Effect::SpawnFetch
        }
        Action::FetchSucceeded {
            countries,
            fetched_at,
        } => {
            info!("Loaded {} countries", countries.len());
            app.all_countries = countries.into_iter().map(Arc::new).collect();
            app.status = FetchStatus::Succeeded;
            app.error = None;
            app.loaded_at = Some(fetched_at);
            app.selection.rebind(&app.all_countries);
            app.recompute();
            app.status_message = format!("Loaded {} countries", app.all_countries.len());
            Effect::None
        }
        Action::FetchFailed(message) => {
            warn!("Fetch failed: {}", message);
            app.status = FetchStatus::Failed;
            app.status_message = String::from("Fetch failed (Ctrl+R to retry)");
            app.error = Some(message);
            Effect::None
        }

        Action::SetSearch(search) => {
            app.criteria.search = search;
            app.recompute();
            Effect::None
        }
        Action::ToggleRegion(region) => {
            app.criteria.toggle_region(&region);
            app.recompute();
            Effect::None
        }
        Action::SetRegions(regions) => {
            app.criteria.selected_regions = regions.into_iter().collect();
            app.recompute();
            Effect::None
        }
        Action::ToggleUnMember => {
            app.criteria.un_member = !app.criteria.un_member;
            app.recompute();
            Effect::None
        }
        Action::ToggleIndependent => {
            app.criteria.independent = !app.criteria.independent;
            app.recompute();
            Effect::None
        }
        Action::SetSortBy(sort_by) => {
            app.criteria.sort_by = sort_by;
            app.status_message = format!("Sorted by {}", sort_by.description());
            app.recompute();
            Effect::None
        }
        Action::ResetCriteria => {
            app.criteria = Criteria::default();
            app.recompute();
            Effect::None
        }

        Action::Select(country) => {
            debug!("Selected {}", country.cca3);
            app.selection.select(country);
            Effect::None
        }
        Action::OpenDetails(code) => {
            // Deep links and neighbour hops arrive without a prior Select.
            if let Some(found) = app.selection.resolve(&code, &app.all_countries).cloned() {
                app.selection.select(found);
            }
            app.route = Route::Details(code);
            debug!("Navigated to {}", app.route);
            Effect::None
        }
        Action::BackToList => {
            app.route = Route::List;
            Effect::None
        }

        Action::Quit => Effect::Quit,
    }
}
