//! # Filter/Sort Criteria
//!
//! The user's current filter and sort configuration. Mutated only through
//! `core::action::update`, which re-derives the list after every change.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Regions offered as toggles in the list view.
pub const REGIONS: [&str; 6] = ["Americas", "Antarctic", "Africa", "Asia", "Europe", "Oceania"];

/// Sort key for the derived list.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    /// Alphabetical, A to Z.
    Name,
    /// Highest population first.
    #[default]
    Population,
    /// Largest area first.
    Area,
}

impl SortBy {
    pub const ALL: [SortBy; 3] = [SortBy::Name, SortBy::Population, SortBy::Area];

    /// Short label shown on the sort button.
    pub fn label(self) -> &'static str {
        match self {
            SortBy::Name => "Name",
            SortBy::Population => "Population",
            SortBy::Area => "Area",
        }
    }

    /// Longer label shown in the sort picker.
    pub fn description(self) -> &'static str {
        match self {
            SortBy::Name => "Name (A-Z)",
            SortBy::Population => "Population (High to Low)",
            SortBy::Area => "Area (High to Low)",
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Criteria {
    pub search: String,
    pub selected_regions: BTreeSet<String>,
    pub un_member: bool,
    pub independent: bool,
    pub sort_by: SortBy,
}

impl Criteria {
    /// Adds `region` if absent, removes it (in any casing) if present.
    pub fn toggle_region(&mut self, region: &str) {
        if self.region_selected(region) {
            let needle = region.to_lowercase();
            self.selected_regions.retain(|r| r.to_lowercase() != needle);
        } else {
            self.selected_regions.insert(region.to_string());
        }
    }

    /// Case-insensitive membership test against the selected regions, using
    /// the same Unicode lowercasing as the text filter.
    pub fn region_selected(&self, region: &str) -> bool {
        let needle = region.to_lowercase();
        self.selected_regions
            .iter()
            .any(|r| r.to_lowercase() == needle)
    }

    /// True when no filter is narrowing the list (sort key is ignored).
    pub fn is_unfiltered(&self) -> bool {
        self.search.is_empty()
            && self.selected_regions.is_empty()
            && !self.un_member
            && !self.independent
    }
}
