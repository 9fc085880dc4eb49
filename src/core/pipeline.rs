//! # Filter-Sort Pipeline
//!
//! ```text
//! full list ─► text ─► region ─► UN member ─► independent ─► stable sort ─► derived list
//! ```
//!
//! `derive` always starts from the unfiltered list. Filters are AND-ed across
//! categories; selected regions are OR-ed among themselves. The function is
//! pure: same inputs, same output, no mutation of either argument.

use std::cmp::Ordering;
use std::sync::Arc;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::core::country::Country;
use crate::core::criteria::{Criteria, SortBy};

/// Recomputes the derived list from the full list and the criteria.
pub fn derive(full: &[Arc<Country>], criteria: &Criteria) -> Vec<Arc<Country>> {
    let needle = criteria.search.to_lowercase();

    let mut derived: Vec<Arc<Country>> = full
        .iter()
        .filter(|c| needle.is_empty() || matches_search(c, &needle))
        .filter(|c| criteria.selected_regions.is_empty() || criteria.region_selected(&c.region))
        .filter(|c| !criteria.un_member || c.un_member)
        .filter(|c| !criteria.independent || c.independent)
        .cloned()
        .collect();

    sort_countries(&mut derived, criteria.sort_by);
    derived
}

/// `needle` must already be lowercased.
fn matches_search(country: &Country, needle: &str) -> bool {
    [
        Some(country.name.common.as_str()),
        Some(country.region.as_str()),
        country.subregion.as_deref(),
    ]
    .into_iter()
    .flatten()
    .any(|field| field.to_lowercase().contains(needle))
}

/// Stable in-place sort by the given key.
pub fn sort_countries(countries: &mut [Arc<Country>], sort_by: SortBy) {
    match sort_by {
        SortBy::Name => {
            countries.sort_by_cached_key(|c| collation_key(&c.name.common));
        }
        SortBy::Population => {
            countries.sort_by(|a, b| b.population.cmp(&a.population));
        }
        SortBy::Area => {
            countries.sort_by(|a, b| b.area_or_zero().total_cmp(&a.area_or_zero()));
        }
    }
}

/// Locale-style ordering key: case and diacritics are ignored at the primary
/// level ("Åland" sorts with the A's). Ties between names that differ only in
/// case put lowercase first ("chad" < "Chad"), then the raw string decides.
fn collation_key(name: &str) -> (String, String, String) {
    let primary = name
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect();
    (primary, swap_case(name), name.to_string())
}

/// Flips letter case so that a plain comparison ranks lowercase first.
fn swap_case(name: &str) -> String {
    name.chars()
        .flat_map(|c| {
            if c.is_lowercase() {
                c.to_uppercase().collect::<Vec<_>>()
            } else {
                c.to_lowercase().collect()
            }
        })
        .collect()
}

/// Compares two names the way the name sort does.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    collation_key(a).cmp(&collation_key(b))
}
