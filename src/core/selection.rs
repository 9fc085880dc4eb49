//! # Selection & Navigation Bridge
//!
//! Remembers which record the user last picked so the detail view can show
//! it without another fetch. A detail route reached without a prior pick
//! (deep link via `--country`) falls back to an identifier lookup in the
//! full list. Misses are `None`, never errors.

use std::sync::Arc;

use crate::core::country::Country;

#[derive(Debug, Clone, Default)]
pub struct Selection {
    current: Option<Arc<Country>>,
}

impl Selection {
    /// Stores `country`. Callers pass the canonical record from the full list.
    pub fn select(&mut self, country: Arc<Country>) {
        self.current = Some(country);
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn current(&self) -> Option<&Arc<Country>> {
        self.current.as_ref()
    }

    /// Returns the stored selection if its code matches, else the full-list
    /// record with that code, else `None`.
    pub fn resolve<'a>(&'a self, code: &str, full: &'a [Arc<Country>]) -> Option<&'a Arc<Country>> {
        self.current
            .as_ref()
            .filter(|c| c.has_code(code))
            .or_else(|| find_by_code(full, code))
    }

    /// Points the selection at the record with the same code in a freshly
    /// loaded list, or clears it when that code is gone.
    pub fn rebind(&mut self, full: &[Arc<Country>]) {
        if let Some(code) = self.current.as_ref().map(|c| c.cca3.clone()) {
            self.current = find_by_code(full, &code).cloned();
        }
    }
}

/// Case-insensitive lookup by cca3 code.
pub fn find_by_code<'a>(full: &'a [Arc<Country>], code: &str) -> Option<&'a Arc<Country>> {
    full.iter().find(|c| c.has_code(code))
}

/// Maps each border code to its full-list record, in border order.
/// Codes with no matching record are dropped.
pub fn neighbours(country: &Country, full: &[Arc<Country>]) -> Vec<Arc<Country>> {
    if full.is_empty() {
        return Vec::new();
    }
    country
        .borders
        .iter()
        .filter_map(|code| find_by_code(full, code).cloned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{country, fixture_countries};

    #[test]
    fn test_resolve_without_selection_falls_back_to_full_list() {
        let full = fixture_countries();
        let selection = Selection::default();
        let found = selection.resolve("fra", &full).map(|c| c.name.common.as_str());
        assert_eq!(found, Some("France"));
    }

    #[test]
    fn test_resolve_unknown_code_is_none() {
        let full = fixture_countries();
        let selection = Selection::default();
        assert!(selection.resolve("ZZZ", &full).is_none());
        assert!(selection.resolve("ZZZ", &[]).is_none());
    }

    #[test]
    fn test_resolve_prefers_stored_selection() {
        // A selected record outside the full list still resolves by its own code.
        let full = fixture_countries();
        let mut selection = Selection::default();
        let picked = Arc::new(country("XKX", "Kosovo", 1_775_378, Some(10_908.0), "Europe"));
        selection.select(picked.clone());

        let resolved = selection.resolve("xkx", &full);
        assert!(resolved.is_some_and(|c| Arc::ptr_eq(c, &picked)));
    }

    #[test]
    fn test_resolve_ignores_selection_with_other_code() {
        let full = fixture_countries();
        let mut selection = Selection::default();
        let usa = find_by_code(&full, "USA").cloned().unwrap();
        selection.select(usa);

        let resolved = selection.resolve("JPN", &full).map(|c| c.cca3.as_str());
        assert_eq!(resolved, Some("JPN"));
    }

    #[test]
    fn test_neighbours_drop_unknown_codes() {
        let full = fixture_countries();
        let mut probe = country("TST", "Probe", 0, None, "Americas");
        probe.borders = vec!["XXX".to_string(), "USA".to_string()];

        let found = neighbours(&probe, &full);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].cca3, "USA");
    }

    #[test]
    fn test_neighbours_match_case_insensitively_in_border_order() {
        let full = fixture_countries();
        let mut probe = country("TST", "Probe", 0, None, "Americas");
        probe.borders = vec!["mex".to_string(), "Can".to_string()];

        let codes: Vec<_> = neighbours(&probe, &full)
            .iter()
            .map(|c| c.cca3.clone())
            .collect();
        assert_eq!(codes, vec!["MEX", "CAN"]);
    }

    #[test]
    fn test_neighbours_with_empty_full_list() {
        let mut probe = country("TST", "Probe", 0, None, "Americas");
        probe.borders = vec!["USA".to_string()];
        assert!(neighbours(&probe, &[]).is_empty());
    }

    #[test]
    fn test_rebind_tracks_reloaded_list() {
        let full = fixture_countries();
        let mut selection = Selection::default();
        selection.select(Arc::new(country("FRA", "Old France", 0, None, "Europe")));

        selection.rebind(&full);
        let current = selection.current().map(|c| c.name.common.as_str());
        assert_eq!(current, Some("France"));

        selection.rebind(&[]);
        assert!(selection.current().is_none());
    }
}
