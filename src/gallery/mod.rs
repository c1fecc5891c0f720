//! Visible-set derivation from filter and search criteria.
//!
//! [`visible_set`] is a pure function of the catalog and the current
//! [`FilterState`]; the rest of the application only ever consumes its
//! output. Recomputation happens whenever the filter changes; the derived
//! set is never patched in place.

use crate::catalog::{ALL_CATEGORY, Catalog, Item, ItemId};

/// Active filter and search criteria.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    /// [`ALL_CATEGORY`] or one of the catalog's category tags.
    pub category: String,
    /// Free text, matched case-insensitively against title and description.
    pub search_term: String,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            category: ALL_CATEGORY.to_string(),
            search_term: String::new(),
        }
    }
}

impl FilterState {
    pub fn is_default(&self) -> bool {
        self.category == ALL_CATEGORY && self.search_term.is_empty()
    }

    /// Reset to defaults (the empty-state "clear filters" affordance).
    pub fn clear(&mut self) {
        self.category = ALL_CATEGORY.to_string();
        self.search_term.clear();
    }
}

/// Whether a single item satisfies both filter predicates.
pub fn matches(item: &Item, filter: &FilterState) -> bool {
    let category_ok = filter.category == ALL_CATEGORY || item.category == filter.category;
    if !category_ok {
        return false;
    }
    if filter.search_term.is_empty() {
        return true;
    }
    let needle = filter.search_term.to_lowercase();
    item.title.to_lowercase().contains(&needle)
        || item.description.to_lowercase().contains(&needle)
}

/// Derive the ordered visible subset of the catalog.
///
/// Order preserves catalog order. An empty result is valid.
pub fn visible_set(catalog: &Catalog, filter: &FilterState) -> Vec<ItemId> {
    catalog
        .items()
        .iter()
        .filter(|item| matches(item, filter))
        .map(|item| item.id)
        .collect()
}

/// Step to the next category option, wrapping at the end of the list.
///
/// A `current` value not present in `options` restarts at the first option.
pub fn next_category(options: &[String], current: &str) -> String {
    cycle_category(options, current, 1)
}

/// Step to the previous category option, wrapping at the start of the list.
pub fn prev_category(options: &[String], current: &str) -> String {
    cycle_category(options, current, -1)
}

fn cycle_category(options: &[String], current: &str, step: isize) -> String {
    if options.is_empty() {
        return ALL_CATEGORY.to_string();
    }
    let len = options.len() as isize;
    let position = options.iter().position(|c| c == current);
    let next = position.map_or(0, |idx| (idx as isize + step).rem_euclid(len) as usize);
    options[next].clone()
}
