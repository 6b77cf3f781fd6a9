//! User-controlled filter state.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Display order applied after filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Source order preserved; no comparator applied.
    #[default]
    Featured,
    PriceLowToHigh,
    PriceHighToLow,
    NameAToZ,
    NameZToA,
}

impl SortOrder {
    /// Parse a sort drawer label.
    ///
    /// Unrecognized labels fall back to `Featured` — including
    /// "Best selling", which the storefront lists but never wires to a
    /// comparator.
    pub fn from_label(label: &str) -> Self {
        match label {
            "Price, low to high" => Self::PriceLowToHigh,
            "Price, high to low" => Self::PriceHighToLow,
            "Alphabetically, A-Z" => Self::NameAToZ,
            "Alphabetically, Z-A" => Self::NameZToA,
            _ => Self::Featured,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Featured => "Featured",
            Self::PriceLowToHigh => "Price, low to high",
            Self::PriceHighToLow => "Price, high to low",
            Self::NameAToZ => "Alphabetically, A-Z",
            Self::NameZToA => "Alphabetically, Z-A",
        }
    }
}

/// User-controlled filter state for one collection view.
///
/// Facet selections map facet name → selected values; an empty or absent
/// set leaves that facet unconstrained. Price ranges are the values of
/// the price facet. The selection owns no product or facet data, and only
/// explicit operations change it — the engine treats it as read-only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    /// Category/route target (e.g. "cat-bowls"); `None` falls back to
    /// the collection's default slug.
    pub target: Option<String>,
    /// Free-text restriction carried by the `sub` query parameter.
    pub search: Option<String>,
    pub facets: BTreeMap<String, Vec<String>>,
    pub sort_by: SortOrder,
}

impl FilterSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle `value` in `facet`'s selected set.
    pub fn toggle(&mut self, facet: &str, value: &str) {
        let values = self.facets.entry(facet.to_string()).or_default();
        if let Some(pos) = values.iter().position(|v| v == value) {
            values.remove(pos);
            if values.is_empty() {
                self.facets.remove(facet);
            }
        } else {
            values.push(value.to_string());
        }
    }

    pub fn set_sort(&mut self, sort_by: SortOrder) {
        self.sort_by = sort_by;
    }

    /// Reset every facet, search and sort selection; the category target
    /// belongs to the page, not the drawer, and survives.
    pub fn clear_all(&mut self) {
        self.search = None;
        self.facets.clear();
        self.sort_by = SortOrder::default();
    }

    /// Selected values for `facet` (empty slice when inactive).
    pub fn selected(&self, facet: &str) -> &[String] {
        self.facets.get(facet).map(Vec::as_slice).unwrap_or(&[])
    }

    /// True when no facet, search or sort constraint is active.
    pub fn is_neutral(&self) -> bool {
        self.search.is_none() && self.facets.is_empty() && self.sort_by == SortOrder::Featured
    }
}
