//! Facet derivation: the distinct filterable values present in a
//! collection, used to populate the filter drawer.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use pawcart_catalog::Product;

use crate::engine::{CollectionConfig, MatchStrategy};

/// Distinct values observed for one facet, in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetValues {
    pub name: String,
    pub values: Vec<String>,
}

/// Read-only facet summary of a product collection.
///
/// Regenerated whenever the source collection changes; never mutated by
/// user filter selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetSet {
    facets: Vec<FacetValues>,
}

impl FacetSet {
    pub fn get(&self, name: &str) -> Option<&FacetValues> {
        self.facets.iter().find(|f| f.name == name)
    }

    pub fn values(&self, name: &str) -> &[String] {
        self.get(name).map(|f| f.values.as_slice()).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = &FacetValues> {
        self.facets.iter()
    }

    pub fn len(&self) -> usize {
        self.facets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facets.is_empty()
    }
}

/// Derive the facet option sets for a collection.
///
/// Data-backed facets collect the distinct non-empty values across all
/// products, trimmed of surrounding whitespace, in first-seen order (the
/// display ordering the storefront relies on). Distinctness is
/// case-sensitive: "Chicken" and "chicken" stay separate options, even
/// though *matching* is case-insensitive — observed source behavior,
/// deliberately not unified here. The price facet's options are the
/// configured range labels, not product data.
///
/// Pure and deterministic; runs in O(products × facets).
pub fn extract_facets(products: &[Product], config: &CollectionConfig) -> FacetSet {
    let mut facets = Vec::with_capacity(config.facets.len());
    for rule in &config.facets {
        if rule.strategy == MatchStrategy::PriceRange {
            facets.push(FacetValues {
                name: rule.name.clone(),
                values: config.price_ranges.clone(),
            });
            continue;
        }

        let mut seen: HashSet<&str> = HashSet::new();
        let mut values = Vec::new();
        for product in products {
            for value in rule.field_values(product) {
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    continue;
                }
                if seen.insert(trimmed) {
                    values.push(trimmed.to_string());
                }
            }
        }
        facets.push(FacetValues {
            name: rule.name.clone(),
            values,
        });
    }
    FacetSet { facets }
}
