//! Admin console product-list filter.
//!
//! The admin panel filters differently from the storefront: a free
//! search term over name and description, and an exact category match.
//! Both constraints compose with AND.

use serde::{Deserialize, Serialize};

use pawcart_catalog::Product;
use pawcart_core::contains_ignore_case;

/// Admin list query state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminQuery {
    /// Case-insensitive containment over name or description; empty
    /// matches everything.
    pub search_term: String,
    /// Exact category equality; `None` matches everything.
    pub category: Option<String>,
}

/// Filter the admin product list. Returns a fresh list in input order.
pub fn filter_products(products: &[Product], query: &AdminQuery) -> Vec<Product> {
    products
        .iter()
        .filter(|p| matches(p, query))
        .cloned()
        .collect()
}

fn matches(p: &Product, query: &AdminQuery) -> bool {
    let matches_search = query.search_term.is_empty()
        || contains_ignore_case(&p.name, &query.search_term)
        || contains_ignore_case(&p.description, &query.search_term);
    let matches_category = query
        .category
        .as_deref()
        .is_none_or(|category| p.category == category);
    matches_search && matches_category
}
