use serde::{Deserialize, Serialize};

/// Canonical, backend-shape-independent catalog product.
///
/// Constructed fresh on every catalog fetch and never mutated in place;
/// filtering and sorting always produce new derived lists. Classification
/// fields use the empty string for "absent" (the facet extractor skips
/// empty values).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Backend identifier; empty when the source record carried none.
    pub id: String,
    pub name: String,
    pub brand: String,
    pub category: String,
    pub subcategory: String,
    pub product_type: String,
    pub tags: Vec<String>,
    /// Selling price. Always finite and >= 0: a missing or unparseable
    /// source price normalizes to 0, never NaN.
    pub price: f64,
    /// Pre-discount price; equals `price` when no discount information
    /// exists in the source.
    pub original_price: f64,
    pub life_stage: String,
    pub breed_size: String,
    pub special_diet: String,
    pub protein_source: String,
    pub weight: String,
    pub size: String,
    /// Resolved, display-ready image URL (placeholder when unresolvable).
    pub image: String,
    /// Short labels; the first entry is the primary badge.
    pub badges: Vec<String>,
    /// Variant labels (weight/size options).
    pub variants: Vec<String>,
    pub description: String,
    pub rating: f64,
    pub in_stock: bool,
    pub stock_quantity: u32,
}

impl Product {
    /// True when the source carried a higher pre-discount price.
    pub fn is_discounted(&self) -> bool {
        self.original_price > self.price
    }
}

impl Default for Product {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            brand: String::new(),
            category: String::new(),
            subcategory: String::new(),
            product_type: String::new(),
            tags: Vec::new(),
            price: 0.0,
            original_price: 0.0,
            life_stage: String::new(),
            breed_size: String::new(),
            special_diet: String::new(),
            protein_source: String::new(),
            weight: String::new(),
            size: String::new(),
            image: String::new(),
            badges: Vec::new(),
            variants: Vec::new(),
            description: String::new(),
            rating: 0.0,
            in_stock: true,
            stock_quantity: 0,
        }
    }
}
