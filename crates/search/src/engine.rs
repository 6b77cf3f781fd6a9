//! The filter/sort engine.
//!
//! One engine per collection configuration. The pipeline is fixed:
//! category targeting, free-text restriction, facet filtering (AND across
//! facets, OR within a facet), then sorting. Every stage produces fresh
//! data; products and selection are never mutated.

use serde::{Deserialize, Serialize};
use tracing::debug;

use pawcart_catalog::Product;
use pawcart_core::{Slug, contains_ignore_case, slugify};

use crate::facets::{FacetSet, extract_facets};
use crate::price::PriceRange;
use crate::selection::{FilterSelection, SortOrder};

/// Species implied by a collection (the storefront's `/cats/...` vs
/// `/shop-for-dogs/...` sections).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Species {
    Dog,
    Cat,
}

impl Species {
    pub fn token(self) -> &'static str {
        match self {
            Self::Dog => "dog",
            Self::Cat => "cat",
        }
    }
}

/// Canonical product field addressed by a facet rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldRef {
    Name,
    Brand,
    Category,
    Subcategory,
    ProductType,
    LifeStage,
    BreedSize,
    SpecialDiet,
    ProteinSource,
    Weight,
    Size,
    Tags,
    Variants,
}

impl FieldRef {
    /// Values this field contributes for one product. Classification
    /// fields are single-valued; tags and variants contribute each entry.
    pub(crate) fn values(self, p: &Product) -> Vec<&str> {
        match self {
            Self::Name => vec![p.name.as_str()],
            Self::Brand => vec![p.brand.as_str()],
            Self::Category => vec![p.category.as_str()],
            Self::Subcategory => vec![p.subcategory.as_str()],
            Self::ProductType => vec![p.product_type.as_str()],
            Self::LifeStage => vec![p.life_stage.as_str()],
            Self::BreedSize => vec![p.breed_size.as_str()],
            Self::SpecialDiet => vec![p.special_diet.as_str()],
            Self::ProteinSource => vec![p.protein_source.as_str()],
            Self::Weight => vec![p.weight.as_str()],
            Self::Size => vec![p.size.as_str()],
            Self::Tags => p.tags.iter().map(String::as_str).collect(),
            Self::Variants => p.variants.iter().map(String::as_str).collect(),
        }
    }
}

/// How selected facet values are matched against a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStrategy {
    /// The field equals the selected value verbatim (brand behavior).
    Equals,
    /// Any listed field contains the selected value, case-insensitively.
    /// Note the asymmetry with facet *extraction*, which is
    /// case-sensitive — observed source behavior, kept as-is.
    Contains,
    /// Selected values are price-range labels parsed against `price`.
    PriceRange,
}

/// One configurable facet: the name shown in the filter UI, the canonical
/// fields it reads, and its match strategy. Facet behavior is data, not
/// code branches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetRule {
    pub name: String,
    pub fields: Vec<FieldRef>,
    pub strategy: MatchStrategy,
}

impl FacetRule {
    pub fn equals(name: &str, field: FieldRef) -> Self {
        Self {
            name: name.to_string(),
            fields: vec![field],
            strategy: MatchStrategy::Equals,
        }
    }

    pub fn contains(name: &str, fields: &[FieldRef]) -> Self {
        Self {
            name: name.to_string(),
            fields: fields.to_vec(),
            strategy: MatchStrategy::Contains,
        }
    }

    pub fn price(name: &str) -> Self {
        Self {
            name: name.to_string(),
            fields: Vec::new(),
            strategy: MatchStrategy::PriceRange,
        }
    }

    pub(crate) fn field_values<'a>(&self, p: &'a Product) -> Vec<&'a str> {
        self.fields.iter().flat_map(|f| f.values(p)).collect()
    }
}

/// Per-collection configuration: what used to be copy-pasted constants on
/// every category page, expressed as data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionConfig {
    /// Default category target (route slug) for this collection.
    pub slug: String,
    pub species: Option<Species>,
    /// Product-name keywords that admit a product into the collection
    /// even when its category fields don't match the target.
    pub name_keywords: Vec<String>,
    pub facets: Vec<FacetRule>,
    /// Recognized price-range labels offered by the filter drawer.
    pub price_ranges: Vec<String>,
}

/// The category-page filter pipeline.
#[derive(Debug, Clone)]
pub struct Engine {
    config: CollectionConfig,
}

impl Engine {
    pub fn new(config: CollectionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CollectionConfig {
        &self.config
    }

    /// Facet options for the filter UI: data-derived values for each
    /// configured facet plus the configured price-range labels.
    pub fn facet_options(&self, products: &[Product]) -> FacetSet {
        extract_facets(products, &self.config)
    }

    /// Run the full pipeline. Returns a fresh list; neither `products`
    /// nor `selection` is mutated.
    pub fn apply(&self, products: &[Product], selection: &FilterSelection) -> Vec<Product> {
        let target = slugify(selection.target.as_deref().unwrap_or(&self.config.slug));

        let mut working: Vec<Product> = products
            .iter()
            .filter(|p| self.matches_target(p, &target))
            .cloned()
            .collect();
        debug!(
            total = products.len(),
            matched = working.len(),
            target = %target,
            "category target applied"
        );

        if let Some(search) = selection.search.as_deref().filter(|s| !s.is_empty()) {
            let term = slugify(search);
            working.retain(|p| matches_search(p, &term));
            debug!(matched = working.len(), term = %term, "search restriction applied");
        }

        for rule in &self.config.facets {
            let selected = selection.selected(&rule.name);
            if selected.is_empty() {
                continue;
            }
            match rule.strategy {
                MatchStrategy::PriceRange => {
                    let ranges: Vec<PriceRange> = selected
                        .iter()
                        .filter_map(|label| {
                            let parsed = PriceRange::parse(label);
                            if parsed.is_none() {
                                debug!(label = %label, "unparseable price range label; never matches");
                            }
                            parsed
                        })
                        .collect();
                    working.retain(|p| ranges.iter().any(|r| r.contains(p.price)));
                }
                MatchStrategy::Equals => {
                    working.retain(|p| {
                        let values = rule.field_values(p);
                        selected.iter().any(|s| values.contains(&s.as_str()))
                    });
                }
                MatchStrategy::Contains => {
                    working.retain(|p| {
                        selected.iter().any(|s| {
                            rule.field_values(p)
                                .iter()
                                .any(|v| contains_ignore_case(v, s))
                        })
                    });
                }
            }
            debug!(facet = %rule.name, matched = working.len(), "facet filter applied");
        }

        for (name, values) in &selection.facets {
            if !values.is_empty() && self.config.facets.iter().all(|r| r.name != *name) {
                debug!(facet = %name, "selection references an unknown facet; no constraint applied");
            }
        }

        sort(&mut working, selection.sort_by);
        working
    }

    /// OR-of-heuristics category membership: normalized category or
    /// subcategory equals the target, either contains the species token,
    /// or the product name carries one of the collection's keywords.
    /// There is no canonical category id across backend feeds, so every
    /// disjunct is load-bearing.
    fn matches_target(&self, p: &Product, target: &str) -> bool {
        let c = Slug::new(&p.category);
        let sc = Slug::new(&p.subcategory);
        if c == *target || sc == *target {
            return true;
        }
        if let Some(species) = self.config.species {
            if c.contains(species.token()) || sc.contains(species.token()) {
                return true;
            }
        }
        let name = p.name.to_lowercase();
        self.config
            .name_keywords
            .iter()
            .any(|kw| name.contains(&kw.to_lowercase()))
    }
}

/// `sub` query restriction: normalized subcategory equals the term, the
/// joined normalized tags contain it, or the name contains the term with
/// hyphens respaced.
fn matches_search(p: &Product, term: &str) -> bool {
    if Slug::new(&p.subcategory) == *term {
        return true;
    }
    let tags = p
        .tags
        .iter()
        .map(|t| slugify(t))
        .collect::<Vec<_>>()
        .join(" ");
    if tags.contains(term) {
        return true;
    }
    p.name.to_lowercase().contains(&term.replace('-', " "))
}

/// Stable sorts only: ties preserve the filtered order.
fn sort(products: &mut [Product], order: SortOrder) {
    match order {
        SortOrder::Featured => {}
        SortOrder::PriceLowToHigh => products.sort_by(|a, b| a.price.total_cmp(&b.price)),
        SortOrder::PriceHighToLow => products.sort_by(|a, b| b.price.total_cmp(&a.price)),
        SortOrder::NameAToZ => products.sort_by(|a, b| a.name.cmp(&b.name)),
        SortOrder::NameZToA => products.sort_by(|a, b| b.name.cmp(&a.name)),
    }
}
