//! Faceted search over the canonical catalog.
//!
//! Three stages composed in a fixed pipeline: the normalizer (in
//! `pawcart-catalog`) produces canonical products, [`extract_facets`]
//! derives the selectable filter options once per collection, and
//! [`Engine::apply`] re-runs the filter/sort pass on every selection
//! change. All of it is pure: fresh output, inputs never mutated.

pub mod admin;
pub mod collections;
pub mod engine;
pub mod facets;
pub mod price;
pub mod selection;

pub use engine::{CollectionConfig, Engine, FacetRule, FieldRef, MatchStrategy, Species};
pub use facets::{FacetSet, FacetValues, extract_facets};
pub use price::PriceRange;
pub use selection::{FilterSelection, SortOrder};
