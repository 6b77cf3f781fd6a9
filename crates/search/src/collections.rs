//! Built-in collection configurations.
//!
//! Each storefront category page used to carry its own copy of this data
//! (facet tables, price-range labels, target keywords) next to a
//! copy-pasted filter pipeline. Here the pipeline is one engine and the
//! per-collection differences are data.

use crate::engine::{CollectionConfig, FacetRule, FieldRef, Species};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Facet table shared by the food/treat style collections: the drawer
/// sections every such page shows, wired to the canonical fields the
/// source filters actually read.
fn treat_style_facets() -> Vec<FacetRule> {
    vec![
        FacetRule::equals("Brand", FieldRef::Brand),
        FacetRule::contains("Life Stage", &[FieldRef::LifeStage]),
        FacetRule::contains("Breed Size", &[FieldRef::BreedSize]),
        FacetRule::contains(
            "Product Type",
            &[FieldRef::ProductType, FieldRef::Subcategory, FieldRef::Name],
        ),
        FacetRule::contains("Special Diet", &[FieldRef::SpecialDiet]),
        FacetRule::contains("Protein Source", &[FieldRef::ProteinSource]),
        FacetRule::price("Price"),
        FacetRule::contains("Weight", &[FieldRef::Weight, FieldRef::Variants]),
        FacetRule::contains("Size", &[FieldRef::Size, FieldRef::Variants]),
        FacetRule::contains(
            "Sub Category",
            &[FieldRef::Subcategory, FieldRef::ProductType],
        ),
    ]
}

/// Cat treats collection.
pub fn cat_treats() -> CollectionConfig {
    CollectionConfig {
        slug: "cat-treats".to_string(),
        species: Some(Species::Cat),
        name_keywords: strings(&["treat"]),
        facets: treat_style_facets(),
        price_ranges: strings(&[
            "INR 10 - INR 100",
            "INR 101 - INR 200",
            "INR 201 - INR 500",
            "INR 500+",
        ]),
    }
}

/// Cat bowls & fountains collection.
pub fn cat_bowls() -> CollectionConfig {
    CollectionConfig {
        slug: "cat-bowls".to_string(),
        species: Some(Species::Cat),
        name_keywords: strings(&["bowl", "fountain"]),
        facets: vec![
            FacetRule::equals("Brand", FieldRef::Brand),
            // The source drawer lists material/purpose options but the
            // feeds carry no such field; names and tags are where those
            // words actually show up.
            FacetRule::contains("Material", &[FieldRef::Tags, FieldRef::Name]),
            FacetRule::contains("Size", &[FieldRef::Size, FieldRef::Variants]),
            FacetRule::contains("Purpose", &[FieldRef::Tags, FieldRef::Name]),
            FacetRule::price("Price"),
            FacetRule::contains(
                "Sub Category",
                &[FieldRef::Subcategory, FieldRef::ProductType],
            ),
        ],
        price_ranges: strings(&["INR 100 - INR 500", "INR 501 - INR 1000", "INR 1001+"]),
    }
}

/// Cat bedding collection.
pub fn cat_bedding() -> CollectionConfig {
    CollectionConfig {
        slug: "cat-bedding".to_string(),
        species: Some(Species::Cat),
        name_keywords: strings(&["bed", "scratch", "mat"]),
        facets: treat_style_facets(),
        price_ranges: strings(&[
            "INR 200 - INR 500",
            "INR 501 - INR 1000",
            "INR 1001 - INR 2000",
            "INR 2000+",
        ]),
    }
}

/// Dog grooming collection.
pub fn dog_grooming() -> CollectionConfig {
    CollectionConfig {
        slug: "dog-grooming".to_string(),
        species: Some(Species::Dog),
        name_keywords: strings(&["groom", "shampoo", "brush"]),
        facets: treat_style_facets(),
        price_ranges: strings(&[
            "INR 10 - INR 300",
            "INR 301 - INR 500",
            "INR 501 - INR 1000",
            "INR 1000+",
        ]),
    }
}

/// Dog bowls & diners collection.
///
/// This page matches facet values verbatim rather than by containment, so
/// its rules use the equals strategy throughout.
pub fn dog_bowls_diners() -> CollectionConfig {
    CollectionConfig {
        slug: "dog-bowls-diners".to_string(),
        species: Some(Species::Dog),
        name_keywords: strings(&["bowl", "diner", "fountain"]),
        facets: vec![
            FacetRule::equals("Brand", FieldRef::Brand),
            FacetRule::equals("Life Stage", FieldRef::LifeStage),
            FacetRule::equals("Breed Size", FieldRef::BreedSize),
            FacetRule::equals("Product Type", FieldRef::ProductType),
            FacetRule::equals("Special Diet", FieldRef::SpecialDiet),
            FacetRule::equals("Protein Source", FieldRef::ProteinSource),
            FacetRule::price("Price"),
            FacetRule::equals("Weight", FieldRef::Weight),
            FacetRule::equals("Size", FieldRef::Size),
            FacetRule::equals("Sub Category", FieldRef::Subcategory),
        ],
        price_ranges: strings(&[
            "INR 10 - INR 300",
            "INR 301 - INR 500",
            "INR 501 - INR 1000",
            "INR 1000 - INR 2000",
            "INR 2000+",
        ]),
    }
}

/// Look up a built-in collection by its route slug.
pub fn by_slug(slug: &str) -> Option<CollectionConfig> {
    let all = [
        cat_treats(),
        cat_bowls(),
        cat_bedding(),
        dog_grooming(),
        dog_bowls_diners(),
    ];
    all.into_iter().find(|c| c.slug == slug)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::price::PriceRange;

    fn all() -> Vec<CollectionConfig> {
        vec![
            cat_treats(),
            cat_bowls(),
            cat_bedding(),
            dog_grooming(),
            dog_bowls_diners(),
        ]
    }

    #[test]
    fn by_slug_round_trips_every_collection() {
        for config in all() {
            let found = by_slug(&config.slug).expect(&config.slug);
            assert_eq!(found, config);
        }
        assert!(by_slug("pharmacy").is_none());
    }

    #[test]
    fn every_configured_price_label_parses() {
        for config in all() {
            for label in &config.price_ranges {
                assert!(
                    PriceRange::parse(label).is_some(),
                    "{}: {label}",
                    config.slug
                );
            }
        }
    }

    #[test]
    fn every_collection_has_a_brand_and_a_price_facet() {
        for config in all() {
            assert!(config.facets.iter().any(|f| f.name == "Brand"));
            assert!(config.facets.iter().any(|f| f.name == "Price"));
        }
    }

    #[test]
    fn facet_names_are_unique_within_a_collection() {
        for config in all() {
            let mut names: Vec<_> = config.facets.iter().map(|f| f.name.clone()).collect();
            names.sort();
            names.dedup();
            assert_eq!(names.len(), config.facets.len(), "{}", config.slug);
        }
    }

    #[test]
    fn species_matches_the_slug_section() {
        for config in all() {
            let species = config.species.expect(&config.slug);
            assert!(config.slug.contains(species.token()), "{}", config.slug);
        }
    }
}
