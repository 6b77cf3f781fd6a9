//! Demo catalog: the hardcoded products storefront pages show when the
//! live catalog is unreachable.
//!
//! This is data, not behavior — the caller decides when to substitute it
//! for a failed fetch. The entries mirror what the collection pages ship.

use crate::product::Product;

fn sample(
    id: &str,
    name: &str,
    image: &str,
    badges: &[&str],
    variants: &[&str],
    price: f64,
) -> Product {
    Product {
        id: id.to_string(),
        name: name.to_string(),
        image: image.to_string(),
        badges: badges.iter().map(|b| b.to_string()).collect(),
        variants: variants.iter().map(|v| v.to_string()).collect(),
        price,
        original_price: price,
        ..Product::default()
    }
}

/// Fallback products for the cat-bowls collection.
pub fn cat_bowls() -> Vec<Product> {
    vec![
        sample(
            "cb1",
            "Ceramic Cat Bowl",
            "/assets/images/essential/meowsi.webp",
            &["Durable"],
            &["Small", "Medium", "Large"],
            399.0,
        ),
        sample(
            "cb2",
            "Slow Feeder Bowl",
            "/assets/images/essential/whiskas.webp",
            &["Slow Feed"],
            &["One Size"],
            549.0,
        ),
        sample(
            "cb3",
            "Travel Water Fountain",
            "/assets/images/essential/sheba.webp",
            &["Portable"],
            &["500 ml"],
            1299.0,
        ),
    ]
}

/// Fallback products for the cat-treats collection.
pub fn cat_treats() -> Vec<Product> {
    vec![
        sample(
            "t1",
            "Crunchy Salmon Treats",
            "/assets/images/essential/meowsi.webp",
            &["New"],
            &["50 g", "100 g"],
            129.0,
        ),
        sample(
            "t2",
            "Creamy Tuna Pouch",
            "/assets/images/essential/whiskas.webp",
            &["Save 10%"],
            &["50 g", "3 Pack"],
            79.0,
        ),
        sample(
            "t3",
            "Soft Chicken Bites",
            "/assets/images/essential/sheba.webp",
            &["Best Seller"],
            &["30 g", "90 g"],
            149.0,
        ),
    ]
}

/// Fallback products for the cat-bedding collection.
pub fn cat_bedding() -> Vec<Product> {
    vec![
        sample(
            "b1",
            "Cozy Cat Bed",
            "/assets/images/essential/meowsi.webp",
            &["Comfort"],
            &["Small", "Large"],
            1299.0,
        ),
        sample(
            "b2",
            "Washable Mat",
            "/assets/images/essential/whiskas.webp",
            &["Durable"],
            &["50x50 cm", "70x70 cm"],
            799.0,
        ),
        sample(
            "b3",
            "Play Tent",
            "/assets/images/essential/sheba.webp",
            &["Fun"],
            &["One Size"],
            1599.0,
        ),
    ]
}
