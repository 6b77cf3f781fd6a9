use serde::{Deserialize, Serialize};

use pawcart_core::{CatalogError, CatalogResult, ProductId};

/// One saved product. Wishlists track products, not variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WishlistEntry {
    pub product_id: ProductId,
    pub name: String,
    pub image: String,
    pub price: f64,
}

/// A session wishlist: an ordered set of saved products.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Wishlist {
    entries: Vec<WishlistEntry>,
}

impl Wishlist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[WishlistEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.entries.iter().any(|e| e.product_id == *product_id)
    }

    /// Save a product; a product can be saved only once.
    pub fn add(&mut self, entry: WishlistEntry) -> CatalogResult<()> {
        if self.contains(&entry.product_id) {
            return Err(CatalogError::conflict("product already in wishlist"));
        }
        self.entries.push(entry);
        Ok(())
    }

    pub fn remove(&mut self, product_id: &ProductId) -> CatalogResult<()> {
        let before = self.entries.len();
        self.entries.retain(|e| e.product_id != *product_id);
        if self.entries.len() == before {
            return Err(CatalogError::not_found());
        }
        Ok(())
    }

    /// Save or unsave in one step (the heart button). Returns whether the
    /// product is saved afterwards.
    pub fn toggle(&mut self, entry: WishlistEntry) -> bool {
        if self.contains(&entry.product_id) {
            self.entries.retain(|e| e.product_id != entry.product_id);
            false
        } else {
            self.entries.push(entry);
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, name: &str, price: f64) -> WishlistEntry {
        WishlistEntry {
            product_id: ProductId::new(id).unwrap(),
            name: name.to_string(),
            image: "/assets/images/no_image.png".to_string(),
            price,
        }
    }

    #[test]
    fn add_then_contains_then_remove() {
        let mut wishlist = Wishlist::new();
        wishlist.add(entry("cb1", "Ceramic Cat Bowl", 399.0)).unwrap();

        let id = ProductId::new("cb1").unwrap();
        assert!(wishlist.contains(&id));
        assert_eq!(wishlist.len(), 1);

        wishlist.remove(&id).unwrap();
        assert!(wishlist.is_empty());
    }

    #[test]
    fn duplicate_add_conflicts() {
        let mut wishlist = Wishlist::new();
        wishlist.add(entry("cb1", "Ceramic Cat Bowl", 399.0)).unwrap();
        assert!(matches!(
            wishlist.add(entry("cb1", "Ceramic Cat Bowl", 399.0)),
            Err(CatalogError::Conflict(_))
        ));
        assert_eq!(wishlist.len(), 1);
    }

    #[test]
    fn removing_a_missing_product_is_not_found() {
        let mut wishlist = Wishlist::new();
        assert!(matches!(
            wishlist.remove(&ProductId::new("nope").unwrap()),
            Err(CatalogError::NotFound)
        ));
    }

    #[test]
    fn toggle_flips_membership() {
        let mut wishlist = Wishlist::new();
        assert!(wishlist.toggle(entry("cb1", "Ceramic Cat Bowl", 399.0)));
        assert!(!wishlist.toggle(entry("cb1", "Ceramic Cat Bowl", 399.0)));
        assert!(wishlist.is_empty());
    }

    #[test]
    fn entries_keep_insertion_order() {
        let mut wishlist = Wishlist::new();
        wishlist.add(entry("t1", "Crunchy Salmon Treats", 129.0)).unwrap();
        wishlist.add(entry("t2", "Creamy Tuna Pouch", 79.0)).unwrap();
        let names: Vec<_> = wishlist.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["Crunchy Salmon Treats", "Creamy Tuna Pouch"]);
    }
}
