use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use pawcart_core::{Aggregate, AggregateRoot, CartId, CatalogError, ProductId};

use crate::event::Event;

/// One cart line. Lines are keyed by `(product_id, variant)` — adding the
/// same product in the same variant merges quantities into one line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: ProductId,
    pub name: String,
    pub image: String,
    /// Unit selling price at the time of the latest add.
    pub unit_price: f64,
    /// Unit pre-discount price (equals `unit_price` without a discount).
    pub original_price: f64,
    pub variant: Option<String>,
    pub quantity: u32,
}

impl CartLine {
    fn keyed(&self, product_id: &ProductId, variant: Option<&str>) -> bool {
        self.product_id == *product_id && self.variant.as_deref() == variant
    }
}

/// Aggregate root: ShoppingCart (one per storefront session).
#[derive(Debug, Clone, PartialEq)]
pub struct ShoppingCart {
    id: CartId,
    lines: Vec<CartLine>,
    version: u64,
}

impl ShoppingCart {
    /// Create an empty cart instance for rehydration.
    pub fn empty(id: CartId) -> Self {
        Self {
            id,
            lines: Vec::new(),
            version: 0,
        }
    }

    pub fn id_typed(&self) -> &CartId {
        &self.id
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn line(&self, product_id: &ProductId, variant: Option<&str>) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.keyed(product_id, variant))
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total number of items (sum of line quantities) — the cart badge.
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    pub fn subtotal(&self) -> f64 {
        self.lines
            .iter()
            .map(|l| l.unit_price * f64::from(l.quantity))
            .sum()
    }

    /// Amount saved against pre-discount prices.
    pub fn savings(&self) -> f64 {
        self.lines
            .iter()
            .map(|l| (l.original_price - l.unit_price).max(0.0) * f64::from(l.quantity))
            .sum()
    }
}

impl AggregateRoot for ShoppingCart {
    type Id = CartId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: AddItem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddItem {
    pub cart_id: CartId,
    pub product_id: ProductId,
    pub name: String,
    pub image: String,
    pub unit_price: f64,
    pub original_price: f64,
    pub variant: Option<String>,
    pub quantity: u32,
    pub occurred_at: DateTime<Utc>,
}

/// Command: RemoveItem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoveItem {
    pub cart_id: CartId,
    pub product_id: ProductId,
    pub variant: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

/// Command: SetQuantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetQuantity {
    pub cart_id: CartId,
    pub product_id: ProductId,
    pub variant: Option<String>,
    pub quantity: u32,
    pub occurred_at: DateTime<Utc>,
}

/// Command: ClearCart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClearCart {
    pub cart_id: CartId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CartCommand {
    AddItem(AddItem),
    RemoveItem(RemoveItem),
    SetQuantity(SetQuantity),
    ClearCart(ClearCart),
}

/// Event: ItemAdded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemAdded {
    pub cart_id: CartId,
    pub product_id: ProductId,
    pub name: String,
    pub image: String,
    pub unit_price: f64,
    pub original_price: f64,
    pub variant: Option<String>,
    pub quantity: u32,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ItemRemoved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRemoved {
    pub cart_id: CartId,
    pub product_id: ProductId,
    pub variant: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

/// Event: QuantitySet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantitySet {
    pub cart_id: CartId,
    pub product_id: ProductId,
    pub variant: Option<String>,
    pub quantity: u32,
    pub occurred_at: DateTime<Utc>,
}

/// Event: CartCleared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartCleared {
    pub cart_id: CartId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CartEvent {
    ItemAdded(ItemAdded),
    ItemRemoved(ItemRemoved),
    QuantitySet(QuantitySet),
    CartCleared(CartCleared),
}

impl Event for CartEvent {
    fn event_type(&self) -> &'static str {
        match self {
            CartEvent::ItemAdded(_) => "cart.item.added",
            CartEvent::ItemRemoved(_) => "cart.item.removed",
            CartEvent::QuantitySet(_) => "cart.item.quantity_set",
            CartEvent::CartCleared(_) => "cart.cleared",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            CartEvent::ItemAdded(e) => e.occurred_at,
            CartEvent::ItemRemoved(e) => e.occurred_at,
            CartEvent::QuantitySet(e) => e.occurred_at,
            CartEvent::CartCleared(e) => e.occurred_at,
        }
    }
}

impl Aggregate for ShoppingCart {
    type Command = CartCommand;
    type Event = CartEvent;
    type Error = CatalogError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            CartEvent::ItemAdded(e) => {
                if let Some(line) = self
                    .lines
                    .iter_mut()
                    .find(|l| l.keyed(&e.product_id, e.variant.as_deref()))
                {
                    // Same product + variant merges; prices refresh from
                    // the latest add.
                    line.quantity = line.quantity.saturating_add(e.quantity);
                    line.unit_price = e.unit_price;
                    line.original_price = e.original_price;
                } else {
                    self.lines.push(CartLine {
                        product_id: e.product_id.clone(),
                        name: e.name.clone(),
                        image: e.image.clone(),
                        unit_price: e.unit_price,
                        original_price: e.original_price,
                        variant: e.variant.clone(),
                        quantity: e.quantity,
                    });
                }
            }
            CartEvent::ItemRemoved(e) => {
                self.lines
                    .retain(|l| !l.keyed(&e.product_id, e.variant.as_deref()));
            }
            CartEvent::QuantitySet(e) => {
                if let Some(line) = self
                    .lines
                    .iter_mut()
                    .find(|l| l.keyed(&e.product_id, e.variant.as_deref()))
                {
                    line.quantity = e.quantity;
                }
            }
            CartEvent::CartCleared(_) => {
                self.lines.clear();
            }
        }

        // Deterministic version tracking: +1 per applied event.
        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            CartCommand::AddItem(cmd) => self.handle_add(cmd),
            CartCommand::RemoveItem(cmd) => self.handle_remove(cmd),
            CartCommand::SetQuantity(cmd) => self.handle_set_quantity(cmd),
            CartCommand::ClearCart(cmd) => self.handle_clear(cmd),
        }
    }
}

impl ShoppingCart {
    fn ensure_cart_id(&self, cart_id: &CartId) -> Result<(), CatalogError> {
        if self.id != *cart_id {
            return Err(CatalogError::invariant("cart_id mismatch"));
        }
        Ok(())
    }

    fn handle_add(&self, cmd: &AddItem) -> Result<Vec<CartEvent>, CatalogError> {
        self.ensure_cart_id(&cmd.cart_id)?;

        if cmd.quantity == 0 {
            return Err(CatalogError::validation("quantity must be at least 1"));
        }
        if cmd.name.trim().is_empty() {
            return Err(CatalogError::validation("name cannot be empty"));
        }
        if !cmd.unit_price.is_finite() || cmd.unit_price < 0.0 {
            return Err(CatalogError::validation(
                "unit price must be finite and non-negative",
            ));
        }
        if !cmd.original_price.is_finite() || cmd.original_price < 0.0 {
            return Err(CatalogError::validation(
                "original price must be finite and non-negative",
            ));
        }

        Ok(vec![CartEvent::ItemAdded(ItemAdded {
            cart_id: cmd.cart_id.clone(),
            product_id: cmd.product_id.clone(),
            name: cmd.name.clone(),
            image: cmd.image.clone(),
            unit_price: cmd.unit_price,
            original_price: cmd.original_price,
            variant: cmd.variant.clone(),
            quantity: cmd.quantity,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_remove(&self, cmd: &RemoveItem) -> Result<Vec<CartEvent>, CatalogError> {
        self.ensure_cart_id(&cmd.cart_id)?;

        if self.line(&cmd.product_id, cmd.variant.as_deref()).is_none() {
            return Err(CatalogError::not_found());
        }

        Ok(vec![CartEvent::ItemRemoved(ItemRemoved {
            cart_id: cmd.cart_id.clone(),
            product_id: cmd.product_id.clone(),
            variant: cmd.variant.clone(),
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_set_quantity(&self, cmd: &SetQuantity) -> Result<Vec<CartEvent>, CatalogError> {
        self.ensure_cart_id(&cmd.cart_id)?;

        if cmd.quantity == 0 {
            return Err(CatalogError::validation(
                "quantity must be at least 1 (remove the item instead)",
            ));
        }
        if self.line(&cmd.product_id, cmd.variant.as_deref()).is_none() {
            return Err(CatalogError::not_found());
        }

        Ok(vec![CartEvent::QuantitySet(QuantitySet {
            cart_id: cmd.cart_id.clone(),
            product_id: cmd.product_id.clone(),
            variant: cmd.variant.clone(),
            quantity: cmd.quantity,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_clear(&self, cmd: &ClearCart) -> Result<Vec<CartEvent>, CatalogError> {
        self.ensure_cart_id(&cmd.cart_id)?;

        if self.lines.is_empty() {
            return Err(CatalogError::conflict("cart is already empty"));
        }

        Ok(vec![CartEvent::CartCleared(CartCleared {
            cart_id: cmd.cart_id.clone(),
            occurred_at: cmd.occurred_at,
        })])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cart_id() -> CartId {
        CartId::new("session-1").unwrap()
    }

    fn product_id(id: &str) -> ProductId {
        ProductId::new(id).unwrap()
    }

    fn test_time() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    fn add_cmd(product: &str, variant: Option<&str>, quantity: u32, price: f64) -> CartCommand {
        CartCommand::AddItem(AddItem {
            cart_id: cart_id(),
            product_id: product_id(product),
            name: format!("Product {product}"),
            image: "/assets/images/no_image.png".to_string(),
            unit_price: price,
            original_price: price,
            variant: variant.map(str::to_string),
            quantity,
            occurred_at: test_time(),
        })
    }

    fn apply_all(cart: &mut ShoppingCart, events: Vec<CartEvent>) {
        for event in &events {
            cart.apply(event);
        }
    }

    #[test]
    fn add_item_emits_item_added_event() {
        let cart = ShoppingCart::empty(cart_id());
        let events = cart.handle(&add_cmd("cb1", Some("Small"), 1, 399.0)).unwrap();
        assert_eq!(events.len(), 1);

        match &events[0] {
            CartEvent::ItemAdded(e) => {
                assert_eq!(e.product_id, product_id("cb1"));
                assert_eq!(e.quantity, 1);
                assert_eq!(e.unit_price, 399.0);
                assert_eq!(e.variant.as_deref(), Some("Small"));
            }
            other => panic!("expected ItemAdded, got {other:?}"),
        }
    }

    #[test]
    fn same_product_and_variant_merges_into_one_line() {
        let mut cart = ShoppingCart::empty(cart_id());
        let events = cart.handle(&add_cmd("cb1", Some("Small"), 1, 399.0)).unwrap();
        apply_all(&mut cart, events);
        let events = cart.handle(&add_cmd("cb1", Some("Small"), 2, 379.0)).unwrap();
        apply_all(&mut cart, events);

        assert_eq!(cart.lines().len(), 1);
        let line = cart.line(&product_id("cb1"), Some("Small")).unwrap();
        assert_eq!(line.quantity, 3);
        // Prices refresh from the latest add.
        assert_eq!(line.unit_price, 379.0);
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn different_variants_get_separate_lines() {
        let mut cart = ShoppingCart::empty(cart_id());
        for cmd in [
            add_cmd("cb1", Some("Small"), 1, 399.0),
            add_cmd("cb1", Some("Large"), 1, 499.0),
            add_cmd("cb1", None, 1, 399.0),
        ] {
            let events = cart.handle(&cmd).unwrap();
            apply_all(&mut cart, events);
        }
        assert_eq!(cart.lines().len(), 3);
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn add_item_rejects_zero_quantity_and_bad_prices() {
        let cart = ShoppingCart::empty(cart_id());
        assert!(matches!(
            cart.handle(&add_cmd("cb1", None, 0, 399.0)),
            Err(CatalogError::Validation(_))
        ));
        assert!(matches!(
            cart.handle(&add_cmd("cb1", None, 1, -1.0)),
            Err(CatalogError::Validation(_))
        ));
        assert!(matches!(
            cart.handle(&add_cmd("cb1", None, 1, f64::NAN)),
            Err(CatalogError::Validation(_))
        ));
    }

    #[test]
    fn add_item_rejects_blank_name() {
        let cart = ShoppingCart::empty(cart_id());
        let cmd = CartCommand::AddItem(AddItem {
            cart_id: cart_id(),
            product_id: product_id("cb1"),
            name: "   ".to_string(),
            image: String::new(),
            unit_price: 10.0,
            original_price: 10.0,
            variant: None,
            quantity: 1,
            occurred_at: test_time(),
        });
        assert!(matches!(
            cart.handle(&cmd),
            Err(CatalogError::Validation(_))
        ));
    }

    #[test]
    fn commands_against_a_different_cart_are_rejected() {
        let cart = ShoppingCart::empty(CartId::new("session-2").unwrap());
        assert!(matches!(
            cart.handle(&add_cmd("cb1", None, 1, 399.0)),
            Err(CatalogError::InvariantViolation(_))
        ));
    }

    #[test]
    fn remove_item_drops_the_line_and_missing_lines_are_not_found() {
        let mut cart = ShoppingCart::empty(cart_id());
        let events = cart.handle(&add_cmd("cb1", None, 2, 399.0)).unwrap();
        apply_all(&mut cart, events);

        let remove = CartCommand::RemoveItem(RemoveItem {
            cart_id: cart_id(),
            product_id: product_id("cb1"),
            variant: None,
            occurred_at: test_time(),
        });
        let events = cart.handle(&remove).unwrap();
        apply_all(&mut cart, events);
        assert!(cart.is_empty());

        assert!(matches!(
            cart.handle(&remove),
            Err(CatalogError::NotFound)
        ));
    }

    #[test]
    fn set_quantity_replaces_the_line_quantity() {
        let mut cart = ShoppingCart::empty(cart_id());
        let events = cart.handle(&add_cmd("cb1", None, 1, 399.0)).unwrap();
        apply_all(&mut cart, events);

        let set = CartCommand::SetQuantity(SetQuantity {
            cart_id: cart_id(),
            product_id: product_id("cb1"),
            variant: None,
            quantity: 5,
            occurred_at: test_time(),
        });
        let events = cart.handle(&set).unwrap();
        apply_all(&mut cart, events);
        assert_eq!(cart.item_count(), 5);

        let zero = CartCommand::SetQuantity(SetQuantity {
            cart_id: cart_id(),
            product_id: product_id("cb1"),
            variant: None,
            quantity: 0,
            occurred_at: test_time(),
        });
        assert!(matches!(
            cart.handle(&zero),
            Err(CatalogError::Validation(_))
        ));
    }

    #[test]
    fn clear_cart_empties_everything_and_rejects_empty_carts() {
        let mut cart = ShoppingCart::empty(cart_id());
        let clear = CartCommand::ClearCart(ClearCart {
            cart_id: cart_id(),
            occurred_at: test_time(),
        });
        assert!(matches!(
            cart.handle(&clear),
            Err(CatalogError::Conflict(_))
        ));

        let events = cart.handle(&add_cmd("cb1", None, 2, 399.0)).unwrap();
        apply_all(&mut cart, events);
        let events = cart.handle(&clear).unwrap();
        apply_all(&mut cart, events);
        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn subtotal_and_savings_agree_with_lines() {
        let mut cart = ShoppingCart::empty(cart_id());
        let cmd = CartCommand::AddItem(AddItem {
            cart_id: cart_id(),
            product_id: product_id("t2"),
            name: "Creamy Tuna Pouch".to_string(),
            image: String::new(),
            unit_price: 79.0,
            original_price: 99.0,
            variant: Some("3 Pack".to_string()),
            quantity: 2,
            occurred_at: test_time(),
        });
        let events = cart.handle(&cmd).unwrap();
        apply_all(&mut cart, events);

        assert_eq!(cart.subtotal(), 158.0);
        assert_eq!(cart.savings(), 40.0);
    }

    #[test]
    fn version_increments_on_apply() {
        let mut cart = ShoppingCart::empty(cart_id());
        assert_eq!(cart.version(), 0);

        let events = cart.handle(&add_cmd("cb1", None, 1, 399.0)).unwrap();
        apply_all(&mut cart, events);
        assert_eq!(cart.version(), 1);

        let events = cart.handle(&add_cmd("cb2", None, 1, 549.0)).unwrap();
        apply_all(&mut cart, events);
        assert_eq!(cart.version(), 2);
    }

    #[test]
    fn handle_does_not_mutate_state() {
        let mut cart = ShoppingCart::empty(cart_id());
        let events = cart.handle(&add_cmd("cb1", None, 1, 399.0)).unwrap();
        apply_all(&mut cart, events);
        let before = cart.clone();

        let events1 = cart.handle(&add_cmd("cb1", None, 1, 399.0)).unwrap();
        assert_eq!(cart, before);
        let events2 = cart.handle(&add_cmd("cb1", None, 1, 399.0)).unwrap();
        assert_eq!(cart, before);
        assert_eq!(events1, events2);
    }

    #[test]
    fn event_types_are_stable() {
        let events = ShoppingCart::empty(cart_id())
            .handle(&add_cmd("cb1", None, 1, 399.0))
            .unwrap();
        assert_eq!(events[0].event_type(), "cart.item.added");
        assert_eq!(events[0].version(), 1);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: apply is deterministic — the same event stream
            /// always produces the same cart state.
            #[test]
            fn apply_is_deterministic(
                quantities in proptest::collection::vec(1u32..5, 1..8),
                price in 1.0..1000.0f64,
            ) {
                let events: Vec<CartEvent> = quantities
                    .iter()
                    .map(|&q| CartEvent::ItemAdded(ItemAdded {
                        cart_id: cart_id(),
                        product_id: product_id("cb1"),
                        name: "Bowl".to_string(),
                        image: String::new(),
                        unit_price: price,
                        original_price: price,
                        variant: None,
                        quantity: q,
                        occurred_at: Utc::now(),
                    }))
                    .collect();

                let mut a = ShoppingCart::empty(cart_id());
                let mut b = ShoppingCart::empty(cart_id());
                for e in &events {
                    a.apply(e);
                    b.apply(e);
                }

                prop_assert_eq!(&a, &b);
                prop_assert_eq!(a.lines().len(), 1);
                let expected: u64 = quantities.iter().map(|&q| u64::from(q)).sum();
                prop_assert_eq!(a.item_count(), expected);
                prop_assert_eq!(a.version(), events.len() as u64);
            }

            /// Property: item_count always equals the sum of line
            /// quantities after any mix of adds.
            #[test]
            fn item_count_matches_lines(
                adds in proptest::collection::vec(("p[0-9]", 1u32..4), 0..10),
            ) {
                let mut cart = ShoppingCart::empty(cart_id());
                for (pid, q) in &adds {
                    let events = cart.handle(&add_cmd(pid, None, *q, 100.0)).unwrap();
                    for e in &events {
                        cart.apply(e);
                    }
                }
                let from_lines: u64 =
                    cart.lines().iter().map(|l| u64::from(l.quantity)).sum();
                prop_assert_eq!(cart.item_count(), from_lines);
            }
        }
    }
}
