//! Cart domain module (event-sourced).
//!
//! This crate contains the shopping cart and wishlist the storefront
//! pages drive, implemented purely as deterministic domain logic (no IO,
//! no HTTP, no storage).

pub mod cart;
pub mod event;
pub mod wishlist;

pub use cart::{
    AddItem, CartCleared, CartCommand, CartEvent, CartLine, ClearCart, ItemAdded, ItemRemoved,
    QuantitySet, RemoveItem, SetQuantity, ShoppingCart,
};
pub use event::Event;
pub use wishlist::{Wishlist, WishlistEntry};
