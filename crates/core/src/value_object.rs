//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by their attribute
/// values** — two with the same values are the same value. To "modify"
/// one, construct a new one. Contrast with entities, which carry identity
/// across state changes.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
