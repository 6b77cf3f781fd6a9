//! Strongly-typed identifiers used across the domain.
//!
//! Identifiers are issued by the catalog backend and treated as opaque,
//! non-empty strings on this side. Nothing here generates new ids.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// Identifier of a catalog product.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

/// Identifier of a shopping cart (one per storefront session).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartId(String);

macro_rules! impl_string_id {
    ($t:ty, $name:literal) => {
        impl $t {
            /// Wrap a backend-issued identifier.
            ///
            /// Rejects empty or blank strings; everything else is opaque.
            pub fn new(id: impl Into<String>) -> Result<Self, CatalogError> {
                let id = id.into();
                if id.trim().is_empty() {
                    return Err(CatalogError::invalid_id(concat!(
                        $name,
                        ": must not be empty"
                    )));
                }
                Ok(Self(id))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<$t> for String {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl FromStr for $t {
            type Err = CatalogError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }
    };
}

impl_string_id!(ProductId, "ProductId");
impl_string_id!(CartId, "CartId");
