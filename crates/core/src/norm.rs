//! Case/slug normalization shared by category matching and filtering.
//!
//! Every category surface compares display strings in a normalized token
//! form: lowercased, whitespace runs folded to `-`, everything outside
//! `[a-z0-9_-]` stripped. The storefront re-derived this per page; it
//! lives here once.

use serde::{Deserialize, Serialize};

use crate::value_object::ValueObject;

/// Normalize a display string to its slug token form.
///
/// Runs of whitespace become a single `-`; characters outside
/// `[a-z0-9_-]` (after lowercasing) are dropped. Leading/trailing
/// whitespace therefore becomes a leading/trailing hyphen, matching the
/// source feeds' observed comparison behavior.
pub fn slugify(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_whitespace = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !in_whitespace {
                out.push('-');
                in_whitespace = true;
            }
            continue;
        }
        in_whitespace = false;
        for lc in ch.to_lowercase() {
            if lc.is_ascii_alphanumeric() || lc == '_' || lc == '-' {
                out.push(lc);
            }
        }
    }
    out
}

/// Case-insensitive substring check (ASCII + Unicode simple lowercase).
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// A string already in slug token form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Slug(String);

impl Slug {
    pub fn new(s: &str) -> Self {
        Self(slugify(s))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Substring containment over the slug form.
    pub fn contains(&self, token: &str) -> bool {
        self.0.contains(token)
    }
}

impl ValueObject for Slug {}

impl core::fmt::Display for Slug {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl PartialEq<str> for Slug {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}
