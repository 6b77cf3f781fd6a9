//! Price-range label parsing.
//!
//! Range labels are the human-readable filter options of the form
//! `"INR 100 - INR 500"` or `"INR 1000+"`. Two-sided bounds are
//! inclusive; `+` ranges are strictly greater than the bound (source
//! comparison semantics). Labels that don't parse are simply not ranges;
//! the engine treats them as never matching.

use serde::{Deserialize, Serialize};

const CURRENCY_TOKEN: &str = "INR";

/// A parsed price range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub low: f64,
    /// `None` for open-ended `+` ranges.
    pub high: Option<f64>,
}

impl PriceRange {
    /// Parse a range label; `None` when the label is not a recognized
    /// range shape.
    pub fn parse(label: &str) -> Option<Self> {
        let cleaned: String = label
            .to_ascii_uppercase()
            .replace(CURRENCY_TOKEN, "")
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        if cleaned.is_empty() {
            return None;
        }

        if let Some(bound) = cleaned.strip_suffix('+') {
            let low = bound.parse::<f64>().ok()?;
            return Some(Self { low, high: None });
        }

        let (lo, hi) = cleaned.split_once('-')?;
        let low = lo.parse::<f64>().ok()?;
        let high = hi.parse::<f64>().ok()?;
        Some(Self {
            low,
            high: Some(high),
        })
    }

    pub fn contains(&self, price: f64) -> bool {
        match self.high {
            Some(high) => price >= self.low && price <= high,
            None => price > self.low,
        }
    }
}
