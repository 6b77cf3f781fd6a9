//! Raw catalog records → canonical products.
//!
//! Backend feeds name the same fields inconsistently (`price` vs
//! `salePrice` vs `mrp`, `imageUrl` vs `image_path`, ...). Resolution
//! order per field is fixed and deterministic: the first present alias
//! wins and is coerced to the canonical type; a present-but-uncoercible
//! value degrades to the documented default rather than falling through
//! to later aliases. Normalization never fails.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::product::Product;

/// Catalog source configuration: API base and image serving locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSource {
    /// REST API base, e.g. `https://shop.example.com/api`.
    pub api_base: String,
    /// Route serving uploaded product images, joined onto `api_base`.
    pub image_route: String,
    /// Sentinel shown when no usable image candidate exists.
    pub placeholder_image: String,
}

impl CatalogSource {
    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
            image_route: "/admin/products/images".to_string(),
            placeholder_image: "/assets/images/no_image.png".to_string(),
        }
    }
}

/// One normalization result: the canonical product plus whether the
/// source record carried a stable identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Normalized {
    pub product: Product,
    /// False when the source record had no usable `id`. The record still
    /// normalizes; the caller decides whether to render it under a
    /// synthetic key.
    pub has_stable_id: bool,
}

impl Normalized {
    /// Key for list rendering: the stable id, or a deterministic
    /// position-derived fallback for records without one.
    pub fn render_key(&self, index: usize) -> String {
        if self.has_stable_id {
            self.product.id.clone()
        } else {
            format!("item-{index}")
        }
    }
}

/// Maps heterogeneous raw product records into the canonical shape.
#[derive(Debug, Clone)]
pub struct Normalizer {
    source: CatalogSource,
}

impl Normalizer {
    pub fn new(source: CatalogSource) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &CatalogSource {
        &self.source
    }

    /// Normalize one raw record.
    ///
    /// Never fails: missing or malformed fields degrade to defaults so
    /// that one bad catalog entry cannot take down a whole page.
    pub fn normalize(&self, raw: &Value) -> Normalized {
        let id = first_string(raw, &["id"]);
        let has_stable_id = !id.is_empty();
        if !has_stable_id {
            debug!("catalog record has no stable id; render with a synthetic key");
        }

        let mut brand = first_string(raw, &["brand", "manufacturer"]);
        if brand.is_empty() {
            brand = "Brand".to_string();
        }

        let price = first_non_negative(raw, &["price", "salePrice", "mrp"]).unwrap_or(0.0);
        let original_price =
            first_non_negative(raw, &["originalPrice", "mrp", "price"]).unwrap_or(price);

        let mut description = first_string(raw, &["description", "shortDescription"]);
        if description.is_empty() {
            description = "No description available".to_string();
        }

        let product = Product {
            id,
            name: first_string(raw, &["name", "title"]),
            brand,
            category: first_string(raw, &["category", "categoryId", "subcategory"]),
            subcategory: first_string(raw, &["subcategory"]),
            product_type: first_string(raw, &["productType", "type"]),
            tags: string_list(raw, "tags"),
            price,
            original_price,
            life_stage: first_string(raw, &["lifeStage", "age_group"]),
            breed_size: first_string(raw, &["breedSize", "breed"]),
            special_diet: first_string(raw, &["specialDiet"]),
            protein_source: first_string(raw, &["proteinSource", "protein"]),
            weight: first_string(raw, &["weight"]),
            size: first_string(raw, &["size"]),
            image: self.resolve_image(raw),
            badges: string_list(raw, "badges"),
            variants: variant_labels(raw),
            description,
            rating: first_non_negative(raw, &["rating", "ratingValue"]).unwrap_or(0.0),
            in_stock: !matches!(field(raw, "inStock"), Some(Value::Bool(false))),
            stock_quantity: first_quantity(raw, &["stockQuantity", "quantity"]),
        };

        Normalized {
            product,
            has_stable_id,
        }
    }

    /// Normalize a batch of raw records (one catalog fetch).
    pub fn normalize_all(&self, raw: &[Value]) -> Vec<Normalized> {
        raw.iter().map(|r| self.normalize(r)).collect()
    }

    /// Batch normalization discarding the stable-id flags.
    pub fn normalize_products(&self, raw: &[Value]) -> Vec<Product> {
        raw.iter().map(|r| self.normalize(r).product).collect()
    }

    fn resolve_image(&self, raw: &Value) -> String {
        let candidate = ["imageUrl", "image", "thumbnailUrl", "image_path"]
            .iter()
            .find_map(|alias| match field(raw, alias) {
                Some(Value::String(s)) if s.is_empty() => None,
                Some(v) => Some(v),
                None => None,
            });
        match candidate {
            Some(Value::String(s)) => self.resolve_image_url(s),
            // A present but non-string candidate is unresolvable.
            Some(_) => self.source.placeholder_image.clone(),
            None => self.source.placeholder_image.clone(),
        }
    }

    /// Resolve a raw image candidate to a displayable URL.
    ///
    /// Absolute URLs and data URIs pass through untouched, which is also
    /// what makes resolution idempotent. Filesystem-looking candidates
    /// (drive letter, UNC prefix, backslashes) are stripped to their
    /// trailing filename; bare filenames map onto the image route; the
    /// remainder is joined onto the API base.
    pub fn resolve_image_url(&self, candidate: &str) -> String {
        if candidate.is_empty() || candidate == self.source.placeholder_image {
            return self.source.placeholder_image.clone();
        }
        if is_absolute_url(candidate) || candidate.starts_with("data:") {
            return candidate.to_string();
        }

        let mut candidate = candidate.to_string();
        if looks_like_fs_path(&candidate) {
            candidate = candidate
                .rsplit(['\\', '/'])
                .next()
                .unwrap_or_default()
                .to_string();
        }
        if is_bare_filename(&candidate) {
            candidate = format!(
                "{}/{}",
                self.source.image_route.trim_end_matches('/'),
                candidate
            );
        }

        if candidate.starts_with('/') {
            format!("{}{}", self.source.api_base, candidate)
        } else {
            format!("{}/{}", self.source.api_base, candidate)
        }
    }
}

fn field<'a>(raw: &'a Value, name: &str) -> Option<&'a Value> {
    raw.get(name).filter(|v| !v.is_null())
}

/// First alias present as a usable string. Numbers are rendered (backend
/// ids arrive as either); objects contribute their `name` then `id`
/// member (the backend sends `{id, name}` category objects); empty
/// strings count as absent, matching the feeds' fallback chains.
fn first_string(raw: &Value, aliases: &[&str]) -> String {
    for alias in aliases {
        let Some(v) = field(raw, alias) else { continue };
        match v {
            Value::String(s) if !s.is_empty() => return s.clone(),
            Value::Number(n) => return n.to_string(),
            Value::Object(map) => {
                for key in ["name", "id"] {
                    match map.get(key) {
                        Some(Value::String(s)) if !s.is_empty() => return s.clone(),
                        Some(Value::Number(n)) => return n.to_string(),
                        _ => {}
                    }
                }
            }
            _ => {}
        }
    }
    String::new()
}

/// First alias present, coerced to a finite non-negative number. A
/// present-but-unparseable value coerces to 0 (first *present* wins; it
/// does not fall through to later aliases). `None` only when no alias is
/// present at all.
fn first_non_negative(raw: &Value, aliases: &[&str]) -> Option<f64> {
    for alias in aliases {
        if let Some(v) = field(raw, alias) {
            return Some(coerce_non_negative(v));
        }
    }
    None
}

fn coerce_non_negative(v: &Value) -> f64 {
    let parsed = match v {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };
    if parsed.is_finite() && parsed > 0.0 {
        parsed
    } else {
        0.0
    }
}

fn first_quantity(raw: &Value, aliases: &[&str]) -> u32 {
    for alias in aliases {
        if let Some(v) = field(raw, alias) {
            let parsed = match v {
                Value::Number(n) => n.as_f64().unwrap_or(0.0),
                Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
                _ => 0.0,
            };
            if parsed.is_finite() && parsed > 0.0 {
                return parsed as u32;
            }
            return 0;
        }
    }
    0
}

fn string_list(raw: &Value, alias: &str) -> Vec<String> {
    match field(raw, alias) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|v| match v {
                Value::String(s) if !s.is_empty() => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// `variants` entries are either plain labels or objects carrying a
/// `weight` or `label`. An absent (or non-array) field defaults to a
/// single "Default" entry; a present-but-empty array stays empty.
fn variant_labels(raw: &Value) -> Vec<String> {
    match field(raw, "variants") {
        Some(Value::Array(items)) => items.iter().filter_map(variant_label).collect(),
        _ => vec!["Default".to_string()],
    }
}

fn variant_label(v: &Value) -> Option<String> {
    match v {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Object(map) => ["weight", "label"].iter().find_map(|key| match map.get(*key) {
            Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        }),
        _ => None,
    }
}

fn is_absolute_url(s: &str) -> bool {
    let lower = s.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://") || s.starts_with("//")
}

fn looks_like_fs_path(s: &str) -> bool {
    let bytes = s.as_bytes();
    let drive_letter =
        bytes.len() >= 3 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' && bytes[2] == b'\\';
    drive_letter || s.starts_with("\\\\") || s.contains('\\')
}

fn is_bare_filename(s: &str) -> bool {
    if s.contains('/') {
        return false;
    }
    match s.rsplit_once('.') {
        Some((stem, ext)) => {
            !stem.is_empty() && !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric())
        }
        None => false,
    }
}
